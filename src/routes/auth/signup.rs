use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use color_eyre::eyre::eyre;
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{
        AuthAPIError, Email, Password, User, UserName, UserPasswordHash,
        UserStoreError, ValidationError,
    },
};

#[tracing::instrument(name = "Signup", skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, AuthAPIError> {
    let name = UserName::parse(request.name)?;
    let email = Email::parse(Secret::new(request.email)).map_err(|e| {
        AuthAPIError::ValidationError(ValidationError::new(e.to_string()))
    })?;
    let password = Password::parse(request.password)?;

    let hash = UserPasswordHash::from_password(password)
        .await
        .map_err(AuthAPIError::UnexpectedError)?;

    let user = User::new(name, email, hash);

    {
        let mut user_store = state.user_store.write().await;
        user_store.add_user(user).await.map_err(|e| match e {
            UserStoreError::UserAlreadyExists => {
                AuthAPIError::UserAlreadyExists
            }
            err => AuthAPIError::UnexpectedError(eyre!(err)),
        })?;
    }

    let response = Json(SignupResponse {
        message: "User created successfully".to_string(),
    });

    Ok((StatusCode::CREATED, response))
}

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: Secret<String>,
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct SignupResponse {
    pub message: String,
}
