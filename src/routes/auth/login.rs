use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{AuthAPIError, Email, Password, UserStoreError},
    utils::auth::generate_auth_cookie,
};

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(StatusCode, CookieJar, Json<LoginResponse>), AuthAPIError> {
    let email = Email::parse(Secret::new(request.email))
        .map_err(|_| AuthAPIError::IncorrectCredentials)?;
    let password = Password::parse(request.password)
        .map_err(|_| AuthAPIError::IncorrectCredentials)?;
    let user_store = &state.user_store.read().await;

    user_store
        .validate_user(&email, &password)
        .await
        .map_err(|e| match e {
            UserStoreError::InvalidCredentials
            | UserStoreError::UserNotFound => {
                AuthAPIError::IncorrectCredentials
            }
            _ => AuthAPIError::UnexpectedError(eyre!(e)),
        })?;

    let user = user_store
        .get_user(&email)
        .await
        .map_err(|e| AuthAPIError::UnexpectedError(eyre!(e)))?;

    let auth_cookie = generate_auth_cookie(&user.email, &user.id)
        .map_err(AuthAPIError::UnexpectedError)?;
    let jar = jar.add(auth_cookie);

    let response = Json(LoginResponse {
        message: "Login successful".to_string(),
        user_id: user.id.as_ref().to_string(),
    });

    Ok((StatusCode::OK, jar, response))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: Secret<String>,
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct LoginResponse {
    pub message: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}
