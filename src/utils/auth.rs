use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use color_eyre::eyre::{eyre, Context, ContextCompat, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::{
    app_state::BannedTokenStoreType,
    domain::{AuthAPIError, BannedTokenStoreError, Email, UserId},
};

use super::constants::{JWT_COOKIE_NAME, JWT_SECRET};

// Create cookie with a new JWT auth token
#[tracing::instrument(name = "Generating auth cookie", skip_all)]
pub fn generate_auth_cookie(
    email: &Email,
    user_id: &UserId,
) -> Result<Cookie<'static>> {
    let token = generate_auth_token(email, user_id)?;
    Ok(create_auth_cookie(token))
}

// Create cookie and set the value to the passed-in token string
#[tracing::instrument(name = "Creating auth cookie", skip_all)]
fn create_auth_cookie(token: Secret<String>) -> Cookie<'static> {
    let cookie =
        Cookie::build((JWT_COOKIE_NAME, token.expose_secret().to_owned()))
            .path("/") // apply cookie to all URLs on the server
            .http_only(true) // prevent JavaScript from accessing the cookie
            .same_site(SameSite::Lax)
            .build();

    cookie
}

// This value determines how long the JWT auth token is valid for
pub const TOKEN_TTL_SECONDS: i64 = 600; // 10 minutes

// Create JWT auth token
#[tracing::instrument(name = "Generating auth token", skip_all)]
fn generate_auth_token(
    email: &Email,
    user_id: &UserId,
) -> Result<Secret<String>> {
    let delta = chrono::Duration::try_seconds(TOKEN_TTL_SECONDS)
        .wrap_err("Failed to create 10 minute time delta")?;

    // Create JWT expiration time
    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(eyre!("failed to add to current time"))?
        .timestamp();

    // Cast exp to a usize, which is what Claims expects
    let exp: usize = exp.try_into().wrap_err(format!(
        "failed to cast exp time to usize. exp time: {}",
        exp
    ))?;

    let sub = email.as_ref().expose_secret().to_owned();
    let id = user_id.as_ref().to_string();

    let claims = Claims { sub, id, exp };

    create_token(&claims)
}

// Check if JWT auth token is valid by decoding it using the JWT secret
#[tracing::instrument(name = "Validating auth token", skip_all)]
pub async fn validate_token(
    token: &Secret<String>,
    banned_token_store: BannedTokenStoreType,
) -> Result<Claims> {
    banned_token_store
        .read()
        .await
        .check_token(token)
        .await
        .map_err(|e| match e {
            BannedTokenStoreError::BannedToken => {
                jsonwebtoken::errors::Error::from(
                    jsonwebtoken::errors::ErrorKind::InvalidToken,
                )
            }
            _ => jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ),
        })?;

    decode::<Claims>(
        token.expose_secret(),
        &DecodingKey::from_secret(JWT_SECRET.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .wrap_err("failed to decode token")
}

// Create JWT auth token by encoding claims using the JWT secret
#[tracing::instrument(name = "Creating auth token", skip_all)]
fn create_token(claims: &Claims) -> Result<Secret<String>> {
    let token_string = encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.expose_secret().as_bytes()),
    )
    .wrap_err("failed to create token")?;

    Ok(Secret::new(token_string))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub id: String,
    pub exp: usize,
}

/// Session identity extracted from a validated JWT cookie.
pub struct SessionClaims {
    pub sub: String,
    pub id: UserId,
}

#[tracing::instrument(name = "Extracting claims from cookie", skip_all)]
pub async fn get_claims(
    jar: &CookieJar,
    banned_token_store: &BannedTokenStoreType,
) -> Result<SessionClaims, AuthAPIError> {
    let cookie =
        jar.get(JWT_COOKIE_NAME).ok_or(AuthAPIError::MissingToken)?;

    let token = Secret::new(cookie.value().to_owned());
    let claims = validate_token(&token, banned_token_store.clone())
        .await
        .map_err(|_| AuthAPIError::InvalidToken)?;

    let id =
        UserId::parse(&claims.id).map_err(|_| AuthAPIError::InvalidToken)?;

    Ok(SessionClaims {
        sub: claims.sub,
        id,
    })
}
