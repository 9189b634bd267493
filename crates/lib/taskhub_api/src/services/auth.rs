//! Authentication service — register/login/change-password flows
//! delegating to `taskhub_core::auth`.

use sqlx::PgPool;
use tracing::info;

use taskhub_core::auth::{AuthError, password, queries};

use crate::error::{AppError, AppResult};
use crate::models::{MessageResponse, TokenResponse};

// Re-export from taskhub_core for consumers of this module.
pub use taskhub_core::auth::jwt::{resolve_jwt_secret, verify_access_token};
pub use taskhub_core::models::auth::TokenClaims;

/// Register a new user account with the default `Read` privilege.
///
/// The username is checked explicitly so a duplicate gets a clean 409;
/// a duplicate email is caught by the UNIQUE constraint instead.
pub async fn register(
    pool: &PgPool,
    username: &str,
    password_plain: &str,
    email: &str,
) -> AppResult<MessageResponse> {
    if username.trim().is_empty() || password_plain.is_empty() || email.trim().is_empty() {
        return Err(AppError::Validation(
            "Username, password and email are required".into(),
        ));
    }

    if queries::username_exists(pool, username).await? {
        return Err(AppError::Conflict("Username already exists".into()));
    }

    let pw_hash = password::hash_password(password_plain)?;
    queries::create_user(pool, username, email, &pw_hash).await?;

    info!(username, "user registered");
    Ok(MessageResponse {
        message: "User registered successfully".into(),
    })
}

/// Authenticate with username + password, issuing a signed access token.
pub async fn login(
    pool: &PgPool,
    username: &str,
    password_plain: &str,
    jwt_secret: &[u8],
) -> AppResult<TokenResponse> {
    let user = authenticate(pool, username, password_plain).await?;

    let token = taskhub_core::auth::jwt::generate_access_token(
        &user.id.to_string(),
        &user.username,
        user.privilege,
        jwt_secret,
    )?;

    Ok(TokenResponse { token })
}

/// Change a user's password after re-authenticating with the current one.
pub async fn change_password(
    pool: &PgPool,
    username: &str,
    current_password: &str,
    new_password: &str,
) -> AppResult<MessageResponse> {
    let user = authenticate(pool, username, current_password).await?;

    if new_password.is_empty() {
        return Err(AppError::Validation("New password is required".into()));
    }

    let pw_hash = password::hash_password(new_password)?;
    queries::update_password(pool, user.id, &pw_hash).await?;

    info!(username, "password changed");
    Ok(MessageResponse {
        message: "Password changed successfully".into(),
    })
}

/// Look up a user and verify the password hash.
///
/// Unknown usernames and wrong passwords produce the same generic error.
async fn authenticate(
    pool: &PgPool,
    username: &str,
    password_plain: &str,
) -> AppResult<taskhub_core::models::auth::UserRow> {
    let row = queries::find_user_by_username(pool, username).await?;

    let user = match row {
        None => return Err(AuthError::CredentialError.into()),
        Some(u) => u,
    };

    if !password::verify_password(password_plain, &user.password_hash)? {
        return Err(AuthError::CredentialError.into());
    }

    Ok(user)
}
