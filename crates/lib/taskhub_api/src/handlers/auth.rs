//! Authentication request handlers.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::models::{
    ChangePasswordRequest, LoginRequest, MessageResponse, RegisterRequest, TokenResponse,
};
use crate::services::auth;

/// `POST /users/register` — create a new user account.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<Json<MessageResponse>> {
    let resp = auth::register(&state.pool, &body.username, &body.password, &body.email).await?;
    Ok(Json(resp))
}

/// `POST /users/login` — authenticate with username + password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let resp = auth::login(
        &state.pool,
        &body.username,
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    Ok(Json(resp))
}

/// `POST /users/change-password` — re-authenticate, then overwrite the password.
pub async fn change_password_handler(
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let resp = auth::change_password(
        &state.pool,
        &body.username,
        &body.current_password,
        &body.new_password,
    )
    .await?;
    Ok(Json(resp))
}
