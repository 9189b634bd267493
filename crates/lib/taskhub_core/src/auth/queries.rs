//! User-table database queries.

use sqlx::PgPool;
use sqlx::types::Uuid;

use super::AuthError;
use crate::models::auth::UserRow;

/// Fetch a user by username, including the password hash.
pub async fn find_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<UserRow>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, password_hash, email, privilege FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Check whether a username is already taken.
pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, AuthError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

/// Create a new user with the default `read` privilege, returning the user ID.
///
/// A duplicate email slips past the explicit username check and is caught
/// by the UNIQUE constraint, surfaced as [`AuthError::Duplicate`].
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<Uuid, AuthError> {
    let user_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if e.as_database_error()
            .is_some_and(|db| db.is_unique_violation())
        {
            AuthError::Duplicate("email already registered".into())
        } else {
            AuthError::DbError(e)
        }
    })?;
    Ok(user_id)
}

/// Overwrite a user's password hash.
pub async fn update_password(
    pool: &PgPool,
    user_id: Uuid,
    password_hash: &str,
) -> Result<(), AuthError> {
    sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
        .bind(user_id)
        .bind(password_hash)
        .execute(pool)
        .await?;
    Ok(())
}
