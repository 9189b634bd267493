//! Authentication domain models.
//!
//! These are internal domain models, distinct from the API DTOs
//! (which have `#[serde(rename)]` for camelCase etc.).

use serde::{Deserialize, Serialize};

/// Coarse access tier stored on each user.
///
/// Persisted as the PG enum `privilege`. Carried in token claims but not
/// enforced by any authorization check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "privilege", rename_all = "snake_case")]
pub enum Privilege {
    #[default]
    Read,
    ReadWrite,
    FullControl,
}

/// Database row for `users`, including the password hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: sqlx::types::Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub privilege: Privilege,
}

/// JWT claims embedded in access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — user ID (standard JWT `sub` claim).
    pub sub: String,
    /// Username.
    pub username: String,
    /// Access tier of the user at login time.
    pub privilege: Privilege,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Issued at (unix timestamp).
    pub iat: i64,
}
