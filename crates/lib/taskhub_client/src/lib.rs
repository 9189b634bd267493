//! # taskhub_client
//!
//! Typed HTTP client for the Taskhub API, plus the session layer that
//! tracks authentication state and the local task cache.

pub mod api;
pub mod error;
pub mod models;
pub mod session;

pub use api::ApiClient;
pub use error::{ClientError, Result};
pub use session::{PendingDelete, Session, SessionState};
