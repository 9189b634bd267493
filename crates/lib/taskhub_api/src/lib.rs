//! # taskhub_api
//!
//! HTTP API library for Taskhub.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use axum::Router;
use axum::routing::{delete, get, post, put};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{auth, objectives, tasks};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// API configuration.
    pub config: ApiConfig,
}

/// Run embedded database migrations.
///
/// Delegates to `taskhub_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    taskhub_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route(routes::POST_USERS_REGISTER, post(auth::register_handler))
        .route(routes::POST_USERS_LOGIN, post(auth::login_handler))
        .route(
            routes::POST_USERS_CHANGE_PASSWORD,
            post(auth::change_password_handler),
        )
        .route(
            routes::GET_DEPARTMENTAL_GOALS,
            get(objectives::list_departmental_goals_handler),
        );

    // Protected routes (require auth)
    let protected = Router::new()
        .route(routes::GET_TASKS, get(tasks::list_tasks_handler))
        .route(routes::POST_TASKS, post(tasks::create_task_handler))
        .route(routes::PUT_TASKS_ID, put(tasks::update_task_handler))
        .route(
            routes::PUT_TASKS_ID_TOGGLE,
            put(tasks::toggle_task_handler),
        )
        .route(routes::DELETE_TASKS_ID, delete(tasks::delete_task_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .with_state(state)
}
