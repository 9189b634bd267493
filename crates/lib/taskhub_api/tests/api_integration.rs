//! Integration tests — start ephemeral PG, build the router, drive the REST
//! surface end to end.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use taskhub_api::{AppState, config::ApiConfig};
use taskhub_core::db::DbManager;

async fn setup() -> (DbManager, sqlx::PgPool, Router) {
    // Spin up an ephemeral PostgreSQL instance.
    let mut db = DbManager::ephemeral().await.expect("DbManager::ephemeral");
    db.setup().await.expect("db setup");
    db.start().await.expect("db start");

    let pool = sqlx::PgPool::connect(&db.connection_url())
        .await
        .expect("connect to ephemeral PG");

    taskhub_api::migrate(&pool).await.expect("run migrations");

    let state = AppState {
        pool: pool.clone(),
        config: ApiConfig {
            bind_addr: "127.0.0.1:0".into(),
            pg_connection_url: db.connection_url(),
            jwt_secret: "test-secret".into(),
        },
    };

    let app = taskhub_api::router(state);
    (db, pool, app)
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("parse JSON")
    };
    (status, json)
}

async fn register(app: &Router, username: &str, password: &str, email: &str) -> StatusCode {
    let (status, _) = send(
        app,
        request(
            Method::POST,
            "/users/register",
            None,
            Some(json!({"username": username, "password": password, "email": email})),
        ),
    )
    .await;
    status
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        request(
            Method::POST,
            "/users/login",
            None,
            Some(json!({"username": username, "password": password})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().expect("token is string").to_string()
}

#[tokio::test]
async fn register_login_task_lifecycle() {
    let (mut db, _pool, app) = setup().await;

    // Register once → success.
    assert_eq!(
        register(&app, "alice", "pw123", "alice@example.com").await,
        StatusCode::OK
    );

    // Same username again → conflict.
    assert_eq!(
        register(&app, "alice", "other", "alice2@example.com").await,
        StatusCode::CONFLICT
    );

    let token = login(&app, "alice", "pw123").await;

    // Create a task.
    let (status, task) = send(
        &app,
        request(
            Method::POST,
            "/tasks",
            Some(&token),
            Some(json!({
                "title": "Finish report",
                "description": "Q3 summary",
                "date": "2024-01-01"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["completed"], false);
    assert_eq!(task["title"], "Finish report");
    assert!(task["departmentalGoal"].is_null());
    let task_id = task["id"].as_str().expect("task id").to_string();

    // It shows up in the list.
    let (status, list) = send(&app, request(Method::GET, "/tasks", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().expect("array").len(), 1);

    // Toggle it complete.
    let (status, toggled) = send(
        &app,
        request(
            Method::PUT,
            &format!("/tasks/{task_id}/toggle"),
            Some(&token),
            Some(json!({"completed": true})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["completed"], true);

    // Full update replaces every mutable field.
    let (status, updated) = send(
        &app,
        request(
            Method::PUT,
            &format!("/tasks/{task_id}"),
            Some(&token),
            Some(json!({
                "title": "Finish report v2",
                "description": "Q3 + Q4 summary",
                "date": "2024-02-01",
                "completed": false
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Finish report v2");
    assert_eq!(updated["completed"], false);

    // Delete → 204, second delete → 404.
    let (status, _) = send(
        &app,
        request(
            Method::DELETE,
            &format!("/tasks/{task_id}"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        request(
            Method::DELETE,
            &format!("/tasks/{task_id}"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // List is empty again.
    let (status, list) = send(&app, request(Method::GET, "/tasks", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().expect("array").len(), 0);

    db.stop().await.expect("db stop");
}

#[tokio::test]
async fn paired_toggles_restore_completion_state() {
    let (mut db, _pool, app) = setup().await;

    assert_eq!(
        register(&app, "tina", "pw", "tina@example.com").await,
        StatusCode::OK
    );
    let token = login(&app, "tina", "pw").await;

    let (_, task) = send(
        &app,
        request(
            Method::POST,
            "/tasks",
            Some(&token),
            Some(json!({"title": "t", "description": "d", "date": "2024-03-01"})),
        ),
    )
    .await;
    let task_id = task["id"].as_str().expect("task id").to_string();

    for completed in [true, false] {
        let (status, body) = send(
            &app,
            request(
                Method::PUT,
                &format!("/tasks/{task_id}/toggle"),
                Some(&token),
                Some(json!({"completed": completed})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["completed"], completed);
    }

    db.stop().await.expect("db stop");
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let (mut db, _pool, app) = setup().await;

    assert_eq!(
        register(&app, "carol", "pw", "carol@example.com").await,
        StatusCode::OK
    );
    // Different username, same email → the UNIQUE constraint answers.
    assert_eq!(
        register(&app, "carol2", "pw", "carol@example.com").await,
        StatusCode::CONFLICT
    );

    db.stop().await.expect("db stop");
}

#[tokio::test]
async fn empty_title_is_rejected() {
    let (mut db, _pool, app) = setup().await;

    assert_eq!(
        register(&app, "dave", "pw", "dave@example.com").await,
        StatusCode::OK
    );
    let token = login(&app, "dave", "pw").await;

    for title in ["", "   "] {
        let (status, body) = send(
            &app,
            request(
                Method::POST,
                "/tasks",
                Some(&token),
                Some(json!({"title": title, "description": "d", "date": "2024-01-01"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    db.stop().await.expect("db stop");
}

#[tokio::test]
async fn bad_credentials_are_unauthorized() {
    let (mut db, _pool, app) = setup().await;

    assert_eq!(
        register(&app, "erin", "pw123", "erin@example.com").await,
        StatusCode::OK
    );

    // Wrong password and unknown user produce the same generic 401.
    for (username, password) in [("erin", "wrong"), ("nobody", "pw123")] {
        let (status, body) = send(
            &app,
            request(
                Method::POST,
                "/users/login",
                None,
                Some(json!({"username": username, "password": password})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthorized");
    }

    db.stop().await.expect("db stop");
}

#[tokio::test]
async fn task_routes_require_a_valid_token() {
    let (mut db, _pool, app) = setup().await;

    let (status, _) = send(&app, request(Method::GET, "/tasks", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        request(Method::GET, "/tasks", Some("not-a-real-token"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    db.stop().await.expect("db stop");
}

#[tokio::test]
async fn mutating_another_users_task_is_not_found() {
    let (mut db, _pool, app) = setup().await;

    assert_eq!(
        register(&app, "alice", "pw", "alice@example.com").await,
        StatusCode::OK
    );
    assert_eq!(
        register(&app, "bob", "pw", "bob@example.com").await,
        StatusCode::OK
    );
    let alice = login(&app, "alice", "pw").await;
    let bob = login(&app, "bob", "pw").await;

    let (_, task) = send(
        &app,
        request(
            Method::POST,
            "/tasks",
            Some(&alice),
            Some(json!({"title": "secret", "description": "d", "date": "2024-01-01"})),
        ),
    )
    .await;
    let task_id = task["id"].as_str().expect("task id").to_string();

    // Bob knows the id but owns nothing: every mutation 404s.
    let (status, _) = send(
        &app,
        request(
            Method::PUT,
            &format!("/tasks/{task_id}"),
            Some(&bob),
            Some(json!({"title": "x", "description": "y", "date": "2024-01-02", "completed": true})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        request(
            Method::PUT,
            &format!("/tasks/{task_id}/toggle"),
            Some(&bob),
            Some(json!({"completed": true})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        request(
            Method::DELETE,
            &format!("/tasks/{task_id}"),
            Some(&bob),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Alice's task is untouched.
    let (status, list) = send(&app, request(Method::GET, "/tasks", Some(&alice), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["title"], "secret");
    assert_eq!(list[0]["completed"], false);

    db.stop().await.expect("db stop");
}

#[tokio::test]
async fn change_password_reauthenticates_first() {
    let (mut db, _pool, app) = setup().await;

    assert_eq!(
        register(&app, "frank", "old-pw", "frank@example.com").await,
        StatusCode::OK
    );

    // Wrong current password → 401, nothing changes.
    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/users/change-password",
            None,
            Some(json!({
                "username": "frank",
                "currentPassword": "wrong",
                "newPassword": "new-pw"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Correct current password → 200.
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/users/change-password",
            None,
            Some(json!({
                "username": "frank",
                "currentPassword": "old-pw",
                "newPassword": "new-pw"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password changed successfully");

    // Old password no longer works; the new one does.
    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/users/login",
            None,
            Some(json!({"username": "frank", "password": "old-pw"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let _ = login(&app, "frank", "new-pw").await;

    db.stop().await.expect("db stop");
}

#[tokio::test]
async fn objective_catalog_is_public_and_linkable() {
    let (mut db, pool, app) = setup().await;

    // The catalog is owned by an external process; seed it directly.
    sqlx::query(
        "INSERT INTO departmental_objectives (title, description) \
         VALUES ('Grow revenue', 'FY24 revenue targets'), ('Reduce churn', '')",
    )
    .execute(&pool)
    .await
    .expect("seed objectives");

    // Listed without any auth header.
    let (status, list) = send(&app, request(Method::GET, "/departmental-goals", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().expect("array");
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["title"], "Grow revenue");
    let objective_id = list[0]["id"].as_str().expect("objective id").to_string();

    // A task can link to an objective.
    assert_eq!(
        register(&app, "gina", "pw", "gina@example.com").await,
        StatusCode::OK
    );
    let token = login(&app, "gina", "pw").await;
    let (status, task) = send(
        &app,
        request(
            Method::POST,
            "/tasks",
            Some(&token),
            Some(json!({
                "title": "Quarterly review",
                "description": "d",
                "date": "2024-06-30",
                "departmentalGoal": objective_id
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["departmentalGoal"], objective_id.as_str());

    db.stop().await.expect("db stop");
}
