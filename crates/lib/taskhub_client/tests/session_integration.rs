//! Full-stack test — ephemeral PG, a real listening server, and a session
//! walked through register → login → task CRUD → logout.

use taskhub_api::{AppState, config::ApiConfig};
use taskhub_client::models::{TaskDraft, TaskEdit};
use taskhub_client::{ApiClient, ClientError, Session};
use taskhub_core::db::DbManager;

struct TestServer {
    db: DbManager,
    pool: sqlx::PgPool,
    base_url: url::Url,
}

async fn start_server() -> TestServer {
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

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    let base_url = format!("http://{addr}").parse().expect("base url");
    TestServer { db, pool, base_url }
}

#[tokio::test]
async fn session_walkthrough() {
    let mut server = start_server().await;
    let mut session = Session::new(ApiClient::new(server.base_url.clone()));

    // Register, then come back to log in.
    session.begin_register().expect("begin register");
    session
        .register("alice", "pw123", "alice@example.com")
        .await
        .expect("register");
    assert!(!session.is_authenticated());

    // Duplicate registration surfaces as Conflict.
    session.begin_register().expect("begin register");
    let err = session
        .register("alice", "pw123", "other@example.com")
        .await
        .expect_err("duplicate username");
    assert!(matches!(err, ClientError::Conflict(_)));
    session.cancel_register().expect("cancel register");

    // Login refreshes the (empty) cache.
    session.login("alice", "pw123").await.expect("login");
    assert!(session.is_authenticated());
    assert!(session.tasks().is_empty());

    // Pessimistic create: cache reflects the server's row.
    let task = session
        .create_task(TaskDraft {
            title: "Finish report".into(),
            description: "Q3 summary".into(),
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"),
            departmental_goal: None,
        })
        .await
        .expect("create task");
    assert!(!task.completed);
    assert_eq!(session.tasks().len(), 1);

    // Optimistic toggle confirmed by the server.
    let completed = session.toggle_task(task.id).await.expect("toggle");
    assert!(completed);
    assert!(session.tasks()[0].completed);

    // Pessimistic update.
    session
        .update_task(
            task.id,
            TaskEdit {
                title: "Finish report v2".into(),
                description: "Q3 + Q4".into(),
                date: chrono::NaiveDate::from_ymd_opt(2024, 2, 1).expect("date"),
                completed: false,
            },
        )
        .await
        .expect("update");
    assert_eq!(session.tasks()[0].title, "Finish report v2");
    assert!(!session.tasks()[0].completed);

    // Cancelled delete leaves server and cache untouched.
    let pending = session.begin_delete(task.id).expect("begin delete");
    pending.cancel();
    assert_eq!(session.tasks().len(), 1);
    session.refresh_tasks().await.expect("refresh");
    assert_eq!(session.tasks().len(), 1);

    // Confirmed delete removes the task everywhere.
    let pending = session.begin_delete(task.id).expect("begin delete");
    pending.confirm().await.expect("confirm delete");
    assert!(session.tasks().is_empty());
    session.refresh_tasks().await.expect("refresh");
    assert!(session.tasks().is_empty());

    // Logout discards the session token.
    session.logout().expect("logout");
    assert!(!session.is_authenticated());
    assert!(matches!(
        session.refresh_tasks().await,
        Err(ClientError::InvalidState(_))
    ));

    server.db.stop().await.expect("db stop");
}

#[tokio::test]
async fn optimistic_toggle_reverts_on_failure() {
    let mut server = start_server().await;
    let mut session = Session::new(ApiClient::new(server.base_url.clone()));

    session.begin_register().expect("begin register");
    session
        .register("bob", "pw", "bob@example.com")
        .await
        .expect("register");
    session.login("bob", "pw").await.expect("login");

    let task = session
        .create_task(TaskDraft {
            title: "Doomed".into(),
            description: "d".into(),
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"),
            departmental_goal: None,
        })
        .await
        .expect("create task");

    // Pull the row out from under the cache, so the toggle's confirm fails.
    sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(task.id)
        .execute(&server.pool)
        .await
        .expect("delete behind the session's back");

    let err = session.toggle_task(task.id).await.expect_err("toggle");
    assert!(matches!(err, ClientError::NotFound(_)));

    // The optimistic flip was reverted.
    assert!(!session.tasks()[0].completed);

    server.db.stop().await.expect("db stop");
}

#[tokio::test]
async fn objectives_are_readable_without_login() {
    let mut server = start_server().await;

    sqlx::query(
        "INSERT INTO departmental_objectives (title, description) \
         VALUES ('Grow revenue', 'FY24 revenue targets')",
    )
    .execute(&server.pool)
    .await
    .expect("seed objectives");

    let session = Session::new(ApiClient::new(server.base_url.clone()));
    let objectives = session.list_objectives().await.expect("list objectives");
    assert_eq!(objectives.len(), 1);
    assert_eq!(objectives[0].title, "Grow revenue");

    server.db.stop().await.expect("db stop");
}
