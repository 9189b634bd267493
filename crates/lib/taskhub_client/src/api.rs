//! Typed HTTP client for the Taskhub REST API.
//!
//! One method per endpoint; non-2xx responses are mapped onto
//! [`ClientError`] using the server's error body.

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use url::Url;
use uuid::Uuid;

use crate::error::{ClientError, Result};
use crate::models::{Objective, Task, TaskDraft, TaskEdit};

/// Error body returned by the server for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    error: String,
    message: String,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    token: String,
}

/// Typed client for one Taskhub server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the server at `base_url` (e.g. `http://127.0.0.1:8080`).
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// `POST /users/register`
    pub async fn register(&self, username: &str, password: &str, email: &str) -> Result<()> {
        let resp = self
            .http
            .post(self.url("/users/register")?)
            .json(&json!({"username": username, "password": password, "email": email}))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    /// `POST /users/login` — returns the bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let resp = self
            .http
            .post(self.url("/users/login")?)
            .json(&json!({"username": username, "password": password}))
            .send()
            .await?;
        let body: TokenBody = check(resp).await?.json().await?;
        Ok(body.token)
    }

    /// `POST /users/change-password`
    pub async fn change_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let resp = self
            .http
            .post(self.url("/users/change-password")?)
            .json(&json!({
                "username": username,
                "currentPassword": current_password,
                "newPassword": new_password,
            }))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    /// `GET /tasks`
    pub async fn list_tasks(&self, token: &str) -> Result<Vec<Task>> {
        let resp = self
            .http
            .get(self.url("/tasks")?)
            .bearer_auth(token)
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    /// `GET /departmental-goals`
    pub async fn list_objectives(&self) -> Result<Vec<Objective>> {
        let resp = self.http.get(self.url("/departmental-goals")?).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    /// `POST /tasks`
    pub async fn create_task(&self, token: &str, draft: &TaskDraft) -> Result<Task> {
        let resp = self
            .http
            .post(self.url("/tasks")?)
            .bearer_auth(token)
            .json(draft)
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    /// `PUT /tasks/{id}`
    pub async fn update_task(&self, token: &str, task_id: Uuid, edit: &TaskEdit) -> Result<Task> {
        let resp = self
            .http
            .put(self.url(&format!("/tasks/{task_id}"))?)
            .bearer_auth(token)
            .json(edit)
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    /// `PUT /tasks/{id}/toggle`
    pub async fn toggle_task(&self, token: &str, task_id: Uuid, completed: bool) -> Result<Task> {
        let resp = self
            .http
            .put(self.url(&format!("/tasks/{task_id}/toggle"))?)
            .bearer_auth(token)
            .json(&json!({"completed": completed}))
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    /// `DELETE /tasks/{id}`
    pub async fn delete_task(&self, token: &str, task_id: Uuid) -> Result<()> {
        let resp = self
            .http
            .delete(self.url(&format!("/tasks/{task_id}"))?)
            .bearer_auth(token)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}

/// Map a non-2xx response onto the error taxonomy, keeping the server's
/// message where one is present.
async fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = match resp.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status.to_string(),
    };

    Err(match status {
        StatusCode::BAD_REQUEST => ClientError::Validation(message),
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::CONFLICT => ClientError::Conflict(message),
        _ => ClientError::Api {
            status: status.as_u16(),
            message,
        },
    })
}
