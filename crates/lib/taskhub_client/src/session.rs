//! Session layer — authentication state machine and local task cache.
//!
//! States: `Unauthenticated` → `Registering` → `Unauthenticated` (a new
//! account must log in), `Unauthenticated` → `Authenticated` on login,
//! back to `Unauthenticated` on logout (token discarded client-side, no
//! server call).
//!
//! Cache discipline: create/update/delete touch the cache only after the
//! server confirms; toggle is optimistic (apply, confirm, revert on
//! failure). Deletion goes through a [`PendingDelete`] guard so nothing
//! is issued before an explicit confirmation.

use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::{ClientError, Result};
use crate::models::{Objective, Task, TaskDraft, TaskEdit};

/// Authentication state of a session.
#[derive(Debug)]
pub enum SessionState {
    Unauthenticated,
    Registering,
    Authenticated {
        /// Bearer token presented on every task request.
        token: String,
        /// Local cache of the user's tasks.
        tasks: Vec<Task>,
    },
}

/// A client session against one Taskhub server.
pub struct Session {
    client: ApiClient,
    state: SessionState,
}

impl Session {
    /// Start a fresh, unauthenticated session.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: SessionState::Unauthenticated,
        }
    }

    /// Current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    /// The cached task list. Empty unless authenticated.
    pub fn tasks(&self) -> &[Task] {
        match &self.state {
            SessionState::Authenticated { tasks, .. } => tasks,
            _ => &[],
        }
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Enter the registration flow.
    pub fn begin_register(&mut self) -> Result<()> {
        match self.state {
            SessionState::Unauthenticated => {
                self.state = SessionState::Registering;
                Ok(())
            }
            _ => Err(ClientError::InvalidState("registration requires logout")),
        }
    }

    /// Abandon the registration flow.
    pub fn cancel_register(&mut self) -> Result<()> {
        match self.state {
            SessionState::Registering => {
                self.state = SessionState::Unauthenticated;
                Ok(())
            }
            _ => Err(ClientError::InvalidState("not registering")),
        }
    }

    /// Create the account. On success the session returns to
    /// `Unauthenticated`: the new user must log in.
    pub async fn register(&mut self, username: &str, password: &str, email: &str) -> Result<()> {
        if !matches!(self.state, SessionState::Registering) {
            return Err(ClientError::InvalidState("call begin_register first"));
        }
        self.client.register(username, password, email).await?;
        self.state = SessionState::Unauthenticated;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Login / logout
    // -----------------------------------------------------------------------

    /// Authenticate and enter `Authenticated`, refreshing the task cache.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        if !matches!(self.state, SessionState::Unauthenticated) {
            return Err(ClientError::InvalidState("already logged in or registering"));
        }
        let token = self.client.login(username, password).await?;
        let tasks = self.client.list_tasks(&token).await?;
        self.state = SessionState::Authenticated { token, tasks };
        Ok(())
    }

    /// Discard the token and cache. Client-side only — the token simply
    /// expires server-side.
    pub fn logout(&mut self) -> Result<()> {
        match self.state {
            SessionState::Authenticated { .. } => {
                self.state = SessionState::Unauthenticated;
                Ok(())
            }
            _ => Err(ClientError::InvalidState("not logged in")),
        }
    }

    /// Change the password. Available from any state; the endpoint
    /// re-authenticates with the current credentials itself.
    pub async fn change_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        self.client
            .change_password(username, current_password, new_password)
            .await
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    /// Re-fetch the task list from the server.
    pub async fn refresh_tasks(&mut self) -> Result<()> {
        let token = self.token()?.to_string();
        let tasks = self.client.list_tasks(&token).await?;
        if let SessionState::Authenticated { tasks: cache, .. } = &mut self.state {
            *cache = tasks;
        }
        Ok(())
    }

    /// List the objective catalog. Public — no session state required.
    pub async fn list_objectives(&self) -> Result<Vec<Objective>> {
        self.client.list_objectives().await
    }

    /// Create a task. Pessimistic: the cache grows only once the server
    /// has confirmed.
    pub async fn create_task(&mut self, draft: TaskDraft) -> Result<Task> {
        let token = self.token()?.to_string();
        let task = self.client.create_task(&token, &draft).await?;
        if let SessionState::Authenticated { tasks, .. } = &mut self.state {
            tasks.push(task.clone());
        }
        Ok(task)
    }

    /// Replace a task's mutable fields. Pessimistic.
    pub async fn update_task(&mut self, task_id: Uuid, edit: TaskEdit) -> Result<()> {
        let token = self.token()?.to_string();
        let updated = self.client.update_task(&token, task_id, &edit).await?;
        if let SessionState::Authenticated { tasks, .. } = &mut self.state
            && let Some(task) = tasks.iter_mut().find(|t| t.id == task_id)
        {
            *task = updated;
        }
        Ok(())
    }

    /// Flip a task's completion flag. Optimistic: the cache is updated
    /// immediately, then confirmed against the server; on failure the
    /// flip is reverted and the error surfaced.
    pub async fn toggle_task(&mut self, task_id: Uuid) -> Result<bool> {
        let token = self.token()?.to_string();
        let SessionState::Authenticated { tasks, .. } = &mut self.state else {
            return Err(ClientError::InvalidState("not logged in"));
        };
        let task = tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| ClientError::NotFound("task not in local cache".into()))?;
        task.completed = !task.completed;
        let completed = task.completed;

        match self.client.toggle_task(&token, task_id, completed).await {
            Ok(confirmed) => {
                if let SessionState::Authenticated { tasks, .. } = &mut self.state
                    && let Some(task) = tasks.iter_mut().find(|t| t.id == task_id)
                {
                    *task = confirmed;
                }
                Ok(completed)
            }
            Err(e) => {
                if let SessionState::Authenticated { tasks, .. } = &mut self.state
                    && let Some(task) = tasks.iter_mut().find(|t| t.id == task_id)
                {
                    task.completed = !completed;
                }
                Err(e)
            }
        }
    }

    /// Start deleting a task. Nothing is sent until the returned guard is
    /// confirmed; dropping it (or calling [`PendingDelete::cancel`])
    /// leaves server and cache untouched.
    pub fn begin_delete(&mut self, task_id: Uuid) -> Result<PendingDelete<'_>> {
        let exists = match &self.state {
            SessionState::Authenticated { tasks, .. } => tasks.iter().any(|t| t.id == task_id),
            _ => return Err(ClientError::InvalidState("not logged in")),
        };
        if !exists {
            return Err(ClientError::NotFound("task not in local cache".into()));
        }
        Ok(PendingDelete {
            session: self,
            task_id,
        })
    }

    fn token(&self) -> Result<&str> {
        match &self.state {
            SessionState::Authenticated { token, .. } => Ok(token),
            _ => Err(ClientError::InvalidState("not logged in")),
        }
    }
}

/// A delete awaiting explicit confirmation.
pub struct PendingDelete<'a> {
    session: &'a mut Session,
    task_id: Uuid,
}

impl PendingDelete<'_> {
    /// The task this guard would delete.
    pub fn task_id(&self) -> Uuid {
        self.task_id
    }

    /// Issue the delete. Pessimistic: the cache entry goes only after the
    /// server confirms.
    pub async fn confirm(self) -> Result<()> {
        let token = self.session.token()?.to_string();
        self.session
            .client
            .delete_task(&token, self.task_id)
            .await?;
        if let SessionState::Authenticated { tasks, .. } = &mut self.session.state {
            tasks.retain(|t| t.id != self.task_id);
        }
        Ok(())
    }

    /// Abandon the delete. No request is issued.
    pub fn cancel(self) {}
}
