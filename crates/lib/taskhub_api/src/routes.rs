//! Route path constants for the REST surface.

pub const POST_USERS_REGISTER: &str = "/users/register";
pub const POST_USERS_LOGIN: &str = "/users/login";
pub const POST_USERS_CHANGE_PASSWORD: &str = "/users/change-password";

pub const GET_TASKS: &str = "/tasks";
pub const POST_TASKS: &str = "/tasks";
pub const PUT_TASKS_ID: &str = "/tasks/{id}";
pub const PUT_TASKS_ID_TOGGLE: &str = "/tasks/{id}/toggle";
pub const DELETE_TASKS_ID: &str = "/tasks/{id}";

pub const GET_DEPARTMENTAL_GOALS: &str = "/departmental-goals";
