use serde::Deserialize;
use serde_json::Value;
use chrono::{DateTime, Utc};
use super::task::Priority;

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub old_password: Option<String>,
    pub new_password: Option<String>,
}

// The checklist arrives either as a JSON array or as a string that itself
// encodes a JSON array, so it is captured raw and parsed by the handler.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskForm {
    pub title: String,
    pub priority: Priority,
    pub assign_to: Option<String>,
    pub assigned_email: Option<String>,
    pub checklist: Option<Value>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskForm {
    pub title: Option<String>,
    pub priority: Option<Priority>,
    pub assign_to: Option<String>,
    pub assigned_email: Option<String>,
    pub checklist: Option<Value>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct MoveTaskForm {
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignBoardForm {
    pub assigned_email: String,
}
