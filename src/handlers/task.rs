use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::errors::{AppError, AppResult};
use crate::middleware::Caller;
use crate::models::{
    AssignBoardForm, ChecklistItem, CreateTaskForm, MoveTaskForm, Status, Task, UpdateTaskForm,
};
use crate::policy::{self, DueWindow, TaskAction};
use crate::services::{AppState, AssignPatch, TaskFilter};

pub async fn create_task(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Json(form): Json<CreateTaskForm>,
) -> AppResult<Response> {
    if form.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Task creation failed.".to_string()));
    }
    let checklist = parse_checklist(form.checklist)?;

    let now = Utc::now();
    let task = Task {
        id: uuid::Uuid::new_v4().to_string(),
        title: form.title,
        priority: form.priority,
        status: Status::Todo,
        creator: caller,
        assign_to: form.assign_to,
        assigned_email: form.assigned_email,
        checklist,
        due_date: form.due_date,
        is_public: false,
        created_at: now,
        updated_at: now,
    };

    state.tasks.create(&task).await?;

    tracing::info!("Created task {} for user {}", task.id, task.creator);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Task created successfully!" })),
    )
        .into_response())
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
) -> AppResult<Response> {
    let tasks = state.tasks.find(&TaskFilter::participant(&caller)).await?;

    if tasks.is_empty() {
        return Err(AppError::NotFound("No tasks found!".to_string()));
    }
    Ok(Json(tasks).into_response())
}

pub async fn get_analytics(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
) -> AppResult<Response> {
    let tasks = state.tasks.find(&TaskFilter::participant(&caller)).await?;
    Ok(Json(policy::compute_analytics(&tasks)).into_response())
}

pub async fn get_task(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let task = state.tasks.find_by_id(&id).await?;
    let task = policy::authorize(&caller, task.as_ref(), TaskAction::Read)?;

    Ok(Json(task).into_response())
}

pub async fn delete_task(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let task = state.tasks.find_by_id(&id).await?;
    policy::authorize(&caller, task.as_ref(), TaskAction::Delete)?;

    state.tasks.delete_by_id(&id).await?;

    tracing::info!("Deleted task {}", id);
    Ok(Json(json!({ "message": "Task deleted successfully!" })).into_response())
}

pub async fn move_task(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(id): Path<String>,
    Json(form): Json<MoveTaskForm>,
) -> AppResult<Response> {
    // The status value is checked before any store access
    let status = policy::validate_status(&form.status)?;

    let task = state.tasks.find_by_id(&id).await?;
    let mut task = policy::authorize(&caller, task.as_ref(), TaskAction::Move)?.clone();

    task.status = status;
    task.updated_at = Utc::now();
    state.tasks.save(&task).await?;

    tracing::info!("Moved task {} to {}", task.id, status.as_str());
    Ok(Json(json!({ "message": "Task moved successfully", "task": task })).into_response())
}

pub async fn tasks_by_status(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(status): Path<String>,
) -> AppResult<Response> {
    let status = policy::validate_status(&status)?;

    let tasks = state
        .tasks
        .find(&TaskFilter::participant(&caller).with_status(status))
        .await?;

    if tasks.is_empty() {
        return Err(AppError::NotFound(format!(
            "No task found for the status: {}",
            status.as_str()
        )));
    }
    Ok(Json(tasks).into_response())
}

pub async fn tasks_by_due_date(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(window): Path<String>,
) -> AppResult<Response> {
    let window = DueWindow::parse(&window)
        .ok_or_else(|| AppError::InvalidInput("Invalid date filter".to_string()))?;
    let (start, end) = window.range(Utc::now());

    let tasks = state
        .tasks
        .find(&TaskFilter::participant(&caller).with_due_window(start, end))
        .await?;

    Ok(Json(tasks).into_response())
}

pub async fn assign_board(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Json(form): Json<AssignBoardForm>,
) -> AppResult<Response> {
    let target = state
        .users
        .find_by_email(&form.assigned_email)
        .await?
        .ok_or_else(|| AppError::NotFound("Email is not found!".to_string()))?;

    // Only tasks the caller created move over; tasks merely assigned to the
    // caller stay where they are
    let patch = AssignPatch {
        assign_to: target.id,
        assigned_email: form.assigned_email.clone(),
    };
    let modified = state
        .tasks
        .update_many(&TaskFilter::creator(&caller), &patch)
        .await?;

    if modified == 0 {
        return Err(AppError::NoTasksToAssign);
    }

    tracing::info!(
        "Reassigned {} tasks from user {} to {}",
        modified,
        caller,
        form.assigned_email
    );
    Ok(Json(json!({
        "message": format!("All tasks have been assigned to {} successfully!", form.assigned_email),
        "modifiedCount": modified,
    }))
    .into_response())
}

pub async fn update_task(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(id): Path<String>,
    Json(form): Json<UpdateTaskForm>,
) -> AppResult<Response> {
    let task = state.tasks.find_by_id(&id).await?;
    let mut task = policy::authorize(&caller, task.as_ref(), TaskAction::Update)?.clone();

    // Only the provided fields change; the creator never does
    if let Some(title) = form.title {
        task.title = title;
    }
    if let Some(priority) = form.priority {
        task.priority = priority;
    }
    if let Some(assign_to) = form.assign_to {
        task.assign_to = Some(assign_to);
    }
    if let Some(assigned_email) = form.assigned_email {
        task.assigned_email = Some(assigned_email);
    }
    if let Some(checklist) = form.checklist {
        task.checklist = parse_checklist(Some(checklist))?;
    }
    if let Some(due_date) = form.due_date {
        task.due_date = Some(due_date);
    }
    task.updated_at = Utc::now();

    state.tasks.save(&task).await?;

    tracing::info!("Updated task {}", task.id);
    Ok(Json(json!({ "message": "Task updated successfully!", "updatedTask": task })).into_response())
}

// Helper function to normalize the checklist payload
// Accepts a JSON array or a string that itself encodes a JSON array
fn parse_checklist(value: Option<Value>) -> AppResult<Vec<ChecklistItem>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(raw)) => serde_json::from_str(&raw)
            .map_err(|_| AppError::InvalidInput("Invalid checklist format.".to_string())),
        Some(other) => serde_json::from_value(other)
            .map_err(|_| AppError::InvalidInput("Invalid checklist format.".to_string())),
    }
}
