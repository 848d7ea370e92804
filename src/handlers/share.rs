use axum::{
    extract::{Extension, Path, State},
    response::{IntoResponse, Json, Response},
};

use crate::errors::{AppError, AppResult};
use crate::middleware::Caller;
use crate::policy::{self, TaskAction};
use crate::services::AppState;

pub async fn generate_share_link(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let task = state.tasks.find_by_id(&id).await?;
    let task = policy::authorize(&caller, task.as_ref(), TaskAction::Share)?;

    let link = policy::share_link(&state.config.share.frontend_url, &task.id);

    tracing::info!("Generated share link for task {}", task.id);
    Ok(Json(link).into_response())
}

// The one route with no caller: anyone holding the link gets the projected
// read view.
pub async fn view_shared_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let task = state
        .tasks
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not available for sharing".to_string()))?;

    Ok(Json(policy::shared_view(&task)).into_response())
}
