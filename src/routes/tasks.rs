use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    AppState,
    db::{
        self,
        models::{
            api::ApiResponse,
            task::{CreateTaskRequest, UpdateTaskRequest},
        },
    },
    error::AppError,
    middleware::auth::CurrentUser,
    services::TasksService,
    validation::ValidatedJson,
};

pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((workspace_id, board_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let tasks = db::transact(&state.db, move |conn| {
        TasksService::list(conn, &user, workspace_id, board_id)
    })
    .await?;
    Ok(Json(ApiResponse::success(tasks, "Tasks retrieved successfully")))
}

pub async fn create_task(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((workspace_id, board_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(payload): ValidatedJson<CreateTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    let task = db::transact(&state.db, move |conn| {
        TasksService::create(conn, &user, workspace_id, board_id, &payload)
    })
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(task, "Task created successfully")),
    ))
}

pub async fn get_task(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((workspace_id, board_id, task_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let task = db::transact(&state.db, move |conn| {
        TasksService::get(conn, &user, workspace_id, board_id, task_id)
    })
    .await?;
    Ok(Json(ApiResponse::success(task, "Task retrieved successfully")))
}

pub async fn update_task(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((workspace_id, board_id, task_id)): Path<(Uuid, Uuid, Uuid)>,
    ValidatedJson(payload): ValidatedJson<UpdateTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    let task = db::transact(&state.db, move |conn| {
        TasksService::update(conn, &user, workspace_id, board_id, task_id, &payload)
    })
    .await?;
    Ok(Json(ApiResponse::success(task, "Task updated successfully")))
}

pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((workspace_id, board_id, task_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    db::transact(&state.db, move |conn| {
        TasksService::delete(conn, &user, workspace_id, board_id, task_id)
    })
    .await?;
    Ok(Json(ApiResponse::<()>::ok("Task deleted successfully")))
}
