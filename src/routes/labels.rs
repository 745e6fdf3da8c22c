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
            label::{CreateLabelRequest, UpdateLabelRequest},
        },
    },
    error::AppError,
    middleware::auth::CurrentUser,
    services::LabelsService,
    validation::ValidatedJson,
};

pub async fn list_labels(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((workspace_id, board_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let labels = db::transact(&state.db, move |conn| {
        LabelsService::list(conn, &user, workspace_id, board_id)
    })
    .await?;
    Ok(Json(ApiResponse::success(labels, "Labels retrieved successfully")))
}

pub async fn create_label(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((workspace_id, board_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(payload): ValidatedJson<CreateLabelRequest>,
) -> Result<impl IntoResponse, AppError> {
    let label = db::transact(&state.db, move |conn| {
        LabelsService::create(conn, &user, workspace_id, board_id, &payload)
    })
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(label, "Label created successfully")),
    ))
}

pub async fn get_label(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((workspace_id, board_id, label_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let label = db::transact(&state.db, move |conn| {
        LabelsService::get(conn, &user, workspace_id, board_id, label_id)
    })
    .await?;
    Ok(Json(ApiResponse::success(label, "Label retrieved successfully")))
}

pub async fn update_label(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((workspace_id, board_id, label_id)): Path<(Uuid, Uuid, Uuid)>,
    ValidatedJson(payload): ValidatedJson<UpdateLabelRequest>,
) -> Result<impl IntoResponse, AppError> {
    let label = db::transact(&state.db, move |conn| {
        LabelsService::update(conn, &user, workspace_id, board_id, label_id, &payload)
    })
    .await?;
    Ok(Json(ApiResponse::success(label, "Label updated successfully")))
}

pub async fn delete_label(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((workspace_id, board_id, label_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    db::transact(&state.db, move |conn| {
        LabelsService::delete(conn, &user, workspace_id, board_id, label_id)
    })
    .await?;
    Ok(Json(ApiResponse::<()>::ok("Label deleted successfully")))
}
