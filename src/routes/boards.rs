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
            board::{CreateBoardRequest, UpdateBoardRequest},
        },
    },
    error::AppError,
    middleware::auth::CurrentUser,
    services::{BoardsService, ReportsService},
    validation::ValidatedJson,
};

pub async fn list_boards(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(workspace_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let boards = db::transact(&state.db, move |conn| BoardsService::list(conn, &user, workspace_id)).await?;
    Ok(Json(ApiResponse::success(boards, "Boards retrieved successfully")))
}

pub async fn create_board(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(workspace_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CreateBoardRequest>,
) -> Result<impl IntoResponse, AppError> {
    let board = db::transact(&state.db, move |conn| {
        BoardsService::create(conn, &user, workspace_id, &payload)
    })
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(board, "Board created successfully")),
    ))
}

pub async fn get_board(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((workspace_id, board_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let board = db::transact(&state.db, move |conn| {
        BoardsService::get(conn, &user, workspace_id, board_id)
    })
    .await?;
    Ok(Json(ApiResponse::success(board, "Board retrieved successfully")))
}

pub async fn update_board(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((workspace_id, board_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(payload): ValidatedJson<UpdateBoardRequest>,
) -> Result<impl IntoResponse, AppError> {
    let board = db::transact(&state.db, move |conn| {
        BoardsService::update(conn, &user, workspace_id, board_id, &payload)
    })
    .await?;
    Ok(Json(ApiResponse::success(board, "Board updated successfully")))
}

pub async fn delete_board(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((workspace_id, board_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    db::transact(&state.db, move |conn| {
        BoardsService::delete(conn, &user, workspace_id, board_id)
    })
    .await?;
    Ok(Json(ApiResponse::<()>::ok("Board deleted successfully")))
}

/// 看板统计
pub async fn board_report(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((workspace_id, board_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let report = db::transact(&state.db, move |conn| {
        ReportsService::board_report(conn, &user, workspace_id, board_id)
    })
    .await?;
    Ok(Json(ApiResponse::success(report, "Board report generated")))
}
