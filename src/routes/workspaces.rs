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
            workspace::{CreateWorkspaceRequest, UpdateWorkspaceRequest},
            workspace_member::InviteMemberRequest,
        },
    },
    error::AppError,
    middleware::auth::CurrentUser,
    services::{InvitationsService, WorkspacesService},
    validation::ValidatedJson,
};

/// 获取当前用户的工作空间
pub async fn list_workspaces(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let workspaces = db::transact(&state.db, move |conn| WorkspacesService::list(conn, &user)).await?;
    Ok(Json(ApiResponse::success(workspaces, "Workspaces retrieved successfully")))
}

/// 创建工作空间
pub async fn create_workspace(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateWorkspaceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let workspace =
        db::transact(&state.db, move |conn| WorkspacesService::create(conn, &user, &payload)).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(workspace, "Workspace created successfully")),
    ))
}

pub async fn get_workspace(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(workspace_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let workspace =
        db::transact(&state.db, move |conn| WorkspacesService::get(conn, &user, workspace_id)).await?;
    Ok(Json(ApiResponse::success(workspace, "Workspace retrieved successfully")))
}

pub async fn update_workspace(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(workspace_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateWorkspaceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let workspace = db::transact(&state.db, move |conn| {
        WorkspacesService::update(conn, &user, workspace_id, &payload)
    })
    .await?;
    Ok(Json(ApiResponse::success(workspace, "Workspace updated successfully")))
}

pub async fn delete_workspace(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(workspace_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    db::transact(&state.db, move |conn| WorkspacesService::delete(conn, &user, workspace_id)).await?;
    Ok(Json(ApiResponse::<()>::ok("Workspace deleted successfully")))
}

/// 成员与待处理邀请
pub async fn list_members(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(workspace_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let members =
        db::transact(&state.db, move |conn| WorkspacesService::members(conn, &user, workspace_id)).await?;
    Ok(Json(ApiResponse::success(members, "Workspace members retrieved successfully")))
}

/// 邀请成员
pub async fn invite_member(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(workspace_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<InviteMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    let membership = db::transact(&state.db, move |conn| {
        InvitationsService::invite(conn, &user, workspace_id, &payload)
    })
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(membership, "Member invited successfully")),
    ))
}
