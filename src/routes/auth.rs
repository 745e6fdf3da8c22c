use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::{
    AppState,
    db::{
        self,
        models::{
            api::ApiResponse,
            auth::{LoginRequest, RefreshTokenRequest, RegisterRequest},
        },
    },
    error::AppError,
    middleware::auth::CurrentUser,
    services::AuthService,
    validation::ValidatedJson,
};

/// 注册
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let cost = state.config.bcrypt_cost;
    let user = db::transact(&state.db, move |conn| AuthService::register(conn, &payload, cost)).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(user, "User registered successfully")),
    ))
}

/// 登录
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tokens = state.tokens.clone();
    let response = db::transact(&state.db, move |conn| AuthService::login(conn, &tokens, &payload)).await?;
    Ok(Json(ApiResponse::success(response, "Login successful")))
}

pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tokens = state.tokens.clone();
    let response = db::transact(&state.db, move |conn| {
        AuthService::refresh(conn, &tokens, &payload.refresh_token)
    })
    .await?;
    Ok(Json(ApiResponse::success(response, "Token refreshed")))
}

/// 当前用户
pub async fn me(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    Json(ApiResponse::success(user, "Current user retrieved"))
}
