pub mod auth;
pub mod boards;
pub mod labels;
pub mod tasks;
pub mod workspaces;

use crate::{AppState, middleware::auth::auth_middleware};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;

const BOARD: &str = "/workspaces/:workspace_id/boards/:board_id";

pub fn create_router(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token));

    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me))
        .route(
            "/workspaces",
            get(workspaces::list_workspaces).post(workspaces::create_workspace),
        )
        .route(
            "/workspaces/:workspace_id",
            get(workspaces::get_workspace)
                .patch(workspaces::update_workspace)
                .delete(workspaces::delete_workspace),
        )
        .route("/workspaces/:workspace_id/members", get(workspaces::list_members))
        .route("/workspaces/:workspace_id/invite", post(workspaces::invite_member))
        .route(
            "/workspaces/:workspace_id/boards",
            get(boards::list_boards).post(boards::create_board),
        )
        .route(
            BOARD,
            get(boards::get_board)
                .patch(boards::update_board)
                .delete(boards::delete_board),
        )
        .route(&format!("{BOARD}/reports"), get(boards::board_report))
        .route(
            &format!("{BOARD}/tasks"),
            get(tasks::list_tasks).post(tasks::create_task),
        )
        .route(
            &format!("{BOARD}/tasks/:task_id"),
            get(tasks::get_task)
                .patch(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route(
            &format!("{BOARD}/labels"),
            get(labels::list_labels).post(labels::create_label),
        )
        .route(
            &format!("{BOARD}/labels/:label_id"),
            get(labels::get_label)
                .patch(labels::update_label)
                .delete(labels::delete_label),
        )
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
