use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    authz::{self, AccessStore, Action, ResourceRef},
    db::models::auth::AuthUser,
    db::models::board::{Board, CreateBoardRequest, NewBoard, UpdateBoardRequest},
    db::repositories::boards::BoardsRepo,
    error::{AppError, AppResult},
};

pub struct BoardsService;

impl BoardsService {
    pub fn list<S>(store: &mut S, actor: &AuthUser, workspace_id: Uuid) -> AppResult<Vec<Board>>
    where
        S: AccessStore + ?Sized,
    {
        let grant = authz::authorize(store, actor, Action::Read, ResourceRef::Boards { workspace_id })?;
        store.boards_in(grant.workspace()?.id)
    }

    pub fn create(
        conn: &mut PgConnection,
        actor: &AuthUser,
        workspace_id: Uuid,
        req: &CreateBoardRequest,
    ) -> AppResult<Board> {
        let grant = authz::authorize(conn, actor, Action::Create, ResourceRef::Boards { workspace_id })?;

        let title = required_title(&req.title)?;
        let new_board = NewBoard {
            title,
            workspace_id: grant.workspace()?.id,
        };
        Ok(BoardsRepo::insert(conn, &new_board)?)
    }

    pub fn get(conn: &mut PgConnection, actor: &AuthUser, workspace_id: Uuid, board_id: Uuid) -> AppResult<Board> {
        let grant = authz::authorize(
            conn,
            actor,
            Action::Read,
            ResourceRef::Board { workspace_id, board_id },
        )?;
        Ok(grant.board()?.clone())
    }

    pub fn update(
        conn: &mut PgConnection,
        actor: &AuthUser,
        workspace_id: Uuid,
        board_id: Uuid,
        req: &UpdateBoardRequest,
    ) -> AppResult<Board> {
        let grant = authz::authorize(
            conn,
            actor,
            Action::Update,
            ResourceRef::Board { workspace_id, board_id },
        )?;

        let title = match req.title.as_deref() {
            Some(title) => required_title(title)?,
            None => return Err(AppError::validation("No update data provided")),
        };
        Ok(BoardsRepo::update_title(conn, grant.board()?.id, &title)?)
    }

    pub fn delete(conn: &mut PgConnection, actor: &AuthUser, workspace_id: Uuid, board_id: Uuid) -> AppResult<()> {
        let grant = authz::authorize(
            conn,
            actor,
            Action::Delete,
            ResourceRef::Board { workspace_id, board_id },
        )?;
        BoardsRepo::delete_by_id(conn, grant.board()?.id)?;
        Ok(())
    }
}

fn required_title(title: &str) -> AppResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::validation_field("title", "Board title is required"));
    }
    Ok(title.to_string())
}
