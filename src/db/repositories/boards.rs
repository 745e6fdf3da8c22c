use diesel::prelude::*;

use crate::db::models::board::{Board, NewBoard};

pub struct BoardsRepo;

impl BoardsRepo {
    pub fn insert(conn: &mut PgConnection, new_board: &NewBoard) -> Result<Board, diesel::result::Error> {
        diesel::insert_into(crate::schema::boards::table)
            .values(new_board)
            .returning(Board::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(conn: &mut PgConnection, board_id: uuid::Uuid) -> Result<Option<Board>, diesel::result::Error> {
        use crate::schema::boards::dsl::*;
        boards.filter(id.eq(board_id)).select(Board::as_select()).first(conn).optional()
    }

    pub fn list_by_workspace(conn: &mut PgConnection, ws_id: uuid::Uuid) -> Result<Vec<Board>, diesel::result::Error> {
        use crate::schema::boards::dsl::*;
        boards
            .filter(workspace_id.eq(ws_id))
            .order(created_at.asc())
            .select(Board::as_select())
            .load(conn)
    }

    pub fn update_title(conn: &mut PgConnection, board_id: uuid::Uuid, new_title: &str) -> Result<Board, diesel::result::Error> {
        use crate::schema::boards::dsl::*;
        diesel::update(boards.filter(id.eq(board_id)))
            .set(title.eq(new_title))
            .returning(Board::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(conn: &mut PgConnection, board_id: uuid::Uuid) -> Result<usize, diesel::result::Error> {
        use crate::schema::boards::dsl::*;
        diesel::delete(boards.filter(id.eq(board_id))).execute(conn)
    }
}
