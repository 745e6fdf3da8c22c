use diesel::prelude::*;

use crate::db::models::workspace_member::{NewWorkspaceMember, WorkspaceMemberRow};

pub struct WorkspaceMembersRepo;

impl WorkspaceMembersRepo {
    pub fn insert(conn: &mut PgConnection, new_member: &NewWorkspaceMember) -> Result<WorkspaceMemberRow, diesel::result::Error> {
        diesel::insert_into(crate::schema::workspace_members::table)
            .values(new_member)
            .returning(WorkspaceMemberRow::as_returning())
            .get_result(conn)
    }

    pub fn list_by_workspace(conn: &mut PgConnection, ws: uuid::Uuid) -> Result<Vec<WorkspaceMemberRow>, diesel::result::Error> {
        use crate::schema::workspace_members::dsl::*;
        workspace_members
            .filter(workspace_id.eq(ws))
            .order(joined_at.asc())
            .select(WorkspaceMemberRow::as_select())
            .load(conn)
    }

    /// Rows attached to (workspace, user); the unique constraint keeps this to
    /// at most one, callers treat more as corruption.
    pub fn find_for_user(conn: &mut PgConnection, ws_id: uuid::Uuid, user: uuid::Uuid) -> Result<Vec<WorkspaceMemberRow>, diesel::result::Error> {
        use crate::schema::workspace_members::dsl::*;
        workspace_members
            .filter(workspace_id.eq(ws_id))
            .filter(user_id.eq(Some(user)))
            .select(WorkspaceMemberRow::as_select())
            .limit(2)
            .load(conn)
    }

    pub fn pending_exists_for_email(conn: &mut PgConnection, ws_id: uuid::Uuid, email: &str) -> Result<bool, diesel::result::Error> {
        use crate::schema::workspace_members::dsl::*;
        diesel::select(diesel::dsl::exists(
            workspace_members
                .filter(workspace_id.eq(ws_id))
                .filter(user_id.is_null())
                .filter(invited_email.eq(Some(email))),
        ))
        .get_result(conn)
    }
}
