use diesel::prelude::*;

use crate::db::models::workspace::{NewWorkspace, Workspace, WorkspaceChanges};
use crate::db::models::workspace_member::WorkspaceMemberRole;

pub struct WorkspacesRepo;

impl WorkspacesRepo {
    pub fn insert(conn: &mut PgConnection, new_ws: &NewWorkspace) -> Result<Workspace, diesel::result::Error> {
        diesel::insert_into(crate::schema::workspaces::table)
            .values(new_ws)
            .returning(Workspace::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(conn: &mut PgConnection, workspace_id: uuid::Uuid) -> Result<Option<Workspace>, diesel::result::Error> {
        use crate::schema::workspaces::dsl::*;
        workspaces
            .filter(id.eq(workspace_id))
            .select(Workspace::as_select())
            .first(conn)
            .optional()
    }

    /// Workspaces the user owns or holds an active membership in, newest
    /// first, each paired with the user's role when a membership exists.
    pub fn list_for_user(
        conn: &mut PgConnection,
        user: uuid::Uuid,
    ) -> Result<Vec<(Workspace, Option<WorkspaceMemberRole>)>, diesel::result::Error> {
        use crate::schema::{workspace_members as m, workspaces as w};

        let member_of = m::table
            .filter(m::user_id.eq(Some(user)))
            .select(m::workspace_id);

        let rows: Vec<Workspace> = w::table
            .filter(w::owner_id.eq(user).or(w::id.eq_any(member_of)))
            .order(w::created_at.desc())
            .select(Workspace::as_select())
            .load(conn)?;

        let ids: Vec<uuid::Uuid> = rows.iter().map(|ws| ws.id).collect();
        let roles: Vec<(uuid::Uuid, WorkspaceMemberRole)> = m::table
            .filter(m::user_id.eq(Some(user)))
            .filter(m::workspace_id.eq_any(&ids))
            .select((m::workspace_id, m::role))
            .load(conn)?;

        Ok(rows
            .into_iter()
            .map(|ws| {
                let role = roles.iter().find(|(ws_id, _)| *ws_id == ws.id).map(|(_, r)| *r);
                (ws, role)
            })
            .collect())
    }

    pub fn update(
        conn: &mut PgConnection,
        workspace_id: uuid::Uuid,
        changes: &WorkspaceChanges,
    ) -> Result<Workspace, diesel::result::Error> {
        use crate::schema::workspaces::dsl::*;
        diesel::update(workspaces.filter(id.eq(workspace_id)))
            .set(changes)
            .returning(Workspace::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(conn: &mut PgConnection, workspace_id: uuid::Uuid) -> Result<usize, diesel::result::Error> {
        use crate::schema::workspaces::dsl::*;
        diesel::delete(workspaces.filter(id.eq(workspace_id))).execute(conn)
    }
}
