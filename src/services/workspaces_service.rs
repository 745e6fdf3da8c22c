use diesel::prelude::*;

use crate::{
    authz::{self, AccessStore, Action, ResourceRef, TenantStore},
    db::models::auth::AuthUser,
    db::models::workspace::{
        CreateWorkspaceRequest, NewWorkspace, UpdateWorkspaceRequest, WorkspaceChanges,
        WorkspaceInfo,
    },
    db::models::workspace_member::Membership,
    db::repositories::workspace_members::WorkspaceMembersRepo,
    db::repositories::workspaces::WorkspacesRepo,
    error::{AppError, AppResult},
    services::membership_registry::MembershipRegistry,
};

pub struct WorkspacesService;

impl WorkspacesService {
    /// Creates a workspace owned by `actor` together with its OWNER
    /// membership. Callers run this inside one transaction.
    pub fn create<S>(
        store: &mut S,
        actor: &AuthUser,
        req: &CreateWorkspaceRequest,
    ) -> AppResult<WorkspaceInfo>
    where
        S: TenantStore + ?Sized,
    {
        authz::authorize(store, actor, Action::Create, ResourceRef::Workspaces)?;

        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::validation_field("name", "Workspace name is required"));
        }

        let new_ws = NewWorkspace {
            name: name.to_string(),
            description: req.description.clone(),
            owner_id: actor.id,
        };
        let workspace = store.insert_workspace(&new_ws)?;
        let owner = MembershipRegistry::create_owner_membership(store, &workspace, actor.id)?;

        tracing::info!(
            workspace_id = %workspace.id,
            owner_id = %actor.id,
            "Workspace '{}' created by {}",
            workspace.name,
            actor.username
        );
        Ok(WorkspaceInfo::new(workspace, Some(owner.role)))
    }

    pub fn list<S>(store: &mut S, actor: &AuthUser) -> AppResult<Vec<WorkspaceInfo>>
    where
        S: AccessStore + ?Sized,
    {
        authz::authorize(store, actor, Action::Read, ResourceRef::Workspaces)?;
        let rows = store.workspaces_for(actor.id)?;
        Ok(rows
            .into_iter()
            .map(|(ws, role)| WorkspaceInfo::new(ws, role))
            .collect())
    }

    pub fn get(
        conn: &mut PgConnection,
        actor: &AuthUser,
        workspace_id: uuid::Uuid,
    ) -> AppResult<WorkspaceInfo> {
        let grant = authz::authorize(
            conn,
            actor,
            Action::Read,
            ResourceRef::Workspace { workspace_id },
        )?;
        let role = grant.role();
        Ok(WorkspaceInfo::new(grant.into_chain()?.workspace, role))
    }

    pub fn update(
        conn: &mut PgConnection,
        actor: &AuthUser,
        workspace_id: uuid::Uuid,
        req: &UpdateWorkspaceRequest,
    ) -> AppResult<WorkspaceInfo> {
        let grant = authz::authorize(
            conn,
            actor,
            Action::Update,
            ResourceRef::Workspace { workspace_id },
        )?;

        let changes = workspace_changes(req)?;
        let updated = WorkspacesRepo::update(conn, grant.workspace()?.id, &changes)?;
        Ok(WorkspaceInfo::new(updated, grant.role()))
    }

    pub fn delete(
        conn: &mut PgConnection,
        actor: &AuthUser,
        workspace_id: uuid::Uuid,
    ) -> AppResult<()> {
        let grant = authz::authorize(
            conn,
            actor,
            Action::Delete,
            ResourceRef::Workspace { workspace_id },
        )?;
        WorkspacesRepo::delete_by_id(conn, grant.workspace()?.id)?;
        tracing::info!(workspace_id = %workspace_id, actor_id = %actor.id, "Workspace deleted");
        Ok(())
    }

    /// Active members and pending invitations of a workspace.
    pub fn members(
        conn: &mut PgConnection,
        actor: &AuthUser,
        workspace_id: uuid::Uuid,
    ) -> AppResult<Vec<Membership>> {
        let grant = authz::authorize(
            conn,
            actor,
            Action::Read,
            ResourceRef::Workspace { workspace_id },
        )?;
        WorkspaceMembersRepo::list_by_workspace(conn, grant.workspace()?.id)?
            .into_iter()
            .map(Membership::try_from)
            .collect()
    }
}

/// Builds one changeset out of a partial update; an empty update is rejected
/// before anything is written.
pub fn workspace_changes(req: &UpdateWorkspaceRequest) -> AppResult<WorkspaceChanges> {
    if req.name.is_none() && req.description.is_none() {
        return Err(AppError::validation("No update data provided"));
    }
    let name = match req.name.as_deref().map(str::trim) {
        Some("") => return Err(AppError::validation_field("name", "Workspace name cannot be empty")),
        other => other.map(str::to_string),
    };
    Ok(WorkspaceChanges {
        name,
        description: req.description.clone().map(Some),
    })
}
