use uuid::Uuid;

use crate::{
    authz::{AccessStore, TenantStore},
    db::models::workspace::Workspace,
    db::models::workspace_member::{
        ActiveMembership, Membership, NewWorkspaceMember, WorkspaceMemberRole,
    },
    error::{AppError, AppResult},
};

/// Source of truth for (workspace, user) → role.
pub struct MembershipRegistry;

impl MembershipRegistry {
    /// The single active membership of `user_id` in `workspace_id`. Pending
    /// invitations never match. Two rows for one pair is an integrity
    /// failure, not an absence.
    pub fn find_membership<S>(
        store: &mut S,
        workspace_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<ActiveMembership>>
    where
        S: AccessStore + ?Sized,
    {
        let mut active = store
            .memberships_for(workspace_id, user_id)?
            .into_iter()
            .filter_map(Membership::into_active)
            .filter(|m| m.workspace_id == workspace_id && m.user_id == user_id);

        let first = active.next();
        if active.next().is_some() {
            return Err(AppError::Integrity(format!(
                "duplicate membership rows for user {} in workspace {}",
                user_id, workspace_id
            )));
        }
        Ok(first)
    }

    /// Creates the OWNER row of a freshly inserted workspace. Must run in the
    /// same transaction as the workspace insert.
    pub fn create_owner_membership<S>(
        store: &mut S,
        workspace: &Workspace,
        owner_id: Uuid,
    ) -> AppResult<ActiveMembership>
    where
        S: TenantStore + ?Sized,
    {
        if workspace.owner_id != owner_id {
            return Err(AppError::internal(format!(
                "user {} is not the owner of workspace {}",
                owner_id, workspace.id
            )));
        }
        if Self::find_membership(store, workspace.id, owner_id)?.is_some() {
            return Err(AppError::DuplicateMembership {
                workspace_id: workspace.id,
            });
        }

        let new_member =
            NewWorkspaceMember::active(workspace.id, owner_id, WorkspaceMemberRole::Owner);
        store
            .insert_membership(&new_member)?
            .into_active()
            .ok_or_else(|| AppError::Integrity("owner membership stored without a user".into()))
    }

    /// Adds `email` to the workspace. An existing account is attached
    /// directly; an unknown address yields a pending membership. Pending rows
    /// are not linked to accounts registered later.
    pub fn invite<S>(
        store: &mut S,
        workspace: &Workspace,
        email: &str,
        role: Option<WorkspaceMemberRole>,
    ) -> AppResult<Membership>
    where
        S: TenantStore + ?Sized,
    {
        let role = role.unwrap_or_default();

        let new_member = match store.find_user_by_email(email)? {
            Some(user) => {
                if Self::find_membership(store, workspace.id, user.id)?.is_some() {
                    return Err(AppError::DuplicateMembership {
                        workspace_id: workspace.id,
                    });
                }
                NewWorkspaceMember::active(workspace.id, user.id, role)
            }
            None => {
                if store.pending_invitation_exists(workspace.id, email)? {
                    return Err(AppError::DuplicateMembership {
                        workspace_id: workspace.id,
                    });
                }
                NewWorkspaceMember::pending(workspace.id, email, role)
            }
        };

        store.insert_membership(&new_member)
    }
}
