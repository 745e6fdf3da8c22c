use crate::{
    authz::{self, Action, ResourceRef, TenantStore},
    db::models::auth::AuthUser,
    db::models::workspace_member::{InviteMemberRequest, Membership},
    error::{AppError, AppResult},
    services::membership_registry::MembershipRegistry,
};

pub struct InvitationsService;

impl InvitationsService {
    /// Invites `req.email` into a workspace on behalf of `actor`, who must be
    /// OWNER or ADMIN there. Either may hand out any role.
    pub fn invite<S>(
        store: &mut S,
        actor: &AuthUser,
        workspace_id: uuid::Uuid,
        req: &InviteMemberRequest,
    ) -> AppResult<Membership>
    where
        S: TenantStore + ?Sized,
    {
        let grant = authz::authorize(
            store,
            actor,
            Action::Invite,
            ResourceRef::Workspace { workspace_id },
        )?;

        let email = req.email.trim();
        if email.is_empty() {
            return Err(AppError::validation_field("email", "Email is required"));
        }

        let role = req.role.unwrap_or_default();
        let membership = MembershipRegistry::invite(store, grant.workspace()?, email, Some(role))?;

        tracing::info!(
            workspace_id = %workspace_id,
            inviter_id = %actor.id,
            role = %role,
            pending = membership.is_pending(),
            "Member invited"
        );
        Ok(membership)
    }
}
