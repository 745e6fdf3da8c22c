//! Role requirements per resource kind and action.
//!
//! This table is the only place where "who may do what" is written down.
//! Task and label update/delete stay open to every active member; boards are
//! OWNER/ADMIN-only. Changing either is a policy decision, made here.

use uuid::Uuid;

use super::{Action, Denial, ResourceKind};
use crate::db::models::workspace::Workspace;
use crate::db::models::workspace_member::{ActiveMembership, WorkspaceMemberRole};

use WorkspaceMemberRole::{Admin, Owner};

const OWNER_OR_ADMIN: &[WorkspaceMemberRole] = &[Owner, Admin];
const OWNER_ONLY: &[WorkspaceMemberRole] = &[Owner];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Any authenticated actor.
    Authenticated,
    /// The workspace owner, or anyone holding an active membership.
    OwnerOrMember,
    /// An active membership with any role.
    Member,
    /// An active membership whose role is in the set.
    AnyOf(&'static [WorkspaceMemberRole]),
}

/// Requirement for `action` on a single resource of `kind`. `None` means the
/// combination is not an operation of the system.
pub fn requirement(kind: ResourceKind, action: Action) -> Option<Requirement> {
    use Action::*;
    use ResourceKind as K;

    let req = match (kind, action) {
        (K::Workspace, Read) => Requirement::OwnerOrMember,
        (K::Workspace, Create) => Requirement::Authenticated,
        (K::Workspace, Update) => Requirement::AnyOf(OWNER_OR_ADMIN),
        (K::Workspace, Delete) => Requirement::AnyOf(OWNER_ONLY),
        (K::Workspace, Invite) => Requirement::AnyOf(OWNER_OR_ADMIN),

        (K::Board, Read) => Requirement::Member,
        (K::Board, Create | Update | Delete) => Requirement::AnyOf(OWNER_OR_ADMIN),

        (K::Label, Read) => Requirement::Member,
        (K::Label, Create) => Requirement::AnyOf(OWNER_OR_ADMIN),
        (K::Label, Update | Delete) => Requirement::Member,

        (K::Task, Read | Create | Update | Delete) => Requirement::Member,

        (_, Invite) => return None,
    };
    Some(req)
}

impl Requirement {
    /// Checks the requirement against the resolved workspace and the actor's
    /// membership in that workspace only.
    pub fn evaluate(
        &self,
        kind: ResourceKind,
        action: Action,
        workspace: &Workspace,
        actor_id: Uuid,
        membership: Option<&ActiveMembership>,
    ) -> Result<(), Denial> {
        if let Some(m) = membership {
            debug_assert_eq!(m.workspace_id, workspace.id);
        }

        match self {
            Requirement::Authenticated => Ok(()),
            Requirement::OwnerOrMember => {
                if workspace.owner_id == actor_id || membership.is_some() {
                    Ok(())
                } else {
                    Err(Denial::NotMember)
                }
            }
            Requirement::Member => membership.map(|_| ()).ok_or(Denial::NotMember),
            Requirement::AnyOf(roles) => {
                let m = membership.ok_or(Denial::NotMember)?;
                if roles.contains(&m.role) {
                    Ok(())
                } else {
                    Err(Denial::InsufficientRole {
                        role: m.role,
                        action,
                        kind,
                    })
                }
            }
        }
    }
}
