//! Authorization engine.
//!
//! Every handler goes through [`authorize`] before it reads or mutates a
//! workspace, board, task or label. The engine walks the ownership chain of
//! the target (task/label → board → workspace), checks that the walked
//! parents are the ones named by the request, looks up the actor's active
//! membership in the resolved workspace and applies [`policy::requirement`].
//! It never consults membership of any other workspace.

pub mod policy;
pub mod store;

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::db::models::api::error_codes;
use crate::db::models::auth::AuthUser;
use crate::db::models::board::Board;
use crate::db::models::label::Label;
use crate::db::models::task::Task;
use crate::db::models::workspace::Workspace;
use crate::db::models::workspace_member::{ActiveMembership, WorkspaceMemberRole};
use crate::error::{AppError, AppResult};
use crate::services::membership_registry::MembershipRegistry;

pub use store::{AccessStore, TaskStore, TenantStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    Invite,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Invite => "invite members to",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Workspace,
    Board,
    Task,
    Label,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceKind::Workspace => "Workspace",
            ResourceKind::Board => "Board",
            ResourceKind::Task => "Task",
            ResourceKind::Label => "Label",
        };
        f.write_str(s)
    }
}

/// Target of an operation, as named by the request path. Collection variants
/// (`Boards`, `Tasks`, `Labels`) are used for listing and creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceRef {
    /// The actor's own workspaces; listing them or creating a new one.
    Workspaces,
    Workspace {
        workspace_id: Uuid,
    },
    Boards {
        workspace_id: Uuid,
    },
    Board {
        workspace_id: Uuid,
        board_id: Uuid,
    },
    Tasks {
        workspace_id: Uuid,
        board_id: Uuid,
    },
    Task {
        workspace_id: Uuid,
        board_id: Uuid,
        task_id: Uuid,
    },
    Labels {
        workspace_id: Uuid,
        board_id: Uuid,
    },
    Label {
        workspace_id: Uuid,
        board_id: Uuid,
        label_id: Uuid,
    },
}

impl ResourceRef {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceRef::Workspaces | ResourceRef::Workspace { .. } => ResourceKind::Workspace,
            ResourceRef::Boards { .. } | ResourceRef::Board { .. } => ResourceKind::Board,
            ResourceRef::Tasks { .. } | ResourceRef::Task { .. } => ResourceKind::Task,
            ResourceRef::Labels { .. } | ResourceRef::Label { .. } => ResourceKind::Label,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    #[error("{0} not found")]
    NotFound(ResourceKind),

    #[error("You are not a member of this workspace")]
    NotMember,

    #[error("Role {role} is not allowed to {action} this {kind}")]
    InsufficientRole {
        role: WorkspaceMemberRole,
        action: Action,
        kind: ResourceKind,
    },
}

impl Denial {
    pub fn reason(&self) -> &'static str {
        match self {
            Denial::NotFound(_) => error_codes::NOT_FOUND,
            Denial::NotMember => error_codes::NOT_MEMBER,
            Denial::InsufficientRole { .. } => error_codes::INSUFFICIENT_ROLE,
        }
    }
}

/// The resolved ownership chain of a target. `workspace` is always the
/// terminal node; the other links are filled as deep as the target goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub workspace: Workspace,
    pub board: Option<Board>,
    pub task: Option<Task>,
    pub label: Option<Label>,
}

impl Chain {
    fn of_workspace(workspace: Workspace) -> Self {
        Self {
            workspace,
            board: None,
            task: None,
            label: None,
        }
    }
}

/// Proof that an operation was allowed. Services read their scope (the
/// workspace or board to filter by, the row to mutate) from the grant, never
/// from the raw request.
#[derive(Debug, Clone)]
pub struct Grant {
    pub actor_id: Uuid,
    pub action: Action,
    pub membership: Option<ActiveMembership>,
    chain: Option<Chain>,
}

impl Grant {
    pub fn role(&self) -> Option<WorkspaceMemberRole> {
        self.membership.as_ref().map(|m| m.role)
    }

    pub fn chain(&self) -> AppResult<&Chain> {
        self.chain
            .as_ref()
            .ok_or_else(|| AppError::internal("grant is not scoped to a workspace"))
    }

    pub fn workspace(&self) -> AppResult<&Workspace> {
        Ok(&self.chain()?.workspace)
    }

    pub fn board(&self) -> AppResult<&Board> {
        self.chain()?
            .board
            .as_ref()
            .ok_or_else(|| AppError::internal("grant is not scoped to a board"))
    }

    pub fn task(&self) -> AppResult<&Task> {
        self.chain()?
            .task
            .as_ref()
            .ok_or_else(|| AppError::internal("grant is not scoped to a task"))
    }

    pub fn label(&self) -> AppResult<&Label> {
        self.chain()?
            .label
            .as_ref()
            .ok_or_else(|| AppError::internal("grant is not scoped to a label"))
    }

    pub fn into_chain(self) -> AppResult<Chain> {
        self.chain
            .ok_or_else(|| AppError::internal("grant is not scoped to a workspace"))
    }
}

/// Single entry point of the engine. Denials come back as
/// `AppError::Denied`; store failures are propagated unchanged.
pub fn authorize<S>(
    store: &mut S,
    actor: &AuthUser,
    action: Action,
    target: ResourceRef,
) -> AppResult<Grant>
where
    S: AccessStore + ?Sized,
{
    let outcome = decide(store, actor.id, action, target);
    if let Err(AppError::Denied(ref denial)) = outcome {
        tracing::warn!(
            actor_id = %actor.id,
            action = %action,
            resource = ?target.kind(),
            reason = denial.reason(),
            "authorization denied"
        );
    }
    outcome
}

fn decide<S>(store: &mut S, actor_id: Uuid, action: Action, target: ResourceRef) -> AppResult<Grant>
where
    S: AccessStore + ?Sized,
{
    if let ResourceRef::Workspaces = target {
        return match action {
            Action::Read | Action::Create => Ok(Grant {
                actor_id,
                action,
                membership: None,
                chain: None,
            }),
            _ => Err(AppError::internal(format!(
                "cannot {} the workspace collection",
                action
            ))),
        };
    }

    let kind = target.kind();
    if let (ResourceRef::Workspace { .. }, Action::Create) = (target, action) {
        return Err(AppError::internal("workspaces are created on the collection"));
    }
    let requirement = policy::requirement(kind, action)
        .ok_or_else(|| AppError::internal(format!("cannot {} a {}", action, kind)))?;

    let chain = resolve(store, target)?;
    let membership = MembershipRegistry::find_membership(store, chain.workspace.id, actor_id)?;

    requirement.evaluate(kind, action, &chain.workspace, actor_id, membership.as_ref())?;

    Ok(Grant {
        actor_id,
        action,
        membership,
        chain: Some(chain),
    })
}

/// Walks the target up to its workspace. A link that does not exist, or that
/// exists under a different parent than the one the request named, is
/// `NotFound` for that link.
pub fn resolve<S>(store: &mut S, target: ResourceRef) -> AppResult<Chain>
where
    S: AccessStore + ?Sized,
{
    match target {
        ResourceRef::Workspaces => Err(AppError::internal(
            "the workspace collection has no ownership chain",
        )),
        ResourceRef::Workspace { workspace_id } | ResourceRef::Boards { workspace_id } => {
            let workspace = resolve_workspace(store, workspace_id)?;
            Ok(Chain::of_workspace(workspace))
        }
        ResourceRef::Board {
            workspace_id,
            board_id,
        }
        | ResourceRef::Tasks {
            workspace_id,
            board_id,
        }
        | ResourceRef::Labels {
            workspace_id,
            board_id,
        } => resolve_board(store, workspace_id, board_id),
        ResourceRef::Task {
            workspace_id,
            board_id,
            task_id,
        } => {
            let task = store
                .find_task(task_id)?
                .filter(|t| t.board_id == board_id)
                .ok_or(Denial::NotFound(ResourceKind::Task))?;
            let mut chain = resolve_board(store, workspace_id, task.board_id)?;
            chain.task = Some(task);
            Ok(chain)
        }
        ResourceRef::Label {
            workspace_id,
            board_id,
            label_id,
        } => {
            let label = store
                .find_label(label_id)?
                .filter(|l| l.board_id == board_id)
                .ok_or(Denial::NotFound(ResourceKind::Label))?;
            let mut chain = resolve_board(store, workspace_id, label.board_id)?;
            chain.label = Some(label);
            Ok(chain)
        }
    }
}

fn resolve_workspace<S>(store: &mut S, workspace_id: Uuid) -> AppResult<Workspace>
where
    S: AccessStore + ?Sized,
{
    Ok(store
        .find_workspace(workspace_id)?
        .ok_or(Denial::NotFound(ResourceKind::Workspace))?)
}

fn resolve_board<S>(store: &mut S, workspace_id: Uuid, board_id: Uuid) -> AppResult<Chain>
where
    S: AccessStore + ?Sized,
{
    let board = store
        .find_board(board_id)?
        .filter(|b| b.workspace_id == workspace_id)
        .ok_or(Denial::NotFound(ResourceKind::Board))?;
    let workspace = resolve_workspace(store, board.workspace_id)?;
    let mut chain = Chain::of_workspace(workspace);
    chain.board = Some(board);
    Ok(chain)
}
