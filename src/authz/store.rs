use uuid::Uuid;

use crate::db::models::auth::User;
use crate::db::models::board::Board;
use crate::db::models::label::Label;
use crate::db::models::task::{NewTask, Task, TaskChanges};
use crate::db::models::workspace::{NewWorkspace, Workspace};
use crate::db::models::workspace_member::{Membership, NewWorkspaceMember, WorkspaceMemberRole};
use crate::error::AppResult;

/// Read access to the resource hierarchy and the membership table.
///
/// Implemented for `PgConnection`; an authorization decision made through a
/// connection that is inside a transaction sees the same snapshot as the
/// mutation that follows it.
pub trait AccessStore {
    fn find_workspace(&mut self, workspace_id: Uuid) -> AppResult<Option<Workspace>>;

    fn find_board(&mut self, board_id: Uuid) -> AppResult<Option<Board>>;

    fn find_task(&mut self, task_id: Uuid) -> AppResult<Option<Task>>;

    fn find_label(&mut self, label_id: Uuid) -> AppResult<Option<Label>>;

    /// Every membership row attached to (workspace, user). Pending rows have
    /// no user and are never returned.
    fn memberships_for(&mut self, workspace_id: Uuid, user_id: Uuid) -> AppResult<Vec<Membership>>;

    /// Workspaces the user owns or is an active member of, paired with the
    /// user's role when a membership row exists.
    fn workspaces_for(&mut self, user_id: Uuid) -> AppResult<Vec<(Workspace, Option<WorkspaceMemberRole>)>>;

    fn boards_in(&mut self, workspace_id: Uuid) -> AppResult<Vec<Board>>;

    fn tasks_on(&mut self, board_id: Uuid) -> AppResult<Vec<Task>>;

    fn labels_on(&mut self, board_id: Uuid) -> AppResult<Vec<Label>>;

    fn find_labels(&mut self, label_ids: &[Uuid]) -> AppResult<Vec<Label>>;

    /// (task id, label) for every label attached to one of `task_ids`.
    fn labels_of_tasks(&mut self, task_ids: &[Uuid]) -> AppResult<Vec<(Uuid, Label)>>;
}

/// Writes that keep the membership invariants: workspace creation with its
/// owner row, and invitations.
pub trait TenantStore: AccessStore {
    fn find_user_by_email(&mut self, email: &str) -> AppResult<Option<User>>;

    fn insert_workspace(&mut self, new_workspace: &NewWorkspace) -> AppResult<Workspace>;

    /// Inserts a membership row. A storage-level uniqueness violation must be
    /// reported as `AppError::DuplicateMembership`.
    fn insert_membership(&mut self, new_member: &NewWorkspaceMember) -> AppResult<Membership>;

    fn pending_invitation_exists(&mut self, workspace_id: Uuid, email: &str) -> AppResult<bool>;
}

/// Task writes. Label attachments are replaced as a whole.
pub trait TaskStore: AccessStore {
    fn insert_task(&mut self, new_task: &NewTask) -> AppResult<Task>;

    fn update_task(&mut self, task_id: Uuid, changes: &TaskChanges) -> AppResult<Task>;

    fn delete_task(&mut self, task_id: Uuid) -> AppResult<()>;

    fn replace_task_labels(&mut self, task_id: Uuid, label_ids: &[Uuid]) -> AppResult<()>;
}
