use diesel::PgConnection;
use uuid::Uuid;

use super::boards::BoardsRepo;
use super::labels::LabelRepo;
use super::tasks::TasksRepo;
use super::users::UsersRepo;
use super::workspace_members::WorkspaceMembersRepo;
use super::workspaces::WorkspacesRepo;
use crate::authz::{AccessStore, TaskStore, TenantStore};
use crate::db::models::auth::User;
use crate::db::models::board::Board;
use crate::db::models::label::Label;
use crate::db::models::task::{NewTask, Task, TaskChanges};
use crate::db::models::workspace::{NewWorkspace, Workspace};
use crate::db::models::workspace_member::{Membership, NewWorkspaceMember, WorkspaceMemberRole};
use crate::error::{AppError, AppResult};

impl AccessStore for PgConnection {
    fn find_workspace(&mut self, workspace_id: Uuid) -> AppResult<Option<Workspace>> {
        Ok(WorkspacesRepo::find_by_id(self, workspace_id)?)
    }

    fn find_board(&mut self, board_id: Uuid) -> AppResult<Option<Board>> {
        Ok(BoardsRepo::find_by_id(self, board_id)?)
    }

    fn find_task(&mut self, task_id: Uuid) -> AppResult<Option<Task>> {
        Ok(TasksRepo::find_by_id(self, task_id)?)
    }

    fn find_label(&mut self, label_id: Uuid) -> AppResult<Option<Label>> {
        Ok(LabelRepo::find_by_id(self, label_id)?)
    }

    fn memberships_for(&mut self, workspace_id: Uuid, user_id: Uuid) -> AppResult<Vec<Membership>> {
        WorkspaceMembersRepo::find_for_user(self, workspace_id, user_id)?
            .into_iter()
            .map(Membership::try_from)
            .collect()
    }

    fn workspaces_for(&mut self, user_id: Uuid) -> AppResult<Vec<(Workspace, Option<WorkspaceMemberRole>)>> {
        Ok(WorkspacesRepo::list_for_user(self, user_id)?)
    }

    fn boards_in(&mut self, workspace_id: Uuid) -> AppResult<Vec<Board>> {
        Ok(BoardsRepo::list_by_workspace(self, workspace_id)?)
    }

    fn tasks_on(&mut self, board_id: Uuid) -> AppResult<Vec<Task>> {
        Ok(TasksRepo::list_by_board(self, board_id)?)
    }

    fn labels_on(&mut self, board_id: Uuid) -> AppResult<Vec<Label>> {
        Ok(LabelRepo::list_by_board(self, board_id)?)
    }

    fn find_labels(&mut self, label_ids: &[Uuid]) -> AppResult<Vec<Label>> {
        Ok(LabelRepo::find_many(self, label_ids)?)
    }

    fn labels_of_tasks(&mut self, task_ids: &[Uuid]) -> AppResult<Vec<(Uuid, Label)>> {
        Ok(TasksRepo::labels_for_tasks(self, task_ids)?)
    }
}

impl TaskStore for PgConnection {
    fn insert_task(&mut self, new_task: &NewTask) -> AppResult<Task> {
        Ok(TasksRepo::insert(self, new_task)?)
    }

    fn update_task(&mut self, task_id: Uuid, changes: &TaskChanges) -> AppResult<Task> {
        Ok(TasksRepo::update_fields(self, task_id, changes)?)
    }

    fn delete_task(&mut self, task_id: Uuid) -> AppResult<()> {
        TasksRepo::delete_by_id(self, task_id)?;
        Ok(())
    }

    fn replace_task_labels(&mut self, task_id: Uuid, label_ids: &[Uuid]) -> AppResult<()> {
        Ok(TasksRepo::replace_labels(self, task_id, label_ids)?)
    }
}

impl TenantStore for PgConnection {
    fn find_user_by_email(&mut self, email: &str) -> AppResult<Option<User>> {
        Ok(UsersRepo::find_by_email(self, email)?)
    }

    fn insert_workspace(&mut self, new_workspace: &NewWorkspace) -> AppResult<Workspace> {
        Ok(WorkspacesRepo::insert(self, new_workspace)?)
    }

    fn insert_membership(&mut self, new_member: &NewWorkspaceMember) -> AppResult<Membership> {
        match WorkspaceMembersRepo::insert(self, new_member) {
            Ok(row) => Membership::try_from(row),
            Err(e) => {
                let err = AppError::from(e);
                if err.is_unique_violation() {
                    Err(AppError::DuplicateMembership {
                        workspace_id: new_member.workspace_id,
                    })
                } else {
                    Err(err)
                }
            }
        }
    }

    fn pending_invitation_exists(&mut self, workspace_id: Uuid, email: &str) -> AppResult<bool> {
        Ok(WorkspaceMembersRepo::pending_exists_for_email(self, workspace_id, email)?)
    }
}
