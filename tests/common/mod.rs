#![allow(dead_code)]

use chrono::Utc;
use uuid::Uuid;

use taskboard_backend::authz::{AccessStore, Denial, TaskStore, TenantStore};
use taskboard_backend::db::enums::TaskStatus;
use taskboard_backend::db::models::auth::{AuthUser, User};
use taskboard_backend::db::models::board::Board;
use taskboard_backend::db::models::label::Label;
use taskboard_backend::db::models::task::{NewTask, Task, TaskChanges};
use taskboard_backend::db::models::workspace::{CreateWorkspaceRequest, NewWorkspace, Workspace};
use taskboard_backend::db::models::workspace_member::{
    Membership, NewWorkspaceMember, WorkspaceMemberRole, WorkspaceMemberRow,
};
use taskboard_backend::error::{AppError, AppResult};
use taskboard_backend::services::WorkspacesService;

/// Store backed by plain vectors. Enforces the same uniqueness rules as the
/// `workspace_members` table: one row per (workspace, user) and one pending
/// row per (workspace, email).
#[derive(Default)]
pub struct MemoryStore {
    pub users: Vec<User>,
    pub workspaces: Vec<Workspace>,
    pub members: Vec<WorkspaceMemberRow>,
    pub boards: Vec<Board>,
    pub tasks: Vec<Task>,
    pub labels: Vec<Label>,
    pub task_labels: Vec<(Uuid, Uuid)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&mut self, username: &str) -> AuthUser {
        self.add_user_with_email(username, &format!("{}@example.com", username))
    }

    pub fn add_user_with_email(&mut self, username: &str, email: &str) -> AuthUser {
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$2b$04$placeholder".to_string(),
            created_at: Utc::now(),
        };
        self.users.push(user.clone());
        AuthUser::from(user)
    }

    /// Pushes a membership row with no uniqueness check, the way a corrupted
    /// table would hold it.
    pub fn push_raw_member(&mut self, workspace_id: Uuid, user_id: Uuid, role: WorkspaceMemberRole) {
        self.members.push(WorkspaceMemberRow {
            id: Uuid::new_v4(),
            workspace_id,
            user_id: Some(user_id),
            invited_email: None,
            role,
            joined_at: Utc::now(),
        });
    }

    pub fn add_member(&mut self, workspace_id: Uuid, user: &AuthUser, role: WorkspaceMemberRole) {
        let new_member = NewWorkspaceMember::active(workspace_id, user.id, role);
        self.insert_membership(&new_member)
            .expect("membership insert");
    }

    pub fn add_board(&mut self, workspace_id: Uuid, title: &str) -> Board {
        let board = Board {
            id: Uuid::new_v4(),
            title: title.to_string(),
            workspace_id,
            created_at: Utc::now(),
        };
        self.boards.push(board.clone());
        board
    }

    pub fn add_task(&mut self, board_id: Uuid, title: &str) -> Task {
        let task = Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            start_date: None,
            due_date: None,
            status: TaskStatus::Todo,
            assignee_id: None,
            board_id,
            created_at: Utc::now(),
        };
        self.tasks.push(task.clone());
        task
    }

    pub fn add_label(&mut self, board_id: Uuid, name: &str) -> Label {
        let label = Label {
            id: Uuid::new_v4(),
            name: name.to_string(),
            color: "#ff0000".to_string(),
            board_id,
        };
        self.labels.push(label.clone());
        label
    }

    pub fn rows_for(&self, workspace_id: Uuid) -> Vec<&WorkspaceMemberRow> {
        self.members
            .iter()
            .filter(|m| m.workspace_id == workspace_id)
            .collect()
    }

    /// Creates a workspace through the service, so it carries its OWNER row.
    pub fn workspace_of(&mut self, owner: &AuthUser, name: &str) -> Workspace {
        let info = WorkspacesService::create(
            self,
            owner,
            &CreateWorkspaceRequest {
                name: name.to_string(),
                description: None,
            },
        )
        .expect("workspace create");
        self.workspaces
            .iter()
            .find(|w| w.id == info.id)
            .cloned()
            .expect("workspace stored")
    }
}

impl AccessStore for MemoryStore {
    fn find_workspace(&mut self, workspace_id: Uuid) -> AppResult<Option<Workspace>> {
        Ok(self.workspaces.iter().find(|w| w.id == workspace_id).cloned())
    }

    fn find_board(&mut self, board_id: Uuid) -> AppResult<Option<Board>> {
        Ok(self.boards.iter().find(|b| b.id == board_id).cloned())
    }

    fn find_task(&mut self, task_id: Uuid) -> AppResult<Option<Task>> {
        Ok(self.tasks.iter().find(|t| t.id == task_id).cloned())
    }

    fn find_label(&mut self, label_id: Uuid) -> AppResult<Option<Label>> {
        Ok(self.labels.iter().find(|l| l.id == label_id).cloned())
    }

    fn memberships_for(&mut self, workspace_id: Uuid, user_id: Uuid) -> AppResult<Vec<Membership>> {
        self.members
            .iter()
            .filter(|m| m.workspace_id == workspace_id && m.user_id == Some(user_id))
            .cloned()
            .map(Membership::try_from)
            .collect()
    }

    fn workspaces_for(&mut self, user_id: Uuid) -> AppResult<Vec<(Workspace, Option<WorkspaceMemberRole>)>> {
        Ok(self
            .workspaces
            .iter()
            .rev()
            .filter_map(|ws| {
                let role = self
                    .members
                    .iter()
                    .find(|m| m.workspace_id == ws.id && m.user_id == Some(user_id))
                    .map(|m| m.role);
                (ws.owner_id == user_id || role.is_some()).then(|| (ws.clone(), role))
            })
            .collect())
    }

    fn boards_in(&mut self, workspace_id: Uuid) -> AppResult<Vec<Board>> {
        Ok(self.boards.iter().filter(|b| b.workspace_id == workspace_id).cloned().collect())
    }

    fn tasks_on(&mut self, board_id: Uuid) -> AppResult<Vec<Task>> {
        Ok(self.tasks.iter().filter(|t| t.board_id == board_id).cloned().collect())
    }

    fn labels_on(&mut self, board_id: Uuid) -> AppResult<Vec<Label>> {
        Ok(self.labels.iter().filter(|l| l.board_id == board_id).cloned().collect())
    }

    fn find_labels(&mut self, label_ids: &[Uuid]) -> AppResult<Vec<Label>> {
        Ok(self.labels.iter().filter(|l| label_ids.contains(&l.id)).cloned().collect())
    }

    fn labels_of_tasks(&mut self, task_ids: &[Uuid]) -> AppResult<Vec<(Uuid, Label)>> {
        Ok(self
            .task_labels
            .iter()
            .filter(|(task_id, _)| task_ids.contains(task_id))
            .filter_map(|(task_id, label_id)| {
                self.labels
                    .iter()
                    .find(|l| l.id == *label_id)
                    .map(|l| (*task_id, l.clone()))
            })
            .collect())
    }
}

impl TaskStore for MemoryStore {
    fn insert_task(&mut self, new_task: &NewTask) -> AppResult<Task> {
        let task = Task {
            id: Uuid::new_v4(),
            title: new_task.title.clone(),
            description: new_task.description.clone(),
            start_date: new_task.start_date,
            due_date: new_task.due_date,
            status: new_task.status,
            assignee_id: new_task.assignee_id,
            board_id: new_task.board_id,
            created_at: Utc::now(),
        };
        self.tasks.push(task.clone());
        Ok(task)
    }

    fn update_task(&mut self, task_id: Uuid, changes: &TaskChanges) -> AppResult<Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| AppError::internal("task vanished"))?;
        if let Some(title) = &changes.title {
            task.title = title.clone();
        }
        if let Some(description) = &changes.description {
            task.description = description.clone();
        }
        if let Some(start_date) = changes.start_date {
            task.start_date = start_date;
        }
        if let Some(due_date) = changes.due_date {
            task.due_date = due_date;
        }
        if let Some(status) = changes.status {
            task.status = status;
        }
        if let Some(assignee_id) = changes.assignee_id {
            task.assignee_id = assignee_id;
        }
        Ok(task.clone())
    }

    fn delete_task(&mut self, task_id: Uuid) -> AppResult<()> {
        self.tasks.retain(|t| t.id != task_id);
        self.task_labels.retain(|(t, _)| *t != task_id);
        Ok(())
    }

    fn replace_task_labels(&mut self, task_id: Uuid, label_ids: &[Uuid]) -> AppResult<()> {
        self.task_labels.retain(|(t, _)| *t != task_id);
        self.task_labels.extend(label_ids.iter().map(|l| (task_id, *l)));
        Ok(())
    }
}

impl TenantStore for MemoryStore {
    fn find_user_by_email(&mut self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.iter().find(|u| u.email == email).cloned())
    }

    fn insert_workspace(&mut self, new_workspace: &NewWorkspace) -> AppResult<Workspace> {
        let workspace = Workspace {
            id: Uuid::new_v4(),
            name: new_workspace.name.clone(),
            description: new_workspace.description.clone(),
            owner_id: new_workspace.owner_id,
            created_at: Utc::now(),
        };
        self.workspaces.push(workspace.clone());
        Ok(workspace)
    }

    fn insert_membership(&mut self, new_member: &NewWorkspaceMember) -> AppResult<Membership> {
        if new_member.user_id.is_none() && new_member.invited_email.is_none() {
            return Err(AppError::Integrity("membership needs a user or an email".into()));
        }

        let clash = self.members.iter().any(|m| {
            m.workspace_id == new_member.workspace_id
                && match new_member.user_id {
                    Some(user) => m.user_id == Some(user),
                    None => m.user_id.is_none() && m.invited_email == new_member.invited_email,
                }
        });
        if clash {
            return Err(AppError::DuplicateMembership {
                workspace_id: new_member.workspace_id,
            });
        }

        let row = WorkspaceMemberRow {
            id: Uuid::new_v4(),
            workspace_id: new_member.workspace_id,
            user_id: new_member.user_id,
            invited_email: new_member.invited_email.clone(),
            role: new_member.role,
            joined_at: Utc::now(),
        };
        self.members.push(row.clone());
        Membership::try_from(row)
    }

    fn pending_invitation_exists(&mut self, workspace_id: Uuid, email: &str) -> AppResult<bool> {
        Ok(self.members.iter().any(|m| {
            m.workspace_id == workspace_id
                && m.user_id.is_none()
                && m.invited_email.as_deref() == Some(email)
        }))
    }
}

pub fn denial_of(err: AppError) -> Denial {
    match err {
        AppError::Denied(denial) => denial,
        other => panic!("expected a denial, got {:?}", other),
    }
}
