use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    authz::{self, AccessStore, Action, Grant, ResourceRef, TaskStore},
    db::models::auth::AuthUser,
    db::models::label::Label,
    db::models::task::{
        CreateTaskRequest, NewTask, Task, TaskChanges, TaskInfo, UpdateTaskRequest,
    },
    error::{AppError, AppResult},
    services::membership_registry::MembershipRegistry,
};

pub struct TasksService;

impl TasksService {
    pub fn list<S>(
        store: &mut S,
        actor: &AuthUser,
        workspace_id: Uuid,
        board_id: Uuid,
    ) -> AppResult<Vec<TaskInfo>>
    where
        S: AccessStore + ?Sized,
    {
        let grant = authz::authorize(
            store,
            actor,
            Action::Read,
            ResourceRef::Tasks { workspace_id, board_id },
        )?;

        let tasks = store.tasks_on(grant.board()?.id)?;
        let ids: Vec<Uuid> = tasks.iter().map(|t| t.id).collect();
        let mut by_task: HashMap<Uuid, Vec<Label>> = HashMap::new();
        for (task_id, label) in store.labels_of_tasks(&ids)? {
            by_task.entry(task_id).or_default().push(label);
        }

        Ok(tasks
            .into_iter()
            .map(|task| {
                let labels = by_task.remove(&task.id).unwrap_or_default();
                TaskInfo { task, labels }
            })
            .collect())
    }

    pub fn create<S>(
        store: &mut S,
        actor: &AuthUser,
        workspace_id: Uuid,
        board_id: Uuid,
        req: &CreateTaskRequest,
    ) -> AppResult<TaskInfo>
    where
        S: TaskStore + ?Sized,
    {
        let grant = authz::authorize(
            store,
            actor,
            Action::Create,
            ResourceRef::Tasks { workspace_id, board_id },
        )?;

        let title = req.title.trim();
        if title.is_empty() {
            return Err(AppError::validation_field("title", "Task title is required"));
        }
        check_dates(req.start_date, req.due_date)?;
        if let Some(assignee) = req.assignee_id {
            check_assignee(store, &grant, assignee)?;
        }
        let label_ids = match req.label_ids.as_deref() {
            Some(ids) => Some(board_labels(store, grant.board()?.id, ids)?),
            None => None,
        };

        let new_task = NewTask {
            title: title.to_string(),
            description: req.description.clone(),
            start_date: req.start_date,
            due_date: req.due_date,
            status: req.status.unwrap_or_default(),
            assignee_id: req.assignee_id,
            board_id: grant.board()?.id,
        };
        let task = store.insert_task(&new_task)?;
        if let Some(ids) = label_ids {
            store.replace_task_labels(task.id, &ids)?;
        }
        with_labels(store, task)
    }

    pub fn get<S>(
        store: &mut S,
        actor: &AuthUser,
        workspace_id: Uuid,
        board_id: Uuid,
        task_id: Uuid,
    ) -> AppResult<TaskInfo>
    where
        S: AccessStore + ?Sized,
    {
        let grant = authz::authorize(
            store,
            actor,
            Action::Read,
            ResourceRef::Task { workspace_id, board_id, task_id },
        )?;
        with_labels(store, grant.task()?.clone())
    }

    /// Validates the whole update against the current row and commits it in
    /// one write.
    pub fn update<S>(
        store: &mut S,
        actor: &AuthUser,
        workspace_id: Uuid,
        board_id: Uuid,
        task_id: Uuid,
        req: &UpdateTaskRequest,
    ) -> AppResult<TaskInfo>
    where
        S: TaskStore + ?Sized,
    {
        let grant = authz::authorize(
            store,
            actor,
            Action::Update,
            ResourceRef::Task { workspace_id, board_id, task_id },
        )?;
        let current = grant.task()?;

        let changes = task_changes(req)?;
        if changes.is_empty() && req.label_ids.is_none() {
            return Err(AppError::validation("No update data provided"));
        }
        check_dates(
            req.start_date.unwrap_or(current.start_date),
            req.due_date.unwrap_or(current.due_date),
        )?;
        if let Some(Some(assignee)) = req.assignee_id {
            check_assignee(store, &grant, assignee)?;
        }
        let label_ids = match req.label_ids.as_deref() {
            Some(ids) => Some(board_labels(store, current.board_id, ids)?),
            None => None,
        };

        let task = if changes.is_empty() {
            current.clone()
        } else {
            store.update_task(current.id, &changes)?
        };
        if let Some(ids) = label_ids {
            store.replace_task_labels(task.id, &ids)?;
        }
        with_labels(store, task)
    }

    pub fn delete<S>(
        store: &mut S,
        actor: &AuthUser,
        workspace_id: Uuid,
        board_id: Uuid,
        task_id: Uuid,
    ) -> AppResult<()>
    where
        S: TaskStore + ?Sized,
    {
        let grant = authz::authorize(
            store,
            actor,
            Action::Delete,
            ResourceRef::Task { workspace_id, board_id, task_id },
        )?;
        store.delete_task(grant.task()?.id)
    }
}

fn with_labels<S>(store: &mut S, task: Task) -> AppResult<TaskInfo>
where
    S: AccessStore + ?Sized,
{
    let labels = store
        .labels_of_tasks(&[task.id])?
        .into_iter()
        .map(|(_, label)| label)
        .collect();
    Ok(TaskInfo { task, labels })
}

// 指派人必须是工作空间的有效成员
fn check_assignee<S>(store: &mut S, grant: &Grant, assignee: Uuid) -> AppResult<()>
where
    S: AccessStore + ?Sized,
{
    let workspace_id = grant.workspace()?.id;
    if MembershipRegistry::find_membership(store, workspace_id, assignee)?.is_none() {
        return Err(AppError::validation_field(
            "assignee_id",
            "Assignee must be a member of the workspace",
        ));
    }
    Ok(())
}

fn board_labels<S>(store: &mut S, board_id: Uuid, requested: &[Uuid]) -> AppResult<Vec<Uuid>>
where
    S: AccessStore + ?Sized,
{
    let found = store.find_labels(requested)?;
    check_label_scope(board_id, requested, &found)
}

/// Every requested label must exist and belong to `board_id`. Returns the
/// requested ids without duplicates, in request order.
pub fn check_label_scope(board_id: Uuid, requested: &[Uuid], found: &[Label]) -> AppResult<Vec<Uuid>> {
    let mut ids: Vec<Uuid> = Vec::with_capacity(requested.len());
    for id in requested {
        if ids.contains(id) {
            continue;
        }
        let on_board = found.iter().any(|l| l.id == *id && l.board_id == board_id);
        if !on_board {
            return Err(AppError::validation_field(
                "label_ids",
                format!("Label {} does not belong to this board", id),
            ));
        }
        ids.push(*id);
    }
    Ok(ids)
}

pub fn check_dates(start_date: Option<NaiveDate>, due_date: Option<NaiveDate>) -> AppResult<()> {
    if let (Some(start), Some(due)) = (start_date, due_date) {
        if start > due {
            return Err(AppError::validation_field(
                "due_date",
                "Due date cannot be earlier than start date",
            ));
        }
    }
    Ok(())
}

pub fn task_changes(req: &UpdateTaskRequest) -> AppResult<TaskChanges> {
    let title = match req.title.as_deref().map(str::trim) {
        Some("") => return Err(AppError::validation_field("title", "Task title cannot be empty")),
        other => other.map(str::to_string),
    };
    Ok(TaskChanges {
        title,
        description: req.description.clone(),
        start_date: req.start_date,
        due_date: req.due_date,
        status: req.status,
        assignee_id: req.assignee_id,
    })
}
