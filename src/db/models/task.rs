use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::label::Label;
use crate::db::enums::TaskStatus;

// Task models
#[derive(Queryable, Selectable, Identifiable, Serialize, Clone, Debug, PartialEq, Eq)]
#[diesel(table_name = crate::schema::tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub status: TaskStatus,
    pub assignee_id: Option<Uuid>,
    pub board_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tasks)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub status: TaskStatus,
    pub assignee_id: Option<Uuid>,
    pub board_id: Uuid,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::tasks)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub start_date: Option<Option<NaiveDate>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub status: Option<TaskStatus>,
    pub assignee_id: Option<Option<Uuid>>,
}

impl TaskChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.start_date.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
            && self.assignee_id.is_none()
    }
}

#[derive(Insertable, Queryable, Clone, Debug)]
#[diesel(table_name = crate::schema::task_labels)]
pub struct TaskLabel {
    pub task_id: Uuid,
    pub label_id: Uuid,
}

#[derive(Serialize, Debug)]
pub struct TaskInfo {
    #[serde(flatten)]
    pub task: Task,
    pub labels: Vec<Label>,
}

#[derive(Deserialize, Serialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 255, message = "Task title must be between 1 and 255 characters"))]
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<TaskStatus>,
    pub assignee_id: Option<Uuid>,
    pub label_ids: Option<Vec<Uuid>>,
}

#[derive(Deserialize, Serialize, Validate, Default)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 255, message = "Task title must be between 1 and 255 characters"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub due_date: Option<Option<NaiveDate>>,
    pub status: Option<TaskStatus>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub assignee_id: Option<Option<Uuid>>,
    pub label_ids: Option<Vec<Uuid>>,
}

// 字段缺省为 None，显式 null 为 Some(None)
fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
