use serde::Serialize;

use crate::db::enums::TaskStatus;

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct StatusCount {
    pub status: TaskStatus,
    pub count: i64,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct LabelCount {
    pub name: String,
    pub color: String,
    pub count: i64,
}

#[derive(Serialize, Debug)]
pub struct BoardReport {
    pub board: String,
    pub tasks_by_status: Vec<StatusCount>,
    pub tasks_by_label: Vec<LabelCount>,
}
