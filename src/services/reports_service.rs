use std::collections::HashMap;

use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    authz::{self, Action, ResourceRef},
    db::enums::TaskStatus,
    db::models::auth::AuthUser,
    db::models::label::Label,
    db::models::report::{BoardReport, LabelCount, StatusCount},
    db::repositories::labels::LabelRepo,
    db::repositories::tasks::TasksRepo,
    error::AppResult,
};

pub struct ReportsService;

impl ReportsService {
    /// Task counts of one board grouped by status and by label.
    pub fn board_report(
        conn: &mut PgConnection,
        actor: &AuthUser,
        workspace_id: Uuid,
        board_id: Uuid,
    ) -> AppResult<BoardReport> {
        let grant = authz::authorize(
            conn,
            actor,
            Action::Read,
            ResourceRef::Board { workspace_id, board_id },
        )?;
        let board = grant.board()?;

        let statuses = TasksRepo::statuses_for_board(conn, board.id)?;
        let labels = LabelRepo::list_by_board(conn, board.id)?;
        let links = TasksRepo::label_links_for_board(conn, board.id)?;

        Ok(BoardReport {
            board: board.title.clone(),
            tasks_by_status: count_by_status(&statuses),
            tasks_by_label: count_by_label(&labels, &links),
        })
    }
}

/// Statuses with at least one task, in workflow order.
pub fn count_by_status(statuses: &[TaskStatus]) -> Vec<StatusCount> {
    TaskStatus::ALL
        .iter()
        .map(|status| StatusCount {
            status: *status,
            count: statuses.iter().filter(|s| *s == status).count() as i64,
        })
        .filter(|c| c.count > 0)
        .collect()
}

/// Every label of the board, including those attached to no task.
pub fn count_by_label(labels: &[Label], links: &[Uuid]) -> Vec<LabelCount> {
    let mut counts: HashMap<Uuid, i64> = HashMap::new();
    for label_id in links {
        *counts.entry(*label_id).or_insert(0) += 1;
    }
    labels
        .iter()
        .map(|label| LabelCount {
            name: label.name.clone(),
            color: label.color.clone(),
            count: counts.get(&label.id).copied().unwrap_or(0),
        })
        .collect()
}
