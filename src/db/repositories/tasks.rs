use diesel::prelude::*;

use crate::db::enums::TaskStatus;
use crate::db::models::label::Label;
use crate::db::models::task::{NewTask, Task, TaskChanges, TaskLabel};

pub struct TasksRepo;

impl TasksRepo {
    pub fn insert(conn: &mut PgConnection, new_task: &NewTask) -> Result<Task, diesel::result::Error> {
        diesel::insert_into(crate::schema::tasks::table)
            .values(new_task)
            .returning(Task::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(conn: &mut PgConnection, task_id: uuid::Uuid) -> Result<Option<Task>, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        tasks.filter(id.eq(task_id)).select(Task::as_select()).first(conn).optional()
    }

    pub fn list_by_board(conn: &mut PgConnection, b_id: uuid::Uuid) -> Result<Vec<Task>, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        tasks
            .filter(board_id.eq(b_id))
            .order(created_at.asc())
            .select(Task::as_select())
            .load(conn)
    }

    pub fn update_fields(conn: &mut PgConnection, task_id: uuid::Uuid, changes: &TaskChanges) -> Result<Task, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        diesel::update(tasks.filter(id.eq(task_id)))
            .set(changes)
            .returning(Task::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(conn: &mut PgConnection, task_id: uuid::Uuid) -> Result<usize, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        diesel::delete(tasks.filter(id.eq(task_id))).execute(conn)
    }

    /// Replaces the label set of a task.
    pub fn replace_labels(conn: &mut PgConnection, task: uuid::Uuid, label_ids: &[uuid::Uuid]) -> Result<(), diesel::result::Error> {
        use crate::schema::task_labels::dsl::*;
        diesel::delete(task_labels.filter(task_id.eq(task))).execute(conn)?;
        if label_ids.is_empty() {
            return Ok(());
        }
        let rows: Vec<TaskLabel> = label_ids
            .iter()
            .map(|l| TaskLabel { task_id: task, label_id: *l })
            .collect();
        diesel::insert_into(task_labels).values(&rows).execute(conn)?;
        Ok(())
    }

    /// Labels attached to each of the given tasks.
    pub fn labels_for_tasks(
        conn: &mut PgConnection,
        task_ids: &[uuid::Uuid],
    ) -> Result<Vec<(uuid::Uuid, Label)>, diesel::result::Error> {
        use crate::schema::{labels, task_labels};
        task_labels::table
            .inner_join(labels::table)
            .filter(task_labels::task_id.eq_any(task_ids))
            .order(labels::name.asc())
            .select((task_labels::task_id, Label::as_select()))
            .load(conn)
    }

    pub fn statuses_for_board(conn: &mut PgConnection, b_id: uuid::Uuid) -> Result<Vec<TaskStatus>, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        tasks.filter(board_id.eq(b_id)).select(status).load(conn)
    }

    /// `label_id` of every task↔label association for labels of one board.
    pub fn label_links_for_board(conn: &mut PgConnection, b_id: uuid::Uuid) -> Result<Vec<uuid::Uuid>, diesel::result::Error> {
        use crate::schema::{labels, task_labels};
        task_labels::table
            .inner_join(labels::table)
            .filter(labels::board_id.eq(b_id))
            .select(task_labels::label_id)
            .load(conn)
    }
}
