use diesel::prelude::*;

use crate::db::models::label::{Label, LabelChanges, NewLabel};

pub struct LabelRepo;

impl LabelRepo {
    pub fn insert(conn: &mut PgConnection, new_label: &NewLabel) -> Result<Label, diesel::result::Error> {
        diesel::insert_into(crate::schema::labels::table)
            .values(new_label)
            .returning(Label::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(conn: &mut PgConnection, label_id: uuid::Uuid) -> Result<Option<Label>, diesel::result::Error> {
        use crate::schema::labels::dsl::*;
        labels.filter(id.eq(label_id)).select(Label::as_select()).first(conn).optional()
    }

    pub fn list_by_board(conn: &mut PgConnection, b_id: uuid::Uuid) -> Result<Vec<Label>, diesel::result::Error> {
        use crate::schema::labels::dsl::*;
        labels
            .filter(board_id.eq(b_id))
            .order(name.asc())
            .select(Label::as_select())
            .load(conn)
    }

    pub fn find_many(conn: &mut PgConnection, label_ids: &[uuid::Uuid]) -> Result<Vec<Label>, diesel::result::Error> {
        use crate::schema::labels::dsl::*;
        labels.filter(id.eq_any(label_ids)).select(Label::as_select()).load(conn)
    }

    pub fn update_fields(conn: &mut PgConnection, label_id: uuid::Uuid, changes: &LabelChanges) -> Result<Label, diesel::result::Error> {
        use crate::schema::labels::dsl::*;
        diesel::update(labels.filter(id.eq(label_id)))
            .set(changes)
            .returning(Label::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(conn: &mut PgConnection, label_id: uuid::Uuid) -> Result<usize, diesel::result::Error> {
        use crate::schema::labels::dsl::*;
        diesel::delete(labels.filter(id.eq(label_id))).execute(conn)
    }
}
