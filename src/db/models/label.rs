use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::rules::validate_hex_color;

// Label models
#[derive(Queryable, Selectable, Serialize, Clone, Debug, PartialEq, Eq)]
#[diesel(table_name = crate::schema::labels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Label {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub board_id: Uuid,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::labels)]
pub struct NewLabel {
    pub name: String,
    pub color: String,
    pub board_id: Uuid,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::labels)]
pub struct LabelChanges {
    pub name: Option<String>,
    pub color: Option<String>,
}

pub const DEFAULT_LABEL_COLOR: &str = "#000000";

#[derive(Deserialize, Serialize, Validate)]
pub struct CreateLabelRequest {
    #[validate(length(min = 1, max = 100, message = "Label name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,
}

#[derive(Deserialize, Serialize, Validate)]
pub struct UpdateLabelRequest {
    #[validate(length(min = 1, max = 100, message = "Label name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,
}
