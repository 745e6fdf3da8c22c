use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Queryable, Selectable, Identifiable, Serialize, Clone, Debug, PartialEq, Eq)]
#[diesel(table_name = crate::schema::boards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Board {
    pub id: Uuid,
    pub title: String,
    pub workspace_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::boards)]
pub struct NewBoard {
    pub title: String,
    pub workspace_id: Uuid,
}

#[derive(Deserialize, Serialize, Validate)]
pub struct CreateBoardRequest {
    #[validate(length(min = 1, max = 255, message = "Board title must be between 1 and 255 characters"))]
    pub title: String,
}

#[derive(Deserialize, Serialize, Validate)]
pub struct UpdateBoardRequest {
    #[validate(length(min = 1, max = 255, message = "Board title must be between 1 and 255 characters"))]
    pub title: Option<String>,
}
