use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::workspace_member::WorkspaceMemberRole;

// Workspace models
#[derive(Queryable, Selectable, Serialize, Clone, Debug, PartialEq, Eq)]
#[diesel(table_name = crate::schema::workspaces)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Workspace {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::workspaces)]
pub struct NewWorkspace {
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::workspaces)]
pub struct WorkspaceChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

// Workspace API DTOs
#[derive(Deserialize, Serialize, Validate)]
pub struct CreateWorkspaceRequest {
    #[validate(length(min = 1, max = 255, message = "Workspace name must be between 1 and 255 characters"))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize, Serialize, Validate, Default)]
pub struct UpdateWorkspaceRequest {
    #[validate(length(min = 1, max = 255, message = "Workspace name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct WorkspaceInfo {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Role of the requesting actor; absent for an owner without a membership row.
    pub role: Option<WorkspaceMemberRole>,
}

impl WorkspaceInfo {
    pub fn new(workspace: Workspace, role: Option<WorkspaceMemberRole>) -> Self {
        Self {
            id: workspace.id,
            name: workspace.name,
            description: workspace.description,
            owner_id: workspace.owner_id,
            created_at: workspace.created_at,
            role,
        }
    }
}
