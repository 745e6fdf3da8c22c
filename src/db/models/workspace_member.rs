use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use uuid::Uuid;

use crate::schema::workspace_members;

// WorkspaceMemberRole枚举定义
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    diesel::FromSqlRow,
    diesel::AsExpression,
)]
#[diesel(sql_type = crate::schema::sql_types::WorkspaceMemberRole)]
#[serde(rename_all = "UPPERCASE")]
pub enum WorkspaceMemberRole {
    Owner,
    Admin,
    #[default]
    Member,
}

impl WorkspaceMemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkspaceMemberRole::Owner => "OWNER",
            WorkspaceMemberRole::Admin => "ADMIN",
            WorkspaceMemberRole::Member => "MEMBER",
        }
    }
}

impl fmt::Display for WorkspaceMemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl diesel::serialize::ToSql<crate::schema::sql_types::WorkspaceMemberRole, diesel::pg::Pg>
    for WorkspaceMemberRole
{
    fn to_sql<'b>(
        &'b self,
        out: &mut diesel::serialize::Output<'b, '_, diesel::pg::Pg>,
    ) -> diesel::serialize::Result {
        match *self {
            WorkspaceMemberRole::Owner => out.write_all(b"owner")?,
            WorkspaceMemberRole::Admin => out.write_all(b"admin")?,
            WorkspaceMemberRole::Member => out.write_all(b"member")?,
        }
        Ok(diesel::serialize::IsNull::No)
    }
}

impl diesel::deserialize::FromSql<crate::schema::sql_types::WorkspaceMemberRole, diesel::pg::Pg>
    for WorkspaceMemberRole
{
    fn from_sql(
        bytes: <diesel::pg::Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> diesel::deserialize::Result<Self> {
        match <String as diesel::deserialize::FromSql<diesel::sql_types::Text, diesel::pg::Pg>>::from_sql(bytes)?.as_str() {
            "owner" => Ok(WorkspaceMemberRole::Owner),
            "admin" => Ok(WorkspaceMemberRole::Admin),
            "member" => Ok(WorkspaceMemberRole::Member),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

/// Raw `workspace_members` row. A row without `user_id` is a pending
/// invitation addressed to `invited_email`.
#[derive(Queryable, Selectable, Clone, Debug)]
#[diesel(table_name = workspace_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WorkspaceMemberRow {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub user_id: Option<Uuid>,
    pub invited_email: Option<String>,
    pub role: WorkspaceMemberRole,
    pub joined_at: DateTime<Utc>,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = workspace_members)]
pub struct NewWorkspaceMember {
    pub workspace_id: Uuid,
    pub user_id: Option<Uuid>,
    pub invited_email: Option<String>,
    pub role: WorkspaceMemberRole,
}

impl NewWorkspaceMember {
    pub fn active(workspace_id: Uuid, user_id: Uuid, role: WorkspaceMemberRole) -> Self {
        Self {
            workspace_id,
            user_id: Some(user_id),
            invited_email: None,
            role,
        }
    }

    pub fn pending(workspace_id: Uuid, email: &str, role: WorkspaceMemberRole) -> Self {
        Self {
            workspace_id,
            user_id: None,
            invited_email: Some(email.to_string()),
            role,
        }
    }
}

/// A membership with an attached user. Only this shape ever takes part in
/// authorization decisions.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ActiveMembership {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub user_id: Uuid,
    pub role: WorkspaceMemberRole,
    pub joined_at: DateTime<Utc>,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct PendingMembership {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub email: String,
    pub role: WorkspaceMemberRole,
    pub joined_at: DateTime<Utc>,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Membership {
    Active(ActiveMembership),
    Pending(PendingMembership),
}

impl Membership {
    pub fn role(&self) -> WorkspaceMemberRole {
        match self {
            Membership::Active(m) => m.role,
            Membership::Pending(m) => m.role,
        }
    }

    pub fn into_active(self) -> Option<ActiveMembership> {
        match self {
            Membership::Active(m) => Some(m),
            Membership::Pending(_) => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Membership::Pending(_))
    }
}

impl TryFrom<WorkspaceMemberRow> for Membership {
    type Error = crate::error::AppError;

    fn try_from(row: WorkspaceMemberRow) -> Result<Self, Self::Error> {
        match (row.user_id, row.invited_email) {
            (Some(user_id), _) => Ok(Membership::Active(ActiveMembership {
                id: row.id,
                workspace_id: row.workspace_id,
                user_id,
                role: row.role,
                joined_at: row.joined_at,
            })),
            (None, Some(email)) => Ok(Membership::Pending(PendingMembership {
                id: row.id,
                workspace_id: row.workspace_id,
                email,
                role: row.role,
                joined_at: row.joined_at,
            })),
            (None, None) => Err(crate::error::AppError::Integrity(format!(
                "membership {} has neither a user nor an invited email",
                row.id
            ))),
        }
    }
}

#[derive(Deserialize, Serialize, validator::Validate)]
pub struct InviteMemberRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub role: Option<WorkspaceMemberRole>,
}
