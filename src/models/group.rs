use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GroupStatus {
    Active,
    Archived,
}

impl From<String> for GroupStatus {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "archived" => GroupStatus::Archived,
            _ => GroupStatus::Active,
        }
    }
}

impl GroupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupStatus::Active => "active",
            GroupStatus::Archived => "archived",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GroupRole {
    Owner,
    Admin,
    Member,
}

impl fmt::Display for GroupRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupRole::Owner => write!(f, "owner"),
            GroupRole::Admin => write!(f, "admin"),
            GroupRole::Member => write!(f, "member"),
        }
    }
}

/// A private pool a set of users compete in. Membership lives in
/// `group_memberships`; the group row only carries the shareable join code
/// and ownership metadata.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Group {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub status: GroupStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct GroupMembership {
    pub id: Uuid,
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub role: GroupRole,
    pub is_active: bool,
    pub joined_at: DateTime<Utc>,
}

// Request/Response DTOs

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JoinGroupRequest {
    pub code: String,
}

/// One of the caller's groups, with their role and the active head count.
#[derive(Debug, FromRow, Serialize)]
pub struct GroupSummary {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub status: GroupStatus,
    pub role: GroupRole,
    pub member_count: i64,
}

#[derive(Debug, FromRow, Serialize)]
pub struct GroupMemberView {
    pub user_id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub preferred_team: Option<String>,
    pub role: GroupRole,
    pub joined_at: DateTime<Utc>,
}
