use std::collections::HashSet;

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::group::{Group, GroupMemberView, GroupMembership, GroupRole, GroupSummary};

const GROUP_COLUMNS: &str = "id, code, name, description, owner_id, status, created_at, updated_at";

/// Create a group and its owner membership atomically.
pub async fn insert_group(
    pool: &PgPool,
    code: &str,
    name: &str,
    description: Option<&str>,
    owner_id: Uuid,
) -> Result<Group, sqlx::Error> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let group = sqlx::query_as::<_, Group>(&format!(
        r#"
        INSERT INTO groups (id, code, name, description, owner_id, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, 'active', $6, $7)
        RETURNING {}
        "#,
        GROUP_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(code)
    .bind(name)
    .bind(description)
    .bind(owner_id)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO group_memberships (id, group_id, user_id, role, is_active, joined_at)
        VALUES ($1, $2, $3, $4, TRUE, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(group.id)
    .bind(owner_id)
    .bind(GroupRole::Owner)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(group)
}

pub async fn find_group_by_code(pool: &PgPool, code: &str) -> Result<Option<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>(&format!(
        "SELECT {} FROM groups WHERE code = $1 AND status = 'active'",
        GROUP_COLUMNS
    ))
    .bind(code)
    .fetch_optional(pool)
    .await
}

pub async fn find_group(pool: &PgPool, group_id: Uuid) -> Result<Option<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>(&format!(
        "SELECT {} FROM groups WHERE id = $1",
        GROUP_COLUMNS
    ))
    .bind(group_id)
    .fetch_optional(pool)
    .await
}

pub async fn code_exists(pool: &PgPool, code: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM groups WHERE code = $1")
        .bind(code)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

pub async fn find_membership(
    pool: &PgPool,
    group_id: Uuid,
    user_id: Uuid,
) -> Result<Option<GroupMembership>, sqlx::Error> {
    sqlx::query_as::<_, GroupMembership>(
        r#"
        SELECT id, group_id, user_id, role, is_active, joined_at
        FROM group_memberships
        WHERE group_id = $1 AND user_id = $2
        "#,
    )
    .bind(group_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_membership(
    pool: &PgPool,
    group_id: Uuid,
    user_id: Uuid,
    role: GroupRole,
) -> Result<GroupMembership, sqlx::Error> {
    sqlx::query_as::<_, GroupMembership>(
        r#"
        INSERT INTO group_memberships (id, group_id, user_id, role, is_active, joined_at)
        VALUES ($1, $2, $3, $4, TRUE, $5)
        RETURNING id, group_id, user_id, role, is_active, joined_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(group_id)
    .bind(user_id)
    .bind(role)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

/// The caller's groups with their role and the active member head count.
pub async fn groups_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<GroupSummary>, sqlx::Error> {
    sqlx::query_as::<_, GroupSummary>(
        r#"
        SELECT g.id, g.code, g.name, g.description, g.owner_id, g.status, gm.role,
               (SELECT COUNT(*) FROM group_memberships m
                WHERE m.group_id = g.id AND m.is_active) AS member_count
        FROM groups g
        JOIN group_memberships gm ON gm.group_id = g.id
        WHERE gm.user_id = $1 AND gm.is_active AND g.status = 'active'
        ORDER BY g.created_at
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn list_members(pool: &PgPool, group_id: Uuid) -> Result<Vec<GroupMemberView>, sqlx::Error> {
    sqlx::query_as::<_, GroupMemberView>(
        r#"
        SELECT u.id AS user_id, u.username, u.first_name, u.last_name, u.preferred_team,
               gm.role, gm.joined_at
        FROM group_memberships gm
        JOIN users u ON u.id = gm.user_id
        WHERE gm.group_id = $1 AND gm.is_active
        ORDER BY gm.joined_at
        "#,
    )
    .bind(group_id)
    .fetch_all(pool)
    .await
}

/// Active member ids of a group, as the filter set for a scoped
/// leaderboard. An unknown group id simply produces an empty set.
pub async fn active_member_ids(pool: &PgPool, group_id: Uuid) -> Result<HashSet<Uuid>, sqlx::Error> {
    let rows: Vec<(Uuid,)> = sqlx::query_as(
        "SELECT user_id FROM group_memberships WHERE group_id = $1 AND is_active",
    )
    .bind(group_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}
