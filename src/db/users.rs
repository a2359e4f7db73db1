use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{User, UserCredentials, UserRole};

pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub preferred_team: Option<&'a str>,
}

pub async fn insert_user(pool: &PgPool, new_user: NewUser<'_>) -> Result<Uuid, sqlx::Error> {
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO users (id, username, email, password_hash, first_name, last_name,
                           preferred_team, role, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(user_id)
    .bind(new_user.username)
    .bind(new_user.email)
    .bind(new_user.password_hash)
    .bind(new_user.first_name)
    .bind(new_user.last_name)
    .bind(new_user.preferred_team)
    .bind(UserRole::User)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(user_id)
}

pub async fn find_credentials_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<UserCredentials>, sqlx::Error> {
    sqlx::query_as::<_, UserCredentials>(
        "SELECT id, username, password_hash, role FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn find_user_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, username, first_name, last_name, preferred_team, role,
               created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// All users in registration order. The leaderboard feeds on this ordering:
/// the ranking sort is stable, so ties resolve by who registered first.
pub async fn list_users_in_registration_order(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, username, first_name, last_name, preferred_team, role,
               created_at, updated_at
        FROM users
        ORDER BY created_at, id
        "#,
    )
    .fetch_all(pool)
    .await
}
