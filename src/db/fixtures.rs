use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::fixture::{CreateFixtureRequest, Fixture};

const FIXTURE_COLUMNS: &str = "id, home_team_id, away_team_id, kickoff_time, venue, stage, \
                               home_score, away_score, created_at, updated_at";

pub async fn list_fixtures(pool: &PgPool) -> Result<Vec<Fixture>, sqlx::Error> {
    sqlx::query_as::<_, Fixture>(&format!(
        "SELECT {} FROM fixtures ORDER BY kickoff_time, id",
        FIXTURE_COLUMNS
    ))
    .fetch_all(pool)
    .await
}

pub async fn find_fixture(pool: &PgPool, fixture_id: Uuid) -> Result<Option<Fixture>, sqlx::Error> {
    sqlx::query_as::<_, Fixture>(&format!(
        "SELECT {} FROM fixtures WHERE id = $1",
        FIXTURE_COLUMNS
    ))
    .bind(fixture_id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_fixture(
    pool: &PgPool,
    request: &CreateFixtureRequest,
) -> Result<Fixture, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, Fixture>(&format!(
        r#"
        INSERT INTO fixtures (id, home_team_id, away_team_id, kickoff_time, venue, stage,
                              created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {}
        "#,
        FIXTURE_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(&request.home_team_id)
    .bind(&request.away_team_id)
    .bind(request.kickoff_time)
    .bind(&request.venue)
    .bind(&request.stage)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Record the official result. The WHERE clause only matches fixtures with
/// no result yet, so a second write returns None and the caller maps that
/// to a conflict — results are written exactly once, never retracted.
pub async fn record_result(
    pool: &PgPool,
    fixture_id: Uuid,
    home_score: i32,
    away_score: i32,
) -> Result<Option<Fixture>, sqlx::Error> {
    sqlx::query_as::<_, Fixture>(&format!(
        r#"
        UPDATE fixtures
        SET home_score = $1, away_score = $2, updated_at = $3
        WHERE id = $4 AND home_score IS NULL AND away_score IS NULL
        RETURNING {}
        "#,
        FIXTURE_COLUMNS
    ))
    .bind(home_score)
    .bind(away_score)
    .bind(Utc::now())
    .bind(fixture_id)
    .fetch_optional(pool)
    .await
}
