use std::collections::HashMap;

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::prediction::Prediction;

const PREDICTION_COLUMNS: &str =
    "id, user_id, fixture_id, home_score, away_score, is_joker, created_at, updated_at";

/// Insert or overwrite a user's prediction for a fixture. The unique
/// (user_id, fixture_id) constraint turns concurrent edits from two
/// sessions into last-writer-wins on updated_at.
pub async fn upsert_prediction(
    pool: &PgPool,
    user_id: Uuid,
    fixture_id: Uuid,
    home_score: i32,
    away_score: i32,
    is_joker: bool,
) -> Result<Prediction, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, Prediction>(&format!(
        r#"
        INSERT INTO predictions (id, user_id, fixture_id, home_score, away_score, is_joker,
                                 created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (user_id, fixture_id) DO UPDATE SET
            home_score = EXCLUDED.home_score,
            away_score = EXCLUDED.away_score,
            is_joker = EXCLUDED.is_joker,
            updated_at = EXCLUDED.updated_at
        RETURNING {}
        "#,
        PREDICTION_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(fixture_id)
    .bind(home_score)
    .bind(away_score)
    .bind(is_joker)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// A user's predictions keyed by fixture id.
pub async fn predictions_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<HashMap<Uuid, Prediction>, sqlx::Error> {
    let rows = sqlx::query_as::<_, Prediction>(&format!(
        "SELECT {} FROM predictions WHERE user_id = $1",
        PREDICTION_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|prediction| (prediction.fixture_id, prediction))
        .collect())
}

/// Every prediction in the store, grouped per user then keyed by fixture.
/// One scan feeds a whole leaderboard pass.
pub async fn predictions_by_user(
    pool: &PgPool,
) -> Result<HashMap<Uuid, HashMap<Uuid, Prediction>>, sqlx::Error> {
    let rows = sqlx::query_as::<_, Prediction>(&format!(
        "SELECT {} FROM predictions",
        PREDICTION_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    let mut by_user: HashMap<Uuid, HashMap<Uuid, Prediction>> = HashMap::new();
    for prediction in rows {
        by_user
            .entry(prediction.user_id)
            .or_default()
            .insert(prediction.fixture_id, prediction);
    }
    Ok(by_user)
}
