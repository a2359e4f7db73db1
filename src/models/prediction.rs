use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user's score-line prediction for one fixture. One row per
/// (user, fixture) pair; edits overwrite in place (last writer wins on
/// `updated_at`).
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Prediction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub fixture_id: Uuid,
    pub home_score: i32,
    pub away_score: i32,
    pub is_joker: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpsertPredictionRequest {
    pub home_score: i32,
    pub away_score: i32,
    #[serde(default)]
    pub is_joker: bool,
}
