use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::prediction::Prediction;
use crate::models::team::Team;
use crate::pool::lifecycle::FixturePhase;
use crate::pool::scoring::Tier;

/// A scheduled competition match. The official score pair is absent until
/// the result is recorded; both sides are always written together.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Fixture {
    pub id: Uuid,
    pub home_team_id: String,
    pub away_team_id: String,
    pub kickoff_time: DateTime<Utc>,
    pub venue: String,
    pub stage: String,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Fixture {
    /// Official result as a pair, or None while the match is unresolved.
    pub fn result(&self) -> Option<(i32, i32)> {
        match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }

    pub fn has_result(&self) -> bool {
        self.result().is_some()
    }
}

// Request/Response DTOs

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateFixtureRequest {
    pub home_team_id: String,
    pub away_team_id: String,
    pub kickoff_time: DateTime<Utc>,
    pub venue: String,
    pub stage: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FixtureResultRequest {
    pub home_score: i32,
    pub away_score: i32,
}

/// Fixture annotated with team metadata and the per-caller derived state
/// the clients render from: lifecycle phase, lock state and earned points.
#[derive(Debug, Serialize)]
pub struct FixtureView {
    pub fixture: Fixture,
    pub home_team: Team,
    pub away_team: Team,
    pub phase: FixturePhase,
    pub predictions_open: bool,
    pub kickoff_in_seconds: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Prediction>,
    /// Points earned by the caller's prediction; null while the fixture is
    /// not yet scorable. Distinct from Some(0), which is a scored miss.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
}
