use std::collections::HashMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use bolao_backend::models::fixture::Fixture;
use bolao_backend::models::prediction::Prediction;
use bolao_backend::pool::leaderboard::Entrant;

pub fn kickoff() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 11, 20, 0, 0).unwrap()
}

/// A fixture snapshot row; `result` of None models a match that has not
/// been resolved yet.
pub fn fixture(id: Uuid, result: Option<(i32, i32)>) -> Fixture {
    let created = kickoff() - Duration::days(30);
    Fixture {
        id,
        home_team_id: "MEX".to_string(),
        away_team_id: "USA".to_string(),
        kickoff_time: kickoff(),
        venue: "Estádio Azteca, Mexico City".to_string(),
        stage: "Group A".to_string(),
        home_score: result.map(|(home, _)| home),
        away_score: result.map(|(_, away)| away),
        created_at: created,
        updated_at: created,
    }
}

pub fn prediction(
    user_id: Uuid,
    fixture_id: Uuid,
    home_score: i32,
    away_score: i32,
    is_joker: bool,
) -> Prediction {
    let saved = kickoff() - Duration::days(1);
    Prediction {
        id: Uuid::new_v4(),
        user_id,
        fixture_id,
        home_score,
        away_score,
        is_joker,
        created_at: saved,
        updated_at: saved,
    }
}

pub fn entrant(user_id: Uuid, username: &str, predictions: Vec<Prediction>) -> Entrant {
    let predictions: HashMap<Uuid, Prediction> = predictions
        .into_iter()
        .map(|p| (p.fixture_id, p))
        .collect();
    Entrant {
        user_id,
        username: username.to_string(),
        display_name: username.to_string(),
        preferred_team: None,
        predictions,
    }
}
