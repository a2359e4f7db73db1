use serde::{Deserialize, Serialize};

use crate::models::fixture::Fixture;
use crate::models::prediction::Prediction;

/// Point weights for the four scoring tiers. Loaded from the `scoring`
/// section of the configuration so the table can be tuned between
/// competition editions without touching the engine.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ScoringRules {
    pub exact: i32,
    pub diff: i32,
    pub outcome: i32,
    pub one_score: i32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            exact: 25,
            diff: 18,
            outcome: 10,
            one_score: 4,
        }
    }
}

/// The mutually exclusive scoring outcomes, ranked by precision.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Exact,
    Difference,
    Outcome,
    OneScore,
    Miss,
}

impl Tier {
    pub fn points(&self, rules: &ScoringRules) -> i32 {
        match self {
            Tier::Exact => rules.exact,
            Tier::Difference => rules.diff,
            Tier::Outcome => rules.outcome,
            Tier::OneScore => rules.one_score,
            Tier::Miss => 0,
        }
    }
}

/// Classify a (predicted, actual) score-line pair into its tier.
///
/// The ladder is evaluated top down and the first hit wins; tiers never
/// accumulate. A draw has signum 0, so a predicted draw only counts as a
/// correct outcome against an actual draw and never against a decisive
/// result.
pub fn classify(predicted: (i32, i32), actual: (i32, i32)) -> Tier {
    let (pred_home, pred_away) = predicted;
    let (actual_home, actual_away) = actual;

    if pred_home == actual_home && pred_away == actual_away {
        return Tier::Exact;
    }

    let predicted_diff = pred_home - pred_away;
    let actual_diff = actual_home - actual_away;
    let correct_outcome = predicted_diff.signum() == actual_diff.signum();

    if correct_outcome && predicted_diff == actual_diff {
        return Tier::Difference;
    }
    if correct_outcome {
        return Tier::Outcome;
    }
    if pred_home == actual_home || pred_away == actual_away {
        return Tier::OneScore;
    }
    Tier::Miss
}

/// Points a prediction earns against a fixture's official result.
///
/// Returns None while the fixture has no result — "not yet scorable" is a
/// distinct state from a scored zero and only the leaderboard aggregation
/// folds it into a zero contribution. The joker doubles the tier value
/// after tier resolution.
///
/// Scores are non-negative by construction: both writes (prediction upsert
/// and result recording) validate before they persist.
pub fn score(prediction: &Prediction, fixture: &Fixture, rules: &ScoringRules) -> Option<i32> {
    let actual = fixture.result()?;
    let tier = classify((prediction.home_score, prediction.away_score), actual);
    let base = tier.points(rules);
    Some(if prediction.is_joker { base * 2 } else { base })
}

/// Tier of a prediction against a resolved fixture, for per-match
/// breakdowns in the clients.
pub fn tier_for(prediction: &Prediction, fixture: &Fixture) -> Option<Tier> {
    let actual = fixture.result()?;
    Some(classify(
        (prediction.home_score, prediction.away_score),
        actual,
    ))
}
