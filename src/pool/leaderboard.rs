use std::collections::{HashMap, HashSet};

use serde::Serialize;
use uuid::Uuid;

use crate::models::fixture::Fixture;
use crate::models::prediction::Prediction;
use crate::pool::scoring::{score, ScoringRules};

/// Read-only snapshot of one user entering the ranking: identity plus
/// their prediction per fixture id.
#[derive(Debug, Clone)]
pub struct Entrant {
    pub user_id: Uuid,
    pub username: String,
    pub display_name: String,
    pub preferred_team: Option<String>,
    pub predictions: HashMap<Uuid, Prediction>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: i32,
    pub user_id: Uuid,
    pub username: String,
    pub display_name: String,
    pub preferred_team: Option<String>,
    pub total_points: i32,
}

/// Rank entrants by total points over the fixture snapshot.
///
/// With a member filter only those users rank (an unknown group arrives
/// here as an empty set and yields an empty ranking); without one the whole
/// population ranks, which is the ungrouped fallback. Summation walks the
/// fixture snapshot, so predictions referencing removed fixtures are
/// ignored, and a missing prediction contributes zero exactly like a
/// not-yet-scorable one.
///
/// The sort is stable and descending, so equal totals keep the input
/// enumeration order — entrants are loaded in registration order, which
/// makes ties reproducible across runs. Ranks are positional 1..N.
pub fn rank(
    entrants: &[Entrant],
    fixtures: &[Fixture],
    member_filter: Option<&HashSet<Uuid>>,
    rules: &ScoringRules,
) -> Vec<LeaderboardEntry> {
    let mut totals: Vec<(&Entrant, i32)> = entrants
        .iter()
        .filter(|entrant| member_filter.map_or(true, |members| members.contains(&entrant.user_id)))
        .map(|entrant| (entrant, total_points(entrant, fixtures, rules)))
        .collect();

    totals.sort_by(|a, b| b.1.cmp(&a.1));

    totals
        .into_iter()
        .enumerate()
        .map(|(index, (entrant, total_points))| LeaderboardEntry {
            rank: (index + 1) as i32,
            user_id: entrant.user_id,
            username: entrant.username.clone(),
            display_name: entrant.display_name.clone(),
            preferred_team: entrant.preferred_team.clone(),
            total_points,
        })
        .collect()
}

fn total_points(entrant: &Entrant, fixtures: &[Fixture], rules: &ScoringRules) -> i32 {
    fixtures
        .iter()
        .filter_map(|fixture| {
            entrant
                .predictions
                .get(&fixture.id)
                .and_then(|prediction| score(prediction, fixture, rules))
        })
        .sum()
}
