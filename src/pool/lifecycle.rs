use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long after kickoff a match is considered in progress, even once a
/// result value has been posted (stoppage time, extra time, penalties).
pub const LIVE_WINDOW_MINUTES: i64 = 120;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FixturePhase {
    Scheduled,
    Live,
    Finished,
}

impl FixturePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixturePhase::Scheduled => "scheduled",
            FixturePhase::Live => "live",
            FixturePhase::Finished => "finished",
        }
    }
}

/// Resolve a fixture's lifecycle phase from its kickoff instant, the
/// caller's clock and whether an official result has been recorded.
///
/// Finished is only reachable once a result exists; a fixture past its live
/// window with no result yet stays Live until the result lands. Callers
/// re-resolve on every request since the answer moves with the wall clock.
pub fn resolve_phase(
    kickoff_time: DateTime<Utc>,
    now: DateTime<Utc>,
    has_result: bool,
) -> FixturePhase {
    if now < kickoff_time {
        return FixturePhase::Scheduled;
    }
    if has_result && now - kickoff_time > Duration::minutes(LIVE_WINDOW_MINUTES) {
        FixturePhase::Finished
    } else {
        FixturePhase::Live
    }
}

/// Seconds until kickoff; negative once the match has started.
pub fn seconds_until_kickoff(kickoff_time: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (kickoff_time - now).num_seconds()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn kickoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 11, 20, 0, 0).unwrap()
    }

    #[test]
    fn scheduled_strictly_before_kickoff() {
        let now = kickoff() - Duration::seconds(1);
        assert_eq!(resolve_phase(kickoff(), now, false), FixturePhase::Scheduled);
        assert_eq!(resolve_phase(kickoff(), now, true), FixturePhase::Scheduled);
    }

    #[test]
    fn live_at_kickoff_instant() {
        assert_eq!(resolve_phase(kickoff(), kickoff(), false), FixturePhase::Live);
    }

    #[test]
    fn live_without_result_even_past_window() {
        let now = kickoff() + Duration::minutes(LIVE_WINDOW_MINUTES) + Duration::hours(5);
        assert_eq!(resolve_phase(kickoff(), now, false), FixturePhase::Live);
    }

    #[test]
    fn live_with_result_inside_window() {
        let now = kickoff() + Duration::minutes(LIVE_WINDOW_MINUTES);
        assert_eq!(resolve_phase(kickoff(), now, true), FixturePhase::Live);
    }

    #[test]
    fn finished_with_result_past_window() {
        let now = kickoff() + Duration::minutes(LIVE_WINDOW_MINUTES) + Duration::seconds(1);
        assert_eq!(resolve_phase(kickoff(), now, true), FixturePhase::Finished);
    }
}
