use chrono::{DateTime, Duration, Utc};

/// Predictions close this many minutes before kickoff.
pub const LOCK_WINDOW_MINUTES: i64 = 10;

/// Returned when a prediction write arrives inside the lock window or after
/// kickoff, so the HTTP layer can render "predictions are closed" instead
/// of a generic validation failure.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("predictions are closed for this match")]
pub struct PredictionsLocked;

/// Whether a prediction for a fixture may still be created or edited.
///
/// True only while kickoff is strictly more than the lock window away,
/// which also implies the fixture is still scheduled. This is the
/// authoritative check: every write path goes through it, regardless of
/// what any client chose to display.
pub fn predictions_open(kickoff_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    kickoff_time - now > Duration::minutes(LOCK_WINDOW_MINUTES)
}

pub fn ensure_open(
    kickoff_time: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), PredictionsLocked> {
    if predictions_open(kickoff_time, now) {
        Ok(())
    } else {
        Err(PredictionsLocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn kickoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 11, 20, 0, 0).unwrap()
    }

    #[test]
    fn open_one_second_outside_the_window() {
        let now = kickoff() - Duration::minutes(LOCK_WINDOW_MINUTES) - Duration::seconds(1);
        assert!(predictions_open(kickoff(), now));
        assert_eq!(ensure_open(kickoff(), now), Ok(()));
    }

    #[test]
    fn locked_exactly_at_the_window() {
        let now = kickoff() - Duration::minutes(LOCK_WINDOW_MINUTES);
        assert!(!predictions_open(kickoff(), now));
        assert_eq!(ensure_open(kickoff(), now), Err(PredictionsLocked));
    }

    #[test]
    fn locked_at_and_after_kickoff() {
        assert!(!predictions_open(kickoff(), kickoff()));
        assert!(!predictions_open(kickoff(), kickoff() + Duration::hours(1)));
    }
}
