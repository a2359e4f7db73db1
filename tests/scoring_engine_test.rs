use once_cell::sync::Lazy;
use uuid::Uuid;

use bolao_backend::pool::scoring::{classify, score, ScoringRules, Tier};

mod common;
use common::{fixture, prediction};

static RULES: Lazy<ScoringRules> = Lazy::new(ScoringRules::default);

fn score_against(pred: (i32, i32), joker: bool, actual: (i32, i32)) -> Option<i32> {
    let fixture_id = Uuid::new_v4();
    let fixture = fixture(fixture_id, Some(actual));
    let prediction = prediction(Uuid::new_v4(), fixture_id, pred.0, pred.1, joker);
    score(&prediction, &fixture, &RULES)
}

#[test]
fn exact_score_hits_the_top_tier() {
    assert_eq!(score_against((2, 1), false, (2, 1)), Some(25));
    assert_eq!(score_against((2, 1), true, (2, 1)), Some(50));
}

#[test]
fn correct_difference_without_exact_score() {
    // Same +2 difference, home win both, but not the exact line
    assert_eq!(score_against((3, 1), false, (2, 0)), Some(18));
    assert_eq!(classify((3, 1), (2, 0)), Tier::Difference);
}

#[test]
fn correct_outcome_with_different_difference() {
    // Both home wins, margins differ
    assert_eq!(score_against((1, 0), false, (3, 1)), Some(10));
}

#[test]
fn one_side_exact_when_outcome_is_wrong() {
    // Home score matches, outcome and difference do not
    assert_eq!(score_against((2, 3), false, (2, 0)), Some(4));
}

#[test]
fn complete_miss_scores_zero() {
    assert_eq!(score_against((0, 0), false, (3, 1)), Some(0));
    // A joker doubles a zero into a zero
    assert_eq!(score_against((0, 0), true, (3, 1)), Some(0));
}

#[test]
fn predicted_draw_against_actual_draw_is_correct_difference() {
    // Equal difference of zero, both draws, not exact
    assert_eq!(score_against((1, 1), false, (2, 2)), Some(18));
}

#[test]
fn predicted_draw_never_matches_a_decisive_result() {
    // Draw prediction vs home win: signum 0 vs 1, and neither side matches
    assert_eq!(score_against((1, 1), false, (2, 0)), Some(0));
    // ...unless one side's score lines up
    assert_eq!(score_against((2, 2), false, (2, 0)), Some(4));
}

#[test]
fn the_ladder_never_sums_tiers() {
    // Home score matches AND outcome is correct: outcome tier wins, the
    // one-side tier is not added on top
    assert_eq!(score_against((2, 0), false, (2, 1)), Some(10));
}

#[test]
fn unresolved_fixture_is_not_scorable() {
    let fixture_id = Uuid::new_v4();
    let unresolved = fixture(fixture_id, None);
    let pred = prediction(Uuid::new_v4(), fixture_id, 2, 1, true);
    assert_eq!(score(&pred, &unresolved, &RULES), None);
}

#[test]
fn scoring_is_idempotent() {
    let fixture_id = Uuid::new_v4();
    let resolved = fixture(fixture_id, Some((2, 1)));
    let pred = prediction(Uuid::new_v4(), fixture_id, 3, 1, false);
    assert_eq!(
        score(&pred, &resolved, &RULES),
        score(&pred, &resolved, &RULES)
    );
}

#[test]
fn default_config_only_produces_the_fixed_value_set() {
    let allowed = [0, 4, 10, 18, 25];
    let doubled: Vec<i32> = allowed.iter().map(|points| points * 2).collect();

    for pred_home in 0..=4 {
        for pred_away in 0..=4 {
            for joker in [false, true] {
                let points = score_against((pred_home, pred_away), joker, (2, 1))
                    .expect("fixture has a result");
                let valid = if joker {
                    doubled.contains(&points)
                } else {
                    allowed.contains(&points)
                };
                assert!(
                    valid,
                    "unexpected point value {} for ({}, {}) joker={}",
                    points, pred_home, pred_away, joker
                );
            }
        }
    }
}

#[test]
fn custom_rule_sets_flow_through_unchanged() {
    let rules = ScoringRules {
        exact: 5,
        diff: 3,
        outcome: 2,
        one_score: 1,
    };
    let fixture_id = Uuid::new_v4();
    let resolved = fixture(fixture_id, Some((2, 1)));

    let exact = prediction(Uuid::new_v4(), fixture_id, 2, 1, false);
    let outcome_only = prediction(Uuid::new_v4(), fixture_id, 3, 0, true);
    assert_eq!(score(&exact, &resolved, &rules), Some(5));
    assert_eq!(score(&outcome_only, &resolved, &rules), Some(4));
}
