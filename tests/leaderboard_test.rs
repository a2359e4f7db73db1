use std::collections::HashSet;

use once_cell::sync::Lazy;
use uuid::Uuid;

use bolao_backend::models::fixture::Fixture;
use bolao_backend::pool::leaderboard::rank;
use bolao_backend::pool::scoring::ScoringRules;

mod common;
use common::{entrant, fixture, prediction};

static RULES: Lazy<ScoringRules> = Lazy::new(ScoringRules::default);

fn uuid(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

#[test]
fn ranks_descending_with_positional_ranks() {
    let fixture_id = uuid(100);
    let fixtures = vec![fixture(fixture_id, Some((2, 1)))];

    let entrants = vec![
        entrant(uuid(1), "ana", vec![prediction(uuid(1), fixture_id, 1, 0, false)]), // same diff: 18
        entrant(uuid(2), "bruno", vec![prediction(uuid(2), fixture_id, 2, 1, false)]), // exact: 25
        entrant(uuid(3), "carla", vec![]),                                             // no prediction: 0
    ];

    let entries = rank(&entrants, &fixtures, None, &RULES);

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].username, "bruno");
    assert_eq!(entries[0].rank, 1);
    assert_eq!(entries[0].total_points, 25);
    assert_eq!(entries[1].username, "ana");
    assert_eq!(entries[1].rank, 2);
    assert_eq!(entries[1].total_points, 18);
    assert_eq!(entries[2].username, "carla");
    assert_eq!(entries[2].rank, 3);
    assert_eq!(entries[2].total_points, 0);
}

#[test]
fn jokers_double_into_the_totals() {
    let first = uuid(100);
    let second = uuid(101);
    let fixtures = vec![
        fixture(first, Some((2, 1))),
        fixture(second, Some((0, 0))),
    ];

    let entrants = vec![entrant(
        uuid(1),
        "ana",
        vec![
            prediction(uuid(1), first, 2, 1, true),  // exact, doubled: 50
            prediction(uuid(1), second, 1, 1, false), // draw with equal diff: 18
        ],
    )];

    let entries = rank(&entrants, &fixtures, None, &RULES);
    assert_eq!(entries[0].total_points, 68);
}

#[test]
fn unresolved_fixtures_contribute_zero_not_errors() {
    let resolved = uuid(100);
    let pending = uuid(101);
    let fixtures = vec![
        fixture(resolved, Some((1, 0))),
        fixture(pending, None),
    ];

    let entrants = vec![entrant(
        uuid(1),
        "ana",
        vec![
            prediction(uuid(1), resolved, 1, 0, false), // exact: 25
            prediction(uuid(1), pending, 4, 4, true),   // not yet scorable
        ],
    )];

    let entries = rank(&entrants, &fixtures, None, &RULES);
    assert_eq!(entries[0].total_points, 25);
}

#[test]
fn stale_prediction_references_are_ignored() {
    let fixture_id = uuid(100);
    let removed_fixture = uuid(999);
    let fixtures = vec![fixture(fixture_id, Some((2, 1)))];

    let entrants = vec![entrant(
        uuid(1),
        "ana",
        vec![
            prediction(uuid(1), fixture_id, 2, 1, false),       // exact: 25
            prediction(uuid(1), removed_fixture, 3, 3, false),  // fixture gone from the feed
        ],
    )];

    let entries = rank(&entrants, &fixtures, None, &RULES);
    assert_eq!(entries[0].total_points, 25);
}

#[test]
fn group_filter_excludes_non_members_even_the_top_scorer() {
    let fixture_id = uuid(100);
    let fixtures = vec![fixture(fixture_id, Some((2, 1)))];

    let entrants = vec![
        entrant(uuid(1), "ana", vec![prediction(uuid(1), fixture_id, 2, 1, false)]), // 25
        entrant(uuid(2), "bruno", vec![prediction(uuid(2), fixture_id, 1, 0, false)]), // 10
    ];

    let members: HashSet<Uuid> = [uuid(2)].into_iter().collect();
    let entries = rank(&entrants, &fixtures, Some(&members), &RULES);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].username, "bruno");
    assert_eq!(entries[0].rank, 1);
}

#[test]
fn unknown_group_yields_an_empty_ranking() {
    let fixture_id = uuid(100);
    let fixtures = vec![fixture(fixture_id, Some((2, 1)))];
    let entrants = vec![entrant(
        uuid(1),
        "ana",
        vec![prediction(uuid(1), fixture_id, 2, 1, false)],
    )];

    let empty: HashSet<Uuid> = HashSet::new();
    assert!(rank(&entrants, &fixtures, Some(&empty), &RULES).is_empty());
}

#[test]
fn ties_keep_registration_order() {
    let fixture_id = uuid(100);
    let fixtures = vec![fixture(fixture_id, Some((2, 1)))];

    // Identical predictions, identical totals; input order is registration
    // order and the stable sort must preserve it
    let entrants = vec![
        entrant(uuid(1), "ana", vec![prediction(uuid(1), fixture_id, 1, 0, false)]),
        entrant(uuid(2), "bruno", vec![prediction(uuid(2), fixture_id, 1, 0, false)]),
        entrant(uuid(3), "carla", vec![prediction(uuid(3), fixture_id, 1, 0, false)]),
    ];

    let entries = rank(&entrants, &fixtures, None, &RULES);
    let order: Vec<&str> = entries.iter().map(|e| e.username.as_str()).collect();
    assert_eq!(order, vec!["ana", "bruno", "carla"]);
    assert_eq!(
        entries.iter().map(|e| e.rank).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[test]
fn ranking_is_idempotent_over_an_unchanged_snapshot() {
    let fixture_id = uuid(100);
    let fixtures = vec![fixture(fixture_id, Some((2, 1)))];
    let entrants = vec![
        entrant(uuid(1), "ana", vec![prediction(uuid(1), fixture_id, 2, 1, true)]),
        entrant(uuid(2), "bruno", vec![prediction(uuid(2), fixture_id, 0, 0, false)]),
    ];

    let first = rank(&entrants, &fixtures, None, &RULES);
    let second = rank(&entrants, &fixtures, None, &RULES);
    assert_eq!(first, second);
}

#[test]
fn a_new_result_never_lowers_the_scorers_rank() {
    let first = uuid(100);
    let second = uuid(101);

    let entrants = vec![
        entrant(
            uuid(1),
            "ana",
            vec![prediction(uuid(1), first, 1, 0, false)], // same diff vs (2,1): 18
        ),
        entrant(
            uuid(2),
            "bruno",
            vec![
                prediction(uuid(2), first, 0, 1, false), // miss vs (2,1): 0
                prediction(uuid(2), second, 2, 0, false), // exact once resolved: 25
            ],
        ),
    ];

    let before: Vec<Fixture> = vec![fixture(first, Some((2, 1))), fixture(second, None)];
    let after: Vec<Fixture> = vec![fixture(first, Some((2, 1))), fixture(second, Some((2, 0)))];

    let rank_of = |entries: &[bolao_backend::pool::leaderboard::LeaderboardEntry], name: &str| {
        entries
            .iter()
            .find(|entry| entry.username == name)
            .map(|entry| entry.rank)
            .unwrap()
    };

    let before_entries = rank(&entrants, &before, None, &RULES);
    let after_entries = rank(&entrants, &after, None, &RULES);

    // Bruno's new points strictly improved his total; his rank position
    // must not get worse
    assert!(rank_of(&after_entries, "bruno") <= rank_of(&before_entries, "bruno"));
    assert_eq!(rank_of(&after_entries, "bruno"), 1);
}
