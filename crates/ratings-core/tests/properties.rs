//! Property tests for filtering and ranking.

use proptest::prelude::*;

use ratings_core::{
    FilterSelection, InvalidFilterSelection, apply_filters, filter_rows, rank_default, rank_key,
    validate_tokens,
};
use ratings_model::{ConnectionFilter, Decision, FilterToken, RatingRow, StaticFilter};

fn decision_strategy() -> impl Strategy<Value = Decision> {
    prop_oneof![
        Just(Decision::from_raw("Service Connected")),
        Just(Decision::from_raw("Not Service Connected")),
        Just(Decision::from_raw("Deferred")),
        Just(Decision::missing()),
    ]
}

fn rating_strategy() -> impl Strategy<Value = Option<u32>> {
    // Coarse steps so that equal keys are common.
    prop::option::of((0u32..=10).prop_map(|step| step * 10))
}

fn condition_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Tinnitus".to_string()),
        Just("Knee strain".to_string()),
        Just("PTSD".to_string()),
        "[a-zA-Z ]{0,12}",
    ]
}

/// Rows whose description records their input position.
fn rows_strategy() -> impl Strategy<Value = Vec<RatingRow>> {
    prop::collection::vec(
        (
            decision_strategy(),
            rating_strategy(),
            condition_strategy(),
            prop::option::of(any::<bool>()),
        ),
        0..40,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(index, (decision, rating, condition, is_static))| {
                RatingRow::new(decision, rating, condition, format!("#{index}"), is_static)
            })
            .collect()
    })
}

fn selection_strategy() -> impl Strategy<Value = FilterSelection> {
    (
        prop::option::of(prop_oneof![
            Just(ConnectionFilter::ServiceConnected),
            Just(ConnectionFilter::NotServiceConnected),
        ]),
        prop::option::of(prop_oneof![
            Just(StaticFilter::Static),
            Just(StaticFilter::NonStatic),
        ]),
    )
        .prop_map(|(connection, stability)| FilterSelection::from_axes(connection, stability))
}

fn token_strategy() -> impl Strategy<Value = FilterToken> {
    prop::sample::select(FilterToken::ALL.to_vec())
}

fn position(rows: &[RatingRow], row: &RatingRow) -> usize {
    rows.iter()
        .position(|candidate| std::ptr::eq(candidate, row))
        .expect("output row must come from the input")
}

fn input_index(row: &RatingRow) -> usize {
    row.description()[1..].parse().unwrap()
}

proptest! {
    #[test]
    fn filtered_rows_are_an_ordered_subset_satisfying_every_predicate(
        rows in rows_strategy(),
        selection in selection_strategy(),
    ) {
        let kept = apply_filters(&rows, &selection);
        let positions: Vec<usize> = kept.iter().map(|row| position(&rows, row)).collect();
        prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

        for row in &kept {
            if let Some(connection) = selection.connection() {
                match connection {
                    ConnectionFilter::ServiceConnected => {
                        prop_assert!(row.decision().is_service_connected());
                    }
                    ConnectionFilter::NotServiceConnected => {
                        prop_assert!(row.decision().is_not_service_connected());
                    }
                }
            }
            if let Some(stability) = selection.stability() {
                prop_assert_eq!(row.is_static(), Some(stability.expected()));
            }
        }
        // Nothing that satisfies the predicates is dropped.
        let expected = rows.iter().filter(|row| selection.matches(row)).count();
        prop_assert_eq!(kept.len(), expected);
    }

    #[test]
    fn all_selection_is_identity(rows in rows_strategy()) {
        let kept = apply_filters(&rows, &FilterSelection::all());
        prop_assert_eq!(kept.len(), rows.len());
        for (kept_row, row) in kept.iter().zip(rows.iter()) {
            prop_assert!(std::ptr::eq(*kept_row, row));
        }
    }

    #[test]
    fn search_results_contain_the_query(
        rows in rows_strategy(),
        query in prop_oneof![Just("tinnitus"), Just("KNEE"), Just("service"), Just("n/a")],
    ) {
        let found = filter_rows(&rows, &FilterSelection::all(), Some(query));
        let needle = query.to_lowercase();
        for row in &found {
            prop_assert!(row.search_text().contains(&needle));
        }
        let expected = rows.iter().filter(|row| row.search_text().contains(&needle)).count();
        prop_assert_eq!(found.len(), expected);
    }

    #[test]
    fn ranking_orders_by_key(mut rows in rows_strategy()) {
        rank_default(&mut rows);
        prop_assert!(rows.windows(2).all(|pair| rank_key(&pair[0]) <= rank_key(&pair[1])));
    }

    #[test]
    fn ranking_is_idempotent(mut rows in rows_strategy()) {
        rank_default(&mut rows);
        let once = rows.clone();
        rank_default(&mut rows);
        prop_assert_eq!(once, rows);
    }

    #[test]
    fn ranking_is_stable(mut rows in rows_strategy()) {
        rank_default(&mut rows);
        for pair in rows.windows(2) {
            if rank_key(&pair[0]) == rank_key(&pair[1]) {
                prop_assert!(input_index(&pair[0]) < input_index(&pair[1]));
            }
        }
    }

    #[test]
    fn validator_accepts_exactly_the_well_formed_sets(
        tokens in prop::collection::vec(token_strategy(), 0..6),
    ) {
        let has = |token: FilterToken| tokens.contains(&token);
        let connection_conflict =
            has(FilterToken::ServiceConnectedOnly) && has(FilterToken::NotServiceConnectedOnly);
        let distinct: std::collections::BTreeSet<FilterToken> = tokens.iter().copied().collect();
        let expected = if distinct.is_empty() {
            Err(InvalidFilterSelection::EmptySelection)
        } else if connection_conflict {
            Err(InvalidFilterSelection::ConflictingConnectionFilters)
        } else if has(FilterToken::StaticOnly) && has(FilterToken::NonStaticOnly) {
            Err(InvalidFilterSelection::ConflictingStaticFilters)
        } else if has(FilterToken::All) && distinct.len() > 1 {
            Err(InvalidFilterSelection::AllCombinedWithOthers)
        } else {
            Ok(distinct.iter().copied().collect::<Vec<_>>())
        };

        let actual = validate_tokens(&tokens).map(|selection| selection.tokens());
        prop_assert_eq!(actual, expected);
    }
}

#[test]
fn reference_ordering_from_mixed_groups() {
    let mut rows = vec![
        RatingRow::new(Decision::from_raw("Not Service Connected"), Some(30), "a", "", None),
        RatingRow::new(Decision::from_raw("Service Connected"), Some(50), "b", "", None),
        RatingRow::new(Decision::from_raw("Service Connected"), None, "c", "", None),
    ];
    rank_default(&mut rows);
    let order: Vec<(&str, Option<u32>)> = rows
        .iter()
        .map(|row| (row.decision().display(), row.rating_percent()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("Service Connected", Some(50)),
            ("Service Connected", None),
            ("Not Service Connected", Some(30)),
        ]
    );
}
