//! Row ordering.
//!
//! Two orderings exist. The default ranking puts every row that is not
//! "Not Service Connected" first, then orders by rating descending. Column
//! sort is a plain sort on one displayed column. Both use stable sorts, so
//! rows with equal keys keep their input order.

use std::borrow::Borrow;
use std::cmp::{Ordering, Reverse};

use ratings_model::{Column, RatingRow, SortDirection};

use crate::session::OrderingMode;

/// Group rank: 1 for "Not Service Connected", 0 for every other decision.
pub fn connection_group(row: &RatingRow) -> u8 {
    u8::from(row.decision().is_not_service_connected())
}

/// Default sort key. A missing rating ranks as 0.
pub fn rank_key(row: &RatingRow) -> (u8, Reverse<u32>) {
    (
        connection_group(row),
        Reverse(row.rating_percent().unwrap_or(0)),
    )
}

/// Order rows by connection group, then rating descending.
pub fn rank_default<R: Borrow<RatingRow>>(rows: &mut [R]) {
    rows.sort_by_key(|row| rank_key(row.borrow()));
}

/// Order rows by one column.
///
/// The rating column compares numerically with a missing rating below 0;
/// every other column compares its displayed text.
pub fn sort_by_column<R: Borrow<RatingRow>>(
    rows: &mut [R],
    column: Column,
    direction: SortDirection,
) {
    rows.sort_by(|a, b| {
        let ordering = compare_column(a.borrow(), b.borrow(), column);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Apply an ordering mode in place.
pub fn apply_ordering<R: Borrow<RatingRow>>(rows: &mut [R], ordering: OrderingMode) {
    match ordering {
        OrderingMode::DefaultRanked => rank_default(rows),
        OrderingMode::ColumnSort { column, direction } => sort_by_column(rows, column, direction),
    }
}

fn compare_column(a: &RatingRow, b: &RatingRow, column: Column) -> Ordering {
    match column {
        Column::Rating => numeric_rating(a).cmp(&numeric_rating(b)),
        other => a.cell(other).cmp(&b.cell(other)),
    }
}

fn numeric_rating(row: &RatingRow) -> i64 {
    row.rating_percent().map_or(-1, i64::from)
}
