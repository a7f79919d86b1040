//! Filter and search evaluation.
//!
//! Both stages keep input order and only ever drop rows.

use ratings_model::RatingRow;

use crate::selection::FilterSelection;

/// Keep the rows that satisfy every predicate of `selection`.
pub fn apply_filters<'a>(rows: &'a [RatingRow], selection: &FilterSelection) -> Vec<&'a RatingRow> {
    if selection.is_all() {
        return rows.iter().collect();
    }
    rows.iter().filter(|row| selection.matches(row)).collect()
}

/// Trim and lowercase a search query; blank queries become `None`.
pub fn normalize_query(query: Option<&str>) -> Option<String> {
    let trimmed = query?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Narrow already-filtered rows to those whose displayed text contains the
/// query, ignoring case.
pub fn apply_search<'a>(rows: Vec<&'a RatingRow>, query: Option<&str>) -> Vec<&'a RatingRow> {
    let Some(needle) = normalize_query(query) else {
        return rows;
    };
    rows.into_iter()
        .filter(|row| row.search_text().contains(&needle))
        .collect()
}

/// Categorical filtering followed by text search.
pub fn filter_rows<'a>(
    rows: &'a [RatingRow],
    selection: &FilterSelection,
    query: Option<&str>,
) -> Vec<&'a RatingRow> {
    apply_search(apply_filters(rows, selection), query)
}
