//! Caller-owned view state and the single evaluation entry point.

use ratings_model::{Column, RatingRow, SortDirection};

use crate::filter::{filter_rows, normalize_query};
use crate::rank::apply_ordering;
use crate::selection::FilterSelection;

/// How surviving rows are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderingMode {
    /// Connection group first, then rating descending.
    #[default]
    DefaultRanked,
    /// Plain sort on one column.
    ColumnSort {
        column: Column,
        direction: SortDirection,
    },
}

/// Everything a front-end needs to reproduce its current view.
///
/// The engine only reads this; transitions return a new value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub selection: FilterSelection,
    pub query: Option<String>,
    pub ordering: OrderingMode,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_selection(mut self, selection: FilterSelection) -> Self {
        self.selection = selection;
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    #[must_use]
    pub fn with_ordering(mut self, ordering: OrderingMode) -> Self {
        self.ordering = ordering;
        self
    }

    /// State after a column header is clicked.
    ///
    /// Clicking the sorted column flips its direction; any other column
    /// starts descending.
    #[must_use]
    pub fn click_column(&self, column: Column) -> Self {
        let direction = match self.ordering {
            OrderingMode::ColumnSort {
                column: current,
                direction,
            } if current == column => direction.toggled(),
            _ => SortDirection::Descending,
        };
        Self {
            ordering: OrderingMode::ColumnSort { column, direction },
            ..self.clone()
        }
    }

    /// State with the default ranking restored.
    #[must_use]
    pub fn reset_sort(&self) -> Self {
        Self {
            ordering: OrderingMode::DefaultRanked,
            ..self.clone()
        }
    }

    /// The effective search query, if any.
    pub fn normalized_query(&self) -> Option<String> {
        normalize_query(self.query.as_deref())
    }
}

/// Filtered, ordered view over a normalized row set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedResult<'a> {
    rows: Vec<&'a RatingRow>,
    ordering: OrderingMode,
    source_len: usize,
}

impl<'a> RankedResult<'a> {
    pub fn rows(&self) -> &[&'a RatingRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<&'a RatingRow> {
        self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a RatingRow> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ordering(&self) -> OrderingMode {
        self.ordering
    }

    /// Number of rows the view was computed from.
    pub fn source_len(&self) -> usize {
        self.source_len
    }
}

/// Compute the view for a session from the full normalized row set.
pub fn evaluate<'a>(rows: &'a [RatingRow], session: &SessionState) -> RankedResult<'a> {
    let mut kept = filter_rows(rows, &session.selection, session.query.as_deref());
    apply_ordering(&mut kept, session.ordering);
    RankedResult {
        rows: kept,
        ordering: session.ordering,
        source_len: rows.len(),
    }
}

/// Compute the default-ranked view for a selection and optional query.
pub fn evaluate_selection<'a>(
    rows: &'a [RatingRow],
    selection: &FilterSelection,
    query: Option<&str>,
) -> RankedResult<'a> {
    let session = SessionState {
        selection: *selection,
        query: query.map(str::to_string),
        ordering: OrderingMode::DefaultRanked,
    };
    evaluate(rows, &session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratings_model::{ConnectionFilter, Decision};

    fn rows() -> Vec<RatingRow> {
        let row = |decision: &str, rating, condition: &str, is_static| {
            RatingRow::new(Decision::from_raw(decision), rating, condition, "", is_static)
        };
        vec![
            row("Not Service Connected", Some(30), "Knee", Some(false)),
            row("Service Connected", Some(50), "PTSD", Some(true)),
            row("Service Connected", None, "Tinnitus", None),
        ]
    }

    #[test]
    fn click_same_column_toggles_direction() {
        let state = SessionState::new().click_column(Column::Rating);
        assert_eq!(
            state.ordering,
            OrderingMode::ColumnSort {
                column: Column::Rating,
                direction: SortDirection::Descending
            }
        );
        let state = state.click_column(Column::Rating);
        assert_eq!(
            state.ordering,
            OrderingMode::ColumnSort {
                column: Column::Rating,
                direction: SortDirection::Ascending
            }
        );
        let state = state.click_column(Column::Condition);
        assert_eq!(
            state.ordering,
            OrderingMode::ColumnSort {
                column: Column::Condition,
                direction: SortDirection::Descending
            }
        );
        assert_eq!(state.reset_sort().ordering, OrderingMode::DefaultRanked);
    }

    #[test]
    fn transitions_leave_the_original_untouched() {
        let state = SessionState::new().with_query("knee");
        let clicked = state.click_column(Column::Static);
        assert_eq!(state.ordering, OrderingMode::DefaultRanked);
        assert_eq!(clicked.query.as_deref(), Some("knee"));
    }

    #[test]
    fn evaluate_recomputes_from_full_set() {
        let rows = rows();
        let narrowed = SessionState::new().with_query("ptsd");
        assert_eq!(evaluate(&rows, &narrowed).len(), 1);

        // Changing the query yields rows the previous view had dropped.
        let widened = narrowed.clone().with_query("knee");
        let result = evaluate(&rows, &widened);
        assert_eq!(result.len(), 1);
        assert_eq!(result.rows()[0].condition(), "Knee");
        assert_eq!(result.source_len(), 3);
    }

    #[test]
    fn evaluate_selection_uses_default_ranking() {
        let rows = rows();
        let result = evaluate_selection(&rows, &FilterSelection::all(), None);
        let order: Vec<&str> = result.iter().map(|r| r.condition()).collect();
        assert_eq!(order, vec!["PTSD", "Tinnitus", "Knee"]);
        assert_eq!(result.ordering(), OrderingMode::DefaultRanked);

        let sc = FilterSelection::from_axes(Some(ConnectionFilter::ServiceConnected), None);
        let result = evaluate_selection(&rows, &sc, Some("tinnitus"));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn normalized_query_trims_blank_input() {
        assert_eq!(SessionState::new().with_query("  ").normalized_query(), None);
        assert_eq!(
            SessionState::new().with_query(" Knee ").normalized_query(),
            Some("knee".to_string())
        );
    }
}
