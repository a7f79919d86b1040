//! Filter selections and their validation.

use std::collections::BTreeSet;

use ratings_model::{ConnectionFilter, FilterToken, RatingRow, StaticFilter};

use crate::error::InvalidFilterSelection;

/// A validated filter selection.
///
/// Holds at most one choice per axis; with neither axis set it is `{All}`.
/// Contradictory selections cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FilterSelection {
    connection: Option<ConnectionFilter>,
    stability: Option<StaticFilter>,
}

impl FilterSelection {
    /// The `{All}` selection: every row passes.
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a selection from one optional choice per axis.
    ///
    /// This is the shape of two independent drop-downs, so it is always valid.
    pub fn from_axes(
        connection: Option<ConnectionFilter>,
        stability: Option<StaticFilter>,
    ) -> Self {
        Self {
            connection,
            stability,
        }
    }

    pub fn connection(&self) -> Option<ConnectionFilter> {
        self.connection
    }

    pub fn stability(&self) -> Option<StaticFilter> {
        self.stability
    }

    pub fn is_all(&self) -> bool {
        self.connection.is_none() && self.stability.is_none()
    }

    /// The tokens this selection stands for, in menu order.
    pub fn tokens(&self) -> Vec<FilterToken> {
        if self.is_all() {
            return vec![FilterToken::All];
        }
        self.connection
            .map(|c| c.token())
            .into_iter()
            .chain(self.stability.map(|s| s.token()))
            .collect()
    }

    /// Returns true when the row satisfies every active predicate.
    pub fn matches(&self, row: &RatingRow) -> bool {
        let connection_ok = match self.connection {
            None => true,
            Some(ConnectionFilter::ServiceConnected) => row.decision().is_service_connected(),
            Some(ConnectionFilter::NotServiceConnected) => {
                row.decision().is_not_service_connected()
            }
        };
        let static_ok = match self.stability {
            None => true,
            Some(filter) => row.is_static() == Some(filter.expected()),
        };
        connection_ok && static_ok
    }
}

/// Validate a set of filter tokens.
///
/// Duplicates are ignored. Rules are checked in a fixed order and only the
/// first violation is reported: empty set, connection conflict, static
/// conflict, then `All` combined with anything else.
pub fn validate_tokens(tokens: &[FilterToken]) -> Result<FilterSelection, InvalidFilterSelection> {
    let set: BTreeSet<FilterToken> = tokens.iter().copied().collect();

    if set.is_empty() {
        return Err(InvalidFilterSelection::EmptySelection);
    }
    if set.contains(&FilterToken::ServiceConnectedOnly)
        && set.contains(&FilterToken::NotServiceConnectedOnly)
    {
        return Err(InvalidFilterSelection::ConflictingConnectionFilters);
    }
    if set.contains(&FilterToken::StaticOnly) && set.contains(&FilterToken::NonStaticOnly) {
        return Err(InvalidFilterSelection::ConflictingStaticFilters);
    }
    if set.contains(&FilterToken::All) {
        if set.len() > 1 {
            return Err(InvalidFilterSelection::AllCombinedWithOthers);
        }
        return Ok(FilterSelection::all());
    }

    let connection = set.iter().find_map(|token| match token {
        FilterToken::ServiceConnectedOnly => Some(ConnectionFilter::ServiceConnected),
        FilterToken::NotServiceConnectedOnly => Some(ConnectionFilter::NotServiceConnected),
        _ => None,
    });
    let stability = set.iter().find_map(|token| match token {
        FilterToken::StaticOnly => Some(StaticFilter::Static),
        FilterToken::NonStaticOnly => Some(StaticFilter::NonStatic),
        _ => None,
    });
    Ok(FilterSelection::from_axes(connection, stability))
}

/// Validate user-facing filter labels (menu numbers, slugs or labels).
///
/// Unknown labels are rejected before any combination rule is checked.
pub fn validate_labels<I, S>(labels: I) -> Result<FilterSelection, InvalidFilterSelection>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tokens = Vec::new();
    for label in labels {
        let label = label.as_ref();
        let token = label
            .parse::<FilterToken>()
            .map_err(|_| InvalidFilterSelection::UnknownFilter {
                label: label.trim().to_string(),
            })?;
        tokens.push(token);
    }
    validate_tokens(&tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratings_model::Decision;

    use ratings_model::FilterToken::{
        All, NonStaticOnly, NotServiceConnectedOnly, ServiceConnectedOnly, StaticOnly,
    };

    #[test]
    fn accepts_all_alone() {
        assert_eq!(validate_tokens(&[All]), Ok(FilterSelection::all()));
    }

    #[test]
    fn accepts_one_per_axis() {
        let selection = validate_tokens(&[StaticOnly, ServiceConnectedOnly]).unwrap();
        assert_eq!(
            selection.connection(),
            Some(ConnectionFilter::ServiceConnected)
        );
        assert_eq!(selection.stability(), Some(StaticFilter::Static));
        assert_eq!(selection.tokens(), vec![ServiceConnectedOnly, StaticOnly]);
    }

    #[test]
    fn rejects_empty_selection() {
        assert_eq!(
            validate_tokens(&[]),
            Err(InvalidFilterSelection::EmptySelection)
        );
    }

    #[test]
    fn rejects_conflicts_with_matching_reason() {
        assert_eq!(
            validate_tokens(&[ServiceConnectedOnly, NotServiceConnectedOnly]),
            Err(InvalidFilterSelection::ConflictingConnectionFilters)
        );
        assert_eq!(
            validate_tokens(&[StaticOnly, NonStaticOnly]),
            Err(InvalidFilterSelection::ConflictingStaticFilters)
        );
        assert_eq!(
            validate_tokens(&[All, ServiceConnectedOnly]),
            Err(InvalidFilterSelection::AllCombinedWithOthers)
        );
    }

    #[test]
    fn reports_first_violation_only() {
        assert_eq!(
            validate_tokens(&[
                All,
                NonStaticOnly,
                StaticOnly,
                NotServiceConnectedOnly,
                ServiceConnectedOnly,
            ]),
            Err(InvalidFilterSelection::ConflictingConnectionFilters)
        );
        assert_eq!(
            validate_tokens(&[All, StaticOnly, NonStaticOnly]),
            Err(InvalidFilterSelection::ConflictingStaticFilters)
        );
    }

    #[test]
    fn duplicates_collapse() {
        let selection = validate_tokens(&[StaticOnly, StaticOnly]).unwrap();
        assert_eq!(selection.tokens(), vec![StaticOnly]);
        assert_eq!(validate_tokens(&[All, All]), Ok(FilterSelection::all()));
    }

    #[test]
    fn labels_are_parsed_before_rules() {
        assert_eq!(
            validate_labels(["Service Connected only", "Static only"]),
            Ok(FilterSelection::from_axes(
                Some(ConnectionFilter::ServiceConnected),
                Some(StaticFilter::Static)
            ))
        );
        assert_eq!(
            validate_labels(["1", "2"]),
            Err(InvalidFilterSelection::ConflictingConnectionFilters)
        );
        assert_eq!(
            validate_labels(["0", "bogus", "1"]),
            Err(InvalidFilterSelection::UnknownFilter {
                label: "bogus".to_string()
            })
        );
        assert_eq!(
            validate_labels(Vec::<String>::new()),
            Err(InvalidFilterSelection::EmptySelection)
        );
    }

    #[test]
    fn unknown_static_matches_neither_static_filter() {
        let decision = Decision::from_raw("Service Connected");
        let row = RatingRow::new(decision, Some(10), "Knee", "", None);
        let static_only = FilterSelection::from_axes(None, Some(StaticFilter::Static));
        let non_static = FilterSelection::from_axes(None, Some(StaticFilter::NonStatic));
        assert!(!static_only.matches(&row));
        assert!(!non_static.matches(&row));
        assert!(FilterSelection::all().matches(&row));
    }

    #[test]
    fn unknown_decision_matches_neither_connection_filter() {
        let row = RatingRow::new(Decision::missing(), Some(10), "Knee", "", Some(true));
        let sc = FilterSelection::from_axes(Some(ConnectionFilter::ServiceConnected), None);
        let nsc = FilterSelection::from_axes(Some(ConnectionFilter::NotServiceConnected), None);
        assert!(!sc.matches(&row));
        assert!(!nsc.matches(&row));
    }

    #[test]
    fn rejection_codes_are_stable() {
        assert_eq!(
            InvalidFilterSelection::AllCombinedWithOthers.code(),
            "AllCombinedWithOthers"
        );
        assert_eq!(
            InvalidFilterSelection::ConflictingStaticFilters.to_string(),
            "Cannot select both 'Static' and 'Non-Static'."
        );
    }
}
