//! Filter selection rejections.

use thiserror::Error;

/// Why a requested filter combination was rejected.
///
/// Rejections are recoverable: the caller re-prompts and submits again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidFilterSelection {
    /// Nothing was selected. Distinct from choosing "All".
    #[error("No filters selected; choose 'All conditions' or at least one filter.")]
    EmptySelection,

    /// A label did not name any known filter.
    #[error("Unknown filter '{label}'.")]
    UnknownFilter { label: String },

    #[error("Cannot select both 'Service Connected' and 'Not Service Connected'.")]
    ConflictingConnectionFilters,

    #[error("Cannot select both 'Static' and 'Non-Static'.")]
    ConflictingStaticFilters,

    #[error("'All conditions' cannot be combined with other filters.")]
    AllCombinedWithOthers,
}

impl InvalidFilterSelection {
    /// Stable machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            InvalidFilterSelection::EmptySelection => "EmptySelection",
            InvalidFilterSelection::UnknownFilter { .. } => "UnknownFilter",
            InvalidFilterSelection::ConflictingConnectionFilters => "ConflictingConnectionFilters",
            InvalidFilterSelection::ConflictingStaticFilters => "ConflictingStaticFilters",
            InvalidFilterSelection::AllCombinedWithOthers => "AllCombinedWithOthers",
        }
    }
}
