//! Shared value types for rated-disability processing.
//!
//! Rows are produced once by the normalizer and never mutated afterwards;
//! every later stage (filtering, ranking, export) reads them by reference.

pub mod decision;
pub mod row;
pub mod token;

pub use decision::{Decision, DecisionKind};
pub use row::{
    Column, NOT_AVAILABLE, RatingRow, STATIC_NO, STATIC_YES, SortDirection, static_label,
};
pub use token::{ConnectionFilter, FilterToken, StaticFilter};
