//! Library components for the `ratings` binary.

pub mod interactive;
pub mod logging;
pub mod presenter;
