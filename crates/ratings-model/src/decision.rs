//! Rating decision outcome.

use std::fmt;

use crate::row::NOT_AVAILABLE;

/// Canonical decision categories used for filtering and ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecisionKind {
    ServiceConnected,
    NotServiceConnected,
    Unknown,
}

impl DecisionKind {
    /// Returns the canonical label as it appears in source documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionKind::ServiceConnected => "Service Connected",
            DecisionKind::NotServiceConnected => "Not Service Connected",
            DecisionKind::Unknown => "Unknown",
        }
    }

    /// Classify a raw decision string.
    ///
    /// Only the exact canonical labels match. Any other spelling, including
    /// a different case or surrounding whitespace, is `Unknown`.
    pub fn classify(raw: &str) -> Self {
        match raw {
            "Service Connected" => DecisionKind::ServiceConnected,
            "Not Service Connected" => DecisionKind::NotServiceConnected,
            _ => DecisionKind::Unknown,
        }
    }
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A decision value: the canonical category plus the raw source text.
///
/// The raw text is kept verbatim for display; comparisons use [`DecisionKind`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decision {
    kind: DecisionKind,
    raw: Option<String>,
}

impl Decision {
    /// Build a decision from raw source text.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self {
            kind: DecisionKind::classify(&raw),
            raw: Some(raw),
        }
    }

    /// A decision that was absent from the source record.
    pub fn missing() -> Self {
        Self {
            kind: DecisionKind::Unknown,
            raw: None,
        }
    }

    pub fn kind(&self) -> DecisionKind {
        self.kind
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Text shown in tables and exports: the raw value, or `N/A` when absent.
    pub fn display(&self) -> &str {
        self.raw.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn is_service_connected(&self) -> bool {
        self.kind == DecisionKind::ServiceConnected
    }

    pub fn is_not_service_connected(&self) -> bool {
        self.kind == DecisionKind::NotServiceConnected
    }
}

impl From<DecisionKind> for Decision {
    fn from(kind: DecisionKind) -> Self {
        match kind {
            DecisionKind::Unknown => Decision::missing(),
            known => Decision::from_raw(known.as_str()),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
