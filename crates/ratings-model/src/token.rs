//! Categorical filter vocabulary.
//!
//! Tokens are the raw choices a user can tick. Whether a set of tokens forms
//! a usable selection is decided by the validator in `ratings-core`.

use std::fmt;
use std::str::FromStr;

/// One categorical filter choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterToken {
    /// No filtering; must be chosen alone.
    All,
    ServiceConnectedOnly,
    NotServiceConnectedOnly,
    StaticOnly,
    NonStaticOnly,
}

impl FilterToken {
    /// All tokens in menu order.
    pub const ALL: [FilterToken; 5] = [
        FilterToken::All,
        FilterToken::ServiceConnectedOnly,
        FilterToken::NotServiceConnectedOnly,
        FilterToken::StaticOnly,
        FilterToken::NonStaticOnly,
    ];

    /// Human-readable label shown in selection menus.
    pub fn label(&self) -> &'static str {
        match self {
            FilterToken::All => "All conditions (no filtering)",
            FilterToken::ServiceConnectedOnly => "Service Connected only",
            FilterToken::NotServiceConnectedOnly => "Not Service Connected only",
            FilterToken::StaticOnly => "Static only",
            FilterToken::NonStaticOnly => "Non-Static only",
        }
    }

    /// Short command-line name.
    pub fn slug(&self) -> &'static str {
        match self {
            FilterToken::All => "all",
            FilterToken::ServiceConnectedOnly => "service-connected",
            FilterToken::NotServiceConnectedOnly => "not-service-connected",
            FilterToken::StaticOnly => "static",
            FilterToken::NonStaticOnly => "non-static",
        }
    }

    /// Menu number used by the interactive prompt.
    pub fn menu_key(&self) -> u8 {
        match self {
            FilterToken::All => 0,
            FilterToken::ServiceConnectedOnly => 1,
            FilterToken::NotServiceConnectedOnly => 2,
            FilterToken::StaticOnly => 3,
            FilterToken::NonStaticOnly => 4,
        }
    }

    /// Returns true for the two service-connection tokens.
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            FilterToken::ServiceConnectedOnly | FilterToken::NotServiceConnectedOnly
        )
    }

    /// Returns true for the two static-indicator tokens.
    pub fn is_static_axis(&self) -> bool {
        matches!(self, FilterToken::StaticOnly | FilterToken::NonStaticOnly)
    }
}

impl fmt::Display for FilterToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for FilterToken {
    type Err = String;

    /// Parse a menu number, slug or label (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let normalized: String = trimmed
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_uppercase();

        match normalized.as_str() {
            "0" | "ALL" | "ALLCONDITIONS" | "ALLCONDITIONSNOFILTERING" => Ok(FilterToken::All),
            "1" | "SERVICECONNECTED" | "SERVICECONNECTEDONLY" => {
                Ok(FilterToken::ServiceConnectedOnly)
            }
            "2" | "NOTSERVICECONNECTED" | "NOTSERVICECONNECTEDONLY" => {
                Ok(FilterToken::NotServiceConnectedOnly)
            }
            "3" | "STATIC" | "STATICONLY" => Ok(FilterToken::StaticOnly),
            "4" | "NONSTATIC" | "NONSTATICONLY" => Ok(FilterToken::NonStaticOnly),
            _ => Err(format!("Unknown filter: {trimmed}")),
        }
    }
}

/// Service-connection axis of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionFilter {
    ServiceConnected,
    NotServiceConnected,
}

impl ConnectionFilter {
    pub fn token(&self) -> FilterToken {
        match self {
            ConnectionFilter::ServiceConnected => FilterToken::ServiceConnectedOnly,
            ConnectionFilter::NotServiceConnected => FilterToken::NotServiceConnectedOnly,
        }
    }
}

/// Static-indicator axis of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaticFilter {
    Static,
    NonStatic,
}

impl StaticFilter {
    pub fn token(&self) -> FilterToken {
        match self {
            StaticFilter::Static => FilterToken::StaticOnly,
            StaticFilter::NonStatic => FilterToken::NonStaticOnly,
        }
    }

    /// The static indicator value this filter keeps.
    pub fn expected(&self) -> bool {
        matches!(self, StaticFilter::Static)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_menu_keys_slugs_and_labels() {
        for token in FilterToken::ALL {
            assert_eq!(token.menu_key().to_string().parse(), Ok(token));
            assert_eq!(token.slug().parse(), Ok(token));
            assert_eq!(token.label().parse(), Ok(token));
        }
        assert_eq!(
            "Non Static".parse::<FilterToken>(),
            Ok(FilterToken::NonStaticOnly)
        );
    }

    #[test]
    fn rejects_unknown_labels() {
        let err = "Pending only".parse::<FilterToken>().unwrap_err();
        assert_eq!(err, "Unknown filter: Pending only");
        assert!("5".parse::<FilterToken>().is_err());
    }

    #[test]
    fn axes_are_disjoint() {
        for token in FilterToken::ALL {
            assert!(!(token.is_connection() && token.is_static_axis()));
        }
        assert!(!FilterToken::All.is_connection());
        assert!(!FilterToken::All.is_static_axis());
    }
}
