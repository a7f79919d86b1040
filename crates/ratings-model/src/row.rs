//! Normalized rating rows and their displayed columns.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::decision::Decision;

/// Placeholder rendered for absent values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Rendering of a static indicator that is `true`.
pub const STATIC_YES: &str = "Yes";

/// Rendering of a static indicator that is `false`.
pub const STATIC_NO: &str = "No";

/// One normalized rated-disability entry.
///
/// Fields are private: a row is fixed once the normalizer produces it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RatingRow {
    decision: Decision,
    rating_percent: Option<u32>,
    condition: String,
    description: String,
    is_static: Option<bool>,
}

impl RatingRow {
    pub fn new(
        decision: Decision,
        rating_percent: Option<u32>,
        condition: impl Into<String>,
        description: impl Into<String>,
        is_static: Option<bool>,
    ) -> Self {
        Self {
            decision,
            rating_percent,
            condition: condition.into(),
            description: description.into(),
            is_static,
        }
    }

    pub fn decision(&self) -> &Decision {
        &self.decision
    }

    /// Rating percentage; `None` when the source had no usable value.
    pub fn rating_percent(&self) -> Option<u32> {
        self.rating_percent
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Static indicator; `None` means unknown.
    pub fn is_static(&self) -> Option<bool> {
        self.is_static
    }

    /// Displayed text for one column.
    pub fn cell(&self, column: Column) -> Cow<'_, str> {
        match column {
            Column::Decision => Cow::Borrowed(self.decision.display()),
            Column::Rating => match self.rating_percent {
                Some(value) => Cow::Owned(value.to_string()),
                None => Cow::Borrowed(NOT_AVAILABLE),
            },
            Column::Condition => Cow::Borrowed(&self.condition),
            Column::Description => Cow::Borrowed(&self.description),
            Column::Static => Cow::Borrowed(static_label(self.is_static)),
        }
    }

    /// Displayed text for every column, in export order.
    pub fn cells(&self) -> [String; 5] {
        Column::ALL.map(|column| self.cell(column).into_owned())
    }

    /// Lowercased concatenation of all displayed fields, used by text search.
    pub fn search_text(&self) -> String {
        self.cells().join(" ").to_lowercase()
    }
}

/// Render a static indicator as `Yes`, `No` or `N/A`.
pub fn static_label(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => STATIC_YES,
        Some(false) => STATIC_NO,
        None => NOT_AVAILABLE,
    }
}

/// Displayed columns, in their fixed export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Decision,
    Rating,
    Condition,
    Description,
    Static,
}

impl Column {
    /// All columns in export order.
    pub const ALL: [Column; 5] = [
        Column::Decision,
        Column::Rating,
        Column::Condition,
        Column::Description,
        Column::Static,
    ];

    /// Header label used by every export format.
    pub fn label(&self) -> &'static str {
        match self {
            Column::Decision => "Decision",
            Column::Rating => "Rating%",
            Column::Condition => "Condition",
            Column::Description => "Description",
            Column::Static => "Static",
        }
    }

    /// Zero-based position in the export column order.
    pub fn index(&self) -> usize {
        match self {
            Column::Decision => 0,
            Column::Rating => 1,
            Column::Condition => 2,
            Column::Description => 3,
            Column::Static => 4,
        }
    }

    /// Header labels in export order.
    pub fn headers() -> [&'static str; 5] {
        Column::ALL.map(|column| column.label())
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Column {
    type Err = String;

    /// Parse a column name (case-insensitive, accepts `Rating %` and `rating`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();

        match normalized.as_str() {
            "DECISION" => Ok(Column::Decision),
            "RATING%" | "RATING" | "RATINGPERCENT" => Ok(Column::Rating),
            "CONDITION" => Ok(Column::Condition),
            "DESCRIPTION" => Ok(Column::Description),
            "STATIC" => Ok(Column::Static),
            _ => Err(format!("Unknown column: {s}")),
        }
    }
}

/// Direction for plain column sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::Decision;

    fn sample_row() -> RatingRow {
        RatingRow::new(
            Decision::from_raw("Service Connected"),
            None,
            "Tinnitus",
            "Recurrent ringing",
            Some(true),
        )
    }

    #[test]
    fn cells_render_placeholders() {
        let row = sample_row();
        assert_eq!(
            row.cells(),
            [
                "Service Connected".to_string(),
                "N/A".to_string(),
                "Tinnitus".to_string(),
                "Recurrent ringing".to_string(),
                "Yes".to_string(),
            ]
        );
    }

    #[test]
    fn static_labels() {
        assert_eq!(static_label(Some(true)), "Yes");
        assert_eq!(static_label(Some(false)), "No");
        assert_eq!(static_label(None), "N/A");
    }

    #[test]
    fn search_text_is_lowercase() {
        let text = sample_row().search_text();
        assert!(text.contains("tinnitus"));
        assert!(text.contains("service connected"));
    }

    #[test]
    fn column_parsing_accepts_display_variants() {
        assert_eq!("Rating %".parse::<Column>(), Ok(Column::Rating));
        assert_eq!("rating".parse::<Column>(), Ok(Column::Rating));
        assert_eq!("Static".parse::<Column>(), Ok(Column::Static));
        assert!("Effective Date".parse::<Column>().is_err());
    }

    #[test]
    fn headers_follow_export_order() {
        assert_eq!(
            Column::headers(),
            ["Decision", "Rating%", "Condition", "Description", "Static"]
        );
        for (position, column) in Column::ALL.iter().enumerate() {
            assert_eq!(column.index(), position);
        }
    }
}
