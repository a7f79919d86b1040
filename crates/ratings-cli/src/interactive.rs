//! Menu-driven session: choose filters, review the ranked view, export.

use std::io;

use ratings_core::{FilterSelection, RankedResult, SessionState, evaluate, validate_labels};
use ratings_model::{Column, RatingRow};
use ratings_output::{ExportFormat, WrittenExport, export_rows};
use tracing::{debug, trace, warn};

use crate::logging::redact_value;
use crate::presenter::{NO_DATA_TO_EXPORT, Presenter};

/// How an interactive session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The user quit before choosing filters.
    Cancelled,
    /// The view was shown and nothing was exported.
    Viewed,
    Exported(WrittenExport),
}

/// Run one session over an already normalized row set.
pub fn run_session<P: Presenter>(
    presenter: &mut P,
    rows: &[RatingRow],
) -> io::Result<SessionOutcome> {
    let Some(selection) = choose_filters(presenter)? else {
        debug!("session cancelled at filter prompt");
        return Ok(SessionOutcome::Cancelled);
    };

    let session = SessionState::new().with_selection(selection);
    let result = evaluate(rows, &session);
    debug!(
        filters = ?selection.tokens(),
        kept = result.len(),
        total = result.source_len(),
        "evaluated selection"
    );
    for row in result.iter() {
        let rating = row.cell(Column::Rating);
        trace!(
            decision = redact_value(row.decision().display()),
            rating = redact_value(&rating),
            condition = redact_value(row.condition()),
            "ranked row"
        );
    }

    presenter.render_table(&result)?;
    offer_export(presenter, &result)
}

/// Prompt until the user submits a valid selection or cancels.
///
/// Each rejection is reported and the user is asked again.
pub fn choose_filters<P: Presenter>(presenter: &mut P) -> io::Result<Option<FilterSelection>> {
    loop {
        let Some(labels) = presenter.prompt_filters()? else {
            return Ok(None);
        };
        match validate_labels(&labels) {
            Ok(selection) => return Ok(Some(selection)),
            Err(rejection) => {
                warn!(reason = rejection.code(), "filter selection rejected");
                presenter.report(&rejection.to_string())?;
            }
        }
    }
}

fn offer_export<P: Presenter>(
    presenter: &mut P,
    result: &RankedResult<'_>,
) -> io::Result<SessionOutcome> {
    if result.is_empty() {
        presenter.report(NO_DATA_TO_EXPORT)?;
        return Ok(SessionOutcome::Viewed);
    }
    loop {
        let Some(choice) = presenter.prompt_export(&ExportFormat::ALL)? else {
            return Ok(SessionOutcome::Viewed);
        };
        match export_rows(result.rows(), choice.format, &choice.path) {
            Ok(written) => {
                presenter.report(&format!(
                    "Exported {} ratings to {} ({} bytes).",
                    result.len(),
                    written.path.display(),
                    written.bytes
                ))?;
                return Ok(SessionOutcome::Exported(written));
            }
            Err(error) if error.is_recoverable() => {
                presenter.report(&format!(
                    "Export failed: {error}. Choose another destination or format."
                ))?;
            }
            Err(error) => {
                presenter.report(&format!("Export failed: {error}"))?;
                return Ok(SessionOutcome::Viewed);
            }
        }
    }
}
