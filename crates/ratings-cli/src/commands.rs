use std::io::{self, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use tracing::{debug, info, info_span, warn};

use ratings_cli::interactive::{SessionOutcome, run_session};
use ratings_cli::logging::redact_value;
use ratings_cli::presenter::{NO_DATA_TO_EXPORT, Presenter, TerminalPresenter};
use ratings_core::{OrderingMode, SessionState, evaluate, validate_labels};
use ratings_ingest::{NormalizedBatch, load_ratings_file};
use ratings_model::SortDirection;
use ratings_output::{ExportFormat, WrittenExport, export_rows};

use crate::cli::{InteractiveArgs, ViewArgs};

pub fn run_formats() -> Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Format", "Name", "Extension", "Default file"]);
    for format in ExportFormat::ALL {
        table.add_row(vec![
            format.menu_key().to_string(),
            format.label().to_string(),
            format.slug().to_string(),
            format!(".{}", format.extension()),
            format.default_file_name().to_string(),
        ]);
    }
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    println!("{table}");
    Ok(())
}

pub fn run_view(args: &ViewArgs, styled: bool) -> Result<Option<WrittenExport>> {
    let span = info_span!("view", file = %args.file.display());
    let _guard = span.enter();

    let batch = load(&args.file)?;
    let selection = validate_labels(&args.filters).map_err(|rejection| anyhow!("{rejection}"))?;
    let ordering = match args.sort_by {
        Some(column) => OrderingMode::ColumnSort {
            column,
            direction: if args.ascending {
                SortDirection::Ascending
            } else {
                SortDirection::Descending
            },
        },
        None => OrderingMode::DefaultRanked,
    };
    let mut session = SessionState::new()
        .with_selection(selection)
        .with_ordering(ordering);
    if let Some(query) = &args.search {
        session = session.with_query(query.as_str());
    }

    let result = evaluate(&batch.rows, &session);
    debug!(
        filters = ?selection.tokens(),
        query = session.normalized_query().as_deref().map(redact_value),
        kept = result.len(),
        "evaluated view"
    );

    let mut presenter =
        TerminalPresenter::new(io::stdin().lock(), io::stdout().lock()).with_styling(styled);
    presenter.render_table(&result)?;

    let Some(path) = &args.export else {
        return Ok(None);
    };
    let format = export_format(args.format, path)?;
    if result.is_empty() {
        bail!("{NO_DATA_TO_EXPORT}");
    }
    let written = export_rows(result.rows(), format, path)
        .with_context(|| format!("export to {}", path.display()))?;
    presenter.report(&format!(
        "Exported {} ratings to {} ({} bytes).",
        result.len(),
        written.path.display(),
        written.bytes
    ))?;
    Ok(Some(written))
}

pub fn run_interactive(args: &InteractiveArgs, styled: bool) -> Result<SessionOutcome> {
    let span = info_span!("interactive", file = %args.file.display());
    let _guard = span.enter();

    let batch = load(&args.file)?;
    let mut presenter =
        TerminalPresenter::new(io::stdin().lock(), io::stdout().lock()).with_styling(styled);
    let outcome = run_session(&mut presenter, &batch.rows).context("interactive session")?;
    info!(outcome = ?outcome, "session finished");
    Ok(outcome)
}

/// Whether tables written to stdout should carry ANSI styling.
pub fn stdout_styled(color: clap::ColorChoice) -> bool {
    match color {
        clap::ColorChoice::Always => true,
        clap::ColorChoice::Never => false,
        clap::ColorChoice::Auto => io::stdout().is_terminal(),
    }
}

fn load(path: &Path) -> Result<NormalizedBatch> {
    let batch = load_ratings_file(path).with_context(|| format!("load {}", path.display()))?;
    for defect in &batch.defects {
        warn!(
            record = defect.record,
            field = defect.field,
            reason = redact_value(&defect.reason),
            "record field unreadable"
        );
    }
    Ok(batch)
}

fn export_format(explicit: Option<ExportFormat>, path: &Path) -> Result<ExportFormat> {
    explicit
        .or_else(|| ExportFormat::from_path(path))
        .ok_or_else(|| {
            anyhow!(
                "cannot infer export format from {}; pass --format",
                path.display()
            )
        })
}
