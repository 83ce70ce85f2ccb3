//! Subcommand bodies
//!
//! Each command writes its report to the given writer so tests can capture it.

use anyhow::Result;
use lotsplit_allocation::LotCostPreview;
use lotsplit_core::AreaUnit;
use lotsplit_session::{JsonCommitter, SessionError, SubdivisionSession};
use lotsplit_validation::ValidationReport;
use std::io::Write;

/// Print the per-lot allocation and cost base table
///
/// # Errors
/// Write failures.
pub fn preview(session: &SubdivisionSession, json: bool, out: &mut impl Write) -> Result<()> {
    let preview = session.preview();
    if json {
        serde_json::to_writer_pretty(&mut *out, &preview)?;
        writeln!(out)?;
        return Ok(());
    }

    let unit = session.config().display_unit;
    writeln!(
        out,
        "{:<20} {:>16} {:>10}  {:>14}",
        "Lot", "Size", "Share", "Cost base"
    )?;
    for (lot, row) in session.lots().iter().zip(&preview) {
        let lock = if lot.is_percentage_locked() { " (locked)" } else { "" };
        let main = if row.is_main_lot { " *" } else { "" };
        writeln!(
            out,
            "{:<20} {:>16} {:>9.2}%  {:>14.2}{main}{lock}",
            lot.name,
            unit.format(lot.lot_size),
            row.allocation_percentage,
            row.total(),
        )?;
    }
    writeln!(
        out,
        "{:<20} {:>16} {:>9.2}%  {:>14.2}",
        "Total",
        session.total_size_display(),
        session.lots().total_percentage(),
        preview.iter().map(LotCostPreview::total).sum::<f64>(),
    )?;
    Ok(())
}

/// Print validation findings; returns whether submission may proceed
///
/// # Errors
/// Write failures.
pub fn validate(session: &SubdivisionSession, out: &mut impl Write) -> Result<bool> {
    let report = session.validate();
    write_report(&report, out)?;
    if report.is_ok() {
        writeln!(out, "OK: ready to submit")?;
    }
    Ok(report.is_ok())
}

/// Dry-run submission: print the commit request JSON
///
/// Returns `false` without printing a request when validation blocks; the
/// full validation report is printed instead. Advisories are logged by the
/// session and do not stop the commit.
///
/// # Errors
/// Write or encode failures.
pub fn submit(session: &mut SubdivisionSession, out: &mut impl Write) -> Result<bool> {
    let result = session.submit(&mut JsonCommitter::new(&mut *out));
    match result {
        Ok(_) => Ok(true),
        Err(SessionError::Blocked(_)) => {
            write_report(&session.validate(), out)?;
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}

/// Convert an area between units, formatted in the target unit
#[must_use]
pub fn convert(value: f64, from: AreaUnit, to: AreaUnit) -> String {
    to.format(from.to_canonical(value))
}

fn write_report(report: &ValidationReport, out: &mut impl Write) -> Result<()> {
    for err in &report.blocking {
        writeln!(out, "ERROR {}: {err}", err.title())?;
    }
    for advisory in &report.advisories {
        writeln!(out, "NOTE {}: {}", advisory.title(), advisory.message())?;
    }
    Ok(())
}
