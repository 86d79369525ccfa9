//! CLI output formatting for both commands.
//!
//! # Output Format
//!
//! ## Ingest
//!
//! ```text
//! Wrote manifest: site/photos/manifest.json
//! Added sunset.jpg -> 004.jpg / 004-thumb.jpg
//! Added harbor.png -> 005.jpg / 005-thumb.jpg
//!
//! Some files were skipped:
//!   - Skip broken.jpg: Failed to decode ...
//! ```
//!
//! ## Renumber
//!
//! ```text
//! 002.jpg  ->  001.jpg
//! 002-thumb.jpg  ->  001-thumb.jpg
//! 005.jpg  ->  002.jpg
//! 005-thumb.jpg  ->  002-thumb.jpg
//!
//! Renamed files.
//! Updated manifest: site/photos/manifest.json
//! ```
//!
//! A dry run ends with `DRY RUN: no files renamed.` followed by the manifest
//! JSON that would have been written. When a target name is held by a file
//! outside any pair, the plan is still printed, followed by the conflict, and
//! nothing is renamed:
//!
//! ```text
//! 002.jpg  ->  001.jpg
//! 002-thumb.jpg  ->  001-thumb.jpg
//!
//! Refusing to rename: photos/001.jpg is not part of any pair and would be overwritten.
//! Nothing was renamed.
//! ```
//!
//! # Architecture
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::ingest::IngestReport;
use crate::manifest::ManifestError;
use crate::naming;
use crate::renumber::{RenameStep, RenumberReport, TEMP_MARKER};
use std::path::Path;

/// Printed when the photos directory holds no complete pair.
pub const NO_PAIRS_MESSAGE: &str = "No (full, thumb) pairs found like NNN.jpg + NNN-thumb.jpg";

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Ingest
// ============================================================================

/// Format the result of an ingest run.
pub fn format_ingest_report(report: &IngestReport) -> Vec<String> {
    let mut lines = vec![format!("Wrote manifest: {}", report.manifest_path.display())];

    for added in &report.added {
        lines.push(format!(
            "Added {} -> {} / {}",
            file_name(&added.source),
            naming::full_filename(&added.id),
            naming::thumb_filename(&added.id)
        ));
    }

    if !report.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Some files were skipped:".to_string());
        for skipped in &report.skipped {
            lines.push(format!("  - {}", skipped.reason));
        }
    }

    lines
}

/// Print ingest output to stdout.
pub fn print_ingest_report(report: &IngestReport) {
    for line in format_ingest_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Renumber
// ============================================================================

/// One `old  ->  new` line per moved file, full before thumbnail.
pub fn format_rename_plan(plan: &[RenameStep]) -> Vec<String> {
    plan.iter()
        .flat_map(|step| {
            [
                format!("{}  ->  {}", file_name(&step.from_full), file_name(&step.to_full)),
                format!("{}  ->  {}", file_name(&step.from_thumb), file_name(&step.to_thumb)),
            ]
        })
        .collect()
}

/// Format the result of a renumber run.
///
/// A dry run includes the full JSON of the manifest that would be written,
/// which is why this can fail.
pub fn format_renumber_report(report: &RenumberReport) -> Result<Vec<String>, ManifestError> {
    let mut lines = Vec::new();
    if let Some(journal) = &report.stale_journal {
        lines.push(format!(
            "Warning: {} was left by an interrupted run; check for *{}* files.",
            journal.display(),
            TEMP_MARKER
        ));
    }

    if !report.has_pairs() {
        lines.push(NO_PAIRS_MESSAGE.to_string());
        return Ok(lines);
    }

    lines.extend(format_rename_plan(&report.plan));
    lines.push(String::new());

    if let Some(conflict) = &report.conflict {
        lines.push(format!(
            "Refusing to rename: {} is not part of any pair and would be overwritten.",
            conflict.display()
        ));
        lines.push("Nothing was renamed.".to_string());
    } else if report.dry_run {
        lines.push("DRY RUN: no files renamed.".to_string());
        lines.push(String::new());
        lines.push(format!(
            "DRY RUN: would write manifest to {}:",
            report.manifest_path.display()
        ));
        lines.push(report.manifest.to_json_pretty()?);
    } else {
        lines.push("Renamed files.".to_string());
        if let Some(backup) = &report.backup {
            lines.push(format!("Backed up previous manifest: {}", backup.display()));
        }
        lines.push(format!("Updated manifest: {}", report.manifest_path.display()));
    }

    Ok(lines)
}

/// Print renumber output to stdout.
pub fn print_renumber_report(report: &RenumberReport) -> Result<(), ManifestError> {
    for line in format_renumber_report(report)? {
        println!("{}", line);
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
