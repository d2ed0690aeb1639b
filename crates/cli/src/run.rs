//! The `run` command: full pipeline over a batch of carrier files.
//!
//! Read every sheet of every input, locate headers, synthesize records,
//! reconcile the batch, then write artifacts. A file that cannot be read is
//! reported and skipped; the batch keeps going.

use std::fs;
use std::path::{Path, PathBuf};

use stowage_extract::SheetExtract;
use stowage_recon::{
    assemble, reconcile, FileError, PipelineError, RunMeta, RunReport, SheetReport,
};

use crate::{load_config, CliError};

pub fn cmd_run(
    files: Vec<PathBuf>,
    out_dir: PathBuf,
    config_path: Option<PathBuf>,
    json: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;
    let locator = config.locator();
    let extractor = config.extractor();

    if out_dir.exists() && !out_dir.is_dir() {
        return Err(CliError::usage(format!(
            "--out-dir '{}' exists and is not a directory",
            out_dir.display()
        )));
    }
    fs::create_dir_all(&out_dir)
        .map_err(|e| CliError::io(format!("Failed to create '{}': {}", out_dir.display(), e)))?;

    let mut batches: Vec<SheetExtract> = Vec::new();
    let mut sheet_reports: Vec<SheetReport> = Vec::new();
    let mut file_errors: Vec<FileError> = Vec::new();

    for file in &files {
        let label = file_label(file);
        let sheets = match stowage_io::xlsx::read_workbook(file) {
            Ok(sheets) => sheets,
            Err(e) => {
                if !quiet {
                    eprintln!("warning: skipping '{}': {}", file.display(), e);
                }
                file_errors.push(FileError {
                    file: file.display().to_string(),
                    error: e,
                });
                continue;
            }
        };

        let mut file_records = 0;
        let mut file_rejects = 0;
        for raw in &sheets {
            // Sheets without a recognizable header are cover pages and
            // notes, not data; they are skipped without comment.
            let Some(table) = locator.locate(raw) else {
                continue;
            };
            let extract = stowage_extract::synthesize(&table, &extractor, &label);
            file_records += extract.counts.records;
            file_rejects += extract.counts.rejects;
            sheet_reports.push(SheetReport {
                file: label.clone(),
                sheet: raw.name.clone(),
                header_row: table.header_row,
                keyword_score: table.score,
                counts: extract.counts,
            });
            batches.push(extract);
        }

        if !quiet {
            eprintln!(
                "{}: {} sheets, {} records, {} rejects",
                label,
                sheets.len(),
                file_records,
                file_rejects
            );
        }
    }

    let outcome = match reconcile(batches) {
        Ok(outcome) => outcome,
        Err(PipelineError::NoData) => {
            return Err(
                CliError::no_data("no extractable shipment data in any input file").with_hint(
                    "check that sheets carry a header row with MB/L NO / CNTR NO style labels",
                ),
            );
        }
        Err(e) => return Err(CliError::io(e.to_string())),
    };

    let assembled = assemble(&outcome.records, &config.loading_list.default_group);

    let mut artifacts: Vec<String> = Vec::new();

    let combined_path = out_dir.join("combined_list.xlsx");
    stowage_io::xlsx::write_combined(assembled.combined, assembled.highlight, &combined_path)
        .map_err(CliError::io)?;
    artifacts.push(combined_path.display().to_string());

    // Rejects artifact only exists when there is something to review
    if !outcome.rejects.is_empty() {
        let rejects_path = out_dir.join("rejects.xlsx");
        stowage_io::xlsx::write_rejects(&outcome.rejects, &rejects_path).map_err(CliError::io)?;
        artifacts.push(rejects_path.display().to_string());
    }

    if !assembled.groups.is_empty() {
        let lists_dir = out_dir.join("loading-lists");
        fs::create_dir_all(&lists_dir).map_err(|e| {
            CliError::io(format!("Failed to create '{}': {}", lists_dir.display(), e))
        })?;
        let delimiter = config.delimiter_byte();
        for group in &assembled.groups {
            let list_path = lists_dir.join(format!("{}.csv", group.name));
            stowage_io::csv::export_loading_list(group, delimiter, &list_path)
                .map_err(CliError::io)?;
            artifacts.push(list_path.display().to_string());
        }
    }

    let report = RunReport {
        meta: RunMeta::now(),
        stats: outcome.stats,
        sheets: sheet_reports,
        file_errors,
        artifacts,
    };

    // Summary to stderr (suppressed by --quiet); JSON report to stdout
    if !quiet {
        eprintln!("final_records: {}", report.stats.final_records);
        eprintln!("duplicates_dropped: {}", report.stats.duplicates_dropped);
        eprintln!("rejects_remaining: {}", report.stats.rejects_remaining);
        eprintln!("suspicious: {}", report.stats.suspicious);
        for path in &report.artifacts {
            eprintln!("wrote: {}", path);
        }
    }
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
        );
    }

    Ok(())
}

/// Provenance label for a file: the final path component, so reports stay
/// readable when inputs arrive with long absolute paths.
fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_label_uses_final_component() {
        assert_eq!(file_label(Path::new("/data/june/bookings.xlsx")), "bookings.xlsx");
        assert_eq!(file_label(Path::new("bookings.xlsx")), "bookings.xlsx");
    }
}
