//! The `inspect` command: header discovery report, no extraction.
//!
//! Dry-run aid for new carrier layouts: shows which sheets the locator
//! would accept, where it put the header, and what the labels became.

use std::path::PathBuf;

use serde_json::json;

use crate::{load_config, CliError};

pub fn cmd_inspect(
    file: PathBuf,
    config_path: Option<PathBuf>,
    json_output: bool,
) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;
    let locator = config.locator();

    let sheets = stowage_io::xlsx::read_workbook(&file).map_err(CliError::io)?;
    let located: Vec<_> = sheets.iter().map(|raw| (raw, locator.locate(raw))).collect();

    if json_output {
        let entries: Vec<serde_json::Value> = located
            .iter()
            .map(|(raw, table)| match table {
                Some(table) => json!({
                    "sheet": raw.name,
                    "header_found": true,
                    "header_row": table.header_row,
                    "keyword_score": table.score,
                    "labels": table.labels,
                    "data_rows": table.rows.len(),
                }),
                None => json!({
                    "sheet": raw.name,
                    "header_found": false,
                }),
            })
            .collect();
        let report = json!({
            "file": file.display().to_string(),
            "sheets": entries,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    println!("{}: {} sheets", file.display(), sheets.len());
    for (raw, table) in &located {
        match table {
            Some(table) => {
                // Row number is 1-based here to match what the sheet shows
                println!(
                    "  {}: header at row {} (score {}), {} data rows",
                    raw.name,
                    table.header_row + 1,
                    table.score,
                    table.rows.len()
                );
                println!("    labels: {}", table.labels.join(", "));
            }
            None => println!("  {}: no header detected", raw.name),
        }
    }

    Ok(())
}
