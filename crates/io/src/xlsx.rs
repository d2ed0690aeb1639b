// Excel file import (xlsx, xls, xlsb, ods) and export (xlsx only)
//
// Import: One-way conversion. Every cell is rendered to plain text; the
//         header locator downstream decides what is data and what is noise.
// Export: Combined table and rejects table artifacts. Not a round-trip format.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use rust_xlsxwriter::{ConditionalFormatDuplicate, Format, Workbook as XlsxWorkbook, Worksheet};

use stowage_extract::{RawSheet, RejectRecord, ShipmentRecord};
use stowage_recon::assemble::{COMBINED_COLUMNS, HIGHLIGHT_FILL, HIGHLIGHT_FONT};
use stowage_recon::DuplicateHighlight;

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// Read every worksheet of a spreadsheet file (xlsx, xls, xlsb, ods) into a
/// raw text grid, one [`RawSheet`] per worksheet in workbook order.
///
/// No sheet is skipped here, however empty; deciding which sheets carry
/// shipment data is the header locator's job, not the reader's.
pub fn read_workbook(path: &Path) -> Result<Vec<RawSheet>, String> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open Excel file: {}", e))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err("Excel file contains no sheets".to_string());
    }

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for sheet_name in &sheet_names {
        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| format!("Failed to read sheet '{}': {}", sheet_name, e))?;

        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();
        sheets.push(RawSheet::new(sheet_name.clone(), rows));
    }

    Ok(sheets)
}

/// Render one cell to text. Identifier-bearing columns routinely arrive as
/// numbers, so integral floats are printed without the trailing `.0` that
/// would corrupt booking and serial numbers.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => format!("{}", n),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(e) => format!("#{:?}", e),
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Write the combined table: one row per shipment record under a bold
/// header, with repeated container numbers flagged by a duplicate
/// conditional format over the container column.
pub fn write_combined(
    records: &[ShipmentRecord],
    highlight: Option<DuplicateHighlight>,
    path: &Path,
) -> Result<(), String> {
    let mut workbook = XlsxWorkbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name("COMBINED")
        .map_err(|e| format!("Failed to create sheet 'COMBINED': {}", e))?;

    write_header_row(worksheet, &COMBINED_COLUMNS)?;

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        let volume = record.container_type.to_string();
        let text_cells: [(u16, &str); 9] = [
            (0, record.bill_of_lading.as_str()),
            (1, record.container_no.as_str()),
            (2, volume.as_str()),
            (4, record.voyage.as_str()),
            (5, record.port_of_load.as_str()),
            (6, record.port_of_discharge.as_str()),
            (7, record.booking_no.as_str()),
            (8, record.source_file.as_str()),
            (9, record.source_sheet.as_str()),
        ];
        for (col, value) in text_cells {
            worksheet
                .write_string(row, col, value)
                .map_err(|e| format!("Failed to write cell: {}", e))?;
        }
        // TEU stays numeric; a suspicious or unknown type leaves the cell blank
        if let Some(teu) = record.teu {
            worksheet
                .write_number(row, 3, teu as f64)
                .map_err(|e| format!("Failed to write cell: {}", e))?;
        }
    }

    if let Some(span) = highlight {
        let duplicate_format = Format::new()
            .set_background_color(rust_xlsxwriter::Color::RGB(HIGHLIGHT_FILL))
            .set_font_color(rust_xlsxwriter::Color::RGB(HIGHLIGHT_FONT));
        let rule = ConditionalFormatDuplicate::new().set_format(duplicate_format);
        worksheet
            .add_conditional_format(
                span.first_data_row,
                span.column as u16,
                span.last_data_row,
                span.column as u16,
                &rule,
            )
            .map_err(|e| format!("Failed to apply duplicate highlight: {}", e))?;
    }

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {}", e))?;

    Ok(())
}

/// Write the rejects table. Rows keep the combined-table column layout for
/// the fields that were extractable, then append reason and raw row text so
/// a rejected row can be traced back to its source.
pub fn write_rejects(rejects: &[RejectRecord], path: &Path) -> Result<(), String> {
    let mut workbook = XlsxWorkbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name("REJECTS")
        .map_err(|e| format!("Failed to create sheet 'REJECTS': {}", e))?;

    let headers: Vec<&str> = COMBINED_COLUMNS
        .iter()
        .copied()
        .chain(["REASON", "RAW ROW"])
        .collect();
    write_header_row(worksheet, &headers)?;

    for (i, reject) in rejects.iter().enumerate() {
        let row = (i + 1) as u32;
        let containers = reject.containers.join(" ");
        let reason = reject.reason.to_string();
        let text_cells: [(u16, &str); 6] = [
            (0, reject.bill_of_lading.as_str()),
            (1, containers.as_str()),
            (8, reject.source_file.as_str()),
            (9, reject.source_sheet.as_str()),
            (10, reason.as_str()),
            (11, reject.raw_row.as_str()),
        ];
        for (col, value) in text_cells {
            worksheet
                .write_string(row, col, value)
                .map_err(|e| format!("Failed to write cell: {}", e))?;
        }
    }

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {}", e))?;

    Ok(())
}

fn write_header_row(worksheet: &mut Worksheet, titles: &[&str]) -> Result<(), String> {
    let header_format = Format::new().set_bold();
    for (col, title) in titles.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *title, &header_format)
            .map_err(|e| format!("Failed to write header: {}", e))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
