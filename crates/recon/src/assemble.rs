//! Output assembly.
//!
//! Splits a reconciled batch into the three artifact layouts: the combined
//! table (records as-is, plus a duplicate-container highlight rule for the
//! exporter), per-sheet loading-list groups, and the rejects table, which is
//! just the surviving rejects and needs no layout work here.

use std::collections::BTreeMap;

use serde::Serialize;

use stowage_extract::ShipmentRecord;

/// Column headers of the combined table, in export order.
pub const COMBINED_COLUMNS: [&str; 10] = [
    "MB/L NO",
    "CNTR NO",
    "VOL",
    "TEU",
    "V/V",
    "POL",
    "POD",
    "BOOKING NO",
    "SOURCE FILE",
    "SOURCE SHEET",
];

/// Zero-based index of the container column in [`COMBINED_COLUMNS`].
pub const CONTAINER_COLUMN: usize = 1;

/// Fill color for duplicated container cells (light red).
pub const HIGHLIGHT_FILL: u32 = 0xFFC7CE;
/// Font color for duplicated container cells (dark red).
pub const HIGHLIGHT_FONT: u32 = 0x9C0006;

// ---------------------------------------------------------------------------
// Output shapes
// ---------------------------------------------------------------------------

/// Presentational rule for the exporter: flag any value occurring more than
/// once in `column`, across the inclusive data-row span (header excluded).
/// Row indices are zero-based worksheet rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DuplicateHighlight {
    pub column: usize,
    pub first_data_row: u32,
    pub last_data_row: u32,
}

/// One loading-list line: the two-column projection of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadingLine {
    pub container_no: String,
    pub container_type: String,
}

/// A named group of loading lines, one per source sheet.
#[derive(Debug, Clone, Serialize)]
pub struct LoadingGroup {
    pub name: String,
    pub lines: Vec<LoadingLine>,
}

/// Assembled outputs for one reconciled batch.
#[derive(Debug)]
pub struct AssembledOutput<'a> {
    /// The combined table: final records in reconciler order.
    pub combined: &'a [ShipmentRecord],
    pub groups: Vec<LoadingGroup>,
    pub highlight: Option<DuplicateHighlight>,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Partition final records into export layouts.
///
/// Groups are keyed by sanitized sheet name and emitted in name order;
/// lines within a group keep reconciler order. Records without a container
/// number are filtered from loading lists.
pub fn assemble<'a>(records: &'a [ShipmentRecord], default_group: &str) -> AssembledOutput<'a> {
    let mut grouped: BTreeMap<String, Vec<LoadingLine>> = BTreeMap::new();
    for record in records {
        if record.container_no.is_empty() {
            continue;
        }
        grouped
            .entry(group_name(&record.source_sheet, default_group))
            .or_default()
            .push(LoadingLine {
                container_no: record.container_no.clone(),
                container_type: record.container_type.to_string(),
            });
    }
    let groups = grouped
        .into_iter()
        .map(|(name, lines)| LoadingGroup { name, lines })
        .collect();

    let highlight = if records.is_empty() {
        None
    } else {
        Some(DuplicateHighlight {
            column: CONTAINER_COLUMN,
            first_data_row: 1,
            last_data_row: records.len() as u32,
        })
    };

    AssembledOutput {
        combined: records,
        groups,
        highlight,
    }
}

/// Sanitized group name, safe to use as a file stem: path separators become
/// underscores; a blank sheet name falls back to the default group.
pub fn group_name(sheet: &str, default_group: &str) -> String {
    let name: String = sheet
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    if name.is_empty() {
        default_group.to_string()
    } else {
        name
    }
}
