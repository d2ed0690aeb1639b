//! Record synthesis: one source row becomes zero, one or many records.

use crate::fields::FieldExtractor;
use crate::grid::HeaderedTable;
use crate::model::{ContainerType, RejectReason, RejectRecord, SheetCounts, ShipmentRecord};
use crate::schema::ColumnMap;

/// Everything synthesized from one sheet.
#[derive(Debug)]
pub struct SheetExtract {
    pub records: Vec<ShipmentRecord>,
    pub rejects: Vec<RejectRecord>,
    pub counts: SheetCounts,
}

/// Synthesize canonical records from a headered table.
///
/// A row that yields both a bill of lading and at least one container emits
/// one record per container, all sharing the row's type, voyage, ports and
/// booking number. A row with only one of the two becomes a reject. A row
/// with neither is counted in `rows_skipped` and produces nothing.
pub fn synthesize(
    table: &HeaderedTable,
    extractor: &FieldExtractor,
    source_file: &str,
) -> SheetExtract {
    let columns = ColumnMap::resolve(table);
    let mut records = Vec::new();
    let mut rejects = Vec::new();
    let mut counts = SheetCounts::default();

    let cell = |row: &[String], idx: Option<usize>| -> String {
        idx.and_then(|i| row.get(i))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    };

    for row in &table.rows {
        counts.rows_seen += 1;

        let containers = extractor.containers(row);
        let bill = extractor.bill_of_lading(row, columns.bill_of_lading);
        let voyage = extractor.voyage(row, columns.voyage);

        match (bill, containers.is_empty()) {
            (Some(bill), false) => {
                let container_type = extractor
                    .container_type(row)
                    .unwrap_or(ContainerType::Unknown);
                for container_no in containers {
                    records.push(ShipmentRecord {
                        bill_of_lading: bill.clone(),
                        container_no,
                        container_type,
                        teu: container_type.teu(),
                        voyage: voyage.clone(),
                        port_of_load: cell(row, columns.port_of_load),
                        port_of_discharge: cell(row, columns.port_of_discharge),
                        booking_no: cell(row, columns.booking_no),
                        source_file: source_file.to_string(),
                        source_sheet: table.sheet_name.clone(),
                    });
                    counts.records += 1;
                }
            }
            (Some(bill), true) => {
                rejects.push(RejectRecord {
                    bill_of_lading: bill,
                    containers: Vec::new(),
                    reason: RejectReason::MissingContainer,
                    raw_row: join_raw(row),
                    source_file: source_file.to_string(),
                    source_sheet: table.sheet_name.clone(),
                });
                counts.rejects += 1;
            }
            (None, false) => {
                rejects.push(RejectRecord {
                    bill_of_lading: String::new(),
                    containers,
                    reason: RejectReason::MissingBill,
                    raw_row: join_raw(row),
                    source_file: source_file.to_string(),
                    source_sheet: table.sheet_name.clone(),
                });
                counts.rejects += 1;
            }
            (None, true) => counts.rows_skipped += 1,
        }
    }

    SheetExtract { records, rejects, counts }
}

fn join_raw(row: &[String]) -> String {
    row.iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}
