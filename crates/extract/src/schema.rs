//! One-time column resolution.
//!
//! Header labels vary per source ("MB/L NO", "MASTER BL", "MBL"), so fields
//! are found by case-insensitive substring on the label. The lookup happens
//! once per table; row processing then reads by plain index.

use crate::grid::HeaderedTable;

/// Canonical field → column index, resolved once per table. A `None` means
/// the table has no such column and the field reads as empty everywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub bill_of_lading: Option<usize>,
    pub voyage: Option<usize>,
    pub port_of_load: Option<usize>,
    pub port_of_discharge: Option<usize>,
    pub booking_no: Option<usize>,
}

impl ColumnMap {
    /// Resolve against the table's labels; the first matching column wins.
    pub fn resolve(table: &HeaderedTable) -> Self {
        let upper: Vec<String> = table.labels.iter().map(|l| l.to_uppercase()).collect();
        let find = |needles: &[&str]| -> Option<usize> {
            upper
                .iter()
                .position(|label| needles.iter().any(|n| label.contains(n)))
        };
        Self {
            bill_of_lading: find(&["MB/L", "MASTER"]),
            voyage: find(&["V/V", "VESSEL"]),
            port_of_load: find(&["POL"]),
            port_of_discharge: find(&["POD"]),
            booking_no: find(&["BOOKING"]),
        }
    }
}
