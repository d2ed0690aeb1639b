use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Container type
// ---------------------------------------------------------------------------

/// Container type as pattern-matched from row text.
///
/// `Suspicious` means two or more distinct types matched in the same row; the
/// ambiguity is carried forward for manual review instead of being resolved
/// by a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContainerType {
    #[serde(rename = "20DC")]
    TwentyDry,
    #[serde(rename = "40DC")]
    FortyDry,
    #[serde(rename = "40HC")]
    FortyHighCube,
    #[serde(rename = "45HC")]
    FortyFiveHighCube,
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "suspicious")]
    Suspicious,
}

impl ContainerType {
    /// TEU contribution: 1 for a 20-foot box, 2 for any 40/45-foot box.
    /// Unknown and ambiguous types carry no TEU so they never feed a
    /// capacity sum.
    pub fn teu(self) -> Option<u8> {
        match self {
            Self::TwentyDry => Some(1),
            Self::FortyDry | Self::FortyHighCube | Self::FortyFiveHighCube => Some(2),
            Self::Unknown | Self::Suspicious => None,
        }
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwentyDry => write!(f, "20DC"),
            Self::FortyDry => write!(f, "40DC"),
            Self::FortyHighCube => write!(f, "40HC"),
            Self::FortyFiveHighCube => write!(f, "45HC"),
            Self::Unknown => write!(f, "Unknown"),
            Self::Suspicious => write!(f, "SUSPICIOUS (MIXED TYPE)"),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Canonical unit: one container travelling under one bill of lading.
///
/// Created by synthesis (one per container found in a qualifying row);
/// reconciliation may normalize its key fields and drop duplicates, but
/// nothing creates records after reconciliation begins.
#[derive(Debug, Clone, Serialize)]
pub struct ShipmentRecord {
    pub bill_of_lading: String,
    pub container_no: String,
    pub container_type: ContainerType,
    pub teu: Option<u8>,
    pub voyage: String,
    pub port_of_load: String,
    pub port_of_discharge: String,
    pub booking_no: String,
    pub source_file: String,
    pub source_sheet: String,
}

/// Why a row landed in the reject set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    MissingBill,
    MissingContainer,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBill => write!(f, "MISSING B/L"),
            Self::MissingContainer => write!(f, "MISSING CONTAINER"),
        }
    }
}

/// A row with partial evidence: a bill of lading without containers, or
/// containers without a bill of lading. Diagnostic only, never canonical.
#[derive(Debug, Clone, Serialize)]
pub struct RejectRecord {
    /// Empty when the reason is `MissingBill`.
    pub bill_of_lading: String,
    /// Empty when the reason is `MissingContainer`.
    pub containers: Vec<String>,
    pub reason: RejectReason,
    /// Non-empty cells of the source row, joined for display.
    pub raw_row: String,
    pub source_file: String,
    pub source_sheet: String,
}

// ---------------------------------------------------------------------------
// Per-sheet tallies
// ---------------------------------------------------------------------------

/// Synthesis tallies for one sheet. `rows_skipped` counts rows that carried
/// neither a bill of lading nor a container and therefore reach no artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SheetCounts {
    pub rows_seen: usize,
    pub records: usize,
    pub rejects: usize,
    pub rows_skipped: usize,
}
