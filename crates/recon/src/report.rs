use serde::Serialize;

use stowage_extract::SheetCounts;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// The four headline numbers of a reconciled batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    pub final_records: usize,
    pub duplicates_dropped: usize,
    pub rejects_remaining: usize,
    pub suspicious: usize,
}

// ---------------------------------------------------------------------------
// Run report
// ---------------------------------------------------------------------------

/// One located sheet's contribution to the run.
#[derive(Debug, Clone, Serialize)]
pub struct SheetReport {
    pub file: String,
    pub sheet: String,
    /// Zero-based row index the header was found at.
    pub header_row: usize,
    pub keyword_score: usize,
    pub counts: SheetCounts,
}

/// A file that failed to parse. The batch continued without it.
#[derive(Debug, Clone, Serialize)]
pub struct FileError {
    pub file: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub engine_version: String,
    pub run_at: String,
}

impl RunMeta {
    pub fn now() -> Self {
        Self {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Everything a caller learns from one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub meta: RunMeta,
    pub stats: BatchStats,
    pub sheets: Vec<SheetReport>,
    pub file_errors: Vec<FileError>,
    /// Paths of the artifacts written, in write order.
    pub artifacts: Vec<String>,
}
