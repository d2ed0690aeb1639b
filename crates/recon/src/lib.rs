//! `stowage-recon` — batch reconciliation for extracted shipment records.
//!
//! Pure engine crate: receives per-sheet extracts, returns the deduplicated
//! record set, pruned rejects, stats and the assembled export layouts. No
//! CLI or IO dependencies.

pub mod assemble;
pub mod config;
pub mod engine;
pub mod error;
pub mod report;

pub use assemble::{assemble, AssembledOutput, DuplicateHighlight, LoadingGroup, LoadingLine};
pub use config::PipelineConfig;
pub use engine::{normalize_bill, reconcile, BatchOutcome};
pub use error::PipelineError;
pub use report::{BatchStats, FileError, RunMeta, RunReport, SheetReport};
