//! `stowage-extract` — extraction core for shipping-line loading lists.
//!
//! Pure crate: raw text grids in, canonical shipment records out. No file
//! I/O; callers feed [`RawSheet`]s from whatever source they have and get
//! back records, rejects and per-sheet tallies.

pub mod fields;
pub mod grid;
pub mod header;
pub mod model;
pub mod schema;
pub mod synth;

pub use fields::FieldExtractor;
pub use grid::{HeaderedTable, RawSheet};
pub use header::HeaderLocator;
pub use model::{ContainerType, RejectReason, RejectRecord, SheetCounts, ShipmentRecord};
pub use synth::{synthesize, SheetExtract};
