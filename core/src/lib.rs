//! opsync-core: call-center operator performance sync.
//!
//! Normalizes heterogeneous metric inputs — free-text `key:valor` entries
//! and a fixed-layout performance spreadsheet — into one canonical record
//! schema and merges them, non-destructively, into a per-operator
//! per-month JSON store keyed by email.
//!
//! DATA FLOW (left to right, synchronous, one invocation at a time):
//!
//!   field_parser ─┐
//!                 ├─> PartialRecord ─> merge ─> store (JSON file)
//!   sheet_decoder ┘         ^
//!                           │
//!                      directory (name → email)

pub mod directory;
pub mod error;
pub mod field_parser;
pub mod ingest;
pub mod merge;
pub mod record;
pub mod sheet_decoder;
pub mod sheets;
pub mod store;
pub mod types;

pub use directory::Directory;
pub use error::{SyncError, SyncResult, UpstreamKind};
pub use ingest::{process_entries, process_entry, sync_operator, BatchOutcome};
pub use record::{PartialRecord, PeriodData};
pub use store::MetricsStore;
pub use types::{Period, Score};
