//! Core types and CSV ingestion for water-quality monitoring data.
//!
//! This crate provides:
//! - `record`: loosely typed rows (`RawRecord`) decoded from a CSV export
//! - `decode`: header-driven CSV decoding with per-field type inference
//! - `columns`: the column names the pipeline reads
//! - `state` / `store`: the `Idle -> Loading -> {Ready, Failed}` load state
//!   and the stale-response guard around it
//! - `site`: the deduplicated monitoring-site registry used by the map
//! - `fetch` (feature `api`): async retrieval from URLs or local paths

pub mod columns;
pub mod decode;
pub mod error;
#[cfg(feature = "api")]
pub mod fetch;
pub mod record;
pub mod site;
pub mod state;
pub mod store;

pub use columns::Columns;
pub use error::ResourceError;
pub use record::{coerce_number, FieldValue, RawRecord, Rows};
pub use state::LoadState;
pub use store::{LoadTicket, RowStore};
