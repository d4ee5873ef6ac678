//! Access log ingestion.
//!
//! The overall data processing architecture is:
//!
//! log file
//! parse_line
//! RawFields
//! Enricher::enrich
//! LogRecord
//! BatchLoader buffer (flushed every BATCH_SIZE records)
//! DocumentStore::insert_many
//!

mod error;
mod loader;
mod parse;
mod report;
mod types;

#[cfg(test)]
mod tests;

pub use error::{LoadError, ParseError};
pub use loader::{BATCH_SIZE, BatchLoader, MAX_SKIPPED_SAMPLES};
pub use parse::{parse_line, parse_timestamp, request_path};
pub use report::{LoadReport, SkippedLine};
pub use types::{LogRecord, NO_PATH, NO_REFERRER, RawFields};
