//! Aggregate statistics over persisted records.
//!
//! Thin group-by / sum / median layer on top of [`DocumentStore`](crate::store::DocumentStore).
//! Results are typed; each result type converts itself into the
//! `{"data": [...]}` transport shape with epoch-second timestamps.

mod aggregator;
mod error;
mod field;
mod stats;
pub mod types;

#[cfg(test)]
mod tests;

pub use aggregator::{Aggregator, DEFAULT_PAGE_SIZE};
pub use error::AnalyzeError;
pub use field::{Field, UnknownField};
pub use stats::median_of;
pub use types::{
    DailyBandwidth, DailyStatusCount, DayBandwidth, GroupCounts, Medians, Page, RecordSpan,
    StatsReport,
};
