pub mod fixtures;
pub mod tracing;

pub use fixtures::{TestWorkspace, fixture_path, stub_enricher};
pub use tracing::{CapturedEvent, capture_events};
