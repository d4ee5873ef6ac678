//! Document storage.
//!
//! Records are kept in named collections inside one database. A collection
//! comes into existence on its first non-empty insert. Two backends exist:
//!
//! - [`MemoryStore`]: process-local, used by tests and dry runs
//! - [`JsonLinesStore`]: one `<collection>.jsonl` file per collection under
//!   `<root>/<database>/`
//!
//! Loader and aggregator only ever see `dyn DocumentStore`, built once per
//! process by [`connect`].

mod error;
mod jsonl;
mod memory;
mod query;


pub use error::StoreError;
pub use jsonl::JsonLinesStore;
pub use memory::MemoryStore;
pub use query::{DateRange, Query, SortOrder};

use crate::conf::types::StoreConfig;
use crate::ingest::LogRecord;
use std::path::PathBuf;

pub trait DocumentStore {
    /// Names of all collections, sorted.
    fn collection_names(&self) -> Result<Vec<String>, StoreError>;

    fn collection_exists(&self, collection: &str) -> Result<bool, StoreError> {
        Ok(self
            .collection_names()?
            .iter()
            .any(|name| name == collection))
    }

    /// Append `records` as one bulk write. An empty slice is a no-op.
    fn insert_many(&mut self, collection: &str, records: &[LogRecord]) -> Result<(), StoreError>;

    fn find(&self, collection: &str, query: &Query) -> Result<Vec<LogRecord>, StoreError>;

    fn count(&self, collection: &str, range: &DateRange) -> Result<usize, StoreError> {
        Ok(self.find(collection, &Query::range(*range))?.len())
    }
}

const MEMORY_SCHEME: &str = "memory://";
const FILE_SCHEME: &str = "file://";

/// Open the store selected by `cfg.uri` for `cfg.database`.
pub fn connect(cfg: &StoreConfig) -> Result<Box<dyn DocumentStore>, StoreError> {
    let uri = cfg.uri.trim();

    if uri == MEMORY_SCHEME || uri == "memory" {
        tracing::info!(database = %cfg.database, "using in-memory store");
        return Ok(Box::new(MemoryStore::new()));
    }

    let root = match uri.strip_prefix(FILE_SCHEME) {
        Some(path) => PathBuf::from(path),
        None if uri.contains("://") || uri.is_empty() => {
            return Err(StoreError::InvalidUri {
                uri: uri.to_string(),
            });
        }
        None => PathBuf::from(uri),
    };

    let store = JsonLinesStore::open(&root, &cfg.database)?;
    tracing::info!(root = %store.root().display(), "using json-lines store");
    Ok(Box::new(store))
}

/// Collection names become file names, so anything that could escape the
/// database directory is refused.
pub(crate) fn validate_collection_name(name: &str) -> Result<(), StoreError> {
    let invalid = name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\', '\0'])
        || name.chars().any(char::is_whitespace);

    if invalid {
        return Err(StoreError::InvalidCollectionName {
            name: name.to_string(),
        });
    }
    Ok(())
}
