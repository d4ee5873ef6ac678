use crate::ingest::LogRecord;
use crate::store::{DocumentStore, Query, StoreError, validate_collection_name};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: BTreeMap<String, Vec<LogRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.collections.keys().cloned().collect())
    }

    fn insert_many(&mut self, collection: &str, records: &[LogRecord]) -> Result<(), StoreError> {
        validate_collection_name(collection)?;
        if records.is_empty() {
            return Ok(());
        }

        self.collections
            .entry(collection.to_string())
            .or_default()
            .extend_from_slice(records);
        Ok(())
    }

    fn find(&self, collection: &str, query: &Query) -> Result<Vec<LogRecord>, StoreError> {
        let Some(records) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(query.apply(records.iter().cloned()))
    }
}
