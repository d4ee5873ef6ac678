use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("collection '{collection}' was not found in the database")]
    CollectionNotFound { collection: String },

    #[error("collection '{collection}' has no records in the requested range")]
    EmptyCollection { collection: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}
