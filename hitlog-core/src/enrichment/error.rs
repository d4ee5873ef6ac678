use std::path::PathBuf;
use thiserror::Error;

/// Collaborator start-up failures. All of these are fatal: records cannot be
/// enriched without the backing data.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("failed to load geolocation database {path}: {reason}")]
    GeoDatabase { path: PathBuf, reason: String },

    #[error("failed to load user-agent regexes {path}: {reason}")]
    UserAgentRegexes { path: PathBuf, reason: String },

    #[error("uaparser engine selected without a regexes file")]
    UserAgentRegexesNotConfigured,
}
