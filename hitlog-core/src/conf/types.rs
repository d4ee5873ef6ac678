use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_STORE_URI: &str = "./data";

pub const DEFAULT_GEOIP_DB: &str = "./GeoLite2-Country.mmdb";

/// Database used when no remote target is configured.
pub const DEFAULT_LOCAL_DATABASE: &str = "test";

/// Database used when the store target comes from the environment.
pub const DEFAULT_REMOTE_DATABASE: &str = "final";

#[derive(Debug, Clone, Default, Serialize)]
pub struct HitlogConfig {
    pub store: StoreConfig,
    pub enrichment: EnrichmentConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreConfig {
    pub uri: String,
    pub database: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_STORE_URI.to_string(),
            database: DEFAULT_LOCAL_DATABASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnrichmentConfig {
    /// MaxMind country (or city) database in `.mmdb` format.
    #[serde(default = "default_geoip_db")]
    pub geoip_db: PathBuf,

    #[serde(default = "default_ua_engine")]
    pub ua_engine: UaEngineKind,

    /// `regexes.yaml` for the uaparser engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ua_regexes: Option<PathBuf>,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            geoip_db: default_geoip_db(),
            ua_engine: default_ua_engine(),
            ua_regexes: None,
        }
    }
}

fn default_geoip_db() -> PathBuf {
    PathBuf::from(DEFAULT_GEOIP_DB)
}

fn default_ua_engine() -> UaEngineKind {
    UaEngineKind::Woothee
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UaEngineKind {
    UaParser,
    Woothee,
}

//-----------------------------------------------------------------------------
// File representation
//-----------------------------------------------------------------------------

/// `hitlog.hcl` as written on disk. Every field is optional so the
/// environment-derived defaults can fill in the gaps.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigFile {
    #[serde(default)]
    pub store: Option<StoreFileConfig>,

    #[serde(default)]
    pub enrichment: Option<EnrichmentConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct StoreFileConfig {
    pub uri: Option<String>,
    pub database: Option<String>,
}
