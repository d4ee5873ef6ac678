use crate::conf::error::ConfigError;
use crate::conf::types::{
    ConfigFile, DEFAULT_LOCAL_DATABASE, DEFAULT_REMOTE_DATABASE, DEFAULT_STORE_URI, HitlogConfig,
    StoreConfig, UaEngineKind,
};
use std::fs;
use std::path::Path;

/// Selects a remote store target; its presence also switches the default database.
pub const STORE_URI_ENV: &str = "HITLOG_STORE_URI";

pub fn load_config(path: Option<&Path>) -> Result<HitlogConfig, ConfigError> {
    let env_uri = std::env::var(STORE_URI_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty());

    load_config_with_env(path, env_uri)
}

/// Same as [`load_config`] with the environment lookup already done.
pub fn load_config_with_env(
    path: Option<&Path>,
    env_uri: Option<String>,
) -> Result<HitlogConfig, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let file = match path {
        Some(path) => {
            let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
            hcl::from_str::<ConfigFile>(&s).map_err(|e| ConfigError::parse(path, e))?
        }
        None => ConfigFile::default(),
    };

    //--------------------------------------------------------------------------
    // Environment-derived defaults, overridden by explicit file values
    //--------------------------------------------------------------------------
    let mut store = match env_uri {
        Some(uri) => StoreConfig {
            uri,
            database: DEFAULT_REMOTE_DATABASE.to_string(),
        },
        None => StoreConfig {
            uri: DEFAULT_STORE_URI.to_string(),
            database: DEFAULT_LOCAL_DATABASE.to_string(),
        },
    };

    if let Some(file_store) = file.store {
        if let Some(uri) = file_store.uri {
            store.uri = uri;
        }
        if let Some(database) = file_store.database {
            store.database = database;
        }
    }

    let cfg = HitlogConfig {
        store,
        enrichment: file.enrichment.unwrap_or_default(),
    };

    validate(&cfg)?;
    Ok(cfg)
}

fn validate(cfg: &HitlogConfig) -> Result<(), ConfigError> {
    if cfg.store.uri.trim().is_empty() {
        return Err(ConfigError::EmptyStoreUri);
    }

    let db = &cfg.store.database;
    if db.is_empty() || db.starts_with('.') || db.contains(['/', '\\']) {
        return Err(ConfigError::InvalidDatabase {
            database: db.clone(),
        });
    }

    if cfg.enrichment.ua_engine == UaEngineKind::UaParser && cfg.enrichment.ua_regexes.is_none() {
        return Err(ConfigError::MissingUaRegexes);
    }

    Ok(())
}
