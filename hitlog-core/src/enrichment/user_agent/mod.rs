mod uaparser_engine;
mod woothee_engine;

use crate::conf::types::{EnrichmentConfig, UaEngineKind};
use crate::enrichment::EnrichmentError;
use crate::enrichment::user_agent::uaparser_engine::UaParserEngine;
use crate::enrichment::user_agent::woothee_engine::WootheeEngine;
use std::fs;

/// Family reported when an engine cannot classify a field.
pub const OTHER: &str = "Other";

/// User-agent string -> device/os/browser. Never fails.
pub trait UserAgentLookup {
    fn parse(&self, ua: &str) -> UserAgentInfo;
}

pub fn build_ua_engine(cfg: &EnrichmentConfig) -> Result<UaEngine, EnrichmentError> {
    match cfg.ua_engine {
        UaEngineKind::UaParser => {
            let path = cfg
                .ua_regexes
                .as_ref()
                .ok_or(EnrichmentError::UserAgentRegexesNotConfigured)?;

            let regexes = fs::read(path).map_err(|e| EnrichmentError::UserAgentRegexes {
                path: path.clone(),
                reason: e.to_string(),
            })?;

            let engine =
                UaParserEngine::new(&regexes).map_err(|e| EnrichmentError::UserAgentRegexes {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
            Ok(UaEngine::UaParser(engine))
        }
        UaEngineKind::Woothee => Ok(UaEngine::Woothee(WootheeEngine::new())),
    }
}

pub enum UaEngine {
    UaParser(UaParserEngine),
    Woothee(WootheeEngine),
}

impl UserAgentLookup for UaEngine {
    fn parse(&self, ua: &str) -> UserAgentInfo {
        match self {
            UaEngine::UaParser(p) => p.parse(ua),
            UaEngine::Woothee(p) => p.parse(ua),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgentInfo {
    pub device: String,
    pub os: String,
    pub browser: String,
    /// Major version token only, empty when unknown.
    pub browser_major: String,
}

impl Default for UserAgentInfo {
    fn default() -> Self {
        Self {
            device: OTHER.to_string(),
            os: OTHER.to_string(),
            browser: OTHER.to_string(),
            browser_major: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Desktop,
    Mobile,
    Tablet,
    Bot,
    Unknown,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Desktop => "Desktop",
            DeviceType::Mobile => "Mobile",
            DeviceType::Tablet => "Tablet",
            DeviceType::Bot => "Spider",
            DeviceType::Unknown => OTHER,
        }
    }
}

/// `"121.0.6167.85"` -> `"121"`
pub(crate) fn major_version(version: &str) -> String {
    version
        .split(['.', '_'])
        .next()
        .filter(|major| !major.is_empty() && major.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or_default()
        .to_string()
}
