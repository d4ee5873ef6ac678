//! Record enrichment.
//!
//! Turns the positional fields of a parsed line into a [`LogRecord`] by asking
//! three collaborators:
//!
//! - geolocation: client IP -> country
//! - user-agent: UA string -> device, os, browser, major version
//! - referrer: URL embedded in the UA string -> host/path
//!
//! Collaborators are looked up once per record, with no retry and no
//! validation of what they return.

mod error;
pub mod geoip;
pub mod referrer;
pub mod user_agent;


pub use error::EnrichmentError;

use crate::conf::types::EnrichmentConfig;
use crate::enrichment::geoip::{CountryLookup, MaxMindCountry};
use crate::enrichment::referrer::{ReferrerClassifier, UrlReferrerClassifier, find_embedded_url};
use crate::enrichment::user_agent::{UserAgentLookup, build_ua_engine};
use crate::ingest::{LogRecord, NO_REFERRER, ParseError, RawFields};

/// Literal written by servers when no body size was recorded.
const NO_SIZE: &str = "-";

pub struct Enricher {
    geo: Box<dyn CountryLookup>,
    user_agent: Box<dyn UserAgentLookup>,
    referrer: Box<dyn ReferrerClassifier>,
}

impl Enricher {
    pub fn new(
        geo: Box<dyn CountryLookup>,
        user_agent: Box<dyn UserAgentLookup>,
        referrer: Box<dyn ReferrerClassifier>,
    ) -> Self {
        Self {
            geo,
            user_agent,
            referrer,
        }
    }

    pub fn from_config(cfg: &EnrichmentConfig) -> Result<Self, EnrichmentError> {
        let geo = MaxMindCountry::open(&cfg.geoip_db)?;
        let ua_engine = build_ua_engine(cfg)?;

        tracing::info!(
            geoip_db = %cfg.geoip_db.display(),
            ua_engine = ?cfg.ua_engine,
            "enrichment collaborators loaded"
        );

        Ok(Self::new(
            Box::new(geo),
            Box::new(ua_engine),
            Box::new(UrlReferrerClassifier),
        ))
    }

    pub fn enrich(&self, raw: RawFields) -> Result<LogRecord, ParseError> {
        let response_size = parse_response_size(&raw.response_size)?;

        let country = self.geo.lookup_country(&raw.client_ip);
        let ua = self.user_agent.parse(&raw.user_agent_string);
        let referrer = self.referrer_of(&raw.user_agent_string);

        Ok(LogRecord {
            client_ip: raw.client_ip,
            timestamp: raw.timestamp,
            request_line: raw.request_line,
            path: raw.path,
            status_code: raw.status_code,
            response_size,
            user_agent_string: raw.user_agent_string,
            device: ua.device,
            os: ua.os,
            browser: ua.browser,
            browser_version: ua.browser_major,
            referrer,
            country,
        })
    }

    fn referrer_of(&self, ua: &str) -> String {
        find_embedded_url(ua)
            .and_then(|url| self.referrer.classify(url))
            .map(|r| r.host_and_path)
            .unwrap_or_else(|| NO_REFERRER.to_string())
    }
}

/// `-` means nothing was recorded and counts as zero bytes.
pub fn parse_response_size(raw: &str) -> Result<u64, ParseError> {
    if raw == NO_SIZE {
        return Ok(0);
    }

    raw.parse::<u64>().map_err(|_| ParseError::ResponseSize {
        value: raw.to_string(),
    })
}
