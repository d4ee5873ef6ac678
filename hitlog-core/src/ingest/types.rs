use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Sentinel stored in [`LogRecord::path`] when the request line has no resource token.
pub const NO_PATH: &str = "-";

/// Sentinel stored in [`LogRecord::referrer`] when the user-agent carries no URL.
pub const NO_REFERRER: &str = "None";

/// Positional fields pulled out of one access log line, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFields {
    pub client_ip: String,
    pub timestamp: NaiveDateTime,
    pub request_line: String,
    pub path: String,
    pub status_code: u16,
    /// Either a decimal byte count or a literal `-`.
    pub response_size: String,
    pub user_agent_string: String,
}

/// One fully enriched access log entry, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub client_ip: String,
    pub timestamp: NaiveDateTime,
    pub request_line: String,
    pub path: String,
    pub status_code: u16,
    pub response_size: u64,
    pub user_agent_string: String,
    pub device: String,
    pub os: String,
    pub browser: String,
    pub browser_version: String,
    pub referrer: String,
    pub country: String,
}
