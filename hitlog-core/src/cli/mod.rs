//! Command implementations behind the `hitlog` binary.
//!
//! Each command builds its collaborators once from the resolved
//! configuration, runs, and prints to stdout. Logs go to stderr.

pub mod config;
pub mod load;
pub mod query;


use chrono::{NaiveDate, NaiveDateTime};

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// `YYYY-MM-DD` (midnight) or `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_cli_date(s: &str) -> Result<NaiveDateTime, String> {
    let s = s.trim();

    if let Ok(ts) = NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT) {
        return Ok(ts);
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS, got '{s}'"))
}
