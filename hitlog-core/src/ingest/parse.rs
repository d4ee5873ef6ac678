use crate::ingest::error::ParseError;
use crate::ingest::types::{NO_PATH, RawFields};
use chrono::{DateTime, NaiveDateTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

/// `<ip> - <ident> [<timestamp>] "<request>" <status> <size|-> ["-"] <extra> "<user agent>"`
///
/// The user agent is always the last quoted field on the line, so anything
/// between the size and that field (a `"-"`, a real referer) is skipped.
/// Inside it a quote is written escaped as `\"`.
static ACCESS_LOG_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^([\da-zA-Z:.\-]+) - [^ ]+ \[(.*?)\] "(.*?)" (\d+) (\d+|-) (?:"-")?(.*?)\s*"((?:[^"\\]|\\.)*)"\s*$"#,
    )
    .expect("access log grammar is a valid regex")
});

const TIMESTAMP_WITH_ZONE: &[&str] = &["%d/%b/%Y %H:%M:%S %z", "%d/%b/%Y %H:%M:%S%.f %z"];

const TIMESTAMP_NAIVE: &[&str] = &["%d/%b/%Y %H:%M:%S", "%d/%b/%Y %H:%M:%S%.f"];

/// ISO forms keep their colons, so they are tried against the raw value.
const TIMESTAMP_ISO: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Match one raw line against the fixed access log grammar.
pub fn parse_line(line: &str) -> Result<RawFields, ParseError> {
    let caps = ACCESS_LOG_LINE
        .captures(line)
        .ok_or(ParseError::Malformed)?;

    let timestamp = parse_timestamp(&caps[2])?;

    let request_line = caps[3].to_string();
    let path = request_path(&request_line);

    let status_code = caps[4]
        .parse::<u16>()
        .ok()
        .filter(|s| *s > 0)
        .ok_or_else(|| ParseError::Status {
            value: caps[4].to_string(),
        })?;

    Ok(RawFields {
        client_ip: caps[1].to_string(),
        timestamp,
        request_line,
        path,
        status_code,
        response_size: caps[5].to_string(),
        user_agent_string: unescape_quoted(&caps[7]),
    })
}

/// Access logs write `10/Oct/2023:13:55:36`; only the first colon separates
/// date from time, so it alone becomes a space before parsing.
///
/// Any zone offset is dropped and the wall clock as logged is kept.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, ParseError> {
    let normalized = raw.trim().replacen(':', " ", 1);

    let parsed = TIMESTAMP_WITH_ZONE
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&normalized, fmt).ok())
        .map(|dt| dt.naive_local())
        .or_else(|| {
            TIMESTAMP_NAIVE
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
        })
        .or_else(|| {
            TIMESTAMP_ISO
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw.trim(), fmt).ok())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw.trim())
                .ok()
                .map(|dt| dt.naive_local())
        })
        .ok_or_else(|| ParseError::Timestamp {
            value: raw.to_string(),
        })?;

    // Truncation to the second cannot fail for a value chrono just produced.
    Ok(parsed.with_nanosecond(0).unwrap_or(parsed))
}

/// `\"` -> `"` and `\\` -> `\`; any other escape is kept as written.
fn unescape_quoted(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next @ ('"' | '\\')) => out.push(next),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Second whitespace token of the request line, or `-`.
pub fn request_path(request_line: &str) -> String {
    request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or(NO_PATH)
        .to_string()
}
