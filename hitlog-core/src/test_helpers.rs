use crate::enrichment::Enricher;
use crate::enrichment::geoip::CountryLookup;
use crate::enrichment::referrer::UrlReferrerClassifier;
use crate::enrichment::user_agent::{UserAgentInfo, UserAgentLookup};
use crate::ingest::LogRecord;
use crate::store::{DocumentStore, MemoryStore, Query, StoreError};
use chrono::{NaiveDate, NaiveDateTime};
use std::cell::Cell;

pub struct StubGeo(pub &'static str);

impl CountryLookup for StubGeo {
    fn lookup_country(&self, _ip: &str) -> String {
        self.0.to_string()
    }
}

pub struct StubUa;

impl UserAgentLookup for StubUa {
    fn parse(&self, _ua: &str) -> UserAgentInfo {
        UserAgentInfo {
            device: "Other".to_string(),
            os: "TestOS".to_string(),
            browser: "TestBrowser".to_string(),
            browser_major: "5".to_string(),
        }
    }
}

pub fn stub_enricher() -> Enricher {
    Enricher::new(
        Box::new(StubGeo("Testland")),
        Box::new(StubUa),
        Box::new(UrlReferrerClassifier),
    )
}

/// Memory store that remembers the size of every bulk insert and how many
/// reads were issued.
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    pub batches: Vec<usize>,
    pub finds: Cell<usize>,
}

impl DocumentStore for CountingStore {
    fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        self.inner.collection_names()
    }

    fn insert_many(&mut self, collection: &str, records: &[LogRecord]) -> Result<(), StoreError> {
        self.batches.push(records.len());
        self.inner.insert_many(collection, records)
    }

    fn find(&self, collection: &str, query: &Query) -> Result<Vec<LogRecord>, StoreError> {
        self.finds.set(self.finds.get() + 1);
        self.inner.find(collection, query)
    }
}

pub fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

pub fn log_line(ip: &str, ts: &str, request: &str, status: u16, size: &str) -> String {
    format!(r#"{ip} - - [{ts}] "{request}" {status} {size} "-" "-" "Mozilla/5.0""#)
}

pub fn record(timestamp: NaiveDateTime, status_code: u16, response_size: u64) -> LogRecord {
    LogRecord {
        client_ip: "10.0.0.1".to_string(),
        timestamp,
        request_line: "GET / HTTP/1.1".to_string(),
        path: "/".to_string(),
        status_code,
        response_size,
        user_agent_string: "Mozilla/5.0".to_string(),
        device: "Other".to_string(),
        os: "TestOS".to_string(),
        browser: "TestBrowser".to_string(),
        browser_version: "5".to_string(),
        referrer: "None".to_string(),
        country: "Testland".to_string(),
    }
}
