use crate::analysis::field::Field;
use crate::ingest::LogRecord;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

/// Naive timestamps are exported as if they were UTC.
pub fn epoch_seconds(ts: &NaiveDateTime) -> i64 {
    ts.and_utc().timestamp()
}

pub fn day_epoch_seconds(day: &NaiveDate) -> i64 {
    day.and_hms_opt(0, 0, 0)
        .map(|ts| epoch_seconds(&ts))
        .unwrap_or_default()
}

//-----------------------------------------------------------------------------
// Transport shapes
//-----------------------------------------------------------------------------

/// `{"data": [...]}`, the envelope every aggregate is exported in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledValue<T> {
    pub label: String,
    pub value: T,
}

//-----------------------------------------------------------------------------
// Date range
//-----------------------------------------------------------------------------

/// Earliest and latest timestamp present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSpan {
    pub min: NaiveDateTime,
    pub max: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordSpanTransport {
    pub min_date: i64,
    pub max_date: i64,
}

impl RecordSpan {
    pub fn to_transport(&self) -> RecordSpanTransport {
        RecordSpanTransport {
            min_date: epoch_seconds(&self.min),
            max_date: epoch_seconds(&self.max),
        }
    }
}

//-----------------------------------------------------------------------------
// Pages
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub records: Vec<LogRecord>,
    pub page_number: usize,
    pub total_pages: usize,
}

/// [`LogRecord`] with the timestamp as Unix epoch seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordTransport {
    pub client_ip: String,
    pub date: i64,
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

impl From<&LogRecord> for RecordTransport {
    fn from(r: &LogRecord) -> Self {
        Self {
            client_ip: r.client_ip.clone(),
            date: epoch_seconds(&r.timestamp),
            request_line: r.request_line.clone(),
            path: r.path.clone(),
            status_code: r.status_code,
            response_size: r.response_size,
            user_agent_string: r.user_agent_string.clone(),
            device: r.device.clone(),
            os: r.os.clone(),
            browser: r.browser.clone(),
            browser_version: r.browser_version.clone(),
            referrer: r.referrer.clone(),
            country: r.country.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageTransport {
    pub data: Vec<RecordTransport>,
    pub page: usize,
    pub max_page: usize,
}

impl Page {
    pub fn to_transport(&self) -> PageTransport {
        PageTransport {
            data: self.records.iter().map(RecordTransport::from).collect(),
            page: self.page_number,
            max_page: self.total_pages,
        }
    }
}

//-----------------------------------------------------------------------------
// Counts
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyStatusCount {
    pub day: NaiveDate,
    pub status_code: u16,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupCounts {
    /// Grouping by [`Field::Date`]: calendar day, then status code.
    ByDayAndStatus(Vec<DailyStatusCount>),
    ByValue { field: Field, counts: BTreeMap<String, u64> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyStatusCountTransport {
    pub date: i64,
    pub status: u16,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GroupCountsTransport {
    ByDayAndStatus(Envelope<DailyStatusCountTransport>),
    ByValue(Envelope<LabeledValue<u64>>),
}

impl GroupCounts {
    pub fn total(&self) -> u64 {
        match self {
            GroupCounts::ByDayAndStatus(rows) => rows.iter().map(|r| r.count).sum(),
            GroupCounts::ByValue { counts, .. } => counts.values().sum(),
        }
    }

    pub fn to_transport(&self) -> GroupCountsTransport {
        match self {
            GroupCounts::ByDayAndStatus(rows) => GroupCountsTransport::ByDayAndStatus(Envelope {
                data: rows
                    .iter()
                    .map(|r| DailyStatusCountTransport {
                        date: day_epoch_seconds(&r.day),
                        status: r.status_code,
                        count: r.count,
                    })
                    .collect(),
            }),
            GroupCounts::ByValue { counts, .. } => GroupCountsTransport::ByValue(Envelope {
                data: counts
                    .iter()
                    .map(|(label, count)| LabeledValue {
                        label: label.clone(),
                        value: *count,
                    })
                    .collect(),
            }),
        }
    }
}

//-----------------------------------------------------------------------------
// Medians
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Medians {
    Overall { field: Field, value: f64 },
    Grouped {
        field: Field,
        group_by: Field,
        values: BTreeMap<String, f64>,
    },
}

impl Medians {
    pub fn to_transport(&self) -> Envelope<LabeledValue<f64>> {
        match self {
            Medians::Overall { field, value } => Envelope {
                data: vec![LabeledValue {
                    label: field.name().to_string(),
                    value: *value,
                }],
            },
            Medians::Grouped { values, .. } => Envelope {
                data: values
                    .iter()
                    .map(|(label, value)| LabeledValue {
                        label: label.clone(),
                        value: *value,
                    })
                    .collect(),
            },
        }
    }
}

//-----------------------------------------------------------------------------
// Bandwidth
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBandwidth {
    pub day: NaiveDate,
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DailyBandwidth {
    pub days: Vec<DayBandwidth>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBandwidthTransport {
    pub date: i64,
    pub bandwidth: u64,
}

impl DailyBandwidth {
    pub fn total(&self) -> u64 {
        self.days.iter().map(|d| d.bytes).sum()
    }

    pub fn to_transport(&self) -> Envelope<DayBandwidthTransport> {
        Envelope {
            data: self
                .days
                .iter()
                .map(|d| DayBandwidthTransport {
                    date: day_epoch_seconds(&d.day),
                    bandwidth: d.bytes,
                })
                .collect(),
        }
    }
}

//-----------------------------------------------------------------------------
// Summary
//-----------------------------------------------------------------------------

/// Everything the `stats` command reports, computed over one range.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    pub collection: String,
    pub span: Option<RecordSpan>,
    pub records: usize,
    pub total_bytes: u64,
    pub daily_bandwidth: DailyBandwidth,
    pub hits: GroupCounts,
    pub median_size_by_status: Option<Medians>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsTransport {
    pub collection: String,
    pub date_range: Option<RecordSpanTransport>,
    pub records: usize,
    pub total_bytes: u64,
    pub daily_bandwidth: Envelope<DayBandwidthTransport>,
    pub hits: GroupCountsTransport,
    pub median_size_by_status: Option<Envelope<LabeledValue<f64>>>,
}

impl StatsReport {
    pub fn to_transport(&self) -> StatsTransport {
        StatsTransport {
            collection: self.collection.clone(),
            date_range: self.span.as_ref().map(RecordSpan::to_transport),
            records: self.records,
            total_bytes: self.total_bytes,
            daily_bandwidth: self.daily_bandwidth.to_transport(),
            hits: self.hits.to_transport(),
            median_size_by_status: self.median_size_by_status.as_ref().map(Medians::to_transport),
        }
    }
}
