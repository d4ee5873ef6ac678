use crate::ingest::LogRecord;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

/// Half-open timestamp window `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl DateRange {
    pub fn new(from: NaiveDateTime, to: NaiveDateTime) -> Self {
        Self { from, to }
    }

    /// Every representable timestamp.
    pub fn unbounded() -> Self {
        Self {
            from: NaiveDateTime::MIN,
            to: NaiveDateTime::MAX,
        }
    }

    /// Defaults for a missing bound: the Unix epoch and the current wall clock.
    pub fn from_bounds(from: Option<NaiveDateTime>, to: Option<NaiveDateTime>) -> Self {
        Self {
            from: from.unwrap_or(DateTime::<Utc>::UNIX_EPOCH.naive_utc()),
            to: to.unwrap_or_else(|| Local::now().naive_local()),
        }
    }

    /// One calendar day starting at midnight of `day`.
    pub fn day(day: NaiveDate) -> Self {
        let from = day.and_hms_opt(0, 0, 0).unwrap_or(NaiveDateTime::MIN);
        let to = day
            .succ_opt()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or(NaiveDateTime::MAX);
        Self { from, to }
    }

    pub fn contains(&self, ts: &NaiveDateTime) -> bool {
        *ts >= self.from && *ts < self.to
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::from_bounds(None, None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Range filter plus optional timestamp sort and skip/limit paging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub range: DateRange,
    pub sort: Option<SortOrder>,
    pub skip: usize,
    pub limit: Option<usize>,
}

impl Query {
    pub fn range(range: DateRange) -> Self {
        Self {
            range,
            sort: None,
            skip: 0,
            limit: None,
        }
    }

    pub fn sort(mut self, order: SortOrder) -> Self {
        self.sort = Some(order);
        self
    }

    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Run this query over records in storage order.
    pub(crate) fn apply<I>(&self, records: I) -> Vec<LogRecord>
    where
        I: IntoIterator<Item = LogRecord>,
    {
        let mut matched: Vec<LogRecord> = records
            .into_iter()
            .filter(|r| self.range.contains(&r.timestamp))
            .collect();

        // sort_by_key is stable, so ties keep insertion order
        match self.sort {
            Some(SortOrder::Ascending) => matched.sort_by_key(|r| r.timestamp),
            Some(SortOrder::Descending) => {
                matched.sort_by_key(|r| std::cmp::Reverse(r.timestamp))
            }
            None => {}
        }

        let limit = self.limit.unwrap_or(usize::MAX);
        matched.into_iter().skip(self.skip).take(limit).collect()
    }
}
