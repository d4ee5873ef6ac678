use crate::analysis::error::AnalyzeError;
use crate::analysis::field::Field;
use crate::analysis::stats::median_of;
use crate::analysis::types::{
    DailyBandwidth, DailyStatusCount, DayBandwidth, GroupCounts, Medians, Page, RecordSpan,
    StatsReport,
};
use crate::ingest::LogRecord;
use crate::store::{DateRange, DocumentStore, Query, SortOrder};
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Read-only statistics over one collection. Every query takes its own
/// [`DateRange`]; nothing is scoped at construction time.
pub struct Aggregator<'a> {
    store: &'a dyn DocumentStore,
    collection: String,
}

impl<'a> Aggregator<'a> {
    /// Fails before any query runs if the collection does not exist.
    pub fn new(store: &'a dyn DocumentStore, collection: &str) -> Result<Self, AnalyzeError> {
        if !store.collection_exists(collection)? {
            return Err(AnalyzeError::CollectionNotFound {
                collection: collection.to_string(),
            });
        }

        Ok(Self {
            store,
            collection: collection.to_string(),
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn records(&self, range: &DateRange) -> Result<Vec<LogRecord>, AnalyzeError> {
        Ok(self.store.find(&self.collection, &Query::range(*range))?)
    }

    fn edge(&self, range: &DateRange, order: SortOrder) -> Result<LogRecord, AnalyzeError> {
        self.store
            .find(&self.collection, &Query::range(*range).sort(order).limit(1))?
            .into_iter()
            .next()
            .ok_or_else(|| AnalyzeError::EmptyCollection {
                collection: self.collection.clone(),
            })
    }

    pub fn date_range(&self, range: &DateRange) -> Result<RecordSpan, AnalyzeError> {
        let min = self.edge(range, SortOrder::Ascending)?.timestamp;
        let max = self.edge(range, SortOrder::Descending)?.timestamp;
        Ok(RecordSpan { min, max })
    }

    /// One page in storage order. `page_number` starts at zero.
    pub fn paginate(
        &self,
        range: &DateRange,
        page_number: usize,
        page_size: usize,
    ) -> Result<Page, AnalyzeError> {
        let page_size = page_size.max(1);
        let total = self.store.count(&self.collection, range)?;

        let records = self.store.find(
            &self.collection,
            &Query::range(*range)
                .skip(page_number.saturating_mul(page_size))
                .limit(page_size),
        )?;

        Ok(Page {
            records,
            page_number,
            total_pages: total.div_ceil(page_size),
        })
    }

    /// Records in range carrying a value for `field`.
    pub fn count(&self, range: &DateRange, field: Field) -> Result<u64, AnalyzeError> {
        Ok(self
            .records(range)?
            .iter()
            .filter(|r| field.is_present(r))
            .count() as u64)
    }

    pub fn count_by_group(
        &self,
        range: &DateRange,
        field: Field,
    ) -> Result<GroupCounts, AnalyzeError> {
        let records = self.records(range)?;

        if field == Field::Date {
            let mut by_day = BTreeMap::new();
            for r in &records {
                *by_day
                    .entry((r.timestamp.date(), r.status_code))
                    .or_insert(0u64) += 1;
            }

            let rows = by_day
                .into_iter()
                .map(|((day, status_code), count)| DailyStatusCount {
                    day,
                    status_code,
                    count,
                })
                .collect();
            return Ok(GroupCounts::ByDayAndStatus(rows));
        }

        let mut counts = BTreeMap::new();
        for r in records.iter().filter(|r| field.is_present(r)) {
            *counts.entry(field.label(r)).or_insert(0u64) += 1;
        }
        Ok(GroupCounts::ByValue { field, counts })
    }

    /// `None` (with a warning) when `field` is not numeric.
    pub fn sum(&self, range: &DateRange, field: Field) -> Result<Option<f64>, AnalyzeError> {
        if !field.is_numeric() {
            tracing::warn!(field = %field, "cannot sum a non-numeric field");
            return Ok(None);
        }

        Ok(Some(
            self.records(range)?
                .iter()
                .filter_map(|r| field.numeric(r))
                .sum(),
        ))
    }

    /// `None` (with a warning) when no record in range has a numeric `field`.
    pub fn median(
        &self,
        range: &DateRange,
        field: Field,
        group_by: Option<Field>,
    ) -> Result<Option<Medians>, AnalyzeError> {
        if !field.is_numeric() {
            tracing::warn!(field = %field, "check that the field exists and is numeric");
            return Ok(None);
        }

        let records = self.records(range)?;

        let medians = match group_by {
            None => {
                let mut values: Vec<f64> = records.iter().filter_map(|r| field.numeric(r)).collect();
                median_of(&mut values).map(|value| Medians::Overall { field, value })
            }
            Some(group_by) => {
                let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
                for r in &records {
                    if let Some(v) = field.numeric(r) {
                        groups.entry(group_by.label(r)).or_default().push(v);
                    }
                }

                let values: BTreeMap<String, f64> = groups
                    .into_iter()
                    .filter_map(|(label, mut vs)| median_of(&mut vs).map(|m| (label, m)))
                    .collect();

                (!values.is_empty()).then_some(Medians::Grouped {
                    field,
                    group_by,
                    values,
                })
            }
        };

        if medians.is_none() {
            tracing::warn!(
                field = %field,
                collection = %self.collection,
                "no numeric values to take a median of"
            );
        }
        Ok(medians)
    }

    /// Bytes served per calendar day, from the first record's day through the
    /// last record's day. Days without traffic report zero.
    pub fn daily_bandwidth(&self, range: &DateRange) -> Result<DailyBandwidth, AnalyzeError> {
        let mut by_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for r in self.records(range)? {
            *by_day.entry(r.timestamp.date()).or_default() += r.response_size;
        }

        let (Some(&first), Some(&last)) = (by_day.keys().next(), by_day.keys().next_back())
        else {
            return Err(AnalyzeError::EmptyCollection {
                collection: self.collection.clone(),
            });
        };

        let days = first
            .iter_days()
            .take_while(|day| *day <= last)
            .map(|day| DayBandwidth {
                day,
                bytes: by_day.get(&day).copied().unwrap_or(0),
            })
            .collect();

        Ok(DailyBandwidth { days })
    }

    /// The bundle printed by `hitlog stats`. An empty range yields an empty
    /// report rather than an error.
    pub fn stats(&self, range: &DateRange) -> Result<StatsReport, AnalyzeError> {
        let span = match self.date_range(range) {
            Ok(span) => Some(span),
            Err(AnalyzeError::EmptyCollection { .. }) => None,
            Err(e) => return Err(e),
        };

        let daily_bandwidth = match span {
            Some(_) => self.daily_bandwidth(range)?,
            None => DailyBandwidth::default(),
        };

        let hits = self.count_by_group(range, Field::Date)?;

        Ok(StatsReport {
            collection: self.collection.clone(),
            span,
            records: hits.total() as usize,
            total_bytes: daily_bandwidth.total(),
            daily_bandwidth,
            hits,
            median_size_by_status: match span {
                Some(_) => self.median(range, Field::ResponseSize, Some(Field::StatusCode))?,
                None => None,
            },
        })
    }
}

