use crate::analysis::{
    Aggregator, AnalyzeError, DailyStatusCount, DayBandwidth, Field, GroupCounts, Medians,
    RecordSpan,
};
use crate::ingest::LogRecord;
use crate::store::{DateRange, DocumentStore, MemoryStore};
use crate::test_helpers::{CountingStore, record, ts};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn store_with(records: &[LogRecord]) -> MemoryStore {
    let mut store = MemoryStore::new();
    store.insert_many("hits", records).unwrap();
    store
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn three_days() -> Vec<LogRecord> {
    vec![
        record(ts(2024, 3, 1, 10, 0, 0), 200, 100),
        record(ts(2024, 3, 1, 11, 0, 0), 404, 10),
        record(ts(2024, 3, 1, 12, 0, 0), 200, 300),
        // nothing on the 2nd
        record(ts(2024, 3, 3, 9, 30, 0), 200, 50),
    ]
}

#[test]
fn unknown_collection_is_rejected_up_front() {
    let store = MemoryStore::new();

    let result = Aggregator::new(&store, "nope");

    assert!(matches!(
        result,
        Err(AnalyzeError::CollectionNotFound { ref collection }) if collection == "nope"
    ));
}

#[test]
fn date_range_reports_earliest_and_latest() {
    // Arrange
    let store = store_with(&three_days());
    let agg = Aggregator::new(&store, "hits").unwrap();

    // Act
    let span = agg.date_range(&DateRange::unbounded()).unwrap();

    // Assert
    assert_eq!(
        span,
        RecordSpan {
            min: ts(2024, 3, 1, 10, 0, 0),
            max: ts(2024, 3, 3, 9, 30, 0),
        }
    );
}

#[test]
fn date_range_on_an_empty_window_is_an_error() {
    let store = store_with(&three_days());
    let agg = Aggregator::new(&store, "hits").unwrap();
    let empty = DateRange::new(ts(2020, 1, 1, 0, 0, 0), ts(2020, 1, 2, 0, 0, 0));

    let result = agg.date_range(&empty);

    assert!(matches!(result, Err(AnalyzeError::EmptyCollection { .. })));
}

#[test]
fn range_upper_bound_is_exclusive() {
    // Arrange
    let store = store_with(&three_days());
    let agg = Aggregator::new(&store, "hits").unwrap();
    let until_noon = DateRange::new(ts(2024, 3, 1, 0, 0, 0), ts(2024, 3, 1, 12, 0, 0));

    // Act
    let count = agg.count(&until_noon, Field::StatusCode).unwrap();

    // Assert
    assert_eq!(count, 2);
}

#[test]
fn total_pages_rounds_up() {
    // Arrange
    let records: Vec<_> = (0..7)
        .map(|i| record(ts(2024, 3, 1, 0, i, 0), 200, 1))
        .collect();
    let store = store_with(&records);
    let agg = Aggregator::new(&store, "hits").unwrap();

    // Act
    let first = agg.paginate(&DateRange::unbounded(), 0, 3).unwrap();
    let last = agg.paginate(&DateRange::unbounded(), 2, 3).unwrap();
    let past_end = agg.paginate(&DateRange::unbounded(), 5, 3).unwrap();

    // Assert
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.records.len(), 3);
    assert_eq!(first.records[0].timestamp, ts(2024, 3, 1, 0, 0, 0));
    assert_eq!(last.records.len(), 1);
    assert_eq!(last.records[0].timestamp, ts(2024, 3, 1, 0, 6, 0));
    assert!(past_end.records.is_empty());
}

#[test]
fn zero_page_size_is_treated_as_one() {
    let store = store_with(&three_days());
    let agg = Aggregator::new(&store, "hits").unwrap();

    let page = agg.paginate(&DateRange::unbounded(), 0, 0).unwrap();

    assert_eq!(page.records.len(), 1);
    assert_eq!(page.total_pages, 4);
}

#[test]
fn count_skips_empty_text_values() {
    // Arrange
    let mut without_country = record(ts(2024, 3, 1, 0, 0, 0), 200, 1);
    without_country.country = String::new();
    let store = store_with(&[without_country, record(ts(2024, 3, 1, 0, 1, 0), 200, 1)]);
    let agg = Aggregator::new(&store, "hits").unwrap();

    // Act
    let countries = agg.count(&DateRange::unbounded(), Field::Country).unwrap();
    let statuses = agg.count(&DateRange::unbounded(), Field::StatusCode).unwrap();

    // Assert
    assert_eq!(countries, 1);
    assert_eq!(statuses, 2);
}

#[test]
fn grouping_by_date_splits_each_day_by_status() {
    // Arrange
    let store = store_with(&three_days());
    let agg = Aggregator::new(&store, "hits").unwrap();

    // Act
    let groups = agg
        .count_by_group(&DateRange::unbounded(), Field::Date)
        .unwrap();

    // Assert
    assert_eq!(
        groups,
        GroupCounts::ByDayAndStatus(vec![
            DailyStatusCount {
                day: day(2024, 3, 1),
                status_code: 200,
                count: 2,
            },
            DailyStatusCount {
                day: day(2024, 3, 1),
                status_code: 404,
                count: 1,
            },
            DailyStatusCount {
                day: day(2024, 3, 3),
                status_code: 200,
                count: 1,
            },
        ])
    );
    assert_eq!(groups.total(), 4);
}

#[test]
fn grouping_by_value_counts_each_label() {
    // Arrange
    let store = store_with(&three_days());
    let agg = Aggregator::new(&store, "hits").unwrap();

    // Act
    let groups = agg
        .count_by_group(&DateRange::unbounded(), Field::StatusCode)
        .unwrap();

    // Assert
    let expected = BTreeMap::from([("200".to_string(), 3), ("404".to_string(), 1)]);
    assert_eq!(
        groups,
        GroupCounts::ByValue {
            field: Field::StatusCode,
            counts: expected,
        }
    );
}

#[test]
fn sum_adds_numeric_values_and_refuses_text() {
    let store = store_with(&three_days());
    let agg = Aggregator::new(&store, "hits").unwrap();

    let bytes = agg.sum(&DateRange::unbounded(), Field::ResponseSize).unwrap();
    let paths = agg.sum(&DateRange::unbounded(), Field::Path).unwrap();

    assert_eq!(bytes, Some(460.0));
    assert_eq!(paths, None);
}

#[test]
fn overall_median_uses_every_record_in_range() {
    // Arrange
    let store = store_with(&three_days());
    let agg = Aggregator::new(&store, "hits").unwrap();

    // Act
    let median = agg
        .median(&DateRange::unbounded(), Field::ResponseSize, None)
        .unwrap();

    // Assert
    assert_eq!(
        median,
        Some(Medians::Overall {
            field: Field::ResponseSize,
            value: 75.0,
        })
    );
}

#[test]
fn grouped_median_has_one_value_per_group() {
    // Arrange
    let store = store_with(&three_days());
    let agg = Aggregator::new(&store, "hits").unwrap();

    // Act
    let median = agg
        .median(
            &DateRange::unbounded(),
            Field::ResponseSize,
            Some(Field::StatusCode),
        )
        .unwrap();

    // Assert
    let expected = BTreeMap::from([("200".to_string(), 100.0), ("404".to_string(), 10.0)]);
    assert_eq!(
        median,
        Some(Medians::Grouped {
            field: Field::ResponseSize,
            group_by: Field::StatusCode,
            values: expected,
        })
    );
}

#[test]
fn median_is_absent_without_numeric_values() {
    // Arrange
    let mut odd_version = record(ts(2024, 3, 1, 0, 0, 0), 200, 1);
    odd_version.browser_version = "beta".to_string();
    let store = store_with(&[odd_version]);
    let agg = Aggregator::new(&store, "hits").unwrap();

    // Act
    let version = agg
        .median(&DateRange::unbounded(), Field::BrowserVersion, None)
        .unwrap();
    let country = agg
        .median(&DateRange::unbounded(), Field::Country, None)
        .unwrap();

    // Assert
    assert_eq!(version, None);
    assert_eq!(country, None);
}

#[test]
fn daily_bandwidth_fills_quiet_days_with_zero() {
    // Arrange
    let store = store_with(&three_days());
    let agg = Aggregator::new(&store, "hits").unwrap();

    // Act
    let bandwidth = agg.daily_bandwidth(&DateRange::unbounded()).unwrap();

    // Assert
    assert_eq!(
        bandwidth.days,
        vec![
            DayBandwidth {
                day: day(2024, 3, 1),
                bytes: 410,
            },
            DayBandwidth {
                day: day(2024, 3, 2),
                bytes: 0,
            },
            DayBandwidth {
                day: day(2024, 3, 3),
                bytes: 50,
            },
        ]
    );
    assert_eq!(
        Some(bandwidth.total() as f64),
        agg.sum(&DateRange::unbounded(), Field::ResponseSize).unwrap()
    );
}

#[test]
fn daily_bandwidth_clips_the_first_day_to_the_range() {
    // Arrange
    let store = store_with(&three_days());
    let agg = Aggregator::new(&store, "hits").unwrap();
    let from_eleven = DateRange::new(ts(2024, 3, 1, 11, 0, 0), ts(2024, 3, 2, 0, 0, 0));

    // Act
    let bandwidth = agg.daily_bandwidth(&from_eleven).unwrap();

    // Assert
    assert_eq!(
        bandwidth.days,
        vec![DayBandwidth {
            day: day(2024, 3, 1),
            bytes: 310,
        }]
    );
}

#[test]
fn daily_bandwidth_reads_the_range_once_however_many_days() {
    // Arrange
    let mut store = CountingStore::default();
    store
        .insert_many(
            "hits",
            &[
                record(ts(2024, 1, 1, 0, 0, 0), 200, 7),
                record(ts(2024, 3, 31, 23, 0, 0), 200, 3),
            ],
        )
        .unwrap();
    let agg = Aggregator::new(&store, "hits").unwrap();
    store.finds.set(0);

    // Act
    let bandwidth = agg.daily_bandwidth(&DateRange::unbounded()).unwrap();

    // Assert
    assert_eq!(bandwidth.days.len(), 91);
    assert_eq!(bandwidth.total(), 10);
    assert_eq!(bandwidth.days[1].bytes, 0);
    assert_eq!(store.finds.get(), 1);
}

#[test]
fn daily_bandwidth_on_an_empty_window_is_an_error() {
    let store = store_with(&three_days());
    let agg = Aggregator::new(&store, "hits").unwrap();
    let empty = DateRange::new(ts(2020, 1, 1, 0, 0, 0), ts(2020, 1, 2, 0, 0, 0));

    let result = agg.daily_bandwidth(&empty);

    assert!(matches!(result, Err(AnalyzeError::EmptyCollection { .. })));
}

#[test]
fn stats_bundles_every_aggregate() {
    // Arrange
    let store = store_with(&three_days());
    let agg = Aggregator::new(&store, "hits").unwrap();

    // Act
    let report = agg.stats(&DateRange::unbounded()).unwrap();

    // Assert
    assert_eq!(report.collection, "hits");
    assert_eq!(report.records, 4);
    assert_eq!(report.total_bytes, 460);
    assert_eq!(report.daily_bandwidth.days.len(), 3);
    assert_eq!(report.hits.total(), 4);
    assert!(report.span.is_some());
    assert!(matches!(
        report.median_size_by_status,
        Some(Medians::Grouped { .. })
    ));
}

#[test]
fn stats_over_an_empty_window_is_empty_not_an_error() {
    let store = store_with(&three_days());
    let agg = Aggregator::new(&store, "hits").unwrap();
    let empty = DateRange::new(ts(2030, 1, 1, 0, 0, 0), ts(2030, 1, 2, 0, 0, 0));

    let report = agg.stats(&empty).unwrap();

    assert_eq!(report.span, None);
    assert_eq!(report.records, 0);
    assert_eq!(report.total_bytes, 0);
    assert!(report.daily_bandwidth.days.is_empty());
    assert_eq!(report.median_size_by_status, None);
}
