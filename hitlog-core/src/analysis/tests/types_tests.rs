use crate::analysis::types::{day_epoch_seconds, epoch_seconds};
use crate::analysis::{
    DailyBandwidth, DailyStatusCount, DayBandwidth, Field, GroupCounts, Medians, Page, RecordSpan,
    median_of,
};
use crate::test_helpers::{record, ts};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::BTreeMap;

#[test]
fn median_of_odd_and_even_counts() {
    assert_eq!(median_of(&mut [3.0, 1.0, 2.0]), Some(2.0));
    assert_eq!(median_of(&mut [4.0, 1.0, 3.0, 2.0]), Some(2.5));
    assert_eq!(median_of(&mut []), None);
}

#[test]
fn naive_timestamps_export_as_utc() {
    assert_eq!(epoch_seconds(&ts(1970, 1, 2, 0, 0, 0)), 86_400);
    assert_eq!(
        day_epoch_seconds(&NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
        1_709_251_200
    );
}

#[test]
fn span_transport_uses_min_and_max_date() {
    let span = RecordSpan {
        min: ts(1970, 1, 1, 0, 0, 0),
        max: ts(1970, 1, 1, 0, 1, 0),
    };

    let value = serde_json::to_value(span.to_transport()).unwrap();

    assert_eq!(value, json!({ "min_date": 0, "max_date": 60 }));
}

#[test]
fn page_transport_carries_page_and_max_page() {
    // Arrange
    let page = Page {
        records: vec![record(ts(1970, 1, 1, 0, 0, 10), 200, 5)],
        page_number: 1,
        total_pages: 4,
    };

    // Act
    let value = serde_json::to_value(page.to_transport()).unwrap();

    // Assert
    assert_eq!(value["page"], json!(1));
    assert_eq!(value["max_page"], json!(4));
    assert_eq!(value["data"][0]["date"], json!(10));
    assert_eq!(value["data"][0]["status_code"], json!(200));
    assert_eq!(value["data"][0]["country"], json!("Testland"));
}

#[test]
fn hits_by_day_export_in_a_data_envelope() {
    // Arrange
    let groups = GroupCounts::ByDayAndStatus(vec![DailyStatusCount {
        day: NaiveDate::from_ymd_opt(1970, 1, 2).unwrap(),
        status_code: 404,
        count: 3,
    }]);

    // Act
    let value = serde_json::to_value(groups.to_transport()).unwrap();

    // Assert
    assert_eq!(
        value,
        json!({ "data": [{ "date": 86_400, "status": 404, "count": 3 }] })
    );
}

#[test]
fn grouped_values_export_as_label_value_pairs() {
    // Arrange
    let counts = GroupCounts::ByValue {
        field: Field::Country,
        counts: BTreeMap::from([("France".to_string(), 2), ("Japan".to_string(), 1)]),
    };
    let medians = Medians::Overall {
        field: Field::ResponseSize,
        value: 12.5,
    };

    // Act
    let counts = serde_json::to_value(counts.to_transport()).unwrap();
    let medians = serde_json::to_value(medians.to_transport()).unwrap();

    // Assert
    assert_eq!(
        counts,
        json!({ "data": [
            { "label": "France", "value": 2 },
            { "label": "Japan", "value": 1 },
        ] })
    );
    assert_eq!(
        medians,
        json!({ "data": [{ "label": "response_size", "value": 12.5 }] })
    );
}

#[test]
fn bandwidth_exports_one_row_per_day() {
    let bandwidth = DailyBandwidth {
        days: vec![DayBandwidth {
            day: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
            bytes: 99,
        }],
    };

    let value = serde_json::to_value(bandwidth.to_transport()).unwrap();

    assert_eq!(value, json!({ "data": [{ "date": 0, "bandwidth": 99 }] }));
}
