use crate::ingest::{LoadReport, ParseError};
use pretty_assertions::assert_eq;
use serde_json::Value;

fn report_with_skips(skips: usize) -> LoadReport {
    let mut report = LoadReport::new("hits");
    report.loaded = 12;
    report.batches = 1;
    report.success = true;
    for line in 0..skips {
        report.record_skip(line + 1, &ParseError::Malformed);
    }
    report
}

#[test]
fn json_rendering_carries_counts_and_samples() {
    // Arrange
    let report = report_with_skips(2);

    // Act
    let json: Value = serde_json::from_str(&report.render_json().unwrap()).unwrap();

    // Assert
    assert_eq!(json["collection"], "hits");
    assert_eq!(json["loaded"], 12);
    assert_eq!(json["skipped"], 2);
    assert_eq!(json["success"], true);
    assert_eq!(json["skipped_lines"][1]["line"], 2);
}

#[test]
fn plain_rendering_lists_every_sample() {
    // Arrange
    let report = report_with_skips(1);

    // Act
    let out = report.render_plain();

    // Assert
    assert_eq!(
        out,
        "hits: loaded=12 skipped=1 batches=1 success=true\n\
         line 1: line does not match the access log grammar\n"
    );
}

#[test]
fn pretty_rendering_mentions_hidden_skips() {
    // Arrange
    let mut report = report_with_skips(3);
    report.skipped_lines.truncate(1);

    // Act
    let out = report.render_pretty();

    // Assert
    assert!(out.contains("records: 12 | batches: 1 | skipped lines: 3"));
    assert!(out.contains("... and 2 more"));
}
