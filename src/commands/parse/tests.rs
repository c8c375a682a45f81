use std::fs;

use tempfile::TempDir;

use super::*;
use crate::model::DocketRecord;

fn parser() -> DocketParser {
    DocketParser::new().unwrap()
}

fn record(
    district: &str,
    judge: &str,
    mdl: &str,
    title: &str,
    pending: u64,
    total: u64,
) -> DocketRecord {
    DocketRecord {
        district: district.to_string(),
        judge: judge.to_string(),
        mdl_number: mdl.to_string(),
        title: title.to_string(),
        pending,
        total,
        mdl_count: pending,
    }
}

#[test]
fn normalize_district_strips_punctuation_and_uppercases() {
    assert_eq!(normalize_district("n.y.-e"), "NYE");
    assert_eq!(normalize_district(" Cal 9 "), "CAL9");
    assert_eq!(normalize_district(""), "");
    assert_eq!(normalize_district("—"), "");
}

#[test]
fn normalize_district_is_idempotent() {
    for input in ["CAN", "n.d. cal", "  ", "É-1x", "a_b-c/d"] {
        let once = normalize_district(input);
        assert_eq!(normalize_district(&once), once, "input: {input:?}");
    }
}

#[test]
fn parse_count_removes_grouping_separators() {
    assert_eq!(parse_count("1,234"), Some(1234));
    assert_eq!(parse_count("12,345,678"), Some(12_345_678));
    assert_eq!(parse_count("0"), Some(0));
    assert_eq!(parse_count(",,"), None);
    assert_eq!(parse_count("99999999999999999999999"), None);
}

#[test]
fn header_and_body_on_one_line_yields_record_for_that_district() {
    let lines = ["CAN  Hon. J. Smith  MDL-2741  In re Widget Litigation  312  450"];

    let document = parser().parse_lines(&lines);

    assert_eq!(
        document.records,
        vec![record(
            "CAN",
            "Hon. J. Smith",
            "MDL-2741",
            "In re Widget Litigation",
            312,
            450
        )]
    );
    assert_eq!(document.stats.district_headers, 1);
}

#[test]
fn new_header_with_body_overrides_previous_district() {
    let lines = [
        "NYE",
        "Hon. A. Jones MDL-100 In re First 5 10",
        "PAE Hon. B. Lee MDL-200 In re Second 7 9",
        "Hon. C. Kim MDL-300 In re Third 1 2",
    ];

    let document = parser().parse_lines(&lines);
    let districts: Vec<&str> = document
        .records
        .iter()
        .map(|record| record.district.as_str())
        .collect();

    assert_eq!(districts, vec!["NYE", "PAE", "PAE"]);
}

#[test]
fn header_only_line_updates_state_without_record() {
    let parser = parser();
    let mut state = ParseState::default();

    let result = parser.parse_line(&mut state, "NYE");

    assert_eq!(result.outcome, LineOutcome::HeaderOnly);
    assert_eq!(result.district_header.as_deref(), Some("NYE"));
    assert_eq!(state.current_district.as_deref(), Some("NYE"));

    let result = parser.parse_line(&mut state, "Hon. R. Roe  MDL-3004  In re Paraquat  5,872  6,010");
    assert_eq!(
        result.outcome,
        LineOutcome::Record(record(
            "NYE",
            "Hon. R. Roe",
            "MDL-3004",
            "In re Paraquat",
            5872,
            6010
        ))
    );
}

#[test]
fn lines_before_first_header_are_unattributed() {
    let lines = [
        "Hon. J. Smith MDL-2741 In re Widget Litigation 312 450",
        "Pending MDL Dockets By District",
        "",
        "CAN",
        "Hon. J. Smith MDL-2741 In re Widget Litigation 312 450",
    ];

    let document = parser().parse_lines(&lines);

    assert_eq!(document.records.len(), 1);
    assert_eq!(document.stats.unattributed_lines, 2);
    assert_eq!(document.stats.blank_lines, 1);
    assert_eq!(document.stats.lines_seen, 5);
}

#[test]
fn malformed_counts_drop_only_that_line() {
    let parser = parser();
    let mut state = ParseState {
        current_district: Some("TXS".to_string()),
    };

    let result = parser.parse_line(&mut state, "Hon. X MDL-1 In re Bad ,, 4");
    assert_eq!(
        result.outcome,
        LineOutcome::Malformed(MalformedReason::BadCount(",,".to_string()))
    );

    let result = parser.parse_line(&mut state, "District Judge Docket Title Pending Total");
    assert_eq!(
        result.outcome,
        LineOutcome::Malformed(MalformedReason::NoRecordShape)
    );

    let result = parser.parse_line(&mut state, "Hon. Y MDL-2 In re Good 3 4");
    assert!(matches!(result.outcome, LineOutcome::Record(_)));
    assert_eq!(state.current_district.as_deref(), Some("TXS"));
}

#[test]
fn mdl_marker_accepts_dash_variants_and_spacing() {
    let lines = [
        "FLN",
        "Hon. A MDL 2885 In re Earplugs 1,000 2,000",
        "Hon. B MDL–2886 In re Dash 1 2",
        "Hon. C MDL — 2887 In re Em Dash 3 4",
        "Hon. D MDL2888 In re Glued 5 6",
    ];

    let document = parser().parse_lines(&lines);
    let numbers: Vec<&str> = document
        .records
        .iter()
        .map(|record| record.mdl_number.as_str())
        .collect();

    assert_eq!(numbers, vec!["MDL-2885", "MDL-2886", "MDL-2887", "MDL-2888"]);
    assert_eq!(document.records[0].pending, 1000);
    assert_eq!(document.records[0].total, 2000);
}

#[test]
fn judge_may_be_empty_when_row_starts_with_marker() {
    let lines = ["ILN MDL-2545 In re Testosterone 0 12"];

    let document = parser().parse_lines(&lines);

    assert_eq!(
        document.records,
        vec![record("ILN", "", "MDL-2545", "In re Testosterone", 0, 12)]
    );
}

#[test]
fn title_keeps_embedded_numbers_and_trailing_whitespace_is_ignored() {
    let lines = ["MN Hon. E. Fox MDL-2666 In re 3M Bair Hugger 2 4 6,001   "];

    let document = parser().parse_lines(&lines);

    assert_eq!(document.records.len(), 1);
    assert_eq!(document.records[0].title, "In re 3M Bair Hugger 2");
    assert_eq!(document.records[0].pending, 4);
    assert_eq!(document.records[0].total, 6001);
}

#[test]
fn at_most_one_record_per_line() {
    let lines = ["CAN Hon. A MDL-1 In re One 1 2 Hon. B MDL-2 In re Two 3 4"];

    let document = parser().parse_lines(&lines);

    assert_eq!(document.records.len(), 1);
    assert_eq!(document.records[0].judge, "Hon. A");
    assert_eq!(document.records[0].pending, 3);
}

#[test]
fn pending_above_total_is_counted_not_rejected() {
    let lines = ["CAN", "Hon. A MDL-1 In re Odd 9 3", "Hon. B MDL-2 In re Even 3 9"];

    let document = parser().parse_lines(&lines);

    assert_eq!(document.records.len(), 2);
    assert_eq!(document.stats.pending_exceeds_total, 1);
    assert!(document.records[1].total >= document.records[1].pending);
}

#[test]
fn split_pages_drops_trailing_empty_pages_and_nuls() {
    let raw = "CAN\nHon. A\u{0000} MDL-1 T 1 2\n\u{000C}NYE\n\u{000C}\n\u{000C}";

    let pages = split_pages(raw);
    let lines = pages_to_lines(&pages);

    assert_eq!(pages.len(), 2);
    assert_eq!(lines, vec!["CAN", "Hon. A MDL-1 T 1 2", "NYE"]);
}

#[test]
fn parse_document_writes_field_mapping_array() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("report.txt");
    let output = temp_dir.path().join("mdl").join("2024-06-03.json");
    fs::write(
        &input,
        "Pending MDL Dockets\nCAN  Hon. J. Smith  MDL-2741  In re Widget Litigation  312  450\n",
    )
    .unwrap();

    let stats = parse_document(&parser(), LineSource::PlainText, &input, &output).unwrap();
    assert_eq!(stats.records, 1);

    let raw = fs::read_to_string(&output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "District": "CAN",
            "Judge": "Hon. J. Smith",
            "MDL": "MDL-2741",
            "Title": "In re Widget Litigation",
            "Pending": 312,
            "Total": 450,
            "MDL Count": 312
        }])
    );
}

#[test]
fn parse_document_reports_missing_text_input() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("missing.txt");
    let output = temp_dir.path().join("out.json");

    let result = parse_document(&parser(), LineSource::PlainText, &input, &output);

    assert!(result.is_err());
    assert!(!output.exists());
}

#[test]
fn bare_marker_row_is_read_as_an_mdl_district_header() {
    let lines = [
        "CAN",
        "MDL-2545 In re Testosterone 0 12",
        "Hon. A MDL-2741 In re Widget Litigation 312 450",
    ];

    let document = parser().parse_lines(&lines);

    assert_eq!(document.stats.district_headers, 2);
    assert_eq!(document.stats.malformed_lines, 1);
    assert_eq!(
        document.records,
        vec![record(
            "MDL",
            "Hon. A",
            "MDL-2741",
            "In re Widget Litigation",
            312,
            450
        )]
    );
}
