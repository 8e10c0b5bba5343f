//! End-to-end import tests over sample exports

use chrono::{NaiveDate, NaiveTime};
use common::{Session, TradeOutcome, TradeResult};
use pretty_assertions::assert_eq;
use rstest::*;
use std::collections::BTreeMap;
use test_utils::*;
use trade_import::{
    Field, ImportConfig, ImportError, detect_columns, import_csv, load_file, load_json,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[rstest]
fn test_broker_export(broker_csv: &'static str) {
    init_test_logging();
    let report = import_csv(broker_csv.as_bytes(), &ImportConfig::default()).unwrap();

    assert!(report.skipped.is_empty(), "{:?}", report.skipped);
    let ids: Vec<&str> = report.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1001", "1002", "1003", "1004"]);

    let first = &report.records[0];
    assert_eq!(first.result(), TradeResult::Win);
    assert_eq!(first.pnl(), Some(100.0));
    assert_eq!(first.session, Some(Session::London));
    assert_eq!(first.strategy_id.as_ref().map(|s| s.as_str()), Some("breakout"));

    assert_eq!(report.records[1].session, Some(Session::NewYork));
    assert_eq!(report.records[1].result(), TradeResult::Loss);

    // day-first date, zero pnl and a regional session name
    let third = &report.records[2];
    assert_eq!(third.date, date(2024, 3, 5));
    assert_eq!(third.result(), TradeResult::Breakeven);
    assert_eq!(third.session, Some(Session::Tokyo));

    assert_eq!(report.records[3].outcome, TradeOutcome::Ongoing);

    let mapping = report.mapping.unwrap();
    assert_eq!(mapping.header(Field::StopLoss), Some("S/L"));
    assert_eq!(mapping.header(Field::StrategyId), Some("Setup"));
}

#[rstest]
fn test_bad_rows_are_skipped_with_line_numbers() {
    let csv = "Date,Direction,Entry,Stop,Target,Size,PnL\n\
               2024-03-04,Long,1.1,1.09,1.12,1,25\n\
               2024-03-05,Sideways,1.1,1.09,1.12,1,10\n\
               2024-03-06,Short,-1.1,1.11,1.08,1,10\n\
               not a date,Long,1.1,1.09,1.12,1,10\n\
               2024-03-07,Short,1.1,1.11,1.08,1,oops\n";
    let report = import_csv(csv.as_bytes(), &ImportConfig::default()).unwrap();

    assert_eq!(report.records.len(), 1);
    assert!(!report.records[0].id.as_str().is_empty());

    let lines: Vec<u64> = report.skipped.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![3, 4, 5, 6]);
    assert!(report.skipped[0].reason.contains("direction"));
    assert!(report.skipped[2].reason.contains("date"));
    assert!(report.skipped[3].reason.contains("pnl"));
}

#[rstest]
fn test_generated_ids_are_unique() {
    let csv = "Date,Side,Entry,SL,TP,Qty\n\
               2024-03-04,Buy,10,9,12,1\n\
               2024-03-04,Buy,10,9,12,1\n";
    let report = import_csv(csv.as_bytes(), &ImportConfig::default()).unwrap();
    assert_eq!(report.records.len(), 2);
    assert_ne!(report.records[0].id, report.records[1].id);
}

#[rstest]
fn test_timestamp_date_fills_entry_time() {
    let csv = "Date,Direction,Entry,Stop,Target,Size\n\
               2024-03-04 09:30,Long,1.1,1.09,1.12,1\n";
    let report = import_csv(csv.as_bytes(), &ImportConfig::default()).unwrap();
    let record = &report.records[0];
    assert_eq!(record.date, date(2024, 3, 4));
    assert_eq!(record.entry_time, NaiveTime::from_hms_opt(9, 30, 0));
    assert!(!record.is_closed());
}

#[rstest]
fn test_semicolon_export_with_custom_alias() {
    let csv = "Date;Richtung;Entry Price;Stop Loss;Take Profit;Size;PnL\n\
               2024-03-04;Short;1,2000;1,2050;1,1900;1;-12,50\n";

    let mut config = ImportConfig {
        delimiter: ";".to_string(),
        ..ImportConfig::default()
    };
    let without_alias = import_csv(csv.as_bytes(), &config);
    match without_alias {
        Err(ImportError::MissingColumns(missing)) => assert_eq!(missing, vec!["direction"]),
        other => panic!("expected missing direction, got {other:?}"),
    }

    config.aliases = BTreeMap::from([("direction".to_string(), vec!["Richtung".to_string()])]);
    let report = import_csv(csv.as_bytes(), &config).unwrap();
    let record = &report.records[0];
    assert_approx_eq(record.entry_price, 1.2, 1e-12);
    assert_approx_eq(record.pnl().unwrap(), -12.5, 1e-12);
    assert_eq!(record.result(), TradeResult::Loss);
}

#[rstest]
fn test_trim_setting_controls_text_cells() {
    let csv = "Date,Direction,Entry,Stop,Target,Size,Setup\n\
               2024-03-04, Long , 1.1 ,1.09,1.12,1,  breakout  \n";

    let trimmed = import_csv(csv.as_bytes(), &ImportConfig::default()).unwrap();
    let strategy = trimmed.records[0].strategy_id.as_ref().map(|s| s.as_str());
    assert_eq!(strategy, Some("breakout"));

    let config = ImportConfig {
        trim: false,
        ..ImportConfig::default()
    };
    let verbatim = import_csv(csv.as_bytes(), &config).unwrap();
    assert!(verbatim.skipped.is_empty(), "{:?}", verbatim.skipped);
    let strategy = verbatim.records[0].strategy_id.as_ref().map(|s| s.as_str());
    assert_eq!(strategy, Some("  breakout  "));
    assert_approx_eq(verbatim.records[0].entry_price, 1.1, 1e-12);
}

#[rstest]
fn test_european_and_coded_amounts() {
    let csv = "Date;Direction;Entry;Stop;Target;Size;PnL\n\
               2024-03-04;Long;1.100,50;1.090,00;1.120,00;1;EUR 1.234,56\n\
               2024-03-05;Short;1.100,50;1.110,00;1.090,00;1;-12.50 EUR\n";
    let config = ImportConfig {
        delimiter: ";".to_string(),
        ..ImportConfig::default()
    };
    let report = import_csv(csv.as_bytes(), &config).unwrap();

    assert!(report.skipped.is_empty(), "{:?}", report.skipped);
    assert_approx_eq(report.records[0].entry_price, 1100.5, 1e-9);
    assert_approx_eq(report.records[0].pnl().unwrap(), 1234.56, 1e-9);
    assert_approx_eq(report.records[1].pnl().unwrap(), -12.5, 1e-9);
}

#[rstest]
fn test_missing_required_columns() {
    let result = import_csv("Date,Profit\n2024-01-01,5\n".as_bytes(), &ImportConfig::default());
    assert_err_matches!(result, ImportError::MissingColumns(_));
}

#[rstest]
fn test_empty_input_has_no_header() {
    let result = import_csv("".as_bytes(), &ImportConfig::default());
    assert_err_matches!(result, ImportError::NoHeader);
}

#[rstest]
fn test_invalid_delimiter() {
    let config = ImportConfig {
        delimiter: "||".to_string(),
        ..ImportConfig::default()
    };
    let result = import_csv("a||b\n".as_bytes(), &config);
    assert_err_matches!(result, ImportError::InvalidDelimiter(_));
}

#[rstest]
fn test_detect_columns_reads_header_only(broker_csv: &'static str) {
    let mapping = detect_columns(broker_csv.as_bytes(), &ImportConfig::default()).unwrap();
    assert_eq!(mapping.header(Field::Id), Some("Ticket"));
    assert_eq!(mapping.header(Field::PositionSize), Some("Lots"));
    assert_eq!(mapping.header(Field::Pnl), Some("Profit"));
    assert!(mapping.unmapped_headers().is_empty());
}

#[rstest]
fn test_load_json(journal_json: &'static str) {
    let records = load_json(journal_json.as_bytes()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].pnl(), Some(100.0));
    assert_eq!(records[1].outcome, TradeOutcome::Ongoing);
    assert_eq!(records[1].session, None);
}

#[rstest]
fn test_load_json_reports_invalid_index() {
    let json = r#"[
        {"id": "ok", "date": "2024-01-01", "direction": "Long",
         "entryPrice": 1.0, "stopLoss": 0.9, "takeProfit": 1.2, "positionSize": 1.0},
        {"id": "bad", "date": "2024-01-01", "direction": "Long",
         "entryPrice": 0.0, "stopLoss": 0.9, "takeProfit": 1.2, "positionSize": 1.0}
    ]"#;
    let err = load_json(json.as_bytes()).unwrap_err();
    assert_error_contains(&err, "index 1");
    assert!(matches!(err, ImportError::InvalidDocument { index: 1, .. }));
}

#[rstest]
fn test_load_json_rejects_malformed() {
    assert_err_matches!(load_json("{not json".as_bytes()), ImportError::Json(_));
}

#[rstest]
#[case::json(".json", 2)]
#[case::csv(".csv", 4)]
fn test_load_file_dispatches_on_extension(
    broker_csv: &'static str,
    journal_json: &'static str,
    #[case] suffix: &str,
    #[case] expected: usize,
) {
    let contents = if suffix == ".json" { journal_json } else { broker_csv };
    let file = temp_file_with(contents, suffix).unwrap();

    let report = load_file(file.path(), &ImportConfig::default()).unwrap();
    assert_eq!(report.records.len(), expected);
    assert_eq!(report.mapping.is_some(), suffix == ".csv");
}

#[rstest]
fn test_load_file_missing_path() {
    let result = load_file(
        std::path::Path::new("/nonexistent/journal.csv"),
        &ImportConfig::default(),
    );
    assert_err_matches!(result, ImportError::Io(_));
}
