use chrono::NaiveDate;
use dashboard::{
    metrics::normalize_dates,
    table::{Agg, JoinKind, TableError},
    Table,
};
use query_api::apis::default_api::parse_query_results;
use serde_json::json;

fn table(body: &str) -> Table {
    Table::from_query_results(&parse_query_results("q", body).unwrap()).unwrap()
}

#[test]
fn test_merge_group_and_export() {
    let transactions = table(
        r#"{"status": "finished", "columns": ["day", "program", "tx"], "rows": [
            {"day": "2023-01-01T00:00:00Z", "program": "swap", "tx": 10},
            {"day": "2023-01-01T00:00:00Z", "program": "nft", "tx": 5},
            {"day": "2023-01-02T00:00:00Z", "program": "swap", "tx": 7}
        ]}"#,
    );
    let fees = table(
        r#"[
            {"day": "2023-01-01", "fees_sol": 0.5},
            {"day": "2023-01-03", "fees_sol": 0.25}
        ]"#,
    );

    let daily = normalize_dates(&transactions, "day")
        .unwrap()
        .group_by(&["day"], &[Agg::Sum.of("tx")])
        .unwrap();
    let merged = daily.merge(&fees, &["day"], JoinKind::Outer).unwrap();
    assert_eq!(merged.columns(), &["day", "tx", "fees_sol"]);

    let sorted = merged.sort_by("day", false).unwrap();
    assert_eq!(
        sorted.to_csv(),
        "day,tx,fees_sol\r\n2023-01-01,15,0.5\r\n2023-01-02,7,\r\n2023-01-03,,0.25\r\n"
    );

    let window = sorted
        .filter_date_range("day", NaiveDate::from_ymd_opt(2023, 1, 2), None)
        .unwrap();
    assert_eq!(window.len(), 2);
}

#[test]
fn test_envelope_column_order_is_kept() {
    let t = table(
        r#"{"columns": ["b", "a"], "rows": [{"a": 1, "b": 2}, {"a": 3}]}"#,
    );
    assert_eq!(t.columns(), &["b", "a"]);
    assert_eq!(t.rows(), &[vec![json!(2), json!(1)], vec![json!(null), json!(3)]]);
}

#[test]
fn test_missing_columns_are_reported() {
    let t = table(r#"[{"day": "2023-01-01", "tx": 1}]"#);
    assert_eq!(
        t.group_by(&["program"], &[Agg::Sum.of("tx")]),
        Err(TableError::MissingColumn("program".to_string()))
    );
    assert!(matches!(
        t.pivot("day", "program", "tx"),
        Err(TableError::MissingColumn(_))
    ));
    assert!(matches!(
        t.sort_by("block_time", false),
        Err(TableError::MissingColumn(_))
    ));
}
