use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use chrono::NaiveDate;
use dashboard::{
    partitions::{date_partitions, fetch_partitions},
    DashboardError, QuerySource, Table,
};
use query_api::apis::Error as QueryApiError;
use serde_json::json;

/// Answers with one row per request and fails for the listed dates.
/// Later dates answer faster so completion order differs from request order.
struct FakeSource {
    failing: HashSet<String>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    requests: Mutex<Vec<Vec<(String, String)>>>,
}

impl FakeSource {
    fn new(failing: &[&str]) -> Self {
        Self {
            failing: failing.iter().map(|d| d.to_string()).collect(),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl QuerySource for FakeSource {
    async fn fetch_table(
        &self,
        query_id: &str,
        params: &[(String, String)],
    ) -> Result<Table, DashboardError> {
        assert_eq!(query_id, "daily-stake");
        self.requests.lock().unwrap().push(params.to_vec());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let date = params
            .iter()
            .find(|(name, _)| name == "block_date")
            .map(|(_, value)| value.clone())
            .unwrap();
        let day: u64 = date[8..].parse().unwrap();
        tokio::time::sleep(Duration::from_millis(40 - day * 5)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(&date) {
            return Err(QueryApiError::ResponseError {
                status: 500,
                body: "boom".to_string(),
            }
            .into());
        }
        Ok(Table::from_rows(
            vec!["block_date".to_string(), "stake".to_string()],
            vec![vec![json!(date), json!(day * 10)]],
        )
        .unwrap())
    }
}

fn dates() -> Vec<NaiveDate> {
    date_partitions(
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2023, 1, 6).unwrap(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_partitions_are_stacked_in_date_order() {
    let source = FakeSource::new(&[]);
    let base = vec![("chain".to_string(), "solana".to_string())];
    let report = fetch_partitions(&source, "daily-stake", "block_date", &base, &dates(), 3).await;

    assert!(report.is_complete());
    assert_eq!(report.succeeded, dates());
    assert_eq!(
        report.table.column("block_date").unwrap(),
        vec![
            &json!("2023-01-01"),
            &json!("2023-01-02"),
            &json!("2023-01-03"),
            &json!("2023-01-04"),
            &json!("2023-01-05"),
            &json!("2023-01-06"),
        ]
    );
    for params in source.requests.lock().unwrap().iter() {
        assert_eq!(params[0], ("chain".to_string(), "solana".to_string()));
        assert_eq!(params[1].0, "block_date");
    }
}

#[tokio::test]
async fn test_concurrency_is_bounded() {
    let source = FakeSource::new(&[]);
    let report = fetch_partitions(&source, "daily-stake", "block_date", &[], &dates(), 2).await;
    assert_eq!(report.table.len(), 6);
    assert!(source.max_in_flight.load(Ordering::SeqCst) <= 2);
    assert_eq!(source.requests.lock().unwrap().len(), 6);

    // Zero is treated as sequential.
    let source = FakeSource::new(&[]);
    let report = fetch_partitions(&source, "daily-stake", "block_date", &[], &dates(), 0).await;
    assert_eq!(report.table.len(), 6);
    assert_eq!(source.max_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_partitions_are_recorded_and_skipped() {
    let source = FakeSource::new(&["2023-01-04", "2023-01-02"]);
    let report = fetch_partitions(&source, "daily-stake", "block_date", &[], &dates(), 4).await;

    assert!(!report.is_complete());
    let failed: Vec<String> = report
        .failures
        .iter()
        .map(|failure| failure.date.to_string())
        .collect();
    assert_eq!(failed, vec!["2023-01-02", "2023-01-04"]);
    assert!(report.failures[0].error.is_retryable());
    assert_eq!(report.table.len(), 4);
    assert_eq!(
        report.table.column("stake").unwrap(),
        vec![&json!(10), &json!(30), &json!(50), &json!(60)]
    );
}

#[tokio::test]
async fn test_no_dates() {
    let source = FakeSource::new(&[]);
    let report = fetch_partitions(&source, "daily-stake", "block_date", &[], &[], 4).await;
    assert!(report.is_complete());
    assert!(report.table.is_empty());
    assert!(source.requests.lock().unwrap().is_empty());
}
