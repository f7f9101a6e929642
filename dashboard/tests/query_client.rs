use chrono::NaiveDate;
use dashboard::{
    cli::{FetchArgs, OutputArgs, OutputFormat, QueryApiArgs, ReportArgs},
    commands::{fetch_query, render_table, report},
    metrics::Metric,
    partitions::{date_partitions, fetch_partitions},
    settings::QueryDefinition,
    DashboardError, QueryClient, QuerySource, RetryConfig,
};
use query_api::apis::{configuration::Configuration, Error as QueryApiError};
use serde_json::json;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn client(url: String, num_retries: u32) -> QueryClient {
    let configuration = Configuration {
        client: reqwest::Client::builder().no_proxy().build().unwrap(),
        ..Configuration::new(url)
    };
    QueryClient::new(
        configuration,
        RetryConfig {
            num_retries,
            delay_ms: 1,
            max_delay_ms: 4,
        },
    )
}

fn rows(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/json")
}

fn fetch_args(query: &str) -> FetchArgs {
    FetchArgs {
        query: query.to_string(),
        params: vec![],
        date_column: None,
        from: None,
        to: None,
        api: QueryApiArgs::default(),
        output: OutputArgs::default(),
    }
}

const DAILY: &str = r#"[
    {"day": "2023-01-01", "value": 4},
    {"day": "2023-01-02", "value": 6},
    {"day": "2023-01-03", "value": 10}
]"#;

#[tokio::test]
async fn test_retries_until_results_are_ready() {
    let mock_server = MockServer::start().await;
    let results = || {
        Mock::given(method("GET"))
            .and(path("/queries/q1/results"))
            .and(query_param("api-key", "k1"))
            .and(query_param("chain", "solana"))
    };
    results()
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    results()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "running" })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    results()
        .respond_with(rows(DAILY))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = client(format!("{}?api-key=k1", mock_server.uri()), 5);

    let table = client
        .fetch_table("q1", &[("chain".to_string(), "solana".to_string())])
        .await
        .unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(table.columns(), &["day", "value"]);
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/queries/missing/results"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such query"))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = client(mock_server.uri(), 5);

    let err = client.fetch_table("missing", &[]).await.unwrap_err();
    match err {
        DashboardError::QueryApi(QueryApiError::ResponseError { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "no such query");
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_query_is_not_retried() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/queries/q/results"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "failed",
            "error": "division by zero"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client(mock_server.uri(), 5)
        .fetch_table("q", &[])
        .await
        .unwrap_err();
    match err {
        DashboardError::QueryApi(QueryApiError::QueryFailed(message)) => {
            assert_eq!(message, "division by zero")
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_partitions_send_one_request_per_date() {
    let mock_server = MockServer::start().await;
    for (date, value) in [("2023-01-01", 4), ("2023-01-02", 6)] {
        Mock::given(method("GET"))
            .and(path("/queries/staking/results"))
            .and(query_param("api-key", "k2"))
            .and(query_param("validator", "all"))
            .and(query_param("day", date))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "day": date, "value": value }])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/queries/staking/results"))
        .and(query_param("day", "2023-01-03"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad partition"))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = client(format!("{}?api-key=k2", mock_server.uri()), 2);

    let dates = date_partitions(
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2023, 1, 3).unwrap(),
    )
    .unwrap();
    let base_params = vec![("validator".to_string(), "all".to_string())];
    let report = fetch_partitions(&client, "staking", "day", &base_params, &dates, 2).await;

    assert_eq!(report.succeeded.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].date, dates[2]);
    assert_eq!(report.table.column("value").unwrap(), vec![&json!(4), &json!(6)]);
}

#[tokio::test]
async fn test_fetch_query_applies_catalogue_and_date_window() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/queries/777/results"))
        .and(query_param("window", "30d"))
        .respond_with(rows(DAILY))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = client(mock_server.uri(), 1);
    let definition = QueryDefinition {
        id: "777".to_string(),
        date_column: Some("day".to_string()),
        partition_param: None,
        params: [("window".to_string(), "30d".to_string())].into_iter().collect(),
    };
    let args = FetchArgs {
        from: NaiveDate::from_ymd_opt(2023, 1, 2),
        ..fetch_args("daily")
    };

    let table = fetch_query(&client, &definition, &args).await.unwrap();
    assert_eq!(table.column("value").unwrap(), vec![&json!(6), &json!(10)]);
}

#[tokio::test]
async fn test_report_renders_csv_and_json() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/queries/daily/results"))
        .respond_with(rows(DAILY))
        .mount(&mock_server)
        .await;
    let client = client(mock_server.uri(), 1);
    let definition = QueryDefinition {
        id: "daily".to_string(),
        ..Default::default()
    };
    let args = ReportArgs {
        fetch: fetch_args("daily"),
        metric: Metric::DailyActivity,
        category_column: "category".to_string(),
        value_column: "value".to_string(),
    };

    let table = report(&client, &definition, &args).await.unwrap();
    assert_eq!(
        render_table(&table, OutputFormat::Csv).unwrap(),
        "day,value,cumulative_value\r\n2023-01-01,4,4\r\n2023-01-02,6,10\r\n2023-01-03,10,20\r\n"
    );
    let rendered = render_table(&table, OutputFormat::Json).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(
        parsed[2],
        json!({ "day": "2023-01-03", "value": 10, "cumulative_value": 20 })
    );
}
