use tracing::{debug, trace};

use super::{configuration::Configuration, Error};
use crate::models::{infer_columns, QueryResults, QueryResultsResponse, QueryStatus};

/// `GET {base_path}/queries/{query_id}/results`
///
/// `params` are forwarded as query-string parameters, e.g. a partition date.
pub async fn get_query_results(
    configuration: &Configuration,
    query_id: &str,
    params: &[(String, String)],
) -> Result<QueryResults, Error> {
    let url = configuration.build_url(&["queries", query_id, "results"], params)?;
    debug!(
        "GET {}/queries/{}/results ({} params)",
        configuration.base_path,
        query_id,
        params.len()
    );

    let mut request = configuration
        .client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json");
    if let Some(user_agent) = &configuration.user_agent {
        request = request.header(reqwest::header::USER_AGENT, user_agent);
    }

    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    trace!("query {} responded {} ({} bytes)", query_id, status, body.len());

    if !status.is_success() {
        return Err(Error::ResponseError {
            status: status.as_u16(),
            body,
        });
    }
    parse_query_results(query_id, &body)
}

/// Parses a results body into rows, mapping envelope statuses to errors.
///
/// An object carrying neither `status` nor `rows` is not a results
/// envelope and is reported as a failed query.
pub fn parse_query_results(query_id: &str, body: &str) -> Result<QueryResults, Error> {
    let response: QueryResultsResponse = serde_json::from_str(body)?;
    match response {
        QueryResultsResponse::Envelope(envelope)
            if envelope.status.is_none() && envelope.rows.is_none() =>
        {
            Err(Error::QueryFailed(envelope.error.unwrap_or_else(|| {
                format!("unrecognised results response for query {}", query_id)
            })))
        }
        QueryResultsResponse::Rows(rows) => Ok(QueryResults {
            query_id: query_id.to_string(),
            columns: infer_columns(&rows),
            rows,
        }),
        QueryResultsResponse::Envelope(envelope) => {
            let status = envelope
                .status
                .as_deref()
                .map(QueryStatus::from)
                .unwrap_or(QueryStatus::Finished);
            match status {
                QueryStatus::Finished => {
                    let rows = envelope.rows.unwrap_or_default();
                    let columns = envelope.columns.unwrap_or_else(|| infer_columns(&rows));
                    Ok(QueryResults {
                        query_id: envelope.query_id.unwrap_or_else(|| query_id.to_string()),
                        columns,
                        rows,
                    })
                }
                QueryStatus::Pending | QueryStatus::Running => Err(Error::NotReady {
                    status: envelope.status.unwrap_or_default(),
                }),
                QueryStatus::Failed => Err(Error::QueryFailed(
                    envelope
                        .error
                        .unwrap_or_else(|| format!("query {} failed", query_id)),
                )),
                QueryStatus::Other(other) => Err(Error::QueryFailed(format!(
                    "unexpected status `{}` for query {}",
                    other, query_id
                ))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_rows() {
        let body = r#"[{"day":"2023-01-01","tx_count":10},{"day":"2023-01-02","tx_count":12,"fees":1.5}]"#;
        let results = parse_query_results("q1", body).unwrap();
        assert_eq!(results.query_id, "q1");
        assert_eq!(results.columns, vec!["day", "tx_count", "fees"]);
        assert_eq!(results.len(), 2);
        assert_eq!(results.rows[1]["fees"], 1.5);
    }

    #[test]
    fn test_parse_envelope() {
        let body = r#"{"queryId":"abc","status":"finished","columns":["tx_count","day"],"rows":[{"day":"2023-01-01","tx_count":1}]}"#;
        let results = parse_query_results("q1", body).unwrap();
        assert_eq!(results.query_id, "abc");
        assert_eq!(results.columns, vec!["tx_count", "day"]);
        assert_eq!(results.rows.len(), 1);
    }

    #[test]
    fn test_parse_envelope_statuses() {
        let running = parse_query_results("q", r#"{"status":"running"}"#).unwrap_err();
        assert!(matches!(running, Error::NotReady { .. }));
        assert!(running.is_retryable());

        let failed =
            parse_query_results("q", r#"{"status":"failed","error":"syntax error"}"#).unwrap_err();
        assert!(matches!(failed, Error::QueryFailed(ref m) if m == "syntax error"));
        assert!(!failed.is_retryable());

        let empty = parse_query_results("q", r#"{"status":"finished"}"#).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_parse_invalid_body() {
        let err = parse_query_results("q", "<html>").unwrap_err();
        assert!(matches!(err, Error::Serde(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_response_error_retryability() {
        let server = Error::ResponseError {
            status: 503,
            body: String::new(),
        };
        let throttled = Error::ResponseError {
            status: 429,
            body: String::new(),
        };
        let not_found = Error::ResponseError {
            status: 404,
            body: String::new(),
        };
        assert!(server.is_retryable());
        assert!(throttled.is_retryable());
        assert!(!not_found.is_retryable());
    }

    #[test]
    fn test_parse_object_without_rows_or_status() {
        let err = parse_query_results("q", r#"{"result":[{"day":"2023-01-01","tx":1}]}"#)
            .unwrap_err();
        assert!(matches!(err, Error::QueryFailed(ref m) if m.contains("query q")));
        assert!(!err.is_retryable());

        let err = parse_query_results("q", r#"{"message":"rate limited"}"#).unwrap_err();
        assert!(matches!(err, Error::QueryFailed(_)));

        let err = parse_query_results("q", r#"{"error":"quota exceeded"}"#).unwrap_err();
        assert!(matches!(err, Error::QueryFailed(ref m) if m == "quota exceeded"));

        let rows_only = parse_query_results("q", r#"{"rows":[{"tx":1}]}"#).unwrap();
        assert_eq!(rows_only.columns, vec!["tx"]);
    }
}
