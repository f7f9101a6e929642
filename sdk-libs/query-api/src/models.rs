use serde::{Deserialize, Serialize};

/// One result row, keyed by column name in the order the service returned.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Status reported by the hosting service for a query execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStatus {
    Finished,
    Pending,
    Running,
    Failed,
    Other(String),
}

impl From<&str> for QueryStatus {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "finished" | "success" | "completed" | "query_state_completed" => {
                QueryStatus::Finished
            }
            "pending" | "queued" | "query_state_pending" => QueryStatus::Pending,
            "running" | "executing" | "query_state_executing" => QueryStatus::Running,
            "failed" | "error" | "cancelled" | "query_state_failed" => QueryStatus::Failed,
            other => QueryStatus::Other(other.to_string()),
        }
    }
}

/// Result envelope returned by the results endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResultsEnvelope {
    #[serde(
        rename = "queryId",
        alias = "query_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub query_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(default, alias = "results", skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Row>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The endpoint returns either a bare array of rows or an envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryResultsResponse {
    Rows(Vec<Row>),
    Envelope(QueryResultsEnvelope),
}

/// Rows of a finished query together with the column order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryResults {
    pub query_id: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl QueryResults {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Column names in first-seen order across all rows.
pub fn infer_columns(rows: &[Row]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}
