use installer_client::{ClientError, CodecError};
use query_api::apis::Error as QueryApiError;
use thiserror::Error;

use crate::table::TableError;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Query API error: {0}")]
    QueryApi(#[from] QueryApiError),

    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Account client error: {0}")]
    Client(#[from] ClientError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("{failed} of {total} partitions failed")]
    PartitionsFailed { failed: usize, total: usize },

    #[error("Account {0} not found")]
    AccountNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// Whether a query call may succeed when repeated.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DashboardError::QueryApi(e) if e.is_retryable())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid {field}: {invalid_value}")]
    InvalidValue {
        field: &'static str,
        invalid_value: String,
    },

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),
}
