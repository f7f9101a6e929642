use std::time::Duration;

use async_trait::async_trait;
use query_api::{
    apis::{configuration::Configuration, default_api, Error as QueryApiError},
    models::QueryResults,
};
use tracing::{debug, error, trace, warn};

use crate::{errors::DashboardError, table::Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    pub num_retries: u32,
    pub delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            num_retries: 10,
            delay_ms: 400,
            max_delay_ms: 8000,
        }
    }
}

/// Anything that can produce a table for a hosted query.
#[async_trait]
pub trait QuerySource: Send + Sync {
    async fn fetch_table(
        &self,
        query_id: &str,
        params: &[(String, String)],
    ) -> Result<Table, DashboardError>;
}

/// Results client with exponential backoff on retryable failures.
#[derive(Debug, Clone)]
pub struct QueryClient {
    configuration: Configuration,
    retry_config: RetryConfig,
}

impl QueryClient {
    pub fn new(configuration: Configuration, retry_config: RetryConfig) -> Self {
        Self {
            configuration,
            retry_config,
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub async fn get_results(
        &self,
        query_id: &str,
        params: &[(String, String)],
    ) -> Result<QueryResults, QueryApiError> {
        retry(self.retry_config, || {
            default_api::get_query_results(&self.configuration, query_id, params)
        })
        .await
    }
}

#[async_trait]
impl QuerySource for QueryClient {
    async fn fetch_table(
        &self,
        query_id: &str,
        params: &[(String, String)],
    ) -> Result<Table, DashboardError> {
        let results = self.get_results(query_id, params).await?;
        debug!(
            "query {} returned {} rows, {} columns",
            query_id,
            results.len(),
            results.columns.len()
        );
        Ok(Table::from_query_results(&results)?)
    }
}

/// Runs `operation` until it succeeds, fails with a non-retryable error, or
/// `num_retries` attempts have been made. The delay doubles after every
/// failed attempt up to `max_delay_ms`.
pub async fn retry<F, Fut, T>(config: RetryConfig, mut operation: F) -> Result<T, QueryApiError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, QueryApiError>>,
{
    let max_retries = config.num_retries.max(1);
    let mut attempts = 0;
    let mut delay_ms = config.delay_ms;

    loop {
        attempts += 1;
        trace!("Attempt {}/{}: Executing operation", attempts, max_retries);

        match operation().await {
            Ok(value) => {
                trace!("Attempt {}/{}: Operation succeeded.", attempts, max_retries);
                return Ok(value);
            }
            Err(e) => {
                let is_retryable = e.is_retryable();
                if is_retryable && attempts < max_retries {
                    warn!(
                        "Attempt {}/{}: {}. Retrying in {}ms",
                        attempts, max_retries, e, delay_ms
                    );
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    delay_ms = std::cmp::min(delay_ms.saturating_mul(2), config.max_delay_ms);
                } else {
                    if is_retryable {
                        error!("Operation failed after max retries: {}", e);
                    } else {
                        error!("Operation failed with non-retryable error: {}", e);
                    }
                    return Err(e);
                }
            }
        }
    }
}
