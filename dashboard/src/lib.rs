//! Hosted analytics query results, reshaped into dashboard tables, plus
//! decoding of token-installer program accounts.

pub mod accounts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod partitions;
pub mod query_client;
pub mod settings;
pub mod table;
pub mod telemetry;

pub use config::DashboardConfig;
pub use errors::DashboardError;
pub use query_client::{QueryClient, QuerySource, RetryConfig};
pub use table::Table;
