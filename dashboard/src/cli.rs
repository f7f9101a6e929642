use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{accounts::AccountKind, metrics::Metric};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Query catalogue and defaults. Defaults to `dashboard.toml` next to the
    /// binary or in the working directory.
    #[arg(long, global = true, env = "DASHBOARD_CONFIG")]
    pub config: Option<String>,

    /// Directory for hourly rolling log files.
    #[arg(long, global = true, env = "DASHBOARD_LOG_DIR")]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[allow(clippy::large_enum_variant)]
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the results of a hosted query.
    Fetch(FetchArgs),
    /// Fetch a query and derive a dashboard metric from it.
    Report(ReportArgs),
    /// Fetch one result set per day and stack them.
    Partitions(PartitionsArgs),
    /// Fetch and decode an installer program account.
    Account(AccountArgs),
    /// Decode base64 account or instruction data.
    Decode(DecodeArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Args, Clone, Debug, Default)]
pub struct QueryApiArgs {
    /// Base URL of the results API. An `api-key` query parameter is honoured.
    #[arg(long, env = "DASHBOARD_QUERY_API_URL")]
    pub query_api_url: Option<String>,

    #[arg(long, env = "DASHBOARD_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "DASHBOARD_NUM_RETRIES")]
    pub num_retries: Option<u32>,

    #[arg(long, env = "DASHBOARD_DELAY_MS")]
    pub delay_ms: Option<u64>,

    #[arg(long, env = "DASHBOARD_MAX_DELAY_MS")]
    pub max_delay_ms: Option<u64>,
}

#[derive(Args, Clone, Debug, Default)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Write to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<String>,
}

#[derive(Parser, Clone, Debug)]
pub struct FetchArgs {
    /// Catalogue name or raw query id.
    pub query: String,

    /// Extra query parameter, `name=value`. Repeatable.
    #[arg(long = "param", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Column used for `--from`/`--to`; defaults to the catalogue entry.
    #[arg(long)]
    pub date_column: Option<String>,

    #[arg(long)]
    pub from: Option<NaiveDate>,

    #[arg(long)]
    pub to: Option<NaiveDate>,

    #[command(flatten)]
    pub api: QueryApiArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Clone, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,

    #[arg(long)]
    pub metric: Metric,

    /// Grouping column for category, collection or holder metrics.
    #[arg(long, default_value = "category")]
    pub category_column: String,

    #[arg(long, default_value = "value")]
    pub value_column: String,
}

#[derive(Parser, Clone, Debug)]
pub struct PartitionsArgs {
    /// Catalogue name or raw query id.
    pub query: String,

    #[arg(long)]
    pub start: NaiveDate,

    #[arg(long)]
    pub end: NaiveDate,

    /// Query parameter carrying the partition date; defaults to the
    /// catalogue entry, then `date`.
    #[arg(long)]
    pub partition_param: Option<String>,

    #[arg(long = "param", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    #[arg(long, env = "DASHBOARD_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Exit with an error if any partition failed.
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub api: QueryApiArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Clone, Debug)]
pub struct AccountArgs {
    /// installation, registry or receipt.
    pub kind: AccountKind,

    pub address: String,

    /// RPC endpoint or network name (mainnet, devnet, testnet, localnet).
    #[arg(long, env = "DASHBOARD_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Expected owner; defaults to the installer program.
    #[arg(long)]
    pub program_id: Option<String>,
}

#[derive(Parser, Clone, Debug)]
pub struct DecodeArgs {
    /// Base64 encoded account or instruction data.
    pub data: String,

    /// Account type; detected from the discriminator when omitted.
    #[arg(long, conflicts_with = "instruction")]
    pub kind: Option<AccountKind>,

    /// Decode instruction data instead of account data.
    #[arg(long)]
    pub instruction: bool,
}

pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected `name=value`, got `{}`", s)),
    }
}
