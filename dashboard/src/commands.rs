use std::{fs::File, io::Write};

use installer_client::rpc::SolanaRpc;
use serde_json::Value;
use solana_program::pubkey::Pubkey;
use tracing::{info, warn};

use crate::{
    accounts::{decode_base64_account, decode_base64_instruction, fetch_account_json},
    cli::{
        AccountArgs, Cli, Commands, DecodeArgs, FetchArgs, OutputArgs, OutputFormat,
        PartitionsArgs, ReportArgs,
    },
    config::{resolve_program_id, resolve_rpc_url, DashboardConfig, DEFAULT_PARTITION_PARAM},
    errors::{ConfigError, DashboardError},
    metrics::MetricColumns,
    partitions::{date_partitions, fetch_partitions},
    query_client::{QueryClient, QuerySource},
    settings::{load_settings, QueryDefinition},
    table::Table,
};

pub const DEFAULT_DATE_COLUMN: &str = "day";

pub async fn run(cli: Cli) -> Result<(), DashboardError> {
    let settings = load_settings(cli.config.as_deref())?;
    match cli.command {
        Commands::Fetch(args) => {
            let config = DashboardConfig::new(&args.api, settings)?;
            let client = QueryClient::new(config.query_api.clone(), config.retry_config);
            let definition = config.resolve_query(&args.query);
            let table = fetch_query(&client, &definition, &args).await?;
            write_table(&table, &args.output)
        }
        Commands::Report(args) => {
            let config = DashboardConfig::new(&args.fetch.api, settings)?;
            let client = QueryClient::new(config.query_api.clone(), config.retry_config);
            let definition = config.resolve_query(&args.fetch.query);
            let table = report(&client, &definition, &args).await?;
            write_table(&table, &args.fetch.output)
        }
        Commands::Partitions(args) => {
            let config =
                DashboardConfig::new(&args.api, settings)?.with_concurrency(args.concurrency)?;
            let client = QueryClient::new(config.query_api.clone(), config.retry_config);
            let definition = config.resolve_query(&args.query);
            let table = partitions(&client, &definition, &args, config.concurrency).await?;
            write_table(&table, &args.output)
        }
        Commands::Account(args) => {
            let url = resolve_rpc_url(args.rpc_url.as_deref(), &settings);
            info!("Using RPC {}", url);
            let rpc = SolanaRpc::new(url, None);
            let json = account(&rpc, &args).await?;
            write_json(&json, None)
        }
        Commands::Decode(args) => write_json(&decode(&args)?, None),
    }
}

/// Fetches a query and applies the optional date window.
pub async fn fetch_query<S>(
    source: &S,
    definition: &QueryDefinition,
    args: &FetchArgs,
) -> Result<Table, DashboardError>
where
    S: QuerySource + ?Sized,
{
    let params = definition.request_params(&args.params);
    let table = source.fetch_table(&definition.id, &params).await?;
    info!("query {} returned {} rows", definition.id, table.len());

    if args.from.is_none() && args.to.is_none() {
        return Ok(table);
    }
    let date_column = date_column(definition, args);
    Ok(table.filter_date_range(&date_column, args.from, args.to)?)
}

pub async fn report<S>(
    source: &S,
    definition: &QueryDefinition,
    args: &ReportArgs,
) -> Result<Table, DashboardError>
where
    S: QuerySource + ?Sized,
{
    let table = fetch_query(source, definition, &args.fetch).await?;
    let columns = MetricColumns {
        date: date_column(definition, &args.fetch),
        category: args.category_column.clone(),
        value: args.value_column.clone(),
    };
    info!("deriving {} from {} rows", args.metric, table.len());
    Ok(args.metric.derive(&table, &columns)?)
}

pub async fn partitions<S>(
    source: &S,
    definition: &QueryDefinition,
    args: &PartitionsArgs,
    concurrency: usize,
) -> Result<Table, DashboardError>
where
    S: QuerySource + ?Sized,
{
    let dates = date_partitions(args.start, args.end)?;
    let param = args
        .partition_param
        .clone()
        .or_else(|| definition.partition_param.clone())
        .unwrap_or_else(|| DEFAULT_PARTITION_PARAM.to_string());
    let params = definition.request_params(&args.params);

    let report = fetch_partitions(
        source,
        &definition.id,
        &param,
        &params,
        &dates,
        concurrency,
    )
    .await;
    if !report.is_complete() {
        let failed: Vec<String> = report
            .failures
            .iter()
            .map(|failure| failure.date.to_string())
            .collect();
        warn!(
            "{} of {} partitions failed: {}",
            failed.len(),
            dates.len(),
            failed.join(", ")
        );
        if args.strict {
            return Err(DashboardError::PartitionsFailed {
                failed: failed.len(),
                total: dates.len(),
            });
        }
    }
    Ok(report.table)
}

pub async fn account<R>(rpc: &R, args: &AccountArgs) -> Result<Value, DashboardError>
where
    R: installer_client::rpc::AccountRpc + ?Sized,
{
    let address: Pubkey = args.address.parse().map_err(|_| ConfigError::InvalidValue {
        field: "address",
        invalid_value: args.address.clone(),
    })?;
    let program_id = resolve_program_id(args.program_id.as_deref())?;
    fetch_account_json(rpc, args.kind, &address, &program_id)
        .await?
        .ok_or_else(|| DashboardError::AccountNotFound(address.to_string()))
}

pub fn decode(args: &DecodeArgs) -> Result<Value, DashboardError> {
    if args.instruction {
        return decode_base64_instruction(&args.data);
    }
    let (kind, json) = decode_base64_account(args.kind, &args.data)?;
    Ok(serde_json::json!({ "type": kind.name(), "account": json }))
}

fn date_column(definition: &QueryDefinition, args: &FetchArgs) -> String {
    args.date_column
        .clone()
        .or_else(|| definition.date_column.clone())
        .unwrap_or_else(|| DEFAULT_DATE_COLUMN.to_string())
}

pub fn render_table(table: &Table, format: OutputFormat) -> Result<String, DashboardError> {
    match format {
        OutputFormat::Csv => Ok(table.to_csv()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&table.to_records())? + "\n"),
    }
}

fn write_table(table: &Table, output: &OutputArgs) -> Result<(), DashboardError> {
    let rendered = render_table(table, output.format)?;
    write_output(rendered.as_bytes(), output.output.as_deref())?;
    if let Some(path) = &output.output {
        info!("wrote {} rows to {}", table.len(), path);
    }
    Ok(())
}

fn write_json(value: &Value, path: Option<&str>) -> Result<(), DashboardError> {
    let rendered = serde_json::to_string_pretty(value)? + "\n";
    write_output(rendered.as_bytes(), path)
}

fn write_output(bytes: &[u8], path: Option<&str>) -> Result<(), DashboardError> {
    match path {
        Some(path) => File::create(path)?.write_all(bytes)?,
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(bytes)?;
            lock.flush()?;
        }
    }
    Ok(())
}
