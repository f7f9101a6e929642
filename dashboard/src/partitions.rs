use chrono::NaiveDate;
use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::{errors::DashboardError, query_client::QuerySource, table::Table};

pub const PARTITION_DATE_FORMAT: &str = "%Y-%m-%d";

/// Every date from `start` to `end`, both inclusive.
pub fn date_partitions(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, DashboardError> {
    if start > end {
        return Err(DashboardError::InvalidArgument(format!(
            "partition start {} is after end {}",
            start, end
        )));
    }
    Ok(start.iter_days().take_while(|day| *day <= end).collect())
}

#[derive(Debug)]
pub struct PartitionFailure {
    pub date: NaiveDate,
    pub error: DashboardError,
}

#[derive(Debug, Default)]
pub struct PartitionReport {
    /// Successful partitions stacked in date order.
    pub table: Table,
    pub succeeded: Vec<NaiveDate>,
    pub failures: Vec<PartitionFailure>,
}

impl PartitionReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fetches one result set per date with at most `concurrency` requests in
/// flight. Each request carries `base_params` plus `param=<date>`.
///
/// Failed partitions are logged and collected in
/// [`PartitionReport::failures`]; they never abort the others.
pub async fn fetch_partitions<S>(
    source: &S,
    query_id: &str,
    param: &str,
    base_params: &[(String, String)],
    dates: &[NaiveDate],
    concurrency: usize,
) -> PartitionReport
where
    S: QuerySource + ?Sized,
{
    if dates.is_empty() {
        return PartitionReport::default();
    }
    let concurrency = concurrency.max(1);
    info!(
        "Fetching {} partitions of query {} ({} concurrent)",
        dates.len(),
        query_id,
        concurrency
    );

    let requests = dates.iter().copied().map(|date| {
        let mut params = base_params.to_vec();
        params.push((
            param.to_string(),
            date.format(PARTITION_DATE_FORMAT).to_string(),
        ));
        async move {
            let result = source.fetch_table(query_id, &params).await;
            (date, result)
        }
    });

    let results: Vec<(NaiveDate, Result<Table, DashboardError>)> = futures::stream::iter(requests)
        .buffer_unordered(concurrency)
        .collect()
        .await;

    let mut tables = Vec::new();
    let mut failures = Vec::new();
    for (date, result) in results {
        match result {
            Ok(table) => {
                debug!("partition {} returned {} rows", date, table.len());
                tables.push((date, table));
            }
            Err(error) => {
                warn!("partition {} of query {} failed: {}", date, query_id, error);
                failures.push(PartitionFailure { date, error });
            }
        }
    }
    tables.sort_by_key(|(date, _)| *date);
    failures.sort_by_key(|failure| failure.date);

    let succeeded = tables.iter().map(|(date, _)| *date).collect();
    let tables: Vec<Table> = tables.into_iter().map(|(_, table)| table).collect();
    PartitionReport {
        table: Table::concat(&tables),
        succeeded,
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_partitions_inclusive() {
        let start = NaiveDate::from_ymd_opt(2023, 2, 27).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
        let dates = date_partitions(start, end).unwrap();
        assert_eq!(
            dates,
            vec![
                start,
                NaiveDate::from_ymd_opt(2023, 2, 28).unwrap(),
                end
            ]
        );
        assert_eq!(date_partitions(start, start).unwrap(), vec![start]);
        assert!(date_partitions(end, start).is_err());
    }
}
