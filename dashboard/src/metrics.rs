//! Derived tables behind the dashboard pages.
//!
//! Every derivation takes a raw query result and the names of the columns
//! it reads, and returns a new table. Dates are normalised to `YYYY-MM-DD`
//! before grouping so that datetime columns bucket by day.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde_json::Value;

use crate::table::{parse_date, Agg, Table, TableError};

/// Column names read by the derivations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricColumns {
    pub date: String,
    /// Grouping column: category, collection or holder depending on the metric.
    pub category: String,
    pub value: String,
}

impl Default for MetricColumns {
    fn default() -> Self {
        Self {
            date: "day".to_string(),
            category: "category".to_string(),
            value: "value".to_string(),
        }
    }
}

pub fn cumulative_name(column: &str) -> String {
    format!("cumulative_{}", column)
}

/// Replaces datetime strings in `column` with their date. Values that are
/// not dates are left untouched.
pub fn normalize_dates(table: &Table, column: &str) -> Result<Table, TableError> {
    table.map_column(column, |value| match parse_date(value) {
        Some(date) => Value::String(date.format("%Y-%m-%d").to_string()),
        None => value.clone(),
    })
}

/// Per-day total of `value` with a running total alongside.
///
/// Columns: `date`, `value`, `cumulative_<value>`.
pub fn daily_activity(table: &Table, date: &str, value: &str) -> Result<Table, TableError> {
    normalize_dates(table, date)?
        .group_by(&[date], &[Agg::Sum.of(value)])?
        .cumulative_sum(value, &cumulative_name(value))
}

/// Share of each category in the daily total, in percent.
///
/// Columns: `date`, then one column per category.
pub fn category_share_by_day(
    table: &Table,
    date: &str,
    category: &str,
    value: &str,
) -> Result<Table, TableError> {
    let wide = normalize_dates(table, date)?.pivot(date, category, value)?;
    let categories: Vec<String> = wide.columns()[1..].to_vec();
    let categories: Vec<&str> = categories.iter().map(String::as_str).collect();
    wide.row_share(&categories)
}

/// Per-day fee summary.
///
/// Columns: `date`, `tx_count`, `total_fees`, `mean_fee`, `min_fee`, `max_fee`.
pub fn fee_statistics(table: &Table, date: &str, fee: &str) -> Result<Table, TableError> {
    normalize_dates(table, date)?.group_by(
        &[date],
        &[
            Agg::Count.of(fee).named("tx_count"),
            Agg::Sum.of(fee).named("total_fees"),
            Agg::Mean.of(fee).named("mean_fee"),
            Agg::Min.of(fee).named("min_fee"),
            Agg::Max.of(fee).named("max_fee"),
        ],
    )
}

/// Sales volume per collection, largest first.
///
/// Columns: `collection`, `volume`, `sales`, `volume_share`.
pub fn nft_sales_by_collection(
    table: &Table,
    collection: &str,
    price: &str,
) -> Result<Table, TableError> {
    table
        .group_by(
            &[collection],
            &[
                Agg::Sum.of(price).named("volume"),
                Agg::Count.of(price).named("sales"),
            ],
        )?
        .percentage_of_total("volume", "volume_share")?
        .sort_by("volume", true)
}

/// Staked balance per holder with its share of the total, largest first.
///
/// Columns: `holder`, `balance`, `share`.
pub fn staking_balances(table: &Table, holder: &str, balance: &str) -> Result<Table, TableError> {
    table
        .group_by(&[holder], &[Agg::Sum.of(balance).named("balance")])?
        .percentage_of_total("balance", "share")?
        .sort_by("balance", true)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    DailyActivity,
    CategoryShare,
    FeeStatistics,
    NftSales,
    StakingBalances,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::DailyActivity,
        Metric::CategoryShare,
        Metric::FeeStatistics,
        Metric::NftSales,
        Metric::StakingBalances,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::DailyActivity => "daily-activity",
            Metric::CategoryShare => "category-share",
            Metric::FeeStatistics => "fee-statistics",
            Metric::NftSales => "nft-sales",
            Metric::StakingBalances => "staking-balances",
        }
    }

    pub fn derive(&self, table: &Table, columns: &MetricColumns) -> Result<Table, TableError> {
        match self {
            Metric::DailyActivity => daily_activity(table, &columns.date, &columns.value),
            Metric::CategoryShare => {
                category_share_by_day(table, &columns.date, &columns.category, &columns.value)
            }
            Metric::FeeStatistics => fee_statistics(table, &columns.date, &columns.value),
            Metric::NftSales => nft_sales_by_collection(table, &columns.category, &columns.value),
            Metric::StakingBalances => staking_balances(table, &columns.category, &columns.value),
        }
    }

    /// Whether the derivation buckets rows by date.
    pub fn is_daily(&self) -> bool {
        matches!(
            self,
            Metric::DailyActivity | Metric::CategoryShare | Metric::FeeStatistics
        )
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Metric::ALL
            .into_iter()
            .find(|metric| metric.name() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown metric `{}`, expected one of: {}",
                    s,
                    Metric::ALL.map(|m| m.name()).join(", ")
                )
            })
    }
}
