// File: crates/stockchart-core/src/series.rs
// Summary: Input series models (performance percentages, monthly revenue + YoY) and value parsing.
// Notes:
// - Points are plain value objects owned by the caller; order is chronological and
//   defines the x position.

use crate::error::{ChartError, ChartResult};

/// Revenue is reported in thousands of NT$; one 億 is 100 000 of those.
pub const THOUSANDS_PER_HUNDRED_MILLION: f64 = 100_000.0;

/// One cumulative-performance sample, e.g. `{"2025/01", "2025/01", "+3.25%"}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PerformancePoint {
    pub period: String,
    pub period_label: String,
    pub performance_percent: String,
}

impl PerformancePoint {
    pub fn new(period: impl Into<String>, period_label: impl Into<String>, performance_percent: impl Into<String>) -> Self {
        Self {
            period: period.into(),
            period_label: period_label.into(),
            performance_percent: performance_percent.into(),
        }
    }

    /// Parse `performance_percent` (`"+3.25%"`, `"-1.5"`) into a finite number.
    pub fn value(&self) -> Option<f64> {
        parse_percent(&self.performance_percent)
    }
}

/// One month of revenue data.
#[derive(Clone, Debug, PartialEq)]
pub struct RevenuePoint {
    pub period: String,
    pub period_label: String,
    /// Monthly revenue in thousands of NT$.
    pub monthly_revenue: i64,
    pub yoy_growth_percent: f64,
    pub stock_price: f64,
    /// Same across the whole series: copied from the last month for the header block.
    pub latest_revenue: i64,
    pub latest_yoy: f64,
}

impl RevenuePoint {
    /// Build a series from parallel columns. Missing column entries become zero and the
    /// latest revenue/YoY are taken from the last available entries.
    pub fn series_from_columns(periods: &[String], revenues: &[i64], yoys: &[f64], prices: &[f64]) -> Vec<RevenuePoint> {
        let latest_revenue = revenues.last().copied().unwrap_or(0);
        let latest_yoy = yoys.last().copied().unwrap_or(0.0);
        periods
            .iter()
            .enumerate()
            .map(|(i, period)| RevenuePoint {
                period: period.clone(),
                period_label: period.clone(),
                monthly_revenue: revenues.get(i).copied().unwrap_or(0),
                yoy_growth_percent: yoys.get(i).copied().unwrap_or(0.0),
                stock_price: prices.get(i).copied().unwrap_or(0.0),
                latest_revenue,
                latest_yoy,
            })
            .collect()
    }
}

/// Strip whitespace and one trailing `%`, then parse. Non-finite results are rejected.
pub fn parse_percent(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse every performance point, failing on the first bad one.
pub(crate) fn performance_values(data: &[PerformancePoint]) -> ChartResult<Vec<f64>> {
    if data.is_empty() {
        return Err(ChartError::EmptySeries);
    }
    data.iter()
        .enumerate()
        .map(|(i, p)| p.value().ok_or_else(|| ChartError::invalid_data(i, p.performance_percent.clone())))
        .collect()
}

/// Revenue bars and YoY line values, validated.
pub(crate) fn revenue_values(data: &[RevenuePoint]) -> ChartResult<(Vec<f64>, Vec<f64>)> {
    if data.is_empty() {
        return Err(ChartError::EmptySeries);
    }
    let mut revenue = Vec::with_capacity(data.len());
    let mut yoy = Vec::with_capacity(data.len());
    for (i, p) in data.iter().enumerate() {
        if !p.yoy_growth_percent.is_finite() {
            return Err(ChartError::invalid_data(i, p.yoy_growth_percent.to_string()));
        }
        revenue.push(p.monthly_revenue as f64);
        yoy.push(p.yoy_growth_percent);
    }
    Ok((revenue, yoy))
}
