use crate::config::ReportConfig;
use crate::density::{Curve, NormalDensity};
use crate::record::{DATE_FORMAT, Record, sort_by_date};
use crate::stats::{self, DistributionParams};
use anyhow::{Context, Result};
use serde::Serialize;

/// Everything the rendering boundary consumes: fitted curve, distribution
/// parameters, record count and date range.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub record_count: usize,
    pub parameters: DistributionParams,
    pub curve: Curve,
}

/// Build the report summary from loaded records.
///
/// Records are sorted by date first; the stored order is never trusted.
///
/// # Errors
/// Fails on an empty record sequence and on a zero-variance dataset.
pub fn build_report(mut records: Vec<Record>, cfg: &ReportConfig) -> Result<ReportSummary> {
    sort_by_date(&mut records);

    let values: Vec<f64> = records.iter().map(|record| record.value).collect();
    let params = stats::estimate(&values).context("failed to estimate distribution parameters")?;

    let density =
        NormalDensity::from_params(params).context("failed to construct normal density")?;
    let curve = density.sample_curve();

    // Estimation rejected the empty sequence, so both ends exist.
    let start_date = records[0].date.format(DATE_FORMAT).to_string();
    let end_date = records[records.len() - 1].date.format(DATE_FORMAT).to_string();

    Ok(ReportSummary {
        title: cfg.page_title.clone(),
        start_date,
        end_date,
        record_count: records.len(),
        parameters: params,
        curve,
    })
}
