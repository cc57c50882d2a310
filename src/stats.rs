use anyhow::{Result, bail};
use serde::Serialize;
use statrs::statistics::Statistics;

/// Parameters of the fitted distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistributionParams {
    pub mean: f64,
    pub std_dev: f64,
}

/// Estimate the arithmetic mean and population standard deviation of `values`.
///
/// The standard deviation uses the population formula (denominator `N`),
/// not the `N - 1` sample estimator.
///
/// # Errors
/// Fails if `values` is empty.
pub fn estimate(values: &[f64]) -> Result<DistributionParams> {
    if values.is_empty() {
        bail!("sequence of values must not be empty");
    }

    let mean = Statistics::mean(values);

    // Two-pass formula: the differences cancel exactly for constant input,
    // so the standard deviation is 0 there, not a rounding residue.
    let variance = values
        .iter()
        .map(|&value| (value - mean).powi(2))
        .sum::<f64>()
        / values.len() as f64;

    Ok(DistributionParams {
        mean,
        std_dev: variance.sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_VALUES: [f64; 10] =
        [23.0, 25.0, 28.0, 27.0, 30.0, 24.0, 29.0, 26.0, 31.0, 22.0];

    #[test]
    fn estimates_sample_dataset() {
        let params = estimate(&SAMPLE_VALUES).expect("estimation failed");

        assert!((params.mean - 26.5).abs() < 1e-9);
        // Population variance of the sample is 8.25.
        assert!((params.std_dev - 8.25_f64.sqrt()).abs() < 1e-9);
        assert!((params.std_dev - 2.87228).abs() < 1e-3);
    }

    #[test]
    fn equal_values_give_zero_std_dev() {
        // Known degenerate case: estimation succeeds, density construction
        // rejects it later.
        let params = estimate(&[4.2; 7]).expect("estimation failed");

        assert_eq!(params.mean, 4.2);
        assert_eq!(params.std_dev, 0.0);
    }

    #[test]
    fn rejects_empty_sequence() {
        let error = estimate(&[]).expect_err("empty sequence must be rejected");
        assert!(format!("{error:#}").contains("must not be empty"));
    }
}
