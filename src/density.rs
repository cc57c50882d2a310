use crate::stats::DistributionParams;
use anyhow::{Result, bail};
use serde::Serialize;
use statrs::distribution::{Continuous, Normal};

/// Number of points of a sampled curve.
pub const CURVE_SAMPLES: usize = 100;

/// Half-width of the sampling domain, in standard deviations around the mean.
pub const SPAN_SIGMAS: f64 = 3.0;

/// One sampled point of the density curve.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CurvePoint {
    pub x: f64,
    pub density: f64,
}

/// Sampled normal density curve, ordered by strictly increasing `x`.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Curve {
    points: Vec<CurvePoint>,
}

impl Curve {
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Domain bounds of the curve.
    pub fn x_bounds(&self) -> (f64, f64) {
        // The builder always emits `CURVE_SAMPLES` points.
        (self.points[0].x, self.points[self.points.len() - 1].x)
    }

    /// Largest sampled density value.
    pub fn max_density(&self) -> f64 {
        self.points
            .iter()
            .map(|point| point.density)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Normal probability density fitted to a set of distribution parameters.
///
/// Construction fails unless the standard deviation is positive and finite,
/// so evaluation never divides by zero. See [`NormalDensity::from_params`].
pub struct NormalDensity {
    params: DistributionParams,
    dist: Normal,
}

impl NormalDensity {
    /// Create the density `f(x) = 1/(σ√(2π)) · exp(−0.5·((x−μ)/σ)²)`.
    ///
    /// # Errors
    /// Fails if the mean is not finite or the standard deviation is not a
    /// positive finite number (a zero standard deviation makes the density
    /// undefined).
    pub fn from_params(params: DistributionParams) -> Result<Self> {
        if !params.mean.is_finite() {
            bail!("mean must be finite, but is {}", params.mean);
        }
        if !(params.std_dev.is_finite() && params.std_dev > 0.0) {
            bail!(
                "standard deviation must be positive and finite, but is {}",
                params.std_dev
            );
        }

        let dist = Normal::new(params.mean, params.std_dev)?;

        Ok(Self { params, dist })
    }

    /// Evaluate the density at `x`.
    pub fn pdf(&self, x: f64) -> f64 {
        self.dist.pdf(x)
    }

    /// Sample the density over `[μ − 3σ, μ + 3σ]`.
    ///
    /// Produces exactly [`CURVE_SAMPLES`] evenly spaced points, both domain
    /// bounds included.
    pub fn sample_curve(&self) -> Curve {
        let lo = self.params.mean - SPAN_SIGMAS * self.params.std_dev;
        let hi = self.params.mean + SPAN_SIGMAS * self.params.std_dev;
        let step = (hi - lo) / (CURVE_SAMPLES - 1) as f64;

        let points = (0..CURVE_SAMPLES)
            .map(|idx| {
                // Land the last sample exactly on the upper bound.
                let x = if idx == CURVE_SAMPLES - 1 {
                    hi
                } else {
                    lo + step * idx as f64
                };
                CurvePoint {
                    x,
                    density: self.pdf(x),
                }
            })
            .collect();

        Curve { points }
    }
}
