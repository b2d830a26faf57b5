//! Summary statistics for sample collections.

use crate::{Error, Result};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

/// Confidence level used when none is given.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Descriptive statistics of one sample collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Number of samples.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median; the mean of the two middle values for even counts.
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// Confidence level of the interval.
    pub confidence: f64,
    /// Lower bound of the confidence interval for the mean.
    pub ci_low: f64,
    /// Upper bound of the confidence interval for the mean.
    pub ci_high: f64,
}

/// Summarise `samples` with a normal-approximation interval for the mean.
///
/// The interval is `mean ± z * std_dev / sqrt(n)` where `z` is the standard
/// normal quantile at `(1 + confidence) / 2`.
///
/// # Errors
///
/// Returns [`Error::InsufficientSamples`] for an empty slice and
/// [`Error::InvalidConfidence`] unless `0 < confidence < 1`.
#[allow(clippy::cast_precision_loss)]
pub fn summarize(samples: &[f64], confidence: f64) -> Result<Summary> {
    if samples.is_empty() {
        return Err(Error::InsufficientSamples);
    }
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(Error::InvalidConfidence { value: confidence });
    }

    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        f64::midpoint(sorted[mid - 1], sorted[mid])
    } else {
        sorted[mid]
    };

    let standard = Normal::new(0.0, 1.0).map_err(|e| Error::Distribution {
        reason: e.to_string(),
    })?;
    let z = standard.inverse_cdf(f64::midpoint(1.0, confidence));
    let margin = z * std_dev / n.sqrt();

    Ok(Summary {
        count: samples.len(),
        mean,
        median,
        std_dev,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        confidence,
        ci_low: mean - margin,
        ci_high: mean + margin,
    })
}
