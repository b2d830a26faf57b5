//! Equal-width binning of sample collections for downstream rendering.

use crate::{Error, Result};
use serde::Serialize;

/// Largest accepted bin count.
pub const MAX_BINS: usize = 10_000;

/// Counts of samples falling into equal-width bins over `[min, max]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Lower edge of the first bin.
    pub min: f64,
    /// Upper edge of the last bin.
    pub max: f64,
    /// Width of every bin; zero when all samples are equal.
    pub bin_width: f64,
    /// Sample count per bin.
    pub counts: Vec<usize>,
}

/// One bin of a [`Histogram`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    /// Inclusive lower edge.
    pub lower: f64,
    /// Upper edge; exclusive except for the last bin.
    pub upper: f64,
    /// Samples in the bin.
    pub count: usize,
}

impl Histogram {
    /// Bin `samples` into `bins` equal-width bins.
    ///
    /// When every sample has the same value the histogram has a single bin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBinCount`] for zero or more than [`MAX_BINS`] bins and
    /// [`Error::InsufficientSamples`] for an empty slice.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn from_samples(samples: &[f64], bins: usize) -> Result<Self> {
        if bins == 0 || bins > MAX_BINS {
            return Err(Error::InvalidBinCount);
        }
        let (min, max) = samples
            .iter()
            .fold(None, |range: Option<(f64, f64)>, &x| match range {
                None => Some((x, x)),
                Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
            })
            .ok_or(Error::InsufficientSamples)?;

        if max <= min {
            return Ok(Self {
                min,
                max,
                bin_width: 0.0,
                counts: vec![samples.len()],
            });
        }

        let bin_width = (max - min) / bins as f64;
        let mut counts = vec![0; bins];
        for &x in samples {
            let index = (((x - min) / bin_width) as usize).min(bins - 1);
            counts[index] += 1;
        }

        Ok(Self {
            min,
            max,
            bin_width,
            counts,
        })
    }

    /// Total number of binned samples.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Largest bin count.
    #[must_use]
    pub fn peak(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Iterate over the bins from lowest to highest.
    #[allow(clippy::cast_precision_loss)]
    pub fn bins(&self) -> impl Iterator<Item = Bin> + '_ {
        let last = self.counts.len().saturating_sub(1);
        self.counts.iter().enumerate().map(move |(i, &count)| Bin {
            lower: self.min + self.bin_width * i as f64,
            upper: if i == last {
                self.max
            } else {
                self.min + self.bin_width * (i + 1) as f64
            },
            count,
        })
    }
}
