//! Random variate generation for task durations.
//!
//! The sampler never owns random state. Callers pass any [`RandomSource`]:
//! every `rand::Rng` qualifies, and [`ScriptedSource`] replays fixed values
//! for deterministic tests.

use rand::Rng;
use schedcast_task_graph::Task;

/// Source of uniform variates in `[0, 1)`.
pub trait RandomSource {
    /// Draw the next uniform value.
    fn next_uniform(&mut self) -> f64;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_uniform(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Replays a fixed list of uniform values, cycling when exhausted.
///
/// An empty script always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    values: Vec<f64>,
    position: usize,
}

impl ScriptedSource {
    /// Create a source that replays `values` in order.
    #[must_use]
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            position: 0,
        }
    }

    /// Number of values drawn so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.position
    }
}

impl RandomSource for ScriptedSource {
    fn next_uniform(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}

/// Draw one value from the triangular distribution `(min, mode, max)`.
///
/// Uses the inverse CDF, split at the mode. Callers guarantee
/// `min <= mode <= max`; a zero-width range returns `min` without
/// consuming a variate.
pub fn triangular<R: RandomSource + ?Sized>(min: f64, mode: f64, max: f64, rng: &mut R) -> f64 {
    let span = max - min;
    if span <= 0.0 {
        return min;
    }

    let u = rng.next_uniform();
    let split = (mode - min) / span;
    let value = if u < split {
        min + (u * span * (mode - min)).sqrt()
    } else {
        max - ((1.0 - u) * span * (max - mode)).sqrt()
    };

    value.clamp(min, max)
}

/// Duration sampling for anything carrying a three-point estimate.
pub trait SampleDuration {
    /// Draw a fresh duration. Every call is independent.
    fn sample_duration<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64;
}

impl SampleDuration for Task {
    fn sample_duration<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        triangular(
            self.min_duration(),
            self.most_likely_duration(),
            self.max_duration(),
            rng,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_triangular_endpoints() {
        // u = 0 maps to the minimum, u -> 1 to the maximum.
        let mut rng = ScriptedSource::new([0.0]);
        assert!(close(triangular(1.0, 2.0, 3.0, &mut rng), 1.0));

        let mut rng = ScriptedSource::new([1.0]);
        assert!(close(triangular(1.0, 2.0, 3.0, &mut rng), 3.0));
    }

    #[test]
    fn test_triangular_split_at_mode() {
        // For a symmetric estimate the CDF at the mode is 0.5.
        let mut rng = ScriptedSource::new([0.5]);
        assert!(close(triangular(1.0, 2.0, 3.0, &mut rng), 2.0));

        // Lower segment: 1 + sqrt(0.125 * 2 * 1) = 1.5
        let mut rng = ScriptedSource::new([0.125]);
        assert!(close(triangular(1.0, 2.0, 3.0, &mut rng), 1.5));

        // Upper segment: 3 - sqrt(0.125 * 2 * 1) = 2.5
        let mut rng = ScriptedSource::new([0.875]);
        assert!(close(triangular(1.0, 2.0, 3.0, &mut rng), 2.5));
    }

    #[test]
    fn test_triangular_mode_at_bounds() {
        let mut rng = ScriptedSource::new([0.25, 0.25]);
        let left = triangular(0.0, 0.0, 4.0, &mut rng);
        let right = triangular(0.0, 4.0, 4.0, &mut rng);
        assert!(close(left, 4.0 - (0.75_f64 * 16.0).sqrt()));
        assert!(close(right, (0.25_f64 * 16.0).sqrt()));
    }

    #[test]
    fn test_triangular_degenerate_consumes_nothing() {
        let mut rng = ScriptedSource::new([0.3]);
        assert!(close(triangular(5.0, 5.0, 5.0, &mut rng), 5.0));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_sample_duration_stays_in_range() {
        let task = Task::new("integrate", 25.0, 42.0, 98.0, 19_200.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let d = task.sample_duration(&mut rng);
            assert!((25.0..=98.0).contains(&d), "sample {d} out of range");
        }
    }

    #[test]
    fn test_sample_duration_is_redrawn() {
        let task = Task::new("t", 0.0, 5.0, 10.0, 0.0).unwrap();
        let mut rng = ScriptedSource::new([0.1, 0.9]);
        let first = task.sample_duration(&mut rng);
        let second = task.sample_duration(&mut rng);
        assert!(first < second);
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn test_sample_mean_matches_distribution() {
        let task = Task::new("t", 1.0, 2.0, 6.0, 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let n = 100_000;
        let mean = (0..n).map(|_| task.sample_duration(&mut rng)).sum::<f64>() / f64::from(n);
        // Triangular mean is (min + mode + max) / 3 = 3.
        assert!((mean - 3.0).abs() < 0.02, "mean {mean}");
    }

    #[test]
    fn test_scripted_source_cycles() {
        let mut rng = ScriptedSource::new([0.1, 0.2]);
        assert!(close(rng.next_uniform(), 0.1));
        assert!(close(rng.next_uniform(), 0.2));
        assert!(close(rng.next_uniform(), 0.1));
        assert_eq!(rng.draws(), 3);

        let mut empty = ScriptedSource::default();
        assert!(close(empty.next_uniform(), 0.0));
    }
}
