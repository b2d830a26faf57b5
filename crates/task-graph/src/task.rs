//! Schedule activity with a three-point duration estimate.

use chrono::NaiveDate;

use crate::{Error, Result};

const DAYS_PER_WEEK: f64 = 7.0;

/// One schedule activity.
///
/// Durations are in days, costs in currency units per week. The estimate
/// is validated on construction so a `Task` always satisfies
/// `0 <= min_duration <= most_likely_duration <= max_duration`.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    name: String,
    min_duration: f64,
    most_likely_duration: f64,
    max_duration: f64,
    cost_per_week: f64,
    start_date: Option<NaiveDate>,
}

impl Task {
    /// Create a task from its three-point estimate and weekly cost rate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTaskParameters`] if any value is not finite,
    /// the minimum is negative, the estimate is not ordered
    /// `min <= most_likely <= max`, or the cost rate is negative.
    pub fn new(
        name: impl Into<String>,
        min_duration: f64,
        most_likely_duration: f64,
        max_duration: f64,
        cost_per_week: f64,
    ) -> Result<Self> {
        let name = name.into();

        let values = [
            ("min_duration", min_duration),
            ("most_likely_duration", most_likely_duration),
            ("max_duration", max_duration),
            ("cost_per_week", cost_per_week),
        ];
        if let Some((field, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::invalid_parameters(
                name,
                format!("{field} must be finite, got {value}"),
            ));
        }
        if min_duration < 0.0 {
            return Err(Error::invalid_parameters(
                name,
                format!("min_duration must be non-negative, got {min_duration}"),
            ));
        }
        if min_duration > most_likely_duration {
            return Err(Error::invalid_parameters(
                name,
                format!(
                    "min_duration ({min_duration}) exceeds most_likely_duration ({most_likely_duration})"
                ),
            ));
        }
        if most_likely_duration > max_duration {
            return Err(Error::invalid_parameters(
                name,
                format!(
                    "most_likely_duration ({most_likely_duration}) exceeds max_duration ({max_duration})"
                ),
            ));
        }
        if cost_per_week < 0.0 {
            return Err(Error::invalid_parameters(
                name,
                format!("cost_per_week must be non-negative, got {cost_per_week}"),
            ));
        }

        Ok(Self {
            name,
            min_duration,
            most_likely_duration,
            max_duration,
            cost_per_week,
            start_date: None,
        })
    }

    /// Attach an informational start date.
    #[must_use]
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Display name of the task.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optimistic duration in days.
    #[must_use]
    pub fn min_duration(&self) -> f64 {
        self.min_duration
    }

    /// Most likely duration in days (the mode of the estimate).
    #[must_use]
    pub fn most_likely_duration(&self) -> f64 {
        self.most_likely_duration
    }

    /// Pessimistic duration in days.
    #[must_use]
    pub fn max_duration(&self) -> f64 {
        self.max_duration
    }

    /// Weekly burn rate.
    #[must_use]
    pub fn cost_per_week(&self) -> f64 {
        self.cost_per_week
    }

    /// Planned start date, if one was recorded.
    ///
    /// Never consulted by the simulation.
    #[must_use]
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub(crate) fn set_start_date(&mut self, date: NaiveDate) {
        self.start_date = Some(date);
    }

    /// Cost of running this task for `duration` days at its weekly rate.
    ///
    /// The path simulator accumulates raw weekly rates instead; this helper
    /// is for callers that want a duration-scaled figure.
    #[must_use]
    pub fn prorated_cost(&self, duration: f64) -> f64 {
        duration / DAYS_PER_WEEK * self.cost_per_week
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_task() {
        let task = Task::new("design", 1.0, 2.0, 3.0, 700.0).unwrap();
        assert_eq!(task.name(), "design");
        assert!((task.min_duration() - 1.0).abs() < f64::EPSILON);
        assert!((task.most_likely_duration() - 2.0).abs() < f64::EPSILON);
        assert!((task.max_duration() - 3.0).abs() < f64::EPSILON);
        assert!((task.cost_per_week() - 700.0).abs() < f64::EPSILON);
        assert!(task.start_date().is_none());
    }

    #[test]
    fn test_degenerate_estimate_is_valid() {
        assert!(Task::new("fixed", 4.0, 4.0, 4.0, 0.0).is_ok());
    }

    #[test]
    fn test_min_above_mode_rejected() {
        let err = Task::new("bad", 5.0, 2.0, 9.0, 100.0).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTaskParameters { ref task, .. } if task == "bad"
        ));
    }

    #[test]
    fn test_mode_above_max_rejected() {
        let err = Task::new("bad", 1.0, 10.0, 9.0, 100.0).unwrap_err();
        assert!(err.to_string().contains("exceeds max_duration"));
    }

    #[test]
    fn test_negative_values_rejected() {
        assert!(Task::new("neg-min", -1.0, 2.0, 3.0, 1.0).is_err());
        assert!(Task::new("neg-cost", 1.0, 2.0, 3.0, -1.0).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Task::new("nan", f64::NAN, 2.0, 3.0, 1.0).is_err());
        assert!(Task::new("inf", 1.0, 2.0, f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_prorated_cost() {
        let task = Task::new("t", 1.0, 7.0, 14.0, 700.0).unwrap();
        assert!((task.prorated_cost(14.0) - 1400.0).abs() < 1e-9);
    }

    #[test]
    fn test_with_start_date() {
        let date = NaiveDate::from_ymd_opt(2015, 1, 5).unwrap();
        let task = Task::new("t", 1.0, 2.0, 3.0, 1.0)
            .unwrap()
            .with_start_date(date);
        assert_eq!(task.start_date(), Some(date));
    }
}
