use super::RunSettings;
use crate::cli::{CliError, RunOptions};
use crate::logging::correlation_id;
use crate::plan::Plan;
use crate::report::Report;
use schedcast_simulation::{Histogram, MonteCarlo, SimulationConfig};
use tracing::{info, info_span, instrument};

/// Simulate `plan` and render the report.
#[instrument(skip_all)]
pub fn execute(plan: &Plan, options: &RunOptions) -> Result<String, CliError> {
    let settings = RunSettings::resolve(&plan.simulation, options)?;
    let report = simulate(plan, &settings)?;

    if settings.json {
        report
            .to_json()
            .map_err(|e| CliError::simulation(format!("Failed to serialize report: {e}")))
    } else {
        Ok(report.to_text(settings.histograms))
    }
}

/// Run the Monte Carlo simulation described by `settings`.
pub fn simulate(plan: &Plan, settings: &RunSettings) -> Result<Report, CliError> {
    let built = plan.build_graph()?;
    let start = built.id(&settings.span.start)?;
    let end = built.id(&settings.span.end)?;

    let span = info_span!(
        "simulation",
        correlation_id = %correlation_id(),
        start = %settings.span.start,
        end = %settings.span.end
    );
    let _guard = span.enter();

    let config = SimulationConfig {
        trials: settings.trials,
        seed: settings.seed,
        parallel: settings.parallel,
    };
    let samples = MonteCarlo::new(&built.graph, config).run(start, end)?;
    let summary = samples.summarize(settings.confidence)?;

    info!(
        trials = samples.len(),
        seed = samples.seed,
        mean_duration = summary.duration.mean,
        mean_cost = summary.cost.mean,
        "Simulation finished"
    );

    Ok(Report {
        start: settings.span.start.clone(),
        end: settings.span.end.clone(),
        trials: samples.len(),
        seed: samples.seed,
        unreached_trials: samples.unreached_trials,
        duration: summary.duration,
        cost: summary.cost,
        duration_histogram: Histogram::from_samples(&samples.durations, settings.bins)?,
        cost_histogram: Histogram::from_samples(&samples.costs, settings.bins)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SpanOptions;

    const PLAN: &str = r#"
[simulation]
start = "A"
end = "B"
trials = 400
seed = 11

[[tasks]]
name = "A"
min = 1
most_likely = 2
max = 3
cost_per_week = 700

[[tasks]]
name = "B"
min = 4
most_likely = 5
max = 6
cost_per_week = 1400
predecessors = ["A"]
"#;

    #[test]
    fn test_two_task_chain() {
        let plan = Plan::parse(PLAN).unwrap();
        let settings = RunSettings::resolve(&plan.simulation, &RunOptions::default()).unwrap();
        let report = simulate(&plan, &settings).unwrap();

        assert_eq!(report.trials, 400);
        assert_eq!(report.seed, 11);
        assert_eq!(report.unreached_trials, 0);
        assert!(report.duration.min >= 5.0 && report.duration.max <= 9.0);
        assert!((report.cost.mean - 2100.0).abs() < 1e-9);
        assert!(report.cost.std_dev.abs() < 1e-9);
        assert_eq!(report.duration_histogram.total(), 400);
    }

    #[test]
    fn test_seeded_output_is_reproducible() {
        let plan = Plan::parse(PLAN).unwrap();
        let first = execute(&plan, &RunOptions::default()).unwrap();
        let parallel = execute(
            &plan,
            &RunOptions {
                parallel: true,
                ..RunOptions::default()
            },
        )
        .unwrap();
        assert_eq!(first, parallel);
    }

    #[test]
    fn test_unknown_start_task() {
        let plan = Plan::parse(PLAN).unwrap();
        let options = RunOptions {
            span: SpanOptions {
                start: Some("Z".to_string()),
                end: None,
            },
            ..RunOptions::default()
        };
        let err = execute(&plan, &options).unwrap_err();
        assert!(err.to_string().contains("Unknown task 'Z'"));
    }

    #[test]
    fn test_json_output() {
        let plan = Plan::parse(PLAN).unwrap();
        let options = RunOptions {
            json: true,
            ..RunOptions::default()
        };
        let output = execute(&plan, &options).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["trials"], 400);
        assert_eq!(value["start"], "A");
    }
}
