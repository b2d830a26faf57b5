use super::Span;
use crate::cli::{CliError, SpanOptions};
use crate::plan::Plan;
use std::fmt::Write;
use tracing::{debug, instrument};

/// Check that a plan builds and that its span is simulatable.
///
/// A cyclic graph or an unreachable start task is reported as a
/// configuration error, since simulating it would give partial totals.
#[instrument(skip_all)]
pub fn execute(plan: &Plan, options: &SpanOptions) -> Result<String, CliError> {
    let built = plan.build_graph()?;
    let span = Span::resolve(&plan.simulation, options)?;
    let start = built.id(&span.start)?;
    let end = built.id(&span.end)?;

    let result = built.graph.validate(start, end).map_err(|e| CliError::config(e.to_string()))?;
    debug!(
        is_valid = result.is_valid,
        start_reachable = result.start_reachable,
        "Validated plan"
    );

    let mut out = String::new();
    let _ = writeln!(out, "Tasks: {}", built.graph.task_count());
    let _ = writeln!(out, "Span: '{}' -> '{}'", span.start, span.end);
    let _ = writeln!(
        out,
        "Start reachable: {}",
        if result.start_reachable { "yes" } else { "no" }
    );
    for error in &result.errors {
        let _ = writeln!(out, "error: {error}");
    }

    if result.is_valid {
        let _ = writeln!(out, "Plan is valid");
        Ok(out)
    } else {
        Err(CliError::config_with_help(
            format!("Plan is not valid\n{}", out.trim_end()),
            "Every task on the walk from the end task must lead back to the start task",
        ))
    }
}
