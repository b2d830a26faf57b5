//! Rendering of simulation results for the terminal or as JSON.

use schedcast_simulation::{Histogram, Summary};
use serde::Serialize;
use std::fmt::Write;

const BAR_WIDTH: usize = 40;

/// Everything a finished run reports.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub start: String,
    pub end: String,
    pub trials: usize,
    pub seed: u64,
    pub unreached_trials: usize,
    pub duration: Summary,
    pub cost: Summary,
    pub duration_histogram: Histogram,
    pub cost_histogram: Histogram,
}

impl Report {
    /// Render as human-readable text.
    #[must_use]
    pub fn to_text(&self, with_histograms: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} trials from '{}' to '{}' (seed {})",
            self.trials, self.start, self.end, self.seed
        );
        if self.unreached_trials > 0 {
            let _ = writeln!(
                out,
                "warning: {} trials never reached '{}'; their totals are partial",
                self.unreached_trials, self.start
            );
        }
        let _ = writeln!(out, "{}", summary_line("Total Estimated Duration (days)", &self.duration));
        let _ = writeln!(out, "{}", summary_line("Total Cost", &self.cost));

        if with_histograms {
            let _ = writeln!(out, "\nDuration (days)");
            out.push_str(&render_histogram(&self.duration_histogram));
            let _ = writeln!(out, "\nCost");
            out.push_str(&render_histogram(&self.cost_histogram));
        }

        out
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn summary_line(label: &str, summary: &Summary) -> String {
    format!(
        "{label} - Mean: {:.2}, Median: {:.2}, St. Dev: {:.2}, {}% CI: ({:.2}, {:.2})",
        summary.mean,
        summary.median,
        summary.std_dev,
        summary.confidence * 100.0,
        summary.ci_low,
        summary.ci_high
    )
}

/// Draw a histogram as one `#` bar per bin, scaled to the tallest bin.
#[must_use]
pub fn render_histogram(histogram: &Histogram) -> String {
    let peak = histogram.peak().max(1);
    let mut out = String::new();

    for bin in histogram.bins() {
        let bar = "#".repeat(bin.count * BAR_WIDTH / peak);
        let _ = writeln!(
            out,
            "{:>14.2} - {:<14.2} |{:<width$}| {}",
            bin.lower,
            bin.upper,
            bar,
            bin.count,
            width = BAR_WIDTH
        );
    }

    out
}
