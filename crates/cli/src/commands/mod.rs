pub mod run;
pub mod validate;
pub mod version;

use crate::cli::{CliError, Commands, RunOptions, SpanOptions};
use crate::plan::{Plan, PlanError, SimulationSection};
use schedcast_simulation::{DEFAULT_CONFIDENCE, DEFAULT_TRIALS, MAX_BINS};
use std::path::PathBuf;

/// Plan bundled with the binary for `schedcast demo`.
pub const DEMO_PLAN: &str = include_str!("../../plans/thermal-vacuum.toml");

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 50;

/// Internal command representation
#[derive(Debug, Clone)]
pub enum Command {
    Run { plan: PathBuf, options: RunOptions },
    Validate { plan: PathBuf, span: SpanOptions },
    Demo { options: RunOptions },
    Version,
}

impl From<Commands> for Command {
    fn from(cmd: Commands) -> Self {
        match cmd {
            Commands::Run { plan, options } => Self::Run { plan, options },
            Commands::Validate { plan, span } => Self::Validate { plan, span },
            Commands::Demo { options } => Self::Demo { options },
            Commands::Version => Self::Version,
        }
    }
}

/// Execute a command and return the text to print on stdout.
pub fn execute(command: Command) -> Result<String, CliError> {
    match command {
        Command::Run { plan, options } => {
            let plan = Plan::load(&plan)?;
            run::execute(&plan, &options)
        }
        Command::Validate { plan, span } => {
            let plan = Plan::load(&plan)?;
            validate::execute(&plan, &span)
        }
        Command::Demo { options } => {
            let plan = Plan::parse(DEMO_PLAN)?;
            run::execute(&plan, &options)
        }
        Command::Version => Ok(version::get_version_info()),
    }
}

/// Start and end task names after applying command line overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: String,
    pub end: String,
}

impl Span {
    /// `--from`/`--to` win over the plan's `[simulation]` table.
    pub fn resolve(section: &SimulationSection, options: &SpanOptions) -> Result<Self, PlanError> {
        let start = options
            .start
            .clone()
            .or_else(|| section.start.clone())
            .ok_or(PlanError::MissingSpan { which: "start" })?;
        let end = options
            .end
            .clone()
            .or_else(|| section.end.clone())
            .ok_or(PlanError::MissingSpan { which: "end" })?;
        Ok(Self { start, end })
    }
}

/// Fully resolved settings for one run.
///
/// Precedence: command line (and its environment variables), then the
/// plan's `[simulation]` table, then built-in defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub span: Span,
    pub trials: usize,
    pub seed: Option<u64>,
    pub confidence: f64,
    pub parallel: bool,
    pub bins: usize,
    pub histograms: bool,
    pub json: bool,
}

impl RunSettings {
    pub fn resolve(section: &SimulationSection, options: &RunOptions) -> Result<Self, CliError> {
        let span = Span::resolve(section, &options.span)?;
        let trials = options.trials.or(section.trials).unwrap_or(DEFAULT_TRIALS);
        let confidence = options
            .confidence
            .or(section.confidence)
            .unwrap_or(DEFAULT_CONFIDENCE);
        let bins = options.bins.or(section.bins).unwrap_or(DEFAULT_BINS);

        if trials == 0 {
            return Err(schedcast_simulation::Error::InvalidTrialCount.into());
        }
        if confidence.is_nan() || confidence <= 0.0 || confidence >= 1.0 {
            return Err(schedcast_simulation::Error::InvalidConfidence { value: confidence }.into());
        }
        if bins == 0 || bins > MAX_BINS {
            return Err(schedcast_simulation::Error::InvalidBinCount.into());
        }

        Ok(Self {
            span,
            trials,
            seed: options.seed.or(section.seed),
            confidence,
            parallel: options.parallel || section.parallel.unwrap_or(false),
            bins,
            histograms: !options.no_histogram,
            json: options.json,
        })
    }
}
