use crate::logging::{LogLevel, TracingFormat};
use crate::plan::PlanError;
use clap::{Args, Parser, Subcommand};
use miette::{Diagnostic, Report};
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application
pub const EXIT_OK: i32 = 0;
/// CLI, configuration or plan error exit code
pub const EXIT_CLI: i32 = 2;
/// Simulation error exit code
pub const EXIT_SIMULATION: i32 = 3;

/// CLI-specific error types with proper exit code mapping
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum CliError {
    /// CLI, configuration or plan error (exit code 2)
    #[error("Configuration error: {message}")]
    #[diagnostic(code(schedcast::cli::config))]
    Config {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// Simulation or aggregation error (exit code 3)
    #[error("Simulation error: {message}")]
    #[diagnostic(code(schedcast::cli::simulation))]
    Simulation {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
}

impl CliError {
    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new configuration error with help text
    #[must_use]
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a new simulation error
    #[must_use]
    pub fn simulation(message: impl Into<String>) -> Self {
        Self::Simulation {
            message: message.into(),
            help: None,
        }
    }
}

impl From<PlanError> for CliError {
    fn from(err: PlanError) -> Self {
        let help = match &err {
            PlanError::Io { .. } => Some("Check that the plan file exists and is readable"),
            PlanError::UnknownPredecessor { .. } | PlanError::UnknownTask { .. } => {
                Some("Task names are case-sensitive and must match a [[tasks]] entry")
            }
            PlanError::MissingSpan { .. } => {
                Some("Set start/end in the plan's [simulation] table or pass --from/--to")
            }
            _ => None,
        };
        match help {
            Some(help) => Self::config_with_help(err.to_string(), help),
            None => Self::config(err.to_string()),
        }
    }
}

/// Map simulation errors to CLI errors.
///
/// Invalid settings are configuration problems; anything else failed
/// during the run itself.
impl From<schedcast_simulation::Error> for CliError {
    fn from(err: schedcast_simulation::Error) -> Self {
        use schedcast_simulation::Error;
        match err {
            Error::InvalidConfidence { .. } | Error::InvalidTrialCount | Error::InvalidBinCount => {
                Self::config(err.to_string())
            }
            Error::InsufficientSamples | Error::Distribution { .. } | Error::Graph(_) => {
                Self::simulation(err.to_string())
            }
        }
    }
}

/// Map CLI error to appropriate exit code
#[must_use]
pub const fn exit_code_for(err: &CliError) -> i32 {
    match err {
        CliError::Config { .. } => EXIT_CLI,
        CliError::Simulation { .. } => EXIT_SIMULATION,
    }
}

/// Render an error to stderr with miette
#[allow(clippy::print_stderr)]
pub fn render_error(err: &CliError) {
    let report = Report::new(err.clone());
    eprintln!("{report:?}");
}

#[derive(Parser, Debug)]
#[command(name = "schedcast")]
#[command(about = "Monte Carlo duration and cost forecasts for task dependency plans")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        short = 'l',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    #[arg(
        long,
        global = true,
        help = "Log output format",
        env = "SCHEDCAST_LOG_FORMAT",
        default_value = "compact",
        value_enum
    )]
    pub log_format: TracingFormat,

    #[arg(
        long,
        global = true,
        env = "SCHEDCAST_LOG",
        help = "Tracing filter directives, e.g. schedcast_simulation=trace (overrides --level and RUST_LOG)"
    )]
    pub log_filter: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Simulate a plan file and print duration and cost statistics")]
    Run {
        #[arg(help = "Path to the TOML plan file")]
        plan: PathBuf,
        #[command(flatten)]
        options: RunOptions,
    },
    #[command(about = "Check a plan file and report graph diagnostics")]
    Validate {
        #[arg(help = "Path to the TOML plan file")]
        plan: PathBuf,
        #[command(flatten)]
        span: SpanOptions,
    },
    #[command(about = "Simulate the bundled thermal-vacuum test campaign plan")]
    Demo {
        #[command(flatten)]
        options: RunOptions,
    },
    #[command(about = "Show version information")]
    Version,
}

/// Start and end task selection.
#[derive(Args, Debug, Clone, Default)]
pub struct SpanOptions {
    #[arg(long = "from", help = "Name of the start task (overrides the plan)")]
    pub start: Option<String>,

    #[arg(long = "to", help = "Name of the end task (overrides the plan)")]
    pub end: Option<String>,
}

/// Simulation settings that override the plan's [simulation] table.
#[derive(Args, Debug, Clone, Default)]
pub struct RunOptions {
    #[command(flatten)]
    pub span: SpanOptions,

    #[arg(long, env = "SCHEDCAST_TRIALS", help = "Number of trials")]
    pub trials: Option<usize>,

    #[arg(long, env = "SCHEDCAST_SEED", help = "Random seed for a reproducible run")]
    pub seed: Option<u64>,

    #[arg(long, help = "Confidence level of the interval for the mean, e.g. 0.95")]
    pub confidence: Option<f64>,

    #[arg(long, help = "Run trials on all CPU cores")]
    pub parallel: bool,

    #[arg(long, help = "Number of histogram bins")]
    pub bins: Option<usize>,

    #[arg(long, help = "Skip the text histograms")]
    pub no_histogram: bool,

    #[arg(long, help = "Print the report as JSON")]
    pub json: bool,
}

/// Parse command line arguments
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_with_overrides() {
        let cli = Cli::try_parse_from([
            "schedcast",
            "run",
            "plan.toml",
            "--from",
            "design",
            "--to",
            "ship",
            "--trials",
            "500",
            "--seed",
            "9",
            "--parallel",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Run { plan, options } => {
                assert_eq!(plan, PathBuf::from("plan.toml"));
                assert_eq!(options.span.start.as_deref(), Some("design"));
                assert_eq!(options.span.end.as_deref(), Some("ship"));
                assert_eq!(options.trials, Some(500));
                assert_eq!(options.seed, Some(9));
                assert!(options.parallel);
                assert!(options.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_level_flag() {
        let cli = Cli::try_parse_from(["schedcast", "demo", "--level", "debug"]).unwrap();
        assert_eq!(cli.level, LogLevel::Debug);
    }

    #[test]
    fn test_log_filter_flag() {
        let cli = Cli::try_parse_from([
            "schedcast",
            "version",
            "--log-filter",
            "schedcast_simulation=trace",
        ])
        .unwrap();
        assert_eq!(cli.log_filter.as_deref(), Some("schedcast_simulation=trace"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for(&CliError::config("bad")), EXIT_CLI);
        assert_eq!(exit_code_for(&CliError::simulation("bad")), EXIT_SIMULATION);
    }

    #[test]
    fn test_simulation_error_mapping() {
        let err: CliError = schedcast_simulation::Error::InvalidTrialCount.into();
        assert!(matches!(err, CliError::Config { .. }));

        let err: CliError = schedcast_simulation::Error::InsufficientSamples.into();
        assert!(matches!(err, CliError::Simulation { .. }));
    }
}
