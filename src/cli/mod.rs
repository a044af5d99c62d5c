//! Command-line front end: argument parsing, configuration and exit codes.

use std::sync::OnceLock;

use clap::{error::ErrorKind, CommandFactory, FromArgMatches, Parser};

use crate::{
    config::{ConfigLoader, ProbeConfig},
    errors::{ProbeError, Result},
    model::{Severity, Verdict},
    probe::{self, Selection},
    provider::{BudgetSource, JsonProvider},
    reporter,
    utils::{self, build_info},
};

static LONG_VERSION: OnceLock<String> = OnceLock::new();

/// Icinga/Nagios plugin that checks cloud budgets against forecast and actual spend.
///
/// Exits 0 when every budget is within its limit, 2 when any budget is
/// overspent and 3 when budget data cannot be retrieved.
#[derive(Debug, Parser)]
#[command(name = "check_budgets", version, about)]
pub struct Cli {
    /// Budget name; all budgets are checked when omitted
    #[arg(short, long, env = "CHECK_BUDGETS_BUDGET")]
    pub budget: Option<String>,

    /// Budget JSON document (DescribeBudgets output), `-` for stdin
    #[arg(short, long, env = "CHECK_BUDGETS_SOURCE")]
    pub source: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "CHECK_BUDGETS_CONFIG")]
    pub config: Option<String>,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    fn loader(&self) -> ConfigLoader {
        match &self.config {
            Some(path) => ConfigLoader::with_path(path.into()),
            None => ConfigLoader::new(),
        }
    }
}

/// Parses the process arguments, runs the check, prints the plugin line and
/// returns the exit code.
pub fn run_cli() -> i32 {
    let long_version = LONG_VERSION.get_or_init(|| build_info::current().long_version());
    let parsed = Cli::command()
        .long_version(long_version.as_str())
        .try_get_matches()
        .and_then(|matches| Cli::from_arg_matches(&matches));

    let cli = match parsed {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Severity::Ok.exit_code(),
                _ => Severity::Unknown.exit_code(),
            };
        }
    };

    let verdict = execute(&cli);
    println!("{}", verdict.render());
    verdict.exit_code()
}

/// Resolves configuration, installs logging and runs one probe pass.
pub fn execute(cli: &Cli) -> Verdict {
    let config = cli.loader().load();

    let directive = match utils::verbosity_directive(cli.verbose) {
        Some(directive) => Some(directive),
        None => config
            .as_ref()
            .ok()
            .and_then(|config| config.log_filter.as_deref()),
    };
    utils::init_tracing(directive);

    let settings = config.and_then(|config| Settings::resolve(cli, config));
    match settings {
        Ok(settings) => {
            tracing::debug!(source = ?settings.source, selection = ?settings.selection, "resolved settings");
            let provider = JsonProvider::new(settings.source);
            probe::run(&provider, &settings.selection)
        }
        Err(err) => {
            tracing::warn!(error = %err, "cannot start budget check");
            reporter::unknown(&err)
        }
    }
}

/// Effective run parameters after merging flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub source: BudgetSource,
    pub selection: Selection,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: ProbeConfig) -> Result<Self> {
        let source = match (&cli.source, config.source) {
            (Some(arg), _) => BudgetSource::from_arg(arg),
            (None, Some(path)) => BudgetSource::from_path(path),
            (None, None) => {
                return Err(ProbeError::Config(
                    "no budget source given (use --source or set `source` in the config file)"
                        .into(),
                ))
            }
        };
        let selection = Selection::from_name(cli.budget.clone().or(config.budget));
        Ok(Self { source, selection })
    }
}
