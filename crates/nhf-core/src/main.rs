//! No-Hitter Forecaster CLI.
//!
//! The main entry point for nhf, handling:
//! - Daily predictions (optionally recorded in the ledger)
//! - Season status and the ledger view
//! - Event table maintenance (seed/update, validate, summarize)
//! - Configuration inspection and JSON schemas

use chrono::{Local, NaiveDate, Utc};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use nhf_common::{Error, NoHitterEvent, OutputFormat, StructuredError, SCHEMA_VERSION};
use nhf_core::config::{
    load_config, resolve_data_dir, ConfigError, ConfigOptions, ResolvedConfig,
};
use nhf_core::engine::season_status;
use nhf_core::exit_codes::ExitCode;
use nhf_core::ledger::LedgerStore;
use nhf_core::logging::{event_names, generate_run_id, init_logging, LogConfig, LogLevel};
use nhf_core::output::{
    render, ConfigView, DataUpdateView, HistoryView, Render, StatusView,
};
use nhf_core::schema::{available_schemas, generate_all_schemas, generate_schema};
use nhf_core::store::csv::parse_event_date;
use nhf_core::store::{seed_events, summarize, validate_events, CsvStore};
use nhf_core::{PredictOptions, Predictor};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error as ThisError;
use tracing::{info, info_span};

/// No-Hitter Forecaster - daily probability of an MLB no-hitter
#[derive(Parser)]
#[command(name = "nhf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Model configuration file (model.json)
    #[arg(long, global = true, env = "NHF_MODEL")]
    config: Option<PathBuf>,

    /// Directory holding no_hitters.csv and the prediction ledger
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the probability of a no-hitter on a date
    Predict(PredictArgs),

    /// Today's season state and latest recorded prediction
    Status,

    /// Whether a date falls inside the season
    Season {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Event table maintenance
    Data(DataArgs),

    /// Recorded predictions, newest first
    History {
        /// Maximum entries to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Configuration management
    Config(ConfigArgs),

    /// Print JSON schemas for outputs and config files
    Schema(SchemaArgs),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print version information
    Version,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Predict(_) => "predict",
            Commands::Status => "status",
            Commands::Season { .. } => "season",
            Commands::Data(_) => "data",
            Commands::History { .. } => "history",
            Commands::Config(_) => "config",
            Commands::Schema(_) => "schema",
            Commands::Completions { .. } => "completions",
            Commands::Version => "version",
        }
    }
}

#[derive(Args, Debug)]
struct PredictArgs {
    /// Target date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<String>,

    /// Monte Carlo seed (defaults to the configured seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Monte Carlo trials (defaults to the configured count)
    #[arg(long)]
    trials: Option<u32>,

    /// Record the prediction in the daily ledger
    #[arg(long)]
    record: bool,
}

#[derive(Args, Debug)]
struct DataArgs {
    #[command(subcommand)]
    command: DataCommands,
}

#[derive(Subcommand, Debug)]
enum DataCommands {
    /// Write the built-in dataset, keeping rows already in the table
    Update,
    /// Check the event table for malformed or suspicious rows
    Validate {
        /// Fail on the first malformed row
        #[arg(long)]
        strict: bool,
    },
    /// Counts by month and decade, gaps, busiest dates
    Summary {
        /// Number of calendar dates to list
        #[arg(long, default_value = "5")]
        top: usize,
    },
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the resolved configuration
    Show,
    /// Validate a model file (defaults to the resolved one)
    Validate {
        path: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct SchemaArgs {
    /// Type name to print
    name: Option<String>,

    /// List available schema names
    #[arg(long, conflicts_with = "all")]
    list: bool,

    /// Print every schema keyed by name
    #[arg(long)]
    all: bool,
}

/// Anything a command can fail with.
#[derive(Debug, ThisError)]
enum CliError {
    #[error(transparent)]
    Core(#[from] Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Args(String),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Core(err) => ExitCode::from(err),
            CliError::Config(err) => ExitCode::from(err),
            CliError::Args(_) => ExitCode::ArgsError,
        }
    }

    fn code(&self) -> u32 {
        match self {
            CliError::Core(err) => err.code(),
            CliError::Config(err) => err.code(),
            CliError::Args(_) => ExitCode::ArgsError.as_i32() as u32,
        }
    }
}

type CliResult = std::result::Result<ExitCode, CliError>;

fn main() {
    let cli = Cli::parse();

    let cli_level = if cli.global.quiet {
        Some(LogLevel::Error)
    } else {
        match cli.global.verbose {
            0 => None,
            1 => Some(LogLevel::Info),
            2 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    };
    init_logging(&LogConfig::from_env(cli_level, None));

    let run_id = generate_run_id();
    let span = info_span!("nhf", run_id = %run_id, command = cli.command.name());
    let _guard = span.enter();
    info!(event = event_names::RUN_STARTED, "starting");

    let global = &cli.global;
    let outcome = match &cli.command {
        Commands::Predict(args) => run_predict(global, args),
        Commands::Status => run_status(global),
        Commands::Season { date } => run_season(global, date.as_deref()),
        Commands::Data(args) => run_data(global, args),
        Commands::History { limit } => run_history(global, *limit),
        Commands::Config(args) => run_config(global, args),
        Commands::Schema(args) => run_schema(args),
        Commands::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "nhf", &mut std::io::stdout());
            Ok(ExitCode::Clean)
        }
        Commands::Version => run_version(global),
    };

    let exit_code = match outcome {
        Ok(code) => code,
        Err(err) => output_error(global, &err),
    };
    info!(event = event_names::RUN_FINISHED, exit_code = exit_code.as_i32(), "finished");
    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Commands
// ============================================================================

fn run_predict(global: &GlobalOpts, args: &PredictArgs) -> CliResult {
    let resolved = load_model(global)?;
    let data_dir = resolve_data_dir(global.data_dir.as_deref());
    let events = load_events(&data_dir)?;
    let target = target_date(args.date.as_deref())?;

    let predictor = Predictor::new(resolved.model.clone());
    let options = PredictOptions {
        seed: args.seed,
        trials: args.trials,
    };
    let result = predictor.predict_with(&events, target, &options)?;

    if args.record {
        LedgerStore::in_dir(&data_dir).record(
            result.clone(),
            Utc::now(),
            resolved.model.ledger.retain,
        )?;
    }

    emit(global, &result)?;
    Ok(if result.is_degraded() {
        ExitCode::Degraded
    } else {
        ExitCode::Clean
    })
}

fn run_status(global: &GlobalOpts) -> CliResult {
    let resolved = load_model(global)?;
    let data_dir = resolve_data_dir(global.data_dir.as_deref());
    let today = today();
    let ledger = LedgerStore::in_dir(&data_dir).load()?;
    let prediction = ledger.today_or_latest(today).cloned();
    let view = StatusView {
        today,
        season: season_status(today, &resolved.model.season),
        is_today: prediction
            .as_ref()
            .is_some_and(|e| e.prediction.date == today),
        prediction,
        ledger_entries: ledger.len(),
    };
    emit(global, &view)?;
    Ok(ExitCode::Clean)
}

fn run_season(global: &GlobalOpts, date: Option<&str>) -> CliResult {
    let resolved = load_model(global)?;
    let status = season_status(target_date(date)?, &resolved.model.season);
    emit(global, &status)?;
    Ok(ExitCode::Clean)
}

fn run_data(global: &GlobalOpts, args: &DataArgs) -> CliResult {
    let data_dir = resolve_data_dir(global.data_dir.as_deref());
    let store = CsvStore::in_dir(&data_dir);
    match &args.command {
        DataCommands::Update => {
            let existing = if store.exists() {
                store.load()?.into_complete()?
            } else {
                Vec::new()
            };
            let (merged, added) = merge_events(existing, seed_events());
            let total_events = store.save(&merged)?;
            emit(
                global,
                &DataUpdateView {
                    path: store.path().to_path_buf(),
                    total_events,
                    added,
                },
            )?;
            Ok(ExitCode::Clean)
        }
        DataCommands::Validate { strict } => {
            let resolved = load_model(global)?;
            let report = store.strict(*strict).load()?;
            let validation = validate_events(
                &report.events,
                &report.skipped,
                &resolved.model.season,
                today(),
            );
            emit(global, &validation)?;
            Ok(if validation.is_clean() {
                ExitCode::Clean
            } else {
                ExitCode::DataIssues
            })
        }
        DataCommands::Summary { top } => {
            let events = load_events(&data_dir)?;
            emit(global, &summarize(&events, *top))?;
            Ok(ExitCode::Clean)
        }
    }
}

fn run_history(global: &GlobalOpts, limit: usize) -> CliResult {
    let data_dir = resolve_data_dir(global.data_dir.as_deref());
    let ledger = LedgerStore::in_dir(&data_dir).load()?;
    let view = HistoryView {
        entries: ledger.recent(limit).into_iter().cloned().collect(),
    };
    emit(global, &view)?;
    Ok(ExitCode::Clean)
}

fn run_config(global: &GlobalOpts, args: &ConfigArgs) -> CliResult {
    let resolved = match &args.command {
        ConfigCommands::Show => load_model(global)?,
        ConfigCommands::Validate { path } => load_config(&ConfigOptions {
            model_path: path.clone().or_else(|| global.config.clone()),
            config_dir: None,
        })?,
    };
    let status = match args.command {
        ConfigCommands::Show => "loaded",
        ConfigCommands::Validate { .. } => "valid",
    };
    let view = ConfigView {
        status,
        source: resolved.snapshot(),
        model: resolved.model,
    };
    emit(global, &view)?;
    Ok(ExitCode::Clean)
}

fn run_schema(args: &SchemaArgs) -> CliResult {
    let value = if args.list {
        serde_json::to_value(
            available_schemas()
                .into_iter()
                .map(|(name, description)| serde_json::json!({"name": name, "description": description}))
                .collect::<Vec<_>>(),
        )
        .map_err(Error::from)?
    } else if args.all {
        serde_json::to_value(generate_all_schemas()?).map_err(Error::from)?
    } else {
        let name = args
            .name
            .as_deref()
            .ok_or_else(|| CliError::Args("pass a schema name, --list or --all".to_string()))?;
        generate_schema(name)?
            .ok_or_else(|| CliError::Args(format!("unknown schema '{name}'; see --list")))?
    };
    println!("{}", serde_json::to_string_pretty(&value).map_err(Error::from)?);
    Ok(ExitCode::Clean)
}

fn run_version(global: &GlobalOpts) -> CliResult {
    match global.format {
        OutputFormat::Json => {
            let info = serde_json::json!({
                "nhf_version": env!("CARGO_PKG_VERSION"),
                "schema_version": SCHEMA_VERSION,
                "rust_version": env!("CARGO_PKG_RUST_VERSION"),
            });
            println!("{}", serde_json::to_string_pretty(&info).map_err(Error::from)?);
        }
        _ => {
            println!("nhf {}", env!("CARGO_PKG_VERSION"));
            println!("schema version: {SCHEMA_VERSION}");
        }
    }
    Ok(ExitCode::Clean)
}

// ============================================================================
// Helpers
// ============================================================================

fn load_model(global: &GlobalOpts) -> Result<ResolvedConfig, ConfigError> {
    let resolved = load_config(&ConfigOptions {
        model_path: global.config.clone(),
        config_dir: None,
    })?;
    if resolved.using_defaults() {
        info!(event = event_names::CONFIG_DEFAULT_USED, "using built-in model defaults");
    } else {
        info!(
            event = event_names::CONFIG_LOADED,
            path = ?resolved.model_path,
            hash = ?resolved.model_hash,
            "model config loaded"
        );
    }
    Ok(resolved)
}

/// Load the event table, writing the built-in dataset first if it is missing.
fn load_events(data_dir: &Path) -> Result<Vec<NoHitterEvent>, Error> {
    let store = CsvStore::in_dir(data_dir);
    if !store.exists() {
        let written = store.save(&seed_events())?;
        info!(
            event = event_names::DATA_WRITTEN,
            path = %store.path().display(),
            events = written,
            "event table missing; wrote built-in dataset"
        );
    }
    Ok(store.load()?.events)
}

/// Union of two event lists keyed by the full record. Returns the merged list
/// and how many records `incoming` added.
fn merge_events(
    existing: Vec<NoHitterEvent>,
    incoming: Vec<NoHitterEvent>,
) -> (Vec<NoHitterEvent>, usize) {
    let mut seen: BTreeSet<String> = existing.iter().map(|e| e.canonical_line()).collect();
    let mut merged = existing;
    let mut added = 0;
    for event in incoming {
        if seen.insert(event.canonical_line()) {
            merged.push(event);
            added += 1;
        }
    }
    merged.sort_by(|a, b| a.date.cmp(&b.date));
    (merged, added)
}

fn target_date(raw: Option<&str>) -> Result<NaiveDate, Error> {
    match raw {
        None => Ok(today()),
        Some(raw) => parse_event_date(raw).map_err(|reason| Error::InvalidDate {
            date: raw.to_string(),
            reason,
        }),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn emit<T: Render>(global: &GlobalOpts, value: &T) -> Result<(), Error> {
    println!("{}", render(value, global.format)?);
    Ok(())
}

fn output_error(global: &GlobalOpts, error: &CliError) -> ExitCode {
    let exit_code = error.exit_code();
    match global.format {
        OutputFormat::Json => {
            let detail = match error {
                CliError::Core(err) => serde_json::to_value(StructuredError::from(err))
                    .unwrap_or(serde_json::Value::Null),
                _ => serde_json::json!({
                    "code": error.code(),
                    "message": error.to_string(),
                }),
            };
            let response = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "status": "error",
                "exit_code": exit_code.as_i32(),
                "error": detail,
            });
            match serde_json::to_string_pretty(&response) {
                Ok(text) => eprintln!("{text}"),
                Err(_) => eprintln!("error: {error}"),
            }
        }
        OutputFormat::Summary => {
            eprintln!("error [{}]: {}", exit_code.code_name(), error);
        }
        OutputFormat::Md => {
            match error {
                CliError::Core(err) => {
                    eprintln!("# {}", err.headline());
                    eprintln!();
                    eprintln!("Error: {err}");
                    eprintln!("Hint: {}", err.remediation());
                }
                _ => {
                    eprintln!("# Error");
                    eprintln!();
                    eprintln!("Error: {error}");
                }
            }
        }
    }
    exit_code
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(y: i32, m: u32, d: u32, pitcher: &str) -> NoHitterEvent {
        NoHitterEvent::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), pitcher, "T", "O")
    }

    #[test]
    fn merge_keeps_user_rows_and_skips_known_ones() {
        let existing = vec![event(2030, 5, 1, "Local"), event(2019, 5, 7, "A")];
        let incoming = vec![event(2019, 5, 7, "A"), event(2018, 5, 8, "B")];
        let (merged, added) = merge_events(existing, incoming);
        assert_eq!(added, 1);
        let pitchers: Vec<_> = merged.iter().map(|e| e.pitcher.as_str()).collect();
        assert_eq!(pitchers, vec!["B", "A", "Local"]);
    }

    #[test]
    fn bad_date_is_args_error() {
        let err = target_date(Some("2024-02-30")).unwrap_err();
        assert_eq!(ExitCode::from(&err), ExitCode::ArgsError);
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
