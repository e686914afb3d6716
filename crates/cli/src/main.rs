// rollcall CLI - daily attendance checks from exported sign-in logs

mod check;
mod exit_codes;
mod inputs;
mod policy;
mod schedule;
mod snapshot;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rollcall_config::{FileSnapshotStore, Settings};
use rollcall_recon::ReconError;

use exit_codes::{
    recon_exit_code, EXIT_CONFIG_INVALID, EXIT_ERROR, EXIT_INPUT_PARSE, EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(about = "Reconcile staff sign-ins against the roster: late arrivals, missing sign-ins, schedules")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Where snapshots and settings live (default: <config dir>/rollcall)
    #[arg(long, global = true, env = "ROLLCALL_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Late arrivals and missing sign-ins for one day
    #[command(after_help = "\
Examples:
  rollcall check --sign-ins signins.csv --date 2025-10-09
  rollcall check --sign-ins signins.xlsx --roster staff.csv --pto-xml pto.xml
  rollcall check --sign-ins signins.csv --json --output report.json
  rollcall check --sign-ins signins.csv --strict || notify-admin")]
    Check(check::CheckArgs),

    /// Look up staff schedules by (partial) name
    #[command(after_help = "\
Examples:
  rollcall schedule doe
  rollcall schedule \"jane d\" --schedule schedules.xlsx --json")]
    Schedule(schedule::ScheduleArgs),

    /// Stored roster and schedule datasets
    #[command(subcommand)]
    Snapshot(snapshot::SnapshotCommands),

    /// Shift and filtering policy
    #[command(subcommand)]
    Policy(policy::PolicyCommands),
}

/// Resolved per-invocation state shared by the commands.
pub struct Context {
    pub data_dir: PathBuf,
    pub store: FileSnapshotStore,
    pub settings: Settings,
}

impl Context {
    fn new(data_dir: Option<PathBuf>) -> Self {
        let data_dir = data_dir.unwrap_or_else(rollcall_config::default_data_dir);
        let settings = Settings::load_from(&data_dir);
        Self {
            store: FileSnapshotStore::new(&data_dir),
            settings,
            data_dir,
        }
    }
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("ROLLCALL_GIT_HASH"), ")",
        "\nengine:  rollcall-recon ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("ROLLCALL_TARGET"),
    )
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // try_init also routes `log` records from the library crates
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = Context::new(cli.data_dir);
    log::debug!("data dir: {}", ctx.data_dir.display());

    let result = match cli.command {
        Commands::Check(args) => check::cmd_check(&ctx, args),
        Commands::Schedule(args) => schedule::cmd_schedule(&ctx, args),
        Commands::Snapshot(cmd) => snapshot::cmd_snapshot(&ctx, cmd),
        Commands::Policy(cmd) => policy::cmd_policy(&ctx, cmd),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INPUT_PARSE, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG_INVALID, message: msg.into(), hint: None }
    }

    /// Engine error with its registry code and a next step where one is obvious.
    pub fn recon(err: ReconError) -> Self {
        let code = recon_exit_code(&err);
        let hint = match &err {
            ReconError::MissingInputs { missing } if missing.contains(&"roster") => Some(
                "pass --roster FILE, or store one with `rollcall snapshot save roster FILE`".to_string(),
            ),
            ReconError::MissingInputs { .. } => Some("pass --sign-ins FILE".to_string()),
            ReconError::Snapshot(_) => {
                Some("`rollcall snapshot clear <kind>` removes a damaged snapshot".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
