//! OrderDesk CLI - Command-line interface for querying the OrderDesk policy engine.
//!
//! Answers who may do what to which order: resource permissions, status
//! transitions and edit eligibility.

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use commands::{check, config, matrix, roles};
use orderdesk_core::config::Config;
use orderdesk_core::telemetry::init_logging;
use output::OutputFormat;

/// Exit status for a denied decision.
const EXIT_DENIED: i32 = 2;

/// OrderDesk - order management policy engine CLI
#[derive(Parser)]
#[command(
    name = "orderdesk",
    version = "0.1.0",
    about = "OrderDesk - order management policy engine",
    long_about = "CLI tool for asking the OrderDesk policy engine which roles may act on resources, move orders between statuses and edit orders.",
    propagate_version = true
)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "table")]
    output: OutputFormat,

    /// Acting role (falls back to the `role` config key)
    #[arg(short, long, global = true, env = "ORDERDESK_ROLE")]
    role: Option<String>,

    /// Log level for engine diagnostics on stderr [default: error]
    #[arg(long, global = true, env = "ORDERDESK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log every decision (same as --log-level debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether the role may perform an action on a resource
    Can(check::CanArgs),

    /// Check whether the role may move an order between two statuses
    Transition(check::TransitionArgs),

    /// Check whether the role may edit an order in a given status
    Edit(check::EditArgs),

    /// List the statuses the role may move an order to
    Next(check::NextArgs),

    /// Show the full resource x action permission grid for the role
    Matrix,

    /// List built-in roles
    Roles,

    /// Configuration management
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

/// Level used when neither flags nor `ORDERDESK__LOGGING__LEVEL` set one.
const DEFAULT_LOG_LEVEL: &str = "error";

/// `--verbose` beats `--log-level`, which beats an explicitly configured level.
fn effective_log_level(configured: Option<&str>, flag: Option<&str>, verbose: bool) -> String {
    if verbose {
        return "debug".to_string();
    }
    flag.or(configured).unwrap_or(DEFAULT_LOG_LEVEL).to_string()
}

fn setup_logging(cli: &Cli) -> Result<()> {
    let mut logging = Config::load()
        .context("Failed to load configuration")?
        .logging;
    // Only a level set in the environment replaces the CLI default.
    let configured = std::env::var_os("ORDERDESK__LOGGING__LEVEL").map(|_| logging.level.clone());
    logging.level = effective_log_level(
        configured.as_deref(),
        cli.log_level.as_deref(),
        cli.verbose,
    );
    init_logging(&logging).context("Failed to initialise logging")?;
    Ok(())
}

/// Run the parsed command. `Ok(false)` means the engine denied the request.
fn run(cli: Cli) -> Result<bool> {
    let format = cli.output;
    let role = cli.role;

    match cli.command {
        Commands::Can(args) => check::can(commands::resolve_role(role)?, args, format),
        Commands::Transition(args) => {
            check::transition(commands::resolve_role(role)?, args, format)
        }
        Commands::Edit(args) => check::edit(commands::resolve_role(role)?, args, format),
        Commands::Next(args) => {
            check::next(commands::resolve_role(role)?, args, format).map(|_| true)
        }
        Commands::Matrix => matrix::execute(commands::resolve_role(role)?, format).map(|_| true),
        Commands::Roles => roles::execute(format).map(|_| true),
        Commands::Config(cmd) => config::execute(cmd, format).map(|_| true),
    }
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let result = setup_logging(&cli).and_then(|_| run(cli));

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_DENIED),
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}
