//! Tarefo compliance CLI
//!
//! Process boundary for the privacy-compliance evaluator:
//! - Evaluate a single request (flags or the `TAREFO_DATA` envelope)
//! - Evaluate a JSON-lines batch and report the audit trail
//! - List the policy table
//! - Run the diagnostic self-test
//!
//! Verdicts go to stdout; logs go to stderr.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tarefo_compliance::{ComplianceChecker, Evaluator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

use commands::{batch, check, rules, selftest};
use config::CliConfig;
use error::CliResult;

/// Tarefo compliance CLI
#[derive(Parser)]
#[command(name = "tarefo-compliance")]
#[command(about = "Privacy-compliance checks for data-lifecycle operations", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "TAREFO_CONFIG")]
    config: Option<String>,

    /// Output format (json, table, yaml)
    #[arg(short, long, value_enum, default_value = "json")]
    output: output::OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Evaluate one operation and payload
    Check(check::CheckArgs),

    /// Evaluate JSON-lines request envelopes, then report the audit trail
    Batch(batch::BatchArgs),

    /// List the policy table
    Rules(rules::RulesArgs),

    /// Print a sample evaluation
    Selftest,

    /// Show the effective configuration
    Config,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| level.into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let evaluator = Arc::new(Evaluator::from_config(&config.compliance));
    let checker = ComplianceChecker::new(evaluator);

    match cli.command {
        Commands::Check(args) => check::execute(args, &checker, cli.output),
        Commands::Batch(args) => batch::execute(args, &checker, cli.output),
        Commands::Rules(args) => rules::execute(args, checker.evaluator().policy(), cli.output),
        Commands::Selftest => selftest::execute(&checker, cli.output),
        Commands::Config => output::print_document(&config, cli.output),
    }
}
