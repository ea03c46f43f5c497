mod cli;
mod config;
mod discovery;
mod engine;
mod error;
mod report;
mod types;

use crate::discovery::plan::DiscoveryPlan;
use crate::discovery::NormalizeOptions;
use crate::engine::Miner;
use crate::error::MinerError;
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const INVALID: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_now(now: Option<&str>) -> Result<DateTime<Utc>, MinerError> {
    match now {
        Some(value) => discovery::parse_timestamp(value)
            .ok_or_else(|| MinerError::InvalidTimestamp(value.to_string())),
        None => Ok(Utc::now()),
    }
}

fn run() -> Result<i32, MinerError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Mine(cmd) => {
            let now = resolve_now(cmd.now.as_deref())?;
            let loaded = config::load_config(&cmd.root)?;
            let settings = loaded.discovery_settings();
            let snapshot = discovery::load_snapshot(
                &cmd.snapshot,
                &NormalizeOptions {
                    now,
                    merged_pr_lookback_days: loaded.score_weights().merged_pr_lookback_days,
                    host_url: &settings.host_url,
                },
            )?;

            let outcome = Miner::from_config(&loaded).mine(&snapshot.signals, now);
            info!(
                discovered = outcome.stats.discovered,
                churn = outcome.stats.churn_dropped,
                failed = outcome.stats.failed + snapshot.malformed,
                hype_skipped = outcome.stats.hype_skipped,
                "mining pass complete"
            );

            report::write_document(&cmd.output, &outcome.document)?;
            if !cli.quiet {
                let output_format = match cmd.format {
                    cli::ReportFormat::Json => report::OutputFormat::Json,
                    cli::ReportFormat::Md => report::OutputFormat::Md,
                };
                println!("{}", report::render(&outcome.document, output_format)?);
                eprintln!(
                    "mined {} gems (hype: {}) into {}",
                    outcome.document.count,
                    outcome.stats.hype_admitted,
                    cmd.output.display()
                );
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Validate(cmd) => {
            let document = match report::read_document(&cmd.path) {
                Ok(document) => document,
                Err(MinerError::Json(e)) => {
                    println!(
                        "validation failed: {} does not match the schema",
                        cmd.path.display()
                    );
                    println!("- {e}");
                    return Ok(exit_code::INVALID);
                }
                Err(e) => return Err(e),
            };

            let issues = report::validate::validate_document(&document);
            if issues.is_empty() {
                println!(
                    "validation successful: {} gems in {}",
                    document.count,
                    cmd.path.display()
                );
                return Ok(exit_code::SUCCESS);
            }

            println!("validation failed: {} issue(s)", issues.len());
            for issue in &issues {
                println!("- {issue}");
            }
            Ok(exit_code::INVALID)
        }
        cli::Commands::Plan(cmd) => {
            let now = resolve_now(cmd.now.as_deref())?;
            let loaded = config::load_config(&cmd.root)?;
            let plan = DiscoveryPlan::build(
                now,
                &loaded.discovery_settings(),
                &loaded.language_policy(),
            );
            println!("{}", serde_json::to_string_pretty(&plan)?);
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
