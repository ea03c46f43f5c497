use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gemminer",
    version,
    about = "Hidden gem repository scoring and ranking CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a discovery snapshot and write the ranked gems document
    Mine(MineCommand),
    /// Check a gems document against the output contract
    Validate(ValidateCommand),
    /// Print the search queries and retry schedule for discovery
    Plan(PlanCommand),
}

#[derive(Args)]
pub struct MineCommand {
    /// Discovery snapshot (JSON)
    pub snapshot: PathBuf,
    /// Directory holding gemminer.toml
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
    #[arg(short, long, default_value = "public/gems.json")]
    pub output: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Reference time (RFC 3339) used for age and recency
    #[arg(long)]
    pub now: Option<String>,
}

#[derive(Args)]
pub struct ValidateCommand {
    pub path: PathBuf,
}

#[derive(Args)]
pub struct PlanCommand {
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
    /// Reference time (RFC 3339) used for query date bounds
    #[arg(long)]
    pub now: Option<String>,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
