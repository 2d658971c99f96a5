use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "appraisal",
    version,
    about = "Employee appraisal engine blending objective scores with peer reviews"
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
    /// Score every reviewed employee, or a single employee
    Evaluate(EvaluateCommand),
    /// List the employees a reviewer may still review
    Available(AvailableCommand),
    /// Load the cycle and configuration without scoring
    Validate(ValidateCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SimilarityArg {
    Cosine,
    Uniform,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Args)]
pub struct EvaluateCommand {
    /// Appraisal cycle file (TOML)
    pub cycle: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Evaluate only this employee, even without reviews
    #[arg(long)]
    pub employee: Option<String>,
    /// Override the configured similarity mode
    #[arg(long, value_enum)]
    pub similarity: Option<SimilarityArg>,
}

#[derive(Args)]
pub struct AvailableCommand {
    pub cycle: PathBuf,
    #[arg(long)]
    pub reviewer: String,
    /// Pick one remaining reviewee at random instead of listing them all
    #[arg(long)]
    pub pick: bool,
    /// Fix the draw used by --pick
    #[arg(long, requires = "pick")]
    pub seed: Option<u64>,
}

#[derive(Args)]
pub struct ValidateCommand {
    pub cycle: PathBuf,
}
