mod cli;
mod config;
mod cycle;
mod engine;
mod error;
mod report;
mod telemetry;
mod types;

use crate::engine::{select_engine, ScoreAggregator};
use crate::error::AppraisalError;
use crate::types::appraisal::AppraisalReport;
use crate::types::config::{AppraisalConfig, SimilarityMode};
use clap::Parser;
use std::path::{Path, PathBuf};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const PENDING: i32 = 1;
    pub const REJECTED: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn config_root(cycle: &Path) -> PathBuf {
    match cycle.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn run() -> Result<i32, AppraisalError> {
    let cli = cli::Cli::parse();
    let cycle_path = match &cli.command {
        cli::Commands::Evaluate(cmd) => &cmd.cycle,
        cli::Commands::Available(cmd) => &cmd.cycle,
        cli::Commands::Validate(cmd) => &cmd.cycle,
    };
    if !cycle_path.exists() {
        return Err(AppraisalError::PathNotFound(cycle_path.display().to_string()));
    }

    let loaded = config::load_config(&config_root(cycle_path))?;
    telemetry::init(telemetry::resolve_level(
        cli.verbose,
        cli.quiet,
        loaded.config.log_level(),
    ))?;
    if loaded.layers.is_empty() {
        tracing::debug!("no configuration files found; using default scoring");
    }
    for (layer, path) in &loaded.layers {
        tracing::debug!(
            layer = layer.label(),
            path = %path.display(),
            "configuration layer applied"
        );
    }
    let cfg = loaded.config;

    match cli.command {
        cli::Commands::Evaluate(cmd) => {
            let store = cycle::load_cycle(&cmd.cycle)?;
            let mode = match cmd.similarity {
                Some(cli::SimilarityArg::Cosine) => SimilarityMode::Cosine,
                Some(cli::SimilarityArg::Uniform) => SimilarityMode::Uniform,
                None => cfg.similarity_mode(),
            };
            let engine = similarity_engine(&cfg, mode);
            let policy = cfg.scoring_policy();
            let aggregator = ScoreAggregator::new(&store, engine.as_ref(), policy);

            let results = match &cmd.employee {
                Some(name) => vec![aggregator.evaluate(name)?],
                None => aggregator.evaluate_all()?,
            };
            let appraisal_report = AppraisalReport::new(
                store.roster().categories().names(),
                aggregator.mode(),
                policy,
                results,
            );

            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
            };
            let rendered = report::render(&appraisal_report, output_format)?;
            println!("{rendered}");

            if appraisal_report.has_rejected() {
                Ok(exit_code::REJECTED)
            } else if appraisal_report.results.is_empty() || appraisal_report.has_pending() {
                Ok(exit_code::PENDING)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Available(cmd) => {
            let store = cycle::load_cycle(&cmd.cycle)?;
            if cmd.pick {
                let draw = cmd.seed.unwrap_or_else(rand::random);
                match store.pick_reviewee(&cmd.reviewer, draw)? {
                    Some(employee) => println!(
                        "next reviewee for {}: {} [{}]",
                        cmd.reviewer, employee.name, employee.code
                    ),
                    None => println!("no employees left to review for {}", cmd.reviewer),
                }
                return Ok(exit_code::SUCCESS);
            }

            let available = store.available_reviewees(&cmd.reviewer)?;

            if available.is_empty() {
                println!("no employees left to review for {}", cmd.reviewer);
                return Ok(exit_code::SUCCESS);
            }

            println!("available reviewees for {}:", cmd.reviewer);
            for employee in available {
                println!("- {} [{}]", employee.name, employee.code);
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Validate(cmd) => {
            let store = cycle::load_cycle(&cmd.cycle)?;
            println!(
                "cycle ok: {} employees, {} reviews, {} categories",
                store.roster().len(),
                store.reviews().len(),
                store.roster().categories().len()
            );
            println!(
                "similarity: {}, approval threshold: {:.2}",
                cfg.similarity_mode().label(),
                cfg.scoring_policy().approval_threshold
            );
            if store.roster().is_empty() {
                eprintln!("warning: roster is empty");
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn similarity_engine(
    cfg: &AppraisalConfig,
    mode: SimilarityMode,
) -> Box<dyn engine::SimilarityEngine> {
    if mode == SimilarityMode::Uniform {
        tracing::warn!("cosine similarity disabled; weighting all reviewers uniformly");
    }
    select_engine(mode, cfg.uniform_weight())
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
