use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::constants::{DEFAULT_OUTPUT_PATH, DEFAULT_SETTING_PATH};
use crate::controller::{RunController, load_config};
use crate::core::domain::{ScorePolicy, Verdict};
use crate::native::runner::ShellRunner;

mod config;
mod constants;
mod controller;
mod core;
mod errors;
mod native;
mod report;
#[cfg(test)]
mod stubs;

#[cfg(test)]
mod integration_test;

/// Runs a solver and a scorer over every case of a setting file and writes
/// the aggregated report.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Setting file describing cases and commands.
    #[arg(env = "JUDGE_SETTING", default_value = DEFAULT_SETTING_PATH)]
    setting: PathBuf,

    /// Where to write the report.
    #[arg(short, long, env = "JUDGE_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Overrides `concurrency` from the setting file.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    concurrency: Option<u32>,

    /// Overrides `timeoutMs` from the setting file.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_ms: Option<u64>,

    /// Treat a scorer output without a score as a score of 0.
    #[arg(long)]
    lenient_score: bool,

    /// Exit with code 1 when the verdict is WA.
    #[arg(long)]
    fail_on_wa: bool,

    /// Shell used to run the solver and scorer commands.
    #[arg(long, default_value = "/bin/sh")]
    shell: PathBuf,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    set_panic_hook();

    let cli = Cli::parse();
    tracing::debug!("Arguments: {:?}", cli);

    let mut config = load_config(&cli.setting).await?;
    if let Some(concurrency) = cli.concurrency {
        config.concurrency = concurrency as usize;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.stage_timeout = Some(Duration::from_millis(timeout_ms));
    }
    if cli.lenient_score {
        config.score_policy = ScorePolicy::Lenient;
    }

    let controller = RunController::new(config, Arc::new(ShellRunner::new(&cli.shell)));
    let report = controller.run_to_file(&cli.output).await?;

    if cli.fail_on_wa && report.verdict == Verdict::WrongAnswer {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn set_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        tracing::error!(
            message = "panic occurred",
            panic = %panic_info
        );
    }));
}
