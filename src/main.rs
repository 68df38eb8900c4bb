use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

use api_contract_tester::{runner, utils::config, Config, RunMode, TestReport};

/// Verify API response envelopes and flows. Runs contract tests against
/// literal fixtures, and the live end-to-end sequence too when BASE_URL is set.
#[derive(Parser)]
#[command(name = "api-contract-tester")]
#[command(version = "0.1.0")]
#[command(about = "Dual-mode API envelope contract tests", long_about = None)]
struct Cli {
    /// Base URL of a running server; empty or absent runs contract tests only
    #[arg(long, env = "BASE_URL")]
    base_url: Option<String>,

    /// Path prefix joined to every route
    #[arg(long, env = "API_PREFIX", default_value = config::DEFAULT_API_PREFIX)]
    api_prefix: String,

    /// Live request timeout in seconds
    #[arg(long, env = "TIMEOUT_SECS", default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init()?;

    let cli = Cli::parse();
    let config = Config::new(cli.base_url.as_deref(), &cli.api_prefix, cli.timeout_secs);
    let mode = RunMode::from_config(&config);

    log::info!("mode selected: {}", mode.banner());
    println!("{} Mode: {}", "▶".green().bold(), mode.banner().cyan());

    let mut report = TestReport::new();
    runner::run_tests(&mode, &config, &mut report);

    let failed = report.print_summary();
    Ok(ExitCode::from(runner::exit_status(failed)))
}
