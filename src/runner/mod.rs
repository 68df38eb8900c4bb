pub mod live;

use crate::flows::auth::Identity;
use crate::flows::contract::{contract_cases, ContractCase};
use crate::report::TestReport;
use crate::source::{LiveSource, ResponseSource};
use crate::utils::config::Config;
use colored::Colorize;

pub use live::run_live_sequence;

/// Name of the single outcome recorded when the live sequence aborts
pub const LIVE_FATAL_NAME: &str = "Live tests";

/// What a run executes, fixed once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    ContractOnly,
    ContractAndLive { base_url: String },
}

impl RunMode {
    pub fn from_config(config: &Config) -> Self {
        match &config.base_url {
            Some(base_url) => RunMode::ContractAndLive {
                base_url: base_url.clone(),
            },
            None => RunMode::ContractOnly,
        }
    }

    pub fn banner(&self) -> String {
        match self {
            RunMode::ContractOnly => "CONTRACT (mock)".to_string(),
            RunMode::ContractAndLive { base_url } => format!("LIVE (BASE_URL={})", base_url),
        }
    }
}

/// Run each case, turning any error into a failing outcome. One failure
/// never stops the cases after it.
pub fn run_contract_tests(cases: &[ContractCase], report: &mut TestReport) {
    log::info!("running {} contract cases", cases.len());
    for case in cases {
        if let Err(e) = case.run(report) {
            report.fail(&case.name, &e.to_string());
        }
    }
}

/// Run the live sequence. An abort is recorded as one `Live tests` outcome.
pub fn run_live_tests(source: &dyn ResponseSource, identity: &Identity, report: &mut TestReport) {
    log::info!("running live sequence against {}", source.describe());
    if let Err(e) = run_live_sequence(source, identity, report) {
        report.fail(LIVE_FATAL_NAME, &format!("Fatal: {}", e));
    }
}

/// Run the contract cases, then the live sequence when `mode` asks for it.
/// `config` supplies the prefix and timeout of the live client.
pub fn run_tests(mode: &RunMode, config: &Config, report: &mut TestReport) {
    run_contract_tests(&contract_cases(), report);

    if let RunMode::ContractAndLive { base_url } = mode {
        println!("\n{} Running live integration tests...", "▶".green().bold());
        match LiveSource::new(base_url, &config.api_prefix, config.timeout) {
            Ok(source) => run_live_tests(&source, &Identity::fresh(), report),
            Err(e) => report.fail(LIVE_FATAL_NAME, &format!("Fatal: {}", e)),
        }
    }
}

/// Process exit status for a failed count
pub fn exit_status(failed: usize) -> u8 {
    if failed > 0 {
        1
    } else {
        0
    }
}
