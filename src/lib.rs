pub mod envelope;
pub mod flows;
pub mod report;
pub mod runner;
pub mod source;
pub mod utils;

// Re-export common items
pub use report::TestReport;
pub use runner::{exit_status, run_tests, RunMode};
pub use utils::config::Config;
