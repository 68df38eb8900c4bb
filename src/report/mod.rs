pub mod types;

use chrono::{DateTime, Local};
use colored::Colorize;

pub use types::{TestOutcome, TestSummary};

const RULE_WIDTH: usize = 70;

/// Append-only record of test outcomes, in execution order
#[derive(Debug, Clone)]
pub struct TestReport {
    outcomes: Vec<TestOutcome>,
    started_at: DateTime<Local>,
}

impl TestReport {
    pub fn new() -> Self {
        Self {
            outcomes: Vec::new(),
            started_at: Local::now(),
        }
    }

    pub fn add(&mut self, name: &str, passed: bool, detail: Option<&str>) {
        if passed {
            log::debug!("PASS {}", name);
        } else {
            log::warn!("FAIL {}: {}", name, detail.unwrap_or_default());
        }
        self.outcomes.push(TestOutcome::new(name, passed, detail));
    }

    pub fn pass(&mut self, name: &str) {
        self.add(name, true, None);
    }

    pub fn fail(&mut self, name: &str, detail: &str) {
        self.add(name, false, Some(detail));
    }

    pub fn outcomes(&self) -> &[TestOutcome] {
        &self.outcomes
    }

    pub fn summary(&self) -> TestSummary {
        let passed = self.outcomes.iter().filter(|o| o.passed).count();
        TestSummary {
            total: self.outcomes.len(),
            passed,
            failed: self.outcomes.len() - passed,
        }
    }

    /// Human-readable report: one line per outcome, then the totals
    pub fn render_summary(&self) -> String {
        let summary = self.summary();
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);

        let mut out = String::new();
        out.push('\n');
        out.push_str(&heavy);
        out.push('\n');
        out.push_str("  E2E API Contract Test Report\n");
        out.push_str(&format!(
            "  Started: {}\n",
            self.started_at.format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str(&heavy);
        out.push('\n');

        for outcome in &self.outcomes {
            let marker = if outcome.passed {
                "[+] PASS".green().to_string()
            } else {
                "[-] FAIL".red().bold().to_string()
            };
            out.push_str(&format!("  {}  {}", marker, outcome.name));
            if let (false, Some(detail)) = (outcome.passed, &outcome.detail) {
                out.push_str(&format!("  -- {}", detail));
            }
            out.push('\n');
        }

        out.push_str(&light);
        out.push('\n');
        out.push_str(&format!(
            "  Total: {}  |  Passed: {}  |  Failed: {}\n",
            summary.total, summary.passed, summary.failed
        ));
        out.push_str(&heavy);
        out
    }

    /// Print the report and return the failed count
    pub fn print_summary(&self) -> usize {
        println!("{}", self.render_summary());
        self.summary().failed
    }
}

impl Default for TestReport {
    fn default() -> Self {
        Self::new()
    }
}
