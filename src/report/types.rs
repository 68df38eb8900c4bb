/// Result of one completed test invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub name: String,
    pub passed: bool,
    pub detail: Option<String>,
}

impl TestOutcome {
    pub fn new(name: &str, passed: bool, detail: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            passed,
            detail: detail.filter(|d| !d.is_empty()).map(str::to_string),
        }
    }
}

/// Aggregate counts for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}
