mod node;
mod violation;

pub use node::{ChainLink, DependencyNode, TEST_SUFFIX};
pub use violation::Violation;

use serde::Serialize;

/// Outcome of evaluating one configured rule.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RuleReport {
    pub name: String,
    pub violations: Vec<Violation>,
    /// Resolution and read errors reported while checking the rule.
    pub diagnostics: Vec<String>,
}

impl RuleReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty() && self.diagnostics.is_empty()
    }
}

/// Outcome of evaluating every rule of a project.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub project_name: String,
    pub rules: Vec<RuleReport>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.rules.iter().all(RuleReport::is_clean)
    }

    pub fn violation_count(&self) -> usize {
        self.rules.iter().map(|r| r.violations.len()).sum()
    }

    pub fn diagnostic_count(&self) -> usize {
        self.rules.iter().map(|r| r.diagnostics.len()).sum()
    }
}
