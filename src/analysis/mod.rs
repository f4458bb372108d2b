mod expand;
mod ignore;
mod policy;
mod walker;

pub use expand::PatternExpander;
pub use ignore::IgnoreSet;
pub use policy::{Policy, package};
pub use walker::{Reach, Walk, Walker};

use crate::config::Rule;
use crate::model::{RuleReport, Violation};
use crate::resolver::{ResolveError, Workspace};
use crate::sink::ErrorSink;
use rayon::prelude::*;
use std::sync::Mutex;
use thiserror::Error;

/// Findings a policy check reports to its sink.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Error reading: [{}], err: {source}", .patterns.join(" "))]
    Resolution {
        patterns: Vec<String>,
        source: ResolveError,
    },
    #[error("Error reading: [{}], did not match any packages", .patterns.join(" "))]
    EmptyMatch { patterns: Vec<String> },
    #[error("Error reading: {module}")]
    ImportRead {
        module: String,
        source: ResolveError,
    },
    #[error("{0}")]
    Violation(Violation),
}

/// Keeps resolution problems apart from violations, which the policy
/// already returns.
#[derive(Default)]
struct DiagnosticSink {
    diagnostics: Mutex<Vec<String>>,
}

impl DiagnosticSink {
    fn into_diagnostics(self) -> Vec<String> {
        self.diagnostics
            .into_inner()
            .unwrap_or_else(|e| e.into_inner())
    }
}

impl ErrorSink for DiagnosticSink {
    fn report(&self, message: &str) {
        self.diagnostics
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }

    fn report_error(&self, error: &CheckError) {
        if !matches!(error, CheckError::Violation(_)) {
            self.report(&error.to_string());
        }
    }
}

pub fn evaluate_rule(rule: &Rule, workspace: &dyn Workspace) -> RuleReport {
    let sink = DiagnosticSink::default();
    let reach = if rule.direct {
        Reach::Direct
    } else {
        Reach::Transitive
    };

    let violations = {
        let mut policy = Policy::new(&sink, workspace, rule.packages.iter().cloned())
            .ignoring(rule.ignoring.iter().cloned());
        if rule.include_tests {
            policy = policy.with_tests();
        }
        policy.check(rule.forbid.iter().cloned(), reach)
    };

    RuleReport {
        name: rule.name.clone(),
        violations,
        diagnostics: sink.into_diagnostics(),
    }
}

/// Evaluate independent rules in parallel. Reports keep the rule order.
pub fn evaluate_rules(rules: &[Rule], workspace: &dyn Workspace) -> Vec<RuleReport> {
    rules
        .par_iter()
        .map(|rule| evaluate_rule(rule, workspace))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{ModuleGraph, ModuleSpec};

    fn rule(name: &str, packages: &[&str], forbid: &[&str]) -> Rule {
        Rule {
            name: name.to_string(),
            packages: packages.iter().map(|s| s.to_string()).collect(),
            forbid: forbid.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn graph() -> ModuleGraph {
        ModuleGraph::from_specs([
            ModuleSpec::new("app/delivery").imports(["app/usecase", "app/legacy"]),
            ModuleSpec::new("app/usecase").imports(["app/persistence"]),
            ModuleSpec::new("app/persistence"),
        ])
    }

    #[test]
    fn test_evaluate_rule_splits_violations_and_diagnostics() {
        let graph = graph();
        let report = evaluate_rule(
            &rule("delivery", &["app/delivery"], &["app/persistence"]),
            &graph,
        );

        assert_eq!(report.name, "delivery");
        assert_eq!(report.violations.len(), 1);
        assert_eq!(
            report.violations[0].chain,
            "app/delivery\n\tapp/usecase\n\t\tapp/persistence\n"
        );
        assert_eq!(report.diagnostics, vec!["Error reading: app/legacy"]);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_evaluate_rule_options() {
        let graph = graph();
        let mut direct = rule("direct", &["app/delivery"], &["app/persistence"]);
        direct.direct = true;
        direct.ignoring = vec!["app/legacy".to_string()];

        let report = evaluate_rule(&direct, &graph);

        assert!(report.is_clean());
    }

    #[test]
    fn test_evaluate_rules_keeps_order() {
        let graph = graph();
        let rules = vec![
            rule("first", &["app/usecase"], &["app/persistence"]),
            rule("second", &["app/persistence"], &["app/delivery"]),
        ];

        let reports = evaluate_rules(&rules, &graph);

        let names: Vec<_> = reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(reports[0].violations.len(), 1);
        assert!(reports[1].is_clean());
    }
}
