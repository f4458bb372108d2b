use crate::model::CheckReport;
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Default)]
pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    project_name: &'a str,
    clean: bool,
    summary: JsonSummary,
    rules: &'a [crate::model::RuleReport],
}

#[derive(Serialize)]
struct JsonSummary {
    rules: usize,
    violations: usize,
    diagnostics: usize,
}

impl OutputFormatter for JsonOutput {
    fn format<W: Write>(&self, report: &CheckReport, writer: &mut W) -> std::io::Result<()> {
        let json_report = JsonReport {
            project_name: &report.project_name,
            clean: report.is_clean(),
            summary: JsonSummary {
                rules: report.rules.len(),
                violations: report.violation_count(),
                diagnostics: report.diagnostic_count(),
            },
            rules: &report.rules,
        };

        let json = serde_json::to_string_pretty(&json_report).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DependencyNode, RuleReport, Violation};
    use crate::output::render;

    #[test]
    fn test_json_report() {
        let root = DependencyNode::root("app/delivery");
        let leaf = DependencyNode::child(&root.test_variant(), "app/fakes");
        let report = CheckReport {
            project_name: "app".to_string(),
            rules: vec![RuleReport {
                name: "no-fakes".to_string(),
                violations: vec![Violation::from_node(&leaf)],
                diagnostics: vec!["Error reading: app/legacy".to_string()],
            }],
        };

        let output = render(&JsonOutput::new(), &report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["clean"], false);
        assert_eq!(value["summary"]["violations"], 1);
        assert_eq!(value["rules"][0]["name"], "no-fakes");
        let violation = &value["rules"][0]["violations"][0];
        assert_eq!(violation["root"], "app/delivery");
        assert_eq!(violation["links"][0]["test_scoped"], true);
        assert_eq!(violation["chain"], "app/delivery_test\n\tapp/fakes\n");
    }
}
