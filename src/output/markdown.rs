use crate::model::{CheckReport, RuleReport};
use crate::output::OutputFormatter;
use std::io::Write;

#[derive(Debug, Default)]
pub struct MarkdownOutput {
    /// Also list rules that passed.
    pub show_passing: bool,
}

impl MarkdownOutput {
    pub fn new(show_passing: bool) -> Self {
        Self { show_passing }
    }

    fn format_rule<W: Write>(&self, rule: &RuleReport, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "### 🔴 {}\n", rule.name)?;

        for violation in &rule.violations {
            writeln!(
                writer,
                "- `{}` reaches `{}` (depth {})\n",
                violation.root,
                violation.forbidden,
                violation.depth()
            )?;
            writeln!(writer, "```")?;
            write!(writer, "{}", violation.chain)?;
            writeln!(writer, "```\n")?;
        }

        for diagnostic in &rule.diagnostics {
            writeln!(writer, "- ⚠ {}", diagnostic)?;
        }
        if !rule.diagnostics.is_empty() {
            writeln!(writer)?;
        }

        Ok(())
    }
}

impl OutputFormatter for MarkdownOutput {
    fn format<W: Write>(&self, report: &CheckReport, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "# Dependency Policy Check: {}\n", report.project_name)?;

        if report.rules.is_empty() {
            writeln!(writer, "No rules configured.")?;
            return Ok(());
        }

        writeln!(writer, "- **Rules**: {}", report.rules.len())?;
        writeln!(writer, "- **Violations**: {}", report.violation_count())?;
        writeln!(writer, "- **Diagnostics**: {}\n", report.diagnostic_count())?;

        if report.is_clean() {
            writeln!(writer, "## No Violations Found\n")?;
        } else {
            writeln!(writer, "## Failing Rules\n")?;
            for rule in report.rules.iter().filter(|r| !r.is_clean()) {
                self.format_rule(rule, writer)?;
            }
        }

        if self.show_passing {
            let passing: Vec<_> = report.rules.iter().filter(|r| r.is_clean()).collect();
            if !passing.is_empty() {
                writeln!(writer, "## Passing Rules\n")?;
                for rule in passing {
                    writeln!(writer, "- ✓ {}", rule.name)?;
                }
            }
        }

        Ok(())
    }
}
