mod json;
mod markdown;

pub use json::JsonOutput;
pub use markdown::MarkdownOutput;

use crate::model::CheckReport;
use std::io::Write;

pub trait OutputFormatter {
    fn format<W: Write>(&self, report: &CheckReport, writer: &mut W) -> std::io::Result<()>;
}

/// Render a report to a string with the given formatter.
pub fn render<F: OutputFormatter>(formatter: &F, report: &CheckReport) -> std::io::Result<String> {
    let mut buffer = Vec::new();
    formatter.format(report, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
