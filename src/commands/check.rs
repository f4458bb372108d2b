use crate::api::{CheckOptions, Project};
use crate::cli::{CheckArgs, OutputFormat};
use crate::fs::{FileSystem, default_fs};
use crate::output::{JsonOutput, MarkdownOutput, render};
use crate::style;

use super::{CommandContext, EXIT_SETUP, EXIT_VIOLATIONS, report_setup_error};

pub fn cmd_check(args: CheckArgs) -> i32 {
    let ctx = match CommandContext::new(&args.path, None) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    run_check_with_fs(&ctx.project, &args, default_fs())
}

pub(crate) fn run_check_with_fs(project: &Project, args: &CheckArgs, fs: &dyn FileSystem) -> i32 {
    if project.config.rules.is_empty() {
        style::warning("No rules configured");
        style::hint("Run `archtest init` to generate a starter .archtest.toml");
    }

    let options = CheckOptions {
        rules: args.rules.clone(),
    };
    let report = match project.check(&options) {
        Ok(report) => report,
        Err(e) => {
            report_setup_error(&e);
            return EXIT_SETUP;
        }
    };

    let rendered = match args.format {
        OutputFormat::Markdown => render(&MarkdownOutput::new(args.show_passing), &report),
        OutputFormat::Json => render(&JsonOutput, &report),
    };
    let rendered = match rendered {
        Ok(s) => s,
        Err(e) => {
            style::error(&format!("Failed to format output: {}", e));
            return EXIT_SETUP;
        }
    };

    match &args.output {
        Some(output_path) => {
            if let Err(e) = fs.write(output_path, &rendered) {
                style::error(&format!("Could not write output file: {}", e));
                return EXIT_SETUP;
            }
        }
        None => print!("{}", rendered),
    }

    tracing::info!(
        rules = report.rules.len(),
        violations = report.violation_count(),
        diagnostics = report.diagnostic_count(),
        "check finished"
    );

    // Exit code 1 blocks CI on violations or on modules that could not be read
    if report.is_clean() { 0 } else { EXIT_VIOLATIONS }
}
