use crate::analysis::{IgnoreSet, PatternExpander, Reach, Walker};
use crate::cli::WalkArgs;
use crate::model::DependencyNode;
use crate::resolver::Workspace;
use crate::sink::ErrorSink;
use crate::style;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::CommandContext;

/// Prints findings as warnings; a walk keeps going past unreadable modules.
#[derive(Default)]
struct WarningSink {
    reported: AtomicUsize,
}

impl ErrorSink for WarningSink {
    fn report(&self, message: &str) {
        self.reported.fetch_add(1, Ordering::Relaxed);
        style::warning(message);
    }
}

pub fn cmd_walk(args: WalkArgs) -> i32 {
    let ctx = match CommandContext::new(&args.path, args.manifest.as_deref()) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let sink = WarningSink::default();
    let lines = walk_lines(&ctx.project.graph, &args, &sink);
    for line in &lines {
        println!("{}", line);
    }

    println!();
    style::success(&format!(
        "{} modules reached from {}",
        lines.len(),
        args.roots.join(" ")
    ));
    let warnings = sink.reported.load(Ordering::Relaxed);
    if warnings > 0 {
        style::hint(&format!("{} modules could not be read", warnings));
    }
    0
}

/// One line per visited module, indented by its depth below the root.
fn walk_lines(workspace: &dyn Workspace, args: &WalkArgs, sink: &dyn ErrorSink) -> Vec<String> {
    let expander = PatternExpander::new(workspace.as_matcher());

    let roots = match expander.expand(args.roots.as_slice()) {
        Ok(roots) => roots,
        Err(e) => {
            sink.report_error(&e);
            return Vec::new();
        }
    };

    let mut ignored = IgnoreSet::new();
    if !args.ignoring.is_empty() {
        match expander.expand(args.ignoring.as_slice()) {
            Ok(modules) => ignored.extend(modules),
            Err(e) => sink.report_error(&e),
        }
    }

    let reach = if args.direct {
        Reach::Direct
    } else {
        Reach::Transitive
    };

    Walker::new(workspace.as_resolver(), sink, &ignored)
        .with_reach(reach)
        .with_tests(args.tests)
        .walk(roots)
        .map(|node| walk_line(&node))
        .collect()
}

/// Imports of an external test package name that package after the module.
fn walk_line(node: &DependencyNode) -> String {
    let indent = "\t".repeat(node.depth());
    match node.parent().filter(|p| p.is_test_scoped()) {
        Some(test_package) => format!(
            "{}{} ({})",
            indent,
            node.display_name(),
            test_package.display_name()
        ),
        None => format!("{}{}", indent, node.display_name()),
    }
}
