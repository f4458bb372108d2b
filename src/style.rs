//! Terminal styling for CLI messages.

use colored::Colorize;

pub fn error(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Dimmed follow-up line on stderr.
pub fn hint(msg: &str) {
    eprintln!("{} {}", "hint:".dimmed(), msg.dimmed());
}

pub fn path(p: &std::path::Path) -> String {
    p.display().to_string().bright_white().to_string()
}

/// Colour a rendered chain: the root stands out, the last module (the
/// forbidden one) is red.
pub fn chain(chain: &str) -> String {
    let lines: Vec<&str> = chain.lines().collect();
    let last = lines.len().saturating_sub(1);
    let mut out = String::new();
    for (idx, line) in lines.iter().enumerate() {
        let styled = if idx == last && idx > 0 {
            line.red().bold().to_string()
        } else if idx == 0 {
            line.bold().to_string()
        } else {
            line.to_string()
        };
        out.push_str(&styled);
        out.push('\n');
    }
    out
}
