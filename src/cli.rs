use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "archtest")]
#[command(about = "Assert that modules never depend on forbidden modules")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log traversal details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Evaluate the rules in .archtest.toml
    Check(CheckArgs),

    /// Print the import graph reachable from one or more modules
    Walk(WalkArgs),

    /// Generate a starter .archtest.toml configuration file
    Init(InitArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Project path containing .archtest.toml (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "markdown")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only evaluate the named rules
    #[arg(long = "rule")]
    pub rules: Vec<String>,

    /// Also list rules that passed
    #[arg(long)]
    pub show_passing: bool,
}

impl Default for CheckArgs {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            format: OutputFormat::Markdown,
            output: None,
            rules: Vec::new(),
            show_passing: false,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct WalkArgs {
    /// Root modules or patterns to walk from
    #[arg(required = true)]
    pub roots: Vec<String>,

    /// Project path containing .archtest.toml (defaults to current directory)
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Module manifest (overrides the one named in .archtest.toml)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Stop at modules imported by the roots themselves
    #[arg(long)]
    pub direct: bool,

    /// Follow imports made by test code
    #[arg(long)]
    pub tests: bool,

    /// Modules or patterns to skip
    #[arg(long = "ignore")]
    pub ignoring: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Path where to create .archtest.toml (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}
