//! Assert that the modules of a codebase never depend on forbidden modules.
//!
//! Inside a Rust test, describe the import graph with a [`ModuleGraph`] and
//! state a policy against a [`TestSink`], which fails the test when the
//! policy is broken:
//!
//! ```
//! use archtest::{ModuleGraph, ModuleSpec, TestSink, package};
//!
//! let graph = ModuleGraph::from_specs([
//!     ModuleSpec::new("app/delivery").imports(["app/usecase"]),
//!     ModuleSpec::new("app/usecase"),
//!     ModuleSpec::new("app/persistence"),
//! ]);
//! let sink = TestSink::new();
//!
//! package(&sink, &graph, ["app/delivery/..."])
//!     .assert_not_dependent_on(["app/persistence/..."]);
//! ```

pub mod analysis;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod fs;
pub mod logging;
pub mod model;
pub mod output;
pub mod resolver;
pub mod sink;
pub mod style;

pub use analysis::{CheckError, IgnoreSet, PatternExpander, Policy, Reach, Walk, Walker, package};
pub use api::{ArchtestError, CheckOptions, Project, check};
pub use cli::Cli;
pub use commands::{cmd_check, cmd_init, cmd_walk};
pub use config::{Config, Rule};
pub use model::{CheckReport, DependencyNode, RuleReport, Violation};
pub use resolver::{
    ModuleGraph, ModuleImports, ModuleResolver, ModuleSpec, PatternMatcher, ResolveError, Workspace,
};
pub use sink::{ErrorSink, RecordingSink, TestSink};
