//! Interfaces to the module namespace under test.
//!
//! The checker never reads source code. It asks a [`ModuleResolver`] for the
//! imports of one module at a time and a [`PatternMatcher`] for the concrete
//! modules behind a wildcard pattern. [`ModuleGraph`] implements both from an
//! in-memory description of the codebase.

mod graph;
mod manifest;
mod pattern;

pub use graph::{ImportKind, ModuleGraph, ModuleSpec};
pub use manifest::{ManifestError, load_manifest, parse_manifest};
pub use pattern::{WILDCARD, is_pattern, needs_expansion, pattern_matches};

use thiserror::Error;

/// Module that stands for foreign (cgo) code. It never resolves and is
/// never traversed.
pub const FOREIGN_MODULE: &str = "C";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("cannot find module {0}")]
    NotFound(String),
    #[error("{0}")]
    Failed(String),
}

/// Imports of a single module, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleImports {
    pub direct: Vec<String>,
    /// Imports only made by the module's own test code.
    pub test_only: Vec<String>,
    /// Imports made by the module's external test package.
    pub cross_package_test: Vec<String>,
    /// Runtime and vendored modules are reported but never expanded.
    pub runtime_internal: bool,
}

pub trait ModuleResolver: Send + Sync {
    fn resolve_imports(&self, module: &str) -> Result<ModuleImports, ResolveError>;
}

pub trait PatternMatcher: Send + Sync {
    /// Resolve a batch of identifiers and wildcard patterns into concrete
    /// module identifiers.
    fn match_patterns(&self, patterns: &[String]) -> Result<Vec<String>, ResolveError>;
}

/// Everything a policy needs from the codebase.
pub trait Workspace: ModuleResolver + PatternMatcher {
    fn as_resolver(&self) -> &dyn ModuleResolver;
    fn as_matcher(&self) -> &dyn PatternMatcher;
}

impl<T: ModuleResolver + PatternMatcher> Workspace for T {
    fn as_resolver(&self) -> &dyn ModuleResolver {
        self
    }

    fn as_matcher(&self) -> &dyn PatternMatcher {
        self
    }
}
