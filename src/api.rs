//! Library API for checking a project's configured rules.
//!
//! Test suites usually build a [`Policy`](crate::Policy) directly against a
//! [`ModuleGraph`]. The functions here cover the other use: evaluating the
//! rules of a project's `.archtest.toml` against its module manifest and
//! getting a [`CheckReport`] back.
//!
//! # Example
//!
//! ```no_run
//! use archtest::{CheckOptions, check};
//! use std::path::Path;
//!
//! let report = check(Path::new("."), CheckOptions::default())?;
//! for rule in &report.rules {
//!     for violation in &rule.violations {
//!         println!("{}: {}", rule.name, violation);
//!     }
//! }
//! # Ok::<(), archtest::ArchtestError>(())
//! ```

use crate::analysis;
use crate::config::{Config, ConfigError, Rule};
use crate::fs::{FileSystem, default_fs};
use crate::model::CheckReport;
use crate::resolver::{ManifestError, ModuleGraph, load_manifest};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchtestError {
    /// The specified path could not be found or resolved.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// A rule was requested by name but is not configured.
    #[error("Unknown rule: {0}")]
    UnknownRule(String),
}

/// Options for the `check` function.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Rules to evaluate by name (empty means every configured rule).
    pub rules: Vec<String>,
}

/// A project root together with its configuration and module graph.
#[derive(Debug)]
pub struct Project {
    pub root: PathBuf,
    pub name: String,
    pub config: Config,
    pub graph: ModuleGraph,
}

impl Project {
    /// Resolve `path`, load `.archtest.toml` from it and the manifest it
    /// names.
    pub fn open(path: &Path) -> Result<Self, ArchtestError> {
        let root = path
            .canonicalize()
            .map_err(|_| ArchtestError::PathNotFound(path.to_path_buf()))?;
        let config = Config::load(&root)?;
        Self::from_config(root, config, default_fs())
    }

    pub fn from_config(
        root: PathBuf,
        config: Config,
        fs: &dyn FileSystem,
    ) -> Result<Self, ArchtestError> {
        let graph = load_manifest(&config.manifest_path(&root), fs)?;
        let name = root
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("project")
            .to_string();

        Ok(Self {
            root,
            name,
            config,
            graph,
        })
    }

    /// Configured rules selected by name, in configuration order.
    pub fn select_rules(&self, names: &[String]) -> Result<Vec<Rule>, ArchtestError> {
        if let Some(unknown) = names.iter().find(|n| self.config.rule(n).is_none()) {
            return Err(ArchtestError::UnknownRule(unknown.clone()));
        }

        Ok(self
            .config
            .rules
            .iter()
            .filter(|r| names.is_empty() || names.contains(&r.name))
            .cloned()
            .collect())
    }

    pub fn check(&self, options: &CheckOptions) -> Result<CheckReport, ArchtestError> {
        let rules = self.select_rules(&options.rules)?;

        Ok(CheckReport {
            project_name: self.name.clone(),
            rules: analysis::evaluate_rules(&rules, &self.graph),
        })
    }
}

/// Evaluate the configured rules of the project at `path`.
///
/// Violations are part of the returned report, not errors: a project whose
/// rules are broken still yields `Ok`. Use [`CheckReport::is_clean`] to
/// decide whether the check passed.
pub fn check(path: &Path, options: CheckOptions) -> Result<CheckReport, ArchtestError> {
    Project::open(path)?.check(&options)
}
