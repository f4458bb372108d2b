mod check;
mod init;
mod walk;

pub use check::cmd_check;
pub use init::cmd_init;
pub use walk::cmd_walk;

use crate::api::{ArchtestError, Project};
use crate::config::Config;
use crate::fs::default_fs;
use crate::style;
use std::path::Path;

/// Exit code when at least one rule is violated.
pub const EXIT_VIOLATIONS: i32 = 1;
/// Exit code when the check could not run at all.
pub const EXIT_SETUP: i32 = 2;

/// Shared context for command execution: the resolved project with its
/// configuration and module graph.
pub struct CommandContext {
    pub project: Project,
}

impl CommandContext {
    /// Resolve the path, load config and the module manifest. `manifest`
    /// overrides the manifest named in the config.
    /// Returns Err(exit_code) if setup fails.
    pub fn new(path: &Path, manifest: Option<&Path>) -> Result<Self, i32> {
        let resolved_path = match path.canonicalize() {
            Ok(p) => p,
            Err(_) => {
                style::error(&format!("Could not resolve path: {}", style::path(path)));
                return Err(EXIT_SETUP);
            }
        };

        let mut config = match Config::load(&resolved_path) {
            Ok(config) => config,
            Err(e) => {
                style::error(&format!("Failed to load config: {}", e));
                return Err(EXIT_SETUP);
            }
        };
        if let Some(manifest) = manifest {
            config.manifest = manifest.to_path_buf();
        }

        match Project::from_config(resolved_path, config, default_fs()) {
            Ok(project) => Ok(Self { project }),
            Err(e) => {
                report_setup_error(&e);
                Err(EXIT_SETUP)
            }
        }
    }
}

fn report_setup_error(err: &ArchtestError) {
    style::error(&err.to_string());
    if let ArchtestError::Manifest(_) = err {
        style::hint("Point `manifest` in .archtest.toml at a module manifest, or pass --manifest");
    }
}
