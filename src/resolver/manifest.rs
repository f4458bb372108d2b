use super::graph::{ModuleGraph, ModuleSpec};
use crate::fs::FileSystem;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read module manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse module manifest: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Failed to parse module manifest: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Module declared twice in manifest: {0}")]
    DuplicateModule(String),
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default, rename = "module")]
    modules: Vec<RawModule>,
}

#[derive(Debug, Deserialize)]
struct RawModule {
    name: String,
    #[serde(default)]
    imports: Vec<String>,
    #[serde(default)]
    test_imports: Vec<String>,
    #[serde(default)]
    xtest_imports: Vec<String>,
    #[serde(default)]
    runtime: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ManifestFormat {
    Toml,
    Json,
}

impl ManifestFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => ManifestFormat::Json,
            _ => ManifestFormat::Toml,
        }
    }
}

/// Load a module graph from a `.toml` or `.json` manifest.
pub fn load_manifest(path: &Path, fs: &dyn FileSystem) -> Result<ModuleGraph, ManifestError> {
    let content = fs.read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let graph = match ManifestFormat::from_path(path) {
        ManifestFormat::Toml => parse_manifest(&content)?,
        ManifestFormat::Json => from_raw(serde_json::from_str(&content)?)?,
    };
    tracing::debug!(path = %path.display(), modules = graph.len(), "loaded module manifest");
    Ok(graph)
}

/// Parse a TOML manifest.
pub fn parse_manifest(content: &str) -> Result<ModuleGraph, ManifestError> {
    let raw: RawManifest = toml::from_str(content)?;
    from_raw(raw)
}

fn from_raw(raw: RawManifest) -> Result<ModuleGraph, ManifestError> {
    let mut seen = HashSet::new();
    let mut graph = ModuleGraph::new();

    for module in raw.modules {
        if !seen.insert(module.name.clone()) {
            return Err(ManifestError::DuplicateModule(module.name));
        }
        graph.add_module(ModuleSpec {
            name: module.name,
            imports: module.imports,
            test_imports: module.test_imports,
            xtest_imports: module.xtest_imports,
            runtime: module.runtime,
        });
    }

    Ok(graph)
}
