use crate::fs::{FileSystem, default_fs};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = ".archtest.toml";
pub const DEFAULT_MANIFEST: &str = "modules.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Rule '{0}' is defined more than once")]
    DuplicateRule(String),
    #[error("Rule '{name}' has no {field}")]
    IncompleteRule { name: String, field: &'static str },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Module manifest, relative to the project root unless absolute.
    pub manifest: PathBuf,
    pub rules: Vec<Rule>,
}

/// One dependency policy: `packages` must not reach any of `forbid`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub packages: Vec<String>,
    pub forbid: Vec<String>,
    /// Only flag imports made by the packages themselves.
    pub direct: bool,
    pub include_tests: bool,
    pub ignoring: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    manifest: Option<PathBuf>,
    #[serde(default, rename = "rule")]
    rules: Vec<RawRule>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    name: Option<String>,
    #[serde(default)]
    packages: Vec<String>,
    #[serde(default)]
    forbid: Vec<String>,
    direct: Option<bool>,
    include_tests: Option<bool>,
    #[serde(default)]
    ignoring: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            rules: Vec::new(),
        }
    }
}

impl Config {
    pub fn load(project_path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_fs(project_path, default_fs())
    }

    pub fn load_with_fs(project_path: &Path, fs: &dyn FileSystem) -> Result<Self, ConfigError> {
        let config_path = project_path.join(CONFIG_FILE);

        if !fs.exists(&config_path) {
            return Ok(Self::default());
        }

        let content = fs.read_to_string(&config_path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;

        let mut names = HashSet::new();
        let mut rules = Vec::with_capacity(raw.rules.len());

        for (idx, raw_rule) in raw.rules.into_iter().enumerate() {
            let name = raw_rule
                .name
                .unwrap_or_else(|| format!("rule-{}", idx + 1));

            if !names.insert(name.clone()) {
                return Err(ConfigError::DuplicateRule(name));
            }
            if raw_rule.packages.is_empty() {
                return Err(ConfigError::IncompleteRule {
                    name,
                    field: "packages",
                });
            }
            if raw_rule.forbid.is_empty() {
                return Err(ConfigError::IncompleteRule {
                    name,
                    field: "forbid",
                });
            }

            rules.push(Rule {
                name,
                packages: raw_rule.packages,
                forbid: raw_rule.forbid,
                direct: raw_rule.direct.unwrap_or(false),
                include_tests: raw_rule.include_tests.unwrap_or(false),
                ignoring: raw_rule.ignoring,
            });
        }

        Ok(Self {
            manifest: raw
                .manifest
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST)),
            rules,
        })
    }

    pub fn manifest_path(&self, project_path: &Path) -> PathBuf {
        if self.manifest.is_absolute() {
            self.manifest.clone()
        } else {
            project_path.join(&self.manifest)
        }
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }
}

/// Starter `.archtest.toml` written by `archtest init`.
pub fn generate_config_template() -> String {
    r#"# archtest configuration
# Each rule asserts that `packages` never reach any module in `forbid`.
# Module identifiers ending in "/..." match the module and everything below it.

# Module manifest describing the import graph (relative to this file)
manifest = "modules.toml"

[[rule]]
name = "delivery-skips-persistence"
packages = ["example.com/app/delivery/..."]
forbid = ["example.com/app/persistence/..."]
# Only flag imports made by the packages themselves
direct = true

[[rule]]
name = "domain-is-pure"
packages = ["example.com/app/domain/..."]
forbid = ["example.com/app/delivery/...", "example.com/app/persistence/..."]
# Follow imports made by test code as well
include_tests = false
# Modules never traversed
ignoring = []
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFs;

    #[test]
    fn test_template_parses() {
        let config = Config::parse(&generate_config_template()).unwrap();

        assert_eq!(config.manifest, PathBuf::from("modules.toml"));
        assert_eq!(config.rules.len(), 2);
        assert!(config.rules[0].direct);
        assert!(!config.rules[1].direct);
        assert_eq!(config.rules[1].forbid.len(), 2);
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let fs = MockFs::new();
        let config = Config::load_with_fs(Path::new("/project"), &fs).unwrap();

        assert!(config.rules.is_empty());
        assert_eq!(
            config.manifest_path(Path::new("/project")),
            PathBuf::from("/project/modules.toml")
        );
    }

    #[test]
    fn test_unnamed_rules_are_numbered() {
        let config = Config::parse(
            r#"
[[rule]]
packages = ["a"]
forbid = ["b"]
ignoring = ["c/..."]
include_tests = true
"#,
        )
        .unwrap();

        let rule = config.rule("rule-1").unwrap();
        assert_eq!(rule.ignoring, vec!["c/..."]);
        assert!(rule.include_tests);
    }

    #[test]
    fn test_rejects_duplicate_rules() {
        let content = r#"
[[rule]]
name = "x"
packages = ["a"]
forbid = ["b"]

[[rule]]
name = "x"
packages = ["c"]
forbid = ["d"]
"#;
        assert!(matches!(
            Config::parse(content),
            Err(ConfigError::DuplicateRule(name)) if name == "x"
        ));
    }

    #[test]
    fn test_rejects_rule_without_forbidden_modules() {
        let content = r#"
[[rule]]
name = "x"
packages = ["a"]
"#;
        assert!(matches!(
            Config::parse(content),
            Err(ConfigError::IncompleteRule { field: "forbid", .. })
        ));
    }

    #[test]
    fn test_absolute_manifest_path() {
        let config = Config::parse("manifest = \"/graphs/app.json\"").unwrap();

        assert_eq!(
            config.manifest_path(Path::new("/project")),
            PathBuf::from("/graphs/app.json")
        );
    }
}
