//! Configuration file schema for react-tsdoc.
//!
//! Configuration is optional; every field has a default so a missing file
//! and an empty file behave the same.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::docgen::DocOptions;
use crate::tsdoc::{TagDefinition, TagSet};

/// Config file names searched for in the working directory, in order.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["react-tsdoc.yaml", ".react-tsdoc.yaml"];

static TAG_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^@[A-Za-z][A-Za-z0-9]*$").unwrap());

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// File extensions (without dot) loaded into the compilation unit.
    pub extensions: Vec<String>,
    /// Glob patterns for paths to leave out (e.g. "**/*.test.tsx").
    pub excluded_paths: Vec<String>,
    /// Whether a props type reference that names nothing is an error.
    pub strict_type_references: bool,
    /// Indent JSON output.
    pub pretty: bool,
    /// Comment tags in addition to the standard set.
    pub tags: Vec<TagDefinition>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: vec!["ts".to_string(), "tsx".to_string()],
            excluded_paths: Vec::new(),
            strict_type_references: true,
            pretty: false,
            tags: Vec::new(),
        }
    }
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Parse a config from YAML text. Empty text yields the defaults.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Check if a path should be excluded based on excluded_paths patterns.
    /// Uses globset for matching, which supports `**` for recursive directory matching.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.excluded_paths.is_empty() {
            return false;
        }

        let path_str = path.to_string_lossy();

        self.excluded_paths.iter().any(|pattern| {
            globset::Glob::new(pattern)
                .map(|glob| glob.compile_matcher().is_match(&*path_str))
                .unwrap_or(false)
        })
    }

    /// Whether files with extension `ext` are loaded.
    pub fn handles_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }

    /// Standard tags plus the configured ones.
    pub fn tag_set(&self) -> TagSet {
        TagSet::with_custom(self.tags.iter().cloned())
    }

    /// Extraction settings derived from this config.
    pub fn doc_options(&self) -> DocOptions {
        DocOptions {
            tags: self.tag_set(),
            strict_type_references: self.strict_type_references,
        }
    }
}

/// Discover a config file in `dir`.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Validate a config for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.extensions.is_empty() {
        anyhow::bail!("extensions must not be empty");
    }
    for ext in &config.extensions {
        if crate::analysis::get_analyzer(ext).is_none() {
            anyhow::bail!(
                "unsupported extension {:?}, must be one of: {}",
                ext,
                crate::analysis::registered_extensions().join(", ")
            );
        }
    }

    for tag in &config.tags {
        if !TAG_NAME.is_match(&tag.name) {
            anyhow::bail!(
                "invalid tag name {:?}, must be '@' followed by letters or digits",
                tag.name
            );
        }
    }

    // Validate excluded_paths glob patterns compile
    for pattern in &config.excluded_paths {
        globset::Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
    }

    Ok(())
}

/// Starter config written by `react-tsdoc init`.
pub const TEMPLATE: &str = r#"# react-tsdoc configuration

# File extensions loaded into the compilation unit.
extensions: [ts, tsx]

# Glob patterns for paths to leave out.
excluded_paths:
  - "**/*.test.tsx"
  - "**/*.stories.tsx"

# Fail when a props type reference cannot be found in the loaded files.
strict_type_references: true

# Indent JSON output.
pretty: false

# Extra comment tags. syntax: block | modifier | inline
# binding: text | named | prop (prop descriptions are merged into the table)
tags: []
#  - name: "@slot"
#    syntax: block
#    binding: prop
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tsdoc::{TagBinding, TagSyntax};
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
extensions: [tsx]
excluded_paths:
  - "**/*.stories.tsx"
strict_type_references: false
tags:
  - name: "@slot"
    syntax: block
    binding: prop
"#;
        let config = Config::parse_str(yaml).unwrap();
        assert_eq!(config.extensions, vec!["tsx"]);
        assert!(!config.strict_type_references);
        assert!(!config.pretty);
        assert_eq!(config.tags.len(), 1);
        assert!(validate(&config).is_ok());

        let tags = config.tag_set();
        assert_eq!(tags.get("@slot").unwrap().binding, TagBinding::Prop);
        assert!(!config.doc_options().strict_type_references);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::parse_str("\n").unwrap();
        assert_eq!(config.extensions, vec!["ts", "tsx"]);
        assert!(config.strict_type_references);
    }

    #[test]
    fn test_template_is_valid() {
        let config = Config::parse_str(TEMPLATE).unwrap();
        assert!(validate(&config).is_ok());
        assert!(config.is_path_excluded(Path::new("src/Button.stories.tsx")));
        assert!(!config.is_path_excluded(Path::new("src/Button.tsx")));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.tags.push(TagDefinition::new("slot", TagSyntax::Block, TagBinding::Prop));
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.excluded_paths.push("[".to_string());
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.extensions.push("jsx".to_string());
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_discover() {
        let temp = TempDir::new().unwrap();
        assert!(discover(temp.path()).is_none());

        fs::write(temp.path().join(".react-tsdoc.yaml"), "pretty: true\n").unwrap();
        let found = discover(temp.path()).unwrap();
        assert!(found.ends_with(".react-tsdoc.yaml"));
        assert!(Config::parse_file(found).unwrap().pretty);
    }
}
