//! Planner Configuration
//!
//! Deployment-specific tables and policies used by the plan compiler.
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults ([`PlannerConfig::default`])
//! 2. A YAML file ([`PlannerConfig::load`])
//! 3. Environment variables ([`PlannerConfig::apply_env`])
//! 4. Command-line flags (applied by the binary)
//!
//! # Example YAML
//!
//! ```yaml
//! base_url: https://staging.example.com
//! pages:
//!   auth: /auth
//!   settings: /settings
//! languages:
//!   Italian: it
//! filenames:
//!   separator: "-"
//!   disambiguator: timestamp
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::plan::filename::FilenamePolicy;
use crate::plan::highlight::{default_hint_rules, HighlightStyle, HintRule};

/// Environment variable overriding [`PlannerConfig::base_url`].
pub const ENV_BASE_URL: &str = "SHOTPLAN_BASE_URL";

/// Environment variable overriding [`PlannerConfig::screenshots_dir`].
pub const ENV_SCREENSHOTS_DIR: &str = "SHOTPLAN_SCREENSHOTS_DIR";

/// Address of the app under review when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5173";

/// Language code that never gets a `lang` query parameter.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Path used for page labels missing from the page table.
pub const DEFAULT_PATH: &str = "/";

/// Directory screenshot paths are derived under.
pub const DEFAULT_SCREENSHOTS_DIR: &str = "screenshots";

/// Built-in language name to code table.
pub static DEFAULT_LANGUAGES: Lazy<BTreeMap<String, String>> = Lazy::new(|| {
    [
        ("Spanish", "es"),
        ("French", "fr"),
        ("German", "de"),
        ("English", "en"),
    ]
    .into_iter()
    .map(|(name, code)| (name.to_string(), code.to_string()))
    .collect()
});

/// Built-in page label to path table.
pub static DEFAULT_PAGES: Lazy<BTreeMap<String, String>> = Lazy::new(|| {
    [("landing", "/"), ("auth", "/login"), ("dashboard", "/dashboard")]
        .into_iter()
        .map(|(page, path)| (page.to_string(), path.to_string()))
        .collect()
});

/// Errors raised while loading or checking configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Everything the compiler needs to know about the target deployment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PlannerConfig {
    /// Scheme, host and port of the app (no trailing slash needed)
    pub base_url: String,

    /// Language code for which no `lang` parameter is appended
    pub default_language: String,

    /// Language name -> code (case-insensitive on the name)
    pub languages: BTreeMap<String, String>,

    /// Page label -> URL path (case-insensitive on the label)
    pub pages: BTreeMap<String, String>,

    /// Path for page labels missing from `pages`
    pub default_path: String,

    /// Directory the harness stores screenshots in
    pub screenshots_dir: String,

    /// How screenshot filenames are composed
    pub filenames: FilenamePolicy,

    /// Ordered hint keyword -> strategy rules; first match wins
    pub hint_rules: Vec<HintRule>,

    /// Visual treatment applied by the generated scripts
    pub highlight: HighlightStyle,

    /// Abort compilation on the first invalid item instead of skipping it
    pub strict: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
            languages: DEFAULT_LANGUAGES.clone(),
            pages: DEFAULT_PAGES.clone(),
            default_path: DEFAULT_PATH.to_string(),
            screenshots_dir: DEFAULT_SCREENSHOTS_DIR.to_string(),
            filenames: FilenamePolicy::default(),
            hint_rules: default_hint_rules(),
            highlight: HighlightStyle::default(),
            strict: false,
        }
    }
}

impl PlannerConfig {
    /// Loads configuration from a YAML file on top of the defaults.
    ///
    /// Tables given in the file replace the built-in ones entirely.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_yaml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from YAML text. Missing keys keep their defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Overrides fields from `SHOTPLAN_*` environment variables.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            debug!("{} overrides base URL: {}", ENV_BASE_URL, url);
            self.base_url = url.trim().to_string();
        }

        if let Some(dir) = lookup(ENV_SCREENSHOTS_DIR).filter(|v| !v.trim().is_empty()) {
            debug!("{} overrides screenshots dir: {}", ENV_SCREENSHOTS_DIR, dir);
            self.screenshots_dir = dir.trim().to_string();
        }
    }

    /// Checks values the compiler cannot work without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".to_string()));
        }

        if self.filenames.separator.is_empty() {
            return Err(ConfigError::Invalid(
                "filenames.separator must not be empty".to_string(),
            ));
        }

        // The index prefix must stay distinguishable from the rest of the name.
        if self.filenames.separator.chars().any(char::is_alphanumeric) {
            return Err(ConfigError::Invalid(format!(
                "filenames.separator '{}' must not contain letters or digits",
                self.filenames.separator
            )));
        }

        if self.filenames.extension.trim_start_matches('.').is_empty() {
            return Err(ConfigError::Invalid(
                "filenames.extension must not be empty".to_string(),
            ));
        }

        if let Some(position) = self.hint_rules.iter().position(|r| r.keyword.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "hint_rules[{}] has an empty keyword",
                position
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::filename::Disambiguator;
    use crate::plan::highlight::HighlightStrategy;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_tables() {
        let config = PlannerConfig::default();

        assert_eq!(config.base_url, "http://localhost:5173");
        assert_eq!(config.languages.get("Spanish").map(String::as_str), Some("es"));
        assert_eq!(config.pages.get("auth").map(String::as_str), Some("/login"));
        assert_eq!(config.default_path, "/");
        assert!(!config.strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_partial_keeps_defaults() {
        let yaml = r#"
base_url: https://staging.example.com
pages:
  auth: /auth
filenames:
  separator: "-"
  disambiguator: timestamp
"#;
        let config = PlannerConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.base_url, "https://staging.example.com");
        assert_eq!(config.pages.len(), 1);
        assert_eq!(config.pages["auth"], "/auth");
        assert_eq!(config.filenames.separator, "-");
        assert_eq!(config.filenames.disambiguator, Disambiguator::Timestamp);
        assert_eq!(config.filenames.extension, "png");
        assert_eq!(config.languages, *DEFAULT_LANGUAGES);
    }

    #[test]
    fn test_from_yaml_hint_rules() {
        let yaml = r#"
hint_rules:
  - keyword: popup
    strategy: tooltip
"#;
        let config = PlannerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.hint_rules.len(), 1);
        assert_eq!(config.hint_rules[0].strategy, HighlightStrategy::Tooltip);
    }

    #[test]
    fn test_from_yaml_empty_is_default() {
        let config = PlannerConfig::from_yaml_str("  \n").unwrap();
        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn test_load_config_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("shotplan.yaml");
        std::fs::write(&path, "screenshots_dir: out/shots\nstrict: true\n").unwrap();

        let config = PlannerConfig::load(&path).unwrap();
        assert_eq!(config.screenshots_dir, "out/shots");
        assert!(config.strict);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = PlannerConfig::load("/nonexistent/shotplan.yaml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_config_invalid_yaml() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("bad.yaml");
        std::fs::write(&path, "pages: [[[").unwrap();

        let result = PlannerConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_validate_rejects_empty_values() {
        let mut config = PlannerConfig::default();
        config.base_url = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = PlannerConfig::default();
        config.filenames.separator.clear();
        assert!(config.validate().is_err());

        let mut config = PlannerConfig::default();
        config.hint_rules.push(HintRule::new(" ", HighlightStrategy::FullText));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("empty keyword"));
    }

    #[test]
    fn test_demo_config_matches_defaults() {
        let yaml = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/shotplan.yaml"));
        let config = PlannerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = PlannerConfig::default();
        config.apply_overrides(|key| match key {
            ENV_BASE_URL => Some("http://qa.local:8080".to_string()),
            ENV_SCREENSHOTS_DIR => Some("".to_string()),
            _ => None,
        });

        assert_eq!(config.base_url, "http://qa.local:8080");
        assert_eq!(config.screenshots_dir, DEFAULT_SCREENSHOTS_DIR);
    }
}
