//! Configuration loader with tier-based merging.
//!
//! Loads configuration from multiple tiers and merges them field-by-field.

use super::merge::merge_all;
use super::types::Config;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the configuration file inside a config directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Configuration tier priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// Built-in defaults (lowest priority)
    Defaults = 0,
    /// Project-level config ($CWD/.settings-compare/)
    Project = 1,
    /// User-level config (~/.settings-compare/)
    User = 2,
    /// Explicit file from --config or SETTINGS_COMPARE_CONFIG_PATH
    Explicit = 3,
    /// Environment variables (highest priority)
    Environment = 4,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::Defaults => write!(f, "defaults"),
            ConfigTier::Project => write!(f, "project"),
            ConfigTier::User => write!(f, "user"),
            ConfigTier::Explicit => write!(f, "explicit"),
            ConfigTier::Environment => write!(f, "environment"),
        }
    }
}

/// Paths for each configuration tier.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Project-level config directory
    pub project_dir: Option<PathBuf>,
    /// User-level config directory
    pub user_dir: Option<PathBuf>,
    /// Explicit config file, merged last
    pub explicit_file: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover configuration paths from environment and defaults.
    pub fn discover() -> Self {
        // User dir: SETTINGS_COMPARE_USER_DIR or ~/.settings-compare
        let user_dir = std::env::var("SETTINGS_COMPARE_USER_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".settings-compare")));

        // Project dir: SETTINGS_COMPARE_PROJECT_DIR or $CWD/.settings-compare
        let project_dir = std::env::var("SETTINGS_COMPARE_PROJECT_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from(".settings-compare")));

        let explicit_file = std::env::var("SETTINGS_COMPARE_CONFIG_PATH")
            .ok()
            .map(PathBuf::from);

        Self {
            project_dir,
            user_dir,
            explicit_file,
        }
    }

    /// Create paths with explicit directories.
    pub fn with_dirs(project_dir: Option<PathBuf>, user_dir: Option<PathBuf>) -> Self {
        Self {
            project_dir,
            user_dir,
            explicit_file: None,
        }
    }

    /// Set the explicit config file.
    pub fn with_explicit_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_file = Some(path.into());
        self
    }
}

/// Configuration loader that handles tier-based merging.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Paths for each tier
    pub paths: ConfigPaths,
    /// Loaded configuration
    config: Config,
    /// Tiers that contributed to the configuration, in merge order
    tiers: Vec<ConfigTier>,
}

impl ConfigLoader {
    /// Load configuration from all tiers, then apply environment overrides.
    ///
    /// `explicit` (from `--config`) takes precedence over
    /// `SETTINGS_COMPARE_CONFIG_PATH`.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut paths = ConfigPaths::discover();
        if let Some(path) = explicit {
            paths.explicit_file = Some(path.to_path_buf());
        }
        let mut loader = Self::load_with_paths(paths)?;
        if loader.apply_env_overrides() {
            loader.tiers.push(ConfigTier::Environment);
        }
        Ok(loader)
    }

    /// Load configuration with explicit paths. Environment overrides are not applied.
    pub fn load_with_paths(paths: ConfigPaths) -> Result<Self> {
        let mut layers: Vec<Value> = Vec::new();
        let mut tiers = Vec::new();

        // Tier 1: Defaults
        layers.push(serde_json::to_value(Config::default())?);
        tiers.push(ConfigTier::Defaults);

        // Tier 2: Project config
        if let Some(ref project_dir) = paths.project_dir
            && let Some(layer) = read_optional_layer(&project_dir.join(CONFIG_FILE_NAME))
        {
            layers.push(layer);
            tiers.push(ConfigTier::Project);
        }

        // Tier 3: User config
        if let Some(ref user_dir) = paths.user_dir
            && let Some(layer) = read_optional_layer(&user_dir.join(CONFIG_FILE_NAME))
        {
            layers.push(layer);
            tiers.push(ConfigTier::User);
        }

        // Tier 4: Explicit file, which must exist
        if let Some(ref file) = paths.explicit_file {
            layers.push(read_layer(file)?);
            tiers.push(ConfigTier::Explicit);
        }

        let merged = merge_all(layers);
        let config: Config =
            serde_json::from_value(merged).context("invalid settings-compare configuration")?;
        debug!(tiers = ?tiers, "Configuration loaded");

        Ok(Self {
            paths,
            config,
            tiers,
        })
    }

    /// Apply environment variable overrides. Returns whether any applied.
    fn apply_env_overrides(&mut self) -> bool {
        let mut applied = false;

        if let Ok(raw) = std::env::var("SETTINGS_COMPARE_NULL_POLICY") {
            match raw.parse() {
                Ok(policy) => {
                    self.config.diff.null_policy = policy;
                    applied = true;
                }
                Err(e) => warn!("Ignoring SETTINGS_COMPARE_NULL_POLICY: {}", e),
            }
        }

        if let Ok(raw) = std::env::var("SETTINGS_COMPARE_KEY_POLICY") {
            match raw.parse() {
                Ok(policy) => {
                    self.config.keys.policy = policy;
                    applied = true;
                }
                Err(e) => warn!("Ignoring SETTINGS_COMPARE_KEY_POLICY: {}", e),
            }
        }

        applied
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable access to the configuration.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Tiers that contributed, lowest first.
    pub fn tiers(&self) -> &[ConfigTier] {
        &self.tiers
    }
}

/// Read a tier file that must exist.
fn read_layer(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_yaml::from_str::<Value>(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))
}

/// Read a tier file that may be absent. Unparseable files are skipped with a warning.
fn read_optional_layer(path: &Path) -> Option<Value> {
    if !path.exists() {
        return None;
    }
    match read_layer(path) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Skipping config tier: {:#}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::NullPolicy;
    use crate::flatten::KeyPolicy;
    use crate::render::OutputForm;
    use tempfile::TempDir;

    #[test]
    fn test_config_paths_discover() {
        let paths = ConfigPaths::discover();
        assert!(paths.project_dir.is_some());
        // user_dir may or may not exist depending on environment
    }

    #[test]
    fn test_load_defaults_only() {
        // Create empty temp dirs so no config files are found
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::with_dirs(
            Some(temp.path().join("project")),
            Some(temp.path().join("user")),
        );

        let loader = ConfigLoader::load_with_paths(paths).unwrap();
        assert_eq!(loader.config(), &Config::default());
        assert_eq!(loader.tiers(), [ConfigTier::Defaults]);
    }

    #[test]
    fn test_project_config_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let project_dir = temp.path().join(".settings-compare");
        std::fs::create_dir_all(&project_dir).unwrap();

        let config_content = r#"
diff:
  null_policy: omit
"#;
        std::fs::write(project_dir.join(CONFIG_FILE_NAME), config_content).unwrap();

        let paths = ConfigPaths::with_dirs(Some(project_dir), Some(temp.path().join("user")));

        let loader = ConfigLoader::load_with_paths(paths).unwrap();
        let config = loader.config();

        assert_eq!(config.diff.null_policy, NullPolicy::Omit);
        // format should be default
        assert_eq!(config.diff.format, OutputForm::Json);
        assert_eq!(loader.tiers(), [ConfigTier::Defaults, ConfigTier::Project]);
    }

    #[test]
    fn test_user_config_overrides_project() {
        let temp = TempDir::new().unwrap();
        let project_dir = temp.path().join("project");
        let user_dir = temp.path().join("user");
        std::fs::create_dir_all(&project_dir).unwrap();
        std::fs::create_dir_all(&user_dir).unwrap();

        let project_config = r#"
diff:
  format: flat
keys:
  policy: reject
"#;
        std::fs::write(project_dir.join(CONFIG_FILE_NAME), project_config).unwrap();

        let user_config = r#"
keys:
  policy: expand
"#;
        std::fs::write(user_dir.join(CONFIG_FILE_NAME), user_config).unwrap();

        let paths = ConfigPaths::with_dirs(Some(project_dir), Some(user_dir));

        let loader = ConfigLoader::load_with_paths(paths).unwrap();
        let config = loader.config();

        // policy should be from user
        assert_eq!(config.keys.policy, KeyPolicy::Expand);
        // format should be from project
        assert_eq!(config.diff.format, OutputForm::Flat);
    }

    #[test]
    fn test_explicit_file_wins() {
        let temp = TempDir::new().unwrap();
        let user_dir = temp.path().join("user");
        std::fs::create_dir_all(&user_dir).unwrap();
        std::fs::write(user_dir.join(CONFIG_FILE_NAME), "output:\n  show_inputs: true\n").unwrap();
        let explicit = temp.path().join("ci.yaml");
        std::fs::write(&explicit, "output:\n  show_inputs: false\n").unwrap();

        let paths = ConfigPaths::with_dirs(None, Some(user_dir)).with_explicit_file(&explicit);
        let loader = ConfigLoader::load_with_paths(paths).unwrap();

        assert!(!loader.config().output.show_inputs);
        assert_eq!(loader.tiers().last(), Some(&ConfigTier::Explicit));
    }

    #[test]
    fn test_comment_only_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let explicit = temp.path().join("empty.yaml");
        std::fs::write(&explicit, "# nothing here\n").unwrap();

        let paths = ConfigPaths::with_dirs(None, None).with_explicit_file(&explicit);
        let loader = ConfigLoader::load_with_paths(paths).unwrap();
        assert_eq!(loader.config(), &Config::default());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::with_dirs(None, None).with_explicit_file(temp.path().join("nope.yaml"));
        let err = ConfigLoader::load_with_paths(paths).unwrap_err();
        assert!(format!("{:#}", err).contains("nope.yaml"));
    }

    #[test]
    fn test_malformed_optional_tier_is_skipped() {
        let temp = TempDir::new().unwrap();
        let project_dir = temp.path().join("project");
        std::fs::create_dir_all(&project_dir).unwrap();
        std::fs::write(project_dir.join(CONFIG_FILE_NAME), "diff: [unclosed").unwrap();

        let paths = ConfigPaths::with_dirs(Some(project_dir), None);
        let loader = ConfigLoader::load_with_paths(paths).unwrap();
        assert_eq!(loader.config(), &Config::default());
    }

    #[test]
    fn test_invalid_value_in_tier_is_error() {
        let temp = TempDir::new().unwrap();
        let project_dir = temp.path().join("project");
        std::fs::create_dir_all(&project_dir).unwrap();
        std::fs::write(project_dir.join(CONFIG_FILE_NAME), "diff:\n  null_policy: drop\n").unwrap();

        let paths = ConfigPaths::with_dirs(Some(project_dir), None);
        assert!(ConfigLoader::load_with_paths(paths).is_err());
    }
}
