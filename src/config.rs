//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/twentyq/twentyq.toml`
//! 3. Explicit config file given with `--config`
//! 4. Environment variables: `TWENTYQ_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{expand_env_vars, Seed, TagPolicy};

/// Unified configuration for twentyq.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct Settings {
    /// Built-in tree a new game starts from (default: small)
    pub seed: Seed,
    /// How tree files with unknown node tags are treated (default: strict)
    pub tag_policy: TagPolicy,
    /// Tree file used when a command gets no FILE argument
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_file: Option<PathBuf>,
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub seed: Option<Seed>,
    pub tag_policy: Option<TagPolicy>,
    pub tree_file: Option<PathBuf>,
}

/// Get the XDG config directory for twentyq.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "twentyq").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("twentyq.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            seed: overlay.seed.unwrap_or(self.seed),
            tag_policy: overlay.tag_policy.unwrap_or(self.tag_policy),
            tree_file: overlay
                .tree_file
                .clone()
                .or_else(|| self.tree_file.clone()),
        }
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(tree_file) = &self.tree_file {
            let expanded = expand_env_vars(tree_file.to_string_lossy().as_ref());
            self.tree_file = Some(PathBuf::from(expanded));
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Config file passed on the command line; must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|p| p.exists());
        Self::load_layers(global.as_deref(), explicit, env_source())
    }

    /// Load from the given files and environment source.
    ///
    /// Separated from [`Settings::load`] so tests can supply their own layers.
    pub fn load_layers(
        global: Option<&Path>,
        explicit: Option<&Path>,
        env: Environment,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global {
            debug!(path = %global_path.display(), "loading global config");
            current = current.merge_with(&load_raw_settings(global_path)?);
        }

        // 3. Explicit config file
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!(path = %path.display(), "loading explicit config");
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current, env)?;

        // Expand ~ and $VAR in path-like fields
        current.expand_paths();

        Ok(current)
    }

    /// Apply TWENTYQ_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("seed") {
            settings.seed = val.parse().map_err(|message| ApplicationError::Config {
                message: format!("TWENTYQ_SEED: {message}"),
            })?;
        }
        if let Ok(val) = config.get_string("tag_policy") {
            settings.tag_policy = val.parse().map_err(|message| ApplicationError::Config {
                message: format!("TWENTYQ_TAG_POLICY: {message}"),
            })?;
        }
        if let Ok(val) = config.get_string("tree_file") {
            settings.tree_file = Some(PathBuf::from(val));
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# twentyq configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/twentyq/twentyq.toml
#   Explicit: twentyq --config <file>
#   Env:      TWENTYQ_SEED, TWENTYQ_TAG_POLICY, TWENTYQ_TREE_FILE

# Built-in tree to start from: "small" or "medium"
# seed = "small"

# Tree file tags: "strict" rejects anything but "Leaf" / "Internal node",
# "lenient" treats every other tag as an internal node
# tag_policy = "strict"

# Tree file loaded when no FILE argument is given
# tree_file = "~/.local/share/twentyq/animals.txt"
"#
        .to_string()
    }
}

/// Environment source for `TWENTYQ_*` variables.
pub fn env_source() -> Environment {
    Environment::with_prefix("TWENTYQ")
        .prefix_separator("_")
        .separator("__")
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
