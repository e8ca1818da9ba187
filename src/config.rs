//! Application configuration management.
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. `config.toml` in the platform config directory (or `--config PATH`)
//! 3. `DUPMATCH_*` environment variables (`__` separates nested keys)
//! 4. Command-line flags
//!
//! A file may also define named profiles that override the base settings:
//!
//! ```toml
//! recursive = true
//!
//! [profile.media]
//! skip_hidden = true
//! ignore_patterns = ["*.part", "Thumbs.db"]
//! ```

use anyhow::Result;
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, OutputFormat};
use crate::duplicates::{EmptyFilePolicy, MatcherConfig};
use crate::scanner::WalkerConfig;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "DUPMATCH_";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Follow symlinks to directories while recursing.
    pub follow_symlinks: bool,
    /// Skip hidden files and directories.
    pub skip_hidden: bool,
    /// Honour `.gitignore` at each directory root.
    pub use_gitignore: bool,
    /// Treat empty files as duplicates of each other.
    pub include_empty: bool,
    /// Glob patterns to ignore.
    pub ignore_patterns: Vec<String>,
    /// Output format.
    pub output: OutputFormat,
    /// Named profiles.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub profile: HashMap<String, ProfileConfig>,
}

/// Overrides applied by a named profile. Unset fields keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Override for [`Config::recursive`].
    pub recursive: Option<bool>,
    /// Override for [`Config::follow_symlinks`].
    pub follow_symlinks: Option<bool>,
    /// Override for [`Config::skip_hidden`].
    pub skip_hidden: Option<bool>,
    /// Override for [`Config::use_gitignore`].
    pub use_gitignore: Option<bool>,
    /// Override for [`Config::include_empty`].
    pub include_empty: Option<bool>,
    /// Replaces [`Config::ignore_patterns`] entirely.
    pub ignore_patterns: Option<Vec<String>>,
    /// Override for [`Config::output`].
    pub output: Option<OutputFormat>,
}

impl Config {
    /// Load the configuration from the default platform-specific path.
    #[must_use]
    pub fn load(profile: Option<&str>) -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_from_path(path, profile),
            Err(e) => {
                log::debug!("No config directory, using defaults: {}", e);
                Self::load_layers(Figment::from(Serialized::defaults(Self::default())), profile)
            }
        }
    }

    /// Load the configuration from `path`, then environment, then `profile`.
    ///
    /// A missing file is not an error. A malformed one is logged and the
    /// defaults are used instead.
    #[must_use]
    pub fn load_from_path(path: PathBuf, profile: Option<&str>) -> Self {
        let figment =
            Figment::from(Serialized::defaults(Self::default())).merge(Toml::file(&path));
        log::debug!("Loading config from {}", path.display());
        Self::load_layers(figment, profile)
    }

    fn load_layers(figment: Figment, profile: Option<&str>) -> Self {
        let figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        let mut config: Self = match figment.extract() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid configuration, using defaults: {}", e);
                Self::default()
            }
        };

        if let Some(name) = profile {
            match config.profile.get(name).cloned() {
                Some(overrides) => {
                    log::debug!("Applying profile '{}'", name);
                    config.apply_profile(&overrides);
                }
                None => log::warn!("Profile '{}' not found, using base configuration", name),
            }
        }
        config
    }

    fn apply_profile(&mut self, p: &ProfileConfig) {
        if let Some(v) = p.recursive {
            self.recursive = v;
        }
        if let Some(v) = p.follow_symlinks {
            self.follow_symlinks = v;
        }
        if let Some(v) = p.skip_hidden {
            self.skip_hidden = v;
        }
        if let Some(v) = p.use_gitignore {
            self.use_gitignore = v;
        }
        if let Some(v) = p.include_empty {
            self.include_empty = v;
        }
        if let Some(v) = &p.ignore_patterns {
            self.ignore_patterns.clone_from(v);
        }
        if let Some(v) = p.output {
            self.output = v;
        }
    }

    /// Apply command-line flags. Flags only ever switch options on; patterns
    /// are appended to the configured ones.
    pub fn merge_cli(&mut self, cli: &Cli) {
        self.recursive |= cli.recursive;
        self.follow_symlinks |= cli.follow_symlinks;
        self.skip_hidden |= cli.skip_hidden;
        self.use_gitignore |= cli.gitignore;
        self.include_empty |= cli.include_empty;
        for pattern in &cli.ignore_patterns {
            if !self.ignore_patterns.contains(pattern) {
                self.ignore_patterns.push(pattern.clone());
            }
        }
        if let Some(output) = cli.output {
            self.output = output;
        }
    }

    /// Directory listing settings.
    #[must_use]
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            recursive: self.recursive,
            follow_symlinks: self.follow_symlinks,
            skip_hidden: self.skip_hidden,
            use_gitignore: self.use_gitignore,
            ignore_patterns: self.ignore_patterns.clone(),
        }
    }

    /// Matcher settings.
    #[must_use]
    pub fn matcher_config(&self) -> MatcherConfig {
        MatcherConfig::default()
            .with_walker_config(self.walker_config())
            .with_empty_files(EmptyFilePolicy::from_include(self.include_empty))
    }

    /// Write the configuration as TOML to `path`, creating parent directories.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default platform-specific configuration path.
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "dupmatch", "dupmatch")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }
}
