//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/arbor/arbor.toml`
//! 3. Local config: `<dir>/.arbor.toml`
//! 4. Environment variables: `ARBOR_*` prefix, `__` between section and key

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::search::Direction;
use crate::application::ApplicationError;
use crate::domain::HeapConfig;

/// Expansion engine settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExpansionSettings {
    /// Move budget used when the command line gives none
    pub moves: i32,
    /// Magnitude above which the runaway guard fires (unset: never)
    pub runaway_limit: Option<u64>,
}

impl Default for ExpansionSettings {
    fn default() -> Self {
        Self {
            moves: 10,
            runaway_limit: None,
        }
    }
}

/// Priority search settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchSettings {
    /// Serve the largest frontier value first
    pub descending: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { descending: true }
    }
}

impl SearchSettings {
    pub fn direction(&self) -> Direction {
        if self.descending {
            Direction::Descending
        } else {
            Direction::Ascending
        }
    }
}

/// Unified configuration for arbor.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub expansion: ExpansionSettings,
    pub heap: HeapConfig,
    pub search: SearchSettings,
}

/// A config file as written: every field optional, so a layer only
/// overrides what it names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawSettings {
    expansion: RawExpansion,
    heap: RawHeap,
    search: RawSearch,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawExpansion {
    moves: Option<i32>,
    /// Absent means "inherit": a later layer cannot unset a limit an
    /// earlier layer set, only replace it.
    runaway_limit: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawHeap {
    initial_capacity: Option<usize>,
    growth_threshold: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawSearch {
    descending: Option<bool>,
}

/// Get the XDG config directory for arbor.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "arbor").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("arbor.toml"))
}

/// Get the path to the local config file in `dir`.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".arbor.toml")
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
    /// Load settings with full precedence chain.
    ///
    /// Later layers replace individual fields of earlier ones; fields a layer
    /// does not name are inherited.
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            expansion: ExpansionSettings {
                moves: overlay.expansion.moves.unwrap_or(self.expansion.moves),
                runaway_limit: overlay
                    .expansion
                    .runaway_limit
                    .or(self.expansion.runaway_limit),
            },
            heap: HeapConfig {
                initial_capacity: overlay
                    .heap
                    .initial_capacity
                    .unwrap_or(self.heap.initial_capacity),
                growth_threshold: overlay
                    .heap
                    .growth_threshold
                    .unwrap_or(self.heap.growth_threshold),
            },
            search: SearchSettings {
                descending: overlay.search.descending.unwrap_or(self.search.descending),
            },
        }
    }

    /// Apply ARBOR_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ARBOR")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value::<i32>(&config, "expansion.moves")? {
            settings.expansion.moves = val;
        }
        if let Some(val) = env_value::<u64>(&config, "expansion.runaway_limit")? {
            settings.expansion.runaway_limit = Some(val);
        }
        if let Some(val) = env_value::<usize>(&config, "heap.initial_capacity")? {
            settings.heap.initial_capacity = val;
        }
        if let Some(val) = env_value::<usize>(&config, "heap.growth_threshold")? {
            settings.heap.growth_threshold = val;
        }
        if let Some(val) = env_value::<bool>(&config, "search.descending")? {
            settings.search.descending = val;
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.heap.initial_capacity == 0 {
            return Err(ApplicationError::Config {
                message: "heap.initial_capacity must be at least 1".into(),
            });
        }
        if self.heap.growth_threshold == 0 {
            return Err(ApplicationError::Config {
                message: "heap.growth_threshold must be at least 1".into(),
            });
        }
        if self.expansion.moves < 0 {
            return Err(ApplicationError::Config {
                message: format!("expansion.moves must not be negative, got {}", self.expansion.moves),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

/// A key that is absent is `None`; a key that is present but unparsable is
/// an error.
fn env_value<T: for<'de> Deserialize<'de>>(
    config: &Config,
    key: &str,
) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_match_documented_values() {
        let settings = Settings::default();
        assert_eq!(settings.expansion.moves, 10);
        assert_eq!(settings.expansion.runaway_limit, None);
        assert_eq!(settings.heap.initial_capacity, 16);
        assert_eq!(settings.heap.growth_threshold, 65_536);
        assert_eq!(settings.search.direction(), Direction::Descending);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_unnamed_fields_are_inherited() {
        let raw: RawSettings = toml::from_str("[heap]\ninitial_capacity = 4\n").unwrap();
        let merged = Settings::default().merge_with(&raw);
        assert_eq!(merged.heap.initial_capacity, 4);
        assert_eq!(merged.heap.growth_threshold, 65_536);
        assert_eq!(merged.expansion.moves, 10);
    }

    #[test]
    fn given_unknown_key_when_parsing_then_rejected() {
        let raw: Result<RawSettings, _> = toml::from_str("[heap]\nsize = 4\n");
        assert!(raw.is_err());
    }

    #[test]
    fn given_later_layer_without_limit_when_merging_then_earlier_limit_is_kept() {
        let global: RawSettings = toml::from_str("[expansion]\nrunaway_limit = 500\n").unwrap();
        let local: RawSettings = toml::from_str("[expansion]\nmoves = 3\n").unwrap();
        let merged = Settings::default().merge_with(&global).merge_with(&local);
        assert_eq!(merged.expansion.runaway_limit, Some(500));
        assert_eq!(merged.expansion.moves, 3);

        let raised: RawSettings = toml::from_str("[expansion]\nrunaway_limit = 900\n").unwrap();
        assert_eq!(merged.merge_with(&raised).expansion.runaway_limit, Some(900));
    }

    #[test]
    fn given_zero_growth_threshold_when_validating_then_rejected() {
        let mut settings = Settings::default();
        settings.heap.growth_threshold = 0;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("growth_threshold"));
    }

    #[test]
    fn given_settings_when_serialized_then_round_trips_through_toml() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        assert!(text.contains("[expansion]"));
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }
}
