//! Engine configuration.
//!
//! Settings are read from TOML. An explicit path wins; otherwise
//! `$XDG_CONFIG_HOME/cellar/config.toml` is used when it exists, and the
//! built-in defaults apply when it does not. Every section is optional:
//!
//! ```toml
//! max_jitter = 5
//!
//! [lineup_sizes]
//! small = 3
//! medium = 4
//! large = 6
//!
//! [heavy]
//! tannin = 4.0
//! oak = 4.0
//! ```

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use log::debug;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{CellarError, Result},
    models::profile::{SCALE_MAX, SCALE_MIN},
    scoring::{PairingTable, MIN_TIER_GAP},
};

/// Largest jitter that can never reorder two readiness tiers.
pub const JITTER_CAP: u32 = MIN_TIER_GAP - 1;

/// Size of the gathering a lineup is composed for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum GroupSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl GroupSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupSize::Small => "small",
            GroupSize::Medium => "medium",
            GroupSize::Large => "large",
        }
    }
}

impl FromStr for GroupSize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" | "s" => Ok(GroupSize::Small),
            "medium" | "m" => Ok(GroupSize::Medium),
            "large" | "l" => Ok(GroupSize::Large),
            _ => Err(format!("Invalid group size: {s}")),
        }
    }
}

/// Number of pours per group size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LineupSizes {
    pub small: usize,
    pub medium: usize,
    pub large: usize,
}

impl Default for LineupSizes {
    fn default() -> Self {
        Self {
            small: 3,
            medium: 4,
            large: 5,
        }
    }
}

impl LineupSizes {
    /// Target lineup length for a group.
    pub fn for_group(&self, group: GroupSize) -> usize {
        match group {
            GroupSize::Small => self.small,
            GroupSize::Medium => self.medium,
            GroupSize::Large => self.large,
        }
    }
}

/// A wine is heavy when both its tannin and oak reach these levels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeavyThresholds {
    pub tannin: f64,
    pub oak: f64,
}

impl Default for HeavyThresholds {
    fn default() -> Self {
        Self {
            tannin: 4.0,
            oak: 4.0,
        }
    }
}

/// Tunables for lineup composition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub lineup_sizes: LineupSizes,
    /// Upper bound of the random jitter added to each candidate's score
    pub max_jitter: u32,
    pub heavy: HeavyThresholds,
    /// Replaced wholesale when present in the file
    pub pairing: PairingTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lineup_sizes: LineupSizes::default(),
            max_jitter: JITTER_CAP,
            heavy: HeavyThresholds::default(),
            pairing: PairingTable::default(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from `path`, or from the XDG config file.
    ///
    /// # Errors
    ///
    /// Returns `CellarError::FileSystem` if an explicit path cannot be read
    /// Returns `CellarError::Configuration` if the file is malformed or fails
    /// validation
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_config_path() {
                Some(path) => path,
                None => {
                    debug!("No configuration file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(&path).map_err(|e| CellarError::FileSystem {
            path: path.clone(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| CellarError::Configuration {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks ranges the composer relies on.
    pub fn validate(&self) -> Result<()> {
        if self.max_jitter > JITTER_CAP {
            return Err(CellarError::Configuration {
                message: format!(
                    "max_jitter {} exceeds {JITTER_CAP}; jitter must stay below the readiness tier gap",
                    self.max_jitter
                ),
            });
        }

        let sizes = self.lineup_sizes;
        for (group, size) in [
            ("small", sizes.small),
            ("medium", sizes.medium),
            ("large", sizes.large),
        ] {
            if size == 0 {
                return Err(CellarError::Configuration {
                    message: format!("lineup_sizes.{group} must be at least 1"),
                });
            }
        }

        for (name, value) in [("tannin", self.heavy.tannin), ("oak", self.heavy.oak)] {
            if !value.is_finite() || !(SCALE_MIN..=SCALE_MAX).contains(&value) {
                return Err(CellarError::Configuration {
                    message: format!("heavy.{name} must be within {SCALE_MIN}-{SCALE_MAX}"),
                });
            }
        }

        self.pairing.validate()
    }

    fn default_config_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("cellar").find_config_file("config.toml")
    }
}
