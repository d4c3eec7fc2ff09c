//! TOML configuration loader

use std::fs;
use std::path::{Path, PathBuf};

use drillrig_core::config::{ConfigError, RigConfig};
use drillrig_drivers::{SimPistonConfig, SimRigConfig};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Configuration load failure
#[derive(Debug, Error)]
pub enum HostConfigError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(ConfigError),
}

/// Simulation parameters
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    /// Piston travel (m)
    pub piston_travel: f32,
    /// Pieces in the drill head blueprint
    pub drill_units: u32,
    /// Pieces in a conveyor section blueprint
    pub conveyor_units: u32,
    /// Pieces per second per welder
    pub weld_rate: f32,
    /// Welders in the group
    pub welders: usize,
    /// Grab merge block starts locked to a partner
    pub grab_linked: bool,
}

impl Default for SimSettings {
    fn default() -> Self {
        let rig = SimRigConfig::default();
        Self {
            piston_travel: rig.piston.travel,
            drill_units: rig.drill_units,
            conveyor_units: rig.conveyor_units,
            weld_rate: rig.weld_rate,
            welders: rig.welders,
            grab_linked: false,
        }
    }
}

impl SimSettings {
    /// Parameters for [`drillrig_drivers::SimRig`]
    pub fn rig_config(&self) -> SimRigConfig {
        SimRigConfig {
            piston: SimPistonConfig {
                travel: self.piston_travel,
                ..Default::default()
            },
            drill_units: self.drill_units,
            conveyor_units: self.conveyor_units,
            weld_rate: self.weld_rate,
            welders: self.welders,
        }
    }
}

/// Everything the host needs
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    #[serde(flatten)]
    pub rig: RigConfig,
    pub sim: SimSettings,
}

impl HostConfig {
    /// Parse and validate TOML text
    pub fn from_toml(path: &Path, text: &str) -> Result<Self, HostConfigError> {
        let config: HostConfig = toml::from_str(text).map_err(|source| HostConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.rig.validate().map_err(HostConfigError::Invalid)?;
        Ok(config)
    }
}

/// Load configuration from `path`
pub fn load_config(path: &Path) -> Result<HostConfig, HostConfigError> {
    debug!(path = %path.display(), "loading configuration");
    let text = fs::read_to_string(path).map_err(|source| HostConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    HostConfig::from_toml(path, &text)
}
