//! Start-up configuration, read from an optional TOML file.
//!
//! ```toml
//! [launch]
//! speed_mps = 25.0
//! angle_deg = 60.0
//!
//! [timing]
//! tick_hz = 30.0
//! autoplay = false
//!
//! [export]
//! width = 1280
//! height = 720
//! directory = "exports"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::ballistics::{DEFAULT_ANGLE_DEG, DEFAULT_SPEED_MPS, SimulationParameters};
use crate::core::plot::DEFAULT_EXPORT_SIZE;
use crate::core::timer::DEFAULT_TICK_HZ;
use crate::error::SimError;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub launch: LaunchSection,
    pub timing: TimingSection,
    pub export: ExportSection,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LaunchSection {
    pub speed_mps: f64,
    pub angle_deg: f64,
}

impl Default for LaunchSection {
    fn default() -> Self {
        Self {
            speed_mps: DEFAULT_SPEED_MPS,
            angle_deg: DEFAULT_ANGLE_DEG,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TimingSection {
    pub tick_hz: f64,
    pub autoplay: bool,
}

impl Default for TimingSection {
    fn default() -> Self {
        Self {
            tick_hz: DEFAULT_TICK_HZ,
            autoplay: false,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSection {
    pub width: u32,
    pub height: u32,
    pub directory: PathBuf,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            width: DEFAULT_EXPORT_SIZE.0,
            height: DEFAULT_EXPORT_SIZE.1,
            directory: PathBuf::from("."),
        }
    }
}

impl ExportSection {
    pub fn size(&self) -> (u32, u32) {
        (self.width.max(1), self.height.max(1))
    }
}

impl SimConfig {
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let text = fs::read_to_string(path).map_err(|source| SimError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, SimError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        self.parameters().validate()?;
        if !self.timing.tick_hz.is_finite() || self.timing.tick_hz <= 0.0 {
            return Err(SimError::InvalidTickRate(self.timing.tick_hz));
        }
        Ok(())
    }

    pub fn parameters(&self) -> SimulationParameters {
        SimulationParameters {
            speed_mps: self.launch.speed_mps,
            angle_deg: self.launch.angle_deg,
        }
    }
}
