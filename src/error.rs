use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("initial speed {value} m/s is outside [{min}, {max}]")]
    SpeedOutOfRange { value: f64, min: f64, max: f64 },

    #[error("launch angle {value} deg is outside [{min}, {max}]")]
    AngleOutOfRange { value: f64, min: f64, max: f64 },

    #[error("{quantity} evaluated to a non-finite value ({value})")]
    NonFinite { quantity: &'static str, value: f64 },

    #[error("tick rate must be a positive finite number of Hz, got {0}")]
    InvalidTickRate(f64),

    #[error("could not read config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("plot rendering failed: {0}")]
    Plot(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
