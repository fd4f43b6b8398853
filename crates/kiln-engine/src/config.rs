//! Simulation server configuration and validation.

use std::error::Error;
use std::fmt;

/// Errors detected during [`SimConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `dt_seconds` is NaN, infinite, zero, or negative.
    InvalidDt {
        /// The invalid value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDt { value } => {
                write!(f, "dt_seconds must be finite and positive, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Configuration for [`SimServer`](crate::server::SimServer).
#[derive(Clone, Copy, Debug)]
pub struct SimConfig {
    /// Simulated seconds advanced per step. Default: 1.0.
    pub dt_seconds: f64,
    /// Cooperative nap after each frame, in milliseconds; zero yields
    /// instead of sleeping. Default: 1.
    pub sleep_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt_seconds: 1.0,
            sleep_ms: 1,
        }
    }
}

impl SimConfig {
    /// Validate structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.dt_seconds.is_finite() || self.dt_seconds <= 0.0 {
            return Err(ConfigError::InvalidDt {
                value: self.dt_seconds,
            });
        }
        Ok(())
    }
}
