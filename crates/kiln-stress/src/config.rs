//! Stress controller configuration.

use std::time::Duration;

use kiln_engine::ConfigError;

/// Configuration for [`GrowthController`](crate::grower::GrowthController).
#[derive(Clone, Debug)]
pub struct StressConfig {
    /// PRNG seed for materials, temperatures, and section choices.
    pub seed: u32,
    /// Real-time budget per frame: growth trips when a frame's summed
    /// section time exceeds `dt_seconds * 1000` ms. Default: 1.0.
    pub dt_seconds: f64,
    /// Pause between growth attempts. Default: 4 ms.
    pub tick_period: Duration,
    /// Minimum interval between progress-bar redraws. Default: 100 ms.
    pub bar_period: Duration,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            dt_seconds: 1.0,
            tick_period: Duration::from_millis(4),
            bar_period: Duration::from_millis(100),
        }
    }
}

impl StressConfig {
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
