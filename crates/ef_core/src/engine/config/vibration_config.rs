//! Vibration motor configuration

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::vibration as consts;

/// Motor hum and per-tick noise shape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VibrationConfig {
    /// Hum frequency (Hz) (기본: 60.0)
    pub frequency: f32,
    /// Impulse magnitude before base_speed scaling (기본: 12.0)
    pub amplitude: f32,
    /// Heading jitter, +/- degrees (기본: 30.0)
    pub angle_jitter_deg: f32,
    /// Magnitude factor range (기본: 0.5 ~ 1.5)
    pub magnitude_min: f32,
    pub magnitude_max: f32,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for VibrationConfig {
    fn default() -> Self {
        Self {
            frequency: consts::DEFAULT_FREQUENCY_HZ,
            amplitude: consts::DEFAULT_AMPLITUDE,
            angle_jitter_deg: consts::ANGLE_JITTER_DEG,
            magnitude_min: consts::MAGNITUDE_MIN,
            magnitude_max: consts::MAGNITUDE_MAX,
            seed: None,
        }
    }
}
