//! Ball flight configuration

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::ball as consts;

/// Throw/kick power clamps, flight cap and kick arc shape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    // === Power clamps (px/s) ===
    pub throw_power_min: f32,
    pub throw_power_max: f32,
    pub kick_power_min: f32,
    pub kick_power_max: f32,

    // === Flight ===
    /// Flight time cap (s) (기본: 2.0)
    pub flight_timeout_secs: f32,
    /// Stopped-ball threshold (px/s)
    pub stop_speed: f32,
    /// Drag during flight (1/s)
    pub linear_damping: f32,

    // === Kick arc ===
    /// Parabola peak (px), reached at half the flight cap
    pub kick_peak_height: f32,
    /// Height needed over the uprights
    pub field_goal_min_height: f32,
    /// Kicks are catchable only below this height
    pub catchable_height: f32,

    // === Contact ===
    pub catch_grace_secs: f32,
    pub contact_radius: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            throw_power_min: consts::THROW_POWER_MIN,
            throw_power_max: consts::THROW_POWER_MAX,
            kick_power_min: consts::KICK_POWER_MIN,
            kick_power_max: consts::KICK_POWER_MAX,
            flight_timeout_secs: consts::FLIGHT_TIMEOUT_SECS,
            stop_speed: consts::STOP_SPEED,
            linear_damping: consts::LINEAR_DAMPING,
            kick_peak_height: consts::KICK_PEAK_HEIGHT,
            field_goal_min_height: consts::FIELD_GOAL_MIN_HEIGHT,
            catchable_height: consts::CATCHABLE_HEIGHT,
            catch_grace_secs: consts::CATCH_GRACE_SECS,
            contact_radius: consts::CONTACT_RADIUS,
        }
    }
}
