//! Physics and rules constants for the vibrating field
//!
//! Defaults for [`crate::engine::config::GameConfig`]. World units are
//! board pixels; time is seconds.

// ============================================================
// Vibration Engine
// ============================================================
pub mod vibration {
    /// Motor hum frequency (Hz)
    pub const DEFAULT_FREQUENCY_HZ: f32 = 60.0;

    /// Impulse magnitude per tick before base_speed scaling
    pub const DEFAULT_AMPLITUDE: f32 = 12.0;

    /// Random heading jitter, +/- degrees around base_direction
    pub const ANGLE_JITTER_DEG: f32 = 30.0;

    /// Uniform magnitude factor range
    pub const MAGNITUDE_MIN: f32 = 0.5;
    pub const MAGNITUDE_MAX: f32 = 1.5;
}

// ============================================================
// Player figures
// ============================================================
pub mod player {
    /// base_speed clamp (multiplier)
    pub const BASE_SPEED_MIN: f32 = 0.1;
    pub const BASE_SPEED_MAX: f32 = 3.0;
    pub const DEFAULT_BASE_SPEED: f32 = 1.0;

    /// base_curve clamp (rad/s)
    pub const BASE_CURVE_MIN: f32 = -2.0;
    pub const BASE_CURVE_MAX: f32 = 2.0;

    /// Figure body
    pub const MASS: f32 = 1.0;
    pub const LINEAR_DAMPING: f32 = 4.0;
    pub const CONTACT_RADIUS: f32 = 12.0;
}

// ============================================================
// Ball flight
// ============================================================
pub mod ball {
    /// Pass power clamp (px/s)
    pub const THROW_POWER_MIN: f32 = 200.0;
    pub const THROW_POWER_MAX: f32 = 600.0;

    /// Kick power clamp (px/s)
    pub const KICK_POWER_MIN: f32 = 300.0;
    pub const KICK_POWER_MAX: f32 = 800.0;

    /// Flight time cap (s); reaching it ends the flight as incomplete
    pub const FLIGHT_TIMEOUT_SECS: f32 = 2.0;

    /// Below this speed a loose ball counts as stopped (px/s)
    pub const STOP_SPEED: f32 = 5.0;

    /// Drag applied during flight (1/s)
    pub const LINEAR_DAMPING: f32 = 0.3;

    /// Kick arc peak height at half the flight cap (px)
    pub const KICK_PEAK_HEIGHT: f32 = 100.0;

    /// Minimum height for a kick to clear the crossbar (px)
    pub const FIELD_GOAL_MIN_HEIGHT: f32 = 30.0;

    /// Kicks above this height sail over every figure
    pub const CATCHABLE_HEIGHT: f32 = 35.0;

    /// Contact is ignored this long after release (s)
    pub const CATCH_GRACE_SECS: f32 = 0.1;

    /// Ball contact radius (px)
    pub const CONTACT_RADIUS: f32 = 6.0;
}

// ============================================================
// Field geometry
// ============================================================
pub mod field {
    /// World x of yard 0 (AWAY goal line)
    pub const ORIGIN_X: f32 = 100.0;

    /// Horizontal scale
    pub const PIXELS_PER_YARD: f32 = 10.0;

    /// Sideline to sideline (px), centred on y = 0
    pub const WIDTH: f32 = 533.0;

    /// End zone depth beyond each goal line (yards)
    pub const END_ZONE_YARDS: f32 = 10.0;

    /// Distance between uprights (px)
    pub const GOAL_POST_WIDTH: f32 = 62.0;

    pub const MIN_YARD: i32 = 0;
    pub const MAX_YARD: i32 = 100;
}

// ============================================================
// Rules
// ============================================================
pub mod rules {
    pub const YARDS_FOR_FIRST_DOWN: i32 = 10;
    pub const MAX_DOWNS: u8 = 4;

    pub const TOUCHDOWN_POINTS: u32 = 6;
    pub const FIELD_GOAL_POINTS: u32 = 3;
    pub const SAFETY_POINTS: u32 = 2;

    /// Kickoffs and safety free kicks are spotted at the kicking team's own 20
    pub const KICKOFF_OWN_YARD: i32 = 20;

    /// Opening line of scrimmage
    pub const STARTING_LINE: i32 = 50;
}
