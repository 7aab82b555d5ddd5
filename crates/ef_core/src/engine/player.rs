//! Player Entity
//!
//! A figure on the vibrating board. It never steers: each tick it asks the
//! vibration engine for an impulse along its tuned `base_direction`, then drifts
//! that heading by `base_curve`. Drift only accumulates while the motor runs.
//!
//! # Tuning
//! - `base_direction`: heading (rad), wrapped to [-PI, PI]
//! - `base_speed`: impulse multiplier, 0.1 ~ 3.0
//! - `base_curve`: heading drift (rad/s), -2.0 ~ 2.0

use serde::{Deserialize, Serialize};

use super::config::PlayerConfig;
use super::physics_constants::player::{
    BASE_CURVE_MAX, BASE_CURVE_MIN, BASE_SPEED_MAX, BASE_SPEED_MIN, DEFAULT_BASE_SPEED,
};
use super::types::{wrap_angle, PlayerId, Role, Team, Vec2};
use super::vibration::VibrationEngine;

/// Carrier brought down by an opposing figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TackleEvent {
    pub carrier: PlayerId,
    pub tackler: PlayerId,
}

#[derive(Debug, Clone)]
pub struct PlayerEntity {
    pub id: PlayerId,
    pub team: Team,
    pub role: Role,
    base_direction: f32,
    base_speed: f32,
    base_curve: f32,
    has_ball: bool,
    pub position: Vec2,
    pub velocity: Vec2,
    mass: f32,
    linear_damping: f32,
    pub contact_radius: f32,
}

impl PlayerEntity {
    pub fn new(id: PlayerId, team: Team, role: Role, position: Vec2, config: &PlayerConfig) -> Self {
        Self {
            id,
            team,
            role,
            base_direction: 0.0,
            base_speed: DEFAULT_BASE_SPEED,
            base_curve: 0.0,
            has_ball: false,
            position,
            velocity: Vec2::zeros(),
            mass: config.mass.max(f32::EPSILON),
            linear_damping: config.linear_damping.max(0.0),
            contact_radius: config.contact_radius,
        }
    }

    pub fn with_tuning(mut self, direction: f32, speed: f32, curve: f32) -> Self {
        self.set_base_direction(direction);
        self.set_base_speed(speed);
        self.set_base_curve(curve);
        self
    }

    // ========================
    // Tuning
    // ========================

    pub fn base_direction(&self) -> f32 {
        self.base_direction
    }

    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    pub fn base_curve(&self) -> f32 {
        self.base_curve
    }

    pub fn set_base_direction(&mut self, radians: f32) {
        self.base_direction = wrap_angle(radians);
    }

    pub fn set_base_speed(&mut self, speed: f32) {
        self.base_speed = if speed.is_finite() {
            speed.clamp(BASE_SPEED_MIN, BASE_SPEED_MAX)
        } else {
            DEFAULT_BASE_SPEED
        };
    }

    pub fn set_base_curve(&mut self, curve: f32) {
        self.base_curve = if curve.is_finite() { curve.clamp(BASE_CURVE_MIN, BASE_CURVE_MAX) } else { 0.0 };
    }

    /// Visual facing always tracks the tuned heading.
    pub fn facing(&self) -> f32 {
        self.base_direction
    }

    /// Move the figure while editing a formation. Zeroes velocity.
    pub fn place(&mut self, position: Vec2, direction: f32) {
        self.position = position;
        self.velocity = Vec2::zeros();
        self.set_base_direction(direction);
    }

    // ========================
    // Ball
    // ========================

    pub fn has_ball(&self) -> bool {
        self.has_ball
    }

    /// Only the simulation's carrier assignment writes this flag.
    pub(crate) fn set_has_ball(&mut self, value: bool) {
        self.has_ball = value;
    }

    pub fn is_eligible_receiver(&self) -> bool {
        self.role.is_eligible_receiver()
    }

    pub fn is_quarterback(&self) -> bool {
        self.role.is_quarterback()
    }

    // ========================
    // Physics tick
    // ========================

    /// Pull one impulse from the motor and drift the heading.
    ///
    /// Returns the impulse applied (zero while the motor is off).
    pub fn apply_vibration(&mut self, vibration: &mut VibrationEngine, dt: f32) -> Vec2 {
        if !vibration.is_active() {
            return Vec2::zeros();
        }
        let impulse = vibration.compute_impulse(self.base_direction, self.base_speed);
        self.apply_impulse(impulse);
        self.base_direction = wrap_angle(self.base_direction + self.base_curve * dt);
        impulse
    }

    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse / self.mass;
    }

    /// Advance position by velocity, then apply linear damping.
    pub fn integrate(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.position += self.velocity * dt;
        let decay = (1.0 - self.linear_damping * dt).clamp(0.0, 1.0);
        self.velocity *= decay;
    }

    pub fn tick(&mut self, vibration: &mut VibrationEngine, dt: f32) {
        self.apply_vibration(vibration, dt);
        self.integrate(dt);
    }

    // ========================
    // Contact
    // ========================

    pub fn overlaps(&self, other: &PlayerEntity) -> bool {
        let reach = self.contact_radius + other.contact_radius;
        (self.position - other.position).norm_squared() <= reach * reach
    }

    /// Resolve a contact with another figure into at most one tackle.
    ///
    /// Same-team contact is ignored. If this figure carries the ball it is the
    /// one tackled; otherwise the other figure is, if it carries.
    pub fn on_contact(&self, other: &PlayerEntity) -> Option<TackleEvent> {
        if self.team == other.team {
            return None;
        }
        if self.has_ball {
            Some(TackleEvent { carrier: self.id, tackler: other.id })
        } else if other.has_ball {
            Some(TackleEvent { carrier: other.id, tackler: self.id })
        } else {
            None
        }
    }
}
