//! Shared vocabulary: teams, roles, entity handles, vectors.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fmt;

use super::physics_constants::field::{MAX_YARD, MIN_YARD};

/// World-space vector (board pixels)
pub type Vec2 = nalgebra::Vector2<f32>;

/// Non-owning handle into the simulation's player table.
///
/// The rules engine and the ball only ever hold these; figures are owned by
/// the [`crate::engine::simulation::Simulation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub usize);

impl PlayerId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Team {
    #[default]
    Home,
    Away,
}

impl Team {
    pub fn opponent(self) -> Self {
        match self {
            Team::Home => Team::Away,
            Team::Away => Team::Home,
        }
    }

    pub fn is_home(self) -> bool {
        matches!(self, Team::Home)
    }

    /// Sign of yard-line progress: HOME drives toward yard 0, AWAY toward 100.
    pub fn attack_direction(self) -> i32 {
        match self {
            Team::Home => -1,
            Team::Away => 1,
        }
    }

    /// Goal line this team defends.
    pub fn own_goal_line(self) -> i32 {
        match self {
            Team::Home => MAX_YARD,
            Team::Away => MIN_YARD,
        }
    }

    /// Goal line this team attacks.
    pub fn target_goal_line(self) -> i32 {
        self.opponent().own_goal_line()
    }

    /// Absolute yard line for "own N" (HOME own 20 = 80, AWAY own 20 = 20).
    pub fn own_yard_line(self, yards: i32) -> i32 {
        match self {
            Team::Home => MAX_YARD - yards,
            Team::Away => MIN_YARD + yards,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Team::Home => write!(f, "HOME"),
            Team::Away => write!(f, "AWAY"),
        }
    }
}

/// Figure role. Only affects catch eligibility, never physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Lineman,
    Receiver,
    Quarterback,
    RunningBack,
    Linebacker,
    DefensiveBack,
}

impl Role {
    pub fn is_eligible_receiver(self) -> bool {
        matches!(self, Role::Receiver | Role::RunningBack | Role::Quarterback)
    }

    pub fn is_quarterback(self) -> bool {
        matches!(self, Role::Quarterback)
    }
}

/// Wrap an angle into [-PI, PI].
pub fn wrap_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut a = (angle + PI).rem_euclid(2.0 * PI) - PI;
    // rem_euclid maps +PI to -PI; keep the sign of the input at the seam
    if a == -PI && angle > 0.0 {
        a = PI;
    }
    a
}

/// Unit vector for a heading (radians, 0 = +x).
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Clamp a yard line into [0, 100].
#[inline]
pub fn clamp_yard(yard: i32) -> i32 {
    yard.clamp(MIN_YARD, MAX_YARD)
}
