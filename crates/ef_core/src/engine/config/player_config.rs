//! Player figure body configuration

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::player as consts;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Figure mass; impulses are divided by it
    pub mass: f32,
    /// Velocity decay per second
    pub linear_damping: f32,
    /// Overlap radius used for tackles and catches (px)
    pub contact_radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            mass: consts::MASS,
            linear_damping: consts::LINEAR_DAMPING,
            contact_radius: consts::CONTACT_RADIUS,
        }
    }
}
