//! Board layout configuration

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::field as consts;

/// Yard 0 sits at `origin_x`; yards grow along +x. The field is centred on y = 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub origin_x: f32,
    pub pixels_per_yard: f32,
    pub width: f32,
    pub end_zone_yards: f32,
    pub goal_post_width: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            origin_x: consts::ORIGIN_X,
            pixels_per_yard: consts::PIXELS_PER_YARD,
            width: consts::WIDTH,
            end_zone_yards: consts::END_ZONE_YARDS,
            goal_post_width: consts::GOAL_POST_WIDTH,
        }
    }
}
