//! Game rules configuration

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::rules as consts;
use crate::engine::types::Team;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Opening possession
    pub starting_possession: Team,
    /// Opening line of scrimmage (yard line, 0..=100)
    pub starting_line: i32,
    /// Yards needed for a first down
    pub yards_for_first_down: i32,
    pub touchdown_points: u32,
    pub field_goal_points: u32,
    pub safety_points: u32,
    /// Kickoff / free kick spot, yards from the kicking team's own goal
    pub kickoff_own_yard: i32,
    /// Game ends after this many completed plays
    pub max_plays: Option<u32>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_possession: Team::Home,
            starting_line: consts::STARTING_LINE,
            yards_for_first_down: consts::YARDS_FOR_FIRST_DOWN,
            touchdown_points: consts::TOUCHDOWN_POINTS,
            field_goal_points: consts::FIELD_GOAL_POINTS,
            safety_points: consts::SAFETY_POINTS,
            kickoff_own_yard: consts::KICKOFF_OWN_YARD,
            max_plays: None,
        }
    }
}
