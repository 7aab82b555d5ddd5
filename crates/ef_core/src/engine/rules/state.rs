//! Game state owned by the rules engine

use serde::{Deserialize, Serialize};

use crate::engine::config::RulesConfig;
use crate::engine::physics_constants::rules::MAX_DOWNS;
use crate::engine::types::{clamp_yard, PlayerId, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    #[default]
    Setup,
    PreSnap,
    Playing,
    PlayOver,
    GameOver,
}

impl GamePhase {
    /// Figures may be moved / re-tuned only while the ball is dead.
    pub fn allows_editing(self) -> bool {
        matches!(self, GamePhase::Setup | GamePhase::PreSnap | GamePhase::PlayOver)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::PlayOver | GamePhase::GameOver)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayResult {
    #[default]
    None,
    Tackle,
    PassComplete,
    PassIncomplete,
    Interception,
    Touchdown,
    FieldGoal,
    Safety,
}

impl PlayResult {
    pub fn is_score(self) -> bool {
        matches!(self, PlayResult::Touchdown | PlayResult::FieldGoal | PlayResult::Safety)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayEndReason {
    Whistle,
    Tackle,
    IncompletePass,
    FieldGoal,
    /// Kick fielded while the board was not vibrating
    FairCatch,
    /// Kick died without being fielded
    DeadBall,
}

impl PlayEndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayEndReason::Whistle => "whistle",
            PlayEndReason::Tackle => "tackle",
            PlayEndReason::IncompletePass => "incomplete_pass",
            PlayEndReason::FieldGoal => "field_goal",
            PlayEndReason::FairCatch => "fair_catch",
            PlayEndReason::DeadBall => "dead_ball",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub home_score: u32,
    pub away_score: u32,
    pub possession: Team,
    /// 1..=4
    pub current_down: u8,
    pub yards_to_go: i32,
    /// 0..=100; 0 = AWAY goal line, 100 = HOME goal line
    pub line_of_scrimmage: i32,
    pub los_at_snap: i32,
    pub current_phase: GamePhase,
    pub last_play_result: PlayResult,
    /// Non-owning handle; figures live in the simulation's table
    pub ball_carrier: Option<PlayerId>,
}

impl GameState {
    pub fn new(config: &RulesConfig) -> Self {
        let los = clamp_yard(config.starting_line);
        Self {
            home_score: 0,
            away_score: 0,
            possession: config.starting_possession,
            current_down: 1,
            yards_to_go: config.yards_for_first_down,
            line_of_scrimmage: los,
            los_at_snap: los,
            current_phase: GamePhase::Setup,
            last_play_result: PlayResult::None,
            ball_carrier: None,
        }
    }

    pub fn score(&self, team: Team) -> u32 {
        match team {
            Team::Home => self.home_score,
            Team::Away => self.away_score,
        }
    }

    pub(crate) fn add_score(&mut self, team: Team, points: u32) {
        match team {
            Team::Home => self.home_score += points,
            Team::Away => self.away_score += points,
        }
    }

    /// Line the offense must reach for a first down, clamped to the field.
    pub fn first_down_line(&self) -> i32 {
        clamp_yard(self.line_of_scrimmage + self.possession.attack_direction() * self.yards_to_go)
    }

    pub fn is_valid(&self) -> bool {
        (1..=MAX_DOWNS).contains(&self.current_down)
            && (0..=100).contains(&self.line_of_scrimmage)
            && (0..=100).contains(&self.los_at_snap)
    }
}

/// Down-and-distance snapshot used to stage a situation between plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Situation {
    pub possession: Team,
    pub down: u8,
    pub yards_to_go: i32,
    pub line_of_scrimmage: i32,
    pub home_score: u32,
    pub away_score: u32,
}

impl Situation {
    pub fn new(possession: Team, down: u8, yards_to_go: i32, line_of_scrimmage: i32) -> Self {
        Self { possession, down, yards_to_go, line_of_scrimmage, home_score: 0, away_score: 0 }
    }

    pub fn with_score(mut self, home: u32, away: u32) -> Self {
        self.home_score = home;
        self.away_score = away;
        self
    }
}
