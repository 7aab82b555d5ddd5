//! # Game Configuration
//!
//! 모든 튜닝 상수를 중앙에서 관리하는 설정 시스템.
//!
//! ## Presets
//! - `tabletop()`: the default board feel
//! - `chaotic()`: louder motor, wider heading jitter
//! - `deterministic()`: fixed seed, no jitter (tests and replays)
//!
//! ## 사용법
//! ```rust
//! use ef_core::engine::config::GameConfig;
//!
//! let config = GameConfig::default();
//! let chaotic = GameConfig::chaotic();
//! assert!(chaotic.vibration.amplitude > config.vibration.amplitude);
//! ```

mod ball_config;
mod field_config;
mod player_config;
mod rules_config;
mod vibration_config;

pub use ball_config::BallConfig;
pub use field_config::FieldConfig;
pub use player_config::PlayerConfig;
pub use rules_config::RulesConfig;
pub use vibration_config::VibrationConfig;

use serde::{Deserialize, Serialize};
use std::{env, fs};

use crate::engine::physics_constants::field::{MAX_YARD, MIN_YARD};
use crate::error::{CoreError, Result};

/// Environment variable naming a JSON config file
pub const CONFIG_PATH_ENV: &str = "EF_CONFIG_PATH";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameConfig {
    #[serde(default)]
    pub vibration: VibrationConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub ball: BallConfig,
    #[serde(default)]
    pub field: FieldConfig,
    #[serde(default)]
    pub rules: RulesConfig,
}

impl GameConfig {
    pub fn tabletop() -> Self {
        Self::default()
    }

    /// 더 시끄러운 모터, 더 넓은 방향 오차
    pub fn chaotic() -> Self {
        let mut cfg = Self::default();
        cfg.vibration.amplitude *= 1.8;
        cfg.vibration.angle_jitter_deg = 55.0;
        cfg.vibration.magnitude_min = 0.2;
        cfg.vibration.magnitude_max = 2.0;
        cfg.player.linear_damping = 2.5;
        cfg
    }

    /// Test preset: impulses point exactly along base_direction
    pub fn deterministic() -> Self {
        let mut cfg = Self::default();
        cfg.vibration.seed = Some(0);
        cfg.vibration.angle_jitter_deg = 0.0;
        cfg.vibration.magnitude_min = 1.0;
        cfg.vibration.magnitude_max = 1.0;
        cfg
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.vibration.seed = Some(seed);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load the file named by `EF_CONFIG_PATH`, or defaults when unset.
    pub fn from_env() -> Result<Self> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let cfg = Self::from_json(&content)?;
        log::info!("Loaded game config from {}={}", CONFIG_PATH_ENV, path);
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let v = &self.vibration;
        if v.frequency < 0.0 || v.amplitude < 0.0 {
            return Err(CoreError::InvalidConfig(
                "vibration frequency and amplitude must be non-negative".into(),
            ));
        }
        if v.angle_jitter_deg < 0.0 || v.magnitude_min < 0.0 || v.magnitude_min > v.magnitude_max {
            return Err(CoreError::InvalidConfig(format!(
                "vibration noise range invalid: jitter={} magnitude={}..{}",
                v.angle_jitter_deg, v.magnitude_min, v.magnitude_max
            )));
        }

        if self.player.mass <= 0.0 || self.player.contact_radius <= 0.0 {
            return Err(CoreError::InvalidConfig("player mass and radius must be positive".into()));
        }

        let b = &self.ball;
        if b.throw_power_min <= 0.0 || b.throw_power_min > b.throw_power_max {
            return Err(CoreError::InvalidConfig(format!(
                "throw power range invalid: {}..{}",
                b.throw_power_min, b.throw_power_max
            )));
        }
        if b.kick_power_min <= 0.0 || b.kick_power_min > b.kick_power_max {
            return Err(CoreError::InvalidConfig(format!(
                "kick power range invalid: {}..{}",
                b.kick_power_min, b.kick_power_max
            )));
        }
        if b.flight_timeout_secs <= 0.0 {
            return Err(CoreError::InvalidConfig("flight timeout must be positive".into()));
        }

        let f = &self.field;
        if f.pixels_per_yard <= 0.0 || f.width <= 0.0 || f.end_zone_yards < 0.0 {
            return Err(CoreError::InvalidConfig("field dimensions must be positive".into()));
        }

        let r = &self.rules;
        if !(MIN_YARD..=MAX_YARD).contains(&r.starting_line) {
            return Err(CoreError::InvalidConfig(format!(
                "starting line {} outside {}..={}",
                r.starting_line, MIN_YARD, MAX_YARD
            )));
        }
        if r.yards_for_first_down <= 0 {
            return Err(CoreError::InvalidConfig("yards for first down must be positive".into()));
        }
        if !(MIN_YARD..=MAX_YARD).contains(&r.kickoff_own_yard) {
            return Err(CoreError::InvalidConfig(format!(
                "kickoff spot {} outside the field",
                r.kickoff_own_yard
            )));
        }

        Ok(())
    }
}

// ========== Tests ==========
