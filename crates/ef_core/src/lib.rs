//! # ef_core - Vibrating-Field Football Simulation Core
//!
//! Tabletop electric football rebuilt as a library: a vibration engine that
//! shakes every figure on the board, player and ball entities that react to it,
//! and an American-football rules engine (downs, possession, scoring) that
//! referees the result.
//!
//! ## Features
//! - Seedable vibration noise (same seed = same play)
//! - Explicit phase state machine: setup, pre-snap, live play, play over, game over
//! - Event bus for UI / audio / overlay consumers
//! - Fixed-tick [`engine::simulation::Simulation`] facade
//!
//! ## Usage
//! ```rust
//! use ef_core::engine::config::GameConfig;
//! use ef_core::engine::formation::FormationData;
//! use ef_core::engine::simulation::Simulation;
//!
//! let mut sim = Simulation::new(GameConfig::deterministic());
//! sim.apply_formation(&FormationData::i_formation())?;
//! sim.register_ball();
//! sim.ready_for_next_play();
//! assert!(sim.snap());
//! sim.run_for(0.5);
//! # Ok::<(), ef_core::CoreError>(())
//! ```

// Game engine APIs often require many parameters for physics, state, etc.
#![allow(clippy::too_many_arguments)]
#![allow(clippy::field_reassign_with_default)]

pub mod engine;
pub mod error;

pub use engine::config::GameConfig;
pub use engine::events::{EventSink, GameEvent};
pub use engine::rules::{GamePhase, GameState, PlayEndReason, PlayResult, RulesEngine};
pub use engine::simulation::Simulation;
pub use engine::types::{PlayerId, Role, Team, Vec2};
pub use error::{CoreError, Result};
