//! Simulation engine
//!
//! Leaves first: constants and shared types, the vibration engine, the player
//! and ball entities, the field/formation collaborators, then the rules engine
//! and the fixed-tick [`simulation::Simulation`] that wires them together.

pub mod ball;
pub mod config;
pub mod contact;
pub mod events;
pub mod field;
pub mod formation;
pub mod physics_constants;
pub mod player;
pub mod rules;
pub mod simulation;
pub mod timestep;
pub mod types;
pub mod vibration;

pub use ball::{BallEntity, BallEvent, BallState, IncompleteReason};
pub use contact::{Contact, ContactDetector};
pub use events::{EventBus, EventSink, GameEvent};
pub use field::{FieldBounds, FieldGeometry, YardLineField};
pub use formation::{FormationData, FormationSlot, FormationStore, JsonFormationStore};
pub use player::{PlayerEntity, TackleEvent};
pub use vibration::{VibrationEngine, VibrationSignal};
