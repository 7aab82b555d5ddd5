//! Notification bus
//!
//! One-way, fire-and-forget notifications for UI / audio / field overlay
//! consumers. Subscribers see events in emission order; the bus also keeps a
//! journal that the owner drains with [`EventBus::take_events`].

use serde::{Deserialize, Serialize};

use super::ball::IncompleteReason;
use super::rules::{GamePhase, PlayEndReason, PlayResult};
use super::types::{PlayerId, Team};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    ScoreChanged { home: u32, away: u32 },
    DownChanged { down: u8, yards_to_go: i32 },
    ScrimmageChanged { line_of_scrimmage: i32, first_down_line: i32 },
    PossessionChanged { team: Team },
    CarrierChanged { carrier: Option<PlayerId> },

    Touchdown { team: Team },
    FieldGoal { team: Team },
    Safety { team: Team },
    FirstDown { team: Team },
    /// `team` is the new offense
    TurnoverOnDowns { team: Team },

    PassThrown { thrower: PlayerId, team: Team },
    PassComplete { receiver: PlayerId, team: Team },
    PassIncomplete { reason: IncompleteReason },
    PassIntercepted { interceptor: PlayerId, team: Team },
    KickStarted { team: Team },
    KickCaught { player: PlayerId, team: Team },
    KickDead { reason: IncompleteReason },

    PlayOver { reason: PlayEndReason, result: PlayResult },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::PhaseChanged { .. } => "phase_changed",
            GameEvent::ScoreChanged { .. } => "score_changed",
            GameEvent::DownChanged { .. } => "down_changed",
            GameEvent::ScrimmageChanged { .. } => "scrimmage_changed",
            GameEvent::PossessionChanged { .. } => "possession_changed",
            GameEvent::CarrierChanged { .. } => "carrier_changed",
            GameEvent::Touchdown { .. } => "touchdown",
            GameEvent::FieldGoal { .. } => "field_goal",
            GameEvent::Safety { .. } => "safety",
            GameEvent::FirstDown { .. } => "first_down",
            GameEvent::TurnoverOnDowns { .. } => "turnover_on_downs",
            GameEvent::PassThrown { .. } => "pass_thrown",
            GameEvent::PassComplete { .. } => "pass_complete",
            GameEvent::PassIncomplete { .. } => "pass_incomplete",
            GameEvent::PassIntercepted { .. } => "pass_intercepted",
            GameEvent::KickStarted { .. } => "kick_started",
            GameEvent::KickCaught { .. } => "kick_caught",
            GameEvent::KickDead { .. } => "kick_dead",
            GameEvent::PlayOver { .. } => "play_over",
        }
    }

    /// Scoring plays
    pub fn is_score(&self) -> bool {
        matches!(
            self,
            GameEvent::Touchdown { .. } | GameEvent::FieldGoal { .. } | GameEvent::Safety { .. }
        )
    }
}

/// Consumer of game notifications. No return value; the core never waits on it.
pub trait EventSink {
    fn notify(&mut self, event: &GameEvent);
}

impl<F> EventSink for F
where
    F: FnMut(&GameEvent),
{
    fn notify(&mut self, event: &GameEvent) {
        self(event)
    }
}

#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Box<dyn EventSink>>,
    journal: Vec<GameEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, sink: Box<dyn EventSink>) {
        self.subscribers.push(sink);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn emit(&mut self, event: GameEvent) {
        log::debug!("event: {:?}", event);
        for sink in self.subscribers.iter_mut() {
            sink.notify(&event);
        }
        self.journal.push(event);
    }

    /// Events emitted since the last drain, in order.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.journal)
    }

    pub fn pending(&self) -> &[GameEvent] {
        &self.journal
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .field("journal", &self.journal)
            .finish()
    }
}
