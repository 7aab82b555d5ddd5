//! Game Rules Engine
//!
//! Phase state machine plus down / possession / scoring logic.
//!
//! ```text
//! SETUP ----ready_for_next_play----> PRE_SNAP --snap + vibration Started--> PLAYING
//! PLAY_OVER --ready_for_next_play--> PRE_SNAP (or GAME_OVER at the play limit)
//! PLAYING --whistle | tackle | incomplete | field goal--> PLAY_OVER
//! ```
//!
//! The engine is the only writer of [`GameState`]. Figures, ball and motor are
//! borrowed per call through a [`Board`]; the engine keeps only a non-owning
//! [`PlayerId`] for the carrier. Every illegal request is a no-op that returns
//! `false`.

mod ball_play;
mod downs;
mod state;

pub use state::{GamePhase, GameState, PlayEndReason, PlayResult, Situation};

use crate::engine::ball::BallEntity;
use crate::engine::config::RulesConfig;
use crate::engine::events::{EventBus, EventSink, GameEvent};
use crate::engine::field::FieldGeometry;
use crate::engine::physics_constants::rules::MAX_DOWNS;
use crate::engine::player::PlayerEntity;
use crate::engine::types::{clamp_yard, PlayerId, Team};
use crate::engine::vibration::{VibrationEngine, VibrationSignal};

/// Mutable view of the world the rules engine referees.
pub struct Board<'a> {
    pub players: &'a mut [PlayerEntity],
    pub ball: &'a mut Option<BallEntity>,
    pub vibration: &'a mut VibrationEngine,
}

impl Board<'_> {
    pub fn player(&self, id: PlayerId) -> Option<&PlayerEntity> {
        self.players.get(id.index())
    }
}

pub struct RulesEngine {
    state: GameState,
    config: RulesConfig,
    field: Box<dyn FieldGeometry>,
    bus: EventBus,
    plays_completed: u32,
    /// Interception or kick return flipped possession during the live play
    possession_changed_in_play: bool,
}

impl RulesEngine {
    pub fn new(config: RulesConfig, field: Box<dyn FieldGeometry>) -> Self {
        Self {
            state: GameState::new(&config),
            config,
            field,
            bus: EventBus::new(),
            plays_completed: 0,
            possession_changed_in_play: false,
        }
    }

    // ========================
    // Queries
    // ========================

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.current_phase
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn field(&self) -> &dyn FieldGeometry {
        self.field.as_ref()
    }

    pub fn can_edit_players(&self) -> bool {
        self.state.current_phase.allows_editing()
    }

    pub fn plays_completed(&self) -> u32 {
        self.plays_completed
    }

    pub fn ball_carrier(&self) -> Option<PlayerId> {
        self.state.ball_carrier
    }

    // ========================
    // Notifications
    // ========================

    pub fn subscribe(&mut self, sink: Box<dyn EventSink>) {
        self.bus.subscribe(sink);
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.bus.take_events()
    }

    fn emit(&mut self, event: GameEvent) {
        self.bus.emit(event);
    }

    // ========================
    // Game lifecycle
    // ========================

    /// Fresh scores, opening possession and spot; back to SETUP.
    pub fn new_game(&mut self, board: &mut Board) {
        board.vibration.stop();
        board.vibration.take_signals();
        self.release_carrier(board);
        if let Some(ball) = board.ball.as_mut() {
            ball.reset();
        }

        let from = self.state.current_phase;
        self.state = GameState::new(&self.config);
        self.state.current_phase = from;
        self.plays_completed = 0;
        self.possession_changed_in_play = false;

        self.emit(GameEvent::ScoreChanged { home: 0, away: 0 });
        self.emit(GameEvent::PossessionChanged { team: self.state.possession });
        self.emit_down();
        self.emit_scrimmage();
        self.set_phase(GamePhase::Setup);
        log::info!("new game: {} ball at the {}", self.state.possession, self.state.line_of_scrimmage);
    }

    pub fn end_game(&mut self, board: &mut Board) -> bool {
        if self.state.current_phase == GamePhase::GameOver {
            return false;
        }
        self.stop_vibration(board);
        self.set_phase(GamePhase::GameOver);
        log::info!("game over: HOME {} - AWAY {}", self.state.home_score, self.state.away_score);
        true
    }

    /// SETUP / PLAY_OVER -> PRE_SNAP. Resets the ball to the line of scrimmage.
    pub fn ready_for_next_play(&mut self, board: &mut Board) -> bool {
        if !matches!(self.state.current_phase, GamePhase::Setup | GamePhase::PlayOver) {
            log::warn!("ready_for_next_play rejected in {:?}", self.state.current_phase);
            return false;
        }

        if let Some(max) = self.config.max_plays {
            if self.plays_completed >= max {
                self.end_game(board);
                return false;
            }
        }

        self.stop_vibration(board);
        self.release_carrier(board);
        let spot = self.field.yard_to_position(self.state.line_of_scrimmage);
        if let Some(ball) = board.ball.as_mut() {
            ball.reset();
            ball.position = spot;
        }

        self.state.last_play_result = PlayResult::None;
        self.state.los_at_snap = self.state.line_of_scrimmage;
        self.possession_changed_in_play = false;
        self.set_phase(GamePhase::PreSnap);
        self.emit_scrimmage();
        true
    }

    /// PRE_SNAP only. Records the snap spot and starts the motor; the phase
    /// flips to PLAYING on the motor's Started acknowledgement.
    pub fn snap(&mut self, board: &mut Board) -> bool {
        if self.state.current_phase != GamePhase::PreSnap {
            log::warn!("snap rejected in {:?}", self.state.current_phase);
            return false;
        }

        self.state.los_at_snap = self.state.line_of_scrimmage;
        self.possession_changed_in_play = false;
        board.vibration.start();
        for signal in board.vibration.take_signals() {
            self.on_vibration_signal(signal);
        }
        true
    }

    pub fn on_vibration_signal(&mut self, signal: VibrationSignal) {
        match signal {
            VibrationSignal::Started => {
                if self.state.current_phase == GamePhase::PreSnap {
                    self.set_phase(GamePhase::Playing);
                }
            }
            VibrationSignal::Stopped => {}
        }
    }

    /// Manual stop of a live play.
    pub fn whistle(&mut self, board: &mut Board) -> bool {
        if self.state.current_phase != GamePhase::Playing {
            return false;
        }
        self.end_play(board, PlayEndReason::Whistle)
    }

    // ========================
    // Editing between plays
    // ========================

    /// Spot the ball (e.g. from a loaded formation). Editable phases only.
    pub fn set_line_of_scrimmage(&mut self, yard: i32) -> bool {
        if !self.can_edit_players() {
            return false;
        }
        self.state.line_of_scrimmage = clamp_yard(yard);
        self.state.los_at_snap = self.state.line_of_scrimmage;
        self.emit_scrimmage();
        true
    }

    /// Stage a down-and-distance situation. Editable phases only.
    pub fn set_situation(&mut self, situation: Situation) -> bool {
        if !self.can_edit_players() {
            return false;
        }
        self.set_possession(situation.possession);
        self.state.current_down = situation.down.clamp(1, MAX_DOWNS);
        self.state.yards_to_go = situation.yards_to_go.max(1);
        self.state.home_score = situation.home_score;
        self.state.away_score = situation.away_score;
        self.emit(GameEvent::ScoreChanged { home: situation.home_score, away: situation.away_score });
        self.emit_down();
        self.set_line_of_scrimmage(situation.line_of_scrimmage)
    }

    // ========================
    // Carrier
    // ========================

    /// Hand the ball to a figure (or nobody). Clears every other figure's flag
    /// first so at most one figure ever carries.
    pub fn set_ball_carrier(&mut self, board: &mut Board, carrier: Option<PlayerId>) -> bool {
        if let Some(id) = carrier {
            if board.player(id).is_none() {
                return false;
            }
            if board.ball.as_ref().is_some_and(|b| b.is_live()) {
                return false;
            }
        }

        for p in board.players.iter_mut() {
            p.set_has_ball(false);
        }
        if let Some(id) = carrier {
            board.players[id.index()].set_has_ball(true);
            let pos = board.players[id.index()].position;
            if let Some(ball) = board.ball.as_mut() {
                ball.carry_to(pos);
            }
        }

        if self.state.ball_carrier != carrier {
            self.state.ball_carrier = carrier;
            self.emit(GameEvent::CarrierChanged { carrier });
        }
        true
    }

    fn release_carrier(&mut self, board: &mut Board) {
        self.set_ball_carrier(board, None);
    }

    // ========================
    // Internals shared by the play handlers
    // ========================

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.state.current_phase;
        if from == to {
            return;
        }
        self.state.current_phase = to;
        log::info!("phase {:?} -> {:?}", from, to);
        self.emit(GameEvent::PhaseChanged { from, to });
    }

    fn set_possession(&mut self, team: Team) {
        if self.state.possession == team {
            return;
        }
        self.state.possession = team;
        self.emit(GameEvent::PossessionChanged { team });
    }

    fn record_result(&mut self, result: PlayResult) {
        let current = self.state.last_play_result;
        let replace = match result {
            PlayResult::None => false,
            PlayResult::Tackle => current == PlayResult::None,
            _ if current.is_score() => result.is_score(),
            _ => true,
        };
        if replace {
            self.state.last_play_result = result;
        }
    }

    fn emit_down(&mut self) {
        self.emit(GameEvent::DownChanged {
            down: self.state.current_down,
            yards_to_go: self.state.yards_to_go,
        });
    }

    fn emit_scrimmage(&mut self) {
        self.emit(GameEvent::ScrimmageChanged {
            line_of_scrimmage: self.state.line_of_scrimmage,
            first_down_line: self.state.first_down_line(),
        });
    }

    fn stop_vibration(&mut self, board: &mut Board) {
        board.vibration.stop();
        for signal in board.vibration.take_signals() {
            self.on_vibration_signal(signal);
        }
    }

    /// Any live (or pre-snap kick) phase -> PLAY_OVER.
    fn end_play(&mut self, board: &mut Board, reason: PlayEndReason) -> bool {
        if self.state.current_phase.is_terminal() {
            return false;
        }
        self.stop_vibration(board);
        self.plays_completed += 1;
        self.set_phase(GamePhase::PlayOver);
        let result = self.state.last_play_result;
        log::info!("play over ({}): {:?}", reason.as_str(), result);
        self.emit(GameEvent::PlayOver { reason, result });
        true
    }
}

impl std::fmt::Debug for RulesEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RulesEngine")
            .field("state", &self.state)
            .field("plays_completed", &self.plays_completed)
            .finish()
    }
}

#[cfg(test)]
mod tests;
