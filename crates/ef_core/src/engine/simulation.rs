//! Simulation facade
//!
//! Owns the board: figures, the ball, the motor, the referee and the contact
//! detector. One [`Simulation::step`] is one physics tick:
//!
//! 1. vibration engine advances
//! 2. figures take their impulse and integrate
//! 3. ball follows its carrier or flies; flight outcomes go to the rules
//! 4. contacts are detected once for the tick
//! 5. ball contacts resolve (at most one outcome), then tackles dispatch
//!
//! so a tick produces at most one rules update per carrier.

use super::ball::BallEntity;
use super::config::GameConfig;
use super::contact::{Contact, ContactDetector};
use super::events::{EventSink, GameEvent};
use super::field::{FieldGeometry, YardLineField};
use super::formation::FormationData;
use super::player::{PlayerEntity, TackleEvent};
use super::rules::{Board, GamePhase, GameState, RulesEngine, Situation};
use super::timestep::{ticks_for, MAX_STEP_DT, PHYSICS_DT};
use super::types::{PlayerId, Role, Team, Vec2};
use super::vibration::VibrationEngine;
use crate::error::Result;

#[derive(Debug)]
pub struct Simulation {
    players: Vec<PlayerEntity>,
    ball: Option<BallEntity>,
    vibration: VibrationEngine,
    rules: RulesEngine,
    contacts: ContactDetector,
    config: GameConfig,
    tick: u64,
}

impl Simulation {
    pub fn new(config: GameConfig) -> Self {
        let field: Box<dyn FieldGeometry> = Box::new(YardLineField::new(config.field.clone()));
        Self {
            players: Vec::new(),
            ball: None,
            vibration: VibrationEngine::new(&config.vibration),
            rules: RulesEngine::new(config.rules.clone(), field),
            contacts: ContactDetector::new(),
            config,
            tick: 0,
        }
    }

    fn split(&mut self) -> (&mut RulesEngine, Board<'_>) {
        (
            &mut self.rules,
            Board { players: &mut self.players, ball: &mut self.ball, vibration: &mut self.vibration },
        )
    }

    // ========================
    // Queries
    // ========================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        self.rules.state()
    }

    pub fn phase(&self) -> GamePhase {
        self.rules.phase()
    }

    pub fn rules(&self) -> &RulesEngine {
        &self.rules
    }

    pub fn can_edit_players(&self) -> bool {
        self.rules.can_edit_players()
    }

    pub fn players(&self) -> &[PlayerEntity] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerEntity> {
        self.players.get(id.index())
    }

    /// Mutable figure access for editing. `None` while the play is live.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerEntity> {
        if !self.rules.can_edit_players() {
            return None;
        }
        self.players.get_mut(id.index())
    }

    pub fn ball(&self) -> Option<&BallEntity> {
        self.ball.as_ref()
    }

    pub fn vibration(&self) -> &VibrationEngine {
        &self.vibration
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// First figure of `team` with `role`.
    pub fn find_player(&self, team: Team, role: Role) -> Option<PlayerId> {
        self.players.iter().find(|p| p.team == team && p.role == role).map(|p| p.id)
    }

    // ========================
    // Setup
    // ========================

    pub fn add_player(&mut self, team: Team, role: Role, position: Vec2) -> PlayerId {
        let id = PlayerId(self.players.len());
        self.players.push(PlayerEntity::new(id, team, role, position, &self.config.player));
        id
    }

    /// Put a ball on the line of scrimmage. Replaces any existing ball.
    pub fn register_ball(&mut self) {
        let spot = self.rules.field().yard_to_position(self.rules.state().line_of_scrimmage);
        self.ball = Some(BallEntity::new(spot, self.config.ball.clone()));
    }

    /// Lay out the board and spot the ball at the formation's line.
    ///
    /// An empty table is populated from the slots; otherwise the table must
    /// match the formation's size. Returns 0 while the play is live.
    pub fn apply_formation(&mut self, data: &FormationData) -> Result<usize> {
        if !self.rules.can_edit_players() {
            log::warn!("formation {} rejected in {:?}", data.name, self.rules.phase());
            return Ok(0);
        }
        if self.players.is_empty() {
            self.players = data.spawn(&self.config.player);
        } else {
            data.ensure_fits(&self.players)?;
        }

        let applied = data.apply_to(&mut self.players);
        self.rules.set_line_of_scrimmage(data.line_of_scrimmage);
        let spot = self.rules.field().yard_to_position(self.rules.state().line_of_scrimmage);
        if let Some(ball) = self.ball.as_mut().filter(|b| !b.is_live()) {
            ball.position = spot;
        }
        log::info!("formation {} applied to {} figures", data.name, applied);
        Ok(applied)
    }

    pub fn capture_formation(&self, name: &str) -> FormationData {
        FormationData::capture(name, &self.players, self.rules.state().line_of_scrimmage)
    }

    pub fn set_situation(&mut self, situation: Situation) -> bool {
        self.rules.set_situation(situation)
    }

    // ========================
    // Rules forwarding
    // ========================

    pub fn subscribe(&mut self, sink: Box<dyn EventSink>) {
        self.rules.subscribe(sink);
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.rules.take_events()
    }

    pub fn new_game(&mut self) {
        let (rules, mut board) = self.split();
        rules.new_game(&mut board);
    }

    pub fn end_game(&mut self) -> bool {
        let (rules, mut board) = self.split();
        rules.end_game(&mut board)
    }

    pub fn ready_for_next_play(&mut self) -> bool {
        let (rules, mut board) = self.split();
        rules.ready_for_next_play(&mut board)
    }

    pub fn snap(&mut self) -> bool {
        let (rules, mut board) = self.split();
        rules.snap(&mut board)
    }

    pub fn whistle(&mut self) -> bool {
        let (rules, mut board) = self.split();
        rules.whistle(&mut board)
    }

    pub fn set_ball_carrier(&mut self, carrier: Option<PlayerId>) -> bool {
        let (rules, mut board) = self.split();
        rules.set_ball_carrier(&mut board, carrier)
    }

    pub fn throw_pass(&mut self, target: Vec2, power: f32) -> bool {
        let (rules, mut board) = self.split();
        rules.throw_pass(&mut board, target, power)
    }

    pub fn kick(&mut self, from: Vec2, target: Vec2, power: f32, team: Team) -> bool {
        let (rules, mut board) = self.split();
        rules.kick(&mut board, from, target, power, team)
    }

    // ========================
    // Tick
    // ========================

    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 || !dt.is_finite() {
            return;
        }
        let dt = dt.min(MAX_STEP_DT);
        self.tick += 1;

        self.vibration.advance(dt);
        for player in self.players.iter_mut() {
            player.tick(&mut self.vibration, dt);
        }

        self.update_ball(dt);
        self.dispatch_contacts();
        log::trace!("tick {} phase {:?}", self.tick, self.rules.phase());
    }

    /// Step fixed ticks for `seconds` of board time.
    pub fn run_for(&mut self, seconds: f32) {
        for _ in 0..ticks_for(seconds) {
            self.step(PHYSICS_DT);
        }
    }

    /// Step until the play is no longer live, capped at `max_seconds`.
    /// Returns true if the play ended on its own.
    pub fn run_until_dead(&mut self, max_seconds: f32) -> bool {
        for _ in 0..ticks_for(max_seconds) {
            if self.rules.phase() != GamePhase::Playing {
                return true;
            }
            self.step(PHYSICS_DT);
        }
        self.rules.phase() != GamePhase::Playing
    }

    fn update_ball(&mut self, dt: f32) {
        let carrier_pos = self
            .rules
            .ball_carrier()
            .and_then(|id| self.players.get(id.index()))
            .map(|p| p.position);
        let bounds = self.rules.field().bounds();

        let Some(ball) = self.ball.as_mut() else {
            return;
        };
        if let Some(pos) = carrier_pos {
            ball.carry_to(pos);
        }
        let event = ball.tick(dt, &bounds);
        if let Some(event) = event {
            let (rules, mut board) = self.split();
            rules.on_ball_event(&mut board, event);
        }
    }

    fn dispatch_contacts(&mut self) {
        let contacts = self.contacts.detect(&self.players, self.ball.as_ref()).to_vec();

        for contact in contacts.iter() {
            let Contact::Ball(id) = *contact else { continue };
            let event = match (self.ball.as_mut(), self.players.get(id.index())) {
                (Some(ball), Some(player)) => ball.resolve_contact(player),
                _ => None,
            };
            if let Some(event) = event {
                let (rules, mut board) = self.split();
                rules.on_ball_event(&mut board, event);
                break;
            }
        }

        let mut tackles: Vec<TackleEvent> = Vec::new();
        for contact in contacts.iter() {
            let Contact::Players(a, b) = *contact else { continue };
            if let Some(tackle) = self.players[a.index()].on_contact(&self.players[b.index()]) {
                if !tackles.contains(&tackle) {
                    tackles.push(tackle);
                }
            }
        }
        for tackle in tackles {
            let (rules, mut board) = self.split();
            rules.on_player_tackled(&mut board, tackle);
        }
    }
}
