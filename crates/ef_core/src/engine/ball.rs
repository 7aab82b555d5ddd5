//! Ball Entity and flight model
//!
//! State machine:
//! ```text
//! HELD --throw--> IN_FLIGHT --contact--> CAUGHT (catch or interception)
//!      --kick---> KICKED    --contact--> CAUGHT (anyone may field a kick)
//!                           --uprights-> CAUGHT (field goal, ball freezes)
//! IN_FLIGHT | KICKED --timeout / out_of_bounds / stopped--> INCOMPLETE
//! any --reset()--> HELD
//! ```
//! Transitions only move forward within a play; `reset()` is the single way
//! back to HELD.

use serde::{Deserialize, Serialize};

use super::config::BallConfig;
use super::field::FieldBounds;
use super::player::PlayerEntity;
use super::types::{heading, PlayerId, Team, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallState {
    #[default]
    Held,
    InFlight,
    Caught,
    Incomplete,
    Kicked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncompleteReason {
    Timeout,
    OutOfBounds,
    Stopped,
}

impl IncompleteReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncompleteReason::Timeout => "timeout",
            IncompleteReason::OutOfBounds => "out_of_bounds",
            IncompleteReason::Stopped => "stopped",
        }
    }
}

/// What the ball reports upward to the rules engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallEvent {
    /// Pass caught by an eligible teammate of the thrower
    Caught { receiver: PlayerId },
    /// Pass caught by the defense
    Intercepted { interceptor: PlayerId, team: Team },
    /// Kick fielded (by either team)
    KickCaught { player: PlayerId, team: Team },
    Incomplete { reason: IncompleteReason, was_kick: bool },
    FieldGoal { team: Team },
}

impl BallEvent {
    /// Outcomes that can only come from a kick
    pub fn is_kick_outcome(&self) -> bool {
        matches!(
            self,
            BallEvent::FieldGoal { .. } | BallEvent::KickCaught { .. } | BallEvent::Incomplete { was_kick: true, .. }
        )
    }
}

#[derive(Debug, Clone)]
pub struct BallEntity {
    state: BallState,
    /// Non-owning; `None` for kicks
    thrower: Option<PlayerId>,
    throwing_team: Option<Team>,
    flight_time: f32,
    is_kick: bool,
    kick_height: f32,
    pub position: Vec2,
    pub velocity: Vec2,
    config: BallConfig,
}

impl BallEntity {
    pub fn new(position: Vec2, config: BallConfig) -> Self {
        Self {
            state: BallState::Held,
            thrower: None,
            throwing_team: None,
            flight_time: 0.0,
            is_kick: false,
            kick_height: 0.0,
            position,
            velocity: Vec2::zeros(),
            config,
        }
    }

    pub fn state(&self) -> BallState {
        self.state
    }

    pub fn thrower(&self) -> Option<PlayerId> {
        self.thrower
    }

    pub fn throwing_team(&self) -> Option<Team> {
        self.throwing_team
    }

    pub fn flight_time(&self) -> f32 {
        self.flight_time
    }

    pub fn is_kick(&self) -> bool {
        self.is_kick
    }

    /// Derived kick arc height (0 for passes)
    pub fn height(&self) -> f32 {
        self.kick_height
    }

    pub fn contact_radius(&self) -> f32 {
        self.config.contact_radius
    }

    /// True while the ball is travelling on its own.
    pub fn is_live(&self) -> bool {
        matches!(self.state, BallState::InFlight | BallState::Kicked)
    }

    /// A ball in hand (held, or caught in the air) rides with its carrier.
    pub fn carry_to(&mut self, position: Vec2) {
        if matches!(self.state, BallState::Held | BallState::Caught) {
            self.position = position;
        }
    }

    /// HELD -> IN_FLIGHT. Returns false unless the ball is held.
    pub fn throw(&mut self, thrower: &PlayerEntity, target: Vec2, power: f32) -> bool {
        if self.state != BallState::Held {
            return false;
        }
        let power = power.clamp(self.config.throw_power_min, self.config.throw_power_max);
        let dir = direction_or(target - thrower.position, heading(thrower.facing()));

        self.position = thrower.position;
        self.velocity = dir * power;
        self.thrower = Some(thrower.id);
        self.throwing_team = Some(thrower.team);
        self.flight_time = 0.0;
        self.is_kick = false;
        self.kick_height = 0.0;
        self.state = BallState::InFlight;
        true
    }

    /// HELD -> KICKED. Returns false unless the ball is held.
    pub fn kick(&mut self, from: Vec2, target: Vec2, power: f32, team: Team) -> bool {
        if self.state != BallState::Held {
            return false;
        }
        let power = power.clamp(self.config.kick_power_min, self.config.kick_power_max);
        let fallback = Vec2::new(team.attack_direction() as f32, 0.0);
        let dir = direction_or(target - from, fallback);

        self.position = from;
        self.velocity = dir * power;
        self.thrower = None;
        self.throwing_team = Some(team);
        self.flight_time = 0.0;
        self.is_kick = true;
        self.kick_height = 0.0;
        self.state = BallState::Kicked;
        true
    }

    /// Back to HELD with no flight state. Position is kept.
    pub fn reset(&mut self) {
        self.state = BallState::Held;
        self.thrower = None;
        self.throwing_team = None;
        self.flight_time = 0.0;
        self.is_kick = false;
        self.kick_height = 0.0;
        self.velocity = Vec2::zeros();
    }

    /// Integrate one tick of flight and check the end-of-flight conditions.
    pub fn tick(&mut self, dt: f32, bounds: &FieldBounds) -> Option<BallEvent> {
        if !self.is_live() || dt <= 0.0 {
            return None;
        }

        self.flight_time += dt;
        self.position += self.velocity * dt;
        let decay = (1.0 - self.config.linear_damping * dt).clamp(0.0, 1.0);
        self.velocity *= decay;

        if self.is_kick {
            self.kick_height = self.arc_height();
            if let Some(event) = self.check_field_goal(bounds) {
                return Some(event);
            }
        }

        let reason = if self.flight_time >= self.config.flight_timeout_secs {
            Some(IncompleteReason::Timeout)
        } else if !bounds.contains(self.position) {
            Some(IncompleteReason::OutOfBounds)
        } else if self.velocity.norm() < self.config.stop_speed && !self.is_ascending_kick() {
            Some(IncompleteReason::Stopped)
        } else {
            None
        };

        reason.map(|reason| {
            self.state = BallState::Incomplete;
            self.velocity = Vec2::zeros();
            log::debug!("ball incomplete: {} after {:.2}s", reason.as_str(), self.flight_time);
            BallEvent::Incomplete { reason, was_kick: self.is_kick }
        })
    }

    /// Decide the single outcome of the ball touching a figure.
    ///
    /// - kick: anyone may field it once it is low enough
    /// - pass: eligible teammate (not the thrower) catches; any opponent intercepts;
    ///   other teammates and the thrower do not affect it
    pub fn resolve_contact(&mut self, player: &PlayerEntity) -> Option<BallEvent> {
        if !self.is_live() || self.flight_time < self.config.catch_grace_secs {
            return None;
        }

        let event = if self.is_kick {
            if self.kick_height > self.config.catchable_height {
                return None;
            }
            BallEvent::KickCaught { player: player.id, team: player.team }
        } else if Some(player.team) == self.throwing_team {
            if self.thrower == Some(player.id) || !player.is_eligible_receiver() {
                return None;
            }
            BallEvent::Caught { receiver: player.id }
        } else {
            BallEvent::Intercepted { interceptor: player.id, team: player.team }
        };

        self.state = BallState::Caught;
        self.velocity = Vec2::zeros();
        self.position = player.position;
        Some(event)
    }

    fn arc_height(&self) -> f32 {
        let u = (self.flight_time / self.config.flight_timeout_secs).clamp(0.0, 1.0);
        4.0 * self.config.kick_peak_height * u * (1.0 - u)
    }

    fn is_ascending_kick(&self) -> bool {
        self.is_kick && self.flight_time < self.config.flight_timeout_secs * 0.5
    }

    fn check_field_goal(&mut self, bounds: &FieldBounds) -> Option<BallEvent> {
        let team = self.throwing_team?;
        if self.kick_height < self.config.field_goal_min_height
            || !bounds.between_posts(self.position)
            || !bounds.crossed_goal_line(team, self.position)
        {
            return None;
        }
        self.state = BallState::Caught;
        self.velocity = Vec2::zeros();
        log::debug!("field goal for {} at height {:.1}", team, self.kick_height);
        Some(BallEvent::FieldGoal { team })
    }
}

fn direction_or(delta: Vec2, fallback: Vec2) -> Vec2 {
    let len = delta.norm();
    if len > f32::EPSILON {
        delta / len
    } else {
        fallback
    }
}
