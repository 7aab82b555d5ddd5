//! Passing, kicking and the ball's flight outcomes

use super::{Board, GamePhase, PlayEndReason, PlayResult, RulesEngine};
use crate::engine::ball::{BallEvent, BallState, IncompleteReason};
use crate::engine::events::GameEvent;
use crate::engine::types::{PlayerId, Team, Vec2};

impl RulesEngine {
    /// PLAYING only, with a held ball and a carrier. The carrier is released
    /// before the ball leaves his hand.
    pub fn throw_pass(&mut self, board: &mut Board, target: Vec2, power: f32) -> bool {
        if self.state.current_phase != GamePhase::Playing {
            return false;
        }
        if board.ball.as_ref().map(|b| b.state()) != Some(BallState::Held) {
            return false;
        }
        let Some(thrower) = self.state.ball_carrier else {
            return false;
        };

        self.release_carrier(board);
        let Some(passer) = board.players.get(thrower.index()) else {
            return false;
        };
        let team = passer.team;
        let thrown = board.ball.as_mut().is_some_and(|ball| ball.throw(passer, target, power));
        if thrown {
            log::debug!("{} ({}) throws toward ({:.0}, {:.0})", thrower, team, target.x, target.y);
            self.emit(GameEvent::PassThrown { thrower, team });
        }
        thrown
    }

    /// Legal in any phase before GAME_OVER while a held ball is registered, so
    /// a field goal or kickoff can be attempted without a snap. A kick made
    /// while the ball is dead starts a fresh dead-ball play.
    pub fn kick(&mut self, board: &mut Board, from: Vec2, target: Vec2, power: f32, team: Team) -> bool {
        if self.state.current_phase == GamePhase::GameOver {
            log::warn!("kick rejected in {:?}", self.state.current_phase);
            return false;
        }
        if board.ball.as_ref().map(|b| b.state()) != Some(BallState::Held) {
            return false;
        }

        self.release_carrier(board);
        if self.state.current_phase != GamePhase::Playing {
            self.state.last_play_result = PlayResult::None;
            self.possession_changed_in_play = false;
        }
        let kicked = board.ball.as_mut().is_some_and(|ball| ball.kick(from, target, power, team));
        if kicked {
            log::debug!("{} kicks from ({:.0}, {:.0}) power {:.0}", team, from.x, from.y, power);
            self.emit(GameEvent::KickStarted { team });
        }
        kicked
    }

    /// Feed one ball outcome into the rules. Accepted while the play is live
    /// or in PRE_SNAP; kick outcomes are also accepted in SETUP and PLAY_OVER,
    /// where a kick may be launched without a snap.
    pub fn on_ball_event(&mut self, board: &mut Board, event: BallEvent) -> bool {
        let accepted = match self.state.current_phase {
            GamePhase::Playing | GamePhase::PreSnap => true,
            GamePhase::Setup | GamePhase::PlayOver => event.is_kick_outcome(),
            GamePhase::GameOver => false,
        };
        if !accepted {
            log::debug!("ball event {:?} ignored in {:?}", event, self.state.current_phase);
            return false;
        }

        match event {
            BallEvent::Caught { receiver } => self.on_pass_caught(board, receiver),
            BallEvent::Intercepted { interceptor, team } => self.on_intercepted(board, interceptor, team),
            BallEvent::KickCaught { player, team } => self.on_kick_caught(board, player, team),
            BallEvent::Incomplete { reason, was_kick: false } => self.on_pass_incomplete(board, reason),
            BallEvent::Incomplete { reason, was_kick: true } => self.on_kick_dead(board, reason),
            BallEvent::FieldGoal { team } => {
                self.score_field_goal(team);
                self.end_kick(board, PlayEndReason::FieldGoal)
            }
        }
    }

    fn on_pass_caught(&mut self, board: &mut Board, receiver: PlayerId) -> bool {
        let team = self.state.possession;
        self.record_result(PlayResult::PassComplete);
        self.emit(GameEvent::PassComplete { receiver, team });
        self.set_ball_carrier(board, Some(receiver))
    }

    /// Possession flips on the spot; the play stays live with the interceptor
    /// carrying.
    fn on_intercepted(&mut self, board: &mut Board, interceptor: PlayerId, team: Team) -> bool {
        self.record_result(PlayResult::Interception);
        log::info!("interception by {} ({})", interceptor, team);
        self.emit(GameEvent::PassIntercepted { interceptor, team });
        if team != self.state.possession {
            self.set_possession(team);
            self.possession_changed_in_play = true;
        }
        self.set_ball_carrier(board, Some(interceptor))
    }

    fn on_kick_caught(&mut self, board: &mut Board, player: PlayerId, team: Team) -> bool {
        self.emit(GameEvent::KickCaught { player, team });
        let changed = team != self.state.possession;
        if changed {
            self.set_possession(team);
            self.possession_changed_in_play = true;
        }
        self.set_ball_carrier(board, Some(player));

        if self.state.current_phase == GamePhase::Playing {
            return true;
        }

        // Fielded without the board running: ball is dead where it was caught.
        if changed {
            let spot = board.player(player).map(|p| self.field.position_to_yard(p.position));
            if let Some(yard) = spot {
                self.start_series(yard);
            }
        }
        self.end_kick(board, PlayEndReason::FairCatch)
    }

    /// Down advances with no gain.
    fn on_pass_incomplete(&mut self, board: &mut Board, reason: IncompleteReason) -> bool {
        self.record_result(PlayResult::PassIncomplete);
        self.emit(GameEvent::PassIncomplete { reason });
        let spot = self.state.los_at_snap;
        self.advance_down(spot);
        self.end_play(board, PlayEndReason::IncompletePass)
    }

    /// Unfielded kick: receiving team takes over where it died, or at its own
    /// N after a touchback.
    fn on_kick_dead(&mut self, board: &mut Board, reason: IncompleteReason) -> bool {
        self.emit(GameEvent::KickDead { reason });

        let kicking = board
            .ball
            .as_ref()
            .and_then(|b| b.throwing_team())
            .unwrap_or(self.state.possession);
        let receiving = kicking.opponent();
        let dead_at = board.ball.as_ref().map(|b| self.field.position_to_yard(b.position));
        let touchback = receiving.own_yard_line(self.config.kickoff_own_yard);
        let yard = match dead_at {
            Some(y) if (y - receiving.own_goal_line()) * receiving.attack_direction() > 0 => y,
            _ => touchback,
        };

        self.set_possession(receiving);
        self.start_series(yard);
        self.end_kick(board, PlayEndReason::DeadBall)
    }

    /// Close the play a kick belongs to. A kick launched in PLAY_OVER has no
    /// phase to leave, so only the count and the notification happen.
    fn end_kick(&mut self, board: &mut Board, reason: PlayEndReason) -> bool {
        if self.state.current_phase != GamePhase::PlayOver {
            return self.end_play(board, reason);
        }
        self.stop_vibration(board);
        self.plays_completed += 1;
        let result = self.state.last_play_result;
        log::info!("dead-ball kick over ({}): {:?}", reason.as_str(), result);
        self.emit(GameEvent::PlayOver { reason, result });
        true
    }
}
