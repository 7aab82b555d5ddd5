//! Tackle resolution: touchdown > safety > (new series | first down | turnover on downs | next down)

use super::{Board, GamePhase, PlayEndReason, PlayResult, RulesEngine};
use crate::engine::events::GameEvent;
use crate::engine::physics_constants::rules::MAX_DOWNS;
use crate::engine::player::TackleEvent;
use crate::engine::types::{clamp_yard, Team};

/// How a tackle spot scores, if at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SpotOutcome {
    Touchdown,
    Safety,
    Live,
}

/// Classify a yard line for the team carrying the ball.
pub(super) fn classify_spot(team: Team, yard: i32) -> SpotOutcome {
    let dir = team.attack_direction();
    if (yard - team.target_goal_line()) * dir >= 0 {
        SpotOutcome::Touchdown
    } else if (yard - team.own_goal_line()) * dir <= 0 {
        SpotOutcome::Safety
    } else {
        SpotOutcome::Live
    }
}

impl RulesEngine {
    /// Carrier brought down. PLAYING only, and only for the current carrier;
    /// a second report for the same carrier lands in PLAY_OVER and is dropped.
    pub fn on_player_tackled(&mut self, board: &mut Board, tackle: TackleEvent) -> bool {
        if self.state.current_phase != GamePhase::Playing {
            return false;
        }
        if self.state.ball_carrier != Some(tackle.carrier) {
            log::debug!("tackle on {} ignored: not the carrier", tackle.carrier);
            return false;
        }
        let Some(carrier) = board.player(tackle.carrier) else {
            return false;
        };
        let team = carrier.team;
        let yard = self.field.position_to_yard(carrier.position);
        log::debug!("{} tackled by {} at the {}", tackle.carrier, tackle.tackler, yard);

        if team != self.state.possession {
            self.set_possession(team);
            self.possession_changed_in_play = true;
        }

        match classify_spot(team, yard) {
            SpotOutcome::Touchdown => self.score_touchdown(team),
            SpotOutcome::Safety => self.score_safety(team),
            // Interception or kick return: the new offense never had a snap, so
            // its series starts where the return was stopped.
            SpotOutcome::Live if self.possession_changed_in_play => {
                self.record_result(PlayResult::Tackle);
                self.start_series(yard);
            }
            SpotOutcome::Live => {
                self.record_result(PlayResult::Tackle);
                self.advance_down(yard);
            }
        }

        self.end_play(board, PlayEndReason::Tackle)
    }

    pub(super) fn score_touchdown(&mut self, team: Team) {
        self.award(team, self.config.touchdown_points);
        self.record_result(PlayResult::Touchdown);
        log::info!("TOUCHDOWN {}", team);
        self.emit(GameEvent::Touchdown { team });
        self.set_up_free_kick(team, team.opponent());
    }

    pub(super) fn score_field_goal(&mut self, team: Team) {
        self.award(team, self.config.field_goal_points);
        self.record_result(PlayResult::FieldGoal);
        log::info!("FIELD GOAL {}", team);
        self.emit(GameEvent::FieldGoal { team });
        self.set_up_free_kick(team, team.opponent());
    }

    /// `carrying` was tackled behind its own goal line.
    fn score_safety(&mut self, carrying: Team) {
        let defending = carrying.opponent();
        self.award(defending, self.config.safety_points);
        self.record_result(PlayResult::Safety);
        log::info!("SAFETY {}", defending);
        self.emit(GameEvent::Safety { team: defending });
        self.set_up_free_kick(carrying, carrying);
    }

    fn award(&mut self, team: Team, points: u32) {
        self.state.add_score(team, points);
        self.emit(GameEvent::ScoreChanged {
            home: self.state.home_score,
            away: self.state.away_score,
        });
    }

    /// Ball spotted at the kicking team's own N, 1st & 10 for `receiving`.
    fn set_up_free_kick(&mut self, kicking: Team, receiving: Team) {
        self.set_possession(receiving);
        self.state.line_of_scrimmage = clamp_yard(kicking.own_yard_line(self.config.kickoff_own_yard));
        self.reset_down_and_distance();
        self.emit_down();
        self.emit_scrimmage();
    }

    /// 1st & 10 for the current possession at `yard`.
    pub(super) fn start_series(&mut self, yard: i32) {
        self.state.line_of_scrimmage = clamp_yard(yard);
        self.reset_down_and_distance();
        self.emit_down();
        self.emit_scrimmage();
    }

    /// Normal down processing from the snap spot to `yard`.
    pub(super) fn advance_down(&mut self, yard: i32) {
        let team = self.state.possession;
        let yard = clamp_yard(yard);
        let gained = (yard - self.state.los_at_snap) * team.attack_direction();
        self.state.line_of_scrimmage = yard;

        if gained >= self.state.yards_to_go {
            self.reset_down_and_distance();
            self.emit(GameEvent::FirstDown { team });
        } else if self.state.current_down >= MAX_DOWNS {
            let next = team.opponent();
            self.reset_down_and_distance();
            log::info!("turnover on downs: {} ball at the {}", next, yard);
            self.emit(GameEvent::TurnoverOnDowns { team: next });
            self.set_possession(next);
        } else {
            self.state.yards_to_go -= gained;
            self.state.current_down += 1;
        }

        self.emit_down();
        self.emit_scrimmage();
    }

    fn reset_down_and_distance(&mut self) {
        self.state.current_down = 1;
        self.state.yards_to_go = self.config.yards_for_first_down;
    }
}
