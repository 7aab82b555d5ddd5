//! Rules engine unit tests

use super::*;
use crate::engine::ball::{BallEvent, BallState, IncompleteReason};
use crate::engine::config::{BallConfig, PlayerConfig, VibrationConfig};
use crate::engine::field::YardLineField;
use crate::engine::player::TackleEvent;
use crate::engine::types::{Role, Vec2};

struct Table {
    rules: RulesEngine,
    players: Vec<PlayerEntity>,
    ball: Option<BallEntity>,
    vibration: VibrationEngine,
}

impl Table {
    fn new(config: RulesConfig) -> Self {
        let field = YardLineField::default();
        let players = vec![
            figure(0, Team::Home, Role::Quarterback),
            figure(1, Team::Home, Role::Receiver),
            figure(2, Team::Away, Role::DefensiveBack),
            figure(3, Team::Away, Role::Receiver),
        ];
        Self {
            ball: Some(BallEntity::new(field.yard_to_position(50), BallConfig::default())),
            rules: RulesEngine::new(config, Box::new(field)),
            players,
            vibration: VibrationEngine::new(&VibrationConfig { seed: Some(7), ..Default::default() }),
        }
    }

    fn split(&mut self) -> (&mut RulesEngine, Board<'_>) {
        (
            &mut self.rules,
            Board { players: &mut self.players, ball: &mut self.ball, vibration: &mut self.vibration },
        )
    }

    fn ready(&mut self) -> bool {
        let (rules, mut board) = self.split();
        rules.ready_for_next_play(&mut board)
    }

    fn snap(&mut self) -> bool {
        let (rules, mut board) = self.split();
        rules.snap(&mut board)
    }

    fn carry(&mut self, id: usize) -> bool {
        let (rules, mut board) = self.split();
        rules.set_ball_carrier(&mut board, Some(PlayerId(id)))
    }

    fn tackle(&mut self, carrier: usize, tackler: usize) -> bool {
        let (rules, mut board) = self.split();
        let ev = TackleEvent { carrier: PlayerId(carrier), tackler: PlayerId(tackler) };
        rules.on_player_tackled(&mut board, ev)
    }

    fn ball_event(&mut self, event: BallEvent) -> bool {
        let (rules, mut board) = self.split();
        rules.on_ball_event(&mut board, event)
    }

    fn move_to_yard(&mut self, id: usize, yard: i32) {
        self.players[id].position = self.rules.field().yard_to_position(yard);
    }

    /// PRE_SNAP staged situation, snapped and live, player `carrier` holding.
    fn live_play(&mut self, situation: Situation, carrier: usize) {
        assert!(self.ready());
        assert!(self.rules.set_situation(situation));
        assert!(self.carry(carrier));
        assert!(self.snap());
        assert_eq!(self.rules.phase(), GamePhase::Playing);
        self.rules.take_events();
    }
}

fn figure(id: usize, team: Team, role: Role) -> PlayerEntity {
    PlayerEntity::new(PlayerId(id), team, role, Vec2::zeros(), &PlayerConfig::default())
}

fn names(events: &[GameEvent]) -> Vec<&'static str> {
    events.iter().map(GameEvent::name).collect()
}

#[test]
fn test_phase_cycle() {
    let mut t = Table::new(RulesConfig::default());
    assert_eq!(t.rules.phase(), GamePhase::Setup);
    assert!(!t.snap(), "snap outside PRE_SNAP is rejected");

    assert!(t.ready());
    assert_eq!(t.rules.phase(), GamePhase::PreSnap);
    assert!(t.rules.can_edit_players());

    assert!(t.snap());
    assert_eq!(t.rules.phase(), GamePhase::Playing);
    assert!(t.vibration.is_active());
    assert!(!t.rules.can_edit_players());

    // double snap absorbed
    assert!(!t.snap());
    assert!(!t.ready());
    assert_eq!(t.rules.phase(), GamePhase::Playing);

    let (rules, mut board) = t.split();
    assert!(rules.whistle(&mut board));
    assert!(!rules.whistle(&mut board));
    assert_eq!(t.rules.phase(), GamePhase::PlayOver);
    assert!(!t.vibration.is_active());
    assert_eq!(t.rules.plays_completed(), 1);
}

#[test]
fn test_single_carrier() {
    let mut t = Table::new(RulesConfig::default());
    assert!(t.carry(0));
    assert!(t.carry(1));
    let carriers: Vec<_> = t.players.iter().filter(|p| p.has_ball()).map(|p| p.id).collect();
    assert_eq!(carriers, vec![PlayerId(1)]);
    assert_eq!(t.rules.ball_carrier(), Some(PlayerId(1)));

    assert!(!t.carry(99));
    assert_eq!(t.rules.ball_carrier(), Some(PlayerId(1)));
}

#[test]
fn test_first_down() {
    let mut t = Table::new(RulesConfig::default());
    t.live_play(Situation::new(Team::Home, 1, 10, 50), 0);
    t.move_to_yard(0, 38);

    assert!(t.tackle(0, 2));
    let s = t.rules.state();
    assert_eq!((s.current_down, s.yards_to_go, s.line_of_scrimmage), (1, 10, 38));
    assert_eq!(s.last_play_result, PlayResult::Tackle);
    let events = t.rules.take_events();
    assert_eq!(names(&events).iter().filter(|n| **n == "first_down").count(), 1);
    assert!(events.contains(&GameEvent::PlayOver { reason: PlayEndReason::Tackle, result: PlayResult::Tackle }));

    // the same carrier again is absorbed
    assert!(!t.tackle(0, 2));
    assert!(t.rules.take_events().is_empty());
}

#[test]
fn test_short_gain_advances_down() {
    let mut t = Table::new(RulesConfig::default());
    t.live_play(Situation::new(Team::Away, 2, 10, 30), 3);
    t.move_to_yard(3, 34);

    assert!(t.tackle(3, 0));
    let s = t.rules.state();
    assert_eq!((s.current_down, s.yards_to_go, s.line_of_scrimmage), (3, 6, 34));
    assert_eq!(s.possession, Team::Away);
}

#[test]
fn test_turnover_on_downs() {
    let mut t = Table::new(RulesConfig::default());
    t.live_play(Situation::new(Team::Home, 4, 3, 50), 0);
    t.move_to_yard(0, 49);

    assert!(t.tackle(0, 2));
    let s = t.rules.state();
    assert_eq!(s.possession, Team::Away);
    assert_eq!((s.current_down, s.yards_to_go, s.line_of_scrimmage), (1, 10, 49));
    let events = t.rules.take_events();
    assert!(events.contains(&GameEvent::TurnoverOnDowns { team: Team::Away }));
    assert!(!names(&events).contains(&"first_down"));
}

#[test]
fn test_touchdown_short_circuits_downs() {
    let mut t = Table::new(RulesConfig::default());
    t.live_play(Situation::new(Team::Home, 4, 10, 5), 0);
    t.move_to_yard(0, 0);

    assert!(t.tackle(0, 2));
    let s = t.rules.state();
    assert_eq!(s.home_score, 6);
    assert_eq!(s.possession, Team::Away);
    assert_eq!(s.line_of_scrimmage, 80);
    assert_eq!((s.current_down, s.yards_to_go), (1, 10));
    assert_eq!(s.last_play_result, PlayResult::Touchdown);

    let events = t.rules.take_events();
    let n = names(&events);
    assert!(!n.contains(&"first_down"));
    assert!(!n.contains(&"turnover_on_downs"));
    let score = n.iter().position(|e| *e == "score_changed").unwrap();
    let td = n.iter().position(|e| *e == "touchdown").unwrap();
    let poss = n.iter().position(|e| *e == "possession_changed").unwrap();
    assert!(score < td && td < poss);
}

#[test]
fn test_safety() {
    let mut t = Table::new(RulesConfig::default());
    t.live_play(Situation::new(Team::Away, 1, 10, 5), 3);
    t.move_to_yard(3, 0);

    assert!(t.tackle(3, 0));
    let s = t.rules.state();
    assert_eq!(s.home_score, 2);
    assert_eq!(s.possession, Team::Away);
    assert_eq!(s.line_of_scrimmage, 20);
    assert_eq!(s.last_play_result, PlayResult::Safety);
    assert!(t.rules.take_events().contains(&GameEvent::Safety { team: Team::Home }));
}

#[test]
fn test_interception_flips_possession_and_stays_live() {
    let mut t = Table::new(RulesConfig::default());
    t.live_play(Situation::new(Team::Home, 2, 7, 50), 0);

    let (rules, mut board) = t.split();
    assert!(rules.throw_pass(&mut board, Vec2::new(300.0, 0.0), 400.0));
    assert!(rules.ball_carrier().is_none());
    assert!(!t.players[0].has_ball());

    let bounds = t.rules.field().bounds();
    let ball = t.ball.as_mut().unwrap();
    assert!(ball.tick(0.2, &bounds).is_none());
    let event = ball.resolve_contact(&t.players[2]).unwrap();
    assert_eq!(event, BallEvent::Intercepted { interceptor: PlayerId(2), team: Team::Away });

    assert!(t.ball_event(event));
    assert_eq!(t.rules.phase(), GamePhase::Playing);
    assert_eq!(t.rules.state().possession, Team::Away);
    assert_eq!(t.rules.ball_carrier(), Some(PlayerId(2)));
    assert!(t.players[2].has_ball());

    // returned to the 60: new series for AWAY there
    t.move_to_yard(2, 60);
    assert!(t.tackle(2, 1));
    let s = t.rules.state();
    assert_eq!(s.possession, Team::Away);
    assert_eq!((s.current_down, s.yards_to_go, s.line_of_scrimmage), (1, 10, 60));
    assert_eq!(s.last_play_result, PlayResult::Interception);
}

#[test]
fn test_incomplete_pass_costs_a_down() {
    let mut t = Table::new(RulesConfig::default());
    t.live_play(Situation::new(Team::Home, 3, 4, 40), 0);

    let reason = IncompleteReason::Timeout;
    assert!(t.ball_event(BallEvent::Incomplete { reason, was_kick: false }));
    let s = t.rules.state();
    assert_eq!((s.current_down, s.yards_to_go, s.line_of_scrimmage), (4, 4, 40));
    assert_eq!(s.current_phase, GamePhase::PlayOver);
    assert_eq!(s.last_play_result, PlayResult::PassIncomplete);
    assert!(t.rules.take_events().contains(&GameEvent::PlayOver {
        reason: PlayEndReason::IncompletePass,
        result: PlayResult::PassIncomplete,
    }));
}

#[test]
fn test_throw_requires_live_play() {
    let mut t = Table::new(RulesConfig::default());
    assert!(t.ready());
    assert!(t.carry(0));
    let (rules, mut board) = t.split();
    assert!(!rules.throw_pass(&mut board, Vec2::new(300.0, 0.0), 400.0));
    assert_eq!(t.rules.ball_carrier(), Some(PlayerId(0)));
}

#[test]
fn test_pre_snap_field_goal() {
    let mut t = Table::new(RulesConfig::default());
    assert!(t.ready());
    let from = t.rules.field().yard_to_position(25);
    let (rules, mut board) = t.split();
    assert!(rules.kick(&mut board, from, Vec2::new(0.0, 0.0), 500.0, Team::Home));
    assert!(!rules.kick(&mut board, from, Vec2::new(0.0, 0.0), 500.0, Team::Home));

    assert!(t.ball_event(BallEvent::FieldGoal { team: Team::Home }));
    let s = t.rules.state();
    assert_eq!(s.home_score, 3);
    assert_eq!(s.possession, Team::Away);
    assert_eq!(s.line_of_scrimmage, 80);
    assert_eq!(s.current_phase, GamePhase::PlayOver);
    assert_eq!(s.last_play_result, PlayResult::FieldGoal);
}

#[test]
fn test_dead_kick_turns_over_at_spot() {
    let mut t = Table::new(RulesConfig::default());
    t.live_play(Situation::new(Team::Home, 4, 8, 60), 0);
    let from = t.players[0].position;
    let (rules, mut board) = t.split();
    assert!(rules.kick(&mut board, from, Vec2::new(0.0, 0.0), 400.0, Team::Home));

    t.ball.as_mut().unwrap().position = t.rules.field().yard_to_position(25);
    let reason = IncompleteReason::Stopped;
    assert!(t.ball_event(BallEvent::Incomplete { reason, was_kick: true }));
    let s = t.rules.state();
    assert_eq!(s.possession, Team::Away);
    assert_eq!((s.current_down, s.line_of_scrimmage), (1, 25));
}

#[test]
fn test_kick_into_end_zone_is_touchback() {
    let mut t = Table::new(RulesConfig::default());
    assert!(t.ready());
    let from = t.rules.field().yard_to_position(80);
    let (rules, mut board) = t.split();
    assert!(rules.kick(&mut board, from, Vec2::new(0.0, 0.0), 800.0, Team::Home));

    t.ball.as_mut().unwrap().position = t.rules.field().yard_to_position(0) - Vec2::new(30.0, 0.0);
    let reason = IncompleteReason::Timeout;
    assert!(t.ball_event(BallEvent::Incomplete { reason, was_kick: true }));
    assert_eq!(t.rules.state().possession, Team::Away);
    assert_eq!(t.rules.state().line_of_scrimmage, 20);
}

#[test]
fn test_kick_between_plays_resolves_in_play_over() {
    let mut t = Table::new(RulesConfig::default());
    t.live_play(Situation::new(Team::Home, 4, 8, 60), 0);
    let (rules, mut board) = t.split();
    assert!(rules.whistle(&mut board));
    let from = board.players[0].position;
    assert!(rules.kick(&mut board, from, Vec2::new(0.0, 0.0), 400.0, Team::Home));
    rules.take_events();

    t.ball.as_mut().unwrap().position = t.rules.field().yard_to_position(30);
    let reason = IncompleteReason::Stopped;
    assert!(t.ball_event(BallEvent::Incomplete { reason, was_kick: true }));

    let s = t.rules.state();
    assert_eq!(s.current_phase, GamePhase::PlayOver);
    assert_eq!(s.possession, Team::Away);
    assert_eq!((s.current_down, s.line_of_scrimmage), (1, 30));
    assert_eq!(t.rules.plays_completed(), 2);
    let events = t.rules.take_events();
    assert!(events.contains(&GameEvent::PlayOver { reason: PlayEndReason::DeadBall, result: PlayResult::None }));
    assert!(!names(&events).contains(&"phase_changed"));
    assert!(t.ready());
}

#[test]
fn test_pass_outcome_ignored_outside_live_play() {
    let mut t = Table::new(RulesConfig::default());
    let reason = IncompleteReason::Timeout;
    assert!(!t.ball_event(BallEvent::Incomplete { reason, was_kick: false }));
    assert!(!t.ball_event(BallEvent::Caught { receiver: PlayerId(1) }));
    assert_eq!(t.rules.phase(), GamePhase::Setup);
    assert_eq!(t.rules.state().current_down, 1);
}

#[test]
fn test_kick_rejected_after_game_over() {
    let mut t = Table::new(RulesConfig::default());
    let (rules, mut board) = t.split();
    assert!(rules.end_game(&mut board));
    assert!(!rules.kick(&mut board, Vec2::new(350.0, 0.0), Vec2::new(0.0, 0.0), 500.0, Team::Home));
    assert!(!rules.on_ball_event(&mut board, BallEvent::FieldGoal { team: Team::Home }));
    assert_eq!(t.rules.state().home_score, 0);
    assert_eq!(t.ball.as_ref().unwrap().state(), BallState::Held);
}

#[test]
fn test_events_ignored_after_play_over() {
    let mut t = Table::new(RulesConfig::default());
    t.live_play(Situation::new(Team::Home, 1, 10, 50), 0);
    let (rules, mut board) = t.split();
    assert!(rules.whistle(&mut board));
    rules.take_events();

    let reason = IncompleteReason::Timeout;
    assert!(!t.ball_event(BallEvent::Incomplete { reason, was_kick: false }));
    assert_eq!(t.rules.state().current_down, 1);
    assert!(t.rules.take_events().is_empty());
}

#[test]
fn test_editing_rejected_while_live() {
    let mut t = Table::new(RulesConfig::default());
    t.live_play(Situation::new(Team::Home, 1, 10, 50), 0);
    assert!(!t.rules.set_line_of_scrimmage(20));
    assert!(!t.rules.set_situation(Situation::new(Team::Away, 1, 10, 20)));
    assert_eq!(t.rules.state().line_of_scrimmage, 50);
}

#[test]
fn test_line_of_scrimmage_clamped() {
    let mut t = Table::new(RulesConfig::default());
    assert!(t.rules.set_line_of_scrimmage(140));
    assert_eq!(t.rules.state().line_of_scrimmage, 100);
    assert!(t.rules.set_line_of_scrimmage(-3));
    assert_eq!(t.rules.state().line_of_scrimmage, 0);
}

#[test]
fn test_max_plays_ends_game() {
    let config = RulesConfig { max_plays: Some(1), ..Default::default() };
    let mut t = Table::new(config);
    t.live_play(Situation::new(Team::Home, 1, 10, 50), 0);
    let (rules, mut board) = t.split();
    assert!(rules.whistle(&mut board));

    assert!(!t.ready());
    assert_eq!(t.rules.phase(), GamePhase::GameOver);
    assert!(!t.ready());

    let (rules, mut board) = t.split();
    rules.new_game(&mut board);
    assert_eq!(t.rules.phase(), GamePhase::Setup);
    assert_eq!(t.rules.plays_completed(), 0);
    assert!(t.ready());
}

#[test]
fn test_new_game_resets_state() {
    let mut t = Table::new(RulesConfig::default());
    t.live_play(Situation::new(Team::Home, 1, 10, 5), 0);
    t.move_to_yard(0, 0);
    assert!(t.tackle(0, 2));
    assert_eq!(t.rules.state().home_score, 6);

    let (rules, mut board) = t.split();
    rules.new_game(&mut board);
    let s = t.rules.state();
    assert_eq!((s.home_score, s.away_score), (0, 0));
    assert_eq!(s.possession, Team::Home);
    assert_eq!(s.line_of_scrimmage, 50);
    assert!(s.ball_carrier.is_none());
    assert!(t.players.iter().all(|p| !p.has_ball()));
}

#[test]
fn test_score_results_override() {
    let mut t = Table::new(RulesConfig::default());
    t.rules.record_result(PlayResult::PassComplete);
    t.rules.record_result(PlayResult::Tackle);
    assert_eq!(t.rules.state().last_play_result, PlayResult::PassComplete);
    t.rules.record_result(PlayResult::Touchdown);
    t.rules.record_result(PlayResult::Interception);
    assert_eq!(t.rules.state().last_play_result, PlayResult::Touchdown);
}
