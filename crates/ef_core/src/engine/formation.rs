//! Formation Store
//!
//! Saved figure layouts: where each figure stands and how it is tuned.
//! Slot `i` always belongs to player `i` of the simulation's table.
//!
//! Built-in sets put HOME on offense at the 50, attacking yard 0 (world -x),
//! AWAY on defense in a 4-3.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f32::consts::PI;

use super::config::PlayerConfig;
use super::physics_constants::field::{ORIGIN_X, PIXELS_PER_YARD};
use super::physics_constants::rules::STARTING_LINE;
use super::player::PlayerEntity;
use super::types::{PlayerId, Role, Team, Vec2};
use crate::error::{CoreError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationSlot {
    pub team: Team,
    pub role: Role,
    /// World position (px)
    pub position: (f32, f32),
    pub base_direction: f32,
    pub base_speed: f32,
    #[serde(default)]
    pub base_curve: f32,
}

impl FormationSlot {
    pub fn position_vec(&self) -> Vec2 {
        Vec2::new(self.position.0, self.position.1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationData {
    pub name: String,
    pub line_of_scrimmage: i32,
    pub slots: Vec<FormationSlot>,
}

impl FormationData {
    pub fn new(name: impl Into<String>, line_of_scrimmage: i32) -> Self {
        Self { name: name.into(), line_of_scrimmage, slots: Vec::new() }
    }

    /// Built-in set by name: `i` / `i_formation`, `shotgun`.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "i" | "i_formation" | "i-formation" => Some(Self::i_formation()),
            "shotgun" => Some(Self::shotgun()),
            _ => None,
        }
    }

    /// I-formation: QB under center, fullback and tailback stacked behind.
    pub fn i_formation() -> Self {
        let mut f = Self::new("i_formation", STARTING_LINE);
        f.offensive_line();
        f.offense(Role::Receiver, 1.5, 78.0, 1.0); // TE
        f.offense(Role::Receiver, 1.5, -200.0, 1.4);
        f.offense(Role::Receiver, 1.5, 200.0, 1.4);
        f.offense(Role::Quarterback, 4.0, 0.0, 0.9);
        f.offense(Role::RunningBack, 7.0, 0.0, 1.2); // FB
        f.offense(Role::RunningBack, 10.0, 0.0, 1.3); // TB
        f.four_three();
        f
    }

    /// Shotgun: QB five yards deep, four wide.
    pub fn shotgun() -> Self {
        let mut f = Self::new("shotgun", STARTING_LINE);
        f.offensive_line();
        f.offense(Role::Receiver, 1.5, -200.0, 1.4);
        f.offense(Role::Receiver, 1.5, -120.0, 1.3);
        f.offense(Role::Receiver, 1.5, 120.0, 1.3);
        f.offense(Role::Receiver, 1.5, 200.0, 1.4);
        f.offense(Role::Quarterback, 6.0, 0.0, 0.9);
        f.offense(Role::RunningBack, 6.0, 30.0, 1.2);
        f.four_three();
        f
    }

    /// Same layout slid along the field so its line sits at `yard`.
    pub fn shifted_to(&self, yard: i32) -> Self {
        let dx = (yard - self.line_of_scrimmage) as f32 * PIXELS_PER_YARD;
        let mut shifted = self.clone();
        shifted.line_of_scrimmage = yard;
        for slot in shifted.slots.iter_mut() {
            slot.position.0 += dx;
        }
        shifted
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// First slot index holding `role` for `team`.
    pub fn find(&self, team: Team, role: Role) -> Option<PlayerId> {
        self.slots.iter().position(|s| s.team == team && s.role == role).map(PlayerId)
    }

    /// Snapshot the table as it stands.
    pub fn capture(name: impl Into<String>, players: &[PlayerEntity], line_of_scrimmage: i32) -> Self {
        let slots = players
            .iter()
            .map(|p| FormationSlot {
                team: p.team,
                role: p.role,
                position: (p.position.x, p.position.y),
                base_direction: p.base_direction(),
                base_speed: p.base_speed(),
                base_curve: p.base_curve(),
            })
            .collect();
        Self { name: name.into(), line_of_scrimmage, slots }
    }

    /// Place and re-tune figures slot by slot. A slot whose team differs from
    /// the figure's is skipped. Returns how many figures were updated.
    pub fn apply_to(&self, players: &mut [PlayerEntity]) -> usize {
        let mut applied = 0;
        for (slot, player) in self.slots.iter().zip(players.iter_mut()) {
            if slot.team != player.team {
                log::debug!("formation {}: slot for {} skipped on {} figure", self.name, slot.team, player.team);
                continue;
            }
            player.role = slot.role;
            player.place(slot.position_vec(), slot.base_direction);
            player.set_base_speed(slot.base_speed);
            player.set_base_curve(slot.base_curve);
            applied += 1;
        }
        applied
    }

    /// Fresh figures for an empty table, ids in slot order.
    pub fn spawn(&self, config: &PlayerConfig) -> Vec<PlayerEntity> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, s)| {
                PlayerEntity::new(PlayerId(i), s.team, s.role, s.position_vec(), config)
                    .with_tuning(s.base_direction, s.base_speed, s.base_curve)
            })
            .collect()
    }

    pub fn ensure_fits(&self, players: &[PlayerEntity]) -> Result<()> {
        if self.slots.len() != players.len() {
            return Err(CoreError::FormationMismatch { expected: self.slots.len(), found: players.len() });
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    // ========================
    // Built-in helpers
    // ========================

    fn offense(&mut self, role: Role, yards_back: f32, y: f32, speed: f32) {
        // HOME attacks -x, so its backfield sits at larger x
        self.push(Team::Home, role, yards_back, y, PI, speed);
    }

    fn defense(&mut self, role: Role, yards_off: f32, y: f32, speed: f32) {
        self.push(Team::Away, role, -yards_off, y, 0.0, speed);
    }

    fn push(&mut self, team: Team, role: Role, yards: f32, y: f32, direction: f32, speed: f32) {
        let los_x = ORIGIN_X + self.line_of_scrimmage as f32 * PIXELS_PER_YARD;
        self.slots.push(FormationSlot {
            team,
            role,
            position: (los_x + yards * PIXELS_PER_YARD, y),
            base_direction: direction,
            base_speed: speed,
            base_curve: 0.0,
        });
    }

    fn offensive_line(&mut self) {
        for y in [-52.0, -26.0, 0.0, 26.0, 52.0] {
            self.offense(Role::Lineman, 1.5, y, 0.8);
        }
    }

    fn four_three(&mut self) {
        for y in [-39.0, -13.0, 13.0, 39.0] {
            self.defense(Role::Lineman, 1.5, y, 0.9);
        }
        for y in [-60.0, 0.0, 60.0] {
            self.defense(Role::Linebacker, 5.0, y, 1.1);
        }
        self.defense(Role::DefensiveBack, 6.0, -200.0, 1.3);
        self.defense(Role::DefensiveBack, 6.0, 200.0, 1.3);
        self.defense(Role::DefensiveBack, 12.0, -70.0, 1.2);
        self.defense(Role::DefensiveBack, 12.0, 70.0, 1.2);
    }
}

/// Collaborator that turns figures into saved layouts and back.
pub trait FormationStore {
    fn capture(&self, players: &[PlayerEntity], line_of_scrimmage: i32) -> FormationData;

    /// Returns the number of figures updated.
    fn apply(&self, data: &FormationData, players: &mut [PlayerEntity]) -> usize;
}

/// In-memory named formations with JSON encode/decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonFormationStore {
    formations: BTreeMap<String, FormationData>,
}

impl JsonFormationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with the built-in sets.
    pub fn with_builtins() -> Self {
        let mut store = Self::new();
        store.save(FormationData::i_formation());
        store.save(FormationData::shotgun());
        store
    }

    /// Insert or replace by name.
    pub fn save(&mut self, data: FormationData) {
        log::debug!("formation saved: {} ({} slots)", data.name, data.slots.len());
        self.formations.insert(data.name.clone(), data);
    }

    pub fn get(&self, name: &str) -> Result<&FormationData> {
        self.formations
            .get(name)
            .ok_or_else(|| CoreError::FormationNotFound { name: name.to_string() })
    }

    pub fn remove(&mut self, name: &str) -> Option<FormationData> {
        self.formations.remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.formations.keys().map(String::as_str)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl FormationStore for JsonFormationStore {
    fn capture(&self, players: &[PlayerEntity], line_of_scrimmage: i32) -> FormationData {
        FormationData::capture("custom", players, line_of_scrimmage)
    }

    fn apply(&self, data: &FormationData, players: &mut [PlayerEntity]) -> usize {
        data.apply_to(players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_eleven_on_eleven() {
        for f in [FormationData::i_formation(), FormationData::shotgun()] {
            assert_eq!(f.len(), 22, "{}", f.name);
            assert_eq!(f.slots.iter().filter(|s| s.team == Team::Home).count(), 11);
            assert_eq!(f.slots.iter().filter(|s| s.role == Role::Quarterback).count(), 1);
            assert!(f.find(Team::Home, Role::Quarterback).is_some());
        }
    }

    #[test]
    fn test_offense_lines_up_behind_scrimmage() {
        let f = FormationData::i_formation();
        let los_x = ORIGIN_X + f.line_of_scrimmage as f32 * PIXELS_PER_YARD;
        for s in &f.slots {
            match s.team {
                Team::Home => assert!(s.position.0 > los_x),
                Team::Away => assert!(s.position.0 < los_x),
            }
        }
    }

    #[test]
    fn test_capture_apply_restores_layout() {
        let f = FormationData::shotgun();
        let mut players = f.spawn(&PlayerConfig::default());
        let snapshot = FormationData::capture("snap", &players, f.line_of_scrimmage);

        for p in players.iter_mut() {
            p.place(Vec2::new(0.0, 0.0), 1.0);
            p.set_base_speed(3.0);
        }

        let store = JsonFormationStore::new();
        assert_eq!(store.apply(&snapshot, &mut players), 22);
        assert_eq!(FormationData::capture("snap", &players, f.line_of_scrimmage), snapshot);
    }

    #[test]
    fn test_team_mismatch_skipped() {
        let f = FormationData::i_formation();
        let mut players = f.spawn(&PlayerConfig::default());
        players.reverse();
        // reversed table: every slot now faces a figure from the other side
        assert_eq!(f.apply_to(&mut players), 0);
    }

    #[test]
    fn test_shift_moves_every_slot() {
        let f = FormationData::i_formation();
        let moved = f.shifted_to(20);
        assert_eq!(moved.line_of_scrimmage, 20);
        for (a, b) in f.slots.iter().zip(&moved.slots) {
            assert!((a.position.0 - b.position.0 - 300.0).abs() < 1e-3);
            assert_eq!(a.position.1, b.position.1);
        }
    }

    #[test]
    fn test_ensure_fits() {
        let f = FormationData::i_formation();
        let players = f.spawn(&PlayerConfig::default());
        assert!(f.ensure_fits(&players).is_ok());
        let err = f.ensure_fits(&players[..3]).unwrap_err();
        assert!(matches!(err, CoreError::FormationMismatch { expected: 22, found: 3 }));
    }

    #[test]
    fn test_store_json_roundtrip_and_lookup() {
        let store = JsonFormationStore::with_builtins();
        assert_eq!(store.names().collect::<Vec<_>>(), vec!["i_formation", "shotgun"]);

        let json = store.to_json().unwrap();
        let loaded = JsonFormationStore::from_json(&json).unwrap();
        assert_eq!(loaded.get("shotgun").unwrap(), &FormationData::shotgun());
        assert!(matches!(loaded.get("wishbone"), Err(CoreError::FormationNotFound { .. })));
    }

    #[test]
    fn test_slot_curve_defaults_when_missing() {
        let json = r#"{"name":"x","line_of_scrimmage":30,"slots":[
            {"team":"Away","role":"linebacker","position":[300.0,10.0],"base_direction":0.0,"base_speed":1.0}
        ]}"#;
        let f = FormationData::from_json(json).unwrap();
        assert_eq!(f.slots[0].base_curve, 0.0);
        assert_eq!(f.slots[0].role, Role::Linebacker);
    }
}
