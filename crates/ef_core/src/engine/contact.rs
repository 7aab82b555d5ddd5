//! Contact detection
//!
//! Circle-overlap broad phase standing in for a rigid-body engine's contact
//! reports. Each unordered pair is reported at most once per tick, so a
//! collision can never be processed twice in the same frame.

use super::ball::BallEntity;
use super::player::PlayerEntity;
use super::types::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Contact {
    /// Two figures touching; always `a < b`
    Players(PlayerId, PlayerId),
    /// A figure touching the loose ball
    Ball(PlayerId),
}

#[derive(Debug, Clone, Default)]
pub struct ContactDetector {
    /// Scratch buffer reused across ticks
    pairs: Vec<Contact>,
}

impl ContactDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// All contacts for the current positions, players first (by id), then
    /// ball contacts ordered by distance to the ball.
    pub fn detect(&mut self, players: &[PlayerEntity], ball: Option<&BallEntity>) -> &[Contact] {
        self.pairs.clear();

        for (i, a) in players.iter().enumerate() {
            for b in &players[i + 1..] {
                if a.overlaps(b) {
                    let (lo, hi) = if a.id < b.id { (a.id, b.id) } else { (b.id, a.id) };
                    self.pairs.push(Contact::Players(lo, hi));
                }
            }
        }

        if let Some(ball) = ball.filter(|b| b.is_live()) {
            let mut touching: Vec<(f32, PlayerId)> = players
                .iter()
                .filter_map(|p| {
                    let reach = p.contact_radius + ball.contact_radius();
                    let d2 = (p.position - ball.position).norm_squared();
                    (d2 <= reach * reach).then_some((d2, p.id))
                })
                .collect();
            touching.sort_by(|x, y| x.0.total_cmp(&y.0).then(x.1.cmp(&y.1)));
            self.pairs.extend(touching.into_iter().map(|(_, id)| Contact::Ball(id)));
        }

        &self.pairs
    }
}
