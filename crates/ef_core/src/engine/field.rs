//! Field Geometry
//!
//! Yard line <-> world position conversion.
//!
//! ## Coordinate System
//! - Yard 0 = AWAY goal line (HOME attacks it), yard 100 = HOME goal line
//! - World x grows with the yard line, `pixels_per_yard` per yard
//! - World y = 0 is the middle of the field, sidelines at +/- width / 2
//! - End zones extend `end_zone_yards` beyond each goal line
//!
//! The field is handed to the rules engine once at construction; there is no
//! deferred binding.

use super::config::FieldConfig;
use super::physics_constants::field::{MAX_YARD, MIN_YARD};
use super::types::{clamp_yard, Team, Vec2};

/// Playable rectangle and scoring geometry in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub min: Vec2,
    pub max: Vec2,
    /// World x of yard 0 (AWAY goal line)
    pub away_goal_x: f32,
    /// World x of yard 100 (HOME goal line)
    pub home_goal_x: f32,
    /// Upright span along y
    pub post_min_y: f32,
    pub post_max_y: f32,
}

impl FieldBounds {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// World x of the goal line `team` attacks.
    pub fn target_goal_x(&self, team: Team) -> f32 {
        match team {
            Team::Home => self.away_goal_x,
            Team::Away => self.home_goal_x,
        }
    }

    /// True once `p` is on or past the goal line `team` attacks.
    pub fn crossed_goal_line(&self, team: Team, p: Vec2) -> bool {
        let goal_x = self.target_goal_x(team);
        let own_x = self.target_goal_x(team.opponent());
        let outward = (goal_x - own_x).signum();
        (p.x - goal_x) * outward >= 0.0
    }

    pub fn between_posts(&self, p: Vec2) -> bool {
        p.y >= self.post_min_y && p.y <= self.post_max_y
    }
}

/// Collaborator the rules engine uses to turn tackle spots into yard lines.
pub trait FieldGeometry {
    fn yard_to_position(&self, yard: i32) -> Vec2;

    /// Nearest yard line, clamped to [0, 100].
    fn position_to_yard(&self, position: Vec2) -> i32;

    fn bounds(&self) -> FieldBounds;
}

#[derive(Debug, Clone)]
pub struct YardLineField {
    config: FieldConfig,
}

impl YardLineField {
    pub fn new(config: FieldConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    fn yard_x(&self, yard: f32) -> f32 {
        self.config.origin_x + yard * self.config.pixels_per_yard
    }
}

impl Default for YardLineField {
    fn default() -> Self {
        Self::new(FieldConfig::default())
    }
}

impl FieldGeometry for YardLineField {
    fn yard_to_position(&self, yard: i32) -> Vec2 {
        Vec2::new(self.yard_x(clamp_yard(yard) as f32), 0.0)
    }

    fn position_to_yard(&self, position: Vec2) -> i32 {
        let yards = (position.x - self.config.origin_x) / self.config.pixels_per_yard;
        if !yards.is_finite() {
            return MIN_YARD;
        }
        clamp_yard(yards.round() as i32)
    }

    fn bounds(&self) -> FieldBounds {
        let half_w = self.config.width * 0.5;
        let half_posts = self.config.goal_post_width * 0.5;
        let ez = self.config.end_zone_yards;
        FieldBounds {
            min: Vec2::new(self.yard_x(MIN_YARD as f32 - ez), -half_w),
            max: Vec2::new(self.yard_x(MAX_YARD as f32 + ez), half_w),
            away_goal_x: self.yard_x(MIN_YARD as f32),
            home_goal_x: self.yard_x(MAX_YARD as f32),
            post_min_y: -half_posts,
            post_max_y: half_posts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yard_roundtrip() {
        let field = YardLineField::default();
        for yard in [0, 1, 20, 38, 50, 99, 100] {
            assert_eq!(field.position_to_yard(field.yard_to_position(yard)), yard);
        }
    }

    #[test]
    fn test_position_to_yard_clamps_end_zones() {
        let field = YardLineField::default();
        let b = field.bounds();
        assert_eq!(field.position_to_yard(Vec2::new(b.min.x, 0.0)), 0);
        assert_eq!(field.position_to_yard(Vec2::new(b.max.x, 0.0)), 100);
        assert_eq!(field.position_to_yard(Vec2::new(-1.0e6, 0.0)), 0);
    }

    #[test]
    fn test_rounds_to_nearest_yard() {
        let field = YardLineField::default();
        let p = field.yard_to_position(38) + Vec2::new(3.0, 40.0);
        assert_eq!(field.position_to_yard(p), 38);
        let p = field.yard_to_position(38) + Vec2::new(6.0, 0.0);
        assert_eq!(field.position_to_yard(p), 39);
    }

    #[test]
    fn test_goal_line_crossing_by_team() {
        let field = YardLineField::default();
        let b = field.bounds();
        let deep_away_ez = field.yard_to_position(0) - Vec2::new(5.0, 0.0);
        let deep_home_ez = field.yard_to_position(100) + Vec2::new(5.0, 0.0);
        let midfield = field.yard_to_position(50);

        assert!(b.crossed_goal_line(Team::Home, deep_away_ez));
        assert!(!b.crossed_goal_line(Team::Home, midfield));
        assert!(!b.crossed_goal_line(Team::Home, deep_home_ez));
        assert!(b.crossed_goal_line(Team::Away, deep_home_ez));
        assert!(!b.crossed_goal_line(Team::Away, deep_away_ez));
    }

    #[test]
    fn test_bounds_include_end_zones() {
        let field = YardLineField::default();
        let b = field.bounds();
        assert!(b.contains(field.yard_to_position(0) - Vec2::new(50.0, 0.0)));
        assert!(!b.contains(field.yard_to_position(0) - Vec2::new(150.0, 0.0)));
        assert!(!b.contains(Vec2::new(field.yard_to_position(50).x, 300.0)));
        assert!(b.between_posts(Vec2::new(0.0, 10.0)));
        assert!(!b.between_posts(Vec2::new(0.0, 40.0)));
    }
}
