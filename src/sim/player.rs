//! The player's blood cell
//!
//! Moves from keyboard and drag input, stays inside the corridor and the
//! screen, and tracks health with a post-hit invulnerability window.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::corridor::{Corridor, bounds_or_full};
use super::input::InputSampler;
use crate::consts::GAME_HEIGHT;
use crate::tuning::Tuning;

/// Sprite facing, from the last non-zero movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    /// Horizontal wins only when strictly larger
    pub fn from_motion(motion: Vec2) -> Option<Self> {
        if motion == Vec2::ZERO {
            return None;
        }
        Some(if motion.x.abs() > motion.y.abs() {
            if motion.x > 0.0 { Facing::Right } else { Facing::Left }
        } else if motion.y > 0.0 {
            Facing::Down
        } else {
            Facing::Up
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub facing: Facing,
    pub health: f32,
    pub max_health: f32,
    /// Seconds of invulnerability left
    pub invulnerable_time: f32,
    pub invulnerable_duration: f32,
    /// Keyboard speed (pixels/s)
    pub speed: f32,
    wall_epsilon: f32,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            radius: tuning.player_radius,
            facing: Facing::Up,
            health: tuning.max_health,
            max_health: tuning.max_health,
            invulnerable_time: 0.0,
            invulnerable_duration: tuning.invulnerable_duration,
            speed: tuning.player_speed,
            wall_epsilon: tuning.wall_epsilon,
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_time > 0.0
    }

    /// Move from input, then clamp into the screen and the corridor
    pub fn update(&mut self, dt: f32, input: &mut InputSampler, corridor: Option<&Corridor>) {
        self.invulnerable_time = (self.invulnerable_time - dt).max(0.0);

        let keys = input.movement_vector();
        let drag = input.consume_drag_delta();
        self.pos += keys * self.speed * dt;
        // Drag is already a per-frame pixel displacement
        self.pos += drag;

        let motion = if keys != Vec2::ZERO { keys } else { drag };
        if let Some(facing) = Facing::from_motion(motion) {
            self.facing = facing;
        }

        self.clamp_into(corridor);
    }

    /// Vertical first so the corridor check uses the final height
    fn clamp_into(&mut self, corridor: Option<&Corridor>) {
        self.pos.y = self.pos.y.clamp(self.radius, GAME_HEIGHT - self.radius);

        let bounds = bounds_or_full(corridor, self.pos.y);
        let lo = bounds.min + self.radius;
        let hi = bounds.max - self.radius;
        if self.pos.x < lo {
            self.pos.x = lo;
        }
        if self.pos.x > hi {
            self.pos.x = hi;
        }
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Returns true if the hit landed (i.e. not invulnerable)
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.is_invulnerable() {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        self.invulnerable_time = self.invulnerable_duration;
        true
    }

    /// Touching either corridor wall at the current height.
    ///
    /// Position is already clamped, so this detects "pressed against" rather
    /// than "outside". Without a corridor there is no wall.
    pub fn check_wall_collision(&self, corridor: Option<&Corridor>) -> bool {
        let Some(corridor) = corridor else {
            return false;
        };
        let bounds = corridor.bounds_at(self.pos.y);
        self.pos.x - self.radius <= bounds.min + self.wall_epsilon
            || self.pos.x + self.radius >= bounds.max - self.wall_epsilon
    }

    /// Blink phase for rendering (on for 0.1 s, off for 0.1 s)
    pub fn blink_visible(&self) -> bool {
        !self.is_invulnerable() || (self.invulnerable_time * 10.0).floor() as i32 % 2 != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player_start;
    use crate::sim::input::PointerTarget;
    use proptest::prelude::*;

    fn setup() -> (Player, InputSampler, Corridor) {
        let tuning = Tuning::default();
        (
            Player::new(player_start(), &tuning),
            InputSampler::new(),
            Corridor::new(&tuning),
        )
    }

    #[test]
    fn test_keyboard_moves_at_speed() {
        let (mut player, mut input, corridor) = setup();
        input.key_down("ArrowUp");
        let start = player.pos;
        player.update(0.1, &mut input, Some(&corridor));
        assert!((start.y - player.pos.y - 40.0).abs() < 1e-3);
        assert_eq!(player.facing, Facing::Up);
    }

    #[test]
    fn test_drag_moves_by_pixels_and_sets_facing() {
        let (mut player, mut input, corridor) = setup();
        input.drag_start(Vec2::ZERO, PointerTarget::Playfield);
        input.drag_move(Vec2::new(-30.0, 10.0));
        let start = player.pos;
        player.update(0.016, &mut input, Some(&corridor));
        assert!((player.pos - (start + Vec2::new(-30.0, 10.0))).length() < 1e-3);
        assert_eq!(player.facing, Facing::Left);
        // Delta was consumed
        assert_eq!(input.consume_drag_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_keyboard_facing_wins_over_drag() {
        let (mut player, mut input, corridor) = setup();
        input.key_down("ArrowDown");
        input.drag_start(Vec2::ZERO, PointerTarget::Playfield);
        input.drag_move(Vec2::new(-30.0, 0.0));
        player.update(0.01, &mut input, Some(&corridor));
        assert_eq!(player.facing, Facing::Down);
    }

    #[test]
    fn test_facing_tie_break_is_vertical() {
        assert_eq!(Facing::from_motion(Vec2::new(1.0, 1.0)), Some(Facing::Down));
        assert_eq!(Facing::from_motion(Vec2::new(-2.0, 1.0)), Some(Facing::Left));
        assert_eq!(Facing::from_motion(Vec2::ZERO), None);
    }

    #[test]
    fn test_driven_into_wall_clamps_and_reports_collision() {
        let (mut player, mut input, corridor) = setup();
        let bounds = corridor.bounds_at(player.pos.y);
        input.drag_start(Vec2::ZERO, PointerTarget::Playfield);
        input.drag_move(Vec2::new(bounds.min - 100.0 - player.pos.x, 0.0));
        player.update(0.0, &mut input, Some(&corridor));

        let bounds = corridor.bounds_at(player.pos.y);
        assert!((player.pos.x - (bounds.min + player.radius)).abs() < 1e-3);
        assert!(player.check_wall_collision(Some(&corridor)));
    }

    #[test]
    fn test_centre_is_not_a_wall_hit() {
        let (player, _, corridor) = setup();
        assert!(!player.check_wall_collision(Some(&corridor)));
        assert!(!player.check_wall_collision(None));
    }

    #[test]
    fn test_damage_then_invulnerable() {
        let (mut player, mut input, corridor) = setup();
        assert!(player.take_damage(0.5));
        assert_eq!(player.health, 2.5);
        assert_eq!(player.invulnerable_time, player.invulnerable_duration);

        player.update(0.1, &mut input, Some(&corridor));
        assert!(!player.take_damage(0.5));
        assert_eq!(player.health, 2.5);

        // Window expires
        player.update(2.0, &mut input, Some(&corridor));
        assert_eq!(player.invulnerable_time, 0.0);
        assert!(player.take_damage(0.5));
        assert_eq!(player.health, 2.0);
    }

    #[test]
    fn test_health_is_bounded() {
        let (mut player, _, _) = setup();
        player.heal(10.0);
        assert_eq!(player.health, player.max_health);
        assert!(player.take_damage(100.0));
        assert_eq!(player.health, 0.0);
    }

    #[test]
    fn test_blink_only_while_invulnerable() {
        let (mut player, _, _) = setup();
        assert!(player.blink_visible());
        player.invulnerable_time = 1.95;
        assert!(player.blink_visible());
        player.invulnerable_time = 1.85;
        assert!(!player.blink_visible());
    }

    proptest! {
        #[test]
        fn prop_position_stays_contained(
            dx in -2000.0f32..2000.0,
            dy in -2000.0f32..2000.0,
            scroll in 0.0f32..200.0,
        ) {
            let (mut player, mut input, mut corridor) = setup();
            corridor.advance(scroll);
            input.drag_start(Vec2::ZERO, PointerTarget::Playfield);
            input.drag_move(Vec2::new(dx, dy));
            player.update(0.016, &mut input, Some(&corridor));

            let r = player.radius;
            let b = corridor.bounds_at(player.pos.y);
            prop_assert!(player.pos.x >= b.min + r - 1e-3);
            prop_assert!(player.pos.x <= b.max - r + 1e-3);
            prop_assert!(player.pos.y >= r && player.pos.y <= GAME_HEIGHT - r);
        }
    }
}
