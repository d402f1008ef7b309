//! Vein Guardian - a scrolling corridor survival arcade game
//!
//! Core modules:
//! - `sim`: Simulation (corridor, spawners, player, collisions, tick)
//! - `driver`: Frame loop gating (update vs draw)
//! - `render`: Draw-list snapshot with asset fallbacks
//! - `tuning`: Data-driven game balance

pub mod driver;
pub mod render;
pub mod sim;
pub mod tuning;

pub use driver::{FrameStep, LoopDriver};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical playfield size (portrait, ~9:16)
    pub const GAME_WIDTH: f32 = 540.0;
    pub const GAME_HEIGHT: f32 = 960.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    /// Pixels per second at full keyboard deflection
    pub const PLAYER_SPEED: f32 = 400.0;
    pub const PLAYER_MAX_HEALTH: f32 = 3.0;
    /// Seconds of i-frames after a hit
    pub const INVULNERABLE_DURATION: f32 = 2.0;
    /// Player spawns this far above the bottom edge
    pub const PLAYER_START_OFFSET: f32 = 100.0;

    /// Run length (seconds). Surviving this long wins.
    pub const RUN_DURATION: f32 = 40.0;

    /// Winding corridor
    pub const SAFE_ZONE_WIDTH_PCT: f32 = 0.65;
    pub const SAFE_ZONE_WIDTH: f32 = GAME_WIDTH * SAFE_ZONE_WIDTH_PCT;
    /// World pixels scrolled per second
    pub const SCROLL_SPEED: f32 = 150.0;
    /// Max centre-line deviation from the middle of the screen
    pub const PATH_AMPLITUDE: f32 = 80.0;
    /// Radians per world pixel
    pub const PATH_FREQUENCY: f32 = 0.002;
    /// Distance from a wall (px) that counts as touching it
    pub const WALL_EPSILON: f32 = 1.0;

    /// Hazard spawning: interval shrinks with run time down to a floor
    pub const HAZARD_BASE_INTERVAL: f32 = 1.0;
    pub const HAZARD_MIN_INTERVAL: f32 = 0.3;
    pub const HAZARD_INTERVAL_DECAY: f32 = 0.02;
    pub const HAZARD_DAMAGE: f32 = 0.5;

    /// Pickup spawning: base interval plus uniform jitter
    pub const PICKUP_BASE_INTERVAL: f32 = 3.0;
    pub const PICKUP_INTERVAL_JITTER: f32 = 2.0;
    pub const PICKUP_SPEED: f32 = 180.0;

    /// Entities appear just above the top edge
    pub const SPAWN_Y: f32 = -50.0;
}

/// Player start position for a fresh run
#[inline]
pub fn player_start() -> Vec2 {
    Vec2::new(
        consts::GAME_WIDTH / 2.0,
        consts::GAME_HEIGHT - consts::PLAYER_START_OFFSET,
    )
}

/// True when two circles overlap (touching edges do not count)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}
