//! Winding corridor (the "vein")
//!
//! The corridor centre-line is a sine wave in world space. The world scrolls
//! toward the player, so the top of the screen shows the path furthest ahead
//! and the bottom of the screen shows where the player currently is:
//!
//! ```text
//! absolute_y = world_distance + (GAME_HEIGHT - screen_y)
//! centre     = GAME_WIDTH / 2 + amplitude * sin(frequency * absolute_y)
//! ```

use serde::{Deserialize, Serialize};

use crate::consts::{GAME_HEIGHT, GAME_WIDTH};
use crate::tuning::Tuning;

/// Horizontal extents of the safe zone at one screen height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
    pub center: f32,
}

impl Bounds {
    /// Whole playfield width, used when no corridor is available
    pub fn full_screen() -> Self {
        Self {
            min: 0.0,
            max: GAME_WIDTH,
            center: GAME_WIDTH / 2.0,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max - self.min
    }
}

/// Boundary field: scroll progress plus the path shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corridor {
    /// Total distance scrolled this run (world pixels)
    world_distance: f32,
    scroll_speed: f32,
    amplitude: f32,
    frequency: f32,
    half_width: f32,
}

impl Corridor {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            world_distance: 0.0,
            scroll_speed: tuning.scroll_speed,
            amplitude: tuning.path_amplitude,
            frequency: tuning.path_frequency,
            half_width: tuning.half_width(),
        }
    }

    /// Scroll forward
    pub fn advance(&mut self, dt: f32) {
        self.world_distance += self.scroll_speed * dt.max(0.0);
    }

    pub fn world_distance(&self) -> f32 {
        self.world_distance
    }

    /// Safe-zone width (constant for a run)
    pub fn width(&self) -> f32 {
        self.half_width * 2.0
    }

    /// Centre-line x at an absolute world y
    pub fn center_at(&self, world_y: f32) -> f32 {
        GAME_WIDTH / 2.0 + (world_y * self.frequency).sin() * self.amplitude
    }

    /// Corridor extents at a screen-space y
    pub fn bounds_at(&self, screen_y: f32) -> Bounds {
        let look_ahead = GAME_HEIGHT - screen_y;
        let center = self.center_at(self.world_distance + look_ahead);
        Bounds {
            min: center - self.half_width,
            max: center + self.half_width,
            center,
        }
    }
}

/// Bounds query that tolerates a missing corridor (partial initialisation)
pub fn bounds_or_full(corridor: Option<&Corridor>, screen_y: f32) -> Bounds {
    match corridor {
        Some(c) => c.bounds_at(screen_y),
        None => Bounds::full_screen(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_advance_accumulates_scroll() {
        let mut corridor = Corridor::new(&Tuning::default());
        corridor.advance(0.5);
        corridor.advance(0.5);
        assert!((corridor.world_distance() - 150.0).abs() < 1e-4);
    }

    #[test]
    fn test_bottom_of_screen_is_current_position() {
        let mut corridor = Corridor::new(&Tuning::default());
        corridor.advance(2.0);
        let bottom = corridor.bounds_at(GAME_HEIGHT);
        assert!((bottom.center - corridor.center_at(300.0)).abs() < 1e-4);

        let top = corridor.bounds_at(0.0);
        assert!((top.center - corridor.center_at(300.0 + GAME_HEIGHT)).abs() < 1e-4);
    }

    #[test]
    fn test_start_is_centred() {
        let corridor = Corridor::new(&Tuning::default());
        let b = corridor.bounds_at(GAME_HEIGHT);
        assert!((b.center - GAME_WIDTH / 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_missing_corridor_is_full_screen() {
        let b = bounds_or_full(None, 123.0);
        assert_eq!(b, Bounds::full_screen());
        assert_eq!(b.width(), GAME_WIDTH);
    }

    #[test]
    fn test_bounds_are_reproducible() {
        let mut a = Corridor::new(&Tuning::default());
        let mut b = Corridor::new(&Tuning::default());
        a.advance(1.25);
        b.advance(1.25);
        assert_eq!(a.bounds_at(400.0), b.bounds_at(400.0));
    }

    proptest! {
        #[test]
        fn prop_width_is_constant(distance in 0.0f32..100_000.0, screen_y in 0.0f32..GAME_HEIGHT) {
            let mut corridor = Corridor::new(&Tuning::default());
            corridor.advance(distance / corridor.scroll_speed);
            let b = corridor.bounds_at(screen_y);
            prop_assert!(b.min < b.max);
            prop_assert!((b.width() - corridor.width()).abs() < 1e-3);
            prop_assert!(b.min <= b.center && b.center <= b.max);
        }
    }
}
