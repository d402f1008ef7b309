//! Draw-list snapshot
//!
//! Turns a [`GameState`] into plain draw commands so any backend (canvas 2D,
//! GPU, tests) can present it. Asset loading belongs to the host; this module
//! only asks whether a sprite is ready and falls back to a circle if not.

use std::collections::HashSet;

use glam::Vec2;

use crate::consts::GAME_HEIGHT;
use crate::sim::{CatalogEntry, Entity, Facing, GameState, Player};

/// Vertical spacing of corridor outline samples (px)
pub const CORRIDOR_SAMPLE_STEP: f32 = 20.0;
/// Background scrolls at half the corridor speed
pub const PARALLAX_FACTOR: f32 = 0.5;

/// Health row, top-left corner
pub const HEART_ORIGIN: Vec2 = Vec2::new(20.0, 20.0);
pub const HEART_SIZE: f32 = 40.0;
pub const HEART_GAP: f32 = 10.0;
/// Empty hearts are a faded full heart
pub const EMPTY_HEART_ALPHA: f32 = 0.3;

pub const BACKGROUND_SPRITE: &str = "flat-background";

/// Sprite readiness query implemented by the host's asset layer
pub trait AssetStore {
    fn is_ready(&self, key: &str) -> bool;
}

/// No sprites available (headless hosts, early frames)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetStore for NoAssets {
    fn is_ready(&self, _key: &str) -> bool {
        false
    }
}

impl AssetStore for HashSet<String> {
    fn is_ready(&self, key: &str) -> bool {
        self.contains(key)
    }
}

/// RGB colours
pub mod palette {
    pub const BACKGROUND: u32 = 0x4A0E0E;
    pub const SAFE_ZONE: u32 = 0xFFB6C1;
    pub const PLAYER: u32 = 0xE0F7FA;
    pub const PLAYER_GLOW: u32 = 0x00FFFF;
    pub const HAZARD_GLOW: u32 = 0xFF0000;
    pub const HAZARD_FALLBACK: u32 = 0xFFFFFF;
    pub const PICKUP_GLOW: u32 = 0x00FF00;
    pub const PICKUP_FALLBACK: u32 = 0xFFD700;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Sprite fitted into a `size` x `size` box around `center`
    Sprite {
        key: &'static str,
        center: Vec2,
        size: f32,
    },
    /// Primitive fallback
    Circle {
        center: Vec2,
        radius: f32,
        color: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub shape: Shape,
    pub alpha: f32,
    pub glow: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heart {
    Full,
    Half,
    Empty,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    /// Background tile offset (px)
    pub background_offset: f32,
    /// Corridor left edge, top to bottom
    pub corridor_left: Vec<Vec2>,
    /// Corridor right edge, top to bottom
    pub corridor_right: Vec<Vec2>,
    /// Pickups, then hazards, then the player
    pub commands: Vec<DrawCommand>,
    pub hearts: Vec<Heart>,
}

pub fn player_sprite(facing: Facing) -> &'static str {
    match facing {
        Facing::Up => "player-up",
        Facing::Down => "player-down",
        Facing::Left => "player-left",
        Facing::Right => "player-right",
    }
}

fn sprite_or_circle(
    assets: &impl AssetStore,
    key: &'static str,
    center: Vec2,
    radius: f32,
    sprite_scale: f32,
    fallback: u32,
) -> Shape {
    if assets.is_ready(key) {
        Shape::Sprite {
            key,
            center,
            size: radius * sprite_scale,
        }
    } else {
        Shape::Circle {
            center,
            radius,
            color: fallback,
        }
    }
}

fn entity_command<T: CatalogEntry>(
    assets: &impl AssetStore,
    entity: &Entity<T>,
    glow: u32,
    fallback: u32,
) -> DrawCommand {
    DrawCommand {
        shape: sprite_or_circle(
            assets,
            entity.def.sprite(),
            entity.pos,
            entity.radius(),
            2.0,
            fallback,
        ),
        alpha: 1.0,
        glow,
    }
}

fn player_command(assets: &impl AssetStore, player: &Player) -> DrawCommand {
    DrawCommand {
        // Sprite drawn slightly larger than the hitbox
        shape: sprite_or_circle(
            assets,
            player_sprite(player.facing),
            player.pos,
            player.radius,
            2.5,
            palette::PLAYER,
        ),
        alpha: if player.blink_visible() { 1.0 } else { 0.5 },
        glow: palette::PLAYER_GLOW,
    }
}

/// Heart row for a health value (one heart per point of max health)
pub fn hearts(health: f32, max_health: f32) -> Vec<Heart> {
    (0..max_health.ceil() as u32)
        .map(|i| {
            let rem = health - i as f32;
            if rem >= 1.0 {
                Heart::Full
            } else if rem >= 0.5 {
                Heart::Half
            } else {
                Heart::Empty
            }
        })
        .collect()
}

impl Heart {
    /// Sprite and alpha used to draw this heart
    pub fn sprite(self) -> (&'static str, f32) {
        match self {
            Heart::Full => ("heart-full", 1.0),
            Heart::Half => ("heart-half", 1.0),
            Heart::Empty => ("heart-full", EMPTY_HEART_ALPHA),
        }
    }
}

/// Top-left corner of the `index`th heart
pub fn heart_position(index: usize) -> Vec2 {
    HEART_ORIGIN + Vec2::new((HEART_SIZE + HEART_GAP) * index as f32, 0.0)
}

/// Top edges of the background tiles covering the screen.
///
/// Tiles are `tile_height` tall and drawn full width; the pattern repeats
/// every tile so only the offset modulo the tile height matters.
pub fn background_tiles(offset: f32, tile_height: f32) -> Vec<f32> {
    if tile_height.is_nan() || tile_height <= 0.0 {
        return Vec::new();
    }
    let mut y = offset.rem_euclid(tile_height) - tile_height;
    let mut tops = Vec::new();
    while y < GAME_HEIGHT {
        tops.push(y);
        y += tile_height;
    }
    tops
}

pub fn build_draw_list(state: &GameState, assets: &impl AssetStore) -> DrawList {
    let samples = (GAME_HEIGHT / CORRIDOR_SAMPLE_STEP) as usize + 1;
    let mut corridor_left = Vec::with_capacity(samples);
    let mut corridor_right = Vec::with_capacity(samples);
    for i in 0..samples {
        let y = i as f32 * CORRIDOR_SAMPLE_STEP;
        let b = state.corridor.bounds_at(y);
        corridor_left.push(Vec2::new(b.min, y));
        corridor_right.push(Vec2::new(b.max, y));
    }

    let pickups = state.pickups.entities();
    let hazards = state.hazards.entities();
    let mut commands = Vec::with_capacity(pickups.len() + hazards.len() + 1);
    commands.extend(
        pickups
            .iter()
            .map(|p| entity_command(assets, p, palette::PICKUP_GLOW, palette::PICKUP_FALLBACK)),
    );
    commands.extend(
        hazards
            .iter()
            .map(|h| entity_command(assets, h, palette::HAZARD_GLOW, palette::HAZARD_FALLBACK)),
    );
    commands.push(player_command(assets, &state.player));

    DrawList {
        background_offset: state.corridor.world_distance() * PARALLAX_FACTOR,
        corridor_left,
        corridor_right,
        commands,
        hearts: hearts(state.player.health, state.player.max_health),
    }
}
