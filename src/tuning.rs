//! Game balance knobs
//!
//! Every gameplay constant the simulation reads lives here so a run can be
//! configured from JSON. Missing keys fall back to [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected configuration
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("`{name}` must be greater than zero (got {value})")]
    NonPositive { name: &'static str, value: f32 },
    #[error("`{name}` must not be negative (got {value})")]
    Negative { name: &'static str, value: f32 },
    #[error("corridor width {width} exceeds the playfield width {max}")]
    CorridorTooWide { width: f32, max: f32 },
    #[error("corridor width {width} cannot fit a player of radius {radius}")]
    CorridorTooNarrow { width: f32, radius: f32 },
    #[error("hazard interval floor {floor} is above the base interval {base}")]
    FloorAboveBase { floor: f32, base: f32 },
}

/// Named numeric constants for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Corridor ===
    pub safe_zone_width: f32,
    pub scroll_speed: f32,
    pub path_amplitude: f32,
    pub path_frequency: f32,
    pub wall_epsilon: f32,

    // === Player ===
    pub player_radius: f32,
    pub player_speed: f32,
    pub max_health: f32,
    pub invulnerable_duration: f32,

    // === Hazards ===
    pub hazard_damage: f32,
    pub hazard_base_interval: f32,
    pub hazard_min_interval: f32,
    pub hazard_interval_decay: f32,

    // === Pickups ===
    pub pickup_base_interval: f32,
    pub pickup_interval_jitter: f32,

    // === Run ===
    pub spawn_y: f32,
    pub run_duration: f32,
    /// Upper bound on a single frame's dt (None = pass frame deltas through)
    pub max_frame_dt: Option<f32>,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            safe_zone_width: SAFE_ZONE_WIDTH,
            scroll_speed: SCROLL_SPEED,
            path_amplitude: PATH_AMPLITUDE,
            path_frequency: PATH_FREQUENCY,
            wall_epsilon: WALL_EPSILON,

            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            max_health: PLAYER_MAX_HEALTH,
            invulnerable_duration: INVULNERABLE_DURATION,

            hazard_damage: HAZARD_DAMAGE,
            hazard_base_interval: HAZARD_BASE_INTERVAL,
            hazard_min_interval: HAZARD_MIN_INTERVAL,
            hazard_interval_decay: HAZARD_INTERVAL_DECAY,

            pickup_base_interval: PICKUP_BASE_INTERVAL,
            pickup_interval_jitter: PICKUP_INTERVAL_JITTER,

            spawn_y: SPAWN_Y,
            run_duration: RUN_DURATION,
            max_frame_dt: None,
            seed: None,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()
    }

    /// Serialize for export/debugging
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check ranges and cross-field constraints
    pub fn validate(self) -> Result<Self, TuningError> {
        let positive = [
            ("safe_zone_width", self.safe_zone_width),
            ("player_radius", self.player_radius),
            ("player_speed", self.player_speed),
            ("max_health", self.max_health),
            ("hazard_base_interval", self.hazard_base_interval),
            ("hazard_min_interval", self.hazard_min_interval),
            ("pickup_base_interval", self.pickup_base_interval),
            ("run_duration", self.run_duration),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::NonPositive { name, value });
            }
        }

        let non_negative = [
            ("scroll_speed", self.scroll_speed),
            ("path_amplitude", self.path_amplitude),
            ("path_frequency", self.path_frequency),
            ("wall_epsilon", self.wall_epsilon),
            ("invulnerable_duration", self.invulnerable_duration),
            ("hazard_damage", self.hazard_damage),
            ("hazard_interval_decay", self.hazard_interval_decay),
            ("pickup_interval_jitter", self.pickup_interval_jitter),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(TuningError::Negative { name, value });
            }
        }

        if let Some(value) = self.max_frame_dt
            && (value.is_nan() || value <= 0.0)
        {
            return Err(TuningError::NonPositive {
                name: "max_frame_dt",
                value,
            });
        }

        if self.safe_zone_width > GAME_WIDTH {
            return Err(TuningError::CorridorTooWide {
                width: self.safe_zone_width,
                max: GAME_WIDTH,
            });
        }
        if self.safe_zone_width <= self.player_radius * 2.0 {
            return Err(TuningError::CorridorTooNarrow {
                width: self.safe_zone_width,
                radius: self.player_radius,
            });
        }
        if self.hazard_min_interval > self.hazard_base_interval {
            return Err(TuningError::FloorAboveBase {
                floor: self.hazard_min_interval,
                base: self.hazard_base_interval,
            });
        }

        Ok(self)
    }

    /// Corridor half-width
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.safe_zone_width / 2.0
    }
}
