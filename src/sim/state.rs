//! Run state and outward events
//!
//! Everything a single run owns lives here. The host drives it with
//! [`super::tick`] and drains [`GameEvent`]s after each tick.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::catalog::{HAZARD_CATALOG, HazardType, PICKUP_CATALOG, PickupType};
use super::corridor::Corridor;
use super::player::Player;
use super::spawner::{SpawnSchedule, Spawner};
use crate::player_start;
use crate::tuning::Tuning;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Pressed against a corridor wall
    WallExit,
    /// Health ran out
    Defeated,
    /// Survived the whole countdown
    Victory,
}

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    /// Terminal; ticks are ignored until restart
    Over(Outcome),
}

/// Notifications for the host (overlays, sounds, HUD)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// First spawn of this hazard type during the run
    FirstEncounter(HazardType),
    ItemCollected(PickupType),
    DamageTaken {
        /// Health after the hit
        health: f32,
        /// First hit of the run
        first: bool,
    },
    WallExit,
    Defeated,
    TimeExpired,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the current run was started with
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub corridor: Corridor,
    pub player: Player,
    pub hazards: Spawner<HazardType>,
    pub pickups: Spawner<PickupType>,
    /// Countdown (seconds), never negative
    pub(super) time_remaining: f32,
    /// Simulated seconds this run
    pub(super) time_elapsed: f32,
    /// Hits taken this run
    pub(super) hits_taken: u32,
    pub(super) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// New run. `tuning.seed` wins over `seed` when set.
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let seed = tuning.seed.unwrap_or(seed);
        let hazards = Spawner::new(
            &HAZARD_CATALOG,
            SpawnSchedule::Decaying {
                base: tuning.hazard_base_interval,
                floor: tuning.hazard_min_interval,
                decay: tuning.hazard_interval_decay,
            },
            tuning.spawn_y,
        )
        .with_encounter_tracking();
        let pickups = Spawner::new(
            &PICKUP_CATALOG,
            SpawnSchedule::Jittered {
                base: tuning.pickup_base_interval,
                jitter: tuning.pickup_interval_jitter,
            },
            tuning.spawn_y,
        );

        log::info!("New run (seed {}, {}s)", seed, tuning.run_duration);

        Self {
            seed,
            phase: GamePhase::Playing,
            corridor: Corridor::new(&tuning),
            player: Player::new(player_start(), &tuning),
            hazards,
            pickups,
            time_remaining: tuning.run_duration,
            time_elapsed: 0.0,
            hits_taken: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            tuning,
        }
    }

    /// Throw the run away and start fresh (clears encounter memory too)
    pub fn restart(&mut self, seed: u64) {
        *self = Self::new(self.tuning.clone(), seed);
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::Over(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Over(outcome) => Some(outcome),
            GamePhase::Playing => None,
        }
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    pub fn time_elapsed(&self) -> f32 {
        self.time_elapsed
    }

    pub fn hits_taken(&self) -> u32 {
        self.hits_taken
    }

    pub(super) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Pending events, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
