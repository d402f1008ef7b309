//! Timed entity spawning
//!
//! One generic spawner drives both hazards and pickups. Entities appear above
//! the top edge inside the corridor, fall at their catalog speed and are dropped
//! once fully past the bottom edge.

use std::collections::HashSet;

use glam::Vec2;
use rand::Rng;

use super::catalog::CatalogEntry;
use super::corridor::{Corridor, bounds_or_full};
use crate::consts::GAME_HEIGHT;

/// How long to wait between spawns
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnSchedule {
    /// `max(floor, base - elapsed * decay)`: difficulty ramps up then saturates
    Decaying { base: f32, floor: f32, decay: f32 },
    /// `base + uniform(0, jitter)`
    Jittered { base: f32, jitter: f32 },
}

impl SpawnSchedule {
    /// Deterministic part of the interval at a given run time
    pub fn interval_at(&self, elapsed: f32) -> f32 {
        match *self {
            SpawnSchedule::Decaying { base, floor, decay } => (base - elapsed * decay).max(floor),
            SpawnSchedule::Jittered { base, .. } => base,
        }
    }

    fn next_interval<R: Rng + ?Sized>(&self, elapsed: f32, rng: &mut R) -> f32 {
        match *self {
            SpawnSchedule::Decaying { .. } => self.interval_at(elapsed),
            SpawnSchedule::Jittered { base, jitter } => base + rng.random::<f32>() * jitter,
        }
    }
}

/// A live hazard or pickup
#[derive(Debug, Clone, PartialEq)]
pub struct Entity<T> {
    pub id: u32,
    pub pos: Vec2,
    pub def: T,
}

impl<T: CatalogEntry> Entity<T> {
    #[inline]
    pub fn radius(&self) -> f32 {
        self.def.radius()
    }

    /// Fully below the visible area
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.pos.y - self.radius() > GAME_HEIGHT
    }
}

/// Spawner over one catalog
#[derive(Debug, Clone)]
pub struct Spawner<T: CatalogEntry> {
    catalog: &'static [T],
    schedule: SpawnSchedule,
    spawn_y: f32,
    /// Seconds until the next spawn
    timer: f32,
    /// Run time seen by this spawner (drives difficulty)
    elapsed: f32,
    /// In flight, oldest first
    entities: Vec<Entity<T>>,
    next_id: u32,
    /// Keys already spawned this run (only when encounter tracking is on)
    seen: Option<HashSet<T::Key>>,
}

impl<T: CatalogEntry> Spawner<T> {
    pub fn new(catalog: &'static [T], schedule: SpawnSchedule, spawn_y: f32) -> Self {
        Self {
            catalog,
            schedule,
            spawn_y,
            timer: 0.0,
            elapsed: 0.0,
            entities: Vec::new(),
            next_id: 1,
            seen: None,
        }
    }

    /// Report the first spawn of each catalog key from [`Spawner::update`]
    pub fn with_encounter_tracking(mut self) -> Self {
        self.seen = Some(HashSet::new());
        self
    }

    pub fn entities(&self) -> &[Entity<T>] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut Vec<Entity<T>> {
        &mut self.entities
    }

    pub fn schedule(&self) -> &SpawnSchedule {
        &self.schedule
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn has_seen(&self, key: T::Key) -> bool {
        self.seen.as_ref().is_some_and(|s| s.contains(&key))
    }

    /// Interval that would be scheduled right now (ignoring jitter)
    pub fn current_interval(&self) -> f32 {
        self.schedule.interval_at(self.elapsed)
    }

    /// Advance timers, spawn when due, move and cull entities.
    ///
    /// Returns the catalog entry when this tick spawned a key for the first time
    /// this run (encounter tracking only).
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        corridor: Option<&Corridor>,
        rng: &mut R,
    ) -> Option<T> {
        self.elapsed += dt;

        let mut first_encounter = None;
        self.timer -= dt;
        if self.timer <= 0.0 {
            first_encounter = self.spawn(corridor, rng);
            self.timer = self.schedule.next_interval(self.elapsed, rng);
        }

        for entity in &mut self.entities {
            entity.pos.y += entity.def.speed() * dt;
        }
        self.entities.retain(|e| !e.is_off_screen());

        first_encounter
    }

    /// Spawn one random entry at the top of the corridor
    fn spawn<R: Rng + ?Sized>(&mut self, corridor: Option<&Corridor>, rng: &mut R) -> Option<T> {
        if self.catalog.is_empty() {
            return None;
        }
        let def = self.catalog[rng.random_range(0..self.catalog.len())];

        let bounds = bounds_or_full(corridor, 0.0);
        let x = bounds.min + rng.random::<f32>() * bounds.width();

        let id = self.next_id;
        self.next_id += 1;
        self.entities.push(Entity {
            id,
            pos: Vec2::new(x, self.spawn_y),
            def,
        });
        log::debug!("spawned {:?} #{} at x={:.1}", def.key(), id, x);

        match self.seen.as_mut() {
            Some(seen) => seen.insert(def.key()).then_some(def),
            None => None,
        }
    }

    /// Forget entities, timers and encounter memory
    pub fn reset(&mut self) {
        self.timer = 0.0;
        self.elapsed = 0.0;
        self.entities.clear();
        self.next_id = 1;
        if let Some(seen) = self.seen.as_mut() {
            seen.clear();
        }
    }
}
