//! Simulation module
//!
//! All gameplay logic lives here:
//! - Corridor shape and scrolling
//! - Hazard and pickup spawning
//! - Player movement, health and invulnerability
//! - Collisions and the per-frame tick
//!
//! No rendering or platform dependencies. Randomness comes from the seeded
//! RNG owned by [`GameState`].

pub mod catalog;
pub mod collision;
pub mod corridor;
pub mod input;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use catalog::{
    CatalogEntry, HAZARD_CATALOG, HazardFamily, HazardKind, HazardType, PICKUP_CATALOG,
    PickupKind, PickupType,
};
pub use collision::{collect_pickup, hazard_contact};
pub use corridor::{Bounds, Corridor, bounds_or_full};
pub use input::{InputAction, InputSampler, PointerTarget};
pub use player::{Facing, Player};
pub use spawner::{Entity, SpawnSchedule, Spawner};
pub use state::{GameEvent, GamePhase, GameState, Outcome};
pub use tick::tick;
