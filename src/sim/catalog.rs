//! Spawn catalogs
//!
//! Fixed tables of hazard and pickup definitions. Spawners pick uniformly from
//! these; the tables never change during a run.

use std::fmt::Debug;
use std::hash::Hash;

use crate::consts::PICKUP_SPEED;

/// Shared view of a catalog row used by the generic spawner
pub trait CatalogEntry: Copy + Debug + 'static {
    type Key: Copy + Eq + Hash + Debug;

    fn key(&self) -> Self::Key;
    fn radius(&self) -> f32;
    /// Fall speed in pixels/s
    fn speed(&self) -> f32;
    /// Sprite lookup key for the renderer
    fn sprite(&self) -> &'static str;
}

/// Pathogen types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HazardKind {
    Germ,
    BacteriaGreen,
    BacteriaPurple,
    Virus1,
    Virus2,
}

/// Groups used for first-encounter messaging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardFamily {
    Germ,
    Bacteria,
    Virus,
}

impl HazardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HazardKind::Germ => "GERM",
            HazardKind::BacteriaGreen => "BACTERIA_GREEN",
            HazardKind::BacteriaPurple => "BACTERIA_PURPLE",
            HazardKind::Virus1 => "VIRUS_1",
            HazardKind::Virus2 => "VIRUS_2",
        }
    }

    pub fn family(&self) -> HazardFamily {
        match self {
            HazardKind::Germ => HazardFamily::Germ,
            HazardKind::BacteriaGreen | HazardKind::BacteriaPurple => HazardFamily::Bacteria,
            HazardKind::Virus1 | HazardKind::Virus2 => HazardFamily::Virus,
        }
    }
}

/// One hazard definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardType {
    pub kind: HazardKind,
    pub radius: f32,
    pub speed: f32,
    /// Score weight (carried for hosts; the core keeps no score)
    pub score: u32,
    pub sprite: &'static str,
}

impl CatalogEntry for HazardType {
    type Key = HazardKind;

    fn key(&self) -> HazardKind {
        self.kind
    }
    fn radius(&self) -> f32 {
        self.radius
    }
    fn speed(&self) -> f32 {
        self.speed
    }
    fn sprite(&self) -> &'static str {
        self.sprite
    }
}

pub const HAZARD_CATALOG: [HazardType; 5] = [
    HazardType {
        kind: HazardKind::Germ,
        radius: 25.0,
        speed: 200.0,
        score: 10,
        sprite: "germ",
    },
    HazardType {
        kind: HazardKind::BacteriaGreen,
        radius: 28.0,
        speed: 150.0,
        score: 20,
        sprite: "bacteria-green",
    },
    HazardType {
        kind: HazardKind::BacteriaPurple,
        radius: 28.0,
        speed: 150.0,
        score: 20,
        sprite: "bacteria-purple",
    },
    HazardType {
        kind: HazardKind::Virus1,
        radius: 30.0,
        speed: 250.0,
        score: 30,
        sprite: "virus-1",
    },
    HazardType {
        kind: HazardKind::Virus2,
        radius: 30.0,
        speed: 280.0,
        score: 35,
        sprite: "virus-2",
    },
];

/// Food types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickupKind {
    Fish,
    RedSnapper,
    Broccoli,
    Eggplant,
    Onion,
    Carrot,
    Apple,
    Tomato,
}

/// One pickup definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupType {
    pub kind: PickupKind,
    pub radius: f32,
    pub speed: f32,
    /// Health restored on collection
    pub heal: f32,
    pub sprite: &'static str,
}

impl CatalogEntry for PickupType {
    type Key = PickupKind;

    fn key(&self) -> PickupKind {
        self.kind
    }
    fn radius(&self) -> f32 {
        self.radius
    }
    fn speed(&self) -> f32 {
        self.speed
    }
    fn sprite(&self) -> &'static str {
        self.sprite
    }
}

const fn pickup(kind: PickupKind, heal: f32, sprite: &'static str) -> PickupType {
    PickupType {
        kind,
        radius: 25.0,
        speed: PICKUP_SPEED,
        heal,
        sprite,
    }
}

pub const PICKUP_CATALOG: [PickupType; 8] = [
    // Fish and vegetables restore a full heart
    pickup(PickupKind::Fish, 1.0, "fish-1"),
    pickup(PickupKind::RedSnapper, 1.0, "fish-red-snapper"),
    pickup(PickupKind::Broccoli, 1.0, "veg-broccoli"),
    pickup(PickupKind::Eggplant, 1.0, "veg-eggplant"),
    pickup(PickupKind::Onion, 1.0, "veg-onion"),
    pickup(PickupKind::Carrot, 1.0, "veg-carrot"),
    // Fruit restores half
    pickup(PickupKind::Apple, 0.5, "fruit-apple"),
    pickup(PickupKind::Tomato, 0.5, "fruit-tomato"),
];
