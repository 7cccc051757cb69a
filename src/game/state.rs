//! Creature definitions and the slot arena that owns live creatures
//!
//! Creatures are plain data tagged with a closed [`Kind`]; kind-specific
//! behavior lives in lookup tables (here and in `systems::movement`) rather
//! than trait objects. The [`CreaturePool`] hands out versioned
//! [`CreatureId`]s so a stale handle can never alias a newer creature.

use rand::Rng;
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::game::constants::creature;
use crate::util::vec2::Vec2;

/// Closed set of spawnable creature kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Kind {
    PlainFish,
    BigFish,
    Axolotl,
    Jellyfish,
}

impl Kind {
    pub const ALL: [Kind; 4] = [Kind::PlainFish, Kind::BigFish, Kind::Axolotl, Kind::Jellyfish];

    pub fn name(&self) -> &'static str {
        match self {
            Kind::PlainFish => "PlainFish",
            Kind::BigFish => "BigFish",
            Kind::Axolotl => "Axolotl",
            Kind::Jellyfish => "Jellyfish",
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            Kind::PlainFish => creature::PLAIN_RADIUS,
            Kind::BigFish => creature::BIG_RADIUS,
            Kind::Axolotl => creature::AXOLOTL_RADIUS,
            Kind::Jellyfish => creature::JELLYFISH_RADIUS,
        }
    }

    /// Score/power currency the creature is worth
    pub fn value(&self) -> u32 {
        match self {
            Kind::PlainFish => creature::PLAIN_VALUE,
            Kind::BigFish => creature::BIG_VALUE,
            Kind::Axolotl => creature::AXOLOTL_VALUE,
            Kind::Jellyfish => creature::JELLYFISH_VALUE,
        }
    }

    /// Heading chosen at spawn. Wanderers pick each axis from {-1, 0, 1};
    /// axolotls start rightward and jellyfish start downward.
    pub fn initial_heading<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        match self {
            Kind::PlainFish | Kind::BigFish => {
                Vec2::from_steps(rng.gen_range(-1..=1), rng.gen_range(-1..=1))
            }
            Kind::Axolotl => Vec2::RIGHT,
            Kind::Jellyfish => Vec2::DOWN,
        }
    }
}

/// A live creature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    pub kind: Kind,
    pub position: Vec2,
    /// Unit heading (or zero for an idle wanderer)
    pub heading: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub value: u32,
    /// Far corner of the movement rectangle; the near corner is the origin
    pub bounds: Vec2,
    /// Sprite faces left (rendering hint only)
    pub flipped: bool,
}

impl Creature {
    pub fn new(kind: Kind, position: Vec2, speed: f32, heading: Vec2, bounds: Vec2) -> Self {
        Self {
            kind,
            position,
            heading,
            speed,
            radius: kind.radius(),
            value: kind.value(),
            bounds,
            flipped: heading.x < 0.0,
        }
    }

    /// Circle overlap test: centers closer than the sum of radii
    pub fn overlaps(&self, position: Vec2, radius: f32) -> bool {
        let reach = self.radius + radius;
        self.position.distance_sq_to(position) < reach * reach
    }
}

new_key_type! {
    /// Stable creature handle. Goes stale once its creature is removed.
    pub struct CreatureId;
}

/// Arena of live creatures keyed by [`CreatureId`]; iterates in slot order
pub type CreaturePool = SlotMap<CreatureId, Creature>;
