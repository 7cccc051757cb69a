//! Creature movement rules
//!
//! Each kind maps to a [`MovementRule`]. A rule integrates position along the
//! heading and then bounces only on the axes it declares, so fixed-axis
//! swimmers never have their locked axis perturbed.

use crate::game::constants::creature::BIG_SPEED_SCALE;
use crate::game::state::{Creature, CreaturePool, Kind};

/// How a kind moves each world tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementRule {
    /// Free 2D wandering at `speed * speed_scale`, bouncing on both axes
    Wander { speed_scale: f32 },
    /// Left/right only, bouncing at the width edges
    Horizontal,
    /// Up/down only, bouncing at the height edges
    Vertical,
}

impl MovementRule {
    pub fn for_kind(kind: Kind) -> Self {
        match kind {
            Kind::PlainFish => MovementRule::Wander { speed_scale: 1.0 },
            Kind::BigFish => MovementRule::Wander {
                speed_scale: BIG_SPEED_SCALE,
            },
            Kind::Axolotl => MovementRule::Horizontal,
            Kind::Jellyfish => MovementRule::Vertical,
        }
    }
}

/// Move a single creature by its kind's rule
pub fn step(creature: &mut Creature) {
    match MovementRule::for_kind(creature.kind) {
        MovementRule::Wander { speed_scale } => {
            let velocity = creature.heading * (creature.speed * speed_scale);
            creature.position += velocity;
            bounce_x(creature);
            bounce_y(creature);
            creature.flipped = creature.heading.x < 0.0;
        }
        MovementRule::Horizontal => {
            creature.position.x += creature.heading.x * creature.speed;
            if bounce_x(creature) {
                creature.flipped = creature.heading.x < 0.0;
            }
        }
        MovementRule::Vertical => {
            creature.position.y += creature.heading.y * creature.speed;
            bounce_y(creature);
        }
    }
}

/// Move every live creature
pub fn update(pool: &mut CreaturePool) {
    for creature in pool.values_mut() {
        step(creature);
    }
}

/// Reflect the horizontal heading and clamp when past an x edge.
/// Returns true if a bounce happened.
fn bounce_x(creature: &mut Creature) -> bool {
    let max = creature.bounds.x.max(0.0);
    if creature.position.x < 0.0 {
        creature.position.x = 0.0;
        creature.heading.x = creature.heading.x.abs();
        true
    } else if creature.position.x > max {
        creature.position.x = max;
        creature.heading.x = -creature.heading.x.abs();
        true
    } else {
        false
    }
}

fn bounce_y(creature: &mut Creature) -> bool {
    let max = creature.bounds.y.max(0.0);
    if creature.position.y < 0.0 {
        creature.position.y = 0.0;
        creature.heading.y = creature.heading.y.abs();
        true
    } else if creature.position.y > max {
        creature.position.y = max;
        creature.heading.y = -creature.heading.y.abs();
        true
    } else {
        false
    }
}
