//! Power-up pickups
//!
//! At most one pickup is on the field at a time. A new one appears once the
//! field is empty and the respawn delay has passed; it vanishes on contact
//! or when its absolute expiry time is reached.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::constants::powerup;
use crate::game::player::BoostKind;
use crate::util::vec2::Vec2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PowerUp {
    pub kind: BoostKind,
    pub position: Vec2,
    pub radius: f32,
    /// Absolute clock time at which the pickup disappears
    pub expires_at: f32,
}

impl PowerUp {
    pub fn new(kind: BoostKind, position: Vec2, expires_at: f32) -> Self {
        Self {
            kind,
            position,
            radius: powerup::RADIUS,
            expires_at,
        }
    }

    pub fn overlaps(&self, position: Vec2, radius: f32) -> bool {
        let reach = self.radius + radius;
        self.position.distance_sq_to(position) < reach * reach
    }
}

/// Result of checking the active pickup against the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickupCheck {
    Nothing,
    Collected(BoostKind),
    Expired(BoostKind),
}

/// The single pickup slot and its spawn cadence
#[derive(Debug, Clone)]
pub struct PowerUpField {
    active: Option<PowerUp>,
    lifetime: f32,
    respawn_delay: f32,
    next_spawn_at: f32,
}

impl PowerUpField {
    pub fn new(lifetime: f32, respawn_delay: f32) -> Self {
        Self {
            active: None,
            lifetime,
            respawn_delay,
            next_spawn_at: 0.0,
        }
    }

    /// Spawn a pickup if the slot is empty and the delay has elapsed.
    /// Placement stays `EDGE_INSET` away from every world edge.
    pub fn spawn_if_due<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        width: f32,
        height: f32,
        elapsed: f32,
    ) -> Option<PowerUp> {
        if self.active.is_some() || elapsed < self.next_spawn_at {
            return None;
        }

        let kind = if rng.gen_bool(0.5) {
            BoostKind::Speed
        } else {
            BoostKind::Size
        };
        let position = Vec2::new(
            inset_coordinate(rng, width),
            inset_coordinate(rng, height),
        );
        let spawned = PowerUp::new(kind, position, elapsed + self.lifetime);
        debug!(?kind, x = position.x, y = position.y, "power-up spawned");
        self.active = Some(spawned);
        Some(spawned)
    }

    /// Collect on overlap, otherwise expire once the clock passes the
    /// pickup's deadline. Either way the slot empties.
    pub fn check(&mut self, position: Vec2, radius: f32, elapsed: f32) -> PickupCheck {
        let Some(active) = self.active else {
            return PickupCheck::Nothing;
        };

        let result = if active.overlaps(position, radius) {
            PickupCheck::Collected(active.kind)
        } else if elapsed >= active.expires_at {
            PickupCheck::Expired(active.kind)
        } else {
            return PickupCheck::Nothing;
        };

        self.active = None;
        self.next_spawn_at = elapsed + self.respawn_delay;
        result
    }

    /// Place a specific pickup, replacing any active one
    pub fn place(&mut self, powerup: PowerUp) {
        self.active = Some(powerup);
    }

    pub fn active(&self) -> Option<&PowerUp> {
        self.active.as_ref()
    }
}

fn inset_coordinate<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> f32 {
    let low = powerup::EDGE_INSET;
    let high = extent - powerup::EDGE_INSET;
    if high > low {
        rng.gen_range(low..high)
    } else {
        extent * 0.5
    }
}
