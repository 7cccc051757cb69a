//! Player state machine
//!
//! Tracks lives, score and power plus three independent timed-effect tracks:
//! speed boost, size boost and predator mode. Size and predator compose
//! multiplicatively on the collision radius; speed only touches speed.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::info;

use crate::game::constants::{boost, player};
use crate::game::state::Kind;
use crate::util::vec2::Vec2;

/// Pickup-driven boost tracks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BoostKind {
    Speed,
    Size,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum SpeedBoost {
    Inactive,
    /// `multiplier` is current speed over base speed
    Active { remaining: f32, multiplier: f32 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum SizeBoost {
    Inactive,
    Active { remaining: f32 },
}

/// Predator mode ends by absolute clock, not by accumulated frame time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum PredatorMode {
    Inactive,
    Active { remaining: f32, ends_at: f32 },
}

/// Visual reference handed to the renderer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Appearance {
    Normal,
    /// Borrowed creature look while in predator mode
    Creature(Kind),
}

/// An effect track that ran out during `update`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectExpiry {
    Speed,
    Size,
    Predator,
}

pub type Expirations = SmallVec<[EffectExpiry; 3]>;

/// Result of starting a boost
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostStart {
    pub kind: BoostKind,
    /// Speed boost hit the cap
    pub capped: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    heading: Vec2,
    speed: f32,
    base_speed: f32,
    radius: f32,
    base_radius: f32,
    /// Far corner of the movement rectangle
    bounds: Vec2,

    lives: u32,
    score: u32,
    eaten: u32,
    power: u32,
    damage_debounce: i32,

    speed_boost: SpeedBoost,
    size_boost: SizeBoost,
    size_multiplier: f32,
    predator: PredatorMode,
    appearance: Appearance,
}

impl Player {
    pub fn new(position: Vec2, base_speed: f32, lives: u32, bounds: Vec2) -> Self {
        Self {
            position,
            heading: Vec2::ZERO,
            speed: base_speed,
            base_speed,
            radius: player::BASE_RADIUS,
            base_radius: player::BASE_RADIUS,
            bounds,
            lives,
            score: 0,
            eaten: 0,
            power: player::STARTING_POWER,
            damage_debounce: 0,
            speed_boost: SpeedBoost::Inactive,
            size_boost: SizeBoost::Inactive,
            size_multiplier: 1.0,
            predator: PredatorMode::Inactive,
            appearance: Appearance::Normal,
        }
    }

    /// Steering input; normalized so diagonals are not faster
    pub fn set_direction(&mut self, dx: f32, dy: f32) {
        self.heading = Vec2::new(dx, dy).normalize();
    }

    /// Per-frame update: debounce, effect timers, then movement.
    /// Returns the tracks that expired this frame.
    pub fn update(&mut self, dt: f32, elapsed: f32) -> Expirations {
        if self.damage_debounce > 0 {
            self.damage_debounce -= 1;
        }

        let mut expired = Expirations::new();
        self.update_boosts(dt, &mut expired);
        self.update_predator(dt, elapsed, &mut expired);

        self.position += self.heading * self.speed;
        self.position = self.position.clamp_to(self.bounds);
        expired
    }

    fn update_boosts(&mut self, dt: f32, expired: &mut Expirations) {
        if let SpeedBoost::Active { remaining, multiplier } = self.speed_boost {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                self.speed_boost = SpeedBoost::Inactive;
                self.speed = self.base_speed;
                info!(speed = self.base_speed, "speed boost expired");
                expired.push(EffectExpiry::Speed);
            } else {
                self.speed_boost = SpeedBoost::Active { remaining, multiplier };
            }
        }

        if let SizeBoost::Active { remaining } = self.size_boost {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                self.size_boost = SizeBoost::Inactive;
                self.size_multiplier = 1.0;
                self.refresh_radius();
                info!("size boost expired");
                expired.push(EffectExpiry::Size);
            } else {
                self.size_boost = SizeBoost::Active { remaining };
            }
        }
    }

    fn update_predator(&mut self, dt: f32, elapsed: f32, expired: &mut Expirations) {
        let PredatorMode::Active { remaining, ends_at } = self.predator else {
            return;
        };
        if elapsed >= ends_at {
            info!("predator mode expired");
            self.deactivate_predator();
            expired.push(EffectExpiry::Predator);
        } else {
            self.predator = PredatorMode::Active {
                remaining: (remaining - dt).max(0.0),
                ends_at,
            };
        }
    }

    /// Start or refresh a boost. A repeat trigger on the same track replaces
    /// its timer; speed compounds toward the cap instead of resetting.
    pub fn start_boost(&mut self, duration: f32, kind: BoostKind) -> BoostStart {
        match kind {
            BoostKind::Speed => {
                let cap = self.base_speed * boost::SPEED_CAP;
                self.speed = (self.speed * boost::SPEED_STEP).min(cap);
                let multiplier = if self.base_speed > 0.0 {
                    self.speed / self.base_speed
                } else {
                    1.0
                };
                self.speed_boost = SpeedBoost::Active {
                    remaining: duration,
                    multiplier,
                };
                let capped = self.speed >= cap;
                if capped {
                    info!("max speed boost");
                } else {
                    info!(speed = self.speed, "speed boost active");
                }
                BoostStart { kind, capped }
            }
            BoostKind::Size => {
                self.size_multiplier = boost::SIZE_MULTIPLIER;
                self.size_boost = SizeBoost::Active { remaining: duration };
                self.refresh_radius();
                info!(radius = self.radius, "size boost active");
                BoostStart { kind, capped: false }
            }
        }
    }

    pub fn activate_predator(&mut self, duration: f32, elapsed: f32, form: Kind) {
        self.predator = PredatorMode::Active {
            remaining: duration,
            ends_at: elapsed + duration,
        };
        self.appearance = Appearance::Creature(form);
        self.refresh_radius();
        info!(seconds = duration, "predator mode activated");
    }

    pub fn deactivate_predator(&mut self) {
        self.predator = PredatorMode::Inactive;
        self.appearance = Appearance::Normal;
        self.refresh_radius();
    }

    fn refresh_radius(&mut self) {
        let body = if self.is_predator() {
            player::PREDATOR_RADIUS
        } else {
            self.base_radius
        };
        self.radius = body * self.size_multiplier;
    }

    /// Take a hit. Outside the cooldown window this costs one life (floored
    /// at zero) and restarts the window at `debounce` frames.
    /// Returns true if the hit registered.
    pub fn lose_life(&mut self, debounce: i32) -> bool {
        if self.damage_debounce > 0 {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.damage_debounce = debounce;
        info!(lives = self.lives, "player lost a life");
        true
    }

    /// Credit a meal: `count` to the eaten counter and `value` to score
    pub fn add_to_score(&mut self, count: u32, value: u32) {
        self.eaten = self.eaten.saturating_add(count);
        self.score = self.score.saturating_add(value);
    }

    pub fn increase_power(&mut self, amount: u32) {
        self.power = self.power.saturating_add(amount);
    }

    pub fn is_predator(&self) -> bool {
        matches!(self.predator, PredatorMode::Active { .. })
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn eaten(&self) -> u32 {
        self.eaten
    }

    pub fn power(&self) -> u32 {
        self.power
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn base_radius(&self) -> f32 {
        self.base_radius
    }

    pub fn size_multiplier(&self) -> f32 {
        self.size_multiplier
    }

    pub fn heading(&self) -> Vec2 {
        self.heading
    }

    pub fn damage_debounce(&self) -> i32 {
        self.damage_debounce
    }

    pub fn speed_boost(&self) -> SpeedBoost {
        self.speed_boost
    }

    pub fn size_boost(&self) -> SizeBoost {
        self.size_boost
    }

    pub fn predator(&self) -> PredatorMode {
        self.predator
    }

    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    /// Sprite faces left (rendering hint)
    pub fn flipped(&self) -> bool {
        self.heading.x < 0.0
    }
}
