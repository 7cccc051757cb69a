use std::str::FromStr;

use thiserror::Error;

use crate::game::constants::{powerup, session, spawn};
use crate::game::game_loop::GameLoopConfig;

/// Rejected configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("world {width}x{height} is smaller than the minimum {min}x{min}")]
    WorldTooSmall { width: u32, height: u32, min: u32 },
    #[error("{0} must be at least 1")]
    ZeroRate(&'static str),
    #[error("frame_rate {rate} exceeds the maximum {max}")]
    FrameRateTooHigh { rate: u32, max: u32 },
    #[error("resolver_rate ({resolver}) cannot exceed frame_rate ({frame})")]
    ResolverFasterThanFrames { resolver: u32, frame: u32 },
    #[error("player_lives must be at least 1")]
    NoLives,
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} cannot be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
}

/// Simulation configuration
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// World width in pixels
    pub width: u32,
    /// World height in pixels
    pub height: u32,
    /// Seed for creature and pickup placement
    pub seed: u64,
    /// Frames per simulated second
    pub frame_rate: u32,
    /// Interaction resolver passes per second
    pub resolver_rate: u32,
    /// Frames the headless runner simulates
    pub frames: u64,
    pub player_lives: u32,
    /// Player base speed in pixels per frame
    pub player_speed: f32,
    /// Seconds a pickup stays on the field
    pub powerup_lifetime: f32,
    /// Seconds between a pickup leaving and the next one appearing
    pub powerup_respawn_delay: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            seed: 0x5eed,
            frame_rate: session::FRAME_RATE,
            resolver_rate: session::RESOLVER_RATE,
            frames: 60 * 60,
            player_lives: session::LIVES,
            player_speed: session::PLAYER_SPEED,
            powerup_lifetime: powerup::LIFETIME,
            powerup_respawn_delay: 0.0,
        }
    }
}

/// Read and parse an environment variable, warning and keeping the default
/// on bad input
fn env_override<T: FromStr>(name: &str, accept: impl Fn(&T) -> bool, target: &mut T) {
    let Ok(raw) = std::env::var(name) else {
        return;
    };
    match raw.parse::<T>() {
        Ok(parsed) if accept(&parsed) => *target = parsed,
        Ok(_) => tracing::warn!("{} '{}' out of range, using default", name, raw),
        Err(_) => tracing::warn!("Invalid {} '{}', using default", name, raw),
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl SimConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        let mut config = Self::default();

        env_override("AQUARIUM_WIDTH", |w: &u32| *w > 0, &mut config.width);
        env_override("AQUARIUM_HEIGHT", |h: &u32| *h > 0, &mut config.height);
        env_override("AQUARIUM_SEED", |_: &u64| true, &mut config.seed);
        env_override(
            "AQUARIUM_FRAME_RATE",
            |r: &u32| (1..=session::MAX_FRAME_RATE).contains(r),
            &mut config.frame_rate,
        );
        env_override("AQUARIUM_RESOLVER_RATE", |r: &u32| *r > 0, &mut config.resolver_rate);
        env_override("AQUARIUM_FRAMES", |_: &u64| true, &mut config.frames);
        env_override("AQUARIUM_PLAYER_LIVES", |l: &u32| *l > 0, &mut config.player_lives);
        env_override(
            "AQUARIUM_PLAYER_SPEED",
            |s: &f32| positive(*s),
            &mut config.player_speed,
        );
        env_override(
            "AQUARIUM_POWERUP_LIFETIME",
            |s: &f32| positive(*s),
            &mut config.powerup_lifetime,
        );
        env_override(
            "AQUARIUM_POWERUP_RESPAWN_DELAY",
            |s: &f32| s.is_finite() && *s >= 0.0,
            &mut config.powerup_respawn_delay,
        );

        config
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min = (spawn::BOUNDS_MARGIN + 2.0 * powerup::EDGE_INSET) as u32;
        if self.width < min || self.height < min {
            return Err(ConfigError::WorldTooSmall {
                width: self.width,
                height: self.height,
                min,
            });
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::ZeroRate("frame_rate"));
        }
        if self.frame_rate > session::MAX_FRAME_RATE {
            return Err(ConfigError::FrameRateTooHigh {
                rate: self.frame_rate,
                max: session::MAX_FRAME_RATE,
            });
        }
        if self.resolver_rate == 0 {
            return Err(ConfigError::ZeroRate("resolver_rate"));
        }
        if self.resolver_rate > self.frame_rate {
            return Err(ConfigError::ResolverFasterThanFrames {
                resolver: self.resolver_rate,
                frame: self.frame_rate,
            });
        }
        if self.player_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if !positive(self.player_speed) {
            return Err(ConfigError::NotPositive {
                name: "player_speed",
                value: self.player_speed,
            });
        }
        if !positive(self.powerup_lifetime) {
            return Err(ConfigError::NotPositive {
                name: "powerup_lifetime",
                value: self.powerup_lifetime,
            });
        }
        if self.powerup_respawn_delay < 0.0 {
            return Err(ConfigError::Negative {
                name: "powerup_respawn_delay",
                value: self.powerup_respawn_delay,
            });
        }
        Ok(())
    }

    /// Seconds per frame
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }

    /// Three seconds of damage immunity, counted in frames
    fn debounce_frames(&self) -> i32 {
        self.frame_rate
            .checked_mul(3)
            .and_then(|frames| i32::try_from(frames).ok())
            .unwrap_or(i32::MAX)
    }

    pub fn game_loop_config(&self) -> GameLoopConfig {
        GameLoopConfig {
            width: self.width,
            height: self.height,
            seed: self.seed,
            resolver_rate: self.resolver_rate,
            player_lives: self.player_lives,
            player_speed: self.player_speed,
            damage_debounce: self.debounce_frames(),
            powerup_lifetime: self.powerup_lifetime,
            powerup_respawn_delay: self.powerup_respawn_delay,
            ..GameLoopConfig::default()
        }
    }
}
