/// Creature kind tables - radius, value and movement scale per kind
pub mod creature {
    /// Plain wandering fish
    pub const PLAIN_RADIUS: f32 = 30.0;
    pub const PLAIN_VALUE: u32 = 1;

    /// Big fish: larger hitbox, worth more, swims at half speed
    pub const BIG_RADIUS: f32 = 60.0;
    pub const BIG_VALUE: u32 = 5;
    pub const BIG_SPEED_SCALE: f32 = 0.5;

    /// Axolotl: horizontal swimmer, always edible outside predator mode
    pub const AXOLOTL_RADIUS: f32 = 40.0;
    pub const AXOLOTL_VALUE: u32 = 3;

    /// Jellyfish: vertical drifter, stings on contact
    pub const JELLYFISH_RADIUS: f32 = 30.0;
    pub const JELLYFISH_VALUE: u32 = 2;
}

/// Spawn constants
pub mod spawn {
    /// Inclusive speed range drawn for every spawned creature
    pub const MIN_SPEED: u32 = 1;
    pub const MAX_SPEED: u32 = 25;
    /// Creatures bounce inside (width - MARGIN, height - MARGIN)
    pub const BOUNDS_MARGIN: f32 = 20.0;
}

/// Player body and damage constants
pub mod player {
    /// Collision radius in normal form
    pub const BASE_RADIUS: f32 = 10.0;
    /// Collision radius while in predator form (matches the big fish hitbox)
    pub const PREDATOR_RADIUS: f32 = 60.0;
    /// Power at session start - enough to eat plain fish
    pub const STARTING_POWER: u32 = 1;
    /// Damage cooldown in frames (3 seconds at 60 fps)
    pub const DAMAGE_DEBOUNCE_FRAMES: i32 = 3 * 60;
}

/// Timed effect constants
pub mod boost {
    /// Default duration of a picked-up boost in seconds
    pub const DURATION: f32 = 5.0;
    /// Each speed pickup compounds current speed by this factor
    pub const SPEED_STEP: f32 = 1.1;
    /// Speed never exceeds base speed times this cap
    pub const SPEED_CAP: f32 = 1.5;
    /// Collision radius multiplier while size boost is active
    pub const SIZE_MULTIPLIER: f32 = 1.3;
}

/// Predator mode constants
pub mod predator {
    /// Duration granted on every level advance
    pub const DURATION: f32 = 10.0;
}

/// Scoring constants
pub mod scoring {
    /// Eaten-creature counter increment per meal
    pub const EAT_COUNT_STEP: u32 = 1;
    /// Power grows by one whenever score lands on a multiple of this
    pub const POWER_THRESHOLD: u32 = 25;
    pub const POWER_STEP: u32 = 1;
}

/// Power-up pickup constants
pub mod powerup {
    /// Pickup collision radius
    pub const RADIUS: f32 = 25.0;
    /// Pickups spawn at least this far inside every world edge
    pub const EDGE_INSET: f32 = 100.0;
    /// Default time a pickup stays on the field
    pub const LIFETIME: f32 = 8.0;
}

/// HUD constants
pub mod hud {
    /// How long a status message stays visible
    pub const MESSAGE_DURATION: f32 = 4.0;

    pub const SPEED_BOOST: &str = "SPEED BOOST!";
    pub const MAX_SPEED_BOOST: &str = "MAX SPEED BOOST";
    pub const SIZE_BOOST: &str = "SIZE BOOST!";
    pub const PREDATOR_MODE: &str = "PREDATOR MODE!";
}

/// Session cadence constants
pub mod session {
    /// Render/update frame rate in Hz
    pub const FRAME_RATE: u32 = 60;
    /// Interaction resolver rate in Hz (throttled below frame rate)
    pub const RESOLVER_RATE: u32 = 30;
    /// Default session lives
    pub const LIVES: u32 = 3;
    /// Default player base speed (pixels per frame)
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Highest accepted frame rate in Hz
    pub const MAX_FRAME_RATE: u32 = 1000;
}

pub mod events {
    /// Events queued before new ones are dropped
    pub const BUS_CAPACITY: usize = 1024;
}
