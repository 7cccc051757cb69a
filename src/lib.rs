//! Aquarium Simulation Library
//!
//! Deterministic, frame-stepped simulation of a small aquarium: creatures
//! with per-kind movement, levels with population quotas and score
//! thresholds, a player with timed boosts and predator mode, and a throttled
//! interaction resolver tying them together.
//!
//! Rendering, input and the real-time clock are left to the embedding
//! application. The [`game::game_loop::GameLoop`] accepts a frame delta and
//! steering input and publishes [`game::events::GameEvent`]s.

pub mod config;
pub mod game;
pub mod util;
