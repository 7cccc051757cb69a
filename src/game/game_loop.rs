//! Session driver
//!
//! Owns the world, the player, the pickup field and the event bus. Every
//! frame updates player effects and the HUD, offers a power-up spawn, and
//! runs the interaction resolver whenever the fixed-rate gate opens.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::game::aquarium::Aquarium;
use crate::game::constants::{boost, hud, player, powerup, predator, session};
use crate::game::events::{EventBus, GameEvent};
use crate::game::hud::{Hud, HudSnapshot};
use crate::game::level::{default_levels, Level};
use crate::game::player::{BoostKind, EffectExpiry, Player};
use crate::game::systems::interaction::{Resolution, Resolver};
use crate::game::systems::powerup::PowerUpField;
use crate::util::vec2::Vec2;

/// Monotonic simulation clock
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    elapsed: f32,
    frames: u64,
}

impl FrameClock {
    /// Advance by `dt` seconds. Negative deltas are ignored.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt.max(0.0);
        self.frames += 1;
        self.elapsed
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Fixed-rate gate for work that runs slower than the frame rate.
/// Opens at most once per call; leftover time never queues a burst.
#[derive(Debug, Clone, Copy)]
pub struct TickGate {
    interval: f32,
    accumulator: f32,
}

impl TickGate {
    const EPSILON: f32 = 1e-5;

    pub fn new(rate_hz: u32) -> Self {
        Self {
            interval: 1.0 / rate_hz.max(1) as f32,
            accumulator: 0.0,
        }
    }

    pub fn ready(&mut self, dt: f32) -> bool {
        self.accumulator += dt.max(0.0);
        if self.accumulator + Self::EPSILON < self.interval {
            return false;
        }
        self.accumulator -= self.interval;
        if self.accumulator >= self.interval {
            self.accumulator = 0.0;
        }
        true
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Playing,
    GameOver,
}

/// Session tunables
#[derive(Debug, Clone)]
pub struct GameLoopConfig {
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    pub resolver_rate: u32,
    pub player_lives: u32,
    pub player_speed: f32,
    pub damage_debounce: i32,
    pub boost_duration: f32,
    pub predator_duration: f32,
    pub powerup_lifetime: f32,
    pub powerup_respawn_delay: f32,
}

impl Default for GameLoopConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            seed: 0x5eed,
            resolver_rate: session::RESOLVER_RATE,
            player_lives: session::LIVES,
            player_speed: session::PLAYER_SPEED,
            damage_debounce: player::DAMAGE_DEBOUNCE_FRAMES,
            boost_duration: boost::DURATION,
            predator_duration: predator::DURATION,
            powerup_lifetime: powerup::LIFETIME,
            powerup_respawn_delay: 0.0,
        }
    }
}

pub struct GameLoop {
    aquarium: Aquarium,
    player: Player,
    powerups: PowerUpField,
    /// Separate stream so pickups do not perturb creature spawns
    powerup_rng: StdRng,
    resolver: Resolver,
    hud: Hud,
    events: EventBus,
    clock: FrameClock,
    gate: TickGate,
    phase: SessionPhase,
    resolver_ticks: u64,
}

impl GameLoop {
    pub fn new(config: GameLoopConfig) -> Self {
        Self::with_levels(config, default_levels())
    }

    pub fn with_levels(config: GameLoopConfig, levels: Vec<Level>) -> Self {
        let aquarium = Aquarium::new(config.width, config.height, config.seed).with_levels(levels);
        let center = Vec2::new(config.width as f32 * 0.5, config.height as f32 * 0.5);
        let player = Player::new(
            center,
            config.player_speed,
            config.player_lives,
            aquarium.movement_bounds(),
        );

        Self {
            aquarium,
            player,
            powerups: PowerUpField::new(config.powerup_lifetime, config.powerup_respawn_delay),
            powerup_rng: StdRng::seed_from_u64(config.seed.wrapping_add(1)),
            resolver: Resolver {
                damage_debounce: config.damage_debounce,
                boost_duration: config.boost_duration,
                predator_duration: config.predator_duration,
            },
            hud: Hud::new(),
            events: EventBus::new(),
            clock: FrameClock::default(),
            gate: TickGate::new(config.resolver_rate),
            phase: SessionPhase::Playing,
            resolver_ticks: 0,
        }
    }

    /// Steering input for the next frame
    pub fn steer(&mut self, dx: f32, dy: f32) {
        self.player.set_direction(dx, dy);
    }

    /// Run one frame of `dt` seconds. No-op once the game is over.
    pub fn update(&mut self, dt: f32) -> SessionPhase {
        if self.phase == SessionPhase::GameOver {
            return self.phase;
        }

        let elapsed = self.clock.advance(dt);

        // Effects expire before this frame's collisions are resolved
        for expiry in self.player.update(dt, elapsed) {
            let event = match expiry {
                EffectExpiry::Speed => GameEvent::BoostExpired {
                    kind: BoostKind::Speed,
                },
                EffectExpiry::Size => GameEvent::BoostExpired {
                    kind: BoostKind::Size,
                },
                EffectExpiry::Predator => GameEvent::PredatorExpired,
            };
            self.events.emit(event);
        }
        self.hud.update(dt);

        let width = self.aquarium.width() as f32;
        let height = self.aquarium.height() as f32;
        if let Some(spawned) =
            self.powerups
                .spawn_if_due(&mut self.powerup_rng, width, height, elapsed)
        {
            self.events.emit(GameEvent::PowerUpSpawned {
                kind: spawned.kind,
                position: spawned.position,
            });
        }

        if self.gate.ready(dt) {
            let resolution = self.resolver.resolve(
                &mut self.aquarium,
                &mut self.player,
                &mut self.powerups,
                &self.events,
                elapsed,
            );
            self.resolver_ticks += 1;
            self.apply(&resolution);
        }

        self.phase
    }

    fn apply(&mut self, resolution: &Resolution) {
        if let Some(start) = resolution.boost {
            self.hud.show_boost(start);
        }
        if resolution.predator_started {
            self.hud.show(hud::PREDATOR_MODE);
        }
        if resolution.game_over {
            self.phase = SessionPhase::GameOver;
            info!(
                frames = self.clock.frames(),
                score = self.player.score(),
                "session over"
            );
        } else if let Some(report) = &resolution.tick {
            if let Some(level) = report.advanced_to {
                debug!(active = level, "level transition applied");
            }
        }
    }

    pub fn drain_events(&self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn snapshot(&self) -> HudSnapshot {
        HudSnapshot::capture(
            &self.player,
            self.aquarium.current_level(),
            &self.hud,
            self.phase == SessionPhase::GameOver,
        )
    }

    pub fn aquarium(&self) -> &Aquarium {
        &self.aquarium
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn powerups(&self) -> &PowerUpField {
        &self.powerups
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    pub fn resolver_ticks(&self) -> u64 {
        self.resolver_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::{Creature, Kind};

    const DT: f32 = 1.0 / 60.0;
    /// Corner spot no power-up can reach
    const CORNER: Vec2 = Vec2 { x: 30.0, y: 30.0 };

    fn create_loop() -> GameLoop {
        GameLoop::new(GameLoopConfig::default())
    }

    /// Empty world with the player parked in the corner
    fn create_empty_loop() -> GameLoop {
        let mut game = GameLoop::with_levels(GameLoopConfig::default(), vec![]);
        game.player.position = CORNER;
        game
    }

    fn place(game: &mut GameLoop, kind: Kind, position: Vec2) {
        let creature = Creature::new(kind, position, 0.0, Vec2::ZERO, Vec2::ZERO);
        game.aquarium.add_creature(creature);
    }

    fn event_index(events: &[GameEvent], wanted: &GameEvent) -> Option<usize> {
        events.iter().position(|e| e == wanted)
    }

    #[test]
    fn test_tick_gate_halves_frame_rate() {
        let mut gate = TickGate::new(30);
        let fired = (0..60).filter(|_| gate.ready(DT)).count();
        assert_eq!(fired, 30);
    }

    #[test]
    fn test_tick_gate_does_not_burst() {
        let mut gate = TickGate::new(30);
        assert!(gate.ready(1.0));
        assert!(!gate.ready(0.0));
    }

    #[test]
    fn test_frame_clock_monotonic() {
        let mut clock = FrameClock::default();
        clock.advance(0.5);
        clock.advance(-1.0);
        assert_eq!(clock.elapsed(), 0.5);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn test_first_resolver_tick_populates_world() {
        let mut game = create_loop();
        game.update(DT);
        assert_eq!(game.aquarium().creature_count(), 0);
        game.update(DT);
        assert_eq!(game.resolver_ticks(), 1);
        assert_eq!(game.aquarium().creature_count(), 10);
    }

    #[test]
    fn test_powerup_spawns_on_first_frame() {
        let mut game = create_loop();
        game.update(DT);
        assert!(game.powerups().active().is_some());
        assert!(game
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::PowerUpSpawned { .. })));
    }

    #[test]
    fn test_game_over_latches() {
        let config = GameLoopConfig {
            player_lives: 1,
            ..GameLoopConfig::default()
        };
        let levels = vec![Level::new(0, 1000).with_population(Kind::Jellyfish, 60)];
        let mut game = GameLoop::with_levels(config, levels);

        let mut phase = SessionPhase::Playing;
        for _ in 0..20_000 {
            // Sweep the tank so a jellyfish is eventually touched
            let t = game.elapsed();
            game.steer(t.sin(), t.cos());
            phase = game.update(DT);
            if phase == SessionPhase::GameOver {
                break;
            }
        }
        assert_eq!(phase, SessionPhase::GameOver);
        assert!(game.snapshot().game_over);

        let frames = game.frames();
        game.update(DT);
        assert_eq!(game.frames(), frames);
    }

    #[test]
    fn test_snapshot_reports_session() {
        let mut game = create_loop();
        for _ in 0..4 {
            game.update(DT);
        }
        let snapshot = game.snapshot();
        assert_eq!(snapshot.lives, 3);
        assert_eq!(snapshot.power, 1);
        assert_eq!(snapshot.level, 0);
        assert!(!snapshot.game_over);
    }

    #[test]
    fn test_level_transition_applied_by_loop() {
        let levels = vec![Level::new(0, 0), Level::new(1, 100)];
        let mut game = GameLoop::with_levels(GameLoopConfig::default(), levels);
        game.update(DT);
        assert_eq!(game.update(DT), SessionPhase::Playing);

        assert_eq!(game.aquarium().current_level(), 1);
        assert!(game.player().is_predator());
        assert_eq!(game.hud().message(), Some(hud::PREDATOR_MODE));
        assert_eq!(game.snapshot().level, 1);
    }

    #[test]
    fn test_predator_expiry_lands_before_collision() {
        let mut game = create_empty_loop();
        // Ends on frame 2, the same frame the resolver gate first opens
        game.player.activate_predator(0.025, 0.0, Kind::BigFish);
        place(&mut game, Kind::Axolotl, CORNER);

        game.update(DT);
        assert!(game.player().is_predator());
        assert_eq!(game.resolver_ticks(), 0);

        game.update(DT);
        assert_eq!(game.resolver_ticks(), 1);
        assert!(!game.player().is_predator());
        assert_eq!(game.player().score(), 3);
        assert_eq!(game.aquarium().creature_count(), 0);

        let events = game.drain_events();
        let expired = event_index(&events, &GameEvent::PredatorExpired);
        let eaten = event_index(
            &events,
            &GameEvent::CreatureEaten {
                kind: Kind::Axolotl,
                value: 3,
                score: 3,
            },
        );
        assert!(expired.is_some() && eaten.is_some());
        assert!(expired < eaten);
        assert!(!events.contains(&GameEvent::CreatureSpared {
            kind: Kind::Axolotl
        }));
    }

    #[test]
    fn test_size_expiry_shrinks_before_collision() {
        // 41.5 apart: inside reach at the boosted radius 13, outside at 10
        let fish_at = Vec2::new(CORNER.x + 41.5, CORNER.y);

        let mut game = create_empty_loop();
        game.player.start_boost(0.025, BoostKind::Size);
        place(&mut game, Kind::PlainFish, fish_at);

        game.update(DT);
        assert!((game.player().radius() - 13.0).abs() < 1e-4);
        game.update(DT);

        assert_eq!(game.resolver_ticks(), 1);
        assert_eq!(game.player().radius(), 10.0);
        assert_eq!(game.player().score(), 0);
        assert_eq!(game.aquarium().creature_count(), 1);
        assert!(game.drain_events().contains(&GameEvent::BoostExpired {
            kind: BoostKind::Size
        }));

        // Same layout with the boost still running: the fish is reached
        let mut game = create_empty_loop();
        game.player.start_boost(10.0, BoostKind::Size);
        place(&mut game, Kind::PlainFish, fish_at);
        game.update(DT);
        game.update(DT);
        assert_eq!(game.player().score(), 1);
        assert_eq!(game.aquarium().creature_count(), 0);
    }

    #[test]
    fn test_same_seed_same_session() {
        let mut a = create_loop();
        let mut b = create_loop();
        for frame in 0..600 {
            let angle = frame as f32 * 0.01;
            a.steer(angle.cos(), angle.sin());
            b.steer(angle.cos(), angle.sin());
            a.update(DT);
            b.update(DT);
        }
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.drain_events(), b.drain_events());
    }
}
