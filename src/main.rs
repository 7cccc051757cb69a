use anyhow::Context;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use aquarium_sim::config::SimConfig;
use aquarium_sim::game::events::GameEvent;
use aquarium_sim::game::game_loop::{GameLoop, SessionPhase};
use aquarium_sim::game::systems::interaction::{decide, Outcome};
use aquarium_sim::util::vec2::Vec2;

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Aquarium Sim v{}", env!("CARGO_PKG_VERSION"));

    let config = SimConfig::load_or_default();
    config.validate().context("invalid configuration")?;
    info!(
        "Configuration loaded: {}x{}, seed={}, {} frames at {} Hz (resolver {} Hz)",
        config.width,
        config.height,
        config.seed,
        config.frames,
        config.frame_rate,
        config.resolver_rate
    );

    let mut game = GameLoop::new(config.game_loop_config());
    let dt = config.frame_dt();

    for _ in 0..config.frames {
        let heading = autopilot(&game);
        game.steer(heading.x, heading.y);

        let phase = game.update(dt);
        for event in game.drain_events() {
            log_event(&event);
        }
        if phase == SessionPhase::GameOver {
            break;
        }
    }

    info!(
        "Simulated {} frames ({:.1}s, {} resolver passes)",
        game.frames(),
        game.elapsed(),
        game.resolver_ticks()
    );

    let snapshot = serde_json::to_string_pretty(&game.snapshot())?;
    println!("{}", snapshot);

    Ok(())
}

/// Head for the nearest creature the player can eat; fall back to the
/// active pickup, or drift when neither exists.
fn autopilot(game: &GameLoop) -> Vec2 {
    let player = game.player();
    let target = game
        .aquarium()
        .creatures()
        .filter(|(_, c)| decide(player, c.kind, c.value) == Outcome::Eat)
        .map(|(_, c)| c.position)
        .min_by(|a, b| {
            player
                .position
                .distance_sq_to(*a)
                .total_cmp(&player.position.distance_sq_to(*b))
        })
        .or_else(|| game.powerups().active().map(|p| p.position));

    match target {
        Some(position) => position - player.position,
        None => Vec2::ZERO,
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::LevelAdvanced { level, counter } => {
            info!("Level advanced to {} (pass counter {})", level, counter)
        }
        GameEvent::PlayerDamaged { by, lives } => {
            info!("Hit by {}, {} lives left", by.name(), lives)
        }
        GameEvent::PowerGained { power } => info!("Power is now {}", power),
        GameEvent::GameOver { score, level } => {
            info!("Game over on level {} with score {}", level, score)
        }
        other => debug!("{:?}", other),
    }
}
