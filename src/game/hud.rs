//! HUD model: transient status message plus a serializable snapshot of the
//! numbers the presentation layer draws.

use serde::Serialize;

use crate::game::constants::hud;
use crate::game::player::{BoostKind, BoostStart, Player};

/// Status message with a display timer
#[derive(Debug, Clone)]
pub struct Hud {
    message: Option<&'static str>,
    remaining: f32,
    duration: f32,
}

impl Hud {
    pub fn new() -> Self {
        Self::with_duration(hud::MESSAGE_DURATION)
    }

    pub fn with_duration(duration: f32) -> Self {
        Self {
            message: None,
            remaining: 0.0,
            duration,
        }
    }

    /// Show `message`, replacing whatever is on screen
    pub fn show(&mut self, message: &'static str) {
        self.message = Some(message);
        self.remaining = self.duration;
    }

    pub fn show_boost(&mut self, start: BoostStart) {
        let message = match (start.kind, start.capped) {
            (BoostKind::Speed, true) => hud::MAX_SPEED_BOOST,
            (BoostKind::Speed, false) => hud::SPEED_BOOST,
            (BoostKind::Size, _) => hud::SIZE_BOOST,
        };
        self.show(message);
    }

    pub fn update(&mut self, dt: f32) {
        if self.message.is_none() {
            return;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.message = None;
            self.remaining = 0.0;
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        self.message
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the HUD renders for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub score: u32,
    pub eaten: u32,
    pub power: u32,
    pub lives: u32,
    pub level: usize,
    pub predator: bool,
    pub message: Option<String>,
    pub message_remaining: f32,
    pub game_over: bool,
}

impl HudSnapshot {
    pub fn capture(player: &Player, level: usize, display: &Hud, game_over: bool) -> Self {
        Self {
            score: player.score(),
            eaten: player.eaten(),
            power: player.power(),
            lives: player.lives(),
            level,
            predator: player.is_predator(),
            message: display.message().map(str::to_string),
            message_remaining: display.remaining(),
            game_over,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::vec2::Vec2;

    #[test]
    fn test_message_expires() {
        let mut display = Hud::with_duration(1.0);
        display.show(hud::PREDATOR_MODE);
        display.update(0.5);
        assert_eq!(display.message(), Some("PREDATOR MODE!"));
        display.update(0.6);
        assert_eq!(display.message(), None);
        assert_eq!(display.remaining(), 0.0);
    }

    #[test]
    fn test_new_message_resets_timer() {
        let mut display = Hud::with_duration(1.0);
        display.show(hud::SIZE_BOOST);
        display.update(0.9);
        display.show(hud::SPEED_BOOST);
        display.update(0.5);
        assert_eq!(display.message(), Some("SPEED BOOST!"));
    }

    #[test]
    fn test_boost_messages() {
        let mut display = Hud::new();
        display.show_boost(BoostStart { kind: BoostKind::Speed, capped: true });
        assert_eq!(display.message(), Some("MAX SPEED BOOST"));
        display.show_boost(BoostStart { kind: BoostKind::Size, capped: false });
        assert_eq!(display.message(), Some("SIZE BOOST!"));
    }

    #[test]
    fn test_snapshot_serializes() {
        let player = Player::new(Vec2::ZERO, 5.0, 3, Vec2::new(100.0, 100.0));
        let mut display = Hud::new();
        display.show(hud::SPEED_BOOST);
        let snapshot = HudSnapshot::capture(&player, 2, &display, false);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["lives"], 3);
        assert_eq!(json["level"], 2);
        assert_eq!(json["message"], "SPEED BOOST!");
    }
}
