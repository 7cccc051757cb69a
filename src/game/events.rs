//! Simulation events
//!
//! The loop and the interaction resolver push [`GameEvent`]s onto a
//! bounded channel. Presentation code (HUD, logging, audio) subscribes
//! instead of reaching into simulation state. Once the queue is full new
//! events are dropped until a consumer drains it.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::trace;

use crate::game::constants::events as event_consts;
use crate::game::player::BoostKind;
use crate::game::state::Kind;
use crate::util::vec2::Vec2;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    CreaturesSpawned { count: usize },
    CreatureEaten { kind: Kind, value: u32, score: u32 },
    PlayerDamaged { by: Kind, lives: u32 },
    /// Axolotl touched while in predator mode
    CreatureSpared { kind: Kind },
    PowerGained { power: u32 },
    PowerUpSpawned { kind: BoostKind, position: Vec2 },
    PowerUpCollected { kind: BoostKind },
    PowerUpExpired { kind: BoostKind },
    BoostStarted { kind: BoostKind, capped: bool },
    BoostExpired { kind: BoostKind },
    PredatorStarted { form: Kind, duration: f32 },
    PredatorExpired,
    LevelAdvanced { level: usize, counter: usize },
    GameOver { score: u32, level: usize },
}

/// Multi-consumer event channel
///
/// Every receiver handle drains the same queue, so each event is delivered
/// to exactly one consumer.
pub struct EventBus {
    sender: Sender<GameEvent>,
    receiver: Receiver<GameEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(event_consts::BUS_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Try to queue an event (non-blocking)
    ///
    /// Returns false if the queue is full and the event was dropped
    #[inline]
    pub fn emit(&self, event: GameEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(dropped)) => {
                trace!(?dropped, "event queue full, dropping");
                false
            }
            // The bus owns a receiver, so the channel never disconnects
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    pub fn subscribe(&self) -> Receiver<GameEvent> {
        self.receiver.clone()
    }

    /// Take every pending event
    pub fn drain(&self) -> Vec<GameEvent> {
        self.receiver.try_iter().collect()
    }

    #[inline]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
