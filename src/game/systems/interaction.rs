//! Interaction resolution
//!
//! Runs on the throttled resolver schedule. One pass checks the power-up,
//! resolves at most one creature contact, advances the world, and puts the
//! player into predator mode when the reported level changed.

use tracing::{debug, info};

use crate::game::aquarium::{Aquarium, TickReport};
use crate::game::constants::{boost, player as player_consts, predator, scoring};
use crate::game::events::{EventBus, GameEvent};
use crate::game::player::{BoostStart, Player};
use crate::game::state::{CreatureId, Kind};
use crate::game::systems::powerup::{PickupCheck, PowerUpField};

/// What a player/creature contact does. Rules are checked in declaration
/// order and the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Jellyfish always hurt and are never eaten
    Sting,
    /// Axolotls are left alone by a predator
    Spared,
    Eat,
    /// Not enough power: the player takes damage instead
    TooWeak,
}

/// Pick the outcome for touching a creature of `kind` worth `value`
pub fn decide(player: &Player, kind: Kind, value: u32) -> Outcome {
    let predator = player.is_predator();
    if kind == Kind::Jellyfish {
        Outcome::Sting
    } else if kind == Kind::Axolotl && predator {
        Outcome::Spared
    } else if predator || kind == Kind::Axolotl || player.power() >= value {
        Outcome::Eat
    } else {
        Outcome::TooWeak
    }
}

/// First creature in storage order overlapping the player
pub fn detect_collision(aquarium: &Aquarium, player: &Player) -> Option<CreatureId> {
    aquarium
        .creatures()
        .find(|(_, creature)| creature.overlaps(player.position, player.radius()))
        .map(|(id, _)| id)
}

/// Everything one resolver pass did
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub pickup: PickupCheck,
    pub boost: Option<BoostStart>,
    pub contact: Option<(Kind, Outcome)>,
    /// World tick result; `None` when the pass halted on game over
    pub tick: Option<TickReport>,
    pub predator_started: bool,
    pub game_over: bool,
}

impl Resolution {
    fn new(pickup: PickupCheck) -> Self {
        Self {
            pickup,
            boost: None,
            contact: None,
            tick: None,
            predator_started: false,
            game_over: false,
        }
    }
}

/// Tunables for a resolver pass
#[derive(Debug, Clone, Copy)]
pub struct Resolver {
    /// Frames of damage immunity after a hit
    pub damage_debounce: i32,
    pub boost_duration: f32,
    pub predator_duration: f32,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            damage_debounce: player_consts::DAMAGE_DEBOUNCE_FRAMES,
            boost_duration: boost::DURATION,
            predator_duration: predator::DURATION,
        }
    }
}

impl Resolver {
    pub fn resolve(
        &self,
        aquarium: &mut Aquarium,
        player: &mut Player,
        powerups: &mut PowerUpField,
        events: &EventBus,
        elapsed: f32,
    ) -> Resolution {
        let pickup = powerups.check(player.position, player.radius(), elapsed);
        let mut resolution = Resolution::new(pickup);
        match pickup {
            PickupCheck::Collected(kind) => {
                events.emit(GameEvent::PowerUpCollected { kind });
                let start = player.start_boost(self.boost_duration, kind);
                events.emit(GameEvent::BoostStarted {
                    kind,
                    capped: start.capped,
                });
                resolution.boost = Some(start);
            }
            PickupCheck::Expired(kind) => {
                events.emit(GameEvent::PowerUpExpired { kind });
            }
            PickupCheck::Nothing => {}
        }

        if let Some(id) = detect_collision(aquarium, player) {
            if let Some(creature) = aquarium.creature(id) {
                let (kind, value) = (creature.kind, creature.value);
                let outcome = decide(player, kind, value);
                resolution.contact = Some((kind, outcome));
                debug!(kind = kind.name(), ?outcome, "contact");

                match outcome {
                    Outcome::Sting | Outcome::TooWeak => {
                        if self.damage(player, kind, events) {
                            resolution.game_over = true;
                            info!(score = player.score(), "game over");
                            events.emit(GameEvent::GameOver {
                                score: player.score(),
                                level: aquarium.current_level(),
                            });
                            return resolution;
                        }
                    }
                    Outcome::Spared => {
                        events.emit(GameEvent::CreatureSpared { kind });
                    }
                    Outcome::Eat => Self::eat(aquarium, player, id, events),
                }
            }
        }

        let level_before = aquarium.current_level();
        let report = aquarium.tick();
        if report.spawned > 0 {
            events.emit(GameEvent::CreaturesSpawned {
                count: report.spawned,
            });
        }
        if let Some(level) = report.advanced_to {
            events.emit(GameEvent::LevelAdvanced {
                level,
                counter: aquarium.level_counter(),
            });
        }

        if aquarium.current_level() != level_before {
            let form = aquarium
                .active_level()
                .map(|level| level.predator_form())
                .unwrap_or(Kind::BigFish);
            player.activate_predator(self.predator_duration, elapsed, form);
            events.emit(GameEvent::PredatorStarted {
                form,
                duration: self.predator_duration,
            });
            resolution.predator_started = true;
        }

        resolution.tick = Some(report);
        resolution
    }

    /// Apply a hit. Returns true if it left the player without lives.
    fn damage(&self, player: &mut Player, by: Kind, events: &EventBus) -> bool {
        if !player.lose_life(self.damage_debounce) {
            return false;
        }
        events.emit(GameEvent::PlayerDamaged {
            by,
            lives: player.lives(),
        });
        !player.is_alive()
    }

    fn eat(aquarium: &mut Aquarium, player: &mut Player, id: CreatureId, events: &EventBus) {
        let Some(creature) = aquarium.remove_creature(id) else {
            return;
        };
        player.add_to_score(scoring::EAT_COUNT_STEP, creature.value);
        events.emit(GameEvent::CreatureEaten {
            kind: creature.kind,
            value: creature.value,
            score: player.score(),
        });

        if player.score() % scoring::POWER_THRESHOLD == 0 {
            player.increase_power(scoring::POWER_STEP);
            info!(power = player.power(), "power increased");
            events.emit(GameEvent::PowerGained {
                power: player.power(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::level::Level;
    use crate::game::player::{Appearance, BoostKind};
    use crate::game::state::Creature;
    use crate::game::systems::powerup::PowerUp;
    use crate::util::vec2::Vec2;

    const SPOT: Vec2 = Vec2 { x: 200.0, y: 200.0 };

    struct Harness {
        aquarium: Aquarium,
        player: Player,
        powerups: PowerUpField,
        events: EventBus,
        resolver: Resolver,
    }

    impl Harness {
        fn resolve(&mut self, elapsed: f32) -> Resolution {
            self.resolver.resolve(
                &mut self.aquarium,
                &mut self.player,
                &mut self.powerups,
                &self.events,
                elapsed,
            )
        }

        fn place(&mut self, kind: Kind) -> CreatureId {
            let creature = Creature::new(kind, SPOT, 0.0, Vec2::ZERO, Vec2::ZERO);
            self.aquarium.add_creature(creature)
        }
    }

    fn create_harness() -> Harness {
        create_harness_with(Aquarium::new(800, 600, 13))
    }

    fn create_harness_with(aquarium: Aquarium) -> Harness {
        Harness {
            aquarium,
            player: Player::new(SPOT, 5.0, 3, Vec2::new(780.0, 580.0)),
            powerups: PowerUpField::new(8.0, 0.0),
            events: EventBus::new(),
            resolver: Resolver::default(),
        }
    }

    #[test]
    fn test_decide_rule_order() {
        let mut player = Player::new(Vec2::ZERO, 5.0, 3, Vec2::new(100.0, 100.0));
        assert_eq!(decide(&player, Kind::PlainFish, 1), Outcome::Eat);
        assert_eq!(decide(&player, Kind::BigFish, 5), Outcome::TooWeak);
        assert_eq!(decide(&player, Kind::Axolotl, 3), Outcome::Eat);
        assert_eq!(decide(&player, Kind::Jellyfish, 2), Outcome::Sting);

        player.activate_predator(10.0, 0.0, Kind::BigFish);
        assert_eq!(decide(&player, Kind::BigFish, 5), Outcome::Eat);
        assert_eq!(decide(&player, Kind::Axolotl, 3), Outcome::Spared);
        assert_eq!(decide(&player, Kind::Jellyfish, 2), Outcome::Sting);
    }

    #[test]
    fn test_weak_player_hurt_by_big_fish() {
        let mut h = create_harness();
        h.place(Kind::BigFish);

        let resolution = h.resolve(0.0);
        assert_eq!(resolution.contact, Some((Kind::BigFish, Outcome::TooWeak)));
        assert_eq!(h.player.lives(), 2);
        assert_eq!(h.player.score(), 0);
        assert_eq!(h.aquarium.creature_count(), 1);
    }

    #[test]
    fn test_eat_plain_fish() {
        let mut h = create_harness();
        h.place(Kind::PlainFish);

        h.resolve(0.0);
        assert_eq!(h.player.score(), 1);
        assert_eq!(h.player.eaten(), 1);
        assert_eq!(h.aquarium.creature_count(), 0);
        assert!(h.events.drain().contains(&GameEvent::CreatureEaten {
            kind: Kind::PlainFish,
            value: 1,
            score: 1,
        }));
    }

    #[test]
    fn test_power_increments_exactly_at_threshold() {
        let mut h = create_harness();
        h.player.add_to_score(0, 23);
        h.place(Kind::PlainFish);
        h.resolve(0.0);
        assert_eq!(h.player.score(), 24);
        assert_eq!(h.player.power(), 1);

        h.place(Kind::PlainFish);
        h.resolve(0.1);
        assert_eq!(h.player.score(), 25);
        assert_eq!(h.player.power(), 2);
    }

    #[test]
    fn test_predator_spares_axolotl() {
        let mut h = create_harness();
        h.player.activate_predator(10.0, 0.0, Kind::BigFish);
        h.place(Kind::Axolotl);

        let resolution = h.resolve(0.0);
        assert_eq!(resolution.contact, Some((Kind::Axolotl, Outcome::Spared)));
        assert_eq!(h.player.lives(), 3);
        assert_eq!(h.player.score(), 0);
        assert_eq!(h.player.power(), 1);
        assert_eq!(h.aquarium.creature_count(), 1);
    }

    #[test]
    fn test_predator_eats_big_fish() {
        let mut h = create_harness();
        h.player.activate_predator(10.0, 0.0, Kind::BigFish);
        h.place(Kind::BigFish);

        h.resolve(0.0);
        assert_eq!(h.player.score(), 5);
        assert_eq!(h.aquarium.creature_count(), 0);
    }

    #[test]
    fn test_jellyfish_always_stings() {
        for predator in [false, true] {
            let mut h = create_harness();
            h.player.increase_power(100);
            if predator {
                h.player.activate_predator(10.0, 0.0, Kind::BigFish);
            }
            h.place(Kind::Jellyfish);

            h.resolve(0.0);
            assert_eq!(h.player.lives(), 2);
            assert_eq!(h.aquarium.creature_count(), 1);
        }
    }

    #[test]
    fn test_repeated_sting_debounced() {
        let mut h = create_harness();
        h.place(Kind::Jellyfish);
        h.resolve(0.0);
        h.resolve(0.1);
        assert_eq!(h.player.lives(), 2);
    }

    #[test]
    fn test_first_overlap_in_slot_order_wins() {
        let mut h = create_harness();
        h.place(Kind::Jellyfish);
        h.place(Kind::PlainFish);

        let resolution = h.resolve(0.0);
        assert_eq!(resolution.contact, Some((Kind::Jellyfish, Outcome::Sting)));
        assert_eq!(h.player.score(), 0);
        assert_eq!(h.aquarium.creature_count(), 2);
    }

    #[test]
    fn test_no_contact_still_ticks_world() {
        let aquarium = Aquarium::new(800, 600, 2)
            .with_levels(vec![Level::new(0, 100).with_population(Kind::PlainFish, 3)]);
        let mut h = create_harness_with(aquarium);
        h.player.position = Vec2::new(-500.0, -500.0);

        let resolution = h.resolve(0.0);
        assert_eq!(resolution.contact, None);
        assert_eq!(resolution.tick.map(|t| t.spawned), Some(3));
    }

    #[test]
    fn test_game_over_halts_pass() {
        let aquarium = Aquarium::new(800, 600, 2)
            .with_levels(vec![Level::new(0, 100).with_population(Kind::PlainFish, 3)]);
        let mut h = create_harness_with(aquarium);
        h.player = Player::new(SPOT, 5.0, 1, Vec2::new(780.0, 580.0));
        h.place(Kind::Jellyfish);

        let resolution = h.resolve(0.0);
        assert!(resolution.game_over);
        assert!(resolution.tick.is_none());
        // World did not repopulate
        assert_eq!(h.aquarium.creature_count(), 1);
        assert!(h
            .events
            .drain()
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. })));
    }

    #[test]
    fn test_level_advance_triggers_predator() {
        let aquarium = Aquarium::new(800, 600, 4).with_levels(vec![
            Level::new(0, 1).with_population(Kind::PlainFish, 1),
            Level::new(1, 100)
                .with_population(Kind::PlainFish, 2)
                .with_predator_form(Kind::Axolotl),
        ]);
        let mut h = create_harness_with(aquarium);
        h.player.position = Vec2::new(-500.0, -500.0);
        h.resolve(0.0);

        let target = h.aquarium.creatures().next().map(|(_, c)| c.position);
        h.player.position = target.unwrap();
        let resolution = h.resolve(1.0);

        assert!(resolution.predator_started);
        assert_eq!(h.aquarium.current_level(), 1);
        assert!(h.player.is_predator());
        assert_eq!(h.player.appearance(), Appearance::Creature(Kind::Axolotl));
        let events = h.events.drain();
        assert!(events.contains(&GameEvent::LevelAdvanced { level: 1, counter: 1 }));
        assert!(events.contains(&GameEvent::PredatorStarted {
            form: Kind::Axolotl,
            duration: predator::DURATION,
        }));
    }

    #[test]
    fn test_level_advanced_event_reports_wrapped_index() {
        let aquarium =
            Aquarium::new(800, 600, 4).with_levels(vec![Level::new(0, 0), Level::new(1, 0)]);
        let mut h = create_harness_with(aquarium);

        let first = h.resolve(0.0);
        assert_eq!(first.tick.and_then(|t| t.advanced_to), Some(1));
        assert!(h
            .events
            .drain()
            .contains(&GameEvent::LevelAdvanced { level: 1, counter: 1 }));

        // Second pass wraps to the first level; reported index stays clamped
        let second = h.resolve(0.1);
        assert_eq!(second.tick.and_then(|t| t.advanced_to), Some(0));
        assert_eq!(h.aquarium.current_level(), 1);
        let events = h.events.drain();
        assert!(events.contains(&GameEvent::LevelAdvanced { level: 0, counter: 2 }));
        assert!(!events.contains(&GameEvent::LevelAdvanced { level: 1, counter: 2 }));
    }

    #[test]
    fn test_powerup_collected_starts_boost() {
        let mut h = create_harness();
        h.powerups
            .place(PowerUp::new(BoostKind::Speed, SPOT, 8.0));

        let resolution = h.resolve(0.0);
        assert_eq!(resolution.pickup, PickupCheck::Collected(BoostKind::Speed));
        assert_eq!(
            resolution.boost,
            Some(BoostStart {
                kind: BoostKind::Speed,
                capped: false
            })
        );
        assert!(h.player.speed() > h.player.base_speed());
    }

    #[test]
    fn test_powerup_expires_without_effect() {
        let mut h = create_harness();
        h.powerups
            .place(PowerUp::new(BoostKind::Size, Vec2::new(600.0, 400.0), 8.0));

        let resolution = h.resolve(9.0);
        assert_eq!(resolution.pickup, PickupCheck::Expired(BoostKind::Size));
        assert_eq!(h.player.size_multiplier(), 1.0);
    }
}
