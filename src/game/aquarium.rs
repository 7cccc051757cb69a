//! Aquarium world container
//!
//! Owns the live creatures and the ordered level sequence. The level counter
//! only ever grows; the active level is `counter % level_count`, so finishing
//! the last scored level wraps back to the first with refreshed quotas.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::game::constants::spawn;
use crate::game::level::Level;
use crate::game::state::{Creature, CreatureId, CreaturePool, Kind};
use crate::game::systems::movement;
use crate::util::vec2::Vec2;

/// What one world tick changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Active level index after a transition this tick
    pub advanced_to: Option<usize>,
    /// Creatures spawned by repopulation
    pub spawned: usize,
}

pub struct Aquarium {
    width: u32,
    height: u32,
    creatures: CreaturePool,
    levels: Vec<Level>,
    level_counter: usize,
    rng: StdRng,
}

impl Aquarium {
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        Self {
            width,
            height,
            creatures: CreaturePool::with_key(),
            levels: Vec::new(),
            level_counter: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_levels(mut self, levels: Vec<Level>) -> Self {
        self.levels = levels;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Far corner of the creature movement rectangle
    pub fn movement_bounds(&self) -> Vec2 {
        Vec2::new(
            (self.width as f32 - spawn::BOUNDS_MARGIN).max(0.0),
            (self.height as f32 - spawn::BOUNDS_MARGIN).max(0.0),
        )
    }

    /// Spawn a creature of `kind` at a random position with a random speed
    pub fn spawn_creature(&mut self, kind: Kind) -> CreatureId {
        let x = self.rng.gen_range(0..self.width.max(1)) as f32;
        let y = self.rng.gen_range(0..self.height.max(1)) as f32;
        let speed = self.rng.gen_range(spawn::MIN_SPEED..=spawn::MAX_SPEED) as f32;
        let heading = kind.initial_heading(&mut self.rng);
        let creature = Creature::new(kind, Vec2::new(x, y), speed, heading, Vec2::ZERO);
        self.add_creature(creature)
    }

    /// Insert a creature, re-bounding it to this world's drawable area
    pub fn add_creature(&mut self, mut creature: Creature) -> CreatureId {
        creature.bounds = self.movement_bounds();
        self.creatures.insert(creature)
    }

    /// Remove a live creature, crediting the active level.
    /// Stale or unknown ids are a no-op.
    pub fn remove_creature(&mut self, id: CreatureId) -> Option<Creature> {
        let creature = self.creatures.remove(id)?;
        let active = self.active_index();
        if let Some(level) = active.and_then(|index| self.levels.get_mut(index)) {
            level.consume(creature.kind, creature.value);
        }
        debug!(kind = creature.kind.name(), "creature removed");
        Some(creature)
    }

    pub fn clear_creatures(&mut self) {
        self.creatures.clear();
    }

    /// Move everything, then repopulate
    pub fn tick(&mut self) -> TickReport {
        movement::update(&mut self.creatures);
        self.repopulate_step()
    }

    /// Advance past a completed level (hard-clearing the world), then top up
    /// the active level's quotas.
    pub fn repopulate_step(&mut self) -> TickReport {
        let mut report = TickReport::default();
        let Some(mut index) = self.active_index() else {
            return report;
        };

        if self.levels[index].is_completed() {
            self.levels[index].reset();
            self.level_counter += 1;
            index = self.level_counter % self.levels.len();
            self.creatures.clear();
            info!(level = index, pass = self.level_counter / self.levels.len(), "new level reached");
            report.advanced_to = Some(index);
        }

        let spawns = self.levels[index].repopulate();
        for kind in &spawns {
            self.spawn_creature(*kind);
        }
        report.spawned = spawns.len();
        report
    }

    fn active_index(&self) -> Option<usize> {
        if self.levels.is_empty() {
            None
        } else {
            Some(self.level_counter % self.levels.len())
        }
    }

    pub fn active_level(&self) -> Option<&Level> {
        self.active_index().and_then(|index| self.levels.get(index))
    }

    /// Level index for reporting: the raw counter clamped to the table
    pub fn current_level(&self) -> usize {
        self.level_counter.min(self.levels.len().saturating_sub(1))
    }

    /// Raw, unbounded level counter
    pub fn level_counter(&self) -> usize {
        self.level_counter
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.get(id)
    }

    /// The `index`-th live creature in storage order; `None` when out of range
    pub fn creature_at(&self, index: usize) -> Option<(CreatureId, &Creature)> {
        self.creatures.iter().nth(index)
    }

    pub fn creatures(&self) -> impl Iterator<Item = (CreatureId, &Creature)> {
        self.creatures.iter()
    }

    pub fn creature_count(&self) -> usize {
        self.creatures.len()
    }
}
