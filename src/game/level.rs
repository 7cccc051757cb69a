//! Level population ledger
//!
//! A [`Level`] holds per-kind population quotas, the score accumulated while
//! it is active, and its completion rule. The world asks the active level how
//! many creatures to spawn each tick and reports every consumption back.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::game::state::Kind;

/// Spawn requests produced by one repopulation pass
pub type SpawnList = SmallVec<[Kind; 16]>;

/// Quota bookkeeping for one creature kind within a level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PopulationEntry {
    pub kind: Kind,
    /// Desired live population
    pub target: u32,
    /// Live population the level believes exists
    pub current: u32,
}

impl PopulationEntry {
    pub fn new(kind: Kind, target: u32) -> Self {
        Self {
            kind,
            target,
            current: 0,
        }
    }

    /// Creatures missing to reach quota
    pub fn deficit(&self) -> u32 {
        self.target.saturating_sub(self.current)
    }
}

/// How a level decides it is finished
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Completion {
    /// Done once accumulated score reaches `target_score`
    ScoreThreshold,
    /// Never completes; the session stays here forever
    Endless,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub id: usize,
    entries: Vec<PopulationEntry>,
    score: u32,
    target_score: u32,
    completion: Completion,
    /// Appearance the player adopts in predator mode after entering this level
    predator_form: Kind,
}

impl Level {
    pub fn new(id: usize, target_score: u32) -> Self {
        Self {
            id,
            entries: Vec::new(),
            score: 0,
            target_score,
            completion: Completion::ScoreThreshold,
            predator_form: Kind::BigFish,
        }
    }

    /// Final stage that never reports completion
    pub fn endless(id: usize) -> Self {
        Self {
            completion: Completion::Endless,
            ..Self::new(id, u32::MAX)
        }
    }

    /// Add a quota. A kind already present keeps its first entry; later
    /// duplicates are ignored so lookups stay first-match.
    pub fn with_population(mut self, kind: Kind, target: u32) -> Self {
        if self.entry(kind).is_none() {
            self.entries.push(PopulationEntry::new(kind, target));
        }
        self
    }

    pub fn with_predator_form(mut self, kind: Kind) -> Self {
        self.predator_form = kind;
        self
    }

    /// Spawn list bringing every entry up to quota.
    /// Counts are bumped immediately, so a second call with no consumption
    /// in between returns an empty list.
    pub fn repopulate(&mut self) -> SpawnList {
        let mut spawns = SpawnList::new();
        for entry in &mut self.entries {
            let delta = entry.deficit();
            if delta == 0 {
                continue;
            }
            spawns.extend(std::iter::repeat(entry.kind).take(delta as usize));
            entry.current += delta;
        }
        if !spawns.is_empty() {
            tracing::debug!(level = self.id, count = spawns.len(), "repopulating");
        }
        spawns
    }

    /// Record a consumed creature. No-op (returns false) if the kind has no
    /// entry or its live count is already zero.
    pub fn consume(&mut self, kind: Kind, value: u32) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|entry| entry.kind == kind) else {
            return false;
        };
        if entry.current == 0 {
            return false;
        }
        entry.current -= 1;
        self.score = self.score.saturating_add(value);
        true
    }

    pub fn is_completed(&self) -> bool {
        match self.completion {
            Completion::ScoreThreshold => self.score >= self.target_score,
            Completion::Endless => false,
        }
    }

    /// Zero every live count. Score and targets are kept.
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.current = 0;
        }
    }

    pub fn entry(&self, kind: Kind) -> Option<&PopulationEntry> {
        self.entries.iter().find(|entry| entry.kind == kind)
    }

    pub fn entries(&self) -> &[PopulationEntry] {
        &self.entries
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn completion(&self) -> Completion {
        self.completion
    }

    pub fn predator_form(&self) -> Kind {
        self.predator_form
    }
}

/// Default progression: four scored stages and an endless finale
pub fn default_levels() -> Vec<Level> {
    vec![
        Level::new(0, 10).with_population(Kind::PlainFish, 10),
        Level::new(1, 15)
            .with_population(Kind::PlainFish, 8)
            .with_population(Kind::BigFish, 2),
        Level::new(2, 20)
            .with_population(Kind::PlainFish, 6)
            .with_population(Kind::Axolotl, 3)
            .with_population(Kind::BigFish, 3),
        Level::new(3, 30)
            .with_population(Kind::PlainFish, 5)
            .with_population(Kind::BigFish, 4)
            .with_population(Kind::Axolotl, 3)
            .with_population(Kind::Jellyfish, 2),
        Level::endless(4)
            .with_population(Kind::PlainFish, 6)
            .with_population(Kind::BigFish, 5)
            .with_population(Kind::Axolotl, 4)
            .with_population(Kind::Jellyfish, 4),
    ]
}
