//! Bonus wheel drawn after every completed Pomodoro.
//!
//! The outcome is drawn the moment the spin starts; it is only revealed
//! (and paid out) when the scheduled reveal arrives. Randomness comes from a
//! [`RandomSource`] so callers can pin outcomes.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

/// Uniform index source.
pub trait RandomSource {
    /// An index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Process-wide thread RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible PCG stream.
#[derive(Debug, Clone)]
pub struct SeededRandom(Mcg128Xsl64);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(Mcg128Xsl64::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Replays a fixed list of indices, then keeps returning 0.
#[derive(Debug, Default, Clone)]
pub struct ScriptedRandom {
    picks: VecDeque<usize>,
}

impl ScriptedRandom {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.picks.pop_front().unwrap_or(0) % len
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpinId(pub u64);

impl fmt::Display for SpinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spin#{}", self.0)
    }
}

/// What the wheel currently shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusResult {
    pub points: u64,
    pub is_spinning: bool,
}

#[derive(Debug, Clone)]
pub struct BonusWheel<R> {
    outcomes: Vec<u64>,
    rng: R,
    result: BonusResult,
    pending: BTreeMap<SpinId, u64>,
    next_spin: u64,
    latest: Option<SpinId>,
}

impl<R: RandomSource> BonusWheel<R> {
    /// `outcomes` must be non-empty; [`GameConfig::validate`](crate::GameConfig::validate)
    /// guarantees this for configured wheels.
    pub fn new(outcomes: Vec<u64>, rng: R) -> Self {
        Self {
            outcomes,
            rng,
            result: BonusResult::default(),
            pending: BTreeMap::new(),
            next_spin: 0,
            latest: None,
        }
    }

    pub fn outcomes(&self) -> &[u64] {
        &self.outcomes
    }

    pub fn result(&self) -> BonusResult {
        self.result
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Start a spin. The amount is fixed now and held until [`reveal`](Self::reveal).
    pub fn spin(&mut self) -> SpinId {
        let amount = if self.outcomes.is_empty() {
            0
        } else {
            self.outcomes[self.rng.pick_index(self.outcomes.len())]
        };
        let id = SpinId(self.next_spin);
        self.next_spin += 1;
        self.pending.insert(id, amount);
        self.latest = Some(id);
        self.result = BonusResult {
            points: 0,
            is_spinning: true,
        };
        id
    }

    /// Settle a spin, returning its amount. Each spin settles exactly once.
    ///
    /// Only the most recent spin updates the displayed result; an older
    /// overlapping spin still pays out.
    pub fn reveal(&mut self, id: SpinId) -> Option<u64> {
        let amount = self.pending.remove(&id)?;
        if self.latest == Some(id) {
            self.result = BonusResult {
                points: amount,
                is_spinning: false,
            };
        }
        Some(amount)
    }

    /// Drop unrevealed spins without paying them.
    pub fn cancel_pending(&mut self) {
        self.pending.clear();
        self.result.is_spinning = false;
    }
}
