//! Randomness port
//!
//! Resolution logic never touches an RNG directly. It asks a [`Dice`]
//! implementation for uniform draws and dice-pool success counts, so a
//! combat can be replayed from a seed or scripted in tests.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Outcome of rolling a dice pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RollResult {
    pub successes: u32,
}

/// Source of randomness for combat resolution
pub trait Dice {
    /// Uniform integer in `0..max_exclusive`; returns 0 when `max_exclusive` is 0
    fn uniform_int(&mut self, max_exclusive: u32) -> u32;

    /// Roll `pool` dice and count successes; empty or negative pools roll nothing
    fn roll_dice(&mut self, pool: i32) -> RollResult;
}

/// Faces on each die
pub const DIE_SIDES: u32 = 10;

/// Lowest face that counts as a success
pub const SUCCESS_FACE: u32 = 7;

/// ChaCha-backed dice, reproducible from a seed
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: ChaCha8Rng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl Dice for SeededDice {
    fn uniform_int(&mut self, max_exclusive: u32) -> u32 {
        if max_exclusive == 0 {
            return 0;
        }
        self.rng.gen_range(0..max_exclusive)
    }

    fn roll_dice(&mut self, pool: i32) -> RollResult {
        let successes = (0..pool.max(0))
            .filter(|_| self.rng.gen_range(1..=DIE_SIDES) >= SUCCESS_FACE)
            .count() as u32;
        RollResult { successes }
    }
}

/// Dice that replay queued results, for tests and recorded combats
///
/// Once a queue runs dry the matching fallback value is returned. Every pool
/// size requested is recorded in order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    uniform: VecDeque<u32>,
    successes: VecDeque<u32>,
    uniform_fallback: u32,
    success_fallback: u32,
    /// Pool sizes passed to `roll_dice`, oldest first
    pub pools: Vec<i32>,
    /// Bounds passed to `uniform_int`, oldest first
    pub uniform_bounds: Vec<u32>,
}

impl ScriptedDice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue uniform draws
    pub fn with_uniform(mut self, values: impl IntoIterator<Item = u32>) -> Self {
        self.uniform.extend(values);
        self
    }

    /// Queue dice-pool success counts
    pub fn with_successes(mut self, values: impl IntoIterator<Item = u32>) -> Self {
        self.successes.extend(values);
        self
    }

    /// Value returned by `uniform_int` once its queue is empty
    pub fn uniform_fallback(mut self, value: u32) -> Self {
        self.uniform_fallback = value;
        self
    }

    /// Successes returned by `roll_dice` once its queue is empty
    pub fn success_fallback(mut self, value: u32) -> Self {
        self.success_fallback = value;
        self
    }

    pub fn push_uniform(&mut self, value: u32) {
        self.uniform.push_back(value);
    }

    pub fn push_successes(&mut self, value: u32) {
        self.successes.push_back(value);
    }
}

impl Dice for ScriptedDice {
    fn uniform_int(&mut self, max_exclusive: u32) -> u32 {
        self.uniform_bounds.push(max_exclusive);
        self.uniform.pop_front().unwrap_or(self.uniform_fallback)
    }

    fn roll_dice(&mut self, pool: i32) -> RollResult {
        self.pools.push(pool);
        RollResult {
            successes: self.successes.pop_front().unwrap_or(self.success_fallback),
        }
    }
}
