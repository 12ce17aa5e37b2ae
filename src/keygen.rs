//! Synthetic identifier source.
//!
//! Every digit position is drawn independently and uniformly from `0..=9`, so
//! repeated digits and fully repeated identifiers are both possible.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::fold::{IDENTIFIER_LEN, Identifier};

/// Upper bound on up-front reservation; larger batches grow as they fill.
const MAX_PREALLOC: usize = 1 << 16;

pub struct KeyGenerator {
    rng: ChaCha8Rng,
}

impl KeyGenerator {
    /// Generator seeded from the thread-local RNG.
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Reproducible generator: equal seeds yield equal identifier streams.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn next_identifier(&mut self) -> Identifier {
        let mut digits = [0u8; IDENTIFIER_LEN];
        for d in digits.iter_mut() {
            *d = self.rng.random_range(0..10u8);
        }
        Identifier::from_digit_values(digits)
    }

    pub fn generate(&mut self, count: usize) -> Vec<Identifier> {
        let mut keys = Vec::with_capacity(count.min(MAX_PREALLOC));
        for _ in 0..count {
            keys.push(self.next_identifier());
        }
        keys
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}
