//! Deck module - unbiased deal of the six symbol pairs
//!
//! Each deal lays out every symbol from [`CARD_SYMBOLS`] twice and permutes the
//! twelve faces with a Fisher-Yates shuffle driven by a seedable RNG, so the
//! same seed always produces the same sequence of deals.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::types::{CARD_SYMBOLS, DECK_SIZE, PAIR_COUNT};

/// Symbol at each table position, indexed by card id.
pub type Layout = [&'static str; DECK_SIZE];

/// The unshuffled deck: every symbol, then every symbol again.
pub fn ordered_layout() -> Layout {
    let mut layout = [CARD_SYMBOLS[0]; DECK_SIZE];
    for (i, slot) in layout.iter_mut().enumerate() {
        *slot = CARD_SYMBOLS[i % PAIR_COUNT];
    }
    layout
}

/// Check that a layout holds exactly the six symbols, two of each.
pub fn is_valid_layout(layout: &Layout) -> bool {
    CARD_SYMBOLS
        .iter()
        .all(|sym| layout.iter().filter(|s| *s == sym).count() == 2)
}

/// Seeded dealer producing shuffled layouts.
#[derive(Debug, Clone)]
pub struct Dealer {
    rng: SmallRng,
    seed: u64,
}

impl Dealer {
    /// Create a dealer with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a dealer seeded from the thread RNG.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Deal a freshly shuffled layout.
    pub fn deal(&mut self) -> Layout {
        let mut layout = ordered_layout();
        layout.shuffle(&mut self.rng);
        layout
    }

    /// Seed this dealer was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for Dealer {
    fn default() -> Self {
        Self::new(1)
    }
}
