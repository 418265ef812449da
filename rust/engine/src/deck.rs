use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Remaining cards of the current hand. Cards leave from the end of the list only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Builds all 52 cards and applies one uniform Fisher-Yates shuffle.
    pub fn build<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards = full_deck();
        cards.shuffle(rng);
        Self { cards }
    }

    pub fn new_with_seed(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        Self::build(&mut rng)
    }

    /// Stacked deck: the first card of `cards` is the first one drawn.
    pub fn from_draw_order(mut cards: Vec<Card>) -> Self {
        cards.reverse();
        Self { cards }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::DeckExhausted)
    }

    pub fn burn(&mut self) -> Result<(), GameError> {
        self.draw().map(|_| ())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
