//! Shuffled draw piles.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// Face-down pile. The top of the pile is the end of the vector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawPile<T: Clone> {
    cards: Vector<T>,
}

impl<T: Clone> DrawPile<T> {
    /// Pile in the given order (last element on top).
    #[must_use]
    pub fn new(cards: impl IntoIterator<Item = T>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Pile shuffled with `rng`.
    #[must_use]
    pub fn shuffled(cards: impl IntoIterator<Item = T>, rng: &mut GameRng) -> Self {
        let mut cards: Vec<T> = cards.into_iter().collect();
        rng.shuffle(&mut cards);
        Self::new(cards)
    }

    /// Take the top card.
    pub fn draw(&mut self) -> Option<T> {
        self.cards.pop_back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cards.iter()
    }
}
