//! Per-player ledger: spices, cards and coins.
//!
//! All mutation goes through the primitives here. Spice counts are unsigned
//! and removal clamps, so a player's stock can never go negative. Holding
//! more than the soft limit is allowed; it is reported, not prevented.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Coin, MerchantCardId, VictoryCardId};
use crate::core::config::DEFAULT_SPICE_LIMIT;
use crate::core::{SpiceType, Spices};

/// One seat's holdings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    spices: Spices,
    hand: Vector<MerchantCardId>,
    discard_pile: Vector<MerchantCardId>,
    victory_cards: Vector<VictoryCardId>,
    coins: Vector<Coin>,
}

impl Player {
    /// A player holding `hand` and `spices`, with nothing else.
    #[must_use]
    pub fn new(hand: impl IntoIterator<Item = MerchantCardId>, spices: Spices) -> Self {
        Self {
            spices,
            hand: hand.into_iter().collect(),
            ..Self::default()
        }
    }

    // === Spices ===

    #[must_use]
    pub fn spices(&self) -> &Spices {
        &self.spices
    }

    /// Amount held of one tier.
    #[must_use]
    pub fn spice(&self, spice: SpiceType) -> u32 {
        self.spices[spice]
    }

    /// Add spices. No upper bound is enforced here.
    pub fn add_spices(&mut self, spice: SpiceType, amount: u32) -> u32 {
        self.spices[spice] = self.spices[spice].saturating_add(amount);
        amount
    }

    /// Remove up to `amount`, returning how many were actually removed.
    pub fn remove_spices(&mut self, spice: SpiceType, amount: u32) -> u32 {
        let removed = amount.min(self.spices[spice]);
        self.spices[spice] -= removed;
        removed
    }

    /// Add every tier of a bundle.
    pub fn add_bundle(&mut self, bundle: &Spices) {
        self.spices += *bundle;
    }

    /// Remove every tier of a bundle, clamping each tier.
    ///
    /// Returns what was actually removed.
    pub fn remove_bundle(&mut self, bundle: &Spices) -> Spices {
        let mut removed = Spices::EMPTY;
        for (spice, amount) in bundle.iter() {
            removed[spice] = self.remove_spices(spice, amount);
        }
        removed
    }

    #[must_use]
    pub fn can_afford(&self, cost: &Spices) -> bool {
        self.spices.covers(cost)
    }

    #[must_use]
    pub fn total_spices(&self) -> u32 {
        self.spices.total()
    }

    /// Spices held above `limit`.
    #[must_use]
    pub fn excess_over(&self, limit: u32) -> u32 {
        self.total_spices().saturating_sub(limit)
    }

    /// True when holding more than the standard limit of 10.
    #[must_use]
    pub fn needs_to_discard_spices(&self) -> bool {
        self.excess_spice_count() > 0
    }

    /// Spices held above the standard limit of 10.
    #[must_use]
    pub fn excess_spice_count(&self) -> u32 {
        self.excess_over(DEFAULT_SPICE_LIMIT)
    }

    /// True iff `to` is strictly later than `from` and at least `amount` of
    /// `from` is held.
    #[must_use]
    pub fn can_upgrade(&self, from: SpiceType, to: SpiceType, amount: u32) -> bool {
        to > from && self.spices[from] >= amount
    }

    /// Move `amount` cubes from `from` to `to`, if `can_upgrade` allows it.
    pub fn upgrade_spices(&mut self, from: SpiceType, to: SpiceType, amount: u32) -> bool {
        if !self.can_upgrade(from, to, amount) {
            return false;
        }
        self.remove_spices(from, amount);
        self.add_spices(to, amount);
        true
    }

    // === Cards ===

    #[must_use]
    pub fn hand(&self) -> &Vector<MerchantCardId> {
        &self.hand
    }

    #[must_use]
    pub fn discard_pile(&self) -> &Vector<MerchantCardId> {
        &self.discard_pile
    }

    #[must_use]
    pub fn victory_cards(&self) -> &Vector<VictoryCardId> {
        &self.victory_cards
    }

    #[must_use]
    pub fn coins(&self) -> &Vector<Coin> {
        &self.coins
    }

    /// Number of coins of one kind.
    #[must_use]
    pub fn coin_count(&self, kind: Coin) -> usize {
        self.coins.iter().filter(|&&coin| coin == kind).count()
    }

    /// Card at a hand position.
    #[must_use]
    pub fn hand_card(&self, index: usize) -> Option<MerchantCardId> {
        self.hand.get(index).copied()
    }

    pub fn add_to_hand(&mut self, card: MerchantCardId) {
        self.hand.push_back(card);
    }

    /// Move the card at `index` from hand to the discard pile.
    ///
    /// Returns the card, or `None` if the index is out of range.
    pub fn complete_card(&mut self, index: usize) -> Option<MerchantCardId> {
        if index >= self.hand.len() {
            return None;
        }
        let card = self.hand.remove(index);
        self.discard_pile.push_back(card);
        Some(card)
    }

    /// Return the whole discard pile to hand. Returns the number of cards moved.
    pub fn recover_discards(&mut self) -> usize {
        let moved = self.discard_pile.len();
        let discards = std::mem::take(&mut self.discard_pile);
        self.hand.append(discards);
        moved
    }

    pub fn add_victory_card(&mut self, card: VictoryCardId) {
        self.victory_cards.push_back(card);
    }

    pub fn add_coin(&mut self, coin: Coin) {
        self.coins.push_back(coin);
    }
}
