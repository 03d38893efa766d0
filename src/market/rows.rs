//! Visible market rows backed by draw piles.
//!
//! ## Merchant row
//!
//! Taking slot `i` costs `i` yellow: one yellow bonus cube is left on each
//! skipped slot `0..i`. Cubes stay with their card and go to whoever takes it.
//!
//! ## Victory row
//!
//! Slot 0 carries the gold coin and slot 1 the silver coin whenever those
//! slots are occupied. Coins are reassigned after every refill, so a coin
//! pushed off its slot is lost to that card.
//!
//! Both rows shift left when a card is taken and refill one card from the
//! pile. Once a pile is empty the row simply shrinks.

use im::Vector;
use log::trace;
use serde::{Deserialize, Serialize};

use super::pile::DrawPile;
use crate::cards::{Catalog, Coin, MerchantCardId, VictoryCardId};
use crate::core::{GameRng, SpiceType, Spices};

/// Stream index for the merchant pile shuffle.
const MERCHANT_STREAM: u64 = 0;
/// Stream index for the victory pile shuffle.
const VICTORY_STREAM: u64 = 1;

/// A merchant card on display with the cubes left on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantSlot {
    pub card: MerchantCardId,
    pub bonus: Spices,
}

/// A victory card on display with its coin, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VictorySlot {
    pub card: VictoryCardId,
    pub coin: Option<Coin>,
}

/// A merchant card taken from the market together with its bonus cubes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TakenMerchant {
    pub card: MerchantCardId,
    pub bonus: Spices,
}

/// Both market rows and their piles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    merchant_pile: DrawPile<MerchantCardId>,
    victory_pile: DrawPile<VictoryCardId>,
    merchant_row: Vector<MerchantSlot>,
    victory_row: Vector<VictorySlot>,
}

impl Market {
    /// Shuffle both catalogs into independent draw piles. Rows start empty.
    #[must_use]
    pub fn initialize_decks(catalog: &Catalog, rng: &GameRng) -> Self {
        let merchant_pile = DrawPile::shuffled(
            catalog.merchant_cards().iter().map(|card| card.id),
            &mut rng.for_stream(MERCHANT_STREAM),
        );
        let victory_pile = DrawPile::shuffled(
            catalog.victory_cards().iter().map(|card| card.id),
            &mut rng.for_stream(VICTORY_STREAM),
        );
        Self {
            merchant_pile,
            victory_pile,
            merchant_row: Vector::new(),
            victory_row: Vector::new(),
        }
    }

    /// Shuffled decks with both rows dealt: the opening market for a seed.
    #[must_use]
    pub fn deal(catalog: &Catalog, rng: &GameRng, merchant_size: usize, victory_size: usize) -> Self {
        let mut market = Self::initialize_decks(catalog, rng);
        market.setup_market(merchant_size, victory_size);
        market
    }

    /// Market with explicit contents, for restoring or staging a position.
    #[must_use]
    pub fn from_parts(
        merchant_pile: DrawPile<MerchantCardId>,
        victory_pile: DrawPile<VictoryCardId>,
        merchant_row: impl IntoIterator<Item = MerchantSlot>,
        victory_row: impl IntoIterator<Item = VictoryCardId>,
    ) -> Self {
        let mut market = Self {
            merchant_pile,
            victory_pile,
            merchant_row: merchant_row.into_iter().collect(),
            victory_row: victory_row
                .into_iter()
                .map(|card| VictorySlot { card, coin: None })
                .collect(),
        };
        market.assign_coins();
        market
    }

    /// Deal the visible rows from the top of each pile and place the coins.
    pub fn setup_market(&mut self, merchant_size: usize, victory_size: usize) {
        for _ in 0..victory_size {
            if let Some(card) = self.victory_pile.draw() {
                self.victory_row.push_back(VictorySlot { card, coin: None });
            }
        }
        self.assign_coins();

        for _ in 0..merchant_size {
            if let Some(card) = self.merchant_pile.draw() {
                self.merchant_row.push_back(MerchantSlot {
                    card,
                    bonus: Spices::EMPTY,
                });
            }
        }
    }

    // === Queries ===

    #[must_use]
    pub fn merchant_row(&self) -> &Vector<MerchantSlot> {
        &self.merchant_row
    }

    #[must_use]
    pub fn victory_row(&self) -> &Vector<VictorySlot> {
        &self.victory_row
    }

    #[must_use]
    pub fn merchant_pile(&self) -> &DrawPile<MerchantCardId> {
        &self.merchant_pile
    }

    #[must_use]
    pub fn victory_pile(&self) -> &DrawPile<VictoryCardId> {
        &self.victory_pile
    }

    #[must_use]
    pub fn merchant_slot(&self, index: usize) -> Option<&MerchantSlot> {
        self.merchant_row.get(index)
    }

    #[must_use]
    pub fn victory_slot(&self, index: usize) -> Option<&VictorySlot> {
        self.victory_row.get(index)
    }

    /// Yellow spice needed to take merchant slot `index`.
    #[must_use]
    pub fn merchant_cost(index: usize) -> u32 {
        u32::try_from(index).unwrap_or(u32::MAX)
    }

    // === Mutation ===

    /// Take merchant slot `index`, leaving a yellow cube on each skipped slot.
    ///
    /// The caller has already collected the cost. Returns `None` if the slot
    /// does not exist.
    pub fn take_merchant(&mut self, index: usize) -> Option<TakenMerchant> {
        let slot = *self.merchant_row.get(index)?;
        for skipped in self.merchant_row.iter_mut().take(index) {
            skipped.bonus[SpiceType::Yellow] += 1;
        }
        self.refill_merchant_market(index);
        Some(TakenMerchant {
            card: slot.card,
            bonus: slot.bonus,
        })
    }

    /// Take victory slot `index` with whatever coin it carries.
    pub fn take_victory(&mut self, index: usize) -> Option<VictorySlot> {
        let slot = *self.victory_row.get(index)?;
        self.refill_victory_market(index);
        Some(slot)
    }

    /// Remove merchant slot `taken`, shift left, refill from the pile.
    pub fn refill_merchant_market(&mut self, taken: usize) {
        if taken < self.merchant_row.len() {
            self.merchant_row.remove(taken);
        }
        if let Some(card) = self.merchant_pile.draw() {
            trace!("merchant market refilled with {card}");
            self.merchant_row.push_back(MerchantSlot {
                card,
                bonus: Spices::EMPTY,
            });
        }
    }

    /// Remove victory slot `taken`, shift left, refill, then re-place coins.
    pub fn refill_victory_market(&mut self, taken: usize) {
        if taken < self.victory_row.len() {
            self.victory_row.remove(taken);
        }
        if let Some(card) = self.victory_pile.draw() {
            trace!("victory market refilled with {card}");
            self.victory_row.push_back(VictorySlot { card, coin: None });
        }
        self.assign_coins();
    }

    fn assign_coins(&mut self) {
        for (slot_index, slot) in self.victory_row.iter_mut().enumerate() {
            slot.coin = Coin::for_slot(slot_index);
        }
    }
}
