//! Market and deck manager.
//!
//! Two shuffled draw piles feed two visible rows: merchant cards (bought
//! with yellow spice by position) and victory cards (bought with their
//! printed cost). See [`Market`] for the refill and coin rules.

pub mod pile;
pub mod rows;

pub use pile::DrawPile;
pub use rows::{Market, MerchantSlot, TakenMerchant, VictorySlot};
