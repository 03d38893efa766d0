//! Card system: definitions and the catalog.
//!
//! ## Key Types
//!
//! - `MerchantCard` / `MerchantEffect`: reusable effect cards
//! - `VictoryCard`: one-time purchases worth points
//! - `Coin`: gold/silver tokens on the first two victory slots
//! - `Catalog`: id lookup for every card in a session
//!
//! Game state only stores card ids; definitions live in the catalog and
//! never change.

pub mod catalog;
pub mod definition;

pub use catalog::{
    Catalog, MERCHANT_CATALOG_SIZE, STARTER_GAIN, STARTER_UPGRADE, VICTORY_CATALOG_SIZE,
};
pub use definition::{
    Coin, MerchantCard, MerchantCardId, MerchantEffect, VictoryCard, VictoryCardId,
};
