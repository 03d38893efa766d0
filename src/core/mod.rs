//! Core engine types: spices, players, state, actions, RNG, configuration.
//!
//! Everything the rules act on lives here. Card data is in `cards`, seat
//! holdings in `players`, and the market in `market`; `GameState` ties
//! them together.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod spice;
pub mod state;

pub use action::{Action, ActionRecord};
pub use config::{CoinValues, GameConfig, GameConfigBuilder};
pub use error::{ReplayError, SetupError, SnapshotError};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use spice::{SpiceType, Spices};
pub use state::{GameStage, GameState};
