//! # spice-road
//!
//! A deterministic rules engine for a multiplayer spice trading card game.
//!
//! ## Design Principles
//!
//! 1. **Replicated State Machine**: The same seed and the same ordered
//!    action log produce the same state on every peer. Randomness is an
//!    injected, seeded ChaCha8 stream, and every accepted action is logged.
//!
//! 2. **Validate, Then Apply**: Illegal actions are reported through
//!    `ActionResult` and never touch state. Only setup and snapshot import
//!    can fail with an `Err`.
//!
//! 3. **No Globals**: A `GameSession` owns one game and is passed explicitly.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) state cloning via `im-rs`, which
//!   keeps undo checkpoints and snapshots cheap.
//!
//! - **Ids, Not Cards**: State stores card ids. Definitions live in an
//!   immutable `Catalog` shared between sessions.
//!
//! ## Modules
//!
//! - `core`: Spices, players, state, actions, RNG, configuration, errors
//! - `cards`: Card definitions and the catalog
//! - `players`: Per-seat holdings
//! - `market`: Draw piles and the visible market rows
//! - `resolution`: Pending choices (upgrade, trade, discard)
//! - `rules`: The rules engine, validation and scoring
//! - `session`: Session facade, snapshots and undo history
//!
//! ## Example
//!
//! ```
//! use spice_road::{GameSession, GameStage};
//!
//! let mut session = GameSession::setup_game(3, 2024).unwrap();
//! assert_eq!(session.stage(), GameStage::InProgress);
//!
//! let actions = session.legal_actions();
//! assert!(!actions.is_empty());
//!
//! let result = session.apply(session.current_player(), &actions[0]);
//! assert!(result.success);
//! ```

pub mod cards;
pub mod core;
pub mod market;
pub mod players;
pub mod resolution;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, CoinValues, GameConfig, GameConfigBuilder, GameRng, GameRngState,
    GameStage, GameState, PlayerId, PlayerMap, ReplayError, SetupError, SnapshotError, SpiceType,
    Spices,
};

pub use crate::cards::{
    Catalog, Coin, MerchantCard, MerchantCardId, MerchantEffect, VictoryCard, VictoryCardId,
};

pub use crate::players::Player;

pub use crate::market::{DrawPile, Market, MerchantSlot, VictorySlot};

pub use crate::resolution::{FollowUp, TurnPhase, UpgradePlan, UpgradeStep};

pub use crate::rules::{
    ActionResult, GameResult, RuleViolation, RulesEngine, ScoreBreakdown, SpiceRoadRules,
};

pub use crate::session::{GameSession, GameSnapshot, History};
