//! Game configuration.
//!
//! `GameConfig` fixes everything about a session that is decided before the
//! first shuffle: seat count, seed, victory threshold, market sizes, the
//! spice soft limit and coin values. It is serializable so a host can ship it
//! to peers alongside the seed.
//!
//! ```
//! use spice_road::core::GameConfig;
//!
//! let config = GameConfig::builder()
//!     .player_count(4)
//!     .seed(99)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.victory_cards_needed(), 5);
//! assert_eq!(config.merchant_market_size, 6);
//! ```

use serde::{Deserialize, Serialize};

use super::error::SetupError;
use super::spice::Spices;
use super::PlayerId;

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 2;
/// Largest supported table.
pub const MAX_PLAYERS: usize = 5;
/// Soft cap on spices held at the end of a turn.
pub const DEFAULT_SPICE_LIMIT: u32 = 10;
/// Visible merchant cards.
pub const DEFAULT_MERCHANT_MARKET_SIZE: usize = 6;
/// Visible victory cards.
pub const DEFAULT_VICTORY_MARKET_SIZE: usize = 5;

/// Point values of the two coin kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinValues {
    pub gold: u32,
    pub silver: u32,
}

impl Default for CoinValues {
    fn default() -> Self {
        Self { gold: 3, silver: 1 }
    }
}

/// Full session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats (2-5).
    pub player_count: usize,

    /// Seed for deck shuffling.
    pub seed: u64,

    /// Victory cards that trigger the final round. `None` uses the table
    /// default (6 for 2-3 players, 5 for 4-5).
    pub victory_threshold: Option<usize>,

    /// Visible merchant market slots.
    pub merchant_market_size: usize,

    /// Visible victory market slots.
    pub victory_market_size: usize,

    /// Spices a player may hold once an action resolves.
    pub spice_limit: u32,

    /// Coin values used at final scoring.
    pub coin_values: CoinValues,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: MIN_PLAYERS,
            seed: 0,
            victory_threshold: None,
            merchant_market_size: DEFAULT_MERCHANT_MARKET_SIZE,
            victory_market_size: DEFAULT_VICTORY_MARKET_SIZE,
            spice_limit: DEFAULT_SPICE_LIMIT,
            coin_values: CoinValues::default(),
        }
    }
}

impl GameConfig {
    /// Default configuration for `player_count` seats.
    #[must_use]
    pub fn new(player_count: usize, seed: u64) -> Self {
        Self {
            player_count,
            seed,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn builder() -> GameConfigBuilder {
        GameConfigBuilder::default()
    }

    /// Victory cards needed to trigger the final round.
    #[must_use]
    pub fn victory_cards_needed(&self) -> usize {
        self.victory_threshold
            .unwrap_or(if self.player_count <= 3 { 6 } else { 5 })
    }

    /// Starting spices for a seat.
    ///
    /// Seat 0 gets 3 yellow, seats 1-2 get 4 yellow, seats 3-4 get
    /// 3 yellow and 1 red.
    #[must_use]
    pub fn starting_spices(&self, seat: PlayerId) -> Spices {
        match seat.index() {
            0 => Spices::yellow(3),
            1 | 2 => Spices::yellow(4),
            _ => Spices::new(3, 1, 0, 0),
        }
    }

    /// Check that the configuration describes a playable session.
    pub fn validate(&self) -> Result<(), SetupError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(SetupError::PlayerCount(self.player_count));
        }
        if self.victory_cards_needed() == 0 {
            return Err(SetupError::InvalidConfig(
                "victory threshold must be at least 1".into(),
            ));
        }
        if self.merchant_market_size == 0 || self.victory_market_size == 0 {
            return Err(SetupError::InvalidConfig(format!(
                "market sizes too small: merchant {}, victory {}",
                self.merchant_market_size, self.victory_market_size
            )));
        }
        Ok(())
    }
}

/// Builder for [`GameConfig`].
#[derive(Clone, Debug, Default)]
pub struct GameConfigBuilder {
    config: GameConfig,
}

impl GameConfigBuilder {
    #[must_use]
    pub fn player_count(mut self, count: usize) -> Self {
        self.config.player_count = count;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Override the victory threshold (e.g. 1 for a quick test game).
    #[must_use]
    pub fn victory_cards_needed(mut self, needed: usize) -> Self {
        self.config.victory_threshold = Some(needed);
        self
    }

    #[must_use]
    pub fn market_sizes(mut self, merchant: usize, victory: usize) -> Self {
        self.config.merchant_market_size = merchant;
        self.config.victory_market_size = victory;
        self
    }

    #[must_use]
    pub fn spice_limit(mut self, limit: u32) -> Self {
        self.config.spice_limit = limit;
        self
    }

    #[must_use]
    pub fn coin_values(mut self, gold: u32, silver: u32) -> Self {
        self.config.coin_values = CoinValues { gold, silver };
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<GameConfig, SetupError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
