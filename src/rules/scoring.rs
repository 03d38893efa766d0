//! Final scoring.
//!
//! A player's score is the sum of:
//! - points printed on claimed victory cards
//! - coin values (gold 3, silver 1 by default)
//! - one point per spice that is not yellow

use serde::{Deserialize, Serialize};

use crate::cards::{Catalog, Coin};
use crate::core::{CoinValues, PlayerId, PlayerMap};
use crate::players::Player;

/// Itemized final score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub victory_points: u32,
    pub gold_coins: u32,
    pub silver_coins: u32,
    pub coin_points: u32,
    pub spice_points: u32,
}

impl ScoreBreakdown {
    #[must_use]
    pub fn compute(player: &Player, catalog: &Catalog, coin_values: CoinValues) -> Self {
        let victory_points = player
            .victory_cards()
            .iter()
            .filter_map(|&id| catalog.victory(id))
            .map(|card| card.points)
            .sum();
        let gold_coins = player.coin_count(Coin::Gold) as u32;
        let silver_coins = player.coin_count(Coin::Silver) as u32;

        Self {
            victory_points,
            gold_coins,
            silver_coins,
            coin_points: gold_coins * coin_values.gold + silver_coins * coin_values.silver,
            spice_points: player.spices().non_yellow(),
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.victory_points + self.coin_points + self.spice_points
    }
}

/// Final score of one player.
#[must_use]
pub fn calculate_final_score(player: &Player, catalog: &Catalog, coin_values: CoinValues) -> u32 {
    ScoreBreakdown::compute(player, catalog, coin_values).total()
}

/// Highest score wins. Ties go to the player who triggered the final round
/// if they are among the tied, otherwise to the lowest seat.
#[must_use]
pub fn pick_winner(scores: &PlayerMap<u32>, trigger: Option<PlayerId>) -> PlayerId {
    let best = scores.values().copied().max().unwrap_or(0);
    if let Some(trigger) = trigger {
        if scores.get(trigger) == Some(&best) {
            return trigger;
        }
    }
    scores
        .iter()
        .find(|&(_, score)| *score == best)
        .map_or(PlayerId::new(0), |(seat, _)| seat)
}
