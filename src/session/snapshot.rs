//! Full-state snapshots.
//!
//! A snapshot is the whole replicated state plus the configuration it was
//! created under. Peers exchange snapshots to resynchronize; the encoding is
//! `bincode`, and every received snapshot is checked against the catalog
//! before it replaces local state.
//!
//! ```
//! use spice_road::session::{GameSession, GameSnapshot};
//!
//! let session = GameSession::setup_game(3, 42).unwrap();
//! let bytes = session.export_snapshot().to_bytes().unwrap();
//!
//! let received = GameSnapshot::from_bytes(&bytes).unwrap();
//! assert!(received.validate(session.catalog()).is_ok());
//! assert_eq!(received.state, *session.state());
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{Catalog, Coin, MerchantCardId, MerchantEffect, VictoryCardId};
use crate::core::{GameConfig, GameRng, GameState, SnapshotError, Spices};
use crate::market::Market;
use crate::resolution::TurnPhase;

/// Current snapshot format.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable copy of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub version: u32,
    pub config: GameConfig,
    pub state: GameState,
}

impl GameSnapshot {
    #[must_use]
    pub fn new(config: GameConfig, state: GameState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            config,
            state,
        }
    }

    /// Encode for the wire.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from the wire. Only the format version is checked here; call
    /// [`validate`](Self::validate) before trusting the contents.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }

    /// Check the snapshot describes a reachable position for `catalog`.
    ///
    /// Every card must be known and accounted for exactly once: each market
    /// card sits in one pile, row, hand or discard pile, and every seat owns
    /// one copy of each starter card.
    pub fn validate(&self, catalog: &Catalog) -> Result<(), SnapshotError> {
        let state = &self.state;
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        if state.player_count() != self.config.player_count {
            return Err(SnapshotError::PlayerCount {
                found: state.player_count(),
                expected: self.config.player_count,
            });
        }
        if !state.players.contains(state.current_player) {
            return Err(SnapshotError::CurrentPlayer(state.current_player.0));
        }
        for seat in [state.final_round_trigger, state.winner].into_iter().flatten() {
            if !state.players.contains(seat) {
                return Err(SnapshotError::Inconsistent(format!("{seat} is not seated")));
            }
        }
        if state.game_ended != state.winner.is_some() {
            return Err(SnapshotError::Inconsistent(
                "game end flag and winner disagree".into(),
            ));
        }

        self.check_merchant_cards(catalog)?;
        self.check_victory_cards(catalog)?;
        self.check_coins()?;
        self.check_phase(catalog)?;
        self.check_deal(catalog)
    }

    /// Gold sits on victory slot 0 and Silver on slot 1, nowhere else.
    fn check_coins(&self) -> Result<(), SnapshotError> {
        for (slot, placed) in self.state.market.victory_row().iter().enumerate() {
            if placed.coin != Coin::for_slot(slot) {
                return Err(SnapshotError::Inconsistent(format!(
                    "victory slot {slot} carries {:?}",
                    placed.coin
                )));
            }
        }
        Ok(())
    }

    /// The pending choice must be one the current position can resolve.
    fn check_phase(&self, catalog: &Catalog) -> Result<(), SnapshotError> {
        let state = &self.state;
        if let Some((index, card)) = state.phase.pending_card() {
            if state.current().hand_card(index) != Some(card) {
                return Err(SnapshotError::Inconsistent(format!(
                    "pending card {card} is not at hand position {index}"
                )));
            }
        }

        let mismatch = |what: String| -> Result<(), SnapshotError> {
            Err(SnapshotError::Inconsistent(what))
        };
        match &state.phase {
            TurnPhase::AwaitingAction | TurnPhase::TurnComplete => Ok(()),
            TurnPhase::AwaitingDiscardChoice { excess } => {
                let held = state.current().excess_over(self.config.spice_limit);
                if *excess == 0 || *excess != held {
                    return mismatch(format!("discard of {excess} pending, {held} over the limit"));
                }
                Ok(())
            }
            TurnPhase::AwaitingUpgradeChoice {
                card,
                levels,
                gained,
                ..
            } => {
                let effect = catalog
                    .merchant(*card)
                    .map(|definition| &definition.effect)
                    .ok_or(SnapshotError::UnknownMerchant(*card))?;
                let (expected_levels, expected_gain) = match effect {
                    MerchantEffect::Upgrade { levels } => (*levels, Spices::EMPTY),
                    MerchantEffect::GainUpgrade { gain, levels } => (*levels, *gain),
                    other => {
                        return mismatch(format!("card {card} ({}) awaits an upgrade", other.kind()))
                    }
                };
                if *levels != expected_levels || *gained != expected_gain {
                    return mismatch(format!(
                        "upgrade of {levels} levels after gaining {gained} does not match card {card}"
                    ));
                }
                Ok(())
            }
            TurnPhase::AwaitingTradeChoice { card, .. } => {
                let effect = catalog
                    .merchant(*card)
                    .map(|definition| &definition.effect)
                    .ok_or(SnapshotError::UnknownMerchant(*card))?;
                if !matches!(effect, MerchantEffect::Trade { .. }) {
                    return mismatch(format!("card {card} ({}) awaits a trade", effect.kind()));
                }
                Ok(())
            }
        }
    }

    /// The seed must be the configured one, and before any action the
    /// market must be exactly what that seed deals.
    fn check_deal(&self, catalog: &Catalog) -> Result<(), SnapshotError> {
        let state = &self.state;
        if state.rng.seed != self.config.seed {
            return Err(SnapshotError::Inconsistent(format!(
                "state seed {} differs from configured seed {}",
                state.rng.seed, self.config.seed
            )));
        }
        if !state.action_log.is_empty() {
            return Ok(());
        }
        let dealt = Market::deal(
            catalog,
            &GameRng::from_state(&state.rng),
            self.config.merchant_market_size,
            self.config.victory_market_size,
        );
        if dealt != state.market {
            return Err(SnapshotError::Inconsistent(
                "opening market does not match the seed".into(),
            ));
        }
        Ok(())
    }

    fn check_merchant_cards(&self, catalog: &Catalog) -> Result<(), SnapshotError> {
        let state = &self.state;
        let market = &state.market;
        let mut seen: FxHashMap<MerchantCardId, usize> = FxHashMap::default();

        let held = state
            .players
            .values()
            .flat_map(|p| p.hand().iter().chain(p.discard_pile().iter()));
        let listed = market
            .merchant_pile()
            .iter()
            .chain(market.merchant_row().iter().map(|slot| &slot.card))
            .chain(held);
        for &card in listed {
            if catalog.merchant(card).is_none() {
                return Err(SnapshotError::UnknownMerchant(card));
            }
            *seen.entry(card).or_default() += 1;
        }

        for card in catalog.merchant_cards() {
            expect_count(card.id, seen.remove(&card.id).unwrap_or(0), 1)?;
        }
        for card in catalog.starter_cards() {
            expect_count(
                card.id,
                seen.remove(&card.id).unwrap_or(0),
                state.player_count(),
            )?;
        }
        Ok(())
    }

    fn check_victory_cards(&self, catalog: &Catalog) -> Result<(), SnapshotError> {
        let state = &self.state;
        let market = &state.market;
        let mut seen: FxHashMap<VictoryCardId, usize> = FxHashMap::default();

        let claimed = state.players.values().flat_map(|p| p.victory_cards().iter());
        let listed = market
            .victory_pile()
            .iter()
            .chain(market.victory_row().iter().map(|slot| &slot.card))
            .chain(claimed);
        for &card in listed {
            if catalog.victory(card).is_none() {
                return Err(SnapshotError::UnknownVictory(card));
            }
            *seen.entry(card).or_default() += 1;
        }

        for card in catalog.victory_cards() {
            expect_count(card.id, seen.get(&card.id).copied().unwrap_or(0), 1)?;
        }
        Ok(())
    }
}

fn expect_count(
    card: impl std::fmt::Display,
    found: usize,
    expected: usize,
) -> Result<(), SnapshotError> {
    if found == expected {
        Ok(())
    } else {
        Err(SnapshotError::Inconsistent(format!(
            "card {card} appears {found} times, expected {expected}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{STARTER_GAIN, STARTER_UPGRADE};
    use crate::core::PlayerId;
    use crate::session::GameSession;

    fn snapshot() -> (GameSession, GameSnapshot) {
        let session = GameSession::setup_game(3, 8).unwrap();
        let snapshot = session.export_snapshot();
        (session, snapshot)
    }

    #[test]
    fn test_bytes_round_trip() {
        let (session, snapshot) = snapshot();
        let bytes = snapshot.to_bytes().unwrap();
        let decoded = GameSnapshot::from_bytes(&bytes).unwrap();

        assert_eq!(decoded, snapshot);
        assert!(decoded.validate(session.catalog()).is_ok());
    }

    #[test]
    fn test_garbage_bytes() {
        assert!(matches!(
            GameSnapshot::from_bytes(&[1, 2, 3]),
            Err(SnapshotError::Decode(_))
        ));
    }

    #[test]
    fn test_version_mismatch() {
        let (_, mut snapshot) = snapshot();
        snapshot.version = 99;
        let bytes = snapshot.to_bytes().unwrap();

        assert!(matches!(
            GameSnapshot::from_bytes(&bytes),
            Err(SnapshotError::Version { found: 99, expected: 1 })
        ));
    }

    #[test]
    fn test_unknown_card() {
        let (session, mut snapshot) = snapshot();
        snapshot.state.players[PlayerId::new(1)].add_to_hand(MerchantCardId(999));

        assert!(matches!(
            snapshot.validate(session.catalog()),
            Err(SnapshotError::UnknownMerchant(MerchantCardId(999)))
        ));
    }

    #[test]
    fn test_duplicated_card() {
        let (session, mut snapshot) = snapshot();
        let card = snapshot.state.market.merchant_row()[0].card;
        snapshot.state.players[PlayerId::new(0)].add_to_hand(card);

        assert!(matches!(
            snapshot.validate(session.catalog()),
            Err(SnapshotError::Inconsistent(_))
        ));
    }

    #[test]
    fn test_extra_starter() {
        let (session, mut snapshot) = snapshot();
        snapshot.state.players[PlayerId::new(2)].add_to_hand(STARTER_GAIN);

        assert!(snapshot.validate(session.catalog()).is_err());
    }

    #[test]
    fn test_player_count_mismatch() {
        let (session, mut snapshot) = snapshot();
        snapshot.config.player_count = 4;

        assert!(matches!(
            snapshot.validate(session.catalog()),
            Err(SnapshotError::PlayerCount { found: 3, expected: 4 })
        ));
    }

    #[test]
    fn test_current_player_out_of_range() {
        let (session, mut snapshot) = snapshot();
        snapshot.state.current_player = PlayerId::new(7);

        assert!(matches!(
            snapshot.validate(session.catalog()),
            Err(SnapshotError::CurrentPlayer(7))
        ));
    }

    #[test]
    fn test_pending_card_must_be_in_hand() {
        let (session, mut snapshot) = snapshot();
        snapshot.state.phase = TurnPhase::AwaitingTradeChoice {
            card_index: 5,
            card: MerchantCardId(3),
        };

        assert!(snapshot.validate(session.catalog()).is_err());
    }

    #[test]
    fn test_discard_must_match_excess() {
        let (session, mut snapshot) = snapshot();
        snapshot.state.phase = TurnPhase::AwaitingDiscardChoice { excess: 50 };
        assert!(matches!(
            snapshot.validate(session.catalog()),
            Err(SnapshotError::Inconsistent(_))
        ));

        // Seat 0 holds 3 yellow; 12 more puts it 5 over the limit.
        snapshot.state.players[PlayerId::new(0)].add_bundle(&Spices::yellow(12));
        snapshot.state.phase = TurnPhase::AwaitingDiscardChoice { excess: 5 };
        assert!(snapshot.validate(session.catalog()).is_ok());
    }

    #[test]
    fn test_pending_phase_must_match_card() {
        let (session, mut snapshot) = snapshot();
        let hand = snapshot.state.players[PlayerId::new(0)].hand().clone();
        let upgrade_at = hand.iter().position(|&c| c == STARTER_UPGRADE).unwrap();
        let gain_at = hand.iter().position(|&c| c == STARTER_GAIN).unwrap();

        let upgrade = |levels| TurnPhase::AwaitingUpgradeChoice {
            card_index: upgrade_at,
            card: STARTER_UPGRADE,
            levels,
            gained: Spices::EMPTY,
        };
        snapshot.state.phase = upgrade(2);
        assert!(snapshot.validate(session.catalog()).is_ok());

        snapshot.state.phase = upgrade(3);
        assert!(snapshot.validate(session.catalog()).is_err());

        snapshot.state.phase = TurnPhase::AwaitingTradeChoice {
            card_index: gain_at,
            card: STARTER_GAIN,
        };
        assert!(snapshot.validate(session.catalog()).is_err());
    }

    #[test]
    fn test_coins_stay_on_first_slots() {
        let (session, mut snapshot) = snapshot();
        let mut market = serde_json::to_value(&snapshot.state.market).unwrap();
        market["victory_row"][0]["coin"] = serde_json::Value::Null;
        market["victory_row"][3]["coin"] = serde_json::json!("Gold");
        snapshot.state.market = serde_json::from_value(market).unwrap();

        assert!(matches!(
            snapshot.validate(session.catalog()),
            Err(SnapshotError::Inconsistent(_))
        ));
    }

    #[test]
    fn test_opening_market_must_match_seed() {
        let (session, mut snapshot) = snapshot();
        let market = &snapshot.state.market;
        let mut victory_row: Vec<VictoryCardId> =
            market.victory_row().iter().map(|slot| slot.card).collect();
        victory_row.rotate_left(1);
        let shifted = Market::from_parts(
            market.merchant_pile().clone(),
            market.victory_pile().clone(),
            market.merchant_row().iter().copied(),
            victory_row,
        );
        snapshot.state.market = shifted;
        assert!(snapshot.validate(session.catalog()).is_err());

        let (_, mut snapshot) = self::snapshot();
        snapshot.state.rng.seed ^= 1;
        assert!(snapshot.validate(session.catalog()).is_err());
    }

    #[test]
    fn test_spices_do_not_affect_validity() {
        let (session, mut snapshot) = snapshot();
        snapshot.state.players[PlayerId::new(0)].add_bundle(&Spices::brown(20));

        assert!(snapshot.validate(session.catalog()).is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let (_, snapshot) = snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: GameSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, snapshot);
    }
}
