//! Game state.
//!
//! ## GameState
//!
//! Complete replicated state of one session:
//! - Every seat's spices, cards and coins
//! - Current player, turn number and turn phase
//! - Both market rows and their draw piles
//! - Final round trigger, end flag and winner
//! - RNG state and the ordered action log
//!
//! Uses `im` persistent data structures, so cloning a state for undo or a
//! snapshot is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionRecord};
use super::config::GameConfig;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRngState;
use crate::cards::{STARTER_GAIN, STARTER_UPGRADE};
use crate::market::Market;
use crate::players::Player;
use crate::resolution::TurnPhase;

/// Coarse lifecycle of a session, derived from the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStage {
    /// Market not dealt yet.
    Setup,
    /// Normal play.
    InProgress,
    /// Someone reached the victory threshold; the round is finishing.
    FinalRound,
    /// Scores are final.
    Ended,
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Per-seat holdings.
    pub players: PlayerMap<Player>,

    /// Seat whose turn it is.
    pub current_player: PlayerId,

    /// Turn number (starts at 1, increments when play wraps to seat 0).
    pub turn: u32,

    /// Action sequence within the turn.
    pub action_sequence: u32,

    /// Victory cards that trigger the final round.
    pub victory_cards_needed: usize,

    pub market: Market,

    /// Seat that triggered the final round, if any.
    pub final_round_trigger: Option<PlayerId>,

    pub game_ended: bool,

    pub winner: Option<PlayerId>,

    /// Pending choice for the current player.
    pub phase: TurnPhase,

    /// RNG the decks were shuffled with.
    pub rng: GameRngState,

    /// Every accepted action, in order.
    pub action_log: Vector<ActionRecord>,
}

impl GameState {
    /// Seat every player with the starter cards and their starting spices.
    ///
    /// ## Defaults
    ///
    /// - `current_player`: Player 1 (seat 0)
    /// - `turn`: 1
    /// - `phase`: `AwaitingAction`
    #[must_use]
    pub fn new(config: &GameConfig, market: Market, rng: GameRngState) -> Self {
        let players = PlayerMap::new(config.player_count, |seat| {
            Player::new([STARTER_UPGRADE, STARTER_GAIN], config.starting_spices(seat))
        });

        Self {
            players,
            current_player: PlayerId::new(0),
            turn: 1,
            action_sequence: 0,
            victory_cards_needed: config.victory_cards_needed(),
            market,
            final_round_trigger: None,
            game_ended: false,
            winner: None,
            phase: TurnPhase::AwaitingAction,
            rng,
            action_log: Vector::new(),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count())
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&Player> {
        self.players.get(player)
    }

    #[must_use]
    pub fn current(&self) -> &Player {
        &self.players[self.current_player]
    }

    pub fn current_mut(&mut self) -> &mut Player {
        &mut self.players[self.current_player]
    }

    #[must_use]
    pub fn is_final_round(&self) -> bool {
        self.final_round_trigger.is_some()
    }

    #[must_use]
    pub fn stage(&self) -> GameStage {
        if self.game_ended {
            GameStage::Ended
        } else if self.final_round_trigger.is_some() {
            GameStage::FinalRound
        } else if self.action_log.is_empty()
            && self.market.merchant_row().is_empty()
            && self.market.victory_row().is_empty()
        {
            GameStage::Setup
        } else {
            GameStage::InProgress
        }
    }

    // === Action Log ===

    /// Append an accepted action to the log.
    pub fn record_action(&mut self, player: PlayerId, action: Action) {
        let record = ActionRecord::new(player, action, self.turn, self.action_sequence);
        self.action_sequence += 1;
        self.action_log.push_back(record);
    }

    /// Pass to the next seat, starting a new turn on wrap to seat 0.
    pub fn advance_player(&mut self) {
        self.current_player = self.current_player.next(self.player_count());
        if self.current_player.index() == 0 {
            self.turn += 1;
        }
        self.action_sequence = 0;
        self.phase = TurnPhase::AwaitingAction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Catalog;
    use crate::core::{GameRng, SpiceType, Spices};

    fn state(players: usize) -> GameState {
        let config = GameConfig::new(players, 3);
        let rng = GameRng::new(config.seed);
        let market = Market::initialize_decks(&Catalog::standard(), &rng);
        GameState::new(&config, market, rng.state())
    }

    #[test]
    fn test_new_state() {
        let state = state(3);

        assert_eq!(state.player_count(), 3);
        assert_eq!(state.current_player, PlayerId::new(0));
        assert_eq!(state.turn, 1);
        assert_eq!(state.victory_cards_needed, 6);
        assert_eq!(state.phase, TurnPhase::AwaitingAction);
        assert_eq!(state.stage(), GameStage::Setup);

        assert_eq!(*state.players[PlayerId::new(0)].spices(), Spices::yellow(3));
        assert_eq!(*state.players[PlayerId::new(1)].spices(), Spices::yellow(4));
        assert_eq!(*state.players[PlayerId::new(2)].spices(), Spices::yellow(4));
        for player in state.players.values() {
            assert_eq!(
                player.hand().iter().copied().collect::<Vec<_>>(),
                vec![STARTER_UPGRADE, STARTER_GAIN]
            );
        }
    }

    #[test]
    fn test_advance_wraps_turn() {
        let mut state = state(3);

        state.advance_player();
        assert_eq!(state.current_player, PlayerId::new(1));
        assert_eq!(state.turn, 1);

        state.advance_player();
        state.advance_player();
        assert_eq!(state.current_player, PlayerId::new(0));
        assert_eq!(state.turn, 2);
    }

    #[test]
    fn test_record_action_sequence() {
        let mut state = state(2);
        state.record_action(PlayerId::new(0), Action::Rest);
        state.record_action(PlayerId::new(0), Action::EndTurn);
        state.advance_player();
        state.record_action(PlayerId::new(1), Action::Rest);

        let seqs: Vec<_> = state.action_log.iter().map(|r| (r.turn, r.sequence)).collect();
        assert_eq!(seqs, vec![(1, 0), (1, 1), (1, 0)]);
    }

    #[test]
    fn test_stage_progression() {
        let mut state = state(2);
        state.market.setup_market(6, 5);
        assert_eq!(state.stage(), GameStage::InProgress);

        state.final_round_trigger = Some(PlayerId::new(1));
        assert_eq!(state.stage(), GameStage::FinalRound);

        state.game_ended = true;
        assert_eq!(state.stage(), GameStage::Ended);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = state(2);
        let mut copy = original.clone();
        copy.current_mut().add_bundle(&Spices::brown(2));

        assert_ne!(original, copy);
        assert_eq!(original.current().spice(SpiceType::Brown), 0);
    }
}
