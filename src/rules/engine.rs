//! The seam between a session and the rules it plays by.
//!
//! `GameSession` reaches the rules only through `RulesEngine`.

use crate::core::{Action, GameConfig, GameState, PlayerId};

use super::result::{ActionResult, RuleViolation};

/// Outcome of a finished game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub winner: PlayerId,
    /// Final score of every seat, by seat index.
    pub scores: Vec<u32>,
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }

    #[must_use]
    pub fn score(&self, player: PlayerId) -> Option<u32> {
        self.scores.get(player.index()).copied()
    }
}

/// Legal moves, validation and state transitions for one ruleset.
///
/// Implementations must be deterministic: the same state and action give
/// the same outcome on every peer. A refused action leaves the state as it
/// was.
pub trait RulesEngine {
    fn config(&self) -> &GameConfig;

    /// Every concrete action the player may submit now. Empty when it is
    /// not their turn or the game is over.
    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action>;

    /// Check an action without applying it.
    fn validate_action(
        &self,
        state: &GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<(), RuleViolation>;

    /// Apply an action, or report why it was refused.
    fn apply_action(&self, state: &mut GameState, player: PlayerId, action: &Action)
        -> ActionResult;

    /// Final result, once the game has ended.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    fn is_legal(&self, state: &GameState, player: PlayerId, action: &Action) -> bool {
        self.validate_action(state, player, action).is_ok()
    }
}
