//! Action outcomes.
//!
//! Rejected actions are ordinary results, not errors: automated players and
//! network peers submit illegal actions routinely, and the state is never
//! touched when that happens.

use thiserror::Error;

use crate::cards::{MerchantCardId, VictoryCardId};
use crate::core::{PlayerId, Spices};
use crate::resolution::FollowUp;

/// Why an action was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("the game has ended")]
    GameEnded,

    #[error("{0} is not seated in this game")]
    UnknownPlayer(PlayerId),

    #[error("it is {current}'s turn, not {actor}'s")]
    NotYourTurn { current: PlayerId, actor: PlayerId },

    #[error("a main action was already taken this turn")]
    ActionAlreadyTaken,

    #[error("a pending choice must be resolved first ({0})")]
    ChoicePending(&'static str),

    #[error("no {0} choice is pending")]
    NoPendingChoice(&'static str),

    #[error("no card at position {index} (only {len})")]
    InvalidCardIndex { index: usize, len: usize },

    #[error("card {0} is not in the catalog")]
    UnknownCard(MerchantCardId),

    #[error("victory card {0} is not in the catalog")]
    UnknownVictoryCard(VictoryCardId),

    #[error("card {0} cannot be played with the spices held")]
    CannotPlayCard(MerchantCardId),

    #[error("need {needed} yellow to take that card, have {held}")]
    NotEnoughYellow { needed: u32, held: u32 },

    #[error("cannot afford victory card {card}: costs {cost}, have {held}")]
    CannotAfford {
        card: VictoryCardId,
        cost: Spices,
        held: Spices,
    },

    #[error("no played cards to recover")]
    NothingToRecover,

    #[error("invalid upgrade: {0}")]
    InvalidUpgrade(String),

    #[error("upgrade uses {used} levels, only {budget} available")]
    UpgradeOverBudget { used: u32, budget: u32 },

    #[error("an upgrade is possible, the plan cannot be empty")]
    EmptyUpgradePlan,

    #[error("cannot trade {requested} times (max {max})")]
    InvalidTradeMultiplier { requested: u32, max: u32 },

    #[error("must discard exactly {excess} spices, got {discarded}")]
    DiscardMismatch { discarded: u32, excess: u32 },

    #[error("cannot discard {discarded}, only {held} held")]
    DiscardNotHeld { discarded: Spices, held: Spices },

    #[error("a discard obligation cannot be cancelled")]
    CannotCancelDiscard,

    #[error("nothing to undo")]
    NothingToUndo,
}

/// Outcome of one submitted action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionResult {
    /// Whether the action was applied.
    pub success: bool,

    /// Human-readable summary.
    pub message: String,

    /// The player now holds more spices than the limit.
    pub needs_discard: bool,

    /// What the player must do before the turn can end.
    pub follow_up: Option<FollowUp>,

    /// Reason for a refusal.
    pub violation: Option<RuleViolation>,
}

impl ActionResult {
    /// Applied, nothing further required.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            needs_discard: false,
            follow_up: None,
            violation: None,
        }
    }

    /// Applied, with a choice still to make.
    #[must_use]
    pub fn with_follow_up(mut self, follow_up: FollowUp) -> Self {
        self.needs_discard = matches!(follow_up, FollowUp::Discard { .. });
        self.follow_up = Some(follow_up);
        self
    }

    /// Refused. The message is the violation's description.
    #[must_use]
    pub fn rejected(violation: RuleViolation) -> Self {
        Self {
            success: false,
            message: violation.to_string(),
            needs_discard: false,
            follow_up: None,
            violation: Some(violation),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.success
    }
}

impl From<RuleViolation> for ActionResult {
    fn from(violation: RuleViolation) -> Self {
        Self::rejected(violation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_carries_message() {
        let result = ActionResult::rejected(RuleViolation::NotEnoughYellow { needed: 3, held: 1 });

        assert!(!result.success);
        assert_eq!(result.message, "need 3 yellow to take that card, have 1");
        assert!(result.follow_up.is_none());
    }

    #[test]
    fn test_discard_follow_up_sets_flag() {
        let result = ActionResult::ok("gained").with_follow_up(FollowUp::Discard { excess: 2 });
        assert!(result.success);
        assert!(result.needs_discard);

        let trade = ActionResult::ok("trade").with_follow_up(FollowUp::ChooseTrade { max: 2 });
        assert!(!trade.needs_discard);
    }

    #[test]
    fn test_violation_messages() {
        assert_eq!(
            RuleViolation::NotYourTurn {
                current: PlayerId::new(0),
                actor: PlayerId::new(2),
            }
            .to_string(),
            "it is Player 1's turn, not Player 3's"
        );
        assert_eq!(
            RuleViolation::DiscardMismatch { discarded: 1, excess: 2 }.to_string(),
            "must discard exactly 2 spices, got 1"
        );
    }
}
