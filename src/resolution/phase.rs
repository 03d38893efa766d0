//! Turn phases and follow-up obligations.

use serde::{Deserialize, Serialize};

use crate::cards::MerchantCardId;
use crate::core::Spices;

/// Where the current player is within their turn.
///
/// A turn starts in `AwaitingAction`. A main action either completes the turn
/// (`TurnComplete`) or opens one of the choice phases, which must be resolved
/// before the turn can end.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// No main action taken yet.
    #[default]
    AwaitingAction,

    /// An upgrade card was played; the player picks which cubes to upgrade.
    AwaitingUpgradeChoice {
        /// Hand position of the card being played.
        card_index: usize,
        card: MerchantCardId,
        /// Upgrade levels available.
        levels: u32,
        /// Spices already added by a gain-then-upgrade card.
        gained: Spices,
    },

    /// A trade card was played; the player picks how many times to trade.
    AwaitingTradeChoice {
        card_index: usize,
        card: MerchantCardId,
    },

    /// The player holds more than the limit and must return the excess.
    AwaitingDiscardChoice { excess: u32 },

    /// The main action is fully resolved; only ending the turn remains.
    TurnComplete,
}

impl TurnPhase {
    /// True while a choice blocks the end of the turn.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            TurnPhase::AwaitingUpgradeChoice { .. }
                | TurnPhase::AwaitingTradeChoice { .. }
                | TurnPhase::AwaitingDiscardChoice { .. }
        )
    }

    /// Hand position of the card whose choice is pending.
    #[must_use]
    pub fn pending_card(&self) -> Option<(usize, MerchantCardId)> {
        match self {
            TurnPhase::AwaitingUpgradeChoice { card_index, card, .. }
            | TurnPhase::AwaitingTradeChoice { card_index, card } => Some((*card_index, *card)),
            _ => None,
        }
    }

    /// Short label for logs and messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            TurnPhase::AwaitingAction => "awaiting action",
            TurnPhase::AwaitingUpgradeChoice { .. } => "awaiting upgrade choice",
            TurnPhase::AwaitingTradeChoice { .. } => "awaiting trade choice",
            TurnPhase::AwaitingDiscardChoice { .. } => "awaiting discard choice",
            TurnPhase::TurnComplete => "turn complete",
        }
    }
}

/// What the caller has to do next after an accepted action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowUp {
    /// Submit an upgrade plan using at most `levels` levels.
    ChooseUpgrade { levels: u32 },
    /// Submit a trade multiplier between 1 and `max`.
    ChooseTrade { max: u32 },
    /// Return exactly `excess` spices.
    Discard { excess: u32 },
}
