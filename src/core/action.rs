//! Player actions and the action log.
//!
//! Every state change in a session is one `Action` taken by one player.
//! Main actions (play, acquire, claim, rest) start a turn's work; resolution
//! actions answer a pending choice; `EndTurn` passes to the next seat.
//!
//! ## Example
//!
//! ```
//! use spice_road::core::{Action, ActionRecord, PlayerId};
//!
//! let play = Action::PlayMerchantCard { index: 1 };
//! assert!(play.is_main());
//!
//! let record = ActionRecord::new(PlayerId::new(0), play, 1, 0);
//! assert_eq!(record.turn, 1);
//! ```

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::spice::Spices;
use crate::resolution::UpgradePlan;

/// A complete game action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play the merchant card at a hand position.
    PlayMerchantCard { index: usize },

    /// Buy the merchant card at a market slot.
    AcquireMerchantCard { index: usize },

    /// Buy the victory card at a market slot.
    ClaimVictoryCard { index: usize },

    /// Return all played cards to hand.
    Rest,

    /// Answer a pending upgrade choice.
    ResolveUpgrade(UpgradePlan),

    /// Answer a pending trade choice.
    ResolveTrade { multiplier: u32 },

    /// Return spices above the limit.
    DiscardSpices(Spices),

    /// Abandon a pending upgrade or trade choice.
    CancelPending,

    /// Pass to the next seat.
    EndTurn,
}

impl Action {
    /// Whether this is one of the four main actions.
    #[must_use]
    pub fn is_main(&self) -> bool {
        matches!(
            self,
            Action::PlayMerchantCard { .. }
                | Action::AcquireMerchantCard { .. }
                | Action::ClaimVictoryCard { .. }
                | Action::Rest
        )
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::PlayMerchantCard { index } => write!(f, "play card {index}"),
            Action::AcquireMerchantCard { index } => write!(f, "acquire merchant {index}"),
            Action::ClaimVictoryCard { index } => write!(f, "claim victory {index}"),
            Action::Rest => f.write_str("rest"),
            Action::ResolveUpgrade(plan) => {
                f.write_str("upgrade")?;
                if plan.is_empty() {
                    return f.write_str(" nothing");
                }
                for step in plan.steps() {
                    write!(f, " [{step}]")?;
                }
                Ok(())
            }
            Action::ResolveTrade { multiplier } => write!(f, "trade x{multiplier}"),
            Action::DiscardSpices(bundle) => write!(f, "discard {bundle}"),
            Action::CancelPending => f.write_str("cancel"),
            Action::EndTurn => f.write_str("end turn"),
        }
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for:
/// - Replaying a session on another peer
/// - Debugging divergent states
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
