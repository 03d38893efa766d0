//! Pending-choice resolution.
//!
//! Upgrade and trade cards, and spice overflow, leave the turn waiting on a
//! player choice. This module holds the phase type and the pure checks for
//! each kind of choice; `rules` drives the transitions.
//!
//! - `phase`: `TurnPhase` and `FollowUp`
//! - `upgrade`: upgrade plans and the single-step options for a budget
//! - `trade`: trade multipliers
//! - `discard`: exact-count discard bundles

pub mod discard;
pub mod phase;
pub mod trade;
pub mod upgrade;

pub use discard::{discard_options, validate_discard};
pub use phase::{FollowUp, TurnPhase};
pub use trade::{apply_trade, max_trades};
pub use upgrade::{upgrade_options, UpgradePlan, UpgradeStep};
