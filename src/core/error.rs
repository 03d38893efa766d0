//! Fatal setup, snapshot and replay errors.
//!
//! Rule violations during play are not errors: they are reported through
//! `ActionResult` (see `rules::RuleViolation`). The types here cover the
//! cases where the engine refuses to run at all.

use thiserror::Error;

use super::action::Action;
use super::player::PlayerId;
use crate::cards::{MerchantCardId, VictoryCardId};
use crate::rules::RuleViolation;

/// The engine cannot start a session.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("unsupported player count {0} (expected 2-5)")]
    PlayerCount(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{kind} catalog not loaded")]
    EmptyCatalog { kind: &'static str },

    #[error("{kind} catalog has {found} cards, market needs at least {needed}")]
    CatalogTooSmall {
        kind: &'static str,
        found: usize,
        needed: usize,
    },

    #[error("duplicate merchant card {0}")]
    DuplicateMerchant(MerchantCardId),

    #[error("duplicate victory card {0}")]
    DuplicateVictory(VictoryCardId),

    #[error("merchant card {0} has an empty effect")]
    EmptyEffect(MerchantCardId),
}

/// A received snapshot cannot be applied.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot could not be decoded: {0}")]
    Decode(#[from] bincode::Error),

    #[error("snapshot version {found} not supported (expected {expected})")]
    Version { found: u32, expected: u32 },

    #[error("snapshot has {found} players, session has {expected}")]
    PlayerCount { found: usize, expected: usize },

    #[error("current player {0} is not seated")]
    CurrentPlayer(u8),

    #[error("unknown merchant card {0}")]
    UnknownMerchant(MerchantCardId),

    #[error("unknown victory card {0}")]
    UnknownVictory(VictoryCardId),

    #[error("inconsistent snapshot: {0}")]
    Inconsistent(String),
}

/// An action log could not be replayed.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("action {index} ({action}) by {player} rejected: {violation}")]
    Rejected {
        index: usize,
        player: PlayerId,
        action: Action,
        violation: RuleViolation,
    },
}
