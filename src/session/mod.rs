//! Session facade: one explicit object per game.
//!
//! - `GameSession`: setup, actions, queries, replay
//! - `GameSnapshot`: full-state export and validated import
//! - `History`: bounded undo

pub mod game;
pub mod history;
pub mod snapshot;

pub use game::GameSession;
pub use history::{History, HISTORY_CAPACITY};
pub use snapshot::{GameSnapshot, SNAPSHOT_VERSION};
