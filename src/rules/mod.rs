//! Rules engine: validation, execution, turn flow and scoring.
//!
//! `RulesEngine` is the seam the session drives; `SpiceRoadRules` is the
//! implementation for this game. Rule violations are reported through
//! `ActionResult`, never as `Err` or a panic.

pub mod engine;
pub mod result;
pub mod scoring;
pub mod spice_road;

pub use engine::{GameResult, RulesEngine};
pub use result::{ActionResult, RuleViolation};
pub use scoring::{calculate_final_score, pick_winner, ScoreBreakdown};
pub use spice_road::SpiceRoadRules;
