//! Game session facade.
//!
//! A `GameSession` owns one game: the rules, the current state and the undo
//! history. There is no global state; callers (a UI, an automated player, a
//! network peer) hold the session and submit actions to it.
//!
//! ```
//! use spice_road::session::GameSession;
//! use spice_road::core::PlayerId;
//!
//! let mut session = GameSession::setup_game(2, 7).unwrap();
//! assert_eq!(session.current_player(), PlayerId::new(0));
//!
//! // Acquire the free merchant card, then pass.
//! assert!(session.acquire_merchant_card(0).success);
//! assert!(session.next_turn().success);
//! assert_eq!(session.current_player(), PlayerId::new(1));
//! ```

use std::sync::Arc;

use log::{debug, info};

use crate::cards::Catalog;
use crate::core::{
    Action, ActionRecord, GameConfig, GameStage, GameState, PlayerId, ReplayError, SetupError,
    SnapshotError, Spices,
};
use crate::players::Player;
use crate::resolution::{TurnPhase, UpgradePlan, UpgradeStep};
use crate::rules::{ActionResult, GameResult, RuleViolation, RulesEngine, ScoreBreakdown, SpiceRoadRules};

use super::history::History;
use super::snapshot::GameSnapshot;

/// One running game.
#[derive(Clone, Debug)]
pub struct GameSession {
    rules: SpiceRoadRules,
    state: GameState,
    history: History,
}

impl GameSession {
    /// Standard game for `player_count` seats.
    pub fn setup_game(player_count: usize, seed: u64) -> Result<Self, SetupError> {
        Self::new(GameConfig::new(player_count, seed))
    }

    /// Game with the standard catalog.
    pub fn new(config: GameConfig) -> Result<Self, SetupError> {
        Self::with_catalog(config, Arc::new(Catalog::standard()))
    }

    /// Game with a custom catalog.
    pub fn with_catalog(config: GameConfig, catalog: Arc<Catalog>) -> Result<Self, SetupError> {
        let rules = SpiceRoadRules::new(config, catalog)?;
        let state = rules.initial_state();
        Ok(Self {
            rules,
            state,
            history: History::new(),
        })
    }

    /// Join a game from a received snapshot, using the standard catalog.
    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Self, SnapshotError> {
        let catalog = Arc::new(Catalog::standard());
        let rules = SpiceRoadRules::new(snapshot.config.clone(), catalog)
            .map_err(|e| SnapshotError::Inconsistent(e.to_string()))?;
        snapshot.validate(rules.catalog())?;
        Ok(Self {
            rules,
            state: snapshot.state,
            history: History::new(),
        })
    }

    /// Rebuild a game by replaying an action log from the initial state.
    pub fn replay<'a>(
        config: GameConfig,
        records: impl IntoIterator<Item = &'a ActionRecord>,
    ) -> Result<Self, ReplayError> {
        let mut session = Self::new(config)?;
        for (index, record) in records.into_iter().enumerate() {
            let result = session.apply(record.player, &record.action);
            if let Some(violation) = result.violation {
                return Err(ReplayError::Rejected {
                    index,
                    player: record.player,
                    action: record.action.clone(),
                    violation,
                });
            }
        }
        session.history.clear();
        Ok(session)
    }

    // === Accessors ===

    #[must_use]
    pub fn rules(&self) -> &SpiceRoadRules {
        &self.rules
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        self.rules.config()
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        self.rules.catalog()
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for staging positions. Bypasses every rule.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&Player> {
        self.state.player(player)
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player
    }

    #[must_use]
    pub fn phase(&self) -> &TurnPhase {
        &self.state.phase
    }

    #[must_use]
    pub fn stage(&self) -> GameStage {
        self.state.stage()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.game_ended
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.rules.is_terminal(&self.state)
    }

    #[must_use]
    pub fn action_log(&self) -> &im::Vector<ActionRecord> {
        &self.state.action_log
    }

    // === Queries ===

    /// Whether the current player could play the card at `index`.
    #[must_use]
    pub fn can_play_card(&self, index: usize) -> bool {
        self.rules
            .can_play_card(&self.state, self.state.current_player, index)
    }

    /// Whether the current player can pay for victory slot `index`.
    #[must_use]
    pub fn can_afford_victory_card(&self, index: usize) -> bool {
        self.rules
            .can_afford_victory_card(&self.state, self.state.current_player, index)
    }

    /// Every legal action for the current player.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        self.rules.legal_actions(&self.state, self.state.current_player)
    }

    /// Single-step upgrades for a pending upgrade choice.
    #[must_use]
    pub fn upgrade_options(&self) -> Vec<UpgradeStep> {
        self.rules.pending_upgrade_options(&self.state)
    }

    #[must_use]
    pub fn calculate_final_score(&self, player: PlayerId) -> u32 {
        self.rules.calculate_final_score(&self.state, player)
    }

    #[must_use]
    pub fn score_breakdown(&self, player: PlayerId) -> Option<ScoreBreakdown> {
        self.rules.score_breakdown(&self.state, player)
    }

    // === Actions ===

    /// Submit an action. Accepted actions are checkpointed for undo.
    pub fn apply(&mut self, player: PlayerId, action: &Action) -> ActionResult {
        let before = self.state.clone();
        let result = self.rules.apply_action(&mut self.state, player, action);
        if result.success {
            self.history.checkpoint(&before);
        }
        result
    }

    fn act(&mut self, action: Action) -> ActionResult {
        let player = self.state.current_player;
        self.apply(player, &action)
    }

    pub fn play_merchant_card(&mut self, index: usize) -> ActionResult {
        self.act(Action::PlayMerchantCard { index })
    }

    pub fn acquire_merchant_card(&mut self, index: usize) -> ActionResult {
        self.act(Action::AcquireMerchantCard { index })
    }

    pub fn claim_victory_card(&mut self, index: usize) -> ActionResult {
        self.act(Action::ClaimVictoryCard { index })
    }

    pub fn rest(&mut self) -> ActionResult {
        self.act(Action::Rest)
    }

    pub fn resolve_upgrade(&mut self, plan: UpgradePlan) -> ActionResult {
        self.act(Action::ResolveUpgrade(plan))
    }

    pub fn resolve_trade(&mut self, multiplier: u32) -> ActionResult {
        self.act(Action::ResolveTrade { multiplier })
    }

    pub fn discard_spices(&mut self, bundle: Spices) -> ActionResult {
        self.act(Action::DiscardSpices(bundle))
    }

    pub fn cancel_pending(&mut self) -> ActionResult {
        self.act(Action::CancelPending)
    }

    /// End the current turn, or end the game if the final round is over.
    pub fn next_turn(&mut self) -> ActionResult {
        self.act(Action::EndTurn)
    }

    // === Snapshots ===

    #[must_use]
    pub fn export_snapshot(&self) -> GameSnapshot {
        GameSnapshot::new(self.config().clone(), self.state.clone())
    }

    /// Replace local state with a validated snapshot.
    ///
    /// The snapshot must be for the same number of players. Undo history is
    /// discarded.
    pub fn import_snapshot(&mut self, snapshot: GameSnapshot) -> Result<(), SnapshotError> {
        let expected = self.config().player_count;
        if snapshot.config.player_count != expected {
            return Err(SnapshotError::PlayerCount {
                found: snapshot.config.player_count,
                expected,
            });
        }
        snapshot.validate(self.rules.catalog())?;

        if snapshot.config != *self.config() {
            self.rules = SpiceRoadRules::new(snapshot.config, self.rules.shared_catalog())
                .map_err(|e| SnapshotError::Inconsistent(e.to_string()))?;
        }
        self.state = snapshot.state;
        self.history.clear();
        info!(
            "imported snapshot at turn {}, {} to play",
            self.state.turn, self.state.current_player
        );
        Ok(())
    }

    // === Undo ===

    /// Save the current state as an undo point.
    pub fn checkpoint(&mut self) {
        self.history.checkpoint(&self.state);
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.state.game_ended && !self.history.is_empty()
    }

    /// Restore the most recent checkpoint.
    pub fn undo(&mut self) -> Result<(), RuleViolation> {
        if self.state.game_ended {
            return Err(RuleViolation::GameEnded);
        }
        match self.history.undo() {
            Some(previous) => {
                debug!(
                    "undo: back to turn {} ({} actions)",
                    previous.turn,
                    previous.action_log.len()
                );
                self.state = previous;
                Ok(())
            }
            None => Err(RuleViolation::NothingToUndo),
        }
    }
}
