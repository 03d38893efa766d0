//! The spice trading rules.
//!
//! ## Turn structure
//!
//! On their turn a player takes exactly one main action:
//! - play a merchant card from hand
//! - acquire a merchant card from the market
//! - claim a victory card from the market
//! - rest (return played cards to hand)
//!
//! Upgrade and trade cards open a choice that must be resolved (or
//! cancelled) before the turn ends. Any action that leaves the player above
//! the spice limit opens a discard choice. `EndTurn` then passes play on.
//!
//! ## End of game
//!
//! Claiming the threshold-th victory card triggers the final round. The game
//! ends when play would return to the triggering player; the highest score
//! wins, ties going to the trigger player and then to the lowest seat.
//!
//! ## Determinism
//!
//! Every action is checked and applied against a copy of the state. The copy
//! replaces the original only if the action is legal, so a refused action
//! never leaves partial changes behind.

use std::sync::Arc;

use log::{debug, info};

use crate::cards::{Catalog, MerchantCardId, MerchantEffect};
use crate::core::{
    Action, GameConfig, GameRng, GameState, PlayerId, PlayerMap, SetupError, SpiceType, Spices,
};
use crate::market::Market;
use crate::players::Player;
use crate::resolution::{
    apply_trade, discard_options, max_trades, upgrade_options, validate_discard, FollowUp,
    TurnPhase, UpgradePlan, UpgradeStep,
};

use super::engine::{GameResult, RulesEngine};
use super::result::{ActionResult, RuleViolation};
use super::scoring::{calculate_final_score, pick_winner, ScoreBreakdown};

/// Rules for one session: the configuration plus the shared card catalog.
#[derive(Clone, Debug)]
pub struct SpiceRoadRules {
    config: GameConfig,
    catalog: Arc<Catalog>,
}

impl SpiceRoadRules {
    /// Validate the configuration and catalog together.
    pub fn new(config: GameConfig, catalog: Arc<Catalog>) -> Result<Self, SetupError> {
        config.validate()?;
        catalog.validate()?;
        catalog.check_market_sizes(config.merchant_market_size, config.victory_market_size)?;
        Ok(Self { config, catalog })
    }

    /// Rules using the standard card catalog.
    pub fn standard(config: GameConfig) -> Result<Self, SetupError> {
        Self::new(config, Arc::new(Catalog::standard()))
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Handle to the catalog for another session.
    #[must_use]
    pub fn shared_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// Shuffle the decks, deal the market and seat the players.
    #[must_use]
    pub fn initial_state(&self) -> GameState {
        let rng = GameRng::new(self.config.seed);
        let market = Market::deal(
            &self.catalog,
            &rng,
            self.config.merchant_market_size,
            self.config.victory_market_size,
        );
        let state = GameState::new(&self.config, market, rng.state());
        info!(
            "new game: {} players, seed {}, {} victory cards to trigger the final round",
            self.config.player_count,
            self.config.seed,
            state.victory_cards_needed
        );
        state
    }

    // === Queries ===

    /// Whether the card at `index` in the player's hand could be played now,
    /// ignoring whose turn it is.
    #[must_use]
    pub fn can_play_card(&self, state: &GameState, player: PlayerId, index: usize) -> bool {
        state
            .player(player)
            .and_then(|p| Some((p, p.hand_card(index)?)))
            .and_then(|(p, id)| Some((p, self.catalog.merchant(id)?)))
            .is_some_and(|(p, card)| card.effect.can_play(p.spices()))
    }

    /// Whether the player holds the cost of victory market slot `index`.
    #[must_use]
    pub fn can_afford_victory_card(&self, state: &GameState, player: PlayerId, index: usize) -> bool {
        let Some(holder) = state.player(player) else {
            return false;
        };
        state
            .market
            .victory_slot(index)
            .and_then(|slot| self.catalog.victory(slot.card))
            .is_some_and(|card| holder.can_afford(&card.cost))
    }

    /// Single-step upgrades open to the current player, if an upgrade
    /// choice is pending.
    #[must_use]
    pub fn pending_upgrade_options(&self, state: &GameState) -> Vec<UpgradeStep> {
        match &state.phase {
            TurnPhase::AwaitingUpgradeChoice { levels, .. } => {
                upgrade_options(state.current().spices(), *levels)
            }
            _ => Vec::new(),
        }
    }

    /// Highest multiplier for a pending trade, or 0 if none is pending.
    #[must_use]
    pub fn pending_trade_max(&self, state: &GameState) -> u32 {
        let TurnPhase::AwaitingTradeChoice { card, .. } = &state.phase else {
            return 0;
        };
        match self.catalog.merchant(*card).map(|c| &c.effect) {
            Some(MerchantEffect::Trade { input, .. }) => max_trades(state.current().spices(), input),
            _ => 0,
        }
    }

    #[must_use]
    pub fn calculate_final_score(&self, state: &GameState, player: PlayerId) -> u32 {
        state.player(player).map_or(0, |p| {
            calculate_final_score(p, &self.catalog, self.config.coin_values)
        })
    }

    #[must_use]
    pub fn score_breakdown(&self, state: &GameState, player: PlayerId) -> Option<ScoreBreakdown> {
        state
            .player(player)
            .map(|p| ScoreBreakdown::compute(p, &self.catalog, self.config.coin_values))
    }

    // === Turn Flow ===

    /// End the current player's turn.
    pub fn next_turn(&self, state: &mut GameState) -> ActionResult {
        let player = state.current_player;
        self.apply_action(state, player, &Action::EndTurn)
    }

    /// Score every player and fix the winner. Does nothing once ended.
    pub fn end_game(&self, state: &mut GameState) {
        if state.game_ended {
            return;
        }
        let view: &GameState = state;
        let scores = PlayerMap::new(view.player_count(), |seat| {
            self.calculate_final_score(view, seat)
        });
        let winner = pick_winner(&scores, view.final_round_trigger);

        state.game_ended = true;
        state.winner = Some(winner);
        state.phase = TurnPhase::TurnComplete;
        info!(
            "game over after turn {}: {winner} wins with {} points",
            state.turn, scores[winner]
        );
    }

    // === Execution ===

    fn execute(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<ActionResult, RuleViolation> {
        if state.game_ended {
            return Err(RuleViolation::GameEnded);
        }
        if !state.players.contains(player) {
            return Err(RuleViolation::UnknownPlayer(player));
        }
        if player != state.current_player {
            return Err(RuleViolation::NotYourTurn {
                current: state.current_player,
                actor: player,
            });
        }
        if action.is_main() {
            match &state.phase {
                TurnPhase::AwaitingAction => {}
                TurnPhase::TurnComplete => return Err(RuleViolation::ActionAlreadyTaken),
                pending => return Err(RuleViolation::ChoicePending(pending.name())),
            }
        }

        state.record_action(player, action.clone());

        match action {
            Action::PlayMerchantCard { index } => self.play_card(state, *index),
            Action::AcquireMerchantCard { index } => self.acquire_merchant(state, *index),
            Action::ClaimVictoryCard { index } => self.claim_victory(state, *index),
            Action::Rest => self.rest(state),
            Action::ResolveUpgrade(plan) => self.resolve_upgrade(state, plan),
            Action::ResolveTrade { multiplier } => self.resolve_trade(state, *multiplier),
            Action::DiscardSpices(bundle) => self.discard(state, bundle),
            Action::CancelPending => self.cancel_pending(state),
            Action::EndTurn => self.end_turn(state),
        }
    }

    fn play_card(&self, state: &mut GameState, index: usize) -> Result<ActionResult, RuleViolation> {
        let player = state.current_player;
        let card_id = state
            .current()
            .hand_card(index)
            .ok_or(RuleViolation::InvalidCardIndex {
                index,
                len: state.current().hand().len(),
            })?;
        let card = self
            .catalog
            .merchant(card_id)
            .ok_or(RuleViolation::UnknownCard(card_id))?;
        if !card.effect.can_play(state.current().spices()) {
            return Err(RuleViolation::CannotPlayCard(card_id));
        }

        match &card.effect {
            MerchantEffect::Gain(gain) => {
                let holder = state.current_mut();
                holder.add_bundle(gain);
                holder.complete_card(index);
                Ok(self.finish(state, format!("{player} played {} and gained {gain}", card.name)))
            }
            MerchantEffect::Upgrade { levels } => {
                state.phase = TurnPhase::AwaitingUpgradeChoice {
                    card_index: index,
                    card: card_id,
                    levels: *levels,
                    gained: Spices::EMPTY,
                };
                Ok(ActionResult::ok(format!("{player} played {}", card.name))
                    .with_follow_up(FollowUp::ChooseUpgrade { levels: *levels }))
            }
            MerchantEffect::Trade { input, .. } => {
                let max = max_trades(state.current().spices(), input);
                state.phase = TurnPhase::AwaitingTradeChoice {
                    card_index: index,
                    card: card_id,
                };
                Ok(ActionResult::ok(format!("{player} played {}", card.name))
                    .with_follow_up(FollowUp::ChooseTrade { max }))
            }
            MerchantEffect::GainUpgrade { gain, levels } => {
                state.current_mut().add_bundle(gain);
                state.phase = TurnPhase::AwaitingUpgradeChoice {
                    card_index: index,
                    card: card_id,
                    levels: *levels,
                    gained: *gain,
                };
                Ok(
                    ActionResult::ok(format!("{player} played {} and gained {gain}", card.name))
                        .with_follow_up(FollowUp::ChooseUpgrade { levels: *levels }),
                )
            }
        }
    }

    fn acquire_merchant(
        &self,
        state: &mut GameState,
        index: usize,
    ) -> Result<ActionResult, RuleViolation> {
        let player = state.current_player;
        let len = state.market.merchant_row().len();
        if index >= len {
            return Err(RuleViolation::InvalidCardIndex { index, len });
        }
        let cost = Market::merchant_cost(index);
        let held = state.current().spice(SpiceType::Yellow);
        if held < cost {
            return Err(RuleViolation::NotEnoughYellow { needed: cost, held });
        }

        state.current_mut().remove_spices(SpiceType::Yellow, cost);
        let taken = state
            .market
            .take_merchant(index)
            .ok_or(RuleViolation::InvalidCardIndex { index, len })?;
        let holder = state.current_mut();
        holder.add_to_hand(taken.card);
        holder.add_bundle(&taken.bonus);

        let name = self
            .catalog
            .merchant(taken.card)
            .map_or_else(|| taken.card.to_string(), |card| card.name.clone());
        let mut message = format!("{player} acquired {name}");
        if cost > 0 {
            message.push_str(&format!(" for {cost} yellow"));
        }
        if !taken.bonus.is_empty() {
            message.push_str(&format!(" and collected {}", taken.bonus));
        }
        Ok(self.finish(state, message))
    }

    fn claim_victory(
        &self,
        state: &mut GameState,
        index: usize,
    ) -> Result<ActionResult, RuleViolation> {
        let player = state.current_player;
        let len = state.market.victory_row().len();
        let slot = *state
            .market
            .victory_slot(index)
            .ok_or(RuleViolation::InvalidCardIndex { index, len })?;
        let card = self
            .catalog
            .victory(slot.card)
            .ok_or(RuleViolation::UnknownVictoryCard(slot.card))?;
        if !state.current().can_afford(&card.cost) {
            return Err(RuleViolation::CannotAfford {
                card: card.id,
                cost: card.cost,
                held: *state.current().spices(),
            });
        }

        state.market.take_victory(index);
        let holder = state.current_mut();
        holder.remove_bundle(&card.cost);
        holder.add_victory_card(card.id);
        if let Some(coin) = slot.coin {
            holder.add_coin(coin);
        }
        holder.add_bundle(&card.bonus_spices);
        let claimed = holder.victory_cards().len();

        let mut message = format!("{player} claimed a {}-point card", card.points);
        if let Some(coin) = slot.coin {
            message.push_str(&format!(" with a {coin:?} coin"));
        }
        if claimed >= state.victory_cards_needed && state.final_round_trigger.is_none() {
            state.final_round_trigger = Some(player);
            info!("{player} claimed {claimed} victory cards, final round triggered");
            message.push_str(", final round triggered");
        }
        Ok(self.finish(state, message))
    }

    fn rest(&self, state: &mut GameState) -> Result<ActionResult, RuleViolation> {
        let player = state.current_player;
        if state.current().discard_pile().is_empty() {
            return Err(RuleViolation::NothingToRecover);
        }
        let recovered = state.current_mut().recover_discards();
        Ok(self.finish(state, format!("{player} rested and recovered {recovered} cards")))
    }

    fn resolve_upgrade(
        &self,
        state: &mut GameState,
        plan: &UpgradePlan,
    ) -> Result<ActionResult, RuleViolation> {
        let TurnPhase::AwaitingUpgradeChoice {
            card_index,
            card,
            levels,
            ..
        } = state.phase.clone()
        else {
            return Err(RuleViolation::NoPendingChoice("upgrade"));
        };
        let stock = *state.current().spices();
        if plan.is_empty() && !upgrade_options(&stock, levels).is_empty() {
            return Err(RuleViolation::EmptyUpgradePlan);
        }
        let after = plan.apply_to(&stock, levels)?;
        self.check_pending_card(state, card_index, card)?;

        let holder = state.current_mut();
        for step in plan.steps() {
            holder.upgrade_spices(step.from, step.to, step.count);
        }
        debug_assert_eq!(*holder.spices(), after);
        holder.complete_card(card_index);

        let player = state.current_player;
        Ok(self.finish(state, format!("{player} upgraded to {after}")))
    }

    fn resolve_trade(
        &self,
        state: &mut GameState,
        multiplier: u32,
    ) -> Result<ActionResult, RuleViolation> {
        let TurnPhase::AwaitingTradeChoice { card_index, card } = state.phase.clone() else {
            return Err(RuleViolation::NoPendingChoice("trade"));
        };
        let definition = self
            .catalog
            .merchant(card)
            .ok_or(RuleViolation::UnknownCard(card))?;
        let MerchantEffect::Trade { input, output } = &definition.effect else {
            return Err(RuleViolation::CannotPlayCard(card));
        };
        let after = apply_trade(state.current().spices(), input, output, multiplier)?;
        self.check_pending_card(state, card_index, card)?;

        let holder = state.current_mut();
        holder.remove_bundle(&input.times(multiplier));
        holder.add_bundle(&output.times(multiplier));
        debug_assert_eq!(*holder.spices(), after);
        holder.complete_card(card_index);

        let player = state.current_player;
        Ok(self.finish(
            state,
            format!("{player} traded {} for {}", input.times(multiplier), output.times(multiplier)),
        ))
    }

    fn discard(&self, state: &mut GameState, bundle: &Spices) -> Result<ActionResult, RuleViolation> {
        let TurnPhase::AwaitingDiscardChoice { excess } = state.phase else {
            return Err(RuleViolation::NoPendingChoice("discard"));
        };
        validate_discard(state.current().spices(), bundle, excess)?;

        state.current_mut().remove_bundle(bundle);
        state.phase = TurnPhase::TurnComplete;
        Ok(ActionResult::ok(format!(
            "{} discarded {bundle}",
            state.current_player
        )))
    }

    fn cancel_pending(&self, state: &mut GameState) -> Result<ActionResult, RuleViolation> {
        match state.phase.clone() {
            TurnPhase::AwaitingUpgradeChoice { gained, .. } => {
                state.current_mut().remove_bundle(&gained);
            }
            TurnPhase::AwaitingTradeChoice { .. } => {}
            TurnPhase::AwaitingDiscardChoice { .. } => {
                return Err(RuleViolation::CannotCancelDiscard);
            }
            TurnPhase::AwaitingAction | TurnPhase::TurnComplete => {
                return Err(RuleViolation::NoPendingChoice("upgrade or trade"));
            }
        }
        state.phase = TurnPhase::AwaitingAction;
        Ok(ActionResult::ok(format!(
            "{} cancelled the card play",
            state.current_player
        )))
    }

    fn end_turn(&self, state: &mut GameState) -> Result<ActionResult, RuleViolation> {
        if state.phase.is_pending() {
            return Err(RuleViolation::ChoicePending(state.phase.name()));
        }
        let next = state.current_player.next(state.player_count());
        if state.final_round_trigger == Some(next) {
            self.end_game(state);
            let winner = state.winner.unwrap_or(next);
            return Ok(ActionResult::ok(format!("game over, {winner} wins")));
        }
        state.advance_player();
        Ok(ActionResult::ok(format!("{} to play", state.current_player)))
    }

    /// The pending card must still sit where it was played.
    fn check_pending_card(
        &self,
        state: &GameState,
        card_index: usize,
        card: MerchantCardId,
    ) -> Result<(), RuleViolation> {
        match state.current().hand_card(card_index) {
            Some(held) if held == card => Ok(()),
            _ => Err(RuleViolation::InvalidCardIndex {
                index: card_index,
                len: state.current().hand().len(),
            }),
        }
    }

    /// Close a main action or choice: open a discard if over the limit.
    fn finish(&self, state: &mut GameState, message: String) -> ActionResult {
        let excess = state.current().excess_over(self.config.spice_limit);
        if excess > 0 {
            state.phase = TurnPhase::AwaitingDiscardChoice { excess };
            ActionResult::ok(message).with_follow_up(FollowUp::Discard { excess })
        } else {
            state.phase = TurnPhase::TurnComplete;
            ActionResult::ok(message)
        }
    }

    fn main_actions(&self, state: &GameState, holder: &Player, out: &mut Vec<Action>) {
        let player = state.current_player;
        out.extend(
            (0..holder.hand().len())
                .filter(|&index| self.can_play_card(state, player, index))
                .map(|index| Action::PlayMerchantCard { index }),
        );
        let yellow = holder.spice(SpiceType::Yellow);
        out.extend(
            (0..state.market.merchant_row().len())
                .filter(|&index| Market::merchant_cost(index) <= yellow)
                .map(|index| Action::AcquireMerchantCard { index }),
        );
        out.extend(
            (0..state.market.victory_row().len())
                .filter(|&index| self.can_afford_victory_card(state, player, index))
                .map(|index| Action::ClaimVictoryCard { index }),
        );
        if !holder.discard_pile().is_empty() {
            out.push(Action::Rest);
        }
    }
}

impl RulesEngine for SpiceRoadRules {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        if state.game_ended || player != state.current_player {
            return Vec::new();
        }
        let holder = state.current();
        let mut actions = Vec::new();

        match &state.phase {
            TurnPhase::AwaitingAction => self.main_actions(state, holder, &mut actions),
            TurnPhase::AwaitingUpgradeChoice { levels, .. } => {
                let options = upgrade_options(holder.spices(), *levels);
                if options.is_empty() {
                    actions.push(Action::ResolveUpgrade(UpgradePlan::empty()));
                }
                actions.extend(
                    options
                        .into_iter()
                        .map(|step| Action::ResolveUpgrade(UpgradePlan::single(step))),
                );
                actions.push(Action::CancelPending);
            }
            TurnPhase::AwaitingTradeChoice { .. } => {
                actions.extend(
                    (1..=self.pending_trade_max(state))
                        .map(|multiplier| Action::ResolveTrade { multiplier }),
                );
                actions.push(Action::CancelPending);
            }
            TurnPhase::AwaitingDiscardChoice { excess } => {
                actions.extend(
                    discard_options(holder.spices(), *excess)
                        .into_iter()
                        .map(Action::DiscardSpices),
                );
            }
            TurnPhase::TurnComplete => actions.push(Action::EndTurn),
        }
        actions
    }

    fn validate_action(
        &self,
        state: &GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<(), RuleViolation> {
        let mut scratch = state.clone();
        self.execute(&mut scratch, player, action).map(|_| ())
    }

    fn apply_action(&self, state: &mut GameState, player: PlayerId, action: &Action) -> ActionResult {
        let mut next = state.clone();
        match self.execute(&mut next, player, action) {
            Ok(result) => {
                debug!("{player}: {action} -> {}", result.message);
                *state = next;
                result
            }
            Err(violation) => {
                debug!("{player}: {action} rejected: {violation}");
                ActionResult::rejected(violation)
            }
        }
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        if !state.game_ended {
            return None;
        }
        Some(GameResult {
            winner: state.winner?,
            scores: state
                .player_ids()
                .map(|seat| self.calculate_final_score(state, seat))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{MerchantCard, VictoryCardId, STARTER_GAIN, STARTER_UPGRADE};
    use crate::market::{DrawPile, MerchantSlot};

    fn rules(players: usize) -> SpiceRoadRules {
        SpiceRoadRules::standard(GameConfig::new(players, 21)).unwrap()
    }

    /// Market with known cards: merchant row of ids 1..=6, victory row of 1..=5.
    fn staged(rules: &SpiceRoadRules) -> GameState {
        let mut state = rules.initial_state();
        state.market = Market::from_parts(
            DrawPile::new((7..=45).map(MerchantCardId)),
            DrawPile::new((6..=37).map(VictoryCardId)),
            (1..=6).map(|id| MerchantSlot {
                card: MerchantCardId(id),
                bonus: Spices::EMPTY,
            }),
            (1..=5).map(VictoryCardId),
        );
        state
    }

    fn hand_index(state: &GameState, card: MerchantCardId) -> usize {
        state.current().hand().iter().position(|&c| c == card).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let rules = rules(3);
        let state = rules.initial_state();

        assert_eq!(state.market.merchant_row().len(), 6);
        assert_eq!(state.market.victory_row().len(), 5);
        assert_eq!(state.current_player, PlayerId::new(0));
        assert_eq!(state.phase, TurnPhase::AwaitingAction);
    }

    #[test]
    fn test_play_gain_completes_card() {
        let rules = rules(2);
        let mut state = rules.initial_state();
        let index = hand_index(&state, STARTER_GAIN);

        let result = rules.apply_action(&mut state, PlayerId::new(0), &Action::PlayMerchantCard { index });

        assert!(result.success, "{}", result.message);
        assert_eq!(*state.current().spices(), Spices::yellow(5));
        assert_eq!(state.current().hand().len(), 1);
        assert_eq!(state.current().discard_pile().len(), 1);
        assert_eq!(state.phase, TurnPhase::TurnComplete);
    }

    #[test]
    fn test_one_main_action_per_turn() {
        let rules = rules(2);
        let mut state = rules.initial_state();
        let index = hand_index(&state, STARTER_GAIN);
        rules.apply_action(&mut state, PlayerId::new(0), &Action::PlayMerchantCard { index });

        let result = rules.apply_action(&mut state, PlayerId::new(0), &Action::AcquireMerchantCard { index: 0 });
        assert_eq!(result.violation, Some(RuleViolation::ActionAlreadyTaken));
    }

    #[test]
    fn test_wrong_player_rejected() {
        let rules = rules(2);
        let mut state = rules.initial_state();
        let before = state.clone();

        let result = rules.apply_action(&mut state, PlayerId::new(1), &Action::Rest);

        assert!(!result.success);
        assert!(matches!(result.violation, Some(RuleViolation::NotYourTurn { .. })));
        assert_eq!(state, before);
    }

    #[test]
    fn test_upgrade_flow() {
        let rules = rules(2);
        let mut state = rules.initial_state();
        let index = hand_index(&state, STARTER_UPGRADE);
        let p0 = PlayerId::new(0);

        let played = rules.apply_action(&mut state, p0, &Action::PlayMerchantCard { index });
        assert_eq!(played.follow_up, Some(FollowUp::ChooseUpgrade { levels: 2 }));

        // Ending the turn is blocked while the choice is pending.
        assert!(!rules.next_turn(&mut state).success);

        let plan = UpgradePlan::single(UpgradeStep::new(SpiceType::Yellow, SpiceType::Green, 1));
        let resolved = rules.apply_action(&mut state, p0, &Action::ResolveUpgrade(plan));

        assert!(resolved.success, "{}", resolved.message);
        assert_eq!(*state.current().spices(), Spices::new(2, 0, 1, 0));
        assert_eq!(state.current().discard_pile().iter().copied().collect::<Vec<_>>(), vec![STARTER_UPGRADE]);
        assert!(rules.next_turn(&mut state).success);
        assert_eq!(state.current_player, PlayerId::new(1));
    }

    #[test]
    fn test_empty_upgrade_plan_rejected_when_options_exist() {
        let rules = rules(2);
        let mut state = rules.initial_state();
        let index = hand_index(&state, STARTER_UPGRADE);
        let p0 = PlayerId::new(0);
        rules.apply_action(&mut state, p0, &Action::PlayMerchantCard { index });

        let result = rules.apply_action(&mut state, p0, &Action::ResolveUpgrade(UpgradePlan::empty()));
        assert_eq!(result.violation, Some(RuleViolation::EmptyUpgradePlan));
    }

    #[test]
    fn test_cancel_upgrade_keeps_card() {
        let rules = rules(2);
        let mut state = rules.initial_state();
        let index = hand_index(&state, STARTER_UPGRADE);
        let p0 = PlayerId::new(0);
        rules.apply_action(&mut state, p0, &Action::PlayMerchantCard { index });

        assert!(rules.apply_action(&mut state, p0, &Action::CancelPending).success);
        assert_eq!(state.phase, TurnPhase::AwaitingAction);
        assert_eq!(state.current().hand().len(), 2);
        assert_eq!(*state.current().spices(), Spices::yellow(3));
    }

    #[test]
    fn test_cancel_gain_upgrade_reverts_gain() {
        let standard = Catalog::standard();
        let mut merchants = standard.merchant_cards().to_vec();
        merchants.push(MerchantCard::gain_upgrade(46, Spices::yellow(1), 1));
        let catalog = Catalog::new(
            merchants,
            standard.victory_cards().to_vec(),
            standard.starter_cards().to_vec(),
        );
        let rules = SpiceRoadRules::new(GameConfig::new(2, 21), Arc::new(catalog)).unwrap();
        let mut state = rules.initial_state();
        state.current_mut().add_to_hand(MerchantCardId(46));
        let p0 = PlayerId::new(0);

        let played = rules.apply_action(&mut state, p0, &Action::PlayMerchantCard { index: 2 });
        assert_eq!(played.follow_up, Some(FollowUp::ChooseUpgrade { levels: 1 }));
        assert_eq!(*state.current().spices(), Spices::yellow(4));

        assert!(rules.apply_action(&mut state, p0, &Action::CancelPending).success);
        assert_eq!(*state.current().spices(), Spices::yellow(3));
        assert_eq!(state.current().hand().len(), 3);
    }

    #[test]
    fn test_acquire_costs_position_and_leaves_bonus() {
        let rules = rules(2);
        let mut state = staged(&rules);
        let p0 = PlayerId::new(0);

        let result = rules.apply_action(&mut state, p0, &Action::AcquireMerchantCard { index: 2 });

        assert!(result.success, "{}", result.message);
        assert_eq!(state.current().spice(SpiceType::Yellow), 1);
        assert_eq!(state.current().hand().last().copied(), Some(MerchantCardId(3)));
        assert_eq!(state.market.merchant_row()[0].bonus, Spices::yellow(1));
        assert_eq!(state.market.merchant_row()[1].bonus, Spices::yellow(1));
        assert_eq!(state.market.merchant_row()[2].bonus, Spices::EMPTY);
    }

    #[test]
    fn test_acquire_needs_yellow() {
        let rules = rules(2);
        let mut state = staged(&rules);

        let result = rules.apply_action(&mut state, PlayerId::new(0), &Action::AcquireMerchantCard { index: 5 });
        assert_eq!(
            result.violation,
            Some(RuleViolation::NotEnoughYellow { needed: 5, held: 3 })
        );
    }

    #[test]
    fn test_rest_requires_discards() {
        let rules = rules(2);
        let mut state = rules.initial_state();

        let result = rules.apply_action(&mut state, PlayerId::new(0), &Action::Rest);
        assert_eq!(result.violation, Some(RuleViolation::NothingToRecover));
    }

    #[test]
    fn test_legal_actions_start_of_game() {
        let rules = rules(2);
        let state = staged(&rules);
        let actions = rules.legal_actions(&state, PlayerId::new(0));

        // Both starters are playable; merchant slots 0..=3 cost at most 3 yellow.
        assert!(actions.contains(&Action::PlayMerchantCard { index: 0 }));
        assert!(actions.contains(&Action::PlayMerchantCard { index: 1 }));
        assert!(actions.contains(&Action::AcquireMerchantCard { index: 3 }));
        assert!(!actions.contains(&Action::AcquireMerchantCard { index: 4 }));
        assert!(!actions.contains(&Action::Rest));
        assert!(!actions.contains(&Action::EndTurn));
        assert!(rules.legal_actions(&state, PlayerId::new(1)).is_empty());

        for action in actions {
            assert!(rules.is_legal(&state, PlayerId::new(0), &action), "{action}");
        }
    }

    #[test]
    fn test_is_terminal() {
        let rules = rules(2);
        let mut state = rules.initial_state();
        assert!(rules.is_terminal(&state).is_none());

        state.current_mut().add_bundle(&Spices::green(3));
        rules.end_game(&mut state);

        let result = rules.is_terminal(&state).unwrap();
        assert_eq!(result.winner, PlayerId::new(0));
        assert_eq!(result.scores, vec![3, 0]);
    }
}
