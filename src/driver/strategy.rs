//! Decision-making strategies for the game loop.
//!
//! Each strategy implements the `Strategy` trait to pick an action from the
//! game state visible to its seat.

use serde::{Deserialize, Serialize};

use crate::game::actions::{Action, LegalActions};
use crate::game::chips::{Chips, SeatIndex};
use crate::game::deck::Card;
use crate::game::events::GameEvent;
use crate::game::hand::Phase;

pub use crate::game::view::PlayerView;

/// Positional role of a seat in the current hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatRole {
    Button,
    SmallBlind,
    BigBlind,
    Other,
}

/// Everything a strategy can see when it is asked to act.
#[derive(Debug, Clone)]
pub struct StrategyContext {
    pub seat: SeatIndex,
    pub chips: Chips,
    pub hole_cards: Option<[Card; 2]>,
    pub role: SeatRole,
    pub phase: Phase,
    pub community: Vec<Card>,
    pub pot_total: Chips,
    pub players: Vec<PlayerView>,
    pub legal: LegalActions,
    /// Events appended since this seat last acted.
    pub new_events: Vec<GameEvent>,
}

/// Trait for pluggable decision-making.
pub trait Strategy: Send + Sync {
    fn decide(&self, ctx: &StrategyContext) -> Action;
    fn name(&self) -> &str;
}

/// Folds every hand. Useful as a baseline and for draining a table.
pub struct FoldStrategy;

impl Strategy for FoldStrategy {
    fn name(&self) -> &str {
        "always-fold"
    }

    fn decide(&self, _ctx: &StrategyContext) -> Action {
        Action::Fold
    }
}

/// Checks when possible, calls when it must, folds when it cannot call.
pub struct PassiveStrategy;

impl Strategy for PassiveStrategy {
    fn name(&self) -> &str {
        "passive"
    }

    fn decide(&self, ctx: &StrategyContext) -> Action {
        if ctx.legal.can_check {
            Action::Check
        } else if ctx.legal.call_amount.is_some() {
            Action::Call
        } else {
            Action::Fold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(legal: LegalActions) -> StrategyContext {
        StrategyContext {
            seat: SeatIndex::new(0).unwrap(),
            chips: Chips::new(100),
            hole_cards: None,
            role: SeatRole::Button,
            phase: Phase::Preflop,
            community: Vec::new(),
            pot_total: Chips::new(3),
            players: Vec::new(),
            legal,
            new_events: Vec::new(),
        }
    }

    #[test]
    fn test_passive_checks_when_it_can() {
        let legal = LegalActions::compute(
            Chips::new(100),
            Chips::new(2),
            Chips::new(2),
            Chips::new(2),
            true,
        );
        assert_eq!(PassiveStrategy.decide(&context(legal)), Action::Check);
    }

    #[test]
    fn test_passive_calls_facing_a_bet() {
        let legal = LegalActions::compute(
            Chips::new(100),
            Chips::ZERO,
            Chips::new(10),
            Chips::new(2),
            true,
        );
        assert_eq!(PassiveStrategy.decide(&context(legal)), Action::Call);
    }

    #[test]
    fn test_passive_folds_when_it_cannot_call() {
        // Stack too short for a full call, and calls never convert to shoves.
        let legal = LegalActions::compute(
            Chips::new(5),
            Chips::ZERO,
            Chips::new(50),
            Chips::new(2),
            true,
        );
        assert_eq!(PassiveStrategy.decide(&context(legal)), Action::Fold);
    }

    #[test]
    fn test_fold_strategy_always_folds() {
        let legal = LegalActions::compute(
            Chips::new(100),
            Chips::new(2),
            Chips::new(2),
            Chips::new(2),
            true,
        );
        assert_eq!(FoldStrategy.decide(&context(legal)), Action::Fold);
    }
}
