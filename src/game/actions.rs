//! Player actions and legal-action computation
//!
//! `LegalActions` is the descriptor handed to callers (and strategies) of
//! what the player to act may do; `validate` maps an intended action to
//! either the same action or a typed error. Bet and raise amounts are
//! absolute raise-to totals, not increments.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::chips::Chips;
use crate::game::error::{GameError, GameResult};

/// An action a player can take when it is their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "amount")]
pub enum Action {
    Fold,
    Check,
    Call,
    Bet(Chips),
    Raise(Chips),
    AllIn,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => write!(f, "Fold"),
            Action::Check => write!(f, "Check"),
            Action::Call => write!(f, "Call"),
            Action::Bet(amount) => write!(f, "Bet {}", amount),
            Action::Raise(amount) => write!(f, "Raise to {}", amount),
            Action::AllIn => write!(f, "All-In"),
        }
    }
}

/// What the player to act is allowed to do, given their stack and the state
/// of the betting round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalActions {
    pub can_fold: bool,
    pub can_check: bool,
    /// Chips required to call. Absent when there is nothing to call or the
    /// stack cannot cover the full amount (an under-stack call must use
    /// `AllIn` instead).
    pub call_amount: Option<Chips>,
    pub min_bet: Option<Chips>,
    pub max_bet: Option<Chips>,
    /// Minimum raise-to total.
    pub min_raise: Option<Chips>,
    /// Maximum raise-to total (the stack plus chips already in).
    pub max_raise: Option<Chips>,
    pub can_all_in: bool,
    pub all_in_amount: Chips,
}

impl LegalActions {
    /// Compute the descriptor from the player's stack and round state.
    pub fn compute(
        chips: Chips,
        current_bet: Chips,
        biggest_bet: Chips,
        min_raise_increment: Chips,
        has_bet_this_round: bool,
    ) -> Self {
        let can_check = current_bet >= biggest_bet;

        let call_gap = biggest_bet.saturating_sub(current_bet);
        let call_amount = if !call_gap.is_zero() && chips >= call_gap {
            Some(call_gap)
        } else {
            None
        };

        // Opening bet: only when nobody has voluntarily bet yet.
        let (min_bet, max_bet) = if !has_bet_this_round && chips >= min_raise_increment {
            (Some(min_raise_increment), Some(chips))
        } else {
            (None, None)
        };

        // Raise: only over an existing bet, and only with enough behind to
        // make a full raise.
        let (min_raise, max_raise) =
            if has_bet_this_round && chips + current_bet >= biggest_bet + min_raise_increment {
                (
                    Some(biggest_bet + min_raise_increment),
                    Some(chips + current_bet),
                )
            } else {
                (None, None)
            };

        Self {
            can_fold: true,
            can_check,
            call_amount,
            min_bet,
            max_bet,
            min_raise,
            max_raise,
            can_all_in: !chips.is_zero(),
            all_in_amount: chips,
        }
    }

    /// Check an intended action against this descriptor.
    pub fn validate(&self, action: Action) -> GameResult<()> {
        match action {
            Action::Fold => {
                if self.can_fold {
                    Ok(())
                } else {
                    Err(GameError::InvalidAction {
                        action,
                        reason: "folding is not available".to_string(),
                    })
                }
            }
            Action::Check => {
                if self.can_check {
                    Ok(())
                } else {
                    Err(GameError::InvalidAction {
                        action,
                        reason: "cannot check facing a bet".to_string(),
                    })
                }
            }
            Action::Call => match self.call_amount {
                Some(_) => Ok(()),
                None => Err(GameError::InvalidAction {
                    action,
                    reason: "no callable bet; check or go all-in".to_string(),
                }),
            },
            Action::Bet(amount) => match (self.min_bet, self.max_bet) {
                (Some(min), Some(max)) => {
                    if amount < min {
                        Err(GameError::InvalidAction {
                            action,
                            reason: format!("bet below the minimum of {}", min),
                        })
                    } else if amount > max {
                        Err(GameError::InvalidAction {
                            action,
                            reason: format!("bet above the maximum of {}", max),
                        })
                    } else {
                        Ok(())
                    }
                }
                _ => Err(GameError::InvalidAction {
                    action,
                    reason: "betting is not available; a bet already stands".to_string(),
                }),
            },
            Action::Raise(amount) => match (self.min_raise, self.max_raise) {
                (Some(min), Some(max)) => {
                    if amount < min {
                        Err(GameError::InvalidAction {
                            action,
                            reason: format!("raise below the minimum raise-to of {}", min),
                        })
                    } else if amount > max {
                        Err(GameError::InvalidAction {
                            action,
                            reason: format!("raise above the maximum raise-to of {}", max),
                        })
                    } else {
                        Ok(())
                    }
                }
                _ => Err(GameError::InvalidAction {
                    action,
                    reason: "raising is not available".to_string(),
                }),
            },
            Action::AllIn => {
                if self.can_all_in {
                    Ok(())
                } else {
                    Err(GameError::InvalidAction {
                        action,
                        reason: "no chips left to commit".to_string(),
                    })
                }
            }
        }
    }
}
