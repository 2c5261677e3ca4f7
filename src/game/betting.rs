//! Betting-round state machine
//!
//! Tracks whose turn it is, the bet to match, the minimum raise increment,
//! and which seats have acted since the last aggression. The round is pure
//! bookkeeping: it borrows the hand's players for each action and never owns
//! them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::game::actions::{Action, LegalActions};
use crate::game::chips::{Chips, SeatIndex};
use crate::game::error::{GameError, GameResult};
use crate::game::hand::Phase;
use crate::game::player::Player;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BettingRound {
    pub phase: Phase,
    /// Seats that can still act, ordered so the next to act is at
    /// `active_index`. A seat leaves the queue on folding or going all-in.
    active_queue: Vec<SeatIndex>,
    active_index: usize,
    /// The largest total any player has in front of them this round.
    pub biggest_bet: Chips,
    /// The minimum raise increment (the size of the last bet or raise).
    pub min_raise: Chips,
    pub last_aggressor: Option<SeatIndex>,
    has_bet_this_round: bool,
    /// Seats that have acted since the last full bet or raise.
    acted: BTreeSet<SeatIndex>,
    complete: bool,
}

impl BettingRound {
    /// Build a round from the seats that can act, starting at the first
    /// seat at or after `first_to_act` (wrapping to the lowest seat).
    pub fn new(
        phase: Phase,
        players: &[Player],
        first_to_act: SeatIndex,
        biggest_bet: Chips,
        min_raise: Chips,
    ) -> Self {
        let mut active_queue: Vec<SeatIndex> = players
            .iter()
            .filter(|p| p.can_act())
            .map(|p| p.seat)
            .collect();
        active_queue.sort();
        let pivot = active_queue
            .iter()
            .position(|&s| s >= first_to_act)
            .unwrap_or(0);
        active_queue.rotate_left(pivot);

        let non_folded = players.iter().filter(|p| !p.is_folded).count();
        let complete = non_folded <= 1 || active_queue.len() <= 1;

        tracing::debug!(
            "betting round {:?}: queue {:?}, biggest_bet {}, min_raise {}",
            phase,
            active_queue,
            biggest_bet,
            min_raise
        );

        Self {
            phase,
            active_queue,
            active_index: 0,
            biggest_bet,
            min_raise,
            last_aggressor: None,
            has_bet_this_round: !biggest_bet.is_zero(),
            acted: BTreeSet::new(),
            complete,
        }
    }

    /// The seat whose turn it is, if the round is still open.
    pub fn active_seat(&self) -> Option<SeatIndex> {
        if self.complete {
            return None;
        }
        self.active_queue.get(self.active_index).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// What the given player may do right now.
    pub fn legal_actions_for(&self, player: &Player) -> LegalActions {
        LegalActions::compute(
            player.chips,
            player.current_bet,
            self.biggest_bet,
            self.min_raise,
            self.has_bet_this_round,
        )
    }

    /// Validate and apply one action. On error the round and players are
    /// untouched.
    pub fn apply(
        &mut self,
        players: &mut [Player],
        seat: SeatIndex,
        action: Action,
    ) -> GameResult<()> {
        let expected = self.active_seat();
        if expected != Some(seat) {
            return Err(GameError::NotPlayersTurn { seat, expected });
        }

        let player = players
            .iter_mut()
            .find(|p| p.seat == seat)
            .ok_or_else(|| GameError::InvalidGameState {
                state: format!("{:?}", self.phase),
                reason: format!("seat {} is to act but has no player", seat),
            })?;

        self.legal_actions_for(player).validate(action)?;

        let mut leaves_queue = false;
        match action {
            Action::Fold => {
                player.fold();
                leaves_queue = true;
            }
            Action::Check => {}
            Action::Call => {
                let gap = self.biggest_bet - player.current_bet;
                player.place_bet(gap);
                leaves_queue = player.is_all_in;
            }
            Action::Bet(amount) => {
                let before = player.current_bet;
                player.place_bet(amount);
                self.biggest_bet = before + amount;
                self.min_raise = amount;
                self.last_aggressor = Some(seat);
                self.has_bet_this_round = true;
                self.acted.clear();
                leaves_queue = player.is_all_in;
            }
            Action::Raise(total) => {
                let before = player.current_bet;
                player.place_bet(total - before);
                self.min_raise = total - self.biggest_bet;
                self.biggest_bet = total;
                self.last_aggressor = Some(seat);
                self.acted.clear();
                leaves_queue = player.is_all_in;
            }
            Action::AllIn => {
                let total = player.current_bet + player.chips;
                player.place_bet(player.chips);
                if total > self.biggest_bet {
                    let increment = total - self.biggest_bet;
                    self.biggest_bet = total;
                    self.has_bet_this_round = true;
                    // A shove below a full raise does not re-open the action
                    // for players who already acted.
                    if increment >= self.min_raise {
                        self.min_raise = increment;
                        self.last_aggressor = Some(seat);
                        self.acted.clear();
                    }
                }
                leaves_queue = true;
            }
        }

        self.acted.insert(seat);
        if leaves_queue {
            self.remove_from_queue(seat);
        } else {
            self.advance_turn();
        }
        self.refresh_completion(players);

        Ok(())
    }

    fn remove_from_queue(&mut self, seat: SeatIndex) {
        if let Some(pos) = self.active_queue.iter().position(|&s| s == seat) {
            self.active_queue.remove(pos);
            if pos < self.active_index {
                self.active_index -= 1;
            }
            if !self.active_queue.is_empty() && self.active_index >= self.active_queue.len() {
                self.active_index = 0;
            }
        }
    }

    fn advance_turn(&mut self) {
        if !self.active_queue.is_empty() {
            self.active_index = (self.active_index + 1) % self.active_queue.len();
        }
    }

    fn refresh_completion(&mut self, players: &[Player]) {
        let non_folded = players.iter().filter(|p| !p.is_folded).count();
        self.complete = non_folded <= 1
            || self.active_queue.is_empty()
            || self.active_queue.iter().all(|s| self.acted.contains(s));
        if self.complete {
            tracing::debug!("betting round {:?} complete", self.phase);
        }
    }
}
