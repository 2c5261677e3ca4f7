use serde::{Deserialize, Serialize};

use crate::game::chips::{Chips, SeatIndex};
use crate::game::deck::Card;

/// Per-hand snapshot of a seated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub seat: SeatIndex,
    pub chips: Chips,
    /// Chips committed in the current betting round, swept into the pots
    /// when the round closes.
    pub current_bet: Chips,
    /// Chips committed over the whole hand, blinds included.
    pub total_committed: Chips,
    pub is_all_in: bool,
    pub is_folded: bool,
    pub hole_cards: Option<[Card; 2]>,
}

impl Player {
    pub fn new(seat: SeatIndex, chips: Chips) -> Self {
        Self {
            seat,
            chips,
            current_bet: Chips::ZERO,
            total_committed: Chips::ZERO,
            is_all_in: false,
            is_folded: false,
            hole_cards: None,
        }
    }

    /// Commit up to `amount` chips from the stack into `current_bet`.
    /// Clamps to the remaining stack; going to zero marks the player all-in.
    /// Returns the amount actually committed.
    pub fn place_bet(&mut self, amount: Chips) -> Chips {
        let actual = amount.min(self.chips);
        self.chips -= actual;
        self.current_bet += actual;
        self.total_committed += actual;

        if self.chips.is_zero() && !self.total_committed.is_zero() {
            self.is_all_in = true;
        }

        actual
    }

    pub fn fold(&mut self) {
        self.is_folded = true;
    }

    /// Zero out `current_bet` at the end of a betting round, returning the
    /// swept amount.
    pub fn collect_bet(&mut self) -> Chips {
        std::mem::take(&mut self.current_bet)
    }

    pub fn win_chips(&mut self, amount: Chips) {
        self.chips += amount;
    }

    pub fn set_hole_cards(&mut self, cards: [Card; 2]) {
        self.hole_cards = Some(cards);
    }

    /// Reset per-hand state. Chips carry over; everything else clears.
    pub fn clear_hand(&mut self) {
        self.current_bet = Chips::ZERO;
        self.total_committed = Chips::ZERO;
        self.is_all_in = false;
        self.is_folded = false;
        self.hole_cards = None;
    }

    /// Whether this player can take a voluntary action.
    pub fn can_act(&self) -> bool {
        !self.is_folded && !self.is_all_in && !self.chips.is_zero()
    }

    /// Whether this player still contests the pot (not folded).
    pub fn is_active_in_hand(&self) -> bool {
        !self.is_folded
    }
}
