//! Append-only game event log
//!
//! Every transition that changes observable state appends one or more of
//! these events. A hand's events are merged into the table's log when the
//! hand completes, preserving insertion order.

use serde::{Deserialize, Serialize};

use crate::game::actions::Action;
use crate::game::chips::{Chips, HandId, SeatIndex};
use crate::game::deck::Card;
use crate::game::hand::Phase;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum GameEvent {
    HandStarted {
        hand_id: HandId,
        button: SeatIndex,
    },
    BlindsPosted {
        small_blind_seat: SeatIndex,
        small_blind: Chips,
        big_blind_seat: SeatIndex,
        big_blind: Chips,
    },
    HoleCardsDealt {
        seat: SeatIndex,
    },
    PlayerActed {
        seat: SeatIndex,
        action: Action,
    },
    BettingRoundEnded {
        phase: Phase,
    },
    CommunityCardsDealt {
        phase: Phase,
        cards: Vec<Card>,
    },
    ShowdownStarted,
    PotAwarded {
        seat: SeatIndex,
        amount: Chips,
        pot_index: usize,
    },
    HandEnded,
    PlayerSatDown {
        seat: SeatIndex,
        chips: Chips,
    },
    PlayerStoodUp {
        seat: SeatIndex,
    },
}
