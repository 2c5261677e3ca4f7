//! Redacted read model
//!
//! Snapshots of table and hand state safe to hand to a single seat (or to a
//! spectator): every other player's hole cards are stripped. Strategies and
//! UIs consume these instead of the full engine state.

use serde::{Deserialize, Serialize};

use crate::game::actions::LegalActions;
use crate::game::chips::{Chips, SeatIndex};
use crate::game::deck::Card;
use crate::game::hand::Phase;
use crate::game::table::TableState;

/// One player as visible to `viewer`: stack and commitments always, hole
/// cards only for the viewer's own seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub seat: SeatIndex,
    pub chips: Chips,
    pub current_bet: Chips,
    pub is_all_in: bool,
    pub is_folded: bool,
    pub hole_cards: Option<[Card; 2]>,
}

/// A table snapshot redacted for one viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    /// Phase of the hand in progress, if any.
    pub phase: Option<Phase>,
    pub community: Vec<Card>,
    pub pot_total: Chips,
    pub button: Option<SeatIndex>,
    pub active_seat: Option<SeatIndex>,
    /// Legal actions, present when the viewer is the seat to act.
    pub legal_actions: Option<LegalActions>,
    /// In-hand players when a hand is running, otherwise everyone seated.
    pub players: Vec<PlayerView>,
    pub hand_count: u64,
}

impl TableState {
    /// Snapshot the table as `viewer` may see it. `None` is a spectator:
    /// no hole cards at all.
    pub fn view_for(&self, viewer: Option<SeatIndex>) -> TableView {
        match self.current_hand() {
            Some(hand) => TableView {
                phase: Some(hand.phase),
                community: hand.community.clone(),
                pot_total: hand.pot_total(),
                button: Some(hand.button),
                active_seat: hand.active_seat(),
                legal_actions: match (hand.active_seat(), viewer) {
                    (Some(active), Some(viewer)) if active == viewer => hand.legal_actions(),
                    _ => None,
                },
                players: hand
                    .players()
                    .iter()
                    .map(|p| PlayerView {
                        seat: p.seat,
                        chips: p.chips,
                        current_bet: p.current_bet,
                        is_all_in: p.is_all_in,
                        is_folded: p.is_folded,
                        hole_cards: p.hole_cards.filter(|_| viewer == Some(p.seat)),
                    })
                    .collect(),
                hand_count: self.hand_count(),
            },
            None => TableView {
                phase: None,
                community: Vec::new(),
                pot_total: Chips::ZERO,
                button: self.button(),
                active_seat: None,
                legal_actions: None,
                players: self
                    .seated_players()
                    .map(|p| PlayerView {
                        seat: p.seat,
                        chips: p.chips,
                        current_bet: p.current_bet,
                        is_all_in: p.is_all_in,
                        is_folded: p.is_folded,
                        hole_cards: None,
                    })
                    .collect(),
                hand_count: self.hand_count(),
            },
        }
    }
}
