//! Single-hand lifecycle orchestrator
//!
//! Drives one hand from deal through showdown: blind posting, hole cards,
//! betting rounds per street, pot collection, showdown, awards. Every public
//! transition is pure (it takes `&self` and returns a fresh `HandState`)
//! and appends to the hand's event log.

mod actions;
mod blinds;
mod dealing;
mod phase;
mod showdown;

use serde::{Deserialize, Serialize};

use crate::game::actions::LegalActions;
use crate::game::betting::BettingRound;
use crate::game::chips::{Chips, HandId, SeatIndex};
use crate::game::deck::{Card, Deck, Shuffler};
use crate::game::error::{GameError, GameResult};
use crate::game::events::GameEvent;
use crate::game::player::Player;
use crate::game::pot::Pot;

/// The streets of a hand, in order. Phases only ever move forward.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Phase {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Complete,
}

impl Phase {
    /// How many community cards are on the board during this phase.
    pub fn community_card_count(&self) -> Option<usize> {
        match self {
            Phase::Preflop => Some(0),
            Phase::Flop => Some(3),
            Phase::Turn => Some(4),
            Phase::River | Phase::Showdown => Some(5),
            Phase::Complete => None,
        }
    }

    /// Whether players can still act in this phase.
    pub fn admits_actions(&self) -> bool {
        matches!(
            self,
            Phase::Preflop | Phase::Flop | Phase::Turn | Phase::River
        )
    }
}

/// The forced bets posted before cards are dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForcedBets {
    pub small_blind: Chips,
    pub big_blind: Chips,
}

/// Full state of one hand in play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandState {
    pub hand_id: HandId,
    pub phase: Phase,
    /// The hand's roster, sorted by seat ascending.
    players: Vec<Player>,
    pub community: Vec<Card>,
    deck: Deck,
    pub pots: Vec<Pot>,
    betting_round: Option<BettingRound>,
    pub button: SeatIndex,
    pub forced_bets: ForcedBets,
    /// Seats present at hand start, rotated so the button is first.
    pub seat_order: Vec<SeatIndex>,
    events: Vec<GameEvent>,
}

impl HandState {
    /// Start a hand: shuffle, post blinds, deal hole cards, and open the
    /// preflop betting round.
    ///
    /// `players` must hold at least two non-folded players and include the
    /// button's seat.
    pub fn start(
        hand_id: HandId,
        mut players: Vec<Player>,
        button: SeatIndex,
        forced_bets: ForcedBets,
        shuffler: &mut dyn Shuffler,
    ) -> GameResult<HandState> {
        let non_folded = players.iter().filter(|p| !p.is_folded).count();
        if non_folded < 2 {
            return Err(GameError::NotEnoughPlayers {
                count: non_folded,
                min: 2,
            });
        }

        players.sort_by_key(|p| p.seat);
        let mut seat_order: Vec<SeatIndex> = players
            .iter()
            .filter(|p| !p.is_folded)
            .map(|p| p.seat)
            .collect();
        let button_pos = seat_order
            .iter()
            .position(|&s| s == button)
            .ok_or_else(|| GameError::InvalidGameState {
                state: "hand start".to_string(),
                reason: format!("button seat {} is not in the roster", button),
            })?;
        seat_order.rotate_left(button_pos);

        tracing::info!(
            "hand {} starting: button seat {}, seat order {:?}",
            hand_id,
            button,
            seat_order
        );

        let mut hand = HandState {
            phase: Phase::Preflop,
            players,
            community: Vec::new(),
            deck: Deck::shuffled(shuffler),
            pots: Vec::new(),
            betting_round: None,
            button,
            forced_bets,
            seat_order,
            events: vec![GameEvent::HandStarted {
                hand_id: hand_id.clone(),
                button,
            }],
            hand_id,
        };

        hand.post_blinds();
        hand.deal_hole_cards()?;
        hand.open_preflop_round()?;

        Ok(hand)
    }

    /// The seat to act, if any.
    pub fn active_seat(&self) -> Option<SeatIndex> {
        self.betting_round.as_ref().and_then(|r| r.active_seat())
    }

    /// Legal actions for the seat to act, if any.
    pub fn legal_actions(&self) -> Option<LegalActions> {
        let round = self.betting_round.as_ref()?;
        let seat = round.active_seat()?;
        let player = self.player(seat)?;
        Some(round.legal_actions_for(player))
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: SeatIndex) -> Option<&Player> {
        self.players.iter().find(|p| p.seat == seat)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Total chips currently in the pots.
    pub fn pot_total(&self) -> Chips {
        let in_pots: Chips = self.pots.iter().map(|p| p.amount).sum();
        let in_front: Chips = self.players.iter().map(|p| p.current_bet).sum();
        in_pots + in_front
    }

    pub(crate) fn player_mut(&mut self, seat: SeatIndex) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.seat == seat)
    }

    pub(crate) fn can_act_count(&self) -> usize {
        self.players.iter().filter(|p| p.can_act()).count()
    }

    pub(crate) fn non_folded_count(&self) -> usize {
        self.players.iter().filter(|p| !p.is_folded).count()
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
