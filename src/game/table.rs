//! Multi-hand table session
//!
//! Owns the seat map, rotates the button, starts hands, forwards actions to
//! the hand in progress, and folds each completed hand's results (chips,
//! busted seats, events) back into the table. Pure transitions throughout:
//! every operation returns a new `TableState`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::game::actions::{Action, LegalActions};
use crate::game::chips::{Chips, HandId, SeatIndex};
use crate::game::constants::{MAX_TABLE_SEATS, MIN_PLAYERS_TO_START, MIN_TABLE_SEATS};
use crate::game::deck::Shuffler;
use crate::game::error::{GameError, GameResult};
use crate::game::events::GameEvent;
use crate::game::hand::{ForcedBets, HandState};
use crate::game::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub max_seats: usize,
    pub forced_bets: ForcedBets,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableState {
    pub config: TableConfig,
    seats: BTreeMap<SeatIndex, Player>,
    button: Option<SeatIndex>,
    current_hand: Option<HandState>,
    hand_count: u64,
    events: Vec<GameEvent>,
}

impl TableState {
    /// Create an empty table. Seat count must be 2-10 and the blinds must
    /// be a positive big blind with a small blind no larger than it.
    pub fn new(max_seats: usize, forced_bets: ForcedBets) -> GameResult<TableState> {
        if !(MIN_TABLE_SEATS..=MAX_TABLE_SEATS).contains(&max_seats) {
            return Err(GameError::InvalidConfig {
                reason: format!(
                    "max_seats must be between {} and {}, got {}",
                    MIN_TABLE_SEATS, MAX_TABLE_SEATS, max_seats
                ),
            });
        }
        if forced_bets.big_blind.is_zero() {
            return Err(GameError::InvalidConfig {
                reason: "big blind must be positive".to_string(),
            });
        }
        if forced_bets.small_blind > forced_bets.big_blind {
            return Err(GameError::InvalidConfig {
                reason: "small blind cannot exceed big blind".to_string(),
            });
        }

        Ok(TableState {
            config: TableConfig {
                max_seats,
                forced_bets,
            },
            seats: BTreeMap::new(),
            button: None,
            current_hand: None,
            hand_count: 0,
            events: Vec::new(),
        })
    }

    /// Seat a new player with a starting stack.
    pub fn sit_down(&self, seat: SeatIndex, chips: Chips) -> GameResult<TableState> {
        if (seat.index() as usize) >= self.config.max_seats {
            return Err(GameError::InvalidConfig {
                reason: format!(
                    "seat {} is beyond this table's {} seats",
                    seat, self.config.max_seats
                ),
            });
        }
        if self.seats.contains_key(&seat) {
            return Err(GameError::SeatOccupied { seat });
        }
        if self.seats.len() >= self.config.max_seats {
            return Err(GameError::TableFull);
        }

        let mut next = self.clone();
        next.seats.insert(seat, Player::new(seat, chips));
        next.events.push(GameEvent::PlayerSatDown { seat, chips });
        tracing::info!("seat {} taken with {} chips", seat, chips);
        Ok(next)
    }

    /// Remove a player between hands.
    pub fn stand_up(&self, seat: SeatIndex) -> GameResult<TableState> {
        if self.current_hand.is_some() {
            return Err(GameError::HandInProgress);
        }
        if !self.seats.contains_key(&seat) {
            return Err(GameError::SeatEmpty { seat });
        }

        let mut next = self.clone();
        next.seats.remove(&seat);
        next.events.push(GameEvent::PlayerStoodUp { seat });
        tracing::info!("seat {} vacated", seat);
        Ok(next)
    }

    /// Advance the button and deal the next hand.
    pub fn start_next_hand(&self, shuffler: &mut dyn Shuffler) -> GameResult<TableState> {
        if self.current_hand.is_some() {
            return Err(GameError::HandInProgress);
        }
        let eligible: Vec<&Player> = self
            .seats
            .values()
            .filter(|p| !p.chips.is_zero())
            .collect();
        if eligible.len() < MIN_PLAYERS_TO_START {
            return Err(GameError::NotEnoughPlayers {
                count: eligible.len(),
                min: MIN_PLAYERS_TO_START,
            });
        }

        let mut next = self.clone();
        let button = next.advance_button().ok_or_else(|| GameError::InvalidGameState {
            state: "table".to_string(),
            reason: "no occupied seat for the button".to_string(),
        })?;

        let mut roster: Vec<Player> = eligible.into_iter().cloned().collect();
        for player in roster.iter_mut() {
            player.clear_hand();
        }

        // Hand ids only need to be unique within this table's lifetime, and
        // deriving them from the counter keeps replays fully deterministic.
        let hand_id = HandId::new(format!("hand-{}", next.hand_count + 1));
        let hand = HandState::start(
            hand_id,
            roster,
            button,
            next.config.forced_bets,
            shuffler,
        )?;

        next.hand_count += 1;
        // A hand can complete during start when the blinds leave nobody to
        // act; fold its results straight back into the table.
        if hand.is_complete() {
            next.finish_hand(hand);
        } else {
            next.current_hand = Some(hand);
        }
        Ok(next)
    }

    /// Forward an action to the hand in progress.
    pub fn act(&self, seat: SeatIndex, action: Action) -> GameResult<TableState> {
        let hand = self
            .current_hand
            .as_ref()
            .ok_or(GameError::NoHandInProgress)?;

        let hand = hand.act(seat, action)?;
        let mut next = self.clone();
        if hand.is_complete() {
            next.finish_hand(hand);
        } else {
            next.current_hand = Some(hand);
        }
        Ok(next)
    }

    /// The seat to act in the current hand, if any.
    pub fn active_seat(&self) -> Option<SeatIndex> {
        self.current_hand.as_ref().and_then(|h| h.active_seat())
    }

    /// Legal actions for the seat to act, if any.
    pub fn legal_actions(&self) -> Option<LegalActions> {
        self.current_hand.as_ref().and_then(|h| h.legal_actions())
    }

    pub fn current_hand(&self) -> Option<&HandState> {
        self.current_hand.as_ref()
    }

    pub fn hand_count(&self) -> u64 {
        self.hand_count
    }

    pub fn button(&self) -> Option<SeatIndex> {
        self.button
    }

    /// The table's event log. A hand's events appear here once the hand
    /// completes.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn seated_players(&self) -> impl Iterator<Item = &Player> {
        self.seats.values()
    }

    pub fn player_at(&self, seat: SeatIndex) -> Option<&Player> {
        self.seats.get(&seat)
    }

    /// Total chips across all seats (hand in progress included via the
    /// seat snapshots taken at hand start).
    pub fn total_chips(&self) -> Chips {
        match &self.current_hand {
            Some(hand) => {
                let in_hand_seats: Vec<SeatIndex> =
                    hand.players().iter().map(|p| p.seat).collect();
                let hand_total: Chips = hand
                    .players()
                    .iter()
                    .map(|p| p.chips + p.current_bet)
                    .sum();
                let outside: Chips = self
                    .seats
                    .iter()
                    .filter(|(seat, _)| !in_hand_seats.contains(seat))
                    .map(|(_, p)| p.chips)
                    .sum();
                let in_pots: Chips = hand.pots.iter().map(|p| p.amount).sum();
                hand_total + outside + in_pots
            }
            None => self.seats.values().map(|p| p.chips).sum(),
        }
    }

    /// First hand: the lowest occupied seat. Afterwards: the next funded
    /// seat clockwise from the previous button, wrapping to the lowest.
    fn advance_button(&mut self) -> Option<SeatIndex> {
        let funded: Vec<SeatIndex> = self
            .seats
            .iter()
            .filter(|(_, p)| !p.chips.is_zero())
            .map(|(&seat, _)| seat)
            .collect();
        let button = match self.button {
            None => funded.first().copied(),
            Some(prev) => funded
                .iter()
                .find(|&&s| s > prev)
                .or_else(|| funded.first())
                .copied(),
        };
        self.button = button;
        button
    }

    /// Fold a completed hand's results back into the table: final stacks,
    /// busted-seat removal, and the hand's event log.
    fn finish_hand(&mut self, hand: HandState) {
        for hand_player in hand.players() {
            if let Some(seated) = self.seats.get_mut(&hand_player.seat) {
                seated.chips = hand_player.chips;
            }
        }

        let busted: Vec<SeatIndex> = self
            .seats
            .iter()
            .filter(|(_, p)| p.chips.is_zero())
            .map(|(&seat, _)| seat)
            .collect();

        self.events.extend(hand.events().iter().cloned());

        for seat in busted {
            tracing::info!("seat {} busted, leaving the table", seat);
            self.seats.remove(&seat);
            self.events.push(GameEvent::PlayerStoodUp { seat });
        }

        self.current_hand = None;
    }
}
