use super::*;
use crate::game::constants::HEADS_UP_PLAYER_COUNT;

impl HandState {
    /// Post the forced bets.
    ///
    /// Heads-up the button posts the small blind and the other seat the big
    /// blind; three-plus handed the two seats after the button post in
    /// order. A short stack posts what it can and is all-in immediately.
    pub(super) fn post_blinds(&mut self) {
        let (sb_seat, bb_seat) = if self.seat_order.len() == HEADS_UP_PLAYER_COUNT {
            (self.seat_order[0], self.seat_order[1])
        } else {
            (self.seat_order[1], self.seat_order[2])
        };

        let sb_amount = self.forced_bets.small_blind;
        let bb_amount = self.forced_bets.big_blind;

        let sb_posted = match self.player_mut(sb_seat) {
            Some(p) => p.place_bet(sb_amount),
            None => Chips::ZERO,
        };
        let bb_posted = match self.player_mut(bb_seat) {
            Some(p) => p.place_bet(bb_amount),
            None => Chips::ZERO,
        };

        tracing::debug!(
            "blinds posted: SB {} from seat {}, BB {} from seat {}",
            sb_posted,
            sb_seat,
            bb_posted,
            bb_seat
        );

        self.push_event(GameEvent::BlindsPosted {
            small_blind_seat: sb_seat,
            small_blind: sb_posted,
            big_blind_seat: bb_seat,
            big_blind: bb_posted,
        });
    }

    /// First seat to act preflop: the button when heads-up, otherwise the
    /// seat after the big blind.
    pub(super) fn preflop_first_to_act(&self) -> SeatIndex {
        if self.seat_order.len() == HEADS_UP_PLAYER_COUNT {
            self.seat_order[0]
        } else {
            self.seat_order[3 % self.seat_order.len()]
        }
    }

    /// Open the preflop round against the big blind, or advance straight
    /// through the streets when the blinds left fewer than two seats able
    /// to act.
    pub(super) fn open_preflop_round(&mut self) -> GameResult<()> {
        if self.can_act_count() >= 2 {
            self.betting_round = Some(BettingRound::new(
                Phase::Preflop,
                &self.players,
                self.preflop_first_to_act(),
                self.forced_bets.big_blind,
                self.forced_bets.big_blind,
            ));
            Ok(())
        } else {
            self.advance_after_round()
        }
    }
}
