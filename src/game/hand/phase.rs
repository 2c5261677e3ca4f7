use super::*;
use crate::game::pot::collect_bets;

impl HandState {
    /// A betting round just closed (or never opened): sweep the bets into
    /// the pots and move the hand forward.
    ///
    /// From here the hand either ends immediately (one player left), deals
    /// the next street, or goes to showdown after the river. Streets where
    /// fewer than two players can act are dealt straight through without a
    /// betting round.
    pub(super) fn advance_after_round(&mut self) -> GameResult<()> {
        self.betting_round = None;
        self.pots = collect_bets(&mut self.players, std::mem::take(&mut self.pots));
        self.push_event(GameEvent::BettingRoundEnded { phase: self.phase });

        if self.non_folded_count() <= 1 {
            self.award_to_last_player();
            return Ok(());
        }

        loop {
            if self.phase == Phase::River {
                return self.resolve_showdown();
            }

            self.deal_next_street()?;

            if self.can_act_count() >= 2 {
                if let Some(first) = self.postflop_first_to_act() {
                    self.betting_round = Some(BettingRound::new(
                        self.phase,
                        &self.players,
                        first,
                        Chips::ZERO,
                        self.forced_bets.big_blind,
                    ));
                    return Ok(());
                }
            }
            // Everyone is all-in (or folded down to the all-ins): run out
            // the board.
        }
    }

    /// First seat after the button, in seat order, whose player can act.
    pub(super) fn postflop_first_to_act(&self) -> Option<SeatIndex> {
        self.seat_order
            .iter()
            .cycle()
            .skip(1)
            .take(self.seat_order.len())
            .find(|&&seat| self.player(seat).map(|p| p.can_act()).unwrap_or(false))
            .copied()
    }

    /// Everyone else folded: hand over, remaining player takes every pot.
    fn award_to_last_player(&mut self) {
        let winner = match self.players.iter().find(|p| !p.is_folded) {
            Some(p) => p.seat,
            None => {
                // Cannot happen: folding is only possible while another
                // player remains.
                tracing::error!("hand {} has no unfolded player", self.hand_id);
                self.phase = Phase::Complete;
                return;
            }
        };

        let pots = std::mem::take(&mut self.pots);
        for (pot_index, pot) in pots.into_iter().enumerate() {
            if let Some(player) = self.player_mut(winner) {
                player.win_chips(pot.amount);
            }
            self.push_event(GameEvent::PotAwarded {
                seat: winner,
                amount: pot.amount,
                pot_index,
            });
        }

        tracing::info!("hand {}: seat {} wins uncontested", self.hand_id, winner);
        self.push_event(GameEvent::HandEnded);
        self.phase = Phase::Complete;
    }
}
