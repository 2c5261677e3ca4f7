use super::*;
use crate::game::pot::award_pots;
use crate::game::ranking::rank_cards;
use std::collections::BTreeMap;

impl HandState {
    /// Rank every remaining hand and pay out the pots in order.
    pub(super) fn resolve_showdown(&mut self) -> GameResult<()> {
        self.push_event(GameEvent::ShowdownStarted);
        self.phase = Phase::Showdown;

        let mut ranks = BTreeMap::new();
        for player in self.players.iter().filter(|p| !p.is_folded) {
            if let Some(hole) = player.hole_cards {
                let mut cards = hole.to_vec();
                cards.extend(self.community.iter().copied());
                let rank = rank_cards(&cards)?;
                tracing::debug!("seat {} shows {}", player.seat, rank.description);
                ranks.insert(player.seat, rank);
            }
        }

        let awards = award_pots(&self.pots, &ranks, self.button, &self.seat_order);
        self.pots.clear();
        for award in awards {
            if let Some(player) = self.player_mut(award.seat) {
                player.win_chips(award.amount);
            }
            tracing::info!(
                "hand {}: seat {} wins {} from pot {}",
                self.hand_id,
                award.seat,
                award.amount,
                award.pot_index
            );
            self.push_event(GameEvent::PotAwarded {
                seat: award.seat,
                amount: award.amount,
                pot_index: award.pot_index,
            });
        }

        self.push_event(GameEvent::HandEnded);
        self.phase = Phase::Complete;
        Ok(())
    }
}
