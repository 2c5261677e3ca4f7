use super::*;

impl HandState {
    /// Deal two cards to each seat in seat order, button first.
    pub(super) fn deal_hole_cards(&mut self) -> GameResult<()> {
        let dealt = self.deck.deal_hole_cards(&self.seat_order)?;
        for (seat, cards) in dealt {
            if let Some(player) = self.player_mut(seat) {
                player.set_hole_cards(cards);
            }
            self.push_event(GameEvent::HoleCardsDealt { seat });
        }
        Ok(())
    }

    /// Burn and deal the next street's community cards, then advance the
    /// phase label.
    pub(super) fn deal_next_street(&mut self) -> GameResult<()> {
        let next = match self.phase {
            Phase::Preflop => Phase::Flop,
            Phase::Flop => Phase::Turn,
            Phase::Turn => Phase::River,
            _ => {
                return Err(GameError::InvalidGameState {
                    state: format!("{:?}", self.phase),
                    reason: "no street follows this phase".to_string(),
                })
            }
        };

        let cards: Vec<Card> = match next {
            Phase::Flop => self.deck.deal_flop()?.to_vec(),
            _ => vec![self.deck.deal_one()?],
        };
        self.community.extend(cards.iter().copied());

        tracing::debug!(
            "dealt {:?}: {:?}, board now {} cards",
            next,
            cards,
            self.community.len()
        );

        self.push_event(GameEvent::CommunityCardsDealt { phase: next, cards });
        self.phase = next;
        Ok(())
    }
}
