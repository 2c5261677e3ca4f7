use super::*;
use crate::game::actions::Action;

impl HandState {
    /// Apply one player action, returning the resulting hand state.
    ///
    /// The input state is untouched; on error the caller keeps the prior
    /// value. Completing a betting round auto-advances the hand (collects
    /// bets, deals the next street or resolves the hand).
    pub fn act(&self, seat: SeatIndex, action: Action) -> GameResult<HandState> {
        if !self.phase.admits_actions() {
            return Err(GameError::InvalidGameState {
                state: format!("{:?}", self.phase),
                reason: "the hand no longer accepts actions".to_string(),
            });
        }

        let mut next = self.clone();
        next.apply_action(seat, action)?;
        Ok(next)
    }

    fn apply_action(&mut self, seat: SeatIndex, action: Action) -> GameResult<()> {
        let round = self
            .betting_round
            .as_mut()
            .ok_or_else(|| GameError::InvalidGameState {
                state: format!("{:?}", self.phase),
                reason: "no betting round is open".to_string(),
            })?;

        round.apply(&mut self.players, seat, action)?;
        tracing::info!("seat {} acted: {}", seat, action);
        self.push_event(GameEvent::PlayerActed { seat, action });

        if self
            .betting_round
            .as_ref()
            .map(|r| r.is_complete())
            .unwrap_or(false)
        {
            self.advance_after_round()?;
        }
        Ok(())
    }
}
