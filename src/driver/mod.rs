//! Pull-model game loop
//!
//! Repeatedly queries the table for the seat to act, consults that seat's
//! strategy (with an optional timeout), applies the chosen action, and
//! starts the next hand when one completes. Illegal or late answers fall
//! back to the configured default action, then to `Check`, `Call`, `Fold`
//! in order; folding is always legal on your turn, so the loop never
//! stalls.

mod strategy;

pub use strategy::{FoldStrategy, PassiveStrategy, PlayerView, SeatRole, Strategy, StrategyContext};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::game::actions::Action;
use crate::game::chips::SeatIndex;
use crate::game::constants::{DEFAULT_MAX_ACTIONS_PER_HAND, DEFAULT_MAX_HANDS};
use crate::game::deck::Shuffler;
use crate::game::error::{GameError, GameResult};
use crate::game::events::GameEvent;
use crate::game::hand::HandState;
use crate::game::table::TableState;

/// Loop tuning knobs.
pub struct GameLoopConfig {
    /// How long a strategy may think per action. `None` waits forever.
    pub action_timeout: Option<Duration>,
    /// Played for a seat whose strategy timed out or answered illegally.
    pub default_action: Action,
    pub max_actions_per_hand: usize,
    pub max_hands: usize,
}

impl Default for GameLoopConfig {
    fn default() -> Self {
        Self {
            action_timeout: None,
            default_action: Action::Fold,
            max_actions_per_hand: DEFAULT_MAX_ACTIONS_PER_HAND,
            max_hands: DEFAULT_MAX_HANDS,
        }
    }
}

/// Stop once `n` hands have been played.
pub fn after_n_hands(n: u64) -> impl FnMut(&TableState, u64) -> bool {
    move |_table, hands_played| hands_played >= n
}

/// Stop once the table has fewer than `min_players` seats occupied.
pub fn fewer_than(min_players: usize) -> impl FnMut(&TableState, u64) -> bool {
    move |table: &TableState, _| table.seated_players().count() < min_players
}

/// Drives a table by pulling decisions from per-seat strategies.
pub struct GameLoop {
    table: TableState,
    shuffler: Box<dyn Shuffler + Send>,
    strategies: HashMap<SeatIndex, Arc<dyn Strategy>>,
    config: GameLoopConfig,
    on_event: Option<Box<dyn FnMut(&GameEvent) + Send>>,
    /// How much of the combined log each seat has been shown.
    seen_by_seat: HashMap<SeatIndex, usize>,
    /// How much of the combined log the event callback has been shown.
    emitted: usize,
}

impl GameLoop {
    pub fn new(table: TableState, shuffler: Box<dyn Shuffler + Send>) -> Self {
        Self {
            table,
            shuffler,
            strategies: HashMap::new(),
            config: GameLoopConfig::default(),
            on_event: None,
            seen_by_seat: HashMap::new(),
            emitted: 0,
        }
    }

    pub fn with_config(mut self, config: GameLoopConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_strategy(mut self, seat: SeatIndex, strategy: Arc<dyn Strategy>) -> Self {
        self.strategies.insert(seat, strategy);
        self
    }

    pub fn on_event(mut self, callback: impl FnMut(&GameEvent) + Send + 'static) -> Self {
        self.on_event = Some(Box::new(callback));
        self
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    /// Run hands until `stop` answers true, the table cannot field a hand,
    /// or a cap is hit. Returns the final table state.
    pub async fn run(
        &mut self,
        mut stop: impl FnMut(&TableState, u64) -> bool,
    ) -> GameResult<TableState> {
        let mut hands_played: u64 = 0;

        while !stop(&self.table, hands_played) && hands_played < self.config.max_hands as u64 {
            if self.table.current_hand().is_none() {
                match self.table.start_next_hand(&mut *self.shuffler) {
                    Ok(next) => {
                        self.table = next;
                        self.emit_new_events();
                    }
                    Err(GameError::NotEnoughPlayers { count, min }) => {
                        tracing::info!("stopping: {} of {} players needed", count, min);
                        break;
                    }
                    Err(e) => return Err(e),
                }
            }

            let mut actions_this_hand = 0usize;
            while let Some(seat) = self.table.active_seat() {
                if actions_this_hand >= self.config.max_actions_per_hand {
                    tracing::warn!(
                        "hand exceeded {} actions, aborting loop",
                        self.config.max_actions_per_hand
                    );
                    return Ok(self.table.clone());
                }

                let chosen = self.consult_strategy(seat).await;
                self.apply_with_fallback(seat, chosen)?;
                self.emit_new_events();
                actions_this_hand += 1;
            }

            hands_played += 1;
        }

        Ok(self.table.clone())
    }

    /// Ask the seat's strategy for an action, off-thread and under the
    /// configured timeout. `None` means no strategy, a timeout, or a
    /// panicked strategy; the fallback chain takes over.
    async fn consult_strategy(&mut self, seat: SeatIndex) -> Option<Action> {
        let strategy = self.strategies.get(&seat)?.clone();
        let ctx = self.build_context(seat)?;

        match self.config.action_timeout {
            None => Some(strategy.decide(&ctx)),
            Some(limit) => {
                let handle = tokio::task::spawn_blocking(move || strategy.decide(&ctx));
                match tokio::time::timeout(limit, handle).await {
                    Ok(Ok(action)) => Some(action),
                    Ok(Err(join_err)) => {
                        tracing::warn!("strategy for seat {} failed: {}", seat, join_err);
                        None
                    }
                    Err(_) => {
                        tracing::warn!(
                            "strategy for seat {} timed out after {:?}",
                            seat,
                            limit
                        );
                        None
                    }
                }
            }
        }
    }

    /// Try the chosen action, then the default, then check/call/fold.
    fn apply_with_fallback(&mut self, seat: SeatIndex, chosen: Option<Action>) -> GameResult<()> {
        let mut candidates = Vec::with_capacity(5);
        candidates.extend(chosen);
        candidates.push(self.config.default_action);
        candidates.extend([Action::Check, Action::Call, Action::Fold]);

        for action in candidates {
            match self.table.act(seat, action) {
                Ok(next) => {
                    self.table = next;
                    return Ok(());
                }
                Err(GameError::InvalidAction { action, reason }) => {
                    tracing::debug!("seat {}: {} rejected ({}), falling back", seat, action, reason);
                }
                Err(e) => return Err(e),
            }
        }

        // Folding is legal whenever it is the seat's turn.
        Err(GameError::InvalidGameState {
            state: "game loop".to_string(),
            reason: format!("no fallback action accepted for seat {}", seat),
        })
    }

    fn build_context(&mut self, seat: SeatIndex) -> Option<StrategyContext> {
        let players = self.table.view_for(Some(seat)).players;
        let hand = self.table.current_hand()?;
        let player = hand.player(seat)?;
        let legal = hand.legal_actions()?;

        let seen = self.seen_by_seat.get(&seat).copied().unwrap_or(0);
        let new_events = self.combined_log_from(seen);
        self.seen_by_seat.insert(seat, self.combined_log_len());

        Some(StrategyContext {
            seat,
            chips: player.chips,
            hole_cards: player.hole_cards,
            role: seat_role(hand, seat),
            phase: hand.phase,
            community: hand.community.clone(),
            pot_total: hand.pot_total(),
            players,
            legal,
            new_events,
        })
    }

    /// The table log plus the in-progress hand's log. The hand's events are
    /// appended to the table's on completion, so this view only ever grows.
    fn combined_log_len(&self) -> usize {
        self.table.events().len()
            + self
                .table
                .current_hand()
                .map(|h| h.events().len())
                .unwrap_or(0)
    }

    fn combined_log_from(&self, from: usize) -> Vec<GameEvent> {
        self.table
            .events()
            .iter()
            .chain(self.table.current_hand().into_iter().flat_map(|h| h.events()))
            .skip(from)
            .cloned()
            .collect()
    }

    fn emit_new_events(&mut self) {
        let events = self.combined_log_from(self.emitted);
        self.emitted = self.combined_log_len();
        if let Some(callback) = self.on_event.as_mut() {
            for event in &events {
                callback(event);
            }
        }
    }
}

fn seat_role(hand: &HandState, seat: SeatIndex) -> SeatRole {
    let order = &hand.seat_order;
    if order.first() == Some(&seat) {
        // Heads-up the button is also the small blind; button wins.
        SeatRole::Button
    } else if order.len() == 2 {
        SeatRole::BigBlind
    } else if order.get(1) == Some(&seat) {
        SeatRole::SmallBlind
    } else if order.get(2) == Some(&seat) {
        SeatRole::BigBlind
    } else {
        SeatRole::Other
    }
}
