//! Texas Hold'em Engine Core
//!
//! A deterministic, event-sourced poker engine: given a seated roster, a
//! dealer button, and forced-bet amounts, it shuffles, posts blinds, deals,
//! sequences the betting rounds, layers side pots on all-ins, ranks hands
//! at showdown, and distributes the awards, appending an event for every
//! observable change. All transitions are pure; the only effect is the
//! shuffler, which can be seeded for fully reproducible hands.
//!
//! The [`game`] module is the engine itself; [`driver`] is an optional
//! pull-model loop that plays hands by polling pluggable strategies.

pub mod driver;
pub mod game;

pub use game::{
    Action, Card, ChaChaShuffler, Chips, ForcedBets, GameError, GameEvent, GameResult, HandId,
    HandState, LegalActions, Phase, Player, Pot, SeatIndex, Shuffler, TableState,
};
