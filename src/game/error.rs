//! Engine error types
//!
//! Every fallible transition returns one of these as a value; the engine
//! never panics on bad input and never leaves a state partially mutated.

use crate::game::actions::Action;
use crate::game::chips::SeatIndex;
use std::fmt;

/// Errors that can occur during engine operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    // Table construction
    InvalidConfig { reason: String },

    // Seating
    SeatOccupied { seat: SeatIndex },
    SeatEmpty { seat: SeatIndex },
    TableFull,

    // Hand lifecycle
    HandInProgress,
    NoHandInProgress,
    NotEnoughPlayers { count: usize, min: usize },

    // Turn ordering
    NotPlayersTurn { seat: SeatIndex, expected: Option<SeatIndex> },

    // Action validation
    InvalidAction { action: Action, reason: String },

    // Guards against programming errors; unreachable in well-formed flows
    InvalidGameState { state: String, reason: String },
    DeckExhausted { requested: usize, remaining: usize },

    // Card parsing
    InvalidCard { input: String, reason: String },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidConfig { reason } => {
                write!(f, "Invalid table configuration: {}", reason)
            }

            GameError::SeatOccupied { seat } => {
                write!(f, "Seat {} is already occupied", seat)
            }
            GameError::SeatEmpty { seat } => write!(f, "Seat {} is empty", seat),
            GameError::TableFull => write!(f, "Table is full"),

            GameError::HandInProgress => {
                write!(f, "Cannot perform action while a hand is in progress")
            }
            GameError::NoHandInProgress => write!(f, "No hand is in progress"),
            GameError::NotEnoughPlayers { count, min } => {
                write!(
                    f,
                    "Not enough players to start a hand: have {}, need {}",
                    count, min
                )
            }

            GameError::NotPlayersTurn { seat, expected } => match expected {
                Some(expected) => {
                    write!(f, "Not seat {}'s turn; seat {} is to act", seat, expected)
                }
                None => write!(f, "Not seat {}'s turn; no seat is to act", seat),
            },

            GameError::InvalidAction { action, reason } => {
                write!(f, "Invalid action {}: {}", action, reason)
            }

            GameError::InvalidGameState { state, reason } => {
                write!(f, "Invalid game state ({}): {}", state, reason)
            }
            GameError::DeckExhausted {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "Deck exhausted: requested {} cards, {} remaining",
                    requested, remaining
                )
            }

            GameError::InvalidCard { input, reason } => {
                write!(f, "Invalid card {:?}: {}", input, reason)
            }
        }
    }
}

impl std::error::Error for GameError {}

/// Result type for engine operations
pub type GameResult<T> = Result<T, GameError>;
