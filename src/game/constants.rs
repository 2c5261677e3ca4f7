//! Engine-wide constants and default configuration values
//!
//! Centralizing these values makes it easier to:
//! - Adjust for testing
//! - Support future per-table customization

/// Smallest table the engine accepts
pub const MIN_TABLE_SEATS: usize = 2;

/// Largest table the engine accepts
pub const MAX_TABLE_SEATS: usize = 10;

/// Highest valid seat index (seats are numbered 0..=9)
pub const MAX_SEAT_INDEX: u8 = 9;

/// Minimum players with chips required to start a hand
pub const MIN_PLAYERS_TO_START: usize = 2;

/// Number of players for heads-up special blind/button rules
pub const HEADS_UP_PLAYER_COUNT: usize = 2;

/// Number of hole cards dealt to each seat
pub const HOLE_CARDS_PER_SEAT: usize = 2;

/// Community cards per street
pub const FLOP_CARDS: usize = 3;
pub const TURN_CARDS: usize = 1;
pub const RIVER_CARDS: usize = 1;

/// Driver safety cap: actions accepted within a single hand
pub const DEFAULT_MAX_ACTIONS_PER_HAND: usize = 500;

/// Driver safety cap: hands played in a single run
pub const DEFAULT_MAX_HANDS: usize = 10_000;
