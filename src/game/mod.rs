pub mod actions;
pub mod betting;
pub mod chips;
pub mod constants;
pub mod deck;
pub mod error;
pub mod events;
pub mod hand;
pub mod player;
pub mod pot;
pub mod ranking;
pub mod table;
pub mod view;

// Re-export commonly used items

// Table and hand state
pub use hand::{ForcedBets, HandState, Phase};
pub use table::{TableConfig, TableState};
pub use view::{PlayerView, TableView};

// Player and action types
pub use actions::{Action, LegalActions};
pub use player::Player;

// Primitives
pub use chips::{Chips, HandId, SeatIndex};
pub use deck::{Card, ChaChaShuffler, Deck, Shuffler};

// Pots and ranking
pub use pot::{Pot, PotAward};
pub use ranking::HandRank;

// Events and errors
pub use error::{GameError, GameResult};
pub use events::GameEvent;
