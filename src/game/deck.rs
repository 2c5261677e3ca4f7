use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::game::chips::SeatIndex;
use crate::game::constants::{FLOP_CARDS, HOLE_CARDS_PER_SEAT};
use crate::game::error::{GameError, GameResult};

/// Suit encoding: Clubs=0, Diamonds=1, Hearts=2, Spades=3
pub const SUIT_CLUBS: u8 = 0;
pub const SUIT_DIAMONDS: u8 = 1;
pub const SUIT_HEARTS: u8 = 2;
pub const SUIT_SPADES: u8 = 3;

/// A playing card: rank 2-14 (Jack=11, Queen=12, King=13, Ace=14), suit 0-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: u8,
    pub suit: u8,
}

impl Card {
    pub const fn new(rank: u8, suit: u8) -> Self {
        Self { rank, suit }
    }

    fn rank_char(rank: u8) -> char {
        match rank {
            2..=9 => (b'0' + rank) as char,
            10 => 'T',
            11 => 'J',
            12 => 'Q',
            13 => 'K',
            14 => 'A',
            _ => '?',
        }
    }

    fn suit_char(suit: u8) -> char {
        match suit {
            SUIT_CLUBS => 'c',
            SUIT_DIAMONDS => 'd',
            SUIT_HEARTS => 'h',
            SUIT_SPADES => 's',
            _ => '?',
        }
    }

    /// Convert to an rs_poker card for hand evaluation
    pub(crate) fn to_rs_poker(self) -> rs_poker::core::Card {
        use rs_poker::core::{Suit, Value};

        let value = match self.rank {
            2 => Value::Two,
            3 => Value::Three,
            4 => Value::Four,
            5 => Value::Five,
            6 => Value::Six,
            7 => Value::Seven,
            8 => Value::Eight,
            9 => Value::Nine,
            10 => Value::Ten,
            11 => Value::Jack,
            12 => Value::Queen,
            13 => Value::King,
            _ => Value::Ace,
        };

        let suit = match self.suit {
            SUIT_CLUBS => Suit::Club,
            SUIT_DIAMONDS => Suit::Diamond,
            SUIT_HEARTS => Suit::Heart,
            _ => Suit::Spade,
        };

        rs_poker::core::Card { value, suit }
    }

    /// Convert from an rs_poker card back to ours
    pub(crate) fn from_rs_poker(card: &rs_poker::core::Card) -> Self {
        use rs_poker::core::{Suit, Value};

        let rank = match card.value {
            Value::Two => 2,
            Value::Three => 3,
            Value::Four => 4,
            Value::Five => 5,
            Value::Six => 6,
            Value::Seven => 7,
            Value::Eight => 8,
            Value::Nine => 9,
            Value::Ten => 10,
            Value::Jack => 11,
            Value::Queen => 12,
            Value::King => 13,
            Value::Ace => 14,
        };

        let suit = match card.suit {
            Suit::Club => SUIT_CLUBS,
            Suit::Diamond => SUIT_DIAMONDS,
            Suit::Heart => SUIT_HEARTS,
            Suit::Spade => SUIT_SPADES,
        };

        Card::new(rank, suit)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            Self::rank_char(self.rank),
            Self::suit_char(self.suit)
        )
    }
}

impl FromStr for Card {
    type Err = GameError;

    fn from_str(s: &str) -> GameResult<Self> {
        let mut chars = s.chars();
        let (rank_ch, suit_ch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(su), None) => (r, su),
            _ => {
                return Err(GameError::InvalidCard {
                    input: s.to_string(),
                    reason: "expected two characters, e.g. \"Ah\"".to_string(),
                })
            }
        };

        let rank = match rank_ch {
            '2'..='9' => rank_ch as u8 - b'0',
            'T' => 10,
            'J' => 11,
            'Q' => 12,
            'K' => 13,
            'A' => 14,
            _ => {
                return Err(GameError::InvalidCard {
                    input: s.to_string(),
                    reason: format!("unknown rank {:?}", rank_ch),
                })
            }
        };

        let suit = match suit_ch {
            'c' => SUIT_CLUBS,
            'd' => SUIT_DIAMONDS,
            'h' => SUIT_HEARTS,
            's' => SUIT_SPADES,
            _ => {
                return Err(GameError::InvalidCard {
                    input: s.to_string(),
                    reason: format!("unknown suit {:?}", suit_ch),
                })
            }
        };

        Ok(Card::new(rank, suit))
    }
}

/// The single effectful operation in the engine: producing a permutation of
/// the 52-card universe. Seeded shufflers give fully reproducible hands.
pub trait Shuffler {
    fn shuffle(&mut self, cards: &mut [Card]);
}

/// ChaCha20-backed shuffler, the production implementation.
pub struct ChaChaShuffler {
    rng: ChaCha20Rng,
}

impl ChaChaShuffler {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }
}

impl Shuffler for ChaChaShuffler {
    fn shuffle(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut self.rng);
    }
}

/// An ordered sequence of cards. Produced by the shuffler at hand start,
/// shrinks as cards are drawn, discarded when the hand completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The full 52-card universe in rank-major order.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for rank in 2..=14 {
            for suit in 0..4 {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    /// A freshly shuffled deck.
    pub fn shuffled(shuffler: &mut dyn Shuffler) -> Self {
        let mut deck = Self::standard();
        shuffler.shuffle(&mut deck.cards);
        deck
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Draw `n` cards from the top of the deck.
    pub fn draw(&mut self, n: usize) -> GameResult<Vec<Card>> {
        if self.cards.len() < n {
            return Err(GameError::DeckExhausted {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..n).collect())
    }

    fn draw_one(&mut self) -> GameResult<Card> {
        if self.cards.is_empty() {
            return Err(GameError::DeckExhausted {
                requested: 1,
                remaining: 0,
            });
        }
        Ok(self.cards.remove(0))
    }

    /// Discard the top card before dealing a street.
    fn burn(&mut self) -> GameResult<()> {
        self.draw_one().map(|_| ())
    }

    /// Deal two consecutive cards to each seat, in seat-order sequence.
    pub fn deal_hole_cards(
        &mut self,
        seat_order: &[SeatIndex],
    ) -> GameResult<Vec<(SeatIndex, [Card; 2])>> {
        let needed = seat_order.len() * HOLE_CARDS_PER_SEAT;
        if self.cards.len() < needed {
            return Err(GameError::DeckExhausted {
                requested: needed,
                remaining: self.cards.len(),
            });
        }
        let mut dealt = Vec::with_capacity(seat_order.len());
        for &seat in seat_order {
            let cards = self.draw(HOLE_CARDS_PER_SEAT)?;
            dealt.push((seat, [cards[0], cards[1]]));
        }
        Ok(dealt)
    }

    /// Burn one card, deal the three flop cards.
    pub fn deal_flop(&mut self) -> GameResult<[Card; 3]> {
        self.burn()?;
        let cards = self.draw(FLOP_CARDS)?;
        Ok([cards[0], cards[1], cards[2]])
    }

    /// Burn one card, deal one (turn or river).
    pub fn deal_one(&mut self) -> GameResult<Card> {
        self.burn()?;
        self.draw_one()
    }
}
