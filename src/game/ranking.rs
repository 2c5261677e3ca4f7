//! Hand-ranking oracle
//!
//! Thin wrapper over the rs_poker evaluator. The engine only relies on the
//! total order of `rank_value`; everything else (name, description, the best
//! five cards) is informational.

use itertools::Itertools;
use rs_poker::core::{Hand, Rank as RsRank, Rankable};
use serde::Serialize;
use std::cmp::Ordering;

use crate::game::deck::Card;
use crate::game::error::{GameError, GameResult};

/// The strength of a player's best five-card hand.
///
/// Two ranks tie exactly when their `rank_value`s are equal; the descriptive
/// fields never participate in comparisons.
#[derive(Debug, Clone, Serialize)]
pub struct HandRank {
    /// Totally ordered strength; higher beats lower.
    pub rank_value: u64,
    pub name: &'static str,
    pub description: String,
    /// The five cards making up the best hand.
    pub best_cards: Vec<Card>,
}

impl PartialEq for HandRank {
    fn eq(&self, other: &Self) -> bool {
        self.rank_value == other.rank_value
    }
}

impl Eq for HandRank {}

impl PartialOrd for HandRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank_value.cmp(&other.rank_value)
    }
}

fn class_of(rank: &RsRank) -> (u64, u32, &'static str) {
    match rank {
        RsRank::HighCard(x) => (0, *x, "High Card"),
        RsRank::OnePair(x) => (1, *x, "Pair"),
        RsRank::TwoPair(x) => (2, *x, "Two Pair"),
        RsRank::ThreeOfAKind(x) => (3, *x, "Three of a Kind"),
        RsRank::Straight(x) => (4, *x, "Straight"),
        RsRank::Flush(x) => (5, *x, "Flush"),
        RsRank::FullHouse(x) => (6, *x, "Full House"),
        RsRank::FourOfAKind(x) => (7, *x, "Four of a Kind"),
        RsRank::StraightFlush(x) => (8, *x, "Straight Flush"),
    }
}

/// Rank the best five-card hand available from 5-7 cards.
pub fn rank_cards(cards: &[Card]) -> GameResult<HandRank> {
    if !(5..=7).contains(&cards.len()) {
        return Err(GameError::InvalidGameState {
            state: "ranking".to_string(),
            reason: format!("expected 5-7 cards, got {}", cards.len()),
        });
    }

    let mut best: Option<(RsRank, Vec<Card>)> = None;
    for combo in cards.iter().copied().combinations(5) {
        let hand = Hand::new_with_cards(combo.iter().map(|c| c.to_rs_poker()).collect());
        let rank = hand.rank();
        match &best {
            Some((current, _)) if rank <= *current => {}
            _ => best = Some((rank, combo)),
        }
    }

    // At least one combination exists for 5+ cards.
    let (rank, best_cards) = best.ok_or_else(|| GameError::InvalidGameState {
        state: "ranking".to_string(),
        reason: "no five-card combination".to_string(),
    })?;

    let (class, kickers, name) = class_of(&rank);
    let cards_desc = best_cards.iter().map(|c| c.to_string()).join(" ");

    Ok(HandRank {
        rank_value: (class << 32) | kickers as u64,
        name,
        description: format!("{} ({})", name, cards_desc),
        best_cards,
    })
}
