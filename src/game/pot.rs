use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::game::chips::{Chips, SeatIndex};
use crate::game::player::Player;
use crate::game::ranking::HandRank;

/// A pot (main or side). Every seat in `eligible` fully matched this pot's
/// per-player contribution; folded players fund pots but never appear here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: Chips,
    pub eligible: BTreeSet<SeatIndex>,
}

/// One seat's winnings from one pot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotAward {
    pub seat: SeatIndex,
    pub amount: Chips,
    pub pot_index: usize,
}

/// Sweep each player's `current_bet` into pots, layering side pots for
/// mixed all-in amounts.
///
/// The sweep repeatedly takes the smallest outstanding bet level `m`,
/// collects `m` from every contributor, and forms a pot whose eligible set
/// is the non-folded players who matched that level. Pots with identical
/// eligible sets merge; the first new pot also merges into the last existing
/// pot when their eligible sets match. Newly folded seats are pruned from
/// existing pots so no pot ever lists a folded player.
///
/// Every player's `current_bet` is zero on return.
pub fn collect_bets(players: &mut [Player], existing_pots: Vec<Pot>) -> Vec<Pot> {
    let mut pots = existing_pots;

    // A seat that folded this round keeps funding the pots it already fed,
    // but can no longer win any of them.
    let folded: BTreeSet<SeatIndex> = players
        .iter()
        .filter(|p| p.is_folded)
        .map(|p| p.seat)
        .collect();
    for pot in pots.iter_mut() {
        pot.eligible.retain(|seat| !folded.contains(seat));
    }

    let mut swept: Vec<Pot> = Vec::new();
    loop {
        let m = match players
            .iter()
            .map(|p| p.current_bet)
            .filter(|b| !b.is_zero())
            .min()
        {
            Some(m) => m,
            None => break,
        };

        let eligible: BTreeSet<SeatIndex> = players
            .iter()
            .filter(|p| p.current_bet >= m && !p.is_folded)
            .map(|p| p.seat)
            .collect();

        let mut amount = Chips::ZERO;
        for p in players.iter_mut() {
            let contribution = p.current_bet.min(m);
            amount += contribution;
            p.current_bet -= contribution;
        }

        match swept.last_mut() {
            Some(prev) if prev.eligible == eligible => prev.amount += amount,
            _ => swept.push(Pot { amount, eligible }),
        }
    }

    if swept.is_empty() {
        return pots;
    }

    tracing::debug!(
        "collect_bets: swept {} pot level(s), totals {:?}",
        swept.len(),
        swept.iter().map(|p| p.amount).collect::<Vec<_>>()
    );

    let mut swept = swept.into_iter();
    // A round where nobody went all-in produces one pot with the same
    // eligible set as the pot already on the table; fold it in.
    if let Some(first) = swept.next() {
        match pots.last_mut() {
            Some(last) if last.eligible == first.eligible => last.amount += first.amount,
            _ => pots.push(first),
        }
    }
    pots.extend(swept);

    pots
}

/// Pay out each pot in order.
///
/// A pot goes to the highest-ranked eligible seat; ties split evenly with
/// the odd chip going to the first tied winner clockwise from the button.
/// Awards within a pot are listed in that clockwise order. A pot with no
/// ranked contender is skipped.
pub fn award_pots(
    pots: &[Pot],
    ranks: &BTreeMap<SeatIndex, HandRank>,
    button: SeatIndex,
    seat_order: &[SeatIndex],
) -> Vec<PotAward> {
    // Clockwise rotation: the seat immediately after the button comes first.
    let clockwise: Vec<SeatIndex> = match seat_order.iter().position(|&s| s == button) {
        Some(pos) => seat_order[pos + 1..]
            .iter()
            .chain(seat_order[..=pos].iter())
            .copied()
            .collect(),
        None => seat_order.to_vec(),
    };

    let mut awards = Vec::new();
    for (pot_index, pot) in pots.iter().enumerate() {
        let contenders: Vec<SeatIndex> = pot
            .eligible
            .iter()
            .filter(|seat| ranks.contains_key(seat))
            .copied()
            .collect();

        if contenders.is_empty() {
            tracing::warn!("pot {} has no ranked contenders, skipping", pot_index);
            continue;
        }

        if contenders.len() == 1 {
            awards.push(PotAward {
                seat: contenders[0],
                amount: pot.amount,
                pot_index,
            });
            continue;
        }

        let best = contenders
            .iter()
            .map(|seat| ranks[seat].rank_value)
            .max()
            .unwrap_or(0);
        let winners: BTreeSet<SeatIndex> = contenders
            .into_iter()
            .filter(|seat| ranks[seat].rank_value == best)
            .collect();

        let share = Chips::new(pot.amount.amount() / winners.len() as u64);
        let mut remainder = pot.amount - Chips::new(share.amount() * winners.len() as u64);

        for &seat in clockwise.iter().filter(|s| winners.contains(s)) {
            let amount = share + std::mem::take(&mut remainder);
            awards.push(PotAward {
                seat,
                amount,
                pot_index,
            });
        }
    }

    awards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::deck::Card;
    use crate::game::ranking::HandRank;

    fn seat(i: u8) -> SeatIndex {
        SeatIndex::new(i).unwrap()
    }

    fn player_with_bet(i: u8, bet: u64, folded: bool) -> Player {
        let mut p = Player::new(seat(i), Chips::new(1000));
        p.place_bet(Chips::new(bet));
        if folded {
            p.fold();
        }
        p
    }

    fn rank(value: u64) -> HandRank {
        HandRank {
            rank_value: value,
            name: "High Card",
            description: "High Card".to_string(),
            best_cards: Vec::<Card>::new(),
        }
    }

    fn seats(pot: &Pot) -> Vec<u8> {
        pot.eligible.iter().map(|s| s.index()).collect()
    }

    #[test]
    fn test_single_level_single_pot() {
        let mut players = vec![
            player_with_bet(0, 100, false),
            player_with_bet(1, 100, false),
            player_with_bet(2, 100, false),
        ];
        let pots = collect_bets(&mut players, Vec::new());

        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, Chips::new(300));
        assert_eq!(seats(&pots[0]), vec![0, 1, 2]);
        assert!(players.iter().all(|p| p.current_bet.is_zero()));
    }

    #[test]
    fn test_short_all_in_builds_side_pot() {
        // Seat 0 is all-in for 50; seats 1 and 2 put in 100.
        let mut players = vec![
            player_with_bet(0, 50, false),
            player_with_bet(1, 100, false),
            player_with_bet(2, 100, false),
        ];
        let pots = collect_bets(&mut players, Vec::new());

        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, Chips::new(150));
        assert_eq!(seats(&pots[0]), vec![0, 1, 2]);
        assert_eq!(pots[1].amount, Chips::new(100));
        assert_eq!(seats(&pots[1]), vec![1, 2]);
    }

    #[test]
    fn test_two_different_all_ins_build_three_pots() {
        // 30 all-in, 70 all-in, 100 -> 90/{0,1,2}, 80/{1,2}, 30/{2}
        let mut players = vec![
            player_with_bet(0, 30, false),
            player_with_bet(1, 70, false),
            player_with_bet(2, 100, false),
        ];
        let pots = collect_bets(&mut players, Vec::new());

        assert_eq!(pots.len(), 3);
        assert_eq!(pots[0].amount, Chips::new(90));
        assert_eq!(seats(&pots[0]), vec![0, 1, 2]);
        assert_eq!(pots[1].amount, Chips::new(80));
        assert_eq!(seats(&pots[1]), vec![1, 2]);
        assert_eq!(pots[2].amount, Chips::new(30));
        assert_eq!(seats(&pots[2]), vec![2]);
    }

    #[test]
    fn test_folded_contributor_pays_but_is_ineligible() {
        let mut players = vec![
            player_with_bet(0, 100, true),
            player_with_bet(1, 200, false),
            player_with_bet(2, 200, false),
        ];
        let pots = collect_bets(&mut players, Vec::new());

        let total: Chips = pots.iter().map(|p| p.amount).sum();
        assert_eq!(total, Chips::new(500));
        for pot in &pots {
            assert!(!pot.eligible.contains(&seat(0)));
        }
    }

    #[test]
    fn test_merge_with_existing_pot_on_equal_eligibility() {
        let existing = vec![Pot {
            amount: Chips::new(30),
            eligible: [seat(0), seat(1), seat(2)].into_iter().collect(),
        }];
        let mut players = vec![
            player_with_bet(0, 20, false),
            player_with_bet(1, 20, false),
            player_with_bet(2, 20, false),
        ];
        let pots = collect_bets(&mut players, existing);

        // Same three seats are eligible, so the street's bets join the main pot.
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, Chips::new(90));
    }

    #[test]
    fn test_street_with_new_all_in_layers_on_existing() {
        let existing = vec![Pot {
            amount: Chips::new(30),
            eligible: [seat(0), seat(1), seat(2)].into_iter().collect(),
        }];
        // Seat 0 went all-in short this street.
        let mut players = vec![
            player_with_bet(0, 10, false),
            player_with_bet(1, 50, false),
            player_with_bet(2, 50, false),
        ];
        let pots = collect_bets(&mut players, existing);

        // The matched layer joins the main pot; the overage forms a side pot.
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, Chips::new(60));
        assert_eq!(seats(&pots[0]), vec![0, 1, 2]);
        assert_eq!(pots[1].amount, Chips::new(80));
        assert_eq!(seats(&pots[1]), vec![1, 2]);
    }

    #[test]
    fn test_no_merge_when_eligibility_differs() {
        // The last existing pot is a side pot seat 0 never matched.
        let existing = vec![Pot {
            amount: Chips::new(45),
            eligible: [seat(1), seat(2)].into_iter().collect(),
        }];
        let mut players = vec![
            player_with_bet(0, 20, false),
            player_with_bet(1, 20, false),
            player_with_bet(2, 20, false),
        ];
        let pots = collect_bets(&mut players, existing);

        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, Chips::new(45));
        assert_eq!(seats(&pots[0]), vec![1, 2]);
        assert_eq!(pots[1].amount, Chips::new(60));
        assert_eq!(seats(&pots[1]), vec![0, 1, 2]);
    }

    #[test]
    fn test_late_fold_pruned_from_existing_pots() {
        let existing = vec![Pot {
            amount: Chips::new(60),
            eligible: [seat(0), seat(1), seat(2)].into_iter().collect(),
        }];
        // Seat 2 bet this street and then folded to a raise.
        let mut players = vec![
            player_with_bet(0, 40, false),
            player_with_bet(1, 40, false),
            player_with_bet(2, 40, true),
        ];
        let pots = collect_bets(&mut players, existing);

        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, Chips::new(180));
        assert_eq!(seats(&pots[0]), vec![0, 1]);
    }

    #[test]
    fn test_conservation_across_sweep() {
        let existing = vec![Pot {
            amount: Chips::new(45),
            eligible: [seat(1), seat(3)].into_iter().collect(),
        }];
        let mut players = vec![
            player_with_bet(0, 500, false),
            player_with_bet(1, 800, true),
            player_with_bet(2, 800, false),
            player_with_bet(3, 120, false),
        ];
        let bet_total: Chips = players.iter().map(|p| p.current_bet).sum();

        let pots = collect_bets(&mut players, existing);
        let pot_total: Chips = pots.iter().map(|p| p.amount).sum();
        assert_eq!(pot_total, bet_total + Chips::new(45));
    }

    #[test]
    fn test_award_single_winner_takes_pot() {
        let pots = vec![Pot {
            amount: Chips::new(300),
            eligible: [seat(0), seat(1), seat(2)].into_iter().collect(),
        }];
        let mut ranks = BTreeMap::new();
        ranks.insert(seat(0), rank(10));
        ranks.insert(seat(1), rank(50));
        ranks.insert(seat(2), rank(30));

        let awards = award_pots(&pots, &ranks, seat(0), &[seat(0), seat(1), seat(2)]);
        assert_eq!(awards.len(), 1);
        assert_eq!(awards[0].seat, seat(1));
        assert_eq!(awards[0].amount, Chips::new(300));
        assert_eq!(awards[0].pot_index, 0);
    }

    #[test]
    fn test_award_odd_chip_goes_clockwise_from_button() {
        // Pot of 301, seats 0 and 2 tie, button at seat 1:
        // clockwise order is 2,3,0,1 so seat 2 takes the odd chip.
        let pots = vec![Pot {
            amount: Chips::new(301),
            eligible: [seat(0), seat(1), seat(2), seat(3)].into_iter().collect(),
        }];
        let mut ranks = BTreeMap::new();
        ranks.insert(seat(0), rank(5));
        ranks.insert(seat(1), rank(1));
        ranks.insert(seat(2), rank(5));
        ranks.insert(seat(3), rank(2));

        let order = [seat(0), seat(1), seat(2), seat(3)];
        let awards = award_pots(&pots, &ranks, seat(1), &order);

        assert_eq!(awards.len(), 2);
        assert_eq!(awards[0].seat, seat(2));
        assert_eq!(awards[0].amount, Chips::new(151));
        assert_eq!(awards[1].seat, seat(0));
        assert_eq!(awards[1].amount, Chips::new(150));
    }

    #[test]
    fn test_award_side_pots_in_order() {
        // Short stack wins the main pot; the overbettor gets the side pot back.
        let pots = vec![
            Pot {
                amount: Chips::new(100),
                eligible: [seat(0), seat(1)].into_iter().collect(),
            },
            Pot {
                amount: Chips::new(50),
                eligible: [seat(1)].into_iter().collect(),
            },
        ];
        let mut ranks = BTreeMap::new();
        ranks.insert(seat(0), rank(90));
        ranks.insert(seat(1), rank(10));

        let awards = award_pots(&pots, &ranks, seat(0), &[seat(0), seat(1)]);
        assert_eq!(awards.len(), 2);
        assert_eq!((awards[0].seat, awards[0].amount), (seat(0), Chips::new(100)));
        assert_eq!((awards[1].seat, awards[1].amount), (seat(1), Chips::new(50)));
        assert_eq!(awards[1].pot_index, 1);
    }

    #[test]
    fn test_award_skips_pot_without_contenders() {
        let pots = vec![Pot {
            amount: Chips::new(40),
            eligible: [seat(4)].into_iter().collect(),
        }];
        let ranks = BTreeMap::new();
        let awards = award_pots(&pots, &ranks, seat(0), &[seat(0), seat(4)]);
        assert!(awards.is_empty());
    }
}
