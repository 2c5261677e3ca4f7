//! End-to-end hand scenarios driven through the public table API.

use holdem_engine::game::{
    Action, ChaChaShuffler, Chips, ForcedBets, GameEvent, Phase, SeatIndex, TableState,
};

fn seat(i: u8) -> SeatIndex {
    SeatIndex::new(i).unwrap()
}

fn chips(n: u64) -> Chips {
    Chips::new(n)
}

fn blinds(sb: u64, bb: u64) -> ForcedBets {
    ForcedBets {
        small_blind: chips(sb),
        big_blind: chips(bb),
    }
}

fn table_with_players(stacks: &[(u8, u64)]) -> TableState {
    let mut table = TableState::new(9, blinds(1, 2)).unwrap();
    for &(s, c) in stacks {
        table = table.sit_down(seat(s), chips(c)).unwrap();
    }
    table
}

#[test]
fn heads_up_fold_pays_blinds_to_the_big_blind() {
    let table = table_with_players(&[(0, 100), (1, 100)]);
    let mut shuffler = ChaChaShuffler::seeded(1);
    let table = table.start_next_hand(&mut shuffler).unwrap();

    // Heads-up the button posts the small blind and acts first.
    assert_eq!(table.button(), Some(seat(0)));
    assert_eq!(table.active_seat(), Some(seat(0)));

    let table = table.act(seat(0), Action::Fold).unwrap();
    assert!(table.current_hand().is_none());
    assert_eq!(table.player_at(seat(0)).unwrap().chips, chips(99));
    assert_eq!(table.player_at(seat(1)).unwrap().chips, chips(101));

    // The hand's full event log, in order (skipping the two seatings).
    let events = &table.events()[2..];
    assert_eq!(events.len(), 8);
    assert!(matches!(&events[0], GameEvent::HandStarted { button, .. } if *button == seat(0)));
    assert!(matches!(
        &events[1],
        GameEvent::BlindsPosted {
            small_blind_seat,
            small_blind,
            big_blind_seat,
            big_blind,
        } if *small_blind_seat == seat(0)
            && *small_blind == chips(1)
            && *big_blind_seat == seat(1)
            && *big_blind == chips(2)
    ));
    assert!(matches!(&events[2], GameEvent::HoleCardsDealt { seat: s } if *s == seat(0)));
    assert!(matches!(&events[3], GameEvent::HoleCardsDealt { seat: s } if *s == seat(1)));
    assert!(matches!(
        &events[4],
        GameEvent::PlayerActed { seat: s, action: Action::Fold } if *s == seat(0)
    ));
    assert!(matches!(
        &events[5],
        GameEvent::BettingRoundEnded { phase: Phase::Preflop }
    ));
    assert!(matches!(
        &events[6],
        GameEvent::PotAwarded { seat: s, amount, pot_index: 0 }
            if *s == seat(1) && *amount == chips(3)
    ));
    assert!(matches!(&events[7], GameEvent::HandEnded));
}

#[test]
fn three_way_check_down_reaches_showdown() {
    let table = table_with_players(&[(0, 100), (1, 100), (2, 100)]);
    let mut shuffler = ChaChaShuffler::seeded(2);
    let mut table = table.start_next_hand(&mut shuffler).unwrap();

    // Preflop: the button opens three-handed (seat after the big blind).
    assert_eq!(table.active_seat(), Some(seat(0)));
    table = table.act(seat(0), Action::Call).unwrap();
    table = table.act(seat(1), Action::Call).unwrap();
    table = table.act(seat(2), Action::Check).unwrap();

    // Flop, turn, river: the small blind opens each street, everyone checks.
    for expected_board in [3usize, 4, 5] {
        let hand = table.current_hand().expect("hand still running");
        assert_eq!(hand.community.len(), expected_board);
        for s in [1u8, 2, 0] {
            assert_eq!(table.active_seat(), Some(seat(s)));
            table = table.act(seat(s), Action::Check).unwrap();
        }
    }

    // Showdown happened and the chips moved without leaking.
    assert!(table.current_hand().is_none());
    assert_eq!(table.total_chips(), chips(300));

    let showdowns = table
        .events()
        .iter()
        .filter(|e| matches!(e, GameEvent::ShowdownStarted))
        .count();
    let awards = table
        .events()
        .iter()
        .filter(|e| matches!(e, GameEvent::PotAwarded { .. }))
        .count();
    let ends = table
        .events()
        .iter()
        .filter(|e| matches!(e, GameEvent::HandEnded))
        .count();
    assert_eq!(showdowns, 1);
    assert!(awards >= 1);
    assert_eq!(ends, 1);

    let awarded: u64 = table
        .events()
        .iter()
        .filter_map(|e| match e {
            GameEvent::PotAwarded { amount, .. } => Some(amount.amount()),
            _ => None,
        })
        .sum();
    assert_eq!(awarded, 6);
}

#[test]
fn mixed_all_ins_split_into_side_pots() {
    // Seat 1 is the short stack; three-way all-in preflop layers the pots.
    let table = table_with_players(&[(0, 100), (1, 50), (2, 100)]);
    let mut shuffler = ChaChaShuffler::seeded(5);
    let mut table = table.start_next_hand(&mut shuffler).unwrap();

    table = table.act(seat(0), Action::AllIn).unwrap();
    table = table.act(seat(1), Action::AllIn).unwrap();
    table = table.act(seat(2), Action::AllIn).unwrap();

    // Board runs out with nobody left to act.
    assert!(table.current_hand().is_none());
    assert_eq!(table.total_chips(), chips(250));

    let awards: Vec<(u8, u64, usize)> = table
        .events()
        .iter()
        .filter_map(|e| match e {
            GameEvent::PotAwarded {
                seat,
                amount,
                pot_index,
            } => Some((seat.index(), amount.amount(), *pot_index)),
            _ => None,
        })
        .collect();

    // Main pot (150) plus one side pot (100), both fully paid out.
    let total: u64 = awards.iter().map(|(_, amount, _)| amount).sum();
    assert_eq!(total, 250);
    let main: u64 = awards
        .iter()
        .filter(|(_, _, idx)| *idx == 0)
        .map(|(_, amount, _)| amount)
        .sum();
    let side: u64 = awards
        .iter()
        .filter(|(_, _, idx)| *idx == 1)
        .map(|(_, amount, _)| amount)
        .sum();
    assert_eq!(main, 150);
    assert_eq!(side, 100);

    // The short stack can never win the side pot.
    assert!(awards
        .iter()
        .all(|(winner, _, idx)| !(*idx == 1 && *winner == 1)));
}

#[test]
fn button_alternates_and_chips_conserve_across_hands() {
    let mut table = table_with_players(&[(0, 100), (1, 100)]);
    let mut shuffler = ChaChaShuffler::seeded(8);

    for expected_button in [0u8, 1, 0, 1, 0, 1] {
        table = table.start_next_hand(&mut shuffler).unwrap();
        assert_eq!(table.button(), Some(seat(expected_button)));
        let active = table.active_seat().unwrap();
        table = table.act(active, Action::Fold).unwrap();
        assert!(table.current_hand().is_none());
        assert_eq!(table.total_chips(), chips(200));
    }
    assert_eq!(table.hand_count(), 6);
}

#[test]
fn raising_war_reaches_showdown_with_conservation() {
    let table = table_with_players(&[(0, 200), (1, 200), (2, 200)]);
    let mut shuffler = ChaChaShuffler::seeded(13);
    let mut table = table.start_next_hand(&mut shuffler).unwrap();

    // Preflop: raise, re-raise, everyone calls.
    table = table.act(seat(0), Action::Raise(chips(6))).unwrap();
    table = table.act(seat(1), Action::Raise(chips(20))).unwrap();
    table = table.act(seat(2), Action::Call).unwrap();
    table = table.act(seat(0), Action::Call).unwrap();

    // Flop: bet and calls.
    table = table.act(seat(1), Action::Bet(chips(30))).unwrap();
    table = table.act(seat(2), Action::Call).unwrap();
    table = table.act(seat(0), Action::Call).unwrap();

    // Turn and river: checked through.
    for _ in 0..2 {
        table = table.act(seat(1), Action::Check).unwrap();
        table = table.act(seat(2), Action::Check).unwrap();
        table = table.act(seat(0), Action::Check).unwrap();
    }

    assert!(table.current_hand().is_none());
    assert_eq!(table.total_chips(), chips(600));

    let awarded: u64 = table
        .events()
        .iter()
        .filter_map(|e| match e {
            GameEvent::PotAwarded { amount, .. } => Some(amount.amount()),
            _ => None,
        })
        .sum();
    assert_eq!(awarded, 150);
}
