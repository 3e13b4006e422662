use std::collections::HashSet;

use holdem_engine::domain::{
    card::{parse_cards, Card, Rank, Suit},
    chips::Chips,
    deck::{Deck, DeckExhausted},
    hand::GamePhase,
    player::{Player, PlayerStatus},
    table::TableConfig,
};
use holdem_engine::infra::{DeterministicRng, StackedRng};

// ----------------------
// Card
// ----------------------

#[test]
fn card_text_form_round_trips() {
    let c: Card = "Td".parse().unwrap();
    assert_eq!(c, Card::new(Rank::Ten, Suit::Diamonds));
    assert_eq!(c.to_string(), "Td");
    assert_eq!("ah".parse::<Card>().unwrap().to_string(), "Ah");
}

#[test]
fn bad_card_strings_are_rejected() {
    assert!("1h".parse::<Card>().is_err());
    assert!("Ax".parse::<Card>().is_err());
    assert!("A".parse::<Card>().is_err());
    assert!("10h".parse::<Card>().is_err());
    assert!(parse_cards("Ah Kx").is_err());
}

#[test]
fn rank_values_are_two_to_fourteen() {
    assert_eq!(Rank::Two.value(), 2);
    assert_eq!(Rank::Ace.value(), 14);
    assert_eq!(Rank::from_value(11), Some(Rank::Jack));
    assert_eq!(Rank::from_value(1), None);
    assert_eq!(Rank::from_value(15), None);
}

// ----------------------
// Chips
// ----------------------

#[test]
fn chips_never_go_negative() {
    let a = Chips::new(30);
    assert_eq!(a.checked_sub(Chips::new(10)), Some(Chips::new(20)));
    assert_eq!(a.checked_sub(Chips::new(31)), None);
    assert_eq!(Chips::new(10).deficit_to(Chips::new(25)), Chips::new(15));
    assert_eq!(Chips::new(40).deficit_to(Chips::new(25)), Chips::ZERO);
}

// ----------------------
// Deck
// ----------------------

#[test]
fn standard_deck_has_52_unique_cards() {
    let deck = Deck::standard_52();
    assert_eq!(deck.remaining(), 52);
    let unique: HashSet<Card> = deck.cards.iter().copied().collect();
    assert_eq!(unique.len(), 52);
}

#[test]
fn deal_takes_from_the_top_and_never_repeats() {
    let mut deck = Deck::standard_52();
    deck.shuffle(&mut DeterministicRng::from_seed(3));

    let mut seen = HashSet::new();
    while !deck.is_empty() {
        for c in deck.deal(4).unwrap() {
            assert!(seen.insert(c), "карта {c} сдана дважды");
        }
    }
    assert_eq!(seen.len(), 52);
}

#[test]
fn deal_beyond_remaining_fails_without_side_effects() {
    let mut deck = Deck::standard_52();
    deck.deal(50).unwrap();

    let err = deck.deal(3).unwrap_err();
    assert_eq!(
        err,
        DeckExhausted {
            requested: 3,
            remaining: 2
        }
    );
    assert_eq!(deck.remaining(), 2);
}

#[test]
fn unshuffled_deck_starts_with_clubs() {
    let mut deck = Deck::standard_52();
    deck.shuffle(&mut StackedRng::unshuffled());
    let top = deck.deal(3).unwrap();
    assert_eq!(top, parse_cards("2c 3c 4c").unwrap());
}

// ----------------------
// Player
// ----------------------

#[test]
fn commit_moves_chips_and_flags_all_in() {
    let mut p = Player::new(7, Chips::new(100));

    assert_eq!(p.commit(Chips::new(40)), Some(Chips::new(40)));
    assert_eq!(p.chips, Chips::new(60));
    assert_eq!(p.current_bet, Chips::new(40));
    assert!(p.is_active());

    // Больше, чем есть, – отказ без изменений.
    assert_eq!(p.commit(Chips::new(61)), None);
    assert_eq!(p.chips, Chips::new(60));

    p.commit(Chips::new(60)).unwrap();
    assert_eq!(p.status, PlayerStatus::AllIn);
    assert!(p.is_in_hand());
    assert!(!p.is_active());
}

// ----------------------
// Phase / config
// ----------------------

#[test]
fn streets_deal_three_one_one() {
    assert_eq!(GamePhase::PreFlop.next_street(), Some((GamePhase::Flop, 3)));
    assert_eq!(GamePhase::Flop.next_street(), Some((GamePhase::Turn, 1)));
    assert_eq!(GamePhase::Turn.next_street(), Some((GamePhase::River, 1)));
    assert_eq!(GamePhase::River.next_street(), None);
    assert!(GamePhase::Waiting.is_between_hands());
    assert!(GamePhase::Showdown.is_between_hands());
    assert!(!GamePhase::Flop.is_between_hands());
}

#[test]
fn table_config_defaults_fill_missing_json_fields() {
    let cfg = TableConfig::from_json_str(r#"{ "big_blind": 100 }"#).unwrap();
    assert_eq!(cfg.max_players, 6);
    assert_eq!(cfg.small_blind, Chips::new(25));
    assert_eq!(cfg.big_blind, Chips::new(100));
    assert_eq!(cfg.timeout_seconds, 30);
    assert!(cfg.validate().is_ok());
}

#[test]
fn table_config_validation() {
    assert!(TableConfig::default().validate().is_ok());
    assert!(TableConfig::new(1, Chips::new(10), Chips::new(20)).validate().is_err());
    assert!(TableConfig::new(6, Chips::new(10), Chips::ZERO).validate().is_err());
    assert!(TableConfig::new(6, Chips::new(30), Chips::new(20)).validate().is_err());
}
