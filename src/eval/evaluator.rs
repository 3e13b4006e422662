use std::cmp::Ordering;

use crate::domain::card::{Card, Rank};
use crate::domain::hand::{Hand, HandRank};

use super::lookup_tables::{detect_straight, rank_to_bit, RankMask, BROADWAY_MASK};

/// Главная функция: вычислить лучшую 5-карточную руку из hole + board.
///
/// Ожидается `hole.len() == 2` и `board.len() == 5`, но работает для любых 5+ карт.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> Option<Hand> {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);
    evaluate(&all_cards)
}

/// Перебираем все комбинации 5 карт из N (для 7 карт – 21 комбинация) и выбираем лучшую.
///
/// `None`, если карт меньше пяти. При равных по силе комбинациях
/// возвращается первая найденная.
pub fn evaluate(cards: &[Card]) -> Option<Hand> {
    let n = cards.len();
    if n < 5 {
        return None;
    }

    let mut best: Option<Hand> = None;

    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let hand = evaluate_five(five);
                        let better = match &best {
                            None => true,
                            Some(current) => compare(&hand, current) == Ordering::Greater,
                        };
                        if better {
                            best = Some(hand);
                        }
                    }
                }
            }
        }
    }

    best
}

/// Сравнение двух рук: сначала категория, затем tiebreakers слева направо.
///
/// `Greater` – первая рука сильнее, `Equal` – настоящая ничья.
pub fn compare(a: &Hand, b: &Hand) -> Ordering {
    a.rank
        .cmp(&b.rank)
        .then_with(|| a.tiebreakers.cmp(&b.tiebreakers))
}

/// Оценка строго 5-карточной комбинации.
pub fn evaluate_five(cards: [Card; 5]) -> Hand {
    let first_suit = cards[0].suit;
    let is_flush = cards.iter().all(|c| c.suit == first_suit);

    // Подсчёт рангов.
    let mut rank_counts = [0u8; 15]; // индексы 0..14, но используем 2..14
    let mut rank_mask: RankMask = 0;
    for card in cards.iter() {
        rank_counts[card.rank.value() as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    // Маска из пяти бит возможна только при пяти разных рангах.
    let straight_high = detect_straight(rank_mask);

    // (rank, count), отсортированные по количеству (desc), затем по рангу (desc).
    let mut by_count: Vec<(u8, u8)> = (2u8..=14)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (r, rank_counts[r as usize]))
        .collect();
    by_count.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    // pattern: [4,1], [3,2], [3,1,1], [2,2,1], [2,1,1,1], [1,1,1,1,1]
    let pattern: Vec<u8> = by_count.iter().map(|&(_, count)| count).collect();
    let grouped: Vec<u8> = by_count.iter().map(|&(rank, _)| rank).collect();

    let mut descending: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    descending.sort_unstable_by(|a, b| b.cmp(a));

    if is_flush {
        if let Some(high) = straight_high {
            if rank_mask == BROADWAY_MASK {
                return Hand::new(cards, HandRank::RoyalFlush, Vec::new());
            }
            return Hand::new(cards, HandRank::StraightFlush, vec![high.value()]);
        }
    }

    match pattern.as_slice() {
        // Каре: [ранг каре, кикер]
        [4, 1] => return Hand::new(cards, HandRank::FourOfAKind, grouped),
        // Фулл-хаус: [ранг тройки, ранг пары]
        [3, 2] => return Hand::new(cards, HandRank::FullHouse, grouped),
        _ => {}
    }

    if is_flush {
        return Hand::new(cards, HandRank::Flush, descending);
    }

    if let Some(high) = straight_high {
        return Hand::new(cards, HandRank::Straight, vec![high.value()]);
    }

    // Для остальных категорий `grouped` уже идёт в нужном порядке:
    // сначала группа, затем кикеры по убыванию.
    let rank = match pattern.as_slice() {
        [3, 1, 1] => HandRank::ThreeOfAKind,
        [2, 2, 1] => HandRank::TwoPair,
        [2, 1, 1, 1] => HandRank::OnePair,
        _ => HandRank::HighCard,
    };
    Hand::new(cards, rank, grouped)
}

/// Старший ранг в tiebreakers как `Rank` (удобно для описаний).
pub fn top_rank(hand: &Hand) -> Option<Rank> {
    hand.tiebreakers.first().and_then(|&v| Rank::from_value(v))
}
