use core::fmt;

use crate::domain::hand::{Hand, HandRank};

use super::evaluator::top_rank;

/// Человеческое описание руки по категории.
pub fn describe_hand(rank: HandRank) -> &'static str {
    match rank {
        HandRank::HighCard => "High card",
        HandRank::OnePair => "One pair",
        HandRank::TwoPair => "Two pair",
        HandRank::ThreeOfAKind => "Three of a kind",
        HandRank::Straight => "Straight",
        HandRank::Flush => "Flush",
        HandRank::FullHouse => "Full house",
        HandRank::FourOfAKind => "Four of a kind",
        HandRank::StraightFlush => "Straight flush",
        HandRank::RoyalFlush => "Royal flush",
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(describe_hand(*self))
    }
}

/// Описание вместе со старшей картой: `"Straight (5)"`, `"One pair (K)"`.
/// Для роял-флеша старшая карта не пишется.
pub fn describe_with_top(hand: &Hand) -> String {
    match top_rank(hand) {
        Some(top) => format!("{} ({})", hand.rank, top),
        None => hand.rank.to_string(),
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", describe_with_top(self))?;
        for (i, c) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str("]")
    }
}
