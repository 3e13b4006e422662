use serde::{Deserialize, Serialize};

use crate::domain::card::Card;

/// Фаза стола.
///
/// `Waiting` – только до первой раздачи, `Showdown` – только после её завершения
/// (фолдом всех, кроме одного, или вскрытием после ривера).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    Waiting,
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl GamePhase {
    /// Можно ли сейчас менять рассадку / начинать новую раздачу.
    pub fn is_between_hands(self) -> bool {
        matches!(self, GamePhase::Waiting | GamePhase::Showdown)
    }

    /// Следующая улица и сколько карт борда на ней открывается.
    pub fn next_street(self) -> Option<(GamePhase, usize)> {
        match self {
            GamePhase::PreFlop => Some((GamePhase::Flop, 3)),
            GamePhase::Flop => Some((GamePhase::Turn, 1)),
            GamePhase::Turn => Some((GamePhase::River, 1)),
            _ => None,
        }
    }
}

/// Категория покерной руки по силе (0 = старшая карта … 9 = роял-флеш).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandRank {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl HandRank {
    pub fn value(self) -> u8 {
        self as u8
    }
}

/// Лучшая 5-карточная рука игрока.
///
/// Создаётся только оценщиком (`eval::evaluate`). `tiebreakers` – числовые ранги
/// (2..=14), которые сравниваются слева направо при равной категории.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hand {
    pub(crate) cards: [Card; 5],
    pub(crate) rank: HandRank,
    pub(crate) tiebreakers: Vec<u8>,
}

impl Hand {
    pub(crate) fn new(cards: [Card; 5], rank: HandRank, tiebreakers: Vec<u8>) -> Self {
        Self {
            cards,
            rank,
            tiebreakers,
        }
    }

    /// Пять карт, составивших руку.
    pub fn cards(&self) -> &[Card; 5] {
        &self.cards
    }

    pub fn rank(&self) -> HandRank {
        self.rank
    }

    pub fn tiebreakers(&self) -> &[u8] {
        &self.tiebreakers
    }
}
