use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::{Card, Rank, Suit};
use crate::engine::RandomSource;

/// Попытка взять больше карт, чем осталось в колоде.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("В колоде осталось {remaining} карт, запрошено {requested}")]
pub struct DeckExhausted {
    pub requested: usize,
    pub remaining: usize,
}

/// Колода карт. В домене – просто упорядоченный список карт.
/// Перемешивание делает engine (через RNG из infra), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    /// Перемешать оставшиеся карты источником случайности `rng`.
    pub fn shuffle<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        rng.shuffle(&mut self.cards);
    }

    /// Сколько карт ещё можно сдать.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Сдать `n` карт сверху (с начала списка).
    ///
    /// Если карт меньше `n` – ошибка, колода не меняется.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, DeckExhausted> {
        if self.cards.len() < n {
            return Err(DeckExhausted {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..n).collect())
    }

    /// Сдать одну карту сверху.
    pub fn deal_one(&mut self) -> Result<Card, DeckExhausted> {
        if self.cards.is_empty() {
            return Err(DeckExhausted {
                requested: 1,
                remaining: 0,
            });
        }
        Ok(self.cards.remove(0))
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard_52()
    }
}
