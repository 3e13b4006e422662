use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};

use crate::domain::card::Card;
use crate::engine::RandomSource;

/// Боевой RNG: перемешивание через `thread_rng`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut thread_rng());
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Позволяет воспроизводить одни и те же раздачи при одинаковом seed.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut self.inner);
    }
}

/// "Заряженная" колода для сценариев.
///
/// На каждую раздачу берётся очередной список карт: они встают наверх колоды
/// в заданном порядке, остальные сохраняют исходный порядок.
/// Когда списки кончились, колода не перемешивается вовсе.
#[derive(Clone, Debug, Default)]
pub struct StackedRng {
    hands: VecDeque<Vec<Card>>,
}

impl StackedRng {
    /// Без перемешивания: колода остаётся в стандартном порядке.
    pub fn unshuffled() -> Self {
        Self::default()
    }

    /// Одна заряженная раздача.
    pub fn new(top: Vec<Card>) -> Self {
        Self::sequence(vec![top])
    }

    /// Несколько раздач подряд.
    pub fn sequence(hands: Vec<Vec<Card>>) -> Self {
        Self {
            hands: hands.into(),
        }
    }

    /// Сколько заряженных раздач ещё осталось.
    pub fn pending(&self) -> usize {
        self.hands.len()
    }
}

impl RandomSource for StackedRng {
    fn shuffle(&mut self, cards: &mut [Card]) {
        let Some(top) = self.hands.pop_front() else {
            return;
        };
        // Стабильная сортировка: сначала карты из `top` по их позиции, затем остальные.
        cards.sort_by_key(|c| top.iter().position(|t| t == c).unwrap_or(top.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::deck::Deck;

    #[test]
    fn same_seed_same_deck() {
        let mut a = Deck::standard_52();
        let mut b = Deck::standard_52();
        a.shuffle(&mut DeterministicRng::from_seed(42));
        b.shuffle(&mut DeterministicRng::from_seed(42));
        assert_eq!(a.cards, b.cards);
    }

    #[test]
    fn stacked_cards_go_on_top() {
        let top: Vec<Card> = vec!["As".parse().unwrap(), "Kd".parse().unwrap()];
        let mut deck = Deck::standard_52();
        let mut rng = StackedRng::new(top.clone());
        deck.shuffle(&mut rng);
        assert_eq!(&deck.cards[..2], top.as_slice());
        assert_eq!(deck.remaining(), 52);
        assert_eq!(rng.pending(), 0);

        // Второй раз – без изменений.
        let before = deck.cards.clone();
        deck.shuffle(&mut rng);
        assert_eq!(deck.cards, before);
    }
}
