use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Статус игрока именно в контексте текущей раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Игрок активен: может делать ставки.
    Active,
    /// Игрок сфолдил и больше не участвует в банке.
    Folded,
    /// Игрок в олл-ине – ставок больше не делает, но банк выиграть может.
    AllIn,
}

/// Состояние игрока за столом.
///
/// Принадлежит только столу; снаружи видны лишь снимки (`api::PlayerState`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub player_id: PlayerId,
    /// Текущий стек за столом.
    pub chips: Chips,
    /// Ставка в текущем раунде (для удобства движка).
    pub current_bet: Chips,
    pub status: PlayerStatus,
    /// Карманные карты (0 или 2).
    pub hole_cards: Vec<Card>,
}

impl Player {
    pub fn new(player_id: PlayerId, chips: Chips) -> Self {
        Self {
            player_id,
            chips,
            current_bet: Chips::ZERO,
            status: PlayerStatus::Active,
            hole_cards: Vec::new(),
        }
    }

    /// Сброс перед новой раздачей: карты, ставка и флаги.
    pub fn reset_for_new_hand(&mut self) {
        self.hole_cards.clear();
        self.current_bet = Chips::ZERO;
        self.status = PlayerStatus::Active;
    }

    /// Не сфолдил и не в олл-ине.
    pub fn is_active(&self) -> bool {
        matches!(self.status, PlayerStatus::Active)
    }

    /// Не сфолдил (олл-ин тоже в раздаче).
    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    pub fn is_folded(&self) -> bool {
        matches!(self.status, PlayerStatus::Folded)
    }

    pub fn is_all_in(&self) -> bool {
        matches!(self.status, PlayerStatus::AllIn)
    }

    /// Переложить `amount` из стека в ставку раунда.
    ///
    /// Возвращает `None`, если фишек не хватает (стек не меняется).
    /// Обнулившийся стек переводит игрока в олл-ин.
    pub fn commit(&mut self, amount: Chips) -> Option<Chips> {
        let rest = self.chips.checked_sub(amount)?;
        self.chips = rest;
        self.current_bet += amount;
        if self.chips.is_zero() {
            self.status = PlayerStatus::AllIn;
        }
        Some(amount)
    }
}
