use crate::domain::{Chips, DeckExhausted};

use thiserror::Error;

/// Ошибки движка покера.
///
/// Любая ошибка означает, что операция отклонена целиком: состояние стола не менялось.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PokerError {
    #[error("Стол заполнен")]
    TableFull,

    #[error("Недостаточно игроков для раздачи (нужно минимум 2)")]
    NotEnoughPlayers,

    #[error("Раздача уже идёт")]
    GameAlreadyStarted,

    #[error("Недопустимый игрок: {0}")]
    InvalidPlayer(String),

    #[error("Недопустимое действие: {0}")]
    InvalidAction(String),

    #[error("Недостаточно фишек: нужно {needed}, в стеке {available}")]
    InsufficientChips { needed: Chips, available: Chips },

    #[error(transparent)]
    DeckExhausted(#[from] DeckExhausted),

    /// Некорректная конфигурация стола.
    #[error("Некорректный конфиг стола: {0}")]
    InvalidConfig(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}

impl PokerError {
    /// InsufficientChips – частный случай недопустимого действия.
    pub fn is_invalid_action(&self) -> bool {
        matches!(
            self,
            PokerError::InvalidAction(_) | PokerError::InsufficientChips { .. }
        )
    }
}
