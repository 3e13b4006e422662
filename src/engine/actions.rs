use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Chips;

/// Намерение игрока. Не привязано к игроку – кто действует, передаётся отдельно.
///
/// Суммы `Bet`/`Raise` – итоговая ставка игрока в раунде, а не прибавка.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Action {
    Fold,
    Check,
    Call,
    /// Bet на улице, где ещё нет ставки.
    Bet(Chips),
    /// Raise существующей ставки.
    Raise(Chips),
}

/// Вид действия без суммы (для списка допустимых действий).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Fold => ActionKind::Fold,
            Action::Check => ActionKind::Check,
            Action::Call => ActionKind::Call,
            Action::Bet(_) => ActionKind::Bet,
            Action::Raise(_) => ActionKind::Raise,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => f.write_str("fold"),
            Action::Check => f.write_str("check"),
            Action::Call => f.write_str("call"),
            Action::Bet(amount) => write!(f, "bet {amount}"),
            Action::Raise(amount) => write!(f, "raise to {amount}"),
        }
    }
}
