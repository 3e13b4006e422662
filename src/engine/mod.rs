//! Покерный движок: ставки, переход улиц, вскрытие.
//!
//! Высокоуровневый объект: `PokerTable`
//! Основные операции:
//!   - `add_player` / `remove_player` – рассадка между раздачами
//!   - `start_game` – запустить новую раздачу
//!   - `action` – применить действие игрока
//!   - `get_state` – снимок стола с точки зрения зрителя

pub mod actions;
pub mod betting;
pub mod errors;
pub mod events;
pub mod game_loop;
pub mod poker_table;
pub mod positions;
pub mod validation;

pub use actions::{Action, ActionKind};
pub use betting::BettingState;
pub use errors::PokerError;
pub use events::{BlindPost, EventType, GameEvent, HandEvent, HandHistory};
pub use game_loop::{apply_action, start_hand};
pub use poker_table::PokerTable;
pub use validation::{valid_actions, validate_action};

use crate::domain::card::Card;

/// RNG интерфейс для engine.
/// Реализации – в infra (обёртки над `rand` и детерминированные для тестов).
pub trait RandomSource {
    fn shuffle(&mut self, cards: &mut [Card]);
}
