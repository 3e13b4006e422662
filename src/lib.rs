//! Движок одного стола Texas Hold'em.
//!
//! Слои:
//!   - `domain` – карты, фишки, колода, игроки, стол;
//!   - `eval` – оценка и сравнение рук;
//!   - `engine` – автомат раздачи и фасад `PokerTable`;
//!   - `api` – снимки состояния и команды для внешнего слоя;
//!   - `infra` – реализации RNG.
//!
//! Логи идут через `log`; логгер ставит приложение, библиотека – никогда.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;

pub use api::{ActionResult, GameState, PlayerState, WaitingFor};
pub use engine::{Action, ActionKind, GameEvent, PokerError, PokerTable, RandomSource};
