//! Внешний контракт: снимки состояния и сериализуемые команды.

pub mod commands;
pub mod dto;
pub mod queries;

pub use commands::{execute, Command, CommandResponse};
pub use dto::{ActionResult, GameState, PlayerState, WaitingFor};
pub use queries::{build_game_state, build_waiting_for};
