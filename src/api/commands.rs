use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::PlayerId;
use crate::engine::actions::Action;
use crate::engine::errors::PokerError;
use crate::engine::events::GameEvent;
use crate::engine::poker_table::PokerTable;
use crate::engine::RandomSource;

use super::dto::{ActionResult, GameState};

/// Команды к столу – то, что приходит из внешнего слоя (сеть, очередь, CLI).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    AddPlayer { player_id: PlayerId, chips: Chips },
    RemovePlayer { player_id: PlayerId },
    StartGame,
    Act { player_id: PlayerId, action: Action },
    /// Снимок стола глазами `viewer` (или наблюдателя).
    GetState { viewer: Option<PlayerId> },
}

/// Ответ на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum CommandResponse {
    /// Рассадка изменилась.
    Seating(GameEvent),
    /// Раздача продвинулась.
    Progress(ActionResult),
    State(GameState),
}

/// Выполнить команду на столе.
pub fn execute<R: RandomSource>(
    table: &mut PokerTable<R>,
    cmd: Command,
) -> Result<CommandResponse, PokerError> {
    match cmd {
        Command::AddPlayer { player_id, chips } => {
            table.add_player(player_id, chips).map(CommandResponse::Seating)
        }
        Command::RemovePlayer { player_id } => {
            table.remove_player(player_id).map(CommandResponse::Seating)
        }
        Command::StartGame => table.start_game().map(CommandResponse::Progress),
        Command::Act { player_id, action } => {
            table.action(player_id, action).map(CommandResponse::Progress)
        }
        Command::GetState { viewer } => Ok(CommandResponse::State(table.get_state(viewer))),
    }
}
