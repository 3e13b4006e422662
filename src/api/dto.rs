use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::GamePhase;
use crate::domain::player::PlayerStatus;
use crate::domain::{PlayerId, TableId};
use crate::engine::actions::ActionKind;
use crate::engine::events::GameEvent;

/// Снимок игрока за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerState {
    pub player_id: PlayerId,
    pub chips: Chips,
    pub current_bet: Chips,
    pub status: PlayerStatus,
    /// Карманные карты – только владельцу или после вскрытия.
    pub hole_cards: Option<Vec<Card>>,
}

/// Снимок стола. Копия, а не ссылка внутрь стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameState {
    pub table_id: TableId,
    pub phase: GamePhase,
    pub pot: Chips,
    pub current_bet: Chips,
    pub community_cards: Vec<Card>,
    pub players: Vec<PlayerState>,
    /// Дилер. `None`, если за столом никого.
    pub dealer_id: Option<PlayerId>,
    /// Чей ход. `None`, если за столом никого.
    pub current_player_id: Option<PlayerId>,
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Кто ещё должен ходить на этой улице.
    pub players_to_act: Vec<PlayerId>,
}

impl GameState {
    pub fn player(&self, player_id: PlayerId) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.player_id == player_id)
    }
}

/// Кого ждём и что ему можно.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WaitingFor {
    pub player_id: PlayerId,
    pub valid_actions: Vec<ActionKind>,
    /// Время на ход. Только информация: таймер ведёт внешний слой.
    pub timeout_seconds: u32,
}

/// Результат start_game / action.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ActionResult {
    pub state: GameState,
    /// События в порядке возникновения.
    pub events: Vec<GameEvent>,
    /// `None`, когда раздача закончилась.
    pub waiting_for: Option<WaitingFor>,
}

impl ActionResult {
    pub fn is_hand_over(&self) -> bool {
        self.waiting_for.is_none()
    }
}
