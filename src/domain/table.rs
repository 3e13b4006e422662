use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::GamePhase;
use crate::domain::player::Player;
use crate::domain::{PlayerId, TableId};
use crate::engine::betting::BettingState;

/// Индекс места за столом (позиция в векторе `Table::seats`).
pub type SeatIndex = usize;

/// Конфиг стола: сколько мест, блайнды и время на ход.
///
/// Все поля имеют значения по умолчанию, поэтому в JSON можно задавать только нужные.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    /// Максимальное количество мест за столом.
    pub max_players: usize,
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Время на ход. Движок его только передаёт наружу, не отсчитывает.
    pub timeout_seconds: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_players: 6,
            small_blind: Chips(25),
            big_blind: Chips(50),
            timeout_seconds: 30,
        }
    }
}

impl TableConfig {
    pub fn new(max_players: usize, small_blind: Chips, big_blind: Chips) -> Self {
        Self {
            max_players,
            small_blind,
            big_blind,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout_seconds: u32) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Загрузить конфиг из JSON.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Проверка здравого смысла. Возвращает описание проблемы.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_players < 2 {
            return Err(format!("max_players = {} (нужно минимум 2)", self.max_players));
        }
        if self.big_blind.is_zero() {
            return Err("big_blind не может быть нулевым".into());
        }
        if self.small_blind > self.big_blind {
            return Err(format!(
                "small_blind {} больше big_blind {}",
                self.small_blind, self.big_blind
            ));
        }
        Ok(())
    }
}

/// Основное состояние стола – единственный изменяемый источник правды.
///
/// Места адресуются индексом (арена + индекс), поэтому игрок остаётся
/// на своём индексе всю раздачу. Рассадка меняется только между раздачами.
#[derive(Clone, Debug)]
pub struct Table {
    pub id: TableId,
    pub config: TableConfig,

    /// Игроки в порядке рассадки.
    pub seats: Vec<Player>,

    pub deck: Deck,

    /// Банк. Фишки попадают сюда сразу при ставке.
    pub pot: Chips,

    /// Раунд ставок текущей улицы: целевая ставка и кто ещё должен ходить.
    pub betting: BettingState,

    /// Общие карты борда (0–5 карт).
    pub board: Vec<Card>,

    pub phase: GamePhase,

    /// Место дилерской кнопки.
    pub dealer: SeatIndex,

    /// Чей сейчас ход.
    pub current_actor: SeatIndex,
}

impl Table {
    /// Создать пустой стол с заданной конфигурацией.
    pub fn new(id: TableId, config: TableConfig) -> Self {
        Self {
            id,
            config,
            seats: Vec::new(),
            deck: Deck::standard_52(),
            pot: Chips::ZERO,
            betting: BettingState::default(),
            board: Vec::new(),
            phase: GamePhase::Waiting,
            dealer: 0,
            current_actor: 0,
        }
    }

    pub fn is_full(&self) -> bool {
        self.seats.len() >= self.config.max_players
    }

    pub fn seat_of(&self, player_id: PlayerId) -> Option<SeatIndex> {
        self.seats.iter().position(|p| p.player_id == player_id)
    }

    pub fn player(&self, seat: SeatIndex) -> Option<&Player> {
        self.seats.get(seat)
    }

    /// Сумма всех фишек за столом: банк + стеки.
    pub fn total_chips(&self) -> Chips {
        self.pot + self.seats.iter().map(|p| p.chips).sum::<Chips>()
    }
}
