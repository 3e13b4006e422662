use log::{info, warn};

use crate::api::dto::{ActionResult, GameState, WaitingFor};
use crate::api::queries::{build_game_state, build_waiting_for};
use crate::domain::chips::Chips;
use crate::domain::table::{Table, TableConfig};
use crate::domain::{Player, PlayerId, TableId};
use crate::engine::actions::Action;
use crate::engine::errors::PokerError;
use crate::engine::events::{GameEvent, HandHistory};
use crate::engine::game_loop::{apply_action, start_hand};
use crate::engine::RandomSource;
use crate::infra::rng::SystemRng;

/// Стол целиком: состояние + источник случайности + история текущей раздачи.
///
/// Все операции атомарны: либо применяются полностью, либо возвращают ошибку
/// и не трогают стол. Доступ снаружи должен быть эксклюзивным (`&mut self`).
#[derive(Debug)]
pub struct PokerTable<R: RandomSource = SystemRng> {
    table: Table,
    rng: R,
    history: HandHistory,
}

impl PokerTable<SystemRng> {
    /// Стол с системным RNG.
    pub fn new(id: TableId, config: TableConfig) -> Result<Self, PokerError> {
        Self::with_rng(id, config, SystemRng)
    }
}

impl<R: RandomSource> PokerTable<R> {
    /// Стол с заданным RNG (детерминированные тесты, реплей).
    pub fn with_rng(id: TableId, config: TableConfig, rng: R) -> Result<Self, PokerError> {
        config.validate().map_err(PokerError::InvalidConfig)?;
        Ok(Self {
            table: Table::new(id, config),
            rng,
            history: HandHistory::new(),
        })
    }

    pub fn id(&self) -> TableId {
        self.table.id
    }

    pub fn config(&self) -> &TableConfig {
        &self.table.config
    }

    /// Read-only доступ к внутреннему состоянию.
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn hand_history(&self) -> &HandHistory {
        &self.history
    }

    /// Банк + все стеки.
    pub fn total_chips(&self) -> Chips {
        self.table.total_chips()
    }

    /// Посадить игрока. Только между раздачами.
    pub fn add_player(&mut self, player_id: PlayerId, chips: Chips) -> Result<GameEvent, PokerError> {
        if self.table.is_full() {
            return Err(self.rejected("add_player", PokerError::TableFull));
        }
        if !self.table.phase.is_between_hands() {
            return Err(self.rejected("add_player", PokerError::GameAlreadyStarted));
        }
        if self.table.seat_of(player_id).is_some() {
            return Err(self.rejected(
                "add_player",
                PokerError::InvalidPlayer(format!("игрок {player_id} уже за столом")),
            ));
        }
        if chips.is_zero() {
            return Err(self.rejected(
                "add_player",
                PokerError::InvalidPlayer(format!("игрок {player_id}: пустой стек")),
            ));
        }
        // Сумма фишек за столом должна помещаться в u64 – дальше все сложения безопасны.
        if self.table.total_chips().checked_add(chips).is_none() {
            return Err(self.rejected(
                "add_player",
                PokerError::InvalidPlayer(format!(
                    "игрок {player_id}: стек {chips} переполняет сумму фишек стола"
                )),
            ));
        }

        self.table.seats.push(Player::new(player_id, chips));
        info!(
            "table {}: player {} joined with {}",
            self.table.id, player_id, chips
        );
        Ok(GameEvent::PlayerJoined { player_id, chips })
    }

    /// Убрать игрока. Только между раздачами; отсутствующий игрок – не ошибка.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<GameEvent, PokerError> {
        if !self.table.phase.is_between_hands() {
            return Err(self.rejected("remove_player", PokerError::GameAlreadyStarted));
        }

        if let Some(seat) = self.table.seat_of(player_id) {
            self.table.seats.remove(seat);
            // Кнопка остаётся у того же игрока.
            if seat < self.table.dealer {
                self.table.dealer -= 1;
            }
            if self.table.dealer >= self.table.seats.len() {
                self.table.dealer = 0;
            }
            self.table.current_actor = self.table.dealer;
            info!("table {}: player {} left", self.table.id, player_id);
        }

        Ok(GameEvent::PlayerLeft { player_id })
    }

    /// Начать новую раздачу.
    pub fn start_game(&mut self) -> Result<ActionResult, PokerError> {
        let events = match start_hand(&mut self.table, &mut self.rng) {
            Ok(events) => events,
            Err(e) => return Err(self.rejected("start_game", e)),
        };
        self.history.clear();
        self.history.extend(events.iter().cloned());
        Ok(self.result(events))
    }

    /// Действие игрока, чей сейчас ход.
    pub fn action(&mut self, player_id: PlayerId, action: Action) -> Result<ActionResult, PokerError> {
        let events = match apply_action(&mut self.table, player_id, action) {
            Ok(events) => events,
            Err(e) => return Err(self.rejected("action", e)),
        };
        self.history.extend(events.iter().cloned());
        Ok(self.result(events))
    }

    /// Снимок стола глазами `viewer`.
    pub fn get_state(&self, viewer: Option<PlayerId>) -> GameState {
        build_game_state(&self.table, viewer)
    }

    /// Кого ждём сейчас.
    pub fn waiting_for(&self) -> Option<WaitingFor> {
        build_waiting_for(&self.table)
    }

    fn result(&self, events: Vec<GameEvent>) -> ActionResult {
        ActionResult {
            state: self.get_state(None),
            events,
            waiting_for: self.waiting_for(),
        }
    }

    fn rejected(&self, op: &str, err: PokerError) -> PokerError {
        warn!("table {}: {} rejected: {}", self.table.id, op, err);
        err
    }
}
