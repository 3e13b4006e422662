use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::SeatIndex;

/// Состояние раунда ставок (на конкретной улице).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Текущая целевая ставка, до которой должны дотянуться игроки (BB, bet, raise).
    pub current_bet: Chips,
    /// Места, которые ещё должны сделать действие на этой улице.
    /// Раунд заканчивается ровно тогда, когда множество пусто.
    pub players_to_act: BTreeSet<SeatIndex>,
}

impl BettingState {
    pub fn new(current_bet: Chips, players_to_act: BTreeSet<SeatIndex>) -> Self {
        Self {
            current_bet,
            players_to_act,
        }
    }

    /// Удалить seat из очереди, если он там есть.
    pub fn mark_acted(&mut self, seat: SeatIndex) {
        self.players_to_act.remove(&seat);
    }

    /// Bet/raise: новая целевая ставка, и раунд заново открыт для всех,
    /// кроме агрессора (список формирует engine).
    pub fn on_raise(&mut self, new_bet: Chips, reopened: BTreeSet<SeatIndex>) {
        self.current_bet = new_bet;
        self.players_to_act = reopened;
    }

    pub fn is_round_complete(&self) -> bool {
        self.players_to_act.is_empty()
    }
}
