use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{GamePhase, Hand};
use crate::domain::PlayerId;
use crate::engine::actions::Action;

/// Вид события (без данных).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    PlayerJoined,
    PlayerLeft,
    GameStarted,
    HandDealt,
    PlayerActed,
    RoundEnded,
    CommunityDealt,
    TurnChanged,
    Showdown,
}

/// Постинг блайнда: кто и сколько реально поставил (может быть меньше блайнда).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindPost {
    pub player_id: PlayerId,
    pub amount: Chips,
}

/// Событие за столом.
///
/// В JSON выглядит как `{"type": "PLAYER_ACTED", "payload": {...}}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameEvent {
    PlayerJoined {
        player_id: PlayerId,
        chips: Chips,
    },

    PlayerLeft {
        player_id: PlayerId,
    },

    /// Новая раздача началась, блайнды собраны.
    GameStarted {
        dealer_id: PlayerId,
        small_blind: BlindPost,
        big_blind: BlindPost,
    },

    /// Карманные карты розданы. Сами карты в событие не кладём.
    HandDealt {
        deal_order: Vec<PlayerId>,
    },

    PlayerActed {
        player_id: PlayerId,
        action: Action,
        /// Сколько фишек ушло из стека в банк.
        chips_moved: Chips,
        pot_after: Chips,
    },

    /// Раунд ставок на улице `phase` завершён.
    RoundEnded {
        phase: GamePhase,
    },

    /// Открыты общие карты. `community_cards` – весь борд целиком.
    CommunityDealt {
        phase: GamePhase,
        community_cards: Vec<Card>,
    },

    TurnChanged {
        player_id: PlayerId,
    },

    /// Раздача завершена. `hands` пуст, если все, кроме победителя, сфолдили.
    Showdown {
        winner_id: PlayerId,
        pot: Chips,
        hands: BTreeMap<PlayerId, Hand>,
    },
}

impl GameEvent {
    pub fn event_type(&self) -> EventType {
        match self {
            GameEvent::PlayerJoined { .. } => EventType::PlayerJoined,
            GameEvent::PlayerLeft { .. } => EventType::PlayerLeft,
            GameEvent::GameStarted { .. } => EventType::GameStarted,
            GameEvent::HandDealt { .. } => EventType::HandDealt,
            GameEvent::PlayerActed { .. } => EventType::PlayerActed,
            GameEvent::RoundEnded { .. } => EventType::RoundEnded,
            GameEvent::CommunityDealt { .. } => EventType::CommunityDealt,
            GameEvent::TurnChanged { .. } => EventType::TurnChanged,
            GameEvent::Showdown { .. } => EventType::Showdown,
        }
    }
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HandEvent {
    pub index: u32,
    pub event: GameEvent,
}

/// Полная история текущей (или последней завершённой) раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: GameEvent) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, event });
    }

    pub fn extend<I: IntoIterator<Item = GameEvent>>(&mut self, events: I) {
        for e in events {
            self.push(e);
        }
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
