use crate::domain::hand::GamePhase;
use crate::domain::table::Table;
use crate::domain::PlayerId;
use crate::engine::validation::valid_actions;

use super::dto::{GameState, PlayerState, WaitingFor};

/// Собрать снимок стола с точки зрения `viewer`.
///
/// Чужие карманные карты скрыты до вскрытия. `viewer = None` – сторонний наблюдатель.
pub fn build_game_state(table: &Table, viewer: Option<PlayerId>) -> GameState {
    let reveal_all = table.phase == GamePhase::Showdown;

    let players = table
        .seats
        .iter()
        .map(|p| {
            let visible = reveal_all || viewer == Some(p.player_id);
            PlayerState {
                player_id: p.player_id,
                chips: p.chips,
                current_bet: p.current_bet,
                status: p.status,
                hole_cards: visible.then(|| p.hole_cards.clone()),
            }
        })
        .collect();

    let players_to_act = table
        .betting
        .players_to_act
        .iter()
        .filter_map(|&seat| table.player(seat).map(|p| p.player_id))
        .collect();

    GameState {
        table_id: table.id,
        phase: table.phase,
        pot: table.pot,
        current_bet: table.betting.current_bet,
        community_cards: table.board.clone(),
        players,
        dealer_id: table.player(table.dealer).map(|p| p.player_id),
        current_player_id: table.player(table.current_actor).map(|p| p.player_id),
        small_blind: table.config.small_blind,
        big_blind: table.config.big_blind,
        players_to_act,
    }
}

/// Кого ждёт стол. `None` между раздачами и когда ходить некому.
pub fn build_waiting_for(table: &Table) -> Option<WaitingFor> {
    if table.phase.is_between_hands() || table.betting.is_round_complete() {
        return None;
    }
    let player = table.player(table.current_actor)?;
    Some(WaitingFor {
        player_id: player.player_id,
        valid_actions: valid_actions(player, &table.betting),
        timeout_seconds: table.config.timeout_seconds,
    })
}
