use std::cmp::Ordering;
use std::collections::BTreeMap;

use log::{debug, info};

use crate::domain::chips::Chips;
use crate::domain::deck::{Deck, DeckExhausted};
use crate::domain::hand::{GamePhase, Hand};
use crate::domain::player::PlayerStatus;
use crate::domain::table::Table;
use crate::domain::{PlayerId, SeatIndex};
use crate::engine::actions::Action;
use crate::engine::betting::BettingState;
use crate::engine::errors::PokerError;
use crate::engine::events::{BlindPost, GameEvent};
use crate::engine::positions::{
    active_seats, active_seats_except, blind_seats, count_active, count_in_hand,
    next_active_seat, preflop_first_actor, seats_clockwise_from,
};
use crate::engine::validation::validate_action;
use crate::engine::RandomSource;
use crate::eval::{compare, evaluate_best_hand};

/// Карт на раздачу: по 2 каждому + 5 на борд.
fn cards_needed(players: usize) -> usize {
    players * 2 + 5
}

/// Старт новой раздачи:
/// - двигает кнопку и убирает игроков без фишек (если это не первая раздача);
/// - постит блайнды;
/// - раздаёт карманные карты;
/// - настраивает BettingState и current_actor.
///
/// Все проверки – до первой мутации стола.
pub fn start_hand<R: RandomSource + ?Sized>(
    table: &mut Table,
    rng: &mut R,
) -> Result<Vec<GameEvent>, PokerError> {
    if !table.phase.is_between_hands() {
        return Err(PokerError::GameAlreadyStarted);
    }

    let resuming = table.phase == GamePhase::Showdown;
    let survivors = if resuming {
        table.seats.iter().filter(|p| !p.chips.is_zero()).count()
    } else {
        table.seats.len()
    };
    if survivors < 2 {
        return Err(PokerError::NotEnoughPlayers);
    }
    let deck_size = Deck::standard_52().remaining();
    if cards_needed(survivors) > deck_size {
        return Err(DeckExhausted {
            requested: cards_needed(survivors),
            remaining: deck_size,
        }
        .into());
    }

    if resuming {
        rotate_button_and_drop_busted(table);
    } else if table.dealer >= table.seats.len() {
        // Кто-то ушёл из-за стола до первой раздачи.
        table.dealer = 0;
    }

    // Сброс игроков, новой колоды, банка и борда.
    for p in table.seats.iter_mut() {
        p.reset_for_new_hand();
    }
    let mut deck = Deck::standard_52();
    deck.shuffle(rng);
    table.deck = deck;
    table.pot = Chips::ZERO;
    table.board.clear();
    table.betting = BettingState::default();

    let (small_blind, big_blind) = post_blinds(table);
    let deal_order = deal_hole_cards(table)?;
    table.phase = GamePhase::PreFlop;

    let dealer_id = table.seats[table.dealer].player_id;
    info!(
        "table {}: new hand, dealer={} sb={}:{} bb={}:{}",
        table.id,
        dealer_id,
        small_blind.player_id,
        small_blind.amount,
        big_blind.player_id,
        big_blind.amount
    );

    let mut events = vec![
        GameEvent::GameStarted {
            dealer_id,
            small_blind,
            big_blind,
        },
        GameEvent::HandDealt { deal_order },
    ];

    // На префлопе BB тоже в очереди: у него есть опция рейза.
    table.betting.players_to_act = active_seats(table);

    let first = preflop_first_actor(table);
    table.current_actor = if table.seats[first].is_active() {
        first
    } else {
        next_active_seat(table, first)
    };

    if table.betting.is_round_complete() {
        // Все в олл-ине уже с блайндов – ставить некому.
        events.push(GameEvent::RoundEnded {
            phase: table.phase,
        });
        run_out_board(table, &mut events)?;
        showdown(table, &mut events)?;
    } else {
        events.push(GameEvent::TurnChanged {
            player_id: table.seats[table.current_actor].player_id,
        });
    }

    Ok(events)
}

/// Кнопка переходит на следующее место, затем игроки с нулевым стеком уходят.
///
/// Если следующий по кругу игрок сам вылетел, кнопка достаётся первому
/// выжившему после него.
fn rotate_button_and_drop_busted(table: &mut Table) {
    let n = table.seats.len();
    if n == 0 {
        return;
    }
    let advanced = (table.dealer + 1) % n;
    let new_dealer_old_idx = (0..n)
        .map(|k| (advanced + k) % n)
        .find(|&idx| !table.seats[idx].chips.is_zero())
        .unwrap_or(advanced);

    // Индекс кнопки после удаления = сколько выживших сидело левее неё.
    let new_dealer = table.seats[..new_dealer_old_idx]
        .iter()
        .filter(|p| !p.chips.is_zero())
        .count();

    let before = table.seats.len();
    table.seats.retain(|p| !p.chips.is_zero());
    if table.seats.len() != before {
        debug!(
            "table {}: dropped {} busted player(s)",
            table.id,
            before - table.seats.len()
        );
    }
    table.dealer = new_dealer;
}

/// Постинг блайндов. Короткий стек ставит сколько есть (и уходит в олл-ин).
fn post_blinds(table: &mut Table) -> (BlindPost, BlindPost) {
    let (sb_seat, bb_seat) = blind_seats(table);
    let small = pay_blind(table, sb_seat, table.config.small_blind);
    let big = pay_blind(table, bb_seat, table.config.big_blind);
    table.betting.current_bet = table.config.big_blind;
    (small, big)
}

fn pay_blind(table: &mut Table, seat: SeatIndex, blind: Chips) -> BlindPost {
    let player = &mut table.seats[seat];
    let amount = blind.min(player.chips);
    // amount <= chips, поэтому commit всегда успешен.
    let paid = player.commit(amount).unwrap_or(Chips::ZERO);
    table.pot += paid;
    debug!("table {}: player {} posts blind {}", table.id, player.player_id, paid);
    BlindPost {
        player_id: player.player_id,
        amount: paid,
    }
}

/// Раздача карманных карт – по одной, в два круга, начиная со следующего после дилера.
fn deal_hole_cards(table: &mut Table) -> Result<Vec<PlayerId>, PokerError> {
    let order = seats_clockwise_from(table, table.dealer);

    for _round in 0..2 {
        for &seat in &order {
            if table.seats[seat].is_folded() {
                continue;
            }
            let card = table.deck.deal_one()?;
            table.seats[seat].hole_cards.push(card);
        }
    }

    Ok(order.iter().map(|&s| table.seats[s].player_id).collect())
}

/// Применить действие игрока. Возвращает события в порядке возникновения.
pub fn apply_action(
    table: &mut Table,
    player_id: PlayerId,
    action: Action,
) -> Result<Vec<GameEvent>, PokerError> {
    if table.phase.is_between_hands() {
        return Err(PokerError::InvalidAction("раздача не идёт".into()));
    }

    let seat = table.current_actor;
    let player = table
        .seats
        .get(seat)
        .ok_or(PokerError::Internal("current_actor вне стола"))?;

    if player.player_id != player_id {
        return Err(PokerError::InvalidPlayer(format!(
            "сейчас ход игрока {}, а не {}",
            player.player_id, player_id
        )));
    }

    // Валидация по текущему состоянию – ничего не меняет.
    let chips_moved = validate_action(player, &action, &table.betting, table.config.big_blind)?;

    match action {
        Action::Fold => {
            table.seats[seat].status = PlayerStatus::Folded;
            table.betting.mark_acted(seat);
        }

        Action::Check => {
            table.betting.mark_acted(seat);
        }

        Action::Call => {
            commit_to_pot(table, seat, chips_moved)?;
            table.betting.mark_acted(seat);
        }

        Action::Bet(amount) | Action::Raise(amount) => {
            commit_to_pot(table, seat, chips_moved)?;
            // Bet/raise заново открывает раунд для всех остальных активных.
            let reopened = active_seats_except(table, seat);
            table.betting.on_raise(amount, reopened);
        }
    }

    debug!(
        "table {}: player {} {} (moved {}, pot {})",
        table.id, player_id, action, chips_moved, table.pot
    );

    let mut events = vec![GameEvent::PlayerActed {
        player_id,
        action,
        chips_moved,
        pot_after: table.pot,
    }];

    // Остался один не сфолдивший – он забирает банк без вскрытия.
    if count_in_hand(table) == 1 {
        finish_without_showdown(table, &mut events)?;
        return Ok(events);
    }

    if table.betting.is_round_complete() {
        events.push(GameEvent::RoundEnded {
            phase: table.phase,
        });

        if count_active(table) < 2 {
            // Ставить больше некому: докладываем борд и вскрываемся.
            run_out_board(table, &mut events)?;
            showdown(table, &mut events)?;
        } else if table.phase == GamePhase::River {
            showdown(table, &mut events)?;
        } else {
            advance_street(table, &mut events)?;
        }
    } else {
        table.current_actor = next_active_seat(table, seat);
        events.push(GameEvent::TurnChanged {
            player_id: table.seats[table.current_actor].player_id,
        });
    }

    Ok(events)
}

/// Переложить фишки игрока в банк.
fn commit_to_pot(table: &mut Table, seat: SeatIndex, amount: Chips) -> Result<(), PokerError> {
    let player = &mut table.seats[seat];
    let available = player.chips;
    let paid = player.commit(amount).ok_or(PokerError::InsufficientChips {
        needed: amount,
        available,
    })?;
    table.pot += paid;
    Ok(())
}

/// Открыть карты следующей улицы. `None`, если улица последняя.
fn deal_next_street(table: &mut Table) -> Result<Option<GamePhase>, PokerError> {
    let Some((next, count)) = table.phase.next_street() else {
        return Ok(None);
    };
    let cards = table.deck.deal(count)?;
    table.board.extend(cards);
    table.phase = next;
    Ok(Some(next))
}

/// Переход на следующую улицу с новым раундом ставок.
fn advance_street(table: &mut Table, events: &mut Vec<GameEvent>) -> Result<(), PokerError> {
    let Some(phase) = deal_next_street(table)? else {
        return Err(PokerError::Internal("advance после ривера"));
    };
    info!("table {}: {:?} {:?}", table.id, phase, table.board);
    events.push(GameEvent::CommunityDealt {
        phase,
        community_cards: table.board.clone(),
    });

    for p in table.seats.iter_mut().filter(|p| p.is_in_hand()) {
        p.current_bet = Chips::ZERO;
    }
    table.betting = BettingState::new(Chips::ZERO, active_seats(table));

    // На постфлоп улицах первым ходит первый активный игрок слева от дилера.
    table.current_actor = next_active_seat(table, table.dealer);
    events.push(GameEvent::TurnChanged {
        player_id: table.seats[table.current_actor].player_id,
    });
    Ok(())
}

/// Доложить оставшийся борд без торговли.
fn run_out_board(table: &mut Table, events: &mut Vec<GameEvent>) -> Result<(), PokerError> {
    while let Some(phase) = deal_next_street(table)? {
        debug!("table {}: run-out {:?} {:?}", table.id, phase, table.board);
        events.push(GameEvent::CommunityDealt {
            phase,
            community_cards: table.board.clone(),
        });
    }
    Ok(())
}

/// Все, кроме одного, сфолдили.
fn finish_without_showdown(table: &mut Table, events: &mut Vec<GameEvent>) -> Result<(), PokerError> {
    let winner_seat = table
        .seats
        .iter()
        .position(|p| p.is_in_hand())
        .ok_or(PokerError::Internal("нет игрока в раздаче"))?;

    let pot = award_pot(table, winner_seat);
    let winner_id = table.seats[winner_seat].player_id;
    info!("table {}: player {} wins {} uncontested", table.id, winner_id, pot);

    events.push(GameEvent::Showdown {
        winner_id,
        pot,
        hands: BTreeMap::new(),
    });
    Ok(())
}

/// Вскрытие: лучшая рука среди не сфолдивших (олл-ины тоже) забирает весь банк.
///
/// Сплит не делается: при точной ничьей банк берёт первый по рассадке.
fn showdown(table: &mut Table, events: &mut Vec<GameEvent>) -> Result<(), PokerError> {
    let mut hands: BTreeMap<PlayerId, Hand> = BTreeMap::new();
    let mut best: Option<(SeatIndex, Hand)> = None;

    for (seat, p) in table.seats.iter().enumerate() {
        if !p.is_in_hand() {
            continue;
        }
        let hand = evaluate_best_hand(&p.hole_cards, &table.board)
            .ok_or(PokerError::Internal("меньше 5 карт на вскрытии"))?;
        let better = match &best {
            None => true,
            Some((_, current)) => compare(&hand, current) == Ordering::Greater,
        };
        if better {
            best = Some((seat, hand.clone()));
        }
        hands.insert(p.player_id, hand);
    }

    let (winner_seat, winning_hand) =
        best.ok_or(PokerError::Internal("нет игроков на вскрытии"))?;
    let pot = award_pot(table, winner_seat);
    let winner_id = table.seats[winner_seat].player_id;
    info!(
        "table {}: showdown, player {} wins {} with {}",
        table.id, winner_id, pot, winning_hand
    );

    events.push(GameEvent::Showdown {
        winner_id,
        pot,
        hands,
    });
    Ok(())
}

/// Отдать банк победителю и закрыть раздачу.
fn award_pot(table: &mut Table, winner_seat: SeatIndex) -> Chips {
    let pot = table.pot;
    table.seats[winner_seat].chips += pot;
    table.pot = Chips::ZERO;
    table.phase = GamePhase::Showdown;
    table.betting.players_to_act.clear();
    pot
}
