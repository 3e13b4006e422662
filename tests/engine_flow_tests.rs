use holdem_engine::domain::{
    card::{parse_cards, Card},
    chips::Chips,
    hand::{GamePhase, HandRank},
    player::PlayerStatus,
    table::TableConfig,
    PlayerId,
};
use holdem_engine::engine::{Action, ActionKind, EventType, GameEvent, PokerTable};
use holdem_engine::infra::{DeterministicRng, StackedRng};

/// Утилита: стол 10/20 с игроками 1..=n, у каждого `stack` фишек.
fn make_table(stacks: &[u64], rng: StackedRng) -> PokerTable<StackedRng> {
    let config = TableConfig::new(6, Chips::new(10), Chips::new(20));
    let mut table = PokerTable::with_rng(1, config, rng).unwrap();
    for (i, &s) in stacks.iter().enumerate() {
        table.add_player(i as PlayerId + 1, Chips::new(s)).unwrap();
    }
    table
}

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

fn types(events: &[GameEvent]) -> Vec<EventType> {
    events.iter().map(GameEvent::event_type).collect()
}

fn current(table: &PokerTable<StackedRng>) -> PlayerId {
    table.waiting_for().unwrap().player_id
}

fn stack(table: &PokerTable<StackedRng>, pid: PlayerId) -> Chips {
    table.get_state(None).player(pid).unwrap().chips
}

// ----------------------
// Эталонная раздача на троих
// ----------------------

#[test]
fn three_handed_reference_hand() {
    let mut table = make_table(&[1000, 1000, 1000], StackedRng::unshuffled());

    let res = table.start_game().unwrap();
    assert_eq!(
        types(&res.events),
        vec![EventType::GameStarted, EventType::HandDealt, EventType::TurnChanged]
    );
    assert_eq!(res.state.phase, GamePhase::PreFlop);
    assert_eq!(res.state.pot, Chips::new(30));
    assert_eq!(res.state.current_bet, Chips::new(20));
    assert_eq!(res.state.dealer_id, Some(1));

    match &res.events[0] {
        GameEvent::GameStarted {
            dealer_id,
            small_blind,
            big_blind,
        } => {
            assert_eq!(*dealer_id, 1);
            assert_eq!((small_blind.player_id, small_blind.amount), (2, Chips::new(10)));
            assert_eq!((big_blind.player_id, big_blind.amount), (3, Chips::new(20)));
        }
        other => panic!("ожидали GAME_STARTED, получили {other:?}"),
    }
    match &res.events[1] {
        GameEvent::HandDealt { deal_order } => assert_eq!(deal_order, &vec![2, 3, 1]),
        other => panic!("ожидали HAND_DEALT, получили {other:?}"),
    }

    // 3 места, дилер на 0 – первым ходит (0 + 3) % 3 = место 0.
    let waiting = res.waiting_for.unwrap();
    assert_eq!(waiting.player_id, 1);
    assert_eq!(
        waiting.valid_actions,
        vec![ActionKind::Fold, ActionKind::Call, ActionKind::Raise]
    );
    assert_eq!(waiting.timeout_seconds, 30);

    table.action(1, Action::Call).unwrap();
    table.action(2, Action::Call).unwrap();

    // BB сохраняет опцию: может чекнуть или поднять.
    let bb = table.waiting_for().unwrap();
    assert_eq!(bb.player_id, 3);
    assert_eq!(
        bb.valid_actions,
        vec![ActionKind::Fold, ActionKind::Check, ActionKind::Raise]
    );

    let res = table.action(3, Action::Check).unwrap();
    assert_eq!(
        types(&res.events),
        vec![
            EventType::PlayerActed,
            EventType::RoundEnded,
            EventType::CommunityDealt,
            EventType::TurnChanged
        ]
    );
    assert_eq!(res.state.phase, GamePhase::Flop);
    assert_eq!(res.state.pot, Chips::new(60));
    assert_eq!(res.state.current_bet, Chips::ZERO);
    assert_eq!(res.state.community_cards, cards("8c 9c Tc"));
    assert!(res.state.players.iter().all(|p| p.current_bet.is_zero()));
    // После флопа первым ходит малый блайнд.
    assert_eq!(res.waiting_for.as_ref().unwrap().player_id, 2);
    assert_eq!(
        res.waiting_for.unwrap().valid_actions,
        vec![ActionKind::Fold, ActionKind::Check, ActionKind::Bet]
    );

    for (phase, board) in [
        (GamePhase::Turn, "8c 9c Tc Jc"),
        (GamePhase::River, "8c 9c Tc Jc Qc"),
    ] {
        for pid in [2, 3, 1] {
            assert_eq!(current(&table), pid);
            table.action(pid, Action::Check).unwrap();
        }
        let state = table.get_state(None);
        assert_eq!(state.phase, phase);
        assert_eq!(state.community_cards, cards(board));
    }

    table.action(2, Action::Check).unwrap();
    table.action(3, Action::Check).unwrap();
    let res = table.action(1, Action::Check).unwrap();

    assert_eq!(
        types(&res.events),
        vec![EventType::PlayerActed, EventType::RoundEnded, EventType::Showdown]
    );
    assert!(res.waiting_for.is_none());
    assert_eq!(res.state.phase, GamePhase::Showdown);
    assert_eq!(res.state.pot, Chips::ZERO);

    // Стрит-флеш на борде у всех – ничья, банк берёт первое место.
    match res.events.last().unwrap() {
        GameEvent::Showdown {
            winner_id,
            pot,
            hands,
        } => {
            assert_eq!(*winner_id, 1);
            assert_eq!(*pot, Chips::new(60));
            assert_eq!(hands.len(), 3);
            assert!(hands
                .values()
                .all(|h| h.rank() == HandRank::StraightFlush && h.tiebreakers() == [12]));
        }
        other => panic!("ожидали SHOWDOWN, получили {other:?}"),
    }

    assert_eq!(stack(&table, 1), Chips::new(1040));
    assert_eq!(stack(&table, 2), Chips::new(980));
    assert_eq!(stack(&table, 3), Chips::new(980));
    assert_eq!(table.total_chips(), Chips::new(3000));
}

#[test]
fn hand_history_records_every_event_of_the_hand() {
    let mut table = make_table(&[1000, 1000, 1000], StackedRng::unshuffled());
    table.start_game().unwrap();
    table.action(1, Action::Fold).unwrap();
    table.action(2, Action::Fold).unwrap();

    let history = table.hand_history();
    let kinds: Vec<EventType> = history.events.iter().map(|e| e.event.event_type()).collect();
    assert_eq!(
        kinds,
        vec![
            EventType::GameStarted,
            EventType::HandDealt,
            EventType::TurnChanged,
            EventType::PlayerActed,
            EventType::TurnChanged,
            EventType::PlayerActed,
            EventType::Showdown,
        ]
    );
    assert!(history.events.iter().enumerate().all(|(i, e)| e.index as usize == i));

    // Новая раздача начинает историю заново.
    table.start_game().unwrap();
    assert_eq!(table.hand_history().len(), 3);
}

// ----------------------
// Heads-up
// ----------------------

#[test]
fn heads_up_dealer_posts_small_blind_and_acts_first() {
    let mut table = make_table(&[1000, 1000], StackedRng::unshuffled());
    let res = table.start_game().unwrap();

    let sb = res.state.player(1).unwrap();
    let bb = res.state.player(2).unwrap();
    assert_eq!(sb.current_bet, Chips::new(10));
    assert_eq!(bb.current_bet, Chips::new(20));
    assert_eq!(res.waiting_for.unwrap().player_id, 1);

    table.action(1, Action::Call).unwrap();
    assert_eq!(current(&table), 2);
    let res = table.action(2, Action::Check).unwrap();

    // После флопа первым ходит не-дилер.
    assert_eq!(res.state.phase, GamePhase::Flop);
    assert_eq!(res.waiting_for.unwrap().player_id, 2);
}

// ----------------------
// Bet / raise
// ----------------------

#[test]
fn bet_and_raise_reopen_the_round() {
    let mut table = make_table(&[1000, 1000, 1000], StackedRng::unshuffled());
    table.start_game().unwrap();
    table.action(1, Action::Call).unwrap();
    table.action(2, Action::Call).unwrap();
    table.action(3, Action::Check).unwrap();

    // Флоп: SB ставит, BB рейзит, остальные коллируют.
    let res = table.action(2, Action::Bet(Chips::new(40))).unwrap();
    assert_eq!(res.state.current_bet, Chips::new(40));
    assert_eq!(res.state.players_to_act, vec![1, 3]);
    assert_eq!(res.state.pot, Chips::new(100));
    match &res.events[0] {
        GameEvent::PlayerActed {
            player_id,
            chips_moved,
            pot_after,
            ..
        } => {
            assert_eq!(*player_id, 2);
            assert_eq!(*chips_moved, Chips::new(40));
            assert_eq!(*pot_after, Chips::new(100));
        }
        other => panic!("ожидали PLAYER_ACTED, получили {other:?}"),
    }

    let res = table.action(3, Action::Raise(Chips::new(80))).unwrap();
    assert_eq!(res.state.current_bet, Chips::new(80));
    assert_eq!(res.state.players_to_act, vec![1, 2]);
    assert_eq!(table.total_chips(), Chips::new(3000));

    table.action(1, Action::Call).unwrap();
    assert_eq!(table.get_state(None).phase, GamePhase::Flop);

    // Игрок 2 доплачивает только разницу.
    let res = table.action(2, Action::Call).unwrap();
    match &res.events[0] {
        GameEvent::PlayerActed { chips_moved, .. } => assert_eq!(*chips_moved, Chips::new(40)),
        other => panic!("ожидали PLAYER_ACTED, получили {other:?}"),
    }
    assert_eq!(res.state.phase, GamePhase::Turn);
    assert_eq!(res.state.pot, Chips::new(300));
    assert_eq!(table.total_chips(), Chips::new(3000));
}

#[test]
fn big_blind_can_raise_its_option() {
    let mut table = make_table(&[1000, 1000, 1000], StackedRng::unshuffled());
    table.start_game().unwrap();
    table.action(1, Action::Call).unwrap();
    table.action(2, Action::Call).unwrap();

    let res = table.action(3, Action::Raise(Chips::new(60))).unwrap();
    assert_eq!(res.state.phase, GamePhase::PreFlop);
    assert_eq!(res.state.players_to_act, vec![1, 2]);
    assert_eq!(res.waiting_for.unwrap().player_id, 1);
}

// ----------------------
// Фолд до вскрытия
// ----------------------

#[test]
fn last_player_standing_wins_without_showdown() {
    let mut table = make_table(&[1000, 1000, 1000], StackedRng::unshuffled());
    table.start_game().unwrap();

    table.action(1, Action::Fold).unwrap();
    let res = table.action(2, Action::Fold).unwrap();

    assert_eq!(
        types(&res.events),
        vec![EventType::PlayerActed, EventType::Showdown]
    );
    match res.events.last().unwrap() {
        GameEvent::Showdown {
            winner_id,
            pot,
            hands,
        } => {
            assert_eq!(*winner_id, 3);
            assert_eq!(*pot, Chips::new(30));
            assert!(hands.is_empty());
        }
        other => panic!("ожидали SHOWDOWN, получили {other:?}"),
    }
    assert!(res.waiting_for.is_none());
    assert_eq!(res.state.phase, GamePhase::Showdown);
    assert_eq!(stack(&table, 3), Chips::new(1010));
    assert_eq!(stack(&table, 2), Chips::new(990));
    assert_eq!(table.total_chips(), Chips::new(3000));
}

#[test]
fn next_hand_moves_the_button() {
    let mut table = make_table(&[1000, 1000, 1000], StackedRng::unshuffled());
    table.start_game().unwrap();
    table.action(1, Action::Fold).unwrap();
    table.action(2, Action::Fold).unwrap();

    let res = table.start_game().unwrap();
    assert_eq!(res.state.dealer_id, Some(2));
    // Блайнды: 3 и 1, первым ходит сам дилер (1 + 3) % 3.
    assert_eq!(res.state.player(3).unwrap().current_bet, Chips::new(10));
    assert_eq!(res.state.player(1).unwrap().current_bet, Chips::new(20));
    assert_eq!(res.waiting_for.unwrap().player_id, 2);
}

// ----------------------
// Олл-ин
// ----------------------

#[test]
fn all_in_and_call_runs_out_the_board() {
    // Раздача от места после дилера: 2, 1, 2, 1, затем флоп, тёрн, ривер.
    let deck = cards("Kd Ah Kc As 2c 7d 9h Js 3c");
    let mut table = make_table(&[1000, 1000], StackedRng::new(deck));
    table.start_game().unwrap();

    let res = table.action(1, Action::Raise(Chips::new(1000))).unwrap();
    assert_eq!(res.state.player(1).unwrap().status, PlayerStatus::AllIn);
    assert_eq!(res.waiting_for.unwrap().player_id, 2);

    let res = table.action(2, Action::Call).unwrap();
    assert_eq!(
        types(&res.events),
        vec![
            EventType::PlayerActed,
            EventType::RoundEnded,
            EventType::CommunityDealt,
            EventType::CommunityDealt,
            EventType::CommunityDealt,
            EventType::Showdown,
        ]
    );
    assert!(res.waiting_for.is_none());
    assert_eq!(res.state.community_cards, cards("2c 7d 9h Js 3c"));

    match res.events.last().unwrap() {
        GameEvent::Showdown {
            winner_id,
            pot,
            hands,
        } => {
            assert_eq!(*winner_id, 1);
            assert_eq!(*pot, Chips::new(2000));
            assert_eq!(hands[&1].rank(), HandRank::OnePair);
            assert_eq!(hands[&1].tiebreakers()[0], 14);
            assert_eq!(hands[&2].tiebreakers()[0], 13);
        }
        other => panic!("ожидали SHOWDOWN, получили {other:?}"),
    }

    // Дальше никто не ходит.
    assert!(table.action(2, Action::Check).is_err());
    assert_eq!(stack(&table, 1), Chips::new(2000));
    assert_eq!(stack(&table, 2), Chips::ZERO);
}

#[test]
fn one_active_player_left_runs_out_after_call() {
    // Короткий стек уходит в олл-ин, два других лишь коллируют – торги продолжаются.
    let mut table = make_table(&[100, 1000, 1000], StackedRng::unshuffled());
    table.start_game().unwrap();

    table.action(1, Action::Raise(Chips::new(100))).unwrap();
    table.action(2, Action::Call).unwrap();
    let res = table.action(3, Action::Call).unwrap();
    assert_eq!(res.state.phase, GamePhase::Flop);
    assert_eq!(res.state.pot, Chips::new(300));
    assert_eq!(res.state.players_to_act, vec![2, 3]);

    // Игрок 2 ставит всё, игрок 3 коллирует – активных меньше двух, борд докладывается.
    table.action(2, Action::Bet(Chips::new(900))).unwrap();
    let res = table.action(3, Action::Call).unwrap();
    assert!(res.waiting_for.is_none());
    assert_eq!(res.state.phase, GamePhase::Showdown);
    assert_eq!(res.state.community_cards.len(), 5);
    assert_eq!(table.total_chips(), Chips::new(2100));
}

#[test]
fn short_blind_all_in_passes_the_turn() {
    // Дилер (SB) может поставить только 5 и сразу в олл-ине.
    let mut table = make_table(&[5, 1000], StackedRng::unshuffled());
    let res = table.start_game().unwrap();

    let dealer = res.state.player(1).unwrap();
    assert_eq!(dealer.status, PlayerStatus::AllIn);
    assert_eq!(dealer.current_bet, Chips::new(5));
    assert_eq!(res.state.pot, Chips::new(25));

    let waiting = res.waiting_for.unwrap();
    assert_eq!(waiting.player_id, 2);
    assert!(waiting.valid_actions.contains(&ActionKind::Check));

    let res = table.action(2, Action::Check).unwrap();
    assert_eq!(res.state.phase, GamePhase::Showdown);
    assert_eq!(res.state.community_cards.len(), 5);
    assert_eq!(table.total_chips(), Chips::new(1005));
}

#[test]
fn both_blinds_all_in_go_straight_to_showdown() {
    let mut table = make_table(&[10, 20], StackedRng::unshuffled());
    let res = table.start_game().unwrap();

    assert_eq!(
        types(&res.events),
        vec![
            EventType::GameStarted,
            EventType::HandDealt,
            EventType::RoundEnded,
            EventType::CommunityDealt,
            EventType::CommunityDealt,
            EventType::CommunityDealt,
            EventType::Showdown,
        ]
    );
    assert!(res.waiting_for.is_none());
    assert_eq!(res.state.phase, GamePhase::Showdown);
    assert_eq!(table.total_chips(), Chips::new(30));
}

#[test]
fn busted_players_are_dropped_before_next_hand() {
    let deck = cards("Kd Ah Kc As 2c 7d 9h Js 3c");
    let mut table = make_table(&[1000, 1000, 500], StackedRng::new(deck));
    table.remove_player(3).unwrap();
    table.start_game().unwrap();
    table.action(1, Action::Raise(Chips::new(1000))).unwrap();
    table.action(2, Action::Call).unwrap();

    // Остался один игрок с фишками.
    let err = table.start_game().unwrap_err();
    assert_eq!(err, holdem_engine::PokerError::NotEnoughPlayers);
    // Отказ ничего не меняет: проигравший ещё за столом.
    assert_eq!(table.get_state(None).players.len(), 2);
    assert_eq!(table.get_state(None).phase, GamePhase::Showdown);

    table.add_player(4, Chips::new(1000)).unwrap();
    let res = table.start_game().unwrap();
    let ids: Vec<PlayerId> = res.state.players.iter().map(|p| p.player_id).collect();
    assert_eq!(ids, vec![1, 4]);
}

// ----------------------
// Сохранение фишек
// ----------------------

#[test]
fn chips_are_conserved_over_random_hands() {
    let config = TableConfig::new(6, Chips::new(10), Chips::new(20));
    let mut table = PokerTable::with_rng(9, config, DeterministicRng::from_seed(11)).unwrap();
    for pid in 1..=5 {
        table.add_player(pid, Chips::new(500)).unwrap();
    }
    let total = table.total_chips();

    for hand in 0..20u64 {
        let Ok(mut res) = table.start_game() else {
            break;
        };
        assert_eq!(table.total_chips(), total);

        let mut step = 0u64;
        while let Some(waiting) = res.waiting_for.clone() {
            step += 1;
            let can = |k| waiting.valid_actions.contains(&k);
            let action = match (hand + step) % 4 {
                0 if can(ActionKind::Bet) => Action::Bet(Chips::new(20)),
                1 if can(ActionKind::Raise) => Action::Raise(res.state.current_bet + res.state.current_bet),
                2 => Action::Fold,
                _ if can(ActionKind::Check) => Action::Check,
                _ => Action::Call,
            };
            res = match table.action(waiting.player_id, action) {
                Ok(r) => r,
                Err(e) => {
                    assert!(e.is_invalid_action(), "{e}");
                    table.action(waiting.player_id, Action::Fold).unwrap()
                }
            };
            assert_eq!(table.total_chips(), total);
        }
        assert_eq!(res.state.pot, Chips::ZERO);
    }
}
