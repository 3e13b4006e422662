// src/bin/poker_dev_cli.rs

use holdem_engine::api::{ActionResult, GameState, WaitingFor};
use holdem_engine::domain::chips::Chips;
use holdem_engine::domain::table::TableConfig;
use holdem_engine::domain::PlayerId;
use holdem_engine::engine::{Action, ActionKind, GameEvent, PokerError, PokerTable};
use holdem_engine::infra::DeterministicRng;

/// Сколько раздач играем по умолчанию.
const DEFAULT_HANDS: usize = 5;

/// Простые "боты" для прогона раздач.
#[derive(Clone, Copy, Debug)]
enum Scenario {
    /// Все чекают/коллируют до вскрытия.
    CheckCall,
    /// Первый на каждой улице ставит, остальные коллируют.
    Aggressive,
    /// Все, кроме последнего, фолдят.
    FoldOut,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Аргументы: [seed] [кол-во раздач]
    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(7);
    let hands: usize = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_HANDS);

    println!("poker_dev_cli: seed={seed}, раздач={hands}");

    if let Err(e) = run(seed, hands) {
        eprintln!("[CLI] ошибка движка: {e}");
        std::process::exit(1);
    }
}

fn run(seed: u64, hands: usize) -> Result<(), PokerError> {
    let config = TableConfig::new(6, Chips::new(25), Chips::new(50)).with_timeout(15);
    let mut table = PokerTable::with_rng(1, config, DeterministicRng::from_seed(seed))?;

    for pid in 1..=4 {
        table.add_player(pid, Chips::new(2_000))?;
    }
    let total = table.total_chips();

    let scenarios = [Scenario::CheckCall, Scenario::Aggressive, Scenario::FoldOut];

    for hand_no in 0..hands {
        let scenario = scenarios[hand_no % scenarios.len()];
        println!("\n=== Раздача #{} ({:?}) ===", hand_no + 1, scenario);

        let result = match table.start_game() {
            Ok(r) => r,
            Err(PokerError::NotEnoughPlayers) => {
                println!("[CLI] Игроков не осталось, стоп.");
                break;
            }
            Err(e) => return Err(e),
        };
        print_events(&result.events);

        play_hand(&mut table, result, scenario)?;
        debug_print_state(&table.get_state(None));

        if table.total_chips() != total {
            eprintln!(
                "[CLI] !!! фишки не сходятся: было {}, стало {}",
                total,
                table.total_chips()
            );
        }
    }

    println!("\nИстория последней раздачи: {} событий", table.hand_history().len());
    Ok(())
}

fn play_hand(
    table: &mut PokerTable<DeterministicRng>,
    mut result: ActionResult,
    scenario: Scenario,
) -> Result<(), PokerError> {
    while let Some(waiting) = result.waiting_for.clone() {
        let mut action = pick_action(scenario, &result.state, &waiting);
        if !waiting.valid_actions.contains(&action.kind()) {
            action = Action::Fold;
        }
        println!("[CLI] игрок {} -> {}", waiting.player_id, action);

        result = match table.action(waiting.player_id, action) {
            Ok(r) => r,
            // Не хватает фишек на колл – просто сбрасываем.
            Err(e) if e.is_invalid_action() => {
                println!("[CLI] {e}, fold");
                table.action(waiting.player_id, Action::Fold)?
            }
            Err(e) => return Err(e),
        };
        print_events(&result.events);
    }
    Ok(())
}

fn pick_action(scenario: Scenario, state: &GameState, waiting: &WaitingFor) -> Action {
    let can = |k: ActionKind| waiting.valid_actions.contains(&k);
    let passive = if can(ActionKind::Check) {
        Action::Check
    } else {
        Action::Call
    };

    match scenario {
        Scenario::CheckCall => passive,

        Scenario::Aggressive => {
            if can(ActionKind::Bet) && stack_of(state, waiting.player_id) >= state.big_blind {
                Action::Bet(state.big_blind)
            } else {
                passive
            }
        }

        Scenario::FoldOut => {
            let last = state.players_to_act.len() <= 1;
            if last {
                passive
            } else {
                Action::Fold
            }
        }
    }
}

fn stack_of(state: &GameState, pid: PlayerId) -> Chips {
    state.player(pid).map(|p| p.chips).unwrap_or(Chips::ZERO)
}

fn print_events(events: &[GameEvent]) {
    for ev in events {
        match ev {
            GameEvent::CommunityDealt {
                phase,
                community_cards,
            } => {
                let board: Vec<String> = community_cards.iter().map(|c| c.to_string()).collect();
                println!("  {:?}: {}", phase, board.join(" "));
            }
            GameEvent::Showdown {
                winner_id,
                pot,
                hands,
            } => {
                println!("  Победитель: игрок {winner_id}, банк {pot}");
                for (pid, hand) in hands {
                    println!("    игрок {pid}: {hand}");
                }
            }
            other => println!("  {:?}", other.event_type()),
        }
    }
}

fn debug_print_state(state: &GameState) {
    println!(
        "[CLI] стол {}: фаза {:?}, банк {}",
        state.table_id, state.phase, state.pot
    );
    for p in &state.players {
        println!(
            "  игрок {:>2}: стек {:>5}, статус {:?}",
            p.player_id, p.chips, p.status
        );
    }
}
