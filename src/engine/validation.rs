use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::engine::actions::{Action, ActionKind};
use crate::engine::betting::BettingState;
use crate::engine::errors::PokerError;

/// Проверка, может ли игрок выполнить это действие при текущем состоянии ставок.
///
/// Ничего не меняет. Возвращает, сколько фишек действие переложит из стека в банк.
pub fn validate_action(
    player: &Player,
    action: &Action,
    betting: &BettingState,
    big_blind: Chips,
) -> Result<Chips, PokerError> {
    let stack = player.chips;

    match *action {
        Action::Fold => Ok(Chips::ZERO),

        Action::Check => {
            if player.current_bet == betting.current_bet {
                Ok(Chips::ZERO)
            } else {
                Err(PokerError::InvalidAction(format!(
                    "check невозможен: ставка {}, у игрока {}, нужен call",
                    betting.current_bet, player.current_bet
                )))
            }
        }

        Action::Call => {
            let to_call = player.current_bet.deficit_to(betting.current_bet);
            ensure_chips(stack, to_call)?;
            Ok(to_call)
        }

        Action::Bet(amount) => {
            if !betting.current_bet.is_zero() {
                return Err(PokerError::InvalidAction(
                    "ставка уже есть – используйте raise".into(),
                ));
            }
            if amount < big_blind {
                return Err(PokerError::InvalidAction(format!(
                    "минимальный bet – {big_blind}"
                )));
            }
            ensure_chips(stack, amount)?;
            Ok(amount)
        }

        Action::Raise(amount) => {
            if betting.current_bet.is_zero() {
                // Когда нет ставки – это bet, а не raise.
                return Err(PokerError::InvalidAction(
                    "ставки ещё нет – используйте bet".into(),
                ));
            }
            let min_raise = Chips(betting.current_bet.0.saturating_mul(2));
            if amount < min_raise {
                return Err(PokerError::InvalidAction(format!(
                    "минимальный raise – до {min_raise}"
                )));
            }
            // amount >= 2 * current_bet >= player.current_bet, вычитание безопасно.
            let diff = player.current_bet.deficit_to(amount);
            ensure_chips(stack, diff)?;
            Ok(diff)
        }
    }
}

fn ensure_chips(stack: Chips, needed: Chips) -> Result<(), PokerError> {
    if stack < needed {
        Err(PokerError::InsufficientChips {
            needed,
            available: stack,
        })
    } else {
        Ok(())
    }
}

/// Виды действий, которые стоит предложить игроку: fold всегда,
/// check или call (уравнял ли он ставку), bet или raise (есть ли ставка на столе).
pub fn valid_actions(player: &Player, betting: &BettingState) -> Vec<ActionKind> {
    let mut kinds = vec![ActionKind::Fold];
    if player.current_bet == betting.current_bet {
        kinds.push(ActionKind::Check);
    } else {
        kinds.push(ActionKind::Call);
    }
    if betting.current_bet.is_zero() {
        kinds.push(ActionKind::Bet);
    } else {
        kinds.push(ActionKind::Raise);
    }
    kinds
}
