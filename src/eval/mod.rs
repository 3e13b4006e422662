//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основные функции:
//!   `evaluate(cards) -> Hand` – лучшая 5-карточная рука из 5–7 карт;
//!   `compare(a, b) -> Ordering` – полный порядок по силе.

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{compare, evaluate, evaluate_best_hand, evaluate_five};
pub use hand_rank::{describe_hand, describe_with_top};
