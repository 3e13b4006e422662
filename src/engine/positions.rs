use std::collections::BTreeSet;

use crate::domain::{SeatIndex, Table};

/// Следующее активное место по кругу после `from` (сам `from` не проверяется).
///
/// Если кроме `from` активных нет – остаёмся на `from`.
pub fn next_active_seat(table: &Table, from: SeatIndex) -> SeatIndex {
    let n = table.seats.len();
    if n == 0 {
        return from;
    }
    (1..n)
        .map(|step| (from + step) % n)
        .find(|&idx| table.seats[idx].is_active())
        .unwrap_or(from)
}

/// Все активные места (не сфолдили, не в олл-ине).
pub fn active_seats(table: &Table) -> BTreeSet<SeatIndex> {
    table
        .seats
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_active())
        .map(|(idx, _)| idx)
        .collect()
}

/// Активные места, кроме `except` – очередь после bet/raise.
pub fn active_seats_except(table: &Table, except: SeatIndex) -> BTreeSet<SeatIndex> {
    let mut seats = active_seats(table);
    seats.remove(&except);
    seats
}

/// Места по кругу, начиная со следующего после `start` (сам `start` – последним).
pub fn seats_clockwise_from(table: &Table, start: SeatIndex) -> Vec<SeatIndex> {
    let n = table.seats.len();
    (1..=n).map(|step| (start + step) % n).collect()
}

/// Подсчёт игроков в раздаче (не сфолдили; олл-ин считается).
pub fn count_in_hand(table: &Table) -> usize {
    table.seats.iter().filter(|p| p.is_in_hand()).count()
}

/// Подсчёт активных игроков.
pub fn count_active(table: &Table) -> usize {
    table.seats.iter().filter(|p| p.is_active()).count()
}

/// Места блайндов `(sb, bb)` для текущей кнопки.
///
/// Heads-up: дилер ставит малый блайнд. Иначе – два места после дилера.
pub fn blind_seats(table: &Table) -> (SeatIndex, SeatIndex) {
    let n = table.seats.len();
    let dealer = table.dealer;
    if n == 2 {
        (dealer, (dealer + 1) % n)
    } else {
        ((dealer + 1) % n, (dealer + 2) % n)
    }
}

/// Первый ход на префлопе: в heads-up – дилер, иначе третье место после дилера.
pub fn preflop_first_actor(table: &Table) -> SeatIndex {
    let n = table.seats.len();
    if n == 2 {
        table.dealer
    } else {
        (table.dealer + 3) % n
    }
}
