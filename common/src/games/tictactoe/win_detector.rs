use super::board::Board;
use super::types::{Cell, LineKind, Move, Symbol, WinningLine};

pub fn check_win(board: &Board, symbol: Symbol) -> bool {
    find_winning_line(board, symbol).is_some()
}

pub fn find_winning_line(board: &Board, symbol: Symbol) -> Option<WinningLine> {
    let size = board.size();
    let last = size - 1;
    let owned = |row: usize, col: usize| board.get(row, col) == Some(Cell::Occupied(symbol));

    for row in 0..size {
        if (0..size).all(|col| owned(row, col)) {
            return Some(WinningLine::new(
                symbol,
                LineKind::Row,
                Move::new(row, 0),
                Move::new(row, last),
            ));
        }
    }

    for col in 0..size {
        if (0..size).all(|row| owned(row, col)) {
            return Some(WinningLine::new(
                symbol,
                LineKind::Column,
                Move::new(0, col),
                Move::new(last, col),
            ));
        }
    }

    if (0..size).all(|i| owned(i, i)) {
        return Some(WinningLine::new(
            symbol,
            LineKind::Diagonal,
            Move::new(0, 0),
            Move::new(last, last),
        ));
    }

    if (0..size).all(|i| owned(i, last - i)) {
        return Some(WinningLine::new(
            symbol,
            LineKind::AntiDiagonal,
            Move::new(0, last),
            Move::new(last, 0),
        ));
    }

    None
}
