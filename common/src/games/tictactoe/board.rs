use super::error::GameError;
use super::types::{Cell, Move, Symbol, WinningLine};
use super::win_detector;

pub const MIN_BOARD_SIZE: usize = 3;
pub const MAX_BOARD_SIZE: usize = 100;

/// Square NxN grid, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Cell>,
    size: usize,
}

impl Board {
    pub fn new(size: usize) -> Result<Self, GameError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(GameError::Configuration(format!(
                "Board size must be between {} and {}, got {}",
                MIN_BOARD_SIZE, MAX_BOARD_SIZE, size
            )));
        }
        let cell_count = size.checked_mul(size).ok_or_else(|| {
            GameError::Configuration(format!("Board size {} is too large", size))
        })?;

        Ok(Self {
            cells: vec![Cell::Empty; cell_count],
            size,
        })
    }

    /// Builds a board from rows like `"XO."`, `.` marking an empty cell.
    #[cfg(test)]
    pub fn from_rows(rows: &[&str]) -> Self {
        let size = rows.len();
        let mut board = Board::new(size).unwrap();

        for (row, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            assert_eq!(chars.len(), size, "row {} has wrong width", row);
            for (col, ch) in chars.into_iter().enumerate() {
                if ch == '.' {
                    continue;
                }
                let symbol = Symbol::ALL
                    .into_iter()
                    .find(|s| s.as_char() == ch)
                    .unwrap_or_else(|| panic!("unknown symbol {:?}", ch));
                board.apply_move(Move::new(row, col), symbol).unwrap();
            }
        }

        board
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells.get(row * self.size + col).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.size)
    }

    pub fn is_valid_move(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(Cell::Empty))
    }

    pub fn apply_move(&mut self, mv: Move, symbol: Symbol) -> Result<(), GameError> {
        if !self.is_valid_move(mv.row, mv.col) {
            return Err(GameError::InvalidMove {
                row: mv.row,
                col: mv.col,
            });
        }

        self.cells[mv.row * self.size + mv.col] = Cell::Occupied(symbol);
        Ok(())
    }

    /// Places without validation. Only ever called on private snapshots.
    pub(super) fn place(&mut self, mv: Move, symbol: Symbol) {
        self.cells[mv.row * self.size + mv.col] = Cell::Occupied(symbol);
    }

    /// Clears a cell placed during search. Only ever called on private snapshots.
    pub(super) fn retract(&mut self, mv: Move) {
        self.cells[mv.row * self.size + mv.col] = Cell::Empty;
    }

    pub fn check_win(&self, symbol: Symbol) -> bool {
        win_detector::check_win(self, symbol)
    }

    pub fn winning_line(&self, symbol: Symbol) -> Option<WinningLine> {
        win_detector::find_winning_line(self, symbol)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn snapshot(&self) -> Board {
        self.clone()
    }

    pub fn available_moves(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| Move::new(index / self.size, index % self.size))
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Center cell; only odd-sized boards have one.
    pub fn center(&self) -> Option<Move> {
        if self.size % 2 == 1 {
            Some(Move::new(self.size / 2, self.size / 2))
        } else {
            None
        }
    }
}
