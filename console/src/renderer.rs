use std::io::Write;

use common::games::tictactoe::{
    Board, Cell, GameOutcome, LineKind, Move, Renderer, SeatInfo, WinningLine,
};
use common::log;

/// Draws the board with row and column indices, `.` for empty cells.
pub fn render_board(board: &Board) -> String {
    let width = (board.size() - 1).to_string().len();
    let mut out = String::new();

    out.push_str(&" ".repeat(width));
    for col in 0..board.size() {
        out.push_str(&format!(" {:>width$}", col, width = width));
    }
    out.push('\n');

    for (row, cells) in board.rows().enumerate() {
        out.push_str(&format!("{:>width$}", row, width = width));
        for cell in cells {
            let mark = match cell {
                Cell::Empty => '.',
                Cell::Occupied(symbol) => symbol.as_char(),
            };
            out.push_str(&format!(" {:>width$}", mark, width = width));
        }
        out.push('\n');
    }

    out
}

pub fn render_roster(seats: &[SeatInfo]) -> String {
    seats
        .iter()
        .map(|seat| format!("  {} ({}) - {}\n", seat.name, seat.symbol, seat.kind))
        .collect()
}

fn describe_line(line: &WinningLine) -> String {
    match line.kind {
        LineKind::Row => format!("row {}", line.start.row),
        LineKind::Column => format!("column {}", line.start.col),
        LineKind::Diagonal => "main diagonal".to_string(),
        LineKind::AntiDiagonal => "anti-diagonal".to_string(),
    }
}

pub fn render_outcome(outcome: &GameOutcome) -> String {
    match outcome {
        GameOutcome::Win {
            name, symbol, line, ..
        } => format!("{} ({}) wins on the {}!", name, symbol, describe_line(line)),
        GameOutcome::Draw => "It's a draw! Good game everyone!".to_string(),
    }
}

pub struct ConsoleRenderer<W: Write> {
    out: W,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            log!("Failed to write to console: {}", e);
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn game_started(&mut self, seats: &[SeatInfo], board: &Board) {
        let text = format!(
            "=== Tic-Tac-Toe {}x{} ===\nPlayers:\n{}\n{}\n",
            board.size(),
            board.size(),
            render_roster(seats),
            render_board(board)
        );
        self.emit(&text);
    }

    fn board_updated(&mut self, board: &Board) {
        let text = format!("\n{}", render_board(board));
        self.emit(&text);
    }

    fn move_rejected(&mut self, seat: &SeatInfo, mv: Move) {
        let text = format!(
            "Invalid move {} by {}! Cell is either occupied or out of bounds. Try again.\n",
            mv, seat.name
        );
        self.emit(&text);
    }

    fn game_finished(&mut self, outcome: &GameOutcome, seats: &[SeatInfo]) {
        let text = format!(
            "\n{}\n\nFinal player summary:\n{}",
            render_outcome(outcome),
            render_roster(seats)
        );
        self.emit(&text);
    }
}
