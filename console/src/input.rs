use std::io::{self, BufRead, Write};

use common::games::tictactoe::{GameError, Move, PlayerInput, TurnView};
use common::log;

/// Line-oriented text source. Returns `Ok(None)` at end of input.
pub trait LineSource {
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// Reads from the process stdin without holding its lock between calls,
/// so several human seats can share it.
pub struct StdinSource;

impl LineSource for StdinSource {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

pub fn prompt(text: &str) {
    print!("{}", text);
    if let Err(e) = io::stdout().flush() {
        log!("Failed to flush stdout: {}", e);
    }
}

/// Parses `"row col"`. Range checks are left to the board.
pub fn parse_move(line: &str) -> Result<Move, String> {
    let mut parts = line.split_whitespace();
    let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err("Invalid input! Please enter two numbers.".to_string());
    };

    match (row.parse::<usize>(), col.parse::<usize>()) {
        (Ok(row), Ok(col)) => Ok(Move::new(row, col)),
        _ => Err("Invalid input! Please enter two numbers.".to_string()),
    }
}

pub struct ConsoleInput<S: LineSource> {
    source: S,
}

impl<S: LineSource> ConsoleInput<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: LineSource> PlayerInput for ConsoleInput<S> {
    fn request_move(&mut self, name: &str, view: &TurnView<'_>) -> Result<Move, GameError> {
        let last = view.board.size() - 1;
        loop {
            println!("{}'s turn ({})", name, view.symbol);
            prompt(&format!("Enter row and column (0-{}, space separated): ", last));

            let line = match self.source.next_line() {
                Ok(Some(line)) => line,
                Ok(None) => return Err(GameError::InputClosed),
                Err(e) => {
                    log!("Failed to read move for {}: {}", name, e);
                    return Err(GameError::InputClosed);
                }
            };

            match parse_move(&line) {
                Ok(mv) => return Ok(mv),
                Err(message) => println!("{}", message),
            }
        }
    }
}
