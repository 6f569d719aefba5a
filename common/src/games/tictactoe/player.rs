use std::fmt;
use std::time::Duration;

use crate::games::SessionRng;
use crate::log;
use super::board::Board;
use super::bot_controller::{BotDifficulty, BotInput, DEFAULT_MINIMAX_DEPTH, SearchStrategy, calculate_move};
use super::error::GameError;
use super::types::{Move, Symbol};

/// What a player sees when asked for a move. The board is borrowed read-only.
pub struct TurnView<'a> {
    pub board: &'a Board,
    pub symbol: Symbol,
    /// Everyone else, in the order they move after this player.
    pub opponents: &'a [Symbol],
}

/// Source of moves for a human seat, e.g. a console prompt.
///
/// Implementations block until a well-formed coordinate pair arrives and
/// retry malformed input themselves. Whether the cell is free is checked
/// by the controller, not here.
pub trait PlayerInput {
    fn request_move(&mut self, name: &str, view: &TurnView<'_>) -> Result<Move, GameError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Bot(BotDifficulty),
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Human => write!(f, "Human"),
            PlayerKind::Bot(difficulty) => write!(f, "Bot ({})", difficulty),
        }
    }
}

pub trait Player {
    fn name(&self) -> &str;

    fn kind(&self) -> PlayerKind;

    fn next_move(&mut self, view: &TurnView<'_>) -> Result<Move, GameError>;
}

pub struct HumanPlayer {
    name: String,
    input: Box<dyn PlayerInput>,
}

impl HumanPlayer {
    pub fn new(name: impl Into<String>, input: Box<dyn PlayerInput>) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }
}

impl Player for HumanPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Human
    }

    fn next_move(&mut self, view: &TurnView<'_>) -> Result<Move, GameError> {
        self.input.request_move(&self.name, view)
    }
}

pub struct BotPlayer {
    name: String,
    difficulty: BotDifficulty,
    strategy: SearchStrategy,
    rng: SessionRng,
    move_delay: Duration,
}

impl BotPlayer {
    pub fn new(name: impl Into<String>, difficulty: BotDifficulty, rng: SessionRng) -> Self {
        Self {
            name: name.into(),
            difficulty,
            strategy: SearchStrategy::for_difficulty(difficulty, DEFAULT_MINIMAX_DEPTH),
            rng,
            move_delay: Duration::ZERO,
        }
    }

    pub fn with_minimax_depth(mut self, max_depth: usize) -> Self {
        self.strategy = SearchStrategy::for_difficulty(self.difficulty, max_depth);
        self
    }

    /// Pause before answering so a human watching can follow the bot.
    pub fn with_move_delay(mut self, move_delay: Duration) -> Self {
        self.move_delay = move_delay;
        self
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }
}

impl Player for BotPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Bot(self.difficulty)
    }

    fn next_move(&mut self, view: &TurnView<'_>) -> Result<Move, GameError> {
        if !self.move_delay.is_zero() {
            std::thread::sleep(self.move_delay);
        }

        let input = BotInput::new(view.board, view.symbol, view.opponents.to_vec());
        let mv = calculate_move(self.strategy, &input, &mut self.rng)?;

        log!(
            "{} ({}, {:?}) chooses {}",
            self.name,
            view.symbol,
            self.strategy,
            mv
        );
        Ok(mv)
    }
}
