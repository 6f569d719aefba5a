use crate::log;
use super::board::Board;
use super::error::GameError;
use super::player::{Player, PlayerKind, TurnView};
use super::types::{Move, Symbol, WinningLine};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = Symbol::ALL.len();

pub struct Seat {
    player: Box<dyn Player>,
    symbol: Symbol,
}

impl Seat {
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn info(&self) -> SeatInfo {
        SeatInfo {
            name: self.player.name().to_string(),
            symbol: self.symbol,
            kind: self.player.kind(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatInfo {
    pub name: String,
    pub symbol: Symbol,
    pub kind: PlayerKind,
}

/// Gives every player a symbol, in seating order. Symbols are never reused.
pub fn seat_players(players: Vec<Box<dyn Player>>) -> Result<Vec<Seat>, GameError> {
    if players.len() < MIN_PLAYERS {
        return Err(GameError::Configuration(format!(
            "Need at least {} players, got {}",
            MIN_PLAYERS,
            players.len()
        )));
    }
    if players.len() > MAX_PLAYERS {
        return Err(GameError::Configuration(format!(
            "Too many players: maximum {} supported, got {}",
            MAX_PLAYERS,
            players.len()
        )));
    }

    Ok(players
        .into_iter()
        .zip(Symbol::ALL)
        .map(|(player, symbol)| Seat { player, symbol })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    Win {
        player_index: usize,
        name: String,
        symbol: Symbol,
        line: WinningLine,
    },
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameState {
    AwaitingMove(usize),
    CheckingOutcome(usize),
    Finished(GameOutcome),
}

/// Display side of a game. Only `board_updated` and `game_finished` are required.
pub trait Renderer {
    fn game_started(&mut self, _seats: &[SeatInfo], _board: &Board) {}

    fn board_updated(&mut self, board: &Board);

    fn move_rejected(&mut self, _seat: &SeatInfo, _mv: Move) {}

    fn game_finished(&mut self, outcome: &GameOutcome, seats: &[SeatInfo]);
}

pub struct GameController {
    board: Board,
    seats: Vec<Seat>,
    state: GameState,
}

impl GameController {
    pub fn new(board_size: usize, players: Vec<Box<dyn Player>>) -> Result<Self, GameError> {
        let board = Board::new(board_size)?;
        let seats = seat_players(players)?;

        Ok(Self {
            board,
            seats,
            state: GameState::AwaitingMove(0),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn seats(&self) -> Vec<SeatInfo> {
        self.seats.iter().map(Seat::info).collect()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, GameState::Finished(_))
    }

    pub fn run(&mut self, renderer: &mut dyn Renderer) -> Result<GameOutcome, GameError> {
        let seats = self.seats();
        log!(
            "Game started on {}x{} board with {} players",
            self.board.size(),
            self.board.size(),
            seats.len()
        );
        for seat in &seats {
            log!("  {} ({}) - {}", seat.name, seat.symbol, seat.kind);
        }
        renderer.game_started(&seats, &self.board);

        loop {
            if let GameState::Finished(outcome) = self.step(renderer)? {
                return Ok(outcome.clone());
            }
        }
    }

    /// Performs exactly one state transition.
    pub fn step(&mut self, renderer: &mut dyn Renderer) -> Result<&GameState, GameError> {
        match self.state {
            GameState::AwaitingMove(index) => self.request_move(index, renderer)?,
            GameState::CheckingOutcome(index) => self.check_outcome(index, renderer),
            GameState::Finished(_) => {}
        }
        Ok(&self.state)
    }

    fn opponents_of(&self, index: usize) -> Vec<Symbol> {
        let count = self.seats.len();
        (1..count)
            .map(|offset| self.seats[(index + offset) % count].symbol)
            .collect()
    }

    fn request_move(&mut self, index: usize, renderer: &mut dyn Renderer) -> Result<(), GameError> {
        let opponents = self.opponents_of(index);
        let seat = &mut self.seats[index];
        let view = TurnView {
            board: &self.board,
            symbol: seat.symbol,
            opponents: &opponents,
        };

        let mv = seat.player.next_move(&view)?;

        match self.board.apply_move(mv, seat.symbol) {
            Ok(()) => {
                log!("{} ({}) plays {}", seat.player.name(), seat.symbol, mv);
                renderer.board_updated(&self.board);
                self.state = GameState::CheckingOutcome(index);
            }
            Err(GameError::InvalidMove { .. }) => {
                if let PlayerKind::Bot(_) = seat.player.kind() {
                    log!("Bot {} attempted invalid move {}, retrying", seat.player.name(), mv);
                } else {
                    log!("{} attempted invalid move {}", seat.player.name(), mv);
                }
                renderer.move_rejected(&seat.info(), mv);
            }
            Err(other) => return Err(other),
        }

        Ok(())
    }

    fn check_outcome(&mut self, index: usize, renderer: &mut dyn Renderer) {
        let seat = &self.seats[index];

        let outcome = if let Some(line) = self.board.winning_line(seat.symbol) {
            GameOutcome::Win {
                player_index: index,
                name: seat.player.name().to_string(),
                symbol: seat.symbol,
                line,
            }
        } else if self.board.is_full() {
            GameOutcome::Draw
        } else {
            self.state = GameState::AwaitingMove((index + 1) % self.seats.len());
            return;
        };

        match &outcome {
            GameOutcome::Win { name, symbol, .. } => log!("Game over: {} ({}) wins", name, symbol),
            GameOutcome::Draw => log!("Game over: draw"),
        }

        renderer.game_finished(&outcome, &self.seats());
        self.state = GameState::Finished(outcome);
    }
}
