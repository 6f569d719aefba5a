mod board;
mod bot_controller;
mod controller;
mod error;
mod player;
mod settings;
mod types;
mod win_detector;

pub use board::{Board, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
pub use bot_controller::{
    BotDifficulty, BotInput, DEFAULT_MINIMAX_DEPTH, SearchStrategy, UNLIMITED_DEPTH,
    calculate_heuristic_move, calculate_minimax_move, calculate_move, calculate_random_move,
};
pub use controller::{
    GameController, GameOutcome, GameState, MAX_PLAYERS, MIN_PLAYERS, Renderer, Seat, SeatInfo,
    seat_players,
};
pub use error::GameError;
pub use player::{BotPlayer, HumanPlayer, Player, PlayerInput, PlayerKind, TurnView};
pub use settings::{CONFIG_FILE, GameSettings, PlayerSettings};
pub use types::{Cell, LineKind, Move, Symbol, WinningLine};
pub use win_detector::{check_win, find_winning_line};
