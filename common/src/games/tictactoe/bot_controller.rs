use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::games::SessionRng;
use crate::log;
use super::board::Board;
use super::error::GameError;
use super::types::{Move, Symbol};

pub const DEFAULT_MINIMAX_DEPTH: usize = 3;
pub const UNLIMITED_DEPTH: usize = usize::MAX;

const WIN_SCORE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotDifficulty {
    Easy,
    Medium,
    Hard,
}

impl BotDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            BotDifficulty::Easy => "easy",
            BotDifficulty::Medium => "medium",
            BotDifficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for BotDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BotDifficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "e" => Ok(BotDifficulty::Easy),
            "medium" | "m" => Ok(BotDifficulty::Medium),
            "hard" | "h" => Ok(BotDifficulty::Hard),
            other => Err(format!(
                "Unknown bot difficulty '{}', expected easy, medium or hard",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    Random,
    Heuristic,
    Minimax { max_depth: usize },
}

impl SearchStrategy {
    pub fn for_difficulty(difficulty: BotDifficulty, minimax_depth: usize) -> Self {
        match difficulty {
            BotDifficulty::Easy => SearchStrategy::Random,
            BotDifficulty::Medium => SearchStrategy::Heuristic,
            BotDifficulty::Hard => SearchStrategy::Minimax {
                max_depth: minimax_depth,
            },
        }
    }
}

/// Position handed to a search: a private copy of the board, the symbol to
/// move and the opponents in the order they move after it.
pub struct BotInput {
    pub board: Board,
    pub symbol: Symbol,
    pub opponents: Vec<Symbol>,
}

impl BotInput {
    pub fn new(board: &Board, symbol: Symbol, opponents: Vec<Symbol>) -> Self {
        Self {
            board: board.snapshot(),
            symbol,
            opponents,
        }
    }

    pub fn head_to_head(board: &Board, symbol: Symbol) -> Self {
        Self::new(board, symbol, vec![symbol.opponent()])
    }
}

pub fn calculate_move(
    strategy: SearchStrategy,
    input: &BotInput,
    rng: &mut SessionRng,
) -> Result<Move, GameError> {
    match strategy {
        SearchStrategy::Random => calculate_random_move(input, rng),
        SearchStrategy::Heuristic => calculate_heuristic_move(input, rng),
        SearchStrategy::Minimax { max_depth } => calculate_minimax_move(input, max_depth, rng),
    }
}

pub fn calculate_random_move(input: &BotInput, rng: &mut SessionRng) -> Result<Move, GameError> {
    let available_moves = input.board.available_moves();
    rng.choose(&available_moves)
        .copied()
        .ok_or(GameError::NoMoveAvailable)
}

pub fn calculate_heuristic_move(
    input: &BotInput,
    rng: &mut SessionRng,
) -> Result<Move, GameError> {
    let available_moves = input.board.available_moves();
    if available_moves.is_empty() {
        return Err(GameError::NoMoveAvailable);
    }

    if let Some(mv) = find_winning_move(&input.board, input.symbol, &available_moves) {
        return Ok(mv);
    }

    if let Some(mv) = find_blocking_move(&input.board, &input.opponents, &available_moves) {
        return Ok(mv);
    }

    if let Some(center) = input.board.center()
        && input.board.is_valid_move(center.row, center.col)
    {
        return Ok(center);
    }

    calculate_random_move(input, rng)
}

fn wins_with(board: &Board, mv: Move, symbol: Symbol) -> bool {
    let mut snapshot = board.snapshot();
    snapshot.apply_move(mv, symbol).is_ok() && snapshot.check_win(symbol)
}

fn find_winning_move(board: &Board, symbol: Symbol, moves: &[Move]) -> Option<Move> {
    moves.iter().copied().find(|&mv| wins_with(board, mv, symbol))
}

fn find_blocking_move(board: &Board, opponents: &[Symbol], moves: &[Move]) -> Option<Move> {
    moves
        .iter()
        .copied()
        .find(|&mv| opponents.iter().any(|&opponent| wins_with(board, mv, opponent)))
}

pub fn calculate_minimax_move(
    input: &BotInput,
    max_depth: usize,
    rng: &mut SessionRng,
) -> Result<Move, GameError> {
    let available_moves = input.board.available_moves();
    if available_moves.is_empty() {
        return calculate_random_move(input, rng);
    }

    let mut turn_order = vec![input.symbol];
    turn_order.extend(input.opponents.iter().copied());

    let mut search = Minimax {
        board: input.board.snapshot(),
        turn_order,
        max_depth,
        nodes: 0,
    };

    let mut best_move = None;
    let mut best_score = i32::MIN;

    for mv in available_moves {
        search.board.place(mv, input.symbol);
        let reply = 1 % search.turn_order.len();
        let score = search.minimax(0, reply, i32::MIN, i32::MAX);
        search.board.retract(mv);

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
    }

    log!(
        "Minimax for {} searched {} nodes, best score {}",
        input.symbol,
        search.nodes,
        best_score
    );

    match best_move {
        Some(mv) => Ok(mv),
        None => calculate_random_move(input, rng),
    }
}

/// Paranoid minimax: `turn_order[0]` maximises, every other symbol minimises.
struct Minimax {
    board: Board,
    turn_order: Vec<Symbol>,
    max_depth: usize,
    nodes: u64,
}

impl Minimax {
    fn terminal_score(&self, depth: usize) -> Option<i32> {
        let depth_score = i32::try_from(depth).unwrap_or(WIN_SCORE);

        if self.board.check_win(self.turn_order[0]) {
            return Some(WIN_SCORE - depth_score);
        }
        if self.turn_order[1..]
            .iter()
            .any(|&opponent| self.board.check_win(opponent))
        {
            return Some(depth_score - WIN_SCORE);
        }
        if self.board.is_full() || depth >= self.max_depth {
            return Some(0);
        }
        None
    }

    fn minimax(&mut self, depth: usize, mover: usize, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;

        if let Some(score) = self.terminal_score(depth) {
            return score;
        }

        let symbol = self.turn_order[mover];
        let next = (mover + 1) % self.turn_order.len();
        let is_maximizing = mover == 0;
        let mut best = if is_maximizing { i32::MIN } else { i32::MAX };

        for mv in self.board.available_moves() {
            self.board.place(mv, symbol);
            let score = self.minimax(depth + 1, next, alpha, beta);
            self.board.retract(mv);

            if is_maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if beta <= alpha {
                break;
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_out(
        board: &mut Board,
        strategies: &[(Symbol, SearchStrategy)],
        rng: &mut SessionRng,
    ) -> Option<Symbol> {
        let symbols: Vec<Symbol> = strategies.iter().map(|(s, _)| *s).collect();
        let mut turn = 0;
        loop {
            let (symbol, strategy) = strategies[turn];
            let opponents = (1..symbols.len())
                .map(|offset| symbols[(turn + offset) % symbols.len()])
                .collect();
            let input = BotInput::new(board, symbol, opponents);
            let mv = calculate_move(strategy, &input, rng).unwrap();
            board.apply_move(mv, symbol).unwrap();

            if board.check_win(symbol) {
                return Some(symbol);
            }
            if board.is_full() {
                return None;
            }
            turn = (turn + 1) % strategies.len();
        }
    }

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!("easy".parse::<BotDifficulty>(), Ok(BotDifficulty::Easy));
        assert_eq!(" M ".parse::<BotDifficulty>(), Ok(BotDifficulty::Medium));
        assert_eq!("HARD".parse::<BotDifficulty>(), Ok(BotDifficulty::Hard));
        assert!("impossible".parse::<BotDifficulty>().is_err());
    }

    #[test]
    fn test_difficulty_maps_to_strategy() {
        assert_eq!(
            SearchStrategy::for_difficulty(BotDifficulty::Easy, 3),
            SearchStrategy::Random
        );
        assert_eq!(
            SearchStrategy::for_difficulty(BotDifficulty::Medium, 3),
            SearchStrategy::Heuristic
        );
        assert_eq!(
            SearchStrategy::for_difficulty(BotDifficulty::Hard, 5),
            SearchStrategy::Minimax { max_depth: 5 }
        );
    }

    #[test]
    fn test_every_strategy_reports_full_board() {
        let board = Board::from_rows(&["XOX", "XOO", "OXX"]);
        let input = BotInput::head_to_head(&board, Symbol::X);
        let mut rng = SessionRng::new(1);

        for strategy in [
            SearchStrategy::Random,
            SearchStrategy::Heuristic,
            SearchStrategy::Minimax { max_depth: 3 },
        ] {
            assert_eq!(
                calculate_move(strategy, &input, &mut rng),
                Err(GameError::NoMoveAvailable)
            );
        }
    }

    #[test]
    fn test_random_move_is_legal_and_seeded() {
        let board = Board::from_rows(&["X.O", ".X.", "O.."]);
        let input = BotInput::head_to_head(&board, Symbol::X);

        let mut first = SessionRng::new(99);
        let mut second = SessionRng::new(99);
        for _ in 0..20 {
            let a = calculate_random_move(&input, &mut first).unwrap();
            let b = calculate_random_move(&input, &mut second).unwrap();
            assert_eq!(a, b);
            assert!(board.is_valid_move(a.row, a.col));
        }
    }

    #[test]
    fn test_random_move_covers_all_cells() {
        let board = Board::from_rows(&["XO.", "OX.", "..."]);
        let input = BotInput::head_to_head(&board, Symbol::X);
        let mut rng = SessionRng::new(3);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(calculate_random_move(&input, &mut rng).unwrap());
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_heuristic_blocks_two_in_a_row() {
        let board = Board::from_rows(&["XX.", ".O.", ".O."]);
        let input = BotInput::head_to_head(&board, Symbol::O);
        let mut rng = SessionRng::new(5);

        assert_eq!(
            calculate_heuristic_move(&input, &mut rng),
            Ok(Move::new(0, 2))
        );
    }

    #[test]
    fn test_heuristic_prefers_win_over_block() {
        let board = Board::from_rows(&["XX.", "OO.", "X.."]);
        let input = BotInput::head_to_head(&board, Symbol::O);
        let mut rng = SessionRng::new(5);

        assert_eq!(
            calculate_heuristic_move(&input, &mut rng),
            Ok(Move::new(1, 2))
        );
    }

    #[test]
    fn test_heuristic_win_tie_breaks_row_major() {
        let board = Board::from_rows(&["X.X", "...", "X.."]);
        let input = BotInput::head_to_head(&board, Symbol::X);
        let mut rng = SessionRng::new(5);

        assert_eq!(
            calculate_heuristic_move(&input, &mut rng),
            Ok(Move::new(0, 1))
        );
    }

    #[test]
    fn test_heuristic_takes_center() {
        let board = Board::from_rows(&["X..", "...", "..."]);
        let input = BotInput::head_to_head(&board, Symbol::O);
        let mut rng = SessionRng::new(5);

        assert_eq!(
            calculate_heuristic_move(&input, &mut rng),
            Ok(Move::new(1, 1))
        );
    }

    #[test]
    fn test_heuristic_even_board_falls_back_to_random() {
        let board = Board::new(4).unwrap();
        let input = BotInput::head_to_head(&board, Symbol::X);
        let mut heuristic_rng = SessionRng::new(11);
        let mut random_rng = SessionRng::new(11);

        assert_eq!(
            calculate_heuristic_move(&input, &mut heuristic_rng),
            calculate_random_move(&input, &mut random_rng)
        );
    }

    #[test]
    fn test_heuristic_blocks_earliest_threat_in_multiplayer() {
        let x_threatens_first = Board::from_rows(&["X.X", "...", "★★."]);
        let star_threatens_first = Board::from_rows(&["★.★", "...", "XX."]);
        let mut rng = SessionRng::new(5);

        for board in [x_threatens_first, star_threatens_first] {
            for opponents in [vec![Symbol::Star, Symbol::X], vec![Symbol::X, Symbol::Star]] {
                let input = BotInput::new(&board, Symbol::O, opponents);
                assert_eq!(
                    calculate_heuristic_move(&input, &mut rng),
                    Ok(Move::new(0, 1))
                );
            }
        }
    }

    #[test]
    fn test_minimax_takes_immediate_win() {
        let board = Board::from_rows(&["XX.", "OO.", "..."]);
        let input = BotInput::head_to_head(&board, Symbol::X);
        let mut rng = SessionRng::new(1);

        assert_eq!(
            calculate_minimax_move(&input, DEFAULT_MINIMAX_DEPTH, &mut rng),
            Ok(Move::new(0, 2))
        );
    }

    #[test]
    fn test_minimax_blocks_immediate_loss() {
        let board = Board::from_rows(&["OO.", "X..", "..X"]);
        let input = BotInput::head_to_head(&board, Symbol::X);
        let mut rng = SessionRng::new(1);

        assert_eq!(
            calculate_minimax_move(&input, DEFAULT_MINIMAX_DEPTH, &mut rng),
            Ok(Move::new(0, 2))
        );
    }

    #[test]
    fn test_minimax_does_not_touch_callers_board() {
        let board = Board::from_rows(&["X..", ".O.", "..."]);
        let before = board.clone();
        let input = BotInput::head_to_head(&board, Symbol::X);
        let mut rng = SessionRng::new(1);

        calculate_minimax_move(&input, UNLIMITED_DEPTH, &mut rng).unwrap();

        assert_eq!(board, before);
        assert_eq!(input.board, before);
    }

    #[test]
    fn test_minimax_works_on_larger_board() {
        let board = Board::from_rows(&["XXX.", "OO..", "O...", "...."]);
        let input = BotInput::head_to_head(&board, Symbol::X);
        let mut rng = SessionRng::new(1);

        assert_eq!(
            calculate_minimax_move(&input, DEFAULT_MINIMAX_DEPTH, &mut rng),
            Ok(Move::new(0, 3))
        );
    }

    #[test]
    fn test_perfect_minimax_never_loses_to_random() {
        for seed in 0..15 {
            for minimax_first in [true, false] {
                let mut board = Board::new(3).unwrap();
                let mut rng = SessionRng::new(seed);
                let perfect = SearchStrategy::Minimax {
                    max_depth: UNLIMITED_DEPTH,
                };
                let strategies = if minimax_first {
                    [(Symbol::X, perfect), (Symbol::O, SearchStrategy::Random)]
                } else {
                    [(Symbol::X, SearchStrategy::Random), (Symbol::O, perfect)]
                };
                let minimax_symbol = if minimax_first { Symbol::X } else { Symbol::O };

                let winner = play_out(&mut board, &strategies, &mut rng);

                assert!(
                    winner.is_none() || winner == Some(minimax_symbol),
                    "seed {} lost as {}",
                    seed,
                    minimax_symbol
                );
            }
        }
    }

    #[test]
    fn test_perfect_minimax_never_loses_to_heuristic() {
        for seed in 0..5 {
            let mut board = Board::new(3).unwrap();
            let mut rng = SessionRng::new(seed);
            let strategies = [
                (Symbol::X, SearchStrategy::Heuristic),
                (
                    Symbol::O,
                    SearchStrategy::Minimax {
                        max_depth: UNLIMITED_DEPTH,
                    },
                ),
            ];

            let winner = play_out(&mut board, &strategies, &mut rng);

            assert_ne!(winner, Some(Symbol::X));
        }
    }

    #[test]
    fn test_perfect_self_play_is_draw() {
        let mut board = Board::new(3).unwrap();
        let mut rng = SessionRng::new(0);
        let perfect = SearchStrategy::Minimax {
            max_depth: UNLIMITED_DEPTH,
        };

        let winner = play_out(
            &mut board,
            &[(Symbol::X, perfect), (Symbol::O, perfect)],
            &mut rng,
        );

        assert_eq!(winner, None);
        assert!(board.is_full());
    }

    #[test]
    fn test_three_player_game_terminates() {
        let mut board = Board::new(4).unwrap();
        let mut rng = SessionRng::new(21);
        let strategies = [
            (Symbol::X, SearchStrategy::Minimax { max_depth: 2 }),
            (Symbol::O, SearchStrategy::Heuristic),
            (Symbol::Star, SearchStrategy::Random),
        ];

        let winner = play_out(&mut board, &strategies, &mut rng);

        match winner {
            Some(symbol) => assert!(board.check_win(symbol)),
            None => assert!(board.is_full()),
        }
    }
}
