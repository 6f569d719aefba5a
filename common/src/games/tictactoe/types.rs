use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    X,
    O,
    Star,
    Diamond,
    Spade,
    Heart,
    Club,
    BlackDiamond,
    WhiteDiamond,
    Circle,
}

impl Symbol {
    /// Seating order: the first player gets `X`, the second `O`, and so on.
    pub const ALL: [Symbol; 10] = [
        Symbol::X,
        Symbol::O,
        Symbol::Star,
        Symbol::Diamond,
        Symbol::Spade,
        Symbol::Heart,
        Symbol::Club,
        Symbol::BlackDiamond,
        Symbol::WhiteDiamond,
        Symbol::Circle,
    ];

    pub fn as_char(&self) -> char {
        match self {
            Symbol::X => 'X',
            Symbol::O => 'O',
            Symbol::Star => '★',
            Symbol::Diamond => '♦',
            Symbol::Spade => '♠',
            Symbol::Heart => '♥',
            Symbol::Club => '♣',
            Symbol::BlackDiamond => '◆',
            Symbol::WhiteDiamond => '◇',
            Symbol::Circle => '●',
        }
    }

    /// Head-to-head opponent: `X` plays `O`, everyone else plays `X`.
    pub fn opponent(&self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            _ => Symbol::X,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Symbol),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(symbol) => Some(*symbol),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Row,
    Column,
    Diagonal,
    AntiDiagonal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub symbol: Symbol,
    pub kind: LineKind,
    pub start: Move,
    pub end: Move,
}

impl WinningLine {
    pub fn new(symbol: Symbol, kind: LineKind, start: Move, end: Move) -> Self {
        Self {
            symbol,
            kind,
            start,
            end,
        }
    }
}
