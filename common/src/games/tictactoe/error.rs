#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    InvalidMove { row: usize, col: usize },
    NoMoveAvailable,
    Configuration(String),
    InputClosed,
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InvalidMove { row, col } => write!(
                f,
                "Invalid move ({}, {}): cell is either occupied or out of bounds",
                row, col
            ),
            GameError::NoMoveAvailable => write!(f, "No move available: the board is full"),
            GameError::Configuration(message) => write!(f, "Configuration error: {}", message),
            GameError::InputClosed => write!(f, "Player input closed"),
        }
    }
}

impl std::error::Error for GameError {}

impl From<String> for GameError {
    fn from(message: String) -> Self {
        GameError::Configuration(message)
    }
}
