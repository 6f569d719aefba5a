use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use crate::games::SessionRng;
use crate::log;
use super::board::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use super::bot_controller::{BotDifficulty, DEFAULT_MINIMAX_DEPTH};
use super::controller::{GameController, MAX_PLAYERS, MIN_PLAYERS};
use super::error::GameError;
use super::player::{BotPlayer, HumanPlayer, Player, PlayerInput};

pub const CONFIG_FILE: &str = "tictactoe_config.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlayerSettings {
    Human { name: String },
    Bot { name: String, difficulty: BotDifficulty },
}

impl PlayerSettings {
    pub fn name(&self) -> &str {
        match self {
            PlayerSettings::Human { name } | PlayerSettings::Bot { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub board_size: usize,
    pub players: Vec<PlayerSettings>,
    pub minimax_depth: usize,
    pub bot_move_delay_ms: u64,
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            board_size: MIN_BOARD_SIZE,
            players: vec![
                PlayerSettings::Human {
                    name: "Player1".to_string(),
                },
                PlayerSettings::Bot {
                    name: "Bot2".to_string(),
                    difficulty: BotDifficulty::Medium,
                },
            ],
            minimax_depth: DEFAULT_MINIMAX_DEPTH,
            bot_move_delay_ms: 0,
            seed: None,
        }
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(format!(
                "Board size must be between {} and {}, got {}",
                MIN_BOARD_SIZE, MAX_BOARD_SIZE, self.board_size
            ));
        }
        if self.players.len() < MIN_PLAYERS || self.players.len() > MAX_PLAYERS {
            return Err(format!(
                "Number of players must be between {} and {}, got {}",
                MIN_PLAYERS,
                MAX_PLAYERS,
                self.players.len()
            ));
        }
        if let Some(index) = self.players.iter().position(|p| p.name().trim().is_empty()) {
            return Err(format!("Player {} has an empty name", index + 1));
        }
        if self.minimax_depth == 0 {
            return Err("minimax_depth must be at least 1".to_string());
        }
        Ok(())
    }
}

impl GameSettings {
    /// Builds the players and the controller. `human_input` is called once per
    /// human seat.
    pub fn create_game<F>(&self, mut human_input: F) -> Result<GameController, GameError>
    where
        F: FnMut() -> Box<dyn PlayerInput>,
    {
        self.validate()?;

        let mut session_rng = match self.seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        };
        log!("Bot seed: {}", session_rng.seed());

        let move_delay = Duration::from_millis(self.bot_move_delay_ms);
        let players: Vec<Box<dyn Player>> = self
            .players
            .iter()
            .map(|settings| -> Box<dyn Player> {
                match settings {
                    PlayerSettings::Human { name } => {
                        Box::new(HumanPlayer::new(name.clone(), human_input()))
                    }
                    PlayerSettings::Bot { name, difficulty } => Box::new(
                        BotPlayer::new(name.clone(), *difficulty, session_rng.fork())
                            .with_minimax_depth(self.minimax_depth)
                            .with_move_delay(move_delay),
                    ),
                }
            })
            .collect();

        GameController::new(self.board_size, players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigSerializer, YamlConfigSerializer};
    use crate::games::tictactoe::player::{PlayerKind, TurnView};
    use crate::games::tictactoe::types::{Move, Symbol};

    struct NoInput;

    impl PlayerInput for NoInput {
        fn request_move(&mut self, _name: &str, _view: &TurnView<'_>) -> Result<Move, GameError> {
            Err(GameError::InputClosed)
        }
    }

    fn bots(count: usize) -> Vec<PlayerSettings> {
        (1..=count)
            .map(|i| PlayerSettings::Bot {
                name: format!("Bot{}", i),
                difficulty: BotDifficulty::Easy,
            })
            .collect()
    }

    #[test]
    fn test_default_is_valid() {
        assert_eq!(GameSettings::default().validate(), Ok(()));
    }

    #[test]
    fn test_player_count_bounds() {
        let mut settings = GameSettings {
            players: bots(1),
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());

        settings.players = bots(11);
        assert!(settings.validate().is_err());

        settings.players = bots(10);
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn test_board_size_and_depth_bounds() {
        let settings = GameSettings {
            board_size: 2,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = GameSettings {
            board_size: usize::MAX,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
        assert!(matches!(
            settings.create_game(|| Box::new(NoInput)),
            Err(GameError::Configuration(_))
        ));

        let settings = GameSettings {
            minimax_depth: 0,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_empty_name_rejected() {
        let settings = GameSettings {
            players: vec![
                PlayerSettings::Human {
                    name: "  ".to_string(),
                },
                PlayerSettings::Human {
                    name: "Bob".to_string(),
                },
            ],
            ..GameSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err("Player 1 has an empty name".to_string())
        );
    }

    #[test]
    fn test_yaml_shape() {
        let yaml = "\
board_size: 4
players:
  - kind: human
    name: Alice
  - kind: bot
    name: Deep
    difficulty: hard
minimax_depth: 5
seed: 42
";
        let settings: GameSettings = YamlConfigSerializer.deserialize(yaml).unwrap();

        assert_eq!(settings.board_size, 4);
        assert_eq!(settings.minimax_depth, 5);
        assert_eq!(settings.bot_move_delay_ms, 0);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(
            settings.players[1],
            PlayerSettings::Bot {
                name: "Deep".to_string(),
                difficulty: BotDifficulty::Hard,
            }
        );
    }

    #[test]
    fn test_create_game_seats_players_in_order() {
        let settings = GameSettings {
            board_size: 5,
            players: vec![
                PlayerSettings::Human {
                    name: "Alice".to_string(),
                },
                PlayerSettings::Bot {
                    name: "Deep".to_string(),
                    difficulty: BotDifficulty::Hard,
                },
                PlayerSettings::Bot {
                    name: "Rand".to_string(),
                    difficulty: BotDifficulty::Easy,
                },
            ],
            seed: Some(1),
            ..GameSettings::default()
        };
        let mut inputs = 0;

        let controller = settings
            .create_game(|| {
                inputs += 1;
                Box::new(NoInput)
            })
            .unwrap();
        let seats = controller.seats();

        assert_eq!(inputs, 1);
        assert_eq!(controller.board().size(), 5);
        assert_eq!(seats[0].kind, PlayerKind::Human);
        assert_eq!(seats[1].kind, PlayerKind::Bot(BotDifficulty::Hard));
        assert_eq!(seats[2].symbol, Symbol::Star);
    }

    #[test]
    fn test_create_game_rejects_invalid_settings() {
        let settings = GameSettings {
            players: bots(1),
            ..GameSettings::default()
        };

        let result = settings.create_game(|| Box::new(NoInput));

        assert!(matches!(result, Err(GameError::Configuration(_))));
    }
}
