mod input;
mod renderer;
mod setup;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use common::config::{ConfigManager, FileContentConfigProvider, YamlConfigSerializer};
use common::games::tictactoe::{CONFIG_FILE, GameError, GameSettings};
use common::{log, logger};

use input::{ConsoleInput, StdinSource};
use renderer::ConsoleRenderer;

#[derive(Parser)]
#[command(name = "nxn_tictactoe", about = "NxN tic-tac-toe for humans and bots")]
struct Args {
    /// YAML file holding the game setup
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Run the setup wizard even if the config file exists
    #[arg(long)]
    interactive: bool,

    /// Write the wizard result back to the config file
    #[arg(long)]
    save_config: bool,

    /// Override the board size from the config
    #[arg(long)]
    size: Option<usize>,

    /// Seed for the bots' random choices
    #[arg(long)]
    seed: Option<u64>,

    /// Write engine log lines to stderr
    #[arg(long)]
    verbose: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

fn load_settings(
    args: &Args,
    config_manager: &ConfigManager<FileContentConfigProvider, GameSettings, YamlConfigSerializer>,
) -> Result<GameSettings, Box<dyn std::error::Error>> {
    let stored = config_manager.load_config()?;

    let mut settings = match stored {
        Some(settings) if !args.interactive => {
            log!("Loaded setup from {}", args.config.display());
            settings
        }
        stored => {
            let base = stored.unwrap_or_default();
            let settings = setup::run_wizard(&mut StdinSource, &base)?;
            if args.save_config {
                config_manager.set_config(&settings)?;
                log!("Saved setup to {}", args.config.display());
            }
            settings
        }
    };

    if let Some(size) = args.size {
        settings.board_size = size;
    }
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    Ok(settings)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.verbose {
        let prefix = if args.use_log_prefix {
            Some("Console".to_string())
        } else {
            None
        };
        logger::init_logger(prefix);
    }

    let config_manager = ConfigManager::from_yaml_file(args.config.clone());
    let settings = load_settings(&args, &config_manager)?;

    let mut game = settings.create_game(|| Box::new(ConsoleInput::new(StdinSource)))?;
    let mut renderer = ConsoleRenderer::new(io::stdout());

    match game.run(&mut renderer) {
        Ok(_) => Ok(()),
        Err(GameError::InputClosed) => {
            println!("\nInput closed, leaving the game.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
