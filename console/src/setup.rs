use std::io;

use common::games::tictactoe::{
    BotDifficulty, GameSettings, MAX_BOARD_SIZE, MAX_PLAYERS, MIN_BOARD_SIZE, MIN_PLAYERS,
    PlayerSettings,
};

use crate::input::{LineSource, prompt};

fn read_line(source: &mut dyn LineSource) -> io::Result<String> {
    match source.next_line()? {
        Some(line) => Ok(line.trim().to_string()),
        None => Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed during setup",
        )),
    }
}

fn read_number(
    source: &mut dyn LineSource,
    text: &str,
    min: usize,
    max: usize,
    error: &str,
) -> io::Result<usize> {
    loop {
        prompt(text);
        match read_line(source)?.parse::<usize>() {
            Ok(value) if (min..=max).contains(&value) => return Ok(value),
            Ok(_) => println!("{}", error),
            Err(_) => println!("Please enter a valid number!"),
        }
    }
}

fn read_difficulty(source: &mut dyn LineSource) -> io::Result<BotDifficulty> {
    loop {
        prompt("Enter bot difficulty (easy/medium/hard): ");
        match read_line(source)?.parse::<BotDifficulty>() {
            Ok(difficulty) => return Ok(difficulty),
            Err(_) => println!("Please enter 'easy', 'medium', or 'hard'!"),
        }
    }
}

fn read_player(source: &mut dyn LineSource, number: usize) -> io::Result<PlayerSettings> {
    println!("\n--- Player {} Setup ---", number);
    prompt("Enter player type (human/bot): ");
    let kind = read_line(source)?.to_lowercase();

    let is_bot = match kind.as_str() {
        "bot" | "b" => true,
        "human" | "h" => false,
        _ => {
            println!("Invalid type! Defaulting to human player.");
            false
        }
    };

    if is_bot {
        prompt("Enter bot name (optional): ");
        let name = or_default_name(read_line(source)?, "Bot", number);
        let difficulty = read_difficulty(source)?;
        Ok(PlayerSettings::Bot { name, difficulty })
    } else {
        prompt(&format!("Enter name for Player {}: ", number));
        let name = or_default_name(read_line(source)?, "Player", number);
        Ok(PlayerSettings::Human { name })
    }
}

fn or_default_name(name: String, prefix: &str, number: usize) -> String {
    if name.is_empty() {
        format!("{}{}", prefix, number)
    } else {
        name
    }
}

/// Asks for board size, player count and every seat. Fields the wizard
/// does not cover are taken from `base`.
pub fn run_wizard(source: &mut dyn LineSource, base: &GameSettings) -> io::Result<GameSettings> {
    println!("=== Tic-Tac-Toe Game Setup ===");

    let board_size = read_number(
        source,
        &format!(
            "Enter board size (NxN, {}-{}): ",
            MIN_BOARD_SIZE, MAX_BOARD_SIZE
        ),
        MIN_BOARD_SIZE,
        MAX_BOARD_SIZE,
        &format!(
            "Board size must be between {} and {}!",
            MIN_BOARD_SIZE, MAX_BOARD_SIZE
        ),
    )?;

    let player_count = read_number(
        source,
        &format!("Enter number of players ({}-{}): ", MIN_PLAYERS, MAX_PLAYERS),
        MIN_PLAYERS,
        MAX_PLAYERS,
        &format!(
            "Number of players must be between {} and {}!",
            MIN_PLAYERS, MAX_PLAYERS
        ),
    )?;

    let players = (1..=player_count)
        .map(|number| read_player(source, number))
        .collect::<io::Result<Vec<_>>>()?;

    Ok(GameSettings {
        board_size,
        players,
        ..base.clone()
    })
}
