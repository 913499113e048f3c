use std::str::FromStr;

use minesweep_core::{Coord, Coord2};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    New,
    Reset,
    Peek,
    /// `A1` claims the cell is safe, `A1!` claims it holds a mine.
    Guess { coords: Coord2, mine: bool },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CommandError::Empty);
        }
        if input.starts_with('?') {
            return Ok(Self::Help);
        }

        match input.to_ascii_lowercase().as_str() {
            "help" => Ok(Self::Help),
            "quit" => Ok(Self::Quit),
            "new" => Ok(Self::New),
            "reset" => Ok(Self::Reset),
            "peek" => Ok(Self::Peek),
            _ => parse_guess(input).ok_or_else(|| CommandError::Unknown(input.to_owned())),
        }
    }
}

/// Row letter, column digits, optional trailing `!`.
fn parse_guess(input: &str) -> Option<Command> {
    let (cell, mine) = match input.strip_suffix('!') {
        Some(cell) => (cell, true),
        None => (input, false),
    };

    let mut chars = cell.chars();
    let row_letter = chars.next()?.to_ascii_uppercase();
    if !row_letter.is_ascii_uppercase() {
        return None;
    }
    let row = row_letter as u8 - b'A';

    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let col: Coord = digits.parse().ok()?;

    Some(Command::Guess {
        coords: (row, col),
        mine,
    })
}

/// Letter labelling `row` on screen, the inverse of the guess parser.
pub fn row_label(row: Coord) -> char {
    char::from(b'A'.saturating_add(row))
}
