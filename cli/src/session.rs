use std::collections::VecDeque;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::ops::RangeInclusive;
use std::str::FromStr;

use anyhow::Result;
use minesweep_core::*;

use crate::command::{Command, CommandError};
use crate::render::BoardView;

const HELP: &str = "\
new\t- start a new game
peek\t- view contents of each cell (for debugging)
A1\t- guess that cell A1 is safe
A1!\t- guess that cell A1 has a mine
reset\t- start over with the same parameters
help\t- view this menu
quit\t- exit the program

All commands are case-insensitive. Good luck, and try not to step on a mine!";

const PLAY_AGAIN: &str = "Type \"new\" or \"reset\" to play again, or \"quit\" to exit.";

/// Interactive loop reading whitespace-separated tokens from `input` and
/// writing prompts and boards to `output`.
pub struct Session<G, R, W> {
    board: Board<G>,
    input: R,
    output: W,
    pending: VecDeque<String>,
    peek: bool,
}

impl<G: MinefieldGenerator, R: BufRead, W: Write> Session<G, R, W> {
    pub fn new(board: Board<G>, input: R, output: W) -> Self {
        Self {
            board,
            input,
            output,
            pending: VecDeque::new(),
            peek: false,
        }
    }

    pub fn board(&self) -> &Board<G> {
        &self.board
    }

    /// Plays until `quit` or end of input. `initial` skips the opening prompts
    /// when it is a valid configuration.
    pub fn run(&mut self, initial: Option<GameConfig>) -> Result<()> {
        writeln!(self.output, "Welcome to Minesweeper!")?;

        let started = match initial {
            Some(config) => match self.board.initialize(config) {
                Ok(()) => {
                    self.draw()?;
                    true
                }
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    self.new_game()?
                }
            },
            None => self.new_game()?,
        };
        if !started {
            return Ok(());
        }

        writeln!(self.output, "Type a command, or '?' for help.")?;
        while let Some(token) = self.next_token()? {
            log::debug!("command: {token}");
            let keep_playing = match token.parse::<Command>() {
                Ok(command) => self.execute(command)?,
                Err(CommandError::Empty) => true,
                Err(CommandError::Unknown(_)) => {
                    writeln!(self.output, "...What? Unknown command.")?;
                    true
                }
            };
            if !keep_playing {
                break;
            }
        }

        log::info!("Session ended");
        Ok(())
    }

    /// Returns false once the session should stop.
    fn execute(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Quit => {
                writeln!(self.output, "Thanks for playing Minesweeper!")?;
                return Ok(false);
            }
            Command::New => return self.new_game(),
            Command::Reset => match self.board.reset() {
                Ok(()) => self.draw()?,
                Err(err) => writeln!(self.output, "{err}")?,
            },
            Command::Peek => {
                self.peek = !self.peek;
                let status = if self.peek { "activated" } else { "deactivated" };
                writeln!(self.output, "Peek mode {status}.")?;
                self.draw()?;
            }
            Command::Guess { coords, mine } => self.guess(coords, mine)?,
        }
        Ok(true)
    }

    fn guess(&mut self, coords: Coord2, mine: bool) -> Result<()> {
        let outcome = match self.board.guess(coords, mine) {
            Ok(outcome) => outcome,
            Err(GameError::NoActiveGame) => {
                writeln!(
                    self.output,
                    "Type \"new\" to start a new game, or \"?\" for help."
                )?;
                return Ok(());
            }
            Err(GameError::OutOfBounds { .. }) => {
                writeln!(self.output, "...What? Unknown command.")?;
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        match outcome {
            GuessOutcome::AlreadyGuessed => {
                writeln!(self.output, "That location has already been guessed!")?;
            }
            GuessOutcome::MineFound => {
                writeln!(self.output, "Correct! Mine found.")?;
                self.draw()?;
            }
            GuessOutcome::Revealed(_) => self.draw()?,
            GuessOutcome::Won => {
                writeln!(
                    self.output,
                    "Congratulations! You've won the game. Nice going."
                )?;
                writeln!(self.output, "{PLAY_AGAIN}")?;
            }
            GuessOutcome::Lost => {
                writeln!(
                    self.output,
                    "Wrong move... your inevitable defeat has come to pass, I guess."
                )?;
                writeln!(self.output, "{PLAY_AGAIN}")?;
            }
        }
        Ok(())
    }

    /// Prompts for dimensions and mines, then starts the round. Returns false
    /// if input ran out first.
    fn new_game(&mut self) -> Result<bool> {
        writeln!(self.output, "Starting a new game!")?;
        let limits = *self.board.limits();

        let Some(width) = self.prompt("board width", limits.width_range())? else {
            return Ok(false);
        };
        let Some(height) = self.prompt("board height", limits.height_range())? else {
            return Ok(false);
        };
        let mine_range = limits.mine_range((height, width));
        let Some(mines) = self.prompt("number of mines", mine_range)? else {
            return Ok(false);
        };

        self.board.initialize(GameConfig::new((height, width), mines))?;
        self.draw()?;
        Ok(true)
    }

    /// Asks until a value inside `range` is entered; `None` at end of input.
    fn prompt<T>(&mut self, label: &str, range: RangeInclusive<T>) -> Result<Option<T>>
    where
        T: FromStr + PartialOrd + Display,
    {
        loop {
            writeln!(
                self.output,
                "Enter {label} (min: {}. max: {}.)",
                range.start(),
                range.end()
            )?;
            let Some(token) = self.next_token()? else {
                return Ok(None);
            };
            match token.parse::<T>() {
                Ok(value) if range.contains(&value) => return Ok(Some(value)),
                _ => log::debug!("rejected {label}: {token}"),
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
        Ok(self.pending.pop_front())
    }

    fn draw(&mut self) -> Result<()> {
        writeln!(self.output, "{}", BoardView::new(&self.board, self.peek))?;
        Ok(())
    }
}
