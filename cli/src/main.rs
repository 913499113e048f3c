use std::io;

use anyhow::Result;
use clap::Parser;
use minesweep_core::{Board, BoardLimits, CellCount, Coord, GameConfig};

mod command;
mod render;
mod session;

use session::Session;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Board height for the first game; prompts when omitted
    #[arg(long)]
    height: Option<Coord>,

    /// Board width for the first game; prompts when omitted
    #[arg(long)]
    width: Option<Coord>,

    /// Number of mines for the first game; prompts when omitted
    #[arg(long)]
    mines: Option<CellCount>,
}

impl Args {
    /// First-game configuration, only when all three values were given.
    fn initial_config(&self) -> Option<GameConfig> {
        Some(GameConfig::new((self.height?, self.width?), self.mines?))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();
    log::debug!("seed: {:?}", args.seed);

    let limits = BoardLimits::default();
    let board = match args.seed {
        Some(seed) => Board::with_seed(limits, seed),
        None => Board::new(limits),
    };

    let stdin = io::stdin();
    let mut session = Session::new(board, stdin.lock(), io::stdout());
    session.run(args.initial_config())?;
    log::debug!("final state: {:?}", session.board().state());
    Ok(())
}
