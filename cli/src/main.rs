use std::io::{self, Write};

use animatch_core::Board;
use anyhow::{Context, Result};
use clap::Parser;

use crate::args::Args;
use crate::session::{Session, describe};

mod args;
mod config;
mod session;

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = config::resolve(&args)?;
    let board = match &args.board {
        Some(rows) => {
            let rows: Vec<&str> = rows.split('/').collect();
            Board::from_rows(&rows, config).context("invalid --board")?
        }
        None => {
            let seed = args.seed.unwrap_or_else(clock_seed);
            log::info!("Generating {}x{} board, seed {}", config.size.0, config.size.1, seed);
            let mut board = Board::new(config)?;
            board
                .generate_seeded(seed)
                .with_context(|| format!("could not generate board with seed {}", seed))?;
            board
        }
    };

    let mut session = Session::new(board, args.dt(), args.json);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.swaps.is_empty() {
        return session.run_commands(io::stdin().lock(), &mut out);
    }

    session.render(&mut out)?;
    for &command in &args.swaps {
        let outcome = session.play(command)?;
        writeln!(
            out,
            "{}:{:?} {}",
            command.index,
            command.direction,
            describe(outcome.as_ref())
        )?;
        session.render(&mut out)?;
    }
    Ok(())
}

/// Seed from the wall clock when none is given.
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64)
}
