use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use sweeper_core::{BoardEngine, ElapsedClock, GameConfig, GameSession, RandomLayoutGenerator};

use command::Command;

mod command;
mod render;

/// Clear a 10x10 board without stepping on any of its 10 mines.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Seed for the first board; later boards use the following seeds
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    verbosity: Verbosity,
}

fn deal(seed: Option<u64>, round: u64) -> Result<BoardEngine> {
    let generator = match seed {
        Some(seed) => RandomLayoutGenerator::new(seed.wrapping_add(round)),
        None => RandomLayoutGenerator::from_entropy(),
    };
    log::info!("Dealing board with seed {}", generator.seed());
    Ok(BoardEngine::generate(GameConfig::CLASSIC, generator)?)
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    let mut round = 0;
    let mut session = GameSession::start(deal(args.seed, round)?, ElapsedClock::new());
    let mut out = io::stdout().lock();
    render::draw(&mut out, &session)?;

    for line in io::stdin().lock().lines() {
        let command = match Command::parse(&line?) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                render::draw(&mut out, &session)?;
                continue;
            }
        };

        if session.engine().is_finished() && matches!(command, Command::Reveal(_) | Command::Flag(_)) {
            writeln!(out, "This game is over, start a new one with n")?;
        }

        let moved = match command {
            Command::Quit => break,
            Command::NewGame => {
                round += 1;
                session.reset(deal(args.seed, round)?);
                Ok(())
            }
            Command::Reveal(coords) => session.reveal(coords).map(drop),
            Command::Flag(coords) => session.toggle_flag(coords).map(drop),
        };
        if let Err(err) = moved {
            writeln!(out, "{err}")?;
        }

        render::draw(&mut out, &session)?;
    }

    writeln!(out)?;
    Ok(())
}
