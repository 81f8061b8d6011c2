//! Headless blockfall runner (default binary).
//!
//! Plays a seeded game with the greedy placement search and prints the final
//! board, or the final snapshot as JSON.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, Level};
use tracing_subscriber::prelude::*;

use blockfall::autoplay::best_placement;
use blockfall::engine::{Session, SessionConfig, TickEvent};

#[derive(Debug, Parser)]
#[command(name = "blockfall", about = "Run a headless falling-block game")]
struct Cli {
    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase verbosity level (-v = INFO, -vv = DEBUG, -vvv = TRACE)")]
    verbose: u8,

    #[arg(long, help = "Bag seed (overrides the config file)")]
    seed: Option<u64>,

    #[arg(long, default_value = "100", help = "Stop after this many locked pieces")]
    pieces: u32,

    #[arg(long, help = "Path to a JSON session config")]
    config: Option<PathBuf>,

    #[arg(long, help = "Print the final snapshot as JSON")]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            SessionConfig::from_json(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SessionConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    let mut session = Session::standard(config).context("creating session")?;
    run(&mut session, cli.pieces)?;

    let snapshot = session.snapshot();
    if cli.json {
        println!("{}", snapshot.to_json().context("serializing snapshot")?);
    } else {
        print!("{}", session.board());
        println!(
            "pieces: {}  lines: {}  game over: {}",
            snapshot.pieces_locked, snapshot.lines_cleared, snapshot.game_over
        );
    }
    Ok(())
}

fn run(session: &mut Session<'static>, pieces: u32) -> Result<()> {
    session.start()?;

    while session.pieces_locked() < pieces && !session.is_game_over() {
        let placement = session.board().active().and_then(|piece| {
            best_placement(session.board()).map(|placement| (placement, piece.col()))
        });

        match placement {
            Some((placement, spawn_col)) => {
                debug!(
                    rotations = placement.rotations,
                    col = placement.col,
                    score = placement.score,
                    "placing piece"
                );
                for action in placement.actions(spawn_col) {
                    session.apply(action);
                }
            }
            None => {
                if let TickEvent::GameOver = session.tick(0)? {
                    break;
                }
            }
        }
    }

    info!(
        pieces = session.pieces_locked(),
        lines = session.lines_cleared(),
        game_over = session.is_game_over(),
        "run finished"
    );
    Ok(())
}
