//! Play chess in the terminal.

use std::path::PathBuf;

use anyhow::Context;
use chess_cli::{CliConfig, SaveStore, Session};
use chess_engine::Game;
use clap::Parser;

/// Two-player chess in the terminal.
#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Play chess in the terminal")]
struct Args {
    /// Path to the configuration file (default: ./chess.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for saved games
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Maximum log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Saved game to resume
    #[arg(long)]
    load: Option<String>,

    /// Draw pieces with letters instead of Unicode glyphs
    #[arg(long)]
    ascii: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = CliConfig::load(args.config.as_deref()).context("loading configuration")?;
    if let Some(dir) = args.save_dir {
        config.save_dir = dir;
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    if args.ascii {
        config.unicode = false;
    }

    tracing_subscriber::fmt()
        .with_max_level(config.level()?)
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("Save directory: {:?}", config.save_dir);

    let store = SaveStore::new(&config.save_dir);
    let game = match &args.load {
        Some(name) => {
            let record = store
                .load(name)
                .with_context(|| format!("loading saved game '{}'", name))?;
            Game::from_record(&record)?
        }
        None => Game::new(),
    };

    let stdin = std::io::stdin();
    let mut session = Session::new(game, store, config.unicode, std::io::stdout());
    session.run(stdin.lock())?;
    Ok(())
}
