mod actions;
mod app;
mod input;
mod persistence;
mod view;

use anyhow::{Context, Result};
use app::{App, BoxedStore};
use clap::Parser;
use ejypti_core::{GameConfig, MemoryStore, RngState};
use persistence::{default_favorites_path, FileStore};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ejypti", about = "Reveal cards from the reel and build a hand of eight")]
struct Args {
    /// Deck shuffle seed; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Favorites file; defaults to $EJYPTI_FAVORITES or ~/.ejypti_favorites.json.
    #[arg(long)]
    favorites: Option<PathBuf>,
    /// Keep favorites in memory only.
    #[arg(long)]
    no_save: bool,
    /// Multiplies every delay, e.g. 0.05 to skip most of the finalize wait.
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_store(args: &Args) -> BoxedStore {
    if args.no_save {
        return Box::new(MemoryStore::new());
    }
    match args.favorites.clone().or_else(default_favorites_path) {
        Some(path) => {
            info!(path = %path.display(), "favorites file");
            Box::new(FileStore::new(path))
        }
        None => {
            warn!("no favorites path available, history will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    anyhow::ensure!(
        args.time_scale.is_finite() && args.time_scale >= 0.0,
        "--time-scale must be a non-negative number"
    );
    let mut config = GameConfig::default();
    config.timings = config.timings.scaled(args.time_scale);
    let seed = args.seed.unwrap_or_else(|| RngState::from_entropy().seed());
    let mut app = App::new(config, seed, open_store(&args));
    println!("seed: {seed}");
    println!("{}", view::help_text());
    run_loop(&mut app)
}

fn run_loop(app: &mut App) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    while !app.should_quit {
        app.tick();
        println!();
        println!("{}", view::render(&app.game));
        for note in app.notes.drain(..) {
            println!("{note}");
        }
        print!("> ");
        stdout.flush().context("flush stdout")?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("read command")?;
        app.tick();
        actions::dispatch(app, input::parse_line(&line));
    }
    Ok(())
}
