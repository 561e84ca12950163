use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use squarefour::{best_move, MoveRequest};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod game;
mod render;

use config::{First, GameConfig};
use game::Game;

/// Play Square Four against a minimax opponent.
#[derive(Parser)]
#[command(name = "square-four", about = "Play Square Four against a minimax opponent")]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn,squarefour=info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a game in the terminal
    Play(PlayArgs),
    /// Print the computer's reply to a recorded position as JSON
    Analyze {
        /// Move record such as H3C3H2 (columns are 0-based)
        #[arg(long, default_value = "")]
        position: String,

        /// Search depth in plies
        #[arg(long, default_value_t = 4)]
        depth: u8,
    },
}

#[derive(Args)]
struct PlayArgs {
    /// Path to TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Your display name
    #[arg(long)]
    name: Option<String>,

    /// Search depth in plies (1-8)
    #[arg(long)]
    depth: Option<u8>,

    /// Who drops the first disc
    #[arg(long, value_enum)]
    first: Option<First>,

    /// Seed for breaking ties between equally good columns
    #[arg(long)]
    seed: Option<u64>,

    /// Pause before each computer move, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
}

impl PlayArgs {
    fn apply(self, config: &mut GameConfig) {
        if let Some(name) = self.name {
            config.player_name = name;
        }
        if let Some(depth) = self.depth {
            config.depth = depth;
        }
        if let Some(first) = self.first {
            config.first = first;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(delay) = self.delay_ms {
            config.think_delay_ms = delay;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    match cli.command {
        Command::Play(args) => play(args),
        Command::Analyze { position, depth } => analyze(position, depth),
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn play(args: PlayArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;
    info!(?config, "configuration loaded");

    let stdin = io::stdin();
    let stdout = io::stdout();
    Game::new(config, stdin.lock(), stdout.lock()).run()?;
    Ok(())
}

fn analyze(position: String, depth: u8) -> Result<()> {
    let response = best_move(MoveRequest { position, depth })?;
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
