use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tally_core::config::NAME_SLOTS;
use tracing_subscriber::EnvFilter;

mod app;
mod tui;
mod view;

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Keep score for a 2-4 player game in the terminal", long_about = None)]
struct Cli {
    /// Player name to pre-fill (repeat for each player, up to 4)
    #[arg(short, long = "player", value_name = "NAME")]
    players: Vec<String>,

    /// Start the game right away with the given players
    #[arg(short, long)]
    start: bool,

    /// Write logs to this file (the terminal is taken by the UI)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Log to `path` if given; otherwise stay silent so the UI owns the screen.
fn init_tracing(path: Option<&PathBuf>) -> std::io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.players.len() > NAME_SLOTS {
        Cli::command()
            .error(
                ErrorKind::TooManyValues,
                format!("at most {NAME_SLOTS} players can be given"),
            )
            .exit();
    }

    if let Err(e) = init_tracing(cli.log_file.as_ref()) {
        eprintln!("Error: could not open log file: {}", e);
        return;
    }

    tracing::info!(
        players = cli.players.len(),
        start = cli.start,
        "starting tally"
    );
    if let Err(e) = app::run(&cli.players, cli.start).await {
        eprintln!("Error: {}", e);
    }
}
