use anyhow::{Context, Result};
use clap::Parser;
use snake_garden::game::GameConfig;
use snake_garden::modes::HumanMode;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_garden")]
#[command(version, about = "Classic Snake on a tile grid, in the terminal")]
struct Cli {
    /// Grid width, wall border included
    #[arg(long)]
    width: Option<usize>,

    /// Grid height, wall border included
    #[arg(long)]
    height: Option<usize>,

    /// JSON file with game settings; --width/--height override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Resume the game saved here, and save to it on quit
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Write logs to this file (the terminal is busy drawing the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        // Without a file, stay quiet unless RUST_LOG asks otherwise
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off"))
            .init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(width) = cli.width {
        config.grid_width = width;
    }
    if let Some(height) = cli.height {
        config.grid_height = height;
    }
    config.validate()?;

    log::info!(
        "starting {}x{} game, delay {}ms",
        config.grid_width,
        config.grid_height,
        config.initial_move_delay_ms
    );

    let mut human_mode = HumanMode::new(config, cli.state_file);
    human_mode.run().await?;

    Ok(())
}
