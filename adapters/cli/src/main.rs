#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Snake Pilot experience.

mod driver;
mod headless;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use snake_pilot_core::GAME_TITLE;
use snake_pilot_rendering::{
    FrameControl, GridPresentation, Presentation, RenderingBackend, Scene,
};
use snake_pilot_rendering_macroquad::MacroquadBackend;
use snake_pilot_system_session::Session;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::{
    driver::{GameDriver, Pilot},
    settings::{Overrides, Settings},
};

#[derive(Parser, Debug)]
#[command(name = "snake-pilot", about = "Play snake, or watch the autopilot play it")]
struct Args {
    /// Let the path-finding autopilot steer the snake
    #[arg(long)]
    ai_player: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long)]
    debugging: bool,

    /// Number of board columns (overrides the config file)
    #[arg(long)]
    columns: Option<u32>,

    /// Number of board rows (overrides the config file)
    #[arg(long)]
    rows: Option<u32>,

    /// Seed for food placement (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with optional [game] and [palette] tables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Synchronise presentation with the display refresh rate
    #[arg(long)]
    vsync: bool,

    /// Run the autopilot without opening a window
    #[arg(long)]
    headless: bool,

    /// Cycle limit for headless runs
    #[arg(long, default_value_t = 10_000)]
    max_cycles: u64,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            columns: self.columns,
            rows: self.rows,
            seed: self.seed,
        }
    }
}

/// Entry point for the Snake Pilot command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.debugging { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let settings = Settings::load(args.config.as_deref())?.with_overrides(args.overrides())?;
    info!(
        columns = settings.game.columns,
        rows = settings.game.rows,
        seed = settings.game.food_seed,
        "configuration loaded"
    );

    if args.headless {
        let _ = headless::run(settings.game, args.max_cycles)?;
        return Ok(());
    }

    run_window(settings, &args)
}

fn run_window(settings: Settings, args: &Args) -> Result<()> {
    let Settings { game, palette } = settings;
    let grid = GridPresentation::new(
        game.columns,
        game.rows,
        GridPresentation::DEFAULT_CELL_LENGTH,
    )
    .context("failed to describe the board")?;
    let presentation = Presentation::new(GAME_TITLE, palette.background, Scene::new(grid, palette));

    let session =
        Session::new(game, Pilot::new(args.ai_player)).context("failed to create the session")?;
    let mut driver = GameDriver::new(session);

    MacroquadBackend::new()
        .with_vsync(args.vsync)
        .with_show_fps(args.debugging)
        .run(presentation, move |dt, input, scene| {
            let control = match driver.update(dt, input) {
                Ok(control) => control,
                Err(error) => {
                    error!("{error:#}");
                    FrameControl::Exit
                }
            };
            driver.sync_scene(scene);
            control
        })
}
