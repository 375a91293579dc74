use anyhow::{Context, Result};
use bevy::{prelude::*, window::WindowResolution};
use bevy_vector_shapes::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use neon_snake::clock::ClockPlugin;
use neon_snake::game::{BACKGROUND_COLOR, CameraShake, GameConfig, WINDOW_HEIGHT, WINDOW_WIDTH};
use neon_snake::input::ArcadeInputPlugin;
use neon_snake::rendering::RenderingPlugin;
use neon_snake::session::SessionPlugin;
use neon_snake::ui::UiPlugin;

#[derive(Parser, Debug)]
#[command(name = "neon_snake")]
#[command(version, about = "Neon snake arcade game")]
struct Cli {
    /// JSON config file; command line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board columns
    #[arg(long)]
    cols: Option<u32>,

    /// Board rows
    #[arg(long)]
    rows: Option<u32>,

    /// Seconds per cell at the start of a game
    #[arg(long)]
    speed: Option<f32>,

    /// Where the max score is kept
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Fixed seed for food placement
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn into_config(self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => GameConfig::default(),
        };
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(speed) = self.speed {
            config.initial_speed = speed;
        }
        if let Some(scores) = self.scores {
            config.scores_path = scores;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let config = Cli::parse().into_config()?;

    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                    title: "Neon Snake".to_string(),
                    ..Default::default()
                }),
                ..default()
            }),
            Shape2dPlugin::default(),
        ))
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .init_resource::<CameraShake>()
        .add_plugins((
            SessionPlugin { config },
            ArcadeInputPlugin,
            ClockPlugin,
            RenderingPlugin,
            UiPlugin,
        ))
        .run();

    Ok(())
}
