//=========================================================================
// arcade: demo binary
//
// Loads the config, opens a window and runs the demo screen until the
// window closes or Escape is pressed.
//
//=========================================================================

mod demo;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use arcade_framework::prelude::*;

/// Command-line arguments. Values given here override the config file.
#[derive(Parser, Debug)]
#[command(name = "arcade", about = "Arcade framework demo")]
struct CliArgs {
    /// TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// env_logger filter, e.g. "info,physics=debug".
    #[arg(long)]
    log_filter: Option<String>,

    /// Simulation steps per second.
    #[arg(long)]
    frame_rate: Option<u32>,

    /// Window width.
    #[arg(long)]
    width: Option<u32>,

    /// Window height.
    #[arg(long)]
    height: Option<u32>,
}

impl CliArgs {
    fn apply(&self, config: &mut FrameworkConfig) {
        if let Some(filter) = &self.log_filter {
            config.logging.filter = Some(filter.clone());
        }
        if let Some(rate) = self.frame_rate {
            config.frame.frame_rate = rate;
        }
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => FrameworkConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => FrameworkConfig::default(),
    };
    args.apply(&mut config);
    config.validate().context("invalid configuration")?;

    init_logging(&config.logging);
    info!(target: "engine", "Starting {}", config.window.title);

    let (pump, input_feed) = WinitEventPump::new(&config.window)?;

    let mut manager = GameManagerBuilder::new(config)
        .with_event_source(pump)
        .with_input_feed(input_feed)
        .with_screens(|_| Box::new(demo::screens()))
        .build();

    manager.run();
    drop(manager);

    Ok(())
}
