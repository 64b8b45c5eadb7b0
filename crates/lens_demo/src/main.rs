mod backend;
mod scene;

use std::path::PathBuf;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_pixel_lens::config::default_config_path;
use bevy_pixel_lens::prelude::*;
use clap::Parser;

/// Config shipped with the demo.
const BUNDLED_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/config/pixel_lens.toml");

/// Runs the pixel lens camera headless and logs what it would show.
#[derive(Parser, Debug)]
#[command(name = "lens_demo")]
struct Args {
  /// Config file
  #[arg(long, default_value = BUNDLED_CONFIG)]
  config: PathBuf,
  /// Load the config from the user config dir instead of `--config`
  #[arg(long)]
  user_config: bool,
  /// Number of updates to run
  #[arg(long, default_value_t = 600)]
  updates: u32,
  /// Window width in logical units
  #[arg(long, default_value_t = 1280)]
  width: u32,
  /// Window height in logical units
  #[arg(long, default_value_t = 720)]
  height: u32,
  /// Seed for the player path and the shaker
  #[arg(long, default_value_t = 7)]
  seed: u64,
}

fn main() {
  let args = Args::parse();

  let path = if args.user_config {
    default_config_path()
  } else {
    Some(args.config.clone())
  };
  let config = match path {
    Some(path) => PixelLensConfig::load_or_default(&path),
    None => PixelLensConfig::default(),
  };

  let mut app = App::new();
  app
    .add_plugins(MinimalPlugins)
    .add_plugins(LogPlugin::default())
    .add_plugins(PixelLensPlugin::with_config(config))
    .add_plugins(scene::ScenePlugin {
      window: UVec2::new(args.width, args.height),
      seed: args.seed,
    });

  app.finish();
  app.cleanup();
  for _ in 0..args.updates {
    app.update();
  }

  let stats = app.world().resource::<backend::DrawStats>();
  info!(
    "Ran {} updates: {} frames projected, {} sprites drawn, {} culled",
    args.updates, stats.projected, stats.drawn, stats.culled
  );
}
