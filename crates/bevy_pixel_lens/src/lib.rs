//! Pixel Lens - logical pixel-art camera for Bevy.
//!
//! Every tick the camera decides which rectangle of an infinite logical world
//! is rendered, at what zoom, offset by which screen shake, and how that
//! rectangle maps onto a render target whose size follows the window, the
//! device scale and the aspect-fit policy.
//!
//! The core types work without an `App`: create a [`PixelCamera`], advance a
//! [`TickClock`] and call [`PixelCamera::flush`] once per update.
//! [`PixelLensPlugin`] does the same with resources and systems.
//!
//! ```ignore
//! use bevy_pixel_lens::prelude::*;
//!
//! app.add_plugins(PixelLensPlugin::default());
//!
//! fn follow_player(mut camera: ResMut<PixelCamera>, player: Single<&Transform, With<Player>>) {
//!   camera.notify_coordinates(player.translation.truncate().as_dvec2());
//! }
//! app.add_systems(Update, follow_player);
//! ```

use bevy::prelude::*;

pub mod camera;
pub mod config;
pub mod context;
pub mod projection;
pub mod shaker;
pub mod ticks;
pub mod tracker;
pub mod zoomer;

pub use camera::{CameraArea, DrawFrame, PixelCamera};
pub use config::{ConfigError, PixelLensConfig};
pub use context::ViewContext;
pub use projection::{DrawPrimitive, ProjectionConfig, ScalingFilter};
pub use shaker::{ChannelId, Shaker};
pub use ticks::{INDEFINITE, TickClock, TickDuration, ZERO_TICKS};
pub use tracker::Tracker;
pub use zoomer::Zoomer;

/// Commonly used types.
pub mod prelude {
  pub use crate::camera::{CameraArea, PixelCamera};
  pub use crate::config::PixelLensConfig;
  pub use crate::shaker::ChannelId;
  pub use crate::ticks::{TickClock, TickDuration};
  pub use crate::{PixelLensPlugin, PixelLensSet};
}

/// System sets for the per-tick camera flow.
///
/// [`PixelLensSet::Tick`] runs in `PreUpdate`, [`PixelLensSet::Flush`] in
/// `PostUpdate`. Game systems in `Update` see the new tick and can notify
/// coordinates, zoom or shake before the camera flushes.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelLensSet {
  /// Advances the [`TickClock`].
  Tick,
  /// Flushes the [`PixelCamera`] for the current tick.
  Flush,
}

/// Plugin inserting a [`PixelCamera`] and a [`TickClock`] built from
/// `config`.
///
/// # Panics
/// If `config` fails validation.
#[derive(Default)]
pub struct PixelLensPlugin {
  pub config: PixelLensConfig,
}

impl PixelLensPlugin {
  pub fn with_config(config: PixelLensConfig) -> Self {
    Self { config }
  }
}

impl Plugin for PixelLensPlugin {
  fn build(&self, app: &mut App) {
    if let Err(e) = self.config.validate() {
      panic!("PixelLensPlugin: {e}");
    }

    let resolution = self.config.resolution();
    info!(
      "Pixel lens camera at {}x{}, {} ups, tick rate {}",
      resolution.x, resolution.y, self.config.updates_per_second, self.config.tick_rate
    );

    app.insert_resource(PixelCamera::from_config(&self.config));
    app.insert_resource(self.config.tick_clock());

    app.configure_sets(PreUpdate, PixelLensSet::Tick);
    app.configure_sets(PostUpdate, PixelLensSet::Flush);
    app.add_systems(PreUpdate, advance_tick_clock.in_set(PixelLensSet::Tick));
    app.add_systems(PostUpdate, flush_pixel_camera.in_set(PixelLensSet::Flush));
  }
}

/// System: advances the tick clock by one update.
pub fn advance_tick_clock(mut clock: ResMut<TickClock>) {
  clock.advance();
}

/// System: flushes the camera for the current tick and closes the update.
pub fn flush_pixel_camera(mut camera: ResMut<PixelCamera>, clock: Res<TickClock>) {
  camera.finish_update(&clock);
}
