//! E2E tests for the plugin-driven tick flow.
//!
//! Tests:
//! - One app update advances the clock and flushes the camera
//! - Game systems in `Update` feed coordinates before the flush
//! - Early flushes in `Update` don't flush twice
//! - Invalid configs abort plugin build

use bevy::math::{DVec2, IRect};
use bevy::prelude::*;
use bevy_pixel_lens::tracker::Instant;
use bevy_pixel_lens::{PixelCamera, PixelLensConfig, PixelLensPlugin, TickClock};

/// Coordinates fed by the game every update.
#[derive(Resource)]
struct PlayerPosition(DVec2);

fn follow_player(mut camera: ResMut<PixelCamera>, player: Res<PlayerPosition>) {
  camera.notify_coordinates(player.0);
}

struct LensHarness {
  app: App,
}

impl LensHarness {
  fn new(config: PixelLensConfig) -> Self {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(PixelLensPlugin::with_config(config));
    app.insert_resource(PlayerPosition(DVec2::ZERO));
    app.add_systems(Update, follow_player);
    app
      .world_mut()
      .resource_mut::<PixelCamera>()
      .set_tracker(Some(Box::new(Instant)));
    Self { app }
  }

  fn small() -> Self {
    Self::new(PixelLensConfig {
      resolution: [128, 72],
      ..default()
    })
  }

  fn camera(&self) -> &PixelCamera {
    self.app.world().resource::<PixelCamera>()
  }

  fn now(&self) -> u64 {
    self.app.world().resource::<TickClock>().now()
  }

  fn move_player(&mut self, position: DVec2) {
    self.app.world_mut().resource_mut::<PlayerPosition>().0 = position;
  }
}

#[test]
fn single_update_tracks_player() {
  let mut harness = LensHarness::small();
  harness.move_player(DVec2::new(10.0, 0.0));
  harness.app.update();

  assert_eq!(harness.now(), 1);
  assert_eq!(harness.camera().last_flushed_tick(), Some(1));
  assert_eq!(harness.camera().area(), IRect::new(-54, -36, 74, 36));
}

#[test]
fn tick_rate_scales_clock() {
  let mut harness = LensHarness::new(PixelLensConfig {
    resolution: [128, 72],
    tick_rate: 3,
    ..default()
  });
  for _ in 0..4 {
    harness.app.update();
  }
  assert_eq!(harness.now(), 12);
  assert_eq!(harness.camera().last_flushed_tick(), Some(12));
}

#[test]
fn early_flush_in_update_is_not_repeated() {
  fn flush_early(mut camera: ResMut<PixelCamera>, clock: Res<TickClock>) {
    assert!(camera.flush(&clock));
    // Later notifications wait for the next tick.
    camera.notify_coordinates(DVec2::new(500.0, 500.0));
  }

  let mut harness = LensHarness::small();
  harness.app.add_systems(Update, flush_early.after(follow_player));
  harness.move_player(DVec2::new(10.0, 0.0));
  harness.app.update();

  assert_eq!(harness.camera().area(), IRect::new(-54, -36, 74, 36));
  assert_eq!(harness.camera().tracking().target, DVec2::new(500.0, 500.0));
}

#[test]
fn initial_zoom_from_config() {
  let harness = LensHarness::new(PixelLensConfig {
    resolution: [128, 72],
    zoom: 2.0,
    ..default()
  });
  assert_eq!(harness.camera().zoom_levels().current, 2.0);
  assert_eq!(harness.camera().area(), IRect::new(-32, -18, 32, 18));
}

#[test]
fn shake_runs_through_plugin() {
  let mut harness = LensHarness::small();
  harness
    .app
    .world_mut()
    .resource_mut::<PixelCamera>()
    .trigger_shake(2, 4, 2, &[]);

  let mut shook = false;
  for _ in 0..8 {
    harness.app.update();
    shook |= harness.camera().shake_offset() != DVec2::ZERO;
  }
  assert!(shook);

  harness.app.update();
  assert!(!harness.camera().is_shaking(&[]));
  assert_eq!(harness.camera().shake_offset(), DVec2::ZERO);
}

#[test]
#[should_panic(expected = "tick_rate must be at least 1")]
fn invalid_config_panics_on_build() {
  LensHarness::new(PixelLensConfig {
    tick_rate: 0,
    ..default()
  });
}
