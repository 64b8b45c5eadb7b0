//! Scripted scene: a wandering player, a field of sprites and a few camera
//! events.

use bevy::math::{DAffine2, DVec2, UVec2};
use bevy::prelude::*;
use bevy_pixel_lens::projection::FilterCache;
use bevy_pixel_lens::shaker::Random;
use bevy_pixel_lens::tracker::{Spring, SpringTailer};
use bevy_pixel_lens::zoomer::Quadratic;
use bevy_pixel_lens::{ChannelId, INDEFINITE, PixelCamera, TickClock};
use rand::prelude::*;

use crate::backend::{CountingPrimitive, DrawStats, NameCompiler, Surface};

/// Channel for short impact shakes.
const IMPACT: ChannelId = ChannelId(0);
/// Channel for the long rumble.
const RUMBLE: ChannelId = ChannelId(1);

const SPRITE_SIZE: u32 = 16;
const SPRITE_SPACING: f64 = 48.0;

pub struct ScenePlugin {
  pub window: UVec2,
  pub seed: u64,
}

impl Plugin for ScenePlugin {
  fn build(&self, app: &mut App) {
    {
      let mut camera = app.world_mut().resource_mut::<PixelCamera>();
      camera.set_tracker(Some(Box::new(SpringTailer::new(Spring::default()))));
      camera.set_zoomer(Some(Box::new(Quadratic::default())));
      camera.set_shaker(Some(Box::new(Random::with_seed(self.seed))), &[IMPACT]);
      let mut rumble = Random::with_seed(self.seed.wrapping_add(1));
      rumble.motion_range = 0.005;
      camera.set_shaker(Some(Box::new(rumble)), &[RUMBLE]);
    }

    let filter = app.world().resource::<PixelCamera>().filter();
    let mut filters = FilterCache::new(NameCompiler);
    filters.warm(filter);

    app
      .insert_resource(Player {
        position: DVec2::ZERO,
        heading: 0.0,
        rng: StdRng::seed_from_u64(self.seed),
      })
      .insert_resource(Renderer {
        window: self.window,
        primitive: CountingPrimitive::default(),
        filters,
        target: Surface::new(self.window),
        sprite: Surface::new(UVec2::splat(SPRITE_SIZE)),
      })
      .init_resource::<DrawStats>()
      .add_systems(Update, (wander_player, direct_camera))
      .add_systems(Last, (render_frame, log_camera).chain());
  }
}

#[derive(Resource)]
struct Player {
  position: DVec2,
  heading: f64,
  rng: StdRng,
}

#[derive(Resource)]
struct Renderer {
  window: UVec2,
  primitive: CountingPrimitive,
  filters: FilterCache<NameCompiler>,
  target: Surface,
  sprite: Surface,
}

fn wander_player(mut player: ResMut<Player>, mut camera: ResMut<PixelCamera>) {
  let turn = player.rng.random_range(-0.2..0.2);
  player.heading += turn;
  let step = DVec2::from_angle(player.heading) * 1.5;
  player.position += step;
  camera.notify_coordinates(player.position);
}

fn direct_camera(mut camera: ResMut<PixelCamera>, clock: Res<TickClock>) {
  match clock.now() {
    120 => {
      info!("Impact shake");
      camera.trigger_shake(4, 10, 20, &[IMPACT]);
    }
    240 => {
      info!("Zooming in");
      camera.zoom(2.0);
    }
    300 => {
      info!("Rumble starts");
      camera.trigger_shake(30, INDEFINITE, 0, &[RUMBLE]);
    }
    420 => {
      info!("Rumble fades, zooming out");
      camera.end_shake(60, &[RUMBLE]);
      camera.zoom(1.0);
    }
    _ => {}
  }
}

fn render_frame(
  mut camera: ResMut<PixelCamera>,
  mut renderer: ResMut<Renderer>,
  mut stats: ResMut<DrawStats>,
) {
  let renderer = &mut *renderer;
  camera.layout(renderer.window, 1.0);
  let frame = camera.begin_draw(renderer.target.size);
  if frame.clear {
    renderer.target.draws = 0;
  }

  let area = camera.area();
  let filter = camera.filter();
  trace!("sampling with {}", renderer.filters.get(filter));

  // Sprites sit on a grid, only walk the cells near the visible area.
  let first = (area.min.as_dvec2() / SPRITE_SPACING).floor() - DVec2::ONE;
  let last = (area.max.as_dvec2() / SPRITE_SPACING).ceil();
  for y in first.y as i32..=last.y as i32 {
    for x in first.x as i32..=last.x as i32 {
      let at = DVec2::new(x as f64, y as f64) * SPRITE_SPACING;
      let drawn = camera.draw_hi_res(
        &mut renderer.primitive,
        &mut renderer.target,
        frame.active_area,
        &renderer.sprite,
        DAffine2::from_translation(at),
      );
      if drawn {
        stats.drawn += 1;
      } else {
        stats.culled += 1;
      }
    }
  }

  if camera.end_draw() {
    stats.projected += 1;
  }
  trace!(
    "target holds {} draws, last filter {:?}",
    renderer.target.draws,
    camera.last_draw_filter()
  );
}

fn log_camera(camera: Res<PixelCamera>, clock: Res<TickClock>) {
  if clock.now() % 60 != 0 {
    return;
  }
  let zoom = camera.zoom_levels();
  info!(
    "tick {}: area {:?}, zoom {:.3} -> {:.3}, shake {:?}, shaking {}",
    clock.now(),
    camera.area(),
    zoom.current,
    zoom.target,
    camera.shake_offset(),
    camera.is_shaking(&[])
  );
}
