//! Benchmarks for the per-tick camera flush.
//!
//! Measures a full flush (zoom, tracking, shake, area) for a camera following
//! a wandering target, with an increasing number of active shake channels.

use bevy::math::{DVec2, UVec2};
use bevy_pixel_lens::shaker::Random;
use bevy_pixel_lens::tracker::{Spring, SpringTailer};
use bevy_pixel_lens::zoomer::Quadratic;
use bevy_pixel_lens::{ChannelId, INDEFINITE, PixelCamera, TickClock};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::prelude::*;

const UPDATES: usize = 600;

fn camera_with_channels(channels: u8) -> PixelCamera {
  let mut camera = PixelCamera::new(UVec2::new(320, 180));
  camera.set_tracker(Some(Box::new(SpringTailer::new(Spring::default()))));
  camera.set_zoomer(Some(Box::new(Quadratic::default())));
  for id in 0..channels {
    camera.set_shaker(
      Some(Box::new(Random::with_seed(u64::from(id)))),
      &[ChannelId(id)],
    );
    camera.trigger_shake(30, INDEFINITE, 30, &[ChannelId(id)]);
  }
  camera
}

fn wandering_targets(seed: u64) -> Vec<DVec2> {
  let mut rng = StdRng::seed_from_u64(seed);
  let mut position = DVec2::ZERO;
  (0..UPDATES)
    .map(|_| {
      position += DVec2::new(rng.random_range(-4.0..4.0), rng.random_range(-4.0..4.0));
      position
    })
    .collect()
}

fn bench_flush(c: &mut Criterion) {
  let mut group = c.benchmark_group("flush");
  let targets = wandering_targets(7);

  for channels in [0u8, 1, 4, 16] {
    group.bench_with_input(
      BenchmarkId::new("shake_channels", channels),
      &channels,
      |b, &channels| {
        b.iter_batched(
          || (camera_with_channels(channels), TickClock::default()),
          |(mut camera, mut clock)| {
            for (update, &target) in targets.iter().enumerate() {
              camera.notify_coordinates(target);
              if update % 120 == 0 {
                camera.zoom(if update % 240 == 0 { 2.0 } else { 1.0 });
              }
              camera.flush(&clock);
              clock.advance();
            }
            black_box(camera.area())
          },
          criterion::BatchSize::SmallInput,
        );
      },
    );
  }

  group.finish();
}

criterion_group!(benches, bench_flush);
criterion_main!(benches);
