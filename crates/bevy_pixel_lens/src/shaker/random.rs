//! Random jitter shaker.

use std::f64::consts::TAU;

use bevy::math::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Shaker;
use crate::context::{ViewContext, easing};

/// Moves the camera between random points inside a disk.
///
/// The disk radius is a fraction of the smallest visible dimension, and the
/// time spent traveling between points is measured in seconds, so the shake
/// looks the same at any resolution and update rate. Fades are normalized
/// with a cubic smoothstep.
pub struct Random {
  /// Shake radius as a fraction of the smallest visible dimension.
  pub motion_range: f64,
  /// Seconds spent moving from one random point to the next.
  pub travel_time: f64,
  rng: StdRng,
  from: DVec2,
  to: DVec2,
  elapsed: f64,
  moving: bool,
}

impl Default for Random {
  fn default() -> Self {
    Self::with_rng(StdRng::from_os_rng())
  }
}

impl Random {
  /// Creates a shaker with a deterministic sequence of points.
  pub fn with_seed(seed: u64) -> Self {
    Self::with_rng(StdRng::seed_from_u64(seed))
  }

  fn with_rng(rng: StdRng) -> Self {
    Self {
      motion_range: 0.02,
      travel_time: 0.05,
      rng,
      from: DVec2::ZERO,
      to: DVec2::ZERO,
      elapsed: 0.0,
      moving: false,
    }
  }

  fn next_point(&mut self) -> DVec2 {
    let angle = self.rng.random_range(0.0..TAU);
    let radius = self.rng.random::<f64>().sqrt();
    DVec2::from_angle(angle) * radius
  }
}

impl Shaker for Random {
  fn offsets(&mut self, level: f64, ctx: &ViewContext) -> DVec2 {
    if level <= 0.0 {
      self.from = DVec2::ZERO;
      self.to = DVec2::ZERO;
      self.elapsed = 0.0;
      self.moving = false;
      return DVec2::ZERO;
    }
    if !self.moving {
      self.moving = true;
      self.to = self.next_point();
    }

    let travel_time = self.travel_time.max(f64::EPSILON);
    self.elapsed += ctx.update_delta();
    while self.elapsed >= travel_time {
      self.elapsed -= travel_time;
      self.from = self.to;
      self.to = self.next_point();
    }

    let t = easing::smoothstep(self.elapsed / travel_time);
    let radius = self.motion_range * ctx.visible_size().min_element();
    self.from.lerp(self.to, t) * radius * easing::smoothstep(level)
  }
}
