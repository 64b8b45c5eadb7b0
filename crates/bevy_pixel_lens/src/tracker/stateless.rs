//! Stateless built-in trackers.

use bevy::math::DVec2;

use super::{Tracker, is_stable};
use crate::context::{ViewContext, easing};

/// Never moves the camera.
#[derive(Clone, Copy, Debug, Default)]
pub struct Frozen;

impl Tracker for Frozen {
  fn update(&mut self, _: DVec2, _: DVec2, _: DVec2, _: &ViewContext) -> DVec2 {
    DVec2::ZERO
  }
}

/// Snaps to the target in a single tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct Instant;

impl Tracker for Instant {
  fn update(&mut self, current: DVec2, target: DVec2, _: DVec2, _: &ViewContext) -> DVec2 {
    target - current
  }
}

/// Bounded-speed interpolation toward the target.
///
/// Max speed scales with the visible area, and the approach slows down as the
/// remaining distance shrinks relative to twice the visible area.
#[derive(Clone, Copy, Debug, Default)]
pub struct Linear;

/// Higher values give more rigid tracking, lower values more elastic.
const LINEAR_SPEED_FACTOR: f64 = 6.0;
/// Higher values give smoother tracking.
const LINEAR_REF_DISTANCE_FACTOR: f64 = 2.0;
const LINEAR_MIN_SPEED: f64 = 0.01;

impl Tracker for Linear {
  fn update(&mut self, current: DVec2, target: DVec2, _: DVec2, ctx: &ViewContext) -> DVec2 {
    if is_stable(current, target) {
      return target - current;
    }

    let visible = ctx.visible_size();
    let dt = ctx.update_delta();
    let max_advance = LINEAR_SPEED_FACTOR * ctx.zoom * visible * dt;
    let min_advance = LINEAR_MIN_SPEED * dt;
    let ref_max_dist = LINEAR_REF_DISTANCE_FACTOR * visible;

    DVec2::new(
      linear_component(current.x, target.x, min_advance, max_advance.x, ref_max_dist.x),
      linear_component(current.y, target.y, min_advance, max_advance.y, ref_max_dist.y),
    )
  }
}

fn linear_component(
  current: f64,
  target: f64,
  min_advance: f64,
  max_advance: f64,
  ref_max_dist: f64,
) -> f64 {
  let distance = target - current;
  let abs_distance = distance.abs();
  if abs_distance <= min_advance {
    return distance;
  }

  let t = (abs_distance / ref_max_dist).min(1.0);
  let advance = (max_advance * easing::ease_out_quad(t))
    .max(min_advance)
    .min(abs_distance);
  advance.copysign(distance)
}
