//! Spring-based tracker with catch-up.

use std::f64::consts::PI;

use bevy::math::DVec2;

use super::{Tracker, is_stable};
use crate::context::ViewContext;

/// Damped spring integrated with semi-implicit Euler.
///
/// `damping` is the damping ratio (1.0 is critical, lower values overshoot)
/// and `power` scales the angular frequency.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
  damping: f64,
  power: f64,
}

impl Default for Spring {
  fn default() -> Self {
    Self {
      damping: 0.8,
      power: 2.4,
    }
  }
}

impl Spring {
  pub fn new(damping: f64, power: f64) -> Self {
    let mut spring = Self::default();
    spring.set_parameters(damping, power);
    spring
  }

  /// # Panics
  /// If `damping` is negative or `power` is not positive.
  pub fn set_parameters(&mut self, damping: f64, power: f64) {
    assert!(damping >= 0.0, "spring damping must be non-negative");
    assert!(power > 0.0, "spring power must be positive");
    self.damping = damping;
    self.power = power;
  }

  pub fn damping(&self) -> f64 {
    self.damping
  }

  pub fn power(&self) -> f64 {
    self.power
  }

  /// Returns the new speed after `dt` seconds, given the signed distance to
  /// the rest position and the current speed.
  pub fn step(&self, offset: DVec2, speed: DVec2, dt: f64) -> DVec2 {
    let omega = self.power * PI;
    let accel = omega * omega * offset - 2.0 * self.damping * omega * speed;
    speed + accel * dt
  }
}

/// Follows the target with a spring and pulls harder once the target gets
/// close to the edge of the visible area.
#[derive(Clone, Debug, Default)]
pub struct SpringTailer {
  pub spring: Spring,
  catch_up: CatchUp,
  /// Set once the target is reached, until it moves away again.
  resting: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct CatchUp {
  /// Fraction of the half visible size after which catch-up kicks in.
  threshold: f64,
  /// Per-update reduction factor of the excess distance, at 60 UPS.
  strength: f64,
}

impl Default for CatchUp {
  fn default() -> Self {
    Self {
      threshold: 0.9,
      strength: 1.75,
    }
  }
}

/// Reference update rate for the catch-up strength.
const CATCH_UP_REFERENCE_UPS: f64 = 60.0;
const SPRING_REST_SPEED: f64 = 0.1;

impl SpringTailer {
  pub fn new(spring: Spring) -> Self {
    Self {
      spring,
      catch_up: CatchUp::default(),
      resting: false,
    }
  }

  /// Sets when catch-up starts (as a fraction of the half visible size) and
  /// how strongly the excess distance is pulled back.
  ///
  /// # Panics
  /// If `threshold` is not positive or `strength` is below 1.
  pub fn set_catch_up_parameters(&mut self, threshold: f64, strength: f64) {
    assert!(threshold > 0.0, "catch-up threshold must be positive");
    assert!(strength >= 1.0, "catch-up strength must be at least 1");
    self.catch_up = CatchUp { threshold, strength };
  }
}

impl Tracker for SpringTailer {
  fn update(
    &mut self,
    current: DVec2,
    target: DVec2,
    prev_speed: DVec2,
    ctx: &ViewContext,
  ) -> DVec2 {
    let offset = target - current;
    if is_stable(current, target)
      && (self.resting || prev_speed.abs().max_element() < SPRING_REST_SPEED)
    {
      self.resting = true;
      return offset;
    }
    self.resting = false;

    let dt = ctx.update_delta();
    let speed = self.spring.step(offset, prev_speed, dt);
    let mut delta = speed * dt;

    // Pull back whatever would still lie beyond the catch-up limit.
    let limit = ctx.visible_size() * 0.5 * self.catch_up.threshold;
    let keep = self
      .catch_up
      .strength
      .recip()
      .powf(dt * CATCH_UP_REFERENCE_UPS);
    let remaining = offset - delta;
    for axis in 0..2 {
      let excess = remaining[axis].abs() - limit[axis];
      if excess > 0.0 {
        delta[axis] += (excess * (1.0 - keep)).copysign(remaining[axis]);
      }
    }

    delta
  }
}
