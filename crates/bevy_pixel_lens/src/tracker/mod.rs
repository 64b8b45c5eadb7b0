//! Camera position tracking strategies.
//!
//! A [`Tracker`] moves the camera toward the coordinates the game notifies.
//! It is called exactly once per flushed tick and returns the position change
//! for that tick, which the camera adds to its current position.
//!
//! The built-in trackers are resolution independent (range of motion is
//! proportional to the visible area) and tick-rate independent (apparent
//! speed does not depend on the updates per second). Custom trackers are free
//! to ignore those properties.
//!
//! # Usage
//!
//! ```ignore
//! use bevy_pixel_lens::tracker::Instant;
//!
//! camera.set_tracker(Some(Box::new(Instant)));
//! camera.notify_coordinates(DVec2::new(10.0, 0.0));
//! ```

mod spring;
mod stateless;

use bevy::math::DVec2;
pub use spring::{Spring, SpringTailer};
pub use stateless::{Frozen, Instant, Linear};

use crate::context::ViewContext;

/// Trait for camera tracking strategies.
pub trait Tracker: Send + Sync + 'static {
  /// Returns the position change for a single update.
  ///
  /// `prev_speed` is the previous change expressed in logical units per
  /// second.
  fn update(
    &mut self,
    current: DVec2,
    target: DVec2,
    prev_speed: DVec2,
    ctx: &ViewContext,
  ) -> DVec2;
}

/// Residual below which trackers snap to the target instead of converging
/// forever.
pub const STABILIZATION_THRESHOLD: f64 = 0.001;

pub(crate) fn is_stable(current: DVec2, target: DVec2) -> bool {
  let diff = (target - current).abs();
  diff.x < STABILIZATION_THRESHOLD && diff.y < STABILIZATION_THRESHOLD
}
