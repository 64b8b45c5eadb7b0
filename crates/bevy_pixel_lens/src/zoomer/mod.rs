//! Zoom transition strategies.
//!
//! A [`Zoomer`] drives the current zoom level toward the target set with
//! [`PixelCamera::zoom`](crate::PixelCamera::zoom). The camera aborts if a
//! zoomer ever returns NaN or pushes the zoom outside
//! [`MIN_ZOOM`]..=[`MAX_ZOOM`].

mod quadratic;

pub use quadratic::Quadratic;

use crate::context::ViewContext;

/// Smallest zoom level the camera accepts.
pub const MIN_ZOOM: f64 = 0.005;
/// Largest zoom level the camera accepts.
pub const MAX_ZOOM: f64 = 500.0;

/// Trait for zoom transition strategies.
pub trait Zoomer: Send + Sync + 'static {
  /// Returns the zoom change for a single update. Must never be NaN.
  fn update(&mut self, current: f64, target: f64, ctx: &ViewContext) -> f64;

  /// Drops any in-flight transition state. Called when the zoom is reset.
  fn reset(&mut self) {}
}

/// Returns whether `zoom` lies in the accepted range.
pub fn is_valid_zoom(zoom: f64) -> bool {
  (MIN_ZOOM..=MAX_ZOOM).contains(&zoom)
}
