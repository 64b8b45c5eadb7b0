//! Logical canvas sizing.

use bevy::log::debug;
use bevy::math::UVec2;

/// Smallest zoom considered when growing the canvas ahead of a zoom-out.
const MIN_ZOOM_HEADROOM: f64 = 0.05;

/// Sub-view of the reusable canvas handed out for a single frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasView {
  /// Size of the region that should be drawn to.
  pub size: UVec2,
  /// Size of the backing allocation.
  pub capacity: UVec2,
  /// Whether the backing allocation was replaced for this request.
  pub reallocated: bool,
}

impl CanvasView {
  /// Whether the view covers the whole backing allocation.
  pub fn is_full(&self) -> bool {
    self.size == self.capacity
  }
}

/// Tracks the backing size of the logical canvas.
///
/// The capacity only ever grows. When a request doesn't fit, the new capacity
/// accounts for the current zoom target so a zoom-out transition allocates
/// once instead of on every tick.
#[derive(Clone, Debug, Default)]
pub struct ReusableCanvas {
  capacity: Option<UVec2>,
  allocations: u32,
}

impl ReusableCanvas {
  pub fn capacity(&self) -> Option<UVec2> {
    self.capacity
  }

  /// Number of backing allocations performed so far.
  pub fn allocations(&self) -> u32 {
    self.allocations
  }

  /// Returns a view of `size` for the current frame, growing the backing
  /// allocation if needed.
  pub fn request(&mut self, size: UVec2, resolution: UVec2, zoom_target: f64) -> CanvasView {
    let capacity = match self.capacity {
      // Smooth movement needs one extra row and column in most games.
      None => size.max(resolution + UVec2::ONE),
      Some(capacity) if size.cmple(capacity).all() => {
        return CanvasView {
          size,
          capacity,
          reallocated: false,
        };
      }
      Some(capacity) => {
        let headroom = zoom_target.clamp(MIN_ZOOM_HEADROOM, 1.0);
        let grown = ((size + UVec2::ONE).as_dvec2() / headroom).ceil().as_uvec2();
        grown.max(capacity)
      }
    };

    self.capacity = Some(capacity);
    self.allocations += 1;
    debug!("logical canvas reallocated to {}x{}", capacity.x, capacity.y);
    CanvasView {
      size,
      capacity,
      reallocated: true,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn first_request_reserves_extra_pixel() {
    let mut canvas = ReusableCanvas::default();
    let view = canvas.request(UVec2::new(128, 72), UVec2::new(128, 72), 1.0);
    assert_eq!(view.capacity, UVec2::new(129, 73));
    assert!(view.reallocated);
    assert!(!view.is_full());
  }

  #[test]
  fn fitting_requests_reuse_capacity() {
    let mut canvas = ReusableCanvas::default();
    canvas.request(UVec2::new(129, 73), UVec2::new(128, 72), 1.0);
    let view = canvas.request(UVec2::new(129, 73), UVec2::new(128, 72), 1.0);
    assert!(view.is_full());
    assert!(!view.reallocated);
    assert_eq!(canvas.allocations(), 1);
  }

  #[test]
  fn growth_anticipates_zoom_target() {
    let mut canvas = ReusableCanvas::default();
    canvas.request(UVec2::new(100, 100), UVec2::new(100, 100), 1.0);
    let view = canvas.request(UVec2::new(150, 120), UVec2::new(100, 100), 0.5);
    assert_eq!(view.capacity, UVec2::new(302, 242));

    // Zoom target below the headroom floor is clamped.
    let view = canvas.request(UVec2::new(400, 10), UVec2::new(100, 100), 0.001);
    assert_eq!(view.capacity, UVec2::new(8020, 242));
  }

  #[test]
  fn capacity_never_shrinks() {
    let mut canvas = ReusableCanvas::default();
    canvas.request(UVec2::new(10, 500), UVec2::new(10, 10), 1.0);
    let view = canvas.request(UVec2::new(600, 20), UVec2::new(10, 10), 1.0);
    assert_eq!(view.capacity, UVec2::new(601, 500));
  }
}
