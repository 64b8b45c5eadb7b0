//! Plain state owned by the camera.

use bevy::math::DVec2;

/// Position tracking state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackerState {
  pub current: DVec2,
  pub target: DVec2,
  /// Last tracking change in logical units per second.
  pub prev_speed: DVec2,
}

/// Zoom state. `current` stays in [`MIN_ZOOM`](crate::zoomer::MIN_ZOOM)..=
/// [`MAX_ZOOM`](crate::zoomer::MAX_ZOOM).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomState {
  pub current: f64,
  pub target: f64,
}

impl Default for ZoomState {
  fn default() -> Self {
    Self {
      current: 1.0,
      target: 1.0,
    }
  }
}

/// Managed redraw bookkeeping.
///
/// When managed, the logical canvas is only projected again after something
/// visible changed: zoom, tracking, shake offsets, resolution, filter or
/// layout. Unmanaged cameras redraw every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedrawState {
  pub managed: bool,
  pub needs_redraw: bool,
  pub needs_clear: bool,
}

impl Default for RedrawState {
  fn default() -> Self {
    Self {
      managed: false,
      needs_redraw: true,
      needs_clear: false,
    }
  }
}

impl RedrawState {
  /// Requests a redraw if managed. Unmanaged cameras always redraw.
  pub fn touch(&mut self) {
    if self.managed {
      self.needs_redraw = true;
    }
  }

  pub fn pending(&self) -> bool {
    self.needs_redraw || !self.managed
  }
}
