//! Per-tick view parameters handed to camera strategies.

use bevy::math::{DVec2, UVec2};

use crate::ticks::TickClock;

/// Snapshot of the values strategies need to stay resolution- and
/// tick-rate-independent.
///
/// Built by the camera once per flush, after the zoom update, so trackers and
/// shakers see the zoom of the current tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewContext {
  /// Logical resolution at zoom 1.
  pub resolution: UVec2,
  /// Current zoom level.
  pub zoom: f64,
  pub updates_per_second: u32,
  /// Ticks consumed per update.
  pub tick_rate: u64,
}

impl ViewContext {
  pub fn new(resolution: UVec2, zoom: f64, clock: &TickClock) -> Self {
    Self {
      resolution,
      zoom,
      updates_per_second: clock.updates_per_second(),
      tick_rate: clock.rate(),
    }
  }

  /// Seconds covered by a single update.
  pub fn update_delta(&self) -> f64 {
    1.0 / f64::from(self.updates_per_second.max(1))
  }

  /// Logical size visible at the current zoom.
  pub fn visible_size(&self) -> DVec2 {
    self.resolution.as_dvec2() / self.zoom
  }
}

impl Default for ViewContext {
  fn default() -> Self {
    Self {
      resolution: UVec2::new(320, 180),
      zoom: 1.0,
      updates_per_second: crate::ticks::DEFAULT_UPS,
      tick_rate: 1,
    }
  }
}

/// Easing curves shared by the built-in strategies. All inputs are clamped to
/// `[0, 1]`.
pub(crate) mod easing {
  pub fn ease_out_quad(t: f64) -> f64 {
    let omt = 1.0 - t.clamp(0.0, 1.0);
    1.0 - omt * omt
  }

  pub fn quad_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
      return 2.0 * t * t;
    }
    let t = 2.0 * t - 1.0;
    -0.5 * (t * (t - 2.0) - 1.0)
  }

  /// Cubic smoothstep, `3t² - 2t³`.
  pub fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
  }

  #[cfg(test)]
  mod tests {
    use super::*;

    #[test]
    fn curves_hit_endpoints() {
      for curve in [ease_out_quad, quad_in_out, smoothstep] {
        assert_eq!(curve(0.0), 0.0);
        assert!((curve(1.0) - 1.0).abs() < 1e-12);
        assert_eq!(curve(-3.0), 0.0);
      }
      assert!((quad_in_out(0.5) - 0.5).abs() < 1e-12);
    }
  }
}
