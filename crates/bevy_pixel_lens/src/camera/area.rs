//! Visible logical area.

use bevy::math::{DVec2, IRect};

use super::PixelCamera;
use crate::projection::best_fit_scale;

/// Logical rectangle rendered for the current tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraArea {
  pub min: DVec2,
  pub max: DVec2,
}

impl CameraArea {
  /// Area of `size` centered on `center`.
  pub fn centered(center: DVec2, size: DVec2) -> Self {
    let min = center - size / 2.0;
    Self { min, max: min + size }
  }

  pub fn size(&self) -> DVec2 {
    self.max - self.min
  }

  pub fn center(&self) -> DVec2 {
    (self.min + self.max) / 2.0
  }

  pub fn contains(&self, point: DVec2) -> bool {
    point.cmpge(self.min).all() && point.cmple(self.max).all()
  }

  /// Smallest integer rectangle containing the area.
  pub fn to_irect(&self) -> IRect {
    let min = self.min.floor().as_ivec2();
    let max = self.max.ceil().as_ivec2();
    IRect::from_corners(min, max)
  }
}

impl PixelCamera {
  /// Logical size visible at the current zoom.
  ///
  /// Under aspect-preserving stretching the size follows the render target
  /// and best-fit scale instead of the game resolution.
  pub fn visible_size(&self) -> DVec2 {
    let zoom = self.zoom.current;
    let projection = &self.projection;
    if projection.uses_best_fit() && self.hi_res.cmpgt(bevy::math::UVec2::ZERO).all() {
      let scale = best_fit_scale(
        projection.dynamic_scaling,
        self.hi_res,
        projection.best_fit_render_size,
        Some(projection.best_fit_context_size),
        true,
      );
      if scale > 0.0 {
        return self.hi_res.as_dvec2() / scale / zoom;
      }
    }
    self.resolution.as_dvec2() / zoom
  }

  pub(crate) fn update_area(&mut self) {
    let visible = self.visible_size();
    let min = self.tracking.current - visible / 2.0 + self.shake_offset;
    self.area = CameraArea {
      min,
      max: min + visible,
    };
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn irect_rounds_outward() {
    let area = CameraArea {
      min: DVec2::new(-0.5, 1.25),
      max: DVec2::new(9.1, 4.0),
    };
    assert_eq!(area.to_irect(), IRect::new(-1, 1, 10, 4));
  }

  #[test]
  fn centered_area() {
    let area = CameraArea::centered(DVec2::new(10.0, 0.0), DVec2::new(128.0, 72.0));
    assert_eq!(area.min, DVec2::new(-54.0, -36.0));
    assert_eq!(area.max, DVec2::new(74.0, 36.0));
    assert_eq!(area.center(), DVec2::new(10.0, 0.0));
    assert!(area.contains(DVec2::ZERO));
    assert!(!area.contains(DVec2::new(75.0, 0.0)));
  }
}
