//! Render target cropping and coordinate mapping.

use bevy::math::{DVec2, URect, UVec2};

use crate::camera::CameraArea;

/// Region of a `hi_res` render target the logical canvas is projected onto.
///
/// With stretching, or when aspect ratios already match, that's the whole
/// target. Otherwise the target is cropped to the game's aspect ratio with
/// centered horizontal or vertical margins.
pub fn active_area(hi_res: UVec2, resolution: UVec2, stretching: bool) -> URect {
  let full = URect::from_corners(UVec2::ZERO, hi_res);
  if stretching || hi_res.x == 0 || hi_res.y == 0 {
    return full;
  }

  let hi = hi_res.as_dvec2();
  let hi_aspect = hi.x / hi.y;
  let lo_aspect = f64::from(resolution.x) / f64::from(resolution.y);

  if hi_aspect > lo_aspect {
    let margin = ((hi.x - lo_aspect * hi.y) / 2.0) as u32;
    URect::new(margin, 0, hi_res.x - margin, hi_res.y)
  } else if hi_aspect < lo_aspect {
    let margin = ((hi.y - hi.x / lo_aspect) / 2.0) as u32;
    URect::new(0, margin, hi_res.x, hi_res.y - margin)
  } else {
    full
  }
}

/// Maps a logical `point` into a target of `target_size` pixels covering
/// `area`.
pub fn logical_to_target(point: DVec2, area: &CameraArea, target_size: DVec2) -> DVec2 {
  target_size * ((point - area.min) / area.size())
}

/// Maps a render target position to `[0, 1]` coordinates within `active`.
///
/// Positions on the margins fall outside `[0, 1]`.
pub fn to_relative(screen: DVec2, active: URect) -> DVec2 {
  let size = active.size().as_dvec2().max(DVec2::ONE);
  (screen - active.min.as_dvec2()) / size
}
