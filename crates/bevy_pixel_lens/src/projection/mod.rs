//! Projection of the logical canvas onto a high resolution render target.
//!
//! The camera renders the logical world at its game resolution. The result is
//! then projected onto a render target whose physical size depends on the
//! window, the device scale factor and the aspect-fit policy held in
//! [`ProjectionConfig`].
//!
//! - [`best_fit_scale`] picks the scale that fits a logical render size into a
//!   physical context size.
//! - [`ReusableCanvas`] sizes the logical canvas so zoom transitions don't
//!   reallocate every frame.
//! - [`active_area`] crops the render target to the game's aspect ratio.
//! - [`hi_res_quad`] maps a logical sprite straight onto the render target
//!   for high resolution draws.

mod best_fit;
mod canvas;
mod draw;
mod viewport;

use bevy::math::DVec2;
pub use best_fit::{best_fit_scale, best_fit_scale_int};
pub use canvas::{CanvasView, ReusableCanvas};
pub use draw::{DrawPrimitive, FilterCache, FilterCompiler, hi_res_quad};
use serde::{Deserialize, Serialize};
pub use viewport::{active_area, logical_to_target, to_relative};

/// Filter used when projecting the logical canvas onto the render target.
///
/// [`ScalingFilter::AaSamplingSoft`] is a good default. Most other variants
/// are offered as comparison points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingFilter {
  /// Anti-aliased point sampling. Balanced between sharpness and stability.
  #[default]
  AaSamplingSoft,
  /// Slightly sharper and slightly less stable than the soft variant.
  AaSamplingSharp,
  /// No interpolation. Sharpest, but jumpy during zooms and small moves.
  Nearest,
  Hermite,
  /// Most expensive. Stable, may misrepresent colors in high contrast areas.
  Bicubic,
  Bilinear,
  /// Source-space Hermite, not aware of the high resolution target.
  SrcHermite,
  SrcBicubic,
  /// What naive linear scaling looks like.
  SrcBilinear,
}

impl ScalingFilter {
  /// Number of variants.
  pub const COUNT: usize = 9;

  pub const ALL: [Self; Self::COUNT] = [
    Self::AaSamplingSoft,
    Self::AaSamplingSharp,
    Self::Nearest,
    Self::Hermite,
    Self::Bicubic,
    Self::Bilinear,
    Self::SrcHermite,
    Self::SrcBicubic,
    Self::SrcBilinear,
  ];

  pub fn index(self) -> usize {
    self as usize
  }
}

impl std::fmt::Display for ScalingFilter {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      Self::AaSamplingSoft => "AASamplingSoft",
      Self::AaSamplingSharp => "AASamplingSharp",
      Self::Nearest => "Nearest",
      Self::Hermite => "Hermite",
      Self::Bicubic => "Bicubic",
      Self::Bilinear => "Bilinear",
      Self::SrcHermite => "SrcHermite",
      Self::SrcBicubic => "SrcBicubic",
      Self::SrcBilinear => "SrcBilinear",
    };
    f.write_str(name)
  }
}

/// Aspect-fit and filtering policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionConfig {
  /// Fill the whole render target even if the aspect ratio doesn't match.
  pub stretching: bool,
  /// With stretching, widen the visible area instead of distorting pixels.
  pub keep_aspect_ratio: bool,
  /// With aspect keeping, fall back to the layout size on small windows.
  pub dynamic_scaling: bool,
  pub best_fit_render_size: DVec2,
  pub best_fit_context_size: DVec2,
  pub filter: ScalingFilter,
}

impl Default for ProjectionConfig {
  fn default() -> Self {
    Self {
      stretching: false,
      keep_aspect_ratio: false,
      dynamic_scaling: false,
      best_fit_render_size: DVec2::new(180.0, 180.0),
      best_fit_context_size: DVec2::new(1000.0, 1000.0),
      filter: ScalingFilter::AaSamplingSoft,
    }
  }
}

impl ProjectionConfig {
  /// Whether the visible area follows the best-fit scale instead of the game
  /// resolution.
  pub fn uses_best_fit(&self) -> bool {
    self.stretching && self.keep_aspect_ratio
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn filter_names_and_indices() {
    for (index, filter) in ScalingFilter::ALL.iter().enumerate() {
      assert_eq!(filter.index(), index);
    }
    assert_eq!(ScalingFilter::default().to_string(), "AASamplingSoft");
    assert_eq!(ScalingFilter::SrcBilinear.to_string(), "SrcBilinear");
  }

  #[test]
  fn best_fit_only_with_aspect_stretching() {
    let mut config = ProjectionConfig::default();
    assert!(!config.uses_best_fit());
    config.stretching = true;
    assert!(!config.uses_best_fit());
    config.keep_aspect_ratio = true;
    assert!(config.uses_best_fit());
  }
}
