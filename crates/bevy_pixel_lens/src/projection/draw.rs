//! Draw primitive seam and high resolution quads.

use bevy::log::debug;
use bevy::math::{DAffine2, DVec2, URect, UVec2};

use super::ScalingFilter;
use crate::camera::CameraArea;

/// Backend able to draw one image onto another.
///
/// The camera never touches pixels itself. High resolution draws compute the
/// affine transform from source pixels to target pixels and hand it to the
/// primitive together with the filter to sample with.
pub trait DrawPrimitive {
  type Image;

  fn image_size(&self, image: &Self::Image) -> UVec2;

  fn draw(
    &mut self,
    target: &mut Self::Image,
    source: &Self::Image,
    transform: DAffine2,
    filter: ScalingFilter,
  );
}

/// Turns a [`ScalingFilter`] into whatever the backend samples with, e.g. a
/// shader.
pub trait FilterCompiler {
  type Program;

  fn compile(&mut self, filter: ScalingFilter) -> Self::Program;
}

/// Compiles each filter at most once.
pub struct FilterCache<C: FilterCompiler> {
  compiler: C,
  programs: [Option<C::Program>; ScalingFilter::COUNT],
  last_used: Option<ScalingFilter>,
}

impl<C: FilterCompiler> FilterCache<C> {
  pub fn new(compiler: C) -> Self {
    Self {
      compiler,
      programs: std::array::from_fn(|_| None),
      last_used: None,
    }
  }

  pub fn is_compiled(&self, filter: ScalingFilter) -> bool {
    self.programs[filter.index()].is_some()
  }

  /// Compiles `filter` ahead of its first use.
  pub fn warm(&mut self, filter: ScalingFilter) {
    let slot = &mut self.programs[filter.index()];
    if slot.is_none() {
      debug!("compiling scaling filter {filter}");
      *slot = Some(self.compiler.compile(filter));
    }
  }

  /// Returns the program for `filter`, compiling it on first use, and marks
  /// it as the most recently used filter.
  pub fn get(&mut self, filter: ScalingFilter) -> &C::Program {
    self.warm(filter);
    self.last_used = Some(filter);
    match &self.programs[filter.index()] {
      Some(program) => program,
      None => unreachable!("filter {filter} was just compiled"),
    }
  }

  /// Filter used by the most recent draw.
  pub fn last_used(&self) -> Option<ScalingFilter> {
    self.last_used
  }
}

/// Maps a logical sprite onto a high resolution render target.
///
/// `transform` places the source image (in source pixels) in the logical
/// world. The returned transform maps source pixels to pixels of the target
/// region `target`, which displays `area`. Sprites whose bounds don't touch
/// `area` are culled and yield `None`.
pub fn hi_res_quad(
  source_size: UVec2,
  transform: DAffine2,
  area: &CameraArea,
  target: URect,
) -> Option<DAffine2> {
  let size = source_size.as_dvec2();
  let corners = [
    DVec2::ZERO,
    DVec2::new(size.x, 0.0),
    size,
    DVec2::new(0.0, size.y),
  ]
  .map(|corner| transform.transform_point2(corner));

  let min = corners.iter().copied().reduce(DVec2::min)?;
  let max = corners.iter().copied().reduce(DVec2::max)?;
  if min.x > area.max.x || min.y > area.max.y || max.x < area.min.x || max.y < area.min.y {
    return None;
  }

  let factor = target.size().as_dvec2() / area.size();
  let offset = target.min.as_dvec2() - area.min * factor;
  Some(DAffine2::from_translation(offset) * DAffine2::from_scale(factor) * transform)
}
