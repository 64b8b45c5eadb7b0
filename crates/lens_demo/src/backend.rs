//! Bookkeeping draw backend standing in for a real renderer.

use bevy::math::{DAffine2, UVec2};
use bevy::prelude::*;
use bevy_pixel_lens::{DrawPrimitive, ScalingFilter};
use bevy_pixel_lens::projection::FilterCompiler;

/// An image the backend knows the size of and nothing else.
#[derive(Clone, Debug)]
pub struct Surface {
  pub size: UVec2,
  pub draws: u32,
}

impl Surface {
  pub fn new(size: UVec2) -> Self {
    Self { size, draws: 0 }
  }
}

/// Counts draws instead of touching pixels.
#[derive(Default)]
pub struct CountingPrimitive;

impl DrawPrimitive for CountingPrimitive {
  type Image = Surface;

  fn image_size(&self, image: &Surface) -> UVec2 {
    image.size
  }

  fn draw(&mut self, target: &mut Surface, _: &Surface, transform: DAffine2, filter: ScalingFilter) {
    trace!("draw at {:?} with {filter}", transform.translation);
    target.draws += 1;
  }
}

/// "Compiles" a filter into its display name.
pub struct NameCompiler;

impl FilterCompiler for NameCompiler {
  type Program = String;

  fn compile(&mut self, filter: ScalingFilter) -> String {
    filter.to_string()
  }
}

#[derive(Resource, Default, Debug)]
pub struct DrawStats {
  pub projected: u32,
  pub drawn: u32,
  pub culled: u32,
}
