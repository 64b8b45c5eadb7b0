//! Draw stage, layout and coordinate conversions.

use bevy::math::{DAffine2, DVec2, URect, UVec2};

use super::PixelCamera;
use crate::projection::{self, CanvasView, DrawPrimitive, hi_res_quad};

/// What a frame should draw into, returned by [`PixelCamera::begin_draw`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawFrame {
  /// Logical canvas region for this frame.
  pub canvas: CanvasView,
  /// Region of the render target the logical canvas is projected onto.
  pub active_area: URect,
  /// Whether the render target and logical canvas must be cleared first.
  pub clear: bool,
}

impl PixelCamera {
  /// Updates the high resolution size from the window size in logical
  /// window units and returns it.
  ///
  /// With aspect-preserving stretching the device scale is ignored.
  pub fn layout(&mut self, window: UVec2, device_scale: f64) -> UVec2 {
    let hi_res = if self.projection.uses_best_fit() {
      window
    } else {
      (window.as_dvec2() * device_scale).as_uvec2()
    };
    self.set_hi_res(hi_res);
    self.hi_res
  }

  /// Float variant of [`layout`](Self::layout). Scaled sizes round up.
  pub fn layout_f(&mut self, window: DVec2, device_scale: f64) -> DVec2 {
    let out = if self.projection.uses_best_fit() {
      window
    } else {
      (window * device_scale).ceil()
    };
    self.set_hi_res(out.as_uvec2());
    out
  }

  fn set_hi_res(&mut self, hi_res: UVec2) {
    if hi_res == self.hi_res {
      return;
    }
    self.hi_res = hi_res;
    self.layout_changed = true;
    self.redraw.needs_redraw = true;
    if self.projection.uses_best_fit() {
      self.update_area();
    }
  }

  pub fn hi_res_size(&self) -> UVec2 {
    self.hi_res
  }

  /// Whether the layout changed since the last finished update.
  pub fn layout_has_changed(&self) -> bool {
    self.layout_changed
  }

  pub fn is_drawing(&self) -> bool {
    self.in_draw
  }

  /// Enters the draw stage for a render target of `canvas_size` pixels.
  ///
  /// # Panics
  /// If the draw stage already started.
  pub fn begin_draw(&mut self, canvas_size: UVec2) -> DrawFrame {
    if self.in_draw {
      panic!("draw stage already started");
    }
    self.in_draw = true;

    // Render targets can disagree with the last layout, track them apart.
    if canvas_size != self.prev_canvas_size {
      self.prev_canvas_size = canvas_size;
      self.layout_changed = true;
      self.redraw.needs_redraw = true;
    }

    let size = self.area().size().max(bevy::math::IVec2::ZERO).as_uvec2();
    let canvas = self.canvas.request(size, self.resolution, self.zoom.target);
    DrawFrame {
      canvas,
      active_area: projection::active_area(canvas_size, self.resolution, self.projection.stretching),
      clear: std::mem::take(&mut self.redraw.needs_clear),
    }
  }

  /// Leaves the draw stage. Returns whether the logical canvas had to be
  /// projected this frame.
  ///
  /// # Panics
  /// Outside the draw stage.
  pub fn end_draw(&mut self) -> bool {
    if !self.in_draw {
      panic!("draw stage not started");
    }
    let project = self.redraw.pending();
    self.redraw.needs_redraw = false;
    self.in_draw = false;
    project
  }

  /// Draws `source` straight onto `target` at high resolution.
  ///
  /// `transform` places the source image in logical world coordinates and
  /// `region` is the render target region showing the camera area, usually
  /// the frame's active area. Returns `false` if the image was culled.
  ///
  /// # Panics
  /// Outside the draw stage.
  pub fn draw_hi_res<D: DrawPrimitive>(
    &mut self,
    primitive: &mut D,
    target: &mut D::Image,
    region: URect,
    source: &D::Image,
    transform: DAffine2,
  ) -> bool {
    if !self.in_draw {
      panic!("can't draw hi-res outside draw stage");
    }
    let size = primitive.image_size(source);
    let Some(quad) = hi_res_quad(size, transform, &self.area, region) else {
      return false;
    };
    let filter = self.projection.filter;
    primitive.draw(target, source, quad, filter);
    self.last_draw_filter = Some(filter);
    true
  }

  // --- conversions ---

  /// Render target region showing the game for the current layout.
  pub fn active_area(&self) -> URect {
    projection::active_area(self.hi_res, self.resolution, self.projection.stretching)
  }

  /// Maps a logical point onto a target of `target_size` pixels showing the
  /// camera area.
  pub fn logical_to_target(&self, point: DVec2, target_size: DVec2) -> DVec2 {
    projection::logical_to_target(point, &self.area, target_size)
  }

  /// Maps a render target position to `[0, 1]` coordinates of the active
  /// area.
  pub fn to_relative(&self, screen: DVec2) -> DVec2 {
    projection::to_relative(screen, self.active_area())
  }

  /// Maps a render target position to game resolution pixels.
  pub fn to_game_resolution(&self, screen: DVec2) -> DVec2 {
    self.to_relative(screen) * self.resolution.as_dvec2()
  }

  /// Maps a render target position to logical world coordinates.
  pub fn to_logical(&self, screen: DVec2) -> DVec2 {
    self.area.min + self.to_relative(screen) * self.area.size()
  }
}
