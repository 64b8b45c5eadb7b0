//! Logical pixel-art camera.
//!
//! [`PixelCamera`] decides, once per tick, which rectangle of the logical
//! world is rendered. [`PixelCamera::flush`] runs the per-tick pipeline in a
//! fixed order:
//!
//! 1. zoom update through the active [`Zoomer`],
//! 2. tracking update through the active [`Tracker`],
//! 3. shake update of every channel, summing their offsets,
//! 4. camera area recomputation.
//!
//! Flushing twice on the same tick is a no-op, so game code can flush early
//! to read an up-to-date [`area`](PixelCamera::area) during its own update.
//!
//! Configuration can't change between [`begin_draw`](PixelCamera::begin_draw)
//! and [`end_draw`](PixelCamera::end_draw). Doing so panics.

mod area;
mod draw;
mod shake;
mod state;

use bevy::log::info;
use bevy::math::{DVec2, IRect, UVec2};
use bevy::prelude::Resource;
pub use area::CameraArea;
pub use draw::DrawFrame;
pub use state::{RedrawState, TrackerState, ZoomState};

use crate::config::PixelLensConfig;
use crate::context::ViewContext;
use crate::projection::{ProjectionConfig, ReusableCanvas, ScalingFilter};
use crate::shaker::{Random, ShakerBank};
use crate::ticks::TickClock;
use crate::tracker::{SpringTailer, Tracker};
use crate::zoomer::{MAX_ZOOM, MIN_ZOOM, Quadratic, Zoomer, is_valid_zoom};

/// The logical camera.
///
/// Unbound strategies fall back to defaults created on first use: a
/// [`SpringTailer`] tracker, a [`Quadratic`] zoomer and a [`Random`] shaker
/// for channel zero.
#[derive(Resource)]
pub struct PixelCamera {
  resolution: UVec2,
  tracking: TrackerState,
  zoom: ZoomState,

  tracker: Option<Box<dyn Tracker>>,
  default_tracker: Option<SpringTailer>,
  zoomer: Option<Box<dyn Zoomer>>,
  default_zoomer: Option<Quadratic>,
  shakers: ShakerBank,
  default_shaker: Option<Random>,
  shake_offset: DVec2,

  area: CameraArea,
  last_flushed_tick: Option<u64>,

  projection: ProjectionConfig,
  hi_res: UVec2,
  prev_canvas_size: UVec2,
  layout_changed: bool,
  canvas: ReusableCanvas,

  in_draw: bool,
  last_draw_filter: Option<ScalingFilter>,
  redraw: RedrawState,
}

impl PixelCamera {
  /// Creates a camera centered on the origin.
  ///
  /// # Panics
  /// If either resolution axis is zero.
  pub fn new(resolution: UVec2) -> Self {
    assert_resolution(resolution, "game resolution");
    let mut camera = Self {
      resolution,
      tracking: TrackerState::default(),
      zoom: ZoomState::default(),
      tracker: None,
      default_tracker: None,
      zoomer: None,
      default_zoomer: None,
      shakers: ShakerBank::default(),
      default_shaker: None,
      shake_offset: DVec2::ZERO,
      area: CameraArea::default(),
      last_flushed_tick: None,
      projection: ProjectionConfig::default(),
      hi_res: UVec2::ZERO,
      prev_canvas_size: UVec2::ZERO,
      layout_changed: false,
      canvas: ReusableCanvas::default(),
      in_draw: false,
      last_draw_filter: None,
      redraw: RedrawState::default(),
    };
    camera.update_area();
    camera
  }

  /// Creates a camera from a validated config.
  pub fn from_config(config: &PixelLensConfig) -> Self {
    let mut camera = Self::new(config.resolution());
    camera.projection = config.projection();
    camera.redraw.managed = config.redraw_managed;
    camera.reset_zoom(config.zoom);
    camera
  }

  fn ensure_not_drawing(&self, action: &str) {
    if self.in_draw {
      panic!("can't {action} during draw stage");
    }
  }

  // --- resolution and projection ---

  pub fn resolution(&self) -> UVec2 {
    self.resolution
  }

  /// # Panics
  /// If either axis is zero, or during the draw stage.
  pub fn set_resolution(&mut self, resolution: UVec2) {
    self.ensure_not_drawing("change resolution");
    assert_resolution(resolution, "game resolution");
    if resolution != self.resolution {
      info!("pixel camera resolution set to {}x{}", resolution.x, resolution.y);
      self.resolution = resolution;
      self.redraw.touch();
      self.update_area();
    }
  }

  pub fn projection(&self) -> &ProjectionConfig {
    &self.projection
  }

  /// Sets the stretching policy. Disabling stretching schedules a clear of
  /// the render target so stale borders don't linger.
  pub fn set_stretching(&mut self, allowed: bool, keep_aspect_ratio: bool, dynamic_scaling: bool) {
    self.ensure_not_drawing("change stretching mode");
    let projection = &mut self.projection;
    let was_stretching = projection.stretching;
    if (allowed, keep_aspect_ratio, dynamic_scaling)
      == (projection.stretching, projection.keep_aspect_ratio, projection.dynamic_scaling)
    {
      return;
    }

    projection.stretching = allowed;
    projection.keep_aspect_ratio = keep_aspect_ratio;
    projection.dynamic_scaling = dynamic_scaling;
    if was_stretching && !allowed {
      self.redraw.needs_clear = true;
    }
    self.redraw.touch();
    self.update_area();
  }

  /// # Panics
  /// If either axis is zero, or during the draw stage.
  pub fn set_best_fit_render_size(&mut self, size: UVec2) {
    self.ensure_not_drawing("change best-fit render size");
    assert_resolution(size, "best-fit render size");
    let size = size.as_dvec2();
    if size != self.projection.best_fit_render_size {
      self.projection.best_fit_render_size = size;
      self.redraw.touch();
      self.update_area();
    }
  }

  /// # Panics
  /// If either axis is zero, or during the draw stage.
  pub fn set_best_fit_context_size(&mut self, size: UVec2) {
    self.ensure_not_drawing("change best-fit context size");
    assert_resolution(size, "best-fit context size");
    let size = size.as_dvec2();
    if size != self.projection.best_fit_context_size {
      self.projection.best_fit_context_size = size;
      self.redraw.touch();
      self.update_area();
    }
  }

  pub fn filter(&self) -> ScalingFilter {
    self.projection.filter
  }

  /// Filter passed to the draw primitive by the most recent hi-res draw.
  pub fn last_draw_filter(&self) -> Option<ScalingFilter> {
    self.last_draw_filter
  }

  pub fn set_filter(&mut self, filter: ScalingFilter) {
    self.ensure_not_drawing("change scaling filter");
    if filter != self.projection.filter {
      self.projection.filter = filter;
      self.redraw.touch();
    }
  }

  // --- tracking ---

  /// The bound tracker, if any. The fallback tracker isn't reported.
  pub fn tracker(&self) -> Option<&dyn Tracker> {
    self.tracker.as_deref()
  }

  pub fn set_tracker(&mut self, tracker: Option<Box<dyn Tracker>>) {
    self.ensure_not_drawing("set tracker");
    self.tracker = tracker;
  }

  fn active_tracker(&mut self) -> &mut dyn Tracker {
    match self.tracker.as_deref_mut() {
      Some(tracker) => tracker,
      None => self.default_tracker.get_or_insert_with(SpringTailer::default),
    }
  }

  pub fn tracking(&self) -> &TrackerState {
    &self.tracking
  }

  /// Sets the position the tracker moves toward.
  pub fn notify_coordinates(&mut self, target: DVec2) {
    self.ensure_not_drawing("notify tracking coordinates");
    self.tracking.target = target;
  }

  /// Moves the camera to `position` immediately, skipping the tracker.
  pub fn reset_coordinates(&mut self, position: DVec2) {
    self.ensure_not_drawing("reset camera coordinates");
    if position != self.tracking.current {
      self.redraw.touch();
    }
    self.tracking.target = position;
    self.tracking.current = position;
    self.update_area();
  }

  // --- zoom ---

  /// Sets the zoom level the zoomer transitions toward.
  ///
  /// # Panics
  /// If `target` lies outside `[MIN_ZOOM, MAX_ZOOM]`, or during the draw
  /// stage.
  pub fn zoom(&mut self, target: f64) {
    self.ensure_not_drawing("zoom");
    assert_zoom(target);
    self.zoom.target = target;
  }

  /// Sets both current and target zoom, dropping any transition in flight.
  pub fn reset_zoom(&mut self, level: f64) {
    self.ensure_not_drawing("reset zoom");
    assert_zoom(level);
    if level != self.zoom.current {
      self.redraw.touch();
    }
    self.zoom = ZoomState {
      current: level,
      target: level,
    };
    self.active_zoomer().reset();
    self.update_area();
  }

  pub fn zoom_levels(&self) -> ZoomState {
    self.zoom
  }

  /// The bound zoomer, if any. The fallback zoomer isn't reported.
  pub fn zoomer(&self) -> Option<&dyn Zoomer> {
    self.zoomer.as_deref()
  }

  pub fn set_zoomer(&mut self, zoomer: Option<Box<dyn Zoomer>>) {
    self.ensure_not_drawing("change zoomer");
    self.zoomer = zoomer;
  }

  fn active_zoomer(&mut self) -> &mut dyn Zoomer {
    match self.zoomer.as_deref_mut() {
      Some(zoomer) => zoomer,
      None => self.default_zoomer.get_or_insert_with(Quadratic::default),
    }
  }

  // --- area ---

  /// Visible area rounded outward to whole logical pixels.
  pub fn area(&self) -> IRect {
    self.area.to_irect()
  }

  /// Exact visible area.
  pub fn area_f64(&self) -> CameraArea {
    self.area
  }

  /// Sum of all shake channel offsets applied on the last flush.
  pub fn shake_offset(&self) -> DVec2 {
    self.shake_offset
  }

  // --- redraw management ---

  pub fn set_redraw_managed(&mut self, managed: bool) {
    self.ensure_not_drawing("change redraw management");
    self.redraw.managed = managed;
  }

  pub fn is_redraw_managed(&self) -> bool {
    self.redraw.managed
  }

  pub fn request_redraw(&mut self) {
    self.ensure_not_drawing("request redraw");
    self.redraw.needs_redraw = true;
  }

  /// Whether the next draw will project the logical canvas.
  pub fn redraw_pending(&self) -> bool {
    self.redraw.pending()
  }

  /// Clears the render target and the logical canvas on the next draw.
  pub fn schedule_clear(&mut self) {
    self.redraw.needs_clear = true;
  }

  // --- per-tick flow ---

  /// Runs the per-tick pipeline for the clock's current tick.
  ///
  /// Returns `false` if the tick was already flushed.
  ///
  /// # Panics
  /// If the zoomer returns NaN or moves the zoom out of range.
  pub fn flush(&mut self, clock: &TickClock) -> bool {
    let now = clock.now();
    if self.last_flushed_tick == Some(now) {
      return false;
    }
    self.last_flushed_tick = Some(now);

    self.update_zoom(clock);
    self.update_tracking(clock);
    self.update_shake(clock);
    self.update_area();
    true
  }

  /// Flushes the tick and closes the update, clearing the layout change
  /// flag.
  pub fn finish_update(&mut self, clock: &TickClock) {
    self.flush(clock);
    self.layout_changed = false;
  }

  pub fn last_flushed_tick(&self) -> Option<u64> {
    self.last_flushed_tick
  }

  fn update_zoom(&mut self, clock: &TickClock) {
    let ctx = ViewContext::new(self.resolution, self.zoom.current, clock);
    let ZoomState { current, target } = self.zoom;
    let change = self.active_zoomer().update(current, target, &ctx);
    if change.is_nan() {
      panic!("zoomer returned NaN");
    }

    self.zoom.current += change;
    if !is_valid_zoom(self.zoom.current) {
      panic!(
        "zoomer moved zoom to {} after last update, outside [{MIN_ZOOM}, {MAX_ZOOM}]",
        self.zoom.current
      );
    }
    if change != 0.0 {
      self.redraw.touch();
    }
  }

  fn update_tracking(&mut self, clock: &TickClock) {
    let ctx = ViewContext::new(self.resolution, self.zoom.current, clock);
    let TrackerState {
      current,
      target,
      prev_speed,
    } = self.tracking;
    let change = self.active_tracker().update(current, target, prev_speed, &ctx);

    self.tracking.current += change;
    self.tracking.prev_speed = change * f64::from(clock.updates_per_second());
    if self.tracking.prev_speed != DVec2::ZERO {
      self.redraw.touch();
    }
  }

  fn update_shake(&mut self, clock: &TickClock) {
    let ctx = ViewContext::new(self.resolution, self.zoom.current, clock);
    let offset = self
      .shakers
      .update(&mut self.default_shaker, clock.rate(), &ctx);
    if offset != self.shake_offset {
      self.redraw.touch();
    }
    self.shake_offset = offset;
  }
}

fn assert_resolution(size: UVec2, what: &str) {
  if size.x < 1 || size.y < 1 {
    panic!("{what} must be at least (1, 1), got {}x{}", size.x, size.y);
  }
}

fn assert_zoom(level: f64) {
  if !is_valid_zoom(level) {
    panic!("zoom level {level} outside [{MIN_ZOOM}, {MAX_ZOOM}]");
  }
}
