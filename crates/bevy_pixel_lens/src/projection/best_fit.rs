use bevy::math::{DVec2, UVec2};

/// Returns the scale that fits `render` into `context`, preserving the aspect
/// ratio.
///
/// Without a context size the layout size is used instead. With
/// `dynamic` scaling, each axis whose layout is smaller than the context or
/// render size falls back to `layout / render`, so small windows still show
/// the whole render area. The result is clamped to at least 1 unless
/// `allow_below_one` is set.
pub fn best_fit_scale(
  dynamic: bool,
  layout: UVec2,
  render: DVec2,
  context: Option<DVec2>,
  allow_below_one: bool,
) -> f64 {
  let layout_f = layout.as_dvec2();
  let mut scale = match context {
    Some(context) => context / render,
    None => layout_f / render,
  };

  if dynamic {
    let context = context.unwrap_or(layout_f);
    if layout_f.x < context.x.trunc() || layout_f.x < render.x.trunc() {
      scale.x = layout_f.x / render.x;
    }
    if layout_f.y < context.y.trunc() || layout_f.y < render.y.trunc() {
      scale.y = layout_f.y / render.y;
    }
  }

  let scale = scale.min_element();
  if allow_below_one { scale } else { scale.max(1.0) }
}

/// Integer variant of [`best_fit_scale`]. Never below 1.
pub fn best_fit_scale_int(dynamic: bool, layout: UVec2, render: DVec2, context: Option<DVec2>) -> u32 {
  best_fit_scale(dynamic, layout, render, context, false).floor() as u32
}
