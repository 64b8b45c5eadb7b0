//! Quadratic in/out zoom easing.

use super::Zoomer;
use crate::context::{ViewContext, easing};

/// Eases between zoom levels with a quadratic in/out curve.
///
/// Interpolation happens in log space so that zooming from 1 to 2 feels like
/// zooming from 2 to 4, and transitions spanning more zoom doublings take
/// longer.
#[derive(Clone, Debug)]
pub struct Quadratic {
  /// Seconds spent on any transition, however small.
  pub base_time: f64,
  /// Extra seconds per zoom doubling.
  pub time_per_doubling: f64,
  transition: Option<Transition>,
}

#[derive(Clone, Copy, Debug)]
struct Transition {
  from: f64,
  to: f64,
  progress: f64,
}

impl Default for Quadratic {
  fn default() -> Self {
    Self {
      base_time: 0.2,
      time_per_doubling: 0.3,
      transition: None,
    }
  }
}

impl Quadratic {
  fn duration(&self, from: f64, to: f64) -> f64 {
    let doublings = (to / from).log2().abs();
    (self.base_time + doublings * self.time_per_doubling).max(f64::EPSILON)
  }
}

impl Zoomer for Quadratic {
  fn update(&mut self, current: f64, target: f64, ctx: &ViewContext) -> f64 {
    if current == target {
      self.transition = None;
      return 0.0;
    }

    let transition = match self.transition {
      Some(transition) if transition.to == target => transition,
      _ => Transition {
        from: current,
        to: target,
        progress: 0.0,
      },
    };

    let duration = self.duration(transition.from, transition.to);
    let progress = (transition.progress + ctx.update_delta() / duration).min(1.0);
    if progress >= 1.0 {
      self.transition = None;
      return target - current;
    }
    self.transition = Some(Transition {
      progress,
      ..transition
    });

    let ratio = transition.to / transition.from;
    let t = easing::quad_in_out(progress);
    let next = transition.from * ratio.powf(t);
    next - current
  }

  fn reset(&mut self) {
    self.transition = None;
  }
}
