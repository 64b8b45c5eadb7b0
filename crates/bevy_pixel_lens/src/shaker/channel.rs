//! Shake envelope state machine.

use bevy::math::DVec2;

use super::Shaker;
use crate::context::ViewContext;
use crate::ticks::{INDEFINITE, TickDuration};

/// A single shake channel.
///
/// One `elapsed` counter drives three phases relative to
/// `(fade_in, duration, fade_out)`:
///
/// - fade-in while `elapsed ∈ (0, fade_in]`,
/// - sustain while `elapsed ∈ (fade_in, fade_in + duration]`,
/// - fade-out while `elapsed ∈ [fade_in + duration, fade_in + duration +
///   fade_out)`.
///
/// Restarting a shake, or ending it during sustain or fade-out, moves
/// `elapsed` to the point of the new curve with the same activity, truncated
/// to whole ticks.
///
/// Tick counters are kept signed. Ending a shake during its fade-in keeps
/// the fade-in and leaves a negative sustain, so the remaining envelope
/// resumes along the fade-in ramp and stops early.
#[derive(Default)]
pub struct ShakerChannel {
  pub(crate) shaker: Option<Box<dyn Shaker>>,
  elapsed: i64,
  fade_in: i64,
  duration: i64,
  fade_out: i64,
  offset: DVec2,
  was_active: bool,
}

impl std::fmt::Debug for ShakerChannel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ShakerChannel")
      .field("bound", &self.shaker.is_some())
      .field("elapsed", &self.elapsed)
      .field("fade_in", &self.fade_in)
      .field("duration", &self.duration)
      .field("fade_out", &self.fade_out)
      .field("offset", &self.offset)
      .field("was_active", &self.was_active)
      .finish()
  }
}

/// Truncates a reparametrized position on a fade curve to whole ticks.
fn ticks_at(fade: i64, fraction: f64) -> i64 {
  (fade as f64 * fraction) as i64
}

impl ShakerChannel {
  pub fn with_shaker(shaker: Option<Box<dyn Shaker>>) -> Self {
    Self {
      shaker,
      ..Default::default()
    }
  }

  pub fn is_bound(&self) -> bool {
    self.shaker.is_some()
  }

  /// Offset produced by the last update.
  pub fn offset(&self) -> DVec2 {
    self.offset
  }

  pub fn elapsed(&self) -> i64 {
    self.elapsed
  }

  /// Activity level in `[0, 1]`.
  pub fn activity(&self) -> f64 {
    if self.elapsed == 0 {
      return 0.0;
    }
    if self.elapsed < self.fade_in {
      return self.elapsed as f64 / self.fade_in as f64;
    }

    let mut elapsed = self.elapsed - self.fade_in;
    if elapsed <= self.duration {
      return 1.0;
    }
    elapsed -= self.duration;
    if elapsed >= self.fade_out {
      return 0.0;
    }
    1.0 - elapsed as f64 / self.fade_out as f64
  }

  pub fn is_shaking(&self) -> bool {
    if self.elapsed == 0 {
      return self.fade_in > 0 || self.duration > 0;
    }
    self.elapsed < self.duration || self.elapsed < self.fade_in + self.duration + self.fade_out
  }

  pub fn is_fading_in(&self) -> bool {
    self.elapsed > 0 && self.elapsed <= self.fade_in
  }

  pub fn is_fading_out(&self) -> bool {
    let to_fade_out = self.fade_in + self.duration;
    self.elapsed >= to_fade_out && self.elapsed < to_fade_out + self.fade_out
  }

  /// Starts an indefinite shake. Repeating the call while already fading in
  /// with the same `fade_in` does nothing.
  pub fn start(&mut self, fade_in: TickDuration) {
    let fade_in = i64::from(fade_in);
    if self.fade_in == fade_in && self.is_fading_in() {
      return;
    }

    let activity = self.activity();
    self.fade_in = fade_in;
    self.duration = i64::from(INDEFINITE);
    self.fade_out = 0;
    self.elapsed = ticks_at(fade_in, activity);
  }

  /// Ends the current shake with the given fade-out. Repeating the call
  /// while already fading out with the same `fade_out` does nothing.
  pub fn end(&mut self, fade_out: TickDuration) {
    let fade_out = i64::from(fade_out);
    if self.fade_out == fade_out && self.is_fading_out() {
      return;
    }

    let activity = self.activity();
    self.duration = self.elapsed - self.fade_in;
    self.fade_out = fade_out;
    self.elapsed = self.fade_in + self.duration + ticks_at(fade_out, 1.0 - activity);
  }

  /// Starts a shake with a finite envelope. Overrides an indefinite shake in
  /// progress, eventually bringing it to a stop.
  pub fn trigger(&mut self, fade_in: TickDuration, duration: TickDuration, fade_out: TickDuration) {
    self.start(fade_in);
    self.duration = i64::from(duration);
    self.fade_out = i64::from(fade_out);
  }

  /// Whether the next update has any work to do.
  pub(crate) fn needs_update(&self) -> bool {
    self.was_active || self.is_shaking()
  }

  /// Advances the envelope by `tick_delta` ticks and refreshes the offset.
  ///
  /// Unbound channels use `fallback`, or stay idle when there is none.
  pub fn update(&mut self, fallback: Option<&mut dyn Shaker>, tick_delta: u64, ctx: &ViewContext) {
    let shaking = self.is_shaking();
    let activity = self.activity();
    let shaker: &mut dyn Shaker = match (self.shaker.as_deref_mut(), fallback) {
      (Some(bound), _) => bound,
      (None, Some(fallback)) => fallback,
      (None, None) => return,
    };

    if shaking {
      self.was_active = true;
      self.offset = shaker.offsets(activity, ctx);
      self.elapsed = self
        .elapsed
        .saturating_add(i64::try_from(tick_delta).unwrap_or(i64::MAX));
    } else if self.was_active {
      // Termination call, lets the shaker reset its state.
      let _ = shaker.offsets(0.0, ctx);
      self.offset = DVec2::ZERO;
      self.was_active = false;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Reports the activity level as the x offset.
  struct LevelEcho;

  impl Shaker for LevelEcho {
    fn offsets(&mut self, level: f64, _: &ViewContext) -> DVec2 {
      DVec2::new(level, 0.0)
    }
  }

  fn echoing() -> ShakerChannel {
    ShakerChannel::with_shaker(Some(Box::new(LevelEcho)))
  }

  fn tick(channel: &mut ShakerChannel, ticks: usize) {
    for _ in 0..ticks {
      channel.update(None, 1, &ViewContext::default());
    }
  }

  #[test]
  fn idle_channel_is_silent() {
    let channel = ShakerChannel::default();
    assert_eq!(channel.activity(), 0.0);
    assert!(!channel.is_shaking());
  }

  #[test]
  fn triggered_envelope() {
    let mut channel = echoing();
    channel.trigger(10, 20, 10);
    assert!(channel.is_shaking());

    tick(&mut channel, 5);
    assert_eq!(channel.activity(), 0.5);
    assert!(channel.is_shaking());

    tick(&mut channel, 5);
    assert_eq!(channel.activity(), 1.0);

    tick(&mut channel, 25);
    assert_eq!(channel.activity(), 0.5);
    assert!(channel.is_fading_out());

    tick(&mut channel, 5);
    assert!(!channel.is_shaking());
    assert_eq!(channel.activity(), 0.0);
  }

  #[test]
  fn zero_trigger_never_shakes() {
    let mut channel = echoing();
    channel.trigger(0, 0, 0);
    for _ in 0..10 {
      assert!(!channel.is_shaking());
      tick(&mut channel, 1);
    }
    assert_eq!(channel.offset(), DVec2::ZERO);
  }

  #[test]
  fn restart_keeps_activity() {
    let mut channel = echoing();
    channel.start(10);
    tick(&mut channel, 5);
    assert_eq!(channel.activity(), 0.5);

    channel.start(20);
    assert_eq!(channel.activity(), 0.5);
    assert_eq!(channel.elapsed(), 10);
  }

  #[test]
  fn repeated_start_is_noop_while_fading_in() {
    let mut channel = echoing();
    channel.start(10);
    tick(&mut channel, 3);
    channel.start(10);
    assert_eq!(channel.elapsed(), 3);
  }

  #[test]
  fn end_during_sustain_fades_out() {
    let mut channel = echoing();
    channel.start(4);
    tick(&mut channel, 30);
    assert_eq!(channel.activity(), 1.0);

    channel.end(8);
    assert_eq!(channel.activity(), 1.0);
    assert!(channel.is_fading_out());
    tick(&mut channel, 4);
    assert_eq!(channel.activity(), 0.5);
    tick(&mut channel, 4);
    assert!(!channel.is_shaking());
  }

  #[test]
  fn end_is_idempotent() {
    let mut channel = echoing();
    channel.start(0);
    tick(&mut channel, 10);
    channel.end(10);
    tick(&mut channel, 3);
    let elapsed = channel.elapsed();
    channel.end(10);
    assert_eq!(channel.elapsed(), elapsed);
  }

  #[test]
  fn restart_truncates_to_whole_ticks() {
    let mut channel = echoing();
    channel.start(10);
    tick(&mut channel, 5);
    channel.start(7);
    // 7 * 0.5 = 3.5 ticks into the new fade-in.
    assert_eq!(channel.elapsed(), 3);
    assert_eq!(channel.activity(), 3.0 / 7.0);
  }

  #[test]
  fn end_mid_fade_in_keeps_fade_in() {
    let mut channel = echoing();
    channel.start(10);
    tick(&mut channel, 5);
    channel.end(4);
    assert_eq!(channel.fade_in, 10);
    assert_eq!(channel.duration, -5);
    assert_eq!(channel.fade_out, 4);
    assert_eq!(channel.elapsed(), 7);
    assert_eq!(channel.activity(), 0.7);
    assert!(channel.is_shaking());

    tick(&mut channel, 1);
    assert_eq!(channel.activity(), 0.8);
    assert!(channel.is_shaking());

    // The envelope ends at fade_in + duration + fade_out = 9 ticks.
    tick(&mut channel, 1);
    assert_eq!(channel.elapsed(), 9);
    assert!(!channel.is_shaking());
    tick(&mut channel, 1);
    assert_eq!(channel.offset(), DVec2::ZERO);
    assert!(!channel.needs_update());
  }

  #[test]
  fn start_mid_fade_out_is_continuous() {
    let mut channel = echoing();
    channel.trigger(0, 10, 10);
    tick(&mut channel, 16);
    let before = channel.activity();
    assert!(before > 0.0 && before < 1.0);
    channel.start(10);
    assert!((channel.activity() - before).abs() <= 0.1);
    assert!(channel.is_fading_in());
  }

  #[test]
  fn trigger_truncates_indefinite_shake() {
    let mut channel = echoing();
    channel.start(2);
    tick(&mut channel, 50);
    channel.trigger(2, 5, 5);
    tick(&mut channel, 20);
    assert!(!channel.is_shaking());
  }

  #[test]
  fn termination_call_zeroes_offsets() {
    let mut channel = echoing();
    channel.trigger(0, 3, 0);
    tick(&mut channel, 2);
    assert_eq!(channel.offset(), DVec2::new(1.0, 0.0));
    tick(&mut channel, 5);
    assert_eq!(channel.offset(), DVec2::ZERO);
    assert!(!channel.needs_update());
  }

  #[test]
  fn unbound_without_fallback_stays_idle() {
    let mut channel = ShakerChannel::default();
    channel.trigger(2, 2, 2);
    tick(&mut channel, 3);
    assert_eq!(channel.elapsed(), 0);
  }

  #[test]
  fn activity_is_bounded_and_continuous() {
    let mut channel = echoing();
    let mut previous = channel.activity();
    // (tick, command) pairs. Ends are only issued during sustain or
    // fade-out, restarts in every phase.
    let mut script: Vec<(usize, fn(&mut ShakerChannel))> = vec![
      (0, |c| c.start(12)),
      (5, |c| c.start(20)),
      (20, |c| c.end(9)),
      (24, |c| c.start(6)),
      (30, |c| c.end(16)),
      (36, |c| c.trigger(8, 4, 12)),
      (50, |c| c.end(30)),
      (60, |c| c.trigger(10, 10, 10)),
    ];
    script.reverse();

    for tick_index in 0..120 {
      while script.last().is_some_and(|(at, _)| *at == tick_index) {
        let (_, command) = script.pop().unwrap();
        command(&mut channel);
        let now = channel.activity();
        // Truncating to whole ticks costs at most one tick of the new fade.
        assert!(
          (now - previous).abs() <= 1.0 / 6.0 + 1e-12,
          "activity jumped from {previous} to {now} at tick {tick_index}"
        );
        previous = now;
      }
      tick(&mut channel, 1);
      let now = channel.activity();
      assert!((0.0..=1.0).contains(&now));
      previous = now;
    }
  }
}
