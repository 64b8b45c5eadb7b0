//! Simulation tick counter.
//!
//! A tick is the camera's unit of time. Each game update advances the clock by
//! `rate` ticks, so shakes and other tick-based envelopes keep their duration
//! regardless of how many updates per second the game runs.

use bevy::prelude::*;

/// Count of simulation ticks used for shake fades and durations.
///
/// `0` is the "unused" / "instant" value.
pub type TickDuration = u32;

/// No ticks. Handy for instant fades.
pub const ZERO_TICKS: TickDuration = 0;

/// Duration value meaning "sustain until explicitly ended".
pub const INDEFINITE: TickDuration = u32::MAX;

/// Default updates per second, matching a 60 Hz game loop.
pub const DEFAULT_UPS: u32 = 60;

/// Monotonic tick counter with a configurable rate multiplier.
#[derive(Resource, Clone, Debug)]
pub struct TickClock {
  now: u64,
  rate: u64,
  updates_per_second: u32,
}

impl Default for TickClock {
  fn default() -> Self {
    Self::new(1, DEFAULT_UPS)
  }
}

impl TickClock {
  /// Creates a clock at tick zero.
  ///
  /// # Panics
  /// If `rate` or `updates_per_second` is zero.
  pub fn new(rate: u64, updates_per_second: u32) -> Self {
    assert!(rate > 0, "tick rate must be at least 1");
    assert!(updates_per_second > 0, "updates per second must be at least 1");
    Self {
      now: 0,
      rate,
      updates_per_second,
    }
  }

  /// Current tick.
  pub fn now(&self) -> u64 {
    self.now
  }

  /// Ticks consumed per update.
  pub fn rate(&self) -> u64 {
    self.rate
  }

  /// Changes the ticks consumed per update.
  ///
  /// # Panics
  /// If `rate` is zero.
  pub fn set_rate(&mut self, rate: u64) {
    assert!(rate > 0, "tick rate must be at least 1");
    self.rate = rate;
  }

  pub fn updates_per_second(&self) -> u32 {
    self.updates_per_second
  }

  /// # Panics
  /// If `updates_per_second` is zero.
  pub fn set_updates_per_second(&mut self, updates_per_second: u32) {
    assert!(updates_per_second > 0, "updates per second must be at least 1");
    self.updates_per_second = updates_per_second;
  }

  /// Ticks per second, that is, `UPS * rate`.
  pub fn ticks_per_second(&self) -> u64 {
    u64::from(self.updates_per_second) * self.rate
  }

  /// Advances the clock by one update and returns the new tick.
  pub fn advance(&mut self) -> u64 {
    self.now += self.rate;
    self.now
  }
}
