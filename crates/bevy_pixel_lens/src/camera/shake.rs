//! Camera-level shake commands.
//!
//! Commands take a channel list. An empty list means the default channel.
//! Binding and querying accept at most one channel.

use super::PixelCamera;
use crate::shaker::{ChannelId, Shaker, ShakerChannel};
use crate::ticks::TickDuration;

fn single_channel(channels: &[ChannelId], operation: &str) -> ChannelId {
  match channels {
    [] => ChannelId::DEFAULT,
    [channel] => *channel,
    _ => panic!("can't pass multiple shaker channels to {operation}"),
  }
}

impl PixelCamera {
  /// Binds a shaker to a channel, or unbinds it with `None`.
  ///
  /// Channels other than zero are created on bind and trimmed once unbound
  /// at the end of the bank.
  pub fn set_shaker(&mut self, shaker: Option<Box<dyn Shaker>>, channels: &[ChannelId]) {
    self.ensure_not_drawing("set shaker");
    let channel = single_channel(channels, "set_shaker");
    self.shakers.bind(shaker, channel);
  }

  /// The shaker bound to a channel. The fallback shaker isn't reported.
  pub fn shaker(&self, channels: &[ChannelId]) -> Option<&dyn Shaker> {
    self.shakers.shaker(single_channel(channels, "shaker"))
  }

  pub fn shake_channel(&self, channel: ChannelId) -> Option<&ShakerChannel> {
    self.shakers.channel(channel)
  }

  pub fn shake_channel_count(&self) -> usize {
    self.shakers.len()
  }

  fn for_each_channel(
    &mut self,
    channels: &[ChannelId],
    operation: &str,
    mut apply: impl FnMut(&mut ShakerChannel),
  ) {
    self.ensure_not_drawing(operation);
    if channels.is_empty() {
      apply(self.shakers.channel_mut(ChannelId::DEFAULT, operation));
      return;
    }
    for &channel in channels {
      apply(self.shakers.channel_mut(channel, operation));
    }
  }

  /// Starts an indefinite shake on the given channels.
  ///
  /// # Panics
  /// If a channel other than zero has no shaker bound.
  pub fn start_shake(&mut self, fade_in: TickDuration, channels: &[ChannelId]) {
    self.for_each_channel(channels, "start shake", |channel| channel.start(fade_in));
  }

  /// Ends the shake on the given channels.
  ///
  /// # Panics
  /// If a channel other than zero has no shaker bound.
  pub fn end_shake(&mut self, fade_out: TickDuration, channels: &[ChannelId]) {
    self.for_each_channel(channels, "end shake", |channel| channel.end(fade_out));
  }

  /// Triggers a finite shake on the given channels.
  ///
  /// # Panics
  /// If a channel other than zero has no shaker bound.
  pub fn trigger_shake(
    &mut self,
    fade_in: TickDuration,
    duration: TickDuration,
    fade_out: TickDuration,
    channels: &[ChannelId],
  ) {
    self.for_each_channel(channels, "trigger shake", |channel| {
      channel.trigger(fade_in, duration, fade_out)
    });
  }

  /// Whether the given channel is shaking. With no channel, whether any
  /// channel is.
  pub fn is_shaking(&self, channels: &[ChannelId]) -> bool {
    match channels {
      [] => self.shakers.is_shaking(None),
      [channel] => self.shakers.is_accessible(*channel) && self.shakers.is_shaking(Some(*channel)),
      _ => panic!("is_shaking accepts at most one shaker channel"),
    }
  }
}

#[cfg(test)]
mod tests {
  use bevy::math::{DVec2, UVec2};

  use super::*;
  use crate::context::ViewContext;
  use crate::ticks::TickClock;
  use crate::tracker::Frozen;

  struct Nudge;

  impl Shaker for Nudge {
    fn offsets(&mut self, level: f64, _: &ViewContext) -> DVec2 {
      DVec2::new(2.0 * level, 0.0)
    }
  }

  fn camera() -> PixelCamera {
    let mut camera = PixelCamera::new(UVec2::new(100, 100));
    camera.set_tracker(Some(Box::new(Frozen)));
    camera
  }

  #[test]
  fn shake_offsets_move_area() {
    let mut camera = camera();
    let mut clock = TickClock::default();
    camera.set_shaker(Some(Box::new(Nudge)), &[]);
    camera.trigger_shake(0, 3, 0, &[]);
    camera.flush(&clock);
    clock.advance();
    camera.flush(&clock);
    assert_eq!(camera.shake_offset(), DVec2::new(2.0, 0.0));
    assert_eq!(camera.area_f64().min, DVec2::new(-48.0, -50.0));
  }

  #[test]
  fn offsets_sum_across_channels() {
    let mut camera = camera();
    let mut clock = TickClock::default();
    camera.set_shaker(Some(Box::new(Nudge)), &[]);
    camera.set_shaker(Some(Box::new(Nudge)), &[ChannelId(2)]);
    camera.start_shake(0, &[ChannelId(0), ChannelId(2)]);
    for _ in 0..3 {
      clock.advance();
      camera.flush(&clock);
    }
    assert_eq!(camera.shake_offset(), DVec2::new(4.0, 0.0));
    assert!(camera.is_shaking(&[ChannelId(2)]));
    assert!(!camera.is_shaking(&[ChannelId(1)]));
  }

  #[test]
  fn unbinding_trims_channels() {
    let mut camera = camera();
    camera.set_shaker(Some(Box::new(Nudge)), &[ChannelId(3)]);
    assert_eq!(camera.shake_channel_count(), 4);
    camera.set_shaker(None, &[ChannelId(3)]);
    assert_eq!(camera.shake_channel_count(), 1);
    assert!(camera.shaker(&[ChannelId(3)]).is_none());
  }

  #[test]
  fn default_channel_uses_fallback_shaker() {
    let mut camera = camera();
    let mut clock = TickClock::default();
    camera.start_shake(0, &[]);
    for _ in 0..5 {
      clock.advance();
      camera.flush(&clock);
    }
    assert!(camera.is_shaking(&[]));
    assert!(camera.shaker(&[]).is_none());
    assert!(camera.default_shaker.is_some());
  }

  #[test]
  #[should_panic(expected = "can't trigger shake on uninitialized shaker channel #1")]
  fn unbound_channel_panics() {
    camera().trigger_shake(1, 1, 1, &[ChannelId(1)]);
  }

  #[test]
  #[should_panic(expected = "can't pass multiple shaker channels to set_shaker")]
  fn multiple_channels_panic() {
    camera().set_shaker(None, &[ChannelId(1), ChannelId(2)]);
  }

  #[test]
  #[should_panic(expected = "is_shaking accepts at most one shaker channel")]
  fn is_shaking_rejects_multiple_channels() {
    camera().is_shaking(&[ChannelId(0), ChannelId(1)]);
  }
}
