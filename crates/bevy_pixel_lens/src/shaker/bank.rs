use bevy::log::debug;
use bevy::math::DVec2;

use super::{ChannelId, Random, Shaker, ShakerChannel};
use crate::context::ViewContext;

/// The set of shake channels owned by a camera.
///
/// Channel zero always exists. Higher channels are created when a shaker is
/// bound to them and trimmed from the end once unbound.
#[derive(Debug)]
pub struct ShakerBank {
  channels: Vec<ShakerChannel>,
}

impl Default for ShakerBank {
  fn default() -> Self {
    Self {
      channels: vec![ShakerChannel::default()],
    }
  }
}

impl ShakerBank {
  pub fn len(&self) -> usize {
    self.channels.len()
  }

  /// Whether `id` refers to a channel that can be operated on.
  pub fn is_accessible(&self, id: ChannelId) -> bool {
    id == ChannelId::DEFAULT || self.channels.get(id.index()).is_some_and(ShakerChannel::is_bound)
  }

  pub fn channel(&self, id: ChannelId) -> Option<&ShakerChannel> {
    self.channels.get(id.index())
  }

  /// Returns the channel for a shake operation.
  ///
  /// # Panics
  ///
  /// Panics if a non-default channel has no shaker bound.
  pub fn channel_mut(&mut self, id: ChannelId, operation: &str) -> &mut ShakerChannel {
    if !self.is_accessible(id) {
      panic!("can't {operation} on uninitialized shaker channel {id}");
    }
    &mut self.channels[id.index()]
  }

  pub fn shaker(&self, id: ChannelId) -> Option<&dyn Shaker> {
    self.channels.get(id.index())?.shaker.as_deref()
  }

  /// Binds `shaker` to channel `id`, or unbinds it when `None`.
  ///
  /// Rebinding channel zero keeps its envelope. Any other channel restarts
  /// from an idle envelope.
  pub fn bind(&mut self, shaker: Option<Box<dyn Shaker>>, id: ChannelId) {
    let index = id.index();
    if index == 0 {
      self.channels[0].shaker = shaker;
      return;
    }

    if shaker.is_none() && index >= self.channels.len() {
      return;
    }
    if index >= self.channels.len() {
      self.channels.resize_with(index + 1, ShakerChannel::default);
      debug!("shaker channels grown to {}", self.channels.len());
    }
    self.channels[index] = ShakerChannel::with_shaker(shaker);

    let before = self.channels.len();
    while self.channels.len() > 1 && self.channels.last().is_some_and(|c| !c.is_bound()) {
      self.channels.pop();
    }
    if self.channels.len() != before {
      debug!("shaker channels trimmed to {}", self.channels.len());
    }
  }

  /// Whether the given channel is shaking, or any channel when `id` is
  /// `None`.
  pub fn is_shaking(&self, id: Option<ChannelId>) -> bool {
    match id {
      Some(id) => self.channels.get(id.index()).is_some_and(ShakerChannel::is_shaking),
      None => self.channels.iter().any(ShakerChannel::is_shaking),
    }
  }

  /// Updates every channel and returns the summed offset.
  ///
  /// `fallback` is only instantiated when the unbound default channel has
  /// work to do.
  pub fn update(&mut self, fallback: &mut Option<Random>, tick_delta: u64, ctx: &ViewContext) -> DVec2 {
    let mut offset = DVec2::ZERO;
    for (index, channel) in self.channels.iter_mut().enumerate() {
      if !channel.needs_update() {
        continue;
      }
      if index == 0 && !channel.is_bound() {
        let fallback: &mut dyn Shaker = fallback.get_or_insert_with(Random::default);
        channel.update(Some(fallback), tick_delta, ctx);
      } else {
        channel.update(None, tick_delta, ctx);
      }
      offset += channel.offset();
    }
    offset
  }
}
