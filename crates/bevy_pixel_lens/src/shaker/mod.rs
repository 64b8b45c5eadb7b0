//! Screen shake.
//!
//! Shakes run on channels. Each channel is an independent fade-in / sustain /
//! fade-out envelope optionally bound to a [`Shaker`] that turns the
//! envelope's activity level into a logical camera offset. The camera sums
//! the offsets of all channels every tick.
//!
//! Channel zero always exists and falls back to a default [`Random`] shaker
//! when unbound. Other channels exist only while a shaker is bound to them.
//!
//! # Channels
//!
//! Multiple channels are useful when shakes of different nature overlap:
//!
//! - an always-on shake for a rocking ship or a hot air balloon,
//! - momentary triggered shakes for impacts and explosions,
//! - altered states like being dizzy.
//!
//! ```ignore
//! const CHAN_AMBIENT: ChannelId = ChannelId(1);
//!
//! camera.set_shaker(Some(Box::new(Random::default())), &[CHAN_AMBIENT]);
//! camera.start_shake(60, &[CHAN_AMBIENT]);
//! camera.trigger_shake(4, 10, 20, &[]); // channel zero
//! ```

mod bank;
mod channel;
mod random;

use bevy::math::DVec2;
pub use bank::ShakerBank;
pub use channel::ShakerChannel;
pub use random::Random;

use crate::context::ViewContext;

/// Trait for screen shake strategies.
///
/// `level` moves linearly between 0 and 1 during fades. After a shake stops,
/// there is exactly one call with `level == 0.0` that implementations can use
/// to reset internal state; its result is discarded.
pub trait Shaker: Send + Sync + 'static {
  /// Returns the logical camera offset for the given activity level.
  fn offsets(&mut self, level: f64, ctx: &ViewContext) -> DVec2;
}

/// Identifier of a shake channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(pub u8);

impl ChannelId {
  /// The default channel, used when no channel is passed explicitly.
  pub const DEFAULT: Self = Self(0);

  pub fn index(self) -> usize {
    usize::from(self.0)
  }
}

impl std::fmt::Display for ChannelId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "#{}", self.0)
  }
}
