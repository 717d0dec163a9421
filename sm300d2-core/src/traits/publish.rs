//! Publish Trait
//!
//! Receives a smoothed value every `PUBLISH_EVERY` ingests of a channel.
//! Closures work directly:
//!
//! ```rust
//! use sm300d2_core::{Channel, Publisher};
//!
//! let mut last = None;
//! let mut publisher = |channel: Channel, value: f32| last = Some((channel, value));
//! publisher.publish(Channel::Co2, 512.0);
//! assert_eq!(last, Some((Channel::Co2, 512.0)));
//! ```

use crate::channel::Channel;

/// Sink for smoothed channel values
pub trait Publisher {
    /// Deliver the current smoothed value of `channel`
    fn publish(&mut self, channel: Channel, value: f32);
}

impl<F: FnMut(Channel, f32)> Publisher for F {
    fn publish(&mut self, channel: Channel, value: f32) {
        self(channel, value)
    }
}
