//! Traits at the edges of the core
//!
//! The decoder and filters never touch hardware or the host framework
//! directly. Two traits sit at those seams:
//!
//! - [`ByteSource`] - where frame bytes come from (UART driver, ring buffer,
//!   `std::io::Read` handle, test script)
//! - [`Publisher`] - where smoothed values go (host sensor entities, MQTT,
//!   a log line)
//!
//! Both are used through generics, so the monitor monomorphizes to direct
//! calls on embedded targets.

mod publish;
mod source;

pub use publish::Publisher;
pub use source::ByteSource;
