//! Byte sources for the decoder
//!
//! - `queue` - heapless ring buffer fed from a UART interrupt or a capture
//! - `io` - adapter over `std::io::Read` (requires `transport-io`)

mod queue;

#[cfg(feature = "transport-io")]
mod io;

pub use queue::ByteQueue;

#[cfg(feature = "transport-io")]
pub use io::IoByteSource;
