//! `std::io::Read` byte source
//!
//! Adapts a blocking reader with a read timeout, typically a serial port
//! handle opened by the host, to [`ByteSource`]. Opening and configuring the
//! port (9600 8N1, timeout) stays with the host.
//!
//! | reader outcome                   | maps to             |
//! |----------------------------------|---------------------|
//! | `Ok(0)` (EOF)                    | `WouldBlock`        |
//! | `WouldBlock`, `TimedOut`         | `WouldBlock`        |
//! | `Interrupted`                    | retried             |
//! | any other error                  | `Other(io::Error)`  |
//!
//! ```rust,no_run
//! use std::fs::File;
//! use sm300d2_core::{FrameDecoder, IoByteSource};
//!
//! let port = File::open("/dev/ttyUSB0")?;
//! let mut source = IoByteSource::new(port);
//! let mut decoder = FrameDecoder::new();
//! let _ = decoder.decode(&mut source);
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, Read};

use crate::traits::ByteSource;

/// Upper bound on bytes discarded by one `flush`
///
/// A sensor that never stops talking must not pin the tick in the drain loop.
pub const FLUSH_DRAIN_LIMIT: usize = 256;

/// Statistics for an I/O byte source
#[derive(Debug, Default, Clone)]
pub struct IoSourceStats {
    /// Bytes handed to the decoder
    pub bytes_read: usize,
    /// Bytes thrown away by `flush`
    pub bytes_flushed: usize,
    /// Reader errors other than timeouts
    pub transport_errors: usize,
}

/// [`ByteSource`] over any `std::io::Read`
pub struct IoByteSource<R: Read> {
    reader: R,
    stats: IoSourceStats,
}

impl<R: Read> IoByteSource<R> {
    /// Wrap a reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            stats: IoSourceStats::default(),
        }
    }

    /// Get statistics
    pub fn stats(&self) -> &IoSourceStats {
        &self.stats
    }

    /// Borrow the underlying reader
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Unwrap the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// One read call into `buf`, with timeouts and EOF folded into `WouldBlock`
    fn read_some(&mut self, buf: &mut [u8]) -> nb::Result<usize, io::Error> {
        loop {
            match self.reader.read(buf) {
                Ok(0) => return Err(nb::Error::WouldBlock),
                Ok(n) => {
                    self.stats.bytes_read += n;
                    return Ok(n);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if is_timeout(&e) => return Err(nb::Error::WouldBlock),
                Err(e) => {
                    self.stats.transport_errors += 1;
                    return Err(nb::Error::Other(e));
                }
            }
        }
    }
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
}

impl<R: Read> ByteSource for IoByteSource<R> {
    type Error = io::Error;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        let mut byte = [0u8; 1];
        self.read_some(&mut byte)?;
        Ok(byte[0])
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> nb::Result<(), Self::Error> {
        let mut filled = 0;
        while filled < buf.len() {
            filled += self.read_some(&mut buf[filled..])?;
        }
        Ok(())
    }

    fn flush(&mut self) {
        let mut scratch = [0u8; 32];
        let mut drained = 0;
        while drained < FLUSH_DRAIN_LIMIT {
            let want = scratch.len().min(FLUSH_DRAIN_LIMIT - drained);
            match self.read_some(&mut scratch[..want]) {
                Ok(n) => drained += n,
                Err(_) => break,
            }
        }
        // Drained bytes never reached the decoder
        self.stats.bytes_read -= drained;
        self.stats.bytes_flushed += drained;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Reader that times out once its script is exhausted
    struct TimeoutReader {
        data: Cursor<Vec<u8>>,
    }

    impl Read for TimeoutReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::TimedOut, "timeout")),
                n => Ok(n),
            }
        }
    }

    /// Reader that hands out one byte per call
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.split_first() {
                Some((&b, rest)) if !buf.is_empty() => {
                    buf[0] = b;
                    self.0 = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    #[test]
    fn timeout_maps_to_would_block() {
        let mut source = IoByteSource::new(TimeoutReader { data: Cursor::new(vec![7]) });
        assert_eq!(source.read_byte().ok(), Some(7));
        assert!(matches!(source.read_byte(), Err(nb::Error::WouldBlock)));
    }

    #[test]
    fn read_exact_assembles_partial_reads() {
        let mut source = IoByteSource::new(Trickle(&[1, 2, 3, 4]));
        let mut buf = [0u8; 3];
        assert!(source.read_exact(&mut buf).is_ok());
        assert_eq!(buf, [1, 2, 3]);
        assert_eq!(source.stats().bytes_read, 3);
    }

    #[test]
    fn short_block_is_would_block() {
        let mut source = IoByteSource::new(Trickle(&[1, 2]));
        let mut buf = [0u8; 3];
        assert!(matches!(source.read_exact(&mut buf), Err(nb::Error::WouldBlock)));
    }

    #[test]
    fn flush_is_bounded() {
        let mut source = IoByteSource::new(io::repeat(0xAA));
        source.flush();
        assert_eq!(source.stats().bytes_flushed, FLUSH_DRAIN_LIMIT);
        assert_eq!(source.stats().bytes_read, 0);
    }

    #[test]
    fn other_errors_surface() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged"))
            }
        }

        let mut source = IoByteSource::new(Broken);
        assert!(matches!(source.read_byte(), Err(nb::Error::Other(_))));
        assert_eq!(source.stats().transport_errors, 1);
    }
}
