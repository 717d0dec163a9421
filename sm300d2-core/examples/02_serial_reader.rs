//! Poll a Serial Device
//!
//! Reads an already configured serial device (9600 8N1, set up with
//! `stty` or the host) through `IoByteSource` and ticks the monitor on the
//! sensor's reference 2 s period.
//!
//! ## Running the Example
//!
//! ```bash
//! stty -F /dev/ttyUSB0 9600 raw -echo min 0 time 5
//! RUST_LOG=info cargo run --example 02_serial_reader --features transport-io -- /dev/ttyUSB0
//! ```

use std::fs::File;
use std::thread;
use std::time::Duration;

use sm300d2_core::{
    constants::DEFAULT_POLL_INTERVAL_MS,
    AirQualityMonitor, Channel, IoByteSource,
};

fn main() -> std::io::Result<()> {
    env_logger::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "/dev/ttyUSB0".to_string());
    let mut source = IoByteSource::new(File::open(&path)?);

    let mut monitor: AirQualityMonitor<_> = AirQualityMonitor::new(|channel: Channel, value: f32| {
        log::info!("{} = {:.1} {}", channel, value, channel.unit());
    });

    log::info!("Polling {} every {} ms", path, DEFAULT_POLL_INTERVAL_MS);
    loop {
        if let Ok(m) = monitor.tick(&mut source) {
            log::debug!("raw frame: {:?}", m);
        }
        thread::sleep(Duration::from_millis(u64::from(DEFAULT_POLL_INTERVAL_MS)));
    }
}
