//! Replay a Recorded UART Capture
//!
//! Feeds a synthetic capture through the monitor exactly as a UART
//! interrupt would: a few bytes at a time, with line noise, a glitched frame
//! and a stalled transfer mixed in.
//!
//! ## What You'll Learn
//!
//! - Feeding a `ByteQueue` and ticking the monitor
//! - How each failure mode shows up
//! - Reading smoothed values and decode statistics
//!
//! ## Running the Example
//!
//! ```bash
//! RUST_LOG=debug cargo run --example 01_replay_capture
//! ```

use sm300d2_core::{
    frame::checksum,
    AirQualityMonitor, ByteQueue, Channel,
};

/// Build a frame with a valid checksum
fn frame(co2: u16, pm25: u16, temp: (u8, u8), humidity: (u8, u8)) -> [u8; 17] {
    let mut bytes = [
        0x3C, 0x02, 0, 0, 0x00, 0x0A, 0x00, 0x14, 0, 0, 0x00, 0x08,
        temp.0, temp.1, humidity.0, humidity.1, 0,
    ];
    bytes[2..4].copy_from_slice(&co2.to_be_bytes());
    bytes[8..10].copy_from_slice(&pm25.to_be_bytes());
    bytes[16] = checksum(&bytes[..16]);
    bytes
}

fn main() {
    env_logger::init();

    println!("SM300D2 Capture Replay");
    println!("======================\n");

    // Short window so the replay publishes a few times
    let mut monitor: AirQualityMonitor<_, 10, 5> =
        AirQualityMonitor::new(|channel: Channel, value: f32| {
            println!("  publish {:>11} = {:8.1} {}", channel, value, channel.unit());
        });
    let mut uart: ByteQueue<128> = ByteQueue::new();

    for tick in 0..20u16 {
        // What arrived on the line since the last tick
        match tick {
            3 => {
                uart.feed(&[0xFF, 0x00, 0x13]);
                uart.feed(&frame(480 + tick, 12, (21, 4), (55, 0)));
            }
            7 => {
                let mut glitched = frame(480 + tick, 12, (21, 4), (55, 0));
                glitched[9] ^= 0x10;
                uart.feed(&glitched);
            }
            11 => {
                // Sensor firmware hiccup: checksum fine, CO2 impossible
                uart.feed(&frame(60000, 12, (21, 4), (55, 0)));
            }
            14 => {
                uart.feed(&frame(480 + tick, 12, (21, 4), (55, 0))[..9]);
            }
            _ => {
                uart.feed(&frame(480 + tick, 10 + tick % 4, (21, 4 + (tick % 3) as u8), (55, 0)));
            }
        }

        match monitor.tick(&mut uart) {
            Ok(m) => println!("tick {:2}: co2={} pm25={} t={:.1}", tick, m.co2, m.pm25, m.temperature),
            Err(e) => println!("tick {:2}: {} ({} in a row)", tick, e, monitor.consecutive_errors()),
        }
    }

    let stats = monitor.stats().clone();
    println!("\nDecode statistics:");
    println!("  decoded:     {}", stats.frames_decoded);
    println!("  sync errors: {}", stats.sync_errors);
    println!("  short reads: {}", stats.short_reads);
    println!("  checksum:    {}", stats.checksum_errors);
    println!("  implausible: {}", stats.implausible_frames);
    println!("  flushes:     {}", stats.flushes);

    println!("\nSmoothed values:");
    for channel in Channel::ALL {
        if let Some(value) = monitor.value(channel) {
            println!("  {:>11}: {:8.1} {}", channel, value, channel.unit());
        }
    }
}
