//! Print the wire-level waveform for a small frame, then decode it back.
//!
//! Runs on the host against the capture shifter; `#` is a HIGH subunit and
//! `_` is LOW, with one space between logical bits.
//!
//! ```text
//! cargo run --bin demo_waveform --features host
//! ```

use std::error::Error;

use shift_strip::decode::PulseDecoder;
use shift_strip::shifter::CaptureShifter;
use shift_strip::strip::{Frame1d, LedStrip, StripConfig, colors};
use shift_strip::timing::TimingProfile;
use shift_strip::transform::Gamma;

fn main() -> Result<(), Box<dyn Error>> {
    let profile = TimingProfile::active();
    println!(
        "profile: {} subunits of {} ns per bit ({} ns cycle, {} pulse bytes per color byte)",
        profile.subunit_count(),
        profile.subunit_ns(),
        profile.cycle_ns(),
        profile.expanded_bytes(),
    );

    let mut frame: Frame1d<2> = Frame1d::new();
    frame[0] = colors::RED;
    frame[1] = colors::BLUE;

    let capture: CaptureShifter<128> = CaptureShifter::new();
    let config = StripConfig {
        gamma: Gamma::Linear,
        ..StripConfig::default()
    };
    let mut strip = LedStrip::new(capture, profile, config)?;
    let stats = strip.write_frame(&frame);
    println!(
        "transmitted {} data bytes + {} flush bytes; {} interrupt windows, longest masked run {} deposits",
        stats.data_bytes, stats.flush_bytes, stats.windows_opened, stats.longest_masked_run,
    );

    let capture = strip.into_shifter();
    let decoder = PulseDecoder::new(profile);
    let data = decoder.strip_flush(capture.bytes())?;

    let subunit_count = profile.subunit_count() as usize;
    println!();
    for (byte_index, chunk) in data.chunks(profile.expanded_bytes()).enumerate() {
        let mut line = String::new();
        for subunit_index in 0..chunk.len() * 8 {
            if subunit_index > 0 && subunit_index % subunit_count == 0 {
                line.push(' ');
            }
            let subunit = (chunk[subunit_index / 8] >> (7 - subunit_index % 8)) & 1;
            line.push(if subunit == 1 { '#' } else { '_' });
        }
        println!("color byte {byte_index:2}: {line}");
    }
    println!();

    let decoded = decoder.decode(data)?;
    println!("decoded back: {decoded:?}");
    Ok(())
}
