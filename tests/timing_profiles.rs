#![allow(missing_docs)]
//! Host-level tests for timing profile validation and pulse arithmetic.

use shift_strip::Error;
use shift_strip::shifter::CaptureShifter;
use shift_strip::strip::{LedStrip, StripConfig};
use shift_strip::timing::{PROFILE_5A, PROFILE_5B, PROFILE_10, TimingProfile, WS2812_WINDOWS};

#[test]
fn builtin_profiles_expose_expected_pulse_widths() {
    assert_eq!(PROFILE_10.subunit_count(), 10);
    assert_eq!(PROFILE_10.subunit_ns(), 125);
    assert_eq!(PROFILE_10.high_run(false), 3);
    assert_eq!(PROFILE_10.high_run(true), 7);
    assert_eq!(PROFILE_10.high_ns(false), 375);
    assert_eq!(PROFILE_10.low_ns(false), 875);
    assert_eq!(PROFILE_10.high_ns(true), 875);
    assert_eq!(PROFILE_10.low_ns(true), 375);
    assert_eq!(PROFILE_10.cycle_ns(), 1250);
    assert_eq!(PROFILE_10.expanded_bytes(), 10);

    assert_eq!(PROFILE_5A.subunit_count(), 5);
    assert_eq!(PROFILE_5A.high_run(false), 2);
    assert_eq!(PROFILE_5A.high_run(true), 3);
    assert_eq!(PROFILE_5A.high_ns(false), 500);
    assert_eq!(PROFILE_5A.low_ns(false), 750);
    assert_eq!(PROFILE_5A.high_ns(true), 750);
    assert_eq!(PROFILE_5A.low_ns(true), 500);
    assert_eq!(PROFILE_5A.cycle_ns(), 1250);
    assert_eq!(PROFILE_5A.expanded_bytes(), 5);

    assert_eq!(PROFILE_5B.subunit_count(), 5);
    assert_eq!(PROFILE_5B.high_run(false), 1);
    assert_eq!(PROFILE_5B.high_run(true), 4);
    assert_eq!(PROFILE_5B.high_ns(false), 250);
    assert_eq!(PROFILE_5B.low_ns(false), 1000);
    assert_eq!(PROFILE_5B.high_ns(true), 1000);
    assert_eq!(PROFILE_5B.low_ns(true), 250);
    assert_eq!(PROFILE_5B.cycle_ns(), 1250);
    assert_eq!(PROFILE_5B.expanded_bytes(), 5);
}

#[test]
fn builtin_profiles_meet_ws2812_windows() {
    assert!(PROFILE_10.check(&WS2812_WINDOWS).is_ok());
    assert!(PROFILE_5A.check(&WS2812_WINDOWS).is_ok());
    assert!(PROFILE_5B.check(&WS2812_WINDOWS).is_ok());
}

#[test]
fn try_new_rejects_out_of_range_count() {
    assert_eq!(
        TimingProfile::try_new(1, 0b1, 0b1, 125),
        Err(Error::SubunitCountOutOfRange { count: 1 })
    );
    assert_eq!(
        TimingProfile::try_new(11, 0b110_0000_0000, 0b111_0000_0000, 125),
        Err(Error::SubunitCountOutOfRange { count: 11 })
    );
}

#[test]
fn try_new_rejects_non_leading_run_masks() {
    // Split run.
    assert_eq!(
        TimingProfile::try_new(5, 0b10100, 0b11110, 250),
        Err(Error::MaskNotLeadingRun { mask: 0b10100 })
    );
    // No LOW tail.
    assert_eq!(
        TimingProfile::try_new(5, 0b11000, 0b11111, 250),
        Err(Error::MaskNotLeadingRun { mask: 0b11111 })
    );
    // Wider than the subunit count.
    assert_eq!(
        TimingProfile::try_new(5, 0b11000, 0b110000, 250),
        Err(Error::MaskNotLeadingRun { mask: 0b110000 })
    );
    // All LOW.
    assert_eq!(
        TimingProfile::try_new(5, 0, 0b11100, 250),
        Err(Error::MaskNotLeadingRun { mask: 0 })
    );
}

#[test]
fn try_new_rejects_indistinct_shapes() {
    // 0-bit HIGH run at least as long as the 1-bit run.
    assert_eq!(
        TimingProfile::try_new(5, 0b11100, 0b11000, 250),
        Err(Error::PulseShapesIndistinct)
    );
    // 1-bit HIGH run under half the cycle.
    assert_eq!(
        TimingProfile::try_new(5, 0b10000, 0b11000, 250),
        Err(Error::PulseShapesIndistinct)
    );
    // 0-bit LOW tail under half the cycle.
    assert_eq!(
        TimingProfile::try_new(10, 0b11_1111_1100, 0b11_1111_1110, 125),
        Err(Error::PulseShapesIndistinct)
    );
}

#[test]
#[should_panic(expected = "subunit count must be between 2 and 10")]
fn new_panics_on_bad_count() {
    let _ = TimingProfile::new(1, 0b1, 0b1, 125);
}

#[test]
#[should_panic(expected = "pulse mask must be a leading HIGH run")]
fn new_panics_on_non_leading_run() {
    let _ = TimingProfile::new(5, 0b10100, 0b11110, 250);
}

#[test]
#[should_panic(expected = "pulse shapes for logical 0 and 1 must be distinguishable")]
fn new_panics_on_indistinct_shapes() {
    let _ = TimingProfile::new(5, 0b11100, 0b11000, 250);
}

#[test]
fn check_flags_out_of_window_zero_bit() {
    // 500 ns subunits push the 0-bit LOW tail to 1500 ns.
    let profile = TimingProfile::try_new(4, 0b1000, 0b1110, 500).unwrap();
    assert_eq!(
        profile.check(&WS2812_WINDOWS),
        Err(Error::PulseOutOfWindow { bit: 0 })
    );
}

#[test]
fn check_flags_out_of_window_one_bit() {
    // The 0-bit just fits (550/825 ns); the 1-bit HIGH reaches 1100 ns.
    let profile = TimingProfile::try_new(5, 0b11000, 0b11110, 275).unwrap();
    assert_eq!(
        profile.check(&WS2812_WINDOWS),
        Err(Error::PulseOutOfWindow { bit: 1 })
    );
}

#[test]
fn strip_rejects_out_of_window_profile() {
    let profile = TimingProfile::try_new(4, 0b1000, 0b1110, 500).unwrap();
    let result = LedStrip::new(CaptureShifter::<16>::new(), profile, StripConfig::default());
    assert_eq!(result.err(), Some(Error::PulseOutOfWindow { bit: 0 }));
}

#[test]
fn custom_profile_passes_windows_and_round_trips() {
    use shift_strip::decode::PulseDecoder;
    use shift_strip::expand::BitExpander;

    // 300 ns subunits keep every segment inside the WS2812 windows.
    let profile = TimingProfile::try_new(4, 0b1000, 0b1110, 300).unwrap();
    assert!(profile.check(&WS2812_WINDOWS).is_ok());
    assert_eq!(profile.expanded_bytes(), 4);

    let stream: Vec<u8> = BitExpander::new(profile).expand(0xC8).collect();
    assert_eq!(stream.len(), 4);
    let decoded = PulseDecoder::new(profile).decode(&stream).unwrap();
    assert_eq!(decoded, [0xC8]);
}
