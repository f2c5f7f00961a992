#![allow(missing_docs)]
//! Host-level tests pairing the bit expander with the pulse decoder.

use shift_strip::decode::PulseDecoder;
use shift_strip::expand::BitExpander;
use shift_strip::shifter::CaptureShifter;
use shift_strip::strip::{LedStrip, StripConfig};
use shift_strip::timing::{PROFILE_5A, PROFILE_5B, PROFILE_10};
use shift_strip::transform::Gamma;

#[test]
fn every_value_round_trips_under_every_profile() {
    for profile in [PROFILE_10, PROFILE_5A, PROFILE_5B] {
        let expander = BitExpander::new(profile);
        let decoder = PulseDecoder::new(profile);
        for value in 0..=255u8 {
            let stream: Vec<u8> = expander.expand(value).collect();
            assert_eq!(stream.len(), profile.expanded_bytes());
            let decoded = decoder.decode(&stream).unwrap();
            assert_eq!(decoded, [value]);
        }
    }
}

#[test]
fn zero_byte_expansion_matches_hand_computed_pattern() {
    // Eight 1110000000 pulses packed into ten bytes.
    let expander = BitExpander::new(PROFILE_10);
    let stream: Vec<u8> = expander.expand(0).collect();
    assert_eq!(
        stream,
        [0xE0, 0x38, 0x0E, 0x03, 0x80, 0xE0, 0x38, 0x0E, 0x03, 0x80]
    );
}

#[test]
fn wide_zero_expansion_matches_hand_computed_pattern() {
    // 165 = 0b1010_0101 over masks 11000 (0) and 11100 (1).
    let expander = BitExpander::new(PROFILE_5A);
    let stream: Vec<u8> = expander.expand(165).collect();
    assert_eq!(stream, [0xE6, 0x39, 0x8C, 0x73, 0x1C]);
}

#[test]
fn narrow_zero_expansion_matches_hand_computed_pattern() {
    // 200 = 0b1100_1000 over masks 10000 (0) and 11110 (1).
    let expander = BitExpander::new(PROFILE_5B);
    let stream: Vec<u8> = expander.expand(200).collect();
    assert_eq!(
        stream,
        [0b1111_0111, 0b1010_0001, 0b0000_1111, 0b0100_0010, 0b0001_0000]
    );
}

#[test]
fn every_slot_is_a_leading_high_run() {
    // Each logical bit's slot must start with exactly the profile's HIGH run
    // for that bit value and stay LOW for the rest of the slot.
    for profile in [PROFILE_10, PROFILE_5A, PROFILE_5B] {
        let expander = BitExpander::new(profile);
        let count = profile.subunit_count() as usize;
        for value in [0x00u8, 0xFF, 0xA5, 200] {
            let stream: Vec<u8> = expander.expand(value).collect();
            for slot in 0..8 {
                let bit = (value >> (7 - slot)) & 1 == 1;
                let high = profile.high_run(bit) as usize;
                for offset in 0..count {
                    let position = slot * count + offset;
                    let subunit = (stream[position / 8] >> (7 - position % 8)) & 1;
                    assert_eq!(
                        subunit == 1,
                        offset < high,
                        "value {value:#010b}, slot {slot}, offset {offset}"
                    );
                }
            }
        }
    }
}

#[test]
fn expansion_reports_exact_length_and_fuses() {
    let expander = BitExpander::new(PROFILE_10);
    let mut expansion = expander.expand(0xA5);
    assert_eq!(expansion.len(), 10);
    assert_eq!(expansion.size_hint(), (10, Some(10)));
    assert!(expansion.next().is_some());
    assert_eq!(expansion.len(), 9);
    let rest: Vec<u8> = expansion.by_ref().collect();
    assert_eq!(rest.len(), 9);
    assert_eq!(expansion.next(), None);
    assert_eq!(expansion.next(), None);
}

#[test]
fn color_bytes_expand_independently() {
    // Every color byte fills a whole number of output bytes, so a stream
    // expansion equals the concatenation of per-byte expansions.
    let expander = BitExpander::new(PROFILE_5A);
    let mut combined: Vec<u8> = expander.expand(200).collect();
    combined.extend(expander.expand(77));

    let config = StripConfig {
        gamma: Gamma::Linear,
        ..StripConfig::default()
    };
    let mut strip = LedStrip::new(CaptureShifter::<64>::new(), PROFILE_5A, config).unwrap();
    strip.transmit(&[200, 77]);
    let capture = strip.into_shifter();

    let decoder = PulseDecoder::new(PROFILE_5A);
    let data = decoder.strip_flush(capture.bytes()).unwrap();
    assert_eq!(data, combined.as_slice());
}

#[test]
fn multi_byte_streams_decode_in_order() {
    let expander = BitExpander::new(PROFILE_10);
    let mut stream = Vec::new();
    for value in [0u8, 255, 1, 128, 42] {
        stream.extend(expander.expand(value));
    }
    let decoded = PulseDecoder::new(PROFILE_10).decode(&stream).unwrap();
    assert_eq!(decoded, [0, 255, 1, 128, 42]);
}

#[test]
fn decoder_rejects_ragged_stream() {
    let decoder = PulseDecoder::new(PROFILE_10);
    let err = decoder.decode(&[0xE0; 7]).unwrap_err();
    assert!(err.to_string().contains("whole number of color bytes"));
}

#[test]
fn decoder_rejects_split_high_run() {
    // The zero-byte pattern under PROFILE_5B with one subunit flipped HIGH
    // after its LOW tail began (0x84 -> 0xA4).
    let decoder = PulseDecoder::new(PROFILE_5B);
    let err = decoder
        .decode(&[0xA4, 0x21, 0x08, 0x42, 0x10])
        .unwrap_err();
    assert!(err.to_string().contains("after the LOW tail"));
}

#[test]
fn decoder_rejects_unknown_run_length() {
    // First slot stretched to a 4-subunit HIGH run; PROFILE_5A knows 2 and 3.
    let decoder = PulseDecoder::new(PROFILE_5A);
    let err = decoder
        .decode(&[0xF6, 0x31, 0x8C, 0x63, 0x18])
        .unwrap_err();
    assert!(err.to_string().contains("matches neither shape"));
}

#[test]
fn strip_flush_validates_the_idle_tail() {
    let decoder = PulseDecoder::new(PROFILE_5B);
    assert!(decoder.strip_flush(&[1, 2, 3]).is_err());

    let mut stream = vec![0x84, 0x21, 0x08, 0x42, 0x10];
    stream.extend([0, 0, 0, 1]);
    assert!(decoder.strip_flush(&stream).is_err());

    let mut stream = vec![0x84, 0x21, 0x08, 0x42, 0x10];
    stream.extend([0, 0, 0, 0]);
    let data = decoder.strip_flush(&stream).unwrap();
    assert_eq!(data, [0x84, 0x21, 0x08, 0x42, 0x10]);
}
