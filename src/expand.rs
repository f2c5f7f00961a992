//! The byte-to-bitstream expansion engine.
//!
//! One color byte becomes `8 × subunit_count` physical subunits, emitted
//! MSB-first as whole bytes. Because 5 and 10 do not divide 8, a logical
//! bit's pattern usually straddles an output-byte boundary; the expander
//! handles this with a fragment table built once at construction and a
//! 32-bit streaming accumulator, so the hot loop only indexes and ORs.
//!
//! `8 × subunit_count` is always a whole number of bytes, so every color
//! byte flushes completely: no accumulator state ever crosses a color-byte
//! boundary, and expanding a buffer byte-by-byte produces the identical
//! stream to expanding it in one pass.

use crate::timing::TimingProfile;

// ============================================================================
// BitExpander
// ============================================================================

/// Expands color bytes into the physical byte stream for one profile.
///
/// # Example
///
/// ```
/// use shift_strip::expand::BitExpander;
/// use shift_strip::timing::PROFILE_5B;
///
/// let expander = BitExpander::new(PROFILE_5B);
/// let stream: Vec<u8> = expander.expand(0b1100_1000).collect();
/// assert_eq!(
///     stream,
///     [0b1111_0111, 0b1010_0001, 0b0000_1111, 0b0100_0010, 0b0001_0000]
/// );
/// ```
#[derive(Clone, Copy, Debug)]
pub struct BitExpander {
    // fragments[phase][bit]: the bit's pattern, MSB-aligned, shifted right
    // by the phase offset within the current output byte.
    fragments: [[u32; 2]; 8],
    subunit_count: u8,
}

impl BitExpander {
    /// Precompute the fragment table for `profile`.
    #[must_use]
    pub const fn new(profile: TimingProfile) -> Self {
        let count = profile.subunit_count();
        let pattern0 = (profile.high_mask(false) as u32) << (32 - count as u32);
        let pattern1 = (profile.high_mask(true) as u32) << (32 - count as u32);
        let mut fragments = [[0u32; 2]; 8];
        let mut phase = 0;
        while phase < 8 {
            fragments[phase][0] = pattern0 >> phase;
            fragments[phase][1] = pattern1 >> phase;
            phase += 1;
        }
        Self {
            fragments,
            subunit_count: count,
        }
    }

    /// Subunits emitted per logical bit.
    #[must_use]
    pub const fn subunit_count(&self) -> u8 {
        self.subunit_count
    }

    /// Expand one color byte into its physical bytes, MSB-first.
    ///
    /// The returned iterator computes each output byte on demand from the
    /// few logical bits whose patterns overlap it plus the carried tail of
    /// the previous fragment, and always yields exactly
    /// [`subunit_count`](Self::subunit_count) bytes.
    #[must_use]
    pub const fn expand(&self, value: u8) -> Expansion<'_> {
        Expansion {
            fragments: &self.fragments,
            subunit_count: self.subunit_count,
            value,
            acc: 0,
            filled: 0,
            bit_index: 0,
            remaining: self.subunit_count,
        }
    }
}

// ============================================================================
// Expansion
// ============================================================================

/// Streaming expansion of one color byte; created by [`BitExpander::expand`].
///
/// Implements [`ExactSizeIterator`]: `len()` reports the output bytes not
/// yet produced.
#[derive(Clone, Debug)]
pub struct Expansion<'a> {
    fragments: &'a [[u32; 2]; 8],
    subunit_count: u8,
    value: u8,
    // Pending subunits, MSB-aligned: bit 31 is the next subunit to emit.
    acc: u32,
    filled: u8,
    bit_index: u8,
    remaining: u8,
}

impl Iterator for Expansion<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.remaining == 0 {
            return None;
        }
        // Consume logical bits until a full output byte is pending. With
        // remaining > 0 there is always another bit while filled < 8.
        while self.filled < 8 {
            let bit = (self.value >> (7 - self.bit_index)) & 1;
            self.acc |= self.fragments[self.filled as usize][bit as usize];
            self.filled += self.subunit_count;
            self.bit_index += 1;
        }
        let byte = (self.acc >> 24) as u8;
        self.acc <<= 8;
        self.filled -= 8;
        self.remaining -= 1;
        Some(byte)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.remaining);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Expansion<'_> {}

impl core::iter::FusedIterator for Expansion<'_> {}
