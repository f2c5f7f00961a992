//! Host-side decoder that reads pulse byte streams back into color bytes.
//!
//! The decoder is the independent inverse of [`BitExpander`]: it knows the
//! profile's pulse shapes but none of the expander's fragment machinery, so
//! a round trip through both exercises the wire format itself. Available
//! with the `host` feature for tests and tooling; never needed on a target.
//!
//! [`BitExpander`]: crate::expand::BitExpander

use std::error::Error;

use crate::shifter::FLUSH_LEN;
use crate::timing::TimingProfile;

/// Reinterprets a physical byte stream under a profile's pulse semantics.
#[derive(Clone, Copy, Debug)]
pub struct PulseDecoder {
    profile: TimingProfile,
}

impl PulseDecoder {
    /// A decoder for streams produced under `profile`.
    #[must_use]
    pub const fn new(profile: TimingProfile) -> Self {
        Self { profile }
    }

    /// Decode a pulse byte stream back into the color bytes that produced it.
    ///
    /// The stream is split into `subunit_count`-wide slots, each slot must
    /// be a leading HIGH run followed by LOW, and the run length must match
    /// one of the profile's two pulse shapes.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream length does not cover a whole number
    /// of color bytes, if a slot's HIGH subunits are not contiguous from the
    /// start, or if a HIGH run length matches neither pulse shape.
    pub fn decode(&self, stream: &[u8]) -> Result<Vec<u8>, Box<dyn Error>> {
        let count = self.profile.subunit_count() as usize;
        if stream.len() % count != 0 {
            return Err(format!(
                "stream of {} bytes is not a whole number of color bytes ({count} bytes each)",
                stream.len()
            )
            .into());
        }

        let run0 = self.profile.high_run(false);
        let run1 = self.profile.high_run(true);
        let slots = stream.len() * 8 / count;
        let mut bits = Vec::with_capacity(slots);
        for slot in 0..slots {
            let mut high_run = 0u8;
            let mut in_run = true;
            for offset in 0..count {
                let position = slot * count + offset;
                let subunit = (stream[position / 8] >> (7 - position % 8)) & 1;
                if subunit == 1 {
                    if !in_run {
                        return Err(
                            format!("slot {slot}: HIGH subunit after the LOW tail began").into()
                        );
                    }
                    high_run += 1;
                } else {
                    in_run = false;
                }
            }
            if high_run == run1 {
                bits.push(true);
            } else if high_run == run0 {
                bits.push(false);
            } else {
                return Err(format!(
                    "slot {slot}: HIGH run of {high_run} matches neither shape ({run0} or {run1})"
                )
                .into());
            }
        }

        // slots is a multiple of 8 whenever the length check above passes.
        let bytes = bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .fold(0u8, |byte, &bit| (byte << 1) | u8::from(bit))
            })
            .collect();
        Ok(bytes)
    }

    /// Verify and remove the trailing idle flush, returning the data bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream is shorter than the flush or if any
    /// flush byte is nonzero.
    pub fn strip_flush<'a>(&self, stream: &'a [u8]) -> Result<&'a [u8], Box<dyn Error>> {
        if stream.len() < FLUSH_LEN {
            return Err(format!(
                "stream of {} bytes is shorter than the {FLUSH_LEN}-byte idle flush",
                stream.len()
            )
            .into());
        }
        let (data, flush) = stream.split_at(stream.len() - FLUSH_LEN);
        if flush.iter().any(|&byte| byte != 0) {
            return Err(format!("idle flush is not all zeros: {flush:?}").into());
        }
        Ok(data)
    }
}
