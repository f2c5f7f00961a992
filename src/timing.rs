//! Timing profiles: how logical bits map onto serializer subunits.
//!
//! A [`TimingProfile`] fixes, for one build, how many subunits the serializer
//! emits per logical bit and which leading subunits are HIGH for a logical 0
//! and a logical 1. All three built-in profiles render the same nominal
//! 1250 ns bit cycle; they differ in how finely it is sliced and therefore in
//! which shift-clock divisor the peripheral needs:
//!
//! | Profile | Subunits/bit | Subunit | 0-bit HIGH/LOW | 1-bit HIGH/LOW |
//! |---|---|---|---|---|
//! | [`PROFILE_10`] | 10 | 125 ns | 375/875 ns | 875/375 ns |
//! | [`PROFILE_5A`] | 5 | 250 ns | 500/750 ns | 750/500 ns |
//! | [`PROFILE_5B`] | 5 | 250 ns | 250/1000 ns | 1000/250 ns |
//!
//! Exactly one profile is active per build, selected by the `profile-10`,
//! `profile-5a`, or `profile-5b` cargo feature and returned by
//! [`TimingProfile::active`]. Custom profiles can be built with
//! [`TimingProfile::new`] (const, panics on invalid parameters) or
//! [`TimingProfile::try_new`], and validated against datasheet tolerance
//! windows with [`TimingProfile::check`].

use crate::{Error, Result};

/// Fewest subunits per logical bit the expander supports.
pub const SUBUNITS_MIN: u8 = 2;

/// Most subunits per logical bit the expander supports.
pub const SUBUNITS_MAX: u8 = 10;

// ============================================================================
// TimingProfile
// ============================================================================

/// An immutable mapping from logical bit values to HIGH/LOW subunit runs.
///
/// Construction validates the shape once; every accessor afterwards is
/// infallible. Profiles are plain values: copy them, compare them, embed them
/// in `const` items.
///
/// # Example
///
/// ```
/// use shift_strip::timing::{PROFILE_10, TimingProfile, WS2812_WINDOWS};
///
/// assert_eq!(PROFILE_10.subunit_count(), 10);
/// assert_eq!(PROFILE_10.high_ns(true), 875);
/// assert_eq!(PROFILE_10.cycle_ns(), 1250);
/// assert!(PROFILE_10.check(&WS2812_WINDOWS).is_ok());
///
/// // A 4-subunit encoding for a hypothetical faster chip.
/// let custom = TimingProfile::try_new(4, 0b1000, 0b1110, 300)?;
/// assert_eq!(custom.low_ns(false), 900);
/// # Ok::<(), shift_strip::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingProfile {
    subunit_count: u8,
    high_mask0: u16,
    high_mask1: u16,
    subunit_ns: u16,
}

/// 10-subunit encoding (125 ns subunits). The standard WS2812 shape.
pub const PROFILE_10: TimingProfile = TimingProfile::new(10, 0b11_1000_0000, 0b11_1111_1000, 125);

/// 5-subunit wide-zero encoding (250 ns subunits): 0 = 500 ns HIGH.
pub const PROFILE_5A: TimingProfile = TimingProfile::new(5, 0b11000, 0b11100, 250);

/// 5-subunit narrow-zero encoding (250 ns subunits): 0 = 250 ns HIGH.
pub const PROFILE_5B: TimingProfile = TimingProfile::new(5, 0b10000, 0b11110, 250);

impl TimingProfile {
    /// Build a profile, panicking on invalid parameters.
    ///
    /// Masks are right-aligned: bit `subunit_count - 1` is the first subunit
    /// shifted out. Intended for `const` contexts, where a bad profile
    /// becomes a compile error; at runtime prefer [`Self::try_new`].
    #[must_use]
    pub const fn new(subunit_count: u8, high_mask0: u16, high_mask1: u16, subunit_ns: u16) -> Self {
        match Self::try_new(subunit_count, high_mask0, high_mask1, subunit_ns) {
            Ok(profile) => profile,
            Err(Error::SubunitCountOutOfRange { .. }) => {
                panic!("subunit count must be between 2 and 10")
            }
            Err(Error::MaskNotLeadingRun { .. }) => {
                panic!("pulse mask must be a leading HIGH run with at least one LOW subunit")
            }
            Err(Error::PulseShapesIndistinct) => {
                panic!("pulse shapes for logical 0 and 1 must be distinguishable")
            }
            Err(_) => panic!("invalid timing profile"),
        }
    }

    /// Build a profile, reporting invalid parameters as an [`Error`].
    ///
    /// The checks, in order: the subunit count is within
    /// [`SUBUNITS_MIN`]`..=`[`SUBUNITS_MAX`]; each mask is one contiguous
    /// leading HIGH run with at least one trailing LOW subunit; the 1-bit
    /// HIGH run is longer than the 0-bit HIGH run; the 1-bit HIGH run and
    /// the 0-bit LOW run each cover at least half the cycle, so a receiver
    /// sampling mid-cycle always reads the right level.
    pub const fn try_new(
        subunit_count: u8,
        high_mask0: u16,
        high_mask1: u16,
        subunit_ns: u16,
    ) -> Result<Self> {
        if subunit_count < SUBUNITS_MIN || subunit_count > SUBUNITS_MAX {
            return Err(Error::SubunitCountOutOfRange {
                count: subunit_count,
            });
        }
        let high0 = match leading_run(high_mask0, subunit_count) {
            Some(run) => run,
            None => return Err(Error::MaskNotLeadingRun { mask: high_mask0 }),
        };
        let high1 = match leading_run(high_mask1, subunit_count) {
            Some(run) => run,
            None => return Err(Error::MaskNotLeadingRun { mask: high_mask1 }),
        };
        let low0 = subunit_count - high0;
        if high0 >= high1 || high1 * 2 < subunit_count || low0 * 2 < subunit_count {
            return Err(Error::PulseShapesIndistinct);
        }
        Ok(Self {
            subunit_count,
            high_mask0,
            high_mask1,
            subunit_ns,
        })
    }

    /// The profile selected by this build's `profile-*` feature.
    #[cfg(feature = "profile-10")]
    #[must_use]
    pub const fn active() -> Self {
        PROFILE_10
    }

    /// The profile selected by this build's `profile-*` feature.
    #[cfg(feature = "profile-5a")]
    #[must_use]
    pub const fn active() -> Self {
        PROFILE_5A
    }

    /// The profile selected by this build's `profile-*` feature.
    #[cfg(feature = "profile-5b")]
    #[must_use]
    pub const fn active() -> Self {
        PROFILE_5B
    }

    /// Subunits emitted per logical bit.
    #[must_use]
    pub const fn subunit_count(&self) -> u8 {
        self.subunit_count
    }

    /// Nominal duration of one subunit in nanoseconds.
    #[must_use]
    pub const fn subunit_ns(&self) -> u16 {
        self.subunit_ns
    }

    /// The HIGH mask for a logical bit value, right-aligned to the count.
    #[must_use]
    pub const fn high_mask(&self, bit: bool) -> u16 {
        if bit { self.high_mask1 } else { self.high_mask0 }
    }

    /// Leading HIGH subunits for a logical bit value.
    #[must_use]
    pub const fn high_run(&self, bit: bool) -> u8 {
        self.high_mask(bit).count_ones() as u8
    }

    /// Trailing LOW subunits for a logical bit value.
    #[must_use]
    pub const fn low_run(&self, bit: bool) -> u8 {
        self.subunit_count - self.high_run(bit)
    }

    /// Nominal HIGH pulse width for a logical bit value, in nanoseconds.
    #[must_use]
    pub const fn high_ns(&self, bit: bool) -> u32 {
        self.high_run(bit) as u32 * self.subunit_ns as u32
    }

    /// Nominal LOW tail width for a logical bit value, in nanoseconds.
    #[must_use]
    pub const fn low_ns(&self, bit: bool) -> u32 {
        self.low_run(bit) as u32 * self.subunit_ns as u32
    }

    /// Nominal duration of one full bit cycle, in nanoseconds.
    #[must_use]
    pub const fn cycle_ns(&self) -> u32 {
        self.subunit_count as u32 * self.subunit_ns as u32
    }

    /// Output bytes produced per color byte (8 bits × count subunits ÷ 8).
    #[must_use]
    pub const fn expanded_bytes(&self) -> usize {
        self.subunit_count as usize
    }

    /// Verify this profile's nominal pulse widths against tolerance windows.
    ///
    /// LED chip sub-revisions disagree about the exact windows, so the
    /// windows are a parameter rather than an assumption baked in here;
    /// [`WS2812_WINDOWS`] carries the common WS2812 set.
    pub const fn check(&self, windows: &PulseWindows) -> Result<()> {
        if !windows.high0.contains(self.high_ns(false)) || !windows.low0.contains(self.low_ns(false))
        {
            return Err(Error::PulseOutOfWindow { bit: 0 });
        }
        if !windows.high1.contains(self.high_ns(true)) || !windows.low1.contains(self.low_ns(true)) {
            return Err(Error::PulseOutOfWindow { bit: 1 });
        }
        Ok(())
    }
}

/// Length of the leading HIGH run if `mask` is exactly one such run (with a
/// LOW tail) within a `count`-bit field, else `None`.
const fn leading_run(mask: u16, count: u8) -> Option<u8> {
    if mask == 0 || (mask >> count) != 0 {
        return None;
    }
    let ones = mask.count_ones() as u8;
    if ones >= count {
        return None;
    }
    // A contiguous leading run is fully determined by its length.
    let expected = (((1u32 << ones) - 1) << (count - ones)) as u16;
    if mask == expected { Some(ones) } else { None }
}

// ============================================================================
// Tolerance windows
// ============================================================================

/// Accepted duration band for one pulse segment, in nanoseconds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseWindow {
    /// Shortest accepted duration.
    pub min_ns: u32,
    /// Longest accepted duration.
    pub max_ns: u32,
}

impl PulseWindow {
    /// Whether `ns` falls inside this window, inclusive on both ends.
    #[must_use]
    pub const fn contains(&self, ns: u32) -> bool {
        self.min_ns <= ns && ns <= self.max_ns
    }
}

/// Datasheet tolerance windows for both logical bit values.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseWindows {
    /// HIGH pulse window for a logical 0.
    pub high0: PulseWindow,
    /// LOW tail window for a logical 0.
    pub low0: PulseWindow,
    /// HIGH pulse window for a logical 1.
    pub high1: PulseWindow,
    /// LOW tail window for a logical 1.
    pub low1: PulseWindow,
}

/// WS2812-family windows: 0-bit 250-550 ns HIGH / 700-1000 ns LOW, 1-bit the
/// mirror image.
pub const WS2812_WINDOWS: PulseWindows = PulseWindows {
    high0: PulseWindow {
        min_ns: 250,
        max_ns: 550,
    },
    low0: PulseWindow {
        min_ns: 700,
        max_ns: 1000,
    },
    high1: PulseWindow {
        min_ns: 700,
        max_ns: 1000,
    },
    low1: PulseWindow {
        min_ns: 250,
        max_ns: 550,
    },
};
