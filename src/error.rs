//! Error and result types shared across the crate.
//!
//! Every variant surfaces while a strip is being configured. A transmission
//! that has started cannot fail: a missed deadline would corrupt the pulse
//! train for that frame only, and there is nothing useful to report mid-frame.

use derive_more::{Display, Error};

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Configuration errors, all reported before the first byte of a frame.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// The expander supports 2 through 10 subunits per logical bit.
    #[display("subunit count {count} is outside the supported range 2..=10")]
    SubunitCountOutOfRange {
        /// The rejected subunit count.
        count: u8,
    },

    /// A pulse mask must be one contiguous run of HIGH subunits starting at
    /// the first subunit, with at least one LOW subunit after it.
    #[display("pulse mask {mask:#b} is not a leading HIGH run with a LOW tail")]
    MaskNotLeadingRun {
        /// The rejected mask, right-aligned to the subunit count.
        mask: u16,
    },

    /// The two pulse shapes are too close for the LED chips to tell apart.
    #[display("pulse shapes for logical 0 and 1 are not distinguishable")]
    PulseShapesIndistinct,

    /// The CPU clock cannot keep the shift peripheral fed at this ratio.
    #[display("cpu clock {cpu_hz} Hz is too slow for shift clock {shift_hz} Hz")]
    ClockTooSlow {
        /// CPU core clock in hertz.
        cpu_hz: u32,
        /// Shift peripheral output clock in hertz.
        shift_hz: u32,
    },

    /// A derived pulse width falls outside the supplied timing window.
    #[display("pulse for logical {bit} falls outside the timing window")]
    PulseOutOfWindow {
        /// The logical bit value (0 or 1) whose pulse missed the window.
        bit: u8,
    },
}
