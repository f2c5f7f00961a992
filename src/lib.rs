//! Drive WS281x ("NeoPixel") single-wire LED strips with nothing but a
//! byte-oriented serial shift peripheral.
//!
//! The WS281x one-wire protocol wants every logical bit rendered as a HIGH
//! pulse followed by a LOW tail inside a fixed 1250 ns cycle, with tight
//! tolerances on both halves. Microcontrollers without a dedicated pulse
//! engine can still hit those tolerances by abusing any MSB-first shift-out
//! device (an SPI transmitter, a UART in synchronous mode): clock it so that
//! one output bit is a fraction of the cycle, then emit each logical bit as a
//! fixed run of HIGH output bits followed by LOW ones. The frame becomes a
//! plain byte stream, and the remaining problem is feeding the peripheral's
//! tiny buffer without ever missing a deadline.
//!
//! This crate provides the pieces of that trick:
//!
//! - [`timing`]: how logical bits map onto serializer bits, as validated
//!   [`TimingProfile`](timing::TimingProfile) values.
//! - [`expand`]: the byte-to-bitstream engine.
//! - [`shifter`]: the peripheral contract and the blocking FIFO writer.
//! - [`window`]: interrupt masking around each deposit, with bounded
//!   re-enable windows.
//! - [`transform`]: gamma, brightness, and channel-order pre-processing.
//! - [`strip`]: the [`LedStrip`](strip::LedStrip) facade tying it together.
//!
//! # Glossary
//!
//! - **Logical bit**: one bit of LED color data (0 or 1) to be transmitted.
//! - **Subunit**: the smallest physical time slice the peripheral can emit
//!   (one shifted output bit); several compose one logical bit's pulse.
//! - **Profile**: a fixed mapping from logical bit value to a run-length
//!   pattern of HIGH/LOW subunits.
//! - **Frame**: one complete transmission of a color buffer to the strip,
//!   ending in an idle-low flush.
//! - **Latch**: the LED chips' act of adopting the most recently received
//!   value once the line stays low past their reset interval.
#![cfg_attr(not(feature = "host"), no_std)]

// Compile-time checks: exactly one timing profile must be selected (unless testing with host feature)
#[cfg(all(
    not(any(feature = "profile-10", feature = "profile-5a", feature = "profile-5b")),
    not(feature = "host")
))]
compile_error!(
    "Must enable exactly one profile feature: 'profile-10', 'profile-5a', or 'profile-5b'"
);

#[cfg(any(
    all(feature = "profile-10", feature = "profile-5a"),
    all(feature = "profile-10", feature = "profile-5b"),
    all(feature = "profile-5a", feature = "profile-5b")
))]
compile_error!("Cannot enable more than one profile feature simultaneously");

// Host-only reference tooling; everything else is no_std-clean
#[cfg(feature = "host")]
pub mod decode;
mod error;
pub mod expand;
pub mod shifter;
pub mod strip;
pub mod timing;
pub mod transform;
pub mod window;

pub use crate::error::{Error, Result};
