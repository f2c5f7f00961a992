//! The LED strip facade: frames in, paced pulse bytes out.
//!
//! [`LedStrip`] owns a [`ByteShifter`] and drives the whole pipeline for
//! each frame: per-channel color transform, pulse expansion, group-of-two
//! paced FIFO delivery under the configured interrupt policy, and the
//! trailing idle flush that lets the strip latch. Every transmission
//! returns [`FrameStats`] describing what went onto the wire.
//!
//! # Example
//!
//! ```
//! use shift_strip::shifter::CaptureShifter;
//! use shift_strip::strip::{Frame1d, LedStrip, StripConfig, colors};
//! use shift_strip::timing::TimingProfile;
//!
//! let capture: CaptureShifter<512> = CaptureShifter::new();
//! let mut strip = LedStrip::new(capture, TimingProfile::active(), StripConfig::default())?;
//!
//! let mut frame: Frame1d<4> = Frame1d::new();
//! frame[0] = colors::RED;
//! frame[3] = colors::BLUE;
//!
//! let stats = strip.write_frame(&frame);
//! assert_eq!(stats.data_bytes, 4 * 3 * TimingProfile::active().expanded_bytes());
//! assert_eq!(stats.longest_masked_run, 2);
//!
//! let capture = strip.into_shifter();
//! assert_eq!(capture.bytes().len(), stats.data_bytes + stats.flush_bytes);
//! assert!(capture.is_idle());
//! # Ok::<(), shift_strip::Error>(())
//! ```

/// Predefined RGB color constants from the `smart_leds` crate.
///
/// Common colors include `RED`, `GREEN`, `BLUE`, `YELLOW`, `WHITE`, `BLACK`, `CYAN`, `MAGENTA`, `ORANGE`, `PURPLE`.
#[doc(inline)]
pub use smart_leds::colors;

use core::ops::{Deref, DerefMut};

use smart_leds::RGB8;

use crate::Result;
use crate::expand::BitExpander;
use crate::shifter::{ByteShifter, FLUSH_LEN, FifoWriter};
use crate::timing::{PulseWindows, TimingProfile, WS2812_WINDOWS};
use crate::transform::{ChannelOrder, ChannelTransform, Gamma};
use crate::window::{InterruptPolicy, InterruptWindow};

/// RGB color representation re-exported from the `smart_leds` crate.
pub type Rgb = RGB8;

/// Color channels per LED; flat buffers passed to
/// [`LedStrip::transmit`] hold this many bytes per pixel.
pub const BYTES_PER_LED: usize = 3;

/// FIFO deposits per masked group. Interrupts may only run between groups,
/// so this bounds how much wire time a single masked region covers.
const GROUP_LEN: usize = 2;

// ============================================================================
// Frame1d
// ============================================================================

/// [`Rgb`] pixel data for an LED strip.
///
/// Frames deref to `[Rgb; N]`, so you can mutate pixels directly before
/// passing them to [`LedStrip::write_frame`].
#[derive(Clone, Copy, Debug)]
pub struct Frame1d<const N: usize>(pub [Rgb; N]);

impl<const N: usize> Frame1d<N> {
    /// Number of LEDs in this frame.
    pub const LEN: usize = N;

    /// Length of this frame flattened to a channel buffer, as accepted by
    /// [`LedStrip::transmit`].
    pub const BYTE_LEN: usize = BYTES_PER_LED * N;

    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([Rgb::new(0, 0, 0); N])
    }

    /// Create a frame filled with a single color.
    #[must_use]
    pub const fn filled(color: Rgb) -> Self {
        Self([color; N])
    }
}

impl<const N: usize> Deref for Frame1d<N> {
    type Target = [Rgb; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> DerefMut for Frame1d<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const N: usize> From<[Rgb; N]> for Frame1d<N> {
    fn from(array: [Rgb; N]) -> Self {
        Self(array)
    }
}

impl<const N: usize> From<Frame1d<N>> for [Rgb; N] {
    fn from(frame: Frame1d<N>) -> Self {
        frame.0
    }
}

impl<const N: usize> Default for Frame1d<N> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Strip-wide settings resolved once at [`LedStrip::new`].
#[derive(Clone, Copy, Debug)]
pub struct StripConfig {
    /// Gamma correction applied to every channel value.
    pub gamma: Gamma,
    /// Global brightness, 0 (off) to 255 (full).
    pub brightness: u8,
    /// How stored channels map onto the wire.
    pub order: ChannelOrder,
    /// Whether interrupts get re-enable windows between byte groups.
    pub interrupts: InterruptPolicy,
    /// Pulse tolerance windows the timing profile must satisfy.
    pub windows: PulseWindows,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            gamma: Gamma::default(),
            brightness: 255,
            order: ChannelOrder::default(),
            interrupts: InterruptPolicy::default(),
            windows: WS2812_WINDOWS,
        }
    }
}

/// What one transmission put on the wire.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameStats {
    /// Pulse bytes carrying pixel data.
    pub data_bytes: usize,
    /// Zero bytes appended so the final pixel's pulses fully drain.
    pub flush_bytes: usize,
    /// Times interrupts were re-enabled mid-frame.
    pub windows_opened: usize,
    /// Most FIFO deposits made under one uninterrupted mask.
    pub longest_masked_run: usize,
}

// ============================================================================
// LedStrip
// ============================================================================

/// A strip of WS281x-style LEDs behind a byte-oriented shift peripheral.
///
/// See the [module documentation](mod@crate::strip) for a usage example.
pub struct LedStrip<S: ByteShifter> {
    shifter: S,
    expander: BitExpander,
    transform: ChannelTransform,
    policy: InterruptPolicy,
}

impl<S: ByteShifter> LedStrip<S> {
    /// Take ownership of the shift peripheral and resolve all configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `profile`'s pulse shapes fall outside
    /// `config.windows`, so an out-of-tolerance profile is rejected before
    /// anything reaches the wire.
    pub fn new(shifter: S, profile: TimingProfile, config: StripConfig) -> Result<Self> {
        profile.check(&config.windows)?;
        let expander = BitExpander::new(profile);
        #[cfg(feature = "defmt")]
        defmt::info!(
            "led strip ready: {} subunits per bit, {} pulse bytes per channel, policy {}",
            profile.subunit_count(),
            profile.expanded_bytes(),
            config.interrupts,
        );
        Ok(Self {
            shifter,
            expander,
            transform: ChannelTransform::new(config.gamma, config.brightness, config.order),
            policy: config.interrupts,
        })
    }

    /// Transmit a flat channel buffer, `BYTES_PER_LED` bytes per pixel in
    /// the stored order, with no framing bytes.
    ///
    /// The buffer is read start to end exactly once and is never modified;
    /// reorder, gamma, and brightness are applied on the way out. Trailing
    /// bytes short of a full pixel still pass through the value table, in
    /// stored order. The transmission always ends with the idle flush; the
    /// chips latch once the line has then stayed low for their reset
    /// interval, so spacing between frames is the caller's responsibility.
    pub fn transmit(&mut self, bytes: &[u8]) -> FrameStats {
        let mut pacer = Pacer::new(&mut self.shifter, self.policy);
        for index in 0..bytes.len() {
            let value = self.transform.read(bytes, index);
            pacer.push(&self.expander, value);
        }
        let stats = pacer.finish();
        #[cfg(feature = "defmt")]
        defmt::trace!("frame complete: {}", stats);
        stats
    }

    /// Transmit a typed frame; equivalent to [`transmit`](Self::transmit)
    /// on the frame's flattened channel bytes.
    pub fn write_frame<const N: usize>(&mut self, frame: &Frame1d<N>) -> FrameStats {
        let mut pacer = Pacer::new(&mut self.shifter, self.policy);
        for pixel in frame.iter() {
            let triple = [pixel.r, pixel.g, pixel.b];
            for channel in 0..BYTES_PER_LED {
                let value = self.transform.read(&triple, channel);
                pacer.push(&self.expander, value);
            }
        }
        let stats = pacer.finish();
        #[cfg(feature = "defmt")]
        defmt::trace!("frame complete: {}", stats);
        stats
    }

    /// Release the shift peripheral.
    #[must_use]
    pub fn into_shifter(self) -> S {
        self.shifter
    }
}

// ============================================================================
// Pacer
// ============================================================================

/// Drives one transmission: feeds expansion bytes to the FIFO in groups of
/// [`GROUP_LEN`], closing the interrupt window around each group.
struct Pacer<'a, S: ByteShifter> {
    writer: FifoWriter<'a, S>,
    window: InterruptWindow,
    stats: FrameStats,
    current_run: usize,
}

impl<'a, S: ByteShifter> Pacer<'a, S> {
    fn new(shifter: &'a mut S, policy: InterruptPolicy) -> Self {
        Self {
            writer: FifoWriter::new(shifter),
            window: InterruptWindow::new(policy),
            stats: FrameStats::default(),
            current_run: 0,
        }
    }

    /// Expand one channel value and deliver every resulting pulse byte.
    fn push(&mut self, expander: &BitExpander, value: u8) {
        let mut expansion = expander.expand(value);
        while expansion.len() != 0 {
            self.window.close();
            for _ in 0..GROUP_LEN {
                if let Some(byte) = expansion.next() {
                    self.writer.write(byte);
                    self.stats.data_bytes += 1;
                    self.current_run += 1;
                }
            }
            if self.window.reopen() {
                self.stats.windows_opened += 1;
                if self.current_run > self.stats.longest_masked_run {
                    self.stats.longest_masked_run = self.current_run;
                }
                self.current_run = 0;
            }
        }
    }

    /// End the frame: idle flush, interrupts restored, stats out.
    fn finish(mut self) -> FrameStats {
        if self.current_run > self.stats.longest_masked_run {
            self.stats.longest_masked_run = self.current_run;
        }
        // Flush bytes are all LOW on the wire, so a stretch inside them
        // cannot distort any pulse; the mask lifts before they go out.
        self.window.release();
        self.writer.finish();
        self.stats.flush_bytes = FLUSH_LEN;
        self.stats
    }
}
