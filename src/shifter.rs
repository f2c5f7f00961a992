//! The shift-peripheral contract and the blocking FIFO writer.
//!
//! Anything that serializes bytes MSB-first behind a "buffer full" flag can
//! drive a strip: a hardware FIFO, an SPI transmitter, or the in-memory
//! [`CaptureShifter`] used by tests and dry runs.

use core::cell::Cell;

use embedded_hal::spi::SpiBus;
use heapless::Vec;

/// Zero bytes written after the last data byte to force the line low.
///
/// Four bytes cover the deepest hardware buffer plus the byte mid-shift, so
/// the line is low no matter what the serializer held when data ran out.
pub const FLUSH_LEN: usize = 4;

/// A byte-oriented, MSB-first shift-out device.
///
/// Implementations serialize each loaded byte most-significant-bit first at
/// a fixed configured clock; the driver never sees individual bits, only the
/// buffer-full flag.
pub trait ByteShifter {
    /// Whether the device cannot accept another byte right now.
    fn is_full(&self) -> bool;

    /// Deposit one byte for serialization. Called only when [`Self::is_full`]
    /// reports false.
    fn load(&mut self, byte: u8);

    /// Drain whatever is pending and quiesce with the line held low.
    fn idle(&mut self);
}

// ============================================================================
// FifoWriter
// ============================================================================

/// Blocking, infallible delivery of physical bytes to a [`ByteShifter`].
///
/// # Example
///
/// ```
/// use shift_strip::shifter::{CaptureShifter, FifoWriter};
///
/// let mut capture = CaptureShifter::<8>::new();
/// let mut writer = FifoWriter::new(&mut capture);
/// writer.write(0xAB);
/// writer.finish();
/// assert_eq!(capture.bytes(), [0xAB, 0, 0, 0, 0]);
/// assert!(capture.is_idle());
/// ```
pub struct FifoWriter<'a, S: ByteShifter> {
    shifter: &'a mut S,
}

impl<'a, S: ByteShifter> FifoWriter<'a, S> {
    /// Wrap a shifter for one transmission.
    pub fn new(shifter: &'a mut S) -> Self {
        Self { shifter }
    }

    /// Deposit one byte, busy-waiting while the device reports full.
    ///
    /// Never times out and never fails: a missed deadline corrupts the
    /// in-flight frame and cannot be retried, so there is nothing to report.
    pub fn write(&mut self, byte: u8) {
        while self.shifter.is_full() {
            core::hint::spin_loop();
        }
        self.shifter.load(byte);
    }

    /// End the transmission: write [`FLUSH_LEN`] zero bytes, then quiesce.
    pub fn finish(mut self) {
        for _ in 0..FLUSH_LEN {
            self.write(0);
        }
        self.shifter.idle();
    }
}

// ============================================================================
// SpiShifter
// ============================================================================

/// Adapter driving any [`SpiBus`] as the shift peripheral.
///
/// SPI buses apply their own backpressure inside `write`, so `is_full` is
/// always false and each `load` is a one-byte blocking transfer. Bus errors
/// are discarded: a frame cannot be retried mid-transmission. Wire MOSI to
/// the strip's data line and leave SCK/MISO unconnected; the bus clock must
/// already be configured for the active profile's subunit rate.
pub struct SpiShifter<B> {
    bus: B,
}

impl<B: SpiBus> SpiShifter<B> {
    /// Wrap an SPI bus whose clock matches the profile's subunit rate.
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Return the wrapped bus.
    pub fn into_bus(self) -> B {
        self.bus
    }
}

impl<B: SpiBus> ByteShifter for SpiShifter<B> {
    fn is_full(&self) -> bool {
        false
    }

    fn load(&mut self, byte: u8) {
        let _ = self.bus.write(&[byte]);
    }

    fn idle(&mut self) {
        let _ = self.bus.flush();
    }
}

// ============================================================================
// CaptureShifter
// ============================================================================

/// In-memory shift device recording everything loaded into it.
///
/// Useful for host tests, doc examples, and dry runs on hardware. An
/// optional stall count simulates a busy peripheral: after each load,
/// `is_full` answers true for the next `stall` polls.
#[derive(Debug)]
pub struct CaptureShifter<const CAP: usize> {
    bytes: Vec<u8, CAP>,
    stall: u8,
    countdown: Cell<u8>,
    idled: bool,
}

impl<const CAP: usize> CaptureShifter<CAP> {
    /// An empty capture device that never reports full.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_stall(0)
    }

    /// An empty capture device reporting full for `stall` polls per load.
    #[must_use]
    pub const fn with_stall(stall: u8) -> Self {
        Self {
            bytes: Vec::new(),
            stall,
            countdown: Cell::new(0),
            idled: false,
        }
    }

    /// Every byte loaded so far, in load order.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether [`ByteShifter::idle`] has been called.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.idled
    }
}

impl<const CAP: usize> Default for CaptureShifter<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAP: usize> ByteShifter for CaptureShifter<CAP> {
    fn is_full(&self) -> bool {
        let left = self.countdown.get();
        if left == 0 {
            false
        } else {
            self.countdown.set(left - 1);
            true
        }
    }

    fn load(&mut self, byte: u8) {
        assert!(!self.idled, "load after idle");
        assert!(self.bytes.push(byte).is_ok(), "capture buffer overflow");
        self.countdown.set(self.stall);
    }

    fn idle(&mut self) {
        self.idled = true;
    }
}
