//! Interrupt windows: bounding how long the serializer can be left unfed.
//!
//! A stalled producer shows up on the wire as a stretched HIGH or LOW pulse,
//! so interrupts are masked while each byte (or pair of bytes) is produced
//! and deposited, and re-enabled only in brief windows between groups. When
//! the CPU barely outruns the shift clock there is no slack for windows at
//! all and interrupts stay masked for the whole frame; that trade is chosen
//! explicitly via [`InterruptPolicy`].
//!
//! Masking uses the raw `critical-section` token pair, so the final
//! application (or the `host` feature, for tests) must provide a
//! critical-section implementation.

use crate::{Error, Result};

/// Spin iterations kept interrupt-open between groups, enough for a pended
/// interrupt to be taken before the next group closes.
const REOPEN_SPINS: u32 = 8;

/// Whether re-enable windows exist between byte groups.
///
/// See the [module documentation](mod@crate::window) for background.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptPolicy {
    /// Slack exists: interrupts are re-enabled briefly between groups.
    Windowed,
    /// No slack: interrupts stay masked for the entire frame.
    Locked,
}

impl Default for InterruptPolicy {
    fn default() -> Self {
        Self::Windowed
    }
}

impl InterruptPolicy {
    /// Pick a policy from the CPU clock and the shift peripheral's bit clock.
    ///
    /// Below a 2:1 ratio the CPU cannot produce bytes as fast as the
    /// serializer consumes them and the combination is rejected. From 4:1
    /// up there is slack for re-enable windows; between the two, interrupts
    /// must stay masked frame-long.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_strip::window::InterruptPolicy;
    ///
    /// // 125 MHz core feeding an 8 MHz shift clock: plenty of slack.
    /// let policy = InterruptPolicy::from_clocks(125_000_000, 8_000_000)?;
    /// assert_eq!(policy, InterruptPolicy::Windowed);
    ///
    /// // 20 MHz core: keeps up, but only with interrupts locked out.
    /// let policy = InterruptPolicy::from_clocks(20_000_000, 8_000_000)?;
    /// assert_eq!(policy, InterruptPolicy::Locked);
    ///
    /// assert!(InterruptPolicy::from_clocks(8_000_000, 8_000_000).is_err());
    /// # Ok::<(), shift_strip::Error>(())
    /// ```
    pub const fn from_clocks(cpu_hz: u32, shift_hz: u32) -> Result<Self> {
        assert!(shift_hz > 0, "shift clock must be nonzero");
        let cpu = cpu_hz as u64;
        let shift = shift_hz as u64;
        if cpu < shift * 2 {
            return Err(Error::ClockTooSlow { cpu_hz, shift_hz });
        }
        if cpu >= shift * 4 {
            Ok(Self::Windowed)
        } else {
            Ok(Self::Locked)
        }
    }
}

// ============================================================================
// InterruptWindow
// ============================================================================

/// Per-transmission interrupt masking state.
///
/// [`close`](Self::close) masks interrupts if they are open;
/// [`reopen`](Self::reopen) unmasks between groups under
/// [`InterruptPolicy::Windowed`] and guarantees a minimal window for pended
/// interrupts to run; [`release`](Self::release) unmasks unconditionally at
/// end of frame. Dropping the window also releases, so a panic mid-frame
/// cannot leave interrupts masked.
#[derive(Debug)]
pub struct InterruptWindow {
    policy: InterruptPolicy,
    restore: Option<critical_section::RestoreState>,
}

impl InterruptWindow {
    /// A window in the open state under `policy`.
    #[must_use]
    pub const fn new(policy: InterruptPolicy) -> Self {
        Self {
            policy,
            restore: None,
        }
    }

    /// Mask interrupts if they are currently open.
    #[expect(unsafe_code, reason = "raw critical-section token handoff")]
    pub fn close(&mut self) {
        if self.restore.is_none() {
            let token = unsafe { critical_section::acquire() };
            self.restore = Some(token);
        }
    }

    /// Between groups: unmask briefly if the policy allows, returning
    /// whether a window was actually opened.
    #[expect(unsafe_code, reason = "raw critical-section token handoff")]
    pub fn reopen(&mut self) -> bool {
        match self.policy {
            InterruptPolicy::Locked => false,
            InterruptPolicy::Windowed => match self.restore.take() {
                Some(token) => {
                    unsafe { critical_section::release(token) };
                    for _ in 0..REOPEN_SPINS {
                        core::hint::spin_loop();
                    }
                    true
                }
                None => false,
            },
        }
    }

    /// Unmask unconditionally; the end-of-frame counterpart to `close`.
    #[expect(unsafe_code, reason = "raw critical-section token handoff")]
    pub fn release(&mut self) {
        if let Some(token) = self.restore.take() {
            unsafe { critical_section::release(token) };
        }
    }
}

impl Drop for InterruptWindow {
    fn drop(&mut self) {
        self.release();
    }
}
