use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

use crate::config::ELAPSED_WRAP_SECS;

/// State shared between the timer interrupts and the main loop.
///
/// The 1 Hz tick owns increments of the elapsed counter and the 500 Hz tick
/// raises the draw request. The main loop may clear either. Only plain
/// loads and stores are used since the Cortex-M0+ has no compare-and-swap;
/// each interrupt runs to completion before the main loop resumes, so a
/// load followed by a store inside a handler cannot be torn.
pub struct TimeBase {
    elapsed: AtomicU16,
    draw_ready: AtomicBool,
}

impl TimeBase {
    pub const fn new() -> Self {
        Self {
            elapsed: AtomicU16::new(0),
            draw_ready: AtomicBool::new(false),
        }
    }

    /// Advances elapsed time by one second, wrapping at 100 minutes.
    pub fn tick(&self) {
        let next = self.elapsed.load(Ordering::Acquire) + 1;
        let next = if next >= ELAPSED_WRAP_SECS { 0 } else { next };
        self.elapsed.store(next, Ordering::Release);
    }

    /// Sets elapsed time back to zero.
    pub fn reset(&self) {
        self.elapsed.store(0, Ordering::Release);
    }

    /// Elapsed seconds, always below [`ELAPSED_WRAP_SECS`].
    pub fn elapsed(&self) -> u16 {
        self.elapsed.load(Ordering::Acquire)
    }

    /// Marks the display as due for its next digit.
    pub fn request_frame(&self) {
        self.draw_ready.store(true, Ordering::Release);
    }

    /// Consumes a pending draw request. Returns true if one was pending.
    ///
    /// A request raised between the load and the clearing store is merged
    /// into the one being served.
    pub fn take_frame_request(&self) -> bool {
        if self.draw_ready.load(Ordering::Acquire) {
            self.draw_ready.store(false, Ordering::Release);
            true
        } else {
            false
        }
    }
}

impl Default for TimeBase {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits elapsed seconds into (minutes, seconds).
pub fn minutes_seconds(elapsed: u16) -> (u8, u8) {
    let elapsed = elapsed % ELAPSED_WRAP_SECS;
    ((elapsed / 60) as u8, (elapsed % 60) as u8)
}
