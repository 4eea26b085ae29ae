//! Millisecond time sources.
//!
//! Every timing decision in the crate reads a [`FrameClock`] once per call, so
//! playback, blinking, scrolling and easing are all driven by whoever calls the
//! update functions. On a board with an embassy time driver use
//! [`SystemClock`]; on the host (and in tests) use [`ManualClock`].

use core::cell::Cell;

use embassy_time::{Duration, Instant};

/// A monotonic source of "now".
pub trait FrameClock {
    /// The current instant.
    fn now(&self) -> Instant;
}

impl<C: FrameClock + ?Sized> FrameClock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// A clock that only moves when told to.
///
/// Interior mutability lets a test keep a shared reference to the clock while a
/// [`Screen`](crate::screen::Screen) holds another.
///
/// ```
/// use embassy_time::Duration;
/// use led_reel::clock::{FrameClock, ManualClock};
///
/// let clock = ManualClock::new();
/// clock.advance(Duration::from_millis(250));
/// assert_eq!(clock.now().as_millis(), 250);
/// ```
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// A clock reading zero milliseconds.
    #[must_use]
    pub const fn new() -> Self {
        Self::at(0)
    }

    /// A clock reading `millis` milliseconds.
    #[must_use]
    pub const fn at(millis: u64) -> Self {
        Self {
            now: Cell::new(Instant::from_millis(millis)),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }

    /// Move the clock forward by `millis` milliseconds.
    pub fn advance_millis(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }

    /// Jump to an absolute reading. Moving backwards is allowed but every
    /// elapsed-time computation in the crate saturates at zero.
    pub fn set(&self, instant: Instant) {
        self.now.set(instant);
    }
}

impl FrameClock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// The embassy time driver clock.
#[cfg(any(feature = "pico1", feature = "pico2"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

#[cfg(any(feature = "pico1", feature = "pico2"))]
impl FrameClock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Time elapsed from `since` to `now`, zero if the clock went backwards.
pub(crate) fn elapsed(now: Instant, since: Instant) -> Duration {
    now.saturating_duration_since(since)
}
