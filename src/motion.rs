//! Time-to-value helpers for animating brightness-free things: positions,
//! sizes, radii.
//!
//! [`oscillate`] is a stateless wave; [`Ease`] remembers one move toward a
//! target. Both read time from the caller, usually
//! [`FrameClock::now`](crate::clock::FrameClock::now).
//!
//! ```
//! use embassy_time::{Duration, Instant};
//! use led_reel::motion::{Ease, oscillate_int};
//!
//! let period = Duration::from_millis(1000);
//! assert_eq!(oscillate_int(0, 11, period, 0.0, Instant::from_millis(0)), 0);
//! assert_eq!(oscillate_int(0, 11, period, 0.0, Instant::from_millis(500)), 11);
//!
//! let mut x = Ease::new(0.0);
//! x.to(10.0, Duration::from_millis(100), Instant::from_millis(0));
//! assert_eq!(x.int_value(Instant::from_millis(50)), 5);
//! assert!(x.done(Instant::from_millis(100)));
//! ```

use core::f32::consts::TAU;

use embassy_time::{Duration, Instant};
use micromath::F32Ext;

use crate::clock::elapsed;

/// A raised-cosine wave between `min` and `max`.
///
/// The wave sits at `min` at time zero, peaks at `max` half a `period` later,
/// and is back at `min` after a full period. `offset` shifts the phase by a
/// fraction of the period (`0.25` is a quarter period ahead). A zero period
/// holds at `min`.
#[must_use]
pub fn oscillate(min: f32, max: f32, period: Duration, offset: f32, now: Instant) -> f32 {
    let period_ticks = period.as_ticks();
    if period_ticks == 0 {
        return min;
    }
    let phase = (now.as_ticks() % period_ticks) as f32 / period_ticks as f32 + offset;
    let wave = (1.0 - F32Ext::cos(TAU * phase)) / 2.0;
    min + (max - min) * wave
}

/// [`oscillate`] rounded to the nearest integer.
#[must_use]
pub fn oscillate_int(min: i32, max: i32, period: Duration, offset: f32, now: Instant) -> i32 {
    F32Ext::round(oscillate(min as f32, max as f32, period, offset, now)) as i32
}

/// Linear move from one value to a target over a fixed duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ease {
    from: f32,
    target: f32,
    started: Instant,
    duration: Duration,
}

impl Ease {
    /// Rest at `initial`.
    #[must_use]
    pub const fn new(initial: f32) -> Self {
        Self {
            from: initial,
            target: initial,
            started: Instant::from_ticks(0),
            duration: Duration::from_ticks(0),
        }
    }

    /// Head for `target`, arriving `duration` after `now`. The move starts
    /// from wherever the value is at `now`, so retargeting mid-move is smooth.
    pub fn to(&mut self, target: f32, duration: Duration, now: Instant) {
        self.from = self.value(now);
        self.target = target;
        self.started = now;
        self.duration = duration;
    }

    /// Snap to `value` with no motion.
    pub const fn jump(&mut self, value: f32) {
        self.from = value;
        self.target = value;
        self.duration = Duration::from_ticks(0);
    }

    /// The value at `now`.
    #[must_use]
    pub fn value(&self, now: Instant) -> f32 {
        let total = self.duration.as_ticks();
        let done = elapsed(now, self.started).as_ticks();
        if total == 0 || done >= total {
            return self.target;
        }
        let progress = done as f32 / total as f32;
        self.from + (self.target - self.from) * progress
    }

    /// The value at `now`, rounded.
    #[must_use]
    pub fn int_value(&self, now: Instant) -> i32 {
        F32Ext::round(self.value(now)) as i32
    }

    /// The value being moved toward.
    #[must_use]
    pub const fn target(&self) -> f32 {
        self.target
    }

    /// Whether the target has been reached at `now`.
    #[must_use]
    pub fn done(&self, now: Instant) -> bool {
        elapsed(now, self.started) >= self.duration
    }

    /// Whether a move is still under way at `now`.
    #[must_use]
    pub fn moving(&self, now: Instant) -> bool {
        !self.done(now)
    }
}
