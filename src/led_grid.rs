//! Digital-output style access to single LEDs, with per-LED blinking.
//!
//! Cells are addressed either as `(x, y)` or by linear index
//! `y * 12 + x`. Addresses outside the grid are ignored. Writing or toggling a
//! cell cancels its blink; [`LedGrid::update_blinks`] flips every blinking
//! cell whose interval has elapsed.

use embassy_time::{Duration, Instant};

use crate::clock::elapsed;
use crate::frame::Frame;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BlinkTimer {
    rate: Duration,
    last_toggle: Instant,
}

/// On/off state of the 96 cells plus their blink timers.
///
/// The grid tracks whether it changed since the last
/// [`take_dirty`](Self::take_dirty), so callers only push frames that differ.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedGrid {
    lit: Frame,
    blink: [Option<BlinkTimer>; Frame::LEN],
    dirty: bool,
}

impl Default for LedGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl LedGrid {
    /// All cells off, nothing blinking.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lit: Frame::new(),
            blink: [None; Frame::LEN],
            dirty: false,
        }
    }

    /// Write cell `(x, y)` and cancel its blink.
    pub fn set(&mut self, x: i32, y: i32, on: bool) {
        if let Some(index) = Frame::index_of(x, y) {
            self.set_index(index, on);
        }
    }

    /// Write cell `index` and cancel its blink.
    pub fn set_index(&mut self, index: usize, on: bool) {
        if index >= Frame::LEN {
            return;
        }
        self.cancel_blink(index);
        self.write(index, on);
    }

    /// Flip cell `(x, y)` and cancel its blink.
    pub fn toggle(&mut self, x: i32, y: i32) {
        if let Some(index) = Frame::index_of(x, y) {
            self.toggle_index(index);
        }
    }

    /// Flip cell `index` and cancel its blink.
    pub fn toggle_index(&mut self, index: usize) {
        if index >= Frame::LEN {
            return;
        }
        self.cancel_blink(index);
        self.write(index, !self.lit.get_index(index));
    }

    /// Current state of cell `(x, y)`, including blink phase.
    #[must_use]
    pub const fn read(&self, x: i32, y: i32) -> bool {
        self.lit.get(x, y)
    }

    /// Current state of cell `index`, including blink phase.
    #[must_use]
    pub const fn read_index(&self, index: usize) -> bool {
        self.lit.get_index(index)
    }

    /// Turn every cell off and stop every blink.
    pub fn clear(&mut self) {
        self.blink = [None; Frame::LEN];
        if !self.lit.is_blank() {
            self.lit = Frame::new();
            self.dirty = true;
        }
    }

    /// Blink cell `(x, y)` every `rate`, starting lit. A zero rate is the same
    /// as [`no_blink`](Self::no_blink).
    pub fn blink(&mut self, x: i32, y: i32, rate: Duration, now: Instant) {
        if let Some(index) = Frame::index_of(x, y) {
            self.blink_index(index, rate, now);
        }
    }

    /// Blink cell `index` every `rate`, starting lit.
    pub fn blink_index(&mut self, index: usize, rate: Duration, now: Instant) {
        if rate.as_ticks() == 0 {
            self.no_blink_index(index);
            return;
        }
        let Some(timer) = self.blink.get_mut(index) else {
            return;
        };
        *timer = Some(BlinkTimer {
            rate,
            last_toggle: now,
        });
        self.write(index, true);
        trace!("LedGrid::blink_index: cell {} every {} ms", index, rate.as_millis());
    }

    /// Stop blinking cell `(x, y)` and turn it off.
    pub fn no_blink(&mut self, x: i32, y: i32) {
        if let Some(index) = Frame::index_of(x, y) {
            self.no_blink_index(index);
        }
    }

    /// Stop blinking cell `index` and turn it off.
    pub fn no_blink_index(&mut self, index: usize) {
        self.set_index(index, false);
    }

    /// Stop every blink, turning the blinking cells off. Steady cells keep
    /// their state.
    pub fn no_blink_all(&mut self) {
        for index in 0..Frame::LEN {
            if self.is_blinking_index(index) {
                self.no_blink_index(index);
            }
        }
    }

    /// Whether cell `(x, y)` is blinking.
    #[must_use]
    pub fn is_blinking(&self, x: i32, y: i32) -> bool {
        Frame::index_of(x, y).is_some_and(|index| self.is_blinking_index(index))
    }

    /// Whether cell `index` is blinking.
    #[must_use]
    pub fn is_blinking_index(&self, index: usize) -> bool {
        matches!(self.blink.get(index), Some(Some(_)))
    }

    /// Flip every blinking cell whose interval has elapsed since its last
    /// flip. Each cell flips at most once per call. Returns whether anything
    /// changed.
    pub fn update_blinks(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for index in 0..Frame::LEN {
            let Some(Some(timer)) = self.blink.get_mut(index) else {
                continue;
            };
            if elapsed(now, timer.last_toggle) < timer.rate {
                continue;
            }
            timer.last_toggle = now;
            let on = !self.lit.get_index(index);
            self.write(index, on);
            changed = true;
        }
        changed
    }

    /// The current cells.
    #[must_use]
    pub const fn frame(&self) -> Frame {
        self.lit
    }

    /// The current cells if they changed since the last call.
    pub const fn take_dirty(&mut self) -> Option<Frame> {
        if self.dirty {
            self.dirty = false;
            Some(self.lit)
        } else {
            None
        }
    }

    /// Whether the cells changed since the last [`take_dirty`](Self::take_dirty).
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn cancel_blink(&mut self, index: usize) {
        if let Some(timer) = self.blink.get_mut(index) {
            *timer = None;
        }
    }

    fn write(&mut self, index: usize, on: bool) {
        if self.lit.get_index(index) != on {
            self.lit.set_index(index, on);
            self.dirty = true;
        }
    }
}
