//! The packed 12×8 monochrome frame and the fixed display rotations.
//!
//! A [`Frame`] stores 96 cells in three `u32` words. Cell `i = y * 12 + x`
//! lives in word `i / 32` at bit `31 - i % 32`, most significant bit first,
//! which matches the layout used by animation tables and the display sink.

use core::ops::{BitOr, BitOrAssign, Not};

use crate::{Error, Result};

/// Packed on/off state of every cell on the 12×8 matrix.
///
/// Coordinates are `(x, y)` with `x` the column in `0..12` and `y` the row in
/// `0..8`. Reads outside the grid return `false` and writes are ignored.
///
/// # Example
///
/// ```
/// use led_reel::frame::Frame;
///
/// let mut frame = Frame::new();
/// frame.set(0, 0, true);
/// frame.set(11, 7, true);
/// assert_eq!(frame.words(), [0x8000_0000, 0, 0x0000_0001]);
/// assert_eq!(frame.lit_count(), 2);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame(pub [u32; 3]);

impl Frame {
    /// Frame width in cells (columns).
    pub const WIDTH: usize = 12;
    /// Frame height in cells (rows).
    pub const HEIGHT: usize = 8;
    /// Total number of cells (WIDTH × HEIGHT).
    pub const LEN: usize = Self::WIDTH * Self::HEIGHT;

    /// Create a blank (all off) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([0; 3])
    }

    /// Create a frame with every cell set to `on`.
    #[must_use]
    pub const fn filled(on: bool) -> Self {
        if on { Self([u32::MAX; 3]) } else { Self([0; 3]) }
    }

    /// Wrap three raw words in the packed layout.
    #[must_use]
    pub const fn from_words(words: [u32; 3]) -> Self {
        Self(words)
    }

    /// The three raw words in the packed layout.
    #[must_use]
    pub const fn words(&self) -> [u32; 3] {
        self.0
    }

    /// Linear index of `(x, y)`, or `None` when outside the grid.
    #[must_use]
    pub const fn index_of(x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= Self::WIDTH as i32 || y >= Self::HEIGHT as i32 {
            return None;
        }
        Some(y as usize * Self::WIDTH + x as usize)
    }

    const fn locate(index: usize) -> (usize, u32) {
        (index / 32, 1 << (31 - (index % 32)))
    }

    /// State of the cell at linear `index`; `false` when out of range.
    #[must_use]
    pub const fn get_index(&self, index: usize) -> bool {
        if index >= Self::LEN {
            return false;
        }
        let (word, mask) = Self::locate(index);
        self.0[word] & mask != 0
    }

    /// Set the cell at linear `index`; ignored when out of range.
    pub const fn set_index(&mut self, index: usize, on: bool) {
        if index >= Self::LEN {
            return;
        }
        let (word, mask) = Self::locate(index);
        if on {
            self.0[word] |= mask;
        } else {
            self.0[word] &= !mask;
        }
    }

    /// State of the cell at `(x, y)`; `false` when outside the grid.
    #[must_use]
    pub const fn get(&self, x: i32, y: i32) -> bool {
        match Self::index_of(x, y) {
            Some(index) => self.get_index(index),
            None => false,
        }
    }

    /// Set the cell at `(x, y)`; ignored when outside the grid.
    pub const fn set(&mut self, x: i32, y: i32, on: bool) {
        if let Some(index) = Self::index_of(x, y) {
            self.set_index(index, on);
        }
    }

    /// Number of lit cells.
    #[must_use]
    pub const fn lit_count(&self) -> u32 {
        self.0[0].count_ones() + self.0[1].count_ones() + self.0[2].count_ones()
    }

    /// True when no cell is lit.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        self.0[0] == 0 && self.0[1] == 0 && self.0[2] == 0
    }

    /// Move every cell by `(dx, dy)`. Cells pushed past an edge are dropped.
    #[must_use]
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        if dx == 0 && dy == 0 {
            return *self;
        }
        let mut shifted = Self::new();
        for (x, y) in cells() {
            if self.get(x, y) {
                shifted.set(x.saturating_add(dx), y.saturating_add(dy), true);
            }
        }
        shifted
    }

    /// Remap the frame through one of the fixed display rotations.
    ///
    /// Quarter turns keep the central 8×8 square (columns 2 through 9) and
    /// leave the two side bands dark.
    #[must_use]
    pub fn rotated(&self, rotation: Rotation) -> Self {
        if rotation == Rotation::Deg0 {
            return *self;
        }
        let mut rotated = Self::new();
        for (x, y) in cells() {
            if let Some((source_x, source_y)) = rotation.source_of(x, y) {
                rotated.set(x, y, self.get(source_x, source_y));
            }
        }
        rotated
    }
}

/// Every `(x, y)` on the grid in row-major order.
pub(crate) fn cells() -> impl Iterator<Item = (i32, i32)> {
    (0..Frame::HEIGHT as i32).flat_map(|y| (0..Frame::WIDTH as i32).map(move |x| (x, y)))
}

impl From<[u32; 3]> for Frame {
    fn from(words: [u32; 3]) -> Self {
        Self(words)
    }
}

impl From<Frame> for [u32; 3] {
    fn from(frame: Frame) -> Self {
        frame.0
    }
}

impl BitOr for Frame {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self([self.0[0] | rhs.0[0], self.0[1] | rhs.0[1], self.0[2] | rhs.0[2]])
    }
}

impl BitOrAssign for Frame {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl Not for Frame {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self([!self.0[0], !self.0[1], !self.0[2]])
    }
}

/// Clockwise display rotation in quarter turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// No rotation.
    #[default]
    Deg0,
    /// 90 degrees clockwise, centered 8×8 crop.
    Deg90,
    /// Upside down.
    Deg180,
    /// 270 degrees clockwise, centered 8×8 crop.
    Deg270,
}

impl Rotation {
    /// The rotation angle in degrees.
    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Source cell shown at display cell `(x, y)`, or `None` if that display
    /// cell falls outside the rotated image.
    #[must_use]
    pub const fn source_of(self, x: i32, y: i32) -> Option<(i32, i32)> {
        const MAX_X: i32 = Frame::WIDTH as i32 - 1;
        const MAX_Y: i32 = Frame::HEIGHT as i32 - 1;
        // Left edge of the centered square used by quarter turns.
        const CROP: i32 = (Frame::WIDTH as i32 - Frame::HEIGHT as i32) / 2;

        match self {
            Self::Deg0 => Some((x, y)),
            Self::Deg180 => Some((MAX_X - x, MAX_Y - y)),
            Self::Deg90 | Self::Deg270 if x < CROP || x > MAX_X - CROP => None,
            Self::Deg90 => Some((y + CROP, MAX_Y + CROP - x)),
            Self::Deg270 => Some((MAX_Y + CROP - y, x - CROP)),
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = Error;

    fn try_from(degrees: u16) -> Result<Self> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            _ => Err(Error::InvalidRotation { degrees }),
        }
    }
}
