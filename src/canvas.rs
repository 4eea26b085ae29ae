//! Off-screen drawing buffer for flicker-free vector graphics.
//!
//! A [`Canvas`] is a plain 12×8 grid of booleans plus drawing style. Nothing
//! reaches the display until [`Canvas::to_frame`] packs the buffer (applying
//! rotation and invert), which [`Screen::end_draw`](crate::screen::Screen::end_draw)
//! does exactly once per drawing session.
//!
//! The canvas is also an [`embedded_graphics`] draw target with
//! [`BinaryColor`], so the whole embedded-graphics primitive and font
//! catalogue can draw into it as well.
//!
//! # Example
//!
//! ```
//! use led_reel::canvas::Canvas;
//!
//! let mut canvas = Canvas::new();
//! canvas.fill(true);
//! canvas.rect(0, 0, 3, 2);
//! canvas.line(0, 7, 11, 7);
//! let frame = canvas.to_frame();
//! assert_eq!(frame.lit_count(), 6 + 12);
//! ```

use core::convert::Infallible;

use embassy_time::{Duration, Instant};
use embedded_graphics::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
};

use crate::clock::elapsed;
use crate::font::{GLYPH_HEIGHT, GLYPH_SPACING, GLYPH_WIDTH, glyph_pixel, text_width};
use crate::frame::{Frame, Rotation, cells};

const WIDTH: i32 = Frame::WIDTH as i32;
const HEIGHT: i32 = Frame::HEIGHT as i32;

/// Default scroll interval per pixel.
pub const DEFAULT_SCROLL_SPEED: Duration = Duration::from_millis(100);

/// Which way [`Canvas::scroll_text`] moves text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollDirection {
    /// Enter from the right edge, leave at the left.
    #[default]
    Left,
    /// Enter from the left edge, leave at the right.
    Right,
}

/// An 8-row by 12-column drawing buffer with stroke and fill style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    buffer: [[bool; Frame::WIDTH]; Frame::HEIGHT],
    stroke: Option<bool>,
    fill: Option<bool>,
    rotation: Rotation,
    invert: bool,
    text_scale: i32,
    scroll_offset: i32,
    scroll_last_step: Option<Instant>,
    scroll_speed: Duration,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// A blank canvas: stroke on, no fill, no rotation, no invert.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: [[false; Frame::WIDTH]; Frame::HEIGHT],
            stroke: Some(true),
            fill: None,
            rotation: Rotation::Deg0,
            invert: false,
            text_scale: 1,
            scroll_offset: 0,
            scroll_last_step: None,
            scroll_speed: DEFAULT_SCROLL_SPEED,
        }
    }

    // ---- buffer ----

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.background(false);
    }

    /// Set every pixel to `on`.
    pub fn background(&mut self, on: bool) {
        self.buffer = [[on; Frame::WIDTH]; Frame::HEIGHT];
    }

    /// Set one pixel, ignoring the style. Off-canvas writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, on: bool) {
        if x < 0 || y < 0 || x >= WIDTH || y >= HEIGHT {
            return;
        }
        if let Some(cell) = self
            .buffer
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            *cell = on;
        }
    }

    /// Read one pixel of the unrotated buffer; `false` off-canvas.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.buffer
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .unwrap_or(false)
    }

    /// Replace the buffer with the cells of `frame`, untransformed.
    pub fn load_frame(&mut self, frame: &Frame) {
        for (x, y) in cells() {
            self.set(x, y, frame.get(x, y));
        }
    }

    /// Pack the buffer as it should appear: rotated, then inverted.
    #[must_use]
    pub fn to_frame(&self) -> Frame {
        self.transform_frame(&self.raw_frame())
    }

    /// Pack the buffer without rotation or invert.
    #[must_use]
    pub fn raw_frame(&self) -> Frame {
        let mut frame = Frame::new();
        for (x, y) in cells() {
            frame.set(x, y, self.get(x, y));
        }
        frame
    }

    /// Apply this canvas's rotation and invert to any frame.
    #[must_use]
    pub fn transform_frame(&self, frame: &Frame) -> Frame {
        let rotated = frame.rotated(self.rotation);
        if self.invert { !rotated } else { rotated }
    }

    // ---- style ----

    /// Draw outlines, points, lines and text with `on`.
    pub const fn stroke(&mut self, on: bool) {
        self.stroke = Some(on);
    }

    /// Stop drawing outlines, points, lines and text.
    pub const fn no_stroke(&mut self) {
        self.stroke = None;
    }

    /// Fill rectangle, circle and ellipse interiors with `on`.
    pub const fn fill(&mut self, on: bool) {
        self.fill = Some(on);
    }

    /// Leave shape interiors untouched.
    pub const fn no_fill(&mut self) {
        self.fill = None;
    }

    /// Current stroke value, if stroking.
    #[must_use]
    pub const fn stroke_value(&self) -> Option<bool> {
        self.stroke
    }

    /// Current fill value, if filling.
    #[must_use]
    pub const fn fill_value(&self) -> Option<bool> {
        self.fill
    }

    /// Rotation applied by [`to_frame`](Self::to_frame).
    pub const fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Current rotation.
    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Swap lit and dark cells in [`to_frame`](Self::to_frame).
    pub const fn set_invert(&mut self, invert: bool) {
        self.invert = invert;
    }

    /// Current invert setting.
    #[must_use]
    pub const fn invert(&self) -> bool {
        self.invert
    }

    // ---- primitives ----
    //
    // Shape math runs in i64/i128 and every loop is bounded by the grid, so
    // any i32 coordinates are accepted.

    /// One pixel in the stroke value.
    pub fn point(&mut self, x: i32, y: i32) {
        if let Some(on) = self.stroke {
            self.set(x, y, on);
        }
    }

    /// Line from `(x0, y0)` to `(x1, y1)` inclusive, one pixel per step
    /// along its major axis. Only the part over the canvas is visited.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let Some(on) = self.stroke else {
            return;
        };
        let (x0, y0, x1, y1) = (i64::from(x0), i64::from(y0), i64::from(x1), i64::from(y1));
        let (dx, dy) = (x1 - x0, y1 - y0);
        if dx == 0 && dy == 0 {
            self.plot(x0, y0, on);
        } else if dx.abs() >= dy.abs() {
            let (first, last) = clamp_range(x0.min(x1), x0.max(x1), WIDTH);
            for x in first..=last {
                let y = y0 + rounded_div(i128::from(x - x0) * i128::from(dy), i128::from(dx));
                self.plot(x, y, on);
            }
        } else {
            let (first, last) = clamp_range(y0.min(y1), y0.max(y1), HEIGHT);
            for y in first..=last {
                let x = x0 + rounded_div(i128::from(y - y0) * i128::from(dx), i128::from(dy));
                self.plot(x, y, on);
            }
        }
    }

    /// Rectangle with top-left `(x, y)`. The fill covers the whole area and
    /// the stroke is drawn on top along the border.
    pub fn rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        if width <= 0 || height <= 0 {
            return;
        }
        let (left, top) = (i64::from(x), i64::from(y));
        let (right, bottom) = (left + i64::from(width) - 1, top + i64::from(height) - 1);
        let (first_row, last_row) = clamp_range(top, bottom, HEIGHT);
        if let Some(on) = self.fill {
            for row in first_row..=last_row {
                self.span(left, right, row, on);
            }
        }
        if let Some(on) = self.stroke {
            self.span(left, right, top, on);
            self.span(left, right, bottom, on);
            for row in first_row..=last_row {
                self.plot(left, row, on);
                self.plot(right, row, on);
            }
        }
    }

    /// Circle centered on `(cx, cy)`.
    ///
    /// A cell belongs to the circle when its center is within half a cell of
    /// the radius. With a fill every such cell is drawn and no separate
    /// outline is added, even when a stroke is set; otherwise only the cells
    /// with a neighbor outside the circle are stroked.
    pub fn circle(&mut self, cx: i32, cy: i32, diameter: i32) {
        if diameter <= 0 {
            return;
        }
        let radius = i64::from(diameter / 2);
        self.oval(i64::from(cx), i64::from(cy), radius, radius);
    }

    /// Ellipse centered on `(cx, cy)` with the given full width and height.
    /// Same membership and fill-over-stroke rules as [`circle`](Self::circle).
    pub fn ellipse(&mut self, cx: i32, cy: i32, width: i32, height: i32) {
        if width <= 0 || height <= 0 {
            return;
        }
        let Some(style) = self.shape_style() else {
            return;
        };
        let (cx, cy) = (i64::from(cx), i64::from(cy));
        let (rx, ry) = (i64::from(width / 2), i64::from(height / 2));
        if ry == 0 {
            self.span(cx - rx, cx + rx, cy, style.on());
            return;
        }
        if rx == 0 {
            let (first_row, last_row) = clamp_range(cy - ry, cy + ry, HEIGHT);
            for row in first_row..=last_row {
                self.plot(cx, row, style.on());
            }
            return;
        }
        self.oval(cx, cy, rx, ry);
    }

    fn oval(&mut self, cx: i64, cy: i64, rx: i64, ry: i64) {
        let Some(style) = self.shape_style() else {
            return;
        };
        let inside = |x: i64, y: i64| inside_oval(x - cx, y - cy, rx, ry);
        for (x, y) in cells() {
            let (x, y) = (i64::from(x), i64::from(y));
            if !inside(x, y) {
                continue;
            }
            match style {
                ShapeStyle::Fill(on) => self.plot(x, y, on),
                ShapeStyle::Outline(on) => {
                    let edge = [(1, 0), (-1, 0), (0, 1), (0, -1)]
                        .iter()
                        .any(|&(step_x, step_y)| !inside(x + step_x, y + step_y));
                    if edge {
                        self.plot(x, y, on);
                    }
                }
            }
        }
    }

    const fn shape_style(&self) -> Option<ShapeStyle> {
        match (self.fill, self.stroke) {
            (Some(on), _) => Some(ShapeStyle::Fill(on)),
            (None, Some(on)) => Some(ShapeStyle::Outline(on)),
            (None, None) => None,
        }
    }

    fn span(&mut self, x0: i64, x1: i64, y: i64, on: bool) {
        let (first, last) = clamp_range(x0.min(x1), x0.max(x1), WIDTH);
        for x in first..=last {
            self.plot(x, y, on);
        }
    }

    fn plot(&mut self, x: i64, y: i64, on: bool) {
        if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
            self.set(x, y, on);
        }
    }

    // ---- text ----

    /// Glyph scale: 1 for 3×5 glyphs, 2 for 6×10. Other values are clamped.
    pub fn set_text_size(&mut self, size: u8) {
        self.text_scale = i32::from(size.clamp(1, 2));
    }

    /// Current glyph scale.
    #[must_use]
    pub const fn text_size(&self) -> u8 {
        self.text_scale as u8
    }

    /// Width in pixels of `text` at the current size.
    #[must_use]
    pub fn text_width(&self, text: &str) -> i32 {
        text_width(text, self.text_scale)
    }

    /// Draw `text` with its first glyph's top-left corner at `(x, y)`, in the
    /// stroke value. Unlit glyph pixels leave the buffer alone.
    pub fn text(&mut self, text: &str, x: i32, y: i32) {
        let Some(on) = self.stroke else {
            return;
        };
        let scale = self.text_scale;
        let advance = (GLYPH_WIDTH + GLYPH_SPACING) * scale;
        let mut origin_x = x;
        for ch in text.chars() {
            if origin_x >= WIDTH {
                break;
            }
            if origin_x + GLYPH_WIDTH * scale > 0 {
                self.glyph(ch, origin_x, y, scale, on);
            }
            origin_x = origin_x.saturating_add(advance);
        }
    }

    fn glyph(&mut self, ch: char, x: i32, y: i32, scale: i32, on: bool) {
        for gy in 0..GLYPH_HEIGHT {
            for gx in 0..GLYPH_WIDTH {
                if !glyph_pixel(ch, gx, gy) {
                    continue;
                }
                for sy in 0..scale {
                    for sx in 0..scale {
                        self.plot(
                            i64::from(x) + i64::from(gx * scale + sx),
                            i64::from(y) + i64::from(gy * scale + sy),
                            on,
                        );
                    }
                }
            }
        }
    }

    /// Draw `text` at row `y`, moved one pixel further along `direction`
    /// each time the scroll interval has elapsed since the last step.
    ///
    /// The first call only starts the timer. Once the text has fully left
    /// the 12-column window it starts over from the entering edge.
    pub fn scroll_text(&mut self, text: &str, y: i32, direction: ScrollDirection, now: Instant) {
        let width = self.text_width(text);
        match self.scroll_last_step {
            None => self.scroll_last_step = Some(now),
            Some(last) if elapsed(now, last) >= self.scroll_speed => {
                self.scroll_offset += 1;
                if self.scroll_offset > width.saturating_add(WIDTH) {
                    self.scroll_offset = 0;
                }
                self.scroll_last_step = Some(now);
            }
            Some(_) => {}
        }
        let x = match direction {
            ScrollDirection::Left => WIDTH - self.scroll_offset,
            ScrollDirection::Right => self.scroll_offset - width,
        };
        self.text(text, x, y);
    }

    /// Scroll interval per pixel.
    pub const fn set_scroll_speed(&mut self, per_pixel: Duration) {
        self.scroll_speed = per_pixel;
    }

    /// Current scroll interval per pixel.
    #[must_use]
    pub const fn scroll_speed(&self) -> Duration {
        self.scroll_speed
    }

    /// Start scrolling over from the entering edge.
    pub const fn reset_scroll(&mut self) {
        self.scroll_offset = 0;
        self.scroll_last_step = None;
    }

    /// Pixels scrolled so far.
    #[must_use]
    pub const fn scroll_offset(&self) -> i32 {
        self.scroll_offset
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ShapeStyle {
    Fill(bool),
    Outline(bool),
}

impl ShapeStyle {
    const fn on(self) -> bool {
        match self {
            Self::Fill(on) | Self::Outline(on) => on,
        }
    }
}

/// `first..=last` clipped to `0..limit`. An empty result has `first > last`.
fn clamp_range(first: i64, last: i64, limit: i32) -> (i64, i64) {
    (first.max(0), last.min(i64::from(limit) - 1))
}

/// `numerator / denominator` rounded to the nearest integer, halves up.
fn rounded_div(numerator: i128, denominator: i128) -> i64 {
    let (numerator, denominator) = if denominator < 0 {
        (-numerator, -denominator)
    } else {
        (numerator, denominator)
    };
    (2 * numerator + denominator).div_euclid(2 * denominator) as i64
}

/// Whether offset `(dx, dy)` from the center lies inside the ellipse with
/// radii `rx + 1/2` and `ry + 1/2`.
fn inside_oval(dx: i64, dy: i64, rx: i64, ry: i64) -> bool {
    if dx.abs() > rx || dy.abs() > ry {
        return false;
    }
    let (dx, dy) = (i128::from(dx), i128::from(dy));
    let (width, height) = (i128::from(2 * rx + 1), i128::from(2 * ry + 1));
    4 * dx * dx * height * height + 4 * dy * dy * width * width <= width * width * height * height
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for Canvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.set(coord.x, coord.y, color.is_on());
        }
        Ok(())
    }
}
