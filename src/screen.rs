//! One object for everything the matrix can do.
//!
//! A [`Screen`] owns a [`DisplaySink`] and a [`FrameClock`] and offers four
//! ways to drive the matrix:
//!
//! - **Simple LED**: [`led`](Screen::led), [`blink`](Screen::blink) and
//!   friends write single cells and show them immediately.
//! - **Animation**: [`play`](Screen::play) frame tables, optionally on several
//!   [layers](Screen::add_layer), and call [`update`](Screen::update) every loop.
//! - **Canvas**: draw between [`begin_draw`](Screen::begin_draw) and
//!   [`end_draw`](Screen::end_draw); one frame is sent per session.
//! - **Hybrid**: [`begin_overlay`](Screen::begin_overlay) starts a canvas
//!   session from the current animation composite so drawings sit on top.
//!
//! Rotation and invert apply to animation and canvas output. Simple LED output
//! is always unrotated so cell `(x, y)` is the physical LED at `(x, y)`.
//!
//! # Example
//!
//! ```
//! use led_reel::{
//!     animation::{Animation, PlayMode},
//!     clock::ManualClock,
//!     display::MemorySink,
//!     screen::Screen,
//! };
//!
//! static HEART: [[u32; 4]; 2] = [
//!     [0x3184_a444, 0x4442_0810, 0x0110_0040, 200],
//!     [0, 0, 0, 200],
//! ];
//!
//! let clock = ManualClock::new();
//! let mut screen: Screen<'_, _, _> = Screen::new(MemorySink::new(), &clock);
//! screen.begin()?;
//! screen.play(Animation::new(&HEART), PlayMode::Loop);
//!
//! screen.update();
//! assert_eq!(screen.sink().last_frame().map(|frame| frame.words()[0]), Some(0x3184_a444));
//! clock.advance_millis(200);
//! screen.update();
//! assert!(screen.sink().last_frame().is_some_and(|frame| frame.is_blank()));
//! # Ok::<(), led_reel::Error>(())
//! ```

use embassy_time::Duration;

use crate::Result;
use crate::animation::{
    Animation, AnimationTrack, LayerSet, MAX_FRAMES_DEFAULT, MAX_LAYERS, PlayMode,
};
use crate::canvas::Canvas;
use crate::clock::FrameClock;
use crate::display::DisplaySink;
use crate::frame::{Frame, Rotation};
use crate::led_grid::LedGrid;

/// Layered animation player, drawing canvas and LED grid over one display.
///
/// Frame numbers are 1-based. Layer 0 is the primary layer used by the
/// single-animation methods.
pub struct Screen<
    'a,
    S: DisplaySink,
    C: FrameClock,
    const LAYERS: usize = MAX_LAYERS,
    const MAX_FRAMES: usize = MAX_FRAMES_DEFAULT,
> {
    sink: S,
    clock: C,
    layers: LayerSet<'a, LAYERS, MAX_FRAMES>,
    canvas: Canvas,
    leds: LedGrid,
    auto_show: bool,
    drawing: bool,
}

impl<'a, S: DisplaySink, C: FrameClock, const LAYERS: usize, const MAX_FRAMES: usize>
    Screen<'a, S, C, LAYERS, MAX_FRAMES>
{
    /// Wrap a display and a clock. Call [`begin`](Self::begin) before showing
    /// anything.
    pub fn new(sink: S, clock: C) -> Self {
        Self {
            sink,
            clock,
            layers: LayerSet::new(),
            canvas: Canvas::new(),
            leds: LedGrid::new(),
            auto_show: true,
            drawing: false,
        }
    }

    /// Start the display.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DisplayInit`](crate::Error::DisplayInit) if the sink
    /// fails to start.
    pub fn begin(&mut self) -> Result<()> {
        self.sink.begin()?;
        info!("Screen::begin: display ready");
        Ok(())
    }

    // ---- animation: primary layer ----

    /// Play every frame of `animation` on the primary layer.
    pub fn play(&mut self, animation: Animation<'a>, mode: PlayMode) {
        self.play_range(animation, mode, 0, 0);
    }

    /// Play frames `start_frame..=end_frame` (1-based) on the primary layer.
    /// A start after the end plays backwards.
    pub fn play_range(
        &mut self,
        animation: Animation<'a>,
        mode: PlayMode,
        start_frame: usize,
        end_frame: usize,
    ) {
        self.play_range_on_layer(0, animation, mode, start_frame, end_frame);
    }

    /// Fixed interval for the primary layer; see
    /// [`AnimationTrack::set_speed`].
    pub fn set_speed(&mut self, speed_ms: i32) {
        self.set_speed_on_layer(0, speed_ms);
    }

    /// Pause the primary layer.
    pub fn pause(&mut self) {
        self.pause_layer(0);
    }

    /// Resume the primary layer.
    pub fn resume(&mut self) {
        self.resume_layer(0);
    }

    /// Return the primary layer to its per-frame timing.
    pub fn restore_original_speed(&mut self) {
        let now = self.clock.now();
        self.layers.restore_original_speed_on(0, now);
    }

    /// Stop the primary layer.
    pub fn stop(&mut self) {
        self.stop_layer(0);
    }

    /// Offset the primary layer by `(dx, dy)` cells.
    pub fn set_position(&mut self, dx: i32, dy: i32) {
        self.set_position_on_layer(0, dx, dy);
    }

    /// Offset of the primary layer.
    #[must_use]
    pub fn position(&self) -> (i32, i32) {
        self.layers.position_on(0)
    }

    /// The primary layer's track, for status queries.
    #[must_use]
    pub fn primary(&self) -> &AnimationTrack<'a, MAX_FRAMES> {
        self.layers.primary()
    }

    /// True while the primary layer is advancing.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.primary().is_playing()
    }

    /// True while the primary layer is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.primary().is_paused()
    }

    /// True once the primary layer finished a one-shot mode.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.primary().is_complete()
    }

    /// True while the primary layer has nothing loaded.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.primary().is_idle()
    }

    /// 1-based frame the primary layer is showing.
    #[must_use]
    pub fn current_frame(&self) -> usize {
        self.primary().current_frame_number()
    }

    /// Frames in the primary layer's animation.
    #[must_use]
    pub fn total_frames(&self) -> usize {
        self.primary().total_frames()
    }

    /// Interval before the primary layer advances.
    #[must_use]
    pub fn current_speed(&self) -> Duration {
        self.primary().current_speed()
    }

    // ---- animation: layers ----

    /// Enable another layer and return its index, or `None` when all are in use.
    pub fn add_layer(&mut self) -> Option<usize> {
        self.layers.add_layer()
    }

    /// Number of enabled layers, including the primary.
    #[must_use]
    pub const fn layer_count(&self) -> usize {
        self.layers.layer_count()
    }

    /// The track on `layer`, if enabled.
    #[must_use]
    pub fn layer(&self, layer: usize) -> Option<&AnimationTrack<'a, MAX_FRAMES>> {
        self.layers.layer(layer)
    }

    /// Play every frame of `animation` on `layer`.
    pub fn play_on_layer(&mut self, layer: usize, animation: Animation<'a>, mode: PlayMode) {
        self.play_range_on_layer(layer, animation, mode, 0, 0);
    }

    /// Play frames `start_frame..=end_frame` (1-based) on `layer`.
    pub fn play_range_on_layer(
        &mut self,
        layer: usize,
        animation: Animation<'a>,
        mode: PlayMode,
        start_frame: usize,
        end_frame: usize,
    ) {
        let now = self.clock.now();
        self.layers
            .start_on(layer, animation, mode, start_frame, end_frame, now);
    }

    /// Fixed interval for `layer`; see [`AnimationTrack::set_speed`].
    pub fn set_speed_on_layer(&mut self, layer: usize, speed_ms: i32) {
        let now = self.clock.now();
        self.layers.set_speed_on(layer, speed_ms, now);
    }

    /// Pause `layer`.
    pub fn pause_layer(&mut self, layer: usize) {
        self.layers.pause_on(layer);
    }

    /// Resume `layer`.
    pub fn resume_layer(&mut self, layer: usize) {
        let now = self.clock.now();
        self.layers.resume_on(layer, now);
    }

    /// Stop `layer`.
    pub fn stop_layer(&mut self, layer: usize) {
        self.layers.stop_on(layer);
    }

    /// Offset `layer` by `(dx, dy)` cells; pixels pushed off an edge are clipped.
    pub fn set_position_on_layer(&mut self, layer: usize, dx: i32, dy: i32) {
        self.layers.set_position_on(layer, dx, dy);
    }

    /// Offset of `layer`.
    #[must_use]
    pub fn position_on_layer(&self, layer: usize) -> (i32, i32) {
        self.layers.position_on(layer)
    }

    /// Advance every layer and show the composite. Call once per loop.
    ///
    /// During a drawing or overlay session the layers still advance but
    /// nothing is sent; the session's end shows the canvas instead.
    pub fn update(&mut self) {
        let now = self.clock.now();
        let composite = self.layers.update(now);
        if self.drawing {
            return;
        }
        let frame = self.canvas.transform_frame(&composite);
        self.sink.load_frame(&frame);
    }

    // ---- canvas ----

    /// Start a drawing session on a cleared canvas.
    pub fn begin_draw(&mut self) {
        self.canvas.clear();
        self.drawing = true;
    }

    /// Finish a drawing session and show the canvas once.
    pub fn end_draw(&mut self) {
        self.drawing = false;
        let frame = self.canvas.to_frame();
        self.sink.load_frame(&frame);
    }

    /// Run `draw` inside a [`begin_draw`](Self::begin_draw) /
    /// [`end_draw`](Self::end_draw) pair.
    pub fn draw(&mut self, draw: impl FnOnce(&mut Canvas)) {
        self.begin_draw();
        draw(&mut self.canvas);
        self.end_draw();
    }

    /// Advance the layers and start a drawing session on top of their
    /// composite.
    pub fn begin_overlay(&mut self) {
        let now = self.clock.now();
        let composite = self.layers.update(now);
        self.canvas.load_frame(&composite);
        self.drawing = true;
    }

    /// Finish an overlay session and show the result.
    pub fn end_overlay(&mut self) {
        self.end_draw();
    }

    /// True between a begin and end of a drawing or overlay session.
    #[must_use]
    pub const fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// The canvas, for reading.
    #[must_use]
    pub const fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// The canvas, for drawing. Changes appear at the next
    /// [`end_draw`](Self::end_draw).
    pub const fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Show `frame` as-is, bypassing layers, canvas and transforms.
    pub fn display_frame(&mut self, frame: &Frame) {
        self.sink.load_frame(frame);
    }

    /// Rotate animation and canvas output.
    pub const fn set_rotation(&mut self, rotation: Rotation) {
        self.canvas.set_rotation(rotation);
    }

    /// Rotate by `degrees`; anything but 0, 90, 180 or 270 is ignored.
    pub fn set_rotation_degrees(&mut self, degrees: u16) {
        match Rotation::try_from(degrees) {
            Ok(rotation) => self.set_rotation(rotation),
            Err(_) => warn!("Screen::set_rotation_degrees: ignoring {} degrees", degrees),
        }
    }

    /// Current rotation.
    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.canvas.rotation()
    }

    /// Invert animation and canvas output.
    pub const fn set_invert(&mut self, invert: bool) {
        self.canvas.set_invert(invert);
    }

    /// Current invert setting.
    #[must_use]
    pub const fn invert(&self) -> bool {
        self.canvas.invert()
    }

    // ---- simple LED ----

    /// Turn LED `(x, y)` on or off, cancelling any blink on it.
    pub fn led(&mut self, x: i32, y: i32, on: bool) {
        self.leds.set(x, y, on);
        self.auto_flush();
    }

    /// Turn LED `index` (`y * 12 + x`) on or off.
    pub fn led_index(&mut self, index: usize, on: bool) {
        self.leds.set_index(index, on);
        self.auto_flush();
    }

    /// Flip LED `(x, y)`, cancelling any blink on it.
    pub fn toggle_led(&mut self, x: i32, y: i32) {
        self.leds.toggle(x, y);
        self.auto_flush();
    }

    /// Flip LED `index`.
    pub fn toggle_led_index(&mut self, index: usize) {
        self.leds.toggle_index(index);
        self.auto_flush();
    }

    /// State of LED `(x, y)`.
    #[must_use]
    pub const fn read_led(&self, x: i32, y: i32) -> bool {
        self.leds.read(x, y)
    }

    /// State of LED `index`.
    #[must_use]
    pub const fn read_led_index(&self, index: usize) -> bool {
        self.leds.read_index(index)
    }

    /// Turn every LED off and stop every blink.
    pub fn clear_leds(&mut self) {
        self.leds.clear();
        self.auto_flush();
    }

    /// Blink LED `(x, y)` every `rate_ms`, starting on. `0` stops the blink.
    pub fn blink(&mut self, x: i32, y: i32, rate_ms: u32) {
        let now = self.clock.now();
        self.leds
            .blink(x, y, Duration::from_millis(u64::from(rate_ms)), now);
        self.auto_flush();
    }

    /// Blink LED `index` every `rate_ms`, starting on.
    pub fn blink_index(&mut self, index: usize, rate_ms: u32) {
        let now = self.clock.now();
        self.leds
            .blink_index(index, Duration::from_millis(u64::from(rate_ms)), now);
        self.auto_flush();
    }

    /// Stop blinking LED `(x, y)` and turn it off.
    pub fn no_blink(&mut self, x: i32, y: i32) {
        self.leds.no_blink(x, y);
        self.auto_flush();
    }

    /// Stop blinking LED `index` and turn it off.
    pub fn no_blink_index(&mut self, index: usize) {
        self.leds.no_blink_index(index);
        self.auto_flush();
    }

    /// Stop every blink; blinking LEDs turn off, steady ones stay.
    pub fn no_blink_all(&mut self) {
        self.leds.no_blink_all();
        self.auto_flush();
    }

    /// Flip every due blinking LED and show the result in one write.
    /// Call once per loop.
    pub fn update_blinks(&mut self) {
        let now = self.clock.now();
        if self.leds.update_blinks(now) {
            self.auto_flush();
        }
    }

    /// Show pending LED changes. Does nothing if nothing changed.
    pub fn show(&mut self) {
        if let Some(frame) = self.leds.take_dirty() {
            self.sink.load_frame(&frame);
        }
    }

    /// With `false`, LED changes wait for [`show`](Self::show).
    pub const fn set_auto_show(&mut self, auto_show: bool) {
        self.auto_show = auto_show;
    }

    /// Current auto-show setting.
    #[must_use]
    pub const fn auto_show(&self) -> bool {
        self.auto_show
    }

    /// The LED grid, for reading.
    #[must_use]
    pub const fn leds(&self) -> &LedGrid {
        &self.leds
    }

    fn auto_flush(&mut self) {
        if self.auto_show {
            self.show();
        }
    }

    // ---- parts ----

    /// The display sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// The display sink, mutably.
    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// The clock.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Give back the sink and clock.
    pub fn into_parts(self) -> (S, C) {
        (self.sink, self.clock)
    }
}
