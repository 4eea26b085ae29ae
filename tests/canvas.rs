#![allow(missing_docs)]
//! Host-level tests for canvas drawing, packing and transforms.

use embassy_time::{Duration, Instant};
use embedded_graphics::{
    Drawable, Pixel,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    primitives::{Line, Primitive, PrimitiveStyle},
};
use led_reel::canvas::{Canvas, ScrollDirection};
use led_reel::frame::{Frame, Rotation};

const FACE: [u32; 3] = [0x7005_0070, 0x0F80_7005, 0x00D8_0000];

fn lit(canvas: &Canvas) -> Vec<(i32, i32)> {
    let frame = canvas.raw_frame();
    (0..8)
        .flat_map(|y| (0..12).map(move |x| (x, y)))
        .filter(|&(x, y)| frame.get(x, y))
        .collect()
}

#[test]
fn frame_round_trips_through_the_buffer() {
    let frame = Frame::from_words(FACE);
    let mut canvas = Canvas::new();
    canvas.load_frame(&frame);
    assert_eq!(canvas.to_frame(), frame);

    canvas.load_frame(&Frame::new());
    assert!(canvas.to_frame().is_blank());
}

#[test]
fn transforms_apply_rotation_then_invert() {
    let mut canvas = Canvas::new();
    canvas.point(0, 0);
    canvas.set_rotation(Rotation::Deg180);
    let frame = canvas.to_frame();
    assert!(frame.get(11, 7));
    assert_eq!(frame.lit_count(), 1);

    canvas.set_invert(true);
    let frame = canvas.to_frame();
    assert!(!frame.get(11, 7));
    assert_eq!(frame.lit_count(), 95);
    assert_eq!(canvas.raw_frame().lit_count(), 1, "buffer itself is untouched");
}

#[test]
fn points_and_lines_use_the_stroke() {
    let mut canvas = Canvas::new();
    canvas.line(0, 0, 3, 3);
    assert_eq!(lit(&canvas), [(0, 0), (1, 1), (2, 2), (3, 3)]);

    canvas.clear();
    canvas.line(3, 5, 0, 5);
    assert_eq!(lit(&canvas), [(0, 5), (1, 5), (2, 5), (3, 5)]);

    canvas.clear();
    canvas.no_stroke();
    canvas.line(0, 0, 11, 7);
    canvas.point(4, 4);
    assert!(lit(&canvas).is_empty());

    canvas.stroke(true);
    canvas.line(-5, 0, 20, 0);
    assert_eq!(lit(&canvas).len(), 12, "clipped to the canvas");
}

#[test]
fn rect_fills_first_then_strokes() {
    let mut canvas = Canvas::new();
    canvas.rect(0, 0, 4, 3);
    let outline = lit(&canvas);
    assert_eq!(outline.len(), 10);
    assert!(!canvas.get(1, 1) && !canvas.get(2, 1));

    canvas.clear();
    canvas.fill(true);
    canvas.no_stroke();
    canvas.rect(2, 2, 3, 2);
    assert_eq!(lit(&canvas), [(2, 2), (3, 2), (4, 2), (2, 3), (3, 3), (4, 3)]);

    // Dark fill with a lit border leaves the border.
    canvas.background(true);
    canvas.fill(false);
    canvas.stroke(true);
    canvas.rect(0, 0, 5, 5);
    assert!(canvas.get(0, 0) && canvas.get(4, 4));
    assert!(!canvas.get(2, 2));
    assert!(canvas.get(6, 6), "outside the rect is untouched");

    canvas.clear();
    canvas.rect(0, 0, 0, 5);
    assert!(lit(&canvas).is_empty());
}

#[test]
fn circle_outline_and_fill() {
    let mut canvas = Canvas::new();
    canvas.circle(5, 3, 6);
    // Radius 3: the four extreme points are on, the center is off.
    for (x, y) in [(8, 3), (2, 3), (5, 6), (5, 0)] {
        assert!(canvas.get(x, y), "({x}, {y}) on the outline");
    }
    assert!(!canvas.get(5, 3));
    let outline = lit(&canvas).len();

    canvas.clear();
    canvas.fill(true);
    canvas.circle(5, 3, 6);
    assert!(canvas.get(5, 3));
    assert!(lit(&canvas).len() > outline);

    canvas.clear();
    canvas.circle(0, 0, 1);
    assert_eq!(lit(&canvas), [(0, 0)]);
}

#[test]
fn circle_with_fill_and_stroke_draws_only_the_fill() {
    let mut filled_only = Canvas::new();
    filled_only.no_stroke();
    filled_only.fill(true);
    filled_only.circle(6, 4, 6);

    let mut both = Canvas::new();
    both.fill(true);
    both.circle(6, 4, 6);
    assert_eq!(both.raw_frame(), filled_only.raw_frame());

    // A dark fill over a lit background leaves no outline.
    let mut dark = Canvas::new();
    dark.background(true);
    dark.fill(false);
    dark.circle(6, 4, 6);
    assert!(!dark.get(9, 4) && !dark.get(6, 4));
}

#[test]
fn ellipse_shapes() {
    let mut canvas = Canvas::new();
    canvas.ellipse(6, 4, 10, 6);
    for (x, y) in [(1, 4), (11, 4), (6, 1), (6, 7)] {
        assert!(canvas.get(x, y), "({x}, {y}) on the outline");
    }
    assert!(!canvas.get(6, 4));

    canvas.clear();
    canvas.fill(true);
    canvas.ellipse(6, 4, 10, 6);
    assert!(canvas.get(6, 4));
    assert!(!canvas.get(0, 0));

    canvas.clear();
    canvas.ellipse(6, 4, 5, 1);
    assert_eq!(lit(&canvas), [(4, 4), (5, 4), (6, 4), (7, 4), (8, 4)]);

    canvas.clear();
    canvas.ellipse(6, 4, 1, 3);
    assert_eq!(lit(&canvas), [(6, 3), (6, 4), (6, 5)]);
}

#[test]
fn text_draws_glyphs_left_to_right() {
    let mut canvas = Canvas::new();
    canvas.text("1", 0, 0);
    // '1' is .X. / XX. / .X. / .X. / XXX
    assert_eq!(
        lit(&canvas),
        [(1, 0), (0, 1), (1, 1), (1, 2), (1, 3), (0, 4), (1, 4), (2, 4)]
    );

    canvas.clear();
    canvas.text("hi", 0, 0);
    let mut upper = Canvas::new();
    upper.text("HI", 0, 0);
    assert_eq!(canvas.raw_frame(), upper.raw_frame(), "lowercase folds");
    assert!(canvas.get(4, 0), "second glyph starts after one blank column");
    assert!(!canvas.get(3, 0));

    assert_eq!(canvas.text_width("HI"), 7);
    canvas.set_text_size(2);
    assert_eq!(canvas.text_width("HI"), 14);
    canvas.set_text_size(9);
    assert_eq!(canvas.text_size(), 2);

    canvas.clear();
    canvas.text("-", 0, 0);
    // Scaled '-' is rows 4..=5, columns 0..=5.
    assert_eq!(lit(&canvas).len(), 12);
    assert!(canvas.get(5, 5) && !canvas.get(5, 6));
}

#[test]
fn unknown_characters_are_blank_but_take_space() {
    let mut canvas = Canvas::new();
    canvas.text("~1", 0, 0);
    assert!(!canvas.get(1, 0));
    assert!(canvas.get(5, 0), "'1' drawn in the second slot");
}

#[test]
fn scroll_text_moves_one_pixel_per_interval_and_wraps() {
    let mut canvas = Canvas::new();
    canvas.set_scroll_speed(Duration::from_millis(50));
    let width = canvas.text_width("I");
    assert_eq!(width, 3);

    // First call starts the timer with the text just off the right edge.
    canvas.scroll_text("I", 0, ScrollDirection::Left, Instant::from_millis(0));
    assert!(lit(&canvas).is_empty());
    assert_eq!(canvas.scroll_offset(), 0);

    canvas.clear();
    canvas.scroll_text("I", 0, ScrollDirection::Left, Instant::from_millis(50));
    assert_eq!(canvas.scroll_offset(), 1);
    assert!(canvas.get(11, 0), "left column of 'I' enters at x = 11");

    // A long gap still moves only one pixel.
    canvas.clear();
    canvas.scroll_text("I", 0, ScrollDirection::Left, Instant::from_millis(5_000));
    assert_eq!(canvas.scroll_offset(), 2);

    let mut now = 5_000;
    while canvas.scroll_offset() != 0 {
        now += 50;
        canvas.clear();
        canvas.scroll_text("I", 0, ScrollDirection::Left, Instant::from_millis(now));
        assert!(canvas.scroll_offset() <= width + 12);
    }
    assert_eq!(now, 5_000 + 50 * 14, "wraps once the text has left the window");

    canvas.reset_scroll();
    canvas.clear();
    canvas.scroll_text("I", 0, ScrollDirection::Right, Instant::from_millis(0));
    assert!(lit(&canvas).is_empty());
    canvas.scroll_text("I", 0, ScrollDirection::Right, Instant::from_millis(50));
    assert!(canvas.get(0, 0), "right column of 'I' enters at x = 0");
}

#[test]
fn embedded_graphics_can_draw_on_the_canvas() {
    let mut canvas = Canvas::new();
    assert_eq!(canvas.size(), Size::new(12, 8));
    Line::new(Point::new(0, 7), Point::new(11, 7))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(&mut canvas)
        .expect("infallible");
    assert_eq!(lit(&canvas).len(), 12);

    Pixel(Point::new(3, 7), BinaryColor::Off)
        .draw(&mut canvas)
        .expect("infallible");
    Pixel(Point::new(40, 40), BinaryColor::On)
        .draw(&mut canvas)
        .expect("infallible");
    assert_eq!(lit(&canvas).len(), 11);
}

#[test]
fn extreme_line_coordinates_clip_without_overflow() {
    let mut canvas = Canvas::new();
    canvas.line(-10, 0, i32::MAX, 0);
    assert_eq!(lit(&canvas).len(), 12);

    canvas.clear();
    canvas.line(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
    assert_eq!(lit(&canvas), (0..8).map(|i| (i, i)).collect::<Vec<_>>());

    canvas.clear();
    canvas.line(i32::MAX, i32::MIN, i32::MAX, i32::MAX);
    canvas.line(i32::MIN, 3, i32::MIN, 3);
    assert!(lit(&canvas).is_empty());
}

#[test]
fn extreme_rect_coordinates_clip_without_overflow() {
    let mut canvas = Canvas::new();
    canvas.rect(i32::MAX - 1, 0, 5, 1);
    canvas.rect(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
    assert!(lit(&canvas).is_empty());

    canvas.rect(0, 0, 1_000_000_000, 1);
    assert_eq!(lit(&canvas).len(), 12);

    canvas.clear();
    canvas.fill(true);
    canvas.rect(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
    assert!(lit(&canvas).is_empty());
    canvas.rect(-5, -5, i32::MAX, i32::MAX);
    assert_eq!(lit(&canvas).len(), 96);
}

#[test]
fn extreme_circle_and_ellipse_sizes_clip_without_overflow() {
    let mut canvas = Canvas::new();
    canvas.circle(i32::MAX, i32::MAX, i32::MAX);
    canvas.circle(i32::MIN, i32::MIN, i32::MAX);
    canvas.ellipse(i32::MIN, 4, i32::MAX, 1);
    canvas.ellipse(6, i32::MAX, 3, i32::MAX);
    assert!(lit(&canvas).is_empty());

    // Every cell is deep inside, so no cell is on the outline.
    canvas.circle(0, 0, i32::MAX);
    canvas.ellipse(6, 4, i32::MAX, i32::MAX);
    assert!(lit(&canvas).is_empty());

    canvas.ellipse(6, 0, 1, i32::MAX);
    assert_eq!(lit(&canvas), (0..8).map(|y| (6, y)).collect::<Vec<_>>());

    canvas.clear();
    canvas.fill(true);
    canvas.circle(0, 0, i32::MAX);
    assert_eq!(lit(&canvas).len(), 96);
}

#[test]
fn extreme_text_positions_draw_nothing() {
    let mut canvas = Canvas::new();
    canvas.text("HELLO", 0, i32::MAX);
    canvas.text("HELLO", i32::MIN, 0);
    canvas.text("HELLO", i32::MAX, i32::MIN);
    assert!(lit(&canvas).is_empty());
}
