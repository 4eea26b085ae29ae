#![allow(missing_docs)]
//! Host-level tests for the packed frame layout, bit operations and rotations.

use led_reel::Error;
use led_reel::frame::{Frame, Rotation};

// A small face from the Arduino matrix examples.
const FACE: [u32; 3] = [0x7005_0070, 0x0F80_7005, 0x00D8_0000];

fn central_square_pattern() -> Frame {
    let mut frame = Frame::new();
    for (x, y) in [(2, 0), (3, 0), (4, 1), (9, 7), (5, 5), (8, 2), (2, 6)] {
        frame.set(x, y, true);
    }
    frame
}

#[test]
fn corners_map_to_word_ends() {
    let mut frame = Frame::new();
    frame.set(0, 0, true);
    assert_eq!(frame.words(), [0x8000_0000, 0, 0]);

    let mut frame = Frame::new();
    frame.set(11, 7, true);
    assert_eq!(frame.words(), [0, 0, 0x0000_0001]);

    // Cell 32 is the first bit of the second word.
    let mut frame = Frame::new();
    frame.set(8, 2, true);
    assert_eq!(frame.words(), [0, 0x8000_0000, 0]);
    assert_eq!(Frame::index_of(8, 2), Some(32));
}

#[test]
fn table_rows_decode_to_expected_cells() {
    let frame = Frame::from_words(FACE);
    // Row 0 is `.XXX........`
    assert!(!frame.get(0, 0));
    assert!(frame.get(1, 0));
    assert!(frame.get(2, 0));
    assert!(frame.get(3, 0));
    assert!(!frame.get(4, 0));
    // Row 1 is `.X.X........`
    assert!(frame.get(1, 1));
    assert!(!frame.get(2, 1));
    assert!(frame.get(3, 1));
    assert_eq!(frame.lit_count(), FACE.iter().map(|word| word.count_ones()).sum());
}

#[test]
fn out_of_range_access_is_ignored() {
    let mut frame = Frame::new();
    frame.set(12, 0, true);
    frame.set(0, 8, true);
    frame.set(-1, 3, true);
    frame.set_index(96, true);
    assert!(frame.is_blank());
    assert!(!frame.get(20, 0));
    assert!(!frame.get_index(500));
    assert_eq!(Frame::index_of(-1, 0), None);
}

#[test]
fn or_and_invert() {
    let mut left = Frame::new();
    left.set(0, 0, true);
    let mut right = Frame::new();
    right.set(11, 7, true);

    let both = left | right;
    assert_eq!(both.lit_count(), 2);
    assert!(both.get(0, 0) && both.get(11, 7));

    let mut accumulated = Frame::new();
    accumulated |= left;
    accumulated |= right;
    assert_eq!(accumulated, both);

    let inverted = !both;
    assert_eq!(inverted.lit_count(), 94);
    assert!(!inverted.get(0, 0));
    assert!(inverted.get(5, 5));
    assert_eq!(!Frame::filled(false), Frame::filled(true));
}

#[test]
fn shift_moves_and_clips() {
    let mut frame = Frame::new();
    frame.set(0, 0, true);
    frame.set(11, 0, true);

    let shifted = frame.shifted(3, 2);
    assert!(shifted.get(3, 2));
    assert_eq!(shifted.lit_count(), 1, "cell pushed past the right edge is dropped");

    assert_eq!(frame.shifted(0, 0), frame);
    assert!(frame.shifted(0, 8).is_blank());
    assert!(frame.shifted(-12, 0).is_blank());
}

#[test]
fn half_turn_twice_is_identity() {
    let frame = Frame::from_words(FACE);
    let once = frame.rotated(Rotation::Deg180);
    assert_ne!(once, frame);
    assert!(once.get(11 - 1, 7), "top-left area lands bottom-right");
    assert_eq!(once.rotated(Rotation::Deg180), frame);
}

#[test]
fn quarter_turns_cycle_on_central_square() {
    let frame = central_square_pattern();
    let mut rotated = frame;
    for _ in 0..4 {
        rotated = rotated.rotated(Rotation::Deg90);
    }
    assert_eq!(rotated, frame);

    let there_and_back = frame.rotated(Rotation::Deg90).rotated(Rotation::Deg270);
    assert_eq!(there_and_back, frame);
}

#[test]
fn quarter_turn_is_clockwise_and_crops_sides() {
    let mut frame = Frame::new();
    frame.set(2, 0, true); // top-left of the central square
    let rotated = frame.rotated(Rotation::Deg90);
    assert!(rotated.get(9, 0), "top-left goes to top-right");
    assert_eq!(rotated.lit_count(), 1);

    let side_bands = Frame::filled(true);
    let rotated = side_bands.rotated(Rotation::Deg270);
    for y in 0..8 {
        assert!(!rotated.get(0, y) && !rotated.get(1, y));
        assert!(!rotated.get(10, y) && !rotated.get(11, y));
        assert!(rotated.get(2, y) && rotated.get(9, y));
    }
}

#[test]
fn rotation_from_degrees() {
    assert_eq!(Rotation::try_from(0), Ok(Rotation::Deg0));
    assert_eq!(Rotation::try_from(270), Ok(Rotation::Deg270));
    assert_eq!(Rotation::Deg90.degrees(), 90);
    assert_eq!(
        Rotation::try_from(45),
        Err(Error::InvalidRotation { degrees: 45 })
    );
}
