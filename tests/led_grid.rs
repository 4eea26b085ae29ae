#![allow(missing_docs)]
//! Host-level tests for single-LED writes and blinking.

use embassy_time::{Duration, Instant};
use led_reel::led_grid::LedGrid;

fn at(millis: u64) -> Instant {
    Instant::from_millis(millis)
}

const RATE: Duration = Duration::from_millis(100);

#[test]
fn writes_and_reads_by_coordinate_and_index() {
    let mut grid = LedGrid::new();
    grid.set(3, 2, true);
    assert!(grid.read(3, 2));
    assert!(grid.read_index(2 * 12 + 3));

    grid.set_index(95, true);
    assert!(grid.read(11, 7));

    grid.toggle(3, 2);
    grid.toggle_index(0);
    assert!(!grid.read(3, 2));
    assert!(grid.read(0, 0));
    assert_eq!(grid.frame().lit_count(), 2);
}

#[test]
fn out_of_range_addresses_are_ignored() {
    let mut grid = LedGrid::new();
    grid.set(20, 0, true);
    grid.set(0, -1, true);
    grid.set_index(96, true);
    grid.toggle_index(200);
    grid.blink(12, 0, RATE, at(0));
    grid.blink_index(96, RATE, at(0));
    assert!(grid.frame().is_blank());
    assert!(!grid.is_dirty());
    assert!(!grid.read(20, 0));
    assert!(!grid.is_blinking(12, 0));
}

#[test]
fn blink_starts_lit_and_flips_once_per_interval() {
    let mut grid = LedGrid::new();
    grid.blink(0, 0, RATE, at(0));
    assert!(grid.read(0, 0));
    assert!(grid.is_blinking(0, 0));

    assert!(!grid.update_blinks(at(50)));
    assert!(grid.update_blinks(at(100)));
    assert!(!grid.read(0, 0));
    assert!(grid.update_blinks(at(200)));
    assert!(grid.read(0, 0));

    // A long stall flips only once.
    assert!(grid.update_blinks(at(1_000)));
    assert!(!grid.read(0, 0));
    assert!(!grid.update_blinks(at(1_050)));
}

#[test]
fn exactly_two_toggles_over_two_intervals() {
    let mut grid = LedGrid::new();
    grid.blink(0, 0, RATE, at(0));
    let mut toggles = 0;
    let mut last = grid.read(0, 0);
    for millis in [100, 200] {
        grid.update_blinks(at(millis));
        if grid.read(0, 0) != last {
            toggles += 1;
            last = grid.read(0, 0);
        }
    }
    assert_eq!(toggles, 2);
}

#[test]
fn writes_cancel_blinking() {
    let mut grid = LedGrid::new();
    grid.blink(1, 1, RATE, at(0));
    grid.set(1, 1, true);
    assert!(!grid.is_blinking(1, 1));
    assert!(!grid.update_blinks(at(500)));
    assert!(grid.read(1, 1));

    grid.blink(2, 2, RATE, at(0));
    grid.toggle(2, 2);
    assert!(!grid.is_blinking(2, 2));
    assert!(!grid.read(2, 2));
}

#[test]
fn no_blink_turns_the_cell_off() {
    let mut grid = LedGrid::new();
    grid.blink_index(5, RATE, at(0));
    grid.no_blink_index(5);
    assert!(!grid.is_blinking_index(5));
    assert!(!grid.read_index(5));

    grid.blink(6, 0, RATE, at(0));
    grid.blink(6, 0, Duration::from_millis(0), at(0));
    assert!(!grid.is_blinking(6, 0));
    assert!(!grid.read(6, 0));
}

#[test]
fn no_blink_all_leaves_steady_cells() {
    let mut grid = LedGrid::new();
    grid.set(0, 0, true);
    grid.blink(1, 0, RATE, at(0));
    grid.blink(2, 0, RATE, at(0));
    grid.no_blink_all();
    assert!(grid.read(0, 0));
    assert!(!grid.read(1, 0) && !grid.read(2, 0));
    assert!(!grid.is_blinking(1, 0) && !grid.is_blinking(2, 0));
}

#[test]
fn dirty_tracks_real_changes() {
    let mut grid = LedGrid::new();
    assert_eq!(grid.take_dirty(), None);

    grid.set(4, 4, true);
    assert!(grid.is_dirty());
    let frame = grid.take_dirty().expect("a change was made");
    assert!(frame.get(4, 4));
    assert!(!grid.is_dirty());

    grid.set(4, 4, true);
    assert_eq!(grid.take_dirty(), None, "rewriting the same value is not a change");

    grid.clear();
    assert!(grid.take_dirty().expect("clear turned a cell off").is_blank());
    grid.clear();
    assert_eq!(grid.take_dirty(), None);
}

#[test]
fn clear_stops_blinks() {
    let mut grid = LedGrid::new();
    grid.blink(3, 3, RATE, at(0));
    grid.clear();
    assert!(!grid.is_blinking(3, 3));
    assert!(!grid.update_blinks(at(1_000)));
    assert!(grid.frame().is_blank());
}
