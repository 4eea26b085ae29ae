#![allow(missing_docs)]
//! Host-level tests for layer compositing and per-layer control.

use embassy_time::Instant;
use led_reel::animation::{Animation, LayerSet, MAX_LAYERS, PlayMode};
use led_reel::frame::Frame;

static TOP_LEFT: [[u32; 4]; 1] = [[0x8000_0000, 0, 0, 100]];
static BOTTOM_RIGHT: [[u32; 4]; 1] = [[0, 0, 0x0000_0001, 100]];
static TWO_STEP: [[u32; 4]; 2] = [[0x8000_0000, 0, 0, 100], [0x4000_0000, 0, 0, 100]];

fn at(millis: u64) -> Instant {
    Instant::from_millis(millis)
}

#[test]
fn composite_is_the_or_of_layers() {
    let mut layers: LayerSet<'_> = LayerSet::new();
    let second = layers.add_layer().expect("room for a second layer");
    layers.start_on(0, Animation::new(&TOP_LEFT), PlayMode::Loop, 0, 0, at(0));
    layers.start_on(second, Animation::new(&BOTTOM_RIGHT), PlayMode::Loop, 0, 0, at(0));

    let composite = layers.update(at(0));
    assert_eq!(composite.words(), [0x8000_0000, 0, 0x0000_0001]);
    assert_eq!(composite.lit_count(), 2);
}

#[test]
fn idle_and_unadded_layers_contribute_nothing() {
    let mut layers: LayerSet<'_> = LayerSet::new();
    assert!(layers.update(at(0)).is_blank());

    // Layer 1 has not been added yet, so this is ignored.
    layers.start_on(1, Animation::new(&TOP_LEFT), PlayMode::Loop, 0, 0, at(0));
    assert!(layers.update(at(0)).is_blank());
    assert!(layers.layer(1).is_none());

    let second = layers.add_layer().expect("room for a second layer");
    layers.start_on(second, Animation::new(&TOP_LEFT), PlayMode::Loop, 0, 0, at(0));
    layers.stop_on(second);
    assert!(layers.update(at(0)).is_blank());
}

#[test]
fn completed_layer_keeps_its_last_frame() {
    let mut layers: LayerSet<'_> = LayerSet::new();
    layers.start_on(0, Animation::new(&TWO_STEP), PlayMode::Once, 0, 0, at(0));
    layers.update(at(100));
    layers.update(at(200));
    assert!(layers.primary().is_complete());
    assert_eq!(layers.composite().words(), [0x4000_0000, 0, 0]);
}

#[test]
fn capacity_is_fixed() {
    let mut layers: LayerSet<'_> = LayerSet::new();
    assert_eq!(layers.layer_count(), 1);
    let added: Vec<_> = core::iter::from_fn(|| layers.add_layer()).collect();
    assert_eq!(added, (1..MAX_LAYERS).collect::<Vec<_>>());
    assert_eq!(layers.layer_count(), MAX_LAYERS);
    assert_eq!(layers.add_layer(), None);

    let mut pair: LayerSet<'_, 2> = LayerSet::new();
    assert_eq!(pair.add_layer(), Some(1));
    assert_eq!(pair.add_layer(), None);
}

#[test]
fn layers_advance_independently() {
    let mut layers: LayerSet<'_> = LayerSet::new();
    let fast = layers.add_layer().expect("room for a second layer");
    layers.start_on(0, Animation::new(&TWO_STEP), PlayMode::Loop, 0, 0, at(0));
    layers.start_on(fast, Animation::new(&TWO_STEP), PlayMode::Loop, 0, 0, at(0));
    layers.set_speed_on(fast, 25, at(0));
    layers.set_position_on(fast, 0, 1);

    let composite = layers.update(at(25));
    // Primary still on frame 1 at (0, 0); fast layer moved to frame 2 at (1, 1).
    assert!(composite.get(0, 0));
    assert!(composite.get(1, 1));
    assert_eq!(composite.lit_count(), 2);

    layers.pause_on(0);
    layers.update(at(1_000));
    assert_eq!(layers.primary().current_index(), 0);
    layers.resume_on(0, at(1_000));
    layers.update(at(1_100));
    assert_eq!(layers.primary().current_index(), 1);
}

#[test]
fn offsets_shift_clip_and_persist() {
    let mut layers: LayerSet<'_> = LayerSet::new();
    layers.set_position_on(0, 11, 7);
    layers.start_on(0, Animation::new(&TOP_LEFT), PlayMode::Loop, 0, 0, at(0));
    assert_eq!(layers.update(at(0)).words(), [0, 0, 0x0000_0001]);

    layers.stop_on(0);
    layers.start_on(0, Animation::new(&BOTTOM_RIGHT), PlayMode::Loop, 0, 0, at(0));
    assert_eq!(layers.position_on(0), (11, 7));
    assert!(layers.update(at(0)).is_blank(), "shifted past the corner");

    layers.set_position_on(0, -11, -7);
    let mut expected = Frame::new();
    expected.set(0, 0, true);
    assert_eq!(layers.update(at(0)), expected);

    // Offsets for layers that are not enabled are ignored.
    layers.set_position_on(3, 2, 2);
    assert_eq!(layers.position_on(3), (0, 0));
}

#[test]
fn single_layer_set_has_a_primary() {
    let mut single: LayerSet<'_, 1> = LayerSet::new();
    assert_eq!(LayerSet::<'_, 1>::CAPACITY, 1);
    assert_eq!(single.add_layer(), None);
    assert!(single.primary().is_idle());

    single
        .primary_mut()
        .start(Animation::new(&TOP_LEFT), PlayMode::Loop, 0, 0, at(0));
    assert!(single.primary().is_playing());
    assert_eq!(single.update(at(0)).words(), [0x8000_0000, 0, 0]);
}
