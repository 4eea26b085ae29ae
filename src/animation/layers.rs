//! Several tracks composited into one frame.

use embassy_time::Instant;

use super::{Animation, AnimationTrack, MAX_FRAMES_DEFAULT, MAX_LAYERS, PlayMode};
use crate::frame::Frame;

/// A fixed set of independent [`AnimationTrack`]s.
///
/// Layer 0 always exists and is the primary layer; more are enabled with
/// [`add_layer`](Self::add_layer). Each update ORs the current frame of every
/// non-idle layer, shifted by that layer's position offset, into one
/// composite. There is no occlusion: a cell lit by any layer is lit.
///
/// Calls naming a layer that has not been added are ignored.
#[derive(Clone, Debug)]
pub struct LayerSet<
    'a,
    const LAYERS: usize = MAX_LAYERS,
    const MAX_FRAMES: usize = MAX_FRAMES_DEFAULT,
> {
    tracks: [AnimationTrack<'a, MAX_FRAMES>; LAYERS],
    offsets: [(i32, i32); LAYERS],
    active: usize,
}

impl<const LAYERS: usize, const MAX_FRAMES: usize> Default for LayerSet<'_, LAYERS, MAX_FRAMES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const LAYERS: usize, const MAX_FRAMES: usize> LayerSet<'a, LAYERS, MAX_FRAMES> {
    /// Layer capacity.
    pub const CAPACITY: usize = LAYERS;

    /// A set with only the primary layer enabled.
    ///
    /// A zero-layer set is rejected at compile time.
    #[must_use]
    pub fn new() -> Self {
        const { assert!(LAYERS > 0, "a LayerSet needs room for its primary layer") };
        Self {
            tracks: core::array::from_fn(|_| AnimationTrack::new()),
            offsets: [(0, 0); LAYERS],
            active: 1,
        }
    }

    /// Enable the next layer and return its index, or `None` when full.
    pub fn add_layer(&mut self) -> Option<usize> {
        if self.active >= LAYERS {
            warn!("LayerSet::add_layer: all {} layers in use", LAYERS);
            return None;
        }
        let layer = self.active;
        self.active += 1;
        debug!("LayerSet::add_layer: layer {} enabled", layer);
        Some(layer)
    }

    /// Number of enabled layers, including the primary.
    #[must_use]
    pub const fn layer_count(&self) -> usize {
        self.active
    }

    /// The track on `layer`, if enabled.
    #[must_use]
    pub fn layer(&self, layer: usize) -> Option<&AnimationTrack<'a, MAX_FRAMES>> {
        self.tracks.get(layer).filter(|_| layer < self.active)
    }

    /// The track on `layer` for direct control, if enabled.
    pub fn layer_mut(&mut self, layer: usize) -> Option<&mut AnimationTrack<'a, MAX_FRAMES>> {
        if layer >= self.active {
            return None;
        }
        self.tracks.get_mut(layer)
    }

    /// The primary layer.
    #[must_use]
    #[expect(clippy::indexing_slicing, reason = "new() rejects LAYERS == 0")]
    pub fn primary(&self) -> &AnimationTrack<'a, MAX_FRAMES> {
        &self.tracks[0]
    }

    /// The primary layer for direct control.
    #[expect(clippy::indexing_slicing, reason = "new() rejects LAYERS == 0")]
    pub fn primary_mut(&mut self) -> &mut AnimationTrack<'a, MAX_FRAMES> {
        &mut self.tracks[0]
    }

    /// Start `animation` on `layer` over the 1-based range
    /// `start_frame..=end_frame` (`0, 0` for all frames).
    pub fn start_on(
        &mut self,
        layer: usize,
        animation: Animation<'a>,
        mode: PlayMode,
        start_frame: usize,
        end_frame: usize,
        now: Instant,
    ) {
        if let Some(track) = self.layer_mut(layer) {
            track.start(animation, mode, start_frame, end_frame, now);
        }
    }

    /// See [`AnimationTrack::set_speed`].
    pub fn set_speed_on(&mut self, layer: usize, speed_ms: i32, now: Instant) {
        if let Some(track) = self.layer_mut(layer) {
            track.set_speed(speed_ms, now);
        }
    }

    /// See [`AnimationTrack::pause`].
    pub fn pause_on(&mut self, layer: usize) {
        if let Some(track) = self.layer_mut(layer) {
            track.pause();
        }
    }

    /// See [`AnimationTrack::resume`].
    pub fn resume_on(&mut self, layer: usize, now: Instant) {
        if let Some(track) = self.layer_mut(layer) {
            track.resume(now);
        }
    }

    /// See [`AnimationTrack::restore_original_speed`].
    pub fn restore_original_speed_on(&mut self, layer: usize, now: Instant) {
        if let Some(track) = self.layer_mut(layer) {
            track.restore_original_speed(now);
        }
    }

    /// See [`AnimationTrack::stop`].
    pub fn stop_on(&mut self, layer: usize) {
        if let Some(track) = self.layer_mut(layer) {
            track.stop();
        }
    }

    /// Draw `layer` shifted by `(dx, dy)` cells. The offset belongs to the
    /// layer and survives starts and stops.
    pub fn set_position_on(&mut self, layer: usize, dx: i32, dy: i32) {
        if layer >= self.active {
            return;
        }
        if let Some(offset) = self.offsets.get_mut(layer) {
            *offset = (dx, dy);
        }
    }

    /// Offset of `layer`; `(0, 0)` for layers not enabled.
    #[must_use]
    pub fn position_on(&self, layer: usize) -> (i32, i32) {
        if layer >= self.active {
            return (0, 0);
        }
        self.offsets.get(layer).copied().unwrap_or((0, 0))
    }

    /// Advance every enabled layer, then return the composite.
    pub fn update(&mut self, now: Instant) -> Frame {
        for track in self.tracks.iter_mut().take(self.active) {
            track.update_frame(now);
        }
        self.composite()
    }

    /// OR of every enabled, non-idle layer's current frame at its offset.
    #[must_use]
    pub fn composite(&self) -> Frame {
        self.tracks
            .iter()
            .zip(self.offsets.iter())
            .take(self.active)
            .filter_map(|(track, &(dx, dy))| track.frame().map(|frame| frame.shifted(dx, dy)))
            .fold(Frame::new(), |composite, frame| composite | frame)
    }

    /// Stop every layer. Enabled layers stay enabled.
    pub fn stop_all(&mut self) {
        for track in &mut self.tracks {
            track.stop();
        }
    }
}
