//! A single animation playback lane.

use embassy_time::{Duration, Instant};
use heapless::Vec;

use super::{
    Animation, Direction, Event, MAX_FRAMES_DEFAULT, PlayMode, PlaybackState, Step, next_step,
};
use crate::clock::elapsed;
use crate::frame::Frame;

/// Playback state for one [`Animation`].
///
/// The track borrows the frame table for `'a` and keeps its own copy of the
/// per-frame hold times (up to `MAX_FRAMES` of them). Frame numbers in the
/// public API are 1-based and inclusive, matching how animation tables are
/// usually described; `0` for both range ends means "all frames".
///
/// Time never advances on its own: [`update_frame`](Self::update_frame) moves
/// at most one frame per call, however long it has been since the last call.
#[derive(Clone, Debug)]
pub struct AnimationTrack<'a, const MAX_FRAMES: usize = MAX_FRAMES_DEFAULT> {
    animation: Option<Animation<'a>>,
    timings: Vec<Duration, MAX_FRAMES>,
    current_index: usize,
    start_index: usize,
    end_index: usize,
    mode: PlayMode,
    direction: Direction,
    is_reversing: bool,
    state: PlaybackState,
    last_update: Instant,
    speed_override: Option<Duration>,
    speed_reversed: bool,
}

impl<const MAX_FRAMES: usize> Default for AnimationTrack<'_, MAX_FRAMES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const MAX_FRAMES: usize> AnimationTrack<'a, MAX_FRAMES> {
    /// An idle track.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            animation: None,
            timings: Vec::new(),
            current_index: 0,
            start_index: 0,
            end_index: 0,
            mode: PlayMode::Once,
            direction: Direction::Forward,
            is_reversing: false,
            state: PlaybackState::Idle,
            last_update: Instant::from_ticks(0),
            speed_override: None,
            speed_reversed: false,
        }
    }

    /// Begin playing `animation` over the 1-based inclusive range
    /// `start_frame..=end_frame`.
    ///
    /// - `(0, 0)` plays every frame; an `end_frame` of 0 alone means "through
    ///   the last frame".
    /// - Each end is clamped into `1..=len`.
    /// - A start after the end plays the range backwards.
    ///
    /// An empty animation, or one with more than `MAX_FRAMES` frames, leaves
    /// the track idle. A custom speed set earlier stays in effect.
    pub fn start(
        &mut self,
        animation: Animation<'a>,
        mode: PlayMode,
        start_frame: usize,
        end_frame: usize,
        now: Instant,
    ) {
        self.release();

        let frame_count = animation.len();
        if frame_count == 0 {
            debug!("AnimationTrack::start: empty animation, staying idle");
            return;
        }
        let mut timings = Vec::new();
        for duration in animation.durations() {
            if timings.push(duration).is_err() {
                warn!(
                    "AnimationTrack::start: {} frames exceed capacity {}, staying idle",
                    frame_count,
                    MAX_FRAMES
                );
                return;
            }
        }
        self.timings = timings;

        let clamp = |frame: usize| frame.clamp(1, frame_count) - 1;
        let (start_index, end_index) = match (start_frame, end_frame) {
            (0, 0) => (0, frame_count - 1),
            (start, 0) => (clamp(start), frame_count - 1),
            (start, end) => (clamp(start), clamp(end)),
        };
        if start_index > end_index {
            self.start_index = end_index;
            self.end_index = start_index;
            self.direction = Direction::Backward;
            self.current_index = start_index;
        } else {
            self.start_index = start_index;
            self.end_index = end_index;
            self.direction = Direction::Forward;
            self.current_index = start_index;
        }

        self.animation = Some(animation);
        self.mode = mode;
        self.is_reversing = false;
        self.fire(Event::Start, now);
        debug!(
            "AnimationTrack::start: {} frames, range {}..={}, {}",
            frame_count,
            self.start_index,
            self.end_index,
            self.direction
        );
    }

    /// Advance one frame if the current frame's hold time has elapsed.
    ///
    /// Returns `true` when the visible frame changed or the track just
    /// completed.
    pub fn update_frame(&mut self, now: Instant) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        let interval = self.current_speed();
        if elapsed(now, self.last_update) < interval {
            return false;
        }

        let (origin, far) = if self.travels_backward() {
            (self.end_index, self.start_index)
        } else {
            (self.start_index, self.end_index)
        };
        match next_step(self.current_index, self.is_reversing, origin, far, self.mode) {
            Step::Advance { index, reversing } => {
                self.current_index = index;
                self.is_reversing = reversing;
                self.last_update = now;
                trace!("AnimationTrack::update_frame: frame {}", index);
            }
            Step::Finish { index } => {
                self.current_index = index;
                self.is_reversing = false;
                self.fire(Event::Finish, now);
                debug!("AnimationTrack::update_frame: completed on frame {}", index);
            }
        }
        true
    }

    /// Override every frame's hold time with `speed_ms`.
    ///
    /// - `0` pauses.
    /// - A positive value plays at that fixed interval, resuming if paused.
    /// - A negative value does the same at `|speed_ms|` and also reverses the
    ///   travel direction of non-boomerang playback.
    ///
    /// Ignored while idle. A completed track records the speed but stays
    /// completed.
    pub fn set_speed(&mut self, speed_ms: i32, now: Instant) {
        if self.animation.is_none() {
            return;
        }
        if speed_ms == 0 {
            self.fire(Event::Halt, now);
            return;
        }
        self.speed_override = Some(Duration::from_millis(u64::from(speed_ms.unsigned_abs())));
        self.speed_reversed = speed_ms < 0;
        self.fire(Event::CustomSpeed, now);
    }

    /// Hold the current frame.
    pub fn pause(&mut self) {
        let now = self.last_update;
        self.fire(Event::Pause, now);
    }

    /// Continue a paused track, timing the current frame from `now`.
    pub fn resume(&mut self, now: Instant) {
        self.fire(Event::Resume, now);
    }

    /// Drop any custom speed and go back to the per-frame hold times,
    /// resuming if paused.
    pub fn restore_original_speed(&mut self, now: Instant) {
        if self.animation.is_none() || self.speed_override.take().is_none() {
            return;
        }
        self.speed_reversed = false;
        self.fire(Event::RestoreSpeed, now);
    }

    /// Unload the animation and go idle. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        let now = self.last_update;
        self.fire(Event::Stop, now);
        self.animation = None;
        self.timings = Vec::new();
        self.current_index = 0;
        self.is_reversing = false;
    }

    fn fire(&mut self, event: Event, now: Instant) {
        if let Some(transition) = self.state.on(event) {
            trace!(
                "AnimationTrack: {} --{}--> {}",
                self.state,
                event,
                transition.state
            );
            self.state = transition.state;
            if transition.restamp {
                self.last_update = now;
            }
        }
    }

    const fn travels_backward(&self) -> bool {
        let backward = matches!(self.direction, Direction::Backward);
        if self.mode.is_boomerang() {
            backward
        } else {
            backward != self.speed_reversed
        }
    }

    /// The frame to show, or `None` while idle.
    #[must_use]
    pub fn frame(&self) -> Option<Frame> {
        if self.state == PlaybackState::Idle {
            return None;
        }
        self.animation?.frame(self.current_index)
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    /// True when nothing is loaded.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.state, PlaybackState::Idle)
    }

    /// True while advancing.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing)
    }

    /// True while paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        matches!(self.state, PlaybackState::Paused)
    }

    /// True once a finishing mode reached its end.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self.state, PlaybackState::Completed)
    }

    /// The play mode from the last start.
    #[must_use]
    pub const fn mode(&self) -> PlayMode {
        self.mode
    }

    /// Direction derived from the last start's range.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// True when frames are currently stepping toward lower numbers.
    #[must_use]
    pub const fn is_playing_backwards(&self) -> bool {
        self.travels_backward()
    }

    /// True while a custom speed overrides the per-frame hold times.
    #[must_use]
    pub const fn is_custom_speed_active(&self) -> bool {
        self.speed_override.is_some()
    }

    /// Frames in the loaded animation; 0 when idle.
    #[must_use]
    pub fn total_frames(&self) -> usize {
        self.animation.map_or(0, |animation| animation.len())
    }

    /// 0-based index of the shown frame.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    /// 1-based number of the shown frame; 0 when idle.
    #[must_use]
    pub const fn current_frame_number(&self) -> usize {
        self.frame_number(self.current_index)
    }

    /// 1-based first frame of the playing range; 0 when idle.
    #[must_use]
    pub const fn start_frame(&self) -> usize {
        self.frame_number(self.start_index)
    }

    /// 1-based last frame of the playing range; 0 when idle.
    #[must_use]
    pub const fn end_frame(&self) -> usize {
        self.frame_number(self.end_index)
    }

    const fn frame_number(&self, index: usize) -> usize {
        if self.animation.is_none() { 0 } else { index + 1 }
    }

    /// 0-based inclusive bounds of the playing range.
    #[must_use]
    pub const fn range(&self) -> (usize, usize) {
        (self.start_index, self.end_index)
    }

    /// True on the return leg of a boomerang.
    #[must_use]
    pub const fn is_reversing(&self) -> bool {
        self.is_reversing
    }

    /// Interval before the next advance: the custom speed if set, else the
    /// shown frame's hold time. Zero when idle.
    #[must_use]
    pub fn current_speed(&self) -> Duration {
        if self.animation.is_none() {
            return Duration::from_ticks(0);
        }
        self.speed_override
            .or_else(|| self.timings.get(self.current_index).copied())
            .unwrap_or(Duration::from_ticks(0))
    }
}
