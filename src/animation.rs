//! Frame-table animations and their playback.
//!
//! An [`Animation`] is a borrowed view over rows of `[w0, w1, w2, duration_ms]`,
//! the same table format the LED matrix tooling exports. Playback state lives
//! in an [`AnimationTrack`]; several tracks are composited by a [`LayerSet`].
//!
//! # Example
//!
//! ```
//! use embassy_time::{Duration, Instant};
//! use led_reel::animation::{Animation, AnimationTrack, PlayMode};
//!
//! static BLINK: [[u32; 4]; 2] = [
//!     [0x8000_0000, 0, 0, 100],
//!     [0, 0, 0, 100],
//! ];
//!
//! let mut track: AnimationTrack<'_> = AnimationTrack::new();
//! track.start(Animation::new(&BLINK), PlayMode::Loop, 0, 0, Instant::from_millis(0));
//! assert!(track.is_playing());
//!
//! assert!(!track.update_frame(Instant::from_millis(99)));
//! assert!(track.update_frame(Instant::from_millis(100)));
//! assert_eq!(track.current_frame_number(), 2);
//! assert_eq!(track.current_speed(), Duration::from_millis(100));
//! ```

mod layers;
mod track;

pub use layers::LayerSet;
pub use track::AnimationTrack;

use embassy_time::Duration;

use crate::frame::Frame;

/// Maximum number of layers a [`LayerSet`] holds by default.
pub const MAX_LAYERS: usize = 5;

/// Default per-track frame capacity.
pub const MAX_FRAMES_DEFAULT: usize = 64;

/// A borrowed table of animation frames.
///
/// Each row is three packed frame words followed by the frame's hold time in
/// milliseconds. The table is never copied; tracks keep only the durations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Animation<'a> {
    rows: &'a [[u32; 4]],
}

impl<'a> Animation<'a> {
    /// Wrap a frame table.
    #[must_use]
    pub const fn new(rows: &'a [[u32; 4]]) -> Self {
        Self { rows }
    }

    /// Number of frames.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no frames.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Bits of frame `index` (0-based).
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<Frame> {
        self.rows
            .get(index)
            .map(|&[w0, w1, w2, _]| Frame::from_words([w0, w1, w2]))
    }

    /// Hold time of frame `index` (0-based).
    #[must_use]
    pub fn duration(&self, index: usize) -> Option<Duration> {
        self.rows
            .get(index)
            .map(|row| Duration::from_millis(u64::from(row[3])))
    }

    /// Hold times of every frame in order.
    pub fn durations(&self) -> impl Iterator<Item = Duration> + 'a {
        self.rows
            .iter()
            .map(|row| Duration::from_millis(u64::from(row[3])))
    }
}

impl<'a> From<&'a [[u32; 4]]> for Animation<'a> {
    fn from(rows: &'a [[u32; 4]]) -> Self {
        Self::new(rows)
    }
}

impl<'a, const N: usize> From<&'a [[u32; 4]; N]> for Animation<'a> {
    fn from(rows: &'a [[u32; 4]; N]) -> Self {
        Self::new(rows)
    }
}

/// How a track moves through its frame range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayMode {
    /// Play the range once and stop on its last frame.
    #[default]
    Once,
    /// Play the range repeatedly, wrapping back to its first frame.
    Loop,
    /// Ping-pong between the range ends forever.
    Boomerang,
    /// Go out to the far end and back once, then stop.
    BoomerangOnce,
}

impl PlayMode {
    /// True for the two ping-pong modes.
    #[must_use]
    pub const fn is_boomerang(self) -> bool {
        matches!(self, Self::Boomerang | Self::BoomerangOnce)
    }

    /// True for modes that reach [`PlaybackState::Completed`].
    #[must_use]
    pub const fn finishes(self) -> bool {
        matches!(self, Self::Once | Self::BoomerangOnce)
    }
}

/// Direction derived from the requested frame range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Lower frame numbers first.
    #[default]
    Forward,
    /// Higher frame numbers first.
    Backward,
}

impl Direction {
    /// The opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Where a track is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaybackState {
    /// Nothing loaded.
    #[default]
    Idle,
    /// Advancing on every due update.
    Playing,
    /// Holding the current frame.
    Paused,
    /// A finishing mode reached its end; holds until the next start.
    Completed,
}

/// Inputs to the playback state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum Event {
    Start,
    Pause,
    Resume,
    /// Speed set to zero.
    Halt,
    CustomSpeed,
    RestoreSpeed,
    Finish,
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Transition {
    pub(crate) state: PlaybackState,
    /// Reset the frame timer on entry.
    pub(crate) restamp: bool,
}

impl PlaybackState {
    /// The transition table. `None` means the event is ignored in this state.
    pub(crate) const fn on(self, event: Event) -> Option<Transition> {
        const fn to(state: PlaybackState) -> Option<Transition> {
            Some(Transition {
                state,
                restamp: false,
            })
        }
        const fn restamped(state: PlaybackState) -> Option<Transition> {
            Some(Transition {
                state,
                restamp: true,
            })
        }

        match (self, event) {
            (_, Event::Start) => restamped(Self::Playing),
            (_, Event::Stop) => to(Self::Idle),
            (Self::Playing, Event::Pause | Event::Halt) => to(Self::Paused),
            (Self::Playing, Event::Finish) => to(Self::Completed),
            (Self::Paused, Event::Resume | Event::CustomSpeed | Event::RestoreSpeed) => {
                restamped(Self::Playing)
            }
            _ => None,
        }
    }
}

/// Result of one frame advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// Show the frame at `index`.
    Advance { index: usize, reversing: bool },
    /// The sequence is over; rest on `index`.
    Finish { index: usize },
}

/// One step of `index` toward `target`.
const fn step_toward(index: usize, target: usize) -> usize {
    if index < target {
        index + 1
    } else if index > target {
        index - 1
    } else {
        index
    }
}

/// Compute the next frame for a track.
///
/// `origin` is the bound playback began at for its current direction and `far`
/// is the opposite bound. Every returned index lies between the two, inclusive,
/// and boomerang modes never repeat an index on consecutive steps unless the
/// range holds a single frame.
pub(crate) const fn next_step(
    index: usize,
    reversing: bool,
    origin: usize,
    far: usize,
    mode: PlayMode,
) -> Step {
    if !mode.is_boomerang() {
        return if index != far {
            Step::Advance {
                index: step_toward(index, far),
                reversing: false,
            }
        } else if mode.finishes() {
            Step::Finish { index }
        } else {
            Step::Advance {
                index: origin,
                reversing: false,
            }
        };
    }

    if !reversing {
        let index = step_toward(index, far);
        return Step::Advance {
            index,
            reversing: index == far,
        };
    }

    let index = step_toward(index, origin);
    if index != origin {
        Step::Advance {
            index,
            reversing: true,
        }
    } else if mode.finishes() {
        Step::Finish { index }
    } else {
        Step::Advance {
            index,
            reversing: false,
        }
    }
}
