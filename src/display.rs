//! The output side: anything that accepts packed 12×8 frames.

use crate::Result;
use crate::frame::Frame;

/// A device that shows packed frames.
///
/// `begin` must succeed before frames are expected to appear. `load_frame`
/// replaces whatever was shown before.
pub trait DisplaySink {
    /// Initialize the device.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DisplayInit`](crate::Error::DisplayInit) when the
    /// device cannot be started.
    fn begin(&mut self) -> Result<()>;

    /// Show `frame`.
    fn load_frame(&mut self, frame: &Frame);
}

impl<S: DisplaySink + ?Sized> DisplaySink for &mut S {
    fn begin(&mut self) -> Result<()> {
        (**self).begin()
    }

    fn load_frame(&mut self, frame: &Frame) {
        (**self).load_frame(frame);
    }
}

/// A sink that remembers what it was sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemorySink {
    last_frame: Option<Frame>,
    write_count: usize,
    begun: bool,
    fail_begin: bool,
}

impl MemorySink {
    /// An empty sink.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_frame: None,
            write_count: 0,
            begun: false,
            fail_begin: false,
        }
    }

    /// A sink whose `begin` reports failure.
    #[must_use]
    pub const fn failing() -> Self {
        Self {
            fail_begin: true,
            ..Self::new()
        }
    }

    /// The most recent frame, if any was written.
    #[must_use]
    pub const fn last_frame(&self) -> Option<Frame> {
        self.last_frame
    }

    /// How many frames have been written.
    #[must_use]
    pub const fn write_count(&self) -> usize {
        self.write_count
    }

    /// Whether `begin` has succeeded.
    #[must_use]
    pub const fn is_begun(&self) -> bool {
        self.begun
    }
}

impl DisplaySink for MemorySink {
    fn begin(&mut self) -> Result<()> {
        if self.fail_begin {
            return Err(crate::Error::DisplayInit);
        }
        self.begun = true;
        Ok(())
    }

    fn load_frame(&mut self, frame: &Frame) {
        self.last_frame = Some(*frame);
        self.write_count += 1;
    }
}

/// A sink that logs each frame over defmt. Useful when bringing up a board
/// before the matrix driver is wired in.
#[cfg(feature = "defmt")]
#[derive(Clone, Copy, Debug, Default)]
pub struct DefmtSink;

#[cfg(feature = "defmt")]
impl DisplaySink for DefmtSink {
    fn begin(&mut self) -> Result<()> {
        defmt::info!("DefmtSink::begin");
        Ok(())
    }

    fn load_frame(&mut self, frame: &Frame) {
        let [w0, w1, w2] = frame.words();
        defmt::debug!("DefmtSink::load_frame: {=u32:#x} {=u32:#x} {=u32:#x}", w0, w1, w2);
    }
}
