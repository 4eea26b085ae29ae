//! Frame animation, buffered drawing, and blinking LEDs for 12×8 monochrome
//! LED matrices such as the one on the Arduino UNO R4 WiFi.
//!
//! Start with [`Screen`](screen::Screen). It owns a
//! [`DisplaySink`](display::DisplaySink) and a
//! [`FrameClock`](clock::FrameClock), and everything time-based advances only
//! when you call its update methods from your loop.
//!
//! # Glossary
//!
//! - **Frame:** the on/off state of all 96 LEDs, packed into three `u32` words
//!   most significant bit first, row by row from the top-left.
//! - **Animation:** a table of `[w0, w1, w2, duration_ms]` rows.
//! - **Layer / track:** one independent animation playback lane. Layers are
//!   combined with bitwise OR into the **composite** frame.
//! - **Canvas:** an off-screen buffer for points, lines, shapes and text that is
//!   shown all at once.
//! - **Boomerang:** playing a frame range forward then backward.
#![cfg_attr(not(any(test, feature = "host")), no_std)]

#[macro_use]
mod fmt;

pub mod animation;
pub mod canvas;
pub mod clock;
pub mod display;
mod error;
pub mod font;
pub mod frame;
pub mod led_grid;
pub mod motion;
#[cfg(feature = "host")]
pub mod preview;
pub mod screen;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
