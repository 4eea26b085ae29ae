//! Render frames to PNG and animations to APNG on the host.
//!
//! Each cell becomes a round LED with a soft edge; lit LEDs use
//! [`LIT_COLOR`], dark ones [`UNLIT_COLOR`] so the grid stays visible.

use std::error::Error;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use embassy_time::Duration;
use png::{BitDepth, ColorType, Encoder, ScaledFloat};

use crate::animation::Animation;
use crate::frame::{Frame, cells};

/// sRGB color of a lit LED.
pub const LIT_COLOR: [u8; 3] = [255, 48, 24];
/// sRGB color of a dark LED.
pub const UNLIT_COLOR: [u8; 3] = [40, 12, 8];

const PREVIEW_INVERSE_GAMMA: f32 = 2.2;

type PreviewResult<T = ()> = Result<T, Box<dyn Error>>;

/// Render `frame` into a PNG no larger than `target_max_dimension` pixels on
/// its longer side.
///
/// # Errors
///
/// Fails if the file cannot be written or encoding fails.
pub fn write_frame_png(
    frame: &Frame,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
) -> PreviewResult {
    let output_path = output_path.as_ref();
    let layout = CellLayout::fit(target_max_dimension)?;
    let pixels = layout.render(frame);

    let mut encoder = encoder_for(output_path, &layout)?;
    encoder.set_source_gamma(ScaledFloat::new(1.0));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels)?;
    writer.finish()?;
    Ok(())
}

/// Render `(frame, hold time)` pairs into a looping APNG.
///
/// # Errors
///
/// Fails on an empty sequence, a hold time longer than 65.535 s, or any
/// write or encoding error.
pub fn write_frames_apng(
    frames: &[(Frame, Duration)],
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
) -> PreviewResult {
    if frames.is_empty() {
        return Err("frames must not be empty".into());
    }
    let output_path = output_path.as_ref();
    let layout = CellLayout::fit(target_max_dimension)?;
    let frame_count = u32::try_from(frames.len())?;

    let mut encoder = encoder_for(output_path, &layout)?;
    encoder.set_source_gamma(ScaledFloat::new(1.0));
    encoder.set_animated(frame_count, 0)?;
    let mut writer = encoder.write_header()?;
    for (frame, hold) in frames {
        // Zero-length frames would be skipped by viewers; show them for 1 ms.
        let delay_ms = u16::try_from(hold.as_millis())?.max(1);
        writer.set_frame_delay(delay_ms, 1000)?;
        writer.write_image_data(&layout.render(frame))?;
    }
    writer.finish()?;
    Ok(())
}

/// Render every frame of `animation` with its own hold time.
///
/// # Errors
///
/// See [`write_frames_apng`].
pub fn write_animation_apng(
    animation: Animation<'_>,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
) -> PreviewResult {
    write_frames_apng(
        &animation_frames(animation),
        output_path,
        target_max_dimension,
    )
}

/// The `(frame, hold time)` pairs of `animation`.
#[must_use]
pub fn animation_frames(animation: Animation<'_>) -> Vec<(Frame, Duration)> {
    (0..animation.len())
        .filter_map(|index| Some((animation.frame(index)?, animation.duration(index)?)))
        .collect()
}

fn encoder_for<'w>(
    output_path: &Path,
    layout: &CellLayout,
) -> PreviewResult<Encoder<'w, BufWriter<File>>> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), layout.width, layout.height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Sixteen);
    Ok(encoder)
}

/// Pixel geometry of one preview image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CellLayout {
    cell_size: u32,
    led_radius: u32,
    border: u32,
    width: u32,
    height: u32,
}

impl CellLayout {
    /// The largest cell size whose image fits in `target_max_dimension`.
    fn fit(target_max_dimension: u32) -> PreviewResult<Self> {
        let mut cell_size = target_max_dimension;
        while cell_size >= 4 {
            let layout = Self::with_cell_size(cell_size);
            if layout.width.max(layout.height) <= target_max_dimension {
                return Ok(layout);
            }
            cell_size -= 1;
        }
        Err(format!("target_max_dimension {target_max_dimension} is too small").into())
    }

    const fn with_cell_size(cell_size: u32) -> Self {
        let led_margin = if cell_size / 8 > 1 { cell_size / 8 } else { 1 };
        let led_radius = (cell_size - led_margin * 2) / 2;
        let border = led_radius;
        Self {
            cell_size,
            led_radius,
            border,
            width: Frame::WIDTH as u32 * cell_size + border * 2,
            height: Frame::HEIGHT as u32 * cell_size + border * 2,
        }
    }

    /// 16-bit big-endian RGB bytes for `frame`.
    fn render(&self, frame: &Frame) -> Vec<u8> {
        let mut bytes = vec![0_u8; (self.width * self.height * 3 * 2) as usize];
        let fade_width = (self.led_radius / 3).max(1);
        let outer = self.led_radius as f32;
        let inner = self.led_radius.saturating_sub(fade_width) as f32;
        let radius_sq = (self.led_radius * self.led_radius) as i32;
        let center = (self.cell_size as i32 - 1) / 2;
        let lit = linear_color(LIT_COLOR);
        let unlit = linear_color(UNLIT_COLOR);

        for (x, y) in cells() {
            let color = if frame.get(x, y) { lit } else { unlit };
            let origin_x = self.border + x as u32 * self.cell_size;
            let origin_y = self.border + y as u32 * self.cell_size;
            for local_y in 0..self.cell_size {
                let delta_y = local_y as i32 - center;
                for local_x in 0..self.cell_size {
                    let delta_x = local_x as i32 - center;
                    let distance_sq = delta_x * delta_x + delta_y * delta_y;
                    if distance_sq > radius_sq {
                        continue;
                    }
                    let distance = (distance_sq as f32).sqrt();
                    let intensity = if distance <= inner {
                        1.0
                    } else {
                        (1.0 - (distance - inner) / (outer - inner)).max(0.0)
                    };
                    let pixel_index =
                        (((origin_y + local_y) * self.width + origin_x + local_x) * 6) as usize;
                    for (channel, linear) in color.iter().enumerate() {
                        let value = linear_to_u16(linear * intensity).to_be_bytes();
                        let at = pixel_index + channel * 2;
                        if let Some(slot) = bytes.get_mut(at..at + 2) {
                            slot.copy_from_slice(&value);
                        }
                    }
                }
            }
        }
        bytes
    }
}

fn linear_color(srgb: [u8; 3]) -> [f32; 3] {
    srgb.map(|channel| (f32::from(channel) / 255.0).powf(PREVIEW_INVERSE_GAMMA))
}

fn linear_to_u16(value: f32) -> u16 {
    (value.clamp(0.0, 1.0) * 65535.0).round() as u16
}
