//! Rolling per-row threshold scan.
//!
//! Every row starts from the same time-dependent counter. Brightness is accumulated
//! pixel by pixel; whenever the counter rises above [`THRESHOLD`] the pixel is drawn
//! bright and the counter drops by half a threshold, otherwise the pixel is drawn dark.
//! As `now` advances the starting phase shifts, so the pattern scrolls even though the
//! image sample itself never changes.

use anyhow::Result;

use crate::effect::frame::{FrameBuffer, BRIGHT, DARK};
use crate::effect::sample::ImageSample;
use crate::error::Error;

pub const THRESHOLD: f64 = 1500.0;

/// Counter value every row starts from at time `now_ms`.
pub fn starting_counter(now_ms: f64) -> f64 {
    let phase = (now_ms.ceil() as i64).rem_euclid(THRESHOLD as i64);
    2.0 * THRESHOLD - phase as f64
}

pub fn render_frame(sample: &ImageSample, frame: &mut FrameBuffer, now_ms: f64) -> Result<()> {
    let (width, height) = sample.dimensions();
    if frame.dimensions() != (width, height) {
        return Err(Error::DimensionMismatch {
            expected: (width, height),
            actual: frame.dimensions(),
        }
        .into());
    }

    if width == 0 {
        return Ok(());
    }

    let start = starting_counter(now_ms);

    for (y, row) in frame
        .pixels_mut()
        .chunks_exact_mut(width as usize)
        .enumerate()
    {
        let mut counter = start;

        for (x, pixel) in row.iter_mut().enumerate() {
            counter += sample.brightness(x as u32, y as u32);

            if counter > THRESHOLD {
                *pixel = BRIGHT;
                counter -= THRESHOLD / 2.0;
            } else {
                *pixel = DARK;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;

    fn uniform_sample(width: u32, height: u32, value: u8) -> ImageSample {
        ImageSample::from_rgba_image(RgbaImage::from_pixel(
            width,
            height,
            Rgba([value, value, value, 255]),
        ))
    }

    fn rendered(sample: &ImageSample, now_ms: f64) -> FrameBuffer {
        let (width, height) = sample.dimensions();
        let mut frame = FrameBuffer::new(width, height, 0);
        render_frame(sample, &mut frame, now_ms).unwrap();
        frame
    }

    /// Straightforward per-pixel restatement of the scan, used as the reference.
    fn reference(sample: &ImageSample, now_ms: f64) -> Vec<u32> {
        let (width, height) = sample.dimensions();
        let mut pixels = Vec::new();
        for y in 0..height {
            let mut counter = 2.0 * 1500.0 - ((now_ms.ceil() as i64) % 1500) as f64;
            for x in 0..width {
                let [r, g, b, _] = sample.data().get_pixel(x, y).0;
                counter += (r as f64 + g as f64 + b as f64) / 3.0;
                if counter > 1500.0 {
                    pixels.push(BRIGHT);
                    counter -= 750.0;
                } else {
                    pixels.push(DARK);
                }
            }
        }
        pixels
    }

    #[test]
    fn starting_counter_follows_the_clock() {
        assert_eq!(starting_counter(0.0), 3000.0);
        assert_eq!(starting_counter(1.0), 2999.0);
        assert_eq!(starting_counter(0.2), 2999.0);
        assert_eq!(starting_counter(750.0), 2250.0);
        assert_eq!(starting_counter(1499.2), 3000.0);
        assert_eq!(starting_counter(4499.0), 1501.0);
    }

    #[test]
    fn zero_phase_starts_bright_on_black() {
        let frame = rendered(&uniform_sample(4, 2, 0), 1500.0);

        for y in 0..2 {
            assert_eq!(frame.row(y).unwrap(), &[BRIGHT, BRIGHT, DARK, DARK]);
        }
    }

    #[test]
    fn black_rows_are_bright_only_at_the_start() {
        // The lowest possible start, 3000 - 1499, is still above the threshold.
        for now_ms in [1499.0, 2999.0, 1000.0] {
            let frame = rendered(&uniform_sample(4, 2, 0), now_ms);
            assert_eq!(frame.row(0).unwrap(), &[BRIGHT, DARK, DARK, DARK]);
            assert_eq!(frame.row(1).unwrap(), &[BRIGHT, DARK, DARK, DARK]);
        }
    }

    #[test]
    fn white_rows_alternate() {
        let frame = rendered(&uniform_sample(4, 1, 255), 1499.0);

        assert_eq!(frame.row(0).unwrap(), &[BRIGHT, DARK, BRIGHT, DARK]);
    }

    #[test]
    fn matches_reference_scan() {
        let mut data = RgbaImage::new(37, 9);
        for (x, y, pixel) in data.enumerate_pixels_mut() {
            *pixel = Rgba([(x * 7) as u8, (y * 29) as u8, ((x + y) * 5) as u8, (x * 3) as u8]);
        }
        let sample = ImageSample::from_rgba_image(data);

        for now_ms in [0.0, 16.7, 733.3, 1499.9, 123_456.78] {
            let frame = rendered(&sample, now_ms);
            assert_eq!(frame.pixels(), reference(&sample, now_ms).as_slice());
        }
    }

    #[test]
    fn scan_is_deterministic() {
        let sample = uniform_sample(16, 4, 97);

        let first = rendered(&sample, 4242.0);
        let second = rendered(&sample, 4242.0);

        assert_eq!(first.as_bytes(), second.as_bytes());
        assert_eq!(first.row(0), first.row(3));
    }

    #[test]
    fn mismatched_frame_is_rejected() {
        let sample = uniform_sample(4, 4, 10);
        let mut frame = FrameBuffer::new(4, 3, 0);

        let error = render_frame(&sample, &mut frame, 0.0).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<Error>(),
            Some(Error::DimensionMismatch { .. })
        ));
        assert!(frame.pixels().iter().all(|pixel| *pixel == 0));
    }
}
