use anyhow::Result;
use image::{GenericImageView, Rgba, RgbaImage};

use crate::error::Error;

pub const LETTERBOX_FILL: Rgba<u8> = Rgba([0x0C, 0x0C, 0x0C, 0xFF]);

/// The source image resampled to canvas resolution, letterboxed with [`LETTERBOX_FILL`].
#[derive(Clone, Debug, PartialEq)]
pub struct ImageSample {
    data: RgbaImage,
}

impl ImageSample {
    pub fn from_image(source: &image::DynamicImage, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::new(format!(
                "Cannot sample an image into an empty canvas: {width}x{height}"
            ))
            .into());
        }

        let (source_width, source_height) = source.dimensions();
        if source_width == 0 || source_height == 0 {
            return Err(Error::new(String::from("The source image has no pixels")).into());
        }

        let (drawn_width, offset_x) =
            letterbox_geometry((source_width, source_height), (width, height));
        let visible = visible_span(source_width, drawn_width, offset_x, width);

        let mut resized = image::imageops::resize(
            &source
                .crop_imm(visible.source_x, 0, visible.source_width, source_height)
                .to_rgba8(),
            visible.canvas_width,
            height,
            image::imageops::FilterType::Triangle,
        );
        for pixel in resized.pixels_mut() {
            *pixel = over_fill(*pixel);
        }

        let mut data = RgbaImage::from_pixel(width, height, LETTERBOX_FILL);
        image::imageops::replace(&mut data, &resized, visible.canvas_x, 0);

        Ok(Self { data })
    }

    pub fn from_rgba_image(data: RgbaImage) -> Self {
        Self { data }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.data.dimensions()
    }

    pub fn data(&self) -> &RgbaImage {
        &self.data
    }

    /// Mean of the red, green and blue channels at `(x, y)`. Alpha is ignored.
    pub fn brightness(&self, x: u32, y: u32) -> f64 {
        let [r, g, b, _] = self.data.get_pixel(x, y).0;
        (r as f64 + g as f64 + b as f64) / 3.0
    }
}

/// Source-over composite onto the opaque fill, rounded to the nearest integer.
fn over_fill(pixel: Rgba<u8>) -> Rgba<u8> {
    let alpha = pixel.0[3] as u32;
    let mix = |foreground: u8, background: u8| {
        ((foreground as u32 * alpha + background as u32 * (255 - alpha) + 127) / 255) as u8
    };

    Rgba([
        mix(pixel.0[0], LETTERBOX_FILL.0[0]),
        mix(pixel.0[1], LETTERBOX_FILL.0[1]),
        mix(pixel.0[2], LETTERBOX_FILL.0[2]),
        0xFF,
    ])
}

/// Width at which the source is drawn so that it fills the canvas height, and the
/// horizontal offset that centers it. The offset is negative when the source is cropped.
fn letterbox_geometry(source: (u32, u32), canvas: (u32, u32)) -> (u32, i64) {
    let ratio = source.0 as f64 / source.1 as f64;
    let drawn_width = (canvas.1 as f64 * ratio).round().max(1.0);
    let offset_x = ((canvas.0 as f64 - drawn_width) / 2.0).round();

    (drawn_width as u32, offset_x as i64)
}

/// The part of the drawn image that lands on the canvas, in source and canvas columns.
#[derive(Debug, PartialEq, Eq)]
struct VisibleSpan {
    source_x: u32,
    source_width: u32,
    canvas_x: i64,
    canvas_width: u32,
}

/// Clips the drawn image to the canvas before anything is resampled, so the resized
/// intermediate is never wider than the canvas.
fn visible_span(
    source_width: u32,
    drawn_width: u32,
    offset_x: i64,
    canvas_width: u32,
) -> VisibleSpan {
    let begin = offset_x.max(0);
    let end = (offset_x + drawn_width as i64).min(canvas_width as i64).max(begin + 1);

    let scale = source_width as f64 / drawn_width as f64;
    let source_begin = ((begin - offset_x) as f64 * scale).floor() as u32;
    let source_begin = source_begin.min(source_width - 1);
    let source_end = ((end - offset_x) as f64 * scale).ceil() as u32;
    let source_end = source_end.clamp(source_begin + 1, source_width);

    VisibleSpan {
        source_x: source_begin,
        source_width: source_end - source_begin,
        canvas_x: begin,
        canvas_width: (end - begin) as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([200, 10, 10, 255]);

    fn uniform(width: u32, height: u32, color: Rgba<u8>) -> image::DynamicImage {
        image::DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, color))
    }

    #[test]
    fn sample_matches_canvas_dimensions() {
        let source = uniform(13, 7, RED);

        for (width, height) in [(1, 1), (10, 4), (4, 10), (64, 33)] {
            let sample = ImageSample::from_image(&source, width, height).unwrap();
            assert_eq!(sample.dimensions(), (width, height));
        }
    }

    #[test]
    fn narrow_source_is_letterboxed() {
        let sample = ImageSample::from_image(&uniform(2, 2, RED), 6, 2).unwrap();

        for y in 0..2 {
            for x in [0, 1, 4, 5] {
                assert_eq!(*sample.data().get_pixel(x, y), LETTERBOX_FILL);
            }
            for x in [2, 3] {
                assert_eq!(*sample.data().get_pixel(x, y), RED);
            }
        }
    }

    #[test]
    fn wide_source_is_center_cropped() {
        let sample = ImageSample::from_image(&uniform(4, 1, RED), 2, 1).unwrap();

        assert!(sample.data().pixels().all(|pixel| *pixel == RED));
    }

    #[test]
    fn letterbox_geometry_centers_the_image() {
        assert_eq!(letterbox_geometry((2, 2), (6, 2)), (2, 2));
        assert_eq!(letterbox_geometry((4, 1), (2, 1)), (4, -1));
        assert_eq!(letterbox_geometry((1, 1000), (10, 10)), (1, 5));
    }

    #[test]
    fn very_wide_source_only_resamples_the_visible_part() {
        let sample = ImageSample::from_image(&uniform(1_000_000, 1, RED), 100, 100).unwrap();

        assert_eq!(sample.dimensions(), (100, 100));
        assert!(sample.data().pixels().all(|pixel| *pixel == RED));
    }

    #[test]
    fn visible_span_clips_to_the_canvas() {
        assert_eq!(
            visible_span(2, 2, 2, 6),
            VisibleSpan {
                source_x: 0,
                source_width: 2,
                canvas_x: 2,
                canvas_width: 2,
            }
        );
        assert_eq!(
            visible_span(4, 4, -1, 2),
            VisibleSpan {
                source_x: 1,
                source_width: 2,
                canvas_x: 0,
                canvas_width: 2,
            }
        );
        assert_eq!(
            visible_span(1_000_000, 100_000_000, -49_999_950, 100),
            VisibleSpan {
                source_x: 499_999,
                source_width: 2,
                canvas_x: 0,
                canvas_width: 100,
            }
        );
    }

    #[test]
    fn transparent_source_shows_fill() {
        let source = uniform(3, 3, Rgba([255, 255, 255, 0]));
        let sample = ImageSample::from_image(&source, 3, 3).unwrap();

        assert!(sample.data().pixels().all(|pixel| *pixel == LETTERBOX_FILL));
    }

    #[test]
    fn half_transparent_pixels_blend_with_fill() {
        assert_eq!(over_fill(Rgba([255, 255, 255, 255])), Rgba([255, 255, 255, 255]));
        assert_eq!(over_fill(Rgba([112, 12, 212, 128])), Rgba([62, 12, 112, 255]));
    }

    #[test]
    fn resampling_is_idempotent() {
        let mut source = RgbaImage::new(5, 3);
        for (x, y, pixel) in source.enumerate_pixels_mut() {
            *pixel = Rgba([(x * 40) as u8, (y * 80) as u8, 17, 255]);
        }
        let source = image::DynamicImage::ImageRgba8(source);

        let first = ImageSample::from_image(&source, 11, 6).unwrap();
        let second = ImageSample::from_image(&source, 11, 6).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn empty_canvas_is_rejected() {
        let source = uniform(2, 2, RED);

        assert!(ImageSample::from_image(&source, 0, 4).is_err());
        assert!(ImageSample::from_image(&source, 4, 0).is_err());
    }

    #[test]
    fn brightness_ignores_alpha() {
        let data = RgbaImage::from_pixel(1, 1, Rgba([30, 60, 90, 0]));
        let sample = ImageSample::from_rgba_image(data);

        assert_eq!(sample.brightness(0, 0), 60.0);
    }
}
