use crate::error::{Result, SpiralError};
use crate::types::point::Point;
use crate::types::rect::Dimensions;
use image::imageops::{grayscale, overlay, FilterType};
use image::{DynamicImage, GenericImageView, GrayImage, Rgb, RgbImage};

/// Luminance reported for any point outside the field, same as the padding.
pub const OUTSIDE_LUMINANCE: u8 = 255;

/// A canvas sized grayscale copy of the reference image.
#[derive(Clone, Debug)]
pub struct LuminanceSampler {
    field: GrayImage,
}

impl LuminanceSampler {
    /**
    Scales the reference so its longest side matches the canvas' longest side, pastes it
    centred on a white canvas sized background and keeps the luminance channel.
    */
    pub fn new(reference: &DynamicImage, canvas: Dimensions) -> Result<Self> {
        let reference_size = Dimensions::from_wh(reference.width(), reference.height());
        if reference_size.is_empty() {
            return Err(SpiralError::InvalidConfig(
                "reference image has no pixels".to_string(),
            ));
        }
        if canvas.is_empty() {
            return Err(SpiralError::InvalidConfig(
                "canvas has no pixels".to_string(),
            ));
        }

        let scale = f64::from(canvas.max_side()) / f64::from(reference_size.max_side());
        let (width, height) = (
            ((f64::from(reference.width()) * scale).round() as u32).max(1),
            ((f64::from(reference.height()) * scale).round() as u32).max(1),
        );
        let resized = reference
            .resize_exact(width, height, FilterType::CatmullRom)
            .to_rgb8();

        let mut background =
            RgbImage::from_pixel(canvas.width(), canvas.height(), Rgb([255, 255, 255]));
        overlay(
            &mut background,
            &resized,
            (i64::from(canvas.width()) - i64::from(width)) / 2,
            (i64::from(canvas.height()) - i64::from(height)) / 2,
        );

        tracing::debug!(
            scale,
            width,
            height,
            "reference scaled onto {}x{} canvas",
            canvas.width(),
            canvas.height()
        );

        Ok(LuminanceSampler {
            field: grayscale(&background),
        })
    }

    /// Wraps an already prepared luminance field.
    pub fn from_field(field: GrayImage) -> Self {
        LuminanceSampler { field }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::from_wh(self.field.width(), self.field.height())
    }

    /// Luminance at a canvas pixel; anything off the field reads as white.
    pub fn sample(&self, point: Point<i32>) -> u8 {
        if !self.dimensions().to_signed().contains_point(&point) {
            return OUTSIDE_LUMINANCE;
        }
        self.field.get_pixel(point.x as u32, point.y as u32).0[0]
    }
}

#[cfg(test)]
use image::Luma;

#[test]
fn test_sample_out_of_bounds_is_white() {
    let sampler = LuminanceSampler::from_field(GrayImage::from_pixel(10, 10, Luma([0])));
    assert_eq!(sampler.sample(Point { x: 5, y: 5 }), 0);
    assert_eq!(sampler.sample(Point { x: -1, y: 5 }), OUTSIDE_LUMINANCE);
    assert_eq!(sampler.sample(Point { x: 5, y: 10 }), OUTSIDE_LUMINANCE);
    assert_eq!(sampler.sample(Point { x: 10_000, y: -3 }), OUTSIDE_LUMINANCE);
}

#[test]
fn test_reference_is_scaled_and_centred() {
    // a black 10x5 reference on a 100x100 canvas covers a centred 100x50 band
    let reference = DynamicImage::ImageRgb8(RgbImage::from_pixel(10, 5, Rgb([0, 0, 0])));
    let sampler = LuminanceSampler::new(&reference, Dimensions::from_wh(100, 100)).unwrap();

    assert_eq!(sampler.dimensions(), Dimensions::from_wh(100, 100));
    assert_eq!(sampler.sample(Point { x: 50, y: 50 }), 0);
    assert_eq!(sampler.sample(Point { x: 2, y: 30 }), 0);
    assert_eq!(sampler.sample(Point { x: 50, y: 10 }), 255);
    assert_eq!(sampler.sample(Point { x: 50, y: 90 }), 255);
}

#[test]
fn test_reference_larger_than_canvas() {
    let reference = DynamicImage::ImageRgb8(RgbImage::from_pixel(400, 400, Rgb([0, 0, 0])));
    let sampler = LuminanceSampler::new(&reference, Dimensions::from_wh(40, 40)).unwrap();
    assert_eq!(sampler.sample(Point { x: 0, y: 0 }), 0);
    assert_eq!(sampler.sample(Point { x: 39, y: 39 }), 0);
}

#[test]
fn test_empty_reference_rejected() {
    let reference = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
    assert!(matches!(
        LuminanceSampler::new(&reference, Dimensions::from_wh(40, 40)),
        Err(SpiralError::InvalidConfig(_))
    ));
}
