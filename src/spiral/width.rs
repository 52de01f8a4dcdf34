use crate::image::luminance::LuminanceSampler;
use crate::spiral::config::SpiralConfig;
use crate::types::point::Point;

/// Luminance levels folded into one width band.
const LUMINANCE_BAND: u32 = 32;

/// Decides how thick the segment ending at a canvas pixel is drawn.
#[derive(Clone, Debug)]
pub enum LineWidth {
    Fixed(u32),
    /// Darker reference pixels give thicker lines.
    Luminance {
        sampler: LuminanceSampler,
        multiplier: u32,
        adder: u32,
    },
}

impl LineWidth {
    pub fn from_config(config: &SpiralConfig, sampler: Option<LuminanceSampler>) -> Self {
        match sampler {
            None => LineWidth::Fixed(config.fixed_width),
            Some(sampler) => LineWidth::Luminance {
                sampler,
                multiplier: config.width_multiplier,
                adder: config.width_adder,
            },
        }
    }

    pub fn at(&self, canvas_point: Point<i32>) -> u32 {
        match self {
            LineWidth::Fixed(width) => *width,
            LineWidth::Luminance {
                sampler,
                multiplier,
                adder,
            } => width_for_luminance(sampler.sample(canvas_point), *multiplier, *adder),
        }
    }
}

pub fn width_for_luminance(luminance: u8, multiplier: u32, adder: u32) -> u32 {
    let inverted = u32::from(255 - luminance);
    (inverted / LUMINANCE_BAND)
        .saturating_mul(multiplier)
        .saturating_add(adder)
}

#[test]
fn test_width_for_luminance() {
    assert_eq!(width_for_luminance(0, 3, 3), 24);
    assert_eq!(width_for_luminance(255, 3, 3), 3);
    assert_eq!(width_for_luminance(224, 3, 3), 3);
    assert_eq!(width_for_luminance(223, 3, 3), 6);
    assert_eq!(width_for_luminance(128, 2, 1), 7);
}

#[test]
fn test_width_for_luminance_saturates() {
    assert_eq!(width_for_luminance(0, u32::MAX / 2, 3), u32::MAX);
    assert_eq!(width_for_luminance(255, u32::MAX, u32::MAX), u32::MAX);
}

#[test]
fn test_fixed_width_ignores_position() {
    let width = LineWidth::from_config(&SpiralConfig::default(), None);
    assert_eq!(width.at(Point { x: 0, y: 0 }), 5);
    assert_eq!(width.at(Point { x: -400, y: 90_000 }), 5);
}

#[test]
fn test_luminance_width_samples_field() {
    use image::{GrayImage, Luma};

    let mut field = GrayImage::from_pixel(4, 4, Luma([255]));
    field.put_pixel(1, 1, Luma([0]));
    let width = LineWidth::from_config(
        &SpiralConfig::default(),
        Some(LuminanceSampler::from_field(field)),
    );

    assert_eq!(width.at(Point { x: 1, y: 1 }), 24);
    assert_eq!(width.at(Point { x: 2, y: 2 }), 3);
    assert_eq!(width.at(Point { x: 40, y: 2 }), 3);
}
