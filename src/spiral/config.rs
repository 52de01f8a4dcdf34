use crate::error::{Result, SpiralError};
use crate::spiral::width::width_for_luminance;
use crate::types::rect::Dimensions;
use image::Rgb;

/// How the radius of a loop is derived.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Growth {
    /// Every loop grows linearly by `grow_per_loop` over one revolution.
    Free,
    /// Loops after the first follow the radii of the loop before them.
    Feedback,
}

/// Tunables for one spiral run.
#[derive(Clone, Debug, PartialEq)]
pub struct SpiralConfig {
    pub line_color: Rgb<u8>,
    pub background: Rgb<u8>,
    pub start_radius: f64,
    /// Steps per pixel of circumference.
    pub step_distance_ratio: f64,
    pub grow_per_loop: f64,
    pub canvas: Dimensions,
    /// Line width when no reference image is set.
    pub fixed_width: u32,
    pub width_multiplier: u32,
    pub width_adder: u32,
    /// Jitter is drawn from `[-max_jitter, max_jitter)`.
    pub max_jitter: i32,
    pub growth: Growth,
    pub seed: Option<u64>,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        SpiralConfig {
            line_color: Rgb([0, 0, 0]),
            background: Rgb([255, 255, 255]),
            start_radius: 60.,
            step_distance_ratio: 0.4,
            grow_per_loop: 14.,
            canvas: Dimensions::from_wh(3000, 3000),
            fixed_width: 5,
            width_multiplier: 3,
            width_adder: 3,
            max_jitter: 2,
            growth: Growth::Feedback,
            seed: None,
        }
    }
}

impl SpiralConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.start_radius.is_finite() || self.start_radius < 0. {
            return Err(SpiralError::InvalidConfig(format!(
                "start radius must be a non-negative number, got {}",
                self.start_radius
            )));
        }
        if !self.step_distance_ratio.is_finite() || self.step_distance_ratio <= 0. {
            return Err(SpiralError::InvalidConfig(format!(
                "step distance ratio must be positive, got {}",
                self.step_distance_ratio
            )));
        }
        if !self.grow_per_loop.is_finite() {
            return Err(SpiralError::InvalidConfig(format!(
                "growth per loop must be finite, got {}",
                self.grow_per_loop
            )));
        }
        if self.canvas.is_empty() {
            return Err(SpiralError::InvalidConfig(format!(
                "canvas must not be empty, got {}x{}",
                self.canvas.width(),
                self.canvas.height()
            )));
        }
        let longest = self.canvas.max_side();
        if self.fixed_width > longest {
            return Err(SpiralError::InvalidConfig(format!(
                "fixed width {} is wider than the canvas side {}",
                self.fixed_width, longest
            )));
        }
        let darkest = width_for_luminance(0, self.width_multiplier, self.width_adder);
        if darkest > longest {
            return Err(SpiralError::InvalidConfig(format!(
                "width multiplier {} and adder {} give {} pixels on black, wider than the canvas side {}",
                self.width_multiplier, self.width_adder, darkest, longest
            )));
        }
        if self.max_jitter < 0 {
            return Err(SpiralError::InvalidConfig(format!(
                "max jitter must not be negative, got {}",
                self.max_jitter
            )));
        }
        Ok(())
    }
}

#[test]
fn test_default_config_is_valid() {
    assert!(SpiralConfig::default().validate().is_ok());
}

#[test]
fn test_invalid_configs() {
    let bad = [
        SpiralConfig {
            step_distance_ratio: 0.,
            ..Default::default()
        },
        SpiralConfig {
            start_radius: f64::NAN,
            ..Default::default()
        },
        SpiralConfig {
            grow_per_loop: f64::INFINITY,
            ..Default::default()
        },
        SpiralConfig {
            canvas: Dimensions::from_wh(0, 100),
            ..Default::default()
        },
        SpiralConfig {
            max_jitter: -1,
            ..Default::default()
        },
        SpiralConfig {
            fixed_width: u32::MAX,
            ..Default::default()
        },
        SpiralConfig {
            width_multiplier: u32::MAX / 2,
            ..Default::default()
        },
        SpiralConfig {
            width_adder: 3001,
            ..Default::default()
        },
    ];

    for config in bad {
        assert!(matches!(config.validate(), Err(SpiralError::InvalidConfig(_))));
    }
}

#[test]
fn test_widest_line_fits_canvas() {
    let config = SpiralConfig {
        canvas: Dimensions::from_wh(100, 40),
        fixed_width: 100,
        width_multiplier: 12,
        width_adder: 4,
        ..Default::default()
    };
    assert!(config.validate().is_ok());

    let wider = SpiralConfig {
        fixed_width: 101,
        ..config.clone()
    };
    assert!(matches!(wider.validate(), Err(SpiralError::InvalidConfig(_))));
}
