use crate::error::Result;
use crate::image::canvas::Canvas;
use crate::image::luminance::LuminanceSampler;
use crate::io::file::prepare_output_path;
use crate::types::rect::Dimensions;
use image::DynamicImage;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use tracing::info;

pub mod config;
pub mod generator;
pub mod history;
pub mod jitter;
pub mod width;

pub use config::{Growth, SpiralConfig};
pub use generator::{feedback_offset, loop_steps, SpiralGenerator};
pub use history::{History, LoopRecord};
pub use jitter::Jitter;
pub use width::{width_for_luminance, LineWidth};

/// Post-processing applied when a drawing is written out.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ExportOptions {
    /// Gaussian blur sigma, applied before resizing.
    pub blur: Option<f32>,
    pub resize: Option<Dimensions>,
}

/// A canvas together with the spiral being grown on it.
pub struct Drawing<R = SmallRng> {
    canvas: Canvas,
    generator: SpiralGenerator<R>,
}

impl Drawing {
    pub fn builder<'a>() -> DrawingBuilder<'a> {
        DrawingBuilder::new()
    }
}

impl<R> Drawing<R>
where
    R: Rng,
{
    pub fn run_loops(&mut self, count: usize) -> Result<()> {
        self.generator.run_loops(count, &mut self.canvas)?;
        info!(
            loops = self.generator.history().loops().len(),
            points = self.generator.history().len(),
            radius = self.generator.current_radius(),
            "spiral grown"
        );
        Ok(())
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn generator(&self) -> &SpiralGenerator<R> {
        &self.generator
    }

    pub fn history(&self) -> &History {
        self.generator.history()
    }

    /// The canvas after blur and resize, the drawing itself stays untouched.
    pub fn render(&self, options: &ExportOptions) -> Canvas {
        let mut out = self.canvas.clone();
        if let Some(sigma) = options.blur {
            out.blur(sigma);
        }
        match options.resize {
            Some(size) => out.resized(size),
            None => out,
        }
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, options: &ExportOptions) -> Result<()> {
        let path = path.as_ref();
        self.render(options).save(path)?;
        info!(path = %path.display(), "drawing saved");
        Ok(())
    }

    /// Exports to a timestamped file inside `folder`, returning the chosen path.
    pub fn export_to_folder<P: AsRef<Path>>(
        &self,
        folder: P,
        options: &ExportOptions,
    ) -> Result<PathBuf> {
        let path = prepare_output_path(None, folder.as_ref())?;
        self.export(&path, options)?;
        Ok(path)
    }
}

/**
    Collects everything a [`Drawing`] needs before any pixel is touched.
*/
pub struct DrawingBuilder<'a> {
    config: SpiralConfig,
    reference: Option<&'a DynamicImage>,
}

impl<'a> Default for DrawingBuilder<'a> {
    fn default() -> Self {
        DrawingBuilder::new()
    }
}

impl<'a> DrawingBuilder<'a> {
    pub fn new() -> Self {
        DrawingBuilder {
            config: SpiralConfig::default(),
            reference: None,
        }
    }

    pub fn config(mut self, config: SpiralConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Modulates line width by the luminance of `image`.
    pub fn reference(mut self, image: &'a DynamicImage) -> Self {
        self.reference = Some(image);
        self
    }

    pub fn build(self) -> Result<Drawing<SmallRng>> {
        let rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        self.build_with_rng(rng)
    }

    /// Like [`DrawingBuilder::build`] with a caller supplied jitter source.
    pub fn build_with_rng<R: Rng>(self, rng: R) -> Result<Drawing<R>> {
        self.config.validate()?;

        let sampler = match self.reference {
            Some(image) => Some(LuminanceSampler::new(image, self.config.canvas)?),
            None => None,
        };
        let width = LineWidth::from_config(&self.config, sampler);
        let canvas = Canvas::new(self.config.canvas, self.config.background);
        let generator = SpiralGenerator::new(self.config, width, rng)?;

        Ok(Drawing { canvas, generator })
    }
}

#[cfg(test)]
use crate::image::canvas::Surface;
#[cfg(test)]
use image::{Rgb, RgbImage};
#[cfg(test)]
use rand::rngs::mock::StepRng;

#[cfg(test)]
fn small_config() -> SpiralConfig {
    SpiralConfig {
        canvas: Dimensions::from_wh(400, 400),
        start_radius: 20.,
        grow_per_loop: 8.,
        ..Default::default()
    }
}

#[test]
fn test_builder_without_reference_uses_fixed_width() {
    let drawing = Drawing::builder().config(small_config()).seed(3).build().unwrap();
    assert!(matches!(drawing.generator().width(), LineWidth::Fixed(5)));
    assert_eq!(drawing.canvas().dimensions(), Dimensions::from_wh(400, 400));
}

#[test]
fn test_builder_with_reference_uses_luminance() {
    let reference = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([0, 0, 0])));
    let drawing = Drawing::builder()
        .config(small_config())
        .reference(&reference)
        .build()
        .unwrap();
    assert!(matches!(drawing.generator().width(), LineWidth::Luminance { .. }));
}

#[test]
fn test_drawing_paints_canvas() {
    let mut drawing = Drawing::builder()
        .config(small_config())
        .build_with_rng(StepRng::new(0, 1))
        .unwrap();
    drawing.run_loops(4).unwrap();

    assert_eq!(drawing.history().loops().len(), 4);
    let ink = drawing
        .canvas()
        .image()
        .pixels()
        .filter(|p| **p == Rgb([0, 0, 0]))
        .count();
    assert!(ink > 0);
    // the centre stays blank, the spiral starts at radius 20
    assert_eq!(*drawing.canvas().image().get_pixel(200, 200), Rgb([255, 255, 255]));
}

#[test]
fn test_render_applies_resize_only_to_copy() {
    let mut drawing = Drawing::builder().config(small_config()).seed(1).build().unwrap();
    drawing.run_loops(1).unwrap();

    let small = drawing.render(&ExportOptions {
        blur: Some(1.5),
        resize: Some(Dimensions::from_wh(100, 50)),
    });
    assert_eq!(small.dimensions(), Dimensions::from_wh(100, 50));
    assert_eq!(drawing.canvas().dimensions(), Dimensions::from_wh(400, 400));
}

#[test]
fn test_builder_rejects_bad_config() {
    let result = Drawing::builder()
        .config(SpiralConfig {
            step_distance_ratio: 0.,
            ..small_config()
        })
        .build();
    assert!(result.is_err());
}
