use crate::error::{Result, SpiralError};
use crate::image::canvas::Surface;
use crate::spiral::config::{Growth, SpiralConfig};
use crate::spiral::history::{History, LoopRecord};
use crate::spiral::jitter::Jitter;
use crate::spiral::width::LineWidth;
use crate::types::mapping::CoordinateMapper;
use crate::types::polar::PolarPoint;
use itertools::Itertools;
use rand::Rng;
use std::f64::consts::TAU;
use tracing::{debug, warn};

/**
Number of steps a loop starting at `radius` is split into.

Proportional to the circumference so the spacing between points stays roughly the
same while the spiral grows. A radius that yields no steps is an error.
*/
pub fn loop_steps(radius: f64, step_distance_ratio: f64) -> Result<usize> {
    let steps = (radius * TAU * step_distance_ratio).floor();
    if !steps.is_finite() || steps < 1. {
        return Err(SpiralError::DegenerateLoop {
            radius,
            ratio: step_distance_ratio,
        });
    }
    Ok(steps as usize)
}

/**
Backwards index into the flat history for step `step` of a loop with `steps` steps,
following a loop of `previous_steps` steps.

Points of the running loop are already in the history, so `step` skips over them and
the remainder walks the previous loop proportionally to the angular progress. This is
an approximation of "same angle, one loop earlier", not an exact lookup.
*/
pub fn feedback_offset(step: usize, steps: usize, previous_steps: usize) -> usize {
    step + previous_steps * (steps - step) / steps
}

/// Grows the spiral loop by loop and draws each loop onto a [`Surface`].
pub struct SpiralGenerator<R> {
    config: SpiralConfig,
    mapper: CoordinateMapper,
    width: LineWidth,
    jitter: Jitter<R>,
    current_radius: f64,
    previous_point: PolarPoint,
    history: History,
}

impl<R> SpiralGenerator<R>
where
    R: Rng,
{
    pub fn new(config: SpiralConfig, width: LineWidth, rng: R) -> Result<Self> {
        config.validate()?;

        Ok(SpiralGenerator {
            mapper: CoordinateMapper::for_dimensions(config.canvas),
            jitter: Jitter::new(rng, config.max_jitter),
            current_radius: config.start_radius,
            previous_point: PolarPoint::new(config.start_radius, 0.),
            history: History::default(),
            width,
            config,
        })
    }

    pub fn width(&self) -> &LineWidth {
        &self.width
    }

    pub fn current_radius(&self) -> f64 {
        self.current_radius
    }

    pub fn previous_point(&self) -> PolarPoint {
        self.previous_point
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Runs `count` loops one after another.
    pub fn run_loops<S: Surface>(&mut self, count: usize, surface: &mut S) -> Result<()> {
        for _ in 0..count {
            self.run_loop(surface)?;
        }
        Ok(())
    }

    /// Emits and draws one full revolution.
    pub fn run_loop<S: Surface>(&mut self, surface: &mut S) -> Result<LoopRecord> {
        let steps = loop_steps(self.current_radius, self.config.step_distance_ratio)?;
        let angle_step = TAU / steps as f64;
        let radius_step = self.config.grow_per_loop / steps as f64;

        let previous_steps = match self.config.growth {
            Growth::Free => None,
            Growth::Feedback => self.history.last_loop().map(LoopRecord::steps),
        };

        let from = self.previous_point;
        self.history.begin_loop();
        for i in 0..steps {
            let radius = previous_steps
                .and_then(|previous| self.feedback_radius(i, steps, previous))
                .unwrap_or(self.current_radius + radius_step);

            self.current_radius = radius;
            self.history.push(PolarPoint::new(radius, i as f64 * angle_step));
        }
        let record = self.history.finish_loop();

        self.draw_loop(surface, from, &record);
        if let Some(last) = self.history.back(1) {
            self.previous_point = *last;
        }

        debug!(
            loop_index = self.history.loops().len(),
            steps,
            radius = self.current_radius,
            "loop finished"
        );

        Ok(record)
    }

    fn feedback_radius(&mut self, step: usize, steps: usize, previous_steps: usize) -> Option<f64> {
        let offset = feedback_offset(step, steps, previous_steps).max(1);
        let anchor = match self.history.back(offset) {
            Some(point) => point.radius(),
            None => {
                warn!(
                    offset,
                    recorded = self.history.len(),
                    "feedback offset beyond history, growing linearly"
                );
                return None;
            }
        };

        Some(anchor + self.config.grow_per_loop + f64::from(self.jitter.sample()))
    }

    fn draw_loop<S: Surface>(&self, surface: &mut S, from: PolarPoint, record: &LoopRecord) {
        let points = self.history.loop_points(record);
        for (start, end) in std::iter::once(&from).chain(points).tuple_windows() {
            let start = self.mapper.to_canvas(start.to_pixel());
            let end = self.mapper.to_canvas(end.to_pixel());
            surface.draw_line(start, end, self.config.line_color, self.width.at(end));
        }
    }
}

#[cfg(test)]
use crate::image::luminance::LuminanceSampler;
#[cfg(test)]
use crate::types::point::Point;
#[cfg(test)]
use crate::types::rect::Dimensions;
#[cfg(test)]
use image::{GrayImage, Luma, Rgb};
#[cfg(test)]
use rand::rngs::SmallRng;
#[cfg(test)]
use rand::SeedableRng;

#[cfg(test)]
#[derive(Default)]
struct Recorder {
    lines: Vec<(Point<i32>, Point<i32>, u32)>,
}

#[cfg(test)]
impl Surface for Recorder {
    fn dimensions(&self) -> Dimensions {
        Dimensions::from_wh(3000, 3000)
    }

    fn draw_line(&mut self, from: Point<i32>, to: Point<i32>, _color: Rgb<u8>, width: u32) {
        self.lines.push((from, to, width));
    }
}

#[cfg(test)]
fn generator(config: SpiralConfig) -> SpiralGenerator<SmallRng> {
    let width = LineWidth::from_config(&config, None);
    SpiralGenerator::new(config, width, SmallRng::seed_from_u64(7)).unwrap()
}

#[test]
fn test_loop_steps() {
    assert_eq!(loop_steps(60., 0.4).unwrap(), 150);
    assert_eq!(loop_steps(60., 0.4).unwrap(), loop_steps(60., 0.4).unwrap());
    assert_eq!(loop_steps(74., 0.4).unwrap(), 185);
}

#[test]
fn test_degenerate_loop() {
    assert!(matches!(
        loop_steps(0.1, 0.4),
        Err(SpiralError::DegenerateLoop { .. })
    ));
    assert!(matches!(
        loop_steps(0., 0.4),
        Err(SpiralError::DegenerateLoop { .. })
    ));

    let mut spiral = generator(SpiralConfig {
        start_radius: 0.2,
        ..Default::default()
    });
    let mut recorder = Recorder::default();
    assert!(spiral.run_loop(&mut recorder).is_err());
    assert!(recorder.lines.is_empty());
    assert!(spiral.history().is_empty());
}

#[test]
fn test_feedback_offset() {
    assert_eq!(feedback_offset(0, 185, 150), 150);
    assert_eq!(feedback_offset(1, 185, 150), 1 + 149);
    assert_eq!(feedback_offset(184, 185, 150), 184);
    // exact integer floor: 5 * (1 - 4/5) is 1, not the 0 a float product truncates to
    assert_eq!(feedback_offset(4, 5, 5), 5);
    // the offset never walks past the start of the previous loop
    for i in 0..185 {
        assert!(feedback_offset(i, 185, 150) <= i + 150);
        assert!(feedback_offset(i, 185, 150) >= 1);
    }
}

#[test]
fn test_first_loop() {
    let mut spiral = generator(SpiralConfig {
        growth: Growth::Free,
        ..Default::default()
    });
    let mut recorder = Recorder::default();
    let record = spiral.run_loop(&mut recorder).unwrap();

    assert_eq!(record.steps(), 150);
    let first = spiral.history().points()[0];
    assert!((first.radius() - (60. + 14. / 150.)).abs() < 1e-9);
    assert_eq!(first.angle(), 0.);
    assert!((spiral.current_radius() - 74.).abs() < 1e-9);
    assert_eq!(spiral.previous_point(), spiral.history().points()[149]);

    assert_eq!(recorder.lines.len(), 150);
    assert_eq!(recorder.lines[0].0, Point { x: 1560, y: 1500 });
    assert!(recorder.lines.iter().all(|(_, _, w)| *w == 5));
    for pair in recorder.lines.windows(2) {
        assert_eq!(pair[0].1, pair[1].0);
    }
}

#[test]
fn test_free_growth_is_monotonic() {
    let mut spiral = generator(SpiralConfig {
        growth: Growth::Free,
        ..Default::default()
    });
    spiral.run_loops(3, &mut Recorder::default()).unwrap();

    for pair in spiral.history().points().windows(2) {
        assert!(pair[1].radius() > pair[0].radius());
    }
}

#[test]
fn test_history_length_is_sum_of_steps() {
    let mut spiral = generator(SpiralConfig::default());
    spiral.run_loops(5, &mut Recorder::default()).unwrap();

    let loops = spiral.history().loops();
    assert_eq!(loops.len(), 5);
    assert_eq!(
        spiral.history().len(),
        loops.iter().map(LoopRecord::steps).sum::<usize>()
    );
}

#[test]
fn test_feedback_without_jitter_follows_previous_loop() {
    let mut spiral = generator(SpiralConfig {
        max_jitter: 0,
        ..Default::default()
    });
    let mut recorder = Recorder::default();
    spiral.run_loops(3, &mut recorder).unwrap();

    let history = spiral.history();
    let (first, second) = (history.loops()[0], history.loops()[1]);
    let points = history.points();
    for i in 0..second.steps() {
        let global = second.range().start + i;
        let offset = feedback_offset(i, second.steps(), first.steps());
        let anchor = points[global - offset];
        assert_eq!(points[global].radius(), anchor.radius() + 14.);
    }
    assert_eq!(recorder.lines.len(), history.len());
}

#[test]
fn test_feedback_is_reproducible_with_seed() {
    let mut a = generator(SpiralConfig::default());
    let mut b = generator(SpiralConfig::default());
    a.run_loops(4, &mut Recorder::default()).unwrap();
    b.run_loops(4, &mut Recorder::default()).unwrap();
    assert_eq!(a.history().points(), b.history().points());
}

#[test]
fn test_luminance_width_is_applied() {
    let config = SpiralConfig::default();
    let field = GrayImage::from_pixel(3000, 3000, Luma([0]));
    let width = LineWidth::from_config(&config, Some(LuminanceSampler::from_field(field)));
    let mut spiral = SpiralGenerator::new(config, width, SmallRng::seed_from_u64(1)).unwrap();

    let mut recorder = Recorder::default();
    spiral.run_loop(&mut recorder).unwrap();
    assert!(recorder.lines.iter().all(|(_, _, w)| *w == 24));
}

#[test]
fn test_invalid_config_rejected() {
    let config = SpiralConfig {
        step_distance_ratio: -1.,
        ..Default::default()
    };
    let width = LineWidth::from_config(&config, None);
    assert!(SpiralGenerator::new(config, width, SmallRng::seed_from_u64(1)).is_err());
}
