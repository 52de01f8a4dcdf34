use crate::error::Result;
use crate::types::point::Point;
use crate::types::rect::{Dimensions, Rect};
use image::imageops::FilterType;
use image::{imageops, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_polygon_mut};
use std::path::Path;

/// The drawing capability the spiral needs from a raster target.
///
/// Coordinates handed to a surface are canvas pixels (origin top-left, y down).
pub trait Surface {
    fn dimensions(&self) -> Dimensions;

    fn draw_line(&mut self, from: Point<i32>, to: Point<i32>, color: Rgb<u8>, width: u32);
}

/// An RGB raster the spiral is drawn onto.
#[derive(Clone, Debug)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(dimensions: Dimensions, background: Rgb<u8>) -> Self {
        Canvas {
            image: RgbImage::from_pixel(dimensions.width(), dimensions.height(), background),
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Gaussian blur with the given standard deviation.
    pub fn blur(&mut self, sigma: f32) {
        if sigma > 0. {
            self.image = imageops::blur(&self.image, sigma);
        }
    }

    pub fn resized(&self, dimensions: Dimensions) -> Canvas {
        Canvas {
            image: imageops::resize(
                &self.image,
                dimensions.width(),
                dimensions.height(),
                FilterType::Lanczos3,
            ),
        }
    }

    /// Writes the canvas, the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.image.save(path)?;
        Ok(())
    }

    /// Longest distance between two pixels; no stroke needs to be wider than this.
    fn diagonal(&self) -> f64 {
        f64::from(self.image.width()).hypot(f64::from(self.image.height()))
    }
}

impl Surface for Canvas {
    fn dimensions(&self) -> Dimensions {
        Dimensions::from_wh(self.image.width(), self.image.height())
    }

    /**
    Strokes a segment `width` pixels thick with round ends.

    The body is a quad offset by half the width on either side, the ends are filled
    circles, so consecutive segments of a loop join without notches. One pixel wide
    lines are plain segments.
    */
    fn draw_line(&mut self, from: Point<i32>, to: Point<i32>, color: Rgb<u8>, width: u32) {
        let half = (f64::from(width) / 2.).min(self.diagonal());
        let reach = half.ceil() as i32 + 1;

        if !Rect::spanning(from, to)
            .extend(reach)
            .overlaps(&self.dimensions().to_signed())
        {
            return;
        }

        if half < 1. {
            draw_line_segment_mut(
                &mut self.image,
                (from.x as f32, from.y as f32),
                (to.x as f32, to.y as f32),
                color,
            );
            return;
        }

        let radius = half.round() as i32;
        draw_filled_circle_mut(&mut self.image, (from.x, from.y), radius, color);
        draw_filled_circle_mut(&mut self.image, (to.x, to.y), radius, color);

        let (dx, dy) = (
            f64::from(to.x) - f64::from(from.x),
            f64::from(to.y) - f64::from(from.y),
        );
        let length = dx.hypot(dy);
        if length == 0. {
            return;
        }

        let normal = Point {
            x: (-dy / length * half).round() as i32,
            y: (dx / length * half).round() as i32,
        };
        let corners = [
            from.saturating_add(normal),
            to.saturating_add(normal),
            to.saturating_sub(normal),
            from.saturating_sub(normal),
        ]
        .map(|p| imageproc::point::Point::new(p.x, p.y));
        draw_polygon_mut(&mut self.image, &corners, color);
    }
}

#[cfg(test)]
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
#[cfg(test)]
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

#[cfg(test)]
fn painted(canvas: &Canvas) -> usize {
    canvas.image().pixels().filter(|p| **p == BLACK).count()
}

#[test]
fn test_horizontal_line_thickness() {
    let mut canvas = Canvas::new(Dimensions::from_wh(50, 50), WHITE);
    canvas.draw_line(Point { x: 10, y: 25 }, Point { x: 40, y: 25 }, BLACK, 5);

    assert_eq!(*canvas.image().get_pixel(25, 25), BLACK);
    assert_eq!(*canvas.image().get_pixel(25, 23), BLACK);
    assert_eq!(*canvas.image().get_pixel(25, 27), BLACK);
    assert_eq!(*canvas.image().get_pixel(25, 31), WHITE);
    assert_eq!(*canvas.image().get_pixel(25, 19), WHITE);
    assert_eq!(*canvas.image().get_pixel(5, 25), WHITE);
    assert_eq!(*canvas.image().get_pixel(45, 25), WHITE);
}

#[test]
fn test_round_ends() {
    let mut canvas = Canvas::new(Dimensions::from_wh(50, 50), WHITE);
    canvas.draw_line(Point { x: 10, y: 25 }, Point { x: 40, y: 25 }, BLACK, 8);

    // the cap reaches past the end point on the segment axis but not into the corner
    assert_eq!(*canvas.image().get_pixel(43, 25), BLACK);
    assert_eq!(*canvas.image().get_pixel(44, 29), WHITE);
}

#[test]
fn test_wider_lines_paint_more() {
    let mut thin = Canvas::new(Dimensions::from_wh(100, 100), WHITE);
    let mut thick = thin.clone();
    thin.draw_line(Point { x: 10, y: 10 }, Point { x: 90, y: 70 }, BLACK, 3);
    thick.draw_line(Point { x: 10, y: 10 }, Point { x: 90, y: 70 }, BLACK, 24);

    assert!(painted(&thick) > painted(&thin) * 4);
}

#[test]
fn test_line_clipped_to_canvas() {
    let mut canvas = Canvas::new(Dimensions::from_wh(20, 20), WHITE);
    canvas.draw_line(Point { x: -50, y: 10 }, Point { x: 70, y: 10 }, BLACK, 1);
    assert_eq!(*canvas.image().get_pixel(0, 10), BLACK);
    assert_eq!(*canvas.image().get_pixel(19, 10), BLACK);
    assert_eq!(*canvas.image().get_pixel(10, 9), WHITE);

    let before = painted(&canvas);
    canvas.draw_line(Point { x: -50, y: -50 }, Point { x: -40, y: -45 }, BLACK, 3);
    assert_eq!(painted(&canvas), before);
}

#[test]
fn test_zero_length_line_is_a_dot() {
    let mut canvas = Canvas::new(Dimensions::from_wh(20, 20), WHITE);
    canvas.draw_line(Point { x: 10, y: 10 }, Point { x: 10, y: 10 }, BLACK, 1);
    assert_eq!(*canvas.image().get_pixel(10, 10), BLACK);
    assert_eq!(*canvas.image().get_pixel(13, 10), WHITE);

    canvas.draw_line(Point { x: 5, y: 5 }, Point { x: 5, y: 5 }, BLACK, 4);
    assert_eq!(*canvas.image().get_pixel(6, 5), BLACK);
    assert_eq!(*canvas.image().get_pixel(9, 5), WHITE);
}

#[test]
fn test_huge_width_does_not_overflow() {
    let mut canvas = Canvas::new(Dimensions::from_wh(30, 30), WHITE);
    canvas.draw_line(Point { x: 10, y: 10 }, Point { x: 12, y: 15 }, BLACK, u32::MAX);
    assert_eq!(painted(&canvas), 30 * 30);

    let mut far = Canvas::new(Dimensions::from_wh(30, 30), WHITE);
    far.draw_line(
        Point { x: i32::MAX - 5, y: 0 },
        Point { x: i32::MAX, y: 0 },
        BLACK,
        u32::MAX,
    );
}

#[test]
fn test_blur_and_resize() {
    let mut canvas = Canvas::new(Dimensions::from_wh(40, 40), WHITE);
    canvas.draw_line(Point { x: 0, y: 20 }, Point { x: 39, y: 20 }, BLACK, 2);
    canvas.blur(2.0);
    let edge = canvas.image().get_pixel(20, 17).0[0];
    assert!(edge > 0 && edge < 255);

    let small = canvas.resized(Dimensions::from_wh(10, 10));
    assert_eq!(small.dimensions(), Dimensions::from_wh(10, 10));
}
