use crate::error::{Result, SpiralError};
use crate::types::point::Point;

/// A location around the canvas centre, stored canonically as radius and angle.
///
/// The angle is in radians, `0` pointing along the positive x-axis and growing
/// counter-clockwise (y-up convention). Once built a point never changes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PolarPoint {
    radius: f64,
    angle: f64,
}

impl PolarPoint {
    pub fn new(radius: f64, angle: f64) -> Self {
        PolarPoint { radius, angle }
    }

    pub fn from_cartesian(x: f64, y: f64) -> Self {
        PolarPoint {
            radius: x.hypot(y),
            angle: y.atan2(x),
        }
    }

    /**
    Builds a point from whichever complete coordinate pair is supplied.

    A full polar pair wins over a cartesian one. Supplying neither pair completely is a
    caller error.
    */
    pub fn from_parts(
        radius: Option<f64>,
        angle: Option<f64>,
        x: Option<f64>,
        y: Option<f64>,
    ) -> Result<Self> {
        match (radius, angle, x, y) {
            (Some(radius), Some(angle), _, _) => Ok(PolarPoint::new(radius, angle)),
            (_, _, Some(x), Some(y)) => Ok(PolarPoint::from_cartesian(x, y)),
            _ => Err(SpiralError::InvalidPoint),
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn to_cartesian(&self) -> Point<f64> {
        Point {
            x: self.radius * self.angle.cos(),
            y: self.radius * self.angle.sin(),
        }
    }

    /// Cartesian position rounded to whole pixels, still in the centred y-up space.
    pub fn to_pixel(&self) -> Point<i32> {
        self.to_cartesian().round()
    }
}

#[cfg(test)]
use std::f64::consts::{PI, TAU};

#[cfg(test)]
const EPS: f64 = 1e-9;

#[test]
fn test_cartesian_round_trip() {
    let samples = [
        (1.0, 0.0),
        (0.0, 1.0),
        (-3.5, 2.25),
        (-7.0, -11.0),
        (1234.5, -0.001),
        (1e-3, 1e-3),
    ];

    for (x, y) in samples {
        let back = PolarPoint::from_cartesian(x, y).to_cartesian();
        assert!((back.x - x).abs() < EPS, "x: {} != {}", back.x, x);
        assert!((back.y - y).abs() < EPS, "y: {} != {}", back.y, y);
    }
}

#[test]
fn test_polar_round_trip_normalises_angle() {
    for (r, a) in [(5.0, 0.3), (60.0, 4.0), (2.0, 7.5), (14.0, -1.0), (1.0, PI / 2.)] {
        let c = PolarPoint::new(r, a).to_cartesian();
        let back = PolarPoint::from_cartesian(c.x, c.y);

        assert!((back.radius() - r).abs() < EPS);
        let diff = (back.angle() - a).rem_euclid(TAU);
        assert!(diff < EPS || TAU - diff < EPS, "angle {} vs {}", back.angle(), a);
    }
}

#[test]
fn test_from_parts() {
    let polar = PolarPoint::from_parts(Some(2.0), Some(0.0), None, None).unwrap();
    assert_eq!(polar, PolarPoint::new(2.0, 0.0));

    let cart = PolarPoint::from_parts(None, None, Some(0.0), Some(3.0)).unwrap();
    assert!((cart.radius() - 3.0).abs() < EPS);
    assert!((cart.angle() - PI / 2.).abs() < EPS);

    let both = PolarPoint::from_parts(Some(1.0), Some(1.0), Some(9.0), Some(9.0)).unwrap();
    assert_eq!(both, PolarPoint::new(1.0, 1.0));
}

#[test]
fn test_from_parts_incomplete() {
    assert!(matches!(
        PolarPoint::from_parts(Some(1.0), None, Some(1.0), None),
        Err(SpiralError::InvalidPoint)
    ));
    assert!(matches!(
        PolarPoint::from_parts(None, None, None, None),
        Err(SpiralError::InvalidPoint)
    ));
}

#[test]
fn test_to_pixel() {
    let p = PolarPoint::new(10.0, PI);
    assert_eq!(p.to_pixel(), Point { x: -10, y: 0 });
}
