use crate::types::point::Point;
use crate::types::rect::Dimensions;

/// Moves points between the centred y-up space the spiral is computed in and
/// the canvas' pixel space (origin top-left, y down).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CoordinateMapper {
    center: Point<i32>,
}

impl CoordinateMapper {
    pub fn new(center: Point<i32>) -> Self {
        CoordinateMapper { center }
    }

    pub fn for_dimensions(dimensions: Dimensions) -> Self {
        CoordinateMapper::new(Point {
            x: (dimensions.width() / 2) as i32,
            y: (dimensions.height() / 2) as i32,
        })
    }

    pub fn to_canvas(&self, point: Point<i32>) -> Point<i32> {
        Point {
            x: point.x.saturating_add(self.center.x),
            y: self.center.y.saturating_sub(point.y),
        }
    }

    /// Inverse of [`CoordinateMapper::to_canvas`].
    pub fn from_canvas(&self, point: Point<i32>) -> Point<i32> {
        Point {
            x: point.x.saturating_sub(self.center.x),
            y: self.center.y.saturating_sub(point.y),
        }
    }
}

#[test]
fn test_mapping_flips_y() {
    let m = CoordinateMapper::for_dimensions(Dimensions::from_wh(3000, 3000));
    assert_eq!(m.to_canvas(Point { x: 0, y: 0 }), Point { x: 1500, y: 1500 });
    assert_eq!(m.to_canvas(Point { x: 10, y: 20 }), Point { x: 1510, y: 1480 });
    assert_eq!(m.to_canvas(Point { x: -10, y: -20 }), Point { x: 1490, y: 1520 });
}

#[test]
fn test_mapping_round_trip() {
    let m = CoordinateMapper::new(Point { x: 501, y: 333 });
    for x in (-600..600).step_by(37) {
        for y in (-400..400).step_by(29) {
            let p = Point { x, y };
            assert_eq!(m.from_canvas(m.to_canvas(p)), p);
        }
    }
}

#[test]
fn test_mapping_saturates_far_points() {
    let m = CoordinateMapper::for_dimensions(Dimensions::from_wh(3000, 3000));
    assert_eq!(
        m.to_canvas(Point { x: i32::MAX, y: i32::MIN }),
        Point { x: i32::MAX, y: i32::MAX }
    );
}
