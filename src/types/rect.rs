use crate::types::point::Point;
use num_traits::{PrimInt, Zero};
use std::ops::Sub;

/// An axis aligned rectangle, `min` inclusive and `max` exclusive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect<T> {
    pub min: Point<T>,
    pub max: Point<T>,
}

/// Pixel size of a canvas or image, anchored at the origin.
pub type Dimensions = Rect<u32>;

impl<T> Rect<T>
where
    T: Zero + Copy,
{
    pub fn from_wh(width: T, height: T) -> Self {
        Rect {
            min: Point {
                x: T::zero(),
                y: T::zero(),
            },
            max: Point {
                x: width,
                y: height,
            },
        }
    }
}

impl<T> Rect<T>
where
    T: Copy + Sub<Output = T>,
{
    pub fn width(&self) -> T {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> T {
        self.max.y - self.min.y
    }
}

impl<T> Rect<T>
where
    T: PartialOrd + Copy,
{
    /// Smallest rectangle spanning both corners, regardless of their order.
    pub(crate) fn spanning(a: Point<T>, b: Point<T>) -> Self {
        Rect {
            min: a.min(&b),
            max: a.max(&b),
        }
    }

    pub(crate) fn overlaps(&self, other: &Rect<T>) -> bool {
        !(self.max.x <= other.min.x
            || self.max.y <= other.min.y
            || self.min.x >= other.max.x
            || self.min.y >= other.max.y)
    }

    pub fn contains_point(&self, point: &Point<T>) -> bool {
        self.min.x <= point.x && point.x < self.max.x && self.min.y <= point.y && point.y < self.max.y
    }
}

impl<T> Rect<T>
where
    T: PrimInt,
{
    pub fn max_side(&self) -> T {
        let (w, h) = (self.max.x - self.min.x, self.max.y - self.min.y);
        if w >= h {
            w
        } else {
            h
        }
    }

    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y
    }
}

impl Rect<i32> {
    /// Grows the rectangle by `thickness` on every side, stopping at the `i32` limits.
    pub(crate) fn extend(&self, thickness: i32) -> Self {
        let thick = Point {
            x: thickness,
            y: thickness,
        };
        Rect {
            min: self.min.saturating_sub(thick),
            max: self.max.saturating_add(thick),
        }
    }
}

impl Dimensions {
    pub(crate) fn to_signed(self) -> Rect<i32> {
        Rect {
            min: Point {
                x: self.min.x as i32,
                y: self.min.y as i32,
            },
            max: Point {
                x: self.max.x as i32,
                y: self.max.y as i32,
            },
        }
    }
}

#[test]
fn test_rect_from_wh() {
    let d = Dimensions::from_wh(300, 200);
    assert_eq!(d.width(), 300);
    assert_eq!(d.height(), 200);
    assert_eq!(d.max_side(), 300);
    assert!(!d.is_empty());
    assert!(Dimensions::from_wh(0, 10).is_empty());
}

#[test]
fn test_rect_contains_point_is_half_open() {
    let r = Dimensions::from_wh(10, 10).to_signed();
    assert!(r.contains_point(&Point { x: 0, y: 0 }));
    assert!(r.contains_point(&Point { x: 9, y: 9 }));
    assert!(!r.contains_point(&Point { x: 10, y: 5 }));
    assert!(!r.contains_point(&Point { x: -1, y: 5 }));
}

#[test]
fn test_rect_spanning_extend_overlaps() {
    let r = Rect::spanning(Point { x: 8, y: 2 }, Point { x: 3, y: 7 });
    assert_eq!(r.min, Point { x: 3, y: 2 });
    assert_eq!(r.max, Point { x: 8, y: 7 });

    let grown = r.extend(4);
    assert_eq!(grown.min, Point { x: -1, y: -2 });
    assert_eq!(grown.max, Point { x: 12, y: 11 });
    assert!(grown.overlaps(&Rect::from_wh(10, 10)));

    let outside = Rect::spanning(Point { x: 20, y: 20 }, Point { x: 30, y: 30 });
    assert!(!outside.overlaps(&Rect::from_wh(10, 10)));
}

#[test]
fn test_rect_extend_saturates() {
    let far = Rect::spanning(Point { x: i32::MAX - 2, y: i32::MIN }, Point { x: i32::MAX, y: 0 });
    let grown = far.extend(50);
    assert_eq!(grown.max.x, i32::MAX);
    assert_eq!(grown.min.y, i32::MIN);
    assert!(!grown.overlaps(&Rect::from_wh(30, 30)));
}
