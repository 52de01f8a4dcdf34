/// A cartesian coordinate pair.
///
/// Used both for the centred, y-up geometry space and for canvas pixel
/// positions; which one a value lives in is decided by who produced it.
#[derive(Copy, Clone, Debug)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> PartialEq<Self> for Point<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.x.eq(&other.x) && self.y.eq(&other.y)
    }
}

impl<T> Point<T>
where
    T: PartialOrd + Copy,
{
    pub(crate) fn min(&self, other: &Point<T>) -> Point<T> {
        Point {
            x: if self.x <= other.x { self.x } else { other.x },
            y: if self.y <= other.y { self.y } else { other.y },
        }
    }

    pub(crate) fn max(&self, other: &Point<T>) -> Point<T> {
        Point {
            x: if self.x >= other.x { self.x } else { other.x },
            y: if self.y >= other.y { self.y } else { other.y },
        }
    }
}

impl Point<i32> {
    pub(crate) fn saturating_add(&self, other: Point<i32>) -> Point<i32> {
        Point {
            x: self.x.saturating_add(other.x),
            y: self.y.saturating_add(other.y),
        }
    }

    pub(crate) fn saturating_sub(&self, other: Point<i32>) -> Point<i32> {
        Point {
            x: self.x.saturating_sub(other.x),
            y: self.y.saturating_sub(other.y),
        }
    }
}

impl Point<f64> {
    /// Rounds both components to the nearest pixel, halves to even.
    pub fn round(&self) -> Point<i32> {
        Point {
            x: self.x.round_ties_even() as i32,
            y: self.y.round_ties_even() as i32,
        }
    }
}

#[test]
fn test_point_min_max() {
    let a = Point { x: 3, y: -4 };
    let b = Point { x: 1, y: 2 };

    assert_eq!(a.min(&b), Point { x: 1, y: -4 });
    assert_eq!(a.max(&b), Point { x: 3, y: 2 });
}

#[test]
fn test_point_saturating() {
    let a = Point { x: i32::MAX - 1, y: i32::MIN + 1 };
    let step = Point { x: 5, y: 5 };

    assert_eq!(a.saturating_add(step), Point { x: i32::MAX, y: i32::MIN + 6 });
    assert_eq!(a.saturating_sub(step), Point { x: i32::MAX - 6, y: i32::MIN });
}

#[test]
fn test_point_round_halves_to_even() {
    assert_eq!(Point { x: 2.5_f64, y: -0.4 }.round(), Point { x: 2, y: 0 });
    assert_eq!(Point { x: 60.5_f64, y: 61.5 }.round(), Point { x: 60, y: 62 });
    assert_eq!(Point { x: -1.5_f64, y: 0.6 }.round(), Point { x: -2, y: 1 });
}
