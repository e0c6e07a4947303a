//! Planar geometry used to rank elements against a reference point

/// An immutable point in container coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Project onto the y axis (x collapsed to zero)
    pub fn vertical_projection(self) -> Self {
        Self::new(0.0, self.y)
    }

    /// Project onto the x axis (y collapsed to zero)
    pub fn horizontal_projection(self) -> Self {
        Self::new(self.x, 0.0)
    }
}

/// Straight-line distance between two points
pub fn euclidean_distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Distance along the x axis
pub fn horizontal_distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).abs()
}

/// Distance along the y axis
pub fn vertical_distance(a: Point, b: Point) -> f64 {
    (b.y - a.y).abs()
}

/// Taxicab distance, used for corner sweeps
pub fn manhattan_distance(a: Point, b: Point) -> f64 {
    horizontal_distance(a, b) + vertical_distance(a, b)
}

/// Round half up, so `-0.5` becomes `0` and `2.5` becomes `3`.
///
/// Offsets and delays are always rounded this way; `f64::round` rounds half
/// away from zero and would shift negative offsets by one.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(euclidean_distance(a, b), 5.0);
        assert_eq!(euclidean_distance(b, a), 5.0);
        assert_eq!(euclidean_distance(a, a), 0.0);
    }

    #[test]
    fn test_axis_distances() {
        let a = Point::new(10.0, -2.0);
        let b = Point::new(4.0, 6.0);
        assert_eq!(horizontal_distance(a, b), 6.0);
        assert_eq!(vertical_distance(a, b), 8.0);
        assert_eq!(manhattan_distance(a, b), 14.0);
    }

    #[test]
    fn test_projections() {
        let p = Point::new(7.0, 9.0);
        assert_eq!(p.vertical_projection(), Point::new(0.0, 9.0));
        assert_eq!(p.horizontal_projection(), Point::new(7.0, 0.0));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(0.4), 0);
        assert_eq!(round_half_up(0.5), 1);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-0.6), -1);
        assert_eq!(round_half_up(2.5), 3);
    }
}
