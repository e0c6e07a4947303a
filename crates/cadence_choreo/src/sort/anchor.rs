//! Named anchors on a container: corners, the nine radial positions, and
//! sweep directions

use cadence_core::{CadenceError, Container, Point};
use std::fmt;
use std::str::FromStr;

/// One of the four container corners
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Corner {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Corner::TopLeft => "top_left",
            Corner::TopRight => "top_right",
            Corner::BottomLeft => "bottom_left",
            Corner::BottomRight => "bottom_right",
        }
    }

    pub fn point(self, container: &Container) -> Point {
        match self {
            Corner::TopLeft => Point::ORIGIN,
            Corner::TopRight => Point::new(container.width(), 0.0),
            Corner::BottomLeft => Point::new(0.0, container.height()),
            Corner::BottomRight => Point::new(container.width(), container.height()),
        }
    }
}

/// A point on the container's 3x3 grid of edges, corners and center
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Position {
    TopLeft,
    TopMiddle,
    TopRight,
    Left,
    #[default]
    Middle,
    Right,
    BottomLeft,
    BottomMiddle,
    BottomRight,
}

impl Position {
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopMiddle,
        Position::TopRight,
        Position::Left,
        Position::Middle,
        Position::Right,
        Position::BottomLeft,
        Position::BottomMiddle,
        Position::BottomRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Position::TopLeft => "top_left",
            Position::TopMiddle => "top_middle",
            Position::TopRight => "top_right",
            Position::Left => "left",
            Position::Middle => "middle",
            Position::Right => "right",
            Position::BottomLeft => "bottom_left",
            Position::BottomMiddle => "bottom_middle",
            Position::BottomRight => "bottom_right",
        }
    }

    /// Midpoints snap down to whole units
    pub fn point(self, container: &Container) -> Point {
        let (w, h) = (container.width(), container.height());
        let (half_w, half_h) = ((w / 2.0).floor(), (h / 2.0).floor());
        let (x, y) = match self {
            Position::TopLeft => (0.0, 0.0),
            Position::TopMiddle => (half_w, 0.0),
            Position::TopRight => (w, 0.0),
            Position::Left => (0.0, half_h),
            Position::Middle => (half_w, half_h),
            Position::Right => (w, half_h),
            Position::BottomLeft => (0.0, h),
            Position::BottomMiddle => (half_w, h),
            Position::BottomRight => (w, h),
        };
        Point::new(x, y)
    }
}

/// Sweep direction for linear sorts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    #[default]
    TopToBottom,
    BottomToTop,
    LeftToRight,
    RightToLeft,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::TopToBottom,
        Direction::BottomToTop,
        Direction::LeftToRight,
        Direction::RightToLeft,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Direction::TopToBottom => "top_to_bottom",
            Direction::BottomToTop => "bottom_to_top",
            Direction::LeftToRight => "left_to_right",
            Direction::RightToLeft => "right_to_left",
        }
    }

    /// Midpoint of the edge the sweep starts from
    pub fn point(self, container: &Container) -> Point {
        let (w, h) = (container.width(), container.height());
        match self {
            Direction::TopToBottom => Point::new(w / 2.0, 0.0),
            Direction::BottomToTop => Point::new(w / 2.0, h),
            Direction::LeftToRight => Point::new(0.0, h / 2.0),
            Direction::RightToLeft => Point::new(w, h / 2.0),
        }
    }

    /// Collapse the axis the sweep does not travel along
    pub fn project(self, point: Point) -> Point {
        match self {
            Direction::TopToBottom | Direction::BottomToTop => point.vertical_projection(),
            Direction::LeftToRight | Direction::RightToLeft => point.horizontal_projection(),
        }
    }
}

fn parse_named<T: Copy>(
    kind: &str,
    s: &str,
    all: &[T],
    name: impl Fn(T) -> &'static str,
) -> Result<T, CadenceError> {
    let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
    all.iter()
        .copied()
        .find(|value| name(*value) == wanted)
        .ok_or_else(|| CadenceError::invalid_argument(format!("unknown {kind} '{s}'")))
}

impl FromStr for Corner {
    type Err = CadenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("corner", s, &Corner::ALL, Corner::name)
    }
}

impl FromStr for Position {
    type Err = CadenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("position", s, &Position::ALL, Position::name)
    }
}

impl FromStr for Direction {
    type Err = CadenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("direction", s, &Direction::ALL, Direction::name)
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_points() {
        let c = Container::new(200.0, 100.0);
        assert_eq!(Corner::TopLeft.point(&c), Point::new(0.0, 0.0));
        assert_eq!(Corner::TopRight.point(&c), Point::new(200.0, 0.0));
        assert_eq!(Corner::BottomLeft.point(&c), Point::new(0.0, 100.0));
        assert_eq!(Corner::BottomRight.point(&c), Point::new(200.0, 100.0));
    }

    #[test]
    fn test_position_points() {
        let c = Container::new(200.0, 100.0);
        assert_eq!(Position::Middle.point(&c), Point::new(100.0, 50.0));
        assert_eq!(Position::TopMiddle.point(&c), Point::new(100.0, 0.0));
        assert_eq!(Position::Right.point(&c), Point::new(200.0, 50.0));
        assert_eq!(Position::BottomMiddle.point(&c), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_position_midpoints_floor_odd_sizes() {
        let c = Container::new(201.0, 101.0);
        assert_eq!(Position::Middle.point(&c), Point::new(100.0, 50.0));
        assert_eq!(Position::TopMiddle.point(&c), Point::new(100.0, 0.0));
        assert_eq!(Position::Right.point(&c), Point::new(201.0, 50.0));
        assert_eq!(Position::BottomMiddle.point(&c), Point::new(100.0, 101.0));
    }

    #[test]
    fn test_direction_edges_and_projection() {
        let c = Container::new(200.0, 100.0);
        assert_eq!(Direction::TopToBottom.point(&c), Point::new(100.0, 0.0));
        assert_eq!(Direction::RightToLeft.point(&c), Point::new(200.0, 50.0));

        let p = Point::new(3.0, 4.0);
        assert_eq!(Direction::BottomToTop.project(p), Point::new(0.0, 4.0));
        assert_eq!(Direction::LeftToRight.project(p), Point::new(3.0, 0.0));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("top_left".parse::<Corner>().unwrap(), Corner::TopLeft);
        assert_eq!("Bottom-Right".parse::<Corner>().unwrap(), Corner::BottomRight);
        assert_eq!("middle".parse::<Position>().unwrap(), Position::Middle);
        assert_eq!(
            "right_to_left".parse::<Direction>().unwrap(),
            Direction::RightToLeft
        );
        for name in ["", "diagonal", "center"] {
            assert!(matches!(
                name.parse::<Direction>(),
                Err(CadenceError::InvalidArgument(_))
            ));
        }
        assert!("nowhere".parse::<Corner>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for p in Position::ALL {
            assert_eq!(p.to_string().parse::<Position>().unwrap(), p);
        }
    }
}
