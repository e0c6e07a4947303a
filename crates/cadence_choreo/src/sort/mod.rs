//! Sort functions
//!
//! A sort function decides the order in which a container's children animate
//! and the time offset each one starts at. Every strategy runs in two phases:
//!
//! 1. [`SortFunction::order`] arranges the elements and records whatever the
//!    second phase needs (the reference point, maximum distances).
//! 2. [`SortFunction::assign_offsets`] turns that [`SortedElements`] into
//!    [`TimedElement`]s.
//!
//! [`SortFunction::timed_elements`] runs both.
//!
//! # Example
//!
//! ```rust
//! use cadence_choreo::{Corner, SortFunction};
//! use cadence_core::Container;
//!
//! let container = Container::grid(3, 3, 10.0, 10.0);
//! let sort = SortFunction::snake(40, false, Corner::TopLeft);
//! let timed = sort.timed_elements(&container, container.children().to_vec());
//!
//! let ids: Vec<u64> = timed.iter().map(|t| t.element.id.0).collect();
//! assert_eq!(ids, vec![0, 1, 2, 5, 4, 3, 6, 7, 8]);
//! assert_eq!(timed[8].offset_ms, 320);
//! ```

mod anchor;
mod metric;

pub use anchor::{Corner, Direction, Position};

use cadence_core::{
    horizontal_distance, round_half_up, vertical_distance, CadenceError, Container, Element,
    Point, Result,
};
use metric::{bucket_offsets, max_of, normalize, sort_by_metric, sweep, translate, Metric};
use rand::seq::SliceRandom;
use rand::Rng;

/// An element paired with its start offset in milliseconds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimedElement {
    pub element: Element,
    pub offset_ms: i64,
}

impl TimedElement {
    pub fn new(element: Element, offset_ms: i64) -> Self {
        Self { element, offset_ms }
    }
}

/// Values measured while ordering that offset assignment depends on
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SortMetrics {
    #[default]
    None,
    /// Largest distance to the reference point
    MaxDistance(f64),
    /// Largest weighted distance along each axis
    MaxAxisDistance { horizontal: f64, vertical: f64 },
}

/// Output of [`SortFunction::order`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SortedElements {
    pub elements: Vec<Element>,
    /// Point distances were measured from, if the strategy is geometric
    pub reference: Option<Point>,
    pub metrics: SortMetrics,
}

/// Axis weights for [`SortFunction::ContinuousWeighted`]. Both are
/// non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawWeights"))]
pub struct Weights {
    horizontal: f64,
    vertical: f64,
}

impl Weights {
    pub const LIGHT: f64 = 0.5;
    pub const MEDIUM: f64 = 1.0;
    pub const HEAVY: f64 = 2.0;

    pub fn new(horizontal: f64, vertical: f64) -> Result<Self> {
        for (axis, weight) in [("horizontal", horizontal), ("vertical", vertical)] {
            if weight.is_nan() || weight < 0.0 {
                return Err(CadenceError::invalid_argument(format!(
                    "{axis} weight must be non-negative, got {weight}"
                )));
            }
        }
        Ok(Self {
            horizontal,
            vertical,
        })
    }

    pub fn horizontal(&self) -> f64 {
        self.horizontal
    }

    pub fn vertical(&self) -> f64 {
        self.vertical
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            horizontal: Self::MEDIUM,
            vertical: Self::MEDIUM,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawWeights {
    horizontal: f64,
    vertical: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawWeights> for Weights {
    type Error = CadenceError;

    fn try_from(raw: RawWeights) -> Result<Self> {
        Weights::new(raw.horizontal, raw.vertical)
    }
}

/// Ordering and timing strategy for a choreography.
///
/// `delay` is the spacing between consecutive offsets for the stepped
/// strategies and the full spread for the continuous ones. It may be
/// negative, which runs the sequence backwards in time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SortFunction {
    /// Container order, `i * delay`
    Default { delay: i64 },
    /// Distance from the element nearest the container origin
    Distanced { delay: i64, reversed: bool },
    /// Taxicab order away from a corner
    Cornered {
        delay: i64,
        reversed: bool,
        corner: Corner,
    },
    /// Distance from the element nearest a named position
    Radial {
        delay: i64,
        reversed: bool,
        position: Position,
    },
    /// Offsets proportional to distance instead of stepped
    Continuous {
        delay: i64,
        reversed: bool,
        position: Position,
    },
    /// Proportional offsets with separate axis weights, container order
    ContinuousWeighted {
        delay: i64,
        reversed: bool,
        position: Position,
        weights: Weights,
    },
    /// Distance along one axis from an edge
    Linear {
        delay: i64,
        reversed: bool,
        direction: Direction,
    },
    /// Row by row from a corner
    Inline {
        delay: i64,
        reversed: bool,
        corner: Corner,
    },
    /// Row by row from a corner, alternating direction
    Snake {
        delay: i64,
        reversed: bool,
        corner: Corner,
    },
    /// Uniformly shuffled
    Random { delay: i64 },
}

impl SortFunction {
    // ========================================================================
    // Constructors
    // ========================================================================

    pub fn default_sort(delay: i64) -> Self {
        SortFunction::Default { delay }
    }

    pub fn distanced(delay: i64, reversed: bool) -> Self {
        SortFunction::Distanced { delay, reversed }
    }

    pub fn cornered(delay: i64, reversed: bool, corner: Corner) -> Self {
        SortFunction::Cornered {
            delay,
            reversed,
            corner,
        }
    }

    pub fn radial(delay: i64, reversed: bool, position: Position) -> Self {
        SortFunction::Radial {
            delay,
            reversed,
            position,
        }
    }

    pub fn continuous(delay: i64, reversed: bool, position: Position) -> Self {
        SortFunction::Continuous {
            delay,
            reversed,
            position,
        }
    }

    /// Fails with `InvalidArgument` if either weight is negative
    pub fn continuous_weighted(
        delay: i64,
        reversed: bool,
        position: Position,
        horizontal_weight: f64,
        vertical_weight: f64,
    ) -> Result<Self> {
        Ok(SortFunction::ContinuousWeighted {
            delay,
            reversed,
            position,
            weights: Weights::new(horizontal_weight, vertical_weight)?,
        })
    }

    pub fn linear(delay: i64, reversed: bool, direction: Direction) -> Self {
        SortFunction::Linear {
            delay,
            reversed,
            direction,
        }
    }

    pub fn inline(delay: i64, reversed: bool, corner: Corner) -> Self {
        SortFunction::Inline {
            delay,
            reversed,
            corner,
        }
    }

    pub fn snake(delay: i64, reversed: bool, corner: Corner) -> Self {
        SortFunction::Snake {
            delay,
            reversed,
            corner,
        }
    }

    pub fn random(delay: i64) -> Self {
        SortFunction::Random { delay }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn name(&self) -> &'static str {
        match self {
            SortFunction::Default { .. } => "default",
            SortFunction::Distanced { .. } => "distanced",
            SortFunction::Cornered { .. } => "cornered",
            SortFunction::Radial { .. } => "radial",
            SortFunction::Continuous { .. } => "continuous",
            SortFunction::ContinuousWeighted { .. } => "continuous_weighted",
            SortFunction::Linear { .. } => "linear",
            SortFunction::Inline { .. } => "inline",
            SortFunction::Snake { .. } => "snake",
            SortFunction::Random { .. } => "random",
        }
    }

    pub fn delay(&self) -> i64 {
        match *self {
            SortFunction::Default { delay }
            | SortFunction::Random { delay }
            | SortFunction::Distanced { delay, .. }
            | SortFunction::Cornered { delay, .. }
            | SortFunction::Radial { delay, .. }
            | SortFunction::Continuous { delay, .. }
            | SortFunction::ContinuousWeighted { delay, .. }
            | SortFunction::Linear { delay, .. }
            | SortFunction::Inline { delay, .. }
            | SortFunction::Snake { delay, .. } => delay,
        }
    }

    pub fn is_reversed(&self) -> bool {
        match *self {
            SortFunction::Default { .. } | SortFunction::Random { .. } => false,
            SortFunction::Distanced { reversed, .. }
            | SortFunction::Cornered { reversed, .. }
            | SortFunction::Radial { reversed, .. }
            | SortFunction::Continuous { reversed, .. }
            | SortFunction::ContinuousWeighted { reversed, .. }
            | SortFunction::Linear { reversed, .. }
            | SortFunction::Inline { reversed, .. }
            | SortFunction::Snake { reversed, .. } => reversed,
        }
    }

    /// The point distances are measured from, `None` for the strategies
    /// that ignore geometry.
    ///
    /// Distanced, radial and both continuous strategies snap their anchor to
    /// the nearest element; corners and edges are used as-is.
    pub fn reference_point(&self, container: &Container, elements: &[Element]) -> Option<Point> {
        match *self {
            SortFunction::Default { .. } | SortFunction::Random { .. } => None,
            SortFunction::Distanced { .. } => Some(translate(Point::ORIGIN, elements)),
            SortFunction::Radial { position, .. }
            | SortFunction::Continuous { position, .. }
            | SortFunction::ContinuousWeighted { position, .. } => {
                Some(translate(position.point(container), elements))
            }
            SortFunction::Cornered { corner, .. }
            | SortFunction::Inline { corner, .. }
            | SortFunction::Snake { corner, .. } => Some(corner.point(container)),
            SortFunction::Linear { direction, .. } => Some(direction.point(container)),
        }
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Arrange `elements` for this strategy
    pub fn order(&self, container: &Container, elements: Vec<Element>) -> SortedElements {
        self.order_with_rng(container, elements, &mut rand::rng())
    }

    /// [`SortFunction::order`] with a caller supplied random source, used by
    /// [`SortFunction::Random`]
    pub fn order_with_rng<R: Rng + ?Sized>(
        &self,
        container: &Container,
        mut elements: Vec<Element>,
        rng: &mut R,
    ) -> SortedElements {
        let reference = self.reference_point(container, &elements);
        let mut metrics = SortMetrics::None;

        match (*self, reference) {
            (SortFunction::Random { .. }, _) => elements.shuffle(rng),
            (SortFunction::Default { .. }, _) | (_, None) => {}
            (
                SortFunction::Distanced { reversed, .. } | SortFunction::Radial { reversed, .. },
                Some(r),
            ) => sort_by_metric(&mut elements, r, Metric::Euclidean, reversed),
            (SortFunction::Cornered { reversed, .. }, Some(r)) => {
                sort_by_metric(&mut elements, r, Metric::Manhattan, reversed)
            }
            (
                SortFunction::Linear {
                    reversed,
                    direction,
                    ..
                },
                Some(r),
            ) => sort_by_metric(&mut elements, r, Metric::Projected(direction), reversed),
            (SortFunction::Continuous { .. }, Some(r)) => {
                // Always nearest first; `reversed` only flips the offsets
                sort_by_metric(&mut elements, r, Metric::Euclidean, false);
                metrics = SortMetrics::MaxDistance(max_of(&elements, |e| {
                    Metric::Euclidean.measure(r, e)
                }));
            }
            (SortFunction::ContinuousWeighted { weights, .. }, Some(r)) => {
                let (horizontal, vertical) = weighted_maxima(&elements, r, weights);
                metrics = SortMetrics::MaxAxisDistance {
                    horizontal,
                    vertical,
                };
            }
            (SortFunction::Inline { reversed, .. }, Some(r)) => {
                sweep(&mut elements, r, false);
                if reversed {
                    elements.reverse();
                }
            }
            (SortFunction::Snake { reversed, .. }, Some(r)) => {
                sweep(&mut elements, r, true);
                if reversed {
                    elements.reverse();
                }
            }
        }

        SortedElements {
            elements,
            reference,
            metrics,
        }
    }

    // ========================================================================
    // Offsets
    // ========================================================================

    /// Start offsets for an ordering produced by [`SortFunction::order`]
    pub fn assign_offsets(&self, sorted: &SortedElements) -> Vec<TimedElement> {
        let elements = &sorted.elements;
        if elements.is_empty() {
            return Vec::new();
        }
        let reference = sorted.reference.unwrap_or(Point::ORIGIN);

        let offsets: Vec<i64> = match *self {
            SortFunction::Default { delay }
            | SortFunction::Random { delay }
            | SortFunction::Inline { delay, .. }
            | SortFunction::Snake { delay, .. } => {
                (0..elements.len() as i64).map(|i| i * delay).collect()
            }
            SortFunction::Distanced { delay, .. }
            | SortFunction::Cornered { delay, .. }
            | SortFunction::Radial { delay, .. } => {
                bucket_offsets(elements, reference, Metric::Euclidean, delay)
            }
            SortFunction::Linear {
                delay, direction, ..
            } => bucket_offsets(elements, reference, Metric::Projected(direction), delay),
            SortFunction::Continuous {
                delay, reversed, ..
            } => {
                let max = match sorted.metrics {
                    SortMetrics::MaxDistance(max) => max,
                    _ => max_of(elements, |e| Metric::Euclidean.measure(reference, e)),
                };
                elements
                    .iter()
                    .map(|e| {
                        let distance = Metric::Euclidean.measure(reference, e);
                        let normalized = if reversed {
                            normalize(max - distance, max)
                        } else {
                            normalize(distance, max)
                        };
                        round_half_up(delay as f64 * normalized)
                    })
                    .collect()
            }
            SortFunction::ContinuousWeighted {
                delay,
                reversed,
                weights,
                ..
            } => {
                let (max_h, max_v) = match sorted.metrics {
                    SortMetrics::MaxAxisDistance {
                        horizontal,
                        vertical,
                    } => (horizontal, vertical),
                    _ => weighted_maxima(elements, reference, weights),
                };
                elements
                    .iter()
                    .map(|e| {
                        let p = e.point();
                        let h = horizontal_distance(reference, p) * weights.horizontal;
                        let v = vertical_distance(reference, p) * weights.vertical;
                        let spread = normalize(h, max_h) * weights.horizontal
                            + normalize(v, max_v) * weights.vertical;
                        let offset = round_half_up(delay as f64 * spread);
                        if reversed {
                            delay - offset / 2
                        } else {
                            offset
                        }
                    })
                    .collect()
            }
        };

        elements
            .iter()
            .zip(offsets)
            .map(|(element, offset)| TimedElement::new(*element, offset))
            .collect()
    }

    /// Order then assign offsets
    pub fn timed_elements(&self, container: &Container, elements: Vec<Element>) -> Vec<TimedElement> {
        let sorted = self.order(container, elements);
        self.assign_offsets(&sorted)
    }
}

/// Largest weighted `(horizontal, vertical)` distances
fn weighted_maxima(elements: &[Element], reference: Point, weights: Weights) -> (f64, f64) {
    (
        max_of(elements, |e| {
            horizontal_distance(reference, e.point()) * weights.horizontal
        }),
        max_of(elements, |e| {
            vertical_distance(reference, e.point()) * weights.vertical
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn diagonal() -> Container {
        Container::new(2.0, 2.0)
            .with_child(Element::new(0, 0.0, 0.0))
            .with_child(Element::new(1, 1.0, 1.0))
            .with_child(Element::new(2, 2.0, 2.0))
    }

    fn offsets(timed: &[TimedElement]) -> Vec<i64> {
        timed.iter().map(|t| t.offset_ms).collect()
    }

    fn ids(timed: &[TimedElement]) -> Vec<u64> {
        timed.iter().map(|t| t.element.id.0).collect()
    }

    #[test]
    fn test_default_keeps_container_order() {
        let c = diagonal();
        let timed = SortFunction::default_sort(25).timed_elements(&c, c.children().to_vec());
        assert_eq!(ids(&timed), vec![0, 1, 2]);
        assert_eq!(offsets(&timed), vec![0, 25, 50]);
    }

    #[test]
    fn test_cornered_steps() {
        let c = diagonal();
        let timed =
            SortFunction::cornered(1, false, Corner::TopLeft).timed_elements(&c, c.children().to_vec());
        assert_eq!(ids(&timed), vec![0, 1, 2]);
        assert_eq!(offsets(&timed), vec![0, 1, 2]);

        let timed =
            SortFunction::cornered(-1, false, Corner::TopLeft).timed_elements(&c, c.children().to_vec());
        assert_eq!(offsets(&timed), vec![0, -1, -2]);
    }

    #[test]
    fn test_cornered_reversed_from_far_corner() {
        let c = diagonal();
        let timed = SortFunction::cornered(10, true, Corner::BottomRight)
            .timed_elements(&c, c.children().to_vec());
        assert_eq!(ids(&timed), vec![0, 1, 2]);
        assert_eq!(offsets(&timed), vec![0, 10, 20]);
    }

    #[test]
    fn test_distanced_snaps_to_nearest_element() {
        let c = Container::new(100.0, 100.0)
            .with_child(Element::new(0, 90.0, 90.0))
            .with_child(Element::new(1, 20.0, 20.0))
            .with_child(Element::new(2, 40.0, 20.0));
        let sort = SortFunction::distanced(5, false);
        assert_eq!(
            sort.reference_point(&c, c.children()),
            Some(Point::new(20.0, 20.0))
        );
        let timed = sort.timed_elements(&c, c.children().to_vec());
        assert_eq!(ids(&timed), vec![1, 2, 0]);
        assert_eq!(offsets(&timed), vec![0, 5, 10]);
    }

    #[test]
    fn test_radial_from_middle() {
        let c = Container::grid(3, 3, 10.0, 10.0);
        let timed =
            SortFunction::radial(10, false, Position::Middle).timed_elements(&c, c.children().to_vec());
        // Center snaps to the middle cell at (10, 10)
        assert_eq!(timed[0].element.id.0, 4);
        assert_eq!(timed[0].offset_ms, 0);
        // Edge neighbours share a bucket, then the corners
        assert!(timed[1..5].iter().all(|t| t.offset_ms == 10));
        assert!(timed[5..].iter().all(|t| t.offset_ms == 20));
    }

    #[test]
    fn test_linear_projects_onto_axis() {
        let c = Container::grid(3, 3, 10.0, 10.0);
        let timed = SortFunction::linear(7, false, Direction::TopToBottom)
            .timed_elements(&c, c.children().to_vec());
        assert_eq!(ids(&timed), vec![0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(offsets(&timed), vec![0, 0, 0, 7, 7, 7, 14, 14, 14]);

        let timed = SortFunction::linear(7, false, Direction::RightToLeft)
            .timed_elements(&c, c.children().to_vec());
        assert_eq!(ids(&timed), vec![2, 5, 8, 1, 4, 7, 0, 3, 6]);
        assert_eq!(offsets(&timed)[3], 7);
    }

    #[test]
    fn test_reversed_buckets_start_farthest() {
        let c = Container::grid(3, 3, 10.0, 10.0);
        let timed = SortFunction::linear(7, true, Direction::TopToBottom)
            .timed_elements(&c, c.children().to_vec());
        assert_eq!(ids(&timed), vec![6, 7, 8, 3, 4, 5, 0, 1, 2]);
        assert_eq!(offsets(&timed), vec![0, 0, 0, 7, 7, 7, 14, 14, 14]);

        let timed =
            SortFunction::radial(10, true, Position::Middle).timed_elements(&c, c.children().to_vec());
        assert_eq!(ids(&timed), vec![0, 2, 6, 8, 1, 3, 5, 7, 4]);
        assert_eq!(offsets(&timed), vec![0, 0, 0, 0, 10, 10, 10, 10, 20]);
    }

    #[test]
    fn test_continuous_bounded_by_delay() {
        let c = Container::new(2.0, 2.0)
            .with_child(Element::new(2, 2.0, 0.0))
            .with_child(Element::new(0, 0.0, 0.0))
            .with_child(Element::new(1, 1.0, 0.0));

        let sort = SortFunction::continuous(10, false, Position::TopLeft);
        let sorted = sort.order(&c, c.children().to_vec());
        assert_eq!(sorted.metrics, SortMetrics::MaxDistance(2.0));
        let timed = sort.assign_offsets(&sorted);
        assert_eq!(ids(&timed), vec![0, 1, 2]);
        assert_eq!(offsets(&timed), vec![0, 5, 10]);

        let timed = SortFunction::continuous(10, true, Position::TopLeft)
            .timed_elements(&c, c.children().to_vec());
        assert_eq!(offsets(&timed), vec![10, 5, 0]);
        assert!(timed.iter().all(|t| (0..=10).contains(&t.offset_ms)));
    }

    #[test]
    fn test_continuous_colocated_elements() {
        let c = Container::new(10.0, 10.0)
            .with_child(Element::new(0, 5.0, 5.0))
            .with_child(Element::new(1, 5.0, 5.0));
        let timed =
            SortFunction::continuous(100, false, Position::Middle).timed_elements(&c, c.children().to_vec());
        assert_eq!(offsets(&timed), vec![0, 0]);

        let weighted = SortFunction::continuous_weighted(100, true, Position::Middle, 1.0, 1.0).unwrap();
        let timed = weighted.timed_elements(&c, c.children().to_vec());
        assert_eq!(offsets(&timed), vec![100, 100]);
    }

    #[test]
    fn test_continuous_weighted() {
        let c = Container::new(4.0, 4.0)
            .with_child(Element::new(0, 4.0, 0.0))
            .with_child(Element::new(1, 0.0, 0.0))
            .with_child(Element::new(2, 0.0, 4.0));
        let sort = SortFunction::continuous_weighted(100, false, Position::TopLeft, 1.0, 0.5).unwrap();
        let sorted = sort.order(&c, c.children().to_vec());
        assert_eq!(
            sorted.metrics,
            SortMetrics::MaxAxisDistance {
                horizontal: 4.0,
                vertical: 2.0
            }
        );
        let timed = sort.assign_offsets(&sorted);
        // No reordering, each axis normalized then weighted
        assert_eq!(ids(&timed), vec![0, 1, 2]);
        assert_eq!(offsets(&timed), vec![100, 0, 50]);

        let reversed = SortFunction::continuous_weighted(100, true, Position::TopLeft, 1.0, 0.5).unwrap();
        let timed = reversed.timed_elements(&c, c.children().to_vec());
        assert_eq!(offsets(&timed), vec![50, 100, 75]);
    }

    #[test]
    fn test_negative_weight_rejected() {
        for (h, v) in [(-1.0, 1.0), (1.0, -0.5), (f64::NAN, 1.0)] {
            assert!(matches!(
                SortFunction::continuous_weighted(10, false, Position::Middle, h, v),
                Err(CadenceError::InvalidArgument(_))
            ));
        }
        assert!(SortFunction::continuous_weighted(10, false, Position::Middle, 0.0, Weights::HEAVY).is_ok());
    }

    #[test]
    fn test_inline_reversed_flips_list() {
        let c = Container::grid(2, 3, 10.0, 10.0);
        let forward =
            SortFunction::inline(10, false, Corner::TopRight).timed_elements(&c, c.children().to_vec());
        assert_eq!(ids(&forward), vec![2, 1, 0, 5, 4, 3]);
        assert_eq!(offsets(&forward), vec![0, 10, 20, 30, 40, 50]);

        let backward =
            SortFunction::inline(10, true, Corner::TopRight).timed_elements(&c, c.children().to_vec());
        assert_eq!(ids(&backward), vec![3, 4, 5, 0, 1, 2]);
        assert_eq!(offsets(&backward), vec![0, 10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_snake_from_bottom_left() {
        let c = Container::grid(3, 2, 10.0, 10.0);
        let timed =
            SortFunction::snake(5, false, Corner::BottomLeft).timed_elements(&c, c.children().to_vec());
        assert_eq!(ids(&timed), vec![4, 5, 3, 2, 0, 1]);
    }

    #[test]
    fn test_random_seeded_is_permutation() {
        let c = Container::grid(4, 4, 10.0, 10.0);
        let sort = SortFunction::random(3);
        let mut rng = StdRng::seed_from_u64(7);
        let sorted = sort.order_with_rng(&c, c.children().to_vec(), &mut rng);
        assert_eq!(sorted.reference, None);

        let timed = sort.assign_offsets(&sorted);
        let mut seen = ids(&timed);
        seen.sort_unstable();
        assert_eq!(seen, (0..16).collect::<Vec<u64>>());
        assert_eq!(offsets(&timed), (0..16).map(|i| i * 3).collect::<Vec<i64>>());
    }

    #[test]
    fn test_empty_input() {
        let c = Container::new(10.0, 10.0);
        for sort in [
            SortFunction::default_sort(10),
            SortFunction::distanced(10, true),
            SortFunction::continuous(10, false, Position::Middle),
            SortFunction::snake(10, true, Corner::BottomRight),
            SortFunction::random(10),
        ] {
            assert!(sort.timed_elements(&c, Vec::new()).is_empty());
        }
    }

    #[test]
    fn test_accessors() {
        let sort = SortFunction::linear(-12, true, Direction::LeftToRight);
        assert_eq!(sort.name(), "linear");
        assert_eq!(sort.delay(), -12);
        assert!(sort.is_reversed());
        assert!(!SortFunction::random(1).is_reversed());
        assert_eq!(
            sort.reference_point(&Container::new(10.0, 20.0), &[]),
            Some(Point::new(0.0, 10.0))
        );
    }
}
