//! Distance metrics and the shared ordering/bucketing passes

use super::anchor::Direction;
use cadence_core::{euclidean_distance, manhattan_distance, Element, Point};

/// How far an element is from a reference point
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Metric {
    Euclidean,
    Manhattan,
    /// Euclidean after collapsing the axis perpendicular to the sweep
    Projected(Direction),
}

impl Metric {
    pub(crate) fn measure(self, reference: Point, element: &Element) -> f64 {
        let point = element.point();
        match self {
            Metric::Euclidean => euclidean_distance(reference, point),
            Metric::Manhattan => manhattan_distance(reference, point),
            Metric::Projected(direction) => {
                euclidean_distance(direction.project(reference), direction.project(point))
            }
        }
    }
}

/// Position of the element nearest to `point`, or `point` itself when there
/// are no elements. Ties go to the earliest element.
pub(crate) fn translate(point: Point, elements: &[Element]) -> Point {
    let mut nearest: Option<(f64, Point)> = None;
    for element in elements {
        let candidate = element.point();
        let distance = euclidean_distance(point, candidate);
        match nearest {
            Some((best, _)) if best <= distance => {}
            _ => nearest = Some((distance, candidate)),
        }
    }
    nearest.map_or(point, |(_, p)| p)
}

/// Stable sort by distance, farthest first when `reversed`
pub(crate) fn sort_by_metric(
    elements: &mut [Element],
    reference: Point,
    metric: Metric,
    reversed: bool,
) {
    let mut keyed: Vec<(f64, Element)> = elements
        .iter()
        .map(|e| (metric.measure(reference, e), *e))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| {
        if reversed {
            b.total_cmp(a)
        } else {
            a.total_cmp(b)
        }
    });
    for (slot, (_, element)) in elements.iter_mut().zip(keyed) {
        *slot = element;
    }
}

/// Group elements whose distances share an integer floor, bumping the
/// offset by `delay` whenever the floor changes along the walk.
pub(crate) fn bucket_offsets(
    elements: &[Element],
    reference: Point,
    metric: Metric,
    delay: i64,
) -> Vec<i64> {
    let mut offsets = Vec::with_capacity(elements.len());
    let mut last_distance: Option<f64> = None;
    let mut current = 0i64;
    for element in elements {
        let distance = metric.measure(reference, element);
        match last_distance {
            Some(last) if last.floor() != distance.floor() => {
                current += delay;
                last_distance = Some(distance);
            }
            Some(_) => {}
            None => last_distance = Some(distance),
        }
        offsets.push(current);
    }
    offsets
}

/// Row-major order from a corner: by vertical distance, then horizontal.
/// With `alternate`, odd rows run the opposite horizontal direction.
pub(crate) fn sweep(elements: &mut [Element], corner: Point, alternate: bool) {
    let mut keyed: Vec<(f64, f64, Element)> = elements
        .iter()
        .map(|e| {
            let p = e.point();
            ((p.y - corner.y).abs(), (p.x - corner.x).abs(), *e)
        })
        .collect();

    let mut rows: Vec<f64> = keyed.iter().map(|(v, _, _)| *v).collect();
    rows.sort_by(f64::total_cmp);
    rows.dedup();

    keyed.sort_by(|(va, ha, _), (vb, hb, _)| {
        va.total_cmp(vb).then_with(|| {
            let odd = alternate
                && rows
                    .binary_search_by(|row| row.total_cmp(va))
                    .is_ok_and(|row| row % 2 == 1);
            if odd {
                hb.total_cmp(ha)
            } else {
                ha.total_cmp(hb)
            }
        })
    });
    for (slot, (_, _, element)) in elements.iter_mut().zip(keyed) {
        *slot = element;
    }
}

/// Largest value of `f` over the elements, `0` for an empty slice
pub(crate) fn max_of(elements: &[Element], f: impl Fn(&Element) -> f64) -> f64 {
    elements.iter().map(f).fold(0.0, f64::max)
}

/// `value / max`, or `0` when `max` is zero
pub(crate) fn normalize(value: f64, max: f64) -> f64 {
    if max == 0.0 {
        0.0
    } else {
        value / max
    }
}
