//! Element and container handles
//!
//! The host owns the real widget tree. These types are read-only snapshots of
//! what the choreography engine needs from it: a stable identity and a
//! position per element, and the bounds of the container holding them.

use crate::geometry::{round_half_up, Point};

/// Stable identity of an element within its host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub u64);

impl From<u64> for ElementId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A positioned child of a [`Container`]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    pub id: ElementId,
    /// Left edge in container coordinates
    pub x: f64,
    /// Top edge in container coordinates
    pub y: f64,
}

impl Element {
    pub fn new(id: impl Into<ElementId>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
        }
    }

    /// Position snapped to whole units.
    ///
    /// All geometric comparisons go through this, so sub-pixel layout noise
    /// never splits a row or a distance bucket.
    pub fn point(&self) -> Point {
        Point::new(
            round_half_up(self.x) as f64,
            round_half_up(self.y) as f64,
        )
    }
}

/// Bounds plus the ordered children of a container
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Container {
    width: f64,
    height: f64,
    children: Vec<Element>,
}

impl Container {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            children: Vec::new(),
        }
    }

    /// Builder: append a child
    pub fn with_child(mut self, element: Element) -> Self {
        self.children.push(element);
        self
    }

    /// Builder: append several children
    pub fn with_children(mut self, elements: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(elements);
        self
    }

    /// Lay out `rows * columns` cells of `cell_width * cell_height`, ids
    /// assigned row-major starting at zero.
    pub fn grid(rows: usize, columns: usize, cell_width: f64, cell_height: f64) -> Self {
        let children = (0..rows).flat_map(|row| {
            (0..columns).map(move |column| {
                Element::new(
                    (row * columns + column) as u64,
                    column as f64 * cell_width,
                    row as f64 * cell_height,
                )
            })
        });
        Self::new(columns as f64 * cell_width, rows as f64 * cell_height).with_children(children)
    }

    pub fn push(&mut self, element: Element) {
        self.children.push(element);
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Element> {
        self.children.get(index)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
