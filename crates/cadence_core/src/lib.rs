//! Cadence Core
//!
//! Foundational types shared by the Cadence choreography crates:
//!
//! - **Geometry**: points and the distance metrics sort functions rank by
//! - **Element model**: read-only snapshots of a container and its children
//! - **Lifecycle**: the state machine every animation task follows
//! - **Errors**: the contract-violation taxonomy
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{euclidean_distance, Container, Point};
//!
//! let container = Container::grid(3, 3, 100.0, 100.0);
//! let corner = Point::new(container.width(), container.height());
//! let nearest = container
//!     .children()
//!     .iter()
//!     .map(|e| euclidean_distance(e.point(), corner))
//!     .fold(f64::MAX, f64::min);
//! assert!(nearest > 0.0);
//! ```

pub mod element;
pub mod error;
pub mod geometry;
pub mod lifecycle;

pub use element::{Container, Element, ElementId};
pub use error::{CadenceError, Result};
pub use geometry::{
    euclidean_distance, horizontal_distance, manhattan_distance, round_half_up,
    vertical_distance, Point,
};
pub use lifecycle::{EndReason, LifecycleEvent, TaskState};
