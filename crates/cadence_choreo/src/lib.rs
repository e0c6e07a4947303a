//! Cadence Choreography
//!
//! Staggered entrance choreographies for the children of a container.
//!
//! # Features
//!
//! - **Sort functions**: ten ordering strategies, from container order to
//!   corner sweeps, radial ripples and weighted continuous spreads
//! - **Exclusions**: leave children out by id or by index
//! - **Choreographer**: instantiate tween, spring and fling templates per
//!   child and collect them into one [`TaskGroup`]
//!
//! Geometry is read from [`cadence_core::Container`] snapshots, and the
//! resulting tasks run on a [`cadence_animation::AnimationScheduler`].

pub mod choreographer;
pub mod exclusion;
pub mod sort;

pub use choreographer::{choreograph, Choreographer};
pub use exclusion::ExclusionSpec;
pub use sort::{
    Corner, Direction, Position, SortFunction, SortMetrics, SortedElements, TimedElement, Weights,
};

pub use cadence_animation::TaskGroup;
pub use cadence_core::{CadenceError, Result};
