//! Cadence Animation System
//!
//! Physics-driven and tweened animation tasks, run by an injectable frame
//! clock.
//!
//! # Features
//!
//! - **Spring physics**: closed-form damped springs with stiffness and damping ratio
//! - **Flings**: exponential friction decay from a start velocity
//! - **Tweens**: fixed-duration property animations with easing curves
//! - **Frame scheduling**: one scheduler per frame clock, thread-affine tasks
//! - **Task groups**: start and cancel a mixed set of tasks with one call
//!
//! Tasks never touch the screen. They write floats through
//! [`AnimatedProperty`] bindings supplied by the host.

pub mod dynamics;
pub mod easing;
pub mod fling;
pub mod frame;
pub mod group;
pub mod listener;
pub mod presets;
pub mod property;
pub mod scheduler;
pub mod spring;
pub mod template;
pub mod tween;

pub use dynamics::{Advance, Bounds, DynamicAnimation, Force, MassState};
pub use easing::Easing;
pub use fling::{DragForce, FlingAnimation, FlingConfig};
pub use frame::{FrameCallback, FrameCallbackScheduler, ManualFrameScheduler, VsyncFrameScheduler};
pub use group::{AnimationTask, TaskGroup};
pub use listener::{AnimationEnd, EndListener, ListenerId, UpdateListener};
pub use presets::AnimationPreset;
pub use property::{AnimatedProperty, PropertyBinder, ValueHolder, ViewProperty};
pub use scheduler::{AnimationFrameCallback, AnimationScheduler, CallbackId};
pub use spring::{SpringAnimation, SpringConfig, SpringForce};
pub use template::{AnimationTemplate, FlingTemplate, SpringTemplate, TemplateKind};
pub use tween::{PropertyTrack, TweenAnimation, TweenTemplate};

pub use cadence_core::{CadenceError, EndReason, Result, TaskState};
