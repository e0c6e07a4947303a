//! Choreographer
//!
//! Turns a container, a sort function and a set of animation templates into
//! one [`TaskGroup`] where every child runs every template, staggered by the
//! offsets the sort function assigns.
//!
//! # Example
//!
//! ```rust
//! use cadence_animation::{AnimatedProperty, AnimationPreset, AnimationScheduler, Easing};
//! use cadence_animation::{PropertyBinder, ValueHolder, ViewProperty};
//! use cadence_choreo::{Choreographer, Corner, SortFunction};
//! use cadence_core::{Container, Element};
//! use std::sync::Arc;
//!
//! struct Detached;
//!
//! impl PropertyBinder for Detached {
//!     fn bind(&self, _: &Element, _: ViewProperty) -> Arc<dyn AnimatedProperty> {
//!         ValueHolder::shared(0.0)
//!     }
//! }
//!
//! let (scheduler, _frames) = AnimationScheduler::manual();
//! let container = Container::grid(2, 2, 50.0, 50.0);
//!
//! let group = Choreographer::new(&container)
//!     .sort_with(SortFunction::inline(100, false, Corner::TopLeft))
//!     .animate_with(AnimationPreset::fade_in(300))
//!     .interpolator(Easing::EASE_IN)
//!     .build(&scheduler, &Detached)
//!     .unwrap();
//!
//! assert_eq!(group.len(), 4);
//! assert_eq!(group.tasks()[0].start_delay_ms(), 0);
//! assert_eq!(group.tasks()[3].start_delay_ms(), 300);
//! ```

use crate::exclusion::ExclusionSpec;
use crate::sort::{SortFunction, TimedElement};
use cadence_animation::{
    AnimationScheduler, AnimationTemplate, Easing, PropertyBinder, TaskGroup, TemplateKind,
};
use cadence_core::{round_half_up, CadenceError, Container, Result};
use std::sync::Arc;

/// Builder for a staggered choreography
pub struct Choreographer<'a> {
    container: &'a Container,
    sort: Option<SortFunction>,
    exclusion: ExclusionSpec,
    templates: Vec<Arc<dyn AnimationTemplate>>,
    interpolator: Easing,
}

impl<'a> Choreographer<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            container,
            sort: None,
            exclusion: ExclusionSpec::None,
            templates: Vec::new(),
            interpolator: Easing::Linear,
        }
    }

    pub fn sort_with(mut self, sort: SortFunction) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn exclude(mut self, exclusion: ExclusionSpec) -> Self {
        self.exclusion = exclusion;
        self
    }

    /// Add a template every child will run
    pub fn animate_with(mut self, template: impl AnimationTemplate + 'static) -> Self {
        self.templates.push(Arc::new(template));
        self
    }

    /// Add a template shared with other choreographies
    pub fn animate_with_shared(mut self, template: Arc<dyn AnimationTemplate>) -> Self {
        self.templates.push(template);
        self
    }

    /// Curve applied to normalized offsets. Linear by default.
    pub fn interpolator(mut self, interpolator: Easing) -> Self {
        self.interpolator = interpolator;
        self
    }

    pub fn interpolate_with<F>(self, f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.interpolator(Easing::custom(f))
    }

    /// Instantiate every task without starting any
    pub fn build(
        &self,
        scheduler: &AnimationScheduler,
        binder: &dyn PropertyBinder,
    ) -> Result<TaskGroup> {
        choreograph(
            self.container,
            self.sort.as_ref(),
            &self.exclusion,
            &self.templates,
            &self.interpolator,
            scheduler,
            binder,
        )
    }

    /// Build, then start the group
    pub fn start(
        &self,
        scheduler: &AnimationScheduler,
        binder: &dyn PropertyBinder,
    ) -> Result<TaskGroup> {
        let group = self.build(scheduler, binder)?;
        group.start()?;
        Ok(group)
    }
}

/// Build a task group running every template on every non-excluded child
/// of `container`.
///
/// Fails before anything is instantiated if `sort` is missing, `templates`
/// is empty, or a template is unsupported or misconfigured.
pub fn choreograph(
    container: &Container,
    sort: Option<&SortFunction>,
    exclusion: &ExclusionSpec,
    templates: &[Arc<dyn AnimationTemplate>],
    interpolator: &Easing,
    scheduler: &AnimationScheduler,
    binder: &dyn PropertyBinder,
) -> Result<TaskGroup> {
    let sort = sort.ok_or_else(|| CadenceError::invalid_argument("a sort function is required"))?;
    if templates.is_empty() {
        return Err(CadenceError::invalid_argument(
            "at least one animation template is required",
        ));
    }
    let kinds = resolve_templates(templates)?;

    let elements = exclusion.filter(container);
    tracing::debug!(
        children = container.len(),
        kept = elements.len(),
        sort = sort.name(),
        "choreographing"
    );

    let timed = sort.timed_elements(container, elements);
    let max_offset = max_time_offset(&timed);
    tracing::debug!(max_offset, "assigned time offsets");

    let mut group = TaskGroup::new(scheduler);
    for entry in &timed {
        let delay = interpolated_delay(entry.offset_ms, max_offset, interpolator);
        for kind in &kinds {
            let task = kind.instantiate(scheduler, &entry.element, binder)?;
            task.set_start_delay(delay)?;
            group.push(task);
        }
    }

    tracing::debug!(tasks = group.len(), "choreography built");
    Ok(group)
}

/// Resolve and validate every template up front
fn resolve_templates(templates: &[Arc<dyn AnimationTemplate>]) -> Result<Vec<TemplateKind<'_>>> {
    templates
        .iter()
        .map(|template| {
            let kind = template
                .kind()
                .ok_or_else(|| CadenceError::UnsupportedTaskType(template.describe()))?;
            kind.validate()?;
            Ok(kind)
        })
        .collect()
}

/// Offset with the greatest magnitude, `0` for an empty list
fn max_time_offset(timed: &[TimedElement]) -> i64 {
    timed
        .iter()
        .map(|t| t.offset_ms)
        .max_by_key(|offset| offset.unsigned_abs())
        .unwrap_or(0)
}

/// Remap `offset` through the interpolator over `[0, max]`
fn interpolated_delay(offset: i64, max: i64, interpolator: &Easing) -> i64 {
    if max == 0 {
        return offset;
    }
    let max = max as f64;
    round_half_up(max * interpolator.apply(offset as f64 / max))
}
