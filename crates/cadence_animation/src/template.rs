//! Task templates
//!
//! A template is a declarative description of an animation that can be
//! instantiated for any number of elements. Dynamics templates always yield a
//! fresh task per element since the simulation state must never be shared.

use crate::fling::{DragForce, FlingAnimation, FlingConfig};
use crate::group::AnimationTask;
use crate::property::{PropertyBinder, ViewProperty};
use crate::scheduler::AnimationScheduler;
use crate::spring::{SpringAnimation, SpringConfig, SpringForce};
use crate::tween::TweenTemplate;
use cadence_core::{Element, Result};

/// The template families tasks can be built from
#[derive(Clone, Copy, Debug)]
pub enum TemplateKind<'a> {
    Tween(&'a TweenTemplate),
    Spring(&'a SpringTemplate),
    Fling(&'a FlingTemplate),
}

impl TemplateKind<'_> {
    /// Check parameters without building anything
    pub fn validate(&self) -> Result<()> {
        match self {
            TemplateKind::Tween(_) => Ok(()),
            TemplateKind::Spring(template) => SpringForce::from_config(&template.config).map(drop),
            TemplateKind::Fling(template) => {
                DragForce::with_friction(template.config.friction).map(drop)
            }
        }
    }

    /// Build a task driving `element`
    pub fn instantiate(
        &self,
        scheduler: &AnimationScheduler,
        element: &Element,
        binder: &dyn PropertyBinder,
    ) -> Result<AnimationTask> {
        Ok(match self {
            TemplateKind::Tween(template) => {
                AnimationTask::Tween(template.instantiate(scheduler, element, binder))
            }
            TemplateKind::Spring(template) => {
                AnimationTask::Spring(template.instantiate(scheduler, element, binder)?)
            }
            TemplateKind::Fling(template) => {
                AnimationTask::Fling(template.instantiate(scheduler, element, binder)?)
            }
        })
    }
}

/// Anything the choreographer can turn into per-element tasks.
///
/// Hosts may implement this for their own descriptions; returning `None`
/// from [`AnimationTemplate::kind`] marks the template as unsupported.
pub trait AnimationTemplate: Send + Sync {
    fn kind(&self) -> Option<TemplateKind<'_>>;

    /// Name used in error messages
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

impl AnimationTemplate for TweenTemplate {
    fn kind(&self) -> Option<TemplateKind<'_>> {
        Some(TemplateKind::Tween(self))
    }
}

impl AnimationTemplate for SpringTemplate {
    fn kind(&self) -> Option<TemplateKind<'_>> {
        Some(TemplateKind::Spring(self))
    }
}

impl AnimationTemplate for FlingTemplate {
    fn kind(&self) -> Option<TemplateKind<'_>> {
        Some(TemplateKind::Fling(self))
    }
}

/// Spring description: which property, the force, and where to start
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringTemplate {
    pub property: ViewProperty,
    pub config: SpringConfig,
    /// Value the property is seeked to before the task starts
    pub start_value: Option<f64>,
    pub start_velocity: f64,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

impl SpringTemplate {
    pub fn new(property: ViewProperty, config: SpringConfig) -> Self {
        Self {
            property,
            config,
            start_value: None,
            start_velocity: 0.0,
            min_value: None,
            max_value: None,
        }
    }

    pub fn from_value(mut self, start_value: f64) -> Self {
        self.start_value = Some(start_value);
        self
    }

    pub fn with_start_velocity(mut self, velocity: f64) -> Self {
        self.start_velocity = velocity;
        self
    }

    pub fn clamped(mut self, min: f64, max: f64) -> Self {
        self.min_value = Some(min);
        self.max_value = Some(max);
        self
    }

    pub fn instantiate(
        &self,
        scheduler: &AnimationScheduler,
        element: &Element,
        binder: &dyn PropertyBinder,
    ) -> Result<SpringAnimation> {
        let force = SpringForce::from_config(&self.config)?;
        let property = binder.bind(element, self.property);
        let task = SpringAnimation::for_element(scheduler, element.id, self.property, property, force);
        task.set_start_velocity(self.start_velocity)?;
        if let Some(min) = self.min_value {
            task.set_min_value(min)?;
        }
        if let Some(max) = self.max_value {
            task.set_max_value(max)?;
        }
        if let Some(start) = self.start_value {
            task.seek(start)?;
        }
        Ok(task)
    }
}

/// Fling description
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlingTemplate {
    pub property: ViewProperty,
    pub config: FlingConfig,
    pub start_value: Option<f64>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

impl FlingTemplate {
    pub fn new(property: ViewProperty, config: FlingConfig) -> Self {
        Self {
            property,
            config,
            start_value: None,
            min_value: None,
            max_value: None,
        }
    }

    pub fn from_value(mut self, start_value: f64) -> Self {
        self.start_value = Some(start_value);
        self
    }

    pub fn clamped(mut self, min: f64, max: f64) -> Self {
        self.min_value = Some(min);
        self.max_value = Some(max);
        self
    }

    pub fn instantiate(
        &self,
        scheduler: &AnimationScheduler,
        element: &Element,
        binder: &dyn PropertyBinder,
    ) -> Result<FlingAnimation> {
        let force = DragForce::with_friction(self.config.friction)?;
        let property = binder.bind(element, self.property);
        let task = FlingAnimation::for_element(scheduler, element.id, self.property, property, force);
        task.set_start_velocity(self.config.start_velocity)?;
        if let Some(min) = self.min_value {
            task.set_min_value(min)?;
        }
        if let Some(max) = self.max_value {
            task.set_max_value(max)?;
        }
        if let Some(start) = self.start_value {
            task.seek(start)?;
        }
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{AnimatedProperty, ValueHolder};
    use cadence_core::{CadenceError, ElementId};
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Hands out one holder per (element, property)
    #[derive(Default)]
    struct Holders {
        values: Mutex<HashMap<(ElementId, ViewProperty), Arc<ValueHolder>>>,
    }

    impl Holders {
        fn get(&self, id: u64, property: ViewProperty) -> f64 {
            self.values.lock()[&(ElementId(id), property)].get()
        }
    }

    impl PropertyBinder for Holders {
        fn bind(&self, element: &Element, property: ViewProperty) -> Arc<dyn AnimatedProperty> {
            self.values
                .lock()
                .entry((element.id, property))
                .or_insert_with(|| ValueHolder::shared(0.0))
                .clone()
        }
    }

    #[test]
    fn test_spring_template_builds_independent_tasks() {
        let (scheduler, _frames) = AnimationScheduler::manual();
        let binder = Holders::default();
        let template = SpringTemplate::new(
            ViewProperty::TranslationY,
            SpringConfig::default().with_final_position(0.0),
        )
        .from_value(200.0);

        let a = template
            .instantiate(&scheduler, &Element::new(1, 0.0, 0.0), &binder)
            .unwrap();
        let b = template
            .instantiate(&scheduler, &Element::new(2, 0.0, 0.0), &binder)
            .unwrap();

        assert_eq!(binder.get(1, ViewProperty::TranslationY), 200.0);
        assert_eq!(binder.get(2, ViewProperty::TranslationY), 200.0);

        a.set_start_velocity(50.0).unwrap();
        assert_eq!(b.velocity(), 0.0);
        assert_eq!(a.target(), Some(ElementId(1)));
        assert_eq!(b.target(), Some(ElementId(2)));
    }

    #[test]
    fn test_fling_template_uses_property_threshold() {
        let (scheduler, _frames) = AnimationScheduler::manual();
        let binder = Holders::default();
        let template = FlingTemplate::new(ViewProperty::Alpha, FlingConfig::new(1.0));
        let task = template
            .instantiate(&scheduler, &Element::new(1, 0.0, 0.0), &binder)
            .unwrap();
        assert_eq!(task.min_visible_change(), 1.0 / 256.0);
        assert_eq!(task.velocity(), 1.0);
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let spring = SpringTemplate::new(ViewProperty::X, SpringConfig::new(-1.0, 0.5));
        assert!(matches!(
            spring.kind().map(|kind| kind.validate()),
            Some(Err(CadenceError::InvalidArgument(_)))
        ));

        let fling = FlingTemplate::new(ViewProperty::X, FlingConfig::new(10.0).with_friction(0.0));
        assert!(fling.kind().is_some_and(|kind| kind.validate().is_err()));

        let tween = TweenTemplate::new(100).animate(ViewProperty::Alpha, 1.0);
        assert!(tween.kind().is_some_and(|kind| kind.validate().is_ok()));
    }
}
