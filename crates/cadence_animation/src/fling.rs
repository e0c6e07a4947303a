//! Friction-decayed fling

use crate::dynamics::{Advance, Bounds, DynamicAnimation, Force, MassState};
use crate::property::AnimatedProperty;
use crate::scheduler::AnimationScheduler;
use cadence_core::{CadenceError, Result};
use std::sync::Arc;

/// Friction coefficient for a friction scalar of 1
const DEFAULT_FRICTION: f64 = -4.2;

/// Velocity threshold as a multiple of the value threshold
const VELOCITY_THRESHOLD_MULTIPLIER: f64 = 1000.0 / 16.0;

/// A fling: starts with a velocity and coasts to a stop
pub type FlingAnimation = DynamicAnimation<DragForce>;

/// Declarative fling parameters
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlingConfig {
    /// Friction scalar; must be positive. Higher stops sooner.
    pub friction: f64,
    /// Units per second
    pub start_velocity: f64,
}

impl FlingConfig {
    pub fn new(start_velocity: f64) -> Self {
        Self {
            friction: 1.0,
            start_velocity,
        }
    }

    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }
}

impl Default for FlingConfig {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Exponential velocity decay: `v(t) = v0 * e^(friction * t)`
#[derive(Clone, Debug, PartialEq)]
pub struct DragForce {
    friction: f64,
    velocity_threshold: f64,
}

impl DragForce {
    pub fn new() -> Self {
        Self {
            friction: DEFAULT_FRICTION,
            velocity_threshold: 0.75 * VELOCITY_THRESHOLD_MULTIPLIER,
        }
    }

    pub fn with_friction(friction: f64) -> Result<Self> {
        let mut force = Self::new();
        force.set_friction(friction)?;
        Ok(force)
    }

    /// Scale the default friction. Must be positive.
    pub fn set_friction(&mut self, friction: f64) -> Result<()> {
        if friction.is_nan() || friction <= 0.0 {
            return Err(CadenceError::invalid_argument("friction must be positive"));
        }
        self.friction = friction * DEFAULT_FRICTION;
        Ok(())
    }

    /// Friction scalar, as passed to [`DragForce::set_friction`]
    pub fn friction(&self) -> f64 {
        self.friction / DEFAULT_FRICTION
    }

    pub fn velocity_threshold(&self) -> f64 {
        self.velocity_threshold
    }

    /// Coast `elapsed_ms` forward from `state`
    pub fn update_values(&self, state: MassState, elapsed_ms: f64) -> MassState {
        let decay = (self.friction * elapsed_ms / 1000.0).exp();
        let velocity = state.velocity * decay;
        let value = state.value + (velocity - state.velocity) / self.friction;
        MassState::new(value, velocity)
    }
}

impl Default for DragForce {
    fn default() -> Self {
        Self::new()
    }
}

impl Force for DragForce {
    const NAME: &'static str = "fling";

    fn acceleration(&self, _value: f64, velocity: f64) -> f64 {
        velocity * self.friction
    }

    fn is_at_equilibrium(&self, _value: f64, velocity: f64) -> bool {
        velocity.abs() < self.velocity_threshold
    }

    fn set_value_threshold(&mut self, threshold: f64) {
        self.velocity_threshold = threshold.abs() * VELOCITY_THRESHOLD_MULTIPLIER;
    }

    fn advance(&mut self, state: MassState, delta_ms: u64, bounds: Bounds) -> Advance {
        let mut next = self.update_values(state, delta_ms as f64);
        let stopped = self.is_at_equilibrium(next.value, next.velocity);
        if stopped {
            next.velocity = 0.0;
        }
        if stopped || next.value >= bounds.max || next.value <= bounds.min {
            Advance::settled(next)
        } else {
            Advance::moving(next)
        }
    }
}

impl FlingAnimation {
    /// Fling with the given configuration
    pub fn from_config(
        scheduler: &AnimationScheduler,
        property: Arc<dyn AnimatedProperty>,
        config: &FlingConfig,
    ) -> Result<Self> {
        let anim = Self::new(scheduler, property, DragForce::with_friction(config.friction)?);
        anim.set_start_velocity(config.start_velocity)?;
        Ok(anim)
    }

    pub fn set_friction(&self, friction: f64) -> Result<&Self> {
        self.shared.scheduler.ensure_current_thread("set_friction")?;
        self.shared.state.lock().force.set_friction(friction)?;
        Ok(self)
    }

    pub fn friction(&self) -> f64 {
        self.shared.state.lock().force.friction()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::ValueHolder;
    use cadence_core::{EndReason, TaskState};

    #[test]
    fn test_velocity_decays_exponentially() {
        let force = DragForce::new();
        let state = force.update_values(MassState::new(0.0, 1000.0), 1000.0);
        assert!((state.velocity - 1000.0 * (-4.2_f64).exp()).abs() < 1e-9);
        assert!(state.value > 0.0);
    }

    #[test]
    fn test_distance_converges() {
        let force = DragForce::new();
        let far = force.update_values(MassState::new(0.0, 1000.0), 60_000.0);
        assert!((far.value - 1000.0 / 4.2).abs() < 1e-6);
    }

    #[test]
    fn test_friction_validation() {
        assert!(matches!(
            DragForce::with_friction(0.0),
            Err(CadenceError::InvalidArgument(_))
        ));
        assert!(DragForce::with_friction(-1.0).is_err());
        let force = DragForce::with_friction(2.0).unwrap();
        assert!((force.friction() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_follows_visible_change() {
        let mut force = DragForce::new();
        force.set_value_threshold(0.75);
        assert_eq!(force.velocity_threshold(), 46.875);
        assert!(force.is_at_equilibrium(0.0, 46.0));
        assert!(!force.is_at_equilibrium(0.0, -47.0));
    }

    #[test]
    fn test_fling_stops_at_bound() {
        let (scheduler, frames) = AnimationScheduler::manual();
        let holder = ValueHolder::shared(0.0);
        let fling = FlingAnimation::from_config(
            &scheduler,
            holder.clone(),
            &FlingConfig::new(5_000.0),
        )
        .unwrap();
        fling.set_max_value(100.0).unwrap();
        fling.start().unwrap();

        frames.run_frames(16, 1_000);
        assert_eq!(holder.get(), 100.0);
        assert_eq!(fling.state(), TaskState::Ended(EndReason::Natural));
    }

    #[test]
    fn test_fling_zero_velocity_ends_next_frame() {
        let (scheduler, frames) = AnimationScheduler::manual();
        let fling = FlingAnimation::new(&scheduler, ValueHolder::shared(3.0), DragForce::new());
        fling.start().unwrap();
        frames.advance(16);
        assert!(fling.is_running());
        frames.advance(16);
        assert!(!fling.is_running());
        assert_eq!(fling.value(), 3.0);
    }
}
