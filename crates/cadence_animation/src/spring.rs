//! Damped spring force
//!
//! The spring is solved in closed form for each frame rather than integrated
//! step by step, so the result does not depend on the frame rate. The damping
//! ratio picks the solution:
//!
//! - `ratio > 1`: overdamped, returns to rest without overshooting
//! - `ratio == 1`: critically damped, fastest return without overshooting
//! - `ratio < 1`: underdamped, oscillates around the final position
//!
//! ```rust
//! use cadence_animation::{
//!     AnimatedProperty, AnimationScheduler, SpringAnimation, SpringConfig, SpringForce, ValueHolder,
//! };
//!
//! let (scheduler, frames) = AnimationScheduler::manual();
//! let value = ValueHolder::shared(0.0);
//! let config = SpringConfig::snappy().with_final_position(100.0);
//! let force = SpringForce::from_config(&config).unwrap();
//! let spring = SpringAnimation::new(&scheduler, value.clone(), force);
//! spring.start().unwrap();
//!
//! frames.run_frames(16, 1_000);
//! assert_eq!(value.get(), 100.0);
//! ```

use crate::dynamics::{Advance, Bounds, DynamicAnimation, Force, MassState};
use crate::property::AnimatedProperty;
use crate::scheduler::AnimationScheduler;
use cadence_core::{CadenceError, Result};
use std::sync::Arc;

/// Velocity threshold as a multiple of the value threshold
const VELOCITY_THRESHOLD_MULTIPLIER: f64 = 1000.0 / 16.0;

/// A spring-driven animation
pub type SpringAnimation = DynamicAnimation<SpringForce>;

/// Declarative spring parameters
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringConfig {
    /// Spring constant; must be positive
    pub stiffness: f64,
    /// Must not be negative; `0` never comes to rest
    pub damping_ratio: f64,
    /// Rest position; read at start when unset
    pub final_position: Option<f64>,
}

impl SpringConfig {
    pub fn new(stiffness: f64, damping_ratio: f64) -> Self {
        Self {
            stiffness,
            damping_ratio,
            final_position: None,
        }
    }

    pub fn with_final_position(mut self, final_position: f64) -> Self {
        self.final_position = Some(final_position);
        self
    }

    /// Fast, no overshoot
    pub fn stiff() -> Self {
        Self::new(SpringForce::STIFFNESS_HIGH, SpringForce::DAMPING_RATIO_NO_BOUNCY)
    }

    /// Quick with a small overshoot
    pub fn snappy() -> Self {
        Self::new(SpringForce::STIFFNESS_MEDIUM, SpringForce::DAMPING_RATIO_LOW_BOUNCY)
    }

    /// Slow, no overshoot
    pub fn gentle() -> Self {
        Self::new(SpringForce::STIFFNESS_LOW, SpringForce::DAMPING_RATIO_NO_BOUNCY)
    }

    /// Slow and bouncy
    pub fn wobbly() -> Self {
        Self::new(SpringForce::STIFFNESS_LOW, SpringForce::DAMPING_RATIO_HIGH_BOUNCY)
    }

    pub fn molasses() -> Self {
        Self::new(SpringForce::STIFFNESS_VERY_LOW, SpringForce::DAMPING_RATIO_NO_BOUNCY)
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(SpringForce::STIFFNESS_MEDIUM, SpringForce::DAMPING_RATIO_MEDIUM_BOUNCY)
    }
}

/// Damped harmonic oscillator pulling towards a final position
#[derive(Clone, Debug, PartialEq)]
pub struct SpringForce {
    /// sqrt(stiffness)
    natural_freq: f64,
    damping_ratio: f64,
    final_position: Option<f64>,
    /// Final position to switch to on the next frame
    pending_position: Option<f64>,
    end_requested: bool,
    value_threshold: f64,
    velocity_threshold: f64,
}

impl SpringForce {
    pub const STIFFNESS_HIGH: f64 = 10_000.0;
    pub const STIFFNESS_MEDIUM: f64 = 1_500.0;
    pub const STIFFNESS_LOW: f64 = 200.0;
    pub const STIFFNESS_VERY_LOW: f64 = 50.0;

    pub const DAMPING_RATIO_HIGH_BOUNCY: f64 = 0.2;
    pub const DAMPING_RATIO_MEDIUM_BOUNCY: f64 = 0.5;
    pub const DAMPING_RATIO_LOW_BOUNCY: f64 = 0.75;
    pub const DAMPING_RATIO_NO_BOUNCY: f64 = 1.0;

    /// Medium stiffness, medium bounce, no final position
    pub fn new() -> Self {
        let value_threshold = 0.75;
        Self {
            natural_freq: Self::STIFFNESS_MEDIUM.sqrt(),
            damping_ratio: Self::DAMPING_RATIO_MEDIUM_BOUNCY,
            final_position: None,
            pending_position: None,
            end_requested: false,
            value_threshold,
            velocity_threshold: value_threshold * VELOCITY_THRESHOLD_MULTIPLIER,
        }
    }

    pub fn with_final_position(mut self, final_position: f64) -> Self {
        self.final_position = Some(final_position);
        self
    }

    pub fn from_config(config: &SpringConfig) -> Result<Self> {
        let mut force = Self::new();
        force.set_stiffness(config.stiffness)?;
        force.set_damping_ratio(config.damping_ratio)?;
        force.final_position = config.final_position;
        Ok(force)
    }

    pub fn config(&self) -> SpringConfig {
        SpringConfig {
            stiffness: self.stiffness(),
            damping_ratio: self.damping_ratio,
            final_position: self.final_position,
        }
    }

    pub fn set_stiffness(&mut self, stiffness: f64) -> Result<()> {
        if stiffness.is_nan() || stiffness <= 0.0 {
            return Err(CadenceError::invalid_argument(
                "spring stiffness must be positive",
            ));
        }
        self.natural_freq = stiffness.sqrt();
        Ok(())
    }

    pub fn stiffness(&self) -> f64 {
        self.natural_freq * self.natural_freq
    }

    pub fn set_damping_ratio(&mut self, damping_ratio: f64) -> Result<()> {
        if damping_ratio.is_nan() || damping_ratio < 0.0 {
            return Err(CadenceError::invalid_argument(
                "damping ratio must not be negative",
            ));
        }
        self.damping_ratio = damping_ratio;
        Ok(())
    }

    pub fn damping_ratio(&self) -> f64 {
        self.damping_ratio
    }

    pub fn set_final_position(&mut self, final_position: f64) {
        self.final_position = Some(final_position);
    }

    pub fn final_position(&self) -> Option<f64> {
        self.final_position
    }

    /// Solve the oscillator `elapsed_ms` forward from `state`
    pub fn update_values(&self, state: MassState, elapsed_ms: f64) -> MassState {
        let Some(final_position) = self.final_position else {
            return state;
        };
        let t = elapsed_ms / 1000.0;
        let x0 = state.value - final_position;
        let v0 = state.velocity;
        let w = self.natural_freq;
        let zeta = self.damping_ratio;

        let (displacement, velocity) = if zeta > 1.0 {
            let root = (zeta * zeta - 1.0).sqrt();
            let gamma_plus = -zeta * w + w * root;
            let gamma_minus = -zeta * w - w * root;
            let b = (gamma_minus * x0 - v0) / (gamma_minus - gamma_plus);
            let a = x0 - b;
            let minus = (gamma_minus * t).exp();
            let plus = (gamma_plus * t).exp();
            (
                a * minus + b * plus,
                a * gamma_minus * minus + b * gamma_plus * plus,
            )
        } else if zeta == 1.0 {
            let a = x0;
            let b = v0 + w * x0;
            let decay = (-w * t).exp();
            let displacement = (a + b * t) * decay;
            (displacement, displacement * -w + b * decay)
        } else {
            let damped_freq = w * (1.0 - zeta * zeta).sqrt();
            let cos_coeff = x0;
            let sin_coeff = (zeta * w * x0 + v0) / damped_freq;
            let decay = (-zeta * w * t).exp();
            let (sin, cos) = (damped_freq * t).sin_cos();
            let displacement = decay * (cos_coeff * cos + sin_coeff * sin);
            let velocity = displacement * -w * zeta
                + decay * (-damped_freq * cos_coeff * sin + damped_freq * sin_coeff * cos);
            (displacement, velocity)
        };

        MassState::new(displacement + final_position, velocity)
    }
}

impl Default for SpringForce {
    fn default() -> Self {
        Self::new()
    }
}

impl Force for SpringForce {
    const NAME: &'static str = "spring";

    fn acceleration(&self, value: f64, velocity: f64) -> f64 {
        let displacement = value - self.final_position.unwrap_or(value);
        let k = self.natural_freq * self.natural_freq;
        let c = self.natural_freq * 2.0 * self.damping_ratio;
        -k * displacement - c * velocity
    }

    fn is_at_equilibrium(&self, value: f64, velocity: f64) -> bool {
        match self.final_position {
            Some(final_position) => {
                velocity.abs() < self.velocity_threshold
                    && (value - final_position).abs() < self.value_threshold
            }
            None => false,
        }
    }

    fn set_value_threshold(&mut self, threshold: f64) {
        self.value_threshold = threshold.abs();
        self.velocity_threshold = self.value_threshold * VELOCITY_THRESHOLD_MULTIPLIER;
    }

    fn prepare(&mut self, bounds: Bounds) -> Result<()> {
        if self.final_position.is_none() {
            self.final_position = self.pending_position.take();
        }
        let Some(final_position) = self.final_position else {
            return Err(CadenceError::unsupported(
                "spring has no final position; set one before starting",
            ));
        };
        if !bounds.contains(final_position) {
            return Err(CadenceError::OutOfRange {
                value: final_position,
                min: bounds.min,
                max: bounds.max,
            });
        }
        self.end_requested = false;
        Ok(())
    }

    fn advance(&mut self, state: MassState, delta_ms: u64, _bounds: Bounds) -> Advance {
        if self.end_requested {
            self.end_requested = false;
            if let Some(pending) = self.pending_position.take() {
                self.final_position = Some(pending);
            }
            let rest = self.final_position.unwrap_or(state.value);
            return Advance {
                state: MassState::new(rest, 0.0),
                settled: true,
                skipped: true,
            };
        }

        let elapsed = delta_ms as f64;
        let next = match self.pending_position.take() {
            // Half the frame under the old target, half under the new one
            Some(pending) => {
                let halfway = self.update_values(state, elapsed / 2.0);
                self.final_position = Some(pending);
                self.update_values(halfway, elapsed / 2.0)
            }
            None => self.update_values(state, elapsed),
        };

        match self.final_position {
            Some(final_position) if self.is_at_equilibrium(next.value, next.velocity) => {
                Advance::settled(MassState::new(final_position, 0.0))
            }
            _ => Advance::moving(next),
        }
    }
}

impl SpringAnimation {
    /// Spring towards `final_position` with default stiffness and damping
    pub fn to_position(
        scheduler: &AnimationScheduler,
        property: Arc<dyn AnimatedProperty>,
        final_position: f64,
    ) -> Self {
        Self::new(
            scheduler,
            property,
            SpringForce::new().with_final_position(final_position),
        )
    }

    /// Copy of the current spring parameters
    pub fn spring(&self) -> SpringForce {
        self.force()
    }

    /// Set the rest position. Fails if it lies outside the configured bounds.
    pub fn set_final_position(&self, final_position: f64) -> Result<&Self> {
        self.shared
            .scheduler
            .ensure_current_thread("set_final_position")?;
        let mut state = self.shared.state.lock();
        check_in_bounds(final_position, state.bounds)?;
        state.force.set_final_position(final_position);
        drop(state);
        Ok(self)
    }

    /// Move the rest position. A running spring keeps its velocity and
    /// switches target on the next frame; an idle one starts.
    pub fn animate_to_final_position(&self, final_position: f64) -> Result<()> {
        self.shared
            .scheduler
            .ensure_current_thread("animate_to_final_position")?;
        {
            let mut state = self.shared.state.lock();
            check_in_bounds(final_position, state.bounds)?;
            if state.lifecycle.is_running() {
                state.force.pending_position = Some(final_position);
                return Ok(());
            }
            state.force.set_final_position(final_position);
        }
        self.start()
    }

    /// Whether `skip_to_end` is allowed. Undamped springs have no rest state.
    pub fn can_skip_to_end(&self) -> bool {
        self.shared.state.lock().force.damping_ratio > 0.0
    }

    /// Jump to the final position on the next frame
    pub fn skip_to_end(&self) -> Result<()> {
        self.shared.scheduler.ensure_current_thread("skip_to_end")?;
        let mut state = self.shared.state.lock();
        if state.force.damping_ratio <= 0.0 {
            return Err(CadenceError::unsupported(
                "spring with a damping ratio of 0 can not skip to end",
            ));
        }
        if state.lifecycle.is_running() {
            state.force.end_requested = true;
            tracing::debug!(target = ?self.shared.target, "spring skip to end requested");
        }
        Ok(())
    }
}

fn check_in_bounds(value: f64, bounds: Bounds) -> Result<()> {
    if bounds.contains(value) {
        Ok(())
    } else {
        Err(CadenceError::OutOfRange {
            value,
            min: bounds.min,
            max: bounds.max,
        })
    }
}
