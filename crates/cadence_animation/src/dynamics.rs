//! Physics-driven animation tasks
//!
//! A [`DynamicAnimation`] moves one float (the property it is bound to) under
//! a [`Force`]. Every frame the force advances a `(value, velocity)` pair by
//! the elapsed time; the task publishes the new value, clamps it to the
//! configured bounds and stops once the force reports equilibrium.
//!
//! ```text
//! start() ──► first frame: record time, publish start value
//!             later frames: advance → clamp → publish → maybe end
//! ```
//!
//! Tasks are handles: cloning one yields another handle to the same running
//! simulation. `start`, `cancel`, the setters and the re-targeting calls
//! must happen on the thread that owns the scheduler's frame clock.

use crate::listener::{AnimationEnd, EndListener, ListenerId, Listeners, UpdateListener};
use crate::property::{AnimatedProperty, ViewProperty, MIN_VISIBLE_CHANGE_PIXELS};
use crate::scheduler::{AnimationFrameCallback, AnimationScheduler, CallbackId};
use cadence_core::{CadenceError, ElementId, EndReason, LifecycleEvent, Result, TaskState};
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// Fraction of the minimum visible change used as the value threshold
const THRESHOLD_MULTIPLIER: f64 = 0.75;

/// Value and velocity of the simulated mass
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MassState {
    pub value: f64,
    /// Units per second
    pub velocity: f64,
}

impl MassState {
    pub fn new(value: f64, velocity: f64) -> Self {
        Self { value, velocity }
    }
}

/// Inclusive `[min, max]` range the animated value is kept in
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: -f64::MAX,
            max: f64::MAX,
        }
    }
}

impl Bounds {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp without panicking on an inverted range
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

/// Result of advancing a force by one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Advance {
    pub state: MassState,
    /// The force reached its rest state
    pub settled: bool,
    /// Rest state was reached by a skip request rather than simulation
    pub skipped: bool,
}

impl Advance {
    pub fn moving(state: MassState) -> Self {
        Self {
            state,
            settled: false,
            skipped: false,
        }
    }

    pub fn settled(state: MassState) -> Self {
        Self {
            state,
            settled: true,
            skipped: false,
        }
    }
}

/// A force acting on a one-dimensional mass
pub trait Force: Send + 'static {
    /// Short name used in log output
    const NAME: &'static str;

    /// Instantaneous acceleration at `(value, velocity)`
    fn acceleration(&self, value: f64, velocity: f64) -> f64;

    fn is_at_equilibrium(&self, value: f64, velocity: f64) -> bool;

    /// Distance from rest below which the value counts as settled
    fn set_value_threshold(&mut self, threshold: f64);

    /// Validate the force before the task starts
    fn prepare(&mut self, _bounds: Bounds) -> Result<()> {
        Ok(())
    }

    /// Advance the mass by `delta_ms` milliseconds
    fn advance(&mut self, state: MassState, delta_ms: u64, bounds: Bounds) -> Advance;
}

pub(crate) struct DynamicsState<F> {
    pub(crate) force: F,
    pub(crate) mass: MassState,
    /// Explicit start value; read from the property when unset
    pub(crate) start_value: Option<f64>,
    pub(crate) bounds: Bounds,
    pub(crate) min_visible_change: f64,
    pub(crate) lifecycle: TaskState,
    pub(crate) last_frame_time: Option<u64>,
    pub(crate) callback: Option<CallbackId>,
    pub(crate) start_delay_ms: i64,
    pub(crate) update_listeners: Listeners<UpdateListener>,
    pub(crate) end_listeners: Listeners<EndListener>,
}

pub(crate) struct Shared<F: Force> {
    pub(crate) scheduler: AnimationScheduler,
    pub(crate) property: Arc<dyn AnimatedProperty>,
    pub(crate) target: Option<ElementId>,
    pub(crate) state: Mutex<DynamicsState<F>>,
}

/// Handle to a physics-driven animation of one property
pub struct DynamicAnimation<F: Force> {
    pub(crate) shared: Arc<Shared<F>>,
}

impl<F: Force> Clone for DynamicAnimation<F> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<F: Force> DynamicAnimation<F> {
    /// Animate a standalone property, using the pixel visibility threshold
    pub fn new(
        scheduler: &AnimationScheduler,
        property: Arc<dyn AnimatedProperty>,
        force: F,
    ) -> Self {
        Self::build(scheduler, property, None, MIN_VISIBLE_CHANGE_PIXELS, force)
    }

    /// Animate `property` of `element`, using that property's visibility
    /// threshold
    pub fn for_element(
        scheduler: &AnimationScheduler,
        element: ElementId,
        view_property: ViewProperty,
        property: Arc<dyn AnimatedProperty>,
        force: F,
    ) -> Self {
        Self::build(
            scheduler,
            property,
            Some(element),
            view_property.min_visible_change(),
            force,
        )
    }

    fn build(
        scheduler: &AnimationScheduler,
        property: Arc<dyn AnimatedProperty>,
        target: Option<ElementId>,
        min_visible_change: f64,
        mut force: F,
    ) -> Self {
        force.set_value_threshold(min_visible_change * THRESHOLD_MULTIPLIER);
        Self {
            shared: Arc::new(Shared {
                scheduler: scheduler.clone(),
                property,
                target,
                state: Mutex::new(DynamicsState {
                    force,
                    mass: MassState::default(),
                    start_value: None,
                    bounds: Bounds::default(),
                    min_visible_change,
                    lifecycle: TaskState::Idle,
                    last_frame_time: None,
                    callback: None,
                    start_delay_ms: 0,
                    update_listeners: Listeners::default(),
                    end_listeners: Listeners::default(),
                }),
            }),
        }
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Lock the state for a configuration change made on the clock thread
    fn configure(&self, operation: &str) -> Result<MutexGuard<'_, DynamicsState<F>>> {
        self.shared.scheduler.ensure_current_thread(operation)?;
        Ok(self.shared.state.lock())
    }

    /// Start from `value` instead of the property's current value
    pub fn set_start_value(&self, value: f64) -> Result<&Self> {
        self.configure("set_start_value")?.start_value = Some(value);
        Ok(self)
    }

    /// Write `value` to the property now and start from it
    pub fn seek(&self, value: f64) -> Result<&Self> {
        self.shared.scheduler.ensure_current_thread("seek")?;
        self.shared.property.set(value);
        self.shared.state.lock().start_value = Some(value);
        Ok(self)
    }

    /// Initial velocity in units per second
    pub fn set_start_velocity(&self, velocity: f64) -> Result<&Self> {
        self.configure("set_start_velocity")?.mass.velocity = velocity;
        Ok(self)
    }

    pub fn set_min_value(&self, min: f64) -> Result<&Self> {
        self.configure("set_min_value")?.bounds.min = min;
        Ok(self)
    }

    pub fn set_max_value(&self, max: f64) -> Result<&Self> {
        self.configure("set_max_value")?.bounds.max = max;
        Ok(self)
    }

    /// Smallest change of the value that is visible on screen.
    ///
    /// Drives the equilibrium thresholds; must be positive.
    pub fn set_minimum_visible_change(&self, min_visible_change: f64) -> Result<&Self> {
        let mut state = self.configure("set_minimum_visible_change")?;
        if min_visible_change.is_nan() || min_visible_change <= 0.0 {
            return Err(CadenceError::invalid_argument(
                "minimum visible change must be positive",
            ));
        }
        state.min_visible_change = min_visible_change;
        state
            .force
            .set_value_threshold(min_visible_change * THRESHOLD_MULTIPLIER);
        drop(state);
        Ok(self)
    }

    /// Delay between `start()` and the first frame. Negative delays are kept
    /// for inspection but scheduled as zero.
    pub fn set_start_delay(&self, delay_ms: i64) -> Result<&Self> {
        self.configure("set_start_delay")?.start_delay_ms = delay_ms;
        Ok(self)
    }

    /// Replace the force's parameters in place
    pub fn update_force(&self, update: impl FnOnce(&mut F)) -> Result<&Self> {
        update(&mut self.configure("update_force")?.force);
        Ok(self)
    }

    // ========================================================================
    // Listeners
    // ========================================================================

    pub fn add_update_listener(
        &self,
        listener: impl Fn(f64, f64) + Send + Sync + 'static,
    ) -> ListenerId {
        self.shared
            .state
            .lock()
            .update_listeners
            .add(Arc::new(listener))
    }

    pub fn remove_update_listener(&self, id: ListenerId) -> bool {
        self.shared.state.lock().update_listeners.remove(id)
    }

    pub fn add_end_listener(
        &self,
        listener: impl Fn(&AnimationEnd) + Send + Sync + 'static,
    ) -> ListenerId {
        self.shared
            .state
            .lock()
            .end_listeners
            .add(Arc::new(listener))
    }

    pub fn remove_end_listener(&self, id: ListenerId) -> bool {
        self.shared.state.lock().end_listeners.remove(id)
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    pub fn state(&self) -> TaskState {
        self.shared.state.lock().lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }

    /// Current simulated value
    pub fn value(&self) -> f64 {
        self.shared.state.lock().mass.value
    }

    pub fn velocity(&self) -> f64 {
        self.shared.state.lock().mass.velocity
    }

    pub fn bounds(&self) -> Bounds {
        self.shared.state.lock().bounds
    }

    pub fn min_visible_change(&self) -> f64 {
        self.shared.state.lock().min_visible_change
    }

    pub fn start_delay_ms(&self) -> i64 {
        self.shared.state.lock().start_delay_ms
    }

    /// Element this task drives, if it was created for one
    pub fn target(&self) -> Option<ElementId> {
        self.shared.target
    }

    pub fn force(&self) -> F
    where
        F: Clone,
    {
        self.shared.state.lock().force.clone()
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Start the animation. Starting a running task does nothing.
    pub fn start(&self) -> Result<()> {
        self.shared.scheduler.ensure_current_thread("start")?;
        let current = self.shared.property.get();

        let delay_ms = {
            let mut state = self.shared.state.lock();
            if state.lifecycle.is_running() {
                return Ok(());
            }
            let bounds = state.bounds;
            state.force.prepare(bounds)?;

            let start = state.start_value.unwrap_or(current);
            state.mass.value = bounds.clamp(start);
            state.last_frame_time = None;
            state.lifecycle = state.lifecycle.on(LifecycleEvent::Start);

            if state.start_delay_ms < 0 {
                tracing::warn!(
                    delay_ms = state.start_delay_ms,
                    "negative start delay scheduled as zero"
                );
            }
            tracing::debug!(
                force = F::NAME,
                target = ?self.shared.target,
                value = state.mass.value,
                velocity = state.mass.velocity,
                "starting dynamic animation"
            );
            state.start_delay_ms.max(0) as u64
        };

        let callback: Arc<dyn AnimationFrameCallback> = self.shared.clone();
        let id = self.shared.scheduler.add_callback(callback, delay_ms);
        self.shared.state.lock().callback = Some(id);
        Ok(())
    }

    /// Stop immediately. End listeners fire with `cancelled = true` before
    /// this returns.
    pub fn cancel(&self) -> Result<()> {
        self.shared.scheduler.ensure_current_thread("cancel")?;
        self.shared.end(EndReason::Cancelled);
        Ok(())
    }
}

impl<F: Force> Shared<F> {
    /// Move to the ended state and notify end listeners. No-op unless running.
    pub(crate) fn end(&self, reason: EndReason) {
        let (end, listeners, callback) = {
            let mut state = self.state.lock();
            if !state.lifecycle.is_running() {
                return;
            }
            let event = match reason {
                EndReason::Natural => LifecycleEvent::Finish,
                EndReason::Cancelled => LifecycleEvent::Cancel,
                EndReason::SkippedToEnd => LifecycleEvent::Skip,
            };
            state.lifecycle = state.lifecycle.on(event);
            state.last_frame_time = None;
            state.start_value = None;
            (
                AnimationEnd::new(state.mass.value, state.mass.velocity, reason),
                state.end_listeners.snapshot(),
                state.callback.take(),
            )
        };

        if let Some(id) = callback {
            self.scheduler.remove_callback(id);
        }
        tracing::debug!(
            force = F::NAME,
            target = ?self.target,
            value = end.value,
            ?reason,
            "dynamic animation ended"
        );
        for listener in listeners {
            listener(&end);
        }
    }
}

impl<F: Force> AnimationFrameCallback for Shared<F> {
    fn do_animation_frame(&self, frame_time_ms: u64) -> bool {
        let (mass, end, listeners) = {
            let mut state = self.state.lock();
            if !state.lifecycle.is_running() {
                return true;
            }
            let end = match state.last_frame_time.replace(frame_time_ms) {
                None => None,
                Some(last) => {
                    let delta_ms = frame_time_ms.saturating_sub(last);
                    let bounds = state.bounds;
                    let mass = state.mass;
                    let advance = state.force.advance(mass, delta_ms, bounds);

                    let mut next = advance.state;
                    let mut end = None;
                    if !bounds.contains(next.value) {
                        next.value = bounds.clamp(next.value);
                        next.velocity = 0.0;
                        end = Some(EndReason::Natural);
                    }
                    if advance.settled {
                        end = Some(if advance.skipped {
                            EndReason::SkippedToEnd
                        } else {
                            EndReason::Natural
                        });
                    }
                    state.mass = next;
                    end
                }
            };
            (state.mass, end, state.update_listeners.snapshot())
        };

        tracing::trace!(
            force = F::NAME,
            frame_time_ms,
            value = mass.value,
            velocity = mass.velocity,
            "dynamics frame"
        );
        self.property.set(mass.value);
        for listener in listeners {
            listener(mass.value, mass.velocity);
        }

        match end {
            Some(reason) => {
                self.end(reason);
                true
            }
            None => false,
        }
    }
}

impl<F: Force> std::fmt::Debug for DynamicAnimation<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("DynamicAnimation")
            .field("force", &F::NAME)
            .field("target", &self.shared.target)
            .field("state", &state.lifecycle)
            .field("mass", &state.mass)
            .finish()
    }
}
