//! Tweened animations
//!
//! A tween drives one or more properties from a start value to an end value
//! over a fixed duration, reshaping progress with an [`Easing`]. Tweens are
//! described by a [`TweenTemplate`] and instantiated once per element.

use crate::easing::Easing;
use crate::listener::{AnimationEnd, EndListener, ListenerId, Listeners};
use crate::property::{AnimatedProperty, PropertyBinder, ViewProperty};
use crate::scheduler::{AnimationFrameCallback, AnimationScheduler, CallbackId};
use cadence_core::{Element, ElementId, EndReason, LifecycleEvent, Result, TaskState};
use parking_lot::Mutex;
use smallvec::SmallVec;
use std::sync::Arc;

/// One animated property of a tween
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyTrack {
    pub property: ViewProperty,
    /// Start value; the property's value when the tween begins if unset
    pub from: Option<f64>,
    pub to: f64,
}

/// Description of a tween, instantiated per element
#[derive(Clone, Debug)]
pub struct TweenTemplate {
    tracks: SmallVec<[PropertyTrack; 2]>,
    duration_ms: u64,
    easing: Easing,
}

impl TweenTemplate {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            tracks: SmallVec::new(),
            duration_ms,
            easing: Easing::Linear,
        }
    }

    /// Animate `property` from its current value to `to`
    pub fn animate(mut self, property: ViewProperty, to: f64) -> Self {
        self.tracks.push(PropertyTrack {
            property,
            from: None,
            to,
        });
        self
    }

    /// Animate `property` from `from` to `to`
    pub fn animate_from(mut self, property: ViewProperty, from: f64, to: f64) -> Self {
        self.tracks.push(PropertyTrack {
            property,
            from: Some(from),
            to,
        });
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn tracks(&self) -> &[PropertyTrack] {
        &self.tracks
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn curve(&self) -> &Easing {
        &self.easing
    }

    /// Bind the template to `element` and seek every track with an explicit
    /// start value to it
    pub fn instantiate(
        &self,
        scheduler: &AnimationScheduler,
        element: &Element,
        binder: &dyn PropertyBinder,
    ) -> TweenAnimation {
        let tracks = self
            .tracks
            .iter()
            .map(|track| {
                let property = binder.bind(element, track.property);
                if let Some(from) = track.from {
                    property.set(from);
                }
                BoundTrack {
                    property,
                    from: track.from,
                    to: track.to,
                }
            })
            .collect();
        TweenAnimation::from_parts(
            scheduler,
            Some(element.id),
            tracks,
            self.duration_ms,
            self.easing.clone(),
        )
    }
}

struct BoundTrack {
    property: Arc<dyn AnimatedProperty>,
    from: Option<f64>,
    to: f64,
}

struct TweenState {
    lifecycle: TaskState,
    start_time: Option<u64>,
    /// Start values captured on the first frame
    resolved_from: SmallVec<[f64; 2]>,
    progress: f64,
    /// Last value written to the first track
    last_value: Option<f64>,
    callback: Option<CallbackId>,
    start_delay_ms: i64,
    end_listeners: Listeners<EndListener>,
}

struct TweenShared {
    scheduler: AnimationScheduler,
    target: Option<ElementId>,
    tracks: SmallVec<[BoundTrack; 2]>,
    duration_ms: u64,
    easing: Easing,
    state: Mutex<TweenState>,
}

/// Handle to a running or idle tween
#[derive(Clone)]
pub struct TweenAnimation {
    shared: Arc<TweenShared>,
}

impl TweenAnimation {
    /// Tween a single standalone property
    pub fn new(
        scheduler: &AnimationScheduler,
        property: Arc<dyn AnimatedProperty>,
        from: Option<f64>,
        to: f64,
        duration_ms: u64,
        easing: Easing,
    ) -> Self {
        let mut tracks = SmallVec::new();
        tracks.push(BoundTrack { property, from, to });
        Self::from_parts(scheduler, None, tracks, duration_ms, easing)
    }

    fn from_parts(
        scheduler: &AnimationScheduler,
        target: Option<ElementId>,
        tracks: SmallVec<[BoundTrack; 2]>,
        duration_ms: u64,
        easing: Easing,
    ) -> Self {
        Self {
            shared: Arc::new(TweenShared {
                scheduler: scheduler.clone(),
                target,
                tracks,
                duration_ms,
                easing,
                state: Mutex::new(TweenState {
                    lifecycle: TaskState::Idle,
                    start_time: None,
                    resolved_from: SmallVec::new(),
                    progress: 0.0,
                    last_value: None,
                    callback: None,
                    start_delay_ms: 0,
                    end_listeners: Listeners::default(),
                }),
            }),
        }
    }

    pub fn set_start_delay(&self, delay_ms: i64) -> Result<&Self> {
        self.shared.scheduler.ensure_current_thread("set_start_delay")?;
        self.shared.state.lock().start_delay_ms = delay_ms;
        Ok(self)
    }

    pub fn start_delay_ms(&self) -> i64 {
        self.shared.state.lock().start_delay_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.shared.duration_ms
    }

    pub fn target(&self) -> Option<ElementId> {
        self.shared.target
    }

    pub fn state(&self) -> TaskState {
        self.shared.state.lock().lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }

    /// Linear progress in `[0, 1]`
    pub fn progress(&self) -> f64 {
        self.shared.state.lock().progress
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

    pub fn start(&self) -> Result<()> {
        self.shared.scheduler.ensure_current_thread("start")?;
        let delay_ms = {
            let mut state = self.shared.state.lock();
            if state.lifecycle.is_running() {
                return Ok(());
            }
            state.lifecycle = state.lifecycle.on(LifecycleEvent::Start);
            state.start_time = None;
            state.progress = 0.0;
            state.last_value = None;
            if state.start_delay_ms < 0 {
                tracing::warn!(
                    delay_ms = state.start_delay_ms,
                    "negative start delay scheduled as zero"
                );
            }
            state.start_delay_ms.max(0) as u64
        };
        tracing::debug!(
            target = ?self.shared.target,
            duration_ms = self.shared.duration_ms,
            delay_ms,
            "starting tween"
        );

        let callback: Arc<dyn AnimationFrameCallback> = self.shared.clone();
        let id = self.shared.scheduler.add_callback(callback, delay_ms);
        self.shared.state.lock().callback = Some(id);
        Ok(())
    }

    pub fn cancel(&self) -> Result<()> {
        self.shared.scheduler.ensure_current_thread("cancel")?;
        self.shared.end(EndReason::Cancelled);
        Ok(())
    }
}

impl TweenShared {
    fn end(&self, reason: EndReason) {
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
            let value = state
                .last_value
                .unwrap_or_else(|| self.easing.apply(state.progress));
            (
                AnimationEnd::new(value, 0.0, reason),
                state.end_listeners.snapshot(),
                state.callback.take(),
            )
        };
        if let Some(id) = callback {
            self.scheduler.remove_callback(id);
        }
        tracing::debug!(target = ?self.target, ?reason, "tween ended");
        for listener in listeners {
            listener(&end);
        }
    }
}

impl AnimationFrameCallback for TweenShared {
    fn do_animation_frame(&self, frame_time_ms: u64) -> bool {
        let (eased, from) = {
            let mut state = self.state.lock();
            if !state.lifecycle.is_running() {
                return true;
            }
            let start = match state.start_time {
                Some(start) => start,
                None => {
                    state.start_time = Some(frame_time_ms);
                    state.resolved_from = self
                        .tracks
                        .iter()
                        .map(|track| track.from.unwrap_or_else(|| track.property.get()))
                        .collect();
                    frame_time_ms
                }
            };
            let elapsed = frame_time_ms.saturating_sub(start);
            let progress = if self.duration_ms == 0 {
                1.0
            } else {
                (elapsed as f64 / self.duration_ms as f64).min(1.0)
            };
            state.progress = progress;
            let eased = self.easing.apply(progress);
            state.last_value = self
                .tracks
                .first()
                .zip(state.resolved_from.first())
                .map(|(track, from)| from + (track.to - from) * eased);
            (eased, state.resolved_from.clone())
        };

        for (track, from) in self.tracks.iter().zip(from) {
            track.property.set(from + (track.to - from) * eased);
        }

        if self.state.lock().progress >= 1.0 {
            self.end(EndReason::Natural);
            true
        } else {
            false
        }
    }
}

impl std::fmt::Debug for TweenAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenAnimation")
            .field("target", &self.shared.target)
            .field("tracks", &self.shared.tracks.len())
            .field("duration_ms", &self.shared.duration_ms)
            .field("state", &self.state())
            .finish()
    }
}
