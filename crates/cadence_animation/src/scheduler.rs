//! Animation scheduler
//!
//! Multiplexes every running task onto one frame source. Tasks register a
//! frame callback (optionally delayed); while at least one is registered the
//! scheduler keeps requesting frames and ticks each due callback once per
//! frame.
//!
//! The scheduler is cheap to clone and is injected into every task at
//! construction. There is no process-wide instance.

use crate::frame::{FrameCallbackScheduler, ManualFrameScheduler};
use cadence_core::{CadenceError, Result};
use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::sync::{Arc, Weak};

new_key_type! {
    pub struct CallbackId;
}

/// Per-frame hook implemented by animation tasks
pub trait AnimationFrameCallback: Send + Sync {
    /// Advance to `frame_time_ms`. Returns `true` once the callback is done
    /// and should be unregistered.
    fn do_animation_frame(&self, frame_time_ms: u64) -> bool;
}

struct Registration {
    callback: Arc<dyn AnimationFrameCallback>,
    /// Frame time before which the callback is skipped
    start_at_ms: Option<u64>,
}

#[derive(Default)]
struct SchedulerState {
    callbacks: SlotMap<CallbackId, Registration>,
    frame_posted: bool,
    frames_dispatched: u64,
}

struct SchedulerInner {
    frames: Arc<dyn FrameCallbackScheduler>,
    state: Mutex<SchedulerState>,
}

/// Ticks registered animation callbacks on every frame
#[derive(Clone)]
pub struct AnimationScheduler {
    inner: Arc<SchedulerInner>,
}

impl AnimationScheduler {
    pub fn new(frames: Arc<dyn FrameCallbackScheduler>) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                frames,
                state: Mutex::new(SchedulerState::default()),
            }),
        }
    }

    /// Scheduler backed by a fresh [`ManualFrameScheduler`] owned by the
    /// calling thread
    pub fn manual() -> (Self, Arc<ManualFrameScheduler>) {
        let frames = Arc::new(ManualFrameScheduler::new());
        (Self::new(frames.clone()), frames)
    }

    pub fn is_current_thread(&self) -> bool {
        self.inner.frames.is_current_thread()
    }

    /// Fail with `ConcurrencyViolation` unless called on the owning thread
    pub fn ensure_current_thread(&self, operation: &str) -> Result<()> {
        if self.is_current_thread() {
            Ok(())
        } else {
            Err(CadenceError::ConcurrencyViolation(format!(
                "{operation} must be called on the thread that owns the frame clock"
            )))
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.inner.frames.now_ms()
    }

    /// Register a frame callback, skipped until `delay_ms` has elapsed
    pub fn add_callback(
        &self,
        callback: Arc<dyn AnimationFrameCallback>,
        delay_ms: u64,
    ) -> CallbackId {
        let start_at_ms = (delay_ms > 0).then(|| self.now_ms() + delay_ms);
        let (id, post) = {
            let mut state = self.inner.state.lock();
            let id = state.callbacks.insert(Registration {
                callback,
                start_at_ms,
            });
            let post = !state.frame_posted;
            state.frame_posted = true;
            (id, post)
        };
        if post {
            self.post_next_frame();
        }
        id
    }

    /// Unregister a callback. Returns `false` if it was not registered.
    pub fn remove_callback(&self, id: CallbackId) -> bool {
        self.inner.state.lock().callbacks.remove(id).is_some()
    }

    pub fn contains(&self, id: CallbackId) -> bool {
        self.inner.state.lock().callbacks.contains_key(id)
    }

    pub fn callback_count(&self) -> usize {
        self.inner.state.lock().callbacks.len()
    }

    /// Check if any animations are still registered
    pub fn has_active_animations(&self) -> bool {
        !self.inner.state.lock().callbacks.is_empty()
    }

    pub fn frames_dispatched(&self) -> u64 {
        self.inner.state.lock().frames_dispatched
    }

    fn post_next_frame(&self) {
        let weak: Weak<SchedulerInner> = Arc::downgrade(&self.inner);
        self.inner
            .frames
            .post_frame_callback(Box::new(move |frame_time_ms| {
                if let Some(inner) = weak.upgrade() {
                    AnimationScheduler { inner }.dispatch_frame(frame_time_ms);
                }
            }));
    }

    /// Tick every due callback once.
    ///
    /// Callbacks run without the scheduler lock held, so they may register or
    /// remove callbacks (their own included). A callback removed earlier in
    /// the same frame is not ticked.
    pub fn dispatch_frame(&self, frame_time_ms: u64) {
        let due: SmallVec<[(CallbackId, Arc<dyn AnimationFrameCallback>); 16]> = {
            let mut state = self.inner.state.lock();
            state.frame_posted = false;
            state.frames_dispatched += 1;
            state
                .callbacks
                .iter_mut()
                .filter_map(|(id, registration)| match registration.start_at_ms {
                    Some(start_at) if start_at > frame_time_ms => None,
                    _ => {
                        registration.start_at_ms = None;
                        Some((id, registration.callback.clone()))
                    }
                })
                .collect()
        };

        tracing::trace!(frame_time_ms, due = due.len(), "dispatching animation frame");

        for (id, callback) in due {
            if !self.contains(id) {
                continue;
            }
            if callback.do_animation_frame(frame_time_ms) {
                self.remove_callback(id);
            }
        }

        let post = {
            let mut state = self.inner.state.lock();
            let post = !state.callbacks.is_empty() && !state.frame_posted;
            if post {
                state.frame_posted = true;
            }
            post
        };
        if post {
            self.post_next_frame();
        }
    }
}

impl std::fmt::Debug for AnimationScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationScheduler")
            .field("callbacks", &self.callback_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Finishes after a fixed number of frames
    struct Countdown {
        remaining: AtomicUsize,
        ticks: AtomicUsize,
    }

    impl Countdown {
        fn new(frames: usize) -> Arc<Self> {
            Arc::new(Self {
                remaining: AtomicUsize::new(frames),
                ticks: AtomicUsize::new(0),
            })
        }
    }

    impl AnimationFrameCallback for Countdown {
        fn do_animation_frame(&self, _frame_time_ms: u64) -> bool {
            self.ticks.fetch_add(1, Ordering::SeqCst);
            self.remaining.fetch_sub(1, Ordering::SeqCst) == 1
        }
    }

    #[test]
    fn test_ticks_until_finished() {
        let (scheduler, frames) = AnimationScheduler::manual();
        let countdown = Countdown::new(3);
        scheduler.add_callback(countdown.clone(), 0);
        assert!(scheduler.has_active_animations());

        let delivered = frames.run_frames(16, 100);
        assert_eq!(delivered, 3);
        assert_eq!(countdown.ticks.load(Ordering::SeqCst), 3);
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_delayed_callback_waits() {
        let (scheduler, frames) = AnimationScheduler::manual();
        let countdown = Countdown::new(1);
        scheduler.add_callback(countdown.clone(), 40);

        frames.advance(16);
        frames.advance(16);
        assert_eq!(countdown.ticks.load(Ordering::SeqCst), 0);

        frames.advance(16);
        assert_eq!(countdown.ticks.load(Ordering::SeqCst), 1);
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_removed_callback_is_not_ticked() {
        let (scheduler, frames) = AnimationScheduler::manual();
        let countdown = Countdown::new(10);
        let id = scheduler.add_callback(countdown.clone(), 0);
        frames.advance(16);
        assert!(scheduler.remove_callback(id));
        frames.advance(16);
        assert_eq!(countdown.ticks.load(Ordering::SeqCst), 1);
        assert!(!frames.has_pending_frame());
    }

    #[test]
    fn test_single_frame_request_for_many_callbacks() {
        let (scheduler, frames) = AnimationScheduler::manual();
        for _ in 0..5 {
            scheduler.add_callback(Countdown::new(1), 0);
        }
        assert_eq!(frames.advance(16), 1);
        assert_eq!(scheduler.frames_dispatched(), 1);
        assert_eq!(scheduler.callback_count(), 0);
    }

    #[test]
    fn test_off_thread_check() {
        let (scheduler, _frames) = AnimationScheduler::manual();
        assert!(scheduler.ensure_current_thread("start").is_ok());

        let other = scheduler.clone();
        let result = std::thread::spawn(move || other.ensure_current_thread("start"))
            .join()
            .unwrap();
        assert!(matches!(result, Err(CadenceError::ConcurrencyViolation(_))));
    }
}
