//! Frame sources
//!
//! A [`FrameCallbackScheduler`] is the capability the animation scheduler
//! needs from its environment: "call me back on the next frame" and "is this
//! the thread that owns the frames". Two sources ship with the crate:
//!
//! - [`VsyncFrameScheduler`]: wall-clock timestamps, pumped by the host's
//!   display callback
//! - [`ManualFrameScheduler`]: virtual time advanced explicitly, for tests and
//!   offline simulation

use parking_lot::Mutex;
use std::thread::{self, ThreadId};
use std::time::Instant;

/// One-shot callback receiving the frame timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(u64) + Send>;

/// Capability to schedule work on the next frame
pub trait FrameCallbackScheduler: Send + Sync {
    /// Run `callback` once, on the next frame
    fn post_frame_callback(&self, callback: FrameCallback);

    /// Whether the calling thread owns this frame source
    fn is_current_thread(&self) -> bool;

    /// Current frame clock time in milliseconds
    fn now_ms(&self) -> u64;
}

/// Frame source pumped by the host's vsync signal
pub struct VsyncFrameScheduler {
    owner: ThreadId,
    epoch: Instant,
    pending: Mutex<Vec<FrameCallback>>,
}

impl VsyncFrameScheduler {
    /// Create a frame source owned by the calling thread
    pub fn new() -> Self {
        Self {
            owner: thread::current().id(),
            epoch: Instant::now(),
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Deliver a frame. Call from the owning thread once per display refresh.
    ///
    /// Returns the number of callbacks that ran.
    pub fn on_vsync(&self) -> usize {
        let callbacks = std::mem::take(&mut *self.pending.lock());
        let frame_time = self.now_ms();
        let count = callbacks.len();
        for callback in callbacks {
            callback(frame_time);
        }
        count
    }

    /// Whether anything is waiting for the next frame
    pub fn has_pending_frame(&self) -> bool {
        !self.pending.lock().is_empty()
    }
}

impl Default for VsyncFrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameCallbackScheduler for VsyncFrameScheduler {
    fn post_frame_callback(&self, callback: FrameCallback) {
        self.pending.lock().push(callback);
    }

    fn is_current_thread(&self) -> bool {
        thread::current().id() == self.owner
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}

/// Deterministic frame source driven by explicit time steps
pub struct ManualFrameScheduler {
    owner: ThreadId,
    state: Mutex<ManualState>,
}

#[derive(Default)]
struct ManualState {
    now_ms: u64,
    pending: Vec<FrameCallback>,
}

impl ManualFrameScheduler {
    /// Create a frame source owned by the calling thread, starting at t = 0
    pub fn new() -> Self {
        Self {
            owner: thread::current().id(),
            state: Mutex::new(ManualState::default()),
        }
    }

    /// Move the clock forward by `dt_ms` and deliver one frame.
    ///
    /// Returns the number of callbacks that ran.
    pub fn advance(&self, dt_ms: u64) -> usize {
        let (frame_time, callbacks) = {
            let mut state = self.state.lock();
            state.now_ms += dt_ms;
            (state.now_ms, std::mem::take(&mut state.pending))
        };
        let count = callbacks.len();
        for callback in callbacks {
            callback(frame_time);
        }
        count
    }

    /// Deliver frames every `dt_ms` until nothing is pending or `max_frames`
    /// frames have run. Returns the number of frames delivered.
    pub fn run_frames(&self, dt_ms: u64, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.has_pending_frame() {
            self.advance(dt_ms);
            frames += 1;
        }
        frames
    }

    pub fn has_pending_frame(&self) -> bool {
        !self.state.lock().pending.is_empty()
    }
}

impl Default for ManualFrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameCallbackScheduler for ManualFrameScheduler {
    fn post_frame_callback(&self, callback: FrameCallback) {
        self.state.lock().pending.push(callback);
    }

    fn is_current_thread(&self) -> bool {
        thread::current().id() == self.owner
    }

    fn now_ms(&self) -> u64 {
        self.state.lock().now_ms
    }
}
