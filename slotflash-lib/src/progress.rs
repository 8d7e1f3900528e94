//! Progress callback system
//!
//! The library never writes status lines itself. Every step announcement and
//! every non-fatal diagnostic goes through [`ProgressCallback`], so a CLI can
//! render spinners while tests simply record what was said.

use crate::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

/// What a step does to the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Flash,
    Erase,
    Wipe,
}

/// Step announcement
#[derive(Debug, Clone)]
pub struct StepInfo {
    pub kind: StepKind,
    /// Step prefix (hexadecimal step number)
    pub prefix: String,
    /// Human readable status line
    pub message: String,
}

/// Progress callback trait
///
/// Implement this trait to customize how steps and warnings are displayed
pub trait ProgressCallback: Send + Sync {
    /// Announce a new step
    ///
    /// # Returns
    /// A progress ID used to finish the step later
    fn start(&self, info: StepInfo) -> ProgressId;

    /// Finish a step
    ///
    /// # Parameters
    /// - `id`: the ID returned by [`ProgressCallback::start`]
    /// - `final_message`: closing message
    fn finish(&self, id: ProgressId, final_message: String);

    /// Report a non-fatal problem
    fn warn(&self, message: String);

    /// Run `f` with all drawing paused, e.g. while an external tool owns the
    /// terminal
    fn suspend(&self, f: &mut dyn FnMut()) {
        f();
    }
}

/// Final message of a step whose command failed
pub const ABORTED: &str = "Aborted";

/// Progress ID type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgressId(pub u64);

/// Callback that produces no output
#[derive(Debug, Default)]
pub struct NoOpProgressCallback;

impl ProgressCallback for NoOpProgressCallback {
    fn start(&self, _info: StepInfo) -> ProgressId {
        ProgressId(0)
    }

    fn finish(&self, _id: ProgressId, _final_message: String) {}

    fn warn(&self, _message: String) {}
}

pub type ProgressCallbackArc = Arc<dyn ProgressCallback>;

pub fn no_op_progress_callback() -> ProgressCallbackArc {
    Arc::new(NoOpProgressCallback)
}

/// Hands out step numbers and wraps the callback
pub struct ProgressHelper {
    callback: ProgressCallbackArc,
    step_counter: AtomicI32,
}

impl ProgressHelper {
    pub fn new(callback: ProgressCallbackArc, initial_step: i32) -> Self {
        Self {
            callback,
            step_counter: AtomicI32::new(initial_step),
        }
    }

    fn next_step(&self) -> i32 {
        self.step_counter.fetch_add(1, Ordering::SeqCst)
    }

    pub fn start_step(&self, kind: StepKind, message: impl Into<String>) -> ProgressHandler {
        let step = self.next_step();
        let info = StepInfo {
            kind,
            prefix: format!("0x{:02X}", step),
            message: message.into(),
        };
        let id = self.callback.start(info);
        ProgressHandler {
            callback: Arc::clone(&self.callback),
            id,
        }
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.callback.warn(message.into());
    }

    /// Run `f` through [`ProgressCallback::suspend`]. `f` runs exactly once,
    /// even if the callback forgets to call it.
    pub fn suspend(&self, f: impl FnOnce() -> Result<()>) -> Result<()> {
        let mut f = Some(f);
        let mut result = Ok(());
        self.callback.suspend(&mut || {
            if let Some(f) = f.take() {
                result = f();
            }
        });
        if let Some(f) = f.take() {
            result = f();
        }
        result
    }
}

/// Handle to a single running step
pub struct ProgressHandler {
    callback: ProgressCallbackArc,
    id: ProgressId,
}

impl ProgressHandler {
    pub fn finish_with_message(self, message: impl Into<String>) {
        self.callback.finish(self.id, message.into());
    }

    pub fn abort(self) {
        self.callback.finish(self.id, ABORTED.to_string());
    }
}
