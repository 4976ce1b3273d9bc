//! Provides the one-shot capture workflow: wait, render, encode, report.
//!
//! The workflow waits for the scene to signal readiness (bounded by a
//! wall-clock deadline), renders a single frame through the camera, encodes
//! it as a PNG data URI, and delivers exactly one outcome through a pair of
//! consume-once hooks. It is not restartable, not retried, and a spawned
//! workflow is aborted when its [`CaptureTask`] guard is dropped.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::camera::Camera;
use crate::encode::Thumbnail;
use crate::surface::{RenderError, RenderSurface, Scene};

/// Configuration for a capture workflow.
///
/// `Default` yields the contract values: a 1000 ms readiness window and a
/// 300x300 capture.
///
/// # Examples
/// ```
/// use modelshot::CaptureOptions;
///
/// let options = CaptureOptions::default();
/// assert_eq!(options.max_wait_ms, 1000);
/// assert_eq!((options.width, options.height), (300, 300));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureOptions {
    /// Longest time to wait for scene readiness, in milliseconds. Without a
    /// readiness signal this is the full delay before the capture runs.
    pub max_wait_ms: u64,
    /// Capture width in pixels.
    pub width: u32,
    /// Capture height in pixels.
    pub height: u32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            max_wait_ms: 1000,
            width: 300,
            height: 300,
        }
    }
}

// ---------------------------------------------------------------------------
// Readiness signalling
// ---------------------------------------------------------------------------

/// Creates a readiness notification pair.
///
/// The model-loading collaborator keeps the [`ReadyNotifier`] and fires it
/// once the scene graph has finished populating; the capture workflow holds
/// the [`ReadySignal`].
///
/// # Examples
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (notifier, signal) = modelshot::ready_channel();
/// notifier.notify();
/// // Already-fired signals complete immediately.
/// signal.wait().await;
/// # }
/// ```
pub fn ready_channel() -> (ReadyNotifier, ReadySignal) {
    let (tx, rx) = watch::channel(false);
    (ReadyNotifier { tx }, ReadySignal { rx })
}

/// The sending half of a readiness notification.
pub struct ReadyNotifier {
    tx: watch::Sender<bool>,
}

impl ReadyNotifier {
    /// Marks the scene as ready. Consumes the notifier; readiness is
    /// one-directional.
    pub fn notify(self) {
        let _ = self.tx.send(true);
    }
}

/// The receiving half of a readiness notification.
#[derive(Clone)]
pub struct ReadySignal {
    rx: watch::Receiver<bool>,
}

impl ReadySignal {
    /// Waits until the notifier fires.
    ///
    /// Level-triggered: completes immediately if the notifier already fired.
    /// A notifier dropped without firing leaves the future pending forever;
    /// the workflow's wall-clock deadline decides in that case.
    pub async fn wait(mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// Which step of the capture failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureErrorKind {
    /// The render pass failed.
    Render,
    /// The rendered frame could not be encoded.
    Encode,
}

/// A failed capture.
///
/// The user-facing message is always the same fixed string; the failing step
/// and the underlying cause stay reachable through [`CaptureError::kind`] and
/// [`CaptureError::cause`] so they can still be logged distinctly.
///
/// # Examples
/// ```
/// use modelshot::{CaptureError, CaptureErrorKind, RenderError};
///
/// let err = CaptureError::render(RenderError::Draw("lost context".into()));
/// assert_eq!(err.to_string(), "Error generating thumbnail.");
/// assert_eq!(err.kind(), CaptureErrorKind::Render);
/// ```
#[derive(Debug, Error)]
#[error("Error generating thumbnail.")]
pub struct CaptureError {
    kind: CaptureErrorKind,
    #[source]
    source: RenderError,
}

impl CaptureError {
    /// Wraps a render-pass failure.
    pub fn render(source: RenderError) -> Self {
        Self {
            kind: CaptureErrorKind::Render,
            source,
        }
    }

    /// Wraps a frame-encoding failure.
    pub fn encode(source: RenderError) -> Self {
        Self {
            kind: CaptureErrorKind::Encode,
            source,
        }
    }

    /// Returns which step failed.
    pub fn kind(&self) -> CaptureErrorKind {
        self.kind
    }

    /// Returns the underlying cause.
    pub fn cause(&self) -> &RenderError {
        &self.source
    }
}

/// The single outcome a capture workflow produces.
pub type CaptureResult = Result<Thumbnail, CaptureError>;

/// The exactly-once callback pair a workflow reports through.
///
/// Both hooks are `FnOnce`: the type system rules out double delivery. The
/// settled hook always runs after the outcome hook, in the same
/// continuation, regardless of success or failure.
pub struct CaptureHooks {
    on_result: Box<dyn FnOnce(CaptureResult) + Send>,
    on_settled: Box<dyn FnOnce() + Send>,
}

impl CaptureHooks {
    /// Builds a hook pair from the two callbacks.
    pub fn new(
        on_result: impl FnOnce(CaptureResult) + Send + 'static,
        on_settled: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            on_result: Box::new(on_result),
            on_settled: Box::new(on_settled),
        }
    }
}

// ---------------------------------------------------------------------------
// The workflow
// ---------------------------------------------------------------------------

/// A one-shot capture workflow.
///
/// Constructed once per mounted surface, consumed by [`Capture::run`] or
/// [`Capture::spawn`].
pub struct Capture<S> {
    surface: S,
    scene: Arc<dyn Scene>,
    camera: Camera,
    ready: Option<ReadySignal>,
    options: CaptureOptions,
}

impl<S: RenderSurface> Capture<S> {
    /// Creates a workflow with default options and no readiness signal.
    pub fn new(surface: S, scene: Arc<dyn Scene>, camera: Camera) -> Self {
        Self {
            surface,
            scene,
            camera,
            ready: None,
            options: CaptureOptions::default(),
        }
    }

    /// Replaces the options.
    pub fn with_options(mut self, options: CaptureOptions) -> Self {
        self.options = options;
        self
    }

    /// Gates the capture on a readiness signal instead of the bare delay.
    ///
    /// The wall-clock deadline from the options still applies as an upper
    /// bound: a signal that never fires does not stall the capture forever.
    pub fn ready_when(mut self, signal: ReadySignal) -> Self {
        self.ready = Some(signal);
        self
    }

    /// Runs the workflow to completion and delivers the outcome.
    ///
    /// The sequence is: wait for readiness (or the deadline), render one
    /// frame, capture it, invoke the outcome hook, then the settled hook.
    /// Each hook fires exactly once.
    pub async fn run(mut self, hooks: CaptureHooks) {
        let deadline = Duration::from_millis(self.options.max_wait_ms);
        match self.ready.take() {
            Some(signal) => {
                if tokio::time::timeout(deadline, signal.wait()).await.is_err() {
                    debug!(
                        "scene not ready within {} ms, capturing anyway",
                        self.options.max_wait_ms
                    );
                }
            }
            None => tokio::time::sleep(deadline).await,
        }

        let outcome = self.render_and_capture();
        if let Err(ref err) = outcome {
            warn!("thumbnail capture failed ({:?}): {}", err.kind(), err.cause());
        }

        (hooks.on_result)(outcome);
        (hooks.on_settled)();
    }

    fn render_and_capture(&mut self) -> CaptureResult {
        self.surface
            .render(self.scene.as_ref(), &self.camera)
            .map_err(CaptureError::render)?;
        self.surface.capture().map_err(CaptureError::encode)
    }
}

impl<S: RenderSurface + Send + 'static> Capture<S> {
    /// Spawns the workflow onto the tokio runtime.
    ///
    /// Dropping the returned guard aborts a still-pending workflow; once
    /// aborted, neither hook will fire.
    pub fn spawn(self, hooks: CaptureHooks) -> CaptureTask {
        CaptureTask {
            handle: tokio::spawn(self.run(hooks)),
        }
    }
}

/// Guard for a spawned capture workflow. Aborts the workflow on drop.
pub struct CaptureTask {
    handle: JoinHandle<()>,
}

impl CaptureTask {
    /// Returns whether the workflow has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the workflow to finish delivering.
    pub async fn join(mut self) {
        let _ = (&mut self.handle).await;
    }
}

impl Drop for CaptureTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
