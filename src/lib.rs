//! One-shot offscreen thumbnail capture for 3D model viewers.
//!
//! A host mounts a hidden render surface, spawns a capture workflow, and gets
//! back exactly one outcome: either a PNG data URI ready to display and
//! download, or a fixed error message. The workflow waits for the scene to
//! signal readiness (bounded by a wall-clock deadline), renders one frame,
//! and encodes it; the [`ThumbnailView`] applies the outcome and owns the
//! three-way loading/ready/error display state from then on.
//!
//! Scene-graph construction and model parsing live behind the [`Scene`] seam;
//! this crate orchestrates, renders into a CPU framebuffer, encodes, and
//! persists.
//!
//! # Examples
//! ```
//! use modelshot::{Camera, CaptureOptions, OffscreenSurface, ThumbnailView};
//!
//! let options = CaptureOptions::default();
//! let _surface = OffscreenSurface::new(options.width, options.height);
//! let _camera = Camera::default();
//!
//! let view = ThumbnailView::new();
//! assert!(view.is_loading());
//! ```

pub mod camera;
pub mod capture;
pub mod encode;
pub mod save;
pub mod surface;
pub mod view;

pub use camera::Camera;
pub use capture::{
    ready_channel, Capture, CaptureError, CaptureErrorKind, CaptureHooks, CaptureOptions,
    CaptureResult, CaptureTask, ReadyNotifier, ReadySignal,
};
pub use encode::{Thumbnail, PNG_DATA_URI_PREFIX};
pub use save::{DirectorySink, ImageSink};
pub use surface::{Framebuffer, OffscreenSurface, RenderError, RenderSurface, Scene};
pub use view::{ThumbnailView, ViewState, DOWNLOAD_FILENAME};
