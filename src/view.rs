//! Provides the presentation state around a capture workflow.
//!
//! The view starts in `Loading`, applies the workflow's single outcome, and
//! never goes back: once `Ready` or `Error`, the state is settled for the
//! life of the view. A delivery that arrives after settling (a stale
//! workflow from a previous mount) is rejected, not applied.

use std::io;
use std::path::PathBuf;

use log::warn;

use crate::capture::CaptureResult;
use crate::encode::Thumbnail;
use crate::save::ImageSink;

/// Filename used when persisting the captured thumbnail.
pub const DOWNLOAD_FILENAME: &str = "model-thumbnail.png";

/// What the component displays: exactly one of the three at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Waiting for the capture workflow; the hidden surface is mounted.
    Loading,
    /// Capture succeeded; the thumbnail is displayed with a download action.
    Ready(Thumbnail),
    /// Capture failed; the fixed error message is displayed.
    Error(String),
}

/// Owns the [`ViewState`] and applies capture outcomes.
///
/// # Examples
/// ```
/// use modelshot::ThumbnailView;
///
/// let view = ThumbnailView::new();
/// assert!(view.is_loading());
/// assert!(view.shows_surface());
/// ```
#[derive(Debug)]
pub struct ThumbnailView {
    state: ViewState,
}

impl ThumbnailView {
    /// Creates a view in the `Loading` state.
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Returns whether no outcome has been applied yet.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading)
    }

    /// Returns the held thumbnail, if the capture succeeded.
    pub fn thumbnail(&self) -> Option<&Thumbnail> {
        match &self.state {
            ViewState::Ready(thumbnail) => Some(thumbnail),
            _ => None,
        }
    }

    /// Returns the displayed error message, if the capture failed.
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Returns whether the hidden capture surface should stay mounted.
    ///
    /// True only while no outcome has been produced.
    pub fn shows_surface(&self) -> bool {
        self.is_loading()
    }

    /// Applies the capture outcome.
    ///
    /// Transitions `Loading` to `Ready` or `Error`. Once settled the view
    /// never changes again; a late delivery from a stale workflow is logged
    /// and dropped.
    pub fn apply(&mut self, result: CaptureResult) {
        if !self.is_loading() {
            warn!("capture outcome delivered after the view settled, ignoring");
            return;
        }

        self.state = match result {
            Ok(thumbnail) => ViewState::Ready(thumbnail),
            Err(err) => ViewState::Error(err.to_string()),
        };
    }

    /// Persists the held thumbnail through the sink under
    /// [`DOWNLOAD_FILENAME`].
    ///
    /// A no-op returning `Ok(None)` when no image is held (still loading, or
    /// the capture failed) or when the held payload does not decode. Never
    /// mutates state.
    ///
    /// # Errors
    /// Propagates I/O errors from the sink.
    pub fn download(&self, sink: &dyn ImageSink) -> io::Result<Option<PathBuf>> {
        let thumbnail = match self.thumbnail() {
            Some(thumbnail) => thumbnail,
            None => return Ok(None),
        };

        let png = match thumbnail.decode() {
            Some(png) => png,
            None => return Ok(None),
        };

        let path = sink.save(DOWNLOAD_FILENAME, &png)?;
        Ok(Some(path))
    }
}

impl Default for ThumbnailView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureError;
    use crate::surface::RenderError;

    fn thumbnail() -> Thumbnail {
        crate::encode::encode_rgba(&[255, 255, 255, 255], 1, 1).unwrap()
    }

    fn failure() -> CaptureResult {
        Err(CaptureError::render(RenderError::Draw("no surface".into())))
    }

    #[test]
    fn test_starts_loading() {
        let view = ThumbnailView::new();
        assert_eq!(view.state(), &ViewState::Loading);
        assert!(view.shows_surface());
        assert!(view.thumbnail().is_none());
        assert!(view.error_message().is_none());
    }

    #[test]
    fn test_success_transitions_to_ready() {
        let mut view = ThumbnailView::new();
        view.apply(Ok(thumbnail()));

        assert!(!view.is_loading());
        assert!(!view.shows_surface());
        assert!(view.thumbnail().is_some());
        assert!(view.error_message().is_none());
    }

    #[test]
    fn test_failure_transitions_to_error_with_the_fixed_message() {
        let mut view = ThumbnailView::new();
        view.apply(failure());

        assert!(!view.is_loading());
        assert_eq!(view.error_message(), Some("Error generating thumbnail."));
        assert!(view.thumbnail().is_none());
    }

    #[test]
    fn test_settled_view_rejects_late_deliveries() {
        let mut view = ThumbnailView::new();
        let first = thumbnail();
        view.apply(Ok(first.clone()));

        // A stale failure must not displace the settled result.
        view.apply(failure());
        assert_eq!(view.thumbnail(), Some(&first));

        // Nor can an error state become ready afterwards.
        let mut view = ThumbnailView::new();
        view.apply(failure());
        view.apply(Ok(thumbnail()));
        assert!(view.error_message().is_some());
        assert!(view.thumbnail().is_none());
    }
}
