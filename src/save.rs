//! Provides file sinks for persisting captured thumbnails.
//!
//! The download action hands decoded PNG bytes to an [`ImageSink`]; where the
//! bytes end up is the sink's business. [`DirectorySink`] is the plain
//! write-to-disk implementation.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Destination for a persisted thumbnail.
pub trait ImageSink {
    /// Saves the PNG bytes under the given filename and returns where they
    /// landed.
    ///
    /// # Errors
    /// Returns an error if the bytes cannot be written.
    fn save(&self, filename: &str, png: &[u8]) -> io::Result<PathBuf>;
}

/// Writes thumbnails into a directory, creating it if needed.
///
/// # Examples
/// ```no_run
/// use modelshot::{DirectorySink, ImageSink};
///
/// let sink = DirectorySink::new("thumbnails");
/// let path = sink.save("model-thumbnail.png", &[0u8; 8]).unwrap();
/// assert!(path.ends_with("model-thumbnail.png"));
/// ```
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Creates a sink rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ImageSink for DirectorySink {
    fn save(&self, filename: &str, png: &[u8]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        fs::write(&path, png)?;
        Ok(path)
    }
}
