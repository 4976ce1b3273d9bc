//! Provides the offscreen render surface and the seams around it.
//!
//! The surface owns a CPU framebuffer with color and depth planes. What gets
//! drawn is left to the [`Scene`] implementation plugged in by the host;
//! scene-graph construction and model parsing happen on the other side of
//! that seam. [`RenderSurface`] is the contract the capture workflow depends
//! on, so test doubles and GPU-backed surfaces can stand in for the default.

use glam::Mat4;
use thiserror::Error;

use crate::camera::Camera;
use crate::encode::{self, EncodeError, Thumbnail};

/// Errors that can occur while rendering or capturing a frame.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The scene failed to draw itself.
    #[error("scene draw failed: {0}")]
    Draw(String),
    /// The captured frame could not be encoded.
    #[error("frame capture failed: {0}")]
    Encode(#[from] EncodeError),
}

/// A drawable scene: the seam to the external scene-graph collaborator.
///
/// Implementations draw themselves into the framebuffer using the supplied
/// view-projection transform. The scene may still be populating lazily
/// loaded assets when `draw` runs; it draws whatever it currently holds.
pub trait Scene: Send + Sync {
    /// Draws the scene into the framebuffer.
    ///
    /// # Errors
    /// Returns an error if the scene cannot produce a frame.
    fn draw(&self, frame: &mut Framebuffer, view_proj: Mat4) -> Result<(), RenderError>;
}

/// A rendering surface the capture workflow can drive.
///
/// `render` draws one frame of the scene through the camera; `capture`
/// extracts the most recently rendered frame as an encoded image.
pub trait RenderSurface: Send {
    /// Renders one frame of the scene through the camera.
    ///
    /// # Errors
    /// Returns an error if the scene fails to draw.
    fn render(&mut self, scene: &dyn Scene, camera: &Camera) -> Result<(), RenderError>;

    /// Captures the current frame as a PNG data URI.
    ///
    /// # Errors
    /// Returns an error if the frame cannot be encoded.
    fn capture(&self) -> Result<Thumbnail, RenderError>;
}

// ---------------------------------------------------------------------------
// Framebuffer
// ---------------------------------------------------------------------------

/// A CPU render target with an RGBA color plane and a depth plane.
///
/// # Examples
/// ```
/// use modelshot::Framebuffer;
///
/// let mut frame = Framebuffer::new(4, 4);
/// assert!(frame.set_pixel(1, 1, 0.5, [255, 0, 0, 255]));
/// // A farther fragment at the same pixel loses the depth test.
/// assert!(!frame.set_pixel(1, 1, 0.9, [0, 255, 0, 255]));
/// ```
pub struct Framebuffer {
    width: u32,
    height: u32,
    color: Vec<u8>,
    depth: Vec<f32>,
}

impl Framebuffer {
    /// Creates a cleared framebuffer of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            color: vec![0u8; pixel_count * 4],
            depth: vec![f32::INFINITY; pixel_count],
        }
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resets the color plane to transparent black and the depth plane to
    /// infinity.
    pub fn clear(&mut self) {
        self.color.fill(0);
        self.depth.fill(f32::INFINITY);
    }

    /// Writes a depth-tested fragment.
    ///
    /// The fragment lands only if it is nearer than what the pixel already
    /// holds. Returns whether the color was written; out-of-bounds
    /// coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, depth: f32, rgba: [u8; 4]) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }

        let idx = (y as usize) * (self.width as usize) + (x as usize);
        if depth >= self.depth[idx] {
            return false;
        }

        self.depth[idx] = depth;
        self.color[idx * 4..idx * 4 + 4].copy_from_slice(&rgba);
        true
    }

    /// Returns the RGBA color plane, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.color
    }
}

// ---------------------------------------------------------------------------
// Default offscreen implementation
// ---------------------------------------------------------------------------

/// The default CPU-backed render surface.
///
/// # Examples
/// ```
/// use modelshot::{CaptureOptions, OffscreenSurface};
///
/// let options = CaptureOptions::default();
/// let surface = OffscreenSurface::new(options.width, options.height);
/// assert_eq!(surface.frame().width(), 300);
/// ```
pub struct OffscreenSurface {
    frame: Framebuffer,
}

impl OffscreenSurface {
    /// Creates a surface with a cleared framebuffer of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: Framebuffer::new(width, height),
        }
    }

    /// Returns the surface's framebuffer.
    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }
}

impl RenderSurface for OffscreenSurface {
    fn render(&mut self, scene: &dyn Scene, camera: &Camera) -> Result<(), RenderError> {
        self.frame.clear();

        let aspect = self.frame.width as f32 / self.frame.height as f32;
        let view_proj = camera.view_projection(aspect);

        scene.draw(&mut self.frame, view_proj)
    }

    fn capture(&self) -> Result<Thumbnail, RenderError> {
        let thumbnail = encode::encode_rgba(self.frame.pixels(), self.frame.width, self.frame.height)?;
        Ok(thumbnail)
    }
}
