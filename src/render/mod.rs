//! Rendering of module matrices
//!
//! Consumes a finished [`BitMatrix`] and produces:
//! - RGB raster images with colour fills, dot shapes and an optional centred logo
//! - SVG documents
//! - Plain-text block renderings
//! - PNG/JPEG bytes and files on disk
//!
//! Nothing here feeds back into encoding.

/// Raster rendering and image export
pub mod raster;
/// SVG document rendering
pub mod svg;

pub use raster::{ExportFormat, export, render_image, save, to_base64, to_data_url};
pub use svg::render_svg;

use crate::config;
use crate::error::{QrError, Result};
use crate::models::BitMatrix;
use image::{DynamicImage, Rgb};

/// Default logo edge as a fraction of the image edge
pub const DEFAULT_LOGO_SIZE_RATIO: f32 = 0.2;
/// Largest logo that still leaves the finder patterns uncovered
pub const MAX_LOGO_SIZE_RATIO: f32 = 0.5;
/// Largest raster edge length in pixels
pub const MAX_RENDER_SIZE: u32 = 4096;

/// Colour used for dark modules
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    /// One colour everywhere
    Solid(Rgb<u8>),
    /// Blend from the top-left corner to the bottom-right corner
    LinearGradient {
        /// Colour at the top-left corner
        start: Rgb<u8>,
        /// Colour at the bottom-right corner
        end: Rgb<u8>,
    },
    /// Blend outwards from the centre
    RadialGradient {
        /// Colour near the centre
        start: Rgb<u8>,
        /// Colour towards the edges
        end: Rgb<u8>,
    },
}

/// Shape drawn for each dark module, or for each finder layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DotShape {
    /// Fill the whole module
    #[default]
    Square,
    /// Inscribed circle
    Circle,
    /// Square with rounded corners
    Rounded,
}

/// Raster rendering options
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Image edge length in pixels
    pub size: u32,
    /// Dark module colour
    pub foreground: Fill,
    /// Light module colour
    pub background: Rgb<u8>,
    /// Dark module shape
    pub dot_shape: DotShape,
    /// Shape of the three finder (eye) patterns
    pub eye_shape: DotShape,
    /// Image composited at the centre
    pub logo: Option<DynamicImage>,
    /// Logo edge as a fraction of `size`
    pub logo_size_ratio: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: config::default_render_size(),
            foreground: Fill::Solid(Rgb([0, 0, 0])),
            background: Rgb([255, 255, 255]),
            dot_shape: DotShape::Square,
            eye_shape: DotShape::Square,
            logo: None,
            logo_size_ratio: DEFAULT_LOGO_SIZE_RATIO,
        }
    }
}

impl RenderOptions {
    /// Default options at a given pixel size
    pub fn with_size(size: u32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Check the options against a matrix of `modules` modules per side
    pub fn validate(&self, modules: usize) -> Result<()> {
        if modules == 0 {
            return Err(QrError::invalid_render_options("matrix is empty"));
        }
        if (self.size as usize) < modules {
            return Err(QrError::invalid_render_options(format!(
                "size {} is smaller than the {} modules per side",
                self.size, modules
            )));
        }
        if self.size > MAX_RENDER_SIZE {
            return Err(QrError::invalid_render_options(format!(
                "size {} exceeds the {} pixel limit",
                self.size, MAX_RENDER_SIZE
            )));
        }
        if !(0.0..=MAX_LOGO_SIZE_RATIO).contains(&self.logo_size_ratio) {
            return Err(QrError::invalid_render_options(format!(
                "logo size ratio {} is outside 0.0..={}",
                self.logo_size_ratio, MAX_LOGO_SIZE_RATIO
            )));
        }
        Ok(())
    }
}

/// Text rendering: two block characters per dark module, one line per row
pub fn render_text(matrix: &BitMatrix) -> String {
    let mut out = String::with_capacity(matrix.height() * (matrix.width() * 2 * 3 + 1));
    for y in 0..matrix.height() {
        if y > 0 {
            out.push('\n');
        }
        for x in 0..matrix.width() {
            out.push_str(if matrix.get(x, y) { "██" } else { "  " });
        }
    }
    out
}
