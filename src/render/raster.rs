use super::{DotShape, Fill, RenderOptions};
use crate::error::{QrError, Result};
use crate::models::BitMatrix;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::Path;

/// White margin kept around a composited logo, in pixels
const LOGO_PADDING: u32 = 5;
/// Corner radius of rounded dots, as a fraction of the dot edge
const ROUNDED_RADIUS: f32 = 0.25;
/// Edge length of a finder pattern, in modules
const EYE_SIZE: usize = 7;

/// Encoded image formats for [`export`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Lossless PNG
    Png,
    /// JPEG at the given quality (1-100)
    Jpeg {
        /// Encoder quality, clamped to 1-100
        quality: u8,
    },
}

impl ExportFormat {
    /// MIME type used in data URLs
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg { .. } => "image/jpeg",
        }
    }
}

/// Rasterize a square module matrix.
///
/// Pixel `p` samples the module under its centre, `floor((p + 0.5) * modules / size)`,
/// so every module gets `size / modules` pixels give or take one. The three
/// 7×7 finder blocks are drawn as concentric layers in `eye_shape`; every
/// other dark module is drawn in `dot_shape`.
pub fn render_image(matrix: &BitMatrix, options: &RenderOptions) -> Result<RgbImage> {
    let modules = matrix.width();
    options.validate(modules)?;

    let size = options.size;
    let scale = modules as f32 / size as f32;
    let eyes = eye_origins(modules);
    let mut image = RgbImage::from_pixel(size, size, options.background);

    for (px, py, pixel) in image.enumerate_pixels_mut() {
        let fx = (px as f32 + 0.5) * scale;
        let fy = (py as f32 + 0.5) * scale;
        let mx = (fx as usize).min(modules - 1);
        let my = (fy as usize).min(modules - 1);

        let eye = eyes.iter().find(|&&(ox, oy)| {
            (ox..ox + EYE_SIZE).contains(&mx) && (oy..oy + EYE_SIZE).contains(&my)
        });
        let inked = match eye {
            Some(&(ox, oy)) => eye_covers(options.eye_shape, fx - ox as f32, fy - oy as f32),
            None => matrix.get(mx, my) && covers(options.dot_shape, fx - mx as f32, fy - my as f32),
        };
        if inked {
            *pixel = fill_color(&options.foreground, px, py, size);
        }
    }

    if let Some(logo) = &options.logo {
        composite_logo(&mut image, logo, options.logo_size_ratio);
    }

    tracing::debug!(
        size,
        modules,
        dots = ?options.dot_shape,
        eyes = ?options.eye_shape,
        "rendered raster image"
    );
    Ok(image)
}

/// Top-left module of each finder block; none for matrices too small to hold them
fn eye_origins(modules: usize) -> Vec<(usize, usize)> {
    if modules < 2 * EYE_SIZE {
        return Vec::new();
    }
    let far = modules - EYE_SIZE;
    vec![(0, 0), (far, 0), (0, far)]
}

/// Whether a point (x, y) in module units inside a finder block is inked.
///
/// Dark 7×7 outline, light 5×5 ring, dark 3×3 core, each in `shape`.
fn eye_covers(shape: DotShape, x: f32, y: f32) -> bool {
    let layer = |inset: f32| {
        let side = EYE_SIZE as f32 - 2.0 * inset;
        let u = (x - inset) / side;
        let v = (y - inset) / side;
        (0.0..1.0).contains(&u) && (0.0..1.0).contains(&v) && covers(shape, u, v)
    };
    (layer(0.0) && !layer(1.0)) || layer(2.0)
}

/// Whether a point at (u, v) inside a module (both in 0..1) is inked
fn covers(shape: DotShape, u: f32, v: f32) -> bool {
    match shape {
        DotShape::Square => true,
        DotShape::Circle => {
            let dx = u - 0.5;
            let dy = v - 0.5;
            dx * dx + dy * dy <= 0.25
        }
        DotShape::Rounded => {
            let inset = 0.5 - ROUNDED_RADIUS;
            let dx = ((u - 0.5).abs() - inset).max(0.0);
            let dy = ((v - 0.5).abs() - inset).max(0.0);
            dx * dx + dy * dy <= ROUNDED_RADIUS * ROUNDED_RADIUS
        }
    }
}

fn fill_color(fill: &Fill, x: u32, y: u32, size: u32) -> Rgb<u8> {
    match *fill {
        Fill::Solid(color) => color,
        Fill::LinearGradient { start, end } => {
            let span = (2 * (size - 1)).max(1) as f32;
            lerp(start, end, (x + y) as f32 / span)
        }
        Fill::RadialGradient { start, end } => {
            let centre = size as f32 / 2.0;
            let dx = x as f32 + 0.5 - centre;
            let dy = y as f32 + 0.5 - centre;
            let distance = (dx * dx + dy * dy).sqrt();
            let inner = size as f32 / 4.0;
            let outer = size as f32 / 1.5;
            lerp(start, end, (distance - inner) / (outer - inner))
        }
    }
}

fn lerp(a: Rgb<u8>, b: Rgb<u8>, t: f32) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    Rgb(std::array::from_fn(|i| {
        let from = a.0[i] as f32;
        let to = b.0[i] as f32;
        (from + (to - from) * t).round() as u8
    }))
}

fn composite_logo(image: &mut RgbImage, logo: &DynamicImage, ratio: f32) {
    let size = image.width();
    let logo_size = (size as f32 * ratio).round() as u32;
    if logo_size == 0 {
        return;
    }

    let offset = (size - logo_size) / 2;
    let start = offset.saturating_sub(LOGO_PADDING);
    let end = (offset + logo_size + LOGO_PADDING).min(size);
    for y in start..end {
        for x in start..end {
            image.put_pixel(x, y, Rgb([255, 255, 255]));
        }
    }

    let resized = imageops::resize(&logo.to_rgb8(), logo_size, logo_size, FilterType::Triangle);
    imageops::overlay(image, &resized, offset as i64, offset as i64);
}

/// Encode a rendered image as PNG or JPEG bytes
pub fn export(image: &RgbImage, format: ExportFormat) -> Result<Vec<u8>> {
    let output = match format {
        ExportFormat::Png => ImageOutputFormat::Png,
        ExportFormat::Jpeg { quality } => ImageOutputFormat::Jpeg(quality.clamp(1, 100)),
    };
    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, output)?;
    Ok(cursor.into_inner())
}

/// Encode a rendered image and return it as standard base64 text
pub fn to_base64(image: &RgbImage, format: ExportFormat) -> Result<String> {
    let bytes = export(image, format)?;
    Ok(STANDARD.encode(bytes))
}

/// Encode a rendered image as a `data:` URL, e.g. for an `<img src>` or an SVG logo href
pub fn to_data_url(image: &RgbImage, format: ExportFormat) -> Result<String> {
    let encoded = to_base64(image, format)?;
    Ok(format!("data:{};base64,{}", format.mime_type(), encoded))
}

/// Write a matrix to disk.
///
/// A `.svg` extension writes the SVG rendering; anything else is rasterized
/// and handed to `image`, which picks the format from the extension.
pub fn save(matrix: &BitMatrix, path: &Path, options: &RenderOptions) -> Result<()> {
    let is_svg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    if is_svg {
        let svg = super::render_svg(matrix, options.size, None, 0.0);
        std::fs::write(path, svg).map_err(|e| QrError::io(path, e))?;
    } else {
        render_image(matrix, options)?.save(path)?;
    }

    tracing::debug!(path = %path.display(), "saved QR code");
    Ok(())
}
