//! RustQR Gen - QR code generation
//!
//! Encodes short text into a 21×21 Version 1 QR symbol using byte mode,
//! Reed-Solomon error correction over GF(256) and column-pair data placement.
//! Matrices can be rendered to RGB images, SVG or text.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Environment-driven defaults
pub mod config;
/// Encoding pipeline (GF(256), Reed-Solomon, bitstream, matrix construction)
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (QRCode, BitMatrix, ECLevel)
pub mod models;
/// Raster, SVG and text rendering
pub mod render;
/// Background encoding thread
pub mod worker;

pub use error::{QrError, Result};
pub use models::{BitMatrix, ECLevel, QRCode, SYMBOL_SIZE};
pub use render::{DotShape, ExportFormat, Fill, RenderOptions};
pub use worker::{EncodeWorker, PendingEncode};

use rayon::prelude::*;

/// Encode `text` into a QR code
///
/// # Arguments
/// * `text` - Up to 255 characters, each in U+0000..=U+00FF
/// * `level` - Error correction level
///
/// # Errors
/// Fails if the text is too long or holds a character outside the byte range.
pub fn encode(text: &str, level: ECLevel) -> Result<QRCode> {
    QRCode::new(text, level)
}

/// Encode many inputs, returning results in input order
///
/// Batches of at least `QR_PARALLEL_MIN_BATCH` inputs are spread over the
/// rayon thread pool; smaller ones run on the calling thread.
pub fn encode_batch(inputs: &[(&str, ECLevel)]) -> Vec<Result<QRCode>> {
    let min_batch = config::parallel_min_batch();
    tracing::debug!(count = inputs.len(), parallel = inputs.len() >= min_batch, "encoding batch");

    if inputs.len() >= min_batch {
        inputs
            .par_iter()
            .map(|&(text, level)| encode(text, level))
            .collect()
    } else {
        inputs.iter().map(|&(text, level)| encode(text, level)).collect()
    }
}

/// Reusable encoder with a fixed error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoder {
    level: ECLevel,
}

impl Encoder {
    /// Create an encoder at the configured default level
    pub fn new() -> Self {
        Self::with_level(config::default_ec_level())
    }

    /// Create an encoder at a specific level
    pub fn with_level(level: ECLevel) -> Self {
        Self { level }
    }

    /// Level used for every encode
    pub fn level(&self) -> ECLevel {
        self.level
    }

    /// Encode one input
    pub fn encode(&self, text: &str) -> Result<QRCode> {
        encode(text, self.level)
    }

    /// Encode many inputs in order
    pub fn encode_all(&self, texts: &[&str]) -> Vec<Result<QRCode>> {
        let inputs: Vec<_> = texts.iter().map(|&text| (text, self.level)).collect();
        encode_batch(&inputs)
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}
