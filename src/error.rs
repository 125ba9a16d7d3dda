//! Error types for QR generation.
//!
//! Every failure is local to one encode/build/render call. Encoding is pure,
//! so a call that fails will fail the same way on retry; the only recovery is
//! fixing the input.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for QR generation
pub type Result<T> = std::result::Result<T, QrError>;

/// Errors produced while encoding, rendering or exporting a QR code
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum QrError {
    /// Text does not fit the 8-bit character-count field
    #[error("input of {length} characters exceeds the {max}-character limit of the count field")]
    InputTooLong {
        /// Number of characters in the input
        length: usize,
        /// Largest length the count field can carry
        max: usize,
    },

    /// A character cannot be stored as a single byte
    #[error("character {character:?} at position {position} is outside the byte range 0-255")]
    UnsupportedCharacter {
        /// The offending character
        character: char,
        /// Character index within the input
        position: usize,
    },

    /// A bit string contained something other than '0' or '1'
    #[error("invalid bit {found:?} at position {position}: expected '0' or '1'")]
    InvalidBitstring {
        /// Index of the offending character
        position: usize,
        /// The character that was found
        found: char,
    },

    /// Rendering options cannot produce an image
    #[error("invalid render options: {0}")]
    InvalidRenderOptions(String),

    /// Image encoding or decoding failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Failed to write an exported file
    #[error("failed to write file '{path}': {source}")]
    Io {
        /// Path that could not be written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The background encoder thread could not be started
    #[error("failed to spawn encode worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    /// The background encoder thread is no longer running
    #[error("encode worker disconnected")]
    WorkerDisconnected,
}

impl QrError {
    /// Creates a new input length error
    pub fn input_too_long(length: usize, max: usize) -> Self {
        Self::InputTooLong { length, max }
    }

    /// Creates a new unsupported character error
    pub fn unsupported_character(character: char, position: usize) -> Self {
        Self::UnsupportedCharacter {
            character,
            position,
        }
    }

    /// Creates a new render options error
    pub fn invalid_render_options(msg: impl Into<String>) -> Self {
        Self::InvalidRenderOptions(msg.into())
    }

    /// Creates a new file write error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true if the error comes from the caller's input rather than
    /// from the environment (files, image codecs, threads)
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InputTooLong { .. }
                | Self::UnsupportedCharacter { .. }
                | Self::InvalidBitstring { .. }
                | Self::InvalidRenderOptions(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QrError::input_too_long(300, 255);
        assert!(err.to_string().contains("300"));
        assert!(err.to_string().contains("255"));

        let err = QrError::unsupported_character('€', 3);
        assert!(err.to_string().contains("position 3"));
    }

    #[test]
    fn test_is_input_error() {
        assert!(QrError::input_too_long(256, 255).is_input_error());
        assert!(QrError::unsupported_character('€', 0).is_input_error());
        assert!(!QrError::WorkerDisconnected.is_input_error());
        let io = std::io::Error::other("disk full");
        assert!(!QrError::io("/tmp/qr.png", io).is_input_error());
    }
}
