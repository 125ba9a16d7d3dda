//! QR code encoding modules
//!
//! Everything between input text and a finished module matrix:
//! - GF(256) arithmetic and Reed-Solomon codeword generation
//! - Byte-mode bitstream construction
//! - Finder/timing pattern placement and zigzag data placement

/// Byte-mode bitstream construction
pub mod bitstream;
/// Function module mask (finder and timing patterns)
pub mod function_mask;
/// GF(256) log/exp tables and field arithmetic
pub mod gf256;
/// Module matrix builder
pub mod matrix_builder;
/// Reed-Solomon error correction codewords
pub mod reed_solomon;

pub use bitstream::{Bitstream, BitstreamEncoder, MAX_CHARACTERS, text_to_bytes};
pub use function_mask::FunctionMask;
pub use gf256::Gf256;
pub use matrix_builder::{MatrixBuilder, PlacementReport};
pub use reed_solomon::{ReedSolomonEncoder, generate_ec_codewords};
