/// Packed module matrix
pub mod matrix;
/// Error correction levels and the encoded QR code
pub mod qr_code;

pub use matrix::BitMatrix;
pub use qr_code::{ECLevel, ParseLevelError, QRCode, SYMBOL_SIZE};
