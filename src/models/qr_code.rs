use super::BitMatrix;
use crate::config;
use crate::encoder::{Bitstream, BitstreamEncoder, MatrixBuilder, PlacementReport, text_to_bytes};
use crate::error::Result;
use crate::render::{self, ExportFormat, RenderOptions};
use image::RgbImage;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Edge length in modules of the Version 1 symbol
pub const SYMBOL_SIZE: usize = 21;

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ECLevel {
    /// Low (7 codewords)
    L = 0,
    /// Medium (15 codewords)
    #[default]
    M = 1,
    /// Quartile (25 codewords)
    Q = 2,
    /// High (30 codewords)
    H = 3,
}

impl ECLevel {
    /// All levels, lowest first
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Number of error correction codewords appended at this level
    pub const fn ec_codewords(self) -> usize {
        match self {
            ECLevel::L => 7,
            ECLevel::M => 15,
            ECLevel::Q => 25,
            ECLevel::H => 30,
        }
    }

    /// Single-letter name
    pub const fn as_char(self) -> char {
        match self {
            ECLevel::L => 'L',
            ECLevel::M => 'M',
            ECLevel::Q => 'Q',
            ECLevel::H => 'H',
        }
    }
}

impl fmt::Display for ECLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Returned when a string names no error correction level
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error correction level {0:?}: expected L, M, Q or H")]
pub struct ParseLevelError(pub String);

impl FromStr for ECLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(ECLevel::L),
            "M" => Ok(ECLevel::M),
            "Q" => Ok(ECLevel::Q),
            "H" => Ok(ECLevel::H),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Encoded QR code
#[derive(Debug, Clone)]
pub struct QRCode {
    /// Encoded bytes, one per character
    pub data: Vec<u8>,
    /// Source text
    pub content: String,
    /// Error correction level
    pub error_correction: ECLevel,
    /// Mode, count, data and codeword bits placed into the matrix
    pub bitstream: Bitstream,
    /// How much of the bitstream fit into the data modules
    pub placement: PlacementReport,
    /// Module matrix (true = dark, false = light)
    pub modules: BitMatrix,
}

impl QRCode {
    /// Encode `text` at the given error correction level
    pub fn new(text: &str, level: ECLevel) -> Result<Self> {
        let data = text_to_bytes(text)?;
        let bitstream = BitstreamEncoder::encode_bytes(&data, level)?;
        let (modules, placement) = MatrixBuilder::build_with_report(&bitstream);

        Ok(Self {
            data,
            content: text.to_string(),
            error_correction: level,
            bitstream,
            placement,
            modules,
        })
    }

    /// Encode `text` at the configured default level (`QR_EC_LEVEL`)
    pub fn with_default_level(text: &str) -> Result<Self> {
        Self::new(text, config::default_ec_level())
    }

    /// Edge length in modules
    pub fn size(&self) -> usize {
        self.modules.width()
    }

    /// Module state at (row, col)
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.modules.get(col, row)
    }

    /// Row-major module states
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.modules.to_rows()
    }

    /// Rasterize to an RGB image
    pub fn render_image(&self, options: &RenderOptions) -> Result<RgbImage> {
        render::render_image(&self.modules, options)
    }

    /// Render as an SVG document `size` pixels wide
    pub fn render_svg(&self, size: u32) -> String {
        render::render_svg(&self.modules, size, None, 0.0)
    }

    /// Rasterize and encode as PNG or JPEG bytes
    pub fn export(&self, format: ExportFormat, options: &RenderOptions) -> Result<Vec<u8>> {
        let image = self.render_image(options)?;
        render::export(&image, format)
    }

    /// Rasterize and encode as base64 text
    pub fn to_base64(&self, format: ExportFormat, options: &RenderOptions) -> Result<String> {
        let image = self.render_image(options)?;
        render::to_base64(&image, format)
    }

    /// Rasterize and encode as a `data:image/...;base64,` URL
    pub fn to_data_url(&self, format: ExportFormat, options: &RenderOptions) -> Result<String> {
        let image = self.render_image(options)?;
        render::to_data_url(&image, format)
    }

    /// Write to `path`; the extension picks SVG, PNG, JPEG, ...
    pub fn save(&self, path: impl AsRef<Path>, options: &RenderOptions) -> Result<()> {
        render::save(&self.modules, path.as_ref(), options)
    }
}

impl fmt::Display for QRCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render::render_text(&self.modules))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QrError;

    #[test]
    fn test_ec_codeword_counts() {
        assert_eq!(ECLevel::L.ec_codewords(), 7);
        assert_eq!(ECLevel::M.ec_codewords(), 15);
        assert_eq!(ECLevel::Q.ec_codewords(), 25);
        assert_eq!(ECLevel::H.ec_codewords(), 30);
    }

    #[test]
    fn test_ec_level_parse() {
        assert_eq!("L".parse::<ECLevel>(), Ok(ECLevel::L));
        assert_eq!(" q ".parse::<ECLevel>(), Ok(ECLevel::Q));
        assert_eq!("h".parse::<ECLevel>(), Ok(ECLevel::H));
        assert!("X".parse::<ECLevel>().is_err());
        assert!("".parse::<ECLevel>().is_err());
        for level in ECLevel::ALL {
            assert_eq!(level.to_string().parse::<ECLevel>(), Ok(level));
        }
        assert_eq!(ECLevel::default(), ECLevel::M);
    }

    #[test]
    fn test_qr_code_new() {
        let qr = QRCode::new("MatrixTest", ECLevel::L).unwrap();
        assert_eq!(qr.size(), 21);
        assert_eq!(qr.data, b"MatrixTest");
        assert_eq!(qr.content, "MatrixTest");
        assert_eq!(qr.error_correction, ECLevel::L);
        // 4 + 8 + 80 + 56 = 148, padded to 152
        assert_eq!(qr.bitstream.len(), 152);
        assert_eq!(qr.placement.placed, qr.bitstream.len());
        assert!(qr.is_dark(0, 0));
        assert!(qr.is_dark(0, 6));
        assert!(!qr.is_dark(1, 1));
    }

    #[test]
    fn test_qr_code_rejects_bad_input() {
        assert!(matches!(
            QRCode::new("price: 5€", ECLevel::M),
            Err(QrError::UnsupportedCharacter { .. })
        ));
        assert!(matches!(
            QRCode::new(&"a".repeat(256), ECLevel::M),
            Err(QrError::InputTooLong { .. })
        ));
    }

    #[test]
    fn test_qr_code_data_url() {
        let qr = QRCode::new("data url", ECLevel::M).unwrap();
        let options = RenderOptions::with_size(84);
        let url = qr.to_data_url(ExportFormat::Png, &options).unwrap();
        let encoded = qr.to_base64(ExportFormat::Png, &options).unwrap();
        assert_eq!(url, format!("data:image/png;base64,{}", encoded));
        assert!(qr.to_data_url(ExportFormat::Png, &RenderOptions::with_size(10)).is_err());
    }

    #[test]
    fn test_qr_code_display() {
        let qr = QRCode::new("Hi", ECLevel::L).unwrap();
        let text = qr.to_string();
        assert_eq!(text.lines().count(), 21);
        assert!(text.lines().all(|line| line.chars().count() == 42));
    }
}
