//! Byte-mode bitstream construction.
//!
//! Layout, in order: 4-bit mode indicator (`0100`), 8-bit character count,
//! 8 bits per data byte, 8 bits per error correction codeword, then zero
//! bits up to the next byte boundary.

use super::reed_solomon::ReedSolomonEncoder;
use crate::error::{QrError, Result};
use crate::models::ECLevel;
use std::fmt;
use std::str::FromStr;

/// Byte mode indicator
pub const MODE_BYTE: u32 = 0b0100;
/// Width of the mode indicator field
pub const MODE_INDICATOR_BITS: usize = 4;
/// Width of the character-count field
pub const COUNT_INDICATOR_BITS: usize = 8;
/// Longest text the character-count field can describe
pub const MAX_CHARACTERS: usize = (1 << COUNT_INDICATOR_BITS) - 1;

/// Ordered sequence of bits, most significant bit of every field first
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bitstream {
    bits: Vec<bool>,
}

impl Bitstream {
    /// Empty bitstream
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing bit vector
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True when no bits have been pushed
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bits in placement order
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Append the low `count` bits of `value`, MSB first
    pub fn push_bits(&mut self, value: u32, count: usize) {
        debug_assert!(count <= 32);
        for i in (0..count).rev() {
            self.bits.push((value >> i) & 1 != 0);
        }
    }

    /// Append zero bits until the length is a multiple of 8
    pub fn pad_to_byte(&mut self) {
        let remainder = self.bits.len() % 8;
        if remainder != 0 {
            self.bits.resize(self.bits.len() + 8 - remainder, false);
        }
    }

    /// Pack into bytes, MSB first; a trailing partial byte is zero-filled
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |byte, (i, &bit)| byte | ((bit as u8) << (7 - i)))
            })
            .collect()
    }
}

impl fmt::Display for Bitstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Bitstream {
    type Err = QrError;

    /// Parse a string of `'0'` and `'1'` characters
    fn from_str(s: &str) -> Result<Self> {
        let bits = s
            .chars()
            .enumerate()
            .map(|(position, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                found => Err(QrError::InvalidBitstring { position, found }),
            })
            .collect::<Result<Vec<bool>>>()?;
        Ok(Self { bits })
    }
}

/// Map each character to its byte value, rejecting code points above 255
pub fn text_to_bytes(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .enumerate()
        .map(|(position, character)| {
            u8::try_from(u32::from(character))
                .map_err(|_| QrError::unsupported_character(character, position))
        })
        .collect()
}

/// Builds byte-mode bitstreams with appended Reed-Solomon codewords
pub struct BitstreamEncoder;

impl BitstreamEncoder {
    /// Encode text whose characters all fall in 0-255
    pub fn encode(text: &str, level: ECLevel) -> Result<Bitstream> {
        let data = text_to_bytes(text)?;
        Self::encode_bytes(&data, level)
    }

    /// Encode raw bytes, one byte per character
    pub fn encode_bytes(data: &[u8], level: ECLevel) -> Result<Bitstream> {
        if data.len() > MAX_CHARACTERS {
            return Err(QrError::input_too_long(data.len(), MAX_CHARACTERS));
        }

        let ec_codewords = ReedSolomonEncoder::new(level.ec_codewords()).encode(data);

        let mut stream = Bitstream {
            bits: Vec::with_capacity(Self::padded_len(data.len(), level)),
        };
        stream.push_bits(MODE_BYTE, MODE_INDICATOR_BITS);
        stream.push_bits(data.len() as u32, COUNT_INDICATOR_BITS);
        for &byte in data {
            stream.push_bits(byte as u32, 8);
        }
        for &codeword in &ec_codewords {
            stream.push_bits(codeword as u32, 8);
        }
        stream.pad_to_byte();

        tracing::debug!(
            characters = data.len(),
            level = %level,
            ec_codewords = ec_codewords.len(),
            bits = stream.len(),
            "encoded byte-mode bitstream"
        );

        Ok(stream)
    }

    /// Length before padding: 4 + 8 + 8 * characters + 8 * codewords
    pub fn unpadded_len(characters: usize, level: ECLevel) -> usize {
        MODE_INDICATOR_BITS + COUNT_INDICATOR_BITS + 8 * characters + 8 * level.ec_codewords()
    }

    /// Final length: the unpadded length rounded up to a multiple of 8
    pub fn padded_len(characters: usize, level: ECLevel) -> usize {
        Self::unpadded_len(characters, level).next_multiple_of(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(stream: &Bitstream, start: usize, len: usize) -> String {
        stream.to_string()[start..start + len].to_string()
    }

    #[test]
    fn test_mode_and_count_fields() {
        let stream = BitstreamEncoder::encode("Test", ECLevel::M).unwrap();
        assert_eq!(field(&stream, 0, 4), "0100");
        assert_eq!(field(&stream, 4, 8), "00000100");
        // 'T' = 0x54
        assert_eq!(field(&stream, 12, 8), "01010100");
        assert_eq!(stream.len() % 8, 0);
    }

    #[test]
    fn test_length_formula() {
        let stream = BitstreamEncoder::encode("ErrorCheck", ECLevel::H).unwrap();
        assert_eq!(BitstreamEncoder::unpadded_len(10, ECLevel::H), 332);
        assert_eq!(stream.len(), 336);
        assert!(stream.len() > 80);

        for level in ECLevel::ALL {
            for text in ["", "a", "Hello", "Hello, World!"] {
                let stream = BitstreamEncoder::encode(text, level).unwrap();
                let len = text.chars().count();
                assert_eq!(stream.len(), BitstreamEncoder::padded_len(len, level));
                assert!(stream.len() >= BitstreamEncoder::unpadded_len(len, level));
                assert!(stream.len() < BitstreamEncoder::unpadded_len(len, level) + 8);
            }
        }
    }

    #[test]
    fn test_codewords_follow_data() {
        let stream = BitstreamEncoder::encode("Test", ECLevel::M).unwrap();
        let expected = ReedSolomonEncoder::new(15).encode(b"Test");
        // 4 + 8 + 32 = 44 bits precede the first codeword
        let bits = stream.to_string();
        for (i, codeword) in expected.iter().enumerate() {
            let start = 44 + i * 8;
            assert_eq!(&bits[start..start + 8], format!("{:08b}", codeword));
        }
        // 44 + 120 = 164, padded with four zero bits
        assert_eq!(stream.len(), 168);
        assert_eq!(&bits[164..], "0000");
    }

    #[test]
    fn test_latin1_characters() {
        let stream = BitstreamEncoder::encode("é", ECLevel::L).unwrap();
        assert_eq!(field(&stream, 12, 8), "11101001");
        assert_eq!(text_to_bytes("ÿA").unwrap(), vec![0xFF, b'A']);
    }

    #[test]
    fn test_unsupported_character() {
        let err = BitstreamEncoder::encode("ab€", ECLevel::L).unwrap_err();
        assert!(matches!(
            err,
            QrError::UnsupportedCharacter {
                character: '€',
                position: 2
            }
        ));
    }

    #[test]
    fn test_input_too_long() {
        let ok = "x".repeat(MAX_CHARACTERS);
        assert!(BitstreamEncoder::encode(&ok, ECLevel::L).is_ok());

        let long = "x".repeat(MAX_CHARACTERS + 1);
        let err = BitstreamEncoder::encode(&long, ECLevel::L).unwrap_err();
        assert!(matches!(
            err,
            QrError::InputTooLong {
                length: 256,
                max: 255
            }
        ));
    }

    #[test]
    fn test_bit_string_parse_and_display() {
        let stream: Bitstream = "0100000000010".parse().unwrap();
        assert_eq!(stream.len(), 13);
        assert_eq!(stream.to_string(), "0100000000010");

        let err = "01x1".parse::<Bitstream>().unwrap_err();
        assert!(matches!(
            err,
            QrError::InvalidBitstring {
                position: 2,
                found: 'x'
            }
        ));
    }

    #[test]
    fn test_to_bytes() {
        let stream: Bitstream = "0100000001".parse().unwrap();
        assert_eq!(stream.to_bytes(), vec![0b0100_0000, 0b0100_0000]);

        let stream = BitstreamEncoder::encode("Hi", ECLevel::L).unwrap();
        let bytes = stream.to_bytes();
        assert_eq!(bytes.len(), stream.len() / 8);
        // 0100 0000 | 0010 0100 | 1000 ...
        assert_eq!(bytes[0], 0x40);
        assert_eq!(bytes[1], 0x24);
    }

    #[test]
    fn test_pad_to_byte() {
        let mut stream = Bitstream::new();
        stream.pad_to_byte();
        assert!(stream.is_empty());

        stream.push_bits(0b101, 3);
        stream.pad_to_byte();
        assert_eq!(stream.to_string(), "10100000");

        stream.pad_to_byte();
        assert_eq!(stream.len(), 8);
    }
}
