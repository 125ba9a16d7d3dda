/// Reed-Solomon error correction codewords for QR codes
/// Systematic encoding over GF(256); generator roots are alpha^0 .. alpha^(n-1)
use super::gf256::Gf256;

/// Reed-Solomon encoder for a fixed number of error correction codewords
#[derive(Debug, Clone)]
pub struct ReedSolomonEncoder {
    num_ec_codewords: usize,
    // Highest degree first, generator[0] == 1
    generator: Vec<u8>,
}

impl ReedSolomonEncoder {
    /// Encoder producing `num_ec_codewords` codewords per call
    pub fn new(num_ec_codewords: usize) -> Self {
        Self {
            num_ec_codewords,
            generator: Self::generator_polynomial(num_ec_codewords),
        }
    }

    /// Codewords produced per `encode` call
    pub fn num_ec_codewords(&self) -> usize {
        self.num_ec_codewords
    }

    /// Generator polynomial coefficients, highest degree first
    pub fn generator(&self) -> &[u8] {
        &self.generator
    }

    /// Build prod_{i < degree} (x - alpha^i), highest degree first.
    ///
    /// The result has `degree + 1` coefficients and is monic.
    pub fn generator_polynomial(degree: usize) -> Vec<u8> {
        let mut poly = vec![1u8];
        for round in 0..degree {
            let root = Gf256::exp(round);
            // poly * (x + root): shifted copy plus scaled copy
            let mut next = vec![0u8; poly.len() + 1];
            for (i, &coeff) in poly.iter().enumerate() {
                next[i] ^= coeff;
                next[i + 1] ^= Gf256::mul(coeff, root);
            }
            poly = next;
        }
        poly
    }

    /// Compute the error correction codewords for `data`.
    ///
    /// Synthetic division of data(x) * x^n by the generator; the remainder
    /// register holds the codewords, highest degree first.
    ///
    /// Each step folds in `generator[j + 1]`, not `generator[j]`: the leading
    /// monic coefficient is consumed by the register shift. Indexing from
    /// `generator[0]` yields codewords that fail the syndrome check.
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let n = self.num_ec_codewords;
        let mut remainder = vec![0u8; n];
        if n == 0 {
            return remainder;
        }

        for &byte in data {
            let factor = byte ^ remainder[0];
            remainder.rotate_left(1);
            remainder[n - 1] = 0;
            if factor != 0 {
                // generator[0] is the monic term, consumed by the shift
                for (r, &g) in remainder.iter_mut().zip(&self.generator[1..]) {
                    *r ^= Gf256::mul(g, factor);
                }
            }
        }

        remainder
    }

    /// Evaluate `codeword` (data followed by EC bytes, highest degree first)
    /// at each generator root.
    pub fn syndromes(&self, codeword: &[u8]) -> Vec<u8> {
        (0..self.num_ec_codewords)
            .map(|i| {
                let root = Gf256::exp(i);
                codeword
                    .iter()
                    .fold(0u8, |acc, &c| Gf256::mul(acc, root) ^ c)
            })
            .collect()
    }

    /// True when every syndrome is zero
    pub fn is_valid_codeword(&self, codeword: &[u8]) -> bool {
        self.syndromes(codeword).iter().all(|&s| s == 0)
    }
}

/// Error correction codewords for `data` with a one-off encoder
pub fn generate_ec_codewords(data: &[u8], num_ec_codewords: usize) -> Vec<u8> {
    ReedSolomonEncoder::new(num_ec_codewords).encode(data)
}
