/// Compact bit matrix for storing module states (true = dark, false = light)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a new all-light bit matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Create a new all-light square matrix
    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Byte index and bit mask of (x, y), or `None` outside the matrix
    fn locate(&self, x: usize, y: usize) -> Option<(usize, u8)> {
        (x < self.width && y < self.height).then(|| {
            let index = y * self.width + x;
            (index / 8, 1 << (index % 8))
        })
    }

    /// Get bit at (x, y); out-of-range reads are light
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.locate(x, y)
            .is_some_and(|(byte, mask)| self.data[byte] & mask != 0)
    }

    /// Set bit at (x, y); out-of-range writes are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        let Some((byte, mask)) = self.locate(x, y) else {
            return;
        };
        if value {
            self.data[byte] |= mask;
        } else {
            self.data[byte] &= !mask;
        }
    }

    /// Row-major view: `rows[row][col]`
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.height)
            .map(|y| (0..self.width).map(|x| self.get(x, y)).collect())
            .collect()
    }

    /// Number of set (dark) bits
    pub fn count_ones(&self) -> usize {
        // Padding bits in the last byte are never set, so whole bytes can be counted
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
