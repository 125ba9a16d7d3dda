use crate::models::{BitMatrix, SYMBOL_SIZE};

/// Edge length of a finder pattern
pub const FINDER_SIZE: usize = 7;
/// Row and column that carry the timing patterns
pub const TIMING_INDEX: usize = 6;
/// First timing module outside the finder patterns
pub const TIMING_START: usize = 8;
/// Last timing module before the opposite finder pattern
pub const TIMING_END: usize = SYMBOL_SIZE - 9;

/// Top-left corners (x, y) of the three finder patterns
pub fn finder_origins() -> [(usize, usize); 3] {
    let far = SYMBOL_SIZE - FINDER_SIZE;
    [(0, 0), (far, 0), (0, far)]
}

/// Function module mask for the Version 1 symbol.
/// true = function module (finder or timing), false = available for data.
#[derive(Debug, Clone)]
pub struct FunctionMask {
    mask: BitMatrix,
}

impl FunctionMask {
    /// Mask with the finder and timing cells claimed
    pub fn new() -> Self {
        let mut mask = BitMatrix::square(SYMBOL_SIZE);

        // Finder patterns, without separators
        for (ox, oy) in finder_origins() {
            for dy in 0..FINDER_SIZE {
                for dx in 0..FINDER_SIZE {
                    mask.set(ox + dx, oy + dy, true);
                }
            }
        }

        // Timing patterns between the finders
        for i in TIMING_START..=TIMING_END {
            mask.set(i, TIMING_INDEX, true);
            mask.set(TIMING_INDEX, i, true);
        }

        Self { mask }
    }

    /// Edge length in modules
    pub fn size(&self) -> usize {
        self.mask.width()
    }

    /// True if (x, y) belongs to a finder or timing pattern
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y)
    }

    /// Cells left for data
    pub fn data_modules_count(&self) -> usize {
        let size = self.size();
        size * size - self.mask.count_ones()
    }
}

impl Default for FunctionMask {
    fn default() -> Self {
        Self::new()
    }
}
