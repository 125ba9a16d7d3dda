/// Module matrix construction for the Version 1 symbol
use super::bitstream::Bitstream;
use super::function_mask::{
    FINDER_SIZE, FunctionMask, TIMING_END, TIMING_INDEX, TIMING_START, finder_origins,
};
use crate::models::{BitMatrix, SYMBOL_SIZE};

/// Outcome of threading a bitstream into the data modules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementReport {
    /// Bits written into the matrix
    pub placed: usize,
    /// Trailing bits that did not fit and were dropped
    pub discarded: usize,
    /// Data modules available in the traversal
    pub capacity: usize,
}

impl PlacementReport {
    /// True if any bits were dropped
    pub fn is_truncated(&self) -> bool {
        self.discarded > 0
    }
}

/// Builds the module matrix: finder patterns, then timing patterns, then data
pub struct MatrixBuilder;

impl MatrixBuilder {
    /// Build the 21x21 matrix for `bitstream`
    pub fn build(bitstream: &Bitstream) -> BitMatrix {
        Self::build_with_report(bitstream).0
    }

    /// Build the matrix and report how much of the bitstream fit.
    ///
    /// Bits beyond the data capacity are dropped, not treated as an error.
    pub fn build_with_report(bitstream: &Bitstream) -> (BitMatrix, PlacementReport) {
        let function = FunctionMask::new();
        let mut modules = BitMatrix::square(SYMBOL_SIZE);

        Self::place_finder_patterns(&mut modules);
        Self::place_timing_patterns(&mut modules);
        let report = Self::place_data(&mut modules, &function, bitstream.bits());

        if report.is_truncated() {
            tracing::debug!(
                placed = report.placed,
                discarded = report.discarded,
                "bitstream exceeds data capacity, trailing bits dropped"
            );
        } else {
            tracing::trace!(
                placed = report.placed,
                capacity = report.capacity,
                "placed bitstream"
            );
        }

        (modules, report)
    }

    /// Number of data modules the traversal visits
    pub fn data_capacity() -> usize {
        Self::placement_order(&FunctionMask::new()).len()
    }

    /// Data module coordinates (x, y) in the order bits are written.
    ///
    /// Column pairs from the right edge leftwards, rows top to bottom, right
    /// column first. The timing column is stepped over without a visit.
    pub fn placement_order(func: &FunctionMask) -> Vec<(usize, usize)> {
        let dimension = func.size();
        let mut order = Vec::with_capacity(func.data_modules_count());

        let mut col = dimension as i32 - 1;
        while col > 0 {
            if col == TIMING_INDEX as i32 {
                col -= 1;
                continue;
            }

            for row in 0..dimension {
                for c in [col as usize, col as usize - 1] {
                    if !func.is_function(c, row) {
                        order.push((c, row));
                    }
                }
            }

            col -= 2;
        }

        order
    }

    fn place_finder_patterns(modules: &mut BitMatrix) {
        for (ox, oy) in finder_origins() {
            for dy in 0..FINDER_SIZE {
                for dx in 0..FINDER_SIZE {
                    let border = dx == 0 || dy == 0 || dx == FINDER_SIZE - 1 || dy == FINDER_SIZE - 1;
                    let inner = (2..=4).contains(&dx) && (2..=4).contains(&dy);
                    modules.set(ox + dx, oy + dy, border || inner);
                }
            }
        }
    }

    fn place_timing_patterns(modules: &mut BitMatrix) {
        for i in TIMING_START..=TIMING_END {
            let dark = i % 2 == 0;
            modules.set(i, TIMING_INDEX, dark);
            modules.set(TIMING_INDEX, i, dark);
        }
    }

    fn place_data(modules: &mut BitMatrix, func: &FunctionMask, bits: &[bool]) -> PlacementReport {
        let order = Self::placement_order(func);
        let placed = bits.len().min(order.len());

        for (&(x, y), &bit) in order.iter().zip(bits) {
            modules.set(x, y, bit);
        }

        PlacementReport {
            placed,
            discarded: bits.len() - placed,
            capacity: order.len(),
        }
    }
}
