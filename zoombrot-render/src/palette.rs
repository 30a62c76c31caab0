use rayon::prelude::*;

use crate::buffer::RenderBuffer;
use crate::grid::IterationGrid;

/// Color of points that never escaped.
const INTERIOR: [u8; 4] = [0, 0, 0, 255];

/// Lookup table from escape count to RGBA, one entry per count in
/// `0..=max_iterations`.
///
/// Built once per iteration cap and shared read-only by the colorizing
/// workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    max_iterations: u32,
    colors: Vec<[u8; 4]>,
}

impl ColorTable {
    pub fn build(max_iterations: u32) -> Self {
        let colors = (0..=max_iterations)
            .map(|n| {
                if n == max_iterations {
                    INTERIOR
                } else {
                    gradient(n as f64 / max_iterations as f64)
                }
            })
            .collect();
        Self {
            max_iterations,
            colors,
        }
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Color for an escape count. Counts above the cap are treated as
    /// interior.
    #[inline]
    pub fn color_for(&self, iterations: u32) -> [u8; 4] {
        self.colors[iterations.min(self.max_iterations) as usize]
    }

    /// Colorize an entire grid into a fresh RGBA buffer.
    pub fn colorize(&self, grid: &IterationGrid) -> RenderBuffer {
        let mut buffer = RenderBuffer::new(grid.width(), grid.height());
        self.colorize_into(grid, &mut buffer);
        buffer
    }

    /// Colorize into an existing buffer, resizing it if needed.
    pub fn colorize_into(&self, grid: &IterationGrid, buffer: &mut RenderBuffer) {
        if (buffer.width, buffer.height) != (grid.width(), grid.height()) {
            *buffer = RenderBuffer::new(grid.width(), grid.height());
        }
        buffer
            .pixels
            .par_chunks_mut(4)
            .zip(grid.as_slice().par_iter())
            .for_each(|(pixel, &n)| pixel.copy_from_slice(&self.color_for(n)));
    }
}

/// Cubic blend of `t = n / max`: red peaks late, green mid-range, blue early.
///
/// Evaluated strictly left to right and truncated, so exported frames are
/// reproducible byte for byte.
fn gradient(t: f64) -> [u8; 4] {
    let r = 9.0 * (1.0 - t) * t * t * t * 255.0;
    let g = 15.0 * (1.0 - t) * (1.0 - t) * t * t * 255.0;
    let b = 8.5 * (1.0 - t) * (1.0 - t) * (1.0 - t) * t * 255.0;
    [r as u8, g as u8, b as u8, 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_an_entry_per_count() {
        let table = ColorTable::build(300);
        assert_eq!(table.colors.len(), 301);
        assert_eq!(table.max_iterations(), 300);
    }

    #[test]
    fn cap_is_black() {
        for cap in [1, 2, 50, 300] {
            assert_eq!(ColorTable::build(cap).color_for(cap), [0, 0, 0, 255]);
        }
    }

    #[test]
    fn zero_is_black_but_opaque() {
        assert_eq!(ColorTable::build(100).color_for(0), [0, 0, 0, 255]);
    }

    #[test]
    fn midpoint_matches_formula() {
        // t = 0.5: 9/16·255, 15/16·255, 8.5/16·255, truncated.
        assert_eq!(ColorTable::build(2).color_for(1), [143, 239, 135, 255]);
    }

    #[test]
    fn alpha_is_always_opaque() {
        let table = ColorTable::build(300);
        assert!((0..=300).all(|n| table.color_for(n)[3] == 255));
    }

    #[test]
    fn build_is_deterministic() {
        assert_eq!(ColorTable::build(300), ColorTable::build(300));
        assert_ne!(ColorTable::build(300), ColorTable::build(299));
    }

    #[test]
    fn out_of_range_counts_clamp_to_interior() {
        let table = ColorTable::build(10);
        assert_eq!(table.color_for(11), table.color_for(10));
    }

    #[test]
    fn colorize_maps_each_cell() {
        let table = ColorTable::build(2);
        let mut grid = IterationGrid::new(2, 2);
        grid.set(1, 0, 1);
        grid.set(0, 1, 2);
        let buffer = table.colorize(&grid);
        assert_eq!(buffer.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(buffer.pixel(1, 0), [143, 239, 135, 255]);
        assert_eq!(buffer.pixel(0, 1), [0, 0, 0, 255]);
    }

    #[test]
    fn colorize_into_resizes() {
        let table = ColorTable::build(4);
        let grid = IterationGrid::new(3, 2);
        let mut buffer = RenderBuffer::new(1, 1);
        table.colorize_into(&grid, &mut buffer);
        assert_eq!((buffer.width, buffer.height), (3, 2));
        assert_eq!(buffer.pixels.len(), 3 * 2 * 4);
    }
}
