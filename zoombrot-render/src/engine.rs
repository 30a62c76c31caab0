use std::ops::Range;
use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use zoombrot_core::{Complex, Fractal, Viewport};

use crate::bands::row_bands;
use crate::grid::IterationGrid;

/// Fills an [`IterationGrid`] by fanning row bands out over the rayon pool.
///
/// Each worker receives its own mutable row slice, so bands can never write
/// the same cell. Every call blocks until all bands have finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridEngine {
    workers: usize,
}

impl GridEngine {
    /// An engine splitting work into `workers` bands (at least one).
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// One band per thread of the global rayon pool, which rayon sizes to
    /// the available hardware parallelism.
    pub fn with_available_parallelism() -> Self {
        Self::new(rayon::current_num_threads())
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Evaluate every cell of the grid.
    pub fn compute_full<F: Fractal + Sync>(
        &self,
        fractal: &F,
        viewport: &Viewport,
        grid: &mut IterationGrid,
    ) {
        self.compute_region(fractal, viewport, 0..viewport.width, 0..viewport.height, grid);
    }

    /// Evaluate the half-open rectangle `columns × rows` into `grid`.
    ///
    /// The rows are partitioned with [`row_bands`]; cells outside the
    /// rectangle are left untouched.
    pub fn compute_region<F: Fractal + Sync>(
        &self,
        fractal: &F,
        viewport: &Viewport,
        columns: Range<u32>,
        rows: Range<u32>,
        grid: &mut IterationGrid,
    ) {
        debug_assert_eq!(
            (grid.width(), grid.height()),
            (viewport.width, viewport.height),
            "grid does not match the viewport"
        );
        debug_assert!(columns.end <= grid.width() && rows.end <= grid.height());
        if columns.is_empty() || rows.is_empty() {
            return;
        }

        let start = Instant::now();
        let mapper = viewport.mapper();
        let width = grid.width() as usize;
        let bands = row_bands(rows.clone(), self.workers);
        let band_count = bands.len();

        let mut rest =
            &mut grid.as_mut_slice()[rows.start as usize * width..rows.end as usize * width];
        let mut slices = Vec::with_capacity(band_count);
        for band in bands {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(band.len() * width);
            slices.push((band, head));
            rest = tail;
        }

        slices.into_par_iter().for_each(|(band, cells)| {
            for (y, row) in band.zip(cells.chunks_exact_mut(width)) {
                let im = mapper.plane_y(y);
                for x in columns.clone() {
                    row[x as usize] = fractal.iterate(Complex::new(mapper.plane_x(x), im));
                }
            }
        });

        debug!(
            columns = ?columns,
            rows = ?rows,
            bands = band_count,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Computed region"
        );
    }
}

impl Default for GridEngine {
    fn default() -> Self {
        Self::with_available_parallelism()
    }
}
