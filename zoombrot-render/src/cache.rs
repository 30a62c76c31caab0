use std::time::Instant;

use tracing::debug;

use zoombrot_core::{Fractal, ViewChange, Viewport};

use crate::engine::GridEngine;
use crate::grid::IterationGrid;

/// Whether the cached grid still describes the current viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Contents are stale; the next reconcile recomputes everything.
    Invalid,
    /// Contents match the viewport.
    Valid,
    /// Contents match the viewport once shifted by this many columns.
    /// Positive moves content right.
    Shifted(i64),
}

/// What a [`ViewportCache::reconcile`] call had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    Full,
    Edge { columns: u32 },
    Unchanged,
}

/// Owns the iteration grid and decides how much of it to recompute when
/// the viewport changes.
///
/// Pure horizontal pans only recompute the exposed edge columns; anything
/// else recomputes the whole grid. Both paths produce identical grids.
#[derive(Debug)]
pub struct ViewportCache {
    grid: IterationGrid,
    state: CacheState,
    engine: GridEngine,
}

impl ViewportCache {
    pub fn new(width: u32, height: u32, engine: GridEngine) -> Self {
        Self {
            grid: IterationGrid::new(width, height),
            state: CacheState::Invalid,
            engine,
        }
    }

    pub fn state(&self) -> CacheState {
        self.state
    }

    pub fn grid(&self) -> &IterationGrid {
        &self.grid
    }

    pub fn engine(&self) -> &GridEngine {
        &self.engine
    }

    /// Force a full recompute on the next reconcile.
    pub fn invalidate(&mut self) {
        self.state = CacheState::Invalid;
    }

    /// Record a viewport change reported by navigation.
    pub fn notify(&mut self, change: ViewChange) {
        let columns = match change {
            ViewChange::Unchanged => return,
            ViewChange::Other => {
                self.state = CacheState::Invalid;
                return;
            }
            ViewChange::Columns(columns) => columns,
        };
        let offset = match self.state {
            CacheState::Invalid => return,
            CacheState::Valid => columns,
            CacheState::Shifted(offset) => offset + columns,
        };
        self.state = if offset == 0 {
            CacheState::Valid
        } else if offset.unsigned_abs() >= u64::from(self.grid.width()) {
            // Every column has scrolled off.
            CacheState::Invalid
        } else {
            CacheState::Shifted(offset)
        };
    }

    /// Bring the grid up to date with `viewport`. Called once per render.
    pub fn reconcile<F: Fractal + Sync>(
        &mut self,
        fractal: &F,
        viewport: &Viewport,
    ) -> Reconciled {
        if (self.grid.width(), self.grid.height()) != (viewport.width, viewport.height) {
            debug!(
                width = viewport.width,
                height = viewport.height,
                "Resizing iteration grid"
            );
            self.grid.resize(viewport.width, viewport.height);
            self.state = CacheState::Invalid;
        }

        let start = Instant::now();
        let outcome = match self.state {
            CacheState::Valid => return Reconciled::Unchanged,
            CacheState::Invalid => {
                self.engine.compute_full(fractal, viewport, &mut self.grid);
                Reconciled::Full
            }
            CacheState::Shifted(offset) => {
                let width = self.grid.width();
                let exposed = offset.unsigned_abs() as u32;
                let columns = if offset > 0 {
                    0..exposed
                } else {
                    width - exposed..width
                };
                self.grid.shift_columns(offset);
                self.engine.compute_region(
                    fractal,
                    viewport,
                    columns,
                    0..viewport.height,
                    &mut self.grid,
                );
                Reconciled::Edge { columns: exposed }
            }
        };
        self.state = CacheState::Valid;

        debug!(
            ?outcome,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Reconciled viewport cache"
        );
        outcome
    }
}
