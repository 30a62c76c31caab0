/// Per-pixel escape counts for a full frame, row-major.
///
/// This is the raw output of the engine before coloring. The grid is owned
/// by the [`ViewportCache`](crate::ViewportCache); the engine only writes
/// into it through disjoint row slices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationGrid {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

impl IterationGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.data[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: u32) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// All counts in row-major order.
    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u32] {
        &mut self.data
    }

    /// Reallocate for new dimensions. Contents are reset to zero.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.data = vec![0; width as usize * height as usize];
    }

    /// Shift every row by `offset` columns, preserving overlapping data.
    ///
    /// `offset > 0` moves content right (left edge exposed), `offset < 0`
    /// moves it left. Exposed columns are zeroed; the caller recomputes them.
    pub fn shift_columns(&mut self, offset: i64) {
        let w = self.width as usize;
        if offset == 0 || w == 0 {
            return;
        }
        let n = offset.unsigned_abs().min(w as u64) as usize;
        for row in self.data.chunks_exact_mut(w) {
            if offset > 0 {
                row.copy_within(0..w - n, n);
                row[..n].fill(0);
            } else {
                row.copy_within(n..w, 0);
                row[w - n..].fill(0);
            }
        }
    }
}
