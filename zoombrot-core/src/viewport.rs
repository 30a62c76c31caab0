use crate::complex::Complex;
use crate::error::CoreError;
use crate::plane::PlaneMapper;

/// Defines the visible region of the complex plane and the pixel grid it
/// is mapped onto.
///
/// The x-range is stored as a base range plus a whole number of pixel
/// columns panned since the base was last set. Columns reached by panning
/// therefore map to exactly the same plane coordinates before and after the
/// pan, which is what lets the cache reuse shifted columns. Every
/// non-horizontal change folds the offset back into the base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    base_x_min: f64,
    base_x_max: f64,
    y_min: f64,
    y_max: f64,
    scale: f64,
    column_offset: i64,

    /// Grid width in pixels.
    pub width: u32,

    /// Grid height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Initial view: centred on the origin with a half-width of 2.
    pub fn default_for(width: u32, height: u32) -> crate::Result<Self> {
        Self::centered(Complex::ZERO, 2.0, width, height)
    }

    /// Create a viewport from explicit bounds.
    ///
    /// `scale` is derived as the half-width of the x-range.
    pub fn new(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        width: u32,
        height: u32,
    ) -> crate::Result<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidViewport {
                reason: format!("dimensions must be > 0, got {width}×{height}"),
            });
        }
        let finite = [x_min, x_max, y_min, y_max].iter().all(|v| v.is_finite());
        if !finite || x_max <= x_min || y_max <= y_min {
            return Err(CoreError::InvalidViewport {
                reason: format!(
                    "bounds must be finite and increasing, got x [{x_min}, {x_max}] y [{y_min}, {y_max}]"
                ),
            });
        }
        Ok(Self {
            base_x_min: x_min,
            base_x_max: x_max,
            y_min,
            y_max,
            scale: (x_max - x_min) / 2.0,
            column_offset: 0,
            width,
            height,
        })
    }

    /// Create a viewport centred on `center` with half-width `scale`.
    ///
    /// The y half-extent is `scale / aspect_ratio` so pixels stay square.
    pub fn centered(center: Complex, scale: f64, width: u32, height: u32) -> crate::Result<Self> {
        if scale <= 0.0 || !scale.is_finite() {
            return Err(CoreError::InvalidViewport {
                reason: format!("scale must be positive and finite, got {scale}"),
            });
        }
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidViewport {
                reason: format!("dimensions must be > 0, got {width}×{height}"),
            });
        }
        let y_scale = scale / (width as f64 / height as f64);
        Self::new(
            center.re - scale,
            center.re + scale,
            center.im - y_scale,
            center.im + y_scale,
            width,
            height,
        )
    }

    #[inline]
    pub fn x_min(&self) -> f64 {
        if self.column_offset == 0 {
            self.base_x_min
        } else {
            self.base_x_min + self.pixel_width() * self.column_offset as f64
        }
    }

    #[inline]
    pub fn x_max(&self) -> f64 {
        if self.column_offset == 0 {
            self.base_x_max
        } else {
            self.x_min() + (self.base_x_max - self.base_x_min)
        }
    }

    #[inline]
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    #[inline]
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Half-width of the x-range; the base of every navigation step.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Whole columns panned since the x bounds were last rebased.
    pub fn column_offset(&self) -> i64 {
        self.column_offset
    }

    /// Plane units spanned by one pixel column.
    #[inline]
    pub fn pixel_width(&self) -> f64 {
        (self.base_x_max - self.base_x_min) / self.width as f64
    }

    /// Plane units spanned by one pixel row.
    #[inline]
    pub fn pixel_height(&self) -> f64 {
        (self.y_max - self.y_min) / self.height as f64
    }

    pub fn center(&self) -> Complex {
        Complex::new(
            (self.x_min() + self.x_max()) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Magnification relative to a half-width of 1.
    pub fn zoom(&self) -> f64 {
        1.0 / self.scale
    }

    /// The aspect ratio of the pixel grid (width / height).
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Smallest scale at which a `width`-pixel view centred on `center`
    /// still has distinct f64 coordinates for every column.
    ///
    /// Below it `center.re ± scale` rounds onto too few values and the
    /// bounds collapse.
    pub fn min_scale(center: Complex, width: u32) -> f64 {
        let magnitude = center.re.abs().max(center.im.abs()).max(1.0);
        magnitude * f64::EPSILON * width as f64
    }

    /// Whether `scale` around `center` is above [`Viewport::min_scale`] for
    /// this grid.
    pub fn can_resolve(&self, center: Complex, scale: f64) -> bool {
        scale > Self::min_scale(center, self.width)
    }

    /// Pixel ↔ plane transform for the current bounds.
    pub fn mapper(&self) -> PlaneMapper {
        PlaneMapper::new(
            self.base_x_min,
            self.pixel_width(),
            self.column_offset,
            self.y_max,
            self.pixel_height(),
            self.width,
            self.height,
        )
    }

    /// Pan horizontally by whole pixel columns (`columns > 0` moves right).
    pub fn shift_columns(&mut self, columns: i64) {
        self.column_offset += columns;
    }

    /// Move the y-range by `dy` plane units.
    pub fn offset_y(&mut self, dy: f64) {
        self.rebase();
        self.y_min += dy;
        self.y_max += dy;
        self.debug_check();
    }

    /// Replace the bounds with a view centred on `center` at `scale`,
    /// keeping the grid dimensions.
    pub fn recenter(&mut self, center: Complex, scale: f64) {
        let y_scale = scale / self.aspect_ratio();
        self.base_x_min = center.re - scale;
        self.base_x_max = center.re + scale;
        self.y_min = center.im - y_scale;
        self.y_max = center.im + y_scale;
        self.scale = scale;
        self.column_offset = 0;
        self.debug_check();
    }

    /// Fold the column offset into the base x-range.
    fn rebase(&mut self) {
        if self.column_offset != 0 {
            let (lo, hi) = (self.x_min(), self.x_max());
            self.base_x_min = lo;
            self.base_x_max = hi;
            self.column_offset = 0;
        }
    }

    #[inline]
    fn debug_check(&self) {
        debug_assert!(
            self.base_x_max > self.base_x_min && self.y_max > self.y_min,
            "degenerate viewport: {self:?}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn default_viewport_matches_aspect() {
        let vp = Viewport::default_for(1920, 1080).unwrap();
        assert_eq!(vp.x_min(), -2.0);
        assert_eq!(vp.x_max(), 2.0);
        assert!((vp.y_max() - 2.0 * 1080.0 / 1920.0).abs() < EPSILON);
        assert!((vp.y_min() + vp.y_max()).abs() < EPSILON);
        assert_eq!(vp.scale(), 2.0);
        assert!((vp.aspect_ratio() - 1920.0 / 1080.0).abs() < EPSILON);
    }

    #[test]
    fn explicit_bounds_derive_scale() {
        let vp = Viewport::new(-2.0, 2.0, -2.0, 2.0, 4, 4).unwrap();
        assert_eq!(vp.scale(), 2.0);
        assert_eq!(vp.pixel_width(), 1.0);
        assert_eq!(vp.pixel_height(), 1.0);
        assert_eq!(vp.center(), Complex::ZERO);
    }

    #[test]
    fn invalid_dimensions() {
        assert!(Viewport::new(-1.0, 1.0, -1.0, 1.0, 0, 10).is_err());
        assert!(Viewport::new(-1.0, 1.0, -1.0, 1.0, 10, 0).is_err());
    }

    #[test]
    fn invalid_bounds() {
        assert!(Viewport::new(1.0, 1.0, -1.0, 1.0, 10, 10).is_err());
        assert!(Viewport::new(-1.0, 1.0, 2.0, 1.0, 10, 10).is_err());
        assert!(Viewport::new(f64::NAN, 1.0, -1.0, 1.0, 10, 10).is_err());
    }

    #[test]
    fn invalid_scale() {
        assert!(Viewport::centered(Complex::ZERO, 0.0, 10, 10).is_err());
        assert!(Viewport::centered(Complex::ZERO, -1.0, 10, 10).is_err());
        assert!(Viewport::centered(Complex::ZERO, f64::INFINITY, 10, 10).is_err());
    }

    #[test]
    fn column_shift_moves_bounds_by_whole_pixels() {
        let mut vp = Viewport::new(-2.0, 2.0, -1.0, 1.0, 8, 4).unwrap();
        vp.shift_columns(-3);
        assert_eq!(vp.x_min(), -3.5);
        assert_eq!(vp.x_max(), 0.5);
        assert_eq!(vp.scale(), 2.0);
        assert_eq!(vp.column_offset(), -3);
    }

    #[test]
    fn vertical_offset_rebases_columns() {
        let mut vp = Viewport::new(-2.0, 2.0, -1.0, 1.0, 8, 4).unwrap();
        vp.shift_columns(2);
        vp.offset_y(0.5);
        assert_eq!(vp.column_offset(), 0);
        assert_eq!(vp.x_min(), -1.0);
        assert_eq!(vp.x_max(), 3.0);
        assert_eq!(vp.y_min(), -0.5);
        assert_eq!(vp.y_max(), 1.5);
    }

    #[test]
    fn min_scale_keeps_columns_distinct() {
        let center = Complex::new(-0.7436438870371587, 0.1318259042053119);
        let floor = Viewport::min_scale(center, 64);
        assert_eq!(floor, 64.0 * f64::EPSILON);
        // Far from the origin the floor grows with the coordinate size.
        assert_eq!(Viewport::min_scale(Complex::new(0.0, -8.0), 10), 80.0 * f64::EPSILON);

        let vp = Viewport::centered(center, floor * 1.01, 64, 36).unwrap();
        let m = vp.mapper();
        for px in 1..64 {
            assert!(m.plane_x(px) > m.plane_x(px - 1), "column {px} collapsed");
        }
        assert!(vp.can_resolve(center, floor * 1.01));
        assert!(!vp.can_resolve(center, floor));
    }

    #[test]
    fn recenter_keeps_square_pixels() {
        let mut vp = Viewport::default_for(200, 100).unwrap();
        vp.shift_columns(7);
        vp.recenter(Complex::new(-0.5, 0.25), 0.5);
        assert_eq!(vp.column_offset(), 0);
        assert!((vp.center().re + 0.5).abs() < EPSILON);
        assert!((vp.center().im - 0.25).abs() < EPSILON);
        assert!((vp.pixel_width() - vp.pixel_height()).abs() < EPSILON);
        assert!((vp.zoom() - 2.0).abs() < EPSILON);
    }
}
