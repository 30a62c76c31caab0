use crate::complex::Complex;

/// Affine transform between pixel indices and complex-plane points.
///
/// Derived from a [`Viewport`](crate::Viewport) on demand; it carries no
/// state of its own. `(0, 0)` is the top-left pixel and maps to
/// `(x_min, y_max)`: rows grow downward while the imaginary axis grows up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneMapper {
    x_origin: f64,
    x_step: f64,
    column_offset: i64,
    y_max: f64,
    y_step: f64,
    width: u32,
    height: u32,
}

impl PlaneMapper {
    pub(crate) fn new(
        x_origin: f64,
        x_step: f64,
        column_offset: i64,
        y_max: f64,
        y_step: f64,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            x_origin,
            x_step,
            column_offset,
            y_max,
            y_step,
            width,
            height,
        }
    }

    /// Real coordinate of pixel column `px`.
    ///
    /// Computed from the integer column index so that panning by whole
    /// columns reproduces identical values.
    #[inline]
    pub fn plane_x(&self, px: u32) -> f64 {
        self.x_origin + self.x_step * (self.column_offset + px as i64) as f64
    }

    /// Imaginary coordinate of pixel row `py`.
    #[inline]
    pub fn plane_y(&self, py: u32) -> f64 {
        self.y_max - self.y_step * py as f64
    }

    /// Map a pixel coordinate to a point on the complex plane.
    #[inline]
    pub fn pixel_to_plane(&self, px: u32, py: u32) -> Complex {
        Complex::new(self.plane_x(px), self.plane_y(py))
    }

    /// Map a plane point back to pixel indices, truncating toward zero.
    ///
    /// Points outside the viewport yield indices outside `0..width` /
    /// `0..height`; callers decide whether to clip.
    pub fn plane_to_pixel(&self, point: Complex) -> (i64, i64) {
        let x_min = self.plane_x(0);
        let x_range = self.x_step * self.width as f64;
        let y_range = self.y_step * self.height as f64;
        let px = (point.re - x_min) / x_range * self.width as f64;
        let py = (self.y_max - point.im) / y_range * self.height as f64;
        (px as i64, py as i64)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
