use crate::complex::Complex;
use crate::fractal::{Fractal, FractalParams};

/// The Mandelbrot set: `z_{n+1} = z_n² + c`.
///
/// The orbit is seeded with `z₀ = c` and the count starts at zero. Each
/// pass first checks `|z|² ≤ 4`, then performs one step and increments the
/// count, so:
///
/// - `|c| > 2` returns 0 (no step is taken),
/// - `c = 2` returns 1 (`|2|² = 4` is not beyond the radius, `z₁ = 6` is),
/// - a bounded orbit returns `max_iterations`.
#[derive(Debug, Clone)]
pub struct Mandelbrot {
    params: FractalParams,
}

impl Mandelbrot {
    pub fn new(params: FractalParams) -> Self {
        Self { params }
    }
}

impl Default for Mandelbrot {
    fn default() -> Self {
        Self::new(FractalParams::default())
    }
}

/// Returns `true` if `c` lies inside the main cardioid.
///
/// Those orbits never escape, so skipping them leaves every count unchanged.
#[inline]
fn in_cardioid(re: f64, im: f64) -> bool {
    let im2 = im * im;
    let q = (re - 0.25) * (re - 0.25) + im2;
    q * (q + (re - 0.25)) <= 0.25 * im2
}

/// Returns `true` if `c` lies inside the period-2 bulb.
#[inline]
fn in_period2_bulb(re: f64, im: f64) -> bool {
    (re + 1.0) * (re + 1.0) + im * im <= 0.0625
}

impl Fractal for Mandelbrot {
    fn iterate(&self, c: Complex) -> u32 {
        let max_iter = self.params.max_iterations;
        if in_cardioid(c.re, c.im) || in_period2_bulb(c.re, c.im) {
            return max_iter;
        }

        let (mut x, mut y) = (c.re, c.im);
        let (mut x2, mut y2) = (x * x, y * y);
        let mut n = 0;
        while x2 + y2 <= FractalParams::ESCAPE_RADIUS_SQ && n < max_iter {
            y = 2.0 * x * y + c.im;
            x = x2 - y2 + c.re;
            x2 = x * x;
            y2 = y * y;
            n += 1;
        }
        n
    }

    fn params(&self) -> &FractalParams {
        &self.params
    }
}
