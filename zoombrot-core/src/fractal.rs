use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;

/// Parameters controlling escape-time iteration.
///
/// The escape radius is fixed at 2, so only the iteration cap is
/// configurable. A count equal to the cap means "did not escape".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FractalParams {
    /// Maximum number of iterations before declaring a point interior.
    pub max_iterations: u32,
}

impl FractalParams {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 300;

    /// Squared escape radius compared against `|z|²` in the inner loop.
    pub const ESCAPE_RADIUS_SQ: f64 = 4.0;

    pub fn new(max_iterations: u32) -> crate::Result<Self> {
        if max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(max_iterations));
        }
        Ok(Self { max_iterations })
    }
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// An escape-time evaluator.
///
/// Designed for **static dispatch**: the grid engine is generic over
/// `F: Fractal` so the compiler can inline the hot iteration loop.
pub trait Fractal {
    /// Iterate a single plane point and return its escape count, in
    /// `0..=max_iterations`.
    fn iterate(&self, point: Complex) -> u32;

    /// Access the iteration parameters.
    fn params(&self) -> &FractalParams;

    #[inline]
    fn max_iterations(&self) -> u32 {
        self.params().max_iterations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params() {
        assert_eq!(FractalParams::default().max_iterations, 300);
    }

    #[test]
    fn invalid_max_iterations() {
        assert!(FractalParams::new(0).is_err());
        assert_eq!(FractalParams::new(50).unwrap().max_iterations, 50);
    }

    #[test]
    fn params_round_trip_through_json() {
        let p = FractalParams::new(123).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"max_iterations":123}"#);
        let back: FractalParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
