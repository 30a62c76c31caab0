pub mod complex;
pub mod error;
pub mod fractal;
pub mod mandelbrot;
pub mod navigation;
pub mod plane;
pub mod viewport;
pub mod zoom_path;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use error::CoreError;
pub use fractal::{Fractal, FractalParams};
pub use mandelbrot::Mandelbrot;
pub use navigation::{Intent, Navigator, ViewChange};
pub use plane::PlaneMapper;
pub use viewport::Viewport;
pub use zoom_path::{Waypoint, ZoomPath};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
