pub mod bands;
pub mod buffer;
pub mod cache;
pub mod engine;
pub mod error;
pub mod export;
pub mod grid;
pub mod palette;

pub use bands::row_bands;
pub use buffer::RenderBuffer;
pub use cache::{CacheState, Reconciled, ViewportCache};
pub use engine::GridEngine;
pub use error::RenderError;
pub use export::{export_png, FrameMetadata, FrameSink, PngSequence};
pub use grid::IterationGrid;
pub use palette::ColorTable;

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
