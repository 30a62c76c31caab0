use std::path::PathBuf;

use thiserror::Error;

/// Errors originating from the rendering and export pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("buffer of {actual} bytes does not hold a {width}×{height} RGBA frame")]
    BufferSize { width: u32, height: u32, actual: usize },
}
