//! PNG frame export with embedded view metadata (tEXt chunks).

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use zoombrot_core::Viewport;

use crate::buffer::RenderBuffer;
use crate::error::RenderError;

/// View parameters embedded in every exported frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameMetadata {
    pub center_re: f64,
    pub center_im: f64,
    pub scale: f64,
    pub max_iterations: u32,
}

impl FrameMetadata {
    pub fn from_viewport(viewport: &Viewport, max_iterations: u32) -> Self {
        let center = viewport.center();
        Self {
            center_re: center.re,
            center_im: center.im,
            scale: viewport.scale(),
            max_iterations,
        }
    }
}

/// Destination for recorded frames, one call per animation step.
pub trait FrameSink {
    fn write_frame(
        &mut self,
        index: u64,
        frame: &RenderBuffer,
        metadata: &FrameMetadata,
    ) -> crate::Result<()>;
}

/// Writes `frame_NNNN.png` files into a directory created on first use.
#[derive(Debug, Clone)]
pub struct PngSequence {
    dir: PathBuf,
    dir_ready: bool,
}

impl PngSequence {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            dir_ready: false,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file for frame `index`.
    pub fn frame_path(&self, index: u64) -> PathBuf {
        self.dir.join(format!("frame_{index:04}.png"))
    }
}

impl FrameSink for PngSequence {
    fn write_frame(
        &mut self,
        index: u64,
        frame: &RenderBuffer,
        metadata: &FrameMetadata,
    ) -> crate::Result<()> {
        if !self.dir_ready {
            std::fs::create_dir_all(&self.dir).map_err(|source| RenderError::Io {
                path: self.dir.clone(),
                source,
            })?;
            info!("Writing frames to {}", self.dir.display());
            self.dir_ready = true;
        }
        export_png(frame, &self.frame_path(index), metadata)
    }
}

/// Write an RGBA frame as a PNG file with embedded view metadata.
///
/// Uses the `png` crate directly so custom tEXt chunks can be added.
pub fn export_png(
    frame: &RenderBuffer,
    path: &Path,
    metadata: &FrameMetadata,
) -> crate::Result<()> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.pixels.len() != expected {
        return Err(RenderError::BufferSize {
            width: frame.width,
            height: frame.height,
            actual: frame.pixels.len(),
        });
    }

    let file = File::create(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), frame.width, frame.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder.add_text_chunk("Software".to_string(), "Zoombrot".to_string())?;
    encoder.add_text_chunk("Description".to_string(), build_description(metadata))?;
    for (key, value) in build_metadata_pairs(metadata) {
        encoder.add_text_chunk(key, value)?;
    }

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&frame.pixels)?;
    writer.finish()?;

    debug!("Exported PNG {}x{} to {}", frame.width, frame.height, path.display());
    Ok(())
}

fn build_description(meta: &FrameMetadata) -> String {
    format!(
        "Mandelbrot - Center: {} {:+}i, Zoom: {}, Iterations: {}",
        meta.center_re,
        meta.center_im,
        1.0 / meta.scale,
        meta.max_iterations,
    )
}

fn build_metadata_pairs(meta: &FrameMetadata) -> Vec<(String, String)> {
    vec![
        ("Zoombrot.CenterRe".into(), meta.center_re.to_string()),
        ("Zoombrot.CenterIm".into(), meta.center_im.to_string()),
        ("Zoombrot.Scale".into(), meta.scale.to_string()),
        ("Zoombrot.MaxIterations".into(), meta.max_iterations.to_string()),
    ]
}
