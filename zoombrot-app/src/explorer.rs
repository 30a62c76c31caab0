use thiserror::Error;
use tracing::{debug, info};

use zoombrot_core::{CoreError, Fractal, Intent, Mandelbrot, Navigator, Viewport, ZoomPath};
use zoombrot_render::{
    ColorTable, FrameMetadata, FrameSink, Reconciled, RenderBuffer, RenderError, ViewportCache,
};

use crate::settings::RecorderSettings;

/// Log a progress line every this many recorded frames.
const PROGRESS_INTERVAL: u64 = 100;

#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("invalid settings: {0}")]
    Settings(#[from] CoreError),
    #[error("failed to export frame {index}")]
    Export {
        index: u64,
        #[source]
        source: RenderError,
    },
}

/// Receives the colorized frame once per tick.
pub trait Presenter {
    fn present(&mut self, frame: &RenderBuffer, viewport: &Viewport);
}

/// Presenter for headless runs: keeps the status line in the debug log.
#[derive(Debug, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn present(&mut self, _frame: &RenderBuffer, viewport: &Viewport) {
        let center = viewport.center();
        debug!("Zoom: {:.3e}, Center: {center}", viewport.zoom());
    }
}

/// Outcome of a single [`Explorer::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub reconciled: Reconciled,
    /// Index of the frame exported during this tick, if any.
    pub exported: Option<u64>,
    pub recording: bool,
}

/// One interactive session: viewport, cached grid, colors and the
/// recording state, advanced one tick at a time.
pub struct Explorer<S: FrameSink> {
    fractal: Mandelbrot,
    viewport: Viewport,
    navigator: Navigator,
    cache: ViewportCache,
    colors: ColorTable,
    frame: RenderBuffer,
    path: ZoomPath,
    sink: S,
    recording: bool,
    frame_index: u64,
}

impl<S: FrameSink> Explorer<S> {
    pub fn new(
        fractal: Mandelbrot,
        viewport: Viewport,
        navigator: Navigator,
        cache: ViewportCache,
        path: ZoomPath,
        sink: S,
    ) -> Self {
        let colors = ColorTable::build(fractal.max_iterations());
        let frame = RenderBuffer::new(viewport.width, viewport.height);
        Self {
            fractal,
            viewport,
            navigator,
            cache,
            colors,
            frame,
            path,
            sink,
            recording: false,
            frame_index: 0,
        }
    }

    pub fn from_settings(settings: &RecorderSettings, sink: S) -> Result<Self, RecorderError> {
        let viewport = settings.viewport()?;
        let cache = ViewportCache::new(viewport.width, viewport.height, settings.engine());
        Ok(Self::new(
            settings.fractal()?,
            viewport,
            settings.navigator()?,
            cache,
            settings.zoom_path.build()?,
            sink,
        ))
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[cfg(test)]
    pub fn frame(&self) -> &RenderBuffer {
        &self.frame
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Frames exported since recording last started.
    pub fn frames_recorded(&self) -> u64 {
        self.frame_index
    }

    pub fn path(&self) -> &ZoomPath {
        &self.path
    }

    /// Run one render tick.
    ///
    /// While recording, the zoom path drives the viewport and any manual
    /// navigation in `intents` is ignored. An export failure stops the
    /// recording and is returned.
    pub fn tick<P: Presenter>(
        &mut self,
        intents: &[Intent],
        presenter: &mut P,
    ) -> Result<TickReport, RecorderError> {
        for _ in intents.iter().filter(|&&i| i == Intent::ToggleRecording) {
            self.toggle_recording();
        }

        if self.recording {
            match self.path.advance(&mut self.viewport) {
                Some(change) => self.cache.notify(change),
                None => self.stop_recording("zoom path ended"),
            }
        } else {
            for &intent in intents {
                let change = self.navigator.apply(&mut self.viewport, intent);
                self.cache.notify(change);
            }
        }

        let reconciled = self.cache.reconcile(&self.fractal, &self.viewport);
        self.colors.colorize_into(self.cache.grid(), &mut self.frame);
        presenter.present(&self.frame, &self.viewport);

        let exported = if self.recording {
            Some(self.export_frame()?)
        } else {
            None
        };

        Ok(TickReport {
            reconciled,
            exported,
            recording: self.recording,
        })
    }

    fn export_frame(&mut self) -> Result<u64, RecorderError> {
        let index = self.frame_index;
        let metadata = FrameMetadata::from_viewport(&self.viewport, self.fractal.max_iterations());
        if let Err(source) = self.sink.write_frame(index, &self.frame, &metadata) {
            self.stop_recording("export failed");
            return Err(RecorderError::Export { index, source });
        }
        self.frame_index += 1;

        if self.frame_index % PROGRESS_INTERVAL == 0 {
            info!(
                frames = self.frame_index,
                remaining = self.path.remaining(),
                "Zoom: {:.3e}, Center: {}",
                self.viewport.zoom(),
                self.viewport.center()
            );
        }
        if self.path.is_finished() {
            self.stop_recording("zoom path complete");
        }
        Ok(index)
    }

    fn toggle_recording(&mut self) {
        if self.recording {
            self.stop_recording("stopped by request");
        } else {
            self.frame_index = 0;
            self.path.rewind();
            self.recording = true;
            info!(waypoints = self.path.len(), "Recording started");
        }
    }

    fn stop_recording(&mut self, reason: &str) {
        self.recording = false;
        info!(frames = self.frame_index, reason, "Recording stopped");
    }
}
