use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::CoreError;
use crate::viewport::Viewport;

/// A discrete navigation request, delivered once per tick by whatever
/// polls the input devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    ZoomIn,
    ZoomOut,
    ToggleRecording,
}

/// How a viewport mutation relates to the previously computed grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewChange {
    /// Nothing moved.
    Unchanged,
    /// Pure horizontal pan by whole columns. Positive means the grid
    /// content moves right (the view moved left), exposing the left edge.
    Columns(i64),
    /// Anything else: zoom, vertical pan, jump.
    Other,
}

/// Turns intents into viewport mutations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Navigator {
    /// Pan distance per tick, as a fraction of the viewport scale.
    pub linear_step: f64,
    /// Relative scale change per zoom tick.
    pub zoom_speed: f64,
}

impl Navigator {
    pub const DEFAULT_LINEAR_STEP: f64 = 0.1;
    pub const DEFAULT_ZOOM_SPEED: f64 = 0.05;

    pub fn new(linear_step: f64, zoom_speed: f64) -> crate::Result<Self> {
        if linear_step <= 0.0 || !linear_step.is_finite() {
            return Err(CoreError::InvalidNavigation {
                reason: format!("linear step must be positive, got {linear_step}"),
            });
        }
        if zoom_speed <= 0.0 || zoom_speed >= 1.0 || zoom_speed.is_nan() {
            return Err(CoreError::InvalidNavigation {
                reason: format!("zoom speed must lie in (0, 1), got {zoom_speed}"),
            });
        }
        Ok(Self {
            linear_step,
            zoom_speed,
        })
    }

    /// Columns covered by one horizontal pan at the current scale.
    ///
    /// `linear_step * scale` snapped to whole pixels, never less than one.
    pub fn pan_columns(&self, viewport: &Viewport) -> i64 {
        let columns = (self.linear_step * viewport.scale() / viewport.pixel_width()).round();
        (columns as i64).max(1)
    }

    /// Apply a single intent to `viewport` and report what kind of change
    /// it was. `ToggleRecording` is not a viewport change.
    pub fn apply(&self, viewport: &mut Viewport, intent: Intent) -> ViewChange {
        let step = self.linear_step * viewport.scale();
        let change = match intent {
            Intent::PanLeft => {
                let columns = self.pan_columns(viewport);
                viewport.shift_columns(-columns);
                ViewChange::Columns(columns)
            }
            Intent::PanRight => {
                let columns = self.pan_columns(viewport);
                viewport.shift_columns(columns);
                ViewChange::Columns(-columns)
            }
            Intent::PanUp => {
                viewport.offset_y(step);
                ViewChange::Other
            }
            Intent::PanDown => {
                viewport.offset_y(-step);
                ViewChange::Other
            }
            Intent::ZoomIn => self.zoom(viewport, 1.0 - self.zoom_speed),
            Intent::ZoomOut => self.zoom(viewport, 1.0 + self.zoom_speed),
            Intent::ToggleRecording => ViewChange::Unchanged,
        };
        trace!(?intent, ?change, scale = viewport.scale(), "Applied intent");
        change
    }

    /// Multiply the scale by `factor` around the unchanged midpoint.
    ///
    /// A zoom that would go below [`Viewport::min_scale`] is refused.
    fn zoom(&self, viewport: &mut Viewport, factor: f64) -> ViewChange {
        let center = viewport.center();
        let scale = viewport.scale() * factor;
        if !viewport.can_resolve(center, scale) {
            warn!(scale, "Zoom refused at the limit of f64 precision");
            return ViewChange::Unchanged;
        }
        viewport.recenter(center, scale);
        ViewChange::Other
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            linear_step: Self::DEFAULT_LINEAR_STEP,
            zoom_speed: Self::DEFAULT_ZOOM_SPEED,
        }
    }
}
