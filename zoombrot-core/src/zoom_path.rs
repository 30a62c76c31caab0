use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::complex::Complex;
use crate::error::CoreError;
use crate::navigation::ViewChange;
use crate::viewport::Viewport;

/// One step of a scripted zoom: where to centre the view, and how much to
/// shrink the scale once the frame at this step has been produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub target: Complex,
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,
}

fn default_scale_factor() -> f64 {
    ZoomPath::DEFAULT_DECAY
}

/// An ordered sequence of waypoints consumed one per recorded frame.
///
/// Exhaustion is the normal end of a recording, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomPath {
    waypoints: Vec<Waypoint>,
    cursor: usize,
}

impl ZoomPath {
    /// A point on the boundary with detail at every depth f64 can reach.
    pub const DEFAULT_TARGET: Complex =
        Complex::new(-0.743643887037158704752191506114774, 0.131825904205311970493132056385139);
    pub const DEFAULT_STEPS: usize = 10_000;
    pub const DEFAULT_DECAY: f64 = 0.99;

    pub fn new(waypoints: Vec<Waypoint>) -> crate::Result<Self> {
        if waypoints.is_empty() {
            return Err(CoreError::InvalidZoomPath {
                reason: "path has no waypoints".into(),
            });
        }
        for (i, wp) in waypoints.iter().enumerate() {
            if !wp.target.is_finite() {
                return Err(CoreError::InvalidZoomPath {
                    reason: format!("waypoint {i} has a non-finite target {}", wp.target),
                });
            }
            if wp.scale_factor <= 0.0 || !wp.scale_factor.is_finite() {
                return Err(CoreError::InvalidZoomPath {
                    reason: format!("waypoint {i} has scale factor {}", wp.scale_factor),
                });
            }
        }
        Ok(Self {
            waypoints,
            cursor: 0,
        })
    }

    /// `steps` identical waypoints: a straight dive into `target`.
    pub fn fixed_target(target: Complex, steps: usize, decay: f64) -> crate::Result<Self> {
        Self::new(vec![
            Waypoint {
                target,
                scale_factor: decay,
            };
            steps
        ])
    }

    /// `steps` waypoints moving linearly from `from` to `to` while zooming.
    pub fn linear(from: Complex, to: Complex, steps: usize, decay: f64) -> crate::Result<Self> {
        let last = steps.saturating_sub(1).max(1) as f64;
        let delta = to - from;
        let waypoints = (0..steps)
            .map(|i| {
                let t = i as f64 / last;
                Waypoint {
                    target: from + Complex::new(delta.re * t, delta.im * t),
                    scale_factor: decay,
                }
            })
            .collect();
        Self::new(waypoints)
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Index of the next waypoint to be consumed.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.waypoints.len() - self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.waypoints.len()
    }

    /// Start again from the first waypoint.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Move `viewport` to the next waypoint and advance the cursor.
    ///
    /// The previous waypoint's scale factor is applied first, so the first
    /// frame is taken at the scale the recording started with. Returns
    /// `None` once the path is exhausted, or once the next scale falls to
    /// [`Viewport::min_scale`] around its target. The latter also finishes
    /// the path.
    pub fn advance(&mut self, viewport: &mut Viewport) -> Option<ViewChange> {
        let waypoint = *self.waypoints.get(self.cursor)?;
        let scale = match self.cursor.checked_sub(1) {
            Some(prev) => viewport.scale() * self.waypoints[prev].scale_factor,
            None => viewport.scale(),
        };
        if !viewport.can_resolve(waypoint.target, scale) {
            warn!(
                step = self.cursor,
                scale,
                "Zoom path stopped at the limit of f64 precision"
            );
            self.cursor = self.waypoints.len();
            return None;
        }
        viewport.recenter(waypoint.target, scale);
        self.cursor += 1;
        Some(ViewChange::Other)
    }
}
