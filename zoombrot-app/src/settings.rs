use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use zoombrot_core::{Complex, FractalParams, Mandelbrot, Navigator, Viewport, Waypoint, ZoomPath};
use zoombrot_render::GridEngine;

// ---------------------------------------------------------------------------
// Zoom path
// ---------------------------------------------------------------------------

/// How the recording moves through the plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathSettings {
    /// Repeatedly recenter on one target while the scale decays.
    Dive {
        #[serde(default = "default_target")]
        target: Complex,
        #[serde(default = "default_steps")]
        steps: usize,
        #[serde(default = "default_decay")]
        decay: f64,
    },
    /// Explicit per-frame waypoints.
    Waypoints { waypoints: Vec<Waypoint> },
}

impl Default for PathSettings {
    fn default() -> Self {
        Self::Dive {
            target: default_target(),
            steps: default_steps(),
            decay: default_decay(),
        }
    }
}

impl PathSettings {
    pub fn build(&self) -> zoombrot_core::Result<ZoomPath> {
        match self {
            Self::Dive {
                target,
                steps,
                decay,
            } => ZoomPath::fixed_target(*target, *steps, *decay),
            Self::Waypoints { waypoints } => ZoomPath::new(waypoints.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Recorder settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecorderSettings {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Pan distance per intent, as a fraction of the scale.
    #[serde(default = "default_linear_step")]
    pub linear_step: f64,
    /// Relative scale change per zoom intent.
    #[serde(default = "default_zoom_speed")]
    pub zoom_speed: f64,
    /// Half-width of the initial view in plane units.
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub center: Complex,
    #[serde(default)]
    pub zoom_path: PathSettings,
    /// Where frames are written. When unset, a `frames/` folder next to the executable is used.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Row bands per recompute; 0 uses every hardware thread.
    #[serde(default)]
    pub workers: usize,
}

fn default_width() -> u32 {
    1920
}
fn default_height() -> u32 {
    1080
}
fn default_max_iterations() -> u32 {
    FractalParams::DEFAULT_MAX_ITERATIONS
}
fn default_linear_step() -> f64 {
    Navigator::DEFAULT_LINEAR_STEP
}
fn default_zoom_speed() -> f64 {
    Navigator::DEFAULT_ZOOM_SPEED
}
fn default_scale() -> f64 {
    2.0
}
fn default_target() -> Complex {
    ZoomPath::DEFAULT_TARGET
}
fn default_steps() -> usize {
    ZoomPath::DEFAULT_STEPS
}
fn default_decay() -> f64 {
    ZoomPath::DEFAULT_DECAY
}

impl Default for RecorderSettings {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            max_iterations: default_max_iterations(),
            linear_step: default_linear_step(),
            zoom_speed: default_zoom_speed(),
            scale: default_scale(),
            center: Complex::ZERO,
            zoom_path: PathSettings::default(),
            output_dir: None,
            workers: 0,
        }
    }
}

impl RecorderSettings {
    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or unusable.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(json) => match serde_json::from_str::<RecorderSettings>(&json) {
                    Ok(settings) => {
                        info!("Loaded settings from {}", path.display());
                        return settings;
                    }
                    Err(e) => {
                        error!("Failed to parse settings: {e}");
                    }
                },
                Err(e) => {
                    error!("Failed to read settings file: {e}");
                }
            }
        } else {
            debug!("No settings file at {}", path.display());
        }
        Self::default()
    }

    pub fn fractal(&self) -> zoombrot_core::Result<Mandelbrot> {
        Ok(Mandelbrot::new(FractalParams::new(self.max_iterations)?))
    }

    pub fn viewport(&self) -> zoombrot_core::Result<Viewport> {
        Viewport::centered(self.center, self.scale, self.width, self.height)
    }

    pub fn navigator(&self) -> zoombrot_core::Result<Navigator> {
        Navigator::new(self.linear_step, self.zoom_speed)
    }

    pub fn engine(&self) -> GridEngine {
        match self.workers {
            0 => GridEngine::with_available_parallelism(),
            n => GridEngine::new(n),
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(crate::app_dir::frames_directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let settings: RecorderSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, RecorderSettings::default());
        assert_eq!((settings.width, settings.height), (1920, 1080));
        assert_eq!(settings.max_iterations, 300);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let json = r#"{
            "width": 64,
            "zoom_path": { "kind": "dive", "steps": 12 },
            "output_dir": "out"
        }"#;
        let settings: RecorderSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.width, 64);
        assert_eq!(settings.height, 1080);
        assert_eq!(settings.output_dir(), PathBuf::from("out"));
        assert_eq!(
            settings.zoom_path,
            PathSettings::Dive {
                target: ZoomPath::DEFAULT_TARGET,
                steps: 12,
                decay: 0.99,
            }
        );
    }

    #[test]
    fn explicit_waypoints_build_a_path() {
        let json = r#"{
            "zoom_path": {
                "kind": "waypoints",
                "waypoints": [
                    { "target": { "re": -0.5, "im": 0.0 } },
                    { "target": { "re": -0.6, "im": 0.1 }, "scale_factor": 0.9 }
                ]
            }
        }"#;
        let settings: RecorderSettings = serde_json::from_str(json).unwrap();
        let path = settings.zoom_path.build().unwrap();
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn invalid_values_surface_when_building() {
        let settings = RecorderSettings {
            max_iterations: 0,
            ..RecorderSettings::default()
        };
        assert!(settings.fractal().is_err());

        let settings = RecorderSettings {
            zoom_speed: 1.5,
            ..RecorderSettings::default()
        };
        assert!(settings.navigator().is_err());
    }

    #[test]
    fn viewport_uses_scale_and_aspect() {
        let settings = RecorderSettings {
            width: 200,
            height: 100,
            ..RecorderSettings::default()
        };
        let viewport = settings.viewport().unwrap();
        assert_eq!(viewport.scale(), 2.0);
        assert!((viewport.y_max() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn worker_count_zero_means_hardware() {
        let settings = RecorderSettings {
            workers: 3,
            ..RecorderSettings::default()
        };
        assert_eq!(settings.engine().workers(), 3);
        assert!(RecorderSettings::default().engine().workers() >= 1);
    }

    #[test]
    fn load_falls_back_on_missing_or_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert_eq!(RecorderSettings::load(&missing), RecorderSettings::default());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert_eq!(RecorderSettings::load(&broken), RecorderSettings::default());

        let good = dir.path().join("good.json");
        fs::write(&good, r#"{ "max_iterations": 120 }"#).unwrap();
        assert_eq!(RecorderSettings::load(&good).max_iterations, 120);
    }
}
