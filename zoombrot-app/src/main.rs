mod app_dir;
mod explorer;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, info};

use zoombrot_core::Intent;
use zoombrot_render::PngSequence;

use explorer::{Explorer, LogPresenter};
use settings::RecorderSettings;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting Zoombrot recorder");

    let settings_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(app_dir::settings_path);
    let settings = RecorderSettings::load(&settings_path);
    info!(
        width = settings.width,
        height = settings.height,
        max_iterations = settings.max_iterations,
        "Recording up to {} frames to {}",
        settings.zoom_path.build().map(|p| p.len()).unwrap_or(0),
        settings.output_dir().display()
    );

    let sink = PngSequence::new(settings.output_dir());
    let mut explorer = Explorer::from_settings(&settings, sink)?;
    let mut presenter = LogPresenter;

    let start = Instant::now();
    let mut report = explorer.tick(&[Intent::ToggleRecording], &mut presenter)?;
    loop {
        debug!(
            reconciled = ?report.reconciled,
            exported = ?report.exported,
            recording = report.recording,
            "Tick"
        );
        if !explorer.is_recording() {
            break;
        }
        report = explorer.tick(&[], &mut presenter)?;
    }

    let viewport = explorer.viewport();
    info!(
        frames = explorer.frames_recorded(),
        unused_waypoints = explorer.path().remaining(),
        elapsed_s = start.elapsed().as_secs_f64(),
        "Recording finished in {}, final zoom {:.3e} at {}",
        explorer.sink().dir().display(),
        viewport.zoom(),
        viewport.center()
    );
    Ok(())
}
