//! Directory where the executable lives. The settings file and the recorded
//! frames default to locations next to the binary.

use std::path::PathBuf;

/// Directory containing the running executable. Falls back to current directory if unavailable.
pub fn exe_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Default location of the recorder settings file.
pub fn settings_path() -> PathBuf {
    exe_directory().join("zoombrot.json")
}

/// Default directory for recorded frames.
pub fn frames_directory() -> PathBuf {
    exe_directory().join("frames")
}
