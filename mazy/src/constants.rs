use std::path::PathBuf;

use dirs::preference_dir;

/// Directory holding everything mazy writes. Falls back to the working directory on systems
/// without a preference dir.
pub fn base_path() -> PathBuf {
    preference_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mazy")
}
