use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Where log files go. `None` when the platform has no home directory.
    pub fn log_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "doomtype")
            .map(|proj_dirs| proj_dirs.data_local_dir().join("logs"))
    }
}
