use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, project_dirs};

pub fn default_log_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.cache_dir().join("movie-gallery.log"))
}

/// Send tracing output to `path`. The terminal belongs to the TUI, so
/// nothing is ever written to stdout or stderr.
pub fn init(path: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let default_directive = if verbose {
        "movie_gallery=debug"
    } else {
        "movie_gallery=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| e as Box<dyn std::error::Error>)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_log_file_in_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("gallery.log");

        init(&path, true).unwrap();
        tracing::info!("log file ready");

        assert!(path.exists());
    }
}
