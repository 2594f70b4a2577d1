use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::PersistError;

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> PersistError + '_ {
    move |source| PersistError {
        path: path.to_path_buf(),
        source,
    }
}

/// Write `summary` as UTF-8, replacing any existing file and creating missing
/// parent directories.
pub fn save_summary(summary: &str, path: &Path) -> Result<(), PersistError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }
    fs::write(path, summary).map_err(io_err(path))?;
    info!("Summary saved to {}", path.display());
    Ok(())
}

pub fn load_summary(path: &Path) -> Result<String, PersistError> {
    fs::read_to_string(path).map_err(io_err(path))
}
