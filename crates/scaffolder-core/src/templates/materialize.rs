//! Writes the template tree into the output directory

use crate::error::{Error, Result};
use crate::logging;
use crate::templates::{DirSpec, FileSpec};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Create each directory (and its parents) under `root`, in list order.
///
/// Already-existing directories are fine, so running this twice is harmless.
pub async fn create_directories(root: &Path, dirs: &[DirSpec]) -> Result<Vec<PathBuf>> {
    let mut created = Vec::with_capacity(dirs.len());
    for dir in dirs {
        logging::verbose(format!("./{}", dir.path));
        let path = root.join(dir.path);
        fs::create_dir_all(&path)
            .await
            .map_err(|e| Error::filesystem(&path, e))?;
        created.push(path);
    }
    Ok(created)
}

/// Write each file under `root`, overwriting whatever is already there.
pub async fn write_files(root: &Path, files: &[FileSpec]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        logging::verbose(format!("/{}", file.path));
        let path = root.join(file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::filesystem(parent, e))?;
        }
        fs::write(&path, &file.content)
            .await
            .map_err(|e| Error::filesystem(&path, e))?;
        written.push(path);
    }
    Ok(written)
}
