use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::BiogridError;

fn open_archive(zip_path: &Path) -> Result<ZipArchive<fs::File>, BiogridError> {
    let file = fs::File::open(zip_path).map_err(|err| {
        BiogridError::Filesystem(format!("open zip {}: {err}", zip_path.display()))
    })?;
    ZipArchive::new(file).map_err(|err| BiogridError::Filesystem(err.to_string()))
}

/// Name of the first entry of the archive.
pub fn first_entry_name(zip_path: &Path) -> Result<String, BiogridError> {
    let archive = open_archive(zip_path)?;
    archive
        .file_names()
        .next()
        .map(str::to_string)
        .ok_or_else(|| BiogridError::EmptyArchive(zip_path.to_path_buf()))
}

/// Extracts every file entry into `target_dir` and returns the written paths
/// in archive order.
pub fn extract_zip(zip_path: &Path, target_dir: &Path) -> Result<Vec<PathBuf>, BiogridError> {
    let mut archive = open_archive(zip_path)?;
    let mut written = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|err| BiogridError::Filesystem(err.to_string()))?;
        let entry_path = match entry.enclosed_name() {
            Some(path) => target_dir.join(path),
            None => {
                return Err(BiogridError::Filesystem(
                    "zip entry path traversal detected".to_string(),
                ));
            }
        };

        if entry.is_dir() {
            fs::create_dir_all(&entry_path)
                .map_err(|err| BiogridError::Filesystem(err.to_string()))?;
            continue;
        }

        if let Some(parent) = entry_path.parent() {
            fs::create_dir_all(parent).map_err(|err| BiogridError::Filesystem(err.to_string()))?;
        }
        let mut outfile = fs::File::create(&entry_path)
            .map_err(|err| BiogridError::Filesystem(err.to_string()))?;
        io::copy(&mut entry, &mut outfile)
            .map_err(|err| BiogridError::Filesystem(err.to_string()))?;
        written.push(entry_path);
    }
    Ok(written)
}
