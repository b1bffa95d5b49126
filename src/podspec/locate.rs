use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{PodPublishError, Result};

/// Finds the single `*.podspec` file directly inside `dir`.
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the only podspec in the directory
/// * `Err` - If the directory cannot be read, holds no podspec, or holds several
pub fn locate_podspec(dir: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(dir).map_err(|e| {
        PodPublishError::podspec(format!("Cannot read directory {}: {}", dir.display(), e))
    })?;

    let mut candidates = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_podspec = path.extension().is_some_and(|ext| ext == "podspec");
        if is_podspec && path.is_file() {
            candidates.push(path);
        }
    }
    candidates.sort();

    match candidates.len() {
        0 => Err(PodPublishError::podspec(format!(
            "No .podspec file found in {}",
            dir.display()
        ))),
        1 => {
            let path = candidates.remove(0);
            debug!(path = %path.display(), "located podspec");
            Ok(path)
        }
        _ => {
            let names: Vec<String> = candidates
                .iter()
                .filter_map(|p| p.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .collect();
            Err(PodPublishError::podspec(format!(
                "Several .podspec files found in {} ({}); pass --podspec to choose one",
                dir.display(),
                names.join(", ")
            )))
        }
    }
}
