use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Result, SlicesError};

/// A slice file discovered in the slices directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceFile {
    /// File name without extension; the id fallback when `tt.id` is absent.
    pub stem: String,
    pub path: PathBuf,
}

/// Discover all slice files directly inside `root` with the given extension.
///
/// Only the top level is scanned; files are returned sorted by name. A missing
/// directory is treated as an empty collection.
pub fn discover_slices(root: &Path, extension: &str) -> Result<Vec<SliceFile>> {
    if !root.exists() {
        log::debug!("Slices directory {} does not exist", root.display());
        return Ok(Vec::new());
    }
    if !root.is_dir() {
        return Err(SlicesError::Config(format!(
            "Slices path is not a directory: {}",
            root.display()
        )));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let matches_ext = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if !matches_ext {
            continue;
        }

        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            log::warn!("Skipping slice with non UTF-8 name: {}", path.display());
            continue;
        };

        files.push(SliceFile {
            stem: stem.to_string(),
            path: path.to_path_buf(),
        });
    }

    log::info!("Discovered {} slices in {}", files.len(), root.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discover_slices() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("nested")).unwrap();
        fs::write(root.join("02B.tt"), "---\n---\n").unwrap();
        fs::write(root.join("01A.tt"), "---\n---\n").unwrap();
        fs::write(root.join("03C.TT"), "---\n---\n").unwrap();
        fs::write(root.join("notes.md"), "# Notes").unwrap(); // wrong extension
        fs::write(root.join("nested/04D.tt"), "---\n---\n").unwrap(); // not top level

        let files = discover_slices(root, "tt").unwrap();
        let stems: Vec<_> = files.iter().map(|f| f.stem.as_str()).collect();
        assert_eq!(stems, vec!["01A", "02B", "03C"]);
    }

    #[test]
    fn test_discover_slices_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let files = discover_slices(&temp_dir.path().join("absent"), "tt").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_discover_slices_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("plain.tt");
        fs::write(&file, "").unwrap();
        assert!(matches!(discover_slices(&file, "tt"), Err(SlicesError::Config(_))));
    }
}
