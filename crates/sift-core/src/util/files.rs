//! Async file utilities for content discovery.
//!
//! Walks a content collection directory and reads its files. Used by the
//! content loader and the CLI.

use async_walkdir::WalkDir;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::{Error, Result};

/// Options for discovering content files.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// File extensions to match (without dot). Empty matches every file.
    pub extensions: Vec<&'static str>,
}

impl FindOptions {
    /// Create options for markdown content (`.md` and `.mdx`).
    pub fn markdown() -> Self {
        Self {
            extensions: vec!["md", "mdx"],
        }
    }

    fn accepts_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|want| ext.eq_ignore_ascii_case(want)))
    }
}

/// Information about a discovered file.
#[derive(Debug, Clone)]
pub struct FileInfo {
    /// Full path to the file.
    pub path: PathBuf,
    /// Path relative to the search base.
    pub relative_path: PathBuf,
}

/// Find all files matching criteria in a directory.
///
/// Results are sorted by relative path so that loading is deterministic
/// regardless of directory iteration order.
///
/// # Example
///
/// ```no_run
/// # use sift_core::util::files::{find_all_files, FindOptions};
/// # use std::path::Path;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let files = find_all_files(Path::new("src/content/blog"), FindOptions::markdown()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn find_all_files(base_path: &Path, options: FindOptions) -> Result<Vec<FileInfo>> {
    if !exists(base_path).await {
        return Err(Error::not_found(format!(
            "Content directory {} does not exist",
            base_path.display()
        )));
    }

    let mut files = Vec::new();
    let mut walker = WalkDir::new(base_path);

    while let Some(entry_result) = walker.next().await {
        let entry = entry_result
            .map_err(|e| Error::io_with_path(std::io::Error::other(e.to_string()), base_path))?;
        let path = entry.path();

        if path.is_dir() {
            continue;
        }

        if !options.accepts_extension(&path) {
            continue;
        }

        let relative_path = path.strip_prefix(base_path).unwrap_or(&path).to_path_buf();

        files.push(FileInfo {
            path: path.to_path_buf(),
            relative_path,
        });
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    log::debug!("discovered {} files under {}", files.len(), base_path.display());
    Ok(files)
}

/// Read a file's contents as a string.
pub async fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| Error::io_with_path(e, path))
}

/// Check if a path exists.
pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_find_all_files_markdown_only() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("one.md"), "# One").await.unwrap();
        fs::write(temp.path().join("two.mdx"), "# Two").await.unwrap();
        fs::write(temp.path().join("cover.webp"), "binary").await.unwrap();

        let files = find_all_files(temp.path(), FindOptions::markdown())
            .await
            .unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].relative_path, PathBuf::from("one.md"));
        assert_eq!(files[1].relative_path, PathBuf::from("two.mdx"));
    }

    #[tokio::test]
    async fn test_find_all_files_nested_relative_paths() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("pt")).await.unwrap();
        fs::create_dir_all(temp.path().join("en")).await.unwrap();
        fs::write(temp.path().join("pt/lifting.md"), "x").await.unwrap();
        fs::write(temp.path().join("en/lifting.md"), "x").await.unwrap();

        let files = find_all_files(temp.path(), FindOptions::markdown())
            .await
            .unwrap();

        let rel: Vec<_> = files.iter().map(|f| f.relative_path.clone()).collect();
        assert_eq!(
            rel,
            vec![PathBuf::from("en/lifting.md"), PathBuf::from("pt/lifting.md")]
        );
    }

    #[tokio::test]
    async fn test_find_all_files_missing_dir() {
        let temp = TempDir::new().unwrap();
        let result = find_all_files(&temp.path().join("nope"), FindOptions::markdown()).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_read_file() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("test.md");
        fs::write(&file_path, "# Rinoplastia").await.unwrap();

        assert_eq!(read_file(&file_path).await.unwrap(), "# Rinoplastia");
    }

    #[tokio::test]
    async fn test_read_file_missing_reports_path() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.md");
        let err = read_file(&missing).await.unwrap_err();
        assert!(err.to_string().contains("missing.md"));
    }

    #[test]
    fn test_exists_blocking() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("exists.md");
        std::fs::write(&file_path, "content").unwrap();

        assert!(tokio_test::block_on(exists(&file_path)));
        assert!(!tokio_test::block_on(exists(&temp.path().join("nope.md"))));
    }
}
