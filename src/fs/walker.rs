//! Recursive file enumeration
//!
//! Yields the path of every file under a root, depth first. Within one
//! directory the files come before any subdirectory is entered, and
//! otherwise entries keep the order the filesystem lists them in unless
//! sorted order was requested.

use crate::config::TraversalOrder;
use crate::error::{DirHashError, Result};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::{DirEntry, WalkDir};

/// Enumerates the files of a directory tree
#[derive(Debug, Clone)]
pub struct FileWalker {
    root: PathBuf,
    order: TraversalOrder,
}

impl FileWalker {
    /// Create a walker over `root` using raw listing order
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            order: TraversalOrder::Listing,
        }
    }

    /// Set the entry visiting order
    pub fn with_order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }

    /// Root this walker enumerates
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check the root and start walking
    ///
    /// Fails up front if the root is missing or not a directory; errors
    /// further down the tree surface from the returned iterator.
    pub fn walk(&self) -> Result<Files> {
        let metadata = std::fs::metadata(&self.root).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DirHashError::NotFound(self.root.clone())
            } else {
                DirHashError::io(&self.root, e)
            }
        })?;
        if !metadata.is_dir() {
            return Err(DirHashError::NotADirectory(self.root.clone()));
        }

        let walker = WalkDir::new(&self.root).follow_links(false).min_depth(1);
        let walker = match self.order {
            TraversalOrder::Listing => walker.sort_by(files_first),
            TraversalOrder::Sorted => {
                walker.sort_by(|a, b| files_first(a, b).then_with(|| a.file_name().cmp(b.file_name())))
            }
        };

        Ok(Files {
            root: self.root.clone(),
            inner: walker.into_iter(),
        })
    }
}

/// Stable partition of a directory's entries: files, then directories
fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type().is_dir().cmp(&b.file_type().is_dir())
}

/// Iterator over the file paths of a tree
pub struct Files {
    root: PathBuf,
    inner: walkdir::IntoIter,
}

impl Iterator for Files {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(DirHashError::walk(&self.root, err))),
            };

            if entry.file_type().is_dir() {
                continue;
            }

            // Links to directories are listed but never descended into
            if entry.path_is_symlink() && entry.path().is_dir() {
                trace!(path = %entry.path().display(), "skipping symlink to directory");
                continue;
            }

            return Some(Ok(entry.into_path()));
        }
    }
}

/// Collect every file path under `root`
pub fn list_files(root: &Path, order: TraversalOrder) -> Result<Vec<PathBuf>> {
    FileWalker::new(root).with_order(order).walk()?.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn build_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("b/nested")).unwrap();
        std::fs::create_dir_all(dir.path().join("a")).unwrap();
        std::fs::write(dir.path().join("z.txt"), b"z").unwrap();
        std::fs::write(dir.path().join("m.txt"), b"m").unwrap();
        std::fs::write(dir.path().join("a/one.txt"), b"1").unwrap();
        std::fs::write(dir.path().join("b/two.txt"), b"2").unwrap();
        std::fs::write(dir.path().join("b/nested/three.txt"), b"3").unwrap();
        dir
    }

    fn relative(root: &Path, paths: Vec<PathBuf>) -> Vec<String> {
        paths
            .into_iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_walk_finds_nested_files() {
        let dir = build_tree();
        let mut files = relative(dir.path(), list_files(dir.path(), TraversalOrder::Listing).unwrap());
        files.sort();
        assert_eq!(files, vec!["a/one.txt", "b/nested/three.txt", "b/two.txt", "m.txt", "z.txt"]);
    }

    #[test]
    fn test_sorted_order_puts_files_before_subdirectories() {
        let dir = build_tree();
        let files = relative(dir.path(), list_files(dir.path(), TraversalOrder::Sorted).unwrap());
        assert_eq!(files, vec!["m.txt", "z.txt", "a/one.txt", "b/two.txt", "b/nested/three.txt"]);
    }

    #[test]
    fn test_listing_order_visits_root_files_first() {
        let dir = build_tree();
        let files = relative(dir.path(), list_files(dir.path(), TraversalOrder::Listing).unwrap());
        let mut head: Vec<_> = files[..2].to_vec();
        head.sort();
        assert_eq!(head, vec!["m.txt", "z.txt"]);
    }

    #[test]
    fn test_empty_directory_has_no_files() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("empty")).unwrap();
        assert!(list_files(dir.path(), TraversalOrder::Listing).unwrap().is_empty());
    }

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let walker = FileWalker::new(&missing);
        assert_eq!(walker.root(), missing.as_path());
        let err = walker.walk().err().unwrap();
        assert!(matches!(err, DirHashError::NotFound(ref p) if p == &missing));
    }

    #[test]
    fn test_root_is_a_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, b"x").unwrap();
        let err = FileWalker::new(&file).walk().err().unwrap();
        assert!(matches!(err, DirHashError::NotADirectory(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_directory_is_not_followed() {
        let dir = build_tree();
        std::os::unix::fs::symlink(dir.path().join("b"), dir.path().join("link_to_b")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("m.txt"), dir.path().join("link_to_m")).unwrap();

        let files = relative(dir.path(), list_files(dir.path(), TraversalOrder::Sorted).unwrap());
        assert_eq!(
            files,
            vec!["link_to_m", "m.txt", "z.txt", "a/one.txt", "b/two.txt", "b/nested/three.txt"]
        );
    }
}
