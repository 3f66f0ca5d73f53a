//! Whole-tree digest pipeline
//!
//! Walks a directory, streams every file through one shared hash state in
//! traversal order and reports the final digest. Only content is hashed:
//! names, metadata and directory structure do not contribute.

use super::hasher::StreamingHasher;
use crate::config::{DigestConfig, HashAlgorithm, TraversalOrder, DEFAULT_CHUNK_SIZE};
use crate::error::{DirHashError, Result};
use crate::fs::{for_each_chunk, FileWalker};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Digest of a directory tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeDigest {
    /// Root that was hashed
    pub root: String,
    /// Algorithm used
    pub algorithm: HashAlgorithm,
    /// Lowercase hex digest
    pub digest: String,
    /// Number of files hashed
    pub files: u64,
    /// Total bytes hashed
    pub bytes: u64,
}

impl std::fmt::Display for TreeDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.digest)
    }
}

/// Computes tree digests with a fixed algorithm, chunk size and order
#[derive(Debug, Clone)]
pub struct DirectoryHasher {
    algorithm: HashAlgorithm,
    chunk_size: usize,
    order: TraversalOrder,
}

impl DirectoryHasher {
    /// Create a hasher for `algorithm` with default chunk size and listing order
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            chunk_size: DEFAULT_CHUNK_SIZE,
            order: TraversalOrder::Listing,
        }
    }

    /// Build from validated runtime configuration
    pub fn from_config(config: &DigestConfig) -> Self {
        Self {
            algorithm: config.algorithm,
            chunk_size: config.chunk_size,
            order: config.order,
        }
    }

    /// Set the read size per chunk
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the traversal order
    pub fn with_order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }

    /// Algorithm in use
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Hash every file under `root`
    ///
    /// Any I/O failure aborts the run; no partial digest is returned.
    pub fn hash(&self, root: &Path) -> Result<TreeDigest> {
        if self.chunk_size == 0 {
            return Err(DirHashError::config("Chunk size must be greater than zero"));
        }

        let start = Instant::now();
        let files = FileWalker::new(root).with_order(self.order).walk()?;
        let mut hasher = StreamingHasher::new(self.algorithm);
        let mut file_count = 0u64;

        for path in files {
            let path = path?;
            let bytes = for_each_chunk(&path, self.chunk_size, |chunk| hasher.process(chunk))?;
            debug!(path = %path.display(), bytes, "hashed file");
            file_count += 1;
        }

        let result = hasher.finalize();
        info!(
            root = %root.display(),
            algorithm = %self.algorithm,
            files = file_count,
            bytes = result.size,
            elapsed = ?start.elapsed(),
            "directory digest complete"
        );

        Ok(TreeDigest {
            root: root.to_string_lossy().into_owned(),
            algorithm: result.algorithm,
            digest: result.hash,
            files: file_count,
            bytes: result.size,
        })
    }
}

/// Digest a directory tree with default chunk size and listing order
pub fn digest_directory(root: &Path, algorithm: HashAlgorithm) -> Result<TreeDigest> {
    DirectoryHasher::new(algorithm).hash(root)
}
