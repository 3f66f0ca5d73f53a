//! # dirhash - content digest of a directory tree
//!
//! dirhash walks a directory recursively, streams the bytes of every file
//! through a single running hash state and reports one digest for the
//! whole tree. Two trees with the same file contents, visited in the same
//! order, produce the same digest regardless of file names.
//!
//! ## Features
//!
//! - **One pass, one state**: files are read in bounded chunks and fed in
//!   traversal order, never buffered whole
//! - **Algorithms**: BLAKE2s (default), BLAKE2b, SHA-1, SHA-2, SHA-3,
//!   BLAKE3, XXHash3, XXHash64 and a CRC32 checksum
//! - **Eager validation**: algorithm names are checked before any I/O
//! - **Opt-in sorted traversal** for digests that agree across platforms
//!
//! ## Quick Start
//!
//! ```no_run
//! use dirhash::config::HashAlgorithm;
//! use dirhash::hash::digest_directory;
//! use std::path::Path;
//!
//! let digest = digest_directory(Path::new("/build/output"), HashAlgorithm::Crc32).unwrap();
//! println!("{} ({} files, {} bytes)", digest, digest.files, digest.bytes);
//! ```
//!
//! ## Configured Runs
//!
//! ```no_run
//! use dirhash::config::{HashAlgorithm, TraversalOrder};
//! use dirhash::hash::DirectoryHasher;
//! use std::path::Path;
//!
//! let algorithm: HashAlgorithm = "sha256".parse().unwrap();
//! let digest = DirectoryHasher::new(algorithm)
//!     .with_order(TraversalOrder::Sorted)
//!     .with_chunk_size(64 * 1024)
//!     .hash(Path::new("/datasets/v3"))
//!     .unwrap();
//! println!("{}", digest);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod fs;
pub mod hash;

// Re-export commonly used types
pub use config::{DigestConfig, HashAlgorithm, TraversalOrder, DEFAULT_HASH_ALGORITHM};
pub use error::{DirHashError, Result};
pub use hash::{digest_directory, DirectoryHasher, TreeDigest};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    //! Convenient re-exports for common usage
    //!
    //! ```no_run
    //! use dirhash::prelude::*;
    //! ```

    pub use crate::config::{DigestConfig, HashAlgorithm, TraversalOrder};
    pub use crate::error::{DirHashError, Result};
    pub use crate::fs::{ChunkReader, FileWalker};
    pub use crate::hash::{digest_directory, hash_bytes, hash_file, DirectoryHasher, Hasher, TreeDigest};
}
