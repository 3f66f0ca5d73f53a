//! File system access for the digest pipeline
//!
//! Directory traversal and bounded chunked reads of individual files.

mod chunks;
mod walker;

pub use chunks::*;
pub use walker::*;
