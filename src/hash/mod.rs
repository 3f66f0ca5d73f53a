//! Hash computation module
//!
//! One running hash state per run, fed chunk by chunk across every file
//! of a tree. Supports CRC32, BLAKE2, MD5, SHA-1/2/3, BLAKE3 and XXHash.

mod hasher;
mod tree;

pub use hasher::*;
pub use tree::*;
