//! Configuration module for dirhash
//!
//! Command-line arguments, the hash algorithm allow-list and the
//! validated settings a digest run is driven by.

mod settings;

pub use settings::*;
