//! Configuration settings for dirhash
//!
//! Defines the CLI surface, the supported hash algorithms and the
//! validated runtime configuration the pipeline runs with.

use crate::error::{DirHashError, Result};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Algorithm used when no hash type is given
pub const DEFAULT_HASH_ALGORITHM: HashAlgorithm = HashAlgorithm::Blake2s;

/// Bytes read from a file per chunk
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// dirhash - content digest of a directory tree
#[derive(Parser, Debug, Clone)]
#[command(name = "dirhash")]
#[command(version = crate::VERSION)]
#[command(about = "Compute a single digest over the contents of every file in a directory tree")]
#[command(long_about = r#"
dirhash walks a directory recursively, streams every file's bytes through
one hash state in traversal order and prints the resulting digest as hex.
File names and metadata are not hashed, only content.

Examples:
  dirhash ./build                 # BLAKE2s (default)
  dirhash ./build crc32           # CRC32 checksum
  dirhash ./dataset sha256 --sorted
  dirhash --list-algorithms
"#)]
pub struct CliArgs {
    /// Directory to hash
    #[arg(value_name = "DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// Hash algorithm name, or crc32 (default: blake2s)
    #[arg(value_name = "HASH_TYPE")]
    pub hash_type: Option<String>,

    /// Sort entries by file name within each directory
    #[arg(short = 's', long)]
    pub sorted: bool,

    /// Read size per chunk (e.g., 8K, 64KB, 1M)
    #[arg(long, default_value = "8192", value_name = "SIZE")]
    pub chunk_size: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Print supported hash types and exit
    #[arg(long)]
    pub list_algorithms: bool,

    /// Verbose logging to stderr (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Log filter directive implied by -v/-q
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Hash algorithm selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HashAlgorithm {
    /// CRC32 running checksum (not cryptographic)
    #[serde(rename = "crc32")]
    Crc32,
    /// BLAKE2s with a 32-byte digest
    #[default]
    #[serde(rename = "blake2s")]
    Blake2s,
    /// BLAKE2b with a 64-byte digest
    #[serde(rename = "blake2b")]
    Blake2b,
    /// MD5 (legacy, not collision resistant)
    #[serde(rename = "md5")]
    Md5,
    /// SHA-1
    #[serde(rename = "sha1")]
    Sha1,
    /// SHA-224
    #[serde(rename = "sha224")]
    Sha224,
    /// SHA-256
    #[serde(rename = "sha256")]
    Sha256,
    /// SHA-384
    #[serde(rename = "sha384")]
    Sha384,
    /// SHA-512
    #[serde(rename = "sha512")]
    Sha512,
    /// SHA3-224
    #[serde(rename = "sha3_224")]
    Sha3_224,
    /// SHA3-256
    #[serde(rename = "sha3_256")]
    Sha3_256,
    /// SHA3-384
    #[serde(rename = "sha3_384")]
    Sha3_384,
    /// SHA3-512
    #[serde(rename = "sha3_512")]
    Sha3_512,
    /// BLAKE3
    #[serde(rename = "blake3")]
    Blake3,
    /// XXHash3 128-bit (not cryptographic)
    #[serde(rename = "xxhash3")]
    XXHash3,
    /// XXHash64 (not cryptographic)
    #[serde(rename = "xxhash64")]
    XXHash64,
}

impl HashAlgorithm {
    /// Every supported algorithm, in the order they are listed to users
    pub const ALL: [HashAlgorithm; 16] = [
        Self::Blake2s,
        Self::Blake2b,
        Self::Blake3,
        Self::Crc32,
        Self::Md5,
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::Sha3_224,
        Self::Sha3_256,
        Self::Sha3_384,
        Self::Sha3_512,
        Self::XXHash3,
        Self::XXHash64,
    ];

    /// Get the output size in bytes
    pub fn output_size(&self) -> usize {
        match self {
            Self::Crc32 => 4,
            Self::XXHash64 => 8,
            Self::XXHash3 | Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha224 | Self::Sha3_224 => 28,
            Self::Blake2s | Self::Blake3 | Self::Sha256 | Self::Sha3_256 => 32,
            Self::Sha384 | Self::Sha3_384 => 48,
            Self::Blake2b | Self::Sha512 | Self::Sha3_512 => 64,
        }
    }

    /// Length of the hex digest this algorithm prints
    pub fn hex_len(&self) -> usize {
        self.output_size() * 2
    }

    /// Canonical name, as accepted on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Self::Crc32 => "crc32",
            Self::Blake2s => "blake2s",
            Self::Blake2b => "blake2b",
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
            Self::Sha3_224 => "sha3_224",
            Self::Sha3_256 => "sha3_256",
            Self::Sha3_384 => "sha3_384",
            Self::Sha3_512 => "sha3_512",
            Self::Blake3 => "blake3",
            Self::XXHash3 => "xxhash3",
            Self::XXHash64 => "xxhash64",
        }
    }

    /// Whether the algorithm is suitable for detecting deliberate tampering
    pub fn is_cryptographic(&self) -> bool {
        !matches!(self, Self::Crc32 | Self::XXHash3 | Self::XXHash64 | Self::Md5)
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = DirHashError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");

        let algorithm = match normalized.as_str() {
            "crc32" => Self::Crc32,
            "blake2s" | "blake2s256" => Self::Blake2s,
            "blake2b" | "blake2b512" => Self::Blake2b,
            "md5" => Self::Md5,
            "sha1" => Self::Sha1,
            "sha224" => Self::Sha224,
            "sha256" => Self::Sha256,
            "sha384" => Self::Sha384,
            "sha512" => Self::Sha512,
            "sha3_224" => Self::Sha3_224,
            "sha3_256" => Self::Sha3_256,
            "sha3_384" => Self::Sha3_384,
            "sha3_512" => Self::Sha3_512,
            "blake3" => Self::Blake3,
            "xxhash3" | "xxh3" => Self::XXHash3,
            "xxhash64" | "xxh64" => Self::XXHash64,
            _ => return Err(DirHashError::UnsupportedHashAlgorithm(s.to_string())),
        };

        Ok(algorithm)
    }
}

/// Output format for the digest
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Bare hex digest
    #[default]
    Text,
    /// JSON object with digest and counters
    Json,
}

/// Order in which directory entries are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TraversalOrder {
    /// Whatever order the filesystem lists entries in
    #[default]
    Listing,
    /// Sorted by file name within each directory
    Sorted,
}

/// Validated runtime configuration derived from CLI args
#[derive(Debug, Clone)]
pub struct DigestConfig {
    /// Root directory to hash
    pub root: PathBuf,
    /// Selected algorithm
    pub algorithm: HashAlgorithm,
    /// Read size per chunk in bytes
    pub chunk_size: usize,
    /// Entry visiting order
    pub order: TraversalOrder,
    /// How the digest is printed
    pub format: OutputFormat,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            algorithm: DEFAULT_HASH_ALGORITHM,
            chunk_size: DEFAULT_CHUNK_SIZE,
            order: TraversalOrder::Listing,
            format: OutputFormat::Text,
        }
    }
}

impl DigestConfig {
    /// Create config from CLI arguments
    ///
    /// The algorithm name is resolved here, before anything touches the
    /// filesystem, so a bad name never costs a traversal.
    pub fn from_cli(args: &CliArgs) -> Result<Self> {
        let algorithm = match args.hash_type.as_deref() {
            Some(name) => name.parse()?,
            None => DEFAULT_HASH_ALGORITHM,
        };

        let root = args
            .directory
            .clone()
            .ok_or_else(|| DirHashError::config("Directory path required"))?;

        let chunk_size = parse_size(&args.chunk_size)
            .map_err(|e| DirHashError::config(format!("Invalid chunk size: {}", e)))?;
        if chunk_size == 0 {
            return Err(DirHashError::config("Chunk size must be greater than zero"));
        }
        let chunk_size = usize::try_from(chunk_size)
            .map_err(|_| DirHashError::config(format!("Chunk size too large: {}", args.chunk_size)))?;

        Ok(Self {
            root,
            algorithm,
            chunk_size,
            order: if args.sorted {
                TraversalOrder::Sorted
            } else {
                TraversalOrder::Listing
            },
            format: args.format,
        })
    }
}

/// Parse human-readable size string to bytes (binary multiples)
pub fn parse_size(size: &str) -> std::result::Result<u64, String> {
    let size = size.trim().to_uppercase();
    if size.is_empty() {
        return Err("Empty size string".to_string());
    }

    let digits_end = size
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(size.len());
    let (num_str, suffix) = size.split_at(digits_end);

    let multiplier: u64 = match suffix.trim() {
        "" | "B" => 1,
        "K" | "KB" => 1024,
        "M" | "MB" => 1024 * 1024,
        "G" | "GB" => 1024 * 1024 * 1024,
        other => return Err(format!("Unknown size suffix: {}", other)),
    };

    let num: u64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: {}", num_str))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| format!("Size overflows: {}", size))
}
