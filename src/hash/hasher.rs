//! Incremental hashers for every supported algorithm
//!
//! All hashers absorb input piecewise and produce the same digest as
//! hashing the concatenated input at once, so the read chunk size never
//! affects the result.

use crate::config::{HashAlgorithm, DEFAULT_CHUNK_SIZE};
use crate::error::Result;
use crate::fs::for_each_chunk;
use serde::{Deserialize, Serialize};
use sha2::Digest;
use std::path::Path;

/// Anything that can absorb a stream of byte chunks and report a hex digest
pub trait HashWriter {
    /// Update the hash with more data
    fn update(&mut self, data: &[u8]);

    /// Consume the state and produce the lowercase hex digest
    fn finalize_hex(self) -> String
    where
        Self: Sized;
}

/// Hash result as hex string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashResult {
    /// The hash algorithm used
    pub algorithm: HashAlgorithm,
    /// Hash value as lowercase hex string
    pub hash: String,
    /// Number of bytes hashed
    pub size: u64,
}

impl HashResult {
    /// Create a new hash result
    pub fn new(algorithm: HashAlgorithm, hash: String, size: u64) -> Self {
        Self { algorithm, hash, size }
    }

    /// Verify against another hash result
    pub fn verify(&self, other: &HashResult) -> bool {
        self.algorithm == other.algorithm && self.hash == other.hash
    }
}

impl std::fmt::Display for HashResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hash)
    }
}

/// Unified hasher that supports all algorithms
#[derive(Clone)]
pub enum Hasher {
    /// CRC32, running value seeded at zero
    Crc32(crc32fast::Hasher),
    /// BLAKE2s-256
    Blake2s(blake2::Blake2s256),
    /// BLAKE2b-512
    Blake2b(blake2::Blake2b512),
    /// MD5
    Md5(md5::Md5),
    /// SHA-1
    Sha1(sha1::Sha1),
    /// SHA-224
    Sha224(sha2::Sha224),
    /// SHA-256
    Sha256(sha2::Sha256),
    /// SHA-384
    Sha384(sha2::Sha384),
    /// SHA-512
    Sha512(sha2::Sha512),
    /// SHA3-224
    Sha3_224(sha3::Sha3_224),
    /// SHA3-256
    Sha3_256(sha3::Sha3_256),
    /// SHA3-384
    Sha3_384(sha3::Sha3_384),
    /// SHA3-512
    Sha3_512(sha3::Sha3_512),
    /// BLAKE3
    Blake3(blake3::Hasher),
    /// XXHash3 128-bit
    XXHash3(xxhash_rust::xxh3::Xxh3),
    /// XXHash64
    XXHash64(xxhash_rust::xxh64::Xxh64),
}

impl Hasher {
    /// Create a new hasher for the given algorithm
    pub fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Crc32 => Self::Crc32(crc32fast::Hasher::new_with_initial(0)),
            HashAlgorithm::Blake2s => Self::Blake2s(blake2::Blake2s256::new()),
            HashAlgorithm::Blake2b => Self::Blake2b(blake2::Blake2b512::new()),
            HashAlgorithm::Md5 => Self::Md5(md5::Md5::new()),
            HashAlgorithm::Sha1 => Self::Sha1(sha1::Sha1::new()),
            HashAlgorithm::Sha224 => Self::Sha224(sha2::Sha224::new()),
            HashAlgorithm::Sha256 => Self::Sha256(sha2::Sha256::new()),
            HashAlgorithm::Sha384 => Self::Sha384(sha2::Sha384::new()),
            HashAlgorithm::Sha512 => Self::Sha512(sha2::Sha512::new()),
            HashAlgorithm::Sha3_224 => Self::Sha3_224(sha3::Sha3_224::new()),
            HashAlgorithm::Sha3_256 => Self::Sha3_256(sha3::Sha3_256::new()),
            HashAlgorithm::Sha3_384 => Self::Sha3_384(sha3::Sha3_384::new()),
            HashAlgorithm::Sha3_512 => Self::Sha3_512(sha3::Sha3_512::new()),
            HashAlgorithm::Blake3 => Self::Blake3(blake3::Hasher::new()),
            HashAlgorithm::XXHash3 => Self::XXHash3(xxhash_rust::xxh3::Xxh3::new()),
            HashAlgorithm::XXHash64 => Self::XXHash64(xxhash_rust::xxh64::Xxh64::new(0)),
        }
    }

    /// Get the algorithm this hasher uses
    pub fn algorithm(&self) -> HashAlgorithm {
        match self {
            Self::Crc32(_) => HashAlgorithm::Crc32,
            Self::Blake2s(_) => HashAlgorithm::Blake2s,
            Self::Blake2b(_) => HashAlgorithm::Blake2b,
            Self::Md5(_) => HashAlgorithm::Md5,
            Self::Sha1(_) => HashAlgorithm::Sha1,
            Self::Sha224(_) => HashAlgorithm::Sha224,
            Self::Sha256(_) => HashAlgorithm::Sha256,
            Self::Sha384(_) => HashAlgorithm::Sha384,
            Self::Sha512(_) => HashAlgorithm::Sha512,
            Self::Sha3_224(_) => HashAlgorithm::Sha3_224,
            Self::Sha3_256(_) => HashAlgorithm::Sha3_256,
            Self::Sha3_384(_) => HashAlgorithm::Sha3_384,
            Self::Sha3_512(_) => HashAlgorithm::Sha3_512,
            Self::Blake3(_) => HashAlgorithm::Blake3,
            Self::XXHash3(_) => HashAlgorithm::XXHash3,
            Self::XXHash64(_) => HashAlgorithm::XXHash64,
        }
    }

    /// Update the hasher with more data
    pub fn update(&mut self, data: &[u8]) {
        match self {
            Self::Crc32(h) => h.update(data),
            Self::Blake2s(h) => Digest::update(h, data),
            Self::Blake2b(h) => Digest::update(h, data),
            Self::Md5(h) => Digest::update(h, data),
            Self::Sha1(h) => Digest::update(h, data),
            Self::Sha224(h) => Digest::update(h, data),
            Self::Sha256(h) => Digest::update(h, data),
            Self::Sha384(h) => Digest::update(h, data),
            Self::Sha512(h) => Digest::update(h, data),
            Self::Sha3_224(h) => Digest::update(h, data),
            Self::Sha3_256(h) => Digest::update(h, data),
            Self::Sha3_384(h) => Digest::update(h, data),
            Self::Sha3_512(h) => Digest::update(h, data),
            Self::Blake3(h) => {
                h.update(data);
            }
            Self::XXHash3(h) => h.update(data),
            Self::XXHash64(h) => h.update(data),
        }
    }

    /// Finalize and get the hash as hex string
    pub fn finalize(self) -> String {
        match self {
            Self::Crc32(h) => format!("{:08x}", h.finalize()),
            Self::Blake2s(h) => hex::encode(h.finalize()),
            Self::Blake2b(h) => hex::encode(h.finalize()),
            Self::Md5(h) => hex::encode(h.finalize()),
            Self::Sha1(h) => hex::encode(h.finalize()),
            Self::Sha224(h) => hex::encode(h.finalize()),
            Self::Sha256(h) => hex::encode(h.finalize()),
            Self::Sha384(h) => hex::encode(h.finalize()),
            Self::Sha512(h) => hex::encode(h.finalize()),
            Self::Sha3_224(h) => hex::encode(h.finalize()),
            Self::Sha3_256(h) => hex::encode(h.finalize()),
            Self::Sha3_384(h) => hex::encode(h.finalize()),
            Self::Sha3_512(h) => hex::encode(h.finalize()),
            Self::Blake3(h) => h.finalize().to_hex().to_string(),
            Self::XXHash3(h) => format!("{:032x}", h.digest128()),
            Self::XXHash64(h) => format!("{:016x}", h.digest()),
        }
    }
}

impl HashWriter for Hasher {
    fn update(&mut self, data: &[u8]) {
        Hasher::update(self, data);
    }

    fn finalize_hex(self) -> String {
        self.finalize()
    }
}

/// Hasher that also counts the bytes it has absorbed
pub struct StreamingHasher {
    hasher: Hasher,
    bytes_processed: u64,
}

impl StreamingHasher {
    /// Create a new streaming hasher
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            hasher: Hasher::new(algorithm),
            bytes_processed: 0,
        }
    }

    /// Process a chunk of data
    pub fn process(&mut self, data: &[u8]) {
        self.hasher.update(data);
        self.bytes_processed += data.len() as u64;
    }

    /// Get bytes processed so far
    pub fn bytes_processed(&self) -> u64 {
        self.bytes_processed
    }

    /// Algorithm in use
    pub fn algorithm(&self) -> HashAlgorithm {
        self.hasher.algorithm()
    }

    /// Finalize and get the result
    pub fn finalize(self) -> HashResult {
        let algorithm = self.hasher.algorithm();
        HashResult::new(algorithm, self.hasher.finalize(), self.bytes_processed)
    }
}

impl HashWriter for StreamingHasher {
    fn update(&mut self, data: &[u8]) {
        self.process(data);
    }

    fn finalize_hex(self) -> String {
        self.finalize().hash
    }
}

/// Compute hash of data in memory
pub fn hash_bytes(data: &[u8], algorithm: HashAlgorithm) -> HashResult {
    let mut hasher = StreamingHasher::new(algorithm);
    hasher.process(data);
    hasher.finalize()
}

/// Compute hash of a single file
pub fn hash_file(path: &Path, algorithm: HashAlgorithm) -> Result<HashResult> {
    let mut hasher = StreamingHasher::new(algorithm);
    for_each_chunk(path, DEFAULT_CHUNK_SIZE, |chunk| hasher.process(chunk))?;
    Ok(hasher.finalize())
}

/// Feed a sequence of chunks through any hash writer
pub fn digest_chunks<'a, W, I>(mut writer: W, chunks: I) -> String
where
    W: HashWriter,
    I: IntoIterator<Item = &'a [u8]>,
{
    for chunk in chunks {
        writer.update(chunk);
    }
    writer.finalize_hex()
}
