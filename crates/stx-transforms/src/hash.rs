//! String hashing with a fixed registry of digest algorithms.
//!
//! Digests are computed over the UTF-8 bytes of the value and rendered as
//! lowercase hexadecimal.

use std::fmt;
use std::str::FromStr;

use sha2::Digest;

use crate::error::{Result, TransformError};

/// Name of the algorithm used when none is given.
pub const DEFAULT_HASH_ALGORITHM: &str = "sha1";

/// Supported digest algorithms.
///
/// Names follow the conventional lowercase spelling (`sha256`, `sha3_256`,
/// `blake2b`) and are parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    Md5,
    #[default]
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    /// BLAKE2b with a 512-bit digest.
    Blake2b,
    /// BLAKE2s with a 256-bit digest.
    Blake2s,
}

impl HashAlgorithm {
    /// Every supported algorithm.
    pub const ALL: [HashAlgorithm; 14] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::Sha512_224,
        Self::Sha512_256,
        Self::Sha3_224,
        Self::Sha3_256,
        Self::Sha3_384,
        Self::Sha3_512,
        Self::Blake2b,
        Self::Blake2s,
    ];

    /// Returns the canonical name of the algorithm.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
            Self::Sha512_224 => "sha512_224",
            Self::Sha512_256 => "sha512_256",
            Self::Sha3_224 => "sha3_224",
            Self::Sha3_256 => "sha3_256",
            Self::Sha3_384 => "sha3_384",
            Self::Sha3_512 => "sha3_512",
            Self::Blake2b => "blake2b",
            Self::Blake2s => "blake2s",
        }
    }

    /// Returns the digest length in bits.
    pub fn output_bits(self) -> usize {
        match self {
            Self::Md5 => 128,
            Self::Sha1 => 160,
            Self::Sha224 | Self::Sha512_224 | Self::Sha3_224 => 224,
            Self::Sha256 | Self::Sha512_256 | Self::Sha3_256 | Self::Blake2s => 256,
            Self::Sha384 | Self::Sha3_384 => 384,
            Self::Sha512 | Self::Sha3_512 | Self::Blake2b => 512,
        }
    }

    /// Hashes `bytes` and returns the lowercase hex digest.
    pub fn hex_digest(self, bytes: &[u8]) -> String {
        match self {
            Self::Md5 => digest_hex::<md5::Md5>(bytes),
            Self::Sha1 => digest_hex::<sha1::Sha1>(bytes),
            Self::Sha224 => digest_hex::<sha2::Sha224>(bytes),
            Self::Sha256 => digest_hex::<sha2::Sha256>(bytes),
            Self::Sha384 => digest_hex::<sha2::Sha384>(bytes),
            Self::Sha512 => digest_hex::<sha2::Sha512>(bytes),
            Self::Sha512_224 => digest_hex::<sha2::Sha512_224>(bytes),
            Self::Sha512_256 => digest_hex::<sha2::Sha512_256>(bytes),
            Self::Sha3_224 => digest_hex::<sha3::Sha3_224>(bytes),
            Self::Sha3_256 => digest_hex::<sha3::Sha3_256>(bytes),
            Self::Sha3_384 => digest_hex::<sha3::Sha3_384>(bytes),
            Self::Sha3_512 => digest_hex::<sha3::Sha3_512>(bytes),
            Self::Blake2b => digest_hex::<blake2::Blake2b512>(bytes),
            Self::Blake2s => digest_hex::<blake2::Blake2s256>(bytes),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| TransformError::UnsupportedAlgorithm(s.to_string()))
    }
}

fn digest_hex<D: Digest>(bytes: &[u8]) -> String {
    hex::encode(D::digest(bytes))
}

/// Hashes a string with the named algorithm.
///
/// # Errors
///
/// Returns [`TransformError::UnsupportedAlgorithm`] if `algorithm` does not
/// name one of the [`HashAlgorithm`] variants.
///
/// # Examples
///
/// ```
/// use stx_transforms::{DEFAULT_HASH_ALGORITHM, hash_string};
///
/// let digest = hash_string("abc", DEFAULT_HASH_ALGORITHM).unwrap();
/// assert_eq!(digest, "a9993e364706816aba3e25717850c26c9cd0d89d");
/// assert!(hash_string("x", "not_an_algo").is_err());
/// ```
pub fn hash_string(value: &str, algorithm: &str) -> Result<String> {
    let algorithm: HashAlgorithm = algorithm.parse()?;
    Ok(hash_string_with(value, algorithm))
}

/// Hashes a string with an already-resolved algorithm.
pub fn hash_string_with(value: &str, algorithm: HashAlgorithm) -> String {
    algorithm.hex_digest(value.as_bytes())
}
