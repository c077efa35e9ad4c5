//! Identity functions: CRC-32 and SHA-1 over a whole buffer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha1::{Digest, Sha1};

use crate::utils::validation::{parse_crc32, ValidationError};

/// CRC-32 (IEEE) of the full buffer
#[must_use]
pub fn crc32(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// SHA-1 of the full buffer
#[must_use]
pub fn sha1(data: &[u8]) -> Sha1Hash {
    let mut hasher = Sha1::new();
    hasher.update(data);
    Sha1Hash(hasher.finalize().into())
}

/// A 160-bit SHA-1 digest
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha1Hash(pub [u8; 20]);

impl Sha1Hash {
    /// Uppercase hex, the form used in ROM databases
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl fmt::Display for Sha1Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Sha1Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sha1Hash({})", self.to_hex())
    }
}

impl FromStr for Sha1Hash {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(s.trim(), &mut bytes).map_err(|_| ValidationError::InvalidSha1)?;
        Ok(Self(bytes))
    }
}

impl Serialize for Sha1Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Sha1Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Identity a caller wants to locate among candidate files.
///
/// Either field may be unknown. A record matches when **any** known field is
/// equal: a CRC-32 hit is accepted even if the SHA-1 differs, which keeps
/// compatibility with databases that only carry one of the two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetIdentity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crc32: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha1: Option<Sha1Hash>,
}

impl TargetIdentity {
    #[must_use]
    pub fn new(crc32: u32, sha1: Sha1Hash) -> Self {
        Self {
            crc32: Some(crc32),
            sha1: Some(sha1),
        }
    }

    #[must_use]
    pub fn from_crc32(crc32: u32) -> Self {
        Self {
            crc32: Some(crc32),
            sha1: None,
        }
    }

    #[must_use]
    pub fn from_sha1(sha1: Sha1Hash) -> Self {
        Self {
            crc32: None,
            sha1: Some(sha1),
        }
    }

    /// Build a target from optional hex strings (as given on the command line)
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidCrc32` or `ValidationError::InvalidSha1`
    /// if a supplied string is malformed.
    pub fn from_hex(crc32: Option<&str>, sha1: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            crc32: crc32.map(parse_crc32).transpose()?,
            sha1: sha1.map(str::parse).transpose()?,
        })
    }

    /// True when neither field is known
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.crc32.is_none() && self.sha1.is_none()
    }

    /// OR-match against a computed identity
    #[must_use]
    pub fn matches(&self, crc32: Option<u32>, sha1: Option<&Sha1Hash>) -> bool {
        let crc_hit = matches!((self.crc32, crc32), (Some(a), Some(b)) if a == b);
        let sha_hit = matches!((self.sha1.as_ref(), sha1), (Some(a), Some(b)) if a == b);
        crc_hit || sha_hit
    }
}
