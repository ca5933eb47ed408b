//! Header hash selection
//!
//! PEPEPOW headers hash with the legacy chain before the cutover height and
//! with Xelis v2 from it onward. When the caller does not know the height,
//! the header's version bit decides instead.

use std::fmt;

use tracing::{info, trace, warn};

use crate::algorithm;
use crate::config::ChainParams;
use crate::error::{Error, Result};
use crate::legacy::LegacyHasher;

/// Proof-of-work pipeline used for a header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Legacy,
    XelisV2,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Legacy => f.write_str("legacy"),
            Algorithm::XelisV2 => f.write_str("xelis-v2"),
        }
    }
}

/// Entry point for hashing block headers
///
/// Holds no per-call state; share one instance across threads freely.
#[derive(Debug, Clone)]
pub struct HeaderHasher {
    params: ChainParams,
    legacy: LegacyHasher,
}

impl HeaderHasher {
    /// Create a hasher for the given chain parameters
    pub fn new(params: ChainParams, legacy: LegacyHasher) -> Result<Self> {
        params.validate()?;
        Ok(Self::ready(params, legacy))
    }

    /// Create a hasher with PEPEPOW mainnet parameters
    pub fn pepepow(legacy: LegacyHasher) -> Self {
        Self::ready(ChainParams::pepepow(), legacy)
    }

    fn ready(params: ChainParams, legacy: LegacyHasher) -> Self {
        info!(
            cutover_height = params.cutover_height,
            version_mask = params.version_mask,
            min_header_len = params.min_header_len,
            "header hasher ready"
        );
        Self { params, legacy }
    }

    pub fn params(&self) -> &ChainParams {
        &self.params
    }

    /// Decide which pipeline hashes `header`
    ///
    /// A known height always wins over the version bit.
    pub fn select(&self, header: &[u8], height: Option<u64>) -> Result<Algorithm> {
        self.check_len(header)?;

        let algorithm = match height {
            Some(height) if height >= self.params.cutover_height => Algorithm::XelisV2,
            Some(_) => Algorithm::Legacy,
            None => match version(header) {
                Some(version) if version & self.params.version_mask != 0 => Algorithm::XelisV2,
                _ => Algorithm::Legacy,
            },
        };

        trace!(?height, %algorithm, "selected header hash algorithm");
        Ok(algorithm)
    }

    /// Proof-of-work hash of `header`
    pub fn header_hash(&self, header: &[u8], height: Option<u64>) -> Result<[u8; 32]> {
        Ok(match self.select(header, height)? {
            Algorithm::Legacy => self.legacy.hash(header),
            Algorithm::XelisV2 => algorithm::hash(header),
        })
    }

    /// Proof-of-work hash of a header stored at a known height
    pub fn header_hash_for_height(&self, header: &[u8], height: u64) -> Result<[u8; 32]> {
        self.header_hash(header, Some(height))
    }

    /// Legacy chain hash, regardless of height or version
    pub fn legacy_hash(&self, header: &[u8]) -> Result<[u8; 32]> {
        self.check_len(header)?;
        Ok(self.legacy.hash(header))
    }

    /// Xelis v2 hash, regardless of height or version
    pub fn v2_hash(&self, header: &[u8]) -> Result<[u8; 32]> {
        self.check_len(header)?;
        Ok(algorithm::hash(header))
    }

    fn check_len(&self, header: &[u8]) -> Result<()> {
        let min = self.params.min_header_len;
        if header.len() < min {
            warn!(len = header.len(), min, "rejecting short header");
            return Err(Error::InvalidHeader {
                len: header.len(),
                min,
            });
        }
        Ok(())
    }
}

/// Little-endian version field from the first four header bytes
pub fn version(header: &[u8]) -> Option<u32> {
    let bytes = header.get(..4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Byte-reversed hex, the form nodes display block hashes in
pub fn display_hex(digest: &[u8; 32]) -> String {
    let mut reversed = *digest;
    reversed.reverse();
    hex::encode(reversed)
}
