//! Chain parameters for algorithm selection
//!
//! The Xelis v2 algorithm constants are fixed in the core crate; what varies
//! per deployment is when a header switches to it.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// PEPEPOW mainnet height at which headers hash with Xelis v2
pub const PEPEPOW_CUTOVER_HEIGHT: u64 = 1_930_000;

/// Version bit marking a Xelis v2 header when no height is known
pub const PEPEPOW_VERSION_MASK: u32 = 0x8000;

/// Minimum serialized header length
pub const MIN_HEADER_LEN: usize = 80;

/// Algorithm selection parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParams {
    /// First height hashed with Xelis v2
    #[serde(default = "default_cutover_height")]
    pub cutover_height: u64,
    /// Header version bit selecting Xelis v2 when the height is unknown
    #[serde(default = "default_version_mask")]
    pub version_mask: u32,
    /// Headers shorter than this are rejected; may only be raised above 80
    #[serde(default = "default_min_header_len")]
    pub min_header_len: usize,
}

fn default_cutover_height() -> u64 {
    PEPEPOW_CUTOVER_HEIGHT
}

fn default_version_mask() -> u32 {
    PEPEPOW_VERSION_MASK
}

fn default_min_header_len() -> usize {
    MIN_HEADER_LEN
}

impl ChainParams {
    /// PEPEPOW mainnet parameters
    pub const fn pepepow() -> Self {
        Self {
            cutover_height: PEPEPOW_CUTOVER_HEIGHT,
            version_mask: PEPEPOW_VERSION_MASK,
            min_header_len: MIN_HEADER_LEN,
        }
    }

    /// Decode parameters from JSON; missing fields take the mainnet values
    ///
    /// ```rust
    /// use pepepow_hash::ChainParams;
    ///
    /// let params = ChainParams::from_json(r#"{ "cutover_height": 500 }"#).unwrap();
    /// assert_eq!(params.cutover_height, 500);
    /// assert_eq!(params.version_mask, 0x8000);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Reject parameter sets that cannot select an algorithm
    pub fn validate(&self) -> Result<()> {
        if self.version_mask == 0 {
            return Err(Error::InvalidConfig("version_mask must be non-zero".into()));
        }
        if self.min_header_len < MIN_HEADER_LEN {
            return Err(Error::InvalidConfig(format!(
                "min_header_len {} is below the {MIN_HEADER_LEN}-byte header",
                self.min_header_len
            )));
        }
        Ok(())
    }
}

impl Default for ChainParams {
    fn default() -> Self {
        Self::pepepow()
    }
}
