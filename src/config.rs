//! Configuration for spdp-compress

use serde::{Deserialize, Serialize};

use crate::error::CompressError;

/// Highest level accepted by the container. Levels above 9 would all map to the
/// capped prediction table anyway.
pub const MAX_LEVEL: u8 = 9;

/// Largest batch the container will hand to the core in one call.
pub const MAX_BATCH_SIZE: usize = 1 << 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    pub level: u8,
    pub batch_size: usize,
    pub max_input_size: usize,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            level: 8,
            batch_size: 1 << 23,
            max_input_size: 100 * 1024 * 1024, // 100 MB
        }
    }
}

impl CompressionConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CompressError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CompressError> {
        if self.level > MAX_LEVEL {
            return Err(CompressError::InvalidLevel {
                level: self.level,
                max: MAX_LEVEL,
            });
        }
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(CompressError::InvalidBatchSize {
                size: self.batch_size,
                max: MAX_BATCH_SIZE,
            });
        }
        Ok(())
    }
}
