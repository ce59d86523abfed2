//! Container framing around SPDP batches.
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! [level: u8][total_len: u64]
//! ([batch_len: u32][compressed_len: u32][compressed bytes])*
//! ```

use crate::error::CompressError;

pub const STREAM_HEADER_LEN: usize = 1 + 8;
pub const BATCH_HEADER_LEN: usize = 4 + 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamHeader {
    pub level: u8,
    pub total_len: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchHeader {
    pub batch_len: u32,
    pub compressed_len: u32,
}

impl StreamHeader {
    pub fn write(&self, out: &mut Vec<u8>) {
        out.push(self.level);
        out.extend_from_slice(&self.total_len.to_le_bytes());
    }

    pub fn read(data: &[u8]) -> Result<Self, CompressError> {
        let bytes = data
            .get(..STREAM_HEADER_LEN)
            .ok_or(CompressError::TruncatedStream { offset: data.len() })?;
        let mut total = [0u8; 8];
        total.copy_from_slice(&bytes[1..]);
        Ok(Self {
            level: bytes[0],
            total_len: u64::from_le_bytes(total),
        })
    }
}

impl BatchHeader {
    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.batch_len.to_le_bytes());
        out.extend_from_slice(&self.compressed_len.to_le_bytes());
    }

    /// Read a batch header starting at `pos`.
    pub fn read(data: &[u8], pos: usize) -> Result<Self, CompressError> {
        Ok(Self {
            batch_len: read_u32(data, pos)?,
            compressed_len: read_u32(data, pos + 4)?,
        })
    }
}

fn read_u32(data: &[u8], pos: usize) -> Result<u32, CompressError> {
    let bytes = data
        .get(pos..pos + 4)
        .ok_or(CompressError::TruncatedStream { offset: pos })?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
