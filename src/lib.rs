//! spdp-compress: lossless SPDP compression for floating-point arrays.
//!
//! SPDP runs three byte-exact stages over a buffer of fixed-width numbers:
//! - a second-order word predictor over 32-bit words
//! - a byte-plane transpose with per-plane delta coding
//! - a context-matched run coder driven by a rolling hash table
//!
//! [`compress_batch`] and [`decompress_batch`] expose the core over caller-owned
//! scratch buffers. [`Compressor`] wraps them in a framed container that splits
//! large inputs into batches and validates everything it reads back.

pub mod batch;
pub mod byte_plane;
pub mod config;
pub mod error;
pub mod frame;
pub mod predictor;
pub mod run_coder;

use bytemuck::{Pod, Zeroable};

use crate::config::{CompressionConfig, MAX_LEVEL};
use crate::error::CompressError;
use crate::frame::{BatchHeader, StreamHeader, BATCH_HEADER_LEN, STREAM_HEADER_LEN};

pub use crate::batch::{compress_batch, decompress_batch};
pub use crate::run_coder::max_compressed_len;

/// Compressed output container
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CompressedOutput {
    pub level: u8,
    pub original_size: usize,
    pub compressed_size: usize,
    /// Framed stream, see [`frame`].
    pub data: Vec<u8>,
    pub ratio: f64,
    pub metadata: CompressionMetadata,
}

/// Metadata about the compression process
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CompressionMetadata {
    pub batch_count: usize,
}

/// The main compressor engine
pub struct Compressor {
    config: CompressionConfig,
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new(CompressionConfig::default())
    }
}

impl Compressor {
    /// Create a new compressor with the given configuration
    pub fn new(config: CompressionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }

    /// Compress a byte buffer into a framed SPDP stream
    pub fn compress(&self, data: &[u8]) -> Result<CompressedOutput, CompressError> {
        self.config.validate()?;
        if data.len() > self.config.max_input_size {
            return Err(CompressError::InputTooLarge {
                size: data.len(),
                limit: self.config.max_input_size,
            });
        }

        let level = self.config.level;
        let mut framed = Vec::with_capacity(STREAM_HEADER_LEN + data.len());
        StreamHeader {
            level,
            total_len: data.len() as u64,
        }
        .write(&mut framed);

        // the core overwrites its input, so every batch is copied into scratch first
        let mut scratch_in = Vec::new();
        let mut scratch_out = Vec::new();
        let mut batch_count = 0;
        for chunk in data.chunks(self.config.batch_size) {
            scratch_in.clear();
            scratch_in.extend_from_slice(chunk);
            scratch_out.clear();
            scratch_out.resize(max_compressed_len(chunk.len()), 0);

            let csize = compress_batch(level, chunk.len(), &mut scratch_in, &mut scratch_out)?;
            BatchHeader {
                batch_len: chunk.len() as u32,
                compressed_len: csize as u32,
            }
            .write(&mut framed);
            framed.extend_from_slice(&scratch_out[..csize]);

            tracing::debug!(
                batch = batch_count,
                batch_len = chunk.len(),
                compressed_len = csize,
                "compressed batch"
            );
            batch_count += 1;
        }

        let ratio = if data.is_empty() {
            1.0
        } else {
            framed.len() as f64 / data.len() as f64
        };
        tracing::debug!(
            level,
            original_size = data.len(),
            compressed_size = framed.len(),
            batch_count,
            "compressed stream"
        );

        Ok(CompressedOutput {
            level,
            original_size: data.len(),
            compressed_size: framed.len(),
            data: framed,
            ratio,
            metadata: CompressionMetadata { batch_count },
        })
    }

    /// Compress a slice of fixed-width numbers (integers or floats)
    pub fn compress_numbers<T: Pod>(&self, nums: &[T]) -> Result<CompressedOutput, CompressError> {
        self.compress(bytemuck::cast_slice(nums))
    }

    /// Decompress a container produced by [`Compressor::compress`]
    pub fn decompress(&self, output: &CompressedOutput) -> Result<Vec<u8>, CompressError> {
        let data = self.decompress_bytes(&output.data)?;
        if data.len() != output.original_size {
            return Err(CompressError::SizeMismatch {
                expected: output.original_size,
                actual: data.len(),
            });
        }
        Ok(data)
    }

    /// Decompress a framed stream. The level is taken from the stream header.
    pub fn decompress_bytes(&self, data: &[u8]) -> Result<Vec<u8>, CompressError> {
        let header = StreamHeader::read(data)?;
        if header.level > MAX_LEVEL {
            return Err(CompressError::InvalidLevel {
                level: header.level,
                max: MAX_LEVEL,
            });
        }
        let total = usize::try_from(header.total_len).unwrap_or(usize::MAX);
        if total > self.config.max_input_size {
            return Err(CompressError::InputTooLarge {
                size: total,
                limit: self.config.max_input_size,
            });
        }

        let mut output = Vec::with_capacity(total);
        let mut scratch_in = Vec::new();
        let mut scratch_out = Vec::new();
        let mut pos = STREAM_HEADER_LEN;
        while pos < data.len() {
            let batch = BatchHeader::read(data, pos)?;
            pos += BATCH_HEADER_LEN;
            let batch_len = batch.batch_len as usize;
            let csize = batch.compressed_len as usize;
            if batch_len > total - output.len() {
                return Err(CompressError::CorruptStream(format!(
                    "batch of {} bytes overruns declared total of {} bytes",
                    batch_len, total
                )));
            }
            let compressed = data
                .get(pos..pos + csize)
                .ok_or(CompressError::TruncatedStream { offset: data.len() })?;

            scratch_in.clear();
            scratch_in.extend_from_slice(compressed);
            scratch_in.resize(csize.max(batch_len), 0);
            scratch_out.clear();
            scratch_out.resize(batch_len, 0);

            let n = decompress_batch(header.level, csize, &mut scratch_in, &mut scratch_out)?;
            if n != batch_len {
                return Err(CompressError::SizeMismatch {
                    expected: batch_len,
                    actual: n,
                });
            }
            output.extend_from_slice(&scratch_out[..n]);
            pos += csize;

            tracing::debug!(batch_len, compressed_len = csize, "decompressed batch");
        }

        if output.len() != total {
            return Err(CompressError::SizeMismatch {
                expected: total,
                actual: output.len(),
            });
        }
        Ok(output)
    }

    /// Decompress a framed stream back into fixed-width numbers
    pub fn decompress_numbers<T: Pod>(&self, data: &[u8]) -> Result<Vec<T>, CompressError> {
        let bytes = self.decompress_bytes(data)?;
        let width = std::mem::size_of::<T>();
        if width == 0 || bytes.len() % width != 0 {
            return Err(CompressError::MisalignedLength {
                len: bytes.len(),
                width,
            });
        }
        let mut nums = vec![T::zeroed(); bytes.len() / width];
        bytemuck::cast_slice_mut::<T, u8>(&mut nums).copy_from_slice(&bytes);
        Ok(nums)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_bytes() {
        let compressor = Compressor::default();
        let data = b"the quick brown fox jumps over the lazy dog";
        let compressed = compressor.compress(data).unwrap();
        assert_eq!(compressed.original_size, data.len());
        assert_eq!(compressed.level, 8);
        let decompressed = compressor.decompress(&compressed).unwrap();
        assert_eq!(decompressed, data);
    }

    #[test]
    fn test_empty_input() {
        let compressor = Compressor::default();
        let compressed = compressor.compress(b"").unwrap();
        assert_eq!(compressed.compressed_size, STREAM_HEADER_LEN);
        assert_eq!(compressed.metadata.batch_count, 0);
        assert_eq!(compressed.ratio, 1.0);
        assert!(compressor.decompress(&compressed).unwrap().is_empty());
    }

    #[test]
    fn test_multiple_batches() {
        let compressor = Compressor::new(CompressionConfig {
            batch_size: 1000,
            ..CompressionConfig::default()
        });
        let data: Vec<u8> = (0..4500u32).map(|i| (i / 3) as u8).collect();
        let compressed = compressor.compress(&data).unwrap();
        assert_eq!(compressed.metadata.batch_count, 5);
        assert_eq!(compressor.decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn test_compression_ratio() {
        let compressor = Compressor::default();
        let data = vec![0x42u8; 100_000];
        let result = compressor.compress(&data).unwrap();
        assert!(result.ratio < 0.1, "repetitive data should compress well");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let compressor = Compressor::new(CompressionConfig {
            level: 20,
            ..CompressionConfig::default()
        });
        assert!(matches!(
            compressor.compress(b"abc"),
            Err(CompressError::InvalidLevel { level: 20, .. })
        ));
    }

    #[test]
    fn test_input_limit() {
        let compressor = Compressor::new(CompressionConfig {
            max_input_size: 16,
            ..CompressionConfig::default()
        });
        assert!(matches!(
            compressor.compress(&[0u8; 17]),
            Err(CompressError::InputTooLarge { size: 17, limit: 16 })
        ));
    }

    #[test]
    fn test_numbers_roundtrip_f64() {
        let compressor = Compressor::default();
        let nums: Vec<f64> = (0..2000).map(|i| (i as f64 * 0.01).sin()).collect();
        let compressed = compressor.compress_numbers(&nums).unwrap();
        let restored: Vec<f64> = compressor.decompress_numbers(&compressed.data).unwrap();
        assert_eq!(restored.len(), nums.len());
        for (a, b) in restored.iter().zip(&nums) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_numbers_misaligned() {
        let compressor = Compressor::default();
        let compressed = compressor.compress(&[1u8, 2, 3, 4, 5, 6]).unwrap();
        assert!(matches!(
            compressor.decompress_numbers::<u32>(&compressed.data),
            Err(CompressError::MisalignedLength { len: 6, width: 4 })
        ));
        let halves: Vec<u16> = compressor.decompress_numbers(&compressed.data).unwrap();
        assert_eq!(halves.len(), 3);
    }

    #[test]
    fn test_level_read_from_stream() {
        let writer = Compressor::new(CompressionConfig {
            level: 2,
            ..CompressionConfig::default()
        });
        let data: Vec<u8> = (0..3000u32).map(|i| (i % 17) as u8).collect();
        let compressed = writer.compress(&data).unwrap();
        assert_eq!(compressed.data[0], 2);
        let reader = Compressor::default();
        assert_eq!(reader.decompress_bytes(&compressed.data).unwrap(), data);
    }
}
