//! The SPDP batch operations.
//!
//! Both directions run three stages over a caller-owned buffer pair, each stage
//! reading one buffer and writing the other: `buf_in -> buf_out`, then
//! `buf_out -> buf_in`, then `buf_in -> buf_out`. Compression runs word predictor,
//! byte-plane delta, run coder; decompression runs their inverses in reverse order.
//! The input buffer is scratch in both directions and is overwritten.

use crate::error::CompressError;
use crate::{byte_plane, predictor, run_coder};

/// Compress the first `length` bytes of `buf_in` into `buf_out`.
///
/// Returns the compressed length. `buf_in` is clobbered. Both buffers must hold at
/// least `length` bytes; `buf_out` should hold [`run_coder::max_compressed_len`]
/// bytes, otherwise incompressible input fails with
/// [`CompressError::OutputOverflow`].
pub fn compress_batch(
    level: u8,
    length: usize,
    buf_in: &mut [u8],
    buf_out: &mut [u8],
) -> Result<usize, CompressError> {
    check_capacity(length, buf_in.len())?;
    check_capacity(length, buf_out.len())?;

    predictor::encode(&buf_in[..length], &mut buf_out[..length])?;
    byte_plane::encode(&buf_out[..length], &mut buf_in[..length])?;
    let compressed_length = run_coder::encode(level, &buf_in[..length], buf_out)?;

    tracing::trace!(level, length, compressed_length, "compressed batch");
    Ok(compressed_length)
}

/// Decompress the first `compressed_length` bytes of `buf_in` into `buf_out`.
///
/// Returns the reconstructed length. `level` must match the one used to compress.
/// `buf_in` is reused for the intermediate stage, so it must be able to hold the
/// reconstructed length as well.
pub fn decompress_batch(
    level: u8,
    compressed_length: usize,
    buf_in: &mut [u8],
    buf_out: &mut [u8],
) -> Result<usize, CompressError> {
    check_capacity(compressed_length, buf_in.len())?;

    let length = run_coder::decode(level, &buf_in[..compressed_length], buf_out)?;
    check_capacity(length, buf_in.len())?;
    byte_plane::decode(&buf_out[..length], &mut buf_in[..length])?;
    predictor::decode(&buf_in[..length], &mut buf_out[..length])?;

    tracing::trace!(level, compressed_length, length, "decompressed batch");
    Ok(length)
}

fn check_capacity(needed: usize, capacity: usize) -> Result<(), CompressError> {
    if capacity < needed {
        return Err(CompressError::BufferTooSmall { needed, capacity });
    }
    Ok(())
}
