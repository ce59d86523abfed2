//! Byte-plane transpose with per-plane delta coding.
//!
//! Byte `d + 8k` of the input belongs to plane `d`. Planes are written out one after
//! another, each as a chain of wrapping byte differences starting from 0, so bytes of
//! equal significance across neighbouring numbers end up next to each other.

use crate::error::CompressError;

/// Number of interleaved planes.
pub const PLANE_COUNT: usize = 8;

pub fn encode(src: &[u8], dst: &mut [u8]) -> Result<(), CompressError> {
    check_lengths(src, dst)?;

    let mut wpos = 0;
    for plane in 0..PLANE_COUNT {
        let mut prev = 0u8;
        for &curr in src.iter().skip(plane).step_by(PLANE_COUNT) {
            dst[wpos] = curr.wrapping_sub(prev);
            prev = curr;
            wpos += 1;
        }
    }
    Ok(())
}

pub fn decode(src: &[u8], dst: &mut [u8]) -> Result<(), CompressError> {
    check_lengths(src, dst)?;

    let mut rpos = 0;
    for plane in 0..PLANE_COUNT {
        let mut val = 0u8;
        for slot in dst.iter_mut().skip(plane).step_by(PLANE_COUNT) {
            val = val.wrapping_add(src[rpos]);
            *slot = val;
            rpos += 1;
        }
    }
    Ok(())
}

fn check_lengths(src: &[u8], dst: &[u8]) -> Result<(), CompressError> {
    if src.len() != dst.len() {
        return Err(CompressError::LengthMismatch {
            input: src.len(),
            output: dst.len(),
        });
    }
    Ok(())
}
