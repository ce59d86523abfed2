//! Second-order word predictor.
//!
//! Each little-endian 32-bit word is replaced by its wrapping difference from the
//! word two positions earlier. Bytes past the last whole word pass through unchanged.

use crate::error::CompressError;

/// Width of the words the predictor operates on.
pub const WORD_SIZE: usize = 4;

/// Replace every word with `word[i] - word[i - 2]`.
pub fn encode(src: &[u8], dst: &mut [u8]) -> Result<(), CompressError> {
    check_lengths(src, dst)?;

    let mut src_words = src.chunks_exact(WORD_SIZE);
    let mut dst_words = dst.chunks_exact_mut(WORD_SIZE);
    let mut prev2 = 0u32;
    let mut prev1 = 0u32;
    for (s, d) in (&mut src_words).zip(&mut dst_words) {
        let curr = load(s);
        d.copy_from_slice(&curr.wrapping_sub(prev2).to_le_bytes());
        prev2 = prev1;
        prev1 = curr;
    }
    dst_words
        .into_remainder()
        .copy_from_slice(src_words.remainder());
    Ok(())
}

/// Undo [`encode`]: `word[i] = delta[i] + word[i - 2]`.
pub fn decode(src: &[u8], dst: &mut [u8]) -> Result<(), CompressError> {
    check_lengths(src, dst)?;

    let mut src_words = src.chunks_exact(WORD_SIZE);
    let mut dst_words = dst.chunks_exact_mut(WORD_SIZE);
    let mut prev2 = 0u32;
    let mut prev1 = 0u32;
    for (s, d) in (&mut src_words).zip(&mut dst_words) {
        let curr = load(s).wrapping_add(prev2);
        d.copy_from_slice(&curr.to_le_bytes());
        prev2 = prev1;
        prev1 = curr;
    }
    dst_words
        .into_remainder()
        .copy_from_slice(src_words.remainder());
    Ok(())
}

fn load(word: &[u8]) -> u32 {
    u32::from_le_bytes([word[0], word[1], word[2], word[3]])
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
