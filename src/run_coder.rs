//! Context-matched run coder.
//!
//! A rolling hash of the last few bytes indexes a table holding the most recent
//! position seen under that hash. When the six bytes in front of that position equal
//! the six bytes in front of the cursor, the coder emits a run count (possibly 0)
//! telling how many following bytes repeat what came after the earlier position.
//! Every input byte is then followed by one literal. The decoder evolves the same
//! table over the reconstructed bytes, so it knows when a count byte is coming
//! without any flag in the stream.

use crate::error::CompressError;

/// Upper bound on the prediction table, in entries.
pub const MAX_TABLE_SIZE: usize = 1 << 18;

/// Longest run a single count byte can describe.
pub const MAX_RUN: u8 = u8::MAX;

/// Bytes compared in front of both positions before a table hit is trusted.
const CONTEXT_LEN: usize = 6;

/// Number of prediction-table entries used at `level`.
pub fn table_size(level: u8) -> usize {
    1usize
        .checked_shl(u32::from(level) + 9)
        .map_or(MAX_TABLE_SIZE, |size| size.min(MAX_TABLE_SIZE))
}

/// Worst-case encoded size for `length` input bytes: a count byte and a literal
/// for every input byte.
pub fn max_compressed_len(length: usize) -> usize {
    length.saturating_mul(2)
}

/// Prediction table plus rolling context hash. Lives for one call only.
struct ContextModel {
    lastpos: Vec<u32>,
    mask: usize,
    hist: usize,
}

impl ContextModel {
    fn new(level: u8) -> Self {
        let size = table_size(level);
        Self {
            lastpos: vec![0; size],
            mask: size - 1,
            hist: 0,
        }
    }

    fn predicted(&self) -> usize {
        self.lastpos[self.hist] as usize
    }

    fn record(&mut self, pos: usize, byte: u8) {
        self.lastpos[self.hist] = pos as u32;
        self.hist = ((self.hist << 2) ^ usize::from(byte)) & self.mask;
    }
}

/// `lpos` was recorded earlier than `pos`, so `lpos < pos` holds whenever this is
/// called and only `lpos` needs the underflow guard.
fn contexts_match(buf: &[u8], lpos: usize, pos: usize) -> bool {
    lpos >= CONTEXT_LEN && buf[lpos - CONTEXT_LEN..lpos] == buf[pos - CONTEXT_LEN..pos]
}

fn put(buf: &mut [u8], pos: usize, val: u8) -> Result<(), CompressError> {
    let capacity = buf.len();
    let slot = buf
        .get_mut(pos)
        .ok_or(CompressError::OutputOverflow { capacity })?;
    *slot = val;
    Ok(())
}

/// Encode `src` into `dst`, returning the number of bytes written.
///
/// Fails with [`CompressError::OutputOverflow`] instead of writing past `dst`;
/// a `dst` of [`max_compressed_len`] bytes never overflows.
pub fn encode(level: u8, src: &[u8], dst: &mut [u8]) -> Result<usize, CompressError> {
    let length = src.len();
    if u32::try_from(length).is_err() {
        return Err(CompressError::InputTooLarge {
            size: length,
            limit: u32::MAX as usize,
        });
    }

    let mut model = ContextModel::new(level);
    let mut rpos = 0;
    let mut wpos = 0;
    while rpos < length {
        let mut val = src[rpos];
        let mut lpos = model.predicted();
        if contexts_match(src, lpos, rpos) {
            let mut count = 0u8;
            // the last byte is always left for the literal below
            while val == src[lpos] && count < MAX_RUN && rpos < length - 1 {
                model.record(rpos, val);
                rpos += 1;
                lpos += 1;
                count += 1;
                val = src[rpos];
            }
            put(dst, wpos, count)?;
            wpos += 1;
        }
        put(dst, wpos, val)?;
        wpos += 1;
        model.record(rpos, val);
        rpos += 1;
    }
    Ok(wpos)
}

/// Decode all of `src` into `dst`, returning the reconstructed length.
pub fn decode(level: u8, src: &[u8], dst: &mut [u8]) -> Result<usize, CompressError> {
    let mut model = ContextModel::new(level);
    let mut rpos = 0;
    let mut wpos = 0;
    while rpos < src.len() {
        let mut lpos = model.predicted();
        if contexts_match(dst, lpos, wpos) {
            let count = src[rpos];
            rpos += 1;
            for _ in 0..count {
                let val = dst[lpos];
                put(dst, wpos, val)?;
                model.record(wpos, val);
                wpos += 1;
                lpos += 1;
            }
        }
        let val = *src
            .get(rpos)
            .ok_or(CompressError::TruncatedStream { offset: rpos })?;
        put(dst, wpos, val)?;
        model.record(wpos, val);
        wpos += 1;
        rpos += 1;
    }
    Ok(wpos)
}
