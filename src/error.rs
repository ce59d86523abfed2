//! Error types for spdp-compress

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("invalid compression level {level}: maximum is {max}")]
    InvalidLevel { level: u8, max: u8 },

    #[error("invalid batch size {size}: must be between 1 and {max}")]
    InvalidBatchSize { size: usize, max: usize },

    #[error("input of {size} bytes exceeds limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },

    #[error("buffer too small: need {needed} bytes, have {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },

    #[error("output buffer of {capacity} bytes exhausted")]
    OutputOverflow { capacity: usize },

    #[error("stage buffers differ in length: input {input}, output {output}")]
    LengthMismatch { input: usize, output: usize },

    #[error("compressed stream truncated at offset {offset}")]
    TruncatedStream { offset: usize },

    #[error("corrupt stream: {0}")]
    CorruptStream(String),

    #[error("decompression size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("byte length {len} is not a multiple of element width {width}")]
    MisalignedLength { len: usize, width: usize },

    #[error("configuration error: {0}")]
    ConfigError(#[from] serde_json::Error),
}
