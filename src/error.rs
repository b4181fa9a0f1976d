//! The single error type shared by every codec in this crate.

use thiserror::Error;

/// Failure modes shared by every encoder/decoder in this crate.
///
/// All fallible operations return `Result<T, CodecError>`; nothing is retried
/// internally and no partial output is returned on error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A value exceeds the codec's representable range.
    #[error("value {value} exceeds the maximum representable by this codec ({max})")]
    ValueTooLarge {
        /// The offending value.
        value: u64,
        /// The largest value the codec can represent.
        max: u64,
    },

    /// A codec that requires a non-decreasing input received an out-of-order value.
    #[error("sequence is not monotone non-decreasing at index {index}: {previous} > {value}")]
    NonMonotonic {
        /// Index of the offending value.
        index: usize,
        /// The value immediately preceding it.
        previous: u64,
        /// The offending value.
        value: u64,
    },

    /// Decoding ran out of input before completing a value or a block.
    #[error("stream truncated while decoding at bit offset {bit_offset}: {context}")]
    TruncatedStream {
        /// Absolute bit offset at which decoding stalled.
        bit_offset: usize,
        /// What was being decoded when the stream ran out.
        context: &'static str,
    },

    /// Decoding found a selector/header value outside its valid range.
    #[error("corrupt stream at bit offset {bit_offset}: {context}")]
    CorruptStream {
        /// Absolute bit offset of the bad header/selector.
        bit_offset: usize,
        /// What looked wrong.
        context: &'static str,
    },

    /// The caller-supplied decode count disagrees with what the stream allows.
    #[error("requested count {requested} is incompatible with the encoded stream ({available})")]
    CountMismatch {
        /// The count the caller asked to decode.
        requested: usize,
        /// What the stream can actually provide, as human-readable context.
        available: &'static str,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, CodecError>;
