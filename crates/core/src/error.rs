//! Error types for the LFSR lab.
//!
//! All operations return structured errors rather than panicking. Every
//! variant carries the offending value or index so a caller (usually the CLI
//! layer) can re-prompt or reject input without guessing what went wrong.

use thiserror::Error;

/// Top-level error type for all operations in the core.
///
/// Each variant corresponds to a specific failure domain:
/// - Config: malformed degree, tap list or seed (`InvalidConfig`)
/// - Sequence: empty or unparsable bit sequences (`InvalidSequence`)
/// - Codec: keystream/data mismatches and text conversion failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Register configuration rejected during validation
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Bit sequence unusable for analysis
    #[error("invalid sequence: {0}")]
    InvalidSequence(#[from] SequenceError),

    /// Stream cipher codec failure
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

/// Register configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Degree is zero or wider than one register word
    #[error("degree {degree} outside supported range 1..={max}")]
    InvalidDegree { degree: usize, max: usize },

    /// Tap index falls outside the range allowed by the tap convention
    #[error("tap {tap} outside valid range {min}..={max}")]
    TapOutOfRange { tap: usize, min: usize, max: usize },

    /// Same tap listed twice (it would cancel itself out of the feedback)
    #[error("tap {tap} listed more than once")]
    DuplicateTap { tap: usize },

    /// Feedback needs at least one tap
    #[error("tap list is empty")]
    NoTaps,

    /// Seed width differs from the register degree
    #[error("seed has {actual} bits, degree requires {expected}")]
    SeedLengthMismatch { expected: usize, actual: usize },
}

/// Bit sequence errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// Nothing to analyze
    #[error("sequence is empty")]
    Empty,

    /// Character other than '0' or '1' in a textual bit string
    #[error("invalid bit {found:?} at position {position}")]
    InvalidBit { position: usize, found: char },
}

/// Stream cipher codec errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Data and keystream lengths differ (never truncated or padded)
    #[error("length mismatch: data has {data} bits, keystream has {keystream}")]
    LengthMismatch { data: usize, keystream: usize },

    /// Bit count is not a whole number of 8-bit characters
    #[error("bit count {len} is not a multiple of 8")]
    MalformedBits { len: usize },

    /// Character whose code point does not fit in a single byte
    #[error("character {ch:?} at position {position} is outside the single-byte range")]
    Unencodable { ch: char, position: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
