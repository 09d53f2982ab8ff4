//! # Decoder Failure Kinds
//!
//! Every fallible operation in this crate reports one of four closed error
//! kinds, so callers can decide per-field or per-row policy by matching:
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | `Truncated` | fewer bytes available than the format requires |
//! | `InvalidValue` | readable bytes that are semantically illegal |
//! | `Encoding` | text decoding failed |
//! | `Descriptor` | malformed or unrecognized external type descriptor |
//!
//! Failures are always returned, never thrown: no input, however malformed,
//! aborts the process. Partially built outputs are released before the error
//! propagates.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure kinds reported by decoding and type resolution.
#[derive(Debug, Error)]
pub enum Error {
    /// The buffer ended before a required field.
    #[error("unexpected end of buffer: need {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },

    /// Bytes were readable but semantically illegal.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Text bytes did not decode in the declared character set.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The external type descriptor is malformed or names an unknown type.
    #[error("bad type descriptor: {0}")]
    Descriptor(String),
}
