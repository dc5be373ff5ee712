//! Errors for validating public inputs.
//!
//! Nothing in here is ever raised on secret data: the inversion engine is total
//! and has no error path. These variants only cover looking up a parameter set
//! and parsing the byte encoding of a ring element.

use thiserror::Error;

/// Error type for the public API.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No shipped parameter set (and addition chain) exists for this `r`.
    #[error("unsupported ring degree: r = {0}")]
    UnsupportedR(u32),

    /// A ring element encoding had the wrong number of bytes.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// `R_BYTES` of the parameter set
        expected: usize,
        /// length of the supplied buffer
        actual: usize,
    },

    /// Bits at positions `>= r` were set in a ring element encoding.
    #[error("bits beyond the ring degree are set")]
    NonZeroPadding,
}
