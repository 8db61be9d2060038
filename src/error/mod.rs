//! Error types for decode failures.
//!
//! Every failed decode yields [`DecodeErrors`], a non-empty list of
//! [`DecodeError`]s, each locating one rejected value by path.

mod decode_error;

pub(crate) use decode_error::accumulate;
pub use decode_error::{DecodeError, DecodeErrors, ErrorKind};
