use std::io;

use thiserror::Error;

use crate::MaskEncoding;

/// Errors that can occur when querying or updating processor affinity.
///
/// Every failure carries the native detail reported by the operating system, so callers can
/// branch on the variant without parsing messages. No operation in this crate substitutes a
/// fallback value on failure - an error here means the caller has no valid result.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested facility does not exist on the current platform.
    ///
    /// This is a property of the build target, determined at compile time, and is therefore
    /// permanent - retrying can never succeed.
    #[error("the current platform does not support {operation}")]
    Unsupported {
        /// The operation that is not available on this platform.
        operation: &'static str,
    },

    /// The operating system reported a failure while answering a read.
    ///
    /// The caller may retry but must not assume any previously obtained value is still valid.
    #[error("the operating system failed to answer {operation}: {source}")]
    Query {
        /// The operation the operating system failed to answer.
        operation: &'static str,

        /// The error reported by the operating system.
        #[source]
        source: io::Error,
    },

    /// The caller lacks the privilege to modify scheduling properties.
    ///
    /// Not retryable without privilege escalation.
    #[error("permission denied while updating thread affinity: {source}")]
    PermissionDenied {
        /// The error reported by the operating system.
        #[source]
        source: io::Error,
    },

    /// The operating system rejected an affinity update.
    #[error("the operating system rejected the affinity update (status {status}): {source}")]
    Set {
        /// The native status code (errno or `kern_return_t`, depending on platform).
        status: i32,

        /// The error reported by the operating system.
        #[source]
        source: io::Error,
    },

    /// A mask was presented in an encoding that is not valid for this platform.
    ///
    /// Encodings are never silently reinterpreted; a mask obtained on one platform encoding
    /// is valid input only to a set call compiled for that same encoding. This error is
    /// raised before any native call is issued.
    #[error(
        "affinity mask uses the {actual} encoding, which is not valid for this platform \
         (native encoding: {expected})"
    )]
    EncodingMismatch {
        /// The encoding the platform requires.
        expected: MaskEncoding,

        /// The encoding the caller supplied.
        actual: MaskEncoding,
    },

    /// A mask value is malformed for its own encoding.
    #[error("invalid affinity mask: {problem}")]
    InvalidMask {
        /// A human-readable description of the problem.
        problem: String,
    },
}

/// A specialized `Result` type for affinity operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
