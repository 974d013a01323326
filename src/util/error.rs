//! Error types for stereodepth.

use thiserror::Error;

/// Result alias for stereodepth operations.
pub type StereoDepthResult<T> = std::result::Result<T, StereoDepthError>;

/// Errors reported by shape accessors, the slide engine and the legacy
/// matchers.
///
/// Every entry point validates its inputs before touching the destination
/// buffer, so an error always means nothing was written.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StereoDepthError {
    /// A shape violates the geometry an operation requires.
    #[error("invalid shape: {reason}")]
    InvalidShape { reason: &'static str },
    /// A non-geometric parameter is out of its accepted domain.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },
    /// Shape indexing beyond the declared number of dimensions.
    #[error("index {index} out of range for shape of rank {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// A required buffer is empty.
    #[error("buffer `{name}` is empty")]
    NullBuffer { name: &'static str },
    /// A buffer is shorter than its declared shape requires.
    #[error("buffer `{name}` too small: needed {needed}, got {got}")]
    BufferTooSmall {
        name: &'static str,
        needed: usize,
        got: usize,
    },
    /// Image decoding failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
