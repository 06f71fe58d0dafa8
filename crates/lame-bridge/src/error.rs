//! Error type shared by the encoder and decoder sessions.

use thiserror::Error;

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Integer status codes used on the flat C API.
///
/// Codes produced by the bridge itself start at `-100` so they never collide
/// with LAME's own negative return values, which are passed through as-is.
pub mod status {
    /// Success.
    pub const OK: i32 = 0;
    /// State conflict or retryable condition (already initialised, not
    /// initialised, header not parsed yet).
    pub const FAILURE: i32 = -1;
    /// Null pointer passed where a buffer was required.
    pub const NULL_POINTER: i32 = -101;
    /// A panic was caught at the FFI boundary.
    pub const INTERNAL: i32 = -102;
    /// Stream metadata requested before a header was parsed.
    pub const NOT_READY: i32 = -103;
    /// A caller buffer is smaller than the codec requires.
    pub const BUFFER_TOO_SMALL: i32 = -104;
    /// Lengths or counts that do not describe the buffers passed.
    pub const INVALID_ARGUMENT: i32 = -105;
}

/// Errors returned by encoder and decoder sessions.
#[derive(Error, Debug)]
pub enum Error {
    /// A session of this kind is already live.
    #[error("session already initialized")]
    AlreadyInitialized,

    /// No live session.
    #[error("session not initialized")]
    NotInitialized,

    /// The codec could not allocate a handle.
    #[error("codec handle allocation failed")]
    CreateFailed,

    /// The bytes fed so far did not contain a complete frame header.
    /// Retry with more data.
    #[error("stream header not parsed yet")]
    HeaderNotParsed,

    /// Stream metadata was read before a header was parsed.
    #[error("stream info not ready")]
    NotReady,

    /// Encoder configuration cannot change once encoding has begun.
    #[error("encoder configuration is locked after the first encode")]
    EncodingStarted,

    /// The codec returned a negative status.
    #[error("codec error {0}")]
    Codec(i32),

    /// A caller buffer is too small for the operation.
    #[error("buffer too small: need {need}, have {have}")]
    BufferTooSmall { need: usize, have: usize },

    /// Lengths or counts are inconsistent with the buffers passed.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Reading encoded input failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Status code reported on the flat C API for this error.
    ///
    /// Codec errors keep the codec's own value.
    pub fn status(&self) -> i32 {
        match self {
            Self::AlreadyInitialized
            | Self::NotInitialized
            | Self::CreateFailed
            | Self::HeaderNotParsed
            | Self::EncodingStarted
            | Self::Io(_) => status::FAILURE,
            Self::NotReady => status::NOT_READY,
            Self::Codec(code) => *code,
            Self::BufferTooSmall { .. } => status::BUFFER_TOO_SMALL,
            Self::InvalidArgument(_) => status::INVALID_ARGUMENT,
        }
    }

    /// Whether the caller can retry the same operation with more input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::HeaderNotParsed)
    }
}

/// Collapses a codec return value into `Ok(n)` or [`Error::Codec`].
pub(crate) fn check(ret: i32) -> Result<usize> {
    usize::try_from(ret).map_err(|_| Error::Codec(ret))
}
