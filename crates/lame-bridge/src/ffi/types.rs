//! C-compatible type definitions for the bridge C API.
//!
//! All types here are `#[repr(C)]` or `#[repr(i32)]` and are safe to pass
//! across FFI boundaries.

// ---------------------------------------------------------------------------
// Status codes
// ---------------------------------------------------------------------------

/// Status codes produced by the bridge itself.
///
/// Functions return plain `int`s: non-negative values are successes (byte or
/// sample counts where applicable), and negative values that are not listed
/// here come straight from the codec.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LmbStatus {
    /// Operation succeeded.
    Ok = 0,
    /// Session already live, no live session, or header not parsed yet.
    Failure = -1,
    /// Null pointer passed where a buffer was required.
    NullPointer = -101,
    /// Internal error (panic caught at FFI boundary).
    Internal = -102,
    /// Stream metadata requested before a header was parsed.
    NotReady = -103,
    /// A buffer is smaller than the codec requires.
    BufferTooSmall = -104,
    /// Negative count, or identical output buffers.
    InvalidArgument = -105,
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Encoder quality preset.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LmbPreset {
    Default = 0,
    Medium = 1,
    Standard = 2,
    Extreme = 3,
}

// ---------------------------------------------------------------------------
// Stream metadata
// ---------------------------------------------------------------------------

/// Decoder stream metadata, filled by `lmb_decoder_stream_info()`.
///
/// `encoder_delay` and `encoder_padding` are `-1` when the stream does not
/// report them.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LmbStreamInfo {
    pub channels: i32,
    pub sample_rate: i32,
    /// kbps.
    pub bitrate: i32,
    pub frame_size: i32,
    pub total_frames: i64,
    pub encoder_delay: i32,
    pub encoder_padding: i32,
}
