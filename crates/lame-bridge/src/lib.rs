//! MP3 encoder and decoder sessions over LAME.
//!
//! Wraps `libmp3lame` in two session types, [`Encoder`] and [`Decoder`],
//! and exposes them to C callers through the flat `lmb_*` API in [`ffi`].
//!
//! Caller-visible output buffers are staged through an [`OutputLease`]: the
//! codec writes into a private copy that is committed only when the call
//! succeeds, so a failed call never leaves partial output behind.
//!
//! The codec itself sits behind the [`EncoderEngine`] and [`DecoderEngine`]
//! traits. Enable the `lame` feature to link `libmp3lame` and get the real
//! engines, the [`Mp3Encoder`]/[`Mp3Decoder`] aliases, and the exported C
//! symbols.

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod ffi;
pub mod lease;
pub mod stream_info;

pub use config::{DecoderConfig, EncoderConfig, Preset, Vbr, VbrMode};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use engine::{DecoderEngine, EncoderEngine};
pub use error::{Error, Result};
pub use lease::{OutputLease, Release};
pub use stream_info::{MAX_FRAME_SAMPLES, StreamHeader, StreamInfo, mp3_buffer_bound};

#[cfg(feature = "lame")]
pub use engine::lame::{LameDecoder, LameEncoder, codec_version};

/// Encoder session backed by LAME.
#[cfg(feature = "lame")]
pub type Mp3Encoder = Encoder<LameEncoder>;

/// Decoder session backed by LAME's `hip` decoder.
#[cfg(feature = "lame")]
pub type Mp3Decoder = Decoder<LameDecoder>;
