//! The seam between the session protocol and the native codec.
//!
//! Sessions own exactly one engine each and only ever talk to the codec
//! through these traits. Engines speak the codec's own conventions: plain
//! `i32` statuses, negative meaning failure. Interpreting those statuses and
//! deciding what becomes visible to the caller is the session's job.

use crate::config::EncoderConfig;
use crate::error::Result;
use crate::stream_info::StreamHeader;

#[cfg(test)]
pub(crate) mod fake;
#[cfg(feature = "lame")]
pub mod lame;

/// An open encoder handle.
pub trait EncoderEngine: Sized {
    /// Creates a handle for `config` and finalises its parameters.
    ///
    /// On success returns the handle together with the (non-negative)
    /// parameter-finalisation status. A negative finalisation status is
    /// returned as [`Error::Codec`](crate::Error::Codec) and the handle is
    /// released.
    fn open(config: &EncoderConfig) -> Result<(Self, i32)>;

    /// Encodes `left.len()` samples per channel into `out`.
    ///
    /// `left` and `right` have the same length. Returns the number of bytes
    /// written or a negative status.
    fn encode(&mut self, left: &mut [i16], right: &mut [i16], out: &mut [u8]) -> i32;

    /// Drains buffered state into `out`. Returns bytes written or a negative
    /// status.
    fn flush(&mut self, out: &mut [u8]) -> i32;

    /// Writes the Info tag frame describing the finished stream into `out`.
    ///
    /// Returns the frame's size in bytes, `0` if the stream has no tag
    /// frame. A size larger than `out.len()` means nothing usable was
    /// written.
    fn lametag_frame(&mut self, out: &mut [u8]) -> usize;

    /// Samples of delay the encoder adds at the start of the stream.
    fn encoder_delay(&self) -> i32;

    /// Samples per channel per frame.
    fn frame_size(&self) -> i32;

    /// Releases the handle, returning the codec's close status.
    fn close(self) -> i32;
}

/// An open decoder handle.
pub trait DecoderEngine: Sized {
    fn open() -> Result<Self>;

    /// Header-aware single frame decode that also records encoder
    /// delay/padding when the stream reports them.
    ///
    /// `left` and `right` hold at least
    /// [`MAX_FRAME_SAMPLES`](crate::MAX_FRAME_SAMPLES) samples. Returns
    /// samples decoded per channel, `0` when more input is needed, or a
    /// negative status.
    fn decode_headers(&mut self, mp3: &mut [u8], left: &mut [i16], right: &mut [i16]) -> i32;

    /// Single frame decode. Same buffer rules and return values as
    /// [`decode_headers`](DecoderEngine::decode_headers).
    fn decode(&mut self, mp3: &mut [u8], left: &mut [i16], right: &mut [i16]) -> i32;

    /// The parsed header, once the codec has seen one.
    fn header(&self) -> Option<StreamHeader>;

    /// Raw encoder delay and padding, `-1` while unknown.
    fn delay_padding(&self) -> (i32, i32);

    /// Releases the handle, returning the codec's close status.
    fn close(self) -> i32;
}
