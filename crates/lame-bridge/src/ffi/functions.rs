//! Exported `extern "C"` functions for the bridge C API.
//!
//! # Symbol prefix
//!
//! All public symbols use the `lmb_` prefix.

use std::ffi::c_char;

use lame_sys as sys;

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::engine::lame::{LameDecoder, LameEncoder};
use crate::error::status;
use crate::stream_info::mp3_buffer_bound;

use super::conversions::to_c_int;
use super::panic_guard::ffi_guard;
use super::sessions::{self, Slot};
use super::types::LmbStreamInfo;

static ENCODER: Slot<Encoder<LameEncoder>> = Slot::new();
static DECODER: Slot<Decoder<LameDecoder>> = Slot::new();

// ─── Version ─────────────────────────────────────────────────────────

/// Returns a pointer to a static null-terminated version string of this
/// library.
///
/// The returned pointer is valid for the lifetime of the process.
#[unsafe(no_mangle)]
pub extern "C" fn lmb_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr().cast()
}

/// Returns a pointer to the linked LAME library's static version string.
#[unsafe(no_mangle)]
pub extern "C" fn lmb_codec_version() -> *const c_char {
    // Safety: no preconditions; LAME returns a static string.
    unsafe { sys::get_lame_version() }
}

/// Worst-case encoded size in bytes for `samples` samples per channel.
///
/// Returns `LMB_STATUS_INVALID_ARGUMENT` for a negative count.
#[unsafe(no_mangle)]
pub extern "C" fn lmb_mp3_buffer_bound(samples: i32) -> i32 {
    match usize::try_from(samples) {
        Ok(samples) => to_c_int(mp3_buffer_bound(samples)),
        Err(_) => status::INVALID_ARGUMENT,
    }
}

// ─── Encoder ─────────────────────────────────────────────────────────

/// Creates the process-wide encoder session and finalises its parameters.
///
/// Returns the codec's parameter-finalisation status, or `-1` if a session
/// is already live or the codec could not allocate one.
/// `LMB_STATUS_INVALID_ARGUMENT` is returned without touching the codec when
/// `sample_rate` is not positive or `num_channels` is not 1 or 2.
#[unsafe(no_mangle)]
pub extern "C" fn lmb_encoder_initialize(sample_rate: i32, num_channels: i32) -> i32 {
    ffi_guard! {
        sessions::initialize_encoder(&ENCODER, sample_rate, num_channels)
    }
}

/// Applies an `LmbPreset` to the encoder session.
///
/// Unknown ids and `LMB_PRESET_DEFAULT` are no-ops. Returns `-1` without a
/// session or once encoding has started.
#[unsafe(no_mangle)]
pub extern "C" fn lmb_encoder_set_preset(preset: i32) -> i32 {
    ffi_guard! {
        sessions::set_encoder_preset(&ENCODER, preset)
    }
}

/// Encodes `sample_count` samples per channel.
///
/// Returns the number of bytes written to `out`, or a negative status. On
/// failure `out` is left unchanged.
///
/// # Safety
///
/// `left` and `right` must be valid for `sample_count` samples (mono callers
/// may pass the same pointer twice) and `out` for `out_capacity` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lmb_encoder_encode(
    left: *mut i16,
    right: *mut i16,
    sample_count: i32,
    out: *mut u8,
    out_capacity: i32,
) -> i32 {
    ffi_guard! {
        // Safety: forwarded from the caller.
        unsafe { sessions::encode(&ENCODER, left, right, sample_count, out, out_capacity) }
    }
}

/// Drains the encoder. Call once after the last `lmb_encoder_encode()`.
///
/// # Safety
///
/// `out` must be valid for `out_capacity` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lmb_encoder_flush(out: *mut u8, out_capacity: i32) -> i32 {
    ffi_guard! {
        // Safety: forwarded from the caller.
        unsafe { sessions::flush_encoder(&ENCODER, out, out_capacity) }
    }
}

/// Copies the Info tag frame of the finished stream into `out`.
///
/// Call after `lmb_encoder_flush()` and overwrite the first frame of the
/// stream with the returned bytes so decoders see the frame count, delay and
/// padding. Returns the frame size, `0` when the stream has no tag frame, or
/// `LMB_STATUS_BUFFER_TOO_SMALL` with `out` left unchanged.
///
/// # Safety
///
/// `out` must be valid for `out_capacity` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lmb_encoder_lametag_frame(out: *mut u8, out_capacity: i32) -> i32 {
    ffi_guard! {
        // Safety: forwarded from the caller.
        unsafe { sessions::encoder_lametag_frame(&ENCODER, out, out_capacity) }
    }
}

/// Closes the encoder session, returning the codec's close status, or `-1`
/// if there is none.
#[unsafe(no_mangle)]
pub extern "C" fn lmb_encoder_close() -> i32 {
    ffi_guard! {
        sessions::close_encoder(&ENCODER)
    }
}

// ─── Decoder ─────────────────────────────────────────────────────────

/// Creates the process-wide decoder session. `0` on success, `-1` if one is
/// already live or the codec could not allocate one.
#[unsafe(no_mangle)]
pub extern "C" fn lmb_decoder_initialize() -> i32 {
    ffi_guard! {
        sessions::initialize_decoder(&DECODER)
    }
}

/// Feeds the next chunk of the stream until a frame header is parsed.
///
/// Returns `0` once the header is known and `-1` while more data is needed.
///
/// # Safety
///
/// `mp3` must be valid for `size` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lmb_decoder_configure(mp3: *mut u8, size: i32) -> i32 {
    ffi_guard! {
        // Safety: forwarded from the caller.
        unsafe { sessions::configure_decoder(&DECODER, mp3, size) }
    }
}

/// Channel count, or `-1` before a header is parsed.
#[unsafe(no_mangle)]
pub extern "C" fn lmb_decoder_channels() -> i32 {
    ffi_guard! { sessions::decoder_channels(&DECODER) }
}

/// Sample rate in Hz, or `-1` before a header is parsed.
#[unsafe(no_mangle)]
pub extern "C" fn lmb_decoder_sample_rate() -> i32 {
    ffi_guard! { sessions::decoder_sample_rate(&DECODER) }
}

/// Encoder delay in samples; `-1` when unknown.
#[unsafe(no_mangle)]
pub extern "C" fn lmb_decoder_delay() -> i32 {
    ffi_guard! { sessions::decoder_delay(&DECODER) }
}

/// Encoder padding in samples; `-1` when unknown.
#[unsafe(no_mangle)]
pub extern "C" fn lmb_decoder_padding() -> i32 {
    ffi_guard! { sessions::decoder_padding(&DECODER) }
}

/// Total frames in the stream, `0` if the stream does not report its
/// length, `-1` before a header is parsed.
#[unsafe(no_mangle)]
pub extern "C" fn lmb_decoder_total_frames() -> i32 {
    ffi_guard! { sessions::decoder_total_frames(&DECODER) }
}

/// Samples per channel per frame, or `-1` before a header is parsed.
#[unsafe(no_mangle)]
pub extern "C" fn lmb_decoder_frame_size() -> i32 {
    ffi_guard! { sessions::decoder_frame_size(&DECODER) }
}

/// Bitrate in kbps, or `-1` before a header is parsed.
#[unsafe(no_mangle)]
pub extern "C" fn lmb_decoder_bitrate() -> i32 {
    ffi_guard! { sessions::decoder_bitrate(&DECODER) }
}

/// Copies all stream metadata into `info_out`.
///
/// Returns `LMB_STATUS_NOT_READY` before a header is parsed, `-1` without a
/// session.
///
/// # Safety
///
/// `info_out` must be null or valid for writing one `LmbStreamInfo`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lmb_decoder_stream_info(info_out: *mut LmbStreamInfo) -> i32 {
    ffi_guard! {
        // Safety: forwarded from the caller.
        unsafe { sessions::decoder_stream_info(&DECODER, info_out) }
    }
}

/// Decodes at most one frame into `left` and `right`.
///
/// Returns samples per channel written, `0` when more input is needed, or a
/// negative status; on failure both outputs are left unchanged.
///
/// # Safety
///
/// `mp3` must be valid for `size` bytes; `left` and `right` must each hold
/// 1152 samples and must not overlap.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lmb_decoder_decode_frame(
    mp3: *mut u8,
    size: i32,
    left: *mut i16,
    right: *mut i16,
) -> i32 {
    ffi_guard! {
        // Safety: forwarded from the caller.
        unsafe { sessions::decode_frame(&DECODER, mp3, size, left, right) }
    }
}

/// Closes the decoder session, returning the codec's close status, or `-1`
/// if there is none.
#[unsafe(no_mangle)]
pub extern "C" fn lmb_decoder_close() -> i32 {
    ffi_guard! {
        sessions::close_decoder(&DECODER)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
