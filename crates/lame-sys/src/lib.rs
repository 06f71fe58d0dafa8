//! Raw FFI declarations for LAME (`libmp3lame`).
//!
//! Covers the encoder entry points and the `hip_*` decoder entry points used
//! by `lame-bridge`, declared by hand from `lame.h` (LAME 3.100). Nothing here
//! is safe to call directly; see `lame-bridge` for the session wrappers.

#![allow(non_camel_case_types, non_upper_case_globals, non_snake_case)]

use std::os::raw::{c_char, c_int, c_short, c_uchar, c_ulong};

/// Opaque encoder state (`lame_global_flags`).
#[repr(C)]
pub struct lame_global_flags {
    _private: [u8; 0],
}

/// `lame_t` is a plain alias of the encoder state pointer.
pub type lame_t = *mut lame_global_flags;

/// Opaque decoder state (`struct hip_global_struct`).
#[repr(C)]
pub struct hip_global_struct {
    _private: [u8; 0],
}

/// `hip_t` is a pointer to the decoder state.
pub type hip_t = *mut hip_global_struct;

// `vbr_mode` values.
pub type vbr_mode = c_int;
pub const vbr_off: vbr_mode = 0;
pub const vbr_mt: vbr_mode = 1;
pub const vbr_rh: vbr_mode = 2;
pub const vbr_abr: vbr_mode = 3;
pub const vbr_mtrh: vbr_mode = 4;
pub const vbr_default: vbr_mode = vbr_mtrh;

/// Stream metadata filled in by the `hip_decode*_headers*` family.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct mp3data_struct {
    /// 1 once a frame header has been parsed, 0 otherwise.
    pub header_parsed: c_int,
    /// Number of channels.
    pub stereo: c_int,
    pub samplerate: c_int,
    /// kbps.
    pub bitrate: c_int,
    pub mode: c_int,
    pub mode_ext: c_int,
    /// Samples per frame.
    pub framesize: c_int,
    /// Total samples per channel, 0 when the stream carries no Xing/Info tag.
    pub nsamp: c_ulong,
    /// Not computed by LAME itself.
    pub totalframes: c_int,
    pub framenum: c_int,
}

unsafe extern "C" {
    pub fn get_lame_version() -> *const c_char;

    // ─── Encoder ─────────────────────────────────────────────────────

    pub fn lame_init() -> *mut lame_global_flags;
    pub fn lame_close(gfp: *mut lame_global_flags) -> c_int;

    pub fn lame_set_in_samplerate(gfp: *mut lame_global_flags, rate: c_int) -> c_int;
    pub fn lame_set_num_channels(gfp: *mut lame_global_flags, channels: c_int) -> c_int;
    pub fn lame_set_VBR(gfp: *mut lame_global_flags, mode: vbr_mode) -> c_int;
    pub fn lame_set_VBR_q(gfp: *mut lame_global_flags, quality: c_int) -> c_int;

    pub fn lame_init_params(gfp: *mut lame_global_flags) -> c_int;

    pub fn lame_get_encoder_delay(gfp: *const lame_global_flags) -> c_int;
    pub fn lame_get_framesize(gfp: *const lame_global_flags) -> c_int;

    pub fn lame_encode_buffer(
        gfp: *mut lame_global_flags,
        buffer_l: *const c_short,
        buffer_r: *const c_short,
        nsamples: c_int,
        mp3buf: *mut c_uchar,
        mp3buf_size: c_int,
    ) -> c_int;

    pub fn lame_encode_flush(
        gfp: *mut lame_global_flags,
        mp3buf: *mut c_uchar,
        size: c_int,
    ) -> c_int;

    /// Copies the finished Info/Xing tag frame into `buffer`. Returns the
    /// frame size, which is larger than `size` if nothing was copied, or 0
    /// when tag writing is disabled.
    pub fn lame_get_lametag_frame(
        gfp: *const lame_global_flags,
        buffer: *mut c_uchar,
        size: usize,
    ) -> usize;

    // ─── Decoder ─────────────────────────────────────────────────────

    pub fn hip_decode_init() -> hip_t;
    pub fn hip_decode_exit(gfp: hip_t) -> c_int;

    /// Decodes at most one frame. `pcm_l` and `pcm_r` must hold 1152 samples.
    pub fn hip_decode1_headers(
        gfp: hip_t,
        mp3buf: *mut c_uchar,
        len: usize,
        pcm_l: *mut c_short,
        pcm_r: *mut c_short,
        mp3data: *mut mp3data_struct,
    ) -> c_int;

    /// Like [`hip_decode1_headers`], also reporting encoder delay and padding
    /// once the Xing/Info tag has been seen (otherwise both stay untouched).
    pub fn hip_decode1_headersB(
        gfp: hip_t,
        mp3buf: *mut c_uchar,
        len: usize,
        pcm_l: *mut c_short,
        pcm_r: *mut c_short,
        mp3data: *mut mp3data_struct,
        enc_delay: *mut c_int,
        enc_padding: *mut c_int,
    ) -> c_int;
}
