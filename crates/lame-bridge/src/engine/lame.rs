//! Engines backed by `libmp3lame`.

use std::ffi::CStr;
use std::mem::ManuallyDrop;
use std::os::raw::c_int;
use std::ptr::NonNull;

use lame_sys as sys;

use crate::config::{EncoderConfig, VbrMode};
use crate::engine::{DecoderEngine, EncoderEngine};
use crate::error::{Error, Result};
use crate::stream_info::StreamHeader;

/// Version string of the linked LAME library.
pub fn codec_version() -> &'static str {
    // Safety: LAME returns a pointer to a static NUL-terminated string.
    let version = unsafe { CStr::from_ptr(sys::get_lame_version()) };
    version.to_str().unwrap_or("unknown")
}

/// LAME's status for an output buffer that is too small.
const MP3BUF_TOO_SMALL: c_int = -1;

/// Buffer lengths beyond `c_int::MAX` are reported as `c_int::MAX`; the
/// codec never needs more than that.
#[inline]
fn c_len(len: usize) -> c_int {
    c_int::try_from(len).unwrap_or(c_int::MAX)
}

fn vbr_mode(mode: VbrMode) -> sys::vbr_mode {
    match mode {
        VbrMode::Rh => sys::vbr_rh,
        VbrMode::Mtrh => sys::vbr_mtrh,
    }
}

// ─── Encoder ─────────────────────────────────────────────────────────

/// A `lame_global_flags` handle. Closed on drop.
///
/// An output capacity of 0 means "unchecked" to LAME, so empty output
/// buffers are refused here with [`MP3BUF_TOO_SMALL`] instead.
#[derive(Debug)]
pub struct LameEncoder {
    gfp: NonNull<sys::lame_global_flags>,
}

// Safety: the handle is only reachable through `&mut self`; LAME keeps no
// thread-local state.
unsafe impl Send for LameEncoder {}

impl EncoderEngine for LameEncoder {
    fn open(config: &EncoderConfig) -> Result<(Self, i32)> {
        let sample_rate = c_int::try_from(config.sample_rate)
            .map_err(|_| Error::InvalidArgument("sample rate out of range"))?;

        // Safety: lame_init has no preconditions.
        let gfp = NonNull::new(unsafe { sys::lame_init() }).ok_or(Error::CreateFailed)?;
        // From here on, dropping `encoder` closes the handle.
        let encoder = Self { gfp };
        let raw = gfp.as_ptr();

        // Safety: `raw` is a live handle owned by `encoder`.
        let ret = unsafe {
            sys::lame_set_in_samplerate(raw, sample_rate);
            sys::lame_set_num_channels(raw, c_int::from(config.channels));
            if let Some(vbr) = config.preset.vbr() {
                sys::lame_set_VBR_q(raw, c_int::from(vbr.quality));
                sys::lame_set_VBR(raw, vbr_mode(vbr.mode));
            }
            sys::lame_init_params(raw)
        };
        if ret < 0 {
            return Err(Error::Codec(ret));
        }
        Ok((encoder, ret))
    }

    fn encode(&mut self, left: &mut [i16], right: &mut [i16], out: &mut [u8]) -> i32 {
        debug_assert_eq!(left.len(), right.len());
        if out.is_empty() {
            return MP3BUF_TOO_SMALL;
        }
        // Safety: both inputs hold `left.len()` samples and `out` holds
        // `out.len()` bytes; LAME writes at most the capacity it is given.
        unsafe {
            sys::lame_encode_buffer(
                self.gfp.as_ptr(),
                left.as_ptr(),
                right.as_ptr(),
                c_len(left.len()),
                out.as_mut_ptr(),
                c_len(out.len()),
            )
        }
    }

    fn flush(&mut self, out: &mut [u8]) -> i32 {
        if out.is_empty() {
            return MP3BUF_TOO_SMALL;
        }
        // Safety: see `encode`.
        unsafe { sys::lame_encode_flush(self.gfp.as_ptr(), out.as_mut_ptr(), c_len(out.len())) }
    }

    fn lametag_frame(&mut self, out: &mut [u8]) -> usize {
        // Safety: `out` holds `out.len()` bytes and LAME only writes when the
        // whole frame fits.
        unsafe { sys::lame_get_lametag_frame(self.gfp.as_ptr(), out.as_mut_ptr(), out.len()) }
    }

    fn encoder_delay(&self) -> i32 {
        // Safety: live handle.
        unsafe { sys::lame_get_encoder_delay(self.gfp.as_ptr()) }
    }

    fn frame_size(&self) -> i32 {
        // Safety: live handle.
        unsafe { sys::lame_get_framesize(self.gfp.as_ptr()) }
    }

    fn close(self) -> i32 {
        let this = ManuallyDrop::new(self);
        // Safety: the handle is live and `Drop` will not run for it.
        unsafe { sys::lame_close(this.gfp.as_ptr()) }
    }
}

impl Drop for LameEncoder {
    fn drop(&mut self) {
        // Safety: the handle is live; `close` bypasses this impl.
        unsafe { sys::lame_close(self.gfp.as_ptr()) };
    }
}

// ─── Decoder ─────────────────────────────────────────────────────────

/// A `hip_t` handle with the stream metadata it fills in. Exits on drop.
#[derive(Debug)]
pub struct LameDecoder {
    hip: NonNull<sys::hip_global_struct>,
    mp3data: sys::mp3data_struct,
    enc_delay: c_int,
    enc_padding: c_int,
}

// Safety: as for `LameEncoder`.
unsafe impl Send for LameDecoder {}

impl DecoderEngine for LameDecoder {
    fn open() -> Result<Self> {
        // Safety: hip_decode_init has no preconditions.
        let hip = NonNull::new(unsafe { sys::hip_decode_init() }).ok_or(Error::CreateFailed)?;
        Ok(Self {
            hip,
            mp3data: sys::mp3data_struct::default(),
            enc_delay: -1,
            enc_padding: -1,
        })
    }

    fn decode_headers(&mut self, mp3: &mut [u8], left: &mut [i16], right: &mut [i16]) -> i32 {
        debug_assert!(left.len() >= crate::MAX_FRAME_SAMPLES);
        debug_assert!(right.len() >= crate::MAX_FRAME_SAMPLES);
        // Safety: `mp3` holds `mp3.len()` bytes, both outputs hold a full
        // frame, and the metadata/delay/padding outputs are owned by `self`.
        unsafe {
            sys::hip_decode1_headersB(
                self.hip.as_ptr(),
                mp3.as_mut_ptr(),
                mp3.len(),
                left.as_mut_ptr(),
                right.as_mut_ptr(),
                &mut self.mp3data,
                &mut self.enc_delay,
                &mut self.enc_padding,
            )
        }
    }

    fn decode(&mut self, mp3: &mut [u8], left: &mut [i16], right: &mut [i16]) -> i32 {
        debug_assert!(left.len() >= crate::MAX_FRAME_SAMPLES);
        debug_assert!(right.len() >= crate::MAX_FRAME_SAMPLES);
        // Safety: see `decode_headers`.
        unsafe {
            sys::hip_decode1_headers(
                self.hip.as_ptr(),
                mp3.as_mut_ptr(),
                mp3.len(),
                left.as_mut_ptr(),
                right.as_mut_ptr(),
                &mut self.mp3data,
            )
        }
    }

    fn header(&self) -> Option<StreamHeader> {
        let data = &self.mp3data;
        if data.header_parsed == 0 {
            return None;
        }
        Some(StreamHeader {
            channels: u32::try_from(data.stereo).unwrap_or(0),
            sample_rate: u32::try_from(data.samplerate).unwrap_or(0),
            bitrate: u32::try_from(data.bitrate).unwrap_or(0),
            frame_size: u32::try_from(data.framesize).unwrap_or(0),
            total_samples: u64::from(data.nsamp),
        })
    }

    fn delay_padding(&self) -> (i32, i32) {
        (self.enc_delay, self.enc_padding)
    }

    fn close(self) -> i32 {
        let this = ManuallyDrop::new(self);
        // Safety: the handle is live and `Drop` will not run for it.
        unsafe { sys::hip_decode_exit(this.hip.as_ptr()) }
    }
}

impl Drop for LameDecoder {
    fn drop(&mut self) {
        // Safety: the handle is live; `close` bypasses this impl.
        unsafe { sys::hip_decode_exit(self.hip.as_ptr()) };
    }
}
