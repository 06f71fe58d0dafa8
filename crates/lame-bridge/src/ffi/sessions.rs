//! Process-wide session slots and the status-code protocol around them.
//!
//! The functions here are generic over the codec engine so the protocol can
//! be exercised with scripted engines; the exported `lmb_*` symbols
//! instantiate them with LAME.

use std::slice;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::{EncoderConfig, Preset};
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::engine::{DecoderEngine, EncoderEngine};
use crate::error::{Error, Result, status};
use crate::stream_info::{MAX_FRAME_SAMPLES, StreamInfo};

use super::conversions::{optional_to_c_int, to_c_int};
use super::types::LmbStreamInfo;

/// Holds at most one live session.
pub(crate) struct Slot<T>(Mutex<Option<T>>);

impl<T> Slot<T> {
    pub(crate) const fn new() -> Self {
        Self(Mutex::new(None))
    }

    /// A panic while the lock was held leaves the session between calls,
    /// never half-updated, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Option<T>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn to_status(result: Result<usize>) -> i32 {
    match result {
        Ok(n) => to_c_int(n),
        Err(err) => err.status(),
    }
}

/// Borrows `len` elements at `ptr` mutably. A null pointer is only accepted
/// for an empty buffer.
///
/// # Safety
///
/// A non-null `ptr` must be valid for reads and writes of `len` elements
/// for `'a` and not aliased by any other live reference.
unsafe fn borrow_mut<'a, T>(ptr: *mut T, len: i32) -> std::result::Result<&'a mut [T], i32> {
    let Ok(len) = usize::try_from(len) else {
        return Err(status::INVALID_ARGUMENT);
    };
    if ptr.is_null() {
        return if len == 0 {
            Ok(&mut [])
        } else {
            Err(status::NULL_POINTER)
        };
    }
    // Safety: upheld by the caller.
    Ok(unsafe { slice::from_raw_parts_mut(ptr, len) })
}

// ─── Encoder ─────────────────────────────────────────────────────────

pub(crate) fn initialize_encoder<E: EncoderEngine>(
    slot: &Slot<Encoder<E>>,
    sample_rate: i32,
    channels: i32,
) -> i32 {
    let mut session = slot.lock();
    if session.is_some() {
        return Error::AlreadyInitialized.status();
    }
    let (Ok(sample_rate), Ok(channels)) = (u32::try_from(sample_rate), u8::try_from(channels))
    else {
        return status::INVALID_ARGUMENT;
    };
    match Encoder::new(EncoderConfig::new(sample_rate, channels)) {
        Ok(encoder) => {
            let init_status = encoder.init_status();
            *session = Some(encoder);
            init_status
        }
        Err(err) => err.status(),
    }
}

pub(crate) fn set_encoder_preset<E: EncoderEngine>(slot: &Slot<Encoder<E>>, preset: i32) -> i32 {
    let mut session = slot.lock();
    let Some(encoder) = session.as_mut() else {
        return Error::NotInitialized.status();
    };
    match encoder.set_preset(Preset::from_id(preset)) {
        Ok(()) => status::OK,
        Err(err) => err.status(),
    }
}

/// Session state is checked before any buffer, so a call without a session
/// is always `-1`.
///
/// # Safety
///
/// `left` and `right` must be valid for `sample_count` samples and `out` for
/// `out_capacity` bytes. `left` and `right` may be the same pointer; any
/// other overlap is undefined.
pub(crate) unsafe fn encode<E: EncoderEngine>(
    slot: &Slot<Encoder<E>>,
    left: *mut i16,
    right: *mut i16,
    sample_count: i32,
    out: *mut u8,
    out_capacity: i32,
) -> i32 {
    let mut session = slot.lock();
    let Some(encoder) = session.as_mut() else {
        return Error::NotInitialized.status();
    };

    let same_buffer = left == right;
    // Safety: validity is upheld by the caller; an identical right channel is
    // never borrowed a second time.
    let left = match unsafe { borrow_mut(left, sample_count) } {
        Ok(left) => left,
        Err(code) => return code,
    };
    let mut mirrored;
    let right = if same_buffer {
        // The codec's changes to the mirrored copy are dropped; the caller
        // sees the left channel's.
        mirrored = left.to_vec();
        mirrored.as_mut_slice()
    } else {
        // Safety: as above.
        match unsafe { borrow_mut(right, sample_count) } {
            Ok(right) => right,
            Err(code) => return code,
        }
    };
    // Safety: as above.
    let out = match unsafe { borrow_mut(out, out_capacity) } {
        Ok(out) => out,
        Err(code) => return code,
    };
    to_status(encoder.encode(left, right, out))
}

/// # Safety
///
/// `out` must be valid for `out_capacity` bytes.
pub(crate) unsafe fn flush_encoder<E: EncoderEngine>(
    slot: &Slot<Encoder<E>>,
    out: *mut u8,
    out_capacity: i32,
) -> i32 {
    let mut session = slot.lock();
    let Some(encoder) = session.as_mut() else {
        return Error::NotInitialized.status();
    };
    // Safety: upheld by the caller.
    let out = match unsafe { borrow_mut(out, out_capacity) } {
        Ok(out) => out,
        Err(code) => return code,
    };
    to_status(encoder.flush(out))
}

/// # Safety
///
/// `out` must be valid for `out_capacity` bytes.
pub(crate) unsafe fn encoder_lametag_frame<E: EncoderEngine>(
    slot: &Slot<Encoder<E>>,
    out: *mut u8,
    out_capacity: i32,
) -> i32 {
    let mut session = slot.lock();
    let Some(encoder) = session.as_mut() else {
        return Error::NotInitialized.status();
    };
    // Safety: upheld by the caller.
    let out = match unsafe { borrow_mut(out, out_capacity) } {
        Ok(out) => out,
        Err(code) => return code,
    };
    to_status(encoder.lametag_frame(out))
}

pub(crate) fn close_encoder<E: EncoderEngine>(slot: &Slot<Encoder<E>>) -> i32 {
    match slot.lock().take() {
        Some(encoder) => encoder.close(),
        None => Error::NotInitialized.status(),
    }
}

// ─── Decoder ─────────────────────────────────────────────────────────

pub(crate) fn initialize_decoder<E: DecoderEngine>(slot: &Slot<Decoder<E>>) -> i32 {
    let mut session = slot.lock();
    if session.is_some() {
        return Error::AlreadyInitialized.status();
    }
    match Decoder::new() {
        Ok(decoder) => {
            *session = Some(decoder);
            status::OK
        }
        Err(err) => err.status(),
    }
}

/// # Safety
///
/// `mp3` must be valid for `size` bytes.
pub(crate) unsafe fn configure_decoder<E: DecoderEngine>(
    slot: &Slot<Decoder<E>>,
    mp3: *mut u8,
    size: i32,
) -> i32 {
    let mut session = slot.lock();
    let Some(decoder) = session.as_mut() else {
        return Error::NotInitialized.status();
    };
    // Safety: upheld by the caller.
    let mp3 = match unsafe { borrow_mut(mp3, size) } {
        Ok(mp3) => mp3,
        Err(code) => return code,
    };
    match decoder.configure_from_header(mp3) {
        Ok(_) => status::OK,
        Err(err) => err.status(),
    }
}

/// Reads one metadata field. `-1` without a live, header-parsed session.
pub(crate) fn decoder_field<E: DecoderEngine>(
    slot: &Slot<Decoder<E>>,
    field: impl FnOnce(&StreamInfo) -> i32,
) -> i32 {
    let session = slot.lock();
    match session.as_ref().map(Decoder::stream_info) {
        Some(Ok(info)) => field(&info),
        _ => status::FAILURE,
    }
}

pub(crate) fn decoder_channels<E: DecoderEngine>(slot: &Slot<Decoder<E>>) -> i32 {
    decoder_field(slot, |info| to_c_int(info.channels))
}

pub(crate) fn decoder_sample_rate<E: DecoderEngine>(slot: &Slot<Decoder<E>>) -> i32 {
    decoder_field(slot, |info| to_c_int(info.sample_rate))
}

pub(crate) fn decoder_delay<E: DecoderEngine>(slot: &Slot<Decoder<E>>) -> i32 {
    decoder_field(slot, |info| optional_to_c_int(info.encoder_delay))
}

pub(crate) fn decoder_padding<E: DecoderEngine>(slot: &Slot<Decoder<E>>) -> i32 {
    decoder_field(slot, |info| optional_to_c_int(info.encoder_padding))
}

pub(crate) fn decoder_total_frames<E: DecoderEngine>(slot: &Slot<Decoder<E>>) -> i32 {
    decoder_field(slot, |info| to_c_int(info.total_frames))
}

pub(crate) fn decoder_frame_size<E: DecoderEngine>(slot: &Slot<Decoder<E>>) -> i32 {
    decoder_field(slot, |info| to_c_int(info.frame_size))
}

pub(crate) fn decoder_bitrate<E: DecoderEngine>(slot: &Slot<Decoder<E>>) -> i32 {
    decoder_field(slot, |info| to_c_int(info.bitrate))
}

/// # Safety
///
/// `out` must be null or valid for writing one `LmbStreamInfo`.
pub(crate) unsafe fn decoder_stream_info<E: DecoderEngine>(
    slot: &Slot<Decoder<E>>,
    out: *mut LmbStreamInfo,
) -> i32 {
    let session = slot.lock();
    let Some(decoder) = session.as_ref() else {
        return Error::NotInitialized.status();
    };
    if out.is_null() {
        return status::NULL_POINTER;
    }
    match decoder.stream_info() {
        Ok(info) => {
            // Safety: non-null and valid per the caller.
            unsafe { out.write(LmbStreamInfo::from_rust(&info)) };
            status::OK
        }
        Err(err) => err.status(),
    }
}

/// # Safety
///
/// `mp3` must be valid for `size` bytes; `left` and `right` must each be
/// valid for [`MAX_FRAME_SAMPLES`] samples and must not overlap.
pub(crate) unsafe fn decode_frame<E: DecoderEngine>(
    slot: &Slot<Decoder<E>>,
    mp3: *mut u8,
    size: i32,
    left: *mut i16,
    right: *mut i16,
) -> i32 {
    let mut session = slot.lock();
    let Some(decoder) = session.as_mut() else {
        return Error::NotInitialized.status();
    };
    if !left.is_null() && left == right {
        return status::INVALID_ARGUMENT;
    }
    const FRAME: i32 = MAX_FRAME_SAMPLES as i32;
    // Safety: upheld by the caller.
    let (mp3, left, right) = unsafe {
        match (
            borrow_mut(mp3, size),
            borrow_mut(left, FRAME),
            borrow_mut(right, FRAME),
        ) {
            (Ok(mp3), Ok(left), Ok(right)) => (mp3, left, right),
            (Err(code), _, _) | (_, Err(code), _) | (_, _, Err(code)) => return code,
        }
    };
    to_status(decoder.decode_frame(mp3, left, right))
}

pub(crate) fn close_decoder<E: DecoderEngine>(slot: &Slot<Decoder<E>>) -> i32 {
    match slot.lock().take() {
        Some(decoder) => decoder.close(),
        None => Error::NotInitialized.status(),
    }
}
