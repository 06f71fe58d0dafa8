//! Scripted engines for exercising the session protocol without LAME.
//!
//! Both fakes touch their inputs in place and scribble over their outputs
//! before failing, so tests can observe which writes reach the caller.

use crate::config::EncoderConfig;
use crate::engine::{DecoderEngine, EncoderEngine};
use crate::error::{Error, Result};
use crate::stream_info::{MAX_FRAME_SAMPLES, StreamHeader};

/// Sample rate the fake encoder refuses at parameter finalisation.
pub(crate) const REJECTED_SAMPLE_RATE: u32 = 1;
/// Status the fake encoder reports for a rejected sample rate.
pub(crate) const BAD_PARAMS: i32 = -3;
/// Status for an output buffer that cannot hold the encoded bytes.
pub(crate) const BUFFER_FULL: i32 = -1;
/// Bytes the fake encoder emits per encoded sample.
pub(crate) const BYTES_PER_SAMPLE: usize = 1;
/// Bytes a flush emits when samples were encoded.
pub(crate) const FLUSH_BYTES: usize = 16;
/// Status returned by the fake encoder's close.
pub(crate) const CLOSE_STATUS: i32 = 0;
/// Size of the fake tag frame.
pub(crate) const TAG_BYTES: usize = 12;
/// Byte the fake tag frame is filled with.
pub(crate) const TAG_FILL: u8 = 0x7A;

#[derive(Debug)]
pub(crate) struct FakeEncoder {
    pub(crate) config: EncoderConfig,
    encoded: usize,
    total: usize,
}

impl EncoderEngine for FakeEncoder {
    fn open(config: &EncoderConfig) -> Result<(Self, i32)> {
        if config.sample_rate == REJECTED_SAMPLE_RATE {
            return Err(Error::Codec(BAD_PARAMS));
        }
        Ok((
            Self {
                config: *config,
                encoded: 0,
                total: 0,
            },
            0,
        ))
    }

    fn encode(&mut self, left: &mut [i16], right: &mut [i16], out: &mut [u8]) -> i32 {
        // Pretend the codec works on its input in place.
        for sample in left.iter_mut().chain(right.iter_mut()) {
            *sample = !*sample;
        }
        out.fill(0xEE);
        let need = left.len() * BYTES_PER_SAMPLE;
        if need > out.len() {
            return BUFFER_FULL;
        }
        self.encoded += left.len();
        self.total += left.len();
        need as i32
    }

    fn flush(&mut self, out: &mut [u8]) -> i32 {
        out.fill(0xFF);
        let need = if self.encoded > 0 { FLUSH_BYTES } else { 0 };
        if need > out.len() {
            return BUFFER_FULL;
        }
        self.encoded = 0;
        need as i32
    }

    fn lametag_frame(&mut self, out: &mut [u8]) -> usize {
        if self.total == 0 {
            return 0;
        }
        // Scribble even when the frame does not fit.
        out.fill(0xCC);
        if TAG_BYTES <= out.len() {
            out[..TAG_BYTES].fill(TAG_FILL);
        }
        TAG_BYTES
    }

    fn encoder_delay(&self) -> i32 {
        576
    }

    fn frame_size(&self) -> i32 {
        MAX_FRAME_SAMPLES as i32
    }

    fn close(self) -> i32 {
        CLOSE_STATUS
    }
}

/// Bytes the fake decoder must see before it reports a header.
pub(crate) const HEADER_BYTES: usize = 10;
/// Encoded bytes per fake frame.
pub(crate) const FRAME_BYTES: usize = 20;
/// Header the fake decoder reports.
pub(crate) const HEADER: StreamHeader = StreamHeader {
    channels: 2,
    sample_rate: 44_100,
    bitrate: 128,
    frame_size: MAX_FRAME_SAMPLES as u32,
    total_samples: MAX_FRAME_SAMPLES as u64 * 4 + 100,
};
pub(crate) const DELAY: i32 = 576;
pub(crate) const PADDING: i32 = 1000;
/// Status when asked to decode without new input and less than a frame
/// buffered.
pub(crate) const END_OF_STREAM: i32 = -1;

#[derive(Debug, Default)]
pub(crate) struct FakeDecoder {
    seen: usize,
    buffered: usize,
    header_parsed: bool,
    delay: i32,
    padding: i32,
}

impl FakeDecoder {
    fn step(&mut self, mp3: &mut [u8], left: &mut [i16], right: &mut [i16]) -> i32 {
        left.fill(i16::MIN);
        right.fill(i16::MIN);
        if mp3.is_empty() && self.buffered < FRAME_BYTES {
            return END_OF_STREAM;
        }
        self.seen += mp3.len();
        self.buffered += mp3.len();
        // Consume the input in place.
        mp3.fill(0);
        if self.seen >= HEADER_BYTES {
            self.header_parsed = true;
        }
        if !self.header_parsed || self.buffered < FRAME_BYTES {
            return 0;
        }
        self.buffered -= FRAME_BYTES;
        left[..MAX_FRAME_SAMPLES].fill(100);
        right[..MAX_FRAME_SAMPLES].fill(-100);
        MAX_FRAME_SAMPLES as i32
    }
}

impl DecoderEngine for FakeDecoder {
    fn open() -> Result<Self> {
        Ok(Self {
            delay: -1,
            padding: -1,
            ..Self::default()
        })
    }

    fn decode_headers(&mut self, mp3: &mut [u8], left: &mut [i16], right: &mut [i16]) -> i32 {
        let ret = self.step(mp3, left, right);
        if self.header_parsed {
            self.delay = DELAY;
            self.padding = PADDING;
        }
        ret
    }

    fn decode(&mut self, mp3: &mut [u8], left: &mut [i16], right: &mut [i16]) -> i32 {
        self.step(mp3, left, right)
    }

    fn header(&self) -> Option<StreamHeader> {
        self.header_parsed.then_some(HEADER)
    }

    fn delay_padding(&self) -> (i32, i32) {
        (self.delay, self.padding)
    }

    fn close(self) -> i32 {
        0
    }
}
