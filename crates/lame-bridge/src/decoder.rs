//! Decoder sessions.
//!
//! A [`Decoder`] moves through two live states: initialised, then
//! header-parsed once the codec has identified a frame header. Stream
//! metadata can only be read in the second state; earlier reads fail with
//! [`Error::NotReady`]. Closing (or dropping) the session releases the codec
//! handle and its metadata.
//!
//! Buffer rules match the encoder: encoded input is handed to the codec in
//! place, PCM outputs are leased and only committed on success.

use std::io::{ErrorKind, Read};

use tracing::{debug, trace};

use crate::config::DecoderConfig;
use crate::engine::DecoderEngine;
use crate::error::{Error, Result, check};
use crate::lease::OutputLease;
use crate::stream_info::{MAX_FRAME_SAMPLES, StreamInfo};

/// A live decoder session.
#[derive(Debug)]
pub struct Decoder<E: DecoderEngine> {
    engine: E,
    config: DecoderConfig,
    info: Option<StreamInfo>,
}

impl<E: DecoderEngine> Decoder<E> {
    /// Opens a decoder with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(DecoderConfig::default())
    }

    pub fn with_config(config: DecoderConfig) -> Result<Self> {
        let engine = E::open()?;
        Ok(Self {
            engine,
            config,
            info: None,
        })
    }

    /// Whether a stream header has been parsed.
    pub fn is_configured(&self) -> bool {
        self.info.is_some()
    }

    /// Feeds a chunk of encoded bytes through the header-aware decode until
    /// the codec reports a parsed header.
    ///
    /// Any PCM decoded along the way goes to scratch buffers and is dropped.
    /// Returns [`Error::HeaderNotParsed`] when the bytes fed so far do not
    /// contain a complete header; call again with the next chunk. Once
    /// configured, further calls return the stream info without touching the
    /// codec.
    pub fn configure_from_header(&mut self, mp3: &mut [u8]) -> Result<StreamInfo> {
        if let Some(info) = self.info {
            return Ok(info);
        }

        let mut left = [0i16; MAX_FRAME_SAMPLES];
        let mut right = [0i16; MAX_FRAME_SAMPLES];
        let ret = self.engine.decode_headers(mp3, &mut left, &mut right);

        match self.refresh_info() {
            Some(info) => {
                debug!(
                    sample_rate = info.sample_rate,
                    channels = info.channels,
                    bitrate = info.bitrate,
                    frame_size = info.frame_size,
                    total_frames = info.total_frames,
                    "decoder configured"
                );
                Ok(info)
            }
            None => {
                trace!(status = ret, len = mp3.len(), "no stream header yet");
                Err(Error::HeaderNotParsed)
            }
        }
    }

    /// Reads chunks of
    /// [`configure_chunk_size`](DecoderConfig::configure_chunk_size) bytes
    /// from `reader` and feeds them to
    /// [`configure_from_header`](Self::configure_from_header) until a header
    /// is parsed or the reader runs dry.
    pub fn configure_from_reader<R: Read>(&mut self, reader: &mut R) -> Result<StreamInfo> {
        let mut chunk = vec![0u8; self.config.configure_chunk_size.max(1)];
        loop {
            let n = match reader.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };
            match self.configure_from_header(&mut chunk[..n]) {
                Err(Error::HeaderNotParsed) if n > 0 => continue,
                result => return result,
            }
        }
    }

    /// All stream metadata at once.
    pub fn stream_info(&self) -> Result<StreamInfo> {
        self.info.ok_or(Error::NotReady)
    }

    pub fn channels(&self) -> Result<u32> {
        self.stream_info().map(|info| info.channels)
    }

    pub fn sample_rate(&self) -> Result<u32> {
        self.stream_info().map(|info| info.sample_rate)
    }

    /// Bitrate in kbps.
    pub fn bitrate(&self) -> Result<u32> {
        self.stream_info().map(|info| info.bitrate)
    }

    pub fn frame_size(&self) -> Result<u32> {
        self.stream_info().map(|info| info.frame_size)
    }

    pub fn total_frames(&self) -> Result<u64> {
        self.stream_info().map(|info| info.total_frames)
    }

    /// Encoder delay in samples, `None` if the stream does not report it.
    pub fn encoder_delay(&self) -> Result<Option<u32>> {
        self.stream_info().map(|info| info.encoder_delay)
    }

    /// Encoder padding in samples, `None` if the stream does not report it.
    pub fn encoder_padding(&self) -> Result<Option<u32>> {
        self.stream_info().map(|info| info.encoder_padding)
    }

    /// Decodes at most one frame from `mp3` (plus whatever the codec has
    /// buffered) into `left` and `right`.
    ///
    /// Both outputs must hold [`MAX_FRAME_SAMPLES`] samples. Returns the
    /// samples written per channel; `0` means the codec needs more input.
    /// On a codec error both outputs keep their previous contents.
    pub fn decode_frame(
        &mut self,
        mp3: &mut [u8],
        left: &mut [i16],
        right: &mut [i16],
    ) -> Result<usize> {
        for have in [left.len(), right.len()] {
            if have < MAX_FRAME_SAMPLES {
                return Err(Error::BufferTooSmall {
                    need: MAX_FRAME_SAMPLES,
                    have,
                });
            }
        }

        let mut left = OutputLease::acquire(left);
        let mut right = OutputLease::acquire(right);
        let ret = self
            .engine
            .decode(mp3, left.as_mut_slice(), right.as_mut_slice());
        let ret = right.settle(left.settle(ret));

        if self.info.is_none() {
            self.refresh_info();
        }
        check(ret)
    }

    /// Releases the codec handle and returns its close status.
    pub fn close(self) -> i32 {
        let ret = self.engine.close();
        debug!(status = ret, "decoder closed");
        ret
    }

    fn refresh_info(&mut self) -> Option<StreamInfo> {
        let header = self.engine.header()?;
        let (delay, padding) = self.engine.delay_padding();
        let info = StreamInfo::from_header(&header, delay, padding);
        self.info = Some(info);
        Some(info)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use super::*;
    use crate::engine::fake::{self, FakeDecoder};

    fn decoder() -> Decoder<FakeDecoder> {
        Decoder::new().unwrap()
    }

    fn configured() -> Decoder<FakeDecoder> {
        let mut decoder = decoder();
        decoder.configure_from_header(&mut [1u8; 12]).unwrap();
        decoder
    }

    #[test]
    fn metadata_is_not_ready_before_header() {
        let decoder = decoder();
        assert!(!decoder.is_configured());
        assert!(matches!(decoder.stream_info(), Err(Error::NotReady)));
        assert!(matches!(decoder.channels(), Err(Error::NotReady)));
        assert!(matches!(decoder.sample_rate(), Err(Error::NotReady)));
        assert!(matches!(decoder.bitrate(), Err(Error::NotReady)));
        assert!(matches!(decoder.frame_size(), Err(Error::NotReady)));
        assert!(matches!(decoder.total_frames(), Err(Error::NotReady)));
        assert!(matches!(decoder.encoder_delay(), Err(Error::NotReady)));
        assert!(matches!(decoder.encoder_padding(), Err(Error::NotReady)));
    }

    #[test]
    fn configure_succeeds_once_enough_bytes_arrive() {
        let mut decoder = decoder();
        let mut outcomes = Vec::new();
        for _ in 0..5 {
            let result = decoder.configure_from_header(&mut [1u8; 4]);
            outcomes.push(result.is_ok());
            if result.is_ok() {
                break;
            }
            assert!(result.unwrap_err().is_retryable());
        }
        assert_eq!(outcomes, vec![false, false, true]);
        assert!(decoder.is_configured());
    }

    #[test]
    fn stream_info_after_header() {
        let decoder = configured();
        let info = decoder.stream_info().unwrap();
        assert_eq!(info.channels, 2);
        assert_eq!(info.sample_rate, 44_100);
        assert_eq!(info.bitrate, 128);
        assert_eq!(info.frame_size, 1152);
        assert_eq!(
            info.total_frames,
            fake::HEADER.total_samples / u64::from(fake::HEADER.frame_size)
        );
        assert_eq!(decoder.encoder_delay().unwrap(), Some(fake::DELAY as u32));
        assert_eq!(decoder.encoder_padding().unwrap(), Some(fake::PADDING as u32));
    }

    #[test]
    fn configure_after_header_does_not_feed_codec() {
        let mut decoder = configured();
        let mut chunk = [9u8; 4];
        let info = decoder.configure_from_header(&mut chunk).unwrap();
        assert_eq!(info, decoder.stream_info().unwrap());
        // The fake zeroes what it consumes; this chunk was never handed over.
        assert_eq!(chunk, [9u8; 4]);
    }

    #[test]
    fn configure_from_reader_walks_chunks() {
        let mut decoder = Decoder::<FakeDecoder>::with_config(DecoderConfig {
            configure_chunk_size: 3,
        })
        .unwrap();
        let mut reader = Cursor::new(vec![1u8; 64]);
        decoder.configure_from_reader(&mut reader).unwrap();
        // 4 chunks of 3 bytes are needed to cross the 10 byte header.
        assert_eq!(reader.position(), 12);
    }

    #[test]
    fn configure_from_reader_fails_on_short_stream() {
        let mut decoder = decoder();
        let mut reader = Cursor::new(vec![1u8; 5]);
        assert!(matches!(
            decoder.configure_from_reader(&mut reader),
            Err(Error::HeaderNotParsed)
        ));
    }

    #[test]
    fn configure_from_reader_propagates_io_errors() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("disk gone"))
            }
        }
        let mut decoder = decoder();
        assert!(matches!(
            decoder.configure_from_reader(&mut Broken),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn decode_commits_outputs_and_input() {
        let mut decoder = configured();
        let mut mp3 = [5u8; fake::FRAME_BYTES];
        let mut left = vec![0i16; MAX_FRAME_SAMPLES];
        let mut right = vec![0i16; MAX_FRAME_SAMPLES];

        let n = decoder.decode_frame(&mut mp3, &mut left, &mut right).unwrap();
        assert_eq!(n, MAX_FRAME_SAMPLES);
        assert!(left.iter().all(|&s| s == 100));
        assert!(right.iter().all(|&s| s == -100));
        assert_eq!(mp3, [0u8; fake::FRAME_BYTES]);
    }

    #[test]
    fn decode_past_end_of_stream_keeps_outputs() {
        let mut decoder = configured();
        let mut left = vec![7i16; MAX_FRAME_SAMPLES];
        let mut right = vec![8i16; MAX_FRAME_SAMPLES];

        // Drain what configure buffered.
        while decoder.decode_frame(&mut [], &mut left, &mut right).unwrap_or(0) > 0 {}
        left.fill(7);
        right.fill(8);

        let err = decoder.decode_frame(&mut [], &mut left, &mut right).unwrap_err();
        assert!(matches!(err, Error::Codec(fake::END_OF_STREAM)));
        assert!(left.iter().all(|&s| s == 7));
        assert!(right.iter().all(|&s| s == 8));
    }

    #[test]
    fn need_more_data_is_zero_samples() {
        let mut decoder = configured();
        let mut left = vec![0i16; MAX_FRAME_SAMPLES];
        let mut right = vec![0i16; MAX_FRAME_SAMPLES];
        assert_eq!(decoder.decode_frame(&mut [1u8; 2], &mut left, &mut right).unwrap(), 0);
    }

    #[test]
    fn decode_rejects_short_output_buffers() {
        let mut decoder = configured();
        let mut mp3 = [5u8; fake::FRAME_BYTES];
        let mut left = vec![0i16; 100];
        let mut right = vec![0i16; MAX_FRAME_SAMPLES];
        let err = decoder.decode_frame(&mut mp3, &mut left, &mut right).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferTooSmall {
                need: MAX_FRAME_SAMPLES,
                have: 100
            }
        ));
        assert_eq!(mp3, [5u8; fake::FRAME_BYTES]);
    }

    #[test]
    fn decode_can_discover_header() {
        let mut decoder = decoder();
        let mut mp3 = [5u8; fake::FRAME_BYTES];
        let mut left = vec![0i16; MAX_FRAME_SAMPLES];
        let mut right = vec![0i16; MAX_FRAME_SAMPLES];
        decoder.decode_frame(&mut mp3, &mut left, &mut right).unwrap();

        let info = decoder.stream_info().unwrap();
        assert_eq!(info.sample_rate, 44_100);
        // Plain decode does not report delay/padding.
        assert_eq!(info.encoder_delay, None);
    }

    #[test]
    fn close_returns_codec_status() {
        assert_eq!(configured().close(), 0);
    }
}
