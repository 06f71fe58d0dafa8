//! Encoder sessions.
//!
//! An [`Encoder`] owns one codec handle from creation until [`Encoder::close`]
//! (or drop). Every call borrows the caller's buffers for its own duration
//! only:
//!
//! - sample buffers are handed to the codec in place, so whatever the codec
//!   does to them stays visible, on success and on failure;
//! - the output buffer is leased ([`OutputLease`]) and only committed when the
//!   codec reports success.

use tracing::{debug, warn};

use crate::config::{EncoderConfig, Preset};
use crate::engine::EncoderEngine;
use crate::error::{Error, Result, check};
use crate::lease::{OutputLease, Release};

/// A live encoder session.
#[derive(Debug)]
pub struct Encoder<E: EncoderEngine> {
    engine: E,
    config: EncoderConfig,
    init_status: i32,
    started: bool,
}

impl<E: EncoderEngine> Encoder<E> {
    /// Opens a codec handle for `config` and finalises its parameters.
    pub fn new(config: EncoderConfig) -> Result<Self> {
        config.validate()?;
        let (engine, init_status) = E::open(&config)?;
        debug!(
            sample_rate = config.sample_rate,
            channels = config.channels,
            preset = ?config.preset,
            status = init_status,
            "encoder initialized"
        );
        Ok(Self {
            engine,
            config,
            init_status,
            started: false,
        })
    }

    /// Status the codec's parameter finalisation returned.
    pub fn init_status(&self) -> i32 {
        self.init_status
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Whether any encode or flush call has reached the codec. Calls refused
    /// before that, such as those with an empty output buffer, do not count.
    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Samples of delay the codec adds at the start of the stream.
    pub fn encoder_delay(&self) -> i32 {
        self.engine.encoder_delay()
    }

    /// Samples per channel per encoded frame.
    pub fn frame_size(&self) -> i32 {
        self.engine.frame_size()
    }

    /// Applies a quality preset.
    ///
    /// [`Preset::Default`] is always a no-op. Any other preset is only
    /// accepted before the first encode or flush: the codec reads its VBR
    /// settings when parameters are finalised, so the handle is re-created
    /// with the preset applied. Afterwards the call fails with
    /// [`Error::EncodingStarted`] and the session is left as it was. A failed
    /// re-creation also leaves the current handle in place.
    pub fn set_preset(&mut self, preset: Preset) -> Result<()> {
        if preset == Preset::Default || preset == self.config.preset {
            return Ok(());
        }
        if self.started {
            warn!(?preset, "preset rejected after encoding started");
            return Err(Error::EncodingStarted);
        }

        let config = self.config.with_preset(preset);
        let (engine, init_status) = E::open(&config)?;
        let previous = std::mem::replace(&mut self.engine, engine);
        let close_status = previous.close();
        self.config = config;
        self.init_status = init_status;
        debug!(?preset, status = init_status, close_status, "encoder preset applied");
        Ok(())
    }

    /// Encodes one block of samples, `left.len()` per channel.
    ///
    /// Mono sessions ignore `right`, but it must still be as long as `left`.
    /// Returns the number of bytes written to the front of `out`.
    pub fn encode(&mut self, left: &mut [i16], right: &mut [i16], out: &mut [u8]) -> Result<usize> {
        if left.len() != right.len() {
            return Err(Error::InvalidArgument("channel buffers differ in length"));
        }
        if i32::try_from(left.len()).is_err() {
            return Err(Error::InvalidArgument("too many samples for one call"));
        }
        refuse_empty(out)?;

        let mut lease = OutputLease::acquire(out);
        let ret = self.engine.encode(left, right, lease.as_mut_slice());
        self.started = true;
        check(lease.settle(ret))
    }

    /// Drains buffered codec state into `out`. Call once after the last
    /// [`encode`](Self::encode).
    pub fn flush(&mut self, out: &mut [u8]) -> Result<usize> {
        refuse_empty(out)?;
        let mut lease = OutputLease::acquire(out);
        let ret = self.engine.flush(lease.as_mut_slice());
        self.started = true;
        check(lease.settle(ret))
    }

    /// Writes the Info tag frame for the finished stream into `out`.
    ///
    /// Call after [`flush`](Self::flush) and overwrite the first frame of the
    /// stream with the returned bytes; the tag carries the frame count and
    /// the encoder delay/padding decoders use to trim the output. Returns
    /// `Ok(0)` when the stream has no tag frame.
    pub fn lametag_frame(&mut self, out: &mut [u8]) -> Result<usize> {
        let mut lease = OutputLease::acquire(out);
        let need = self.engine.lametag_frame(lease.as_mut_slice());
        let have = lease.len();
        if need > have {
            lease.release(Release::Abort);
            return Err(Error::BufferTooSmall { need, have });
        }
        lease.release(Release::Commit);
        Ok(need)
    }

    /// Releases the codec handle and returns its close status.
    pub fn close(self) -> i32 {
        let ret = self.engine.close();
        debug!(status = ret, "encoder closed");
        ret
    }
}

/// An empty output buffer never reaches the codec.
fn refuse_empty(out: &[u8]) -> Result<()> {
    if out.is_empty() {
        return Err(Error::BufferTooSmall { need: 1, have: 0 });
    }
    Ok(())
}
