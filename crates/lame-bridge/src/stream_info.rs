//! Stream metadata reported once a decoder has parsed a frame header.

/// PCM samples per channel in one MPEG-1 Layer III frame. Decode output
/// buffers must hold at least this many samples per channel.
pub const MAX_FRAME_SAMPLES: usize = 1152;

/// Worst-case encoded size in bytes for `samples` samples per channel.
///
/// This is LAME's documented bound, `1.25 * samples + 7200`.
#[inline]
pub const fn mp3_buffer_bound(samples: usize) -> usize {
    samples + samples / 4 + 7200
}

/// Header fields as reported by a decoder engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamHeader {
    pub channels: u32,
    pub sample_rate: u32,
    /// Bitrate in kbps.
    pub bitrate: u32,
    /// Samples per channel per frame.
    pub frame_size: u32,
    /// Total samples per channel, 0 when the stream does not say.
    pub total_samples: u64,
}

/// Metadata of a decoder session in the header-parsed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamInfo {
    pub channels: u32,
    pub sample_rate: u32,
    /// Bitrate in kbps.
    pub bitrate: u32,
    pub frame_size: u32,
    /// `total_samples / frame_size`, 0 when either is unknown.
    pub total_frames: u64,
    /// Samples the encoder prepended, if the stream carries an Info tag.
    pub encoder_delay: Option<u32>,
    /// Samples the encoder appended, if the stream carries an Info tag.
    pub encoder_padding: Option<u32>,
}

impl StreamInfo {
    /// Builds the metadata from a parsed header and the raw delay/padding
    /// outputs of the codec (negative meaning unknown).
    pub fn from_header(header: &StreamHeader, delay: i32, padding: i32) -> Self {
        let total_frames = match header.frame_size {
            0 => 0,
            frame_size => header.total_samples / u64::from(frame_size),
        };
        Self {
            channels: header.channels,
            sample_rate: header.sample_rate,
            bitrate: header.bitrate,
            frame_size: header.frame_size,
            total_frames,
            encoder_delay: u32::try_from(delay).ok(),
            encoder_padding: u32::try_from(padding).ok(),
        }
    }

    /// Number of samples per channel the encoder was originally fed, when
    /// the stream reports its length and delay/padding.
    pub fn trimmed_samples(&self, decoded_samples: u64) -> Option<u64> {
        let delay = u64::from(self.encoder_delay?);
        let padding = u64::from(self.encoder_padding?);
        Some(decoded_samples.saturating_sub(delay + padding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(frame_size: u32, total_samples: u64) -> StreamHeader {
        StreamHeader {
            channels: 2,
            sample_rate: 44_100,
            bitrate: 128,
            frame_size,
            total_samples,
        }
    }

    #[test]
    fn total_frames_is_integer_division() {
        let info = StreamInfo::from_header(&header(1152, 1152 * 10 + 500), 576, 1200);
        assert_eq!(info.total_frames, 10);
    }

    #[test]
    fn zero_frame_size_yields_zero_frames() {
        let info = StreamInfo::from_header(&header(0, 5000), -1, -1);
        assert_eq!(info.total_frames, 0);
    }

    #[test]
    fn negative_delay_is_unknown() {
        let info = StreamInfo::from_header(&header(1152, 0), -1, -1);
        assert_eq!(info.encoder_delay, None);
        assert_eq!(info.encoder_padding, None);
        assert_eq!(info.trimmed_samples(10_000), None);
    }

    #[test]
    fn trimmed_samples_subtracts_delay_and_padding() {
        let info = StreamInfo::from_header(&header(1152, 0), 576, 100);
        assert_eq!(info.trimmed_samples(2304), Some(2304 - 676));
        assert_eq!(info.trimmed_samples(10), Some(0));
    }

    #[test]
    fn buffer_bound_matches_lame_formula() {
        assert_eq!(mp3_buffer_bound(0), 7200);
        assert_eq!(mp3_buffer_bound(1152), 1440 + 7200);
    }
}
