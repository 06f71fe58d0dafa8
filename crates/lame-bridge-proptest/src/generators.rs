//! PCM generators for property-based testing.
//!
//! Provides both strategy functions (for use with `#[strategy(...)]`) and
//! `Arbitrary`-deriving types for MP3 stream parameters.

use std::f64::consts::TAU;

use proptest::collection::SizeRange;
use proptest::prelude::*;
use test_strategy::Arbitrary;

/// A sample rate MPEG-1, MPEG-2 or MPEG-2.5 layer III can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum SampleRate {
    Hz8000,
    Hz11025,
    Hz12000,
    Hz16000,
    Hz22050,
    Hz24000,
    Hz32000,
    #[weight(3)]
    Hz44100,
    Hz48000,
}

impl SampleRate {
    pub fn hz(self) -> u32 {
        match self {
            Self::Hz8000 => 8000,
            Self::Hz11025 => 11025,
            Self::Hz12000 => 12000,
            Self::Hz16000 => 16000,
            Self::Hz22050 => 22050,
            Self::Hz24000 => 24000,
            Self::Hz32000 => 32000,
            Self::Hz44100 => 44100,
            Self::Hz48000 => 48000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum ChannelCount {
    Mono,
    Stereo,
}

impl ChannelCount {
    pub fn count(self) -> u8 {
        match self {
            Self::Mono => 1,
            Self::Stereo => 2,
        }
    }
}

/// Stream parameters an encoder session can be opened with.
#[derive(Debug, Clone, Copy, Arbitrary)]
pub struct StreamParams {
    pub sample_rate: SampleRate,
    pub channels: ChannelCount,
}

/// One channel of full-scale i16 PCM.
pub fn pcm_block_i16(len: impl Into<SizeRange>) -> impl Strategy<Value = Vec<i16>> {
    proptest::collection::vec(any::<i16>(), len)
}

/// `len` samples of a sine tone at `freq` Hz.
///
/// `amplitude` is clamped to `0.0..=1.0` of full scale.
pub fn sine_tone(freq: f64, sample_rate: u32, len: usize, amplitude: f64) -> Vec<i16> {
    let scale = amplitude.clamp(0.0, 1.0) * f64::from(i16::MAX);
    let step = TAU * freq / f64::from(sample_rate);
    (0..len)
        .map(|n| ((n as f64 * step).sin() * scale).round() as i16)
        .collect()
}
