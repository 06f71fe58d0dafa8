//! Encoder and decoder session configuration.

use crate::error::{Error, Result};

/// Encoder quality presets exposed to callers.
///
/// Each non-default preset selects a variable-bitrate quality level. The
/// discriminants are the integer ids used on the C API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum Preset {
    /// Keep whatever the codec was initialised with.
    #[default]
    Default = 0,
    /// VBR quality 4.
    Medium = 1,
    /// VBR quality 2.
    Standard = 2,
    /// VBR quality 0.
    Extreme = 3,
}

impl Preset {
    /// Maps a C API preset id. Unknown ids map to [`Preset::Default`].
    pub fn from_id(id: i32) -> Self {
        match id {
            1 => Self::Medium,
            2 => Self::Standard,
            3 => Self::Extreme,
            _ => Self::Default,
        }
    }

    /// VBR settings this preset applies, or `None` for [`Preset::Default`].
    pub fn vbr(self) -> Option<Vbr> {
        let quality = match self {
            Self::Default => return None,
            Self::Medium => 4,
            Self::Standard => 2,
            Self::Extreme => 0,
        };
        Some(Vbr {
            quality,
            mode: VbrMode::Rh,
        })
    }
}

/// VBR algorithm variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VbrMode {
    /// Slower, older algorithm.
    Rh,
    /// Faster algorithm, LAME's default VBR mode.
    Mtrh,
}

/// Variable-bitrate settings: quality 0 (best) to 9 (smallest).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vbr {
    pub quality: u8,
    pub mode: VbrMode,
}

/// Parameters an encoder session is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Input sample rate in Hz.
    pub sample_rate: u32,
    /// Input channel count, 1 or 2.
    pub channels: u8,
    pub preset: Preset,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            channels: 2,
            preset: Preset::Default,
        }
    }
}

impl EncoderConfig {
    /// Config for the given input format with the default preset.
    pub fn new(sample_rate: u32, channels: u8) -> Self {
        Self {
            sample_rate,
            channels,
            preset: Preset::Default,
        }
    }

    /// Set the quality preset.
    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.preset = preset;
        self
    }

    /// Rejects values the codec cannot be asked for at all. Rate support is
    /// left to the codec's own parameter check.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(Error::InvalidArgument("sample rate must be positive"));
        }
        if !(1..=2).contains(&self.channels) {
            return Err(Error::InvalidArgument("channel count must be 1 or 2"));
        }
        Ok(())
    }
}

/// Default number of bytes read per attempt when configuring a decoder from
/// a reader.
pub const DEFAULT_CONFIGURE_CHUNK_SIZE: usize = 100;

/// Decoder session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Chunk size used by [`Decoder::configure_from_reader`](crate::Decoder::configure_from_reader).
    pub configure_chunk_size: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            configure_chunk_size: DEFAULT_CONFIGURE_CHUNK_SIZE,
        }
    }
}
