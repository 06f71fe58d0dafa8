//! Conversions between C API types and Rust types.

use crate::stream_info::StreamInfo;

use super::types::LmbStreamInfo;

/// Saturating conversion for metadata the C side reads as `int`.
#[inline]
pub(crate) fn to_c_int<T: TryInto<i32>>(value: T) -> i32 {
    value.try_into().unwrap_or(i32::MAX)
}

/// `-1` for unknown, the value otherwise.
#[inline]
pub(crate) fn optional_to_c_int(value: Option<u32>) -> i32 {
    value.map_or(-1, to_c_int)
}

impl LmbStreamInfo {
    pub(crate) fn from_rust(info: &StreamInfo) -> Self {
        Self {
            channels: to_c_int(info.channels),
            sample_rate: to_c_int(info.sample_rate),
            bitrate: to_c_int(info.bitrate),
            frame_size: to_c_int(info.frame_size),
            total_frames: i64::try_from(info.total_frames).unwrap_or(i64::MAX),
            encoder_delay: optional_to_c_int(info.encoder_delay),
            encoder_padding: optional_to_c_int(info.encoder_padding),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;
    use crate::error::status;
    use crate::ffi::types::{LmbPreset, LmbStatus};

    #[test]
    fn status_enum_matches_status_codes() {
        assert_eq!(LmbStatus::Ok as i32, status::OK);
        assert_eq!(LmbStatus::Failure as i32, status::FAILURE);
        assert_eq!(LmbStatus::NullPointer as i32, status::NULL_POINTER);
        assert_eq!(LmbStatus::Internal as i32, status::INTERNAL);
        assert_eq!(LmbStatus::NotReady as i32, status::NOT_READY);
        assert_eq!(LmbStatus::BufferTooSmall as i32, status::BUFFER_TOO_SMALL);
        assert_eq!(LmbStatus::InvalidArgument as i32, status::INVALID_ARGUMENT);
    }

    #[test]
    fn preset_ids_agree_with_rust_preset() {
        for preset in [
            LmbPreset::Default,
            LmbPreset::Medium,
            LmbPreset::Standard,
            LmbPreset::Extreme,
        ] {
            assert_eq!(Preset::from_id(preset as i32) as i32, preset as i32);
        }
    }

    #[test]
    fn stream_info_unknown_delay_is_minus_one() {
        let info = StreamInfo {
            channels: 1,
            sample_rate: 22_050,
            bitrate: 64,
            frame_size: 576,
            total_frames: 9,
            encoder_delay: None,
            encoder_padding: Some(300),
        };
        let c = LmbStreamInfo::from_rust(&info);
        assert_eq!(c.channels, 1);
        assert_eq!(c.sample_rate, 22_050);
        assert_eq!(c.total_frames, 9);
        assert_eq!(c.encoder_delay, -1);
        assert_eq!(c.encoder_padding, 300);
    }

    #[test]
    fn oversized_values_saturate() {
        assert_eq!(to_c_int(u64::MAX), i32::MAX);
        assert_eq!(to_c_int(5u32), 5);
    }
}
