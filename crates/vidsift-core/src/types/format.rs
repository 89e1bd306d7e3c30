use std::fmt;

use serde::{Deserialize, Serialize};

/// One row of a yt-dlp "available formats" table.
///
/// Every field is the raw cell text; missing cells are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VideoFormatRecord {
    /// Identifier assigned by the tool (e.g. "137").
    pub format_id: String,

    /// Container extension (e.g. "mp4").
    pub extension: String,

    /// Resolution label (e.g. "1080p", "1920x1080", "audio only").
    pub resolution: String,

    /// Human readable size, or the "not available" label.
    pub file_size_label: String,

    pub video_codec: String,

    pub audio_codec: String,

    /// Raw total bitrate cell, used only as a sort key.
    pub total_bitrate_label: String,

    /// Transport (e.g. "https", "m3u8").
    pub protocol: String,

    /// Direct URL, when the row embeds one.
    pub streaming_url: Option<String>,
}

impl VideoFormatRecord {
    /// Numeric value of the bitrate cell.
    ///
    /// All characters other than digits and dots are stripped before parsing;
    /// anything unparsable counts as `0.0`.
    #[must_use]
    pub fn bitrate(&self) -> f64 {
        numeric_value(&self.total_bitrate_label)
    }

    /// Returns `false` when the audio codec is empty or marked "video only".
    #[must_use]
    pub fn has_audio(&self) -> bool {
        !self.audio_codec.is_empty() && !self.audio_codec.contains("video only")
    }

    /// Returns `true` for audio-only formats.
    #[must_use]
    pub fn is_audio_only(&self) -> bool {
        self.resolution.contains("audio only") || self.video_codec.contains("audio only")
    }
}

impl fmt::Display for VideoFormatRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.format_id, self.extension, self.resolution, self.file_size_label
        )
    }
}

/// Parses the digits and dots of `raw` as a float, `0.0` when that fails.
pub(crate) fn numeric_value(raw: &str) -> f64 {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(acodec: &str, tbr: &str) -> VideoFormatRecord {
        VideoFormatRecord {
            format_id: "137".into(),
            extension: "mp4".into(),
            resolution: "1920x1080".into(),
            audio_codec: acodec.into(),
            total_bitrate_label: tbr.into(),
            ..Default::default()
        }
    }

    #[test]
    fn bitrate_strips_units() {
        assert_eq!(record("", "4363k").bitrate(), 4363.0);
        assert_eq!(record("", "129.5k").bitrate(), 129.5);
        assert_eq!(record("", "").bitrate(), 0.0);
        assert_eq!(record("", "n/a").bitrate(), 0.0);
        assert_eq!(record("", "1.2.3").bitrate(), 0.0);
    }

    #[test]
    fn audio_detection() {
        assert!(record("mp4a.40.2", "").has_audio());
        assert!(!record("video only", "").has_audio());
        assert!(!record("", "").has_audio());
    }

    #[test]
    fn audio_only_detection() {
        let mut r = record("opus", "");
        assert!(!r.is_audio_only());
        r.resolution = "audio only".into();
        assert!(r.is_audio_only());
    }

    #[test]
    fn record_serialization_roundtrip() {
        let mut r = record("mp4a.40.2", "4363k");
        r.streaming_url = Some("https://example.com/v.mp4".into());
        let json = serde_json::to_string(&r).unwrap();
        let back: VideoFormatRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
