use serde::{Deserialize, Serialize};

use super::platform::Platform;

/// Every classification axis of a single URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Original input.
    pub url: String,

    /// The extractor is expected to handle this URL.
    pub is_supported_by_extractor: bool,

    /// Instagram, Facebook, TikTok, Pinterest, Twitter/X or Snapchat.
    pub is_known_social_media_host: bool,

    pub is_hls_manifest: bool,

    /// Canonical watch URL for YouTube links, the input otherwise.
    pub normalized_url: String,

    /// Platform owning the host, if known.
    pub platform: Option<Platform>,

    /// The URL passes one of the strict per-platform patterns.
    pub matches_known_pattern: bool,

    /// Container extension when the URL points straight at a media file.
    pub direct_file_extension: Option<String>,
}

impl ClassificationResult {
    /// Whether the URL is worth handing to the extractor or the download manager at all.
    #[must_use]
    pub fn is_downloadable(&self) -> bool {
        self.is_supported_by_extractor
            || self.is_known_social_media_host
            || self.direct_file_extension.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty(url: &str) -> ClassificationResult {
        ClassificationResult {
            url: url.into(),
            is_supported_by_extractor: false,
            is_known_social_media_host: false,
            is_hls_manifest: false,
            normalized_url: url.into(),
            platform: None,
            matches_known_pattern: false,
            direct_file_extension: None,
        }
    }

    #[test]
    fn downloadable_when_any_axis_is_set() {
        let mut r = empty("https://example.com/a.mp4");
        assert!(!r.is_downloadable());
        r.direct_file_extension = Some("mp4".into());
        assert!(r.is_downloadable());
    }

    #[test]
    fn classification_serializes_platform_lowercase() {
        let mut r = empty("https://youtu.be/abc");
        r.platform = Some(Platform::YouTube);
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"platform\":\"youtube\""));
        let back: ClassificationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
