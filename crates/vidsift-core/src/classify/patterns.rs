//! Structural URL patterns, one list per platform.
//!
//! Every pattern is anchored at both ends, so a URL only counts when the
//! whole string has the expected shape.

use regex::Regex;

use crate::error::Result;
use crate::types::Platform;

const YOUTUBE: &[&str] = &[
    r"^https?://(?:www\.|m\.)?youtube\.com/watch\?(?:\S*&)?v=[\w-]{6,}(?:[&#]\S*)?$",
    r"^https?://(?:www\.|m\.)?youtube\.com/shorts/[\w-]{6,}(?:[?#]\S*)?$",
    r"^https?://music\.youtube\.com/watch\?(?:\S*&)?v=[\w-]{6,}(?:[&#]\S*)?$",
    r"^https?://(?:www\.)?youtube(?:-nocookie)?\.com/embed/[\w-]{6,}(?:[?#]\S*)?$",
    r"^https?://youtu\.be/[\w-]{6,}(?:[?#]\S*)?$",
];

const INSTAGRAM: &[&str] = &[
    r"^https?://(?:www\.)?instagram\.com/(?:[\w.]+/)?(?:reels?|p|tv)/[\w-]+/?(?:\?\S*)?$",
    r"^https?://(?:www\.)?instagram\.com/stories/[\w.]+/\d+/?(?:\?\S*)?$",
];

const TWITTER: &[&str] = &[
    r"^https?://(?:www\.|mobile\.)?(?:twitter|x)\.com/\w{1,15}/status/\d+(?:/\S*)?(?:\?\S*)?$",
    r"^https?://(?:www\.|mobile\.)?(?:twitter|x)\.com/i/(?:web/)?status/\d+(?:\?\S*)?$",
];

const PINTEREST: &[&str] = &[
    r"^https?://(?:[a-z]{2,3}\.|www\.)?pinterest\.[a-z.]+/pin/[\w-]+/?(?:\?\S*)?$",
    r"^https?://pin\.it/\w+/?$",
];

const TIKTOK: &[&str] = &[
    r"^https?://(?:www\.|m\.)?tiktok\.com/@[\w.-]+/video/\d+/?(?:\?\S*)?$",
    r"^https?://(?:vm|vt)\.tiktok\.com/\w+/?$",
];

const FACEBOOK: &[&str] = &[
    r"^https?://(?:www\.|m\.|web\.)?facebook\.com/[\w.-]+/videos/(?:[\w.-]+/)?\d+/?(?:\?\S*)?$",
    r"^https?://(?:www\.|m\.|web\.)?facebook\.com/watch/?\?(?:\S*&)?v=\d+(?:&\S*)?$",
    r"^https?://(?:www\.|m\.|web\.)?facebook\.com/reel/\d+/?(?:\?\S*)?$",
    r"^https?://(?:www\.|m\.|web\.)?facebook\.com/share/[vr]/\w+/?(?:\?\S*)?$",
    r"^https?://fb\.watch/[\w-]+/?$",
];

const SNAPCHAT: &[&str] = &[
    r"^https?://(?:www\.)?snapchat\.com/spotlight/[\w-]+/?(?:\?\S*)?$",
    r"^https?://(?:www\.|story\.)?snapchat\.com/(?:add/[\w.-]+|@[\w.-]+)(?:/spotlight)?/[\w-]+/?(?:\?\S*)?$",
    r"^https?://story\.snapchat\.com/[sp]/[\w-]+/?(?:\?\S*)?$",
];

const DAILYMOTION: &[&str] = &[
    r"^https?://(?:www\.)?dailymotion\.com/video/[a-zA-Z0-9]+(?:\?\S*)?$",
    r"^https?://dai\.ly/[a-zA-Z0-9]+/?$",
];

const ALL: &[(Platform, &[&str])] = &[
    (Platform::YouTube, YOUTUBE),
    (Platform::Instagram, INSTAGRAM),
    (Platform::Twitter, TWITTER),
    (Platform::Pinterest, PINTEREST),
    (Platform::TikTok, TIKTOK),
    (Platform::Facebook, FACEBOOK),
    (Platform::Snapchat, SNAPCHAT),
    (Platform::Dailymotion, DAILYMOTION),
];

/// Compiled pattern list.
pub struct UrlPatterns {
    patterns: Vec<(Platform, Regex)>,
}

impl UrlPatterns {
    /// Compiles every pattern.
    ///
    /// # Errors
    ///
    /// Returns `VidsiftError::RegexError` if a pattern fails to compile.
    pub fn new() -> Result<Self> {
        let mut patterns = Vec::new();
        for (platform, sources) in ALL {
            for source in *sources {
                patterns.push((*platform, Regex::new(source)?));
            }
        }
        Ok(Self { patterns })
    }

    /// The platform of the first pattern matching the whole `url`.
    pub fn matching_platform(&self, url: &str) -> Option<Platform> {
        let url = url.trim();
        self.patterns
            .iter()
            .find(|(_, re)| re.is_match(url))
            .map(|(platform, _)| *platform)
    }

    /// Number of compiled patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> UrlPatterns {
        UrlPatterns::new().unwrap()
    }

    #[test]
    fn compiles_every_pattern() {
        let count: usize = ALL.iter().map(|(_, sources)| sources.len()).sum();
        assert_eq!(patterns().len(), count);
    }

    #[test]
    fn recognises_supported_shapes() {
        let p = patterns();
        for (url, platform) in [
            ("https://www.youtube.com/watch?v=dQw4w9WgXcQ", Platform::YouTube),
            ("https://m.youtube.com/watch?feature=share&v=dQw4w9WgXcQ", Platform::YouTube),
            ("https://youtube.com/shorts/abcDEF12345?si=x", Platform::YouTube),
            ("https://music.youtube.com/watch?v=dQw4w9WgXcQ&list=RD", Platform::YouTube),
            ("https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ", Platform::YouTube),
            ("https://youtu.be/dQw4w9WgXcQ", Platform::YouTube),
            ("https://www.instagram.com/reel/C1a2b3c4d5/", Platform::Instagram),
            ("https://instagram.com/p/C1a2b3c4d5", Platform::Instagram),
            ("https://www.instagram.com/stories/some.user/3141592653589/", Platform::Instagram),
            ("https://twitter.com/jack/status/20", Platform::Twitter),
            ("https://mobile.twitter.com/jack/status/20?s=20", Platform::Twitter),
            ("https://x.com/i/status/1234567890", Platform::Twitter),
            ("https://x.com/i/web/status/1234567890", Platform::Twitter),
            ("https://www.pinterest.com/pin/123456789/", Platform::Pinterest),
            ("https://pin.it/1a2B3c", Platform::Pinterest),
            ("https://www.tiktok.com/@some.user/video/7234567890123456789", Platform::TikTok),
            ("https://vm.tiktok.com/ZMabc123/", Platform::TikTok),
            ("https://www.facebook.com/someone/videos/1234567890/", Platform::Facebook),
            ("https://www.facebook.com/watch/?v=1234567890", Platform::Facebook),
            ("https://m.facebook.com/reel/1234567890", Platform::Facebook),
            ("https://www.facebook.com/share/v/AbC123/", Platform::Facebook),
            ("https://fb.watch/abcDEF-1/", Platform::Facebook),
            ("https://www.snapchat.com/spotlight/W7_EDlXWTBiXAEEniNoMPwAAYa", Platform::Snapchat),
            ("https://story.snapchat.com/p/abc-123", Platform::Snapchat),
            ("https://www.dailymotion.com/video/x8abc12", Platform::Dailymotion),
            ("https://dai.ly/x8abc12", Platform::Dailymotion),
        ] {
            assert_eq!(p.matching_platform(url), Some(platform), "url: {url}");
        }
    }

    #[test]
    fn rejects_partial_or_foreign_shapes() {
        let p = patterns();
        for url in [
            "https://www.youtube.com/",
            "https://www.youtube.com/@channel",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ trailing words",
            "see https://youtu.be/dQw4w9WgXcQ",
            "https://www.instagram.com/some.user/",
            "https://twitter.com/jack",
            "https://www.tiktok.com/@some.user",
            "https://www.facebook.com/someone",
            "https://example.com/watch?v=dQw4w9WgXcQ",
            "not a url",
            "",
        ] {
            assert_eq!(p.matching_platform(url), None, "url: {url}");
        }
    }
}
