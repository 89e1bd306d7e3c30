//! # URL Classifier
//!
//! Decides whether a URL is worth handing to the extractor, which platform
//! owns it, whether it is an HLS manifest or a direct media file, and
//! rewrites YouTube links to their canonical watch form.
//!
//! Every predicate is best-effort: a URL that fails to parse is simply
//! "not recognised".

pub mod hosts;
pub mod patterns;

use std::cmp::Reverse;

use tracing::debug;
use url::Url;

use crate::error::Result;
use crate::types::{ClassificationResult, Platform};

pub use hosts::{base_domain, HostMatching, EXTRACTABLE_BASE_DOMAINS};
pub use patterns::UrlPatterns;

const YOUTUBE_WATCH_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Substrings that mark an HLS manifest. The last one covers the others;
/// all four are kept so the matched set stays exactly as listed.
const HLS_MARKERS: [&str; 4] = ["/playlist.m3u8", "/index.m3u8", ".m3u8", "m3u8"];

/// Media containers a download manager can fetch without the extractor.
pub const DIRECT_MEDIA_EXTENSIONS: &[&str] = &[
    "mp4", "webm", "mkv", "mov", "m4v", "3gp", "flv", "avi", "mp3", "m4a", "aac", "ogg", "opus",
    "wav", "flac",
];

/// Configuration for [`UrlClassifier`].
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Base-domain labels accepted in addition to the built-in allow-list
    pub extra_domains: Vec<String>,
    /// Whether an HLS manifest URL counts as extractable
    pub hls_is_extractable: bool,
    /// How hosts are compared with platform domains
    pub host_matching: HostMatching,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            extra_domains: Vec::new(),
            hls_is_extractable: true,
            host_matching: HostMatching::default(),
        }
    }
}

impl ClassifierConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept another base-domain label (e.g. `"peertube"`).
    pub fn with_extra_domain(mut self, label: impl Into<String>) -> Self {
        self.extra_domains.push(label.into().to_ascii_lowercase());
        self
    }

    /// Set whether HLS manifests count as extractable.
    pub fn with_hls_is_extractable(mut self, enabled: bool) -> Self {
        self.hls_is_extractable = enabled;
        self
    }

    /// Set how hosts are compared with platform domains.
    pub fn with_host_matching(mut self, matching: HostMatching) -> Self {
        self.host_matching = matching;
        self
    }
}

/// Classifier over a static allow-list and pattern list.
pub struct UrlClassifier {
    config: ClassifierConfig,
    patterns: UrlPatterns,
}

impl UrlClassifier {
    /// Builds a classifier and compiles its patterns.
    ///
    /// # Errors
    ///
    /// Returns `VidsiftError::RegexError` if a pattern fails to compile.
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        Ok(Self {
            config,
            patterns: UrlPatterns::new()?,
        })
    }

    /// Get the classifier configuration.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// `true` when the URL's base domain is on the allow-list, or when it
    /// looks like an HLS manifest (unless disabled in the config).
    pub fn is_known_extractable_host(&self, url: &str) -> bool {
        let Some(parsed) = parse(url) else {
            return false;
        };
        let known = parsed
            .host_str()
            .and_then(base_domain)
            .map(str::to_ascii_lowercase)
            .is_some_and(|label| {
                EXTRACTABLE_BASE_DOMAINS.contains(&label.as_str())
                    || self.config.extra_domains.iter().any(|d| *d == label)
            });
        known || (self.config.hls_is_extractable && self.is_hls_manifest(url))
    }

    /// Case-insensitive substring check for `.m3u8` manifests.
    ///
    /// # Examples
    /// ```
    /// use vidsift_core::classify::{ClassifierConfig, UrlClassifier};
    ///
    /// let classifier = UrlClassifier::new(ClassifierConfig::default()).unwrap();
    /// assert!(classifier.is_hls_manifest("https://cdn.example.com/stream/index.m3u8"));
    /// assert!(!classifier.is_hls_manifest("https://example.com/video.mp4"));
    /// ```
    pub fn is_hls_manifest(&self, url: &str) -> bool {
        let lower = url.to_lowercase();
        HLS_MARKERS.iter().any(|marker| lower.contains(marker))
    }

    /// `true` if the URL's host matches one of `platform`'s domains.
    pub fn is_host(&self, url: &str, platform: Platform) -> bool {
        parse(url)
            .as_ref()
            .and_then(Url::host_str)
            .is_some_and(|host| self.matched_domain_len(host, platform).is_some())
    }

    /// Instagram, Facebook, TikTok, Pinterest, Twitter/X or Snapchat.
    pub fn is_known_social_media_host(&self, url: &str) -> bool {
        Platform::ALL
            .into_iter()
            .filter(|p| p.is_social_media())
            .any(|p| self.is_host(url, p))
    }

    /// The platform owning the URL's host.
    ///
    /// Under containment matching several platforms can match one host
    /// (`reddit.com` contains `t.co`); the longest matched domain wins, and
    /// ties go to the platform listed first.
    pub fn platform(&self, url: &str) -> Option<Platform> {
        let parsed = parse(url)?;
        let host = parsed.host_str()?;
        Platform::ALL
            .into_iter()
            .filter_map(|p| self.matched_domain_len(host, p).map(|len| (p, len)))
            .min_by_key(|(_, len)| Reverse(*len))
            .map(|(p, _)| p)
    }

    /// Length of the longest domain of `platform` matching `host`.
    fn matched_domain_len(&self, host: &str, platform: Platform) -> Option<usize> {
        platform
            .domains()
            .iter()
            .filter(|d| self.config.host_matching.matches(host, d))
            .map(|d| d.len())
            .max()
    }

    /// Rewrites a YouTube link to `https://www.youtube.com/watch?v={id}`.
    ///
    /// Anything that is not a YouTube link, or whose id cannot be found,
    /// comes back unchanged.
    ///
    /// # Examples
    /// ```
    /// use vidsift_core::classify::{ClassifierConfig, UrlClassifier};
    ///
    /// let classifier = UrlClassifier::new(ClassifierConfig::default()).unwrap();
    /// assert_eq!(
    ///     classifier.normalize_youtube_url("https://youtu.be/abc123"),
    ///     "https://www.youtube.com/watch?v=abc123"
    /// );
    /// ```
    pub fn normalize_youtube_url(&self, url: &str) -> String {
        self.try_normalize_youtube_url(url).unwrap_or_else(|e| {
            debug!("leaving url as-is: {e}");
            url.to_string()
        })
    }

    /// Like [`normalize_youtube_url`](Self::normalize_youtube_url) but
    /// reports URLs that fail to parse.
    ///
    /// # Errors
    ///
    /// Returns `VidsiftError::InvalidUrl` when `url` is not a valid absolute URL.
    pub fn try_normalize_youtube_url(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url.trim())?;
        let Some(host) = parsed.host_str() else {
            return Ok(url.to_string());
        };

        let matching = self.config.host_matching;
        let id = if matching.matches(host, "youtu.be") {
            parsed
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .map(str::to_string)
        } else if matching.matches(host, "youtube.com") {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned())
        } else {
            None
        };

        Ok(match id.filter(|id| !id.is_empty()) {
            Some(id) => format!("{YOUTUBE_WATCH_PREFIX}{id}"),
            None => url.to_string(),
        })
    }

    /// `true` if any per-platform pattern matches the whole URL.
    pub fn matches_known_url_pattern(&self, url: &str) -> bool {
        self.matched_pattern_platform(url).is_some()
    }

    /// The platform of the first structural pattern matching the URL.
    pub fn matched_pattern_platform(&self, url: &str) -> Option<Platform> {
        self.patterns.matching_platform(url)
    }

    /// Lowercase container extension when the URL path ends in a known media file.
    pub fn direct_file_extension(&self, url: &str) -> Option<String> {
        let parsed = parse(url)?;
        let file = parsed.path_segments()?.next_back()?;
        let (_, ext) = file.rsplit_once('.')?;
        let ext = ext.to_ascii_lowercase();
        DIRECT_MEDIA_EXTENSIONS
            .contains(&ext.as_str())
            .then_some(ext)
    }

    pub fn is_direct_media_file(&self, url: &str) -> bool {
        self.direct_file_extension(url).is_some()
    }

    /// Evaluates every axis at once.
    pub fn classify(&self, url: &str) -> ClassificationResult {
        ClassificationResult {
            url: url.to_string(),
            is_supported_by_extractor: self.is_known_extractable_host(url),
            is_known_social_media_host: self.is_known_social_media_host(url),
            is_hls_manifest: self.is_hls_manifest(url),
            normalized_url: self.normalize_youtube_url(url),
            platform: self.platform(url),
            matches_known_pattern: self.matches_known_url_pattern(url),
            direct_file_extension: self.direct_file_extension(url),
        }
    }
}

/// Parses an absolute URL, logging and discarding failures.
fn parse(url: &str) -> Option<Url> {
    match Url::parse(url.trim()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            debug!(url, "unparsable url: {e}");
            None
        }
    }
}
