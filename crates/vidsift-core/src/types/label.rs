//! # Display Labels
//!
//! Every user-facing string the normalizer and the table parser produce is
//! looked up through a [`LabelProvider`], so applications can plug in their
//! own localization without the core knowing how it is stored.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VidsiftError};

/// Identifier of a localizable display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKey {
    /// Placeholder for a missing file size.
    NotAvailable,
    /// The tool is deleting intermediate files.
    FinishingUp,
    /// Separate audio and video streams are being merged.
    MergingFormats,
    /// The tool is fetching m3u8 information.
    DownloadingM3u8Info,
    /// The tool is negotiating a session with the site.
    SettingUpSession,
    /// The tool announced its output files.
    SettingDestination,
    /// The tool is resolving the requested formats.
    CheckingFormats,
    /// A fragment from a previous run is being reused.
    ValidatingPart,
    /// Template with `{current}` and `{total}` placeholders.
    RetryingConnection,
    ExtractingUrl,
    DownloadingWebpage,
    TvClientConfig,
    PlayerApi,
    M3u8Manifest,
    MediaJsonMetadata,
    MetadataJson,
    VideoInfo,
    JsonData,
}

impl LabelKey {
    /// All keys, in declaration order.
    pub const ALL: [LabelKey; 18] = [
        Self::NotAvailable,
        Self::FinishingUp,
        Self::MergingFormats,
        Self::DownloadingM3u8Info,
        Self::SettingUpSession,
        Self::SettingDestination,
        Self::CheckingFormats,
        Self::ValidatingPart,
        Self::RetryingConnection,
        Self::ExtractingUrl,
        Self::DownloadingWebpage,
        Self::TvClientConfig,
        Self::PlayerApi,
        Self::M3u8Manifest,
        Self::MediaJsonMetadata,
        Self::MetadataJson,
        Self::VideoInfo,
        Self::JsonData,
    ];

    /// The snake_case identifier used in label files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotAvailable => "not_available",
            Self::FinishingUp => "finishing_up",
            Self::MergingFormats => "merging_formats",
            Self::DownloadingM3u8Info => "downloading_m3u8_info",
            Self::SettingUpSession => "setting_up_session",
            Self::SettingDestination => "setting_destination",
            Self::CheckingFormats => "checking_formats",
            Self::ValidatingPart => "validating_part",
            Self::RetryingConnection => "retrying_connection",
            Self::ExtractingUrl => "extracting_url",
            Self::DownloadingWebpage => "downloading_webpage",
            Self::TvClientConfig => "tv_client_config",
            Self::PlayerApi => "player_api",
            Self::M3u8Manifest => "m3u8_manifest",
            Self::MediaJsonMetadata => "media_json_metadata",
            Self::MetadataJson => "metadata_json",
            Self::VideoInfo => "video_info",
            Self::JsonData => "json_data",
        }
    }

    /// Built-in English text.
    #[must_use]
    pub fn default_text(self) -> &'static str {
        match self {
            Self::NotAvailable => "N/A",
            Self::FinishingUp => "Finishing up the download",
            Self::MergingFormats => "Merging video and audio format",
            Self::DownloadingM3u8Info => "Downloading m3u8 information",
            Self::SettingUpSession => "Setting up session",
            Self::SettingDestination => "Setting destination files",
            Self::CheckingFormats => "Checking formats",
            Self::ValidatingPart => "Validating already downloaded part",
            Self::RetryingConnection => "Connection failed, retrying ({current} of {total})",
            Self::ExtractingUrl => "Extracting URL",
            Self::DownloadingWebpage => "Downloading webpage",
            Self::TvClientConfig => "Downloading TV client config",
            Self::PlayerApi => "Downloading player API",
            Self::M3u8Manifest => "Downloading m3u8 manifest",
            Self::MediaJsonMetadata => "Downloading media JSON metadata",
            Self::MetadataJson => "Downloading metadata JSON",
            Self::VideoInfo => "Downloading video info",
            Self::JsonData => "Downloading JSON data",
        }
    }
}

impl fmt::Display for LabelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelKey {
    type Err = VidsiftError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| VidsiftError::UnknownLabel(s.to_string()))
    }
}

/// Source of localized display text.
pub trait LabelProvider: Send + Sync {
    /// Returns the display text for `key`.
    fn label(&self, key: LabelKey) -> String;
}

/// The built-in English labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLabels;

impl LabelProvider for EnglishLabels {
    fn label(&self, key: LabelKey) -> String {
        key.default_text().to_string()
    }
}

impl<F> LabelProvider for F
where
    F: Fn(LabelKey) -> String + Send + Sync,
{
    fn label(&self, key: LabelKey) -> String {
        self(key)
    }
}

/// A key → text table. Keys missing from the table fall back to English.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    entries: HashMap<LabelKey, String>,
}

impl LabelTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text for `key`.
    pub fn with(mut self, key: LabelKey, text: impl Into<String>) -> Self {
        self.entries.insert(key, text.into());
        self
    }

    /// Builds a table from a JSON object of `snake_case_key: text` pairs.
    ///
    /// # Errors
    ///
    /// Returns `VidsiftError::UnknownLabel` when the object names a key that
    /// does not exist.
    pub fn from_json_map(map: HashMap<String, String>) -> Result<Self> {
        let mut table = Self::new();
        for (key, text) in map {
            table.entries.insert(key.parse()?, text);
        }
        Ok(table)
    }

    /// Number of overridden labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LabelProvider for LabelTable {
    fn label(&self, key: LabelKey) -> String {
        self.entries
            .get(&key)
            .cloned()
            .unwrap_or_else(|| key.default_text().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_round_trip_through_from_str() {
        for key in LabelKey::ALL {
            assert_eq!(key.as_str().parse::<LabelKey>().unwrap(), key);
        }
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(matches!(
            "not_a_label".parse::<LabelKey>(),
            Err(VidsiftError::UnknownLabel(_))
        ));
    }

    #[test]
    fn serde_name_matches_as_str() {
        for key in LabelKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }

    #[test]
    fn table_falls_back_to_english() {
        let table = LabelTable::new().with(LabelKey::FinishingUp, "Finalizando");
        assert_eq!(table.label(LabelKey::FinishingUp), "Finalizando");
        assert_eq!(
            table.label(LabelKey::MergingFormats),
            "Merging video and audio format"
        );
    }

    #[test]
    fn table_from_json_map() {
        let map: HashMap<String, String> =
            serde_json::from_str(r#"{"not_available": "n/d", "video_info": "Info"}"#).unwrap();
        let table = LabelTable::from_json_map(map).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.label(LabelKey::NotAvailable), "n/d");
    }

    #[test]
    fn closures_are_providers() {
        let upper = |key: LabelKey| key.default_text().to_uppercase();
        assert_eq!(upper.label(LabelKey::VideoInfo), "DOWNLOADING VIDEO INFO");
    }
}
