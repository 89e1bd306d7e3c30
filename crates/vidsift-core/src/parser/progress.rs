//! # Progress Line Normalizer
//!
//! Rewrites raw yt-dlp progress and status lines into short display strings.
//!
//! A line goes through an ordered list of stages. Each stage either settles
//! the final text or hands a (possibly rewritten) line to the next one. The
//! last stage tries a list of matchers in priority order; the first match
//! wins. A line nothing recognises comes back with only the early clean-up
//! applied.

use std::sync::Arc;

use regex::{Captures, Regex};
use tracing::debug;

use crate::error::Result;
use crate::types::{EnglishLabels, LabelKey, LabelProvider, ProgressSnapshot};

/// Replacement for yt-dlp's "Unknown" placeholders.
const UNKNOWN_PLACEHOLDER: &str = "--";
const INVALID_SPEED: &str = "N/A/s";
const ZERO_SPEED: &str = "0KiB/s";
const DEFAULT_SPEED: &str = "0B/s";
const DEFAULT_ETA: &str = "--:--";
const DOWNLOAD_TAG: &str = "[download]";

/// Known extractor phrases, checked against the lowercased line in order.
const KNOWN_PHRASES: &[(&str, LabelKey)] = &[
    ("extracting url", LabelKey::ExtractingUrl),
    ("webpage", LabelKey::DownloadingWebpage),
    ("tv client", LabelKey::TvClientConfig),
    ("player", LabelKey::PlayerApi),
    ("m3u8 manifest", LabelKey::M3u8Manifest),
    ("media json metadata", LabelKey::MediaJsonMetadata),
    ("metadata json", LabelKey::MetadataJson),
    ("video info", LabelKey::VideoInfo),
    ("json", LabelKey::JsonData),
];

/// Outcome of one stage.
enum Step {
    /// The display text is final.
    Done(String),
    /// Continue with this line.
    Next(String),
}

type Stage = fn(&ProgressLineNormalizer, &str, String) -> Step;
type Matcher = fn(&ProgressLineNormalizer, &str) -> Option<String>;

/// Normalizer for yt-dlp progress output.
pub struct ProgressLineNormalizer {
    labels: Arc<dyn LabelProvider>,
    re_tag: Regex,
    re_eta_progress: Regex,
    re_session: Regex,
    re_completed: Regex,
    re_part_done: Regex,
    re_fragment: Regex,
    re_retry: Regex,
    re_snapshot: Regex,
}

impl ProgressLineNormalizer {
    const STAGES: [Stage; 7] = [
        Self::strip_tags,
        Self::zero_invalid_speed,
        Self::cleanup_phase,
        Self::merge_phase,
        Self::downloading_phase,
        Self::second_download_line,
        Self::match_known_forms,
    ];

    const MATCHERS: [Matcher; 9] = [
        Self::eta_progress,
        Self::session_setup,
        Self::destination,
        Self::format_check,
        Self::completed_progress,
        Self::part_validation,
        Self::fragment_progress,
        Self::retry,
        Self::known_phrase,
    ];

    /// Constructs a normalizer with pre-compiled patterns.
    ///
    /// # Errors
    ///
    /// Returns `VidsiftError::RegexError` if any pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new(labels: Arc<dyn LabelProvider>) -> Result<Self> {
        Ok(Self {
            labels,
            re_tag: Regex::new(r"^\s*(?:\[[^\]]*\]\s*)+")?,
            re_eta_progress: Regex::new(
                r"(?P<pct>\d+(?:\.\d+)?%)\s+of\s+~?\s*(?P<size>\S+)(?:\s+at\s+(?P<speed>\S+(?: B/s)?))?(?:\s+ETA\s+(?P<eta>\S+))?\s*$",
            )?,
            re_session: Regex::new(r"(?i)setting up session")?,
            re_completed: Regex::new(
                r"(?P<pct>\d+(?:\.\d+)?%)\s+of\s+~?\s*(?P<size>\S+)\s+in\s+(?P<time>\S+)\s+at\s+(?P<speed>\S+(?: B/s)?)",
            )?,
            re_part_done: Regex::new(r"\.part-Frag\d+ has already been downloaded")?,
            re_fragment: Regex::new(
                r"(?P<pct>\d+(?:\.\d+)?%)\s+of\s+~?\s*(?P<size>\S+)\s+at\s+(?P<speed>\S+(?: B/s)?)\s+ETA\s+(?P<eta>\S+)\s+\(frag\s+\d+/\d+\)",
            )?,
            re_retry: Regex::new(r"Retrying \((?P<current>\d+)/(?P<total>\d+)\)")?,
            re_snapshot: Regex::new(
                r"\[download\]\s+(?P<pct>\d+(?:\.\d+)?)%(?:\s+of\s+~?\s*(?P<size>\S+))?(?:\s+at\s+(?P<speed>\S+(?: B/s)?))?(?:\s+ETA\s+(?P<eta>\S+))?(?:\s+\(frag\s+(?P<fc>\d+)/(?P<ft>\d+)\))?",
            )?,
        })
    }

    /// Constructs a normalizer using the built-in English labels.
    pub fn english() -> Result<Self> {
        Self::new(Arc::new(EnglishLabels))
    }

    /// Rewrites one line (or a short burst of lines) of tool output.
    ///
    /// # Examples
    /// ```
    /// use vidsift_core::parser::ProgressLineNormalizer;
    ///
    /// let normalizer = ProgressLineNormalizer::english().unwrap();
    /// assert_eq!(
    ///     normalizer.normalize("[download]  45.2% of ~15.23MiB at 1.20MiB/s ETA 00:25"),
    ///     "45.2% Of 15.23MiB | 1.20MiB/s | 00:25 Left"
    /// );
    /// ```
    pub fn normalize(&self, raw: &str) -> String {
        let mut line = raw.to_string();
        for (index, stage) in Self::STAGES.iter().enumerate() {
            match stage(self, raw, line) {
                Step::Done(text) => {
                    debug!(stage = index, "progress line resolved");
                    return text;
                }
                Step::Next(next) => line = next,
            }
        }
        line
    }

    /// Extracts the numbers from a `[download]` progress line.
    ///
    /// Returns `None` for anything that is not a percentage update.
    pub fn snapshot(&self, line: &str) -> Option<ProgressSnapshot> {
        let caps = self.re_snapshot.captures(line)?;
        let percent: f32 = caps.name("pct")?.as_str().parse().ok()?;
        let known = |name: &str| {
            caps.name(name)
                .map(|m| m.as_str().to_string())
                .filter(|v| !v.starts_with("Unknown") && v != "N/A" && v != INVALID_SPEED)
        };
        let fragment: Option<(u32, u32)> = match (caps.name("fc"), caps.name("ft")) {
            (Some(current), Some(total)) => current
                .as_str()
                .parse()
                .ok()
                .zip(total.as_str().parse().ok()),
            _ => None,
        };

        Some(ProgressSnapshot {
            percent: percent.clamp(0.0, 100.0),
            total_size: known("size"),
            speed: known("speed"),
            eta: known("eta"),
            fragment,
        })
    }

    /// Removes the leading `[...]` tags and replaces "Unknown" placeholders.
    fn clean(&self, line: &str) -> String {
        self.re_tag
            .replace(line, "")
            .replace("Unknown", UNKNOWN_PLACEHOLDER)
            .trim()
            .to_string()
    }

    fn label(&self, key: LabelKey) -> String {
        self.labels.label(key)
    }

    // Stages, in order.

    fn strip_tags(&self, _raw: &str, line: String) -> Step {
        Step::Next(self.clean(&line))
    }

    fn zero_invalid_speed(&self, _raw: &str, line: String) -> Step {
        Step::Next(line.replace(INVALID_SPEED, ZERO_SPEED))
    }

    fn cleanup_phase(&self, _raw: &str, line: String) -> Step {
        if line.contains("Deleting original file") {
            Step::Done(self.label(LabelKey::FinishingUp))
        } else {
            Step::Next(line)
        }
    }

    fn merge_phase(&self, _raw: &str, line: String) -> Step {
        if line.contains("Merging formats") {
            Step::Done(self.label(LabelKey::MergingFormats))
        } else {
            Step::Next(line)
        }
    }

    fn downloading_phase(&self, _raw: &str, line: String) -> Step {
        if line.starts_with("Downloading") && line.contains("m3u8 information") {
            return Step::Done(self.label(LabelKey::DownloadingM3u8Info));
        }
        match line.find("Downloading") {
            Some(pos) if pos > 0 => Step::Next(line[pos..].to_string()),
            _ => Step::Next(line),
        }
    }

    /// Fragment downloads print a stale progress line before the current
    /// one; when the raw input holds several `[download]` lines, the second
    /// replaces whatever the earlier stages produced.
    fn second_download_line(&self, raw: &str, line: String) -> Step {
        let second = raw
            .lines()
            .map(str::trim)
            .filter(|l| l.starts_with(DOWNLOAD_TAG))
            .nth(1);
        match second {
            Some(second) => {
                let cleaned = self.clean(second).replace(INVALID_SPEED, ZERO_SPEED);
                Step::Next(cleaned)
            }
            None => Step::Next(line),
        }
    }

    fn match_known_forms(&self, _raw: &str, line: String) -> Step {
        Self::MATCHERS
            .iter()
            .find_map(|matcher| matcher(self, &line))
            .map_or(Step::Next(line), Step::Done)
    }

    // Matchers, in priority order.

    fn eta_progress(&self, line: &str) -> Option<String> {
        let caps = self.re_eta_progress.captures(line)?;
        Some(format!(
            "{} Of {} | {} | {} Left",
            &caps["pct"],
            &caps["size"],
            group_or(&caps, "speed", DEFAULT_SPEED),
            group_or(&caps, "eta", DEFAULT_ETA),
        ))
    }

    fn session_setup(&self, line: &str) -> Option<String> {
        self.re_session
            .is_match(line)
            .then(|| self.label(LabelKey::SettingUpSession))
    }

    fn destination(&self, line: &str) -> Option<String> {
        line.starts_with("Destination:")
            .then(|| self.label(LabelKey::SettingDestination))
    }

    fn format_check(&self, line: &str) -> Option<String> {
        (line.starts_with("Downloading") && line.contains("format(s):"))
            .then(|| self.label(LabelKey::CheckingFormats))
    }

    fn completed_progress(&self, line: &str) -> Option<String> {
        let caps = self.re_completed.captures(line)?;
        Some(format!(
            "{} Of {}  |  {}  |  {}",
            &caps["pct"], &caps["size"], &caps["time"], &caps["speed"],
        ))
    }

    fn part_validation(&self, line: &str) -> Option<String> {
        self.re_part_done
            .is_match(line)
            .then(|| self.label(LabelKey::ValidatingPart))
    }

    fn fragment_progress(&self, line: &str) -> Option<String> {
        let caps = self.re_fragment.captures(line)?;
        Some(format!(
            "{} Of {}  |  {}  |  {} Left  ",
            &caps["pct"], &caps["size"], &caps["speed"], &caps["eta"],
        ))
    }

    fn retry(&self, line: &str) -> Option<String> {
        let caps = self.re_retry.captures(line)?;
        Some(
            self.label(LabelKey::RetryingConnection)
                .replace("{current}", &caps["current"])
                .replace("{total}", &caps["total"]),
        )
    }

    fn known_phrase(&self, line: &str) -> Option<String> {
        let lower = line.to_lowercase();
        KNOWN_PHRASES
            .iter()
            .find(|(phrase, _)| lower.contains(phrase))
            .map(|(_, key)| self.label(*key))
    }
}

fn group_or<'h>(caps: &Captures<'h>, name: &str, default: &'h str) -> &'h str {
    caps.name(name).map_or(default, |m| m.as_str())
}
