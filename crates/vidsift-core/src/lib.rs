//! # Vidsift Core
//!
//! Text processing around yt-dlp: parses the "available formats" table into
//! structured records, rewrites raw progress/status lines into short display
//! strings, and classifies URLs before the tool is invoked at all.
//!
//! ## Quick Start
//!
//! ```rust
//! use vidsift_core::classify::{ClassifierConfig, UrlClassifier};
//! use vidsift_core::parser::{FormatTableParser, ProgressLineNormalizer};
//!
//! let output = "[info] Available formats for abc:\n\
//!               ID  EXT RESOLUTION TBR\n\
//!               --- --- ---------- -----\n\
//!               18  mp4 640x360    340k\n\
//!               137 mp4 1920x1080  3067k";
//! let formats = FormatTableParser::default().parse(output);
//! assert_eq!(formats.len(), 2);
//!
//! let normalizer = ProgressLineNormalizer::english().unwrap();
//! assert_eq!(normalizer.normalize("Retrying (3/5)..."), "Connection failed, retrying (3 of 5)");
//!
//! let classifier = UrlClassifier::new(ClassifierConfig::default()).unwrap();
//! assert!(classifier.is_known_extractable_host("https://youtu.be/abc123"));
//! ```
pub mod classify;
pub mod error;
pub mod parser;
pub mod types;

// Re-export primary API
pub use classify::{ClassifierConfig, UrlClassifier};
pub use error::{Result, VidsiftError};
pub use parser::{
    split_tool_output, ColumnDetector, FormatTableParser, ProgressLineNormalizer, TableParserConfig,
    ToolOutput,
};
pub use types::{
    ClassificationResult, EnglishLabels, LabelKey, LabelProvider, LabelTable, Platform,
    ProgressSnapshot, VideoFormatRecord,
};
