//! # Vidsift
//!
//! Turns yt-dlp output and video links into structured data.
//!
//! This crate re-exports [`vidsift_core`]; see its documentation for the
//! format table parser, the progress line normalizer and the URL classifier.
//!
//! ```rust
//! use vidsift::{ClassifierConfig, UrlClassifier};
//!
//! let classifier = UrlClassifier::new(ClassifierConfig::default()).unwrap();
//! assert_eq!(
//!     classifier.normalize_youtube_url("https://youtu.be/abc123"),
//!     "https://www.youtube.com/watch?v=abc123"
//! );
//! ```
pub use vidsift_core::*;
