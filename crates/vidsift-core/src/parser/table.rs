//! # Format Table Parser
//!
//! Turns the "available formats" table yt-dlp prints for `-F` into
//! [`VideoFormatRecord`]s, keeping one record per resolution.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{Result, VidsiftError};
use crate::parser::columns::{Column, ColumnDetector};
use crate::types::{EnglishLabels, LabelKey, LabelProvider, VideoFormatRecord};

/// Line marker that opens the format table.
pub const DEFAULT_START_MARKER: &str = "[info] Available formats for";

/// Line marker that closes the format table.
pub const DEFAULT_END_MARKER: &str = "[download]";

const HEADER_ID: &str = "ID";
const HEADER_EXT: &str = "EXT";
const HEADER_RESOLUTION: &str = "RESOLUTION";
const HEADER_FILESIZE: &str = "FILESIZE";
const HEADER_TBR: &str = "TBR";
const HEADER_PROTO: &str = "PROTO";
const HEADER_VCODEC: &str = "VCODEC";
const HEADER_ACODEC: &str = "ACODEC";

/// Configuration for the table parser.
#[derive(Debug, Clone)]
pub struct TableParserConfig {
    /// Substring of the line that opens the table
    pub start_marker: String,
    /// Substring of the first line after the table
    pub end_marker: String,
}

impl Default for TableParserConfig {
    fn default() -> Self {
        Self {
            start_marker: DEFAULT_START_MARKER.to_string(),
            end_marker: DEFAULT_END_MARKER.to_string(),
        }
    }
}

impl TableParserConfig {
    /// Create a new configuration with default markers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the marker that opens the table.
    pub fn with_start_marker(mut self, marker: impl Into<String>) -> Self {
        self.start_marker = marker.into();
        self
    }

    /// Set the marker that closes the table.
    pub fn with_end_marker(mut self, marker: impl Into<String>) -> Self {
        self.end_marker = marker.into();
        self
    }
}

/// Parser for yt-dlp's column-aligned format table.
pub struct FormatTableParser {
    config: TableParserConfig,
    labels: Arc<dyn LabelProvider>,
    columns: ColumnDetector,
}

impl Default for FormatTableParser {
    fn default() -> Self {
        Self::new(TableParserConfig::default(), Arc::new(EnglishLabels))
    }
}

impl FormatTableParser {
    /// Create a parser with the given markers and label source.
    pub fn new(config: TableParserConfig, labels: Arc<dyn LabelProvider>) -> Self {
        Self {
            config,
            labels,
            columns: ColumnDetector::new(),
        }
    }

    /// Get the parser configuration.
    pub fn config(&self) -> &TableParserConfig {
        &self.config
    }

    /// Parses the formats out of a full tool output.
    ///
    /// Never fails: a missing or empty table yields an empty list, and any
    /// other problem is logged and also yields an empty list.
    ///
    /// # Examples
    /// ```
    /// use vidsift_core::parser::FormatTableParser;
    ///
    /// let output = "[info] Available formats for abc:\n\
    ///               ID  EXT RESOLUTION TBR\n\
    ///               --- --- ---------- -----\n\
    ///               137 mp4 1080p      4363k\n\
    ///               [download] Destination: out.mp4";
    /// let formats = FormatTableParser::default().parse(output);
    /// assert_eq!(formats.len(), 1);
    /// assert_eq!(formats[0].format_id, "137");
    /// ```
    pub fn parse(&self, output: &str) -> Vec<VideoFormatRecord> {
        match self.try_parse(output) {
            Ok(records) => records,
            Err(e @ (VidsiftError::MissingTable { .. } | VidsiftError::EmptyTable)) => {
                debug!("no format table: {e}");
                Vec::new()
            }
            Err(e) => {
                warn!("format table parsing failed: {e}");
                Vec::new()
            }
        }
    }

    /// Like [`parse`](Self::parse) but reports why nothing was found.
    ///
    /// # Errors
    ///
    /// Returns `VidsiftError::MissingTable` when the start marker is absent
    /// and `VidsiftError::EmptyTable` when it is not followed by any rows.
    pub fn try_parse(&self, output: &str) -> Result<Vec<VideoFormatRecord>> {
        let mut lines = self.table_lines(output)?;
        if lines.is_empty() {
            return Err(VidsiftError::EmptyTable);
        }

        // The second line is the dashed separator under the headers.
        if lines.len() >= 2 {
            lines.remove(1);
        }

        let columns = self.columns.detect(&lines);
        let row_count = lines.len().saturating_sub(1);
        debug!(
            columns = columns.len(),
            rows = row_count,
            "format table columns detected"
        );

        let records = self.build_records(&columns, &lines[1..], row_count);
        let mut records = self.deduplicate(records);
        for record in &mut records {
            self.fill_missing(record);
        }
        Ok(records)
    }

    /// Extracts the non-blank lines between the start and end markers.
    fn table_lines<'a>(&self, output: &'a str) -> Result<Vec<&'a str>> {
        let mut lines = output.lines();
        lines
            .by_ref()
            .find(|line| line.contains(&self.config.start_marker))
            .ok_or_else(|| VidsiftError::MissingTable {
                marker: self.config.start_marker.clone(),
            })?;

        Ok(lines
            .take_while(|line| !line.contains(&self.config.end_marker))
            .filter(|line| !line.trim().is_empty())
            .collect())
    }

    fn build_records(
        &self,
        columns: &[Column],
        rows: &[&str],
        row_count: usize,
    ) -> Vec<VideoFormatRecord> {
        let lookup = |header: &str| -> Vec<String> {
            let mut values = columns
                .iter()
                .find(|c| c.header.starts_with(header))
                .map(|c| c.values.clone())
                .unwrap_or_default();
            values.resize(row_count, String::new());
            values
        };

        let ids = lookup(HEADER_ID);
        let exts = lookup(HEADER_EXT);
        let resolutions = lookup(HEADER_RESOLUTION);
        let sizes = lookup(HEADER_FILESIZE);
        let bitrates = lookup(HEADER_TBR);
        let protocols = lookup(HEADER_PROTO);
        let vcodecs = lookup(HEADER_VCODEC);
        let acodecs = lookup(HEADER_ACODEC);

        (0..row_count)
            .map(|i| VideoFormatRecord {
                format_id: ids[i].clone(),
                extension: exts[i].clone(),
                resolution: resolutions[i].clone(),
                file_size_label: sizes[i].clone(),
                video_codec: vcodecs[i].clone(),
                audio_codec: acodecs[i].clone(),
                total_bitrate_label: bitrates[i].clone(),
                protocol: protocols[i].clone(),
                streaming_url: rows.get(i).and_then(|row| embedded_url(row)),
            })
            .collect()
    }

    /// Keeps the highest-bitrate record per resolution, in first-seen order.
    ///
    /// A group without any positive bitrate keeps its first record. When no
    /// record in the batch has a positive bitrate, every record with a
    /// non-empty id is returned as-is.
    fn deduplicate(&self, records: Vec<VideoFormatRecord>) -> Vec<VideoFormatRecord> {
        if records.iter().all(|r| r.bitrate() <= 0.0) {
            debug!(
                records = records.len(),
                "no usable bitrates, keeping every identified format"
            );
            return records
                .into_iter()
                .filter(|r| !r.format_id.is_empty())
                .collect();
        }

        let winners: Vec<usize> = {
            let mut best: HashMap<&str, (usize, f64)> = HashMap::new();
            for (i, record) in records.iter().enumerate() {
                let bitrate = record.bitrate();
                let entry = best.entry(record.resolution.as_str()).or_insert((i, bitrate));
                if bitrate > entry.1 {
                    *entry = (i, bitrate);
                }
            }
            let mut winners: Vec<usize> = best.into_values().map(|(i, _)| i).collect();
            winners.sort_unstable();
            winners
        };

        let mut records: Vec<Option<VideoFormatRecord>> = records.into_iter().map(Some).collect();
        winners
            .into_iter()
            .filter_map(|i| records[i].take())
            .collect()
    }

    fn fill_missing(&self, record: &mut VideoFormatRecord) {
        if record.resolution.eq_ignore_ascii_case("unknown") {
            record.resolution = record.format_id.clone();
        }
        if record.file_size_label.is_empty() {
            record.file_size_label = self.labels.label(LabelKey::NotAvailable);
        }
    }
}

/// First `http(s)://` token of a table row, if any.
fn embedded_url(row: &str) -> Option<String> {
    row.split_whitespace()
        .find(|token| token.starts_with("http://") || token.starts_with("https://"))
        .map(str::to_string)
}
