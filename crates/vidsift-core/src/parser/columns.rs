//! # Fixed-Width Column Detection
//!
//! Splits a space-aligned text table into columns by looking for character
//! positions that are whitespace in every row.
//!
//! Known constraint: a multi-word cell (e.g. `audio only`) whose inner space
//! happens to line up with whitespace in every other row is split into two
//! columns. yt-dlp's tables are aligned so this does not happen for the
//! headers the format parser reads. The detector does not guess around it.

/// A detected column, as a half-open character range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    /// First character position of the column
    pub start: usize,
    /// One past the last character position
    pub end: usize,
    /// Column index, left to right
    pub index: usize,
}

/// The text of one column: its header cell and one value per data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub span: ColumnSpan,
    /// Text of the first row inside the span, trimmed.
    pub header: String,
    /// Text of every following row inside the span, trimmed.
    pub values: Vec<String>,
}

/// Column detector for whitespace-aligned tables.
#[derive(Debug, Clone, Default)]
pub struct ColumnDetector;

impl ColumnDetector {
    /// Create a new detector instance.
    pub fn new() -> Self {
        Self
    }

    /// Splits `lines` into columns. The first line is the header row.
    ///
    /// # Examples
    /// ```
    /// use vidsift_core::parser::columns::ColumnDetector;
    ///
    /// let columns = ColumnDetector::new().detect(&["ID  EXT", "137 mp4"]);
    /// assert_eq!(columns.len(), 2);
    /// assert_eq!(columns[1].header, "EXT");
    /// assert_eq!(columns[1].values, vec!["mp4"]);
    /// ```
    pub fn detect(&self, lines: &[&str]) -> Vec<Column> {
        let rows = self.pad_rows(lines);
        self.spans(&rows)
            .into_iter()
            .map(|span| self.column(&rows, span))
            .collect()
    }

    /// Converts every line to characters and right-pads them to a common
    /// width of the longest line plus one, so each column is followed by at
    /// least one whitespace position in every row.
    fn pad_rows(&self, lines: &[&str]) -> Vec<Vec<char>> {
        let mut rows: Vec<Vec<char>> = lines.iter().map(|l| l.chars().collect()).collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0) + 1;
        for row in &mut rows {
            row.resize(width, ' ');
        }
        rows
    }

    /// Finds the runs of positions that are not whitespace in every row.
    fn spans(&self, rows: &[Vec<char>]) -> Vec<ColumnSpan> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        let mut spans = Vec::new();
        let mut start: Option<usize> = None;

        for pos in 0..width {
            let boundary = rows.iter().all(|row| row[pos].is_whitespace());
            match (boundary, start) {
                (true, Some(s)) => {
                    spans.push(ColumnSpan {
                        start: s,
                        end: pos,
                        index: spans.len(),
                    });
                    start = None;
                }
                (false, None) => start = Some(pos),
                _ => {}
            }
        }

        // The extra padding column guarantees the last run is closed, but a
        // table with no rows at all never opens one.
        if let Some(s) = start {
            spans.push(ColumnSpan {
                start: s,
                end: width,
                index: spans.len(),
            });
        }

        spans
    }

    fn column(&self, rows: &[Vec<char>], span: ColumnSpan) -> Column {
        let mut cells = rows
            .iter()
            .map(|row| row[span.start..span.end].iter().collect::<String>().trim().to_string());
        let header = cells.next().unwrap_or_default();
        Column {
            span,
            header,
            values: cells.collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_aligned_columns() {
        let detector = ColumnDetector::new();
        let columns = detector.detect(&[
            "ID  EXT RESOLUTION",
            "137 mp4 1920x1080 ",
            "140 m4a audio only",
        ]);

        let headers: Vec<_> = columns.iter().map(|c| c.header.as_str()).collect();
        assert_eq!(headers[0], "ID");
        assert_eq!(headers[1], "EXT");
        assert_eq!(columns[0].values, vec!["137", "140"]);
        assert_eq!(columns[1].values, vec!["mp4", "m4a"]);
    }

    #[test]
    fn multi_word_cell_splits_when_gap_lines_up() {
        // "audio only" has its space at a position that is blank in every
        // other row, so it becomes two columns.
        let detector = ColumnDetector::new();
        let columns = detector.detect(&["RES       ", "audio only", "1080p     "]);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].values, vec!["audio", "1080p"]);
        assert_eq!(columns[1].header, "");
        assert_eq!(columns[1].values, vec!["only", ""]);
    }

    #[test]
    fn unaligned_rows_merge_into_one_column() {
        let detector = ColumnDetector::new();
        let columns = detector.detect(&["ID EXT", "1370 mp4"]);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].header, "ID EXT");
        assert_eq!(columns[0].values, vec!["1370 mp4"]);
    }

    #[test]
    fn spans_are_indexed_left_to_right() {
        let detector = ColumnDetector::new();
        let columns = detector.detect(&["A B C", "1 2 3"]);
        let spans: Vec<_> = columns.iter().map(|c| (c.span.start, c.span.end, c.span.index)).collect();
        assert_eq!(spans, vec![(0, 1, 0), (2, 3, 1), (4, 5, 2)]);
    }

    #[test]
    fn multibyte_cells_do_not_panic() {
        let detector = ColumnDetector::new();
        let columns = detector.detect(&["ID │ EXT", "18 │ mp4", "é  │ ü"]);
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[1].header, "│");
        assert_eq!(columns[2].values, vec!["mp4", "ü"]);
    }

    #[test]
    fn empty_input() {
        let detector = ColumnDetector::new();
        assert!(detector.detect(&[]).is_empty());
        assert!(detector.detect(&["   "]).is_empty());
    }
}
