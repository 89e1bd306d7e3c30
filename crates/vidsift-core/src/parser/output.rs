//! Routing of captured yt-dlp output: the format table goes to the table
//! parser, everything else is treated as progress/status lines.

use serde::{Deserialize, Serialize};

use crate::parser::table::{DEFAULT_END_MARKER, DEFAULT_START_MARKER};

/// A captured tool output, split by purpose.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Marker line plus table rows, when the output contains a table.
    pub table: Option<String>,
    /// Every other non-blank line, in order.
    pub progress_lines: Vec<String>,
}

/// Splits `output` using the default table markers.
///
/// # Examples
/// ```
/// use vidsift_core::parser::split_tool_output;
///
/// let split = split_tool_output(
///     "[youtube] abc: Downloading webpage\n\
///      [info] Available formats for abc:\n\
///      ID EXT\n\
///      [download] Destination: abc.mp4",
/// );
/// assert_eq!(split.table.as_deref(), Some("[info] Available formats for abc:\nID EXT"));
/// assert_eq!(split.progress_lines.len(), 2);
/// ```
pub fn split_tool_output(output: &str) -> ToolOutput {
    split_with_markers(output, DEFAULT_START_MARKER, DEFAULT_END_MARKER)
}

/// Splits `output` with custom table markers.
pub fn split_with_markers(output: &str, start_marker: &str, end_marker: &str) -> ToolOutput {
    let mut table: Option<Vec<&str>> = None;
    let mut in_table = false;
    let mut progress_lines = Vec::new();

    for line in output.lines() {
        if in_table {
            if line.contains(end_marker) {
                in_table = false;
            } else {
                if let Some(rows) = table.as_mut() {
                    rows.push(line);
                }
                continue;
            }
        } else if table.is_none() && line.contains(start_marker) {
            table = Some(vec![line]);
            in_table = true;
            continue;
        }

        if !line.trim().is_empty() {
            progress_lines.push(line.to_string());
        }
    }

    ToolOutput {
        table: table.map(|rows| rows.join("\n")),
        progress_lines,
    }
}
