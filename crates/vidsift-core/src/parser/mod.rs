pub mod columns;
pub mod output;
pub mod progress;
pub mod table;

pub use columns::{Column, ColumnDetector, ColumnSpan};
pub use output::{split_tool_output, split_with_markers, ToolOutput};
pub use progress::ProgressLineNormalizer;
pub use table::{FormatTableParser, TableParserConfig, DEFAULT_END_MARKER, DEFAULT_START_MARKER};
