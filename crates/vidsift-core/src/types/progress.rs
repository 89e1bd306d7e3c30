use serde::{Deserialize, Serialize};

/// Numeric view of one `[download]` progress line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Completion in `[0.0, 100.0]`.
    pub percent: f32,

    /// Total size as printed by the tool (e.g. "15.23MiB").
    pub total_size: Option<String>,

    /// Current speed (e.g. "1.20MiB/s").
    pub speed: Option<String>,

    /// Remaining time (e.g. "00:25").
    pub eta: Option<String>,

    /// `(current, total)` fragment counters for segmented downloads.
    pub fragment: Option<(u32, u32)>,
}

impl ProgressSnapshot {
    /// Returns `true` once the download reports 100%.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.percent >= 100.0
    }
}
