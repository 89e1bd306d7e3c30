pub mod classification;
pub mod format;
pub mod label;
pub mod platform;
pub mod progress;

pub use classification::ClassificationResult;
pub use format::VideoFormatRecord;
pub use label::{EnglishLabels, LabelKey, LabelProvider, LabelTable};
pub use platform::Platform;
pub use progress::ProgressSnapshot;
