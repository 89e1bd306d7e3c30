use thiserror::Error;

/// Errors that can occur during vidsift core operations.
///
/// Most public entry points are best-effort and never surface these; they
/// are visible through the `try_*` variants and in logs.
#[derive(Debug, Error)]
pub enum VidsiftError {
    /// The tool output did not contain the format table marker.
    #[error("format table marker {marker:?} not found in tool output")]
    MissingTable {
        /// The marker that was searched for.
        marker: String,
    },

    /// The marker was present but no table rows followed it.
    #[error("format table is empty")]
    EmptyTable,

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// The URL could not be parsed.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A label table referenced a key that does not exist.
    #[error("unknown label key: {0:?}")]
    UnknownLabel(String),
}

/// Result type alias for vidsift operations.
pub type Result<T> = std::result::Result<T, VidsiftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = VidsiftError::EmptyTable;
        assert_eq!(err.to_string(), "format table is empty");

        let err = VidsiftError::MissingTable {
            marker: "[info] Available formats for".into(),
        };
        assert!(err.to_string().contains("Available formats for"));

        let err = VidsiftError::UnknownLabel("bogus".into());
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn url_errors_convert() {
        let err: VidsiftError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, VidsiftError::InvalidUrl(_)));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VidsiftError>();
    }
}
